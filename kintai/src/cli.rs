use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "kintai")]
#[command(about = "freee 勤怠管理 CLI ツール")]
#[command(after_help = "\
使用例:
  kintai setup       # 初期設定 (CLIENT_ID/SECRET)
  kintai auth        # OAuth認証
  kintai info        # 事業所ID・従業員ID取得
  kintai in          # 出勤打刻
  kintai out         # 退勤打刻
  kintai break-begin # 休憩開始
  kintai break-end   # 休憩終了
  kintai status      # 今日の打刻状況
  kintai available   # 打刻可能な種別")]
pub struct Cli {
    /// Directory holding config.json and token.json (defaults to the executable's directory)
    #[arg(long, global = true, env = "KINTAI_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The subcommand to run, or the help text to print when none was given.
    /// Printing help is a normal exit.
    pub fn command_or_help(self) -> Result<Commands, String> {
        self.command.ok_or_else(help_text)
    }
}

pub fn help_text() -> String {
    Cli::command().render_help().to_string()
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// 初期設定 (CLIENT_ID/SECRET)
    Setup,
    /// OAuth認証
    Auth,
    /// 事業所ID・従業員ID取得
    Info,
    /// 出勤打刻
    In,
    /// 退勤打刻
    Out,
    /// 休憩開始
    BreakBegin,
    /// 休憩終了
    BreakEnd,
    /// 打刻状況
    Status {
        /// 昨日の状況
        #[arg(short, long)]
        yesterday: bool,
        /// 日付指定 (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// 打刻可能な種別
    Available,
}
