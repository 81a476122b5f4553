use thiserror::Error;

/// Failures that end a command. Every variant is fatal; the message tells the
/// user what to run next where that applies.
#[derive(Debug, Error)]
pub enum KintaiError {
    #[error("CLIENT_ID と CLIENT_SECRET は必須です。")]
    MissingCredentials,
    #[error("先に 'setup' コマンドで CLIENT_ID/SECRET を設定してください。")]
    NotConfigured,
    #[error("認証されていません。先に 'auth' コマンドを実行してください。")]
    NotAuthenticated,
    #[error("先に 'info' コマンドで事業所ID・従業員IDを設定してください。")]
    IdsNotResolved,
    #[error("認可コードが入力されていません。")]
    EmptyAuthorizationCode,
    #[error("トークン取得に失敗しました。\n{0}")]
    TokenExchange(String),
    #[error("トークン更新エラー: {0}\n再度 'auth' コマンドを実行してください。")]
    TokenRefresh(String),
    #[error("所属する事業所がありません。")]
    NoCompanies,
    #[error("従業員が見つかりません。")]
    NoEmployees,
    #[error("無効な選択です: '{input}' (1-{max} の番号を入力してください)")]
    InvalidSelection { input: String, max: usize },
    #[error("✗ {label}打刻失敗: {message}")]
    ClockFailed { label: String, message: String },
}

impl KintaiError {
    /// Whether the message is already a complete report line and should be
    /// printed without the generic error prefix.
    pub fn is_report(&self) -> bool {
        matches!(self, KintaiError::ClockFailed { .. })
    }
}
