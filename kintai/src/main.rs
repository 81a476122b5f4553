use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use kintai::{
    cli::{Cli, Commands},
    config::{default_config_dir, Settings},
    console::Terminal,
    error::KintaiError,
    store::FileStore,
    time_utils, Context,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Endpoint overrides may live in a local .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut cli = Cli::parse();
    let config_dir = cli.config_dir.take();
    let command = match cli.command_or_help() {
        Ok(command) => command,
        Err(help) => {
            println!("{}", help);
            return;
        }
    };

    if let Err(err) = run(config_dir, command).await {
        match err.downcast_ref::<KintaiError>() {
            Some(e) if e.is_report() => eprintln!("{}", e),
            _ => eprintln!("エラー: {:#}", err),
        }
        std::process::exit(1);
    }
}

async fn run(config_dir: Option<PathBuf>, command: Commands) -> Result<()> {
    let settings = Settings::read().context("Failed to read settings")?;
    let config_dir = match config_dir {
        Some(dir) => dir,
        None => default_config_dir()?,
    };
    tracing::debug!(config_dir = %config_dir.display(), "using config directory");

    let ctx = Context::new(
        settings,
        Box::new(FileStore::new(config_dir)),
        time_utils::local_today(),
    );
    kintai::run(command, &ctx, &mut Terminal).await
}
