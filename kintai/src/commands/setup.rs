use anyhow::Result;

use super::Context;
use crate::{console::Console, error::KintaiError};

pub fn run(ctx: &Context, console: &mut dyn Console) -> Result<()> {
    console.print("=== freee API 初期設定 ===\n");

    let mut config = ctx.store.load_config()?;

    let client_id = console.prompt(&format!(
        "CLIENT_ID [{}]: ",
        config.client_id.as_deref().unwrap_or("")
    ))?;
    if !client_id.is_empty() {
        config.client_id = Some(client_id);
    }

    let client_secret = console.prompt_secret("CLIENT_SECRET: ")?;
    if !client_secret.is_empty() {
        config.client_secret = Some(client_secret);
    }

    if config.credentials().is_none() {
        return Err(KintaiError::MissingCredentials.into());
    }

    ctx.store.save_config(&config)?;
    console.print(&format!(
        "\n設定を保存しました: {}",
        ctx.store.config_location()
    ));
    console.print("次に 'auth' コマンドで認証を行ってください。");

    Ok(())
}
