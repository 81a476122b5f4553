use anyhow::Result;
use freee_hr::AuthError;

use super::Context;
use crate::{console::Console, error::KintaiError};

pub async fn run(ctx: &Context, console: &mut dyn Console) -> Result<()> {
    let credentials = ctx
        .store
        .load_config()?
        .credentials()
        .ok_or(KintaiError::NotConfigured)?;

    let oauth = ctx.settings.oauth_client(credentials);
    let auth_url = oauth.authorize_url()?;

    console.print("=== freee OAuth 認証 ===\n");
    console.print("ブラウザで認証ページを開きます...");
    console.print(&format!("\nURL: {}\n", auth_url));

    console.open_url(auth_url.as_str());

    console.print("ブラウザで許可した後、表示される認可コードを入力してください。");
    let code = console.prompt("\n認可コード: ")?;
    if code.is_empty() {
        return Err(KintaiError::EmptyAuthorizationCode.into());
    }

    let token = oauth.exchange_code(&code).await.map_err(|e| match e {
        AuthError::Rejected { body, .. } => KintaiError::TokenExchange(body),
        other => KintaiError::TokenExchange(other.to_string()),
    })?;

    ctx.store.save_token(&token)?;
    console.print(&format!(
        "\n認証成功！トークンを保存しました: {}",
        ctx.store.token_location()
    ));
    console.print("次に 'info' コマンドで事業所ID・従業員IDを取得してください。");

    Ok(())
}
