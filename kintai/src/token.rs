use anyhow::Result;
use freee_hr::{AuthError, FreeeClient};

use crate::{commands::Context, error::KintaiError};

/// Build an API client with a usable access token.
///
/// When a refresh token is stored it is always exchanged first and the new
/// response replaces the stored document. The stored access token is only used
/// directly when there is nothing to refresh with.
pub async fn authorized_client(ctx: &Context) -> Result<FreeeClient> {
    let token = ctx.store.load_token()?.unwrap_or_default();

    let Some(access_token) = token.access_token.filter(|t| !t.is_empty()) else {
        return Err(KintaiError::NotAuthenticated.into());
    };

    let Some(refresh_token) = token.refresh_token.filter(|t| !t.is_empty()) else {
        tracing::debug!("no refresh token stored, using access token as is");
        return Ok(FreeeClient::new(&ctx.settings.api_base, access_token));
    };

    let credentials = ctx
        .store
        .load_config()?
        .credentials()
        .ok_or(KintaiError::NotConfigured)?;

    let refreshed = ctx
        .settings
        .oauth_client(credentials)
        .refresh(&refresh_token)
        .await
        .map_err(|e| match e {
            AuthError::Rejected { body, .. } => KintaiError::TokenRefresh(body),
            other => KintaiError::TokenRefresh(other.to_string()),
        })?;

    ctx.store.save_token(&refreshed)?;

    let access_token = refreshed
        .access_token
        .ok_or(KintaiError::NotAuthenticated)?;
    Ok(FreeeClient::new(&ctx.settings.api_base, access_token))
}
