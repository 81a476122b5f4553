use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const AUTHORIZE_URL: &str = "https://accounts.secure.freee.co.jp/public_api/authorize";
pub const TOKEN_URL: &str = "https://accounts.secure.freee.co.jp/public_api/token";

/// Out-of-band redirect: freee shows the authorization code in the browser
/// instead of redirecting to a local listener.
pub const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";
pub const SCOPES: &str = "hr.time_clocks hr.employees offline_access";

/// Token endpoint response, kept verbatim.
///
/// Only the two tokens are typed. Everything else the provider sends
/// (`token_type`, `expires_in`, `scope`, `created_at`, `company_id`, ...) lands
/// in `extra` so the document can be written back exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Token request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{body}")]
    Rejected { status: u16, body: String },
    #[error("Failed to parse token response: {0}")]
    ParsingError(String),
}

#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: Client,
    credentials: ClientCredentials,
    authorize_url: String,
    token_url: String,
}

impl OAuthClient {
    pub fn new(
        credentials: ClientCredentials,
        authorize_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            credentials,
            authorize_url: authorize_url.into(),
            token_url: token_url.into(),
        }
    }

    /// The consent page the user opens in a browser. `prompt=select_company`
    /// makes freee ask for the company again even if one was chosen before.
    pub fn authorize_url(&self) -> Result<Url, AuthError> {
        let mut url = Url::parse(&self.authorize_url).map_err(|e| AuthError::InvalidUrl {
            url: self.authorize_url.clone(),
            reason: e.to_string(),
        })?;

        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.credentials.client_id)
            .append_pair("redirect_uri", OOB_REDIRECT_URI)
            .append_pair("scope", SCOPES)
            .append_pair("prompt", "select_company");

        Ok(url)
    }

    pub async fn exchange_code(&self, code: &str) -> Result<TokenSet, AuthError> {
        self.request_token(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", OOB_REDIRECT_URI),
        ])
        .await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenSet, AuthError> {
        self.request_token(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    #[tracing::instrument(name = "token_request", skip_all, fields(grant_type = form[0].1))]
    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenSet, AuthError> {
        let resp = self
            .http
            .post(&self.token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(form)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        tracing::debug!(status = status.as_u16(), "token endpoint responded");

        if !status.is_success() {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenSet =
            serde_json::from_str(&body).map_err(|e| AuthError::ParsingError(e.to_string()))?;
        if token.access_token.is_none() {
            return Err(AuthError::ParsingError(
                "response did not contain an access_token".to_string(),
            ));
        }

        Ok(token)
    }
}
