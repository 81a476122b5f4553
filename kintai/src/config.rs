use std::path::PathBuf;

use anyhow::{Context as _, Result};
use freee_hr::{ClientCredentials, OAuthClient, API_BASE, AUTHORIZE_URL, TOKEN_URL};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Endpoint settings. Defaults point at freee production and can be overridden
/// with `KINTAI_AUTH_URL`, `KINTAI_TOKEN_URL` and `KINTAI_API_BASE`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub auth_url: String,
    pub token_url: String,
    pub api_base: String,
}

impl Settings {
    pub fn read() -> Result<Self, config::ConfigError> {
        Self::from_env(config::Environment::with_prefix("KINTAI"))
    }

    fn from_env(env: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("auth_url", AUTHORIZE_URL)?
            .set_default("token_url", TOKEN_URL)?
            .set_default("api_base", API_BASE)?
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    pub fn oauth_client(&self, credentials: ClientCredentials) -> OAuthClient {
        OAuthClient::new(credentials, &self.auth_url, &self.token_url)
    }
}

/// The directory holding `config.json` and `token.json` when `--config-dir`
/// is not given: next to the executable.
pub fn default_config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
    {
        return Ok(dir);
    }

    Ok(dirs::config_dir()
        .context("Cannot determine config directory")?
        .join("kintai"))
}

/// Contents of `config.json`. Filled in by `setup` (credentials) and `info`
/// (company and employee ids). Keys this tool does not know about are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmployeeScope {
    pub company_id: i64,
    pub employee_id: i64,
}

impl AppConfig {
    pub fn credentials(&self) -> Option<ClientCredentials> {
        let client_id = self.client_id.as_deref().filter(|s| !s.is_empty())?;
        let client_secret = self.client_secret.as_deref().filter(|s| !s.is_empty())?;

        Some(ClientCredentials {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        })
    }

    pub fn employee_scope(&self) -> Option<EmployeeScope> {
        Some(EmployeeScope {
            company_id: self.company_id?,
            employee_id: self.employee_id?,
        })
    }
}
