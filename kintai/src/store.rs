use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use freee_hr::TokenSet;
use serde::{de::DeserializeOwned, Serialize};
#[cfg(unix)]
use std::{io::Write, os::unix::fs::OpenOptionsExt, os::unix::fs::PermissionsExt};

use crate::config::AppConfig;

pub const CONFIG_FILE: &str = "config.json";
pub const TOKEN_FILE: &str = "token.json";

/// Where the two secret-bearing documents live. Commands only go through this
/// trait, so the file backend can be replaced by a platform keystore.
pub trait DocumentStore {
    /// Returns an empty config when nothing has been saved yet.
    fn load_config(&self) -> Result<AppConfig>;
    fn save_config(&self, config: &AppConfig) -> Result<()>;
    /// Returns `None` when no token has been saved yet.
    fn load_token(&self) -> Result<Option<TokenSet>>;
    fn save_token(&self, token: &TokenSet) -> Result<()>;

    fn config_location(&self) -> String;
    fn token_location(&self) -> String;
}

/// Plain JSON files readable and writable by the owner only.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    pub fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }
}

impl DocumentStore for FileStore {
    fn load_config(&self) -> Result<AppConfig> {
        Ok(read_json(&self.config_path())?.unwrap_or_default())
    }

    fn save_config(&self, config: &AppConfig) -> Result<()> {
        write_json(&self.config_path(), config)
    }

    fn load_token(&self) -> Result<Option<TokenSet>> {
        read_json(&self.token_path())
    }

    fn save_token(&self, token: &TokenSet) -> Result<()> {
        write_json(&self.token_path(), token)
    }

    fn config_location(&self) -> String {
        self.config_path().display().to_string()
    }

    fn token_location(&self) -> String {
        self.token_path().display().to_string()
    }
}

/// A missing or blank file reads as `None`.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(None);
    }

    let value = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(Some(value))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    secure_write(path, &content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "saved document");
    Ok(())
}

fn secure_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    #[cfg(unix)]
    {
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?;
        // `mode` only applies when the file is created. Narrow an existing
        // file before any content reaches it.
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        file.write_all(content.as_bytes())?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, content)?;
    }

    Ok(())
}
