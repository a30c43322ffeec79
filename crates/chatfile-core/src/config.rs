use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::guard::ActionGuard;
use crate::locator::Credentials;

/// Download guard parameters (optional `[guard]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Minimum milliseconds between two admitted downloads of the same file.
    pub cooldown_ms: u64,
    /// Milliseconds after admission before the file leaves the in-flight set.
    pub release_after_ms: u64,
    /// Upper bound on remembered start times; expired idle entries are pruned past it.
    pub max_tracked_keys: usize,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 2000,
            release_after_ms: 2000,
            max_tracked_keys: 1024,
        }
    }
}

impl GuardConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn release_after(&self) -> Duration {
        Duration::from_millis(self.release_after_ms)
    }

    /// Build a fresh guard with these parameters.
    pub fn build_guard(&self) -> ActionGuard {
        ActionGuard::with_capacity(self.cooldown(), self.max_tracked_keys)
    }
}

/// Session credentials stored for CLI use. Normally supplied by the identity layer.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub session_id: String,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("token", &"<redacted>")
            .field("session_id", &self.session_id)
            .finish()
    }
}

impl From<CredentialsConfig> for Credentials {
    fn from(c: CredentialsConfig) -> Self {
        Credentials::new(c.token, c.session_id)
    }
}

/// Global configuration loaded from `~/.config/chatfile/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatfileConfig {
    /// Base URL that file identifiers are appended to, e.g. `https://cdn.example.com/chat/`.
    pub base_url: String,
    #[serde(default)]
    pub guard: GuardConfig,
    /// Optional stored credentials; environment and CLI flags take precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<CredentialsConfig>,
}

impl Default for ChatfileConfig {
    fn default() -> Self {
        Self {
            base_url: "https://cdn.example.com/chat/".to_string(),
            guard: GuardConfig::default(),
            credentials: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("chatfile")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ChatfileConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<ChatfileConfig> {
    if !path.exists() {
        let default_cfg = ChatfileConfig::default();
        let toml = toml::to_string_pretty(&default_cfg).context("serialize default config")?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config dir: {}", parent.display()))?;
        }
        fs::write(path, toml).with_context(|| format!("write config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(path)
}

/// Load configuration from an existing file.
pub fn load_from_path(path: &Path) -> Result<ChatfileConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: ChatfileConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
