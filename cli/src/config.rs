//! Configuration file handling for the CLI.
//!
//! Stores the signed-in session in `$XDG_CONFIG_HOME/livebet/config.toml` following
//! the XDG Base Directory Specification.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use livebet_business::{Locale, Session, SessionUser};
use serde::{Deserialize, Serialize};

/// CLI configuration stored on disk
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preferred label language when `--locale` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// The saved session
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Config {
    /// Returns `$XDG_CONFIG_HOME/livebet/config.toml` on Linux,
    /// appropriate paths on other platforms.
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "livebet", "livebet")
            .context("Failed to determine config directory")?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from `path`, or the default when the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration to `path`, creating its directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    pub fn has_token(&self) -> bool {
        self.auth.token.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.auth.username.as_deref()
    }

    /// The saved session, if one is complete. Expiry is checked by the session store.
    pub fn session(&self) -> Option<Session> {
        let auth = &self.auth;
        Some(Session {
            access_token: auth.token.clone()?,
            user: SessionUser::new(
                auth.user_id.clone().unwrap_or_default(),
                auth.username.clone().unwrap_or_default(),
            ),
            expires_at: auth.expires_at?,
        })
    }

    pub fn set_session(&mut self, session: &Session) {
        self.auth = AuthConfig {
            token: Some(session.access_token.clone()),
            user_id: Some(session.user.id.clone()),
            username: Some(session.user.user_name.clone()),
            expires_at: Some(session.expires_at),
        };
    }

    pub fn clear_auth(&mut self) {
        self.auth = AuthConfig::default();
    }
}
