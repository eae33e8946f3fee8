//! Webhook settings persisted as a JSON config file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::XdgDirs;

/// Webhook endpoint used when no config file or override is present.
pub const DEFAULT_ENDPOINT: &str = "https://mlvservice.app.n8n.cloud/webhook-test/chatbot-TEC360";
/// Default client identifier sent with every request.
pub const DEFAULT_CHAT_ID: &str = "usuario-web";
/// Default session identifier sent with every request.
pub const DEFAULT_SESSION_ID: &str = "sessao-1";

/// Config file name inside the XDG config directory.
pub const SETTINGS_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// User-editable settings. Missing fields fall back to the defaults, so
/// a partial config file is fine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_chat_id")]
    pub chat_id: String,
    #[serde(default = "default_session_id")]
    pub session_id: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_chat_id() -> String {
    DEFAULT_CHAT_ID.to_string()
}

fn default_session_id() -> String {
    DEFAULT_SESSION_ID.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            chat_id: default_chat_id(),
            session_id: default_session_id(),
        }
    }
}

impl Settings {
    /// Load settings from the standard config location, writing a default
    /// file on first run.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(XdgDirs::new().config.join(SETTINGS_FILE))
    }

    /// Load settings from a specific path. A missing file is created with
    /// the defaults so users have something to edit.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        if !path.exists() {
            let settings = Self::default();
            settings.write_to(&path)?;
            return Ok(settings);
        }

        let content = std::fs::read_to_string(&path)?;
        let settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Write settings as pretty-printed JSON, creating parent directories.
    pub fn write_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
