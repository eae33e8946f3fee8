//! Configuration management.

mod settings;
mod xdg;

pub use settings::{ConfigError, Settings, DEFAULT_CHAT_ID, DEFAULT_ENDPOINT, DEFAULT_SESSION_ID};
pub use xdg::XdgDirs;
