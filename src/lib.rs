//! Proposta Library
//!
//! This crate provides the core functionality for the Proposta CLI.
//!
//! This library exposes many types for external consumers. The unused_imports
//! warning is suppressed because these are re-exports meant for library users.

#![allow(dead_code)] // Library APIs may not be used internally
#![allow(unused_imports)] // Re-exports for library consumers
//!
//! ## Main Components
//!
//! - [`chat`] - Active conversation state and the intent controller
//! - [`cli`] - Command-line interface (REPL, commands, runner)
//! - [`config`] - Configuration and settings management
//! - [`format`] - Reply text classification and terminal rendering
//! - [`history`] - Persisted proposal history
//! - [`webhook`] - Multipart webhook delivery
//!
//! ## Quick Start
//!
//! ```ignore
//! use proposta::{ChatController, HistoryStore, HttpWebhookClient, Settings};
//!
//! let settings = Settings::load()?;
//! let history = HistoryStore::open()?;
//! let webhook = std::sync::Arc::new(HttpWebhookClient::new(
//!     settings.endpoint.clone(),
//!     settings.chat_id.clone(),
//!     settings.session_id.clone(),
//! ));
//! let controller = ChatController::new(history, webhook);
//! ```

pub mod chat;
pub mod cli;
pub mod config;
pub mod format;
pub mod history;
pub mod webhook;

// Re-export commonly used types
pub use chat::{
    ChatController, ChatEvent, Conversation, HistoryStats, Message, GREETING, SEND_FAILED_REPLY,
};
pub use cli::{create_reedline, PropostaCompleter, PropostaPrompt, Repl, COMMANDS};
pub use config::{Settings, XdgDirs};
pub use format::{format_reply, DisplayBlock, RenderStyle, ReplyRenderer};
pub use history::{HistoryError, HistoryStore, ProposalEntry};
pub use webhook::{
    Attachment, HttpWebhookClient, OutboundMessage, ProposalWebhook, WebhookError,
    NO_RESPONSE_REPLY,
};
