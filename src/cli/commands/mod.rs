//! REPL command handlers.

pub mod core;
pub mod history;
