//! CLI components.

pub mod commands;
pub mod completion;
pub mod repl;
pub mod runner;
pub mod spinner;

pub use completion::{create_reedline, PropostaCompleter, PropostaPrompt, COMMANDS};
pub use repl::Repl;
pub use runner::{run_interactive, run_single_prompt, wants_single_prompt};
pub use spinner::{Spinner, SpinnerConfig, SpinnerHandle};
