//! CLI runner for interactive and single-prompt modes.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::chat::ChatController;
use crate::cli::repl::Repl;
use crate::config::Settings;
use crate::history::HistoryStore;
use crate::webhook::{Attachment, HttpWebhookClient};

/// Wire a controller from the settings: persisted proposal history plus the
/// HTTP webhook client.
pub fn build_controller(settings: &Settings) -> anyhow::Result<ChatController> {
    let history =
        HistoryStore::open().context("não foi possível abrir o histórico de propostas")?;
    let webhook = Arc::new(HttpWebhookClient::new(
        settings.endpoint.clone(),
        settings.chat_id.clone(),
        settings.session_id.clone(),
    ));
    Ok(ChatController::new(history, webhook))
}

/// Run a single prompt and exit. History is untouched: nothing is archived.
pub async fn run_single_prompt(
    settings: Settings,
    prompt: &str,
    file: Option<&Path>,
) -> anyhow::Result<()> {
    let mut controller = build_controller(&settings)?;

    if let Some(path) = file {
        let attachment = Attachment::from_path(path)
            .with_context(|| format!("não foi possível ler {}", path.display()))?;
        controller.stage_attachment(attachment);
    }

    // Handle the prompt directly
    let mut repl = Repl::new(controller);
    repl.handle_prompt(prompt).await?;

    Ok(())
}

/// Run in interactive mode.
pub async fn run_interactive(settings: Settings) -> anyhow::Result<()> {
    // Print welcome banner
    print_banner();

    let controller = build_controller(&settings)?;
    let mut repl = Repl::new(controller);

    // Run the REPL
    repl.run().await?;

    Ok(())
}

/// Whether the given arguments select single-prompt mode.
pub fn wants_single_prompt(prompt: Option<&str>, file: Option<&Path>) -> bool {
    prompt.is_some() || file.is_some()
}

/// Print the welcome banner.
///
/// This is public for testing purposes.
pub fn print_banner() {
    println!();
    println!("  \x1b[1;36m╔═╗╦═╗╔═╗╔═╗╔═╗╔═╗╔╦╗╔═╗\x1b[0m");
    println!("  \x1b[1;36m╠═╝╠╦╝║ ║╠═╝║ ║╚═╗ ║ ╠═╣\x1b[0m");
    println!(
        "  \x1b[1;36m╩  ╩╚═╚═╝╩  ╚═╝╚═╝ ╩ ╩ ╩\x1b[0m  \x1b[2mv{}\x1b[0m",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("  \x1b[2m📋 Assistente de propostas técnicas\x1b[0m");
    println!("  \x1b[2mDigite \x1b[0m\x1b[1;36m/help\x1b[0m\x1b[2m para ver os comandos ou comece a conversar!\x1b[0m");
    println!();
}

/// Get the application version string.
pub fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Generate the banner text lines without ANSI codes (for testing).
pub fn banner_text_lines() -> Vec<&'static str> {
    vec![
        "╔═╗╦═╗╔═╗╔═╗╔═╗╔═╗╔╦╗╔═╗",
        "╠═╝╠╦╝║ ║╠═╝║ ║╚═╗ ║ ╠═╣",
        "╩  ╩╚═╚═╝╩  ╚═╝╚═╝ ╩ ╩ ╩",
        "Assistente de propostas técnicas",
        "/help",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    // =========================================================================
    // Version Tests
    // =========================================================================

    #[test]
    fn test_get_version_not_empty() {
        assert!(!get_version().is_empty());
    }

    #[test]
    fn test_get_version_is_semver() {
        let parts: Vec<&str> = get_version().split('.').collect();
        assert_eq!(parts.len(), 3, "Expected X.Y.Z format, got: {}", get_version());
        for part in parts {
            let parsed: Result<u32, _> = part.parse();
            assert!(parsed.is_ok(), "Version part should be numeric: {}", part);
        }
    }

    #[test]
    fn test_version_matches_cargo_manifest() {
        assert_eq!(get_version(), env!("CARGO_PKG_VERSION"));
    }

    // =========================================================================
    // Banner Text Tests
    // =========================================================================

    #[test]
    fn test_banner_text_has_expected_line_count() {
        assert_eq!(banner_text_lines().len(), 5, "Banner should have 5 text lines");
    }

    #[test]
    fn test_banner_ascii_art_structure() {
        let lines = banner_text_lines();
        for i in 0..3 {
            assert!(
                lines[i]
                    .chars()
                    .any(|c| matches!(c, '╔' | '╗' | '╚' | '╝' | '═' | '╠' | '╣' | '╦' | '╩' | '║')),
                "Line {} should contain box drawing characters",
                i
            );
        }
    }

    #[test]
    fn test_banner_contains_tagline() {
        let lines = banner_text_lines();
        assert!(lines.iter().any(|l| l.contains("propostas")));
    }

    #[test]
    fn test_banner_help_hint_is_command_format() {
        let lines = banner_text_lines();
        let help_line = lines[4];
        assert!(help_line.starts_with('/'), "Help hint should be a / command");
    }

    #[test]
    fn test_banner_no_ansi_codes() {
        // banner_text_lines() should NOT contain ANSI escape sequences
        // (those are only in print_banner())
        for line in banner_text_lines() {
            assert!(!line.contains("\x1b["));
        }
    }

    #[test]
    fn test_banner_text_lines_consistent() {
        assert_eq!(banner_text_lines(), banner_text_lines());
    }

    #[test]
    fn test_banner_text_excludes_version() {
        // The version is appended dynamically in print_banner()
        let version = get_version();
        for line in banner_text_lines() {
            assert!(!line.contains(version));
        }
    }

    // =========================================================================
    // Mode Selection Tests
    // =========================================================================

    #[test]
    fn test_wants_single_prompt_combinations() {
        let file = PathBuf::from("memorial.pdf");
        assert!(!wants_single_prompt(None, None));
        assert!(wants_single_prompt(Some("gere a proposta"), None));
        assert!(wants_single_prompt(None, Some(&file)));
        assert!(wants_single_prompt(Some("gere a proposta"), Some(&file)));
    }

    #[test]
    fn test_wants_single_prompt_empty_prompt_counts() {
        // An explicitly empty prompt still selects single-prompt mode; the
        // send gate downstream decides whether anything goes out.
        assert!(wants_single_prompt(Some(""), None));
    }
}
