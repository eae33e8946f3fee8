//! Core REPL command handlers.
//!
//! This module contains implementations for basic REPL commands
//! that don't require complex state management.

use std::path::{Path, PathBuf};

use crate::chat::HistoryStats;
use crate::history::ProposalEntry;

/// Display the help message.
pub fn show_help() {
    println!(
        "
\x1b[1m📋 Comandos\x1b[0m

  \x1b[1;36m/help, /h, /?\x1b[0m          Mostrar esta ajuda
  \x1b[1;36m/exit, /quit, /q\x1b[0m       Sair
  \x1b[1;36m/clear, /cls\x1b[0m           Limpar a tela
  \x1b[1;36m/new, /n\x1b[0m               Nova conversa (arquiva a atual)
  \x1b[1;36m/version, /v\x1b[0m           Mostrar versão

\x1b[1mDocumentos:\x1b[0m
  \x1b[1;33m/attach <arquivo>, /a\x1b[0m  Anexar memorial descritivo (.pdf, .doc, .docx, .txt)

\x1b[1mHistórico:\x1b[0m
  \x1b[1;35m/history, /hist\x1b[0m        Listar propostas arquivadas
  \x1b[1;35m/open [título], /load\x1b[0m  Abrir proposta (seletor se vazio)
  \x1b[1;35m/delete [título], /rm\x1b[0m  Remover proposta (seletor se vazio)
  \x1b[1;35m/export [arquivo]\x1b[0m      Exportar a conversa para .txt
  \x1b[1;35m/stats\x1b[0m                 Estatísticas do histórico

\x1b[2mDigite normalmente para conversar com o assistente.\x1b[0m
\x1b[2mEnvie Enter com um arquivo anexado para submetê-lo sem texto.\x1b[0m
\x1b[2mTab completa comandos e títulos de propostas.\x1b[0m
"
    );
}

/// Handle the /version command.
pub fn cmd_version() {
    println!("📋 proposta v{}", env!("CARGO_PKG_VERSION"));
}

/// Handle the /new command.
pub fn cmd_new(archived: Option<&ProposalEntry>) {
    if let Some(entry) = archived {
        println!("💾 Proposta arquivada: \x1b[36m{}\x1b[0m", entry.title);
    }
    println!("🆕 Nova conversa iniciada");
}

/// Handle the /stats command - display conversation and history figures.
pub fn cmd_stats(stats: &HistoryStats) {
    println!("\n\x1b[1m📊 Estatísticas\x1b[0m\n");
    println!(
        "  Mensagens na conversa: \x1b[36m{}\x1b[0m",
        stats.active_messages
    );
    println!(
        "  Propostas:             \x1b[36m{}\x1b[0m",
        stats.proposals
    );
    println!(
        "  Última proposta:       {}",
        stats.last_date.as_deref().unwrap_or("-")
    );
    println!();
}

/// Handle the /export command - write the transcript to disk.
pub fn cmd_export(default_name: &str, contents: &str, args: &str) {
    let target = resolve_export_path(default_name, args);
    match std::fs::write(&target, contents) {
        Ok(()) => println!("💾 Conversa exportada: \x1b[36m{}\x1b[0m", target.display()),
        Err(e) => println!("❌ Falha ao exportar: {}", e),
    }
}

// =========================================================================
// Utility functions for testability
// =========================================================================

/// Where an export lands: the given path, the default name inside a given
/// directory, or the default name in the working directory.
pub fn resolve_export_path(default_name: &str, args: &str) -> PathBuf {
    if args.is_empty() {
        return PathBuf::from(default_name);
    }
    let expanded = PathBuf::from(shellexpand::tilde(args).as_ref());
    if expanded.is_dir() {
        expanded.join(default_name)
    } else {
        expanded
    }
}

/// Human-readable byte count for attachment feedback.
pub fn human_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// File name a path points at, for display.
pub fn display_file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
