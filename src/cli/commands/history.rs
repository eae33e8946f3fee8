//! Archived proposal commands.

use dialoguer::{theme::ColorfulTheme, FuzzySelect};

use crate::chat::ChatController;
use crate::history::HistoryStore;

/// List archived proposals.
pub fn list(history: &HistoryStore) {
    if history.is_empty() {
        println!("\n  Nenhuma proposta arquivada.");
        println!("  Use /new para arquivar a conversa atual.\n");
        return;
    }

    println!("\n\x1b[1m📚 Histórico de Propostas\x1b[0m\n");
    for (i, entry) in history.entries().iter().enumerate() {
        println!("  {}. \x1b[1m{}\x1b[0m", i + 1, entry.title);
        println!(
            "     {} mensagens, {}",
            entry.messages.len(),
            entry.date
        );
    }
    println!("\n\x1b[2mUse /open <título> para abrir uma proposta\x1b[0m\n");
}

/// Open an archived proposal into the active conversation. Returns true
/// when one was loaded, so the caller can replay it.
pub fn open(controller: &mut ChatController, args: &str) -> bool {
    let id = if args.is_empty() {
        match pick_entry(controller.history(), "Abrir proposta") {
            Some(id) => id,
            None => return false,
        }
    } else {
        match resolve_entry_id(controller.history(), args) {
            Some(id) => id,
            None => {
                println!("❌ Proposta não encontrada: {}", args);
                return false;
            }
        }
    };

    if controller.load(&id) {
        let title = controller.conversation().current_title();
        println!("📥 Proposta carregada: \x1b[1m{}\x1b[0m", title);
        true
    } else {
        println!("❌ Proposta não encontrada: {}", args);
        false
    }
}

/// Delete an archived proposal.
pub fn delete(controller: &mut ChatController, args: &str) {
    let id = if args.is_empty() {
        match pick_entry(controller.history(), "Remover proposta") {
            Some(id) => id,
            None => return,
        }
    } else {
        match resolve_entry_id(controller.history(), args) {
            Some(id) => id,
            None => {
                println!("❌ Proposta não encontrada: {}", args);
                return;
            }
        }
    };

    match controller.delete(&id) {
        Ok(true) => println!("🗑️  Proposta removida"),
        Ok(false) => println!("❌ Proposta não encontrada: {}", args),
        Err(e) => println!("❌ Falha ao remover proposta: {}", e),
    }
}

/// Resolve user input to an entry id: exact id match first, then the
/// first title whose prefix matches case-insensitively.
pub fn resolve_entry_id(history: &HistoryStore, query: &str) -> Option<String> {
    if history.get(query).is_some() {
        return Some(query.to_string());
    }

    let query_lower = query.to_lowercase();
    history
        .entries()
        .iter()
        .find(|entry| entry.title.to_lowercase().starts_with(&query_lower))
        .map(|entry| entry.id.clone())
}

/// Interactive proposal picker using fuzzy select.
fn pick_entry(history: &HistoryStore, prompt: &str) -> Option<String> {
    if history.is_empty() {
        println!("  Nenhuma proposta arquivada.");
        return None;
    }

    let entries = history.entries();
    let display: Vec<String> = entries
        .iter()
        .map(|entry| {
            format!(
                "{} ({}, {} mensagens)",
                entry.title,
                entry.date,
                entry.messages.len()
            )
        })
        .collect();

    let selection = FuzzySelect::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&display)
        .interact_opt()
        .ok()??;

    Some(entries[selection].id.clone())
}
