//! Conversation state for the proposal assistant.
//!
//! A conversation is an append-only list of [`Message`]s that always starts
//! with the assistant greeting. The active conversation lives here; archived
//! snapshots live in [`crate::history`].

pub mod controller;
pub mod title;

pub use controller::{ChatController, ChatEvent, HistoryStats, SEND_FAILED_REPLY};

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Greeting shown at the start of every conversation.
pub const GREETING: &str = "Olá! Sou seu assistente especializado em propostas técnicas. \
Anexe seu memorial descritivo e eu criarei uma proposta profissional completa para você.";

/// Divider between transcript entries in exported text.
pub const TRANSCRIPT_DIVIDER: &str = "----------------------------------------";

/// A single chat message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, true)
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(content, false)
    }

    fn new(content: impl Into<String>, is_user: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            is_user,
            timestamp: Utc::now(),
        }
    }

    /// Display role for transcripts.
    pub fn role(&self) -> &'static str {
        if self.is_user {
            "Você"
        } else {
            "Assistente"
        }
    }
}

/// The active conversation: an ordered, never-empty message list plus the
/// derived proposal title (`None` until the first generated reply names one).
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    title: Option<String>,
}

impl Conversation {
    /// Start a conversation containing only the greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::bot(GREETING)],
            title: None,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Title used when archiving: the derived one, or a dated default.
    pub fn current_title(&self) -> String {
        self.title.clone().unwrap_or_else(title::default_title)
    }

    /// Append a message to the end of the list.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Reset to a fresh greeting with a new id and timestamp.
    pub fn start_new(&mut self) {
        self.messages = vec![Message::bot(GREETING)];
        self.title = None;
    }

    /// Replace the message list and title with an archived snapshot.
    pub fn restore(&mut self, title: impl Into<String>, messages: Vec<Message>) {
        self.messages = messages;
        self.title = Some(title.into());
    }

    /// Set the title from the first generated reply; later replies are
    /// ignored once a title exists.
    pub fn derive_title_if_untitled(&mut self, reply: &str) {
        if self.title.is_none() {
            self.title = Some(title::derive_title(reply));
        }
    }

    /// Plain-text transcript of the conversation.
    pub fn transcript(&self) -> String {
        let entries: Vec<String> = self
            .messages
            .iter()
            .map(|message| {
                format!(
                    "{} ({}): {}",
                    message.role(),
                    message
                        .timestamp
                        .with_timezone(&Local)
                        .format("%d/%m/%Y %H:%M"),
                    message.content
                )
            })
            .collect();
        entries.join(&format!("\n{}\n", TRANSCRIPT_DIVIDER))
    }

    /// File name for transcript export. Slashes in dated titles are
    /// replaced so the name stays a single path component.
    pub fn export_file_name(&self) -> String {
        format!("{}.txt", self.current_title().replace('/', "-"))
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Message Tests
    // =========================================================================

    #[test]
    fn test_message_user_flag() {
        assert!(Message::user("oi").is_user);
        assert!(!Message::bot("olá").is_user);
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::user("a");
        let b = Message::user("a");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_message_roles() {
        assert_eq!(Message::user("x").role(), "Você");
        assert_eq!(Message::bot("x").role(), "Assistente");
    }

    #[test]
    fn test_message_serde_round_trip() {
        let message = Message::user("conteúdo");
        let json = serde_json::to_string(&message).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, message);
    }

    // =========================================================================
    // Conversation Tests
    // =========================================================================

    #[test]
    fn test_new_conversation_starts_with_greeting() {
        let conversation = Conversation::new();
        assert_eq!(conversation.messages().len(), 1);
        assert_eq!(conversation.messages()[0].content, GREETING);
        assert!(!conversation.messages()[0].is_user);
        assert!(conversation.title().is_none());
    }

    #[test]
    fn test_push_appends_in_order() {
        let mut conversation = Conversation::new();
        conversation.push(Message::user("primeira"));
        conversation.push(Message::bot("segunda"));
        let contents: Vec<&str> = conversation
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec![GREETING, "primeira", "segunda"]);
    }

    #[test]
    fn test_start_new_resets_messages_and_title() {
        let mut conversation = Conversation::new();
        let old_greeting_id = conversation.messages()[0].id.clone();
        conversation.push(Message::user("oi"));
        conversation.derive_title_if_untitled("Sistema de ventilação");

        conversation.start_new();

        assert_eq!(conversation.messages().len(), 1);
        assert!(conversation.title().is_none());
        assert_ne!(conversation.messages()[0].id, old_greeting_id);
    }

    #[test]
    fn test_restore_replaces_state() {
        let mut conversation = Conversation::new();
        let snapshot = vec![Message::bot(GREETING), Message::user("antiga")];
        conversation.restore("Sistema antigo", snapshot.clone());

        assert_eq!(conversation.title(), Some("Sistema antigo"));
        assert_eq!(conversation.messages(), snapshot.as_slice());
    }

    // =========================================================================
    // Title Derivation Tests
    // =========================================================================

    #[test]
    fn test_derive_title_once() {
        let mut conversation = Conversation::new();
        conversation.derive_title_if_untitled("Sistema de irrigação por gotejamento");
        assert_eq!(conversation.title(), Some("Sistema de irrigação por"));

        conversation.derive_title_if_untitled("Equipamento diferente agora");
        assert_eq!(conversation.title(), Some("Sistema de irrigação por"));
    }

    #[test]
    fn test_derive_title_without_keyword_uses_default() {
        let mut conversation = Conversation::new();
        conversation.derive_title_if_untitled("Tudo certo, segue a proposta.");
        let title = conversation.title().unwrap();
        assert!(title.starts_with("Proposta "));
    }

    #[test]
    fn test_current_title_defaults_when_untitled() {
        let conversation = Conversation::new();
        assert!(conversation.current_title().starts_with("Proposta "));
    }

    // =========================================================================
    // Transcript Tests
    // =========================================================================

    #[test]
    fn test_transcript_contains_roles_and_contents() {
        let mut conversation = Conversation::new();
        conversation.push(Message::user("Preciso de um orçamento"));
        conversation.push(Message::bot("Segue a proposta"));

        let transcript = conversation.transcript();
        assert!(transcript.contains("Assistente ("));
        assert!(transcript.contains("Você ("));
        assert!(transcript.contains("Preciso de um orçamento"));
        assert!(transcript.contains("Segue a proposta"));
    }

    #[test]
    fn test_transcript_divider_between_entries() {
        let mut conversation = Conversation::new();
        conversation.push(Message::user("oi"));

        let transcript = conversation.transcript();
        assert_eq!(transcript.matches(TRANSCRIPT_DIVIDER).count(), 1);
    }

    #[test]
    fn test_export_file_name_replaces_slashes() {
        let conversation = Conversation::new();
        let name = conversation.export_file_name();
        assert!(name.ends_with(".txt"));
        assert!(!name.contains('/'));
    }

    #[test]
    fn test_export_file_name_uses_derived_title() {
        let mut conversation = Conversation::new();
        conversation.derive_title_if_untitled("Equipamento de solda MIG");
        assert_eq!(conversation.export_file_name(), "Equipamento de solda MIG.txt");
    }
}
