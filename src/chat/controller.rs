//! Orchestration of user intents.
//!
//! The controller owns the active conversation, the staged attachment, and
//! the history store. Webhook calls run on spawned tasks and report back
//! through an event channel, so every mutation of the conversation happens
//! on the caller's side when events are applied. Several calls may be in
//! flight at once; each settles independently.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::chat::{Conversation, Message};
use crate::history::{HistoryError, HistoryStore, ProposalEntry};
use crate::webhook::{Attachment, OutboundMessage, ProposalWebhook, WebhookError};

/// Canned reply shown in place of a bot message when delivery fails.
pub const SEND_FAILED_REPLY: &str = "Erro ao enviar mensagem. Tente novamente.";

/// Completion events posted by in-flight webhook calls.
#[derive(Debug)]
pub enum ChatEvent {
    ReplyArrived(Result<String, WebhookError>),
}

/// Derived figures for the stats display.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStats {
    /// Messages in the active conversation, greeting included.
    pub active_messages: usize,
    pub proposals: usize,
    pub last_date: Option<String>,
}

pub struct ChatController {
    conversation: Conversation,
    history: HistoryStore,
    staged: Option<Attachment>,
    webhook: Arc<dyn ProposalWebhook>,
    events_tx: mpsc::UnboundedSender<ChatEvent>,
    events_rx: mpsc::UnboundedReceiver<ChatEvent>,
}

impl ChatController {
    pub fn new(history: HistoryStore, webhook: Arc<dyn ProposalWebhook>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            conversation: Conversation::new(),
            history,
            staged: None,
            webhook,
            events_tx,
            events_rx,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn staged_attachment(&self) -> Option<&Attachment> {
        self.staged.as_ref()
    }

    /// Stage a file for the next send, replacing any previous one.
    pub fn stage_attachment(&mut self, attachment: Attachment) {
        tracing::debug!(file = %attachment.file_name, "staged attachment");
        self.staged = Some(attachment);
    }

    /// Submit the current input. Returns `false` (and changes nothing)
    /// when there is neither text nor a staged attachment.
    ///
    /// The user message is appended before the network call settles; the
    /// staged attachment is consumed either way.
    pub fn send(&mut self, text: &str) -> bool {
        if text.trim().is_empty() && self.staged.is_none() {
            return false;
        }

        let attachment = self.staged.take();
        let outbound = OutboundMessage::compose(text, attachment);
        self.conversation.push(Message::user(outbound.message.clone()));

        let webhook = Arc::clone(&self.webhook);
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let reply = webhook.send(&outbound).await;
            let _ = events_tx.send(ChatEvent::ReplyArrived(reply));
        });

        true
    }

    /// Wait for the next completion event.
    pub async fn next_event(&mut self) -> Option<ChatEvent> {
        self.events_rx.recv().await
    }

    /// Poll for a completion event without waiting.
    pub fn try_next_event(&mut self) -> Option<ChatEvent> {
        self.events_rx.try_recv().ok()
    }

    /// Apply a completion event to the conversation, returning the
    /// appended bot message.
    pub fn apply(&mut self, event: ChatEvent) -> Message {
        match event {
            ChatEvent::ReplyArrived(Ok(reply)) => {
                self.conversation.derive_title_if_untitled(&reply);
                let message = Message::bot(reply);
                self.conversation.push(message.clone());
                message
            }
            ChatEvent::ReplyArrived(Err(err)) => {
                tracing::warn!(error = %err, "webhook delivery failed");
                let message = Message::bot(SEND_FAILED_REPLY);
                self.conversation.push(message.clone());
                message
            }
        }
    }

    /// Archive the active conversation, then start a fresh one. Returns
    /// the archived entry, or `None` when only the greeting existed.
    pub fn new_conversation(&mut self) -> Result<Option<ProposalEntry>, HistoryError> {
        let title = self.conversation.current_title();
        let archived = self.history.archive(&title, self.conversation.messages())?;
        self.conversation.start_new();
        self.staged = None;
        Ok(archived)
    }

    /// Load an archived entry into the active conversation. Unknown ids
    /// leave everything unchanged.
    pub fn load(&mut self, entry_id: &str) -> bool {
        match self.history.get(entry_id) {
            Some(entry) => {
                self.conversation
                    .restore(entry.title.clone(), entry.messages.clone());
                true
            }
            None => false,
        }
    }

    /// Delete an archived entry. The active conversation keeps its own
    /// copy even if it was loaded from that entry.
    pub fn delete(&mut self, entry_id: &str) -> Result<bool, HistoryError> {
        self.history.delete(entry_id)
    }

    /// Transcript export for the active conversation: file name and
    /// contents.
    pub fn export(&self) -> (String, String) {
        (
            self.conversation.export_file_name(),
            self.conversation.transcript(),
        )
    }

    /// Figures derived from the active conversation and the archived
    /// history.
    pub fn stats(&self) -> HistoryStats {
        let entries = self.history.entries();
        HistoryStats {
            active_messages: self.conversation.messages().len(),
            proposals: entries.len(),
            last_date: entries.first().map(|entry| entry.date.clone()),
        }
    }
}
