//! Webhook delivery.
//!
//! Each submitted message becomes one multipart POST to the configured
//! endpoint. The reply body is a JSON object whose `response` field holds
//! the generated text; anything else degrades to a canned string.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Canned reply when the endpoint answers without usable text.
pub const NO_RESPONSE_REPLY: &str = "Não recebi resposta do servidor.";

/// Extensions the attach hint expects. Not enforced; the endpoint accepts
/// any bytes.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt"];

/// Delivery errors. Transport and parse failures collapse into one
/// variant since the caller recovers from both the same way.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// A file staged for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read a file from disk, taking its base name as the upload name.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "anexo".to_string());
        Ok(Self { file_name, bytes })
    }

    /// Whether the file name carries one of the expected extensions.
    pub fn has_accepted_extension(&self) -> bool {
        has_accepted_extension(&self.file_name)
    }
}

/// Case-insensitive extension check against [`ACCEPTED_EXTENSIONS`].
pub fn has_accepted_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            ACCEPTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// A message ready for delivery: the resolved `message` field plus the
/// optional attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    pub message: String,
    pub attachment: Option<Attachment>,
}

impl OutboundMessage {
    /// Build the outbound payload. When the text is empty but a file is
    /// attached, the message field is synthesized from the file name.
    pub fn compose(text: &str, attachment: Option<Attachment>) -> Self {
        let message = if text.is_empty() {
            match &attachment {
                Some(attachment) => format!("Arquivo anexado: {}", attachment.file_name),
                None => String::new(),
            }
        } else {
            text.to_string()
        };
        Self {
            message,
            attachment,
        }
    }
}

/// Extract the generated text from a reply body.
///
/// Any valid JSON without a non-empty string `response` field falls back
/// to [`NO_RESPONSE_REPLY`]; a body that is not JSON at all is a delivery
/// failure.
pub fn parse_reply(body: &str) -> Result<String, WebhookError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|err| WebhookError::Delivery(err.to_string()))?;

    match value.get("response").and_then(|field| field.as_str()) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Ok(NO_RESPONSE_REPLY.to_string()),
    }
}

/// Remote endpoint that turns a submitted message into a generated reply.
#[async_trait]
pub trait ProposalWebhook: Send + Sync {
    async fn send(&self, outbound: &OutboundMessage) -> Result<String, WebhookError>;
}

/// HTTP implementation: one multipart POST per message, no retries.
pub struct HttpWebhookClient {
    client: reqwest::Client,
    endpoint: String,
    chat_id: String,
    session_id: String,
}

impl HttpWebhookClient {
    pub fn new(
        endpoint: impl Into<String>,
        chat_id: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            chat_id: chat_id.into(),
            session_id: session_id.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ProposalWebhook for HttpWebhookClient {
    async fn send(&self, outbound: &OutboundMessage) -> Result<String, WebhookError> {
        let mut form = reqwest::multipart::Form::new()
            .text("message", outbound.message.clone())
            .text("chatId", self.chat_id.clone())
            .text("sessionId", self.session_id.clone());

        if let Some(attachment) = &outbound.attachment {
            let part = reqwest::multipart::Part::bytes(attachment.bytes.clone())
                .file_name(attachment.file_name.clone());
            form = form
                .part("data", part)
                .text("fileName", attachment.file_name.clone());
        }

        tracing::debug!(
            endpoint = %self.endpoint,
            has_attachment = outbound.attachment.is_some(),
            "posting message to webhook"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|err| WebhookError::Delivery(err.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|err| WebhookError::Delivery(err.to_string()))?;

        parse_reply(&body)
    }
}
