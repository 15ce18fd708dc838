//! Serde model of the webhook callback body.
//!
//! Only the fields this bot acts on are modeled; everything else the
//! platform sends is ignored by deserialization.

use serde::Deserialize;

/// Top-level webhook document: `{"destination": "...", "events": [...]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookBody {
    /// Missing or empty means there is nothing to do for this request.
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

/// One platform event, discriminated by `type`.
///
/// Every kind other than `message` (follow, join, postback, ...) collapses
/// into `Other` and is skipped by the dispatcher.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WebhookEvent {
    Message(MessageEvent),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    /// Opaque single-use token addressing the reply to this exact event.
    pub reply_token: String,
    #[serde(default)]
    pub source: Option<EventSource>,
    pub message: MessageContent,
}

impl MessageEvent {
    /// User id of the sender, when the platform included one (1:1 chats).
    pub fn user_id(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.user_id.as_deref())
    }
}

/// Message payload, discriminated by `type`. Non-text messages (stickers,
/// images, ...) collapse into `Other`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    #[serde(default)]
    pub user_id: Option<String>,
}
