use anyhow::Result;
use serde_json::Value;
use tracing::{info, warn};

use crate::keywords::KeywordTable;
use crate::line::events::MessageContent;
use crate::line::{LineClient, WebhookEvent};

/// Shared application state
pub struct AppState {
    pub http: reqwest::Client,
    pub keywords: KeywordTable,
}

impl AppState {
    pub fn new(keywords: KeywordTable) -> Self {
        Self {
            http: reqwest::Client::new(),
            keywords,
        }
    }
}

/// The reply a single event calls for, if any.
struct ReplyAction<'a> {
    reply_token: &'a str,
    chat_id: Option<&'a str>,
    payload: &'a Value,
}

/// Pure decision step: only text messages are actionable, and only when the
/// normalized text is an exact trigger in the table.
fn reply_action<'a>(event: &'a WebhookEvent, keywords: &'a KeywordTable) -> Option<ReplyAction<'a>> {
    let WebhookEvent::Message(message_event) = event else {
        return None;
    };
    let MessageContent::Text { text } = &message_event.message else {
        return None;
    };

    let payload = keywords.find(text)?;

    Some(ReplyAction {
        reply_token: &message_event.reply_token,
        chat_id: message_event.user_id(),
        payload,
    })
}

/// Handle one webhook event.
///
/// Non-actionable or unmatched events are a silent no-op. On a match the
/// loading indicator is issued as a detached best-effort task and the reply
/// is sent; only the reply send can fail the event.
pub async fn handle_event(
    event: &WebhookEvent,
    client: &LineClient,
    keywords: &KeywordTable,
) -> Result<()> {
    let Some(action) = reply_action(event, keywords) else {
        return Ok(());
    };

    info!("Matched keyword, replying to token {}", action.reply_token);

    if let Some(chat_id) = action.chat_id {
        let loading_client = client.clone();
        let chat_id = chat_id.to_string();
        tokio::spawn(async move {
            if let Err(e) = loading_client.start_loading(&chat_id).await {
                warn!("Failed to show loading animation: {e:#}");
            }
        });
    }

    client.reply(action.reply_token, action.payload).await
}
