use anyhow::{Context, Result};
use serde_json::{json, Value};
use tracing::debug;

const API_BASE: &str = "https://api.line.me/v2/bot";

/// Seconds the typing indicator stays visible if no reply arrives first.
const LOADING_SECONDS: u32 = 5;

/// Thin client for the LINE Messaging API.
///
/// Constructed per request with the current access token; the underlying
/// `reqwest::Client` is shared so connections are pooled across requests.
#[derive(Clone)]
pub struct LineClient {
    http: reqwest::Client,
    access_token: String,
}

impl LineClient {
    pub fn new(http: reqwest::Client, access_token: String) -> Self {
        Self { http, access_token }
    }

    /// Send one reply message addressed to `reply_token`.
    pub async fn reply(&self, reply_token: &str, payload: &Value) -> Result<()> {
        let url = format!("{API_BASE}/message/reply");

        debug!("Sending reply for token {reply_token}");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&json!({
                "replyToken": reply_token,
                "messages": [payload],
            }))
            .send()
            .await
            .context("Failed to send reply request")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("LINE reply API error ({}): {}", status, error_body);
        }

        Ok(())
    }

    /// Show the chat loading animation to the user for a few seconds.
    pub async fn start_loading(&self, chat_id: &str) -> Result<()> {
        let url = format!("{API_BASE}/chat/loading/start");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&json!({
                "chatId": chat_id,
                "loadingSeconds": LOADING_SECONDS,
            }))
            .send()
            .await
            .context("Failed to send loading indicator request")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("LINE loading API error ({}): {}", status, error_body);
        }

        Ok(())
    }
}
