use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use futures::future::join_all;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::bot::{self, AppState};
use crate::config::LineConfig;
use crate::error::WebhookError;
use crate::line::{signature, LineClient, WebhookBody};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/webhook", post(webhook))
        .with_state(state)
}

/// Liveness probe. No inputs, no side effects.
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "Bot is live!" }))
}

/// LINE webhook callback.
///
/// The body is taken as raw text because the signature covers the exact
/// bytes on the wire; parsing happens only after verification.
async fn webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<Value>, WebhookError> {
    let config = match LineConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Missing LINE channel access token or channel secret");
            return Err(e);
        }
    };

    let signature_header = headers
        .get("x-line-signature")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if !signature::verify_signature(&config.channel_secret, body.as_bytes(), signature_header) {
        warn!("Invalid webhook signature received");
        return Err(WebhookError::InvalidSignature);
    }

    let parsed: WebhookBody = serde_json::from_str(&body).map_err(|e| {
        error!("Failed to parse webhook body: {e}");
        WebhookError::Parse(e)
    })?;

    if parsed.events.is_empty() {
        return Ok(Json(json!({ "success": true })));
    }

    info!("Dispatching {} webhook event(s)", parsed.events.len());

    let client = LineClient::new(state.http.clone(), config.channel_access_token);

    // Fan out over the batch and wait for every event; the first failure
    // fails the request, but siblings still run to completion.
    let results = join_all(
        parsed
            .events
            .iter()
            .map(|event| bot::handle_event(event, &client, &state.keywords)),
    )
    .await;

    let mut failed = None;
    for result in results {
        if let Err(e) = result {
            error!("Webhook event dispatch failed: {e:#}");
            if failed.is_none() {
                failed = Some(e);
            }
        }
    }
    if let Some(e) = failed {
        return Err(WebhookError::Dispatch(e));
    }

    Ok(Json(json!({ "success": true })))
}
