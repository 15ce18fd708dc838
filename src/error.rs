use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Webhook request error types.
///
/// Response bodies are fixed generic strings; detail goes to the server log
/// only.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Channel credentials are not set in the environment.
    #[error("Missing LINE channel access token or channel secret")]
    MissingConfig,

    /// The x-line-signature header is absent or does not match the body.
    #[error("Invalid webhook signature")]
    InvalidSignature,

    /// The request body is not a valid webhook document.
    #[error("Malformed webhook body: {0}")]
    Parse(#[from] serde_json::Error),

    /// A reply send failed while dispatching events.
    #[error("Event dispatch failed: {0}")]
    Dispatch(#[from] anyhow::Error),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::MissingConfig => (StatusCode::INTERNAL_SERVER_ERROR, "Server configuration error"),
            Self::InvalidSignature => (StatusCode::UNAUTHORIZED, "Invalid signature"),
            Self::Parse(_) | Self::Dispatch(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_maps_to_500() {
        let resp = WebhookError::MissingConfig.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_invalid_signature_maps_to_401() {
        let resp = WebhookError::InvalidSignature.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_parse_error_maps_to_500() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let resp = WebhookError::Parse(err).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_dispatch_error_maps_to_500() {
        let resp = WebhookError::Dispatch(anyhow::anyhow!("reply failed")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
