use anyhow::{Context, Result};

use crate::error::WebhookError;

/// LINE channel credentials, read from the environment on every webhook
/// request so a rotated secret takes effect without a restart.
#[derive(Debug, Clone)]
pub struct LineConfig {
    pub channel_access_token: String,
    pub channel_secret: String,
}

impl LineConfig {
    pub fn from_env() -> Result<Self, WebhookError> {
        Self::from_vars(
            std::env::var("CHANNEL_ACCESS_TOKEN").ok(),
            std::env::var("CHANNEL_SECRET").ok(),
        )
    }

    /// Extracted so the missing-variable paths can be unit-tested without
    /// touching the process environment.
    fn from_vars(token: Option<String>, secret: Option<String>) -> Result<Self, WebhookError> {
        match (token, secret) {
            (Some(channel_access_token), Some(channel_secret))
                if !channel_access_token.is_empty() && !channel_secret.is_empty() =>
            {
                Ok(Self {
                    channel_access_token,
                    channel_secret,
                })
            }
            _ => Err(WebhookError::MissingConfig),
        }
    }
}

/// Listen address for the HTTP server, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Invalid PORT value: {raw}"))?,
            Err(_) => 3000,
        };
        Ok(Self { host, port })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vars_both_present() {
        let cfg = LineConfig::from_vars(Some("token".into()), Some("secret".into())).unwrap();
        assert_eq!(cfg.channel_access_token, "token");
        assert_eq!(cfg.channel_secret, "secret");
    }

    #[test]
    fn test_from_vars_missing_token() {
        let err = LineConfig::from_vars(None, Some("secret".into())).unwrap_err();
        assert!(matches!(err, WebhookError::MissingConfig));
    }

    #[test]
    fn test_from_vars_missing_secret() {
        let err = LineConfig::from_vars(Some("token".into()), None).unwrap_err();
        assert!(matches!(err, WebhookError::MissingConfig));
    }

    #[test]
    fn test_from_vars_empty_counts_as_missing() {
        let err = LineConfig::from_vars(Some(String::new()), Some("secret".into())).unwrap_err();
        assert!(matches!(err, WebhookError::MissingConfig));
    }

    #[test]
    fn test_server_config_addr() {
        let cfg = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        };
        assert_eq!(cfg.addr(), "127.0.0.1:8080");
    }
}
