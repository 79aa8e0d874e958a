//! Configuration types.

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default Messaging API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.line.me";

/// Default webhook route.
pub const DEFAULT_WEBHOOK_PATH: &str = "/webhook";

/// Bot configuration.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Bearer token for the reply API.
    pub channel_access_token: SecretString,
    /// HMAC key used to verify webhook signatures.
    pub channel_secret: SecretString,
    /// Port the webhook server listens on.
    pub port: u16,
    /// Messaging API base URL (overridable for tests and proxies).
    pub api_base_url: String,
    /// Route the webhook is mounted on.
    pub webhook_path: String,
    /// Optional JSON reply table replacing the built-in one.
    pub reply_table_path: Option<String>,
}

impl BotConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
        };

        let channel_access_token = SecretString::from(required("LINE_CHANNEL_ACCESS_TOKEN")?);
        let channel_secret = SecretString::from(required("LINE_CHANNEL_SECRET")?);

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                message: format!("{raw:?}: {e}"),
            })?,
            None => DEFAULT_PORT,
        };

        let api_base_url = lookup("LINE_API_BASE_URL")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let webhook_path = lookup("WEBHOOK_PATH").unwrap_or_else(|| DEFAULT_WEBHOOK_PATH.to_string());
        if !webhook_path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                key: "WEBHOOK_PATH".to_string(),
                message: format!("{webhook_path:?} must start with '/'"),
            });
        }

        let reply_table_path = lookup("REPLY_TABLE_PATH").filter(|s| !s.trim().is_empty());

        Ok(Self {
            channel_access_token,
            channel_secret,
            port,
            api_base_url,
            webhook_path,
            reply_table_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn loads_required_values_with_defaults() {
        let config = BotConfig::from_lookup(lookup_from(&[
            ("LINE_CHANNEL_ACCESS_TOKEN", "token"),
            ("LINE_CHANNEL_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.channel_access_token.expose_secret(), "token");
        assert_eq!(config.channel_secret.expose_secret(), "secret");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.webhook_path, "/webhook");
        assert!(config.reply_table_path.is_none());
    }

    #[test]
    fn missing_secret_is_an_error() {
        let err = BotConfig::from_lookup(lookup_from(&[("LINE_CHANNEL_ACCESS_TOKEN", "token")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "LINE_CHANNEL_SECRET"));
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let err = BotConfig::from_lookup(lookup_from(&[
            ("LINE_CHANNEL_ACCESS_TOKEN", "  "),
            ("LINE_CHANNEL_SECRET", "secret"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "LINE_CHANNEL_ACCESS_TOKEN"));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = BotConfig::from_lookup(lookup_from(&[
            ("LINE_CHANNEL_ACCESS_TOKEN", "token"),
            ("LINE_CHANNEL_SECRET", "secret"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "PORT"));
    }

    #[test]
    fn overrides_are_applied() {
        let config = BotConfig::from_lookup(lookup_from(&[
            ("LINE_CHANNEL_ACCESS_TOKEN", "token"),
            ("LINE_CHANNEL_SECRET", "secret"),
            ("PORT", "8443"),
            ("LINE_API_BASE_URL", "http://localhost:9000/"),
            ("WEBHOOK_PATH", "/callback"),
            ("REPLY_TABLE_PATH", "./replies.json"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8443);
        assert_eq!(config.api_base_url, "http://localhost:9000");
        assert_eq!(config.webhook_path, "/callback");
        assert_eq!(config.reply_table_path.as_deref(), Some("./replies.json"));
    }

    #[test]
    fn webhook_path_must_be_absolute() {
        let err = BotConfig::from_lookup(lookup_from(&[
            ("LINE_CHANNEL_ACCESS_TOKEN", "token"),
            ("LINE_CHANNEL_SECRET", "secret"),
            ("WEBHOOK_PATH", "webhook"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "WEBHOOK_PATH"));
    }
}
