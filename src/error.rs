//! Error types for the reply bot.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Reply table error: {0}")]
    ReplyTable(#[from] ReplyTableError),

    #[error("Event error: {0}")]
    Event(#[from] EventError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("Webhook error: {0}")]
    Webhook(#[from] WebhookError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// A reply table that must never serve traffic.
#[derive(Debug, thiserror::Error)]
pub enum ReplyTableError {
    #[error("Malformed reply table: rule #{index} has an empty keyword")]
    EmptyKeyword { index: usize },

    #[error("Malformed reply table: rule '{keyword}' has no candidate replies")]
    EmptyCandidates { keyword: String },

    #[error("Malformed reply table: fallback has no candidate replies")]
    EmptyFallback,

    #[error("Failed to parse reply table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read reply table: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-event classification errors.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Unknown message kind '{kind}': {payload}")]
    UnknownMessageKind {
        kind: String,
        payload: serde_json::Value,
    },

    #[error("Unknown event kind '{kind}'")]
    UnknownEventKind { kind: String },

    #[error("Event '{kind}' is missing required field '{field}'")]
    MissingField { kind: String, field: String },

    #[error("Malformed event: {0}")]
    Malformed(String),
}

/// Outbound channel errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Failed to send reply on channel {name}: {reason}")]
    SendFailed { name: String, reason: String },
}

/// Webhook request rejections.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("Missing X-Line-Signature header")]
    MissingSignature,

    #[error("Signature validation failed")]
    InvalidSignature,

    #[error("Request body is not valid JSON: {0}")]
    InvalidBody(String),

    #[error("Request body has no events array")]
    MissingEvents,
}

/// Failure of a single event's classify → select → send run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Classification failed: {0}")]
    Classify(#[from] EventError),

    #[error("Reply send failed: {0}")]
    Send(#[from] ChannelError),
}

/// Result type alias for the bot.
pub type Result<T> = std::result::Result<T, Error>;
