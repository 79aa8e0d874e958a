//! Axum routes for the webhook endpoint and health check.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use secrecy::{ExposeSecret, SecretString};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use super::signature::{LINE_SIGNATURE_HEADER, validate_signature};
use crate::error::WebhookError;
use crate::pipeline::EventProcessor;

/// Max webhook payload size: 1 MB.
const WEBHOOK_MAX_BODY: usize = 1_048_576;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct WebhookState {
    pub processor: Arc<EventProcessor>,
    pub channel_secret: SecretString,
}

/// Build the router: `POST {webhook_path}` and `GET /health`.
pub fn routes(state: WebhookState, webhook_path: &str) -> Router {
    Router::new()
        .route(webhook_path, post(webhook_handler))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(WEBHOOK_MAX_BODY)),
        )
        .with_state(state)
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "line-reply-bot"
    }))
}

// ── Webhook ─────────────────────────────────────────────────────────────

impl WebhookError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingSignature | Self::InvalidSignature => StatusCode::UNAUTHORIZED,
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::MissingEvents => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(serde_json::json!({ "message": self.to_string() }))).into_response()
    }
}

/// Verify the signature and pull the `events` array out of the body.
fn extract_events(
    channel_secret: &str,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Vec<serde_json::Value>, WebhookError> {
    let signature = headers
        .get(LINE_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(WebhookError::MissingSignature)?;

    if !validate_signature(channel_secret, signature, body) {
        return Err(WebhookError::InvalidSignature);
    }

    let mut payload: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| WebhookError::InvalidBody(e.to_string()))?;

    match payload.get_mut("events").map(serde_json::Value::take) {
        Some(serde_json::Value::Array(events)) => Ok(events),
        _ => Err(WebhookError::MissingEvents),
    }
}

async fn webhook_handler(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let events = match extract_events(state.channel_secret.expose_secret(), &headers, &body) {
        Ok(events) => events,
        Err(e) => {
            warn!(error = %e, "Webhook request rejected");
            return e.into_response();
        }
    };

    debug!(events = events.len(), "Webhook batch received");
    let report = state.processor.process_batch(events).await;

    if report.is_success() {
        info!(
            events = report.len(),
            replied = report.replied(),
            observed = report.observed(),
            "Webhook batch processed"
        );
        StatusCode::OK.into_response()
    } else {
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;
    use crate::webhook::signature::sign_body;

    fn signed_headers(secret: &str, body: &[u8]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let sig = sign_body(secret, body).unwrap();
        headers.insert(LINE_SIGNATURE_HEADER, HeaderValue::from_str(&sig).unwrap());
        headers
    }

    #[test]
    fn extracts_events_from_signed_body() {
        let body = br#"{"destination":"U1","events":[{"type":"follow","replyToken":"r"}]}"#;
        let events = extract_events("s", &signed_headers("s", body), body).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["type"], "follow");
    }

    #[test]
    fn missing_signature_is_unauthorized() {
        let err = extract_events("s", &HeaderMap::new(), b"{}").unwrap_err();
        assert!(matches!(err, WebhookError::MissingSignature));
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn bad_signature_is_unauthorized() {
        let body = br#"{"events":[]}"#;
        let err = extract_events("s", &signed_headers("other", body), body).unwrap_err();
        assert!(matches!(err, WebhookError::InvalidSignature));
    }

    #[test]
    fn non_json_body_is_bad_request() {
        let body = b"events=1";
        let err = extract_events("s", &signed_headers("s", body), body).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn events_must_be_an_array() {
        for body in [&br#"{"events":{}}"#[..], &br#"{"destination":"U1"}"#[..]] {
            let err = extract_events("s", &signed_headers("s", body), body).unwrap_err();
            assert!(matches!(err, WebhookError::MissingEvents));
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
