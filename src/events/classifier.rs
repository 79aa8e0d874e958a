//! Event classifier.
//!
//! Reduces one inbound event to a [`ClassifiedEvent`]:
//! - message events dispatch on the message subtype
//! - follow/join/postback/beacon keep the fields their acknowledgment needs
//! - unfollow/leave (and platform verification pings) are observation-only
//! - anything else is a per-event error

use tracing::{debug, warn};

use crate::error::EventError;
use crate::events::types::{
    ClassifiedEvent, EventKind, EventMessage, InboundEvent, MessageKind, Observation,
};

/// Classify a single inbound event. Pure apart from diagnostics.
pub fn classify(event: &InboundEvent) -> Result<ClassifiedEvent, EventError> {
    let kind = EventKind::parse(&event.kind).ok_or_else(|| EventError::UnknownEventKind {
        kind: event.kind.clone(),
    })?;

    let reply_token = || require_reply_token(event, kind);

    let classified = match kind {
        EventKind::Unfollow => return Ok(ClassifiedEvent::ObservationOnly(Observation::Unfollow)),
        EventKind::Leave => return Ok(ClassifiedEvent::ObservationOnly(Observation::Leave)),
        EventKind::Message => {
            let message = event.message.as_ref().ok_or_else(|| missing(kind, "message"))?;
            ClassifiedEvent::Message {
                message: classify_message(message)?,
                reply_token: reply_token()?,
            }
        }
        EventKind::Follow => ClassifiedEvent::Follow {
            reply_token: reply_token()?,
        },
        EventKind::Join => ClassifiedEvent::Join {
            reply_token: reply_token()?,
            source_kind: event.source_kind().to_string(),
        },
        EventKind::Postback => {
            let postback = event.postback.as_ref().ok_or_else(|| missing(kind, "postback"))?;
            ClassifiedEvent::Postback {
                reply_token: reply_token()?,
                data: postback.data.clone(),
                params: postback.params.clone().unwrap_or_default(),
            }
        }
        EventKind::Beacon => {
            let beacon = event.beacon.as_ref().ok_or_else(|| missing(kind, "beacon"))?;
            ClassifiedEvent::Beacon {
                reply_token: reply_token()?,
                hwid: beacon.hwid.clone(),
                beacon_kind: beacon.kind.clone(),
                device_message: decode_device_message(beacon.dm.as_deref()),
            }
        }
    };

    // Checked only once the payload is known to be well-formed, so a broken
    // event with a dummy token still fails.
    if classified.reply_token().is_some_and(is_verification_token) {
        debug!(kind = %kind, "Verification event received, not replying");
        return Ok(ClassifiedEvent::ObservationOnly(Observation::Verification));
    }

    Ok(classified)
}

fn classify_message(message: &EventMessage) -> Result<MessageKind, EventError> {
    let kind = match message.kind.as_str() {
        "text" => {
            let text = message.text.clone().ok_or_else(|| EventError::MissingField {
                kind: "message".to_string(),
                field: "message.text".to_string(),
            })?;
            MessageKind::Text(text)
        }
        "image" => MessageKind::Image,
        "video" => MessageKind::Video,
        "audio" => MessageKind::Audio,
        "location" => MessageKind::Location,
        "sticker" => MessageKind::Sticker,
        other => {
            let payload = serde_json::to_value(message).unwrap_or(serde_json::Value::Null);
            return Err(EventError::UnknownMessageKind {
                kind: other.to_string(),
                payload,
            });
        }
    };
    Ok(kind)
}

fn require_reply_token(event: &InboundEvent, kind: EventKind) -> Result<String, EventError> {
    event
        .reply_token
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or_else(|| missing(kind, "replyToken"))
}

fn missing(kind: EventKind, field: &str) -> EventError {
    EventError::MissingField {
        kind: kind.to_string(),
        field: field.to_string(),
    }
}

/// The platform's webhook verification sends reply tokens made of a single
/// repeated character (all zeros, all `f`s).
pub fn is_verification_token(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => token.len() > 1 && chars.all(|c| c == first),
        None => false,
    }
}

/// Hex-decode a beacon device message into text. Missing, empty or
/// undecodable messages become an empty string.
pub fn decode_device_message(dm: Option<&str>) -> String {
    let Some(dm) = dm.filter(|s| !s.is_empty()) else {
        return String::new();
    };
    match hex::decode(dm) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            warn!(dm = %dm, error = %e, "Beacon device message is not valid hex");
            String::new()
        }
    }
}
