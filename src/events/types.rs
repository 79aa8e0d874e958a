//! Inbound webhook event model and its classified form.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Inbound event (wire format) ─────────────────────────────────────

/// One notification from the platform, as delivered in the webhook body.
///
/// Kinds are kept as strings so an unrecognized kind still deserializes and
/// can be reported by the classifier instead of failing the whole batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundEvent {
    /// Event kind: "message", "follow", "unfollow", "join", "leave", ...
    #[serde(rename = "type")]
    pub kind: String,
    /// Single-use token for replying. Absent for unfollow/leave.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_token: Option<String>,
    /// Epoch milliseconds when the platform emitted the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<EventSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<EventMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postback: Option<Postback>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beacon: Option<Beacon>,
}

impl InboundEvent {
    /// When the event was emitted, if the platform supplied a timestamp.
    pub fn received_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp.and_then(DateTime::from_timestamp_millis)
    }

    /// Source type ("user", "group", "room") or "unknown".
    pub fn source_kind(&self) -> &str {
        self.source
            .as_ref()
            .map(|s| s.kind.as_str())
            .unwrap_or("unknown")
    }
}

/// Where the event came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
}

/// Message payload of a "message" event.
///
/// Only `text` matters for reply selection; everything else the platform
/// sends (content ids, sticker ids, coordinates) is kept in `extra` so it can
/// be logged when the subtype is not recognized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Postback button payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Postback {
    pub data: String,
    /// Date/time picker results, if the postback came from one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<BTreeMap<String, String>>,
}

/// Beacon payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beacon {
    pub hwid: String,
    /// "enter", "banner", "stay", ...
    #[serde(rename = "type")]
    pub kind: String,
    /// Hex-encoded device message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dm: Option<String>,
}

// ── Kinds ───────────────────────────────────────────────────────────

/// Recognized event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Message,
    Follow,
    Unfollow,
    Join,
    Leave,
    Postback,
    Beacon,
}

impl EventKind {
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "message" => Some(Self::Message),
            "follow" => Some(Self::Follow),
            "unfollow" => Some(Self::Unfollow),
            "join" => Some(Self::Join),
            "leave" => Some(Self::Leave),
            "postback" => Some(Self::Postback),
            "beacon" => Some(Self::Beacon),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Follow => "follow",
            Self::Unfollow => "unfollow",
            Self::Join => "join",
            Self::Leave => "leave",
            Self::Postback => "postback",
            Self::Beacon => "beacon",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognized message subtypes. Only `Text` carries keyword-matchable content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    Text(String),
    Image,
    Video,
    Audio,
    Location,
    Sticker,
}

// ── Classified event ────────────────────────────────────────────────

/// Why an event produces no reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    Unfollow,
    Leave,
    /// Platform connectivity check (dummy reply token).
    Verification,
}

/// An event reduced to what reply selection needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedEvent {
    Message {
        reply_token: String,
        message: MessageKind,
    },
    Follow {
        reply_token: String,
    },
    Join {
        reply_token: String,
        source_kind: String,
    },
    Postback {
        reply_token: String,
        data: String,
        params: BTreeMap<String, String>,
    },
    Beacon {
        reply_token: String,
        hwid: String,
        beacon_kind: String,
        /// Device message, already hex-decoded.
        device_message: String,
    },
    /// Valid event that must not be answered.
    ObservationOnly(Observation),
}

impl ClassifiedEvent {
    /// Reply token for events that can be answered.
    pub fn reply_token(&self) -> Option<&str> {
        match self {
            Self::Message { reply_token, .. }
            | Self::Follow { reply_token }
            | Self::Join { reply_token, .. }
            | Self::Postback { reply_token, .. }
            | Self::Beacon { reply_token, .. } => Some(reply_token),
            Self::ObservationOnly(_) => None,
        }
    }
}

/// A reply ready to hand to the outbound channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundReply {
    pub reply_token: String,
    pub text: String,
}

impl OutboundReply {
    pub fn new(reply_token: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            reply_token: reply_token.into(),
            text: text.into(),
        }
    }
}
