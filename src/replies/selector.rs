//! Reply selection.
//!
//! Text messages go through the keyword table with a uniform random pick
//! among the matched candidates. Media messages and lifecycle events get a
//! fixed acknowledgment. Observation-only events get nothing.

use std::collections::BTreeMap;

use tracing::debug;

use crate::events::types::{ClassifiedEvent, MessageKind, OutboundReply};
use crate::replies::random::{RandomSource, pick_index};
use crate::replies::table::ReplyTable;

pub const IMAGE_REPLY: &str = "ขอบคุณที่ส่งรูปมา! 😊 มีอะไรให้ช่วยมั้ย?";
pub const VIDEO_REPLY: &str = "ขอบคุณที่ส่งวิดีโอมานะ! 🎬 เดี๋ยวเค้าดูเลย";
pub const AUDIO_REPLY: &str = "ได้ยินเสียงแล้วน้า~ 🎧 ขอบคุณที่ส่งมานะ";
pub const LOCATION_REPLY: &str = "ขอบคุณที่ส่งตำแหน่งมา! 📍 ไว้จะไปหานะ";
pub const STICKER_REPLY: &str = "สติกเกอร์น่ารักจัง! 😍💕";
pub const FOLLOW_REPLY: &str = "Got followed event";

/// Choose the reply for a classified event, if any.
pub fn select_reply(
    event: &ClassifiedEvent,
    table: &ReplyTable,
    random: &dyn RandomSource,
) -> Option<OutboundReply> {
    let text = match event {
        ClassifiedEvent::Message { message, .. } => match message {
            MessageKind::Text(text) => choose_text_reply(text, table, random).to_string(),
            MessageKind::Image => IMAGE_REPLY.to_string(),
            MessageKind::Video => VIDEO_REPLY.to_string(),
            MessageKind::Audio => AUDIO_REPLY.to_string(),
            MessageKind::Location => LOCATION_REPLY.to_string(),
            MessageKind::Sticker => STICKER_REPLY.to_string(),
        },
        ClassifiedEvent::Follow { .. } => FOLLOW_REPLY.to_string(),
        ClassifiedEvent::Join { source_kind, .. } => format!("Joined {source_kind}"),
        ClassifiedEvent::Postback { data, params, .. } => postback_reply(data, params),
        ClassifiedEvent::Beacon {
            hwid,
            beacon_kind,
            device_message,
            ..
        } => format!("{beacon_kind} beacon hwid : {hwid} with device message = {device_message}"),
        ClassifiedEvent::ObservationOnly(observation) => {
            debug!(?observation, "Observation-only event, no reply");
            return None;
        }
    };

    let reply_token = event.reply_token()?;
    Some(OutboundReply::new(reply_token, text))
}

/// Pick a reply for free text: first matching rule, else the fallback.
pub fn choose_text_reply<'t>(
    text: &str,
    table: &'t ReplyTable,
    random: &dyn RandomSource,
) -> &'t str {
    let lowered = text.to_lowercase();
    let candidates = match table.find_rule(&lowered) {
        Some(rule) => {
            debug!(keyword = %rule.keyword(), "Keyword matched");
            rule.replies()
        }
        None => table.fallback(),
    };
    &candidates[pick_index(random, candidates.len())]
}

fn postback_reply(data: &str, params: &BTreeMap<String, String>) -> String {
    if params.is_empty() {
        return format!("Got postback: {data}");
    }
    let rendered: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("Got postback: {data}({})", rendered.join(", "))
}
