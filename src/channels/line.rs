//! LINE Messaging API reply client.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::channels::ReplySender;
use crate::error::ChannelError;

/// Maximum UTF-16 code units in one LINE text message object.
const LINE_MAX_TEXT_LENGTH: usize = 5000;

/// Maximum message objects in one reply call.
const LINE_MAX_MESSAGES_PER_REPLY: usize = 5;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_token: &'a str,
    messages: Vec<TextMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct TextMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

/// Sends replies through `POST /v2/bot/message/reply`.
pub struct LineClient {
    access_token: SecretString,
    api_base_url: String,
    client: reqwest::Client,
}

impl LineClient {
    pub fn new(access_token: SecretString, api_base_url: impl Into<String>) -> Self {
        Self {
            access_token,
            api_base_url: api_base_url.into(),
            client: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/v2/bot/{path}", self.api_base_url.trim_end_matches('/'))
    }

    fn send_failed(&self, reason: impl Into<String>) -> ChannelError {
        ChannelError::SendFailed {
            name: self.name().to_string(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl ReplySender for LineClient {
    fn name(&self) -> &str {
        "line"
    }

    async fn send_text_reply(&self, reply_token: &str, text: &str) -> Result<(), ChannelError> {
        let chunks = split_message(text, LINE_MAX_TEXT_LENGTH);
        if chunks.len() > LINE_MAX_MESSAGES_PER_REPLY {
            tracing::warn!(
                chunks = chunks.len(),
                "Reply too long for one reply call, truncating"
            );
        }
        let messages = chunks
            .into_iter()
            .take(LINE_MAX_MESSAGES_PER_REPLY)
            .map(|chunk| TextMessage {
                kind: "text",
                text: chunk,
            })
            .collect();
        let body = ReplyRequest {
            reply_token,
            messages,
        };

        let resp = self
            .client
            .post(self.api_url("message/reply"))
            .bearer_auth(self.access_token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.send_failed(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let err = resp.text().await.unwrap_or_default();
            return Err(self.send_failed(format!("reply failed ({status}): {err}")));
        }

        tracing::debug!(reply_token = %reply_token, "LINE reply sent");
        Ok(())
    }
}

/// Split text into chunks of at most `max_units` UTF-16 code units, the unit
/// LINE measures text length in. Never splits inside a character, so an
/// emoji (two units) stays whole.
pub fn split_message(text: &str, max_units: usize) -> Vec<&str> {
    if max_units == 0 || text.encode_utf16().count() <= max_units {
        return vec![text];
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut units = 0;
    for (idx, c) in text.char_indices() {
        let width = c.len_utf16();
        if units > 0 && units + width > max_units {
            chunks.push(&text[start..idx]);
            start = idx;
            units = 0;
        }
        units += width;
    }
    chunks.push(&text[start..]);
    chunks
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> LineClient {
        LineClient::new(SecretString::from("test-token"), server.uri())
    }

    #[tokio::test]
    async fn sends_reply_with_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/bot/message/reply"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_json(serde_json::json!({
                "replyToken": "r1",
                "messages": [{ "type": "text", "text": "สวัสดีค่ะ" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.send_text_reply("r1", "สวัสดีค่ะ").await.unwrap();
    }

    #[tokio::test]
    async fn error_status_is_send_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/bot/message/reply"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"message":"Invalid reply token"}"#),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.send_text_reply("bad", "hi").await.unwrap_err();
        let ChannelError::SendFailed { name, reason } = err;
        assert_eq!(name, "line");
        assert!(reason.contains("400"));
        assert!(reason.contains("Invalid reply token"));
    }

    #[tokio::test]
    async fn unreachable_host_is_send_failure() {
        let client = LineClient::new(SecretString::from("t"), "http://127.0.0.1:1");
        let err = client.send_text_reply("r1", "hi").await.unwrap_err();
        assert!(matches!(err, ChannelError::SendFailed { .. }));
    }

    #[test]
    fn api_url_handles_trailing_slash() {
        let client = LineClient::new(SecretString::from("t"), "https://api.line.me/");
        assert_eq!(
            client.api_url("message/reply"),
            "https://api.line.me/v2/bot/message/reply"
        );
    }

    #[test]
    fn split_message_short_text_is_single_chunk() {
        assert_eq!(split_message("hello", 10), vec!["hello"]);
    }

    #[test]
    fn split_message_respects_char_boundaries() {
        let text = "รักรักรัก";
        let chunks = split_message(text, 3);
        assert_eq!(chunks, vec!["รัก", "รัก", "รัก"]);
    }

    #[test]
    fn split_message_keeps_remainder() {
        assert_eq!(split_message("abcdefg", 3), vec!["abc", "def", "g"]);
    }

    #[test]
    fn split_message_counts_utf16_units() {
        let text = "😍😍😍";
        assert_eq!(split_message(text, 4), vec!["😍😍", "😍"]);
        assert_eq!(split_message(text, 3), vec!["😍", "😍", "😍"]);
        assert_eq!(split_message("a😍b", 2), vec!["a", "😍", "b"]);
    }
}
