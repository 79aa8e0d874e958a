//! The outbound seam: anything that can deliver a text reply.

use async_trait::async_trait;

use crate::error::ChannelError;

/// Delivers a text reply correlated by a reply token.
///
/// Implementations own their own connection reuse and in-flight limits;
/// callers invoke this at most once per event.
#[async_trait]
pub trait ReplySender: Send + Sync {
    /// Channel name for logs and errors.
    fn name(&self) -> &str;

    /// Send `text` as the reply for `reply_token`.
    async fn send_text_reply(&self, reply_token: &str, text: &str) -> Result<(), ChannelError>;
}
