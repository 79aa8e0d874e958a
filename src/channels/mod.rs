//! Outbound channel abstraction for sending replies.

pub mod line;
pub mod sender;

pub use line::LineClient;
pub use sender::ReplySender;
