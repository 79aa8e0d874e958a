//! Inbound events: wire model and classification.

pub mod classifier;
pub mod types;

pub use classifier::classify;
pub use types::{ClassifiedEvent, InboundEvent, MessageKind, Observation, OutboundReply};
