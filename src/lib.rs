//! LINE keyword reply bot: webhook in, canned reply out.

pub mod channels;
pub mod config;
pub mod error;
pub mod events;
pub mod pipeline;
pub mod replies;
pub mod webhook;
