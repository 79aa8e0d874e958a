//! Inbound webhook: signature check, body parsing, batch dispatch.

pub mod routes;
pub mod signature;

pub use routes::{WebhookState, routes};
pub use signature::{LINE_SIGNATURE_HEADER, sign_body, validate_signature};
