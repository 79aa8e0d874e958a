//! Event processing pipeline.

pub mod processor;

pub use processor::{BatchReport, EventOutcome, EventProcessor};
