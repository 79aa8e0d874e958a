//! Per-event pipeline and batch aggregation.
//!
//! Each event runs classify → select → send on its own future. A batch joins
//! all of them, so one failing event never stops its siblings; the batch only
//! reports success when every event succeeded.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, error, info, warn};

use crate::channels::ReplySender;
use crate::error::{EventError, PipelineError};
use crate::events::{InboundEvent, OutboundReply, classify};
use crate::replies::{RandomSource, ReplyTable, select_reply};

/// What happened to a successfully processed event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// A reply was delivered.
    Replied,
    /// The event was valid but needed no reply.
    Observed,
}

/// Shared, read-only pipeline dependencies.
#[derive(Clone)]
pub struct EventProcessor {
    table: Arc<ReplyTable>,
    random: Arc<dyn RandomSource>,
    sender: Arc<dyn ReplySender>,
}

impl EventProcessor {
    pub fn new(
        table: Arc<ReplyTable>,
        random: Arc<dyn RandomSource>,
        sender: Arc<dyn ReplySender>,
    ) -> Self {
        Self {
            table,
            random,
            sender,
        }
    }

    pub fn table(&self) -> &ReplyTable {
        &self.table
    }

    /// Decode, classify and select. No I/O.
    pub fn prepare(&self, raw: serde_json::Value) -> Result<Option<OutboundReply>, PipelineError> {
        let event: InboundEvent =
            serde_json::from_value(raw).map_err(|e| EventError::Malformed(e.to_string()))?;
        debug!(
            kind = %event.kind,
            source = %event.source_kind(),
            received_at = ?event.received_at(),
            "Processing event"
        );

        let classified = classify(&event)?;
        Ok(select_reply(&classified, &self.table, self.random.as_ref()))
    }

    /// Run one event through the whole pipeline.
    pub async fn handle_event(&self, raw: serde_json::Value) -> Result<EventOutcome, PipelineError> {
        let Some(reply) = self.prepare(raw)? else {
            return Ok(EventOutcome::Observed);
        };

        self.sender
            .send_text_reply(&reply.reply_token, &reply.text)
            .await?;
        info!(
            channel = %self.sender.name(),
            reply_len = reply.text.chars().count(),
            "Reply sent"
        );
        Ok(EventOutcome::Replied)
    }

    /// Process every event concurrently and collect all outcomes.
    pub async fn process_batch(&self, events: Vec<serde_json::Value>) -> BatchReport {
        let futures = events.into_iter().enumerate().map(|(index, raw)| async move {
            let result = self.handle_event(raw).await;
            if let Err(ref e) = result {
                warn!(index, error = %e, "Event failed");
            }
            result
        });

        let report = BatchReport {
            outcomes: join_all(futures).await,
        };
        if !report.is_success() {
            error!(
                total = report.len(),
                failed = report.failed(),
                "Batch finished with failures"
            );
        }
        report
    }
}

/// Outcomes of one webhook delivery, in event order.
#[derive(Debug)]
pub struct BatchReport {
    outcomes: Vec<Result<EventOutcome, PipelineError>>,
}

impl BatchReport {
    pub fn outcomes(&self) -> &[Result<EventOutcome, PipelineError>] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn replied(&self) -> usize {
        self.count(|o| matches!(o, Ok(EventOutcome::Replied)))
    }

    pub fn observed(&self) -> usize {
        self.count(|o| matches!(o, Ok(EventOutcome::Observed)))
    }

    pub fn failed(&self) -> usize {
        self.count(Result::is_err)
    }

    /// True only when no event failed.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// First failure in event order.
    pub fn first_error(&self) -> Option<&PipelineError> {
        self.outcomes.iter().find_map(|o| o.as_ref().err())
    }

    /// Collapse to the all-or-nothing batch result.
    pub fn into_result(self) -> Result<usize, PipelineError> {
        let total = self.outcomes.len();
        for outcome in self.outcomes {
            outcome?;
        }
        Ok(total)
    }

    fn count<F>(&self, pred: F) -> usize
    where
        F: Fn(&Result<EventOutcome, PipelineError>) -> bool,
    {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}
