//! Batch outcome reporting.

use chatsweep_protocols::HostError;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::plan::{BatchAction, StepName};
use crate::identity::ItemId;

/// Why one item did not complete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemFailure {
    pub id: ItemId,
    pub title: String,
    pub step: StepName,
    #[serde(serialize_with = "serialize_error")]
    pub error: HostError,
}

fn serialize_error<S: serde::Serializer>(error: &HostError, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&error.to_string())
}

/// Summary of one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    #[serde(flatten)]
    pub action: BatchAction,
    pub attempted: usize,
    pub succeeded: usize,
    pub failures: Vec<ItemFailure>,
    pub cancelled: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl BatchReport {
    pub(crate) fn start(action: BatchAction, attempted: usize) -> Self {
        let now = Utc::now();
        Self {
            action,
            attempted,
            succeeded: 0,
            failures: Vec::new(),
            cancelled: false,
            started_at: now,
            finished_at: now,
        }
    }

    /// Items neither succeeded nor failed because the batch was cancelled.
    pub fn skipped(&self) -> usize {
        self.attempted - self.succeeded - self.failures.len()
    }

    pub fn is_complete_success(&self) -> bool {
        !self.cancelled && self.failures.is_empty() && self.succeeded == self.attempted
    }
}
