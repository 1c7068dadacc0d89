//! Batch action execution.
//!
//! A batch replays, for each selected row, the clicks a user would make in
//! the host's own UI. Each action is an explicit [`ActionPlan`]: a finite
//! list of named [`Step`]s, each with a [`Locator`] and a settle delay.

mod plan;
mod report;
mod runner;

pub use plan::{ActionPlan, BatchAction, Locator, Step, StepName, best_label_match};
pub use report::{BatchReport, ItemFailure};
pub use runner::BatchRunner;
