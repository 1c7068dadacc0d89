//! User-facing prompt trait.

use async_trait::async_trait;

/// Blocking modal prompts. Any modal mechanism will do.
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Yes/no question. Failure to show the prompt counts as "no".
    async fn confirm(&self, message: &str) -> bool;

    /// Informational message.
    async fn inform(&self, message: &str);

    /// Free-text question. `None` when dismissed or empty.
    async fn ask(&self, message: &str) -> Option<String>;
}
