//! Categorization collaborator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CategorizeError;

/// A suggested group of chat titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: String,
    #[serde(default)]
    pub titles: Vec<String>,
}

/// Suggests categories for a set of chat titles.
///
/// An empty result means "no suggestion"; callers must treat errors the same way.
#[async_trait]
pub trait Categorizer: Send + Sync {
    async fn categorize(&self, titles: &[String]) -> Result<Vec<CategoryGroup>, CategorizeError>;
}
