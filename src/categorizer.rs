//! OpenAI-compatible categorization client.

use std::time::Duration;

use async_trait::async_trait;
use chatsweep_config::CategorizerConfig;
use chatsweep_protocols::{CategorizeError, CategoryGroup, Categorizer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

const SYSTEM_PROMPT: &str = "You group chat conversation titles into a few short categories. \
Reply with JSON only, as an array of objects {\"category\": string, \"titles\": [string]}. \
Use every title exactly once and copy titles verbatim.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GroupsReply {
    Bare(Vec<CategoryGroup>),
    Wrapped { categories: Vec<CategoryGroup> },
}

/// Categorizer backed by a chat completions endpoint.
pub(crate) struct HttpCategorizer {
    endpoint: String,
    api_key: Option<String>,
    model: String,
    client: reqwest::Client,
}

impl HttpCategorizer {
    /// `None` when no endpoint is configured.
    pub fn from_config(config: &CategorizerConfig) -> Result<Option<Self>, CategorizeError> {
        let Some(endpoint) = config.endpoint.clone() else {
            return Ok(None);
        };
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CategorizeError::Request(e.to_string()))?;
        Ok(Some(Self {
            endpoint,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            client,
        }))
    }

    fn build_request(&self, titles: &[String]) -> ChatRequest<'_> {
        let listing = titles
            .iter()
            .map(|t| format!("- {}", t))
            .collect::<Vec<_>>()
            .join("\n");
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: listing,
                },
            ],
            temperature: 0.2,
        }
    }
}

#[async_trait]
impl Categorizer for HttpCategorizer {
    async fn categorize(&self, titles: &[String]) -> Result<Vec<CategoryGroup>, CategorizeError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&self.build_request(titles));
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request
            .send()
            .await
            .map_err(|e| CategorizeError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(CategorizeError::Request(format!("HTTP {}: {}", status, text)));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| CategorizeError::Malformed(e.to_string()))?;
        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| CategorizeError::Malformed("no choices".to_string()))?;

        let groups = parse_groups(&content)?;
        debug!(groups = groups.len(), "Categorization reply parsed");
        Ok(groups)
    }
}

/// Parse the model's reply, tolerating code fences and a `categories` wrapper.
/// Groups with a blank name or no titles are dropped.
pub(crate) fn parse_groups(content: &str) -> Result<Vec<CategoryGroup>, CategorizeError> {
    let json = strip_fence(content.trim());
    let value: Value =
        serde_json::from_str(json).map_err(|e| CategorizeError::Malformed(e.to_string()))?;
    let reply: GroupsReply =
        serde_json::from_value(value).map_err(|e| CategorizeError::Malformed(e.to_string()))?;
    let groups = match reply {
        GroupsReply::Bare(groups) => groups,
        GroupsReply::Wrapped { categories } => categories,
    };
    Ok(groups
        .into_iter()
        .filter(|g| !g.category.trim().is_empty() && !g.titles.is_empty())
        .collect())
}

fn strip_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Skip an optional language tag on the opening fence.
    let rest = rest.split_once('\n').map_or(rest, |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
#[path = "categorizer_tests.rs"]
mod tests;
