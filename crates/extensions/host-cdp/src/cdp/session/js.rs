//! JavaScript execution for CDP page session.

use serde_json::{Value, json};

use crate::cdp::error::CdpError;

use super::core::PageSession;

impl PageSession {
    /// Evaluate a JavaScript expression and return its value by value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call("Runtime.evaluate", Some(Self::evaluate_params(expression)))
            .await?;
        Self::evaluation_value(result)
    }

    /// Like [`evaluate`](Self::evaluate) without the request timeout.
    /// Used for `confirm()`/`prompt()`, which block until the user answers.
    pub async fn evaluate_unbounded(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call_unbounded("Runtime.evaluate", Some(Self::evaluate_params(expression)))
            .await?;
        Self::evaluation_value(result)
    }

    pub(super) fn evaluate_params(expression: &str) -> Value {
        json!({
            "expression": expression,
            "returnByValue": true,
            "awaitPromise": true,
            "userGesture": true,
        })
    }

    pub(super) fn evaluation_value(result: Value) -> Result<Value, CdpError> {
        if let Some(exception) = result.get("exceptionDetails") {
            let text = exception["exception"]["description"]
                .as_str()
                .or_else(|| exception["text"].as_str())
                .unwrap_or("Unknown error");
            return Err(CdpError::JavaScript(text.to_string()));
        }
        Ok(result["result"]["value"].clone())
    }
}
