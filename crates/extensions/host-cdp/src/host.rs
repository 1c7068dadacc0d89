//! `HostDom`, `Overlay` and `Prompter` over a CDP page session.

use async_trait::async_trait;
use chatsweep_protocols::{
    ControlSnapshot, ElementSnapshot, HostDom, HostError, ItemQuery, NodeRef, Overlay, Point,
    Prompter, Rect, ToolbarView, UiEvent,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::bridge_script::{BINDING_NAME, bridge_call, bridge_script};
use crate::cdp::{CdpError, PageSession};
use crate::events::spawn_event_pump;

/// Result shape of bridge calls on a node handle.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NodeReply<T> {
    Stale { stale: bool },
    Live(T),
}

#[derive(Debug, Deserialize)]
struct FoundNode {
    node: Option<NodeRef>,
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, HostError> {
    serde_json::from_value(value)
        .map_err(|e| HostError::Script(format!("unexpected bridge reply: {}", e)))
}

/// Decode a reply about `node`, turning `{stale: true}` into `StaleReference`.
pub(crate) fn decode_node_reply<T: DeserializeOwned>(
    node: &NodeRef,
    value: Value,
) -> Result<T, HostError> {
    match decode::<NodeReply<T>>(value)? {
        NodeReply::Stale { stale: true } => Err(HostError::StaleReference(node.to_string())),
        NodeReply::Stale { stale: false } => {
            Err(HostError::Script("bridge reported stale=false".to_string()))
        }
        NodeReply::Live(value) => Ok(value),
    }
}

/// A chat tab driven through DevTools.
pub struct CdpHost {
    session: PageSession,
}

impl CdpHost {
    /// Install the bridge into the page and every future document it loads.
    pub async fn attach(session: PageSession) -> Result<Self, CdpError> {
        let host = Self { session };
        host.session.add_binding(BINDING_NAME).await?;
        host.session
            .add_script_on_new_document(bridge_script())
            .await?;
        host.install().await?;
        info!("Bridge attached to target {}", host.session.target_id());
        Ok(host)
    }

    /// Evaluate the bridge in the current document. Idempotent.
    pub async fn install(&self) -> Result<(), CdpError> {
        self.session.evaluate(bridge_script()).await?;
        debug!("Bridge installed");
        Ok(())
    }

    pub fn session(&self) -> &PageSession {
        &self.session
    }

    /// Stream of UI events raised by the page. `None` after the first call.
    pub fn ui_events(&self) -> Option<mpsc::UnboundedReceiver<UiEvent>> {
        self.session.take_events().map(spawn_event_pump)
    }

    async fn call(&self, method: &str, args: &[Value]) -> Result<Value, HostError> {
        self.session
            .evaluate(&bridge_call(method, args))
            .await
            .map_err(HostError::from)
    }

    async fn prompt(&self, expression: String) -> Result<Value, HostError> {
        self.session
            .evaluate_unbounded(&expression)
            .await
            .map_err(HostError::from)
    }
}

#[async_trait]
impl HostDom for CdpHost {
    async fn host_name(&self) -> Result<String, HostError> {
        let value = self
            .session
            .evaluate("location.hostname")
            .await
            .map_err(HostError::from)?;
        decode(value)
    }

    async fn list_items(&self, query: &ItemQuery) -> Result<Vec<ElementSnapshot>, HostError> {
        let value = self
            .call(
                "listItems",
                &[
                    json!(query.item_selector),
                    json!(query.title_selector),
                    json!(query.id_attribute),
                ],
            )
            .await?;
        decode(value)
    }

    async fn find_within(
        &self,
        scope: &NodeRef,
        selector: &str,
    ) -> Result<Option<NodeRef>, HostError> {
        let value = self
            .call("findWithin", &[json!(scope), json!(selector)])
            .await?;
        let found: FoundNode = decode_node_reply(scope, value)?;
        Ok(found.node)
    }

    async fn visible_controls(&self, selector: &str) -> Result<Vec<ControlSnapshot>, HostError> {
        let value = self.call("visibleControls", &[json!(selector)]).await?;
        decode(value)
    }

    async fn hover(&self, node: &NodeRef) -> Result<(), HostError> {
        let value = self.call("hover", &[json!(node)]).await?;
        let point: Point = decode_node_reply(node, value)?;
        // Synthetic events do not trigger `:hover`; a real pointer move does.
        self.session
            .mouse_move(point.x, point.y)
            .await
            .map_err(HostError::from)
    }

    async fn activate(&self, node: &NodeRef) -> Result<(), HostError> {
        let value = self.call("activate", &[json!(node)]).await?;
        let _: Point = decode_node_reply(node, value)?;
        Ok(())
    }

    async fn dismiss(&self) -> Result<(), HostError> {
        self.session
            .press_key("Escape")
            .await
            .map_err(HostError::from)
    }
}

#[async_trait]
impl Overlay for CdpHost {
    async fn ensure_entry_point(
        &self,
        container_selector: &str,
        label: &str,
        active: bool,
    ) -> Result<bool, HostError> {
        let value = self
            .call(
                "ensureToggle",
                &[json!(container_selector), json!(label), json!(active)],
            )
            .await?;
        decode(value)
    }

    async fn set_selection_mode(&self, active: bool, item_selector: &str) -> Result<(), HostError> {
        self.call("setMode", &[json!(active), json!(item_selector)])
            .await?;
        Ok(())
    }

    async fn mount_toolbar(&self) -> Result<(), HostError> {
        self.call("mountToolbar", &[]).await?;
        Ok(())
    }

    async fn update_toolbar(&self, view: &ToolbarView) -> Result<(), HostError> {
        let view = serde_json::to_value(view).map_err(|e| HostError::Script(e.to_string()))?;
        self.call("updateToolbar", &[view]).await?;
        Ok(())
    }

    async fn unmount_toolbar(&self) -> Result<(), HostError> {
        self.call("unmountToolbar", &[]).await?;
        Ok(())
    }

    async fn show_drag_box(&self, rect: Rect) -> Result<(), HostError> {
        self.call("dragBox", &[json!(rect)]).await?;
        Ok(())
    }

    async fn hide_drag_box(&self) -> Result<(), HostError> {
        self.call("dragBox", &[Value::Null]).await?;
        Ok(())
    }

    async fn highlight(&self, nodes: &[NodeRef]) -> Result<(), HostError> {
        self.call("highlight", &[json!(nodes)]).await?;
        Ok(())
    }
}

/// In-page modal dialogs. They block the page until answered.
#[async_trait]
impl Prompter for CdpHost {
    async fn confirm(&self, message: &str) -> bool {
        match self.prompt(format!("window.confirm({})", json!(message))).await {
            Ok(value) => value.as_bool().unwrap_or(false),
            Err(e) => {
                warn!("Confirmation prompt failed: {}", e);
                false
            }
        }
    }

    async fn inform(&self, message: &str) {
        if let Err(e) = self.prompt(format!("window.alert({})", json!(message))).await {
            warn!("Information prompt failed: {}", e);
        }
    }

    async fn ask(&self, message: &str) -> Option<String> {
        match self.prompt(format!("window.prompt({})", json!(message))).await {
            Ok(Value::String(answer)) => {
                let answer = answer.trim().to_string();
                (!answer.is_empty()).then_some(answer)
            }
            Ok(_) => None,
            Err(e) => {
                warn!("Question prompt failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
