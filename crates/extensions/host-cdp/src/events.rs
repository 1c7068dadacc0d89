//! Translation of CDP session events into UI events.

use chatsweep_protocols::UiEvent;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use crate::bridge_script::BINDING_NAME;
use crate::cdp::{BindingCalled, CdpResponse, FrameInfo};

/// Map one CDP event to the UI event it carries, if any.
pub fn translate(event: &CdpResponse) -> Option<UiEvent> {
    let params = event.params.as_ref()?;
    match event.method.as_deref()? {
        "Runtime.bindingCalled" => {
            let binding: BindingCalled = serde_json::from_value(params.clone()).ok()?;
            if binding.name != BINDING_NAME {
                return None;
            }
            match serde_json::from_str::<UiEvent>(&binding.payload) {
                Ok(ui) => Some(ui),
                Err(e) => {
                    warn!("Ignoring malformed bridge event {}: {}", binding.payload, e);
                    None
                }
            }
        }
        "Page.frameNavigated" => {
            let frame: FrameInfo = serde_json::from_value(params["frame"].clone()).ok()?;
            frame.is_main().then(|| {
                debug!("Main frame navigated to {}", frame.url);
                UiEvent::Navigated
            })
        }
        _ => None,
    }
}

/// Forward translated events until the session's stream ends.
pub fn spawn_event_pump(
    mut events: mpsc::UnboundedReceiver<CdpResponse>,
) -> mpsc::UnboundedReceiver<UiEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            let Some(ui) = translate(&event) else {
                continue;
            };
            trace!("UI event: {:?}", ui);
            if tx.send(ui).is_err() {
                break;
            }
        }
        debug!("CDP event stream ended");
    });
    rx
}
