//! Trusted input events for CDP page session.

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{KeyEventType, MouseEventType};

use super::core::PageSession;

impl PageSession {
    /// Move the real pointer, so `:hover` styles and hover-revealed
    /// controls render.
    pub async fn mouse_move(&self, x: f64, y: f64) -> Result<(), CdpError> {
        self.call(
            "Input.dispatchMouseEvent",
            Some(json!({
                "type": MouseEventType::MouseMoved,
                "x": x,
                "y": y,
            })),
        )
        .await?;
        Ok(())
    }

    /// Press and release a named key.
    pub async fn press_key(&self, key: &str) -> Result<(), CdpError> {
        let code = Self::virtual_key_code(key);
        for event_type in [KeyEventType::KeyDown, KeyEventType::KeyUp] {
            self.call(
                "Input.dispatchKeyEvent",
                Some(json!({
                    "type": event_type,
                    "key": key,
                    "code": key,
                    "windowsVirtualKeyCode": code,
                })),
            )
            .await?;
        }
        debug!("Pressed {}", key);
        Ok(())
    }

    pub(super) fn virtual_key_code(key: &str) -> i32 {
        match key {
            "Escape" => 27,
            "Enter" => 13,
            "Tab" => 9,
            "Backspace" => 8,
            _ => 0,
        }
    }
}
