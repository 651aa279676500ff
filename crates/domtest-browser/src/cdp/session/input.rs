//! Mouse and keyboard input for CDP page session.

use serde_json::{json, Value};
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{MouseButton, MouseEventType};

use super::core::PageSession;

impl PageSession {
    /// Left click at viewport coordinates: move, press, release.
    pub async fn click(&self, x: f64, y: f64) -> Result<(), CdpError> {
        for event in [
            MouseEventType::MouseMoved,
            MouseEventType::MousePressed,
            MouseEventType::MouseReleased,
        ] {
            self.call("Input.dispatchMouseEvent", Some(Self::mouse_params(event, x, y)))
                .await?;
        }

        debug!("Clicked at ({}, {})", x, y);
        Ok(())
    }

    /// Insert text at the focused element, as an IME commit would.
    pub async fn type_text(&self, text: &str) -> Result<(), CdpError> {
        self.call("Input.insertText", Some(json!({"text": text})))
            .await?;
        debug!("Typed {} characters", text.chars().count());
        Ok(())
    }

    pub(super) fn mouse_params(event: MouseEventType, x: f64, y: f64) -> Value {
        let button = match event {
            MouseEventType::MouseMoved => MouseButton::None,
            _ => MouseButton::Left,
        };
        json!({
            "type": event,
            "x": x,
            "y": y,
            "button": button,
            "clickCount": 1,
        })
    }
}
