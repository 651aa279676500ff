//! DOM operations for CDP page session, addressed by runtime object id.

use serde_json::json;

use crate::cdp::error::{CdpError, SERVER_ERROR};
use crate::cdp::protocol::BoxModel;

use super::core::PageSession;

/// "Could not compute box model." and friends.
const NO_LAYOUT: i64 = SERVER_ERROR;

impl PageSession {
    /// Box model for an element; `None` when it has no layout (e.g. `display: none`).
    pub async fn get_box_model(&self, object_id: &str) -> Result<Option<BoxModel>, CdpError> {
        let result = self
            .call("DOM.getBoxModel", Some(json!({"objectId": object_id})))
            .await;

        match result {
            Ok(r) => Ok(Some(serde_json::from_value(r["model"].clone())?)),
            Err(CdpError::Protocol { code: NO_LAYOUT, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Scroll an element into view if it is outside the viewport.
    pub async fn scroll_into_view(&self, object_id: &str) -> Result<(), CdpError> {
        match self
            .call(
                "DOM.scrollIntoViewIfNeeded",
                Some(json!({"objectId": object_id})),
            )
            .await
        {
            Ok(_) | Err(CdpError::Protocol { code: NO_LAYOUT, .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Focus element.
    pub async fn focus(&self, object_id: &str) -> Result<(), CdpError> {
        self.call("DOM.focus", Some(json!({"objectId": object_id})))
            .await?;
        Ok(())
    }
}
