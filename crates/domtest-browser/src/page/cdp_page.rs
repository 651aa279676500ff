//! [`BrowserPage`] over a CDP page session.

use async_trait::async_trait;
use base64::Engine;
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, trace};

use super::scripts;
use super::{BrowserPage, ElementHandle, Locator};
use crate::cdp::{PageSession, ScreenshotFormat};
use crate::manager::BrowserError;

/// A browser tab driven through CDP.
///
/// The frame context is the runtime object id of the current iframe's
/// `document`, or `None` for the top-level document.
pub struct CdpPage {
    session: PageSession,
    frame: Mutex<Option<String>>,
}

#[derive(Debug, Deserialize)]
struct ElementDescription {
    tag: String,
    #[serde(rename = "type")]
    input_type: Option<String>,
    #[serde(default)]
    editable: bool,
}

impl CdpPage {
    pub fn new(session: PageSession) -> Self {
        Self {
            session,
            frame: Mutex::new(None),
        }
    }

    pub fn target_id(&self) -> &str {
        self.session.target_id()
    }

    pub fn session(&self) -> &PageSession {
        &self.session
    }

    pub fn in_frame(&self) -> bool {
        self.frame.lock().is_some()
    }

    /// Object id of the document lookups currently run against.
    async fn document_id(&self) -> Result<String, BrowserError> {
        let frame = self.frame.lock().clone();
        if let Some(id) = frame {
            return Ok(id);
        }

        self.session
            .evaluate_handle("document")
            .await?
            .object_id
            .ok_or_else(|| BrowserError::Script("document has no object id".to_string()))
    }

    pub(super) fn describe(object_id: String, raw: Value) -> Result<ElementHandle, BrowserError> {
        let description: ElementDescription = serde_json::from_value(raw)
            .map_err(|e| BrowserError::Script(format!("Unexpected element description: {}", e)))?;

        let mut handle = ElementHandle::new(object_id, &description.tag);
        if let Some(input_type) = description.input_type {
            handle = handle.with_input_type(&input_type);
        }
        if description.editable {
            handle = handle.editable();
        }
        Ok(handle)
    }
}

#[async_trait]
impl BrowserPage for CdpPage {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.switch_to_default_content();
        self.session.navigate(url).await?;
        Ok(())
    }

    async fn page_source(&self) -> Result<String, BrowserError> {
        let doc = self.document_id().await?;
        let html = self
            .session
            .call_function_on(&doc, scripts::OUTER_HTML, &[])
            .await?;
        Ok(html.as_str().unwrap_or_default().to_string())
    }

    async fn screenshot_png(&self) -> Result<Vec<u8>, BrowserError> {
        let data = self.session.screenshot(ScreenshotFormat::Png).await?;
        base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|e| BrowserError::ScreenshotFailed(e.to_string()))
    }

    async fn frame_count(&self) -> Result<usize, BrowserError> {
        let doc = self.document_id().await?;
        let count = self
            .session
            .call_function_on(&doc, scripts::FRAME_COUNT, &[])
            .await?;
        Ok(count.as_u64().unwrap_or(0) as usize)
    }

    async fn switch_to_frame(&self, index: usize) -> Result<(), BrowserError> {
        let doc = self.document_id().await?;
        let frame_doc = self
            .session
            .call_function_on_handle(&doc, scripts::FRAME_DOCUMENT, &[json!(index)])
            .await?;

        // Cross-origin frames expose no contentDocument.
        match frame_doc.object_id {
            Some(id) if !frame_doc.is_nullish() => {
                debug!("Switched to frame {}", index);
                *self.frame.lock() = Some(id);
                Ok(())
            }
            _ => Err(BrowserError::FrameUnavailable(index)),
        }
    }

    fn switch_to_default_content(&self) {
        if self.frame.lock().take().is_some() {
            trace!("Switched to default content");
        }
    }

    async fn find_element(&self, locator: &Locator) -> Result<Option<ElementHandle>, BrowserError> {
        let doc = self.document_id().await?;
        let found = self
            .session
            .call_function_on_handle(
                &doc,
                scripts::FIND_ELEMENT,
                &[json!(locator.strategy()), json!(locator.value())],
            )
            .await?;

        let object_id = match found.object_id {
            Some(id) if !found.is_nullish() => id,
            _ => return Ok(None),
        };

        let raw = self
            .session
            .call_function_on(&object_id, scripts::DESCRIBE, &[])
            .await?;
        Self::describe(object_id, raw).map(Some)
    }

    async fn clear(&self, element: &ElementHandle) -> Result<(), BrowserError> {
        self.session
            .call_function_on(&element.object_id, scripts::CLEAR, &[])
            .await?;
        Ok(())
    }

    async fn send_keys(&self, element: &ElementHandle, text: &str) -> Result<(), BrowserError> {
        self.session.focus(&element.object_id).await?;
        if !text.is_empty() {
            self.session.type_text(text).await?;
        }
        Ok(())
    }

    async fn click(&self, element: &ElementHandle) -> Result<(), BrowserError> {
        self.session.scroll_into_view(&element.object_id).await?;

        let center = self
            .session
            .get_box_model(&element.object_id)
            .await?
            .and_then(|model| model.center());
        if let Some((x, y)) = center {
            self.session.click(x, y).await?;
            return Ok(());
        }

        debug!("Falling back to script click on <{}>", element.tag_name);
        self.session
            .call_function_on(&element.object_id, scripts::CLICK, &[])
            .await?;
        Ok(())
    }

    async fn select_option(&self, element: &ElementHandle, choice: &str) -> Result<(), BrowserError> {
        let matched = self
            .session
            .call_function_on(&element.object_id, scripts::SELECT_OPTION, &[json!(choice)])
            .await?;

        if matched.as_bool() == Some(true) {
            Ok(())
        } else {
            Err(BrowserError::ActionFailed(format!(
                "No option with value or label '{}'",
                choice
            )))
        }
    }

    async fn is_displayed(&self, element: &ElementHandle) -> Result<bool, BrowserError> {
        let visible = self
            .session
            .call_function_on(&element.object_id, scripts::IS_VISIBLE, &[])
            .await?;
        Ok(visible.as_bool().unwrap_or(false))
    }
}
