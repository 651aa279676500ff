//! Page automation seam.
//!
//! [`BrowserPage`] is everything the test engine needs from a browser tab.
//! [`CdpPage`] implements it over a CDP [`PageSession`](crate::cdp::PageSession).

mod cdp_page;
mod scripts;

use std::fmt;

use async_trait::async_trait;

use crate::manager::BrowserError;

pub use cdp_page::CdpPage;

/// Native element lookup strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Id(String),
    Name(String),
    XPath(String),
    Css(String),
    ClassName(String),
    TagName(String),
}

impl Locator {
    /// Strategy name as understood by the lookup script.
    pub fn strategy(&self) -> &'static str {
        match self {
            Locator::Id(_) => "id",
            Locator::Name(_) => "name",
            Locator::XPath(_) => "xpath",
            Locator::Css(_) => "css",
            Locator::ClassName(_) => "class",
            Locator::TagName(_) => "tag",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Locator::Id(v)
            | Locator::Name(v)
            | Locator::XPath(v)
            | Locator::Css(v)
            | Locator::ClassName(v)
            | Locator::TagName(v) => v,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.strategy(), self.value())
    }
}

/// A live element found by [`BrowserPage::find_element`].
///
/// Only valid until the page navigates or the element is removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    /// Runtime object id (or any opaque id for non-CDP pages).
    pub object_id: String,
    /// Lower-cased tag name.
    pub tag_name: String,
    /// Lower-cased `type` attribute for `<input>` elements.
    pub input_type: Option<String>,
    pub content_editable: bool,
}

impl ElementHandle {
    pub fn new(object_id: impl Into<String>, tag_name: &str) -> Self {
        Self {
            object_id: object_id.into(),
            tag_name: tag_name.to_ascii_lowercase(),
            input_type: None,
            content_editable: false,
        }
    }

    pub fn with_input_type(mut self, input_type: &str) -> Self {
        self.input_type = Some(input_type.to_ascii_lowercase());
        self
    }

    pub fn editable(mut self) -> Self {
        self.content_editable = true;
        self
    }
}

/// A single browser tab as seen by the test engine.
///
/// Lookups run in the current frame context, which starts at the top-level
/// document and changes only through the frame methods.
#[async_trait]
pub trait BrowserPage: Send + Sync {
    /// Load `url` and reset the frame context to the top-level document.
    async fn navigate(&self, url: &str) -> Result<(), BrowserError>;

    /// HTML of the current frame context.
    async fn page_source(&self) -> Result<String, BrowserError>;

    /// PNG capture of the viewport.
    async fn screenshot_png(&self) -> Result<Vec<u8>, BrowserError>;

    /// Number of `<iframe>` elements in the current frame context.
    async fn frame_count(&self) -> Result<usize, BrowserError>;

    async fn switch_to_frame(&self, index: usize) -> Result<(), BrowserError>;

    /// Return to the top-level document. Never fails, so it can run from `Drop`.
    fn switch_to_default_content(&self);

    /// Single, non-waiting lookup of the first element matching `locator`.
    async fn find_element(&self, locator: &Locator) -> Result<Option<ElementHandle>, BrowserError>;

    async fn clear(&self, element: &ElementHandle) -> Result<(), BrowserError>;

    async fn send_keys(&self, element: &ElementHandle, text: &str) -> Result<(), BrowserError>;

    async fn click(&self, element: &ElementHandle) -> Result<(), BrowserError>;

    /// Select the `<option>` whose value or label equals `choice`.
    async fn select_option(&self, element: &ElementHandle, choice: &str) -> Result<(), BrowserError>;

    async fn is_displayed(&self, element: &ElementHandle) -> Result<bool, BrowserError>;
}

#[cfg(test)]
#[path = "page_tests.rs"]
mod tests;
