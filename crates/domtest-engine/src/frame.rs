//! Scoped frame context.

use domtest_browser::{BrowserError, BrowserPage};
use tracing::debug;

/// Holds the page inside (at most) one iframe and returns it to the
/// top-level document when dropped, whatever path the caller leaves by.
pub struct FrameScope<'a> {
    page: &'a dyn BrowserPage,
    in_iframe: bool,
}

impl<'a> FrameScope<'a> {
    /// Enter the first iframe of the top-level document, if there is one.
    ///
    /// A frame whose document is not reachable (cross-origin) leaves the
    /// scope at the top level.
    pub async fn enter_first_iframe(page: &'a dyn BrowserPage) -> Result<Self, BrowserError> {
        page.switch_to_default_content();
        let mut scope = Self {
            page,
            in_iframe: false,
        };

        if page.frame_count().await? > 0 {
            match page.switch_to_frame(0).await {
                Ok(()) => scope.in_iframe = true,
                Err(BrowserError::FrameUnavailable(index)) => {
                    debug!("Frame {} is not accessible, searching top level only", index);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(scope)
    }

    pub fn in_iframe(&self) -> bool {
        self.in_iframe
    }
}

impl Drop for FrameScope<'_> {
    fn drop(&mut self) {
        self.page.switch_to_default_content();
    }
}
