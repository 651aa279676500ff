//! BrowserManager page lifecycle.

use tracing::debug;

use super::{BrowserError, BrowserManager};
use crate::page::CdpPage;

impl BrowserManager {
    /// Open a fresh tab on `url` and wrap it for page automation.
    ///
    /// Connects (and launches Chrome) first if needed.
    pub async fn open_page(&self, url: &str) -> Result<CdpPage, BrowserError> {
        self.connect().await?;
        let client = self.client().await?;

        let session = client.new_page(Some(url)).await?;
        session
            .set_viewport(self.config.viewport_width, self.config.viewport_height)
            .await?;

        debug!("Opened page {}: {}", session.target_id(), url);
        Ok(CdpPage::new(session))
    }

    /// Close a page opened with [`open_page`](Self::open_page).
    pub async fn close_page(&self, page: &CdpPage) -> Result<(), BrowserError> {
        let client = self.client().await?;
        client.close_page(page.target_id()).await?;
        debug!("Closed page {}", page.target_id());
        Ok(())
    }
}
