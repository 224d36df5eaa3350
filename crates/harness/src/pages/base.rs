//! Shared page-object plumbing

use std::time::Duration;

use kwiga_browser::{BrowserResult, BrowserSession, ElementHandle, Locator};

/// Shared page plumbing: URL building and visibility waits
pub struct BasePage<'a> {
    pub(crate) session: &'a mut dyn BrowserSession,
    base_url: String,
    timeout: Duration,
}

impl<'a> BasePage<'a> {
    pub fn new(session: &'a mut dyn BrowserSession, base_url: &str, timeout: Duration) -> Self {
        Self {
            session,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Absolute URL for a site path; a missing leading slash is added
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn open(&mut self, path: &str) -> BrowserResult<()> {
        let url = self.url_for(path);
        self.session.open(&url).await
    }

    pub async fn find_visible(&mut self, locator: &Locator) -> BrowserResult<ElementHandle> {
        self.session.find_element(locator, self.timeout).await
    }

    pub async fn find_all_visible(&mut self, locator: &Locator) -> BrowserResult<Vec<ElementHandle>> {
        self.session.find_elements(locator, self.timeout).await
    }
}
