//! Course catalog results

use std::time::Duration;

use kwiga_browser::{BrowserResult, BrowserSession, Locator};

use super::BasePage;

/// Course cards link to their own `*.kwiga.com` subdomain
const COURSE_LINKS: &str = "//a[contains(@href, '.kwiga.com')]";

pub struct CatalogPage<'a> {
    page: BasePage<'a>,
}

impl<'a> CatalogPage<'a> {
    pub fn new(session: &'a mut dyn BrowserSession, base_url: &str, timeout: Duration) -> Self {
        Self {
            page: BasePage::new(session, base_url, timeout),
        }
    }

    /// Non-empty titles of the visible course links
    pub async fn course_titles(&mut self) -> BrowserResult<Vec<String>> {
        let links = self.page.find_all_visible(&Locator::xpath(COURSE_LINKS)).await?;
        let mut titles = Vec::with_capacity(links.len());
        for link in &links {
            let text = self.page.session.text(link).await?;
            let text = text.trim();
            if !text.is_empty() {
                titles.push(text.to_string());
            }
        }
        Ok(titles)
    }
}
