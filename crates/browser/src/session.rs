//! The browser session capability used by step actions

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{BrowserError, BrowserResult};
use crate::locator::Locator;

/// Opaque reference to an element inside a live session
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub String);

impl ElementHandle {
    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Browser kinds a session can be created for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserKind {
    #[default]
    Chrome,
    Firefox,
}

impl BrowserKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserKind::Chrome => "chrome",
            BrowserKind::Firefox => "firefox",
        }
    }
}

impl FromStr for BrowserKind {
    type Err = BrowserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chrome" | "chromium" => Ok(BrowserKind::Chrome),
            "firefox" => Ok(BrowserKind::Firefox),
            _ => Err(BrowserError::UnsupportedBrowser(s.to_string())),
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a factory needs to start a session
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Browser name as configured; validated when the session is created
    pub browser: String,
    pub headless: bool,
    pub implicit_wait: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            browser: BrowserKind::Chrome.as_str().to_string(),
            headless: true,
            implicit_wait: Duration::from_secs(5),
        }
    }
}

/// A live browser session.
///
/// Lookups wait for visibility up to the given timeout and then fail; nothing
/// here blocks without a bound.
#[async_trait]
pub trait BrowserSession: Send {
    /// Navigate to an absolute URL
    async fn open(&mut self, url: &str) -> BrowserResult<()>;

    /// Find the first element matching `locator` once it is visible
    async fn find_element(&mut self, locator: &Locator, timeout: Duration) -> BrowserResult<ElementHandle>;

    /// Find all elements matching `locator` once every match is visible.
    /// Waits for at least one match.
    async fn find_elements(&mut self, locator: &Locator, timeout: Duration) -> BrowserResult<Vec<ElementHandle>>;

    /// Every element currently matching `locator`, visible or not, without waiting.
    /// No match is an empty list.
    async fn find_all(&mut self, locator: &Locator) -> BrowserResult<Vec<ElementHandle>>;

    async fn click(&mut self, element: &ElementHandle) -> BrowserResult<()>;

    async fn clear(&mut self, element: &ElementHandle) -> BrowserResult<()>;

    async fn send_keys(&mut self, element: &ElementHandle, text: &str) -> BrowserResult<()>;

    /// Rendered text of an element
    async fn text(&mut self, element: &ElementHandle) -> BrowserResult<String>;

    async fn current_url(&mut self) -> BrowserResult<String>;

    async fn page_source(&mut self) -> BrowserResult<String>;

    /// Window handles in the order the browser reports them (oldest first)
    async fn window_handles(&mut self) -> BrowserResult<Vec<String>>;

    async fn switch_to_window(&mut self, handle: &str) -> BrowserResult<()>;

    async fn set_implicit_wait(&mut self, wait: Duration) -> BrowserResult<()>;

    async fn maximize(&mut self) -> BrowserResult<()>;

    /// End the session. Later calls fail with [`BrowserError::NotInitialized`].
    async fn quit(&mut self) -> BrowserResult<()>;
}

/// Creates browser sessions on demand
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn create(&self, options: &SessionOptions) -> BrowserResult<Box<dyn BrowserSession>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_kind_parse() {
        assert_eq!("chrome".parse::<BrowserKind>().unwrap(), BrowserKind::Chrome);
        assert_eq!("Firefox".parse::<BrowserKind>().unwrap(), BrowserKind::Firefox);
        assert_eq!("chromium".parse::<BrowserKind>().unwrap(), BrowserKind::Chrome);
    }

    #[test]
    fn test_unsupported_browser() {
        let err = "safari".parse::<BrowserKind>().unwrap_err();
        assert!(matches!(err, BrowserError::UnsupportedBrowser(ref b) if b == "safari"));
        assert_eq!(err.to_string(), "Unsupported browser: safari");
    }
}
