//! Error types for browser sessions

use thiserror::Error;

use crate::locator::Locator;

#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Browser session is not initialized")]
    NotInitialized,

    #[error("Unsupported browser: {0}")]
    UnsupportedBrowser(String),

    #[error("Failed to create browser session: {0}")]
    SessionCreation(String),

    #[error("Element not found: {locator} (waited {timeout_ms} ms)")]
    ElementNotFound { locator: Locator, timeout_ms: u64 },

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("WebDriver error ({error}): {message}")]
    WebDriver { error: String, message: String },

    #[error("Unexpected WebDriver response: {0}")]
    Protocol(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BrowserError {
    /// True when the WebDriver reported that nothing matched a locator
    pub fn is_no_such_element(&self) -> bool {
        matches!(self, BrowserError::WebDriver { error, .. } if error == "no such element")
    }
}

pub type BrowserResult<T> = Result<T, BrowserError>;
