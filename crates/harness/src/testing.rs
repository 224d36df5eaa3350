//! Unit-test helpers

use std::sync::Arc;

use async_trait::async_trait;
use kwiga_browser::{BrowserError, BrowserResult, BrowserSession, SessionFactory, SessionOptions};

use crate::config::SessionConfig;
use crate::context::ExecutionContext;

/// Factory that never produces a session
pub struct NoBrowser;

#[async_trait]
impl SessionFactory for NoBrowser {
    async fn create(&self, _options: &SessionOptions) -> BrowserResult<Box<dyn BrowserSession>> {
        Err(BrowserError::SessionCreation("no browser in unit tests".to_string()))
    }
}

pub fn null_context() -> ExecutionContext {
    ExecutionContext::new(SessionConfig::default(), Arc::new(NoBrowser))
}
