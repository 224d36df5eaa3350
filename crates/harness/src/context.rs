//! Execution context shared by every step of a run

use std::sync::Arc;

use kwiga_browser::{BrowserError, BrowserSession, SessionFactory};
use tracing::{info, warn};

use crate::config::SessionConfig;
use crate::error::StepError;

/// Mutable state threaded through every step action.
///
/// Holds at most one browser session. It is created on first use through the
/// factory and lives until [`ExecutionContext::quit_session`] is called by
/// whoever owns the run.
pub struct ExecutionContext {
    pub config: SessionConfig,
    factory: Arc<dyn SessionFactory>,
    session: Option<Box<dyn BrowserSession>>,
}

impl ExecutionContext {
    pub fn new(config: SessionConfig, factory: Arc<dyn SessionFactory>) -> Self {
        Self {
            config,
            factory,
            session: None,
        }
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// The live session, starting one if needed.
    ///
    /// A factory failure is fatal for the current feature.
    pub async fn session(&mut self) -> Result<&mut dyn BrowserSession, StepError> {
        if self.session.is_none() {
            let options = self.config.session_options();
            let session = self.factory.create(&options).await.map_err(StepError::Session)?;
            info!("Browser session started ({}, headless={})", options.browser, options.headless);
            self.session = Some(session);
        }
        self.live_session()
    }

    /// The live session without starting one
    pub fn live_session(&mut self) -> Result<&mut dyn BrowserSession, StepError> {
        match self.session.as_deref_mut() {
            Some(session) => Ok(session),
            None => Err(StepError::Browser(BrowserError::NotInitialized)),
        }
    }

    /// End the session if one is live. The next [`session`](Self::session) call starts a new one.
    pub async fn quit_session(&mut self) {
        if let Some(mut session) = self.session.take() {
            if let Err(e) = session.quit().await {
                warn!("Failed to quit browser session: {}", e);
            } else {
                info!("Browser session closed");
            }
        }
    }
}
