//! Bounded polling waits

use std::time::{Duration, Instant};

use tokio::time::sleep;
use tracing::trace;

use crate::error::{BrowserError, BrowserResult};
use crate::session::BrowserSession;

/// Default polling interval
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Deadline-driven poll loop helper.
///
/// ```ignore
/// let poller = Poller::new(timeout);
/// loop {
///     if ready().await? { break; }
///     if !poller.tick().await { return Err(...); }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Poller {
    start: Instant,
    timeout: Duration,
    interval: Duration,
    attempts: usize,
}

impl Poller {
    pub fn new(timeout: Duration) -> Self {
        Self::with_interval(timeout, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_interval(timeout: Duration, interval: Duration) -> Self {
        Self {
            start: Instant::now(),
            timeout,
            interval,
            attempts: 0,
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Sleep until the next attempt. Returns `false` once the deadline has passed.
    pub async fn tick(&mut self) -> bool {
        self.attempts += 1;
        let elapsed = self.start.elapsed();
        if elapsed >= self.timeout {
            return false;
        }
        // never sleep past the deadline
        sleep(self.interval.min(self.timeout - elapsed)).await;
        true
    }
}

/// Wait until the page source contains `snippet`.
pub async fn wait_for_page_text(
    session: &mut dyn BrowserSession,
    snippet: &str,
    timeout: Duration,
) -> BrowserResult<()> {
    let mut poller = Poller::new(timeout);
    loop {
        let source = session.page_source().await?;
        if source.contains(snippet) {
            return Ok(());
        }
        trace!("Text {:?} not on page yet (attempt {})", snippet, poller.attempts() + 1);
        if !poller.tick().await {
            return Err(BrowserError::Timeout(format!(
                "text {:?} on page after {} ms",
                snippet,
                timeout.as_millis()
            )));
        }
    }
}
