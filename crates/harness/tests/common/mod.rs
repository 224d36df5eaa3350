//! Scripted in-memory browser for integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use kwiga_browser::{
    BrowserError, BrowserKind, BrowserResult, BrowserSession, ElementHandle, Locator, SessionFactory,
    SessionOptions,
};
use kwiga_harness::{ExecutionContext, SessionConfig};
use parking_lot::Mutex;

#[derive(Debug, Clone)]
pub struct FakeElement {
    pub strategy: &'static str,
    /// Matches when the locator value contains this
    pub needle: String,
    pub id: String,
    pub text: String,
    pub hidden: bool,
}

/// Everything the fake browser shows and everything done to it
#[derive(Debug, Default)]
pub struct BrowserState {
    pub elements: Vec<FakeElement>,
    pub page_source: String,
    pub current_url: String,
    pub windows: Vec<String>,

    pub opened: Vec<String>,
    pub clicked: Vec<String>,
    pub typed: Vec<(String, String)>,
    pub cleared: Vec<String>,
    pub lookups: Vec<Locator>,
    pub switched_to: Option<String>,
    pub implicit_wait: Option<Duration>,
    pub quit: bool,
}

impl BrowserState {
    pub fn add_element(&mut self, strategy: &'static str, needle: &str, id: &str, text: &str) {
        self.elements.push(FakeElement {
            strategy,
            needle: needle.to_string(),
            id: id.to_string(),
            text: text.to_string(),
            hidden: false,
        });
    }

    /// Present in the DOM but not displayed
    pub fn add_hidden_element(&mut self, strategy: &'static str, needle: &str, id: &str, text: &str) {
        self.add_element(strategy, needle, id, text);
        if let Some(last) = self.elements.last_mut() {
            last.hidden = true;
        }
    }

    fn matching(&self, locator: &Locator) -> Vec<FakeElement> {
        self.elements
            .iter()
            .filter(|e| e.strategy == locator.strategy() && locator.value().contains(&e.needle))
            .cloned()
            .collect()
    }
}

pub struct FakeSession {
    state: Arc<Mutex<BrowserState>>,
    closed: bool,
}

impl FakeSession {
    fn check_open(&self) -> BrowserResult<()> {
        if self.closed {
            Err(BrowserError::NotInitialized)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn open(&mut self, url: &str) -> BrowserResult<()> {
        self.check_open()?;
        let mut state = self.state.lock();
        state.opened.push(url.to_string());
        state.current_url = url.to_string();
        Ok(())
    }

    async fn find_element(&mut self, locator: &Locator, timeout: Duration) -> BrowserResult<ElementHandle> {
        self.check_open()?;
        let mut state = self.state.lock();
        state.lookups.push(locator.clone());
        state
            .matching(locator)
            .into_iter()
            .find(|e| !e.hidden)
            .map(|e| ElementHandle(e.id))
            .ok_or(BrowserError::ElementNotFound {
                locator: locator.clone(),
                timeout_ms: timeout.as_millis() as u64,
            })
    }

    async fn find_elements(&mut self, locator: &Locator, timeout: Duration) -> BrowserResult<Vec<ElementHandle>> {
        self.check_open()?;
        let mut state = self.state.lock();
        state.lookups.push(locator.clone());
        let matching = state.matching(locator);
        // like the driver: every match has to be visible
        if matching.is_empty() || matching.iter().any(|e| e.hidden) {
            return Err(BrowserError::ElementNotFound {
                locator: locator.clone(),
                timeout_ms: timeout.as_millis() as u64,
            });
        }
        Ok(matching.into_iter().map(|e| ElementHandle(e.id)).collect())
    }

    async fn find_all(&mut self, locator: &Locator) -> BrowserResult<Vec<ElementHandle>> {
        self.check_open()?;
        let mut state = self.state.lock();
        state.lookups.push(locator.clone());
        Ok(state.matching(locator).into_iter().map(|e| ElementHandle(e.id)).collect())
    }

    async fn click(&mut self, element: &ElementHandle) -> BrowserResult<()> {
        self.check_open()?;
        self.state.lock().clicked.push(element.id().to_string());
        Ok(())
    }

    async fn clear(&mut self, element: &ElementHandle) -> BrowserResult<()> {
        self.check_open()?;
        self.state.lock().cleared.push(element.id().to_string());
        Ok(())
    }

    async fn send_keys(&mut self, element: &ElementHandle, text: &str) -> BrowserResult<()> {
        self.check_open()?;
        self.state.lock().typed.push((element.id().to_string(), text.to_string()));
        Ok(())
    }

    async fn text(&mut self, element: &ElementHandle) -> BrowserResult<String> {
        self.check_open()?;
        let state = self.state.lock();
        state
            .elements
            .iter()
            .find(|e| e.id == element.id())
            .map(|e| if e.hidden { String::new() } else { e.text.clone() })
            .ok_or_else(|| BrowserError::Protocol(format!("stale element {}", element.id())))
    }

    async fn current_url(&mut self) -> BrowserResult<String> {
        self.check_open()?;
        Ok(self.state.lock().current_url.clone())
    }

    async fn page_source(&mut self) -> BrowserResult<String> {
        self.check_open()?;
        Ok(self.state.lock().page_source.clone())
    }

    async fn window_handles(&mut self) -> BrowserResult<Vec<String>> {
        self.check_open()?;
        Ok(self.state.lock().windows.clone())
    }

    async fn switch_to_window(&mut self, handle: &str) -> BrowserResult<()> {
        self.check_open()?;
        self.state.lock().switched_to = Some(handle.to_string());
        Ok(())
    }

    async fn set_implicit_wait(&mut self, wait: Duration) -> BrowserResult<()> {
        self.check_open()?;
        self.state.lock().implicit_wait = Some(wait);
        Ok(())
    }

    async fn maximize(&mut self) -> BrowserResult<()> {
        self.check_open()
    }

    async fn quit(&mut self) -> BrowserResult<()> {
        self.closed = true;
        self.state.lock().quit = true;
        Ok(())
    }
}

/// Hands out sessions over one shared [`BrowserState`]
#[derive(Default)]
pub struct FakeFactory {
    pub state: Arc<Mutex<BrowserState>>,
    pub created: Mutex<Vec<SessionOptions>>,
}

#[async_trait]
impl SessionFactory for FakeFactory {
    async fn create(&self, options: &SessionOptions) -> BrowserResult<Box<dyn BrowserSession>> {
        // same validation as the real driver factory
        let _kind: BrowserKind = options.browser.parse()?;
        self.created.lock().push(options.clone());

        let mut session = FakeSession {
            state: Arc::clone(&self.state),
            closed: false,
        };
        session.set_implicit_wait(options.implicit_wait).await?;
        Ok(Box::new(session))
    }
}

pub fn fake_context() -> (ExecutionContext, Arc<FakeFactory>) {
    let factory = Arc::new(FakeFactory::default());
    let config = SessionConfig {
        base_url: "https://kwiga.com/".to_string(),
        explicit_wait: 0,
        ..Default::default()
    };
    let ctx = ExecutionContext::new(config, factory.clone());
    (ctx, factory)
}
