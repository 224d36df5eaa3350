//! W3C WebDriver client
//!
//! Talks JSON over HTTP to a running driver process (chromedriver,
//! geckodriver, or a Selenium server).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info, trace, warn};

use crate::capabilities;
use crate::error::{BrowserError, BrowserResult};
use crate::locator::Locator;
use crate::session::{BrowserSession, ElementHandle, SessionFactory, SessionOptions};
use crate::waits::Poller;

/// Key under which W3C drivers return element references
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Default driver endpoint (chromedriver `--port=4444`, Selenium server)
pub const DEFAULT_ENDPOINT: &str = "http://localhost:4444";

/// Creates sessions against a WebDriver endpoint
#[derive(Debug, Clone)]
pub struct WebDriverFactory {
    endpoint: String,
    client: reqwest::Client,
}

impl WebDriverFactory {
    pub fn new(endpoint: impl Into<String>) -> BrowserResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SessionFactory for WebDriverFactory {
    async fn create(&self, options: &SessionOptions) -> BrowserResult<Box<dyn BrowserSession>> {
        let body = capabilities::build(options)?;

        info!("Starting {} session via {}", options.browser, self.endpoint);

        let url = format!("{}/session", self.endpoint);
        let value = send(&self.client, Method::POST, &url, Some(body))
            .await
            .map_err(|e| BrowserError::SessionCreation(e.to_string()))?;
        let session_id = parse_session_id(&value)?;

        let mut session = WebDriverSession {
            client: self.client.clone(),
            endpoint: self.endpoint.clone(),
            session_id: Some(session_id),
        };

        // the driver already owns a browser; release it if setup fails
        if let Err(e) = session.set_implicit_wait(options.implicit_wait).await {
            if let Err(quit_err) = session.quit().await {
                warn!("Failed to close half-started session: {}", quit_err);
            }
            return Err(e);
        }
        // headless and CI environments may refuse to resize
        if let Err(e) = session.maximize().await {
            warn!("Could not maximize window: {}", e);
        }

        Ok(Box::new(session))
    }
}

/// A live WebDriver session
#[derive(Debug)]
pub struct WebDriverSession {
    client: reqwest::Client,
    endpoint: String,
    session_id: Option<String>,
}

impl WebDriverSession {
    fn url(&self, path: &str) -> BrowserResult<String> {
        let id = self.session_id.as_ref().ok_or(BrowserError::NotInitialized)?;
        Ok(format!("{}/session/{}{}", self.endpoint, id, path))
    }

    async fn call(&self, method: Method, path: &str, body: Option<Value>) -> BrowserResult<Value> {
        let url = self.url(path)?;
        send(&self.client, method, &url, body).await
    }

    async fn try_find(&self, locator: &Locator) -> BrowserResult<Option<ElementHandle>> {
        match self.call(Method::POST, "/element", Some(locator.to_wire())).await {
            Ok(value) => Ok(Some(parse_element(&value)?)),
            Err(e) if e.is_no_such_element() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn is_displayed(&self, element: &ElementHandle) -> BrowserResult<bool> {
        let value = self
            .call(Method::GET, &format!("/element/{}/displayed", element.id()), None)
            .await?;
        value
            .as_bool()
            .ok_or_else(|| BrowserError::Protocol(format!("displayed returned {}", value)))
    }
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    async fn open(&mut self, url: &str) -> BrowserResult<()> {
        debug!("Navigating to {}", url);
        self.call(Method::POST, "/url", Some(json!({ "url": url }))).await?;
        Ok(())
    }

    async fn find_element(&mut self, locator: &Locator, timeout: Duration) -> BrowserResult<ElementHandle> {
        let mut poller = Poller::new(timeout);
        loop {
            if let Some(element) = self.try_find(locator).await? {
                if self.is_displayed(&element).await? {
                    return Ok(element);
                }
            }
            if !poller.tick().await {
                return Err(BrowserError::ElementNotFound {
                    locator: locator.clone(),
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
        }
    }

    async fn find_elements(&mut self, locator: &Locator, timeout: Duration) -> BrowserResult<Vec<ElementHandle>> {
        let mut poller = Poller::new(timeout);
        loop {
            let value = self.call(Method::POST, "/elements", Some(locator.to_wire())).await?;
            let elements = parse_elements(&value)?;

            if !elements.is_empty() {
                let mut all_visible = true;
                for element in &elements {
                    if !self.is_displayed(element).await? {
                        all_visible = false;
                        break;
                    }
                }
                if all_visible {
                    return Ok(elements);
                }
            }

            if !poller.tick().await {
                return Err(BrowserError::ElementNotFound {
                    locator: locator.clone(),
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
        }
    }

    async fn find_all(&mut self, locator: &Locator) -> BrowserResult<Vec<ElementHandle>> {
        let value = self.call(Method::POST, "/elements", Some(locator.to_wire())).await?;
        parse_elements(&value)
    }

    async fn click(&mut self, element: &ElementHandle) -> BrowserResult<()> {
        self.call(Method::POST, &format!("/element/{}/click", element.id()), Some(json!({})))
            .await?;
        Ok(())
    }

    async fn clear(&mut self, element: &ElementHandle) -> BrowserResult<()> {
        self.call(Method::POST, &format!("/element/{}/clear", element.id()), Some(json!({})))
            .await?;
        Ok(())
    }

    async fn send_keys(&mut self, element: &ElementHandle, text: &str) -> BrowserResult<()> {
        self.call(
            Method::POST,
            &format!("/element/{}/value", element.id()),
            Some(json!({ "text": text })),
        )
        .await?;
        Ok(())
    }

    async fn text(&mut self, element: &ElementHandle) -> BrowserResult<String> {
        let value = self.call(Method::GET, &format!("/element/{}/text", element.id()), None).await?;
        expect_string(value, "text")
    }

    async fn current_url(&mut self) -> BrowserResult<String> {
        let value = self.call(Method::GET, "/url", None).await?;
        expect_string(value, "url")
    }

    async fn page_source(&mut self) -> BrowserResult<String> {
        let value = self.call(Method::GET, "/source", None).await?;
        expect_string(value, "source")
    }

    async fn window_handles(&mut self) -> BrowserResult<Vec<String>> {
        let value = self.call(Method::GET, "/window/handles", None).await?;
        serde_json::from_value(value).map_err(BrowserError::from)
    }

    async fn switch_to_window(&mut self, handle: &str) -> BrowserResult<()> {
        self.call(Method::POST, "/window", Some(json!({ "handle": handle }))).await?;
        Ok(())
    }

    async fn set_implicit_wait(&mut self, wait: Duration) -> BrowserResult<()> {
        self.call(
            Method::POST,
            "/timeouts",
            Some(json!({ "implicit": wait.as_millis() as u64 })),
        )
        .await?;
        Ok(())
    }

    async fn maximize(&mut self) -> BrowserResult<()> {
        self.call(Method::POST, "/window/maximize", Some(json!({}))).await?;
        Ok(())
    }

    async fn quit(&mut self) -> BrowserResult<()> {
        if self.session_id.is_none() {
            return Ok(());
        }
        let result = self.call(Method::DELETE, "", None).await;
        self.session_id = None;
        result.map(|_| ())
    }
}

/// Send one WebDriver command and unwrap its `value`
async fn send(
    client: &reqwest::Client,
    method: Method,
    url: &str,
    body: Option<Value>,
) -> BrowserResult<Value> {
    trace!("{} {}", method, url);

    let mut request = client.request(method, url);
    if let Some(body) = body {
        request = request.json(&body);
    }

    let response = request.send().await?;
    let success = response.status().is_success();
    let text = response.text().await?;
    let body: Value = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text)?
    };

    unwrap_value(success, body)
}

/// Split a WebDriver response into its value or a protocol error
pub fn unwrap_value(success: bool, body: Value) -> BrowserResult<Value> {
    let value = match body {
        Value::Object(mut map) => map.remove("value").unwrap_or(Value::Null),
        other => other,
    };

    if success {
        return Ok(value);
    }

    let error = value
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
        .to_string();
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Err(BrowserError::WebDriver { error, message })
}

pub fn parse_session_id(value: &Value) -> BrowserResult<String> {
    value
        .get("sessionId")
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| BrowserError::SessionCreation(format!("no sessionId in response: {}", value)))
}

pub fn parse_element(value: &Value) -> BrowserResult<ElementHandle> {
    value
        .get(ELEMENT_KEY)
        .and_then(Value::as_str)
        .map(|id| ElementHandle(id.to_string()))
        .ok_or_else(|| BrowserError::Protocol(format!("not an element reference: {}", value)))
}

pub fn parse_elements(value: &Value) -> BrowserResult<Vec<ElementHandle>> {
    value
        .as_array()
        .ok_or_else(|| BrowserError::Protocol(format!("expected element list, got {}", value)))?
        .iter()
        .map(parse_element)
        .collect()
}

fn expect_string(value: Value, what: &str) -> BrowserResult<String> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(BrowserError::Protocol(format!("{} returned {}", what, other))),
    }
}
