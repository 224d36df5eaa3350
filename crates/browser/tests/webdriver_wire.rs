//! WebDriver client against a stub driver

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use kwiga_browser::webdriver::ELEMENT_KEY;
use kwiga_browser::{
    BrowserError, BrowserSession, Locator, SessionFactory, SessionOptions, WebDriverFactory,
};

type Route = fn(&str, &str, &str) -> (u16, Value);

#[derive(Clone)]
struct StubDriver {
    route: Route,
    log: Arc<Mutex<Vec<String>>>,
}

async fn handle(State(driver): State<StubDriver>, method: Method, uri: Uri, body: Bytes) -> impl IntoResponse {
    let path = uri.path().to_string();
    driver.log.lock().unwrap().push(format!("{} {}", method, path));

    let (status, value) = (driver.route)(method.as_str(), &path, &String::from_utf8_lossy(&body));
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "value": value })))
}

/// Serve `route` on a local port, recording `METHOD path` of every request
async fn stub_driver(route: Route) -> (String, Arc<Mutex<Vec<String>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().fallback(handle).with_state(StubDriver {
        route,
        log: Arc::clone(&log),
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), log)
}

fn new_session() -> (u16, Value) {
    (200, json!({ "sessionId": "s-1", "capabilities": {} }))
}

fn kwiga_site(method: &str, path: &str, body: &str) -> (u16, Value) {
    match (method, path) {
        ("POST", "/session") => new_session(),
        ("POST", "/session/s-1/window/maximize") => (
            500,
            json!({ "error": "unsupported operation", "message": "cannot maximize headless window" }),
        ),
        ("POST", "/session/s-1/element") if body.contains("Missing") => (
            404,
            json!({ "error": "no such element", "message": "Unable to locate element" }),
        ),
        ("POST", "/session/s-1/element") => (200, json!({ ELEMENT_KEY: "e-1" })),
        ("POST", "/session/s-1/elements") if body.contains("Missing") => (200, json!([])),
        ("POST", "/session/s-1/elements") => (200, json!([{ ELEMENT_KEY: "e-1" }, { ELEMENT_KEY: "e-2" }])),
        ("GET", "/session/s-1/element/e-1/displayed") => (200, json!(true)),
        ("GET", "/session/s-1/element/e-2/displayed") => (200, json!(false)),
        ("GET", "/session/s-1/element/e-1/text") => (200, json!("LMS")),
        ("GET", "/session/s-1/url") => (200, json!("https://kwiga.com/")),
        ("GET", "/session/s-1/window/handles") => (200, json!(["w-1", "w-2"])),
        _ => (200, Value::Null),
    }
}

fn refusing_driver(_: &str, _: &str, _: &str) -> (u16, Value) {
    (
        500,
        json!({ "error": "session not created", "message": "Chrome failed to start" }),
    )
}

fn rejecting_timeouts(method: &str, path: &str, _: &str) -> (u16, Value) {
    match (method, path) {
        ("POST", "/session") => new_session(),
        ("POST", "/session/s-1/timeouts") => (
            400,
            json!({ "error": "invalid argument", "message": "implicit must be an integer" }),
        ),
        _ => (200, Value::Null),
    }
}

fn chrome() -> SessionOptions {
    SessionOptions {
        browser: "chrome".to_string(),
        headless: true,
        implicit_wait: Duration::from_secs(5),
    }
}

fn requests(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
    log.lock().unwrap().clone()
}

#[tokio::test]
async fn session_lifecycle_over_the_wire() {
    let (endpoint, log) = stub_driver(kwiga_site).await;
    let factory = WebDriverFactory::new(endpoint).unwrap();

    // maximize failing is only a warning
    let mut session = factory.create(&chrome()).await.unwrap();

    session.open("https://kwiga.com/").await.unwrap();
    assert_eq!(session.current_url().await.unwrap(), "https://kwiga.com/");

    let link = session
        .find_element(&Locator::link_text("LMS"), Duration::from_secs(1))
        .await
        .unwrap();
    assert_eq!(session.text(&link).await.unwrap(), "LMS");
    session.click(&link).await.unwrap();

    assert_eq!(session.window_handles().await.unwrap(), vec!["w-1", "w-2"]);

    session.quit().await.unwrap();
    assert!(matches!(
        session.current_url().await,
        Err(BrowserError::NotInitialized)
    ));

    assert_eq!(
        requests(&log),
        vec![
            "POST /session",
            "POST /session/s-1/timeouts",
            "POST /session/s-1/window/maximize",
            "POST /session/s-1/url",
            "GET /session/s-1/url",
            "POST /session/s-1/element",
            "GET /session/s-1/element/e-1/displayed",
            "GET /session/s-1/element/e-1/text",
            "POST /session/s-1/element/e-1/click",
            "GET /session/s-1/window/handles",
            "DELETE /session/s-1",
        ]
    );
}

#[tokio::test]
async fn missing_element_times_out() {
    let (endpoint, _log) = stub_driver(kwiga_site).await;
    let factory = WebDriverFactory::new(endpoint).unwrap();
    let mut session = factory.create(&chrome()).await.unwrap();

    let err = session
        .find_element(&Locator::link_text("Missing"), Duration::ZERO)
        .await
        .unwrap_err();

    match err {
        BrowserError::ElementNotFound { locator, timeout_ms } => {
            assert_eq!(locator, Locator::link_text("Missing"));
            assert_eq!(timeout_ms, 0);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn find_all_returns_hidden_matches_without_waiting() {
    let (endpoint, log) = stub_driver(kwiga_site).await;
    let factory = WebDriverFactory::new(endpoint).unwrap();
    let mut session = factory.create(&chrome()).await.unwrap();
    let dropdowns = Locator::css(".header__menu_item_dropdown");

    // e-2 is not displayed, so the visibility wait gives up
    assert!(matches!(
        session.find_elements(&dropdowns, Duration::ZERO).await,
        Err(BrowserError::ElementNotFound { .. })
    ));

    log.lock().unwrap().clear();
    let all = session.find_all(&dropdowns).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].id(), "e-2");
    assert_eq!(requests(&log), vec!["POST /session/s-1/elements"]);

    let none = session.find_all(&Locator::css(".Missing")).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn driver_refusing_a_session_is_a_creation_error() {
    let (endpoint, log) = stub_driver(refusing_driver).await;
    let factory = WebDriverFactory::new(endpoint).unwrap();

    let err = factory.create(&chrome()).await.err().unwrap();
    assert!(matches!(err, BrowserError::SessionCreation(_)));
    assert!(err.to_string().contains("Chrome failed to start"));
    assert_eq!(requests(&log).len(), 1);
}

#[tokio::test]
async fn failed_setup_closes_the_new_session() {
    let (endpoint, log) = stub_driver(rejecting_timeouts).await;
    let factory = WebDriverFactory::new(endpoint).unwrap();

    let err = factory.create(&chrome()).await.err().unwrap();
    assert!(matches!(
        err,
        BrowserError::WebDriver { ref error, .. } if error == "invalid argument"
    ));
    assert_eq!(
        requests(&log),
        vec![
            "POST /session",
            "POST /session/s-1/timeouts",
            "DELETE /session/s-1",
        ]
    );
}
