//! Browser session capability for kwiga-bdd
//!
//! Step actions drive the browser through the [`BrowserSession`] trait. The
//! production implementation speaks the W3C WebDriver protocol to an external
//! driver process:
//!
//! ```text
//! ┌──────────────┐   SessionFactory::create   ┌──────────────────┐
//! │ step action  │ ─────────────────────────▶ │ WebDriverFactory │
//! └──────┬───────┘                            └────────┬─────────┘
//!        │ BrowserSession                              │ POST /session
//!        ▼                                             ▼
//! ┌──────────────────┐    JSON over HTTP     ┌──────────────────────┐
//! │ WebDriverSession │ ────────────────────▶ │ chromedriver / gecko │
//! └──────────────────┘                       └──────────────────────┘
//! ```

pub mod capabilities;
pub mod error;
pub mod locator;
pub mod session;
pub mod waits;
pub mod webdriver;

pub use error::{BrowserError, BrowserResult};
pub use locator::Locator;
pub use session::{BrowserKind, BrowserSession, ElementHandle, SessionFactory, SessionOptions};
pub use webdriver::{WebDriverFactory, WebDriverSession};
