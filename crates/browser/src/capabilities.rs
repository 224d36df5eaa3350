//! Driver capabilities for new sessions

use serde_json::{json, Value};

use crate::error::BrowserResult;
use crate::session::{BrowserKind, SessionOptions};

/// Build the `capabilities` object for a `New Session` request.
///
/// The browser name is validated here, before anything is sent to the driver.
pub fn build(options: &SessionOptions) -> BrowserResult<Value> {
    let kind: BrowserKind = options.browser.parse()?;

    let always_match = match kind {
        BrowserKind::Chrome => {
            let mut args = vec!["--no-sandbox", "--disable-dev-shm-usage"];
            if options.headless {
                args.insert(0, "--headless=new");
            }
            json!({
                "browserName": "chrome",
                "goog:chromeOptions": { "args": args },
            })
        }
        BrowserKind::Firefox => {
            let args: Vec<&str> = if options.headless { vec!["-headless"] } else { vec![] };
            json!({
                "browserName": "firefox",
                "moz:firefoxOptions": { "args": args },
            })
        }
    };

    Ok(json!({
        "capabilities": {
            "alwaysMatch": always_match,
        }
    }))
}
