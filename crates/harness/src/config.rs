//! Harness configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

use kwiga_browser::SessionOptions;
use serde::{Deserialize, Serialize};

use crate::error::HarnessResult;

/// Settings step actions read and change while a run is in progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Site root every page path is resolved against
    pub base_url: String,

    /// Browser to start (`chrome` or `firefox`); checked when the session is created
    pub browser: String,

    pub headless: bool,

    /// Driver-side implicit wait, in seconds
    pub implicit_wait: u64,

    /// Bound for visibility and text waits, in seconds
    pub explicit_wait: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://kwiga.com/".to_string(),
            browser: "chrome".to_string(),
            headless: true,
            implicit_wait: 5,
            explicit_wait: 10,
        }
    }
}

impl SessionConfig {
    pub fn explicit_wait(&self) -> Duration {
        Duration::from_secs(self.explicit_wait)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            browser: self.browser.clone(),
            headless: self.headless,
            implicit_wait: Duration::from_secs(self.implicit_wait),
        }
    }
}

/// Full harness configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub session: SessionConfig,

    /// WebDriver endpoint sessions are created against
    pub webdriver_url: String,

    /// Directory scanned for feature files
    pub features_dir: PathBuf,

    /// Feature file extension, without the dot
    pub extension: String,

    /// Run at most this many feature files
    pub max_feature_files: Option<usize>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            webdriver_url: kwiga_browser::webdriver::DEFAULT_ENDPOINT.to_string(),
            features_dir: PathBuf::from("tests/features"),
            extension: "kwiga".to_string(),
            max_feature_files: None,
        }
    }
}

impl HarnessConfig {
    /// Load configuration from a TOML file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> HarnessResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> HarnessResult<Self> {
        Ok(toml::from_str(content)?)
    }
}
