//! Error types for the harness

use std::path::PathBuf;

use kwiga_browser::BrowserError;
use thiserror::Error;

/// Why a single step failed.
///
/// Everything except [`StepError::Session`] is recorded against the step and
/// the run carries on.
#[derive(Error, Debug)]
pub enum StepError {
    #[error("No step definition matches: {0}")]
    NoMatchingStep(String),

    #[error("{0}")]
    Assertion(String),

    #[error("Step pattern captured no argument #{0}")]
    MissingArgument(usize),

    #[error("{0}")]
    Browser(#[from] BrowserError),

    /// The browser session could not be created at all
    #[error("Browser session unavailable: {0}")]
    Session(BrowserError),
}

impl StepError {
    /// Fatal errors abort the feature instead of failing one step
    pub fn is_fatal(&self) -> bool {
        matches!(self, StepError::Session(_))
    }
}

/// Errors that escape a feature run or the whole run
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {path}: {source}")]
    ReadFeature {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid step pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Features directory not found: {0}")]
    FeaturesDirMissing(PathBuf),

    #[error("Feature '{feature}' aborted at step '{step}': {source}")]
    SessionUnavailable {
        feature: String,
        step: String,
        #[source]
        source: StepError,
    },
}

pub type HarnessResult<T> = Result<T, HarnessError>;
pub type StepOutcome = Result<(), StepError>;
