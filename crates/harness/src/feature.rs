//! Plain-text feature files
//!
//! The grammar is a deliberately small subset of Gherkin:
//!
//! ```text
//! # comment
//! Feature: Course catalog
//!
//! Scenario: Search finds a course
//!   Given app baseUrl "https://unlock.kwiga.com/"
//!   When I open "home"
//!   And I search course "Python"
//!   Then I expect results contain title "Python for beginners"
//! ```
//!
//! `Feature:` and `Scenario:` are matched without regard to case. Step
//! keywords are case-sensitive and must be followed by whitespace. Nothing
//! here fails: malformed input only loses names or steps.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HarnessError, HarnessResult};

/// Name used when a document has no `Feature:` line and no source name
pub const UNNAMED_FEATURE: &str = "Unnamed feature";

const FEATURE_PREFIX: &str = "feature:";
const SCENARIO_PREFIX: &str = "scenario:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKeyword {
    Given,
    When,
    Then,
    And,
    But,
}

impl StepKeyword {
    pub const ALL: [StepKeyword; 5] = [
        StepKeyword::Given,
        StepKeyword::When,
        StepKeyword::Then,
        StepKeyword::And,
        StepKeyword::But,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepKeyword::Given => "Given",
            StepKeyword::When => "When",
            StepKeyword::Then => "Then",
            StepKeyword::And => "And",
            StepKeyword::But => "But",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == token)
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub keyword: StepKeyword,
    /// Text after the keyword; this is what step patterns match against
    pub text: String,
    /// 1-based line in the source document
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub line: usize,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    pub scenarios: Vec<Scenario>,
}

impl Feature {
    /// Parse a document with no source name
    pub fn parse(text: &str) -> Self {
        parse_document(text, None)
    }

    /// Parse a document, falling back to `source_name` when it has no `Feature:` line
    pub fn parse_named(text: &str, source_name: &str) -> Self {
        parse_document(text, Some(source_name))
    }

    /// Read and parse a feature file. The file name is the fallback feature name.
    pub fn from_file(path: &Path) -> HarnessResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| HarnessError::ReadFeature {
            path: path.to_path_buf(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let mut feature = Self::parse_named(&content, &file_name);
        feature.source = Some(path.to_path_buf());
        Ok(feature)
    }

    pub fn step_count(&self) -> usize {
        self.scenarios.iter().map(|s| s.steps.len()).sum()
    }
}

fn parse_document(text: &str, source_name: Option<&str>) -> Feature {
    let mut feature_name: Option<String> = None;
    let mut scenarios = Vec::new();
    let mut current: Option<Scenario> = None;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = strip_prefix_ignore_case(line, FEATURE_PREFIX) {
            feature_name = Some(rest.trim().to_string());
        } else if let Some(rest) = strip_prefix_ignore_case(line, SCENARIO_PREFIX) {
            if let Some(done) = current.take() {
                scenarios.push(done);
            }
            current = Some(Scenario {
                name: rest.trim().to_string(),
                line: line_no,
                steps: Vec::new(),
            });
        } else if let Some((keyword, body)) = split_step(line) {
            match current.as_mut() {
                Some(scenario) => scenario.steps.push(Step {
                    keyword,
                    text: body.to_string(),
                    line: line_no,
                }),
                None => debug!("Dropping step outside a scenario at line {}: {}", line_no, line),
            }
        }
    }

    if let Some(done) = current {
        scenarios.push(done);
    }

    let name = feature_name
        .filter(|n| !n.is_empty())
        .or_else(|| source_name.map(String::from))
        .unwrap_or_else(|| UNNAMED_FEATURE.to_string());

    Feature {
        name,
        source: None,
        scenarios,
    }
}

fn strip_prefix_ignore_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        line.get(prefix.len()..)
    } else {
        None
    }
}

/// Split `Keyword <whitespace> body`. The line is already trimmed, so a
/// keyword followed by whitespace always has a non-empty body.
fn split_step(line: &str) -> Option<(StepKeyword, &str)> {
    let split_at = line.find(char::is_whitespace)?;
    let keyword = StepKeyword::from_token(&line[..split_at])?;
    let body = line[split_at..].trim();
    if body.is_empty() {
        return None;
    }
    Some((keyword, body))
}
