//! Execution engine: runs a parsed feature step by step

use std::path::PathBuf;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::context::ExecutionContext;
use crate::error::{HarnessError, HarnessResult};
use crate::feature::{Feature, Step, StepKeyword};
use crate::registry::StepRegistry;
use crate::report::FeatureSummary;

/// Outcome of one executed step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub keyword: StepKeyword,
    pub text: String,
    pub line: usize,
    pub passed: bool,
    pub error: Option<String>,
    pub duration_ms: u64,
}

impl StepResult {
    pub fn passed(step: &Step, duration_ms: u64) -> Self {
        Self {
            keyword: step.keyword,
            text: step.text.clone(),
            line: step.line,
            passed: true,
            error: None,
            duration_ms,
        }
    }

    pub fn failed(step: &Step, error: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            keyword: step.keyword,
            text: step.text.clone(),
            line: step.line,
            passed: false,
            error: Some(error.into()),
            duration_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub steps: Vec<StepResult>,
}

impl ScenarioResult {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// A scenario passes when every step passed; one with no steps passes vacuously.
    pub fn passed(&self) -> bool {
        self.steps.iter().all(|s| s.passed)
    }

    pub fn failed_steps(&self) -> impl Iterator<Item = &StepResult> {
        self.steps.iter().filter(|s| !s.passed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRunResult {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    pub scenarios: Vec<ScenarioResult>,
}

impl FeatureRunResult {
    pub fn passed(&self) -> bool {
        self.scenarios.iter().all(ScenarioResult::passed)
    }

    pub fn summary(&self) -> FeatureSummary {
        FeatureSummary::of(self)
    }
}

/// Run every scenario of `feature` in order.
///
/// A failing step is recorded and the next step still runs, even though the
/// page may now be in an unexpected state. Only a failure to obtain a browser
/// session at all aborts the feature.
pub async fn run_feature(
    ctx: &mut ExecutionContext,
    registry: &StepRegistry,
    feature: &Feature,
) -> HarnessResult<FeatureRunResult> {
    info!("Feature: {}", feature.name);

    let mut scenarios = Vec::with_capacity(feature.scenarios.len());

    for scenario in &feature.scenarios {
        info!("  Scenario: {}", scenario.name);
        let mut result = ScenarioResult::new(&scenario.name);

        for step in &scenario.steps {
            let start = Instant::now();
            let outcome = registry.resolve_and_execute(&step.text, ctx).await;
            let duration_ms = start.elapsed().as_millis() as u64;

            match outcome {
                Ok(()) => {
                    debug!("    PASS {} {} ({} ms)", step.keyword, step.text, duration_ms);
                    result.steps.push(StepResult::passed(step, duration_ms));
                }
                Err(e) if e.is_fatal() => {
                    return Err(HarnessError::SessionUnavailable {
                        feature: feature.name.clone(),
                        step: step.text.clone(),
                        source: e,
                    });
                }
                Err(e) => {
                    warn!("    FAIL {} {} (line {}): {}", step.keyword, step.text, step.line, e);
                    result.steps.push(StepResult::failed(step, e.to_string(), duration_ms));
                }
            }
        }

        scenarios.push(result);
    }

    Ok(FeatureRunResult {
        name: feature.name.clone(),
        source: feature.source.clone(),
        scenarios,
    })
}
