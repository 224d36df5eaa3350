//! Pass/fail aggregation over run results
//!
//! Pure functions only; console output lives in the CLI.

use serde::{Deserialize, Serialize};

use crate::runner::FeatureRunResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl Counts {
    pub fn record(&mut self, passed: bool) {
        self.total += 1;
        if passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn add(&mut self, other: Counts) {
        self.total += other.total;
        self.passed += other.passed;
        self.failed += other.failed;
    }
}

/// Scenario and step counts for one feature
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSummary {
    pub scenarios: Counts,
    pub steps: Counts,
}

impl FeatureSummary {
    pub fn of(result: &FeatureRunResult) -> Self {
        let mut summary = Self::default();
        for scenario in &result.scenarios {
            summary.scenarios.record(scenario.passed());
            for step in &scenario.steps {
                summary.steps.record(step.passed);
            }
        }
        summary
    }
}

/// Counts across every feature of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub features: usize,
    /// Features that stopped early because no browser session could be started
    pub aborted_features: usize,
    pub scenarios: Counts,
    pub steps: Counts,
}

impl RunSummary {
    pub fn add_feature(&mut self, feature: &FeatureRunResult) {
        let summary = feature.summary();
        self.features += 1;
        self.scenarios.add(summary.scenarios);
        self.steps.add(summary.steps);
    }

    pub fn add_aborted(&mut self) {
        self.features += 1;
        self.aborted_features += 1;
    }

    /// True when anything failed; the run should then exit non-zero
    pub fn has_failures(&self) -> bool {
        self.scenarios.failed > 0 || self.steps.failed > 0 || self.aborted_features > 0
    }
}

pub fn summarize(results: &[FeatureRunResult]) -> RunSummary {
    let mut summary = RunSummary::default();
    for result in results {
        summary.add_feature(result);
    }
    summary
}
