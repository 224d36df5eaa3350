//! kwiga-bdd harness
//!
//! Parses plain-text feature files, binds each step to an action through an
//! ordered pattern registry, and runs the actions against a shared browser
//! session.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  suite::run_files(ctx, registry, files)                     │
//! │    └── for each file: Feature::from_file -> run_feature     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  runner::run_feature(ctx, registry, feature)                │
//! │    └── for each scenario, for each step:                    │
//! │          registry.resolve_and_execute(text, ctx)            │
//! │          Ok  -> StepResult(passed)                          │
//! │          Err -> StepResult(failed, message), keep going     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  StepRegistry: [(anchored regex, StepAction)], first match  │
//! │  ExecutionContext: SessionConfig + lazy BrowserSession      │
//! │  report::summarize(results) -> RunSummary                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod assertions;
pub mod config;
pub mod context;
pub mod error;
pub mod feature;
pub mod pages;
pub mod registry;
pub mod report;
pub mod runner;
pub mod steps;
pub mod suite;

#[cfg(test)]
mod testing;

pub use config::{HarnessConfig, SessionConfig};
pub use context::ExecutionContext;
pub use error::{HarnessError, HarnessResult, StepError, StepOutcome};
pub use feature::{Feature, Scenario, Step, StepKeyword};
pub use registry::{StepAction, StepArgs, StepMatcher, StepRegistry};
pub use report::{summarize, Counts, FeatureSummary, RunSummary};
pub use runner::{run_feature, FeatureRunResult, ScenarioResult, StepResult};
pub use suite::{FeatureOutcome, SuiteReport};
