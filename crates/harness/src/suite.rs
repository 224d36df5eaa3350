//! Running a directory of feature files

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{error, info};

use crate::context::ExecutionContext;
use crate::error::{HarnessError, HarnessResult};
use crate::feature::Feature;
use crate::registry::StepRegistry;
use crate::report::RunSummary;
use crate::runner::{run_feature, FeatureRunResult};

/// What happened to one feature file
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FeatureOutcome {
    Completed(FeatureRunResult),
    /// The file could not be read or no browser session could be started
    Aborted { path: PathBuf, error: String },
}

impl FeatureOutcome {
    pub fn passed(&self) -> bool {
        match self {
            FeatureOutcome::Completed(result) => result.passed(),
            FeatureOutcome::Aborted { .. } => false,
        }
    }
}

/// Results of every feature file in a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct SuiteReport {
    pub features: Vec<FeatureOutcome>,
}

impl SuiteReport {
    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary::default();
        for outcome in &self.features {
            match outcome {
                FeatureOutcome::Completed(result) => summary.add_feature(result),
                FeatureOutcome::Aborted { .. } => summary.add_aborted(),
            }
        }
        summary
    }
}

/// Feature files directly inside `dir` with the given extension, sorted by path
pub fn discover(dir: &Path, extension: &str, limit: Option<usize>) -> HarnessResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(HarnessError::FeaturesDirMissing(dir.to_path_buf()));
    }

    let extension = extension.trim_start_matches('.');
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| ext == extension)
                .unwrap_or(false)
        })
        .map(|e| e.into_path())
        .collect();

    files.sort();
    if let Some(limit) = limit {
        files.truncate(limit);
    }

    Ok(files)
}

/// Run each file in order. A file that cannot be read or whose browser session
/// cannot be started is recorded as aborted and the next file still runs.
///
/// `observe` is called after every file, in order.
pub async fn run_files<F>(
    ctx: &mut ExecutionContext,
    registry: &StepRegistry,
    files: &[PathBuf],
    mut observe: F,
) -> SuiteReport
where
    F: FnMut(&FeatureOutcome),
{
    info!("Running {} feature file(s)...", files.len());

    let mut report = SuiteReport::default();
    for path in files {
        let outcome = match run_file(ctx, registry, path).await {
            Ok(result) => FeatureOutcome::Completed(result),
            Err(e) => {
                error!("✗ {} - {}", path.display(), e);
                FeatureOutcome::Aborted {
                    path: path.clone(),
                    error: e.to_string(),
                }
            }
        };
        observe(&outcome);
        report.features.push(outcome);
    }

    report
}

async fn run_file(
    ctx: &mut ExecutionContext,
    registry: &StepRegistry,
    path: &Path,
) -> HarnessResult<FeatureRunResult> {
    let feature = Feature::from_file(path)?;
    run_feature(ctx, registry, &feature).await
}

/// A step text with no binding, found without running anything
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedStep {
    pub path: PathBuf,
    pub line: usize,
    pub text: String,
}

/// Resolve every step of every file against `registry` without a browser
pub fn check_files(registry: &StepRegistry, files: &[PathBuf]) -> HarnessResult<Vec<UnmatchedStep>> {
    let mut unmatched = Vec::new();
    for path in files {
        let feature = Feature::from_file(path)?;
        for scenario in &feature.scenarios {
            for step in &scenario.steps {
                if registry.resolve(&step.text).is_none() {
                    unmatched.push(UnmatchedStep {
                        path: path.clone(),
                        line: step.line,
                        text: step.text.clone(),
                    });
                }
            }
        }
    }
    Ok(unmatched)
}
