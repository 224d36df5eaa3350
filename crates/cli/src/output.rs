//! Console output and result files

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use serde::Serialize;

use kwiga_harness::suite::UnmatchedStep;
use kwiga_harness::{Counts, FeatureOutcome, FeatureRunResult, RunSummary, StepResult, SuiteReport};

/// One line per step, failures carry their message
pub fn render_step(step: &StepResult) -> String {
    if step.passed {
        format!("    {} {}", "[PASS]".green(), step.text)
    } else {
        format!(
            "    {} {} :: {}",
            "[FAIL]".red(),
            step.text,
            step.error.as_deref().unwrap_or("unknown error")
        )
    }
}

/// Scenario and step lines of one feature, then its own summary
pub fn render_feature(result: &FeatureRunResult) -> String {
    let mut out = String::new();
    let source = result
        .source
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<inline>".to_string());

    let _ = writeln!(out, "\n=== Feature file: {} ===", source);
    let _ = writeln!(out, "Feature: {}", result.name);

    for scenario in &result.scenarios {
        let _ = writeln!(out, "  Scenario: {}", scenario.name);
        for step in &scenario.steps {
            let _ = writeln!(out, "{}", render_step(step));
        }
    }

    let summary = result.summary();
    let _ = writeln!(out, "\n  --- Feature summary ---");
    let _ = writeln!(out, "  Scenarios: {}", counts_line(summary.scenarios));
    let _ = writeln!(out, "  Steps:     {}", counts_line(summary.steps));
    out
}

pub fn render_outcome(outcome: &FeatureOutcome) -> String {
    match outcome {
        FeatureOutcome::Completed(result) => render_feature(result),
        FeatureOutcome::Aborted { path, error } => format!(
            "\n=== Feature file: {} ===\n  {} {}\n",
            path.display(),
            "[ABORTED]".red().bold(),
            error
        ),
    }
}

fn counts_line(counts: Counts) -> String {
    format!(
        "{} (passed: {}, failed: {})",
        counts.total,
        counts.passed.to_string().green(),
        counts.failed.to_string().red()
    )
}

/// Scenario and step totals as a table
pub fn summary_table(summary: &RunSummary) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["", "Total", "Passed", "Failed"]);
    for (label, counts) in [("Scenarios", summary.scenarios), ("Steps", summary.steps)] {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(counts.total),
            Cell::new(counts.passed).fg(Color::Green),
            Cell::new(counts.failed).fg(if counts.failed > 0 { Color::Red } else { Color::Reset }),
        ]);
    }
    table
}

pub fn print_overall(summary: &RunSummary) {
    println!("\n=========== OVERALL SUMMARY ===========");
    if summary.aborted_features > 0 {
        println!(
            "Features:   {} ({} aborted)",
            summary.features,
            summary.aborted_features.to_string().red()
        );
    } else {
        println!("Features:   {}", summary.features);
    }
    println!("{}", summary_table(summary));

    if summary.has_failures() {
        println!(
            "\n{}",
            "Some scenarios/steps failed. Check the log above for details.".red()
        );
    }
}

/// Steps without a binding, grouped by file
pub fn render_unmatched(unmatched: &[UnmatchedStep]) -> String {
    if unmatched.is_empty() {
        return format!("{} every step has a binding\n", "✓".green());
    }

    let mut out = String::new();
    for step in unmatched {
        let _ = writeln!(
            out,
            "{} {}:{} {}",
            "[UNBOUND]".yellow(),
            step.path.display(),
            step.line,
            step.text
        );
    }
    let _ = writeln!(out, "{} step(s) have no binding", unmatched.len());
    out
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message);
}

pub fn print_warning(message: &str) {
    println!("{} {}", "warning:".yellow().bold(), message);
}

#[derive(Serialize)]
struct ResultsFile<'a> {
    generated_at: DateTime<Utc>,
    summary: RunSummary,
    features: &'a [FeatureOutcome],
}

/// Write `test-results.json` into `dir`, creating it if needed
pub fn write_results(dir: &Path, report: &SuiteReport) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let path = dir.join("test-results.json");
    let file = ResultsFile {
        generated_at: Utc::now(),
        summary: report.summary(),
        features: &report.features,
    };
    std::fs::write(&path, serde_json::to_string_pretty(&file)?)?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kwiga_harness::{ScenarioResult, StepKeyword};

    fn plain() {
        colored::control::set_override(false);
    }

    fn step(text: &str, error: Option<&str>) -> StepResult {
        StepResult {
            keyword: StepKeyword::Given,
            text: text.to_string(),
            line: 3,
            passed: error.is_none(),
            error: error.map(str::to_string),
            duration_ms: 1,
        }
    }

    fn feature() -> FeatureRunResult {
        FeatureRunResult {
            name: "Catalog".to_string(),
            source: Some(PathBuf::from("tests/features/catalog.kwiga")),
            scenarios: vec![ScenarioResult {
                name: "Search".to_string(),
                steps: vec![
                    step(r#"I open "home""#, None),
                    step(r#"I click css ".nope""#, Some("element not found")),
                ],
            }],
        }
    }

    #[test]
    fn test_render_step() {
        plain();
        assert_eq!(render_step(&step("ok", None)), "    [PASS] ok");
        assert_eq!(
            render_step(&step("bad", Some("boom"))),
            "    [FAIL] bad :: boom"
        );
    }

    #[test]
    fn test_render_feature() {
        plain();
        let out = render_feature(&feature());
        assert!(out.contains("=== Feature file: tests/features/catalog.kwiga ==="));
        assert!(out.contains("Feature: Catalog\n  Scenario: Search\n"));
        assert!(out.contains(r#"[FAIL] I click css ".nope" :: element not found"#));
        assert!(out.contains("Scenarios: 1 (passed: 0, failed: 1)"));
        assert!(out.contains("Steps:     2 (passed: 1, failed: 1)"));
    }

    #[test]
    fn test_render_aborted() {
        plain();
        let out = render_outcome(&FeatureOutcome::Aborted {
            path: PathBuf::from("a.kwiga"),
            error: "Unsupported browser: safari".to_string(),
        });
        assert!(out.contains("[ABORTED] Unsupported browser: safari"));
    }

    #[test]
    fn test_render_unmatched() {
        plain();
        assert!(render_unmatched(&[]).contains("every step has a binding"));

        let out = render_unmatched(&[UnmatchedStep {
            path: PathBuf::from("a.kwiga"),
            line: 4,
            text: "I fly".to_string(),
        }]);
        assert!(out.contains("[UNBOUND] a.kwiga:4 I fly"));
        assert!(out.contains("1 step(s) have no binding"));
    }

    #[test]
    fn test_summary_table_rows() {
        let mut summary = RunSummary::default();
        summary.add_feature(&feature());
        let table = summary_table(&summary).to_string();
        assert!(table.contains("Scenarios"));
        assert!(table.contains("Steps"));
    }

    #[test]
    fn test_write_results() {
        let dir = tempfile::tempdir().unwrap();
        let report = SuiteReport {
            features: vec![FeatureOutcome::Completed(feature())],
        };

        let path = write_results(&dir.path().join("out"), &report).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();

        assert_eq!(json["summary"]["steps"]["failed"], 1);
        assert_eq!(json["features"][0]["status"], "completed");
        assert_eq!(json["features"][0]["name"], "Catalog");
        assert!(json["generated_at"].is_string());
    }
}
