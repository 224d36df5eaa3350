//! kwiga-bdd - runs `.kwiga` feature files against a WebDriver browser
//!
//! Exit status: 0 when everything passed, 1 when any step or scenario failed
//! or a feature was aborted, 2 when the run could not be set up.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kwiga_browser::WebDriverFactory;
use kwiga_harness::{steps, suite, ExecutionContext, HarnessConfig};

mod output;

#[derive(Parser, Debug)]
#[command(name = "kwiga-bdd")]
#[command(author, version, about = "Behaviour-driven browser tests for Kwiga", long_about = None)]
struct Args {
    /// Configuration file (TOML); defaults apply when it does not exist
    #[arg(short, long, env = "KWIGA_CONFIG", default_value = "kwiga.toml")]
    config: PathBuf,

    /// Directory holding the feature files
    #[arg(short, long, env = "KWIGA_FEATURES_DIR")]
    features: Option<PathBuf>,

    /// Feature file extension
    #[arg(long, env = "KWIGA_EXTENSION")]
    extension: Option<String>,

    /// Run at most this many feature files
    #[arg(long, env = "KWIGA_MAX_FEATURE_FILES")]
    max_files: Option<usize>,

    /// Site root for page paths
    #[arg(long, env = "KWIGA_BASE_URL")]
    base_url: Option<String>,

    /// Browser to start (chrome, firefox)
    #[arg(long, env = "KWIGA_BROWSER")]
    browser: Option<String>,

    /// Run the browser without a window
    #[arg(long, env = "KWIGA_HEADLESS")]
    headless: Option<bool>,

    /// WebDriver endpoint
    #[arg(long, env = "KWIGA_WEBDRIVER_URL")]
    webdriver_url: Option<String>,

    /// Directory to write test-results.json into
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Resolve every step without starting a browser
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Command-line values win over the configuration file
    fn apply(&self, config: &mut HarnessConfig) {
        if let Some(dir) = &self.features {
            config.features_dir = dir.clone();
        }
        if let Some(ext) = &self.extension {
            config.extension = ext.clone();
        }
        if self.max_files.is_some() {
            config.max_feature_files = self.max_files;
        }
        if let Some(url) = &self.base_url {
            config.session.base_url = url.clone();
        }
        if let Some(browser) = &self.browser {
            config.session.browser = browser.clone();
        }
        if let Some(headless) = self.headless {
            config.session.headless = headless;
        }
        if let Some(url) = &self.webdriver_url {
            config.webdriver_url = url.clone();
        }
    }
}

fn main() {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .with_target(false)
        .init();

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            output::print_error(&format!("Failed to create tokio runtime: {}", e));
            std::process::exit(2);
        }
    };

    match rt.block_on(run(args)) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            std::process::exit(2);
        }
    }
}

/// `Ok(true)` when nothing failed
async fn run(args: Args) -> anyhow::Result<bool> {
    let mut config = HarnessConfig::load(&args.config)
        .with_context(|| format!("Failed to load config {}", args.config.display()))?;
    args.apply(&mut config);

    let files = suite::discover(&config.features_dir, &config.extension, config.max_feature_files)?;
    if files.is_empty() {
        output::print_warning(&format!(
            "No .{} feature files found in {}",
            config.extension,
            config.features_dir.display()
        ));
        return Ok(true);
    }

    let registry = steps::default_registry()?;

    if args.dry_run {
        let unmatched = suite::check_files(&registry, &files)?;
        print!("{}", output::render_unmatched(&unmatched));
        return Ok(unmatched.is_empty());
    }

    let factory = WebDriverFactory::new(config.webdriver_url.as_str())
        .context("Failed to create WebDriver client")?;
    let mut ctx = ExecutionContext::new(config.session.clone(), Arc::new(factory));

    let report = suite::run_files(&mut ctx, &registry, &files, |outcome| {
        print!("{}", output::render_outcome(outcome));
    })
    .await;
    ctx.quit_session().await;

    let summary = report.summary();
    output::print_overall(&summary);

    if let Some(dir) = &args.output {
        let path = output::write_results(dir, &report)?;
        info!("Results written to: {}", path.display());
    }

    Ok(!summary.has_failures())
}
