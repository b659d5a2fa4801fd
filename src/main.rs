//! Render-Lens main entry point
//!
//! This is the command-line interface for the Render-Lens page classifier.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use render_lens::analysis::{PreviewContent, PreviewVerdict};
use render_lens::config::{
    default_config_hash, load_config_with_hash, validate, Config, ReportFormat,
};
use render_lens::output::{print_summary, render_json, render_report, write_markdown_report};
use render_lens::snapshot::load_snapshot;
use render_lens::{AnalysisResponse, Analyzer, PageSnapshot};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Render-Lens: how much of a page does JavaScript render?
///
/// Render-Lens compares a page's raw server HTML with its final DOM, detects
/// frontend frameworks and estimates the split between static, server-side
/// and client-side rendering, then reports the SEO consequences.
#[derive(Parser, Debug)]
#[command(name = "render-lens")]
#[command(version = "1.0.0")]
#[command(about = "A rendering-strategy classifier for web pages", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Report format, overriding the configuration
    #[arg(short, long, global = true, value_enum)]
    format: Option<ReportFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, global = true, value_name = "FILE")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Capture a live page (scripts are not executed) and analyze it
    Url {
        /// The page URL
        url: String,
    },

    /// Analyze a recorded page snapshot (JSON)
    Snapshot {
        /// Snapshot file
        file: PathBuf,
    },

    /// Decide what a no-JavaScript preview of a recorded snapshot shows
    Preview {
        /// Snapshot file
        file: PathBuf,
    },

    /// Validate the configuration and print the effective settings
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = load_configuration(cli.config.as_deref())?;
    let format = cli.format.unwrap_or(config.output.format);

    match cli.command {
        Command::CheckConfig => handle_check_config(&config, &config_hash),
        Command::Url { url } => {
            let analyzer = Analyzer::new(config)?;
            let snapshot = analyzer
                .capture(&url)
                .await
                .with_context(|| format!("Failed to capture {}", url))?;
            let response = analyze(&analyzer, &snapshot).await?;
            finish(&response, format, &config_hash, cli.output.as_deref())
        }
        Command::Snapshot { file } => {
            let analyzer = Analyzer::new(config)?;
            let snapshot = read_snapshot(&file)?;
            let response = analyze(&analyzer, &snapshot).await?;
            finish(&response, format, &config_hash, cli.output.as_deref())
        }
        Command::Preview { file } => {
            let analyzer = Analyzer::new(config)?;
            let snapshot = read_snapshot(&file)?;
            handle_preview(&analyzer, &snapshot, format).await
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("render_lens=info,warn"),
            1 => EnvFilter::new("render_lens=debug,info"),
            2 => EnvFilter::new("render_lens=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configuration file, or the built-in defaults when none is given
fn load_configuration(path: Option<&Path>) -> anyhow::Result<(Config, String)> {
    let Some(path) = path else {
        tracing::debug!("No configuration file given, using defaults");
        return Ok((Config::default(), default_config_hash()));
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);
    Ok((config, hash))
}

fn read_snapshot(path: &Path) -> anyhow::Result<PageSnapshot> {
    load_snapshot(path).with_context(|| format!("Failed to load snapshot {}", path.display()))
}

async fn analyze(analyzer: &Analyzer, snapshot: &PageSnapshot) -> anyhow::Result<AnalysisResponse> {
    let response = analyzer
        .analyze_within(snapshot, analyzer.analysis_timeout())
        .await?;
    Ok(response)
}

/// Emits the report and turns a failed analysis into a non-zero exit
fn finish(
    response: &AnalysisResponse,
    format: ReportFormat,
    config_hash: &str,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    match (format, output) {
        (ReportFormat::Text, None) => print_summary(response),
        (ReportFormat::Markdown, Some(path)) => write_markdown_report(response, config_hash, path)?,
        (format, None) => println!("{}", render_report(response, format, config_hash)?),
        (format, Some(path)) => {
            let report = render_report(response, format, config_hash)?;
            std::fs::write(path, report)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("✓ Report written to: {}", path.display());
        }
    }

    if response.is_error() {
        bail!("The page could not be analyzed");
    }
    Ok(())
}

/// Handles `check-config`: validates and shows the effective settings
fn handle_check_config(config: &Config, config_hash: &str) -> anyhow::Result<()> {
    validate(config).context("Configuration is invalid")?;

    println!("=== Render-Lens Configuration ===\n");

    println!("Fetcher:");
    println!("  Crawler user agent: {}", config.fetcher.crawler_user_agent);
    println!("  Browser user agent: {}", config.fetcher.browser_user_agent);
    println!("  Request timeout: {}ms", config.fetcher.request_timeout_ms);
    println!("  Connect timeout: {}ms", config.fetcher.connect_timeout_ms);

    println!("\nAnalysis:");
    println!("  Timeout: {}ms", config.analysis.timeout_ms);

    println!("\nOutput:");
    println!("  Format: {:?}", config.output.format);

    println!("\n✓ Configuration is valid (hash: {})", config_hash);
    Ok(())
}

/// Handles `preview`: analyzes the snapshot and judges the raw HTML it compared
async fn handle_preview(
    analyzer: &Analyzer,
    snapshot: &PageSnapshot,
    format: ReportFormat,
) -> anyhow::Result<()> {
    let (response, verdict) = analyzer
        .preview_within(snapshot, analyzer.analysis_timeout())
        .await?;
    if response.is_error() {
        tracing::warn!("Analysis failed; previewing with uncertain scores");
    }

    match format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&verdict)?),
        ReportFormat::Text | ReportFormat::Markdown => print_verdict(&verdict),
    }

    // Keep the full record available for scripted use
    tracing::debug!("Analysis record: {}", render_json(&response)?);
    Ok(())
}

fn print_verdict(verdict: &PreviewVerdict) {
    match verdict.content {
        PreviewContent::JavaScriptRequired => {
            println!("JavaScript Is Required For This Page");
            println!("  Without JavaScript, crawlers see little of the rendered content.");
        }
        PreviewContent::ServerContent => {
            println!("Page Without JavaScript");
            println!("  The initial HTML carries the page's content.");
        }
    }
    println!(
        "  Static {}% | SSR {}% | CSR {}%",
        verdict.bar.r#static, verdict.bar.ssr, verdict.bar.csr
    );
    println!("  Raw HTML text: {} characters", verdict.raw_text_chars);
}
