//! Output module for rendering analysis reports
//!
//! This module handles:
//! - JSON export of the analysis record
//! - Markdown reports
//! - Terse terminal summaries

mod format;
mod markdown;
mod summary;

pub use format::{format_frameworks, format_time, Rating};
pub use markdown::{format_markdown_report, write_markdown_report};
pub use summary::{format_summary, print_summary};

use crate::analysis::AnalysisResponse;
use crate::config::ReportFormat;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Serializes an analysis as pretty-printed JSON
pub fn render_json(response: &AnalysisResponse) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(response)?)
}

/// Renders an analysis in the requested format
///
/// # Arguments
///
/// * `response` - The analysis to render
/// * `format` - Output format
/// * `config_hash` - Configuration hash, shown in markdown reports
pub fn render_report(
    response: &AnalysisResponse,
    format: ReportFormat,
    config_hash: &str,
) -> OutputResult<String> {
    match format {
        ReportFormat::Text => Ok(format_summary(response)),
        ReportFormat::Json => render_json(response),
        ReportFormat::Markdown => Ok(format_markdown_report(response, config_hash)),
    }
}
