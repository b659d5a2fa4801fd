//! Markdown report generation
//!
//! This module generates a human-readable markdown report of one analysis,
//! covering the summary, rendering distribution, performance, links and SEO
//! issues.

use crate::analysis::{AnalysisResponse, AnalysisResult, FailureRecord};
use crate::fetcher::RawHtmlSource;
use crate::output::format::{format_frameworks, format_time, percent, Rating};
use crate::output::OutputResult;
use crate::seo::split_issue;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown report to disk
///
/// # Arguments
///
/// * `response` - The analysis to report
/// * `config_hash` - Hash of the configuration the analysis ran with
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to write the report
pub fn write_markdown_report(
    response: &AnalysisResponse,
    config_hash: &str,
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_markdown_report(response, config_hash);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    tracing::info!("Wrote report to {}", output_path.display());
    Ok(())
}

/// Formats an analysis as markdown
///
/// # Arguments
///
/// * `response` - The analysis to report
/// * `config_hash` - Hash of the configuration the analysis ran with
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_report(response: &AnalysisResponse, config_hash: &str) -> String {
    let mut md = String::new();

    md.push_str("# Render-Lens Analysis Report\n\n");

    match response {
        AnalysisResponse::Complete(result) => push_result(&mut md, result, config_hash),
        AnalysisResponse::Failed(failure) => push_failure(&mut md, failure, config_hash),
    }

    md
}

fn push_failure(md: &mut String, failure: &FailureRecord, config_hash: &str) {
    md.push_str("## Analysis Failed\n\n");
    md.push_str(&format!("- **Error**: {}\n", failure.message));
    md.push_str(&format!("- **Config Hash**: {}\n\n", config_hash));
    md.push_str("The page could not be analyzed; no measurement in this report is meaningful.\n");
}

fn push_result(md: &mut String, result: &AnalysisResult, config_hash: &str) {
    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **URL**: {}\n", result.url));
    md.push_str(&format!("- **Analyzed**: {}\n", result.analyzed_at.to_rfc3339()));
    md.push_str(&format!("- **Config Hash**: {}\n", config_hash));
    let raw_source = match &result.raw_html_source {
        RawHtmlSource::Network => "network refetch".to_string(),
        RawHtmlSource::DomFallback { reason } => format!("current DOM ({})", reason),
    };
    md.push_str(&format!("- **Raw HTML**: {}\n\n", raw_source));

    // Quick summary
    md.push_str("## Quick Summary\n\n");
    md.push_str(&format!(
        "- **JavaScript Dependency**: {} ({:.2})\n",
        result.dependency_level, result.dependency_score
    ));
    md.push_str(&format!("- **Script Tags**: {}\n", result.scripts));
    md.push_str(&format!("- **Dynamic Elements**: {}\n", result.dynamic_content));
    md.push_str(&format!(
        "- **Frameworks**: {}\n",
        format_frameworks(&result.frameworks)
    ));
    md.push_str(&format!("- **Rendering Type**: {}\n\n", result.rendering_type));

    // Rendering distribution
    let scores = &result.rendering_scores;
    md.push_str("## Rendering Distribution\n\n");
    md.push_str("| Strategy | Share |\n");
    md.push_str("|----------|-------|\n");
    md.push_str(&format!("| Static | {} |\n", percent(scores.r#static)));
    md.push_str(&format!("| SSR | {} |\n", percent(scores.ssr)));
    md.push_str(&format!("| CSR | {} |\n\n", percent(scores.csr)));
    match result.content_ratio {
        Some(ratio) => md.push_str(&format!("Content ratio (raw / final text): {:.3}\n\n", ratio)),
        None => md.push_str("Content ratio (raw / final text): n/a\n\n"),
    }

    // Performance
    let timing = &result.performance.timing;
    md.push_str("## Performance Metrics\n\n");
    md.push_str("| Metric | Value | Rating |\n");
    md.push_str("|--------|-------|--------|\n");
    for (label, ms) in [
        ("Load Time", timing.load_time),
        ("First Paint", timing.first_paint),
        ("First Contentful Paint", timing.first_contentful_paint),
    ] {
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            label,
            format_time(ms),
            Rating::for_timing(ms)
        ));
    }
    let resources = &result.performance.resources;
    md.push_str(&format!(
        "\n- **Resources**: JS: {} | CSS: {} | Images: {}\n\n",
        resources.js, resources.css, resources.images
    ));

    // Links
    let links = &result.links;
    md.push_str("## Link Analysis\n\n");
    md.push_str("| Total | HTML | JS | Broken |\n");
    md.push_str("|-------|------|----|--------|\n");
    md.push_str(&format!(
        "| {} | {} | {} | {} |\n\n",
        links.total, links.html_links, links.js_links, links.broken_links
    ));

    // SEO
    if !result.seo_issues.is_empty() {
        md.push_str("## SEO Issues\n\n");
        for issue in &result.seo_issues {
            match split_issue(issue) {
                (finding, Some(recommendation)) => {
                    md.push_str(&format!("- **{}**: {}\n", finding, recommendation))
                }
                (finding, None) => md.push_str(&format!("- **{}**\n", finding)),
            }
        }
        md.push('\n');
    }
}
