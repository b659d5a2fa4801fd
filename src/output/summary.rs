//! Terse plain-text summary for the terminal

use crate::analysis::AnalysisResponse;
use crate::output::format::{format_frameworks, format_time, percent, Rating};
use crate::seo::split_issue;

/// Formats the terminal summary of an analysis
pub fn format_summary(response: &AnalysisResponse) -> String {
    let result = match response {
        AnalysisResponse::Complete(result) => result,
        AnalysisResponse::Failed(failure) => {
            return format!("=== Analysis Failed ===\n\n  {}\n", failure.message);
        }
    };

    let mut out = String::new();
    out.push_str(&format!("=== {} ===\n\n", result.url));

    let scores = &result.rendering_scores;
    out.push_str(&format!(
        "Rendering: {} (static {}, ssr {}, csr {})\n",
        result.rendering_type,
        percent(scores.r#static),
        percent(scores.ssr),
        percent(scores.csr)
    ));
    out.push_str(&format!(
        "JavaScript dependency: {} ({:.2})\n",
        result.dependency_level, result.dependency_score
    ));
    out.push_str(&format!(
        "Frameworks: {}\n",
        format_frameworks(&result.frameworks)
    ));
    out.push_str(&format!(
        "Scripts: {}  Dynamic elements: {}  Elements: {}\n",
        result.scripts, result.dynamic_content, result.total_elements
    ));

    let load_time = result.performance.timing.load_time;
    out.push_str(&format!(
        "Load time: {} ({})\n",
        format_time(load_time),
        Rating::for_timing(load_time)
    ));
    if result.raw_html_source.is_fallback() {
        out.push_str("Note: raw HTML could not be refetched; the content ratio is not informative\n");
    }

    if !result.seo_issues.is_empty() {
        out.push_str(&format!("\nSEO Issues ({}):\n", result.seo_issues.len()));
        for issue in &result.seo_issues {
            let (finding, recommendation) = split_issue(issue);
            out.push_str(&format!("  * {}\n", finding));
            if let Some(recommendation) = recommendation {
                out.push_str(&format!("      {}\n", recommendation));
            }
        }
    }

    out
}

/// Prints the terminal summary to stdout
pub fn print_summary(response: &AnalysisResponse) {
    print!("{}", format_summary(response));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisResult, FailureRecord};

    #[test]
    fn test_format_summary() {
        let summary = format_summary(&AnalysisResponse::Complete(AnalysisResult::sample()));

        assert!(summary.starts_with("=== https://example.com/app ===\n"));
        assert!(summary.contains("Rendering: CSR (static 10%, ssr 10%, csr 80%)"));
        assert!(summary.contains("JavaScript dependency: High (0.92)"));
        assert!(summary.contains("Frameworks: React, Vue"));
        assert!(summary.contains("Load time: 3.45s (poor)"));
        assert!(summary.contains("SEO Issues (2):"));
        assert!(summary.contains("  * Missing canonical tag\n"));
        assert!(!summary.contains("Note: raw HTML"));
    }

    #[test]
    fn test_format_summary_failure() {
        let summary = format_summary(&AnalysisResponse::Failed(FailureRecord::new("bad url")));
        assert!(summary.contains("Analysis Failed"));
        assert!(summary.contains("bad url"));
    }
}
