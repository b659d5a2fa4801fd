//! Analysis result types
//!
//! These are the records handed to callers and serialized into reports. Field
//! names are camelCase on the wire.

use crate::classify::{DependencyLevel, RenderingScores, RenderingType};
use crate::collect::{LinkAnalysis, PerformanceMetrics};
use crate::fetcher::RawHtmlSource;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A completed classification of one page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub url: String,
    pub analyzed_at: DateTime<Utc>,

    /// Every element in the final document
    pub total_elements: usize,

    /// Script elements in the final document
    pub scripts: usize,

    /// Lazy-load, infinite-scroll and AJAX-form indicators
    pub dynamic_content: usize,

    /// Detected frameworks in catalog order
    pub frameworks: Vec<String>,

    pub performance: PerformanceMetrics,
    pub links: LinkAnalysis,
    pub rendering_scores: RenderingScores,
    pub rendering_type: RenderingType,
    pub dependency_level: DependencyLevel,
    pub dependency_score: f64,

    /// `<finding> - <recommendation>` strings, first occurrence order
    pub seo_issues: Vec<String>,

    /// Raw over final visible text length, absent when either was empty
    pub content_ratio: Option<f64>,

    pub raw_html_source: RawHtmlSource,
}

/// Outcome of an analysis that failed as a whole
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureRecord {
    /// Always true; lets consumers branch on the JSON shape
    pub error: bool,
    pub message: String,
    pub rendering_type: RenderingType,
    pub dependency_level: DependencyLevel,
    pub rendering_scores: RenderingScores,
}

impl FailureRecord {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            rendering_type: RenderingType::Unknown,
            dependency_level: DependencyLevel::Unknown,
            rendering_scores: RenderingScores::UNCERTAIN,
        }
    }
}

/// What an analysis request returns
///
/// A failed run is a distinct shape; none of its fields are meaningful
/// measurements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Complete(AnalysisResult),
    Failed(FailureRecord),
}

impl AnalysisResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Complete(result) => Some(result),
            Self::Failed(_) => None,
        }
    }

    pub fn rendering_scores(&self) -> RenderingScores {
        match self {
            Self::Complete(result) => result.rendering_scores,
            Self::Failed(failure) => failure.rendering_scores,
        }
    }

    pub fn rendering_type(&self) -> RenderingType {
        match self {
            Self::Complete(result) => result.rendering_type,
            Self::Failed(failure) => failure.rendering_type,
        }
    }

    pub fn dependency_level(&self) -> DependencyLevel {
        match self {
            Self::Complete(result) => result.dependency_level,
            Self::Failed(failure) => failure.dependency_level,
        }
    }
}

#[cfg(test)]
impl AnalysisResult {
    /// A plausible client-rendered result for report tests
    pub(crate) fn sample() -> Self {
        use crate::collect::{LinkDetail, ResourceCounts, Timing, WebVitals};
        use chrono::TimeZone;

        Self {
            url: "https://example.com/app".to_string(),
            analyzed_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            total_elements: 120,
            scripts: 9,
            dynamic_content: 3,
            frameworks: vec!["Vue".to_string(), "React".to_string()],
            performance: PerformanceMetrics {
                timing: Timing {
                    load_time: 3450.0,
                    dom_content_loaded: 1200.0,
                    first_paint: 640.4,
                    first_contentful_paint: 1500.0,
                    largest_contentful_paint: 2100.0,
                    time_to_interactive: 900.0,
                },
                resources: ResourceCounts {
                    total: 20,
                    js: 12,
                    css: 2,
                    images: 4,
                    ..ResourceCounts::default()
                },
                script_execution_time: 0.0,
                web_vitals: WebVitals::default(),
            },
            links: LinkAnalysis {
                total: 2,
                js_links: 0,
                html_links: 1,
                broken_links: 1,
                link_details: vec![
                    LinkDetail {
                        text: "Home".to_string(),
                        href: "/".to_string(),
                        is_broken: false,
                    },
                    LinkDetail {
                        text: "Top".to_string(),
                        href: "#".to_string(),
                        is_broken: true,
                    },
                ],
            },
            rendering_scores: RenderingScores::new(0.1, 0.1, 0.8),
            rendering_type: RenderingType::Csr,
            dependency_level: DependencyLevel::High,
            dependency_score: 0.92,
            seo_issues: vec![
                "High client-side rendering may impact SEO - Consider implementing SSR or pre-rendering for better search engine visibility".to_string(),
                "Missing canonical tag - Add a canonical link to prevent duplicate content issues".to_string(),
            ],
            content_ratio: Some(0.05),
            raw_html_source: RawHtmlSource::Network,
        }
    }
}
