//! Analysis aggregator
//!
//! Runs the pipeline for one page:
//! - Refetch the raw HTML (the only network step)
//! - Run every collector against the snapshot
//! - Classify rendering and score JavaScript dependency
//! - Evaluate the SEO rules
//!
//! Every run works on fresh state. The returned response carries the
//! rendering scores, so nothing is cached between runs.

use crate::analysis::preview::{preview_verdict, PreviewVerdict};
use crate::analysis::result::{AnalysisResponse, AnalysisResult, FailureRecord};
use crate::classify::{classify_rendering, score_dependency};
use crate::collect::{
    analyze_links, collect_performance, count_dynamic_content, count_elements, count_matches,
    detect_frameworks, or_default, PageProbe,
};
use crate::config::{validate, Config};
use crate::fetcher::{build_http_client, capture_snapshot, fetch_raw_html, RawHtml};
use crate::seo::{evaluate_seo, SeoContext};
use crate::snapshot::{script_sources, PageSnapshot};
use crate::{LensError, SnapshotError};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Classifies pages with a fixed configuration and HTTP client
pub struct Analyzer {
    config: Config,
    client: Client,
}

impl Analyzer {
    /// Creates a new analyzer
    ///
    /// # Arguments
    ///
    /// * `config` - Fetcher, analysis and output settings
    ///
    /// # Returns
    ///
    /// * `Ok(Analyzer)` - Ready to analyze
    /// * `Err(LensError)` - The configuration is invalid or the HTTP client
    ///   could not be built
    pub fn new(config: Config) -> Result<Self, LensError> {
        validate(&config)?;
        let client = build_http_client(&config.fetcher)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The overall time budget from the configuration
    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_millis(self.config.analysis.timeout_ms)
    }

    /// Captures a live page as a snapshot, without executing scripts
    pub async fn capture(&self, url: &str) -> Result<PageSnapshot, LensError> {
        capture_snapshot(&self.client, &self.config.fetcher, url).await
    }

    /// Refetches the pre-JavaScript HTML for a snapshot
    pub async fn fetch_raw(&self, snapshot: &PageSnapshot) -> RawHtml {
        fetch_raw_html(&self.client, &self.config.fetcher, &snapshot.url, &snapshot.html).await
    }

    /// Analyzes a page
    ///
    /// Never fails: a fatal error anywhere in the pipeline becomes a
    /// `Failed` response with uncertain scores.
    pub async fn analyze(&self, snapshot: &PageSnapshot) -> AnalysisResponse {
        match self.run(snapshot).await {
            Ok((result, _)) => AnalysisResponse::Complete(result),
            Err(e) => self.failed(snapshot, e),
        }
    }

    /// Analyzes a page and judges its no-JavaScript preview
    ///
    /// The verdict reads the same raw HTML the classifier compared, so a
    /// single fetch backs both. When the analysis fails before any fetch,
    /// the current DOM stands in for the raw HTML and the scores are the
    /// uncertain split.
    pub async fn preview(&self, snapshot: &PageSnapshot) -> (AnalysisResponse, PreviewVerdict) {
        match self.run(snapshot).await {
            Ok((result, raw)) => {
                let verdict = preview_verdict(&raw.html, &result.rendering_scores);
                (AnalysisResponse::Complete(result), verdict)
            }
            Err(e) => {
                let response = self.failed(snapshot, e);
                let verdict = preview_verdict(&snapshot.html, &response.rendering_scores());
                (response, verdict)
            }
        }
    }

    /// Analyzes a page under a time budget
    ///
    /// # Returns
    ///
    /// * `Ok(AnalysisResponse)` - The analysis finished in time
    /// * `Err(LensError::Timeout)` - The budget expired first
    pub async fn analyze_within(
        &self,
        snapshot: &PageSnapshot,
        limit: Duration,
    ) -> Result<AnalysisResponse, LensError> {
        tokio::time::timeout(limit, self.analyze(snapshot))
            .await
            .map_err(|_| {
                tracing::warn!("Analysis of {} exceeded {:?}", snapshot.url, limit);
                LensError::Timeout {
                    url: snapshot.url.clone(),
                }
            })
    }

    /// Like [`Analyzer::preview`], under a time budget
    pub async fn preview_within(
        &self,
        snapshot: &PageSnapshot,
        limit: Duration,
    ) -> Result<(AnalysisResponse, PreviewVerdict), LensError> {
        tokio::time::timeout(limit, self.preview(snapshot))
            .await
            .map_err(|_| {
                tracing::warn!("Preview of {} exceeded {:?}", snapshot.url, limit);
                LensError::Timeout {
                    url: snapshot.url.clone(),
                }
            })
    }

    fn failed(&self, snapshot: &PageSnapshot, error: LensError) -> AnalysisResponse {
        tracing::error!("Analysis of {} failed: {}", snapshot.url, error);
        AnalysisResponse::Failed(FailureRecord::new(error.to_string()))
    }

    async fn run(&self, snapshot: &PageSnapshot) -> Result<(AnalysisResult, RawHtml), LensError> {
        Url::parse(&snapshot.url).map_err(|e| SnapshotError::InvalidUrl {
            url: snapshot.url.clone(),
            message: e.to_string(),
        })?;

        tracing::info!("Analyzing {}", snapshot.url);

        // Fetch before parsing: the parsed document must not live across an await
        let raw = self.fetch_raw(snapshot).await;
        if raw.source.is_fallback() {
            tracing::info!(
                "Raw HTML for {} is the current DOM; content ratio will read as unchanged",
                snapshot.url
            );
        }

        let result = assemble(snapshot, &raw);
        Ok((result, raw))
    }
}

fn assemble(snapshot: &PageSnapshot, raw: &RawHtml) -> AnalysisResult {
    let document = snapshot.document();

    let total_elements = count_elements(&document);
    let scripts = or_default("scripts", count_matches(&document, "script"));
    let sources = script_sources(&document);

    let frameworks = detect_frameworks(&PageProbe {
        document: &document,
        markup: &snapshot.html,
        script_sources: &sources,
        globals: &snapshot.globals,
    });
    let performance = collect_performance(&snapshot.performance);
    let links = or_default("links", analyze_links(&document));
    let dynamic_content = or_default(
        "dynamicContent",
        count_dynamic_content(&document, total_elements, snapshot.settled_element_count),
    );

    let assessment = classify_rendering(&raw.html, &document, &snapshot.globals, &frameworks);
    let dependency = score_dependency(
        frameworks.runtime_weight,
        performance.resources.js,
        &assessment.flags,
    );

    let framework_names = frameworks.names();
    let seo_issues = evaluate_seo(&SeoContext {
        document: &document,
        scores: &assessment.scores,
        dependency_level: dependency.level,
        frameworks: &framework_names,
        load_time: performance.timing.load_time,
    });

    tracing::info!(
        "{}: {} rendering, {} JavaScript dependency ({:.2}), {} SEO issues",
        snapshot.url,
        assessment.primary_type,
        dependency.level,
        dependency.score,
        seo_issues.len()
    );

    AnalysisResult {
        url: snapshot.url.clone(),
        analyzed_at: chrono::Utc::now(),
        total_elements,
        scripts,
        dynamic_content,
        frameworks: framework_names,
        performance,
        links,
        rendering_scores: assessment.scores,
        rendering_type: assessment.primary_type,
        dependency_level: dependency.level,
        dependency_score: dependency.score,
        seo_issues,
        content_ratio: assessment.content_ratio,
        raw_html_source: raw.source.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{DependencyLevel, RenderingScores, RenderingType};
    use crate::analysis::ScoreBar;
    use crate::fetcher::{FallbackReason, RawHtmlSource};

    fn analyzer() -> Analyzer {
        Analyzer::new(Config::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = Config::default();
        config.fetcher.crawler_user_agent = String::new();
        assert!(matches!(Analyzer::new(config), Err(LensError::Config(_))));
    }

    #[test]
    fn test_analysis_timeout_from_config() {
        assert_eq!(analyzer().analysis_timeout(), Duration::from_millis(8000));
    }

    #[tokio::test]
    async fn test_invalid_url_is_failure_record() {
        let snapshot = PageSnapshot::new("not a url", "<html><body>x</body></html>");
        let response = analyzer().analyze(&snapshot).await;

        let AnalysisResponse::Failed(failure) = response else {
            panic!("expected a failure record");
        };
        assert!(failure.error);
        assert!(failure.message.contains("not a url"));
        assert_eq!(failure.rendering_scores, RenderingScores::UNCERTAIN);
    }

    #[tokio::test]
    async fn test_failed_preview_reads_current_dom() {
        let snapshot = PageSnapshot::new(
            "not a url",
            "<html><body><div id=\"app\"><p>Rendered by script</p></div></body></html>",
        );
        let (response, verdict) = analyzer().preview(&snapshot).await;

        assert!(response.is_error());
        assert_eq!(verdict.raw_text_chars, "Rendered by script".len());
        assert_eq!(verdict.bar, ScoreBar { r#static: 33, ssr: 33, csr: 34 });
    }

    #[tokio::test]
    async fn test_non_http_page_uses_dom_fallback() {
        let html = r#"<html lang="en"><head><title>Local document title</title></head>
            <body><h1>Local</h1><p>Plain text served from disk.</p></body></html>"#;
        let snapshot = PageSnapshot::new("file:///tmp/page.html", html);
        let response = analyzer().analyze(&snapshot).await;

        let result = response.result().unwrap();
        assert_eq!(
            result.raw_html_source,
            RawHtmlSource::DomFallback {
                reason: FallbackReason::UnsupportedScheme
            }
        );
        assert_eq!(result.content_ratio, Some(1.0));
        assert_eq!(result.rendering_type, RenderingType::Static);
        assert_eq!(result.dependency_level, DependencyLevel::Low);
    }

    #[test]
    fn test_assemble_counts_and_frameworks() {
        let html = r#"<html><head>
            <script id="__NEXT_DATA__" type="application/json">{}</script>
            <script src="/_next/static/chunks/main.js"></script>
            </head><body><div id="__next"><p>Server rendered article text</p><img loading="lazy" src="a.png" alt="a"></div></body></html>"#;
        let snapshot = PageSnapshot::new("https://example.com/", html)
            .with_globals(["__NEXT_DATA__"]);
        let raw = RawHtml {
            html: html.to_string(),
            source: RawHtmlSource::Network,
        };

        let result = assemble(&snapshot, &raw);

        assert_eq!(result.scripts, 2);
        assert_eq!(result.dynamic_content, 1);
        assert!(result.frameworks.contains(&"Next.js".to_string()));
        assert_eq!(result.rendering_scores, RenderingScores::new(0.1, 0.8, 0.1));
        assert_eq!(result.rendering_type, RenderingType::Ssr);
    }
}
