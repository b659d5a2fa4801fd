//! End-to-end analysis against a mock origin serving the raw HTML

use render_lens::analysis::PreviewContent;
use render_lens::config::Config;
use render_lens::fetcher::{FallbackReason, RawHtmlSource};
use render_lens::output::render_json;
use render_lens::snapshot::load_snapshot;
use render_lens::{
    AnalysisResponse, AnalysisResult, Analyzer, DependencyLevel, LensError, PageSnapshot,
    RenderingScores, RenderingType,
};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARTICLE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <title>Field notes on static publishing</title>
    <meta name="description" content="A long-form article delivered entirely as server HTML, with no client-side rendering at all.">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <link rel="canonical" href="https://example.com/article">
</head>
<body>
    <h1>Field notes</h1>
    <p>Every word of this article arrives in the first response from the server.</p>
    <a href="/archive">Archive</a>
</body>
</html>"#;

async fn serve(mock_server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(mock_server)
        .await;
}

fn analyzer() -> Analyzer {
    Analyzer::new(Config::default()).expect("default config is valid")
}

async fn complete(snapshot: &PageSnapshot) -> AnalysisResult {
    match analyzer().analyze(snapshot).await {
        AnalysisResponse::Complete(result) => result,
        AnalysisResponse::Failed(failure) => panic!("analysis failed: {}", failure.message),
    }
}

#[tokio::test]
async fn test_static_article() {
    let mock_server = MockServer::start().await;
    serve(&mock_server, "/article", 200, ARTICLE).await;

    let snapshot = PageSnapshot::new(format!("{}/article", mock_server.uri()), ARTICLE);
    let result = complete(&snapshot).await;

    assert_eq!(result.raw_html_source, RawHtmlSource::Network);
    assert_eq!(result.content_ratio, Some(1.0));
    assert_eq!(result.rendering_scores, RenderingScores::new(0.8, 0.1, 0.1));
    assert_eq!(result.rendering_type, RenderingType::Static);
    assert_eq!(result.dependency_level, DependencyLevel::Low);
    assert!(result.frameworks.is_empty());
    assert_eq!(result.scripts, 0);
    assert_eq!(result.links.total, 1);
    assert_eq!(result.links.html_links, 1);
    assert!(result.seo_issues.is_empty(), "{:?}", result.seo_issues);
}

#[tokio::test]
async fn test_next_js_page_overrides_react() {
    let mock_server = MockServer::start().await;
    serve(
        &mock_server,
        "/",
        200,
        r#"<!DOCTYPE html><html><body><div id="__next"><p>Loading</p></div></body></html>"#,
    )
    .await;

    let final_html = r#"<!DOCTYPE html><html lang="en"><head>
        <title>Storefront with server rendering</title>
        <script id="__NEXT_DATA__" type="application/json">{"props":{}}</script>
        <script src="/_next/static/chunks/react-dom.js"></script>
        </head><body><div id="__next">
        <h1>Storefront</h1>
        <p>Hundreds of products were rendered into this page after hydration finished.</p>
        </div></body></html>"#;
    let snapshot = PageSnapshot::new(format!("{}/", mock_server.uri()), final_html)
        .with_globals(["__NEXT_DATA__"]);

    let result = complete(&snapshot).await;

    assert!(result.frameworks.contains(&"React".to_string()));
    assert!(result.frameworks.contains(&"Next.js".to_string()));
    let react = result.frameworks.iter().position(|f| f == "React");
    let next = result.frameworks.iter().position(|f| f == "Next.js");
    assert!(react < next, "catalog order: {:?}", result.frameworks);

    // Framework evidence wins over the tiny content ratio
    assert!(result.content_ratio.unwrap() < 0.2);
    assert_eq!(result.rendering_scores, RenderingScores::new(0.1, 0.8, 0.1));
    assert_eq!(result.rendering_type, RenderingType::Ssr);

    // 0.4 * 0.8 + 0.3 * 0 + 0.3 * (0.4 + 0.2)
    assert!((result.dependency_score - 0.5).abs() < 1e-9);
    assert_eq!(result.dependency_level, DependencyLevel::Medium);
}

#[tokio::test]
async fn test_client_rendered_shell() {
    let mock_server = MockServer::start().await;
    serve(
        &mock_server,
        "/",
        200,
        r#"<!DOCTYPE html><html><head><script src="/static/js/main.chunk.js"></script></head>
        <body><div id="root"></div></body></html>"#,
    )
    .await;

    let final_html = r#"<!DOCTYPE html><html><head><script src="/static/js/main.chunk.js"></script></head>
        <body><div id="root"><h1>Dashboard</h1><p>Everything here was drawn by script.</p></div></body></html>"#;
    let snapshot = PageSnapshot::new(mock_server.uri(), final_html);

    let result = complete(&snapshot).await;

    assert_eq!(result.content_ratio, None);
    assert_eq!(result.rendering_scores, RenderingScores::new(0.1, 0.1, 0.8));
    assert_eq!(result.rendering_type, RenderingType::Csr);
    assert_eq!(result.frameworks, vec!["React".to_string()]);
    assert_eq!(
        result.seo_issues[0],
        "High client-side rendering may impact SEO - Consider implementing SSR or pre-rendering for better search engine visibility"
    );
    assert!(result.seo_issues.contains(
        &"Using React - Consider using the SSR version (Next.js, Nuxt.js, etc.) for better SEO"
            .to_string()
    ));
}

#[tokio::test]
async fn test_raw_fetch_failure_is_visible_in_result() {
    let mock_server = MockServer::start().await;
    serve(&mock_server, "/article", 503, "<html>maintenance</html>").await;

    let snapshot = PageSnapshot::new(format!("{}/article", mock_server.uri()), ARTICLE);
    let result = complete(&snapshot).await;

    assert_eq!(
        result.raw_html_source,
        RawHtmlSource::DomFallback {
            reason: FallbackReason::Status(503)
        }
    );
    assert_eq!(result.content_ratio, Some(1.0));
}

#[tokio::test]
async fn test_blank_page_reports_every_seo_gap() {
    let mock_server = MockServer::start().await;
    let blank = "<!DOCTYPE html><html><head></head><body></body></html>";
    serve(&mock_server, "/", 200, blank).await;

    let result = complete(&PageSnapshot::new(mock_server.uri(), blank)).await;

    assert_eq!(result.rendering_scores, RenderingScores::EMPTY_TEXT);
    let findings: Vec<&str> = result
        .seo_issues
        .iter()
        .map(|issue| issue.split(" - ").next().unwrap_or(""))
        .collect();
    for expected in [
        "High client-side rendering may impact SEO",
        "Missing meta description",
        "Missing title tag",
        "Missing H1 heading",
        "Missing viewport meta tag",
        "Missing canonical tag",
        "Missing language attribute",
    ] {
        assert!(findings.contains(&expected), "missing '{}' in {:?}", expected, findings);
    }

    // Same finding with different recommendations is kept once per recommendation
    let unique: std::collections::HashSet<&String> = result.seo_issues.iter().collect();
    assert_eq!(unique.len(), result.seo_issues.len());
}

#[tokio::test]
async fn test_analysis_timeout_is_distinct_outcome() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(ARTICLE)
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let snapshot = PageSnapshot::new(mock_server.uri(), ARTICLE);
    let outcome = analyzer()
        .analyze_within(&snapshot, Duration::from_millis(100))
        .await;

    assert!(matches!(outcome, Err(LensError::Timeout { .. })));
}

#[tokio::test]
async fn test_recorded_snapshot_file() {
    let mock_server = MockServer::start().await;
    serve(&mock_server, "/", 200, ARTICLE).await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("snapshot.json");
    let snapshot = serde_json::json!({
        "url": mock_server.uri(),
        "html": ARTICLE,
        "globals": ["__INITIAL_STATE__"],
        "performance": {
            "navigation": {"startTime": 0, "domInteractive": 400, "domContentLoadedEventEnd": 800, "loadEventEnd": 3600},
            "paint": [{"name": "first-paint", "startTime": 150}, {"name": "first-contentful-paint", "startTime": 180}],
            "resources": [{"name": "https://cdn.example.com/js/app.js"}, {"name": "https://cdn.example.com/site.css"}]
        },
        "settledElementCount": 500
    });
    std::fs::write(&file, snapshot.to_string()).unwrap();

    let snapshot = load_snapshot(&file).unwrap();
    let result = complete(&snapshot).await;

    assert_eq!(result.performance.timing.load_time, 3600.0);
    assert_eq!(result.performance.timing.first_contentful_paint, 180.0);
    assert_eq!(result.performance.resources.js, 1);
    assert_eq!(result.performance.resources.css, 1);
    // The page grew during the settle wait
    assert_eq!(result.dynamic_content, 1);
    // State management moves an otherwise static page to the mixed branch
    assert_eq!(result.rendering_scores, RenderingScores::new(0.3, 0.3, 0.4));
    assert!(result
        .seo_issues
        .iter()
        .any(|issue| issue.starts_with("Slow page load time may impact SEO")));
}

#[tokio::test]
async fn test_preview_judges_the_classified_html() {
    let mock_server = MockServer::start().await;
    let shell = "<!DOCTYPE html><html><body><div id=\"root\"></div></body></html>";
    // Any second request would fall back to the rendered DOM and its text
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(shell)
                .insert_header("content-type", "text/html"),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let snapshot = PageSnapshot::new(
        mock_server.uri(),
        "<html><body><div id=\"root\"><p>Client content</p></div></body></html>",
    );
    let (response, verdict) = analyzer()
        .preview_within(&snapshot, Duration::from_secs(5))
        .await
        .unwrap();

    let result = response.result().unwrap();
    assert_eq!(result.raw_html_source, RawHtmlSource::Network);
    assert_eq!(result.rendering_scores, RenderingScores::EMPTY_TEXT);
    assert_eq!(verdict.content, PreviewContent::JavaScriptRequired);
    assert_eq!(verdict.raw_text_chars, 0);
    assert_eq!(verdict.bar.csr, 80);
}

#[tokio::test]
async fn test_preview_of_deeply_nested_page() {
    let mock_server = MockServer::start().await;
    let depth = 60_000;
    let nested = format!(
        "<html><body>{}<p>Buried text</p>{}</body></html>",
        "<div>".repeat(depth),
        "</div>".repeat(depth)
    );
    serve(&mock_server, "/", 200, &nested).await;

    let (response, verdict) = analyzer()
        .preview(&PageSnapshot::new(mock_server.uri(), nested.clone()))
        .await;

    assert!(!response.is_error());
    assert_eq!(verdict.raw_text_chars, "Buried text".len());
}

#[tokio::test]
async fn test_json_report_of_failed_analysis() {
    let response = analyzer()
        .analyze(&PageSnapshot::new("definitely not a url", "<html></html>"))
        .await;

    let value: serde_json::Value = serde_json::from_str(&render_json(&response).unwrap()).unwrap();
    assert_eq!(value["error"], true);
    assert_eq!(value["renderingType"], "Unknown");
    assert_eq!(value["dependencyLevel"], "Unknown");
    assert_eq!(value["renderingScores"]["csr"], 0.34);
}
