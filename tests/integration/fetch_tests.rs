//! Raw-HTML refetch and live capture against a mock origin

use render_lens::config::{FetcherConfig, DEFAULT_CRAWLER_USER_AGENT};
use render_lens::fetcher::{
    build_http_client, capture_snapshot, fetch_raw_html, FallbackReason, RawHtmlSource,
};
use render_lens::LensError;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CURRENT_DOM: &str = "<html><body><p>Rendered in the browser</p></body></html>";

fn html_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

#[tokio::test]
async fn test_raw_fetch_sends_crawler_identity() {
    let mock_server = MockServer::start().await;
    let served = "<!DOCTYPE html><html><body><p>Server copy</p></body></html>";

    Mock::given(method("GET"))
        .and(path("/page"))
        .and(header("user-agent", DEFAULT_CRAWLER_USER_AGENT))
        .and(header("accept", "text/html"))
        .and(header("x-requested-with", "RenderLens"))
        .and(header("cache-control", "no-cache"))
        .and(header("pragma", "no-cache"))
        .respond_with(html_response(served))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = FetcherConfig::default();
    let client = build_http_client(&config).unwrap();
    let url = format!("{}/page", mock_server.uri());

    let raw = fetch_raw_html(&client, &config, &url, CURRENT_DOM).await;

    assert_eq!(raw.source, RawHtmlSource::Network);
    assert_eq!(raw.html, served);
}

#[tokio::test]
async fn test_raw_fetch_server_error_falls_back() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let config = FetcherConfig::default();
    let client = build_http_client(&config).unwrap();

    let raw = fetch_raw_html(&client, &config, &mock_server.uri(), CURRENT_DOM).await;

    assert_eq!(raw.html, CURRENT_DOM);
    assert_eq!(
        raw.source,
        RawHtmlSource::DomFallback {
            reason: FallbackReason::Status(500)
        }
    );
}

#[tokio::test]
async fn test_raw_fetch_non_html_falls_back() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"challenge": true}"#)
                .insert_header("content-type", "application/json"),
        )
        .mount(&mock_server)
        .await;

    let config = FetcherConfig::default();
    let client = build_http_client(&config).unwrap();

    let raw = fetch_raw_html(&client, &config, &mock_server.uri(), CURRENT_DOM).await;

    assert_eq!(raw.html, CURRENT_DOM);
    assert_eq!(
        raw.source,
        RawHtmlSource::DomFallback {
            reason: FallbackReason::NotHtml
        }
    );
}

#[tokio::test]
async fn test_raw_fetch_unreachable_origin_falls_back() {
    // Start and drop a server so the port refuses connections
    let uri = {
        let mock_server = MockServer::start().await;
        mock_server.uri()
    };

    let config = FetcherConfig::default();
    let client = build_http_client(&config).unwrap();

    let raw = fetch_raw_html(&client, &config, &uri, CURRENT_DOM).await;

    assert_eq!(raw.html, CURRENT_DOM);
    assert_eq!(
        raw.source,
        RawHtmlSource::DomFallback {
            reason: FallbackReason::Network
        }
    );
}

#[tokio::test]
async fn test_capture_records_page_and_resources() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/app"))
        .and(header("x-requested-with", "RenderLens"))
        .respond_with(html_response(
            r#"<html><head>
                <link rel="stylesheet" href="/css/site.css">
                <script src="/js/app.js"></script>
            </head><body><img src="logo.png" alt="logo"><p>Hello</p></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    let config = FetcherConfig::default();
    let client = build_http_client(&config).unwrap();
    let url = format!("{}/app", mock_server.uri());

    let snapshot = capture_snapshot(&client, &config, &url).await.unwrap();

    assert_eq!(snapshot.url, url);
    assert!(snapshot.html.contains("<p>Hello</p>"));
    assert!(snapshot.globals.is_empty());
    assert_eq!(snapshot.settled_element_count, None);

    let names: Vec<&str> = snapshot
        .performance
        .resources
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names.len(), 3);
    assert!(names.contains(&format!("{}/js/app.js", mock_server.uri()).as_str()));
    assert!(names.contains(&format!("{}/css/site.css", mock_server.uri()).as_str()));
    assert!(names.contains(&format!("{}/logo.png", mock_server.uri()).as_str()));

    let navigation = snapshot.performance.navigation.unwrap();
    assert!(navigation.load_event_end >= navigation.dom_interactive);
    assert!(navigation.transfer_size.unwrap() > 0);
}

#[tokio::test]
async fn test_capture_reports_http_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let config = FetcherConfig::default();
    let client = build_http_client(&config).unwrap();

    let result = capture_snapshot(&client, &config, &mock_server.uri()).await;

    assert!(matches!(result, Err(LensError::Status { status: 404, .. })));
}
