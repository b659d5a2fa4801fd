//! Raw-HTML fetcher
//!
//! Obtains a best-effort approximation of the page's pre-JavaScript HTML by
//! refetching the URL with a crawler identity. Every failure falls back to the
//! current DOM serialization, so a caller always receives some HTML.

use crate::config::FetcherConfig;
use crate::fetcher::client::REQUESTED_WITH;
use reqwest::header::{ACCEPT, CACHE_CONTROL, PRAGMA, USER_AGENT};
use reqwest::Client;
use serde::Serialize;
use std::fmt;
use url::Url;

/// Where the raw HTML came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum RawHtmlSource {
    /// A fresh network response with an HTML body
    Network,

    /// The current DOM serialization, used because the refetch was not possible
    DomFallback { reason: FallbackReason },
}

impl RawHtmlSource {
    /// Returns true if the raw HTML is really the executed DOM
    ///
    /// In that case raw and final text are identical and a content ratio of
    /// 1.0 says nothing about how the page renders.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::DomFallback { .. })
    }
}

/// Why the fetcher fell back to the current DOM
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackReason {
    /// The URL is not http(s) or does not parse
    UnsupportedScheme,
    /// Connection, TLS, timeout or body-read failure
    Network,
    /// The origin answered with a non-2xx status
    Status(u16),
    /// The body does not look like an HTML document
    NotHtml,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedScheme => write!(f, "unsupported scheme"),
            Self::Network => write!(f, "network error"),
            Self::Status(code) => write!(f, "HTTP status {}", code),
            Self::NotHtml => write!(f, "response is not HTML"),
        }
    }
}

/// The pre-execution HTML handed to the classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHtml {
    pub html: String,
    pub source: RawHtmlSource,
}

impl RawHtml {
    fn fallback(current_dom: &str, reason: FallbackReason) -> Self {
        tracing::debug!("Using current DOM as raw HTML ({})", reason);
        Self {
            html: current_dom.to_string(),
            source: RawHtmlSource::DomFallback { reason },
        }
    }
}

/// Fetches the raw server HTML for comparison with the final DOM
///
/// # Request Flow
///
/// 1. Non-http(s) or unparseable URL → current DOM, no network I/O
/// 2. GET with `Accept: text/html`, the crawler user agent, the analyzer
///    marker header and cache reuse disabled
/// 3. Non-2xx status → current DOM
/// 4. Body without `<!DOCTYPE html>` or `<html` → current DOM
/// 5. Network or body-read error → current DOM
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `config` - Fetcher settings (crawler identity)
/// * `url` - The page URL
/// * `current_dom` - Serialization of the live DOM, used as the fallback
///
/// # Returns
///
/// The raw HTML together with its provenance. This function never fails.
pub async fn fetch_raw_html(
    client: &Client,
    config: &FetcherConfig,
    url: &str,
    current_dom: &str,
) -> RawHtml {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return RawHtml::fallback(current_dom, FallbackReason::UnsupportedScheme),
    };

    if !matches!(parsed.scheme(), "http" | "https") {
        return RawHtml::fallback(current_dom, FallbackReason::UnsupportedScheme);
    }

    let response = client
        .get(parsed)
        .header(ACCEPT, "text/html")
        .header(USER_AGENT, config.crawler_user_agent.as_str())
        .header("X-Requested-With", REQUESTED_WITH)
        .header(CACHE_CONTROL, "no-cache")
        .header(PRAGMA, "no-cache")
        .send()
        .await;

    let response = match response {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Raw HTML fetch failed for {}, using current HTML: {}", url, e);
            return RawHtml::fallback(current_dom, FallbackReason::Network);
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("Raw HTML fetch for {} returned {}", url, status);
        return RawHtml::fallback(current_dom, FallbackReason::Status(status.as_u16()));
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Failed to read raw HTML body for {}: {}", url, e);
            return RawHtml::fallback(current_dom, FallbackReason::Network);
        }
    };

    if !looks_like_html(&body) {
        tracing::warn!("Raw HTML fetch for {} did not return an HTML document", url);
        return RawHtml::fallback(current_dom, FallbackReason::NotHtml);
    }

    tracing::debug!("Fetched {} bytes of raw HTML from {}", body.len(), url);
    RawHtml {
        html: body,
        source: RawHtmlSource::Network,
    }
}

/// Sanity check that a response body is an HTML document rather than an error page or data
fn looks_like_html(body: &str) -> bool {
    body.contains("<html") || body.to_ascii_lowercase().contains("<!doctype html>")
}
