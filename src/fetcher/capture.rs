//! Live page capture
//!
//! Builds a `PageSnapshot` straight from the network when no recorded browser
//! snapshot is available. Scripts are not executed, so the captured DOM is the
//! delivered markup and the runtime global table stays empty.

use crate::config::FetcherConfig;
use crate::fetcher::client::REQUESTED_WITH;
use crate::snapshot::{NavigationEntry, PageSnapshot, PerformanceEntries, ResourceEntry};
use crate::LensError;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Instant;
use url::Url;

/// Fetches a page with a browser identity and records it as a snapshot
///
/// Request timing is recorded as the navigation entry: time to response
/// headers stands in for DOM interactive, total time for DOMContentLoaded and
/// load. Resource entries are inferred from `script[src]`, stylesheet links
/// and `img[src]`, resolved against the page URL.
///
/// # Returns
///
/// * `Ok(PageSnapshot)` - The captured page
/// * `Err(LensError)` - The URL is invalid, unreachable, or answered non-2xx
pub async fn capture_snapshot(
    client: &Client,
    config: &FetcherConfig,
    url: &str,
) -> Result<PageSnapshot, LensError> {
    let base_url = Url::parse(url).map_err(|e| crate::SnapshotError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    tracing::info!("Capturing {}", url);
    let started = Instant::now();

    let response = client
        .get(base_url.clone())
        .header(ACCEPT, "text/html")
        .header(USER_AGENT, config.browser_user_agent.as_str())
        .header("X-Requested-With", REQUESTED_WITH)
        .send()
        .await
        .map_err(|source| LensError::Http {
            url: url.to_string(),
            source,
        })?;
    let headers_ms = elapsed_ms(started);

    let status = response.status();
    if !status.is_success() {
        return Err(LensError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let final_url = response.url().to_string();
    let html = response.text().await.map_err(|source| LensError::Http {
        url: url.to_string(),
        source,
    })?;
    let total_ms = elapsed_ms(started);

    let body_size = html.len() as u64;
    let resources = infer_resources(&Html::parse_document(&html), &base_url);
    tracing::debug!(
        "Captured {} bytes and {} resources in {:.0}ms",
        body_size,
        resources.len(),
        total_ms
    );

    Ok(PageSnapshot {
        url: final_url,
        html,
        performance: PerformanceEntries {
            navigation: Some(NavigationEntry {
                start_time: 0.0,
                dom_interactive: headers_ms,
                dom_content_loaded_event_end: total_ms,
                load_event_end: total_ms,
                transfer_size: Some(body_size),
                decoded_body_size: Some(body_size),
            }),
            resources,
            ..PerformanceEntries::default()
        },
        ..PageSnapshot::default()
    })
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

/// Lists the sub-resources the markup references
fn infer_resources(document: &Html, base_url: &Url) -> Vec<ResourceEntry> {
    let mut resources = Vec::new();

    for (selector, attr) in [
        ("script[src]", "src"),
        ("link[rel~='stylesheet'][href]", "href"),
        ("img[src]", "src"),
    ] {
        let Ok(selector) = Selector::parse(selector) else {
            continue;
        };

        for element in document.select(&selector) {
            if let Some(target) = element.value().attr(attr) {
                if let Ok(absolute) = base_url.join(target.trim()) {
                    resources.push(ResourceEntry::new(absolute.to_string()));
                }
            }
        }
    }

    resources
}
