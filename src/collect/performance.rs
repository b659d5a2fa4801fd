//! Performance metrics
//!
//! Reads the recorded navigation, paint and resource timelines. Absent records
//! degrade to zero-valued fields.

use crate::collect::or_default;
use crate::snapshot::{NavigationEntry, PerformanceEntries};
use crate::{ProbeError, ProbeResult};
use serde::Serialize;

/// Prefix of user-timing measures that record script cost
const SCRIPT_EXECUTION_PREFIX: &str = "script-execution-";

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg", "ico", "avif"];

/// Page timing milestones in milliseconds
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    pub load_time: f64,
    pub dom_content_loaded: f64,
    pub first_paint: f64,
    pub first_contentful_paint: f64,
    pub largest_contentful_paint: f64,
    pub time_to_interactive: f64,
}

/// Network resources by inferred type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCounts {
    pub total: usize,
    pub js: usize,
    pub css: usize,
    pub images: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_transfer_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_decoded_size: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebVitals {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lcp: Option<f64>,
    pub cls_supported: bool,
}

/// Everything the performance collector reports
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub timing: Timing,
    pub resources: ResourceCounts,
    pub script_execution_time: f64,
    pub web_vitals: WebVitals,
}

/// Collects performance metrics from a recorded timeline
///
/// Never fails: a missing navigation record leaves the navigation-derived
/// timings at zero while paint, resource and measure data are still read.
pub fn collect_performance(entries: &PerformanceEntries) -> PerformanceMetrics {
    let mut timing = or_default("navigation timing", navigation_timing(entries.navigation.as_ref()));

    for paint in &entries.paint {
        match paint.name.as_str() {
            "first-paint" => timing.first_paint = paint.start_time,
            "first-contentful-paint" => timing.first_contentful_paint = paint.start_time,
            _ => {}
        }
    }

    let lcp = entries.largest_contentful_paint.first().map(|e| e.start_time);
    if let Some(lcp) = lcp {
        timing.largest_contentful_paint = lcp;
    }

    let mut resources = count_resources(entries.resources.iter().map(|r| r.name.as_str()));
    if let Some(navigation) = &entries.navigation {
        resources.total_transfer_size = navigation.transfer_size.filter(|size| *size > 0);
        resources.total_decoded_size = resources
            .total_transfer_size
            .and(navigation.decoded_body_size);
    }

    let script_execution_time = entries
        .measures
        .iter()
        .filter(|m| m.name.starts_with(SCRIPT_EXECUTION_PREFIX))
        .map(|m| m.duration)
        .sum();

    PerformanceMetrics {
        timing,
        resources,
        script_execution_time,
        web_vitals: WebVitals {
            lcp,
            cls_supported: entries.layout_shift_supported,
        },
    }
}

fn navigation_timing(navigation: Option<&NavigationEntry>) -> ProbeResult<Timing> {
    let navigation = navigation.ok_or(ProbeError::Unavailable("navigation timing"))?;
    let origin = navigation.start_time;

    Ok(Timing {
        load_time: navigation.load_event_end - origin,
        dom_content_loaded: navigation.dom_content_loaded_event_end - origin,
        time_to_interactive: navigation.dom_interactive - origin,
        ..Timing::default()
    })
}

/// Counts resources by type from their URLs
fn count_resources<'a>(urls: impl Iterator<Item = &'a str>) -> ResourceCounts {
    let mut counts = ResourceCounts::default();

    for url in urls {
        let url = url.to_ascii_lowercase();
        counts.total += 1;

        if url.ends_with(".js") || url.contains(".js?") || url.contains("/js/") {
            counts.js += 1;
        }
        if url.ends_with(".css") || url.contains(".css?") || url.contains("/css/") {
            counts.css += 1;
        }
        if is_image_url(&url) {
            counts.images += 1;
        }
    }

    counts
}

/// Image extension at the end of the URL or right before its query string
fn is_image_url(url: &str) -> bool {
    IMAGE_EXTENSIONS.iter().any(|ext| {
        let suffix = format!(".{}", ext);
        url.ends_with(&suffix) || url.contains(&format!("{}?", suffix))
    })
}
