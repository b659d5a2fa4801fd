//! Recorded performance-timeline entries
//!
//! These mirror the navigation, paint, resource and measure records a browser
//! exposes. All times are milliseconds relative to the time origin.

use serde::{Deserialize, Serialize};

/// The page's navigation timing record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationEntry {
    pub start_time: f64,
    pub dom_interactive: f64,
    pub dom_content_loaded_event_end: f64,
    pub load_event_end: f64,
    pub transfer_size: Option<u64>,
    pub decoded_body_size: Option<u64>,
}

/// A `first-paint` or `first-contentful-paint` record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintEntry {
    pub name: String,
    pub start_time: f64,
}

/// A largest-contentful-paint candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentfulPaintEntry {
    pub start_time: f64,
}

/// A network resource loaded by the page, identified by its URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub name: String,
}

impl ResourceEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A user-timing measure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureEntry {
    pub name: String,
    pub duration: f64,
}

/// Everything the page's performance timeline recorded
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PerformanceEntries {
    pub navigation: Option<NavigationEntry>,
    pub paint: Vec<PaintEntry>,
    pub largest_contentful_paint: Vec<ContentfulPaintEntry>,
    pub resources: Vec<ResourceEntry>,
    pub measures: Vec<MeasureEntry>,
    pub layout_shift_supported: bool,
}
