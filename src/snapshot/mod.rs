//! Page snapshots
//!
//! A `PageSnapshot` is the explicit, serializable stand-in for a live browser
//! context: the executed DOM, the global sentinels present on the page runtime,
//! the recorded performance timeline and the element count observed after a
//! short settle wait. Every probe in the crate reads from a snapshot, so
//! detection can be exercised without a browser.

mod performance;

pub use performance::{
    ContentfulPaintEntry, MeasureEntry, NavigationEntry, PaintEntry, PerformanceEntries,
    ResourceEntry,
};

use crate::SnapshotError;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// The state of one loaded page at analysis time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    /// Address the page was loaded from
    pub url: String,

    /// Serialization of the live, fully-executed DOM
    pub html: String,

    /// Global-scope sentinel names defined by the page runtime
    #[serde(default)]
    pub globals: BTreeSet<String>,

    /// Recorded performance timeline
    #[serde(default)]
    pub performance: PerformanceEntries,

    /// Element count observed after the settle wait, if one was taken
    #[serde(default)]
    pub settled_element_count: Option<usize>,
}

impl PageSnapshot {
    /// Creates a snapshot with no runtime globals and an empty timeline
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
            ..Self::default()
        }
    }

    /// Adds runtime global sentinels to the snapshot
    pub fn with_globals<I, S>(mut self, globals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.globals.extend(globals.into_iter().map(Into::into));
        self
    }

    /// Parses a recorded snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: PageSnapshot = serde_json::from_str(json)?;

        ::url::Url::parse(&snapshot.url).map_err(|e| SnapshotError::InvalidUrl {
            url: snapshot.url.clone(),
            message: e.to_string(),
        })?;

        Ok(snapshot)
    }

    /// Parses the executed DOM into a queryable document
    pub fn document(&self) -> Html {
        Html::parse_document(&self.html)
    }

    /// Returns true if the page runtime defines the named global
    pub fn has_global(&self, name: &str) -> bool {
        self.globals.contains(name)
    }
}

/// Loads a recorded snapshot from a JSON file
pub fn load_snapshot(path: &Path) -> Result<PageSnapshot, SnapshotError> {
    let content = std::fs::read_to_string(path)?;
    PageSnapshot::from_json(&content)
}

/// Concatenates every script's source URL or inline body
///
/// The result is the substring-search corpus used for library fingerprints.
pub fn script_sources(document: &Html) -> String {
    let Ok(selector) = Selector::parse("script") else {
        return String::new();
    };

    document
        .select(&selector)
        .map(|script| match script.value().attr("src") {
            Some(src) if !src.is_empty() => src.to_string(),
            _ => script.text().collect::<String>(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
