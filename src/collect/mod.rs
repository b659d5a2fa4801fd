//! Signal collectors
//!
//! Independent probes that each read one facet of page state:
//! - Performance timing and resource counts
//! - Hyperlink inventory
//! - Framework markers
//! - Dynamic-content indicators
//!
//! Collectors return `ProbeResult`; callers degrade a failed probe to the
//! field's default through [`or_default`] so one broken signal never blanks
//! the whole analysis.

mod catalog;
mod dynamic;
mod frameworks;
mod links;
mod performance;

pub use catalog::{find_framework, Affinity, FrameworkSpec, Marker, RuntimeWeight, CATALOG};
pub use dynamic::{count_dynamic_content, DYNAMIC_SELECTORS};
pub use frameworks::{detect_frameworks, detect_with_catalog, FrameworkSignals, PageProbe};
pub use links::{analyze_links, LinkAnalysis, LinkDetail};
pub use performance::{
    collect_performance, PerformanceMetrics, ResourceCounts, Timing, WebVitals,
};

use crate::{ProbeError, ProbeResult};
use scraper::{Html, Selector};

/// Compiles a CSS selector, reporting failures as a probe error
pub fn compile_selector(selector: &str) -> ProbeResult<Selector> {
    Selector::parse(selector).map_err(|e| ProbeError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Counts the elements matching a selector
pub fn count_matches(document: &Html, selector: &str) -> ProbeResult<usize> {
    let selector = compile_selector(selector)?;
    Ok(document.select(&selector).count())
}

/// Counts every element in the document, the root element included
pub fn count_elements(document: &Html) -> usize {
    document
        .root_element()
        .descendants()
        .filter(|node| node.value().is_element())
        .count()
}

/// Applies the default-on-error policy for a single signal
pub fn or_default<T: Default>(signal: &str, result: ProbeResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Signal '{}' unavailable, using default: {}", signal, e);
            T::default()
        }
    }
}
