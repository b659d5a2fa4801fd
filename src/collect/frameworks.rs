//! Framework detection
//!
//! Every run re-derives detection from the snapshot; nothing is cached.

use crate::collect::catalog::{Affinity, FrameworkSpec, Marker, RuntimeWeight, CATALOG};
use crate::collect::compile_selector;
use crate::ProbeResult;
use scraper::Html;
use std::collections::{BTreeSet, HashSet};

/// The page facets framework markers are evaluated against
#[derive(Debug, Clone, Copy)]
pub struct PageProbe<'a> {
    pub document: &'a Html,
    pub markup: &'a str,
    pub script_sources: &'a str,
    pub globals: &'a BTreeSet<String>,
}

impl Marker {
    /// Evaluates this marker against the page
    pub fn matches(&self, probe: &PageProbe<'_>) -> ProbeResult<bool> {
        match *self {
            Marker::Global(name) => Ok(probe.globals.contains(name)),
            Marker::Selector(selector) => any_match(probe.document, selector),
            Marker::AllSelectors(selectors) => {
                for selector in selectors {
                    if !any_match(probe.document, selector)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Marker::RootAttribute(name) => {
                Ok(probe.document.root_element().value().attr(name).is_some())
            }
            Marker::AttributePrefix(prefix) => Ok(probe
                .document
                .root_element()
                .descendants()
                .filter_map(|node| node.value().as_element())
                .any(|element| element.attrs().any(|(name, _)| name.starts_with(prefix)))),
            Marker::Markup(needle) => Ok(probe.markup.contains(needle)),
            Marker::ScriptSource(needle) => Ok(probe.script_sources.contains(needle)),
            Marker::Generator(needle) => {
                let selector = compile_selector("meta[name=\"generator\"]")?;
                Ok(probe.document.select(&selector).any(|meta| {
                    meta.value()
                        .attr("content")
                        .is_some_and(|content| content.contains(needle))
                }))
            }
        }
    }
}

fn any_match(document: &Html, selector: &str) -> ProbeResult<bool> {
    let selector = compile_selector(selector)?;
    let found = document.select(&selector).next().is_some();
    Ok(found)
}

/// Detected frameworks, partitioned by rendering affinity
///
/// `detected` is in catalog order without duplicates. A framework superseded
/// by a co-detected, more specific framework stays in `detected` but is
/// removed from both affinity partitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameworkSignals {
    pub detected: Vec<&'static str>,
    pub ssr: Vec<&'static str>,
    pub csr: Vec<&'static str>,
    /// Heaviest runtime implied by any detected framework
    pub runtime_weight: RuntimeWeight,
}

impl FrameworkSignals {
    pub fn has_ssr(&self) -> bool {
        !self.ssr.is_empty()
    }

    pub fn has_csr(&self) -> bool {
        !self.csr.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.detected.iter().map(|name| name.to_string()).collect()
    }
}

/// Detects frameworks from the built-in catalog
pub fn detect_frameworks(probe: &PageProbe<'_>) -> FrameworkSignals {
    detect_with_catalog(CATALOG, probe)
}

/// Detects frameworks from an arbitrary catalog
///
/// A framework is present when any of its markers matches. A marker that
/// cannot be evaluated counts as false and is logged; it never aborts
/// detection of other markers or frameworks.
pub fn detect_with_catalog(
    catalog: &'static [FrameworkSpec],
    probe: &PageProbe<'_>,
) -> FrameworkSignals {
    let present: Vec<&'static FrameworkSpec> = catalog
        .iter()
        .filter(|spec| is_present(spec, probe))
        .collect();

    let overridden: HashSet<&str> = present.iter().filter_map(|spec| spec.overrides).collect();

    let mut signals = FrameworkSignals::default();
    for spec in present {
        if signals.detected.contains(&spec.name) {
            continue;
        }
        signals.detected.push(spec.name);
        signals.runtime_weight = signals.runtime_weight.max(spec.weight);

        if overridden.contains(spec.name) {
            tracing::debug!("{} superseded by a more specific framework", spec.name);
            continue;
        }
        match spec.affinity {
            Affinity::Ssr => signals.ssr.push(spec.name),
            Affinity::Csr => signals.csr.push(spec.name),
            Affinity::Neutral => {}
        }
    }

    if !signals.detected.is_empty() {
        tracing::debug!("Detected frameworks: {:?}", signals.detected);
    }
    signals
}

fn is_present(spec: &FrameworkSpec, probe: &PageProbe<'_>) -> bool {
    spec.markers.iter().any(|marker| match marker.matches(probe) {
        Ok(found) => found,
        Err(e) => {
            tracing::debug!("Framework detection error for {}: {}", spec.name, e);
            false
        }
    })
}
