//! Dynamic-content indicators

use crate::collect::count_matches;
use crate::ProbeResult;
use scraper::Html;

/// Selectors associated with lazy loading, infinite scroll and AJAX-driven forms
pub const DYNAMIC_SELECTORS: &[&str] = &[
    // Lazy loading
    "[loading=\"lazy\"]",
    "[data-src]",
    "[data-lazy]",
    ".lazyload",
    ".lazy",
    // Infinite scroll
    "[data-infinite-scroll]",
    ".infinite-scroll",
    "[data-next-page]",
    // AJAX forms
    "form[data-remote]",
    "form[data-ajax]",
    "form[hx-post]",
    "form[hx-get]",
];

/// Counts dynamic-content indicators
///
/// Sums the matches of every selector in [`DYNAMIC_SELECTORS`]; an element
/// matching several selectors counts once per selector. When the page grew
/// during the settle wait (`settled > total_elements`) one more indicator is
/// added.
pub fn count_dynamic_content(
    document: &Html,
    total_elements: usize,
    settled: Option<usize>,
) -> ProbeResult<usize> {
    let mut count = 0;
    for selector in DYNAMIC_SELECTORS {
        count += count_matches(document, selector)?;
    }

    if let Some(settled) = settled {
        if settled > total_elements {
            tracing::debug!(
                "Element count grew from {} to {} after settling",
                total_elements,
                settled
            );
            count += 1;
        }
    }

    Ok(count)
}
