//! Hyperlink inventory

use crate::collect::compile_selector;
use crate::ProbeResult;
use scraper::Html;
use serde::Serialize;

/// One hyperlink as it appears in the DOM
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDetail {
    pub text: String,
    pub href: String,
    pub is_broken: bool,
}

/// Tally of the page's hyperlinks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkAnalysis {
    pub total: usize,
    pub js_links: usize,
    pub html_links: usize,
    pub broken_links: usize,
    pub link_details: Vec<LinkDetail>,
}

/// Enumerates every `<a>` element and classifies it
///
/// # Classification Rules
///
/// | href | Class |
/// |------|-------|
/// | missing, empty or `#` | broken |
/// | `javascript:...` | JavaScript pseudo-protocol |
/// | anything else | HTML link |
pub fn analyze_links(document: &Html) -> ProbeResult<LinkAnalysis> {
    let selector = compile_selector("a")?;
    let mut analysis = LinkAnalysis::default();

    for link in document.select(&selector) {
        let href = link.value().attr("href").unwrap_or("");
        let is_broken = href.is_empty() || href == "#";

        if is_broken {
            analysis.broken_links += 1;
        } else if href.starts_with("javascript:") {
            analysis.js_links += 1;
        } else {
            analysis.html_links += 1;
        }

        analysis.link_details.push(LinkDetail {
            text: link.text().collect::<String>().trim().to_string(),
            href: if href.is_empty() {
                "No href".to_string()
            } else {
                href.to_string()
            },
            is_broken,
        });
    }

    analysis.total = analysis.link_details.len();
    Ok(analysis)
}
