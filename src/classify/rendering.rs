//! Rendering classifier
//!
//! Combines the raw-versus-final text ratio with framework signals into a
//! probability distribution over {static, ssr, csr}.

use crate::classify::text::visible_text;
use crate::collect::{compile_selector, FrameworkSignals};
use scraper::Html;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Runtime globals left behind by client-side state containers
const STATE_MANAGEMENT_GLOBALS: &[&str] = &["__REDUX_STORE__", "__VUEX__", "ng", "__INITIAL_STATE__"];

const CLIENT_ROUTER_SELECTOR: &str = "script[src*=\"react-router\"], script[src*=\"vue-router\"]";

/// Script URL fragments bundlers give split chunks
const BUNDLE_MARKERS: &[&str] = &["chunk", "bundle"];

/// Below this ratio most final text was inserted after load
const LARGE_DIFF_RATIO: f64 = 0.5;
const MODERATE_DIFF_RATIO: f64 = 0.8;
const STATIC_RATIO: f64 = 0.9;
/// Ratio low enough to contradict server-rendering evidence
const EXTREME_DIFF_RATIO: f64 = 0.2;

/// Probability distribution over rendering strategies; always sums to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderingScores {
    pub r#static: f64,
    pub ssr: f64,
    pub csr: f64,
}

impl RenderingScores {
    pub const fn new(r#static: f64, ssr: f64, csr: f64) -> Self {
        Self { r#static, ssr, csr }
    }

    /// Distribution reported when classification could not run at all
    pub const UNCERTAIN: Self = Self::new(0.33, 0.33, 0.34);

    /// Conservative distribution for pages with no renderable text
    pub const EMPTY_TEXT: Self = Self::new(0.1, 0.1, 0.8);

    pub fn total(&self) -> f64 {
        self.r#static + self.ssr + self.csr
    }

    /// Label of the winning bucket
    ///
    /// SSR and Static each need a clear majority; anything else is CSR.
    pub fn primary_type(&self) -> RenderingType {
        if self.ssr > 0.5 {
            RenderingType::Ssr
        } else if self.r#static > 0.5 {
            RenderingType::Static
        } else {
            RenderingType::Csr
        }
    }
}

/// Categorical rendering label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderingType {
    Static,
    #[serde(rename = "SSR")]
    Ssr,
    #[serde(rename = "CSR")]
    Csr,
    Hybrid,
    Unknown,
}

impl fmt::Display for RenderingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Static => "Static",
            Self::Ssr => "SSR",
            Self::Csr => "CSR",
            Self::Hybrid => "Hybrid",
            Self::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// Runtime behavior observed on the page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorFlags {
    pub has_large_content_diff: bool,
    pub has_client_routing: bool,
    pub has_state_management: bool,
    pub has_dynamic_imports: bool,
}

/// Outcome of one classification
#[derive(Debug, Clone, PartialEq)]
pub struct RenderingAssessment {
    pub scores: RenderingScores,
    pub primary_type: RenderingType,
    /// Raw text length over final text length; `None` when either is empty
    pub content_ratio: Option<f64>,
    pub flags: BehaviorFlags,
}

/// Everything the cascade predicates look at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicators {
    pub has_ssr_framework: bool,
    pub has_csr_framework: bool,
    pub content_ratio: f64,
    pub has_moderate_content_diff: bool,
    pub flags: BehaviorFlags,
}

/// One step of the priority cascade
pub struct CascadeRule {
    pub name: &'static str,
    pub applies: fn(&Indicators) -> bool,
    pub scores: RenderingScores,
}

/// Evaluated in order; the first rule that applies decides the scores
///
/// Framework evidence outranks the text ratio, which boilerplate-heavy or
/// whitespace-stripped pages can skew.
pub static CASCADE: &[CascadeRule] = &[
    CascadeRule {
        name: "ssr-framework",
        applies: |i| i.has_ssr_framework,
        scores: RenderingScores::new(0.1, 0.8, 0.1),
    },
    CascadeRule {
        name: "csr-framework",
        applies: |i| {
            i.has_csr_framework || (i.flags.has_client_routing && i.flags.has_dynamic_imports)
        },
        scores: RenderingScores::new(0.1, 0.1, 0.8),
    },
    CascadeRule {
        name: "static-content",
        applies: |i| {
            i.content_ratio > STATIC_RATIO
                && !i.flags.has_state_management
                && !i.flags.has_dynamic_imports
        },
        scores: RenderingScores::new(0.8, 0.1, 0.1),
    },
    CascadeRule {
        name: "mixed",
        applies: |i| i.has_moderate_content_diff || i.flags.has_state_management,
        scores: RenderingScores::new(0.3, 0.3, 0.4),
    },
    CascadeRule {
        name: "weak-static",
        applies: |_| true,
        scores: RenderingScores::new(0.6, 0.2, 0.2),
    },
];

impl Indicators {
    /// Runs the cascade, returning the deciding rule
    pub fn decide(&self) -> &'static CascadeRule {
        CASCADE
            .iter()
            .find(|rule| (rule.applies)(self))
            .unwrap_or(&CASCADE[CASCADE.len() - 1])
    }
}

/// Classifies how the page's content was rendered
///
/// # Arguments
///
/// * `raw_html` - Best-effort pre-execution HTML
/// * `final_document` - The live, executed DOM
/// * `globals` - Runtime global sentinels
/// * `frameworks` - Framework detection for the same page
pub fn classify_rendering(
    raw_html: &str,
    final_document: &Html,
    globals: &BTreeSet<String>,
    frameworks: &FrameworkSignals,
) -> RenderingAssessment {
    let raw_text = visible_text(&Html::parse_document(raw_html));
    let final_text = visible_text(final_document);

    if raw_text.is_empty() || final_text.is_empty() {
        tracing::debug!(
            "No renderable text (raw: {} chars, final: {} chars), assuming CSR",
            raw_text.chars().count(),
            final_text.chars().count()
        );
        return RenderingAssessment {
            scores: RenderingScores::EMPTY_TEXT,
            primary_type: RenderingType::Csr,
            content_ratio: None,
            flags: BehaviorFlags::default(),
        };
    }

    let content_ratio = raw_text.chars().count() as f64 / final_text.chars().count() as f64;
    let flags = BehaviorFlags {
        has_large_content_diff: content_ratio < LARGE_DIFF_RATIO,
        has_client_routing: has_client_routing(final_document),
        has_state_management: STATE_MANAGEMENT_GLOBALS
            .iter()
            .any(|name| globals.contains(*name)),
        has_dynamic_imports: has_bundled_scripts(final_document),
    };

    let indicators = Indicators {
        has_ssr_framework: frameworks.has_ssr(),
        has_csr_framework: frameworks.has_csr(),
        content_ratio,
        has_moderate_content_diff: content_ratio < MODERATE_DIFF_RATIO,
        flags,
    };

    if indicators.has_ssr_framework && content_ratio < EXTREME_DIFF_RATIO {
        tracing::info!(
            "Conflicting signals: SSR frameworks {:?} detected but content ratio is {:.3}; keeping framework evidence",
            frameworks.ssr,
            content_ratio
        );
    }

    let rule = indicators.decide();
    tracing::debug!(
        "Rendering cascade matched '{}' (content ratio {:.3})",
        rule.name,
        content_ratio
    );

    RenderingAssessment {
        scores: rule.scores,
        primary_type: rule.scores.primary_type(),
        content_ratio: Some(content_ratio),
        flags,
    }
}

fn has_client_routing(document: &Html) -> bool {
    match compile_selector(CLIENT_ROUTER_SELECTOR) {
        Ok(selector) => document.select(&selector).next().is_some(),
        Err(e) => {
            tracing::debug!("Client routing probe failed: {}", e);
            false
        }
    }
}

fn has_bundled_scripts(document: &Html) -> bool {
    let Ok(selector) = compile_selector("script[src]") else {
        return false;
    };
    document.select(&selector).any(|script| {
        script
            .value()
            .attr("src")
            .is_some_and(|src| BUNDLE_MARKERS.iter().any(|marker| src.contains(marker)))
    })
}
