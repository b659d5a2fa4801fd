//! No-JavaScript preview verdict
//!
//! Decides what a "what crawlers see" preview should present for a page,
//! given its raw HTML and the scores of the analysis that produced it.

use crate::classify::{visible_text, RenderingScores};
use scraper::Html;
use serde::Serialize;

/// Raw body text shorter than this counts as an empty shell
const MINIMAL_TEXT_CHARS: usize = 200;
const SHELL_CSR_SCORE: f64 = 0.5;
const HEAVY_CSR_SCORE: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PreviewContent {
    /// Explain that the page needs JavaScript and show the raw markup as text
    JavaScriptRequired,
    /// Show the raw HTML as delivered
    ServerContent,
}

/// Whole-percent split for the rendering bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBar {
    pub r#static: u32,
    pub ssr: u32,
    pub csr: u32,
}

impl From<&RenderingScores> for ScoreBar {
    fn from(scores: &RenderingScores) -> Self {
        let percent = |share: f64| (share * 100.0).round().max(0.0) as u32;
        Self {
            r#static: percent(scores.r#static),
            ssr: percent(scores.ssr),
            csr: percent(scores.csr),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewVerdict {
    pub content: PreviewContent,
    /// Visible body text length of the raw HTML
    pub raw_text_chars: usize,
    pub bar: ScoreBar,
}

/// Picks the preview presentation for a page
///
/// # Arguments
///
/// * `raw_html` - The pre-JavaScript HTML
/// * `scores` - Scores from the analysis of the same page; pass
///   `RenderingScores::UNCERTAIN` when the analysis failed
pub fn preview_verdict(raw_html: &str, scores: &RenderingScores) -> PreviewVerdict {
    let raw_text_chars = visible_text(&Html::parse_document(raw_html)).chars().count();

    let is_shell = raw_text_chars < MINIMAL_TEXT_CHARS && scores.csr > SHELL_CSR_SCORE;
    let content = if is_shell || scores.csr > HEAVY_CSR_SCORE {
        PreviewContent::JavaScriptRequired
    } else {
        PreviewContent::ServerContent
    };

    PreviewVerdict {
        content,
        raw_text_chars,
        bar: ScoreBar::from(scores),
    }
}
