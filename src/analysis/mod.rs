//! Analysis pipeline and its results
//!
//! This module handles:
//! - Running every collector, the classifier, the scorer and the SEO rules
//!   for one page
//! - The result record and the failure record returned to callers
//! - The no-JavaScript preview verdict derived from a finished analysis

mod analyzer;
mod preview;
mod result;

pub use analyzer::Analyzer;
pub use preview::{preview_verdict, PreviewContent, PreviewVerdict, ScoreBar};
pub use result::{AnalysisResponse, AnalysisResult, FailureRecord};
