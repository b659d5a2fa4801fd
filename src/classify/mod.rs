//! Classification engine
//!
//! This module turns collected signals into verdicts:
//! - Visible-text extraction from raw and final documents
//! - The rendering classifier's priority cascade
//! - The JavaScript dependency score

mod dependency;
mod rendering;
mod text;

pub use dependency::{score_dependency, DependencyLevel, DependencyResult};
pub use rendering::{
    classify_rendering, BehaviorFlags, CascadeRule, Indicators, RenderingAssessment,
    RenderingScores, RenderingType, CASCADE,
};
pub use text::visible_text;
