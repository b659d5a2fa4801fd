//! JavaScript dependency scoring
//!
//! A transparent weighted linear model:
//!
//! | Component | Weight | Value |
//! |-----------|--------|-------|
//! | framework | 0.4 | 0.8 heavy runtime, 0.4 server-capable, 0.2 otherwise |
//! | resources | 0.3 | JS resource count / 15, saturating at 1 |
//! | runtime | 0.3 | 0.4 large content diff + 0.2 each for routing, state, dynamic imports |

use crate::classify::rendering::BehaviorFlags;
use crate::collect::RuntimeWeight;
use serde::{Deserialize, Serialize};
use std::fmt;

const FRAMEWORK_WEIGHT: f64 = 0.4;
const RESOURCE_WEIGHT: f64 = 0.3;
const RUNTIME_WEIGHT: f64 = 0.3;

/// JS resource count at which the resource component saturates
const JS_RESOURCE_SATURATION: f64 = 15.0;

const HIGH_THRESHOLD: f64 = 0.7;
const MEDIUM_THRESHOLD: f64 = 0.4;

/// Bucketed JavaScript dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DependencyLevel {
    Low,
    Medium,
    High,
    Unknown,
}

impl DependencyLevel {
    /// Thresholds are strict: 0.7 is Medium and 0.4 is Low
    pub fn from_score(score: f64) -> Self {
        if score > HIGH_THRESHOLD {
            Self::High
        } else if score > MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for DependencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DependencyResult {
    pub level: DependencyLevel,
    pub score: f64,
}

/// Scores how much of the page depends on JavaScript
///
/// # Arguments
///
/// * `weight` - Heaviest runtime among the detected frameworks
/// * `js_resources` - Number of JavaScript resources loaded
/// * `flags` - Runtime behavior observed by the rendering classifier
pub fn score_dependency(
    weight: RuntimeWeight,
    js_resources: usize,
    flags: &BehaviorFlags,
) -> DependencyResult {
    let framework_score = match weight {
        RuntimeWeight::Heavy => 0.8,
        RuntimeWeight::ServerCapable => 0.4,
        RuntimeWeight::Light => 0.2,
    };

    let resource_score = (js_resources as f64 / JS_RESOURCE_SATURATION).min(1.0);

    let runtime_score = [
        (flags.has_large_content_diff, 0.4),
        (flags.has_client_routing, 0.2),
        (flags.has_state_management, 0.2),
        (flags.has_dynamic_imports, 0.2),
    ]
    .iter()
    .filter(|(present, _)| *present)
    .map(|(_, weight)| weight)
    .sum::<f64>();

    let score = (framework_score * FRAMEWORK_WEIGHT
        + resource_score * RESOURCE_WEIGHT
        + runtime_score * RUNTIME_WEIGHT)
        .clamp(0.0, 1.0);

    DependencyResult {
        level: DependencyLevel::from_score(score),
        score,
    }
}
