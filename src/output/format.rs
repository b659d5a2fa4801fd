//! Shared report formatting helpers

use std::collections::BTreeSet;
use std::fmt;

/// Times below one second print as whole milliseconds, the rest as seconds
pub fn format_time(ms: f64) -> String {
    if ms < 1000.0 {
        format!("{}ms", ms.round() as i64)
    } else {
        format!("{:.2}s", ms / 1000.0)
    }
}

/// Traffic-light rating for a timing milestone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Good,
    Warning,
    Poor,
}

impl Rating {
    pub fn for_timing(ms: f64) -> Self {
        if ms < 1000.0 {
            Self::Good
        } else if ms < 3000.0 {
            Self::Warning
        } else {
            Self::Poor
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Poor => "poor",
        };
        f.write_str(label)
    }
}

/// Framework names sorted and deduplicated, or "None detected"
pub fn format_frameworks(frameworks: &[String]) -> String {
    if frameworks.is_empty() {
        return "None detected".to_string();
    }
    frameworks
        .iter()
        .map(String::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>()
        .join(", ")
}

/// A score share as a whole percentage
pub fn percent(share: f64) -> String {
    format!("{}%", (share * 100.0).round() as i64)
}
