//! Render-Lens: a rendering-strategy classifier for web pages
//!
//! This crate inspects a loaded page and estimates how much of its visible
//! content was produced by server-side rendering versus client-side JavaScript,
//! then derives SEO recommendations from that estimate.

pub mod analysis;
pub mod classify;
pub mod collect;
pub mod config;
pub mod fetcher;
pub mod output;
pub mod seo;
pub mod snapshot;

use thiserror::Error;

/// Main error type for Render-Lens operations
#[derive(Debug, Error)]
pub enum LensError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Analysis timed out for {url}")]
    Timeout { url: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors raised while loading a recorded page snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid snapshot URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

/// A single signal probe that could not produce a value
///
/// Probe errors never abort an analysis; the caller substitutes the field's
/// default and logs the failure.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProbeError {
    #[error("signal unavailable: {0}")]
    Unavailable(&'static str),

    #[error("invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Result type alias for signal probes
pub type ProbeResult<T> = std::result::Result<T, ProbeError>;

// Re-export commonly used types
pub use analysis::{AnalysisResponse, AnalysisResult, Analyzer};
pub use classify::{DependencyLevel, RenderingScores, RenderingType};
pub use config::Config;
pub use snapshot::PageSnapshot;
