//! Configuration module for Render-Lens
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; missing keys fall back to built-in defaults.
//!
//! # Example
//!
//! ```no_run
//! use render_lens::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("render-lens.toml")).unwrap();
//! println!("Crawler identity: {}", config.fetcher.crawler_user_agent);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    AnalysisConfig, Config, FetcherConfig, OutputConfig, ReportFormat,
    DEFAULT_BROWSER_USER_AGENT, DEFAULT_CRAWLER_USER_AGENT,
};

// Re-export parser functions
pub use parser::{
    compute_config_hash, default_config_hash, load_config, load_config_with_hash, parse_config,
};
pub use validation::validate;
