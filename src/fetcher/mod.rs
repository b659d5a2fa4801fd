//! HTTP fetching for the analyzer
//!
//! This module contains:
//! - HTTP client construction
//! - The raw-HTML refetch with a crawler identity and DOM fallback
//! - Live page capture when no recorded snapshot is available

mod capture;
mod client;
mod raw;

pub use capture::capture_snapshot;
pub use client::{build_http_client, REQUESTED_WITH};
pub use raw::{fetch_raw_html, FallbackReason, RawHtml, RawHtmlSource};
