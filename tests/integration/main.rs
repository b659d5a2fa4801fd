//! Integration tests for Render-Lens
//!
//! These tests use wiremock to stand in for the analyzed origin and exercise
//! the raw-HTML fetcher, live capture and the full analysis pipeline.

mod analysis_tests;
mod fetch_tests;
