use crate::config::FetcherConfig;
use reqwest::Client;
use std::time::Duration;

/// Marker header value identifying analyzer traffic to the origin
pub const REQUESTED_WITH: &str = "RenderLens";

/// Builds an HTTP client with proper configuration
///
/// The client carries no default user agent: the raw-HTML refetch and the
/// live capture each present their own identity per request.
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use render_lens::config::FetcherConfig;
/// use render_lens::fetcher::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_millis(config.request_timeout_ms))
        .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        .gzip(true)
        .brotli(true)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&FetcherConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_build_http_client_short_timeouts() {
        let config = FetcherConfig {
            request_timeout_ms: 100,
            connect_timeout_ms: 100,
            ..FetcherConfig::default()
        };
        assert!(build_http_client(&config).is_ok());
    }
}
