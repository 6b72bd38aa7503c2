use thiserror::Error;

/// Error types for dashboard operations.
///
/// This enum covers everything that can go wrong while loading the dashboard:
/// network issues, authentication failures, a rejected search, and malformed
/// catalog data. Every variant is terminal for the current load attempt:
/// nothing is retried automatically, and a failed load never produces a
/// partially populated dashboard.
///
/// Filtering, aggregation and view projection are total over data that passed
/// normalization and cannot fail.
///
/// # Error Handling Example
///
/// ```rust,no_run
/// use spotify_stats::{SpotifyClient, SpotifyClientImpl, SpotifyError};
///
/// # tokio_test::block_on(async {
/// let client = SpotifyClientImpl::new(
///     Box::new(http_client::native::NativeClient::new()),
///     "client-id".to_string(),
///     "client-secret".to_string(),
/// );
///
/// match client.fetch_access_token().await {
///     Ok(token) => println!("token received: {} bytes", token.len()),
///     Err(SpotifyError::Auth(msg)) => eprintln!("authentication failed: {msg}"),
///     Err(SpotifyError::Http(msg)) => eprintln!("network error: {msg}"),
///     Err(e) => eprintln!("other error: {e}"),
/// }
/// # });
/// ```
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// HTTP/network related errors.
    ///
    /// This includes connection failures, timeouts, DNS errors, and other
    /// low-level networking issues on either of the two requests.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The token request failed or returned a non-success status.
    ///
    /// # Common Causes
    /// - Invalid client id or secret
    /// - Credentials revoked for the application
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The track search failed or returned a non-success status.
    #[error("Track search failed: {0}")]
    Fetch(String),

    /// A response body was not the expected JSON shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// A raw catalog record was structurally incomplete.
    ///
    /// Normalization is fail-fast: the first bad record aborts the whole
    /// batch, and the error names the offending index within the fetched page.
    #[error("Invalid track record at index {index}: {reason}")]
    Normalization {
        /// Position of the bad record in the fetched page
        index: usize,
        /// What was missing or malformed
        reason: String,
    },

    /// Terminal I/O errors raised while driving the dashboard UI.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
