use crate::api::{parse_search_response, parse_token_response, RawTrack};
use crate::error::SpotifyError;
use crate::Result;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use http_client::{HttpClient, Request};
use http_types::{Method, Url};
use std::sync::Arc;

const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
const DEFAULT_API_URL: &str = "https://api.spotify.com";

/// Parameters for the single-page track search the dashboard is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Search expression, e.g. `year:2023`.
    pub query: String,
    /// Market (country code) the search is scoped to.
    pub market: String,
    /// Page size; only the first page is ever fetched.
    pub limit: u32,
}

impl SearchQuery {
    /// Query for every track released in the given year.
    pub fn for_year(year: u16) -> Self {
        Self {
            query: format!("year:{year}"),
            ..Self::default()
        }
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            query: "year:2023".to_string(),
            market: "IN".to_string(),
            limit: 50,
        }
    }
}

/// Trait for the two catalog operations the dashboard core consumes.
///
/// Exactly two network calls exist, and they are strictly sequential: the
/// token request, then the search parameterized with its result. Neither is
/// retried; a failure is terminal for the load attempt.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockSpotifyClient`
/// that implements this trait using the `mockall` library, so session and
/// view behavior can be tested without touching the network.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait SpotifyClient {
    /// Request a client-credentials bearer token from the accounts service.
    async fn fetch_access_token(&self) -> Result<String>;

    /// Fetch one page of raw track records for the query.
    async fn search_tracks(&self, token: &str, query: &SearchQuery) -> Result<Vec<RawTrack>>;
}

/// HTTP implementation of [`SpotifyClient`] over the Spotify Web API.
///
/// # Examples
///
/// ```rust,no_run
/// use spotify_stats::{SpotifyClient, SpotifyClientImpl, SearchQuery};
///
/// # tokio_test::block_on(async {
/// let http_client = http_client::native::NativeClient::new();
/// let client = SpotifyClientImpl::new(
///     Box::new(http_client),
///     "client-id".to_string(),
///     "client-secret".to_string(),
/// );
///
/// let token = client.fetch_access_token().await?;
/// let tracks = client.search_tracks(&token, &SearchQuery::for_year(2023)).await?;
/// println!("fetched {} tracks", tracks.len());
/// # Ok::<(), spotify_stats::SpotifyError>(())
/// # });
/// ```
pub struct SpotifyClientImpl {
    client: Arc<dyn HttpClient + Send + Sync>,
    client_id: String,
    client_secret: String,
    accounts_url: String,
    api_url: String,
}

impl SpotifyClientImpl {
    /// Create a client against the default Spotify endpoints.
    ///
    /// # Arguments
    ///
    /// * `client` - Any HTTP client implementation that implements [`HttpClient`]
    /// * `client_id` / `client_secret` - Application credentials for the
    ///   client-credentials grant
    pub fn new(
        client: Box<dyn HttpClient + Send + Sync>,
        client_id: String,
        client_secret: String,
    ) -> Self {
        Self::with_base_urls(
            client,
            client_id,
            client_secret,
            DEFAULT_ACCOUNTS_URL.to_string(),
            DEFAULT_API_URL.to_string(),
        )
    }

    /// Create a client with custom accounts/API base URLs. Useful for tests.
    pub fn with_base_urls(
        client: Box<dyn HttpClient + Send + Sync>,
        client_id: String,
        client_secret: String,
        accounts_url: String,
        api_url: String,
    ) -> Self {
        Self {
            client: Arc::from(client),
            client_id,
            client_secret,
            accounts_url,
            api_url,
        }
    }
}

#[async_trait(?Send)]
impl SpotifyClient for SpotifyClientImpl {
    async fn fetch_access_token(&self) -> Result<String> {
        let token_url = format!("{}/api/token", self.accounts_url);
        let credentials = STANDARD.encode(format!("{}:{}", self.client_id, self.client_secret));
        let auth_header = format!("Basic {credentials}");

        let mut request = Request::new(Method::Post, token_url.parse::<Url>().unwrap());
        let _ = request.insert_header("Authorization", &auth_header);
        let _ = request.insert_header("Content-Type", "application/x-www-form-urlencoded");
        request.set_body("grant_type=client_credentials");

        log::debug!("Requesting client-credentials token from {token_url}");

        let mut response = self
            .client
            .send(request)
            .await
            .map_err(|e| SpotifyError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SpotifyError::Auth(format!(
                "token request returned status {}",
                response.status()
            )));
        }

        let body = response
            .body_string()
            .await
            .map_err(|e| SpotifyError::Http(e.to_string()))?;

        log::debug!("Access token received");
        parse_token_response(&body)
    }

    async fn search_tracks(&self, token: &str, query: &SearchQuery) -> Result<Vec<RawTrack>> {
        let url = format!(
            "{}/v1/search?q={}&type=track&market={}&limit={}",
            self.api_url,
            urlencoding::encode(&query.query),
            urlencoding::encode(&query.market),
            query.limit
        );
        let auth_header = format!("Bearer {token}");

        log::debug!("Searching catalog: {url}");

        let mut request = Request::new(Method::Get, url.parse::<Url>().unwrap());
        let _ = request.insert_header("Authorization", &auth_header);

        let mut response = self
            .client
            .send(request)
            .await
            .map_err(|e| SpotifyError::Http(e.to_string()))?;

        let status = response.status();
        log::debug!("Search response status: {status}");

        if !status.is_success() {
            let body = response.body_string().await.unwrap_or_default();
            log::debug!("Search error response: {body}");
            return Err(SpotifyError::Fetch(format!(
                "search request returned status {status}"
            )));
        }

        let body = response
            .body_string()
            .await
            .map_err(|e| SpotifyError::Http(e.to_string()))?;

        parse_search_response(&body)
    }
}
