//! Main ArtworksClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::FetchError;

/// Base URL of the public Art Institute of Chicago API.
pub const DEFAULT_BASE_URL: &str = "https://api.artic.edu/api/v1";

/// Rows per page in the browser table.
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Largest `limit` the public API accepts per page.
pub const MAX_PAGE_SIZE: usize = 100;

/// HTTP client for the artworks collection.
///
/// This client is cheap to clone (uses `Arc` internally) and implements
/// [`PageSource`](crate::api::PageSource).
///
/// # Example
///
/// ```ignore
/// use artworks_lib::ArtworksClient;
/// use artworks_lib::api::PageSource;
///
/// let client = ArtworksClient::builder()
///     .url("https://api.artic.edu/api/v1")
///     .page_size(8)
///     .build()?;
///
/// let page = client.fetch_page(1).await?;
/// ```
#[derive(Clone)]
pub struct ArtworksClient {
    pub(crate) inner: Arc<ArtworksClientInner>,
}

pub(crate) struct ArtworksClientInner {
    /// The `artworks` collection endpoint.
    pub(crate) collection_url: Url,
    pub(crate) page_size: usize,
    pub(crate) http_client: Client,
    pub(crate) timeout: Option<Duration>,
}

impl ArtworksClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ArtworksClientBuilder<Missing> {
        ArtworksClientBuilder::new()
    }

    /// Returns the collection endpoint.
    pub fn collection_url(&self) -> &Url {
        &self.inner.collection_url
    }

    /// Returns the number of records requested per page.
    pub fn page_size(&self) -> usize {
        self.inner.page_size
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`ArtworksClient`].
///
/// The base URL is required and checked at compile time; it is parsed when
/// [`build`](ArtworksClientBuilder::build) is called.
pub struct ArtworksClientBuilder<U> {
    url: U,
    page_size: usize,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
    http_client: Option<Client>,
}

impl ArtworksClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            page_size: DEFAULT_PAGE_SIZE,
            timeout: None,
            connect_timeout: None,
            user_agent: None,
            http_client: None,
        }
    }

    /// Sets the API base URL, e.g. `https://api.artic.edu/api/v1`.
    ///
    /// The `artworks` collection path is appended to it.
    pub fn url(self, url: impl Into<String>) -> ArtworksClientBuilder<Set<String>> {
        ArtworksClientBuilder {
            url: Set(url.into()),
            page_size: self.page_size,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            user_agent: self.user_agent,
            http_client: self.http_client,
        }
    }
}

impl Default for ArtworksClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> ArtworksClientBuilder<U> {
    /// Sets how many records each page holds.
    ///
    /// Defaults to [`DEFAULT_PAGE_SIZE`]. Clamped to `1..=MAX_PAGE_SIZE`.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the `User-Agent` header.
    ///
    /// Ignored when a custom HTTP client is supplied.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl ArtworksClientBuilder<Set<String>> {
    /// Builds the [`ArtworksClient`].
    pub fn build(self) -> Result<ArtworksClient, FetchError> {
        let collection_url = collection_url(&self.url.0)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                builder.build()?
            }
        };

        Ok(ArtworksClient {
            inner: Arc::new(ArtworksClientInner {
                collection_url,
                page_size: self.page_size,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

/// Resolves the `artworks` collection endpoint under a base URL.
fn collection_url(base: &str) -> Result<Url, FetchError> {
    let mut url = Url::parse(base).map_err(|e| FetchError::InvalidUrl(format!("{base}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(FetchError::InvalidUrl(base.to_string()));
    }
    url.set_query(None);
    url.path_segments_mut()
        .map_err(|()| FetchError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .push("artworks");
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_url() {
        let url = collection_url("https://api.artic.edu/api/v1").unwrap();
        assert_eq!(url.as_str(), "https://api.artic.edu/api/v1/artworks");

        let url = collection_url("https://api.artic.edu/api/v1/").unwrap();
        assert_eq!(url.as_str(), "https://api.artic.edu/api/v1/artworks");
    }

    #[test]
    fn test_collection_url_invalid() {
        assert!(matches!(
            collection_url("not a url"),
            Err(FetchError::InvalidUrl(_))
        ));
        assert!(matches!(
            collection_url("mailto:someone@example.com"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_builder_defaults() {
        let client = ArtworksClient::builder()
            .url("http://localhost:8080/api/v1")
            .page_size(0)
            .build()
            .unwrap();
        assert_eq!(client.page_size(), 1);
        assert_eq!(
            client.collection_url().as_str(),
            "http://localhost:8080/api/v1/artworks"
        );
    }

    #[test]
    fn test_page_size_clamped_to_api_limit() {
        let client = ArtworksClient::builder()
            .url(DEFAULT_BASE_URL)
            .page_size(200)
            .build()
            .unwrap();
        assert_eq!(client.page_size(), MAX_PAGE_SIZE);
    }
}
