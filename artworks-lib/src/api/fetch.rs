//! HTTP page fetching for [`ArtworksClient`].

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use url::Url;

use super::Page;
use super::PageSource;
use crate::error::FetchError;
use crate::model::Artwork;
use crate::model::ARTWORK_FIELDS;
use crate::ArtworksClient;

#[async_trait]
impl PageSource for ArtworksClient {
    async fn fetch_page(&self, page_number: u32) -> Result<Page, FetchError> {
        if page_number == 0 {
            return Err(FetchError::InvalidPage(page_number));
        }

        let url = page_url(&self.inner.collection_url, page_number, self.inner.page_size);

        let mut request = self
            .inner
            .http_client
            .get(url)
            .header(ACCEPT, "application/json");

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                self.inner
                    .timeout
                    .map_or(FetchError::Network(e), FetchError::Timeout)
            } else {
                FetchError::Network(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                body
            };
            return Err(FetchError::http(status.as_u16(), message));
        }

        let body = response.text().await?;
        parse_page(page_number, &body)
    }
}

/// Builds the URL for one page of the collection.
fn page_url(collection_url: &Url, page_number: u32, page_size: usize) -> Url {
    let mut url = collection_url.clone();
    url.query_pairs_mut()
        .append_pair("page", &page_number.to_string())
        .append_pair("limit", &page_size.to_string())
        .append_pair("fields", &ARTWORK_FIELDS.join(","));
    url
}

/// Decodes a collection response body into a [`Page`].
fn parse_page(page_number: u32, body: &str) -> Result<Page, FetchError> {
    let response: ArtworksResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::parse_with_body(e.to_string(), body))?;

    let pagination = response.pagination;
    let mut page = Page::new(page_number, response.data).with_total_records(pagination.total);

    page = match pagination.next_url {
        Some(next_url) => page.with_next_url(next_url),
        None => page.with_has_next(false),
    };

    if let Some(total_pages) = pagination.total_pages {
        page = page.with_total_pages(total_pages);
    }

    if let Some(limit) = pagination.limit {
        page = page.with_page_size(limit);
    }

    Ok(page)
}

/// Collection response body.
#[derive(Debug, Deserialize)]
struct ArtworksResponse {
    /// The records on this page.
    data: Vec<Artwork>,
    pagination: Pagination,
}

/// `pagination` object of a collection response.
#[derive(Debug, Deserialize)]
struct Pagination {
    /// Record count across the whole collection.
    total: usize,
    limit: Option<usize>,
    total_pages: Option<u32>,
    /// Absent or null on the last page.
    next_url: Option<String>,
}
