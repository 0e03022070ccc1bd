//! Async iterator over consecutive pages.

use std::time::Duration;

use super::Page;
use super::PageSource;
use crate::error::FetchError;

/// Async iterator that yields consecutive pages from a [`PageSource`].
///
/// Fetches are strictly sequential: the next request is only issued when the
/// caller asks for it. Iteration ends after a page that is empty or reports
/// no following page, or after the first error.
///
/// # Example
///
/// ```ignore
/// let mut pages = Pages::new(&client, 3).fetch_timeout(Duration::from_secs(10));
///
/// while let Some(page) = pages.next().await {
///     let page = page?;
///     for artwork in page.records() {
///         println!("{}", artwork.id);
///     }
/// }
/// ```
pub struct Pages<'a, S: PageSource + ?Sized> {
    source: &'a S,
    /// The next page number to fetch.
    next_page: u32,
    /// Per-fetch timeout.
    timeout: Option<Duration>,
    /// Upper bound on the number of fetches.
    max_pages: Option<u32>,
    fetched: u32,
    done: bool,
}

impl<'a, S: PageSource + ?Sized> Pages<'a, S> {
    /// Creates an iterator whose first fetch is `first_page`.
    pub fn new(source: &'a S, first_page: u32) -> Self {
        Self {
            source,
            next_page: first_page,
            timeout: None,
            max_pages: None,
            fetched: 0,
            done: false,
        }
    }

    /// Creates an iterator that continues after `page`.
    ///
    /// Yields nothing only if `page` was reported as the last page. A page
    /// without pagination metadata, such as the placeholder shown after a
    /// failed load, is always followed.
    pub fn after(source: &'a S, page: &Page) -> Self {
        let mut pages = Self::new(source, page.page_number().saturating_add(1));
        pages.done = page.is_last();
        pages
    }

    /// Bounds each fetch by `timeout`.
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Stops after `max_pages` fetches.
    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Returns the number of pages fetched so far.
    pub fn fetched(&self) -> u32 {
        self.fetched
    }

    /// Returns `true` if iteration stopped because of the page cap.
    pub fn hit_page_cap(&self) -> bool {
        !self.done && self.max_pages.is_some_and(|max| self.fetched >= max)
    }

    /// Fetches the next page.
    ///
    /// Returns `None` when iteration has finished.
    pub async fn next(&mut self) -> Option<Result<Page, FetchError>> {
        if self.done || self.hit_page_cap() {
            return None;
        }

        let page_number = self.next_page;
        log::debug!("fetching page {page_number}");

        let result = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.source.fetch_page(page_number))
                .await
                .unwrap_or(Err(FetchError::Timeout(timeout))),
            None => self.source.fetch_page(page_number).await,
        };
        self.fetched += 1;

        match result {
            Ok(page) => {
                if page.is_empty() || !page.has_more() {
                    self.done = true;
                } else {
                    self.next_page = page_number.saturating_add(1);
                }
                Some(Ok(page))
            }
            Err(e) => {
                log::warn!("fetching page {page_number} failed: {e}");
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
