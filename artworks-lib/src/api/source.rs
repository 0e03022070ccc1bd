//! The page source contract.

use std::sync::Arc;

use async_trait::async_trait;

use super::Page;
use crate::error::FetchError;

/// Supplies pages of artworks on demand.
///
/// Implementations hold no state between calls beyond what the caller
/// passes in: the page number is the only cursor.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the 1-based page `page_number`.
    ///
    /// Records keep the remote order. Page `0` is rejected with
    /// [`FetchError::InvalidPage`].
    async fn fetch_page(&self, page_number: u32) -> Result<Page, FetchError>;
}

#[async_trait]
impl<T: PageSource + ?Sized> PageSource for Arc<T> {
    async fn fetch_page(&self, page_number: u32) -> Result<Page, FetchError> {
        (**self).fetch_page(page_number).await
    }
}

#[async_trait]
impl<T: PageSource + ?Sized> PageSource for &T {
    async fn fetch_page(&self, page_number: u32) -> Result<Page, FetchError> {
        (**self).fetch_page(page_number).await
    }
}
