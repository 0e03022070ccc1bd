//! In-memory page source for integration tests.

#![allow(dead_code)]

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Mutex;

use artworks_lib::api::Page;
use artworks_lib::api::PageSource;
use artworks_lib::error::FetchError;
use artworks_lib::model::Artwork;
use artworks_lib::model::ArtworkId;
use async_trait::async_trait;

/// Serves fixed pages and records every fetch.
pub struct MemorySource {
    pages: Vec<Vec<ArtworkId>>,
    total: usize,
    fail_on: Option<u32>,
    stall_on: Option<u32>,
    reported_page_size: Option<usize>,
    fetches: AtomicUsize,
    requested: Mutex<Vec<u32>>,
}

impl MemorySource {
    /// Pages of `page_size` consecutive ids, `1..=total`.
    pub fn sequential(total: usize, page_size: usize) -> Self {
        let ids: Vec<ArtworkId> = (1..=total as ArtworkId).collect();
        Self::from_pages(ids.chunks(page_size).map(<[_]>::to_vec).collect())
    }

    pub fn from_pages(pages: Vec<Vec<ArtworkId>>) -> Self {
        let total = pages.iter().map(Vec::len).sum();
        Self {
            pages,
            total,
            fail_on: None,
            stall_on: None,
            reported_page_size: None,
            fetches: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Fails every fetch of `page_number` with HTTP 503.
    pub fn fail_on(mut self, page_number: u32) -> Self {
        self.fail_on = Some(page_number);
        self
    }

    /// Never completes a fetch of `page_number`.
    pub fn stall_on(mut self, page_number: u32) -> Self {
        self.stall_on = Some(page_number);
        self
    }

    /// Reports `page_size` as the applied limit on every page.
    pub fn report_page_size(mut self, page_size: usize) -> Self {
        self.reported_page_size = Some(page_size);
        self
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<u32> {
        self.requested.lock().unwrap().clone()
    }

    /// Builds a page without counting it as a fetch.
    pub fn page(&self, page_number: u32) -> Page {
        let index = page_number as usize - 1;
        let ids = self.pages.get(index).cloned().unwrap_or_default();
        let has_next = index + 1 < self.pages.len();
        let page = Page::new(page_number, ids.into_iter().map(Artwork::new).collect())
            .with_total_records(self.total)
            .with_total_pages(self.pages.len() as u32)
            .with_has_next(has_next);
        match self.reported_page_size {
            Some(page_size) => page.with_page_size(page_size),
            None => page,
        }
    }
}

#[async_trait]
impl PageSource for MemorySource {
    async fn fetch_page(&self, page_number: u32) -> Result<Page, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(page_number);

        if page_number == 0 {
            return Err(FetchError::InvalidPage(page_number));
        }
        if self.stall_on == Some(page_number) {
            std::future::pending::<()>().await;
        }
        if self.fail_on == Some(page_number) {
            return Err(FetchError::http(503, "Service Unavailable"));
        }
        Ok(self.page(page_number))
    }
}
