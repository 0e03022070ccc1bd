//! Page type for paginated artwork results.

use crate::model::Artwork;
use crate::model::ArtworkId;

/// One fetched batch of artworks with pagination metadata.
///
/// # Example
///
/// ```
/// use artworks_lib::api::Page;
/// use artworks_lib::model::Artwork;
///
/// let page = Page::new(1, vec![Artwork::new(10), Artwork::new(11)])
///     .with_total_records(40)
///     .with_has_next(true);
///
/// assert_eq!(page.ids().collect::<Vec<_>>(), vec![10, 11]);
/// assert!(page.has_more());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number.
    page_number: u32,
    records: Vec<Artwork>,
    /// Count across the whole remote collection at fetch time.
    total_records: usize,
    /// Whether the remote collection reported a following page.
    has_next: Option<bool>,
    next_url: Option<String>,
    total_pages: Option<u32>,
    page_size: Option<usize>,
}

impl Page {
    /// Creates a new page with records and no pagination metadata.
    pub fn new(page_number: u32, records: Vec<Artwork>) -> Self {
        let total_records = records.len();
        Self {
            page_number,
            records,
            total_records,
            has_next: None,
            next_url: None,
            total_pages: None,
            page_size: None,
        }
    }

    /// Creates an empty page, used when a fetch fails during navigation.
    ///
    /// Whether a following page exists is unknown, so `has_next` is unset.
    pub fn empty(page_number: u32) -> Self {
        Self::new(page_number, Vec::new())
    }

    /// Sets the total record count.
    pub fn with_total_records(mut self, total: usize) -> Self {
        self.total_records = total;
        self
    }

    /// Sets whether a following page exists.
    pub fn with_has_next(mut self, has_next: bool) -> Self {
        self.has_next = Some(has_next);
        self
    }

    /// Sets the link to the next page. Implies `has_next`.
    pub fn with_next_url(mut self, next_url: impl Into<String>) -> Self {
        self.next_url = Some(next_url.into());
        self.has_next = Some(true);
        self
    }

    /// Sets the total page count reported by the API.
    pub fn with_total_pages(mut self, total_pages: u32) -> Self {
        self.total_pages = Some(total_pages);
        self
    }

    /// Sets the page size reported by the API.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Returns the 1-based page number.
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Returns the records in remote order.
    pub fn records(&self) -> &[Artwork] {
        &self.records
    }

    /// Returns the record ids in remote order.
    pub fn ids(&self) -> impl Iterator<Item = ArtworkId> + '_ {
        self.records.iter().map(|r| r.id)
    }

    /// Returns the total record count of the remote collection.
    pub fn total_records(&self) -> usize {
        self.total_records
    }

    /// Returns the next-page flag as reported, if any.
    pub fn has_next(&self) -> Option<bool> {
        self.has_next
    }

    /// Returns the API's link to the next page, if available.
    pub fn next_url(&self) -> Option<&str> {
        self.next_url.as_deref()
    }

    /// Returns the total page count, if the API reported it.
    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Returns the page size, if the API reported it.
    pub fn page_size(&self) -> Option<usize> {
        self.page_size
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are more pages after this one.
    ///
    /// An explicit flag wins. Without one, falls back to the reported page
    /// count, and finally to "yes" for a non-empty page.
    pub fn has_more(&self) -> bool {
        match (self.has_next, self.total_pages) {
            (Some(has_next), _) => has_next,
            (None, Some(total_pages)) => self.page_number < total_pages,
            (None, None) => !self.records.is_empty(),
        }
    }

    /// Returns `true` only if the source positively reported this as the
    /// last page, either through the next-page flag or the page count.
    pub fn is_last(&self) -> bool {
        self.has_next == Some(false)
            || self
                .total_pages
                .is_some_and(|total_pages| self.page_number >= total_pages)
    }
}
