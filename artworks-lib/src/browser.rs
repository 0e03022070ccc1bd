//! Browser session driven by a table front end.

use std::collections::HashSet;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::api::Page;
use crate::api::PageSource;
use crate::error::FetchError;
use crate::error::SelectionError;
use crate::model::Artwork;
use crate::model::ArtworkId;
use crate::selection::BulkSelectOutcome;
use crate::selection::SelectionController;

/// Shared loading indicator.
///
/// Set while a page fetch or a bulk select is in progress. A renderer can
/// hold a clone and poll it while the browser is busy.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    /// Returns `true` while work is in progress.
    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn start(&self) -> LoadingGuard<'_> {
        self.0.store(true, Ordering::Release);
        LoadingGuard(self)
    }
}

/// Clears the loading flag on drop.
struct LoadingGuard<'a>(&'a LoadingFlag);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.0.store(false, Ordering::Release);
    }
}

/// Everything a renderer needs to draw one page of the table.
#[derive(Debug, Clone)]
pub struct PageView<'a> {
    /// Records on the current page, in display order.
    pub records: &'a [Artwork],
    pub total_records: usize,
    pub total_pages: u32,
    /// 1-based.
    pub page_number: u32,
    /// Rows per page, as applied by the source when it reported one.
    pub page_size: usize,
    /// Whether navigating forward may yield another page.
    pub next_available: bool,
    pub loading: bool,
    /// Selected ids among `records`, for checkbox rendering.
    pub selected_in_view: HashSet<ArtworkId>,
}

impl PageView<'_> {
    /// Returns `true` if the record `id` should render as checked.
    pub fn is_checked(&self, id: ArtworkId) -> bool {
        self.selected_in_view.contains(&id)
    }

    /// Returns `true` if a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    /// Returns `true` if a following page may exist.
    pub fn has_next(&self) -> bool {
        self.next_available
    }
}

/// A browsing session over a paginated artworks collection.
///
/// Holds the page in view and the injected [`SelectionController`], and
/// exposes the callbacks a table front end invokes. The selection is never
/// cleared by navigation.
///
/// # Example
///
/// ```ignore
/// let client = ArtworksClient::builder().url(DEFAULT_BASE_URL).build()?;
/// let mut browser = Browser::new(client, SelectionController::new(), DEFAULT_PAGE_SIZE);
///
/// browser.on_page_change(1).await?;
/// browser
///     .on_bulk_select_request(10, &CancellationToken::new())
///     .await?;
///
/// for artwork in browser.view().records {
///     println!("{}", artwork.title_or_default());
/// }
/// ```
pub struct Browser<S> {
    source: S,
    controller: SelectionController,
    page: Page,
    page_size: usize,
    loading: LoadingFlag,
}

impl<S: PageSource> Browser<S> {
    /// Creates a browser positioned before page 1.
    ///
    /// Call [`on_page_change`](Self::on_page_change) to load the first page.
    pub fn new(source: S, controller: SelectionController, page_size: usize) -> Self {
        Self {
            source,
            controller,
            page: Page::empty(1),
            page_size: page_size.max(1),
            loading: LoadingFlag::default(),
        }
    }

    /// Returns the render state of the current page.
    pub fn view(&self) -> PageView<'_> {
        PageView {
            records: self.page.records(),
            total_records: self.page.total_records(),
            total_pages: self.total_pages(),
            page_number: self.page.page_number(),
            page_size: self.page_size(),
            next_available: self.has_next_page(),
            loading: self.loading.is_loading() || self.controller.is_selecting(),
            selected_in_view: self.controller.selected_in(self.page.ids()),
        }
    }

    /// Returns the page in view.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Returns the selection controller.
    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    /// Returns the page source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns a handle to the loading indicator.
    pub fn loading_flag(&self) -> LoadingFlag {
        self.loading.clone()
    }

    /// Returns the rows per page.
    ///
    /// Prefers the size the source reported for the page in view, since a
    /// remote API may apply a smaller limit than the one requested.
    pub fn page_size(&self) -> usize {
        self.page
            .page_size()
            .filter(|&size| size > 0)
            .unwrap_or(self.page_size)
    }

    /// Returns the number of pages, computed from the page size.
    pub fn total_pages(&self) -> u32 {
        total_pages(self.page.total_records(), self.page_size())
    }

    /// Returns `true` if navigating forward may yield another page.
    ///
    /// Uses the next-page flag when the source reported one. Otherwise, as
    /// on the placeholder left by a failed load, falls back to the known
    /// page count, and allows moving forward while that count is unknown.
    pub fn has_next_page(&self) -> bool {
        match self.page.has_next() {
            Some(has_next) => has_next,
            None => {
                let total = self.total_pages();
                total == 0 || self.page.page_number() < total
            }
        }
    }

    /// Navigates to `page_number`.
    ///
    /// On failure the view shows an empty page (keeping the last known total
    /// so navigation still works) and the error is returned for display.
    pub async fn on_page_change(&mut self, page_number: u32) -> Result<(), FetchError> {
        let result = {
            let _loading = self.loading.start();
            self.source.fetch_page(page_number).await
        };

        match result {
            Ok(page) => {
                log::debug!(
                    "page {page_number}: {} records of {}",
                    page.len(),
                    page.total_records()
                );
                self.page = page;
                Ok(())
            }
            Err(e) => {
                log::warn!("loading page {page_number} failed: {e}");
                let total = self.page.total_records();
                self.page = Page::empty(page_number.max(1)).with_total_records(total);
                Err(e)
            }
        }
    }

    /// Reloads the page in view.
    pub async fn refresh(&mut self) -> Result<(), FetchError> {
        self.on_page_change(self.page.page_number()).await
    }

    /// Applies a checkbox diff reported by the renderer.
    ///
    /// `visible` is what the renderer showed and `selected` what is checked
    /// among it. Ids outside `visible` keep their membership.
    pub fn on_selection_diff(
        &self,
        visible: &HashSet<ArtworkId>,
        selected: &HashSet<ArtworkId>,
    ) -> Result<(), SelectionError> {
        self.controller.set_from_visible(visible, selected)
    }

    /// Returns the ids on the page in view.
    pub fn visible_ids(&self) -> HashSet<ArtworkId> {
        self.page.ids().collect()
    }

    /// Flips the checkbox of one record.
    pub fn on_toggle(&self, id: ArtworkId) -> Result<bool, SelectionError> {
        self.controller.toggle(id)
    }

    /// Selects the next `k` unselected records, starting from the page in
    /// view.
    pub async fn on_bulk_select_request(
        &self,
        k: usize,
        cancel: &CancellationToken,
    ) -> Result<BulkSelectOutcome, SelectionError> {
        let _loading = self.loading.start();
        self.controller
            .select_many(k, &self.page, &self.source, cancel)
            .await
    }
}

/// Number of pages needed for `total_records` at `page_size` per page.
pub fn total_pages(total_records: usize, page_size: usize) -> u32 {
    let pages = total_records.div_ceil(page_size.max(1));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 8), 0);
        assert_eq!(total_pages(8, 8), 1);
        assert_eq!(total_pages(9, 8), 2);
        assert_eq!(total_pages(129884, 8), 16236);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_loading_guard_clears() {
        let flag = LoadingFlag::default();
        {
            let _guard = flag.start();
            assert!(flag.is_loading());
        }
        assert!(!flag.is_loading());
    }
}
