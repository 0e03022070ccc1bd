//! Selection controller with cross-page bulk selection.

use std::collections::HashSet;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use tokio_util::sync::CancellationToken;

use super::SelectionConfig;
use super::SelectionSet;
use crate::api::Page;
use crate::api::PageSource;
use crate::api::Pages;
use crate::error::SelectionError;
use crate::model::ArtworkId;

/// State of the bulk-select workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BulkSelectState {
    #[default]
    Idle,
    Selecting,
}

/// Result of a bulk select that ran to completion or exhaustion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkSelectOutcome {
    /// Number of records asked for.
    pub requested: usize,
    /// Number of records newly selected.
    pub added: usize,
    /// Pages fetched beyond the starting page.
    pub pages_fetched: u32,
    /// The collection (or the page cap) ran out before `requested` was met.
    pub exhausted: bool,
}

impl BulkSelectOutcome {
    fn new(requested: usize) -> Self {
        Self {
            requested,
            added: 0,
            pages_fetched: 0,
            exhausted: false,
        }
    }

    /// Returns `true` if exactly `requested` records were added.
    pub fn is_complete(&self) -> bool {
        self.added == self.requested
    }
}

/// Owns the [`SelectionSet`] and applies every selection action to it.
///
/// Cheap to clone; clones share the same selection. While a bulk select is
/// in flight the controller is in [`BulkSelectState::Selecting`] and all
/// other mutations are rejected with [`SelectionError::Busy`], so the set
/// only ever has one writer.
#[derive(Clone, Default)]
pub struct SelectionController {
    inner: Arc<ControllerInner>,
}

#[derive(Default)]
struct ControllerInner {
    selection: Mutex<SelectionSet>,
    /// Only changed while `selection` is locked.
    selecting: AtomicBool,
    config: SelectionConfig,
}

impl SelectionController {
    /// Creates a controller with an empty selection and default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a controller with an empty selection.
    pub fn with_config(config: SelectionConfig) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                selection: Mutex::new(SelectionSet::new()),
                selecting: AtomicBool::new(false),
                config,
            }),
        }
    }

    /// Returns the bulk selection config.
    pub fn config(&self) -> &SelectionConfig {
        &self.inner.config
    }

    /// Returns the current workflow state.
    pub fn state(&self) -> BulkSelectState {
        if self.is_selecting() {
            BulkSelectState::Selecting
        } else {
            BulkSelectState::Idle
        }
    }

    /// Returns `true` while a bulk select is in flight.
    pub fn is_selecting(&self) -> bool {
        self.inner.selecting.load(Ordering::Acquire)
    }

    /// Flips membership of `id`. Returns the new membership.
    pub fn toggle(&self, id: ArtworkId) -> Result<bool, SelectionError> {
        let mut selection = self.lock_idle()?;
        Ok(selection.toggle(id))
    }

    /// Reconciles the selection against the page in view.
    ///
    /// See [`SelectionSet::set_from_visible`].
    pub fn set_from_visible(
        &self,
        visible: &HashSet<ArtworkId>,
        selected_in_view: &HashSet<ArtworkId>,
    ) -> Result<(), SelectionError> {
        let mut selection = self.lock_idle()?;
        selection.set_from_visible(visible, selected_in_view);
        Ok(())
    }

    /// Deselects everything.
    pub fn clear(&self) -> Result<(), SelectionError> {
        self.lock_idle()?.clear();
        Ok(())
    }

    /// Returns `true` if `id` is selected.
    pub fn contains(&self, id: ArtworkId) -> bool {
        self.lock().contains(id)
    }

    /// Returns the number of selected ids.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns a copy of the current selection.
    pub fn snapshot(&self) -> SelectionSet {
        self.lock().clone()
    }

    /// Returns the selected ids among `visible`.
    pub fn selected_in<I>(&self, visible: I) -> HashSet<ArtworkId>
    where
        I: IntoIterator<Item = ArtworkId>,
    {
        self.lock().intersection(visible)
    }

    /// Selects the next `k` unselected records.
    ///
    /// Scans `starting_page` in display order, then fetches the following
    /// pages from `source` one at a time until `k` new records are selected,
    /// the collection runs out, or the configured page cap is reached.
    /// Running out is reported through [`BulkSelectOutcome::exhausted`],
    /// not as an error.
    ///
    /// The selection only grows. On a fetch failure or cancellation the
    /// records already added stay selected and the error reports how many
    /// there were. Each fetch is bounded by
    /// [`SelectionConfig::fetch_timeout`].
    pub async fn select_many<S>(
        &self,
        k: usize,
        starting_page: &Page,
        source: &S,
        cancel: &CancellationToken,
    ) -> Result<BulkSelectOutcome, SelectionError>
    where
        S: PageSource + ?Sized,
    {
        let mut outcome = BulkSelectOutcome::new(k);
        let _guard = self.begin_selecting()?;
        if k == 0 {
            return Ok(outcome);
        }

        log::info!(
            "bulk select of {k} records starting at page {}",
            starting_page.page_number()
        );

        outcome.added = self.select_from(starting_page, k, 0);

        let config = &self.inner.config;
        let mut pages = Pages::after(source, starting_page).fetch_timeout(config.fetch_timeout);
        if let Some(max_pages) = config.max_pages {
            pages = pages.max_pages(max_pages);
        }

        while !outcome.is_complete() {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    log::info!("bulk select cancelled after {} records", outcome.added);
                    return Err(SelectionError::Cancelled { added: outcome.added });
                }
                next = pages.next() => next,
            };

            match next {
                Some(Ok(page)) => {
                    outcome.added = self.select_from(&page, k, outcome.added);
                }
                Some(Err(error)) => {
                    return Err(SelectionError::Fetch {
                        added: outcome.added,
                        source: error,
                    });
                }
                None => {
                    outcome.exhausted = true;
                    break;
                }
            }
        }

        outcome.pages_fetched = pages.fetched();
        log::info!(
            "bulk select finished: {} of {k} records over {} fetched pages{}",
            outcome.added,
            outcome.pages_fetched,
            if outcome.exhausted { " (exhausted)" } else { "" }
        );

        Ok(outcome)
    }

    /// Adds unselected records of `page` until `added` reaches `k`.
    fn select_from(&self, page: &Page, k: usize, mut added: usize) -> usize {
        let mut selection = self.lock();
        for id in page.ids() {
            if added >= k {
                break;
            }
            if selection.insert(id) {
                added += 1;
            }
        }
        added
    }

    fn begin_selecting(&self) -> Result<SelectingGuard<'_>, SelectionError> {
        let _selection = self.lock();
        self.inner
            .selecting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SelectionError::Busy)?;
        Ok(SelectingGuard {
            selecting: &self.inner.selecting,
        })
    }

    fn lock(&self) -> MutexGuard<'_, SelectionSet> {
        self.inner
            .selection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Locks the selection for a manual edit.
    fn lock_idle(&self) -> Result<MutexGuard<'_, SelectionSet>, SelectionError> {
        let selection = self.lock();
        if self.inner.selecting.load(Ordering::Acquire) {
            return Err(SelectionError::Busy);
        }
        Ok(selection)
    }
}

/// Returns the controller to idle when a bulk select ends or is dropped.
struct SelectingGuard<'a> {
    selecting: &'a AtomicBool,
}

impl Drop for SelectingGuard<'_> {
    fn drop(&mut self) {
        self.selecting.store(false, Ordering::Release);
    }
}
