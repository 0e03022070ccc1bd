//! Selection error types

use super::FetchError;

/// Errors returned by [`SelectionController`](crate::selection::SelectionController).
///
/// Variants that carry `added` report how many records had already been
/// selected when the operation stopped. Those selections are kept.
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    /// A bulk select is already in progress.
    #[error("a bulk selection is already in progress")]
    Busy,

    /// The bulk select was cancelled.
    #[error("bulk selection cancelled after {added} records")]
    Cancelled {
        /// Records selected before cancellation.
        added: usize,
    },

    /// A page fetch failed during a bulk select.
    #[error("bulk selection stopped after {added} records: {source}")]
    Fetch {
        /// Records selected before the failure.
        added: usize,
        /// The underlying fetch error.
        #[source]
        source: FetchError,
    },
}

impl SelectionError {
    /// Returns how many records were selected before the operation stopped.
    pub fn added(&self) -> usize {
        match self {
            Self::Busy => 0,
            Self::Cancelled { added } | Self::Fetch { added, .. } => *added,
        }
    }
}
