//! Bulk selection configuration

use std::time::Duration;

/// Configuration for [`SelectionController::select_many`](super::SelectionController::select_many).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use artworks_lib::selection::SelectionConfig;
///
/// let config = SelectionConfig::default()
///     .fetch_timeout(Duration::from_secs(10))
///     .max_pages(50);
///
/// assert_eq!(config.max_pages, Some(50));
/// ```
#[derive(Debug, Clone)]
pub struct SelectionConfig {
    /// Upper bound on a single page fetch.
    ///
    /// Default: 30 seconds
    pub fetch_timeout: Duration,

    /// Maximum number of pages one bulk select may fetch beyond the page in
    /// view. `None` means unbounded.
    ///
    /// Default: `None`
    pub max_pages: Option<u32>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(30),
            max_pages: None,
        }
    }
}

impl SelectionConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-fetch timeout.
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Caps the number of pages fetched per bulk select.
    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }
}
