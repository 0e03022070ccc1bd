//! Artwork record type

use serde::Deserialize;
use serde::Serialize;

/// Unique identifier of an artwork in the remote collection.
pub type ArtworkId = u64;

/// Fields requested from the API; matches the columns of [`Artwork`].
pub const ARTWORK_FIELDS: &[&str] = &[
    "id",
    "title",
    "place_of_origin",
    "artist_display",
    "inscriptions",
    "date_start",
    "date_end",
];

/// A single artwork entry.
///
/// Identity is [`id`](Self::id) alone. Every other field is for display and
/// may be null in the remote data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    /// Unique identifier.
    pub id: ArtworkId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub place_of_origin: Option<String>,
    #[serde(default)]
    pub artist_display: Option<String>,
    #[serde(default)]
    pub inscriptions: Option<String>,
    #[serde(default)]
    pub date_start: Option<i32>,
    #[serde(default)]
    pub date_end: Option<i32>,
}

impl Artwork {
    /// Creates an artwork with only an identifier set.
    pub fn new(id: ArtworkId) -> Self {
        Self {
            id,
            title: None,
            place_of_origin: None,
            artist_display: None,
            inscriptions: None,
            date_start: None,
            date_end: None,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Returns the title, or an empty string if the API had none.
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }
}
