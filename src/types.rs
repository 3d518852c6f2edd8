//! The serialized gallery state.
//!
//! [`GallerySnapshot`] is the value passed between the in-memory registry and
//! the on-disk store. It is always a copy: the store never holds a reference to
//! live registry state.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Complete serializable state of albums and filter assignments.
///
/// On disk:
///
/// ```json
/// {
///   "albumData": { "default": ["p1.png", "p2.png"] },
///   "imageFilters": { "p2.png": "sepia" }
/// }
/// ```
///
/// Filter names are kept as plain strings here so that a snapshot reads and
/// writes back byte-for-byte, even when it holds a name this build does not
/// recognise. Interpretation happens when the registry is rehydrated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GallerySnapshot {
    /// Album name → ordered image paths, in album creation order.
    #[serde(rename = "albumData", default)]
    pub album_data: IndexMap<String, Vec<String>>,
    /// Image path → filter name. May reference paths that are in no album.
    #[serde(rename = "imageFilters", default)]
    pub image_filters: IndexMap<String, String>,
}

impl GallerySnapshot {
    pub fn is_empty(&self) -> bool {
        self.album_data.is_empty() && self.image_filters.is_empty()
    }
}
