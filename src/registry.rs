//! In-memory album catalog.
//!
//! [`AlbumRegistry`] owns the album collection and the per-image filter
//! assignments for the lifetime of the process. Structural operations never
//! fail: a request that would break an invariant (blank name, duplicate album,
//! duplicate path) is absorbed as a no-op and reported through the `bool`
//! return value.
//!
//! ## Invariants
//!
//! - Album names are unique (exact, case-sensitive match) and never blank.
//! - Within one album, an image path appears at most once.
//! - Albums and their images keep insertion order.
//!
//! Filter assignments are keyed by image path and are allowed to outlive the
//! image's album membership. Such dangling entries are kept, not pruned.

use crate::imaging::Filter;
use crate::types::GallerySnapshot;
use indexmap::IndexMap;
use tracing::warn;

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlbumRegistry {
    albums: IndexMap<String, Vec<String>>,
    filters: IndexMap<String, Filter>,
}

impl AlbumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a registry from a loaded snapshot.
    ///
    /// Hand-edited files are tolerated: blank album names are skipped,
    /// duplicate paths within an album are collapsed, and filter names this
    /// build does not know are dropped (the image then displays unfiltered).
    pub fn from_snapshot(snapshot: &GallerySnapshot) -> Self {
        let mut registry = Self::new();
        for (name, paths) in &snapshot.album_data {
            if !registry.create_album_if_not_exists(name) {
                warn!(album = %name, "skipping blank or repeated album name in snapshot");
                continue;
            }
            for path in paths {
                registry.add_image(name, path);
            }
        }
        for (path, name) in &snapshot.image_filters {
            match name.parse::<Filter>() {
                Ok(filter) => registry.set_filter(path, filter),
                Err(e) => warn!(image = %path, "ignoring stored filter: {e}"),
            }
        }
        registry
    }

    /// Copy the current state out as a snapshot.
    pub fn snapshot(&self) -> GallerySnapshot {
        GallerySnapshot {
            album_data: self.albums.clone(),
            image_filters: self
                .filters
                .iter()
                .map(|(path, filter)| (path.clone(), filter.name().to_string()))
                .collect(),
        }
    }

    /// Create an empty album. Returns `false` without changing anything if
    /// `name` is blank or an album with that exact name already exists.
    pub fn create_album_if_not_exists(&mut self, name: &str) -> bool {
        if is_blank(name) || self.albums.contains_key(name) {
            return false;
        }
        self.albums.insert(name.to_string(), Vec::new());
        true
    }

    /// Append `path` to `album`, creating the album if needed (upsert).
    ///
    /// Returns `true` if the path was appended; `false` if it was already a
    /// member, or if either argument is blank.
    pub fn add_image(&mut self, album: &str, path: &str) -> bool {
        if is_blank(album) || is_blank(path) {
            return false;
        }
        let images = self.albums.entry(album.to_string()).or_default();
        if images.iter().any(|p| p == path) {
            return false;
        }
        images.push(path.to_string());
        true
    }

    /// Remove `path` from every album and drop its filter assignment.
    ///
    /// Returns `true` if anything was removed.
    pub fn remove_image(&mut self, path: &str) -> bool {
        let mut removed = false;
        for images in self.albums.values_mut() {
            let before = images.len();
            images.retain(|p| p != path);
            removed |= images.len() != before;
        }
        removed |= self.filters.shift_remove(path).is_some();
        removed
    }

    /// Delete an album. Filter assignments of its images stay.
    pub fn delete_album(&mut self, name: &str) -> bool {
        self.albums.shift_remove(name).is_some()
    }

    /// Album names in creation order.
    pub fn list_albums(&self) -> Vec<&str> {
        self.albums.keys().map(String::as_str).collect()
    }

    pub fn contains_album(&self, name: &str) -> bool {
        self.albums.contains_key(name)
    }

    /// Images of `album` in insertion order; empty for unknown albums.
    pub fn images_in(&self, album: &str) -> &[String] {
        self.albums.get(album).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Albums containing `path`, in album order.
    pub fn albums_containing(&self, path: &str) -> Vec<&str> {
        self.albums
            .iter()
            .filter(|(_, images)| images.iter().any(|p| p == path))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Assign a filter to an image path. `Filter::None` is stored explicitly.
    pub fn set_filter(&mut self, path: &str, filter: Filter) {
        self.filters.insert(path.to_string(), filter);
    }

    /// The filter assigned to `path`, or `Filter::None` if unassigned.
    pub fn filter_for(&self, path: &str) -> Filter {
        self.filters.get(path).copied().unwrap_or_default()
    }

    pub fn album_count(&self) -> usize {
        self.albums.len()
    }

    /// Number of distinct image paths across all albums.
    pub fn image_count(&self) -> usize {
        let mut seen = std::collections::HashSet::new();
        self.albums
            .values()
            .flatten()
            .filter(|p| seen.insert(p.as_str()))
            .count()
    }
}
