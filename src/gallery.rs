//! The gallery coordinator.
//!
//! [`Gallery`] is the single entry point for UI collaborators. It owns the
//! [`AlbumRegistry`], talks to the [`SnapshotStore`] and the decoding
//! [`ImageBackend`], and keeps the displayed version of every image it has
//! shown.
//!
//! # Write-through
//!
//! Every successful mutation (album/image change, filter, resize) is followed
//! by a save of a fresh snapshot. A failed save is logged and remembered in
//! [`Gallery::last_save_error`]; it never fails the mutation itself, and the
//! in-memory state stays authoritative until a later save succeeds.
//!
//! # Display state
//!
//! Each image shown through the gallery keeps its decoded **source** buffer
//! next to the current display size and the rendered result. Resizing and
//! filtering always re-render from the source:
//!
//! ```text
//! displayed = filter(resize(source, size?), filter_for(path))
//! ```
//!
//! so applying the same filter twice gives the same picture, and choosing
//! `none` brings back the original pixels.
//!
//! # Threading
//!
//! All operations run synchronously on the caller's thread and mutations take
//! `&mut self`. Hosts with several threads should put the gallery behind a
//! `Mutex`.

use crate::config::GalleryConfig;
use crate::imaging::{
    BackendError, Dimensions, Filter, ImageBackend, Interpolation, TransformError, apply_filter,
    render,
};
use crate::registry::AlbumRegistry;
use crate::store::{SnapshotStore, StoreError};
use image::DynamicImage;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error("Could not decode {path}: {source}")]
    Decode { path: String, source: BackendError },
    #[error("Could not export to {}: {source}", .path.display())]
    Export {
        path: PathBuf,
        source: BackendError,
    },
}

/// Settings the coordinator needs from the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GallerySettings {
    pub default_album: String,
    pub interpolation: Interpolation,
}

impl GallerySettings {
    pub fn from_config(config: &GalleryConfig) -> Self {
        Self {
            default_album: config.gallery.default_album.clone(),
            interpolation: config.display.interpolation,
        }
    }
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self::from_config(&GalleryConfig::default())
    }
}

#[derive(Debug)]
struct DisplayState {
    source: DynamicImage,
    size: Option<Dimensions>,
    displayed: DynamicImage,
}

pub struct Gallery<B: ImageBackend> {
    registry: AlbumRegistry,
    store: SnapshotStore,
    backend: B,
    settings: GallerySettings,
    current_album: String,
    display: HashMap<String, DisplayState>,
    last_save_error: Option<StoreError>,
}

impl<B: ImageBackend> Gallery<B> {
    /// Load the stored snapshot and make sure the default album exists.
    ///
    /// The snapshot is only written back when the default album had to be
    /// created.
    pub fn initialize(store: SnapshotStore, backend: B, settings: GallerySettings) -> Self {
        let snapshot = store.load();
        let registry = AlbumRegistry::from_snapshot(&snapshot);
        let mut gallery = Self {
            registry,
            store,
            backend,
            current_album: settings.default_album.clone(),
            settings,
            display: HashMap::new(),
            last_save_error: None,
        };

        if gallery
            .registry
            .create_album_if_not_exists(&gallery.settings.default_album)
        {
            debug!(album = %gallery.settings.default_album, "created default album");
            gallery.persist();
        }

        info!(
            albums = gallery.registry.album_count(),
            images = gallery.registry.image_count(),
            store = %gallery.store.path().display(),
            "gallery ready"
        );
        gallery
    }

    pub fn registry(&self) -> &AlbumRegistry {
        &self.registry
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn list_albums(&self) -> Vec<&str> {
        self.registry.list_albums()
    }

    pub fn images_in(&self, album: &str) -> &[String] {
        self.registry.images_in(album)
    }

    pub fn filter_for(&self, path: &str) -> Filter {
        self.registry.filter_for(path)
    }

    pub fn current_album(&self) -> &str {
        &self.current_album
    }

    /// Move the cursor. The album does not have to exist.
    pub fn set_current_album(&mut self, name: impl Into<String>) {
        self.current_album = name.into();
    }

    /// Images of the current album; empty if it does not exist.
    pub fn current_images(&self) -> &[String] {
        self.registry.images_in(&self.current_album)
    }

    /// The last rendered buffer for `path`, if it has been displayed.
    pub fn displayed(&self, path: &str) -> Option<&DynamicImage> {
        self.display.get(path).map(|state| &state.displayed)
    }

    /// The explicit display size of `path`, if it has been resized.
    pub fn display_size(&self, path: &str) -> Option<Dimensions> {
        self.display.get(path).and_then(|state| state.size)
    }

    /// The save failure still outstanding, if the last save attempt failed.
    pub fn last_save_error(&self) -> Option<&StoreError> {
        self.last_save_error.as_ref()
    }

    // =========================================================================
    // Structural mutations
    // =========================================================================

    pub fn create_album_if_not_exists(&mut self, name: &str) -> bool {
        let created = self.registry.create_album_if_not_exists(name);
        if created {
            self.persist();
        }
        created
    }

    /// Add `path` to `album`, creating the album when needed.
    pub fn add_image(&mut self, album: &str, path: &str) -> bool {
        let added = self.registry.add_image(album, path);
        if added {
            self.persist();
        }
        added
    }

    /// Remove `path` from every album, drop its filter and display state.
    pub fn delete_image(&mut self, path: &str) -> bool {
        self.display.remove(path);
        let removed = self.registry.remove_image(path);
        if removed {
            self.persist();
        }
        removed
    }

    pub fn delete_album(&mut self, name: &str) -> bool {
        let deleted = self.registry.delete_album(name);
        if deleted {
            self.persist();
        }
        deleted
    }

    // =========================================================================
    // Display transforms
    // =========================================================================

    /// Render `path` in its current state (stored filter, current size),
    /// decoding the source on first use.
    pub fn display(&mut self, path: &str) -> Result<&DynamicImage, GalleryError> {
        Ok(&self.load_state(path)?.displayed)
    }

    /// Resize the displayed image of `path`, keeping its filter.
    ///
    /// On error nothing changes and nothing is saved.
    pub fn resize_displayed_image(
        &mut self,
        path: &str,
        width: u32,
        height: u32,
    ) -> Result<&DynamicImage, GalleryError> {
        if width == 0 || height == 0 {
            return Err(TransformError::InvalidDimension { width, height }.into());
        }
        let size = Dimensions { width, height };
        let filter = self.registry.filter_for(path);
        let interpolation = self.settings.interpolation;

        let state = self.load_state(path)?;
        state.displayed = render(&state.source, Some(size), filter, interpolation)?;
        state.size = Some(size);
        debug!(image = %path, %size, %filter, "resized");

        self.persist();
        Ok(&self.display[path].displayed)
    }

    /// Apply the filter called `name` to `path`, keeping its display size.
    ///
    /// An unknown name fails with [`TransformError::UnknownFilter`] before
    /// anything is decoded; the image keeps its previous filter.
    pub fn apply_filter_to(
        &mut self,
        path: &str,
        name: &str,
    ) -> Result<&DynamicImage, GalleryError> {
        let filter: Filter = name.parse()?;
        let interpolation = self.settings.interpolation;

        let state = self.load_state(path)?;
        state.displayed = render(&state.source, state.size, filter, interpolation)?;
        self.registry.set_filter(path, filter);
        debug!(image = %path, %filter, "filter applied");

        self.persist();
        Ok(&self.display[path].displayed)
    }

    /// Write the current display of `path` to `output`.
    pub fn export_displayed(&mut self, path: &str, output: &Path) -> Result<(), GalleryError> {
        self.load_state(path)?;
        let displayed = &self.display[path].displayed;
        self.backend
            .save(displayed, output)
            .map_err(|source| GalleryError::Export {
                path: output.to_path_buf(),
                source,
            })
    }

    /// Save now. Returns `true` on success; on failure the error is kept in
    /// [`last_save_error`](Self::last_save_error).
    pub fn flush(&mut self) -> bool {
        self.persist();
        self.last_save_error.is_none()
    }

    fn load_state(&mut self, path: &str) -> Result<&mut DisplayState, GalleryError> {
        let filter = self.registry.filter_for(path);
        match self.display.entry(path.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let source =
                    self.backend
                        .decode(Path::new(path))
                        .map_err(|source| GalleryError::Decode {
                            path: path.to_string(),
                            source,
                        })?;
                debug!(image = %path, size = %Dimensions::of(&source), "decoded source");
                let displayed = apply_filter(&source, filter);
                Ok(entry.insert(DisplayState {
                    source,
                    size: None,
                    displayed,
                }))
            }
        }
    }

    fn persist(&mut self) {
        match self.store.save(&self.registry.snapshot()) {
            Ok(()) => {
                if self.last_save_error.take().is_some() {
                    info!("snapshot saved after earlier failure");
                }
            }
            Err(e) => {
                error!("{e}; keeping in-memory gallery until the next save");
                self.last_save_error = Some(e);
            }
        }
    }
}
