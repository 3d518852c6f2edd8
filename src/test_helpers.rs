//! Shared test utilities for the picshelf test suite.
//!
//! Synthetic pixel buffers for the imaging tests, and a throwaway snapshot
//! store for the coordinator tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let (_tmp, store) = temp_store();
//! let backend = MockBackend::with_images(vec![("p1.png", gradient_image(40, 30))]);
//! let gallery = Gallery::initialize(store.clone(), backend, GallerySettings::default());
//!
//! assert_eq!(read_snapshot_json(&store)["albumData"]["default"], json!([]));
//! ```

use image::{DynamicImage, Rgba, RgbaImage};
use tempfile::TempDir;

use crate::store::SnapshotStore;

// =========================================================================
// Pixel buffers
// =========================================================================

/// An RGBA8 image where every pixel differs from its neighbours.
///
/// Red runs along x, green along y, blue along the diagonal, and alpha varies
/// so tests can check it survives filtering.
pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    let buf = RgbaImage::from_fn(width, height, |x, y| {
        let r = (x * 255 / width.max(2).saturating_sub(1)).min(255) as u8;
        let g = (y * 255 / height.max(2).saturating_sub(1)).min(255) as u8;
        let b = ((x + y) * 37 % 256) as u8;
        let a = 128 + ((x * 7 + y * 13) % 128) as u8;
        Rgba([r, g, b, a])
    });
    DynamicImage::ImageRgba8(buf)
}

/// A 2x2 RGBA8 image filled with a single colour.
pub fn solid_image(rgba: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba(rgba)))
}

// =========================================================================
// Snapshot store
// =========================================================================

/// A store inside a fresh temp directory. Keep the `TempDir` alive for the
/// duration of the test.
pub fn temp_store() -> (TempDir, SnapshotStore) {
    let tmp = TempDir::new().unwrap();
    let store = SnapshotStore::in_dir(tmp.path());
    (tmp, store)
}

/// The snapshot file as raw JSON. Panics if it is missing or unparseable.
pub fn read_snapshot_json(store: &SnapshotStore) -> serde_json::Value {
    let content = std::fs::read_to_string(store.path()).unwrap_or_else(|e| {
        panic!("snapshot {} not readable: {e}", store.path().display())
    });
    serde_json::from_str(&content).unwrap_or_else(|e| {
        panic!("snapshot {} is not JSON: {e}", store.path().display())
    })
}
