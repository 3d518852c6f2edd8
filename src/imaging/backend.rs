//! Image decoding backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the boundary to whatever turns a stored image
//! path into pixels. The gallery never parses file formats itself: it asks the
//! backend for a decoded buffer and runs display transforms on that.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate's pure-Rust decoders.

use image::DynamicImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Pixel dimensions of a buffer or a resize target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn of(image: &DynamicImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
        }
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Trait for decoding collaborators.
pub trait ImageBackend {
    /// Decode the image stored at `path` into a pixel buffer.
    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError>;

    /// Write a displayed buffer to `path`, format inferred from the extension.
    fn save(&self, image: &DynamicImage, path: &Path) -> Result<(), BackendError>;
}
