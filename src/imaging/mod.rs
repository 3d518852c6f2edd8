//! Image transforms in pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (via [`RustBackend`]) |
//! | **Resize** | `DynamicImage::resize_exact`, smooth kernel (Lanczos3 default) |
//! | **Filters** | per-pixel color math on RGBA buffers of any channel depth |
//!
//! The module is split into:
//! - **Calculations**: Pure color math (unit testable)
//! - **Parameters**: Filter names, interpolation kernels, size parsing
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: Buffer-level resize / filter / render

pub mod backend;
pub mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use operations::{TransformError, apply_filter, apply_named_filter, render, resize};
pub use params::{Filter, Interpolation, parse_dimensions};
pub use rust_backend::{RustBackend, is_supported_image};
