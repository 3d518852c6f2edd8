//! Display transforms: resize and color filters.
//!
//! Every function here takes the *source* buffer and returns a new buffer;
//! nothing is modified in place. Callers that want "resized and filtered"
//! go through [`render`], which always starts again from the source so that
//! repeated or switched filters never compound.

use super::backend::Dimensions;
use super::calculations::{Channel, grayscale, sepia};
use super::params::{Filter, Interpolation};
use image::{DynamicImage, ImageBuffer, Pixel, Rgba};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error("Invalid dimension {width}x{height}: width and height must be positive")]
    InvalidDimension { width: u32, height: u32 },
    #[error("Unknown filter '{0}' (expected none, grayscale, sepia or invert)")]
    UnknownFilter(String),
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;

/// Resize to exactly `width` x `height`, ignoring the source aspect ratio.
pub fn resize(
    source: &DynamicImage,
    width: u32,
    height: u32,
    interpolation: Interpolation,
) -> Result<DynamicImage> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidDimension { width, height });
    }
    Ok(source.resize_exact(width, height, interpolation.filter_type()))
}

/// Apply a filter to a copy of `source`.
///
/// RGBA buffers keep their channel depth. Other layouts are promoted to RGBA
/// of the matching depth first (8-bit, 16-bit or float), so the output of any
/// filter other than `none` is always an RGBA variant.
pub fn apply_filter(source: &DynamicImage, filter: Filter) -> DynamicImage {
    if filter == Filter::None {
        return source.clone();
    }
    match source {
        DynamicImage::ImageRgba8(buf) => DynamicImage::ImageRgba8(filter_buffer(buf, filter)),
        DynamicImage::ImageRgba16(buf) => DynamicImage::ImageRgba16(filter_buffer(buf, filter)),
        DynamicImage::ImageRgba32F(buf) => DynamicImage::ImageRgba32F(filter_buffer(buf, filter)),
        DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_) => {
            DynamicImage::ImageRgba16(filter_buffer(&source.to_rgba16(), filter))
        }
        DynamicImage::ImageRgb32F(_) => {
            DynamicImage::ImageRgba32F(filter_buffer(&source.to_rgba32f(), filter))
        }
        _ => DynamicImage::ImageRgba8(filter_buffer(&source.to_rgba8(), filter)),
    }
}

/// Parse `name` and apply the filter. Fails with
/// [`TransformError::UnknownFilter`] for unrecognized names.
pub fn apply_named_filter(source: &DynamicImage, name: &str) -> Result<DynamicImage> {
    let filter: Filter = name.parse()?;
    Ok(apply_filter(source, filter))
}

/// Compute the displayed buffer from the source: optional resize, then filter.
pub fn render(
    source: &DynamicImage,
    size: Option<Dimensions>,
    filter: Filter,
    interpolation: Interpolation,
) -> Result<DynamicImage> {
    match size {
        Some(dims) => {
            let resized = resize(source, dims.width, dims.height, interpolation)?;
            Ok(apply_filter(&resized, filter))
        }
        None => Ok(apply_filter(source, filter)),
    }
}

fn filter_buffer<T: Channel>(
    source: &ImageBuffer<Rgba<T>, Vec<T>>,
    filter: Filter,
) -> ImageBuffer<Rgba<T>, Vec<T>>
where
    Rgba<T>: Pixel<Subpixel = T>,
{
    let mut out = source.clone();
    let max = T::channel_max();
    for pixel in out.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let rgb = [r, g, b];
        let [r, g, b] = match filter {
            Filter::None => rgb,
            Filter::Invert => rgb.map(|c| T::DEFAULT_MAX_VALUE - c),
            Filter::Grayscale => grayscale(rgb.map(T::to_working)).map(T::from_working),
            Filter::Sepia => sepia(rgb.map(T::to_working), max).map(T::from_working),
        };
        pixel.0 = [r, g, b, a];
    }
    out
}
