//! Parameter types for display transforms.
//!
//! These types describe *what* to do to a displayed image, not *how*. The
//! [`operations`](super::operations) module turns them into pixel work.
//!
//! ## Types
//!
//! - [`Filter`]: Named color filter (`none`, `grayscale`, `sepia`, `invert`).
//! - [`Interpolation`]: Resampling kernel used by resize. Always a smooth one.
//! - [`parse_dimensions`]: `"WIDTHxHEIGHT"` parser for callers collecting sizes from users.

use super::backend::Dimensions;
use super::operations::TransformError;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named color filter applied to a displayed image.
///
/// Names are the lowercase strings stored in the snapshot file. Parsing is
/// case-sensitive: `"Sepia"` is an unknown filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    #[default]
    None,
    Grayscale,
    Sepia,
    Invert,
}

impl Filter {
    pub const ALL: [Filter; 4] = [
        Filter::None,
        Filter::Grayscale,
        Filter::Sepia,
        Filter::Invert,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Filter::None => "none",
            Filter::Grayscale => "grayscale",
            Filter::Sepia => "sepia",
            Filter::Invert => "invert",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Filter {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Filter::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| TransformError::UnknownFilter(s.to_string()))
    }
}

/// Resampling kernel for resize.
///
/// Nearest-neighbour is deliberately absent: displayed images are always
/// smooth-interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Interpolation {
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl Interpolation {
    pub fn filter_type(self) -> FilterType {
        match self {
            Interpolation::Triangle => FilterType::Triangle,
            Interpolation::CatmullRom => FilterType::CatmullRom,
            Interpolation::Gaussian => FilterType::Gaussian,
            Interpolation::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Parse a `"WIDTHxHEIGHT"` size string, e.g. `"150x150"`.
///
/// Both sides must be positive integers. Usable directly as a clap
/// `value_parser`.
pub fn parse_dimensions(s: &str) -> Result<Dimensions, String> {
    let (w, h) = s
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let width: u32 = w
        .parse()
        .map_err(|_| format!("invalid width '{w}' in '{s}'"))?;
    let height: u32 = h
        .parse()
        .map_err(|_| format!("invalid height '{h}' in '{s}'"))?;
    if width == 0 || height == 0 {
        return Err(format!("dimensions must be positive, got '{s}'"));
    }
    Ok(Dimensions { width, height })
}
