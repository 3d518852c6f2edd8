//! Pure color math for display filters.
//!
//! All functions here are pure and testable without any I/O or images.
//! Channel values are handled as `f64` in the channel's own range
//! (`0..=255` for 8-bit, `0..=65535` for 16-bit, `0.0..=1.0` for float);
//! the [`Channel`] trait converts to and from the stored representation.

use image::Primitive;

/// Rec. 601 luma weights for (R, G, B).
pub const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

/// Sepia matrix, one row per output channel.
pub const SEPIA_MATRIX: [[f64; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// A pixel channel type the filters know how to read and write.
pub trait Channel: Primitive + 'static {
    fn to_working(self) -> f64;

    /// Convert back from the working range, clamping to `0..=max`.
    fn from_working(value: f64) -> Self;

    fn channel_max() -> f64 {
        Self::DEFAULT_MAX_VALUE.to_working()
    }
}

impl Channel for u8 {
    fn to_working(self) -> f64 {
        self as f64
    }

    fn from_working(value: f64) -> Self {
        value.round().clamp(0.0, u8::MAX as f64) as u8
    }
}

impl Channel for u16 {
    fn to_working(self) -> f64 {
        self as f64
    }

    fn from_working(value: f64) -> Self {
        value.round().clamp(0.0, u16::MAX as f64) as u16
    }
}

impl Channel for f32 {
    fn to_working(self) -> f64 {
        self as f64
    }

    fn from_working(value: f64) -> Self {
        value.clamp(0.0, 1.0) as f32
    }
}

/// Luminance-weighted average of an RGB triple.
///
/// # Examples
/// ```
/// # use picshelf::imaging::calculations::luminance;
/// assert_eq!(luminance([255.0, 255.0, 255.0]).round(), 255.0);
/// assert_eq!(luminance([0.0, 0.0, 0.0]), 0.0);
/// ```
pub fn luminance(rgb: [f64; 3]) -> f64 {
    rgb.iter().zip(LUMA_WEIGHTS).map(|(c, w)| c * w).sum()
}

/// Grayscale: every color channel becomes the luminance.
pub fn grayscale(rgb: [f64; 3]) -> [f64; 3] {
    let y = luminance(rgb);
    [y, y, y]
}

/// Sepia tone, clamped to `max`.
pub fn sepia(rgb: [f64; 3], max: f64) -> [f64; 3] {
    SEPIA_MATRIX.map(|row| {
        let v: f64 = row.iter().zip(rgb).map(|(k, c)| k * c).sum();
        v.min(max)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luma_weights_sum_to_one() {
        let sum: f64 = LUMA_WEIGHTS.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn luminance_pure_channels() {
        assert!((luminance([255.0, 0.0, 0.0]) - 76.245).abs() < 1e-9);
        assert!((luminance([0.0, 255.0, 0.0]) - 149.685).abs() < 1e-9);
        assert!((luminance([0.0, 0.0, 255.0]) - 29.07).abs() < 1e-9);
    }

    #[test]
    fn grayscale_gray_input_is_unchanged() {
        let out = grayscale([128.0, 128.0, 128.0]);
        for c in out {
            assert!((c - 128.0).abs() < 1e-9);
        }
    }

    #[test]
    fn sepia_mid_gray() {
        // 100 * (0.393 + 0.769 + 0.189) = 135.1, etc.
        let [r, g, b] = sepia([100.0, 100.0, 100.0], 255.0);
        assert!((r - 135.1).abs() < 1e-9);
        assert!((g - 120.3).abs() < 1e-9);
        assert!((b - 93.7).abs() < 1e-9);
    }

    #[test]
    fn sepia_clamps_to_max() {
        let [r, g, b] = sepia([255.0, 255.0, 255.0], 255.0);
        assert_eq!(r, 255.0);
        assert_eq!(g, 255.0);
        // 255 * 0.937 = 238.935, under the clamp
        assert!((b - 238.935).abs() < 1e-9);
    }

    #[test]
    fn u8_channel_rounds_and_clamps() {
        assert_eq!(u8::from_working(135.1), 135);
        assert_eq!(u8::from_working(135.5), 136);
        assert_eq!(u8::from_working(300.0), 255);
        assert_eq!(u8::from_working(-4.0), 0);
        assert_eq!(u8::channel_max(), 255.0);
    }

    #[test]
    fn u16_and_f32_channel_ranges() {
        assert_eq!(u16::channel_max(), 65535.0);
        assert_eq!(u16::from_working(70000.0), u16::MAX);
        assert_eq!(f32::channel_max(), 1.0);
        assert_eq!(f32::from_working(1.5), 1.0);
        assert_eq!(f32::from_working(0.25), 0.25);
    }
}
