//! Crop geometry: fractional edge crops, post-crop sizes, and pixel rects.
//!
//! Pure geometry. Every function here is a side-effect-free computation on
//! its inputs and is safe to call from any number of threads.
//!
//! # Example
//!
//! ```
//! use imgurl::{Crop, Rect, Size, crop_rect, cropped_size};
//!
//! let source = Size::new(2000, 1000);
//! let crop = Crop::new(0.15, 0.1, 0.25, 0.05);
//!
//! assert_eq!(cropped_size(source, &crop).unwrap(), Size::new(1300, 800));
//! assert_eq!(crop_rect(source, &crop).unwrap(), Rect::new(200, 150, 1300, 800));
//! assert_eq!(crop_rect(source, &crop).unwrap().to_string(), "200,150,1300,800");
//! ```

use core::fmt;

use num_traits::Float;

use crate::error::Error;

/// Width × height in pixels.
///
/// The aspect ratio is always derived from the two axes, never stored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `width / height`.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Fraction of the source trimmed from each edge.
///
/// Each value is in `0.0..1.0` of the corresponding source axis. Opposing
/// edges must together trim less than the whole axis (`left + right < 1`,
/// `top + bottom < 1`); anything else is rejected with
/// [`Error::InvalidCrop`] rather than clamped.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crop {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Crop {
    /// Create a crop from its edge fractions (top, left, right, bottom).
    pub const fn new(top: f64, left: f64, right: f64, bottom: f64) -> Self {
        Self {
            top,
            left,
            right,
            bottom,
        }
    }

    /// Fraction of the source width that survives the crop.
    pub fn remaining_x(&self) -> f64 {
        1.0 - self.left - self.right
    }

    /// Fraction of the source height that survives the crop.
    pub fn remaining_y(&self) -> f64 {
        1.0 - self.top - self.bottom
    }

    /// Whether opposing edges leave a non-empty region.
    pub fn is_valid(&self) -> bool {
        self.left + self.right < 1.0 && self.top + self.bottom < 1.0
    }
}

/// Focal point in source-relative coordinates, `(0.0, 0.0)` = top-left,
/// `(1.0, 1.0)` = bottom-right.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hotspot {
    pub x: f64,
    pub y: f64,
}

impl Hotspot {
    /// Create a hotspot.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in source pixel coordinates.
///
/// Displays as `x,y,w,h`, the form the CDN's `rect` parameter takes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether this rect lies inside `(0, 0, max_w, max_h)`.
    pub fn fits_within(&self, max_w: u32, max_h: u32) -> bool {
        self.x as u64 + self.width as u64 <= max_w as u64
            && self.y as u64 + self.height as u64 <= max_h as u64
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.width, self.height)
    }
}

/// Dimensions of `source` after trimming `crop`.
///
/// Each axis is rounded to the nearest pixel independently.
pub fn cropped_size(source: Size, crop: &Crop) -> Result<Size, Error> {
    if !crop.is_valid() {
        return Err(Error::InvalidCrop { crop: *crop });
    }
    Ok(Size::new(
        round_px(source.width as f64 * crop.remaining_x()),
        round_px(source.height as f64 * crop.remaining_y()),
    ))
}

/// Pixel-space rectangle for `crop` on `source`.
///
/// Offsets and extents are rounded independently, so the far edge may
/// drift by a pixel from an exact crop.
pub fn crop_rect(source: Size, crop: &Crop) -> Result<Rect, Error> {
    let size = cropped_size(source, crop)?;
    Ok(Rect::new(
        round_px(crop.left * source.width as f64),
        round_px(crop.top * source.height as f64),
        size.width,
        size.height,
    ))
}

/// Round to the nearest pixel, halves away from zero. Negative and NaN
/// inputs saturate to 0.
pub(crate) fn round_px(v: f64) -> u32 {
    Float::round(v) as u32
}

/// Round to `1 / scale` precision, halves away from zero.
pub(crate) fn round_to(v: f64, scale: f64) -> f64 {
    Float::round(v * scale) / scale
}
