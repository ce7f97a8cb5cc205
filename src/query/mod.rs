//! CDN query parameters: the resolved record, caller passthrough params,
//! and their query string form.
//!
//! [`QueryParams`] is what the resolver produces. Fields the resolver owns
//! (`w`, `h`, `fit`, `rect`, `crop`, `fp-x`, `fp-y`, `auto`) are typed so
//! that exactly one fit-affecting combination can be expressed:
//! `fit=max`, or `fit=crop` (with `h` when a height survives clamping) plus
//! either a focal point or `crop=entropy`.
//!
//! # Example
//!
//! ```
//! use imgurl::query::{Passthrough, ParseWarning};
//!
//! let result = Passthrough::parse("blur=20&flip=hv&w=300");
//! assert_eq!(result.params.blur, Some(20));
//! assert!(matches!(
//!     result.warnings.as_slice(),
//!     [ParseWarning::KeyReserved { key, .. }] if key == "w"
//! ));
//! ```

mod encode;
mod parse;

pub use encode::encode_query;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::geometry::{Rect, Size};

/// Quality sent when the caller does not override `q`.
pub const DEFAULT_QUALITY: u8 = 75;

/// Focal point coordinates are rounded to this many steps per unit
/// (3 decimal places).
pub const FOCAL_POINT_PRECISION: f64 = 1000.0;

/// Mirror the image. Maps to the `flip` parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Flip {
    /// Horizontal.
    H,
    /// Vertical.
    V,
    /// Both axes.
    Hv,
}

impl Flip {
    /// Parameter value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::H => "h",
            Self::V => "v",
            Self::Hv => "hv",
        }
    }
}

impl fmt::Display for Flip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Explicit output format. Maps to the `fm` parameter and disables
/// `auto=format` negotiation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OutputFormat {
    Jpg,
    /// Progressive JPEG.
    Pjpg,
    Png,
    Webp,
}

impl OutputFormat {
    /// Parameter value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Pjpg => "pjpg",
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters forwarded to the CDN as-is.
///
/// `q` overrides [`DEFAULT_QUALITY`]; setting `fm` suppresses
/// `auto=format`. None of these can touch the resolver-owned fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Passthrough {
    /// Blur radius, 1–2000.
    pub blur: Option<u32>,
    pub flip: Option<Flip>,
    pub fm: Option<OutputFormat>,
    /// Quality, 0–100.
    pub q: Option<u8>,
    /// Saturation. The CDN only honors `-100` (grayscale).
    pub sat: Option<i32>,
    /// Sharpen, 0–100.
    pub sharpen: Option<u8>,
}

/// Focal point in post-crop coordinates, each axis in `0.0..=1.0`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FocalPoint {
    pub x: f64,
    pub y: f64,
}

/// How the CDN picks the region kept by a cover crop.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Focus {
    /// Keep this point visible (`fp-x`, `fp-y`).
    Point(FocalPoint),
    /// Let the CDN choose by image entropy (`crop=entropy`).
    Entropy,
}

/// Fit-affecting parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fit {
    /// `fit=max`: scale inside the box, width alone describes the output.
    Max,
    /// `fit=crop`: exact `w` × `h`, cropped around `focus`. `h` is `None`
    /// when clamping rounded it to zero; it is then left to the CDN.
    Crop { h: Option<u32>, focus: Focus },
}

/// Diagnostic dimensions attached on request. Never encoded into the URL.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// True source dimensions, before any crop.
    pub source: Size,
    /// Dimensions the CDN will deliver.
    pub output: Size,
}

/// Resolved CDN query parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryParams {
    /// Output width.
    pub w: u32,
    /// Quality.
    pub q: u8,
    /// Emit `auto=format` (no explicit `fm`).
    pub auto_format: bool,
    pub fit: Fit,
    /// Source crop as a pixel rect.
    pub rect: Option<Rect>,
    pub blur: Option<u32>,
    pub flip: Option<Flip>,
    pub fm: Option<OutputFormat>,
    pub sat: Option<i32>,
    pub sharpen: Option<u8>,
    pub metadata: Option<Metadata>,
}

impl QueryParams {
    /// Output height, present only for cover crops that kept one.
    pub fn h(&self) -> Option<u32> {
        match self.fit {
            Fit::Max => None,
            Fit::Crop { h, .. } => h.filter(|&h| h > 0),
        }
    }

    /// Key/value pairs to send, unordered. Excludes `metadata`.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(10);
        pairs.push(("w", self.w.to_string()));
        pairs.push(("q", self.q.to_string()));
        if self.auto_format {
            pairs.push(("auto", String::from("format")));
        }
        match self.fit {
            Fit::Max => pairs.push(("fit", String::from("max"))),
            Fit::Crop { h, focus } => {
                pairs.push(("fit", String::from("crop")));
                if let Some(h) = h.filter(|&h| h > 0) {
                    pairs.push(("h", h.to_string()));
                }
                match focus {
                    Focus::Point(fp) => {
                        pairs.push(("fp-x", fp.x.to_string()));
                        pairs.push(("fp-y", fp.y.to_string()));
                    }
                    Focus::Entropy => pairs.push(("crop", String::from("entropy"))),
                }
            }
        }
        if let Some(rect) = self.rect {
            pairs.push(("rect", rect.to_string()));
        }
        if let Some(blur) = self.blur {
            pairs.push(("blur", blur.to_string()));
        }
        if let Some(flip) = self.flip {
            pairs.push(("flip", flip.to_string()));
        }
        if let Some(fm) = self.fm {
            pairs.push(("fm", fm.to_string()));
        }
        if let Some(sat) = self.sat {
            pairs.push(("sat", sat.to_string()));
        }
        if let Some(sharpen) = self.sharpen {
            pairs.push(("sharpen", sharpen.to_string()));
        }
        pairs
    }

    /// Sorted, encoded query string (without the leading `?`).
    pub fn to_query_string(&self) -> String {
        encode_query(self.pairs())
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Result of parsing passthrough params from a query string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    /// Parsed params.
    pub params: Passthrough,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

/// Non-fatal warning from passthrough parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A key appeared more than once (last value wins).
    DuplicateKey { key: String, value: String },
    /// A key the CDN vocabulary does not include.
    KeyNotRecognized { key: String, value: String },
    /// A key computed by the resolver; caller values are ignored.
    KeyReserved { key: String, value: String },
    /// A known key whose value could not be parsed or is out of range.
    ValueInvalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl Passthrough {
    /// Parse passthrough params from a query string (leading `?` optional).
    pub fn parse(query: &str) -> ParseResult {
        let (params, warnings) = parse::parse_query(query);
        ParseResult { params, warnings }
    }
}
