//! Query parameter resolution: sizing, mode normalization, upscale
//! clamping, and focal point translation.
//!
//! # Example
//!
//! ```
//! use imgurl::{Crop, FitMode, ImageRequest, Size};
//!
//! let params = ImageRequest::new()
//!     .width(2000)
//!     .height(1000)
//!     .mode(FitMode::Cover)
//!     .crop(Crop::new(0.0, 0.0, 0.25, 0.25))
//!     .resolve(Size::new(1000, 1000))
//!     .unwrap();
//!
//! // Never asks the CDN to upscale past the 750×750 cropped region.
//! assert_eq!(params.w, 750);
//! assert_eq!(params.h(), Some(375));
//! assert_eq!(
//!     params.to_query_string(),
//!     "auto=format&crop=entropy&fit=crop&h=375&q=75&rect=0,0,750,750&w=750"
//! );
//! ```

use tracing::{debug, trace};

use crate::error::Error;
use crate::geometry::{Crop, Hotspot, Size, crop_rect, cropped_size, round_px, round_to};
use crate::query::{
    DEFAULT_QUALITY, FOCAL_POINT_PRECISION, Fit, FocalPoint, Focus, Metadata, Passthrough,
    QueryParams,
};

/// How the output relates to the requested box.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FitMode {
    /// Fit the whole (cropped) image inside the box, keeping its aspect
    /// ratio. Width alone describes the output.
    #[default]
    Contain,
    /// Fill exactly `width` × `height`, cropping around the hotspot or by
    /// entropy.
    Cover,
}

/// What the caller wants from one source image.
///
/// Zero width or height counts as absent.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImageRequest {
    pub mode: FitMode,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub crop: Option<Crop>,
    pub hotspot: Option<Hotspot>,
    pub passthrough: Passthrough,
}

impl ImageRequest {
    /// Empty request: contain mode, half the source width.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set target width.
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set target height.
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Set fit mode.
    pub fn mode(mut self, mode: FitMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set source crop.
    pub fn crop(mut self, crop: Crop) -> Self {
        self.crop = Some(crop);
        self
    }

    /// Set hotspot (source-relative).
    pub fn hotspot(mut self, hotspot: Hotspot) -> Self {
        self.hotspot = Some(hotspot);
        self
    }

    /// Set CDN passthrough params.
    pub fn passthrough(mut self, passthrough: Passthrough) -> Self {
        self.passthrough = passthrough;
        self
    }

    /// Resolve query params for a source of the given dimensions.
    pub fn resolve(&self, source: Size) -> Result<QueryParams, Error> {
        resolve(source, self, false)
    }

    /// Like [`resolve`](Self::resolve), with [`Metadata`] attached.
    pub fn resolve_with_metadata(&self, source: Size) -> Result<QueryParams, Error> {
        resolve(source, self, true)
    }
}

/// Resolve CDN query params for `request` against `source`.
///
/// `include_metadata` attaches source and output dimensions to the result
/// without affecting the encoded query string.
pub fn resolve(
    source: Size,
    request: &ImageRequest,
    include_metadata: bool,
) -> Result<QueryParams, Error> {
    // Step 1: Sizing bounds are the post-crop region.
    let bounds = match &request.crop {
        Some(crop) => cropped_size(source, crop)?,
        None => source,
    };
    let (max_w, max_h) = (bounds.width, bounds.height);
    let source_ratio = bounds.aspect_ratio();

    let mut mode = request.mode;
    let mut height = request.height.filter(|&h| h > 0);

    // Step 2: Infer width. A height alone becomes a width; with neither,
    // default to half the bounds so a 2x variant needs no upscale.
    let mut width = match request.width.filter(|&w| w > 0) {
        Some(w) => w,
        None => match height.take() {
            Some(h) => round_px(h as f64 * source_ratio),
            None => round_px(max_w as f64 / 2.0),
        },
    };

    // Step 3: Normalize mode. Cover without both axes, or at the source
    // aspect ratio, is indistinguishable from contain.
    if mode == FitMode::Cover {
        let distinct_ratio = matches!(
            height,
            Some(h) if width > 0 && width as f64 / h as f64 != source_ratio
        );
        if !distinct_ratio {
            trace!(width, ?height, "cover collapses to contain");
            mode = FitMode::Contain;
        }
    } else if let Some(h) = height.take() {
        width = width.min(round_px(h as f64 * source_ratio));
    }

    // Step 4: Never exceed the bounds; keep the requested aspect ratio.
    if width > max_w || height.is_some_and(|h| h > max_h) {
        let requested_ratio = match height {
            Some(h) => width as f64 / h as f64,
            None => source_ratio,
        };
        if requested_ratio >= source_ratio {
            width = max_w;
            height = height.map(|_| round_px(width as f64 / requested_ratio));
        } else {
            height = Some(max_h);
            width = round_px(max_h as f64 * requested_ratio);
        }
        debug!(width, ?height, max_w, max_h, "clamped to source bounds");
    }
    // A height that rounds away is dropped; cover keeps its focus without it.
    let height = height.filter(|&h| h > 0);

    // Steps 5-7: Assemble.
    let rect = match &request.crop {
        Some(crop) => Some(crop_rect(source, crop)?),
        None => None,
    };

    let fit = match mode {
        FitMode::Cover => Fit::Crop {
            h: height,
            focus: match request.hotspot {
                Some(hotspot) => Focus::Point(focal_point(&hotspot, request.crop.as_ref())),
                None => Focus::Entropy,
            },
        },
        FitMode::Contain => Fit::Max,
    };

    let metadata = include_metadata.then(|| {
        let output_h = height.unwrap_or_else(|| round_px(width as f64 / source_ratio));
        Metadata {
            source,
            output: Size::new(width, output_h),
        }
    });

    let extra = &request.passthrough;
    Ok(QueryParams {
        w: width,
        q: extra.q.unwrap_or(DEFAULT_QUALITY),
        auto_format: extra.fm.is_none(),
        fit,
        rect,
        blur: extra.blur,
        flip: extra.flip,
        fm: extra.fm,
        sat: extra.sat,
        sharpen: extra.sharpen,
        metadata,
    })
}

/// Translate a source-relative hotspot into post-crop space, pinned to
/// `0.0..=1.0` and rounded to 3 decimals.
fn focal_point(hotspot: &Hotspot, crop: Option<&Crop>) -> FocalPoint {
    let (x, y) = match crop {
        Some(c) => (hotspot.x / c.remaining_x(), hotspot.y / c.remaining_y()),
        None => (hotspot.x, hotspot.y),
    };
    if !(0.0..=1.0).contains(&x) || !(0.0..=1.0).contains(&y) {
        trace!(x, y, "focal point outside crop, pinned to edge");
    }
    // `+ 0.0` turns -0.0 into 0.0 so it prints as "0".
    FocalPoint {
        x: round_to(x.clamp(0.0, 1.0), FOCAL_POINT_PRECISION) + 0.0,
        y: round_to(y.clamp(0.0, 1.0), FOCAL_POINT_PRECISION) + 0.0,
    }
}
