//! Responsive source-set generation.
//!
//! Resolves the base width once, then re-resolves at each multiplier of a
//! width-tiered policy. Every variant is clamped independently, so variants
//! past the source resolution collapse onto the same URL and are deduplicated.
//!
//! # Example
//!
//! ```
//! use imgurl::{ImageRequest, Size, build_src_set};
//!
//! let set = build_src_set("/image/a-1000x1000.png", Size::new(1000, 1000), &ImageRequest::new().width(60))
//!     .unwrap();
//!
//! // The 30px half-size variant is not worth the markup.
//! assert_eq!(set, [
//!     "/image/a-1000x1000.png?auto=format&fit=max&q=75&w=60 60w",
//!     "/image/a-1000x1000.png?auto=format&fit=max&q=75&w=120 120w",
//! ]);
//! ```

use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use tracing::trace;

use crate::error::Error;
use crate::geometry::{Size, round_px};
use crate::resolve::ImageRequest;

/// Multipliers used for base widths below `below` (or any width, if `None`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiplierTier {
    /// Exclusive upper bound on the base width.
    pub below: Option<u32>,
    /// Ascending width multipliers.
    pub multipliers: Vec<f64>,
}

impl MultiplierTier {
    fn new(below: Option<u32>, multipliers: &[f64]) -> Self {
        Self {
            below,
            multipliers: multipliers.to_vec(),
        }
    }
}

/// Which variants a source-set contains.
///
/// The default favors more, finer steps for wider images.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SrcSetPolicy {
    /// Downscaled variants narrower than this are dropped.
    pub min_variant_width: u32,
    /// Checked in order; the first tier whose bound exceeds the base width
    /// wins.
    pub tiers: Vec<MultiplierTier>,
}

impl Default for SrcSetPolicy {
    fn default() -> Self {
        Self {
            min_variant_width: 50,
            tiers: vec![
                MultiplierTier::new(Some(160), &[0.5, 1.0, 2.0]),
                MultiplierTier::new(Some(750), &[0.5, 1.0, 1.5, 2.0]),
                MultiplierTier::new(Some(1400), &[0.25, 0.5, 0.75, 1.0, 1.5, 2.0]),
                MultiplierTier::new(None, &[0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0]),
            ],
        }
    }
}

impl SrcSetPolicy {
    /// Multipliers for a base width. Empty if no tier matches.
    pub fn multipliers(&self, width: u32) -> &[f64] {
        self.tiers
            .iter()
            .find(|t| t.below.is_none_or(|below| width < below))
            .map(|t| t.multipliers.as_slice())
            .unwrap_or_default()
    }
}

/// Build `"<url> <w>w"` source-set entries with the default policy.
///
/// `image_url` is the asset URL without a query string.
pub fn build_src_set(
    image_url: &str,
    source: Size,
    request: &ImageRequest,
) -> Result<Vec<String>, Error> {
    build_src_set_with_policy(image_url, source, request, &SrcSetPolicy::default())
}

/// Build source-set entries with a custom policy.
///
/// Entries are in multiplier order with duplicates removed.
pub fn build_src_set_with_policy(
    image_url: &str,
    source: Size,
    request: &ImageRequest,
    policy: &SrcSetPolicy,
) -> Result<Vec<String>, Error> {
    let base = request.resolve(source)?;
    let (w, h) = (base.w, base.h());

    let mut seen = BTreeSet::new();
    let mut entries = Vec::new();
    for &multiple in policy.multipliers(w) {
        let width = round_px(w as f64 * multiple);
        if multiple < 1.0 && width < policy.min_variant_width {
            trace!(multiple, width, "skipping tiny variant");
            continue;
        }

        let variant = ImageRequest {
            width: Some(width),
            height: h.map(|h| round_px(h as f64 * multiple)),
            ..request.clone()
        };
        let params = variant.resolve(source)?;
        let entry = format!("{image_url}?{} {}w", params.to_query_string(), params.w);

        if seen.insert(entry.clone()) {
            entries.push(entry);
        } else {
            trace!(multiple, "variant clamps to an existing entry");
        }
    }
    Ok(entries)
}
