//! Image identifiers of the form `image-<assetId>-<W>x<H>-<format>`.
//!
//! Source dimensions are encoded in the identifier, so no request to the
//! CDN is needed to size an image.

use alloc::format;
use alloc::string::{String, ToString};

use crate::error::Error;
use crate::geometry::Size;

/// Parsed image identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageId {
    pub asset_id: String,
    pub dimensions: Size,
    pub format: String,
}

impl ImageId {
    /// Parse an identifier such as
    /// `image-79f37b3f070b144d45455d514ff4e9fc43035649-1000x1000-png`.
    pub fn parse(id: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidImageId(id.to_string());

        let rest = id.strip_prefix("image-").ok_or_else(invalid)?;
        let (rest, format) = rest.rsplit_once('-').ok_or_else(invalid)?;
        let (asset_id, dims) = rest.rsplit_once('-').ok_or_else(invalid)?;
        let (w, h) = dims.split_once('x').ok_or_else(invalid)?;

        let asset_ok = !asset_id.is_empty() && asset_id.bytes().all(|b| b.is_ascii_alphanumeric());
        let format_ok = !format.is_empty() && format.bytes().all(|b| b.is_ascii_alphanumeric());
        let width = parse_dimension(w).ok_or_else(invalid)?;
        let height = parse_dimension(h).ok_or_else(invalid)?;
        if !asset_ok || !format_ok {
            return Err(invalid());
        }

        Ok(Self {
            asset_id: asset_id.to_string(),
            dimensions: Size::new(width, height),
            format: format.to_string(),
        })
    }

    /// CDN path of the original asset: `<assetId>-<W>x<H>.<format>`.
    pub fn url_path(&self) -> String {
        format!(
            "{}-{}x{}.{}",
            self.asset_id, self.dimensions.width, self.dimensions.height, self.format
        )
    }

    /// Vector assets are served as-is; the CDN ignores transformations.
    pub fn is_vector(&self) -> bool {
        self.format.eq_ignore_ascii_case("svg")
    }
}

fn parse_dimension(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<u32>().ok().filter(|&v| v > 0)
}
