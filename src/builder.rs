//! URL composition: identifier + base URL + resolved params.
//!
//! This is the boundary where missing inputs are rejected. Everything below
//! it works on already-parsed dimensions.
//!
//! # Example
//!
//! ```
//! use imgurl::{ImageRequest, UrlBuilder};
//!
//! let builder = UrlBuilder::new("/images/").unwrap();
//! let id = "image-79f37b3f070b144d45455d514ff4e9fc43035649-1000x1000-png";
//!
//! let src = builder.src(id, &ImageRequest::new().width(500)).unwrap();
//! assert_eq!(
//!     src.src,
//!     "/images/79f37b3f070b144d45455d514ff4e9fc43035649-1000x1000.png?auto=format&fit=max&q=75&w=500"
//! );
//! assert_eq!((src.width, src.height), (500, 500));
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use tracing::debug;

use crate::error::Error;
use crate::image_id::ImageId;
use crate::resolve::ImageRequest;
use crate::srcset::{SrcSetPolicy, build_src_set_with_policy};

/// CDN host used by [`UrlBuilder::from_project`].
pub const DEFAULT_CDN_HOST: &str = "https://cdn.sanity.io/images";

/// A single URL and the dimensions the CDN will deliver for it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageSrc {
    pub src: String,
    pub width: u32,
    pub height: u32,
}

/// Everything a rendering layer needs for one image element.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageAttributes {
    pub src: String,
    /// Comma-joined source-set. `None` for vector assets.
    pub srcset: Option<String>,
    pub width: u32,
    pub height: u32,
}

/// Builds URLs under one base URL.
#[derive(Clone, Debug, PartialEq)]
pub struct UrlBuilder {
    base_url: String,
    policy: SrcSetPolicy,
}

impl UrlBuilder {
    /// Builder for an explicit base URL (prefix of every asset path).
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        let base_url = base_url.into();
        if base_url.is_empty() {
            return Err(Error::MissingBaseUrl);
        }
        Ok(Self {
            base_url,
            policy: SrcSetPolicy::default(),
        })
    }

    /// Builder for a project's dataset on [`DEFAULT_CDN_HOST`].
    pub fn from_project(project_id: &str, dataset: &str) -> Result<Self, Error> {
        if project_id.is_empty() || dataset.is_empty() {
            return Err(Error::MissingBaseUrl);
        }
        Self::new(format!("{DEFAULT_CDN_HOST}/{project_id}/{dataset}/"))
    }

    /// Use a custom source-set policy.
    pub fn policy(mut self, policy: SrcSetPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Base URL every asset path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Single URL plus its output dimensions.
    pub fn src(&self, id: &str, request: &ImageRequest) -> Result<ImageSrc, Error> {
        let id = parse_id(id)?;
        build_src(&self.base_url, &id, request)
    }

    /// Responsive `"<url> <w>w"` entries.
    pub fn src_set(&self, id: &str, request: &ImageRequest) -> Result<Vec<String>, Error> {
        self.src_set_for(&parse_id(id)?, request)
    }

    fn src_set_for(&self, id: &ImageId, request: &ImageRequest) -> Result<Vec<String>, Error> {
        let image_url = format!("{}{}", self.base_url, id.url_path());
        build_src_set_with_policy(&image_url, id.dimensions, request, &self.policy)
    }

    /// `src`, `srcset` and dimensions for one image. Vector assets get the
    /// untransformed URL and no source-set.
    pub fn attributes(&self, id: &str, request: &ImageRequest) -> Result<ImageAttributes, Error> {
        let parsed = parse_id(id)?;
        if parsed.is_vector() {
            let svg = build_svg_src(&self.base_url, &parsed);
            return Ok(ImageAttributes {
                src: svg.src,
                srcset: None,
                width: svg.width,
                height: svg.height,
            });
        }

        let single = build_src(&self.base_url, &parsed, request)?;
        let srcset = self.src_set_for(&parsed, request)?.join(", ");
        Ok(ImageAttributes {
            src: single.src,
            srcset: Some(srcset),
            width: single.width,
            height: single.height,
        })
    }
}

fn parse_id(id: &str) -> Result<ImageId, Error> {
    if id.is_empty() {
        return Err(Error::MissingImageId);
    }
    ImageId::parse(id)
}

/// Resolve once with metadata and encode a single URL.
pub fn build_src(base_url: &str, id: &ImageId, request: &ImageRequest) -> Result<ImageSrc, Error> {
    let params = request.resolve_with_metadata(id.dimensions)?;
    let output = params.metadata.ok_or(Error::MissingMetadata)?.output;
    Ok(ImageSrc {
        src: format!("{base_url}{}?{}", id.url_path(), params.to_query_string()),
        width: output.width,
        height: output.height,
    })
}

/// Direct URL for a vector asset: no query string, dimensions verbatim.
pub fn build_svg_src(base_url: &str, id: &ImageId) -> ImageSrc {
    debug!(asset = %id.asset_id, "vector asset passed through untransformed");
    ImageSrc {
        src: format!("{base_url}{}", id.url_path()),
        width: id.dimensions.width,
        height: id.dimensions.height,
    }
}
