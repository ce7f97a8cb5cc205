//! Error type shared by geometry, resolution, and URL composition.

use alloc::string::String;

use thiserror::Error;

use crate::geometry::Crop;

/// Error from building image URLs.
///
/// Caller mistakes (bad crop, bad identifier, missing inputs) are kept
/// apart from [`Error::MissingMetadata`], which signals an internal defect.
#[derive(Clone, Debug, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// Opposing crop edges trim the whole axis (`left + right >= 1` or
    /// `top + bottom >= 1`).
    #[error("invalid crop {crop:?}: opposing edges must trim less than the whole image")]
    InvalidCrop { crop: Crop },
    /// The image identifier does not match `image-<asset>-<W>x<H>-<format>`.
    #[error("invalid image id {0:?}")]
    InvalidImageId(String),
    /// No image identifier was supplied.
    #[error("missing image id")]
    MissingImageId,
    /// Neither a base URL nor a project id and dataset were supplied.
    #[error("missing base url: provide one, or a project id and dataset")]
    MissingBaseUrl,
    /// Output metadata was requested from the resolver but not produced.
    #[error("resolved query params are missing output metadata")]
    MissingMetadata,
}
