//! Image CDN query parameters and responsive source-sets from crop, hotspot,
//! and fit inputs.
//!
//! Pure computation with no I/O or shared state. `no_std` compatible (needs
//! `alloc`). The same inputs always produce byte-identical URLs.
//!
//! # Modules
//!
//! - [`geometry`]: Fractional crops, post-crop sizes, pixel rects
//! - [`resolve`]: Width/height/mode resolution with upscale clamping and
//!   focal point translation
//! - [`query`]: Resolved parameter record, passthrough params, sorted
//!   query string encoding
//! - [`srcset`]: Width-tiered responsive variants
//! - [`image_id`]: Identifier parsing (`image-<asset>-<W>x<H>-<format>`)
//! - [`builder`]: URL composition and vector pass-through
//!
//! # Example
//!
//! ```
//! use imgurl::{FitMode, Hotspot, ImageRequest, UrlBuilder};
//!
//! let builder = UrlBuilder::new("/image/").unwrap();
//! let request = ImageRequest::new()
//!     .width(375)
//!     .height(100)
//!     .mode(FitMode::Cover)
//!     .hotspot(Hotspot::new(0.25, 0.25));
//!
//! let src = builder
//!     .src("image-79f37b3f070b144d45455d514ff4e9fc43035649-1000x1000-png", &request)
//!     .unwrap();
//! assert!(src.src.ends_with("?auto=format&fit=crop&fp-x=0.25&fp-y=0.25&h=100&q=75&w=375"));
//! assert_eq!((src.width, src.height), (375, 100));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod builder;
mod error;
pub mod geometry;
pub mod image_id;
pub mod query;
pub mod resolve;
pub mod srcset;

pub use builder::{ImageAttributes, ImageSrc, UrlBuilder, build_src, build_svg_src};
pub use error::Error;
pub use geometry::{Crop, Hotspot, Rect, Size, crop_rect, cropped_size};
pub use image_id::ImageId;
pub use query::{Fit, FocalPoint, Focus, Metadata, Passthrough, QueryParams, encode_query};
pub use resolve::{FitMode, ImageRequest, resolve};
pub use srcset::{MultiplierTier, SrcSetPolicy, build_src_set, build_src_set_with_policy};
