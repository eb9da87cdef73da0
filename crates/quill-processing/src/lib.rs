//! Quill Processing Library
//!
//! Image decoding, EXIF orientation, thumbnail derivation and upload validation.
//! Everything here is synchronous and CPU bound; async callers run it on the blocking
//! thread pool.

pub mod image;
pub mod thumbnail;
pub mod validator;

pub use crate::image::{ImageOrientation, ImageResize};
pub use thumbnail::{Thumbnail, ThumbnailError, ThumbnailGenerator};
pub use validator::{validator_for_kind, MediaValidator, ValidationError};
