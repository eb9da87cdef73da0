//! Image operations used by thumbnail derivation
//!
//! - EXIF orientation reading and correction (orientation)
//! - Bounded resizing (resize)

pub mod orientation;
pub mod resize;

pub use orientation::ImageOrientation;
pub use resize::ImageResize;
