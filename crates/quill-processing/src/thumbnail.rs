//! Thumbnail derivation
//!
//! Decode, correct orientation, normalize color, bound dimensions, then re-encode as
//! lossy WebP.

use bytes::Bytes;
use image::{DynamicImage, GenericImageView, ImageReader};
use std::io::Cursor;

use crate::image::{ImageOrientation, ImageResize};

/// Thumbnail derivation errors
#[derive(Debug, thiserror::Error)]
pub enum ThumbnailError {
    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Failed to encode thumbnail: {0}")]
    Encode(String),
}

/// An encoded thumbnail.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub data: Bytes,
    pub width: u32,
    pub height: u32,
    pub has_alpha: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct ThumbnailGenerator {
    max_dimension: u32,
    quality: f32,
}

impl ThumbnailGenerator {
    pub fn new(max_dimension: u32, quality: f32) -> Self {
        Self {
            max_dimension,
            quality: quality.clamp(1.0, 100.0),
        }
    }

    /// Derive a thumbnail from encoded image data.
    pub fn generate(&self, data: &[u8]) -> Result<Thumbnail, ThumbnailError> {
        let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
        let format = reader.format();
        let img = reader.decode()?;

        let img = ImageOrientation::apply_exif_orientation(img, data);
        let img = Self::normalize_color(img);
        let img = ImageResize::bound(img, self.max_dimension);

        let (width, height) = img.dimensions();
        let has_alpha = img.color().has_alpha();
        let encoded = self.encode_webp(&img)?;

        tracing::debug!(
            source_format = ?format,
            width = width,
            height = height,
            has_alpha = has_alpha,
            input_bytes = data.len(),
            output_bytes = encoded.len(),
            "Thumbnail generated"
        );

        Ok(Thumbnail {
            data: encoded,
            width,
            height,
            has_alpha,
        })
    }

    /// Images with an alpha channel become RGBA8, everything else RGB8.
    pub fn normalize_color(img: DynamicImage) -> DynamicImage {
        match img {
            DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => img,
            other if other.color().has_alpha() => DynamicImage::ImageRgba8(other.to_rgba8()),
            other => DynamicImage::ImageRgb8(other.to_rgb8()),
        }
    }

    fn encode_webp(&self, img: &DynamicImage) -> Result<Bytes, ThumbnailError> {
        let (width, height) = img.dimensions();

        let encoder = match img {
            DynamicImage::ImageRgba8(rgba) => {
                webp::Encoder::from_rgba(rgba.as_raw(), width, height)
            }
            DynamicImage::ImageRgb8(rgb) => webp::Encoder::from_rgb(rgb.as_raw(), width, height),
            other => {
                return Err(ThumbnailError::Encode(format!(
                    "unsupported color type {:?}",
                    other.color()
                )))
            }
        };

        let webp_data = encoder.encode(self.quality);
        if webp_data.is_empty() {
            return Err(ThumbnailError::Encode("encoder produced no data".to_string()));
        }

        Ok(Bytes::copy_from_slice(&webp_data))
    }
}
