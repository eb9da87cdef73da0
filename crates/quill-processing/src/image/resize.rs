use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

/// Image resize operations
pub struct ImageResize;

impl ImageResize {
    /// Dimensions that fit `width` x `height` inside a `max_dimension` square, preserving
    /// aspect ratio. Images already within the bound are returned unchanged (no upscaling).
    pub fn fit_within(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
        if width <= max_dimension && height <= max_dimension {
            return (width, height);
        }

        let (w, h, max) = (width as u64, height as u64, max_dimension as u64);
        if w >= h {
            let scaled = ((h * max + w / 2) / w).max(1);
            (max_dimension, scaled as u32)
        } else {
            let scaled = ((w * max + h / 2) / h).max(1);
            (scaled as u32, max_dimension)
        }
    }

    /// Select appropriate filter type based on resize ratio
    pub fn select_filter(
        orig_width: u32,
        orig_height: u32,
        new_width: u32,
        new_height: u32,
    ) -> FilterType {
        let width_ratio = orig_width as f32 / new_width as f32;
        let height_ratio = orig_height as f32 / new_height as f32;
        let max_ratio = width_ratio.max(height_ratio);

        if max_ratio > 2.0 {
            FilterType::Triangle
        } else if max_ratio > 1.5 {
            FilterType::CatmullRom
        } else {
            FilterType::Lanczos3
        }
    }

    /// Downscale so that neither side exceeds `max_dimension`.
    pub fn bound(img: DynamicImage, max_dimension: u32) -> DynamicImage {
        let (orig_width, orig_height) = img.dimensions();
        let (width, height) = Self::fit_within(orig_width, orig_height, max_dimension);

        if (width, height) == (orig_width, orig_height) {
            return img;
        }

        let filter = Self::select_filter(orig_width, orig_height, width, height);
        img.resize_exact(width, height, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_fit_within_landscape() {
        assert_eq!(ImageResize::fit_within(4000, 3000, 1200), (1200, 900));
    }

    #[test]
    fn test_fit_within_portrait() {
        assert_eq!(ImageResize::fit_within(3000, 4000, 1200), (900, 1200));
    }

    #[test]
    fn test_fit_within_no_upscale() {
        assert_eq!(ImageResize::fit_within(400, 300, 1200), (400, 300));
        assert_eq!(ImageResize::fit_within(1200, 1200, 1200), (1200, 1200));
    }

    #[test]
    fn test_fit_within_extreme_aspect() {
        assert_eq!(ImageResize::fit_within(10000, 2, 1200), (1200, 1));
    }

    #[test]
    fn test_select_filter() {
        assert_eq!(
            ImageResize::select_filter(4000, 3000, 1200, 900),
            FilterType::Triangle
        );
        assert_eq!(
            ImageResize::select_filter(1300, 1300, 1200, 1200),
            FilterType::Lanczos3
        );
    }

    #[test]
    fn test_bound_keeps_small_image() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 30, Rgb([1, 2, 3])));
        let bounded = ImageResize::bound(img, 1200);
        assert_eq!(bounded.dimensions(), (40, 30));
    }

    #[test]
    fn test_bound_downscales() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(300, 150, Rgb([1, 2, 3])));
        let bounded = ImageResize::bound(img, 100);
        assert_eq!(bounded.dimensions(), (100, 50));
    }
}
