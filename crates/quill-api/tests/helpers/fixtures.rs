//! Test fixtures: in-memory images.

#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

/// Solid-color RGB image encoded in `format`.
pub fn encoded_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([120, 80, 200])));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), format)
        .expect("Failed to encode test image");
    buffer
}

pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    encoded_image(width, height, ImageFormat::Png)
}

pub fn create_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    encoded_image(width, height, ImageFormat::Jpeg)
}
