use image::DynamicImage;
use std::io::Cursor;

/// Image orientation operations (rotation and flipping)
pub struct ImageOrientation;

impl ImageOrientation {
    /// Read the EXIF orientation tag (1-8) from encoded image data.
    ///
    /// Returns 1 (normal) when the container carries no EXIF block, no orientation tag,
    /// or a value outside 1-8.
    pub fn read_exif_orientation(data: &[u8]) -> u8 {
        let exif = match exif::Reader::new().read_from_container(&mut Cursor::new(data)) {
            Ok(exif) => exif,
            Err(_) => return 1,
        };

        exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .filter(|v| (1..=8).contains(v))
            .map(|v| v as u8)
            .unwrap_or(1)
    }

    /// Get rotation and flip operations needed for a given EXIF orientation.
    ///
    /// Returns (clockwise rotation, flip_horizontal, flip_vertical); the rotation is
    /// applied before the flips.
    pub fn get_orientation_transforms(orientation: u8) -> (Option<u16>, bool, bool) {
        match orientation {
            1 => (None, false, false),      // Normal
            2 => (None, true, false),       // Mirror horizontal
            3 => (Some(180), false, false), // Rotate 180
            4 => (None, false, true),       // Mirror vertical
            5 => (Some(90), true, false),   // Transpose
            6 => (Some(90), false, false),  // Rotate 90 CW
            7 => (Some(270), true, false),  // Transverse
            8 => (Some(270), false, false), // Rotate 270 CW
            _ => (None, false, false),
        }
    }

    /// Apply EXIF orientation correction to an image decoded from `data`.
    pub fn apply_exif_orientation(img: DynamicImage, data: &[u8]) -> DynamicImage {
        let orientation = Self::read_exif_orientation(data);
        Self::apply_orientation(img, orientation)
    }

    /// Apply a known orientation. The image keeps its color type.
    pub fn apply_orientation(mut img: DynamicImage, orientation: u8) -> DynamicImage {
        let (rotate, flip_h, flip_v) = Self::get_orientation_transforms(orientation);

        if orientation != 1 {
            tracing::debug!(
                orientation = orientation,
                rotate = ?rotate,
                flip_horizontal = flip_h,
                flip_vertical = flip_v,
                "Applying EXIF orientation"
            );
        }

        if let Some(angle) = rotate {
            img = Self::rotate_by_angle(img, angle);
        }
        if flip_h {
            img = img.fliph();
        }
        if flip_v {
            img = img.flipv();
        }

        img
    }

    /// Rotate image by specified angle (90, 180, or 270 degrees clockwise)
    pub fn rotate_by_angle(img: DynamicImage, angle: u16) -> DynamicImage {
        match angle {
            90 => img.rotate90(),
            180 => img.rotate180(),
            270 => img.rotate270(),
            _ => img,
        }
    }
}
