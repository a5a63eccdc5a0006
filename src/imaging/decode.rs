//! Image decoding with EXIF orientation normalization
//!
//! Cameras frequently store pixels in sensor order and record the intended
//! rotation in the EXIF `Orientation` tag. Everything downstream (sizing and
//! centering the logo) works in visual coordinates, so the decoded buffer is
//! re-baked into visual order here. The returned image carries no metadata.

use image::io::Reader as ImageReader;
use image::DynamicImage;
use std::io::Cursor;

use super::error::ImageError;

/// EXIF orientation values (TIFF tag 0x0112)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// 1: stored order is visual order
    #[default]
    Normal,
    /// 2: mirrored horizontally
    FlipHorizontal,
    /// 3: rotated 180°
    Rotate180,
    /// 4: mirrored vertically
    FlipVertical,
    /// 5: mirrored across the top-left/bottom-right diagonal
    Transpose,
    /// 6: needs a 90° clockwise turn
    Rotate90,
    /// 7: mirrored across the top-right/bottom-left diagonal
    Transverse,
    /// 8: needs a 90° counter-clockwise turn
    Rotate270,
}

impl Orientation {
    /// Map a raw EXIF value; anything outside 1-8 is treated as normal.
    pub fn from_exif(value: u32) -> Self {
        match value {
            2 => Self::FlipHorizontal,
            3 => Self::Rotate180,
            4 => Self::FlipVertical,
            5 => Self::Transpose,
            6 => Self::Rotate90,
            7 => Self::Transverse,
            8 => Self::Rotate270,
            _ => Self::Normal,
        }
    }

    /// Whether applying this orientation swaps width and height
    pub fn swaps_dimensions(&self) -> bool {
        matches!(
            self,
            Self::Transpose | Self::Rotate90 | Self::Transverse | Self::Rotate270
        )
    }

    /// Re-bake the orientation into pixel layout
    pub fn apply(self, img: DynamicImage) -> DynamicImage {
        match self {
            Self::Normal => img,
            Self::FlipHorizontal => img.fliph(),
            Self::Rotate180 => img.rotate180(),
            Self::FlipVertical => img.flipv(),
            Self::Transpose => img.rotate90().fliph(),
            Self::Rotate90 => img.rotate90(),
            Self::Transverse => img.rotate270().fliph(),
            Self::Rotate270 => img.rotate270(),
        }
    }
}

/// Decode image data into a DynamicImage
pub fn decode_image(data: &[u8]) -> Result<DynamicImage, ImageError> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ImageError::decode_failed(e.to_string()))?
        .decode()
        .map_err(|e| ImageError::decode_failed(e.to_string()))
}

/// Read the EXIF orientation tag, if the container has one
///
/// Missing or unreadable EXIF data is not an error: the image is simply
/// taken to be in visual order already.
pub fn read_orientation(data: &[u8]) -> Orientation {
    let exif = match exif::Reader::new().read_from_container(&mut Cursor::new(data)) {
        Ok(exif) => exif,
        Err(_) => return Orientation::Normal,
    };

    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from_exif)
        .unwrap_or_default()
}

/// Decode and normalize orientation in one step
pub fn decode_oriented(data: &[u8]) -> Result<DynamicImage, ImageError> {
    let img = decode_image(data)?;
    let orientation = read_orientation(data);

    if orientation != Orientation::Normal {
        tracing::debug!(
            orientation = ?orientation,
            width = img.width(),
            height = img.height(),
            "Applying EXIF orientation"
        );
    }

    Ok(orientation.apply(img))
}
