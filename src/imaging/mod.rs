//! Imaging primitives
//!
//! Provides the low-level building blocks the compositor and batch pipeline
//! are made of:
//! - Decoding with EXIF orientation normalization
//! - Lanczos3 resampling with premultiplied alpha
//! - Tiered JPEG/PNG encoding

pub mod decode;
pub mod encoder;
pub mod error;
pub mod resize;

pub use decode::{decode_image, decode_oriented, read_orientation, Orientation};
pub use encoder::{
    EncodedImage, EncoderFactory, ImageEncoder, JpegEncoder, OutputFormat, PngEncoder,
    QualitySettings, QualityTier,
};
pub use error::ImageError;
pub use resize::{fit_within, resize_rgba, thumbnail};
