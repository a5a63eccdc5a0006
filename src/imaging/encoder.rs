//! Image encoder abstraction
//!
//! Provides a trait-based encoder system that allows:
//! - Swapping the output codec without touching the pipeline
//! - Named quality tiers instead of loose quality numbers
//! - Deterministic output (fixed encoder parameters per tier)

use image::RgbImage;
use serde::{Deserialize, Serialize};

use super::error::ImageError;

/// Output codec for exported images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Baseline JPEG (default)
    #[default]
    Jpeg,
    /// Lossless PNG; quality tiers do not apply
    Png,
}

impl OutputFormat {
    /// MIME type of the encoded output
    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }

    /// File extension (without the dot)
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
        }
    }
}

/// Named compression/fidelity preset applied at encode time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualityTier {
    /// On-screen preview from a downsized source
    Preview,
    /// Single-image "HD" download, loss-minimizing
    Single,
    /// Per-entry quality inside a batch archive, marginally smaller than Single
    Archive,
}

impl QualityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Preview => "preview",
            QualityTier::Single => "single",
            QualityTier::Archive => "archive",
        }
    }
}

fn default_preview_quality() -> u8 {
    80
}

fn default_single_quality() -> u8 {
    100
}

fn default_archive_quality() -> u8 {
    95
}

fn default_preview_max_dimension() -> u32 {
    600
}

/// Quality value per tier, plus the preview thumbnail bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualitySettings {
    /// JPEG quality for previews (default: 80)
    #[serde(default = "default_preview_quality")]
    pub preview: u8,

    /// JPEG quality for single downloads (default: 100)
    #[serde(default = "default_single_quality")]
    pub single: u8,

    /// JPEG quality for archive entries (default: 95)
    #[serde(default = "default_archive_quality")]
    pub archive: u8,

    /// Longest side of the preview thumbnail in pixels (default: 600)
    #[serde(default = "default_preview_max_dimension")]
    pub preview_max_dimension: u32,
}

impl Default for QualitySettings {
    fn default() -> Self {
        Self {
            preview: default_preview_quality(),
            single: default_single_quality(),
            archive: default_archive_quality(),
            preview_max_dimension: default_preview_max_dimension(),
        }
    }
}

impl QualitySettings {
    /// Quality value (1-100) for a tier
    pub fn quality_for(&self, tier: QualityTier) -> u8 {
        let quality = match tier {
            QualityTier::Preview => self.preview,
            QualityTier::Single => self.single,
            QualityTier::Archive => self.archive,
        };
        quality.clamp(1, 100)
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("preview", self.preview),
            ("single", self.single),
            ("archive", self.archive),
        ] {
            if !(1..=100).contains(&value) {
                return Err(format!(
                    "quality.{} must be between 1 and 100, got {}",
                    name, value
                ));
            }
        }

        if self.preview_max_dimension == 0 {
            return Err("quality.preview_max_dimension must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// Result of encoding an image
#[derive(Debug, Clone)]
pub struct EncodedImage {
    /// The encoded image data
    pub data: Vec<u8>,
    /// The output format
    pub format: OutputFormat,
    /// Content-Type header value
    pub content_type: &'static str,
}

impl EncodedImage {
    pub fn new(data: Vec<u8>, format: OutputFormat) -> Self {
        let content_type = format.content_type();
        Self {
            data,
            format,
            content_type,
        }
    }
}

/// Trait for image encoders
///
/// Encoders only ever see flattened, opaque RGB images.
pub trait ImageEncoder: Send + Sync {
    /// The output format this encoder produces
    fn format(&self) -> OutputFormat;

    /// Encode an opaque RGB image at the given quality (1-100)
    fn encode(&self, image: &RgbImage, quality: u8) -> Result<EncodedImage, ImageError>;
}

/// JPEG encoder using the image crate
///
/// The image crate writes every component at 1x1 sampling, so there is no
/// chroma subsampling at any quality.
pub struct JpegEncoder;

impl ImageEncoder for JpegEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Jpeg
    }

    fn encode(&self, image: &RgbImage, quality: u8) -> Result<EncodedImage, ImageError> {
        use image::codecs::jpeg::JpegEncoder as ImageJpegEncoder;
        use image::ImageEncoder as _;
        use std::io::Cursor;

        let mut output = Cursor::new(Vec::new());
        let encoder = ImageJpegEncoder::new_with_quality(&mut output, quality.clamp(1, 100));

        encoder
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ColorType::Rgb8,
            )
            .map_err(|e| ImageError::encode_failed("jpeg", e.to_string()))?;

        Ok(EncodedImage::new(output.into_inner(), OutputFormat::Jpeg))
    }
}

/// PNG encoder using the image crate
pub struct PngEncoder;

impl ImageEncoder for PngEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Png
    }

    fn encode(&self, image: &RgbImage, _quality: u8) -> Result<EncodedImage, ImageError> {
        use image::codecs::png::PngEncoder as ImagePngEncoder;
        use image::ImageEncoder as _;
        use std::io::Cursor;

        let mut output = Cursor::new(Vec::new());
        let encoder = ImagePngEncoder::new(&mut output);

        encoder
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ColorType::Rgb8,
            )
            .map_err(|e| ImageError::encode_failed("png", e.to_string()))?;

        Ok(EncodedImage::new(output.into_inner(), OutputFormat::Png))
    }
}

/// Factory for creating encoders based on output format
pub struct EncoderFactory;

impl EncoderFactory {
    pub fn create(format: OutputFormat) -> Box<dyn ImageEncoder> {
        match format {
            OutputFormat::Jpeg => Box::new(JpegEncoder),
            OutputFormat::Png => Box::new(PngEncoder),
        }
    }
}
