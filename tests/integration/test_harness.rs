// Shared fixtures for export integration tests
//
// Every image is synthesized in memory; nothing is read from disk except
// what a test writes into its own temporary directory.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use photomark::batch::{BatchItem, BatchProcessor, ExportOptions, SourceImage};
use photomark::imaging::QualitySettings;
use photomark::watermark::{Compositor, LogoAssets, WatermarkConfig};
use std::io::Cursor;
use std::sync::Arc;

/// Opaque white light logo and opaque black dark logo, both 2:1
pub fn solid_assets(width: u32, height: u32) -> Arc<LogoAssets> {
    let light = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    let dark = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));
    Arc::new(LogoAssets::from_images(light, dark))
}

pub fn compositor() -> Compositor {
    Compositor::new(solid_assets(200, 100))
}

pub fn processor(options: ExportOptions) -> BatchProcessor {
    BatchProcessor::new(compositor(), options, QualitySettings::default())
}

pub fn encode(image: RgbImage, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image)
        .write_to(&mut buffer, format)
        .expect("Failed to encode fixture");
    buffer.into_inner()
}

/// Uniform PNG photograph
pub fn solid_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    encode(RgbImage::from_pixel(width, height, Rgb(color)), ImageFormat::Png)
}

/// Uniform JPEG photograph
pub fn solid_jpeg(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    encode(RgbImage::from_pixel(width, height, Rgb(color)), ImageFormat::Jpeg)
}

/// PNG photograph with a horizontal gradient, so every pixel differs
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width.max(1)) as u8, (y * 255 / height.max(1)) as u8, 128])
    });
    encode(image, ImageFormat::Png)
}

pub fn item(identifier: &str, data: Vec<u8>, config: WatermarkConfig) -> BatchItem {
    BatchItem::new(SourceImage::new(identifier, data), config)
}

pub fn decode_rgb(data: &[u8]) -> RgbImage {
    image::load_from_memory(data)
        .expect("Failed to decode output")
        .to_rgb8()
}

pub fn assert_channel_close(actual: u8, expected: u8, tolerance: u8) {
    let diff = (actual as i16 - expected as i16).unsigned_abs();
    assert!(
        diff <= tolerance as u16,
        "channel {} not within {} of {}",
        actual,
        tolerance,
        expected
    );
}
