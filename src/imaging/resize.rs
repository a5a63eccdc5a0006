//! High-quality resampling
//!
//! All resizing goes through fast-image-resize's Lanczos3 convolution. Alpha
//! is premultiplied before filtering and divided back out afterwards so the
//! color of fully transparent logo pixels never bleeds into visible edges.

use fast_image_resize::{FilterType, Image, MulDiv, PixelType, ResizeAlg, Resizer};
use image::{DynamicImage, RgbaImage};
use std::num::NonZeroU32;

use super::error::ImageError;

/// Resize an RGBA buffer to exactly `target_w` x `target_h`
pub fn resize_rgba(img: &RgbaImage, target_w: u32, target_h: u32) -> Result<RgbaImage, ImageError> {
    if img.width() == target_w && img.height() == target_h {
        return Ok(img.clone());
    }

    let src_width = NonZeroU32::new(img.width())
        .ok_or_else(|| ImageError::resize_failed("Source width is 0"))?;
    let src_height = NonZeroU32::new(img.height())
        .ok_or_else(|| ImageError::resize_failed("Source height is 0"))?;
    let dst_width =
        NonZeroU32::new(target_w).ok_or_else(|| ImageError::resize_failed("Target width is 0"))?;
    let dst_height =
        NonZeroU32::new(target_h).ok_or_else(|| ImageError::resize_failed("Target height is 0"))?;

    let mut src_image =
        Image::from_vec_u8(src_width, src_height, img.as_raw().clone(), PixelType::U8x4)
            .map_err(|e| {
                ImageError::resize_failed(format!("Failed to create source image: {:?}", e))
            })?;

    let alpha_mul_div = MulDiv::default();
    alpha_mul_div
        .multiply_alpha_inplace(&mut src_image.view_mut())
        .map_err(|e| ImageError::resize_failed(format!("Alpha premultiply failed: {:?}", e)))?;

    let mut dst_image = Image::new(dst_width, dst_height, PixelType::U8x4);
    let mut dst_view = dst_image.view_mut();

    let mut resizer = Resizer::new(ResizeAlg::Convolution(FilterType::Lanczos3));
    resizer
        .resize(&src_image.view(), &mut dst_view)
        .map_err(|e| ImageError::resize_failed(format!("Resize operation failed: {:?}", e)))?;

    alpha_mul_div
        .divide_alpha_inplace(&mut dst_view)
        .map_err(|e| ImageError::resize_failed(format!("Alpha divide failed: {:?}", e)))?;

    RgbaImage::from_raw(target_w, target_h, dst_image.into_vec())
        .ok_or_else(|| ImageError::resize_failed("Failed to create output image buffer"))
}

/// Dimensions that fit inside a `max_dim` square, preserving aspect ratio
///
/// Never enlarges; each side is at least 1 pixel.
pub fn fit_within(width: u32, height: u32, max_dim: u32) -> (u32, u32) {
    if width <= max_dim && height <= max_dim {
        return (width, height);
    }

    let scale = (max_dim as f64 / width as f64).min(max_dim as f64 / height as f64);
    let fitted_w = ((width as f64 * scale).round() as u32).clamp(1, max_dim);
    let fitted_h = ((height as f64 * scale).round() as u32).clamp(1, max_dim);
    (fitted_w, fitted_h)
}

/// Shrink an image to fit inside a `max_dim` square (thumbnail)
pub fn thumbnail(img: &DynamicImage, max_dim: u32) -> Result<DynamicImage, ImageError> {
    let (w, h) = fit_within(img.width(), img.height(), max_dim);
    if (w, h) == (img.width(), img.height()) {
        return Ok(img.clone());
    }

    let resized = resize_rgba(&img.to_rgba8(), w, h)?;
    Ok(DynamicImage::ImageRgba8(resized))
}
