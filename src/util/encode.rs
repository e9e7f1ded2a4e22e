//! Image encoding
//!
//! Converts `ImageBuffer` frames into compressed byte vectors in PNG, JPEG,
//! or WebP. Handles format-specific requirements: JPEG has no alpha channel,
//! PNG maps quality onto compression levels, and WebP is lossless in the
//! image crate (its quality parameter is ignored).

use std::io::Cursor;

use image::{
    ImageEncoder,
    codecs::{
        jpeg::JpegEncoder,
        png::{CompressionType, FilterType, PngEncoder},
        webp::WebPEncoder,
    },
};

use crate::{
    capture::ImageBuffer,
    error::{CaptureError, CaptureResult},
    model::{CaptureOptions, ImageFormat},
};

/// Maps a quality value (0-100) to a PNG compression type
///
/// PNG has no quality knob, so quality ranges select a compression level:
/// 0-33 fast, 34-66 default, 67-100 best.
pub fn compression_type_from_quality(quality: u8) -> CompressionType {
    match quality {
        0..=33 => CompressionType::Fast,
        34..=66 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

/// Encodes an image as PNG with the given compression level
pub fn encode_png(buffer: &ImageBuffer, compression: CompressionType) -> CaptureResult<Vec<u8>> {
    let mut output = Vec::new();

    // Adaptive filter picks the best filter per scanline
    let encoder =
        PngEncoder::new_with_quality(Cursor::new(&mut output), compression, FilterType::Adaptive);

    let rgba = buffer.to_rgba8();
    let (width, height) = rgba.dimensions();

    encoder
        .write_image(rgba.as_raw(), width, height, image::ExtendedColorType::Rgba8)
        .map_err(|e| CaptureError::EncodingFailed {
            format: "png".to_string(),
            reason: e.to_string(),
        })?;

    Ok(output)
}

/// Encodes an image as JPEG with the given quality (clamped to 1-100)
///
/// JPEG does not support alpha channels; the frame is converted to RGB
/// before encoding.
pub fn encode_jpeg(buffer: &ImageBuffer, quality: u8) -> CaptureResult<Vec<u8>> {
    let quality = quality.clamp(1, 100);

    let mut output = Vec::new();
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut output), quality);

    let rgb = buffer.inner().to_rgb8();
    let (width, height) = rgb.dimensions();

    if width == 0 || height == 0 {
        return Err(CaptureError::InvalidParameter {
            parameter: "dimensions".to_string(),
            reason: "Image dimensions must be > 0".to_string(),
        });
    }

    encoder
        .write_image(rgb.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .map_err(|e| CaptureError::EncodingFailed {
            format: "jpeg".to_string(),
            reason: e.to_string(),
        })?;

    Ok(output)
}

/// Encodes an image as WebP (lossless; the image crate has no lossy encoder)
pub fn encode_webp(buffer: &ImageBuffer) -> CaptureResult<Vec<u8>> {
    let mut output = Vec::new();
    let encoder = WebPEncoder::new_lossless(Cursor::new(&mut output));

    let rgba = buffer.to_rgba8();
    let (width, height) = rgba.dimensions();

    encoder
        .write_image(rgba.as_raw(), width, height, image::ExtendedColorType::Rgba8)
        .map_err(|e| CaptureError::EncodingFailed {
            format: "webp".to_string(),
            reason: e.to_string(),
        })?;

    Ok(output)
}

/// Encodes an image according to the format and quality in the options
pub fn encode_image(buffer: &ImageBuffer, opts: &CaptureOptions) -> CaptureResult<Vec<u8>> {
    match opts.format {
        ImageFormat::Png => encode_png(buffer, compression_type_from_quality(opts.quality)),
        ImageFormat::Jpeg => encode_jpeg(buffer, opts.quality),
        ImageFormat::Webp => encode_webp(buffer),
    }
}
