//! Image buffer wrapper for captured frames
//!
//! Wraps `image::DynamicImage` with the transformations the gateway needs:
//! scaling, cropping, and conversion for encoding. All transformations
//! return new buffers and leave the original unchanged.

use image::GenericImageView;

use crate::{
    error::{CaptureError, CaptureResult},
    model::Region,
};

/// Wrapper around `image::DynamicImage` with transformation methods
#[derive(Clone, Debug)]
pub struct ImageBuffer {
    inner: image::DynamicImage,
}

impl ImageBuffer {
    /// Creates a new ImageBuffer from a DynamicImage
    pub fn new(image: image::DynamicImage) -> Self {
        Self { inner: image }
    }

    /// Generates a synthetic gradient test pattern at the given dimensions
    ///
    /// Used by the mock backend and by tests that need deterministic pixels.
    pub fn from_test_pattern(width: u32, height: u32) -> Self {
        let img = image::RgbaImage::from_fn(width, height, |x, y| {
            let r = ((x * 255) / width.max(1)) as u8;
            let g = ((y * 255) / height.max(1)) as u8;
            let b = (((x + y) * 255) / (width + height).max(1)) as u8;
            image::Rgba([r, g, b, 255])
        });

        Self::new(image::DynamicImage::ImageRgba8(img))
    }

    /// Scales the image by the given factor
    ///
    /// Uses Lanczos3 filtering. The factor is clamped to 0.1-2.0 and the
    /// result is never smaller than 1x1.
    pub fn scale(&self, factor: f32) -> CaptureResult<Self> {
        let factor = factor.clamp(0.1, 2.0);

        let (width, height) = self.dimensions();
        let new_width = (((width as f32) * factor) as u32).max(1);
        let new_height = (((height as f32) * factor) as u32).max(1);

        if new_width == width && new_height == height {
            return Ok(self.clone());
        }

        let scaled = self
            .inner
            .resize(new_width, new_height, image::imageops::FilterType::Lanczos3);

        Ok(Self::new(scaled))
    }

    /// Crops the image to the specified region
    ///
    /// # Errors
    ///
    /// Returns `CaptureError::InvalidParameter` if the region does not fit
    /// within the image bounds.
    pub fn crop(&self, region: Region) -> CaptureResult<Self> {
        let (img_width, img_height) = self.dimensions();

        if region.x >= img_width || region.y >= img_height {
            return Err(CaptureError::InvalidParameter {
                parameter: "region".to_string(),
                reason: format!(
                    "Region origin ({}, {}) is outside image bounds ({}x{})",
                    region.x, region.y, img_width, img_height
                ),
            });
        }

        if region.x + region.width > img_width || region.y + region.height > img_height {
            return Err(CaptureError::InvalidParameter {
                parameter: "region".to_string(),
                reason: format!(
                    "Region ({}x{} at {},{}) extends beyond image bounds ({}x{})",
                    region.width, region.height, region.x, region.y, img_width, img_height
                ),
            });
        }

        let mut cloned = self.inner.clone();
        let cropped = cloned.crop(region.x, region.y, region.width, region.height);

        Ok(Self::new(cropped))
    }

    /// Returns the dimensions of the image as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.inner.dimensions()
    }

    /// Converts to an RGBA8 buffer for encoding
    pub fn to_rgba8(&self) -> image::RgbaImage {
        self.inner.to_rgba8()
    }

    /// Returns a reference to the underlying DynamicImage
    pub fn inner(&self) -> &image::DynamicImage {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_pattern_dimensions() {
        let img = ImageBuffer::from_test_pattern(1920, 1080);
        assert_eq!(img.dimensions(), (1920, 1080));
    }

    #[test]
    fn test_scale_down() {
        let img = ImageBuffer::from_test_pattern(1920, 1080);
        let scaled = img.scale(0.5).unwrap();
        assert_eq!(scaled.dimensions(), (960, 540));
    }

    #[test]
    fn test_scale_up() {
        let img = ImageBuffer::from_test_pattern(100, 100);
        let scaled = img.scale(2.0).unwrap();
        assert_eq!(scaled.dimensions(), (200, 200));
    }

    #[test]
    fn test_scale_identity_is_noop() {
        let img = ImageBuffer::from_test_pattern(640, 480);
        let scaled = img.scale(1.0).unwrap();
        assert_eq!(scaled.dimensions(), (640, 480));
    }

    #[test]
    fn test_scale_clamps_out_of_range_factor() {
        let img = ImageBuffer::from_test_pattern(100, 100);

        // 5.0 clamps to 2.0
        let scaled = img.scale(5.0).unwrap();
        assert_eq!(scaled.dimensions(), (200, 200));

        // 0.01 clamps to 0.1
        let scaled = img.scale(0.01).unwrap();
        assert_eq!(scaled.dimensions(), (10, 10));
    }

    #[test]
    fn test_crop_within_bounds() {
        let img = ImageBuffer::from_test_pattern(1920, 1080);
        let cropped = img.crop(Region::new(100, 100, 800, 600)).unwrap();
        assert_eq!(cropped.dimensions(), (800, 600));
    }

    #[test]
    fn test_crop_origin_out_of_bounds() {
        let img = ImageBuffer::from_test_pattern(100, 100);
        let result = img.crop(Region::new(200, 0, 10, 10));
        assert!(matches!(result, Err(CaptureError::InvalidParameter { .. })));
    }

    #[test]
    fn test_crop_extent_out_of_bounds() {
        let img = ImageBuffer::from_test_pattern(100, 100);
        let result = img.crop(Region::new(50, 50, 100, 100));
        assert!(matches!(result, Err(CaptureError::InvalidParameter { .. })));
    }

    #[test]
    fn test_scale_then_crop() {
        let img = ImageBuffer::from_test_pattern(1920, 1080);
        let scaled = img.scale(0.5).unwrap();
        let cropped = scaled.crop(Region::new(100, 100, 400, 300)).unwrap();
        assert_eq!(cropped.dimensions(), (400, 300));
    }
}
