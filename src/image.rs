//! Image preparation for multimodal submissions.
//!
//! Uploaded plan images are normalized before transmission: converted to
//! 3-channel color and uniformly downscaled so the longer edge never
//! exceeds [`MAX_IMAGE_EDGE`]. Prepared images are transient and recomputed
//! per submission.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

use crate::chat::ImageMime;
use crate::error::AssistantError;

/// Longest edge, in pixels, accepted by the remote service.
pub const MAX_IMAGE_EDGE: u32 = 4096;

/// Normalize a decoded image for transmission.
///
/// Converts to RGB8 if needed; if the longer edge exceeds
/// [`MAX_IMAGE_EDGE`], downscales with Lanczos3 so the longer edge equals
/// exactly that bound, preserving aspect ratio to within one-pixel
/// rounding. In-bounds images pass through with dimensions unchanged.
pub fn normalize(image: DynamicImage) -> DynamicImage {
    let image = match image {
        DynamicImage::ImageRgb8(_) => image,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    };

    let (width, height) = (image.width(), image.height());
    let longest = width.max(height);
    if longest <= MAX_IMAGE_EDGE {
        return image;
    }

    let ratio = f64::from(MAX_IMAGE_EDGE) / f64::from(longest);
    let new_width = ((f64::from(width) * ratio).round() as u32).max(1);
    let new_height = ((f64::from(height) * ratio).round() as u32).max(1);
    image.resize_exact(new_width, new_height, FilterType::Lanczos3)
}

/// An image normalized and encoded for transmission to the model service.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    width: u32,
    height: u32,
    mime: ImageMime,
    data: Vec<u8>,
}

impl PreparedImage {
    /// Decode and normalize an uploaded raster image.
    ///
    /// Unsupported or corrupt input is rejected here, before any remote
    /// call is attempted.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, AssistantError> {
        let decoded = image::load_from_memory(raw).map_err(|err| {
            AssistantError::InvalidInput(format!("unsupported or corrupt image: {err}"))
        })?;
        Self::from_image(decoded)
    }

    /// Normalize an already decoded image.
    pub fn from_image(image: DynamicImage) -> Result<Self, AssistantError> {
        let normalized = normalize(image);
        let mut data = Vec::new();
        normalized
            .write_to(&mut Cursor::new(&mut data), ImageFormat::Jpeg)
            .map_err(|err| {
                AssistantError::InvalidInput(format!("failed to encode image: {err}"))
            })?;
        Ok(Self {
            width: normalized.width(),
            height: normalized.height(),
            mime: ImageMime::JPEG,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mime(&self) -> &ImageMime {
        &self.mime
    }

    /// Encoded image bytes ready for transmission.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
