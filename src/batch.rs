//! In-memory image batches handed over by the host

use image::RgbaImage;
use thiserror::Error;

/// Errors building a batch from raw host buffers
#[derive(Debug, Error)]
pub enum BatchError {
    /// Pixel buffer does not match the declared dimensions
    #[error("pixel buffer of {len} bytes does not match {width}x{height} RGBA image")]
    DimensionMismatch { len: usize, width: u32, height: u32 },
}

/// An ordered batch of RGBA images produced by one generation run.
///
/// Order is significant: when several images land in the same resolved
/// directory, the index suffix in their filenames follows batch order.
#[derive(Debug, Clone, Default)]
pub struct ImageBatch {
    images: Vec<RgbaImage>,
}

impl ImageBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a batch from already-decoded images
    pub fn from_images(images: Vec<RgbaImage>) -> Self {
        Self { images }
    }

    /// Append an image to the batch
    pub fn push(&mut self, image: RgbaImage) {
        self.images.push(image);
    }

    /// Append an image from a raw RGBA pixel buffer as delivered by the
    /// host (row-major, 4 bytes per pixel)
    pub fn push_raw(&mut self, pixels: Vec<u8>, width: u32, height: u32) -> Result<(), BatchError> {
        let len = pixels.len();
        let image = RgbaImage::from_raw(width, height, pixels).ok_or(
            BatchError::DimensionMismatch { len, width, height },
        )?;
        self.images.push(image);
        Ok(())
    }

    /// Number of images in the batch
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the batch contains no images
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Iterate over the images in batch order
    pub fn iter(&self) -> impl Iterator<Item = &RgbaImage> {
        self.images.iter()
    }
}
