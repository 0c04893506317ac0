//! Encoding and writing of image batches

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{FilterType, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ImageError, RgbaImage};
use serde::Deserialize;
use thiserror::Error;

use crate::batch::ImageBatch;

use super::config::EncoderSettings;

/// Errors that can occur while writing a batch to disk.
///
/// The first failing write aborts the batch; files written before the
/// failure are left in place.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Filesystem failure (directory creation, file creation, write)
    #[error("failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Codec failure while encoding an image
    #[error("failed to encode '{path}': {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
}

/// Output encoding selected on the node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Jpeg,
    Webp,
}

impl OutputFormat {
    /// File extension for this format, without the dot
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Webp => "webp",
        }
    }
}

/// Write every image of a batch into `dir`, in batch order.
///
/// The directory tree is created if missing. A single-image batch is
/// written as `{stem}.{ext}`; larger batches get a 1-based, zero-padded
/// index suffix (`{stem}_01.{ext}`, `{stem}_02.{ext}`, ...). No metadata
/// chunks are embedded.
///
/// Returns the filenames written. Stops at the first failed write.
pub fn write_batch(
    batch: &ImageBatch,
    dir: &Path,
    stem: &str,
    format: OutputFormat,
    settings: &EncoderSettings,
) -> Result<Vec<String>, WriteError> {
    fs::create_dir_all(dir).map_err(|source| WriteError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let use_index = batch.len() > 1;
    let mut written = Vec::with_capacity(batch.len());

    for (idx, image) in batch.iter().enumerate() {
        let filename = if use_index {
            format!("{}_{:02}.{}", stem, idx + 1, format.extension())
        } else {
            format!("{}.{}", stem, format.extension())
        };
        write_image(image, &dir.join(&filename), format, settings)?;
        written.push(filename);
    }

    Ok(written)
}

fn write_image(
    image: &RgbaImage,
    path: &Path,
    format: OutputFormat,
    settings: &EncoderSettings,
) -> Result<(), WriteError> {
    let file = File::create(path).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut out = BufWriter::new(file);

    let result = match format {
        OutputFormat::Png => {
            let encoder = PngEncoder::new_with_quality(
                &mut out,
                settings.png_compression.into(),
                FilterType::Adaptive,
            );
            image.write_with_encoder(encoder)
        }
        OutputFormat::Jpeg => {
            // JPEG has no alpha channel
            let rgb = DynamicImage::ImageRgba8(image.clone()).into_rgb8();
            let encoder = JpegEncoder::new_with_quality(&mut out, settings.jpeg_quality);
            rgb.write_with_encoder(encoder)
        }
        OutputFormat::Webp => {
            let encoder = WebPEncoder::new_lossless(&mut out);
            image.write_with_encoder(encoder)
        }
    };

    result.map_err(|source| WriteError::Encode {
        path: path.to_path_buf(),
        source,
    })
}
