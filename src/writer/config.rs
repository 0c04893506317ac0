//! Encoder settings for the supported output formats

use std::path::Path;

use image::codecs::png::CompressionType;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading encoder settings from a file
#[derive(Error, Debug)]
pub enum EncoderConfigError {
    #[error("failed to read encoder settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse encoder settings TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// PNG compression effort, mirroring the codec's presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PngCompression {
    Fast,
    Default,
    Best,
}

impl From<PngCompression> for CompressionType {
    fn from(level: PngCompression) -> Self {
        match level {
            PngCompression::Fast => CompressionType::Fast,
            PngCompression::Default => CompressionType::Default,
            PngCompression::Best => CompressionType::Best,
        }
    }
}

/// Per-format encoding settings.
///
/// WebP has no knob here: the `image` crate's WebP encoder is
/// lossless-only, so WebP output is always lossless.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncoderSettings {
    /// PNG compression preset
    pub png_compression: PngCompression,
    /// JPEG quality, 1-100
    pub jpeg_quality: u8,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            png_compression: PngCompression::Default,
            jpeg_quality: 95,
        }
    }
}

impl EncoderSettings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the PNG compression preset
    pub fn with_png_compression(mut self, level: PngCompression) -> Self {
        self.png_compression = level;
        self
    }

    /// Set the JPEG quality (1-100)
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// Load settings from a TOML file; omitted fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, EncoderConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
