//! Batch Image Saver - an output node for node-based image-generation hosts
//!
//! This library takes the batch of images produced by an upstream
//! generation run and writes each one to disk. Output directory and
//! filename are described by small token templates (`%time`, `%date`,
//! `%seed`, `%model`, `%counter`) resolved against the run's metadata.
//!
//! # Example
//!
//! ```no_run
//! use batch_image_saver::{BatchImageSaver, ImageBatch, OutputFormat};
//!
//! let mut saver = BatchImageSaver::new("/tmp/outputs");
//! let mut batch = ImageBatch::new();
//! batch.push_raw(vec![0u8; 512 * 512 * 4], 512, 512).unwrap();
//!
//! let output = saver
//!     .save_images(&batch, "%time_%seed", "%date", OutputFormat::Png, None, None)
//!     .unwrap();
//! assert_eq!(output.images.len(), 1);
//! ```

pub mod batch;
pub mod metadata;
pub mod template;
pub mod writer;

pub use batch::{BatchError, ImageBatch};
pub use template::{resolve, RunContext};
pub use writer::{EncoderConfigError, EncoderSettings, OutputFormat, PngCompression, WriteError};

use std::path::{Path, PathBuf};

use chrono::Local;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during a save invocation
#[derive(Debug, Error)]
pub enum SaveError {
    /// Error while encoding or writing files
    #[error("write error: {0}")]
    Write(#[from] WriteError),

    /// Error loading encoder settings
    #[error("encoder settings error: {0}")]
    Config(#[from] EncoderConfigError),
}

/// One file written during a save, as reported back to the host.
///
/// The host's UI layer uses these records to show output thumbnails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    /// Filename within the subfolder, extension included
    pub filename: String,
    /// Resolved path relative to the output root, `""` for the root itself
    pub subfolder: String,
}

/// Result of one save invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveOutput {
    /// Files written, in batch order
    pub images: Vec<SavedImage>,
}

/// The saver node.
///
/// Owns the output root directory, the encoder settings and the invocation
/// counter backing `%counter`. The counter is explicit per-node state; it
/// starts at zero, is incremented once per [`save_images`] call, and is
/// not persisted across restarts.
///
/// The host guarantees single-threaded node execution, so none of this
/// state needs locking.
///
/// [`save_images`]: BatchImageSaver::save_images
#[derive(Debug, Clone)]
pub struct BatchImageSaver {
    output_root: PathBuf,
    settings: EncoderSettings,
    counter: u64,
}

impl BatchImageSaver {
    /// Create a saver writing under the given output root
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            settings: EncoderSettings::default(),
            counter: 0,
        }
    }

    /// Replace the encoder settings
    pub fn with_settings(mut self, settings: EncoderSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Create a saver with encoder settings loaded from a TOML file
    pub fn from_settings_file(
        output_root: impl Into<PathBuf>,
        settings_path: &Path,
    ) -> Result<Self, SaveError> {
        let settings = EncoderSettings::from_file(settings_path)?;
        Ok(Self::new(output_root).with_settings(settings))
    }

    /// Number of save invocations so far, failed ones included
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Save a batch of images.
    ///
    /// `filename` and `path` are token templates; `path` is resolved
    /// relative to the output root, and a blank result means the root
    /// itself. `prompt` and `extra_pnginfo` are the host's generation
    /// metadata, searched for the seed and model name backing `%seed` and
    /// `%model`.
    ///
    /// Filesystem and encoder errors propagate unmodified; the batch stops
    /// at the first failed write and files already written stay on disk.
    pub fn save_images(
        &mut self,
        batch: &ImageBatch,
        filename: &str,
        path: &str,
        format: OutputFormat,
        prompt: Option<&Value>,
        extra_pnginfo: Option<&Value>,
    ) -> Result<SaveOutput, SaveError> {
        // A failed run still consumes a counter value
        self.counter += 1;

        let meta = metadata::extract(extra_pnginfo, prompt);
        let ctx = RunContext {
            seed: meta.seed,
            model_name: meta.model_name,
            counter: self.counter,
        };

        // Captured once so path and filename see the same instant
        let now = Local::now().naive_local();
        let stem = template::resolve(filename, &ctx, now);
        let relative = template::resolve(path, &ctx, now);

        let dir = if relative.trim().is_empty() {
            self.output_root.clone()
        } else {
            self.output_root.join(&relative)
        };

        let written = writer::write_batch(batch, &dir, &stem, format, &self.settings)?;

        let subfolder = normalize_subfolder(&relative);
        let images = written
            .into_iter()
            .map(|filename| SavedImage {
                filename,
                subfolder: subfolder.clone(),
            })
            .collect();

        Ok(SaveOutput { images })
    }
}

/// Normalize a resolved relative path for the host response: blank and
/// `"."` both mean the output root and report as `""`
fn normalize_subfolder(relative: &str) -> String {
    let trimmed = relative.trim();
    if trimmed.is_empty() || trimmed == "." {
        String::new()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn one_image_batch() -> ImageBatch {
        ImageBatch::from_images(vec![RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]))])
    }

    #[test]
    fn test_counter_increments_per_invocation() {
        let tmp = tempfile::tempdir().expect("Should create tempdir");
        let mut saver = BatchImageSaver::new(tmp.path());
        let batch = one_image_batch();

        for expected in 1..=3u64 {
            saver
                .save_images(&batch, "run_%counter", "", OutputFormat::Png, None, None)
                .expect("Should save");
            assert_eq!(saver.counter(), expected);
        }
        assert!(tmp.path().join("run_3.png").is_file());
    }

    #[test]
    fn test_blank_path_writes_under_root() {
        let tmp = tempfile::tempdir().expect("Should create tempdir");
        let mut saver = BatchImageSaver::new(tmp.path());

        let output = saver
            .save_images(
                &one_image_batch(),
                "img",
                "   ",
                OutputFormat::Png,
                None,
                None,
            )
            .expect("Should save");

        assert_eq!(output.images[0].subfolder, "");
        assert!(tmp.path().join("img.png").is_file());
    }

    #[test]
    fn test_dot_path_reports_empty_subfolder() {
        assert_eq!(normalize_subfolder("."), "");
        assert_eq!(normalize_subfolder(""), "");
        assert_eq!(normalize_subfolder("a/b"), "a/b");
    }

    #[test]
    fn test_metadata_feeds_templates() {
        let tmp = tempfile::tempdir().expect("Should create tempdir");
        let mut saver = BatchImageSaver::new(tmp.path());
        let prompt = serde_json::json!({
            "sampler": { "inputs": { "seed": 555 } },
            "loader": { "inputs": { "ckpt_name": "dreamshaper" } }
        });

        let output = saver
            .save_images(
                &one_image_batch(),
                "%model_%seed",
                "%model",
                OutputFormat::Png,
                Some(&prompt),
                None,
            )
            .expect("Should save");

        assert_eq!(output.images[0].filename, "dreamshaper_555.png");
        assert_eq!(output.images[0].subfolder, "dreamshaper");
        assert!(tmp.path().join("dreamshaper/dreamshaper_555.png").is_file());
    }

    #[test]
    fn test_missing_metadata_resolves_to_unknown() {
        let tmp = tempfile::tempdir().expect("Should create tempdir");
        let mut saver = BatchImageSaver::new(tmp.path());

        let output = saver
            .save_images(
                &one_image_batch(),
                "%seed",
                "",
                OutputFormat::Png,
                None,
                None,
            )
            .expect("Should save");

        assert_eq!(output.images[0].filename, "unknown.png");
    }

    #[test]
    fn test_from_settings_file() {
        let tmp = tempfile::tempdir().expect("Should create tempdir");
        let config_path = tmp.path().join("encoders.toml");
        std::fs::write(&config_path, "jpeg_quality = 80\n").expect("Should write config");

        let saver = BatchImageSaver::from_settings_file(tmp.path(), &config_path)
            .expect("Should load settings");
        assert_eq!(saver.settings.jpeg_quality, 80);
    }

    #[test]
    fn test_from_settings_file_missing() {
        let result =
            BatchImageSaver::from_settings_file("/tmp", Path::new("/nonexistent/enc.toml"));
        assert!(matches!(result, Err(SaveError::Config(_))));
    }
}
