//! Batch writer: encodes each image of a batch and writes it to disk
//!
//! The writer owns directory creation, per-image filename disambiguation
//! and format dispatch. Encoding itself is delegated to the `image` crate;
//! per-format knobs live in [`EncoderSettings`].

mod config;
mod write;

pub use config::{EncoderConfigError, EncoderSettings, PngCompression};
pub use write::{write_batch, OutputFormat, WriteError};
