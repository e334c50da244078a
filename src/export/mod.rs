//! Export module for encoding generated artifacts.
//!
//! Landscapes are written as 8-bit RGB PNG, soundscapes as mono 16-bit PCM
//! WAVE, either to memory or to disk.

mod png;
mod wav;

use thiserror::Error;

pub use png::{encode_png, write_png, write_png_to, PngExportOptions};
pub use wav::{encode_wav, wav_spec, write_wav, write_wav_to};

/// Errors that can occur while encoding or writing artifacts.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("WAVE encoding error: {0}")]
    Wav(#[from] hound::Error),
}
