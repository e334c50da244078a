//! WAVE encoding for synthesized clips.

use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::audio::Waveform;

use super::ExportError;

/// Mono 16-bit PCM header for the clip's sample rate.
pub fn wav_spec(waveform: &Waveform) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate: waveform.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Writes the clip as a RIFF/WAVE stream into a seekable writer.
pub fn write_wav_to<W: Write + Seek>(waveform: &Waveform, writer: W) -> Result<(), ExportError> {
    let mut wav = WavWriter::new(writer, wav_spec(waveform))?;
    for &s in &waveform.samples {
        wav.write_sample(s)?;
    }
    wav.finalize()?;
    Ok(())
}

/// Encodes the clip as an in-memory WAVE file.
pub fn encode_wav(waveform: &Waveform) -> Result<Vec<u8>, ExportError> {
    let mut cursor = Cursor::new(Vec::new());
    write_wav_to(waveform, &mut cursor)?;
    Ok(cursor.into_inner())
}

/// Writes the clip to `path` as a WAVE file.
pub fn write_wav(waveform: &Waveform, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_wav_to(waveform, BufWriter::new(file))
}
