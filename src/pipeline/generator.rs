//! Orchestration: measurements in, landscape and soundscape out.

use std::path::{Path, PathBuf};

use image::RgbImage;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::audio::{synthesize, tempo_bpm, Style, StylePreset, Waveform};
use crate::config::SoundscapeConfig;
use crate::export::{encode_png, encode_wav, write_png, write_wav, ExportError, PngExportOptions};
use crate::landscape::render_landscape;
use crate::measure::MeasurementTriplet;
use crate::retrieval::{
    obtain_or_fallback, DateWindow, GeoPoint, MeasurementSource, Provenance, RetrievalError,
    SourcedMeasurements,
};

use super::GenerationRequest;

/// Generates landscape and soundscape artifacts from measurements.
///
/// Holds only immutable configuration; every call builds its own generators
/// and buffers, so one instance can serve concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct Soundscape {
    config: SoundscapeConfig,
}

impl Soundscape {
    pub fn new(config: SoundscapeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SoundscapeConfig {
        &self.config
    }

    /// Renders both artifacts for a known triplet.
    pub fn render(
        &self,
        measurements: &MeasurementTriplet,
        style: Option<Style>,
    ) -> (RgbImage, Waveform) {
        let image = render_landscape(measurements, &self.config.landscape);
        let audio = synthesize(measurements, style, &self.config.audio);
        (image, audio)
    }

    /// Obtains measurements for the request (falling back if needed) and renders them.
    ///
    /// Fails only when the request itself is invalid (its window cannot be computed).
    pub fn generate(
        &self,
        source: &dyn MeasurementSource,
        request: &GenerationRequest,
    ) -> Result<GeneratedArtifacts, RetrievalError> {
        let window = request.window()?;
        let measurements = obtain_or_fallback(source, request.point, window);
        log::info!(
            "generating for ({:.4}, {:.4}) window {} [{}]: ndvi={:.4} lst={:.2} precip={:.2}",
            request.point.lat,
            request.point.lon,
            window,
            measurements.provenance.label(),
            measurements.triplet.ndvi,
            measurements.triplet.lst,
            measurements.triplet.precip
        );

        let (image, audio) = self.render(&measurements.triplet, request.style);
        Ok(GeneratedArtifacts {
            request: *request,
            measurements,
            image,
            audio,
        })
    }

    /// Generates many requests in parallel. Results keep the input order.
    pub fn generate_batch(
        &self,
        source: &dyn MeasurementSource,
        requests: &[GenerationRequest],
    ) -> Vec<Result<GeneratedArtifacts, RetrievalError>> {
        requests
            .par_iter()
            .map(|request| self.generate(source, request))
            .collect()
    }
}

/// The two artifacts of one request, plus where their inputs came from.
#[derive(Debug, Clone)]
pub struct GeneratedArtifacts {
    pub request: GenerationRequest,
    pub measurements: SourcedMeasurements,
    pub image: RgbImage,
    pub audio: Waveform,
}

/// Encoded artifact bytes, ready for download.
#[derive(Debug, Clone)]
pub struct EncodedArtifacts {
    pub png: Vec<u8>,
    pub wav: Vec<u8>,
}

/// Files written by [`GeneratedArtifacts::write_to_dir`].
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub image: PathBuf,
    pub audio: PathBuf,
    pub summary: PathBuf,
}

impl GeneratedArtifacts {
    /// Human-facing description of the result.
    pub fn summary(&self, config: &SoundscapeConfig) -> GenerationSummary {
        let m = &self.measurements.triplet;
        let preset = StylePreset::for_style(self.request.style);
        GenerationSummary {
            target_month: self.request.target_month.format("%Y-%m").to_string(),
            window: self.measurements.window,
            point: self.measurements.point,
            style: self.request.style.map(|s| s.name().to_string()),
            provenance: self.measurements.provenance,
            ndvi: round_to(m.ndvi, 4),
            lst_celsius: round_to(m.lst, 2),
            precip_mm: round_to(m.precip, 2),
            tempo_bpm: tempo_bpm(&m.normalized(), &preset, &config.audio),
            image_size: self.image.dimensions(),
            audio_secs: self.audio.duration_secs(),
        }
    }

    /// Encodes the image as PNG and the clip as WAVE.
    pub fn encode(&self) -> Result<EncodedArtifacts, ExportError> {
        Ok(EncodedArtifacts {
            png: encode_png(&self.image, &PngExportOptions::default())?,
            wav: encode_wav(&self.audio)?,
        })
    }

    /// Writes `{name}.png`, `{name}.wav`, and `{name}.json` into `dir`.
    pub fn write_to_dir(
        &self,
        dir: &Path,
        name: &str,
        config: &SoundscapeConfig,
    ) -> Result<ArtifactPaths, ExportError> {
        std::fs::create_dir_all(dir)?;
        let paths = ArtifactPaths {
            image: dir.join(format!("{name}.png")),
            audio: dir.join(format!("{name}.wav")),
            summary: dir.join(format!("{name}.json")),
        };
        write_png(&self.image, &paths.image, &PngExportOptions::default())?;
        write_wav(&self.audio, &paths.audio)?;
        let json = serde_json::to_string_pretty(&self.summary(config)).map_err(std::io::Error::from)?;
        std::fs::write(&paths.summary, json)?;
        Ok(paths)
    }
}

/// Result panel for one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub target_month: String,
    pub window: DateWindow,
    pub point: GeoPoint,
    pub style: Option<String>,
    pub provenance: Provenance,
    pub ndvi: f64,
    pub lst_celsius: f64,
    pub precip_mm: f64,
    pub tempo_bpm: f64,
    pub image_size: (u32, u32),
    pub audio_secs: f64,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
