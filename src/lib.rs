//! Deterministic landscape and soundscape generator.
//!
//! This crate turns three monthly satellite measurements (vegetation index,
//! land-surface temperature, precipitation) into a procedurally drawn
//! landscape image and a short synthesized audio clip. Identical
//! measurements always produce identical artifacts.

pub mod measure;
pub mod rng;
pub mod landscape;
pub mod audio;
pub mod export;
pub mod retrieval;
pub mod pipeline;
pub mod config;

pub use measure::{normalize, MeasurementTriplet, NormalizedTriplet};
pub use landscape::{render_landscape, LandscapeConfig};
pub use audio::{synthesize, AudioConfig, Style, Waveform};
pub use retrieval::{DateWindow, GeoPoint, MeasurementSource, Provenance};
pub use pipeline::{GeneratedArtifacts, GenerationRequest, Soundscape};
pub use config::{ConfigError, SoundscapeConfig};
