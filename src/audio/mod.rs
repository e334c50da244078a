//! Soundscape synthesizer.
//!
//! Renders a fixed-length mono clip whose tonal balance, pitch, tempo, and
//! rain texture follow the measurement triplet.

mod config;
mod style;
mod synth;

pub use config::{AudioConfig, Partial};
pub use style::{Style, StylePreset};
pub use synth::{
    gate_envelope, noise_amplitude, noise_texture, peak_normalize, quantize, synth_component,
    synth_frequency, synthesize, tempo_bpm, tonal_component, Waveform, FULL_SCALE,
};
