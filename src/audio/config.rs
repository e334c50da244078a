//! Audio synthesis configuration.

use serde::{Deserialize, Serialize};

/// One sine partial of the tonal blend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Partial {
    pub frequency_hz: f64,
    pub weight: f64,
}

/// Configuration for the soundscape synthesizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub sample_rate: u32,
    pub duration_secs: u32,

    // Tempo
    pub tempo_span_bpm: f64, // added on top of the style base at lst_n = 1

    // Tonal blend (vegetation)
    pub partials: Vec<Partial>,
    pub amplitude_floor: f64, // level at zero vegetation / zero rain

    // Square-wave synth (rain)
    pub synth_base_hz: f64,
    pub synth_span_hz: f64,

    // Rhythm gate
    pub gate_floor: f64, // level during the "off" half of each beat

    // Rain texture
    pub noise_gain: f64,

    pub normalize_epsilon: f64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            duration_secs: 16,
            tempo_span_bpm: 72.0,
            partials: vec![
                Partial { frequency_hz: 220.0, weight: 0.6 },
                Partial { frequency_hz: 330.0, weight: 0.3 },
                Partial { frequency_hz: 440.0, weight: 0.2 },
            ],
            amplitude_floor: 0.15,
            synth_base_hz: 110.0,
            synth_span_hz: 330.0,
            gate_floor: 0.35,
            noise_gain: 0.04,
            normalize_epsilon: 1e-8,
        }
    }
}

impl AudioConfig {
    /// Default settings with a different clip length.
    pub fn with_duration(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            ..Default::default()
        }
    }

    /// Total number of samples in one clip.
    pub fn sample_count(&self) -> usize {
        self.duration_secs as usize * self.sample_rate as usize
    }

    /// Scales a `[0, 1]` driver into `[floor, 1]`, so a component never goes silent.
    pub fn level(&self, driver: f64) -> f64 {
        self.amplitude_floor + (1.0 - self.amplitude_floor) * driver
    }
}
