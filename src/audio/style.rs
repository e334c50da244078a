//! Named style presets.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Musical style applied on top of the measurement-driven synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Slow, acoustic-forward, barely driven.
    Classical,
    /// Mid tempo, balanced, noticeably driven.
    Rock,
    /// Fast, synth-forward.
    Edm,
}

impl Style {
    pub fn all() -> [Style; 3] {
        [Style::Classical, Style::Rock, Style::Edm]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Style::Classical => "classical",
            Style::Rock => "rock",
            Style::Edm => "edm",
        }
    }

    pub fn preset(&self) -> StylePreset {
        match self {
            Style::Classical => StylePreset {
                base_tempo_bpm: 74.0,
                tonal_gain: 1.15,
                synth_gain: 0.65,
                distortion: 0.02,
            },
            Style::Rock => StylePreset {
                base_tempo_bpm: 96.0,
                tonal_gain: 0.95,
                synth_gain: 0.85,
                distortion: 0.12,
            },
            Style::Edm => StylePreset {
                base_tempo_bpm: 118.0,
                tonal_gain: 0.7,
                synth_gain: 1.2,
                distortion: 0.08,
            },
        }
    }
}

/// Tempo, balance, and drive for one style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StylePreset {
    pub base_tempo_bpm: f64,
    pub tonal_gain: f64,
    pub synth_gain: f64,
    pub distortion: f64,
}

impl StylePreset {
    /// Unstyled rendering: unit gains, no soft clipping.
    pub fn neutral() -> Self {
        Self {
            base_tempo_bpm: 80.0,
            tonal_gain: 1.0,
            synth_gain: 1.0,
            distortion: 0.0,
        }
    }

    pub fn for_style(style: Option<Style>) -> Self {
        style.map_or_else(Self::neutral, |s| s.preset())
    }
}
