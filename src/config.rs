//! Top-level generator configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audio::AudioConfig;
use crate::landscape::LandscapeConfig;

/// Errors that can occur while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Canvas {0}x{1} out of range: each side must be between 16 and 8192")]
    CanvasSize(u32, u32),
    #[error("Sample rate must be positive")]
    SampleRate,
    #[error("Duration {0}s out of range: must be between 1 and 600")]
    Duration(u32),
    #[error("Fraction '{0}' = {1} must lie in [0, 1]")]
    Fraction(&'static str, f64),
}

/// Settings for both generators.
///
/// Any field missing from a JSON config file takes its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundscapeConfig {
    pub landscape: LandscapeConfig,
    pub audio: AudioConfig,
}

impl SoundscapeConfig {
    /// Small square canvas; handy for previews.
    pub fn compact() -> Self {
        Self {
            landscape: LandscapeConfig::compact(),
            ..Default::default()
        }
    }

    /// Loads a config from a JSON file and validates it.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks ranges the generators rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let l = &self.landscape;
        let canvas_ok = |side: u32| (16..=8192).contains(&side);
        if !canvas_ok(l.width) || !canvas_ok(l.height) {
            return Err(ConfigError::CanvasSize(l.width, l.height));
        }
        for (name, value) in [
            ("star_band", l.star_band),
            ("ground_line", l.ground_line),
            ("glow_threshold", l.glow_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Fraction(name, value));
            }
        }

        let a = &self.audio;
        if a.sample_rate == 0 {
            return Err(ConfigError::SampleRate);
        }
        if !(1..=600).contains(&a.duration_secs) {
            return Err(ConfigError::Duration(a.duration_secs));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_are_valid() {
        SoundscapeConfig::default().validate().unwrap();
        SoundscapeConfig::compact().validate().unwrap();
    }

    #[test]
    fn default_is_portrait_sixteen_seconds() {
        let cfg = SoundscapeConfig::default();
        assert_eq!((cfg.landscape.width, cfg.landscape.height), (720, 1280));
        assert!(cfg.landscape.buildings);
        assert_eq!(cfg.audio.sample_rate, 44_100);
        assert_eq!(cfg.audio.duration_secs, 16);
    }

    #[test]
    fn rejects_bad_ranges() {
        let mut cfg = SoundscapeConfig::default();
        cfg.landscape.width = 8;
        assert!(matches!(cfg.validate(), Err(ConfigError::CanvasSize(8, 1280))));

        let mut cfg = SoundscapeConfig::default();
        cfg.audio.duration_secs = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::Duration(0))));

        let mut cfg = SoundscapeConfig::default();
        cfg.landscape.ground_line = 1.5;
        assert!(matches!(cfg.validate(), Err(ConfigError::Fraction("ground_line", _))));
    }

    #[test]
    fn loads_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"landscape": {{"width": 320, "height": 320, "star_count": 60}}, "audio": {{"duration_secs": 8}}}}"#
        )
        .unwrap();
        let cfg = SoundscapeConfig::from_json_file(file.path()).unwrap();
        assert_eq!(cfg.landscape.width, 320);
        assert_eq!(cfg.landscape.star_count, 60);
        assert_eq!(cfg.audio.duration_secs, 8);
        assert_eq!(cfg.audio.sample_rate, 44_100);
    }

    #[test]
    fn invalid_file_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"audio": {{"duration_secs": 9000}}}}"#).unwrap();
        assert!(matches!(
            SoundscapeConfig::from_json_file(file.path()),
            Err(ConfigError::Duration(9000))
        ));
    }
}
