//! Landscape canvas configuration.

use serde::{Deserialize, Serialize};

/// Edge length of the canvas the layout constants were authored against.
///
/// Pixel lengths (tree trunks, window cells, water spacing) are expressed for
/// a 320×320 canvas and scaled to the configured size.
pub const REFERENCE_SIZE: f64 = 320.0;

/// Configuration for the landscape compositor.
///
/// Fractions are of canvas height unless noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandscapeConfig {
    pub width: u32,
    pub height: u32,

    // Starfield
    pub star_count: u32,
    pub star_band: f64, // stars are scattered above this fraction

    // Ground
    pub ground_line: f64, // ground band starts at this fraction

    // Atmosphere
    pub glow_threshold: f64, // lst_n above which the warm overlay appears
    pub glow_max_alpha: f64,

    // Town
    pub buildings: bool,
}

impl Default for LandscapeConfig {
    fn default() -> Self {
        Self::portrait()
    }
}

impl LandscapeConfig {
    /// Phone-portrait canvas with buildings. The default.
    pub fn portrait() -> Self {
        Self {
            width: 720,
            height: 1280,
            star_count: 140,
            star_band: 0.45,
            ground_line: 0.52,
            glow_threshold: 0.3,
            glow_max_alpha: 55.0,
            buildings: true,
        }
    }

    /// Small square canvas.
    pub fn compact() -> Self {
        Self {
            width: 320,
            height: 320,
            star_count: 60,
            ..Self::portrait()
        }
    }

    /// Horizontal scale relative to the reference canvas.
    pub fn scale_x(&self) -> f64 {
        self.width as f64 / REFERENCE_SIZE
    }

    /// Vertical scale relative to the reference canvas.
    pub fn scale_y(&self) -> f64 {
        self.height as f64 / REFERENCE_SIZE
    }

    /// Scale for round features (stars, crowns, the celestial body).
    pub fn scale(&self) -> f64 {
        self.scale_x().min(self.scale_y())
    }

    /// Row where the ground band begins.
    pub fn ground_y(&self) -> i32 {
        (self.height as f64 * self.ground_line) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_matches_reference_scale() {
        let cfg = LandscapeConfig::compact();
        assert_eq!(cfg.scale(), 1.0);
        assert_eq!(cfg.ground_y(), 166);
    }

    #[test]
    fn portrait_scales_by_shorter_axis() {
        let cfg = LandscapeConfig::portrait();
        assert_eq!(cfg.scale_x(), 2.25);
        assert_eq!(cfg.scale_y(), 4.0);
        assert_eq!(cfg.scale(), 2.25);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: LandscapeConfig = serde_json::from_str(r#"{"buildings": false}"#).unwrap();
        assert!(!cfg.buildings);
        assert_eq!(cfg.width, 720);
    }
}
