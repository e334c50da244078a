//! Scene layers and the measurement-driven parameters behind them.
//!
//! Each layer is drawn in the fixed z-order given by [`LayerId`]. Layers that
//! scatter features draw from the shared per-render generator in that same
//! order, so the draw sequence is stable for a given triplet.

use glam::DVec3;

use crate::measure::NormalizedTriplet;
use crate::rng::DeterministicRng;

use super::canvas::Canvas;
use super::config::LandscapeConfig;

const STAR_WHITE: u8 = 255;
const WATER_COLOR: [u8; 3] = [72, 142, 210];
const TRUNK_COLOR: [u8; 3] = [90, 50, 20];
const BUILDING_COLOR: [u8; 3] = [170, 168, 150];
const WINDOW_COLOR: [u8; 3] = [255, 238, 170];
const GLOW_COLOR: [u8; 3] = [255, 245, 180];
const PLANET_FILL: [u8; 3] = [255, 230, 130];
const PLANET_OUTLINE: [u8; 3] = [255, 255, 255];

/// Probability threshold above which a window cell is lit.
const WINDOW_LIT_ABOVE: f64 = 0.35;

/// Layer identity, declared in drawing order (back to front).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LayerId {
    Sky,
    Stars,
    Ground,
    Water,
    Vegetation,
    Glow,
    Buildings,
    CelestialBody,
}

impl LayerId {
    /// Every layer, back to front.
    pub fn all() -> [LayerId; 8] {
        [
            LayerId::Sky,
            LayerId::Stars,
            LayerId::Ground,
            LayerId::Water,
            LayerId::Vegetation,
            LayerId::Glow,
            LayerId::Buildings,
            LayerId::CelestialBody,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            LayerId::Sky => "sky",
            LayerId::Stars => "stars",
            LayerId::Ground => "ground",
            LayerId::Water => "water",
            LayerId::Vegetation => "vegetation",
            LayerId::Glow => "glow",
            LayerId::Buildings => "buildings",
            LayerId::CelestialBody => "celestial-body",
        }
    }
}

/// Read-only inputs shared by every layer of one render.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub params: NormalizedTriplet,
    pub config: &'a LandscapeConfig,
}

/// A drawing stage of the landscape.
pub trait SceneLayer: Send + Sync {
    /// Position of this layer in the z-order.
    fn id(&self) -> LayerId;

    /// Draws onto the canvas, consuming draws from `rng` if it scatters features.
    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>, rng: &mut DeterministicRng);
}

// ---------------------------------------------------------------------------
// Parameter mapping
// ---------------------------------------------------------------------------

/// Sky gradient endpoints `(top, bottom)`; both warm up with `lst_n`.
pub fn sky_colors(n: &NormalizedTriplet) -> ([u8; 3], [u8; 3]) {
    let l = n.lst_n;
    let top = [
        18 + (28.0 * l) as u8,
        20 + (30.0 * l) as u8,
        58 + (80.0 * l) as u8,
    ];
    let bottom = [255, 245, 170 + (65.0 * l) as u8];
    (top, bottom)
}

/// Ground band color; greener with `ndvi_n`.
pub fn ground_color(n: &NormalizedTriplet) -> [u8; 3] {
    [102, 78 + (75.0 * n.ndvi_n) as u8, 52]
}

/// A lake or river shape below the ground line (inclusive pixel bounds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaterBody {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl WaterBody {
    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }
}

/// Water bodies, laid out left to right; count and size grow with `precip_n`.
///
/// Shapes may overlap.
pub fn water_bodies(n: &NormalizedTriplet, config: &LandscapeConfig) -> Vec<WaterBody> {
    let p = n.precip_n;
    let (w, sy) = (config.width as f64, config.scale_y());
    let ground_y = config.ground_y();
    let count = (1.0 + p * 3.0) as i32;

    (0..count)
        .map(|i| {
            let x0 = ((i as f64 / count.max(1) as f64) * w * 0.75) as i32;
            let x1 = (x0 as f64 + w * (0.4 + p * 0.2)) as i32;
            let y0 = ground_y + ((35.0 + i as f64 * 16.0) * sy) as i32;
            let y1 = y0 + ((20.0 + p * 35.0) * sy) as i32;
            WaterBody { x0, y0, x1, y1 }
        })
        .collect()
}

/// Number of trees; grows with `ndvi_n`.
pub fn tree_count(n: &NormalizedTriplet) -> u32 {
    (3.0 + n.ndvi_n * 16.0) as u32
}

/// Crown radius in pixels for the given canvas.
pub fn crown_radius(n: &NormalizedTriplet, config: &LandscapeConfig) -> i32 {
    ((8.0 + n.ndvi_n * 8.0) * config.scale()) as i32
}

/// Crown color; greener with `ndvi_n`.
pub fn crown_color(n: &NormalizedTriplet) -> [u8; 3] {
    [30, 110 + (n.ndvi_n * 120.0) as u8, 40]
}

/// Number of buildings; grows as vegetation thins out.
pub fn building_count(n: &NormalizedTriplet) -> u32 {
    (2.0 + (1.0 - n.ndvi_n) * 5.0) as u32
}

/// Opacity of the warm atmospheric overlay, or `None` below the threshold.
pub fn glow_alpha(n: &NormalizedTriplet, config: &LandscapeConfig) -> Option<u8> {
    (n.lst_n > config.glow_threshold).then(|| (config.glow_max_alpha * n.lst_n) as u8)
}

/// Overall scene brightness; rises with `lst_n`.
pub fn brightness(n: &NormalizedTriplet) -> i32 {
    (70.0 + n.lst_n * 120.0) as i32
}

/// Celestial body radius in pixels.
pub fn celestial_radius(n: &NormalizedTriplet, config: &LandscapeConfig) -> i32 {
    ((22.0 + brightness(n) as f64 * 0.07) * config.scale()) as i32
}

/// Rounds a scaled reference length to at least one pixel.
fn px(length: f64, scale: f64) -> i32 {
    ((length * scale) as i32).max(1)
}

// ---------------------------------------------------------------------------
// Layers
// ---------------------------------------------------------------------------

/// Vertical two-color gradient over the full canvas.
pub struct SkyLayer;

impl SceneLayer for SkyLayer {
    fn id(&self) -> LayerId {
        LayerId::Sky
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>, _rng: &mut DeterministicRng) {
        let (top, bottom) = sky_colors(&scene.params);
        let top = DVec3::new(top[0] as f64, top[1] as f64, top[2] as f64);
        let bottom = DVec3::new(bottom[0] as f64, bottom[1] as f64, bottom[2] as f64);
        let height = canvas.height();
        let denom = height.saturating_sub(1).max(1) as f64;

        for y in 0..height {
            let c = top.lerp(bottom, y as f64 / denom);
            canvas.fill_row(y, [c.x as u8, c.y as u8, c.z as u8]);
        }
    }
}

/// Small warm-white dots in the upper band of the sky.
pub struct StarsLayer;

impl SceneLayer for StarsLayer {
    fn id(&self) -> LayerId {
        LayerId::Stars
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>, rng: &mut DeterministicRng) {
        let cfg = scene.config;
        let (w, h, s) = (cfg.width as f64, cfg.height as f64, cfg.scale());
        for _ in 0..cfg.star_count {
            let x = rng.uniform(0.0, w) as i32;
            let y = rng.uniform(0.0, h * cfg.star_band) as i32;
            let size = (rng.uniform(1.0, 3.0) * s) as i32;
            let blue = rng.uniform(180.0, 255.0) as u8;
            canvas.fill_ellipse(x, y, x + size, y + size, [STAR_WHITE, STAR_WHITE, blue]);
        }
    }
}

/// Solid ground band from the ground line to the bottom edge.
pub struct GroundLayer;

impl SceneLayer for GroundLayer {
    fn id(&self) -> LayerId {
        LayerId::Ground
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>, _rng: &mut DeterministicRng) {
        let ground_y = scene.config.ground_y();
        canvas.fill_rect(
            0,
            ground_y,
            canvas.width() as i32,
            canvas.height() as i32,
            ground_color(&scene.params),
        );
    }
}

/// Rounded water shapes below the ground line.
pub struct WaterLayer;

impl SceneLayer for WaterLayer {
    fn id(&self) -> LayerId {
        LayerId::Water
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>, _rng: &mut DeterministicRng) {
        let radius = px(8.0, scene.config.scale());
        for body in water_bodies(&scene.params, scene.config) {
            canvas.fill_rounded_rect(body.x0, body.y0, body.x1, body.y1, radius, WATER_COLOR);
        }
    }
}

/// Trunk-and-crown trees scattered over the ground region.
pub struct VegetationLayer;

impl SceneLayer for VegetationLayer {
    fn id(&self) -> LayerId {
        LayerId::Vegetation
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>, rng: &mut DeterministicRng) {
        let cfg = scene.config;
        let n = &scene.params;
        let (sx, sy, s) = (cfg.scale_x(), cfg.scale_y(), cfg.scale());
        let (w, h) = (cfg.width as f64, cfg.height as f64);
        let ground_y = cfg.ground_y() as f64;

        let trunk_w = px(4.0, s);
        let trunk_h = px(12.0, s);
        let r = crown_radius(n, cfg);
        let crown = crown_color(n);

        for _ in 0..tree_count(n) {
            let tx = rng.uniform(20.0 * sx, w - 20.0 * sx) as i32;
            let ty = rng.uniform(ground_y - 40.0 * sy, h - 55.0 * sy) as i32;
            canvas.fill_rect(tx, ty, tx + trunk_w, ty + trunk_h, TRUNK_COLOR);
            canvas.fill_ellipse(tx - r, ty - r, tx + trunk_w + r, ty + r, crown);
        }
    }
}

/// Warm translucent haze over the whole canvas on hot months.
pub struct GlowLayer;

impl SceneLayer for GlowLayer {
    fn id(&self) -> LayerId {
        LayerId::Glow
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>, _rng: &mut DeterministicRng) {
        if let Some(alpha) = glow_alpha(&scene.params, scene.config) {
            let [r, g, b] = GLOW_COLOR;
            canvas.overlay([r, g, b, alpha]);
        }
    }
}

/// Town buildings standing on the ground line, with randomly lit windows.
pub struct BuildingsLayer;

impl SceneLayer for BuildingsLayer {
    fn id(&self) -> LayerId {
        LayerId::Buildings
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>, rng: &mut DeterministicRng) {
        let cfg = scene.config;
        let (sx, sy) = (cfg.scale_x(), cfg.scale_y());
        let ground_y = cfg.ground_y();

        let (row_step, col_step) = (px(10.0, sy), px(8.0, sx));
        let (win_w, win_h) = (px(3.0, sx), px(4.0, sy));
        let (inset_x, inset_y) = (px(4.0, sx), px(6.0, sy));

        for _ in 0..building_count(&scene.params) {
            let bw = (rng.uniform(18.0, 38.0) * sx) as i32;
            let bh = (rng.uniform(35.0, 85.0) * sy) as i32;
            let bx = rng.uniform(0.0, (cfg.width as i32 - bw) as f64) as i32;
            let by = ground_y - bh;
            canvas.fill_rect(bx, by, bx + bw, ground_y, BUILDING_COLOR);

            for wy in (by + inset_y..ground_y - inset_y).step_by(row_step as usize) {
                for wx in (bx + inset_x..bx + bw - inset_x).step_by(col_step as usize) {
                    if rng.unit() > WINDOW_LIT_ABOVE {
                        canvas.fill_rect(wx, wy, wx + win_w, wy + win_h, WINDOW_COLOR);
                    }
                }
            }
        }
    }
}

/// Outlined planet disc in the upper right.
pub struct CelestialBodyLayer;

impl SceneLayer for CelestialBodyLayer {
    fn id(&self) -> LayerId {
        LayerId::CelestialBody
    }

    fn draw(&self, canvas: &mut Canvas, scene: &Scene<'_>, _rng: &mut DeterministicRng) {
        let cfg = scene.config;
        let cx = (cfg.width as f64 * 0.8) as i32;
        let cy = (cfg.height as f64 * 0.2) as i32;
        let r = celestial_radius(&scene.params, cfg);
        canvas.fill_ellipse_outlined(
            cx - r,
            cy - r,
            cx + r,
            cy + r,
            PLANET_FILL,
            PLANET_OUTLINE,
            px(3.0, cfg.scale()),
        );
    }
}
