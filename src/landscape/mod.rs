//! Procedural landscape compositor.
//!
//! Turns a measurement triplet into a layered raster scene: sky gradient,
//! stars, ground, water, trees, optional warm haze, optional town, and a
//! planet. Layer parameters come from the normalized measurements; scattered
//! features come from a generator seeded by them.

mod canvas;
mod compositor;
mod config;
mod layers;

pub use canvas::Canvas;
pub use compositor::{render_landscape, Compositor, CompositorError};
pub use config::{LandscapeConfig, REFERENCE_SIZE};
pub use layers::{
    brightness, building_count, celestial_radius, crown_color, crown_radius, ground_color,
    glow_alpha, sky_colors, tree_count, water_bodies, BuildingsLayer, CelestialBodyLayer,
    GlowLayer, GroundLayer, LayerId, Scene, SceneLayer, SkyLayer, StarsLayer, VegetationLayer,
    WaterBody, WaterLayer,
};
