//! Layer ordering and landscape rendering.

use image::RgbImage;
use thiserror::Error;

use crate::measure::MeasurementTriplet;
use crate::rng::{layout_seed, DeterministicRng};

use super::canvas::Canvas;
use super::config::LandscapeConfig;
use super::layers::{
    BuildingsLayer, CelestialBodyLayer, GlowLayer, GroundLayer, LayerId, Scene, SceneLayer,
    SkyLayer, StarsLayer, VegetationLayer, WaterLayer,
};

/// Errors raised while assembling a compositor.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CompositorError {
    #[error("Layer '{0}' cannot be drawn after '{1}'")]
    OutOfOrder(&'static str, &'static str),
}

/// Ordered stack of scene layers.
///
/// Layers must be added back to front; which layers are present may vary,
/// their relative order may not.
#[derive(Default)]
pub struct Compositor {
    layers: Vec<Box<dyn SceneLayer>>,
}

impl Compositor {
    /// Creates an empty compositor.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard landscape: every layer, buildings only if configured.
    pub fn standard(config: &LandscapeConfig) -> Self {
        let mut layers: Vec<Box<dyn SceneLayer>> = vec![
            Box::new(SkyLayer),
            Box::new(StarsLayer),
            Box::new(GroundLayer),
            Box::new(WaterLayer),
            Box::new(VegetationLayer),
            Box::new(GlowLayer),
        ];
        if config.buildings {
            layers.push(Box::new(BuildingsLayer));
        }
        layers.push(Box::new(CelestialBodyLayer));
        Self { layers }
    }

    /// Appends a layer. It must come strictly after the current top layer.
    pub fn add_layer<L: SceneLayer + 'static>(
        &mut self,
        layer: L,
    ) -> Result<&mut Self, CompositorError> {
        if let Some(top) = self.layers.last() {
            if layer.id() <= top.id() {
                return Err(CompositorError::OutOfOrder(layer.id().name(), top.id().name()));
            }
        }
        self.layers.push(Box::new(layer));
        Ok(self)
    }

    /// Returns the number of layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Layer ids, back to front.
    pub fn layer_ids(&self) -> Vec<LayerId> {
        self.layers.iter().map(|l| l.id()).collect()
    }

    /// Renders the measurements onto a fresh canvas.
    ///
    /// A new layout generator is seeded from the normalized triplet for every
    /// call, so identical inputs produce identical pixels.
    pub fn render(&self, measurements: &MeasurementTriplet, config: &LandscapeConfig) -> RgbImage {
        let scene = Scene {
            params: measurements.normalized(),
            config,
        };
        let mut rng = DeterministicRng::from_seed(layout_seed(&scene.params));
        let mut canvas = Canvas::new(config.width, config.height, [255, 255, 255]);

        for layer in &self.layers {
            log::debug!("drawing layer {}", layer.id().name());
            layer.draw(&mut canvas, &scene, &mut rng);
        }

        canvas.into_image()
    }
}

/// Renders the standard landscape for `measurements`.
pub fn render_landscape(measurements: &MeasurementTriplet, config: &LandscapeConfig) -> RgbImage {
    Compositor::standard(config).render(measurements, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landscape::layers::{ground_color, water_bodies};

    #[test]
    fn standard_stack_respects_buildings_flag() {
        let mut cfg = LandscapeConfig::compact();
        assert_eq!(Compositor::standard(&cfg).layer_ids(), LayerId::all().to_vec());

        cfg.buildings = false;
        let ids = Compositor::standard(&cfg).layer_ids();
        assert_eq!(ids.len(), 7);
        assert!(!ids.contains(&LayerId::Buildings));
    }

    #[test]
    fn out_of_order_layers_are_rejected() {
        let mut c = Compositor::new();
        c.add_layer(SkyLayer).unwrap().add_layer(GroundLayer).unwrap();
        let err = c.add_layer(StarsLayer).err().unwrap();
        assert_eq!(err, CompositorError::OutOfOrder("stars", "ground"));
        assert!(c.add_layer(GroundLayer).is_err());
        assert_eq!(c.layer_count(), 2);
    }

    #[test]
    fn render_has_configured_size() {
        let m = MeasurementTriplet::new(0.5, 20.0, 200.0);
        let img = render_landscape(&m, &LandscapeConfig::portrait());
        assert_eq!(img.dimensions(), (720, 1280));
    }

    #[test]
    fn identical_inputs_render_identical_pixels() {
        let cfg = LandscapeConfig::compact();
        let m = MeasurementTriplet::new(0.63, 18.2, 141.0);
        let a = render_landscape(&m, &cfg);
        let b = render_landscape(&m, &cfg);
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn different_inputs_render_differently() {
        let cfg = LandscapeConfig::compact();
        let a = render_landscape(&MeasurementTriplet::new(0.2, 5.0, 50.0), &cfg);
        let b = render_landscape(&MeasurementTriplet::new(0.8, 35.0, 400.0), &cfg);
        assert_ne!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn lush_warm_dry_scene() {
        let cfg = LandscapeConfig::portrait();
        let m = MeasurementTriplet::new(0.8, 30.0, 10.0);
        let n = m.normalized();
        assert_eq!(ground_color(&n), [102, 138, 52]);
        assert_eq!(water_bodies(&n, &cfg).len(), 1);

        let img = render_landscape(&m, &cfg);
        // Bottom edge is open ground, tinted by the warm overlay.
        let [r, g, b] = img.get_pixel(cfg.width / 2, cfg.height - 1).0;
        assert!(g > r && g > b, "ground pixel {:?}", [r, g, b]);
        assert!(r > 102 && g > 138, "warm overlay missing: {:?}", [r, g, b]);
    }

    #[test]
    fn bare_cold_wet_scene() {
        let cfg = LandscapeConfig::portrait();
        let m = MeasurementTriplet::new(0.1, -5.0, 480.0);
        let n = m.normalized();
        assert_eq!(water_bodies(&n, &cfg).len(), 3);

        let img = render_landscape(&m, &cfg);
        // No overlay: bottom-edge ground keeps its exact color.
        assert_eq!(img.get_pixel(cfg.width / 2, cfg.height - 1).0, ground_color(&n));
    }

    #[test]
    fn buildings_stand_on_the_ground_line() {
        let with = LandscapeConfig::portrait();
        let without = LandscapeConfig {
            buildings: false,
            ..LandscapeConfig::portrait()
        };
        let m = MeasurementTriplet::new(0.1, -5.0, 480.0);
        let a = render_landscape(&m, &with);
        let b = render_landscape(&m, &without);

        let ground_y = with.ground_y() as u32;
        let mut changed = 0;
        let mut lit_windows = 0;
        for (x, y, px) in a.enumerate_pixels() {
            if px != b.get_pixel(x, y) {
                changed += 1;
                assert!(y <= ground_y, "building pixel at ({x}, {y}) below row {ground_y}");
                if px.0 == [255, 238, 170] {
                    lit_windows += 1;
                }
            }
        }
        assert!(changed > 0);
        assert!(lit_windows > 0);
    }
}
