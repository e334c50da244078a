//! Deterministic randomness source.
//!
//! Every generation step that scatters features (stars, trees, buildings,
//! rain texture) draws from a [`DeterministicRng`] built fresh from the
//! measurements. The same inputs always yield the same draw sequence, so a
//! re-render of an identical triplet looks and sounds the same.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

use crate::measure::{MeasurementTriplet, NormalizedTriplet};

/// Seeded pseudo-random stream, owned by a single generation call.
///
/// Not `Clone`. Each render owns exactly one; every draw advances its state.
#[derive(Debug)]
pub struct DeterministicRng {
    inner: ChaCha8Rng,
}

impl DeterministicRng {
    /// Creates a generator from an integer seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uniform real sample in `[low, high)`.
    ///
    /// Total for any bounds: an empty or inverted range degenerates to
    /// `low + (high - low) * u` rather than panicking.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        let u: f64 = self.inner.random();
        low + (high - low) * u
    }

    /// Uniform sample in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.inner.random()
    }

    /// Zero-mean normal sample with the given standard deviation.
    pub fn normal(&mut self, std_dev: f64) -> f64 {
        let z: f64 = self.inner.sample(StandardNormal);
        z * std_dev
    }
}

/// Seed for the coordinate-based fallback generator: `|lat|*1000 + |lon|*1000`.
pub fn coordinate_seed(lat: f64, lon: f64) -> u64 {
    (lat.abs() * 1000.0 + lon.abs() * 1000.0) as u64
}

/// Seed for the scene layout: `ndvi_n*1000 + precip_n*2000 + lst_n*3000`.
pub fn layout_seed(n: &NormalizedTriplet) -> u64 {
    (n.ndvi_n * 1000.0 + n.precip_n * 2000.0 + n.lst_n * 3000.0) as u64
}

/// Seed for the audio rain texture: `(ndvi + lst + precip) * 1000`.
///
/// Raw measurements can sum below zero (cold, dry, bare ground); the signed
/// value is reinterpreted as two's complement so every input still maps to
/// a stable seed.
pub fn texture_seed(m: &MeasurementTriplet) -> u64 {
    ((m.ndvi + m.lst + m.precip) * 1000.0) as i64 as u64
}
