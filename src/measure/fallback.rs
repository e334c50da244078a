//! Deterministic stand-in measurements derived from coordinates alone.
//!
//! Used whenever the retrieval collaborator cannot produce data, so that a
//! location always renders to the same artifacts.

use crate::rng::{coordinate_seed, DeterministicRng};

use super::MeasurementTriplet;

/// Uniform range for fallback NDVI.
pub const FALLBACK_NDVI: (f64, f64) = (0.1, 0.9);
/// Uniform range for fallback land-surface temperature, °C.
pub const FALLBACK_LST_C: (f64, f64) = (5.0, 40.0);
/// Uniform range for fallback precipitation, mm.
pub const FALLBACK_PRECIP_MM: (f64, f64) = (20.0, 450.0);

/// Builds the fallback triplet for `(lat, lon)`.
///
/// Draw order is fixed: ndvi, then lst, then precip.
pub fn fallback_triplet(lat: f64, lon: f64) -> MeasurementTriplet {
    let mut rng = DeterministicRng::from_seed(coordinate_seed(lat, lon));
    let ndvi = rng.uniform(FALLBACK_NDVI.0, FALLBACK_NDVI.1);
    let lst = rng.uniform(FALLBACK_LST_C.0, FALLBACK_LST_C.1);
    let precip = rng.uniform(FALLBACK_PRECIP_MM.0, FALLBACK_PRECIP_MM.1);
    MeasurementTriplet { ndvi, lst, precip }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_deterministic() {
        let a = fallback_triplet(35.68, 139.76);
        let b = fallback_triplet(35.68, 139.76);
        assert_eq!(a, b);
    }

    #[test]
    fn fallback_stays_in_ranges() {
        let points = [(0.0, 0.0), (35.68, 139.76), (-33.9, 18.4), (90.0, -180.0), (-12.3, 45.6)];
        for (lat, lon) in points {
            let m = fallback_triplet(lat, lon);
            assert!((0.1..=0.9).contains(&m.ndvi), "ndvi {} at ({lat},{lon})", m.ndvi);
            assert!((5.0..=40.0).contains(&m.lst), "lst {} at ({lat},{lon})", m.lst);
            assert!((20.0..=450.0).contains(&m.precip), "precip {} at ({lat},{lon})", m.precip);
        }
    }

    #[test]
    fn hemisphere_mirror_shares_seed() {
        // Seed uses absolute coordinates.
        assert_eq!(fallback_triplet(10.5, 20.25), fallback_triplet(-10.5, -20.25));
    }
}
