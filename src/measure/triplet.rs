//! Measurement triplet types.

use serde::{Deserialize, Serialize};

use super::normalize;

/// Expected NDVI domain (source data may exceed it).
pub const NDVI_RANGE: (f64, f64) = (0.0, 1.0);
/// Expected land-surface temperature domain, °C.
pub const LST_RANGE_C: (f64, f64) = (-10.0, 45.0);
/// Expected monthly precipitation domain, mm.
pub const PRECIP_RANGE_MM: (f64, f64) = (0.0, 500.0);

/// Raw monthly measurements for one location.
///
/// Units:
/// - `ndvi`: unitless vegetation index
/// - `lst`: land-surface temperature, °C
/// - `precip`: accumulated precipitation, mm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementTriplet {
    #[serde(alias = "ndvi_monthly")]
    pub ndvi: f64,
    #[serde(alias = "lst_monthly")]
    pub lst: f64,
    #[serde(alias = "precip_monthly")]
    pub precip: f64,
}

impl MeasurementTriplet {
    pub fn new(ndvi: f64, lst: f64, precip: f64) -> Self {
        Self { ndvi, lst, precip }
    }

    /// Normalizes each field against its fixed domain.
    pub fn normalized(&self) -> NormalizedTriplet {
        NormalizedTriplet {
            ndvi_n: normalize(self.ndvi, NDVI_RANGE.0, NDVI_RANGE.1),
            lst_n: normalize(self.lst, LST_RANGE_C.0, LST_RANGE_C.1),
            precip_n: normalize(self.precip, PRECIP_RANGE_MM.0, PRECIP_RANGE_MM.1),
        }
    }
}

/// Measurements clamped into `[0, 1]^3`. Drives every layout and synthesis parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTriplet {
    pub ndvi_n: f64,
    pub lst_n: f64,
    pub precip_n: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_each_field_against_its_domain() {
        let n = MeasurementTriplet::new(0.8, 30.0, 10.0).normalized();
        assert!((n.ndvi_n - 0.8).abs() < 1e-12);
        assert!((n.lst_n - 40.0 / 55.0).abs() < 1e-12);
        assert!((n.precip_n - 0.02).abs() < 1e-12);
    }

    #[test]
    fn out_of_domain_values_clamp() {
        let n = MeasurementTriplet::new(1.4, -30.0, 900.0).normalized();
        assert_eq!(n.ndvi_n, 1.0);
        assert_eq!(n.lst_n, 0.0);
        assert_eq!(n.precip_n, 1.0);
    }

    #[test]
    fn deserializes_from_json() {
        let m: MeasurementTriplet =
            serde_json::from_str(r#"{"ndvi": 0.42, "lst": 21.5, "precip": 130.0}"#).unwrap();
        assert_eq!(m, MeasurementTriplet::new(0.42, 21.5, 130.0));
    }
}
