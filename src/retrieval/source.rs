//! Measurement sources and the fallback guarantee.
//!
//! A source may fail for any reason; [`obtain_or_fallback`] turns every
//! failure into the coordinate-seeded fallback triplet, so generation never
//! sees a "no data" state. Only the provenance label differs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::measure::{fallback_triplet, MeasurementTriplet};

use super::{DateWindow, RetrievalError};

/// A location on the globe, degrees.
///
/// Deserialization goes through the same range checks as [`GeoPoint::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = RetrievalError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.lat, raw.lon)
    }
}

impl GeoPoint {
    /// Validates latitude in `[-90, 90]` and longitude in `[-180, 180]`.
    pub fn new(lat: f64, lon: f64) -> Result<Self, RetrievalError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(RetrievalError::InvalidLatitude(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(RetrievalError::InvalidLongitude(lon));
        }
        Ok(Self { lat, lon })
    }
}

/// Where a triplet came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Returned by the measurement source.
    Retrieved,
    /// Derived from coordinates after the source failed.
    Fallback,
}

impl Provenance {
    pub fn label(&self) -> &'static str {
        match self {
            Provenance::Retrieved => "retrieved",
            Provenance::Fallback => "fallback",
        }
    }
}

/// A triplet together with its origin and the window it describes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourcedMeasurements {
    pub triplet: MeasurementTriplet,
    pub provenance: Provenance,
    pub point: GeoPoint,
    pub window: DateWindow,
}

/// Errors a measurement source may report. Never reach the generators.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed measurements: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Measurement '{0}' is not a finite number")]
    NotFinite(&'static str),
    #[error("No measurements available for ({lat}, {lon}) in {window}")]
    NoData {
        lat: f64,
        lon: f64,
        window: DateWindow,
    },
}

/// Capability: obtain monthly measurements for a point and date window.
pub trait MeasurementSource: Send + Sync {
    /// Human-readable source name for logs.
    fn name(&self) -> &str;

    fn obtain(
        &self,
        point: GeoPoint,
        window: &DateWindow,
    ) -> Result<MeasurementTriplet, SourceError>;
}

/// Always returns the same caller-supplied triplet.
#[derive(Debug, Clone, Copy)]
pub struct FixedSource(pub MeasurementTriplet);

impl MeasurementSource for FixedSource {
    fn name(&self) -> &str {
        "fixed"
    }

    fn obtain(
        &self,
        _point: GeoPoint,
        _window: &DateWindow,
    ) -> Result<MeasurementTriplet, SourceError> {
        Ok(self.0)
    }
}

/// Accepted file layouts: a bare triplet, or one wrapped in a `data` object.
/// Field names may carry a `_monthly` suffix.
#[derive(Deserialize)]
#[serde(untagged)]
enum MeasurementPayload {
    Wrapped { data: MeasurementTriplet },
    Flat(MeasurementTriplet),
}

impl From<MeasurementPayload> for MeasurementTriplet {
    fn from(payload: MeasurementPayload) -> Self {
        match payload {
            MeasurementPayload::Wrapped { data } => data,
            MeasurementPayload::Flat(m) => m,
        }
    }
}

/// Reads a serialized triplet (`{"ndvi":..,"lst":..,"precip":..}`) from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    pub path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MeasurementSource for JsonFileSource {
    fn name(&self) -> &str {
        "json-file"
    }

    fn obtain(
        &self,
        _point: GeoPoint,
        _window: &DateWindow,
    ) -> Result<MeasurementTriplet, SourceError> {
        let text = std::fs::read_to_string(&self.path)?;
        let payload: MeasurementPayload = serde_json::from_str(&text)?;
        Ok(payload.into())
    }
}

/// A source with no data; every request falls back.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl MeasurementSource for Unavailable {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn obtain(
        &self,
        point: GeoPoint,
        window: &DateWindow,
    ) -> Result<MeasurementTriplet, SourceError> {
        Err(SourceError::NoData {
            lat: point.lat,
            lon: point.lon,
            window: *window,
        })
    }
}

fn check_finite(m: MeasurementTriplet) -> Result<MeasurementTriplet, SourceError> {
    if !m.ndvi.is_finite() {
        return Err(SourceError::NotFinite("ndvi"));
    }
    if !m.lst.is_finite() {
        return Err(SourceError::NotFinite("lst"));
    }
    if !m.precip.is_finite() {
        return Err(SourceError::NotFinite("precip"));
    }
    Ok(m)
}

/// Queries `source`, substituting the coordinate fallback on any failure.
pub fn obtain_or_fallback(
    source: &dyn MeasurementSource,
    point: GeoPoint,
    window: DateWindow,
) -> SourcedMeasurements {
    let (triplet, provenance) = match source.obtain(point, &window).and_then(check_finite) {
        Ok(triplet) => (triplet, Provenance::Retrieved),
        Err(e) => {
            log::warn!(
                "source '{}' failed for ({:.4}, {:.4}) {}: {}; using coordinate fallback",
                source.name(),
                point.lat,
                point.lon,
                window,
                e
            );
            (fallback_triplet(point.lat, point.lon), Provenance::Fallback)
        }
    };
    SourcedMeasurements {
        triplet,
        provenance,
        point,
        window,
    }
}
