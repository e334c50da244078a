//! Boundary with the measurement retrieval collaborator.
//!
//! Retrieval is parameterized by a point and a one-month historical window,
//! and is wrapped so that it can never fail outward.

mod source;
mod window;

use chrono::NaiveDate;
use thiserror::Error;

pub use source::{
    obtain_or_fallback, FixedSource, GeoPoint, JsonFileSource, MeasurementSource, Provenance,
    SourceError, SourcedMeasurements, Unavailable,
};
pub use window::{parse_month, DateWindow};

/// Errors in request parameters (coordinates, month).
#[derive(Error, Debug, PartialEq)]
pub enum RetrievalError {
    #[error("Latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),
    #[error("Longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),
    #[error("Invalid month '{0}': expected YYYY-MM")]
    InvalidMonth(String),
    #[error("Window {0} month(s) before {1} is out of the supported date range")]
    WindowOutOfRange(u32, NaiveDate),
}
