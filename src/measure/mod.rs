//! Environmental measurements and their normalization.
//!
//! Raw satellite values arrive as a [`MeasurementTriplet`]; everything
//! downstream works on the clamped [`NormalizedTriplet`].

mod normalize;
mod triplet;
mod fallback;

pub use normalize::normalize;
pub use triplet::{MeasurementTriplet, NormalizedTriplet, NDVI_RANGE, LST_RANGE_C, PRECIP_RANGE_MM};
pub use fallback::{fallback_triplet, FALLBACK_NDVI, FALLBACK_LST_C, FALLBACK_PRECIP_MM};
