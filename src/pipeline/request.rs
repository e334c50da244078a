//! Generation request parameters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::audio::Style;
use crate::retrieval::{DateWindow, GeoPoint, RetrievalError};

/// Months between the target month and the measured month, unless overridden.
pub const DEFAULT_LOOKBACK_MONTHS: u32 = 2;

/// One request: where, for which month, in which style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub point: GeoPoint,
    /// Any day in the target month; only year and month matter.
    pub target_month: NaiveDate,
    pub lookback_months: u32,
    pub style: Option<Style>,
}

impl GenerationRequest {
    pub fn new(point: GeoPoint, target_month: NaiveDate) -> Self {
        Self {
            point,
            target_month,
            lookback_months: DEFAULT_LOOKBACK_MONTHS,
            style: None,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_lookback(mut self, months: u32) -> Self {
        self.lookback_months = months;
        self
    }

    /// The measured month for this request.
    pub fn window(&self) -> Result<DateWindow, RetrievalError> {
        DateWindow::months_before(self.target_month, self.lookback_months)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lookback_is_two_months() {
        let req = GenerationRequest::new(
            GeoPoint::new(35.68, 139.76).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );
        let w = req.window().unwrap();
        assert_eq!(w.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(w.end, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());

        let w = req.with_lookback(1).window().unwrap();
        assert_eq!(w.end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }
}
