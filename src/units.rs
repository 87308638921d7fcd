//! Scene units ↔ metric conversion for size and position fields.
//!
//! Stored geometry is always in scene units. Conversion happens only when a
//! value is shown to, or typed by, the user.

#[cfg(test)]
#[path = "units_test.rs"]
mod units_test;

use crate::consts::DEFAULT_CM_PER_UNIT;

/// Linear scale between scene units and centimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitScale {
    pub cm_per_unit: f64,
}

impl Default for UnitScale {
    fn default() -> Self {
        Self { cm_per_unit: DEFAULT_CM_PER_UNIT }
    }
}

impl UnitScale {
    /// A scale of `cm_per_unit`. Zero, negative and non-finite scales
    /// fall back to the default.
    #[must_use]
    pub fn new(cm_per_unit: f64) -> Self {
        if cm_per_unit.is_finite() && cm_per_unit > 0.0 {
            Self { cm_per_unit }
        } else {
            Self::default()
        }
    }

    #[must_use]
    pub fn to_cm(self, units: f64) -> f64 {
        units * self.cm_per_unit
    }

    #[must_use]
    pub fn to_m(self, units: f64) -> f64 {
        units * self.cm_per_unit / 100.0
    }

    #[must_use]
    pub fn from_cm(self, cm: f64) -> f64 {
        cm / self.cm_per_unit
    }

    #[must_use]
    pub fn from_m(self, m: f64) -> f64 {
        m * 100.0 / self.cm_per_unit
    }

    /// Metres rounded to two decimals, the precision fields display.
    #[must_use]
    pub fn display_m(self, units: f64) -> f64 {
        (self.to_m(units) * 100.0).round() / 100.0
    }
}
