//! # Unit Types
//!
//! Type-safe wrappers for the metric quantities used by the BOQ calculators.
//! These are plain f64 newtypes so JSON stays clean (just numbers) while the
//! arithmetic between them keeps dimensions straight.
//!
//! ## SI Units
//!
//! - Length: meters (m)
//! - Area: square meters (m²)
//! - Volume: cubic meters (m³)
//!
//! ## Example
//!
//! ```rust
//! use boq_core::units::{Meters, SquareMeters, CubicMeters};
//!
//! let slab: CubicMeters = Meters(10.0) * Meters(5.0) * Meters(0.15);
//! assert!((slab.0 - 7.5).abs() < 1e-9);
//!
//! let floor: SquareMeters = Meters(0.6) * Meters(0.6);
//! assert!((floor.0 - 0.36).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul};

// ============================================================================
// Length, Area, Volume
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

/// Volume in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

impl Add for Meters {
    type Output = Meters;
    fn add(self, rhs: Meters) -> Meters {
        Meters(self.0 + rhs.0)
    }
}

impl Mul for Meters {
    type Output = SquareMeters;
    fn mul(self, rhs: Meters) -> SquareMeters {
        SquareMeters(self.0 * rhs.0)
    }
}

impl Mul<Meters> for SquareMeters {
    type Output = CubicMeters;
    fn mul(self, rhs: Meters) -> CubicMeters {
        CubicMeters(self.0 * rhs.0)
    }
}

/// How many of one area fit into another (dimensionless)
impl Div for SquareMeters {
    type Output = f64;
    fn div(self, rhs: SquareMeters) -> f64 {
        self.0 / rhs.0
    }
}

// ============================================================================
// Display rounding
// ============================================================================

/// Round a value to `places` decimal places for display.
///
/// ```rust
/// use boq_core::units::round_to;
///
/// assert_eq!(round_to(7.456, 2), 7.46);
/// assert_eq!(round_to(30.0, 2), 30.0);
/// ```
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Percentage expressed on a 0-100 scale (10.0 means 10%)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(pub f64);

impl Percent {
    /// Base quantity plus this percentage of it (100 at 10% -> 110).
    ///
    /// Scales by `(100 + p) / 100` rather than `1 + p / 100` so whole
    /// percentages of whole counts stay exact (100 * 1.1 is 110.00000000000001).
    /// After ceiling, the `1 + p / 100` form would order one extra unit at
    /// those exact multiples.
    pub fn add_to(self, base: f64) -> f64 {
        base * (100.0 + self.0) / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_and_volume() {
        let area = Meters(4.0) * Meters(2.5);
        assert_eq!(area, SquareMeters(10.0));
        let volume = area * Meters(0.2);
        assert!((volume.0 - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_area_ratio() {
        let ratio = SquareMeters(30.0) / SquareMeters(0.5);
        assert_eq!(ratio, 60.0);
    }

    #[test]
    fn test_percent_add_to() {
        assert_eq!(Percent(10.0).add_to(100.0), 110.0);
        assert_eq!(Percent(0.0).add_to(139.0), 139.0);
        assert!((Percent(10.0).add_to(139.0) - 152.9).abs() < 1e-9);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.005_1, 2), 1.01);
        assert_eq!(round_to(0.123, 0), 0.0);
    }

    #[test]
    fn test_serialization_is_transparent() {
        let json = serde_json::to_string(&Meters(0.23)).unwrap();
        assert_eq!(json, "0.23");
    }
}
