//! # Flooring Tiles
//!
//! Number of tiles to order for a floor area, with a wastage allowance for
//! breakage and cuts. Both stages round up: under-ordering tiles is the
//! failure being avoided, so a partial tile always counts as a whole one.
//!
//! ```text
//! tile_area      = tile_length * tile_width
//! raw_tile_count = ceil(area / tile_area)
//! total_tiles    = ceil(raw_tile_count * (1 + wastage% / 100))
//! ```
//!
//! ## Example
//!
//! ```rust
//! use boq_core::calculations::flooring::{calculate, FlooringInput};
//!
//! let input = FlooringInput {
//!     area: 50.0,
//!     tile_length: 0.6,
//!     tile_width: 0.6,
//!     wastage_percent: 10.0,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.raw_tile_count, 139);
//! assert_eq!(result.total_tiles, 153);
//! ```

use serde::{Deserialize, Serialize};

use super::{to_count, CalculatorResult, Summary};
use crate::errors::{CalcError, CalcResult};
use crate::units::{Meters, Percent, SquareMeters};
use crate::validation::{check_value, parse_field, Constraint};

pub(crate) const CALC_TYPE: &str = "Flooring";

/// Wastage allowance used when none is given (%)
pub const DEFAULT_WASTAGE_PERCENT: &str = "10";

/// Input parameters for tile flooring.
///
/// ## JSON Example
///
/// ```json
/// { "area": 50.0, "tileLength": 0.6, "tileWidth": 0.6, "wastagePercent": 10.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlooringInput {
    /// Floor area to cover (m²)
    pub area: f64,
    /// Tile length (m)
    pub tile_length: f64,
    /// Tile width (m)
    pub tile_width: f64,
    /// Extra tiles as a percentage, 10.0 means 10%
    pub wastage_percent: f64,
}

impl FlooringInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        check_value("area", self.area, Constraint::Positive)?;
        check_value("tile_length", self.tile_length, Constraint::Positive)?;
        check_value("tile_width", self.tile_width, Constraint::Positive)?;
        check_value("wastage_percent", self.wastage_percent, Constraint::NonNegative)?;
        Ok(())
    }
}

/// Raw text fields of the flooring calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlooringForm {
    pub area: String,
    pub tile_length: String,
    pub tile_width: String,
    pub wastage_percent: String,
}

impl Default for FlooringForm {
    fn default() -> Self {
        FlooringForm {
            area: String::new(),
            tile_length: String::new(),
            tile_width: String::new(),
            wastage_percent: DEFAULT_WASTAGE_PERCENT.to_string(),
        }
    }
}

impl FlooringForm {
    pub fn parse(&self) -> CalcResult<FlooringInput> {
        Ok(FlooringInput {
            area: parse_field("area", &self.area, Constraint::Positive)?,
            tile_length: parse_field("tile_length", &self.tile_length, Constraint::Positive)?,
            tile_width: parse_field("tile_width", &self.tile_width, Constraint::Positive)?,
            wastage_percent: parse_field(
                "wastage_percent",
                &self.wastage_percent,
                Constraint::NonNegative,
            )?,
        })
    }

    /// Parse and calculate in one step.
    pub fn evaluate(&self) -> CalculatorResult {
        CalculatorResult::from_outcome(self.parse().and_then(|input| calculate(&input)))
    }
}

/// Results from the flooring calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlooringResult {
    /// Area of a single tile (m²)
    pub tile_area_m2: SquareMeters,
    /// Tiles needed to cover the area, before wastage
    pub raw_tile_count: u64,
    /// Tiles to order, wastage included
    pub total_tiles: u64,
    pub wastage_percent: Percent,
}

impl Summary for FlooringResult {
    fn summary(&self) -> String {
        format!(
            "Estimated Tiles Needed: {} tiles (including {}% wastage).",
            self.total_tiles, self.wastage_percent.0
        )
    }
}

/// Calculate tile count.
///
/// # Returns
///
/// * `Ok(FlooringResult)` - Raw and wastage-adjusted tile counts
/// * `Err(CalcError)` - If inputs are invalid or the tile area is zero or
///   overflows
pub fn calculate(input: &FlooringInput) -> CalcResult<FlooringResult> {
    input.validate()?;

    let tile_area_m2 = Meters(input.tile_length) * Meters(input.tile_width);
    // Two tiny positive sides can still underflow to zero
    if tile_area_m2.0 == 0.0 {
        return Err(CalcError::calculation_failed(
            CALC_TYPE,
            "tile dimensions cannot be zero",
        ));
    }
    if !tile_area_m2.0.is_finite() {
        return Err(CalcError::calculation_failed(
            CALC_TYPE,
            "tile dimensions are too large; check the units of the inputs",
        ));
    }

    let raw_tile_count = to_count(CALC_TYPE, (SquareMeters(input.area) / tile_area_m2).ceil())?;

    let wastage_percent = Percent(input.wastage_percent);
    // Rounding near 2^53 must not let wastage shrink the order
    let total_tiles = to_count(CALC_TYPE, wastage_percent.add_to(raw_tile_count as f64).ceil())?
        .max(raw_tile_count);

    Ok(FlooringResult {
        tile_area_m2,
        raw_tile_count,
        total_tiles,
        wastage_percent,
    })
}

/// Calculate and render as an ok/message pair.
pub fn evaluate(input: &FlooringInput) -> CalculatorResult {
    CalculatorResult::from_outcome(calculate(input))
}
