//! # Brickwork
//!
//! Brick count for a single wall using the face-area method: each brick,
//! with one mortar joint on its length and one on its height, covers a
//! fixed patch of the wall face.
//!
//! ```text
//! footprint   = (brick_length + mortar) * (brick_height + mortar)
//! face_area   = wall_length * wall_height
//! brick_count = ceil(face_area / footprint)
//! ```
//!
//! ## Assumptions
//!
//! - Single-leaf wall; wall thickness is not considered
//! - `brick_width` is validated but not used by the face-area method
//! - Mortar *volume* is not estimated, only joint thickness as spacing
//!
//! ## Example
//!
//! ```rust
//! use boq_core::calculations::brickwork::{calculate, BrickworkInput};
//!
//! let input = BrickworkInput {
//!     wall_length: 10.0,
//!     wall_height: 3.0,
//!     brick_length: 0.23,
//!     brick_height: 0.075,
//!     brick_width: 0.115,
//!     mortar_thickness: 0.01,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.brick_count, 1471);
//! ```

use serde::{Deserialize, Serialize};

use super::{to_count, CalculatorResult, Summary};
use crate::errors::{CalcError, CalcResult};
use crate::units::{round_to, Meters, SquareMeters};
use crate::validation::{check_value, parse_field, Constraint};

pub(crate) const CALC_TYPE: &str = "Brickwork";

/// Common modular brick, 230 x 75 x 115 mm, with a 10 mm joint
pub const DEFAULT_BRICK_LENGTH: &str = "0.23";
pub const DEFAULT_BRICK_HEIGHT: &str = "0.075";
pub const DEFAULT_BRICK_WIDTH: &str = "0.115";
pub const DEFAULT_MORTAR_THICKNESS: &str = "0.01";

/// Input parameters for a brick wall. All dimensions in meters.
///
/// ## JSON Example
///
/// ```json
/// {
///   "wallLength": 10.0,
///   "wallHeight": 3.0,
///   "brickLength": 0.23,
///   "brickHeight": 0.075,
///   "brickWidth": 0.115,
///   "mortarThickness": 0.01
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrickworkInput {
    pub wall_length: f64,
    pub wall_height: f64,
    pub brick_length: f64,
    pub brick_height: f64,
    /// Brick depth; accepted for completeness, unused by the face-area method
    pub brick_width: f64,
    /// Joint thickness, zero allowed for dry-stacked units
    pub mortar_thickness: f64,
}

impl BrickworkInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        check_value("wall_length", self.wall_length, Constraint::Positive)?;
        check_value("wall_height", self.wall_height, Constraint::Positive)?;
        check_value("brick_length", self.brick_length, Constraint::Positive)?;
        check_value("brick_height", self.brick_height, Constraint::Positive)?;
        check_value("brick_width", self.brick_width, Constraint::Positive)?;
        check_value("mortar_thickness", self.mortar_thickness, Constraint::NonNegative)?;
        Ok(())
    }
}

/// Raw text fields of the brickwork calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickworkForm {
    pub wall_length: String,
    pub wall_height: String,
    pub brick_length: String,
    pub brick_height: String,
    pub brick_width: String,
    pub mortar_thickness: String,
}

impl Default for BrickworkForm {
    fn default() -> Self {
        BrickworkForm {
            wall_length: String::new(),
            wall_height: String::new(),
            brick_length: DEFAULT_BRICK_LENGTH.to_string(),
            brick_height: DEFAULT_BRICK_HEIGHT.to_string(),
            brick_width: DEFAULT_BRICK_WIDTH.to_string(),
            mortar_thickness: DEFAULT_MORTAR_THICKNESS.to_string(),
        }
    }
}

impl BrickworkForm {
    pub fn parse(&self) -> CalcResult<BrickworkInput> {
        Ok(BrickworkInput {
            wall_length: parse_field("wall_length", &self.wall_length, Constraint::Positive)?,
            wall_height: parse_field("wall_height", &self.wall_height, Constraint::Positive)?,
            brick_length: parse_field("brick_length", &self.brick_length, Constraint::Positive)?,
            brick_height: parse_field("brick_height", &self.brick_height, Constraint::Positive)?,
            brick_width: parse_field("brick_width", &self.brick_width, Constraint::Positive)?,
            mortar_thickness: parse_field(
                "mortar_thickness",
                &self.mortar_thickness,
                Constraint::NonNegative,
            )?,
        })
    }

    /// Parse and calculate in one step.
    pub fn evaluate(&self) -> CalculatorResult {
        CalculatorResult::from_outcome(self.parse().and_then(|input| calculate(&input)))
    }
}

/// Results from the brickwork calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrickworkResult {
    /// Wall face covered by one brick plus its joints (m²)
    pub brick_footprint_m2: SquareMeters,
    /// Wall length x height (m²)
    pub wall_face_area_m2: SquareMeters,
    pub brick_count: u64,
}

impl Summary for BrickworkResult {
    fn summary(&self) -> String {
        format!(
            "Estimated Bricks Needed: {} bricks for a wall of {:.2} sq. meters (face area). Mortar quantity needs separate calculation.",
            self.brick_count,
            round_to(self.wall_face_area_m2.0, 2)
        )
    }
}

/// Calculate brick count.
///
/// # Returns
///
/// * `Ok(BrickworkResult)` - Brick count and wall face area
/// * `Err(CalcError)` - If inputs are invalid or the brick footprint is zero or
///   overflows
pub fn calculate(input: &BrickworkInput) -> CalcResult<BrickworkResult> {
    input.validate()?;

    let mortar = Meters(input.mortar_thickness);
    let brick_footprint_m2 =
        (Meters(input.brick_length) + mortar) * (Meters(input.brick_height) + mortar);
    if brick_footprint_m2.0 == 0.0 {
        return Err(CalcError::calculation_failed(
            CALC_TYPE,
            "brick dimensions plus mortar thickness cannot be zero",
        ));
    }
    if !brick_footprint_m2.0.is_finite() {
        return Err(CalcError::calculation_failed(
            CALC_TYPE,
            "brick dimensions are too large; check the units of the inputs",
        ));
    }

    let wall_face_area_m2 = Meters(input.wall_length) * Meters(input.wall_height);
    let brick_count = to_count(CALC_TYPE, (wall_face_area_m2 / brick_footprint_m2).ceil())?;

    Ok(BrickworkResult {
        brick_footprint_m2,
        wall_face_area_m2,
        brick_count,
    })
}

/// Calculate and render as an ok/message pair.
pub fn evaluate(input: &BrickworkInput) -> CalculatorResult {
    CalculatorResult::from_outcome(calculate(input))
}
