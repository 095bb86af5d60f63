//! # Concrete Volume
//!
//! Volume of a rectangular pour (slab, footing, beam) from its three
//! dimensions. The grade label (M20, M25, ...) is carried through to the
//! message only; turning a grade into cement/sand/aggregate quantities needs
//! a mix design, which this calculator does not attempt.
//!
//! ## Example
//!
//! ```rust
//! use boq_core::calculations::concrete::{calculate, ConcreteInput};
//!
//! let input = ConcreteInput {
//!     length: 10.0,
//!     width: 5.0,
//!     thickness: 0.15,
//!     grade: "M20".to_string(),
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.rounded_volume_m3(), 7.5);
//! ```

use serde::{Deserialize, Serialize};

use super::{CalculatorResult, Summary};
use crate::errors::{CalcError, CalcResult};
use crate::units::{round_to, CubicMeters, Meters};
use crate::validation::{check_value, parse_field, Constraint};

pub(crate) const CALC_TYPE: &str = "Concrete";

/// Grade used when none is given
pub const DEFAULT_GRADE: &str = "M20";

/// Input parameters for a concrete pour. All dimensions in meters.
///
/// ## JSON Example
///
/// ```json
/// { "length": 10.0, "width": 5.0, "thickness": 0.15, "grade": "M20" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcreteInput {
    pub length: f64,
    pub width: f64,
    pub thickness: f64,
    /// Strength class label, echoed only
    #[serde(default = "default_grade")]
    pub grade: String,
}

fn default_grade() -> String {
    DEFAULT_GRADE.to_string()
}

impl ConcreteInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        check_value("length", self.length, Constraint::Positive)?;
        check_value("width", self.width, Constraint::Positive)?;
        check_value("thickness", self.thickness, Constraint::Positive)?;
        Ok(())
    }
}

/// Raw text fields of the concrete calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcreteForm {
    pub length: String,
    pub width: String,
    pub thickness: String,
    pub grade: String,
}

impl Default for ConcreteForm {
    fn default() -> Self {
        ConcreteForm {
            length: String::new(),
            width: String::new(),
            thickness: String::new(),
            grade: default_grade(),
        }
    }
}

impl ConcreteForm {
    pub fn parse(&self) -> CalcResult<ConcreteInput> {
        Ok(ConcreteInput {
            length: parse_field("length", &self.length, Constraint::Positive)?,
            width: parse_field("width", &self.width, Constraint::Positive)?,
            thickness: parse_field("thickness", &self.thickness, Constraint::Positive)?,
            grade: self.grade.trim().to_string(),
        })
    }

    /// Parse and calculate in one step.
    pub fn evaluate(&self) -> CalculatorResult {
        CalculatorResult::from_outcome(self.parse().and_then(|input| calculate(&input)))
    }
}

/// Results from the concrete calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcreteResult {
    /// Unrounded volume (m³)
    pub volume_m3: CubicMeters,
    pub grade: String,
}

impl ConcreteResult {
    /// Volume rounded to 2 decimals, as displayed
    pub fn rounded_volume_m3(&self) -> f64 {
        round_to(self.volume_m3.0, 2)
    }
}

impl Summary for ConcreteResult {
    fn summary(&self) -> String {
        format!(
            "Estimated Concrete Volume: {:.2} cubic meters. For {}, detailed mix design is needed for material breakdown.",
            self.rounded_volume_m3(),
            self.grade
        )
    }
}

/// Calculate concrete volume.
///
/// # Returns
///
/// * `Ok(ConcreteResult)` - Volume in cubic meters
/// * `Err(CalcError)` - If any dimension is not a positive finite number, or
///   the volume overflows or underflows
pub fn calculate(input: &ConcreteInput) -> CalcResult<ConcreteResult> {
    input.validate()?;

    let volume_m3 = Meters(input.length) * Meters(input.width) * Meters(input.thickness);
    if !volume_m3.0.is_finite() {
        return Err(CalcError::calculation_failed(
            CALC_TYPE,
            "volume is too large; check the units of the inputs",
        ));
    }
    if volume_m3.0 == 0.0 {
        return Err(CalcError::calculation_failed(
            CALC_TYPE,
            "volume is too small to measure; check the units of the inputs",
        ));
    }

    Ok(ConcreteResult {
        volume_m3,
        grade: input.grade.clone(),
    })
}

/// Calculate and render as an ok/message pair.
pub fn evaluate(input: &ConcreteInput) -> CalculatorResult {
    CalculatorResult::from_outcome(calculate(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_slab() -> ConcreteInput {
        ConcreteInput {
            length: 10.0,
            width: 5.0,
            thickness: 0.15,
            grade: "M20".to_string(),
        }
    }

    #[test]
    fn test_slab_volume() {
        let result = calculate(&test_slab()).unwrap();
        assert!((result.volume_m3.0 - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_message_echoes_grade() {
        let mut slab = test_slab();
        slab.grade = "M25".to_string();
        let result = evaluate(&slab);
        assert!(result.ok);
        assert_eq!(
            result.message,
            "Estimated Concrete Volume: 7.50 cubic meters. For M25, detailed mix design is needed for material breakdown."
        );
    }

    #[test]
    fn test_non_positive_dimensions_fail() {
        for (length, width, thickness) in [(0.0, 5.0, 0.15), (10.0, -5.0, 0.15), (10.0, 5.0, 0.0)] {
            let input = ConcreteInput {
                length,
                width,
                thickness,
                grade: "M20".to_string(),
            };
            let result = evaluate(&input);
            assert!(!result.ok);
            assert!(result.message.contains("must be a positive number"));
        }
    }

    #[test]
    fn test_form_rejects_text() {
        let form = ConcreteForm {
            length: "ten".to_string(),
            width: "5".to_string(),
            thickness: "0.15".to_string(),
            ..ConcreteForm::default()
        };
        let result = form.evaluate();
        assert!(!result.ok);
        assert!(result.message.contains("'length'"));
    }

    #[test]
    fn test_form_defaults_to_m20() {
        let form = ConcreteForm {
            length: "2".to_string(),
            width: "2".to_string(),
            thickness: "0.5".to_string(),
            ..ConcreteForm::default()
        };
        let result = form.evaluate();
        assert!(result.ok);
        assert!(result.message.contains("2.00 cubic meters"));
        assert!(result.message.contains("For M20"));
    }

    #[test]
    fn test_grade_defaults_when_missing_from_json() {
        let input: ConcreteInput =
            serde_json::from_str(r#"{"length":1.0,"width":1.0,"thickness":1.0}"#).unwrap();
        assert_eq!(input.grade, "M20");
    }

    #[test]
    fn test_overflowing_volume_fails() {
        let input = ConcreteInput {
            length: 1e200,
            width: 1e200,
            thickness: 1.0,
            grade: "M20".to_string(),
        };
        let result = evaluate(&input);
        assert!(!result.ok);
        assert!(result.message.contains("volume is too large"));
        assert!(!result.message.contains("inf"));
    }

    #[test]
    fn test_underflowing_volume_fails() {
        let input = ConcreteInput {
            length: 1e-200,
            width: 1e-200,
            thickness: 1.0,
            grade: "M20".to_string(),
        };
        assert!(matches!(
            calculate(&input),
            Err(CalcError::CalculationFailed { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_ok_means_finite_positive_volume(
            length in proptest::num::f64::ANY,
            width in proptest::num::f64::ANY,
            thickness in proptest::num::f64::ANY,
        ) {
            let input = ConcreteInput { length, width, thickness, grade: "M20".to_string() };
            let result = evaluate(&input);
            prop_assert!(!result.message.is_empty());
            if result.ok {
                let volume = calculate(&input).unwrap().volume_m3.0;
                prop_assert!(volume.is_finite() && volume > 0.0);
            }
        }

        #[test]
        fn prop_volume_is_rounded_product(
            length in 0.001f64..1000.0,
            width in 0.001f64..1000.0,
            thickness in 0.001f64..10.0,
        ) {
            let input = ConcreteInput { length, width, thickness, grade: "M30".to_string() };
            let result = calculate(&input).unwrap();
            prop_assert_eq!(result.rounded_volume_m3(), round_to(length * width * thickness, 2));
            prop_assert!(evaluate(&input).ok);
        }

        #[test]
        fn prop_non_positive_never_ok(length in -1000.0f64..=0.0) {
            let input = ConcreteInput { length, width: 1.0, thickness: 1.0, grade: String::new() };
            prop_assert!(!evaluate(&input).ok);
        }
    }
}
