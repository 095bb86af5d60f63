//! # BOQ Calculators
//!
//! Deterministic quantity calculators for common bill-of-quantities items.
//! Each calculator follows the pattern:
//!
//! - `*Input` - Numeric input parameters (JSON-serializable)
//! - `*Form` - The same fields as raw text, parsed through [`crate::validation`]
//! - `*Result` - Typed calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//! - `evaluate(input) -> CalculatorResult` - Calculation rendered as an ok/message pair
//!
//! Bad input is an expected case here, not a fault: [`CalculatorResult`]
//! carries it as `ok: false` with a diagnostic instead of an error.
//!
//! ## Available Calculators
//!
//! - [`concrete`] - Slab/footing concrete volume
//! - [`flooring`] - Floor tile count with wastage allowance
//! - [`brickwork`] - Brick count for a wall face

pub mod brickwork;
pub mod concrete;
pub mod flooring;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};

// Re-export commonly used types
pub use brickwork::{BrickworkForm, BrickworkInput, BrickworkResult};
pub use concrete::{ConcreteForm, ConcreteInput, ConcreteResult};
pub use flooring::{FlooringForm, FlooringInput, FlooringResult};

/// Largest count that f64 still represents exactly (2^53).
const MAX_EXACT_COUNT: f64 = 9_007_199_254_740_992.0;

/// Enum wrapper for all calculator inputs.
///
/// ## JSON Example
///
/// ```json
/// { "type": "Flooring", "area": 50.0, "tileLength": 0.6, "tileWidth": 0.6, "wastagePercent": 10.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculatorInput {
    /// Concrete volume calculation
    Concrete(ConcreteInput),
    /// Floor tile count calculation
    Flooring(FlooringInput),
    /// Brick count calculation
    Brickwork(BrickworkInput),
}

impl CalculatorInput {
    /// Get the calculator type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculatorInput::Concrete(_) => concrete::CALC_TYPE,
            CalculatorInput::Flooring(_) => flooring::CALC_TYPE,
            CalculatorInput::Brickwork(_) => brickwork::CALC_TYPE,
        }
    }

    /// Run whichever calculator this input belongs to.
    pub fn evaluate(&self) -> CalculatorResult {
        match self {
            CalculatorInput::Concrete(input) => concrete::evaluate(input),
            CalculatorInput::Flooring(input) => flooring::evaluate(input),
            CalculatorInput::Brickwork(input) => brickwork::evaluate(input),
        }
    }
}

/// Human-readable one-line summary of a successful calculation.
pub trait Summary {
    fn summary(&self) -> String;
}

/// Outcome of a calculator as shown to a user.
///
/// ## JSON Example
///
/// ```json
/// { "ok": true, "message": "Estimated Tiles Needed: 153 tiles (including 10% wastage)." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorResult {
    pub ok: bool,
    pub message: String,
}

impl CalculatorResult {
    pub fn success(message: impl Into<String>) -> Self {
        CalculatorResult {
            ok: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        CalculatorResult {
            ok: false,
            message: message.into(),
        }
    }

    /// Collapse a typed calculation outcome into an ok/message pair.
    pub fn from_outcome<R: Summary>(outcome: CalcResult<R>) -> Self {
        match outcome {
            Ok(result) => CalculatorResult::success(result.summary()),
            Err(err) => {
                debug!(code = err.error_code(), "calculator rejected input: {}", err);
                CalculatorResult::failure(err.to_string())
            }
        }
    }
}

/// Convert a ceiling-rounded quantity into an integer count.
///
/// Extreme inputs can push the quotient past what f64 counts exactly (or to
/// infinity), or underflow it to zero; both are reported as failed
/// calculations.
pub(crate) fn to_count(calculation_type: &str, value: f64) -> CalcResult<u64> {
    if !value.is_finite() || value > MAX_EXACT_COUNT {
        return Err(CalcError::calculation_failed(
            calculation_type,
            "result is too large to count; check the units of the inputs",
        ));
    }
    if value < 1.0 {
        return Err(CalcError::calculation_failed(
            calculation_type,
            "result rounds to zero; check the units of the inputs",
        ));
    }
    Ok(value as u64)
}
