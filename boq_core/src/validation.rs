//! # Numeric Field Validation
//!
//! Every calculator field arrives either as raw text (a form box, a CLI
//! argument) or as an already-parsed number (JSON). Both paths go through
//! this module so the three calculators share one definition of "valid".
//!
//! ## Example
//!
//! ```rust
//! use boq_core::validation::{parse_field, Constraint};
//!
//! assert_eq!(parse_field("length", " 10 ", Constraint::Positive).unwrap(), 10.0);
//! assert!(parse_field("length", "0", Constraint::Positive).is_err());
//! assert_eq!(parse_field("mortar", "0", Constraint::NonNegative).unwrap(), 0.0);
//! assert!(parse_field("width", "abc", Constraint::Positive).is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Domain restriction applied to a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constraint {
    /// Strictly greater than zero (dimensions, areas)
    Positive,
    /// Zero or greater (wastage, mortar thickness)
    NonNegative,
}

impl Constraint {
    /// Whether `value` satisfies this constraint. Non-finite values never do.
    pub fn accepts(self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self {
            Constraint::Positive => value > 0.0,
            Constraint::NonNegative => value >= 0.0,
        }
    }

    /// Human-readable statement of the constraint, used in diagnostics
    pub fn describe(self) -> &'static str {
        match self {
            Constraint::Positive => "must be a positive number",
            Constraint::NonNegative => "must be zero or a positive number",
        }
    }
}

/// Parse a raw text token into a number satisfying `constraint`.
///
/// Leading and trailing whitespace is ignored. Empty text, text that is not
/// a number, `NaN`/`inf`, and values outside the constraint are all
/// rejected with [`CalcError::InvalidInput`] naming `field`.
pub fn parse_field(field: &str, raw: &str, constraint: Constraint) -> CalcResult<f64> {
    let token = raw.trim();
    if token.is_empty() {
        return Err(CalcError::invalid_input(field, "(empty)", "a number is required"));
    }

    let value: f64 = token
        .parse()
        .map_err(|_| CalcError::invalid_input(field, token, "not a number"))?;

    check_value(field, value, constraint)
}

/// Check an already-numeric value against `constraint`.
pub fn check_value(field: &str, value: f64, constraint: Constraint) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "must be a finite number",
        ));
    }
    if !constraint.accepts(value) {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            constraint.describe(),
        ));
    }
    Ok(value)
}
