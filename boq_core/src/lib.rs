//! # boq_core - Construction Quantity Engine
//!
//! `boq_core` is the computational heart of BOQ Toolkit: deterministic
//! bill-of-quantities calculators plus an LLM-assisted material estimator.
//! All inputs and outputs are JSON-serializable, making the crate easy to put
//! behind a form, a CLI, or an AI assistant.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Bad input is expected**: calculators answer with `ok: false`, never a panic
//!
//! ## Quick Start
//!
//! ```rust
//! use boq_core::calculations::{flooring, FlooringInput};
//!
//! let result = flooring::evaluate(&FlooringInput {
//!     area: 50.0,
//!     tile_length: 0.6,
//!     tile_width: 0.6,
//!     wastage_percent: 10.0,
//! });
//!
//! assert!(result.ok);
//! assert_eq!(result.message, "Estimated Tiles Needed: 153 tiles (including 10% wastage).");
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Concrete, flooring and brickwork calculators
//! - [`estimation`] - Prompt rendering and text-generation providers
//! - [`validation`] - Shared numeric field parsing
//! - [`units`] - Type-safe metric unit wrappers
//! - [`config`] - Layered configuration
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod config;
pub mod errors;
pub mod estimation;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculatorInput, CalculatorResult};
pub use config::{Config, GeneratorConfig};
pub use errors::{CalcError, CalcResult};
pub use estimation::{EstimationRequest, EstimationResult, MaterialEstimator};
