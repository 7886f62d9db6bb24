//! # gear_core - ISO 6336 Gear Strength Rating Engine
//!
//! `gear_core` computes tooth bending stress, Hertzian contact stress and the
//! resulting safety factors for a single-stage external spur gear pair,
//! following the ISO 6336 rating method. The defining requirement is not
//! algorithmic complexity but auditability: every intermediate quantity is
//! recorded in an append-only calculation ledger with its formula, input
//! snapshot and numeric substitution, so a domain expert can retrace the
//! derivation from torque and geometry down to each safety factor.
//!
//! ## Design Philosophy
//!
//! - **Pure stages**: each pipeline stage computes a value and returns a step
//!   draft; ledger recording is a separate, explicit act
//! - **JSON-First**: all inputs, results, errors and ledger steps implement
//!   Serialize/Deserialize
//! - **Fail loud**: denominators and logarithm arguments are validated before
//!   use; `NaN`/`Inf` never stand in for a refused calculation
//! - **One calculator, one ledger, one design**: no shared mutable state, so
//!   parametric sweeps parallelize by giving each design its own instance
//!
//! ## Quick Start
//!
//! ```rust
//! use gear_core::{create_standard_gear_system, StrengthCalculator};
//!
//! let system = create_standard_gear_system(2.0, 20, 5.0, 20.0, 1500.0).unwrap();
//! let mut calc = StrengthCalculator::new(system.geometry, system.load, system.material);
//!
//! let rating = calc.evaluate().unwrap();
//! assert!(rating.safety_bending_pinion > 1.5);
//!
//! // The full, ordered derivation for review
//! let report = calc.report();
//! assert!(report.contains("## Step 1:"));
//! ```
//!
//! ## Modules
//!
//! - [`geometry`], [`loads`], [`materials`] - immutable physical data records
//! - [`ledger`] - append-only calculation step records
//! - [`equations`] - raw ISO 6336 formulas (pure f64 math)
//! - [`stages`] - pure compute-plus-draft pipeline stages
//! - [`calculator`] - the stateful pipeline engine
//! - [`report`] - ledger-to-text rendering
//! - [`system`] - standard gear system factory
//! - [`errors`] - structured error types

pub mod calculator;
pub mod equations;
pub mod errors;
pub mod geometry;
pub mod ledger;
pub mod loads;
pub mod materials;
pub mod report;
pub mod stages;
pub mod system;

// Re-export commonly used types at crate root for convenience
pub use calculator::{RatingResult, StrengthCalculator, MIN_BENDING_SAFETY, MIN_CONTACT_SAFETY};
pub use errors::{GearError, GearResult};
pub use geometry::GearGeometry;
pub use ledger::{CalculationStep, Ledger, StepDraft};
pub use loads::LoadConditions;
pub use materials::MaterialProperties;
pub use system::{create_standard_gear_system, GearSystem};
