//! # Calculation Ledger
//!
//! Append-only record of every quantity computed during a rating run. Each
//! step captures the formula applied, a snapshot of its inputs, the numeric
//! substitution, and the result with its unit, so a reviewer can audit the
//! full derivation chain from torque and geometry down to a safety factor.
//!
//! One ledger belongs to exactly one calculation run. The step counter lives
//! inside the ledger, steps are numbered contiguously from 1, and there is no
//! API to delete or reorder them. A new design gets a new calculator and with
//! it a fresh ledger.
//!
//! ## Example
//!
//! ```rust
//! use gear_core::ledger::{Ledger, StepDraft, StepVariable};
//!
//! let mut ledger = Ledger::new();
//! let draft = StepDraft {
//!     description: "Pinion pitch radius".to_string(),
//!     formula: "r1 = d1/2".to_string(),
//!     variables: vec![StepVariable::float("d1", 40.0)],
//!     substitution: "r1 = 40/2".to_string(),
//!     result: 20.0,
//!     unit: "mm".to_string(),
//!     notes: String::new(),
//! };
//! let number = ledger.record(draft);
//! assert_eq!(number, 1);
//! assert_eq!(ledger.steps().len(), 1);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Snapshot value of a variable at the moment a step was computed.
///
/// Tooth counts stay integers so the report prints `z = 20`, not `z = 20.000`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VarValue {
    Int(i64),
    Float(f64),
}

impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarValue::Int(v) => write!(f, "{}", v),
            VarValue::Float(v) => write!(f, "{:.3}", v),
        }
    }
}

/// A named input captured by a calculation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepVariable {
    /// Symbol as used in the formula (e.g., "Ft", "z1", "b")
    pub symbol: String,
    /// Value at computation time
    pub value: VarValue,
}

impl StepVariable {
    /// Capture a floating-point variable
    pub fn float(symbol: impl Into<String>, value: f64) -> Self {
        StepVariable {
            symbol: symbol.into(),
            value: VarValue::Float(value),
        }
    }

    /// Capture an integer variable (tooth counts)
    pub fn int(symbol: impl Into<String>, value: i64) -> Self {
        StepVariable {
            symbol: symbol.into(),
            value: VarValue::Int(value),
        }
    }
}

/// A computed step before it has been assigned a number.
///
/// Stage functions return drafts alongside their numeric result; the caller
/// decides when to commit them via [`Ledger::record`]. This keeps the
/// arithmetic pure and unit-testable without a calculator instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDraft {
    /// What this step computes
    pub description: String,
    /// Symbolic formula applied
    pub formula: String,
    /// Named inputs at computation time
    pub variables: Vec<StepVariable>,
    /// Rendered numeric substitution
    pub substitution: String,
    /// Numeric result
    pub result: f64,
    /// Unit of the result ("-" for dimensionless factors)
    pub unit: String,
    /// Optional engineering remark (empty if none)
    pub notes: String,
}

/// A committed, numbered calculation step. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationStep {
    /// 1-based position within the ledger
    pub step_number: u32,
    pub description: String,
    pub formula: String,
    pub variables: Vec<StepVariable>,
    pub substitution: String,
    pub result: f64,
    pub unit: String,
    pub notes: String,
}

/// Ordered, append-only sequence of calculation steps.
///
/// The counter is owned by the ledger; two ledgers never share numbering
/// state, which is what makes independent design evaluations safe to run
/// in parallel (one calculator, one ledger, one design).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    steps: Vec<CalculationStep>,
    counter: u32,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Ledger::default()
    }

    /// Append a draft, assigning it the next sequential step number.
    ///
    /// Returns the number assigned.
    pub fn record(&mut self, draft: StepDraft) -> u32 {
        self.counter += 1;
        self.steps.push(CalculationStep {
            step_number: self.counter,
            description: draft.description,
            formula: draft.formula,
            variables: draft.variables,
            substitution: draft.substitution,
            result: draft.result,
            unit: draft.unit,
            notes: draft.notes,
        });
        self.counter
    }

    /// Read-only view of all recorded steps, in order.
    pub fn steps(&self) -> &[CalculationStep] {
        &self.steps
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(description: &str) -> StepDraft {
        StepDraft {
            description: description.to_string(),
            formula: "x = y".to_string(),
            variables: vec![StepVariable::float("y", 1.0)],
            substitution: "x = 1.0".to_string(),
            result: 1.0,
            unit: "-".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_numbering_starts_at_one_and_is_contiguous() {
        let mut ledger = Ledger::new();
        assert!(ledger.is_empty());

        for i in 1..=5u32 {
            let assigned = ledger.record(draft(&format!("step {}", i)));
            assert_eq!(assigned, i);
        }

        let numbers: Vec<u32> = ledger.steps().iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_steps_keep_insertion_order() {
        let mut ledger = Ledger::new();
        ledger.record(draft("first"));
        ledger.record(draft("second"));

        assert_eq!(ledger.steps()[0].description, "first");
        assert_eq!(ledger.steps()[1].description, "second");
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_independent_ledgers_do_not_share_counters() {
        let mut a = Ledger::new();
        let mut b = Ledger::new();
        a.record(draft("a1"));
        a.record(draft("a2"));
        assert_eq!(b.record(draft("b1")), 1);
    }

    #[test]
    fn test_var_value_display() {
        assert_eq!(VarValue::Int(20).to_string(), "20");
        assert_eq!(VarValue::Float(0.1084).to_string(), "0.108");
    }

    #[test]
    fn test_var_value_serializes_untagged() {
        let json = serde_json::to_string(&StepVariable::int("z1", 20)).unwrap();
        assert_eq!(json, r#"{"symbol":"z1","value":20}"#);
    }

    #[test]
    fn test_ledger_serialization_roundtrip() {
        let mut ledger = Ledger::new();
        ledger.record(draft("only"));
        let json = serde_json::to_string(&ledger).unwrap();
        let mut roundtrip: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.steps(), ledger.steps());
        // Counter must survive serialization so a reloaded ledger keeps numbering
        assert_eq!(roundtrip.record(draft("next")), 2);
    }
}
