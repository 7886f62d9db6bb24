//! # Calculation Report Rendering
//!
//! Turns a [`Ledger`] into a human-readable, markdown-like derivation
//! document: one section per step, in ledger order, with the formula, the
//! captured variables, the numeric substitution and the result. Rendering is
//! a pure function of the ledger; the same ledger always yields the same
//! string, so downstream document assembly can treat the output as opaque,
//! reproducible text.
//!
//! Floats are formatted to three decimals throughout; integers (tooth
//! counts) print without a fractional part.

use std::fmt::Write;

use crate::ledger::Ledger;

/// Render the full step-by-step derivation of a rating run.
pub fn render(ledger: &Ledger) -> String {
    let mut out = String::new();
    out.push_str("# ISO 6336 Gear Strength Rating - Detailed Derivation\n\n");

    for step in ledger.steps() {
        // Writing to a String cannot fail
        let _ = writeln!(out, "## Step {}: {}\n", step.step_number, step.description);
        let _ = writeln!(out, "**Formula:** {}\n", step.formula);
        out.push_str("**Variables:**\n");
        for var in &step.variables {
            let _ = writeln!(out, "- {} = {}", var.symbol, var.value);
        }
        let _ = writeln!(out, "\n**Substitution:** {}", step.substitution);
        let _ = writeln!(out, "**Result:** {:.3} {}", step.result, step.unit);
        if !step.notes.is_empty() {
            let _ = writeln!(out, "**Notes:** {}", step.notes);
        }
        out.push('\n');
    }

    out
}
