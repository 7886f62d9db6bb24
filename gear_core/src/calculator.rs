//! # Strength Calculator
//!
//! The stateful engine that runs the rating pipeline and owns the calculation
//! ledger. The pipeline is a strict linear sequence with no branching:
//!
//! ```text
//! Force → Bending[pinion, gear] → Contact[Z_H, Z_E, Z_ε, Hertz] → Safety[pinion, gear, contact]
//! ```
//!
//! Stage arithmetic lives in [`crate::stages`]; the calculator's job is
//! sequencing and bookkeeping. One calculator instance serves one gear
//! design; parallel sweeps over many designs each get their own instance so
//! ledgers never interleave.
//!
//! ## Example
//!
//! ```rust
//! use gear_core::calculator::StrengthCalculator;
//! use gear_core::system::create_standard_gear_system;
//!
//! let system = create_standard_gear_system(2.0, 20, 5.0, 20.0, 1500.0).unwrap();
//! let mut calc = StrengthCalculator::new(system.geometry, system.load, system.material);
//! let rating = calc.evaluate().unwrap();
//!
//! assert!((rating.tangential_force_n - 1000.0).abs() < 1e-9);
//! println!("SF pinion = {:.1}", rating.safety_bending_pinion);
//! println!("{}", calc.report());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::GearResult;
use crate::geometry::GearGeometry;
use crate::ledger::Ledger;
use crate::loads::LoadConditions;
use crate::materials::MaterialProperties;
use crate::report;
use crate::stages::{self, Member};

/// Recommended minimum bending safety factor (ISO 6336-3)
pub const MIN_BENDING_SAFETY: f64 = 1.5;

/// Recommended minimum contact safety factor (ISO 6336-2)
pub const MIN_CONTACT_SAFETY: f64 = 1.2;

/// Terminal outputs of a completed rating run.
///
/// ## JSON Example
///
/// ```json
/// {
///   "tangential_force_n": 1000.0,
///   "bending_stress_pinion_mpa": 4.31,
///   "bending_stress_gear_mpa": 7.69,
///   "contact_stress_mpa": 16.35,
///   "safety_bending_pinion": 65.0,
///   "safety_bending_gear": 36.4,
///   "safety_contact": 45.9
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingResult {
    /// Tangential force Ft at the pinion pitch circle (N)
    pub tangential_force_n: f64,

    /// Tooth-root bending stress σF, pinion (MPa)
    pub bending_stress_pinion_mpa: f64,

    /// Tooth-root bending stress σF, gear (MPa)
    pub bending_stress_gear_mpa: f64,

    /// Hertzian contact stress σH, identical for both members (MPa)
    pub contact_stress_mpa: f64,

    /// Bending safety factor SF, pinion
    pub safety_bending_pinion: f64,

    /// Bending safety factor SF, gear
    pub safety_bending_gear: f64,

    /// Contact safety factor SH
    pub safety_contact: f64,
}

impl RatingResult {
    /// Check all safety factors against the recommended minima.
    pub fn passes(&self) -> bool {
        self.safety_bending_pinion >= MIN_BENDING_SAFETY
            && self.safety_bending_gear >= MIN_BENDING_SAFETY
            && self.safety_contact >= MIN_CONTACT_SAFETY
    }

    /// The check with the smallest margin over its recommended minimum.
    pub fn governing_condition(&self) -> &'static str {
        let pinion = self.safety_bending_pinion / MIN_BENDING_SAFETY;
        let gear = self.safety_bending_gear / MIN_BENDING_SAFETY;
        let contact = self.safety_contact / MIN_CONTACT_SAFETY;
        if pinion <= gear && pinion <= contact {
            "Pinion bending"
        } else if gear <= contact {
            "Gear bending"
        } else {
            "Contact"
        }
    }
}

/// ISO 6336 gear strength calculator.
///
/// Owns exactly one [`Ledger`]; every stage method appends the steps it
/// derives. Stage methods stay individually callable for fine-grained use,
/// but the conventional entry point is [`StrengthCalculator::evaluate`],
/// which runs the whole pipeline once per design.
#[derive(Debug, Clone)]
pub struct StrengthCalculator {
    geometry: GearGeometry,
    load: LoadConditions,
    material: MaterialProperties,
    ledger: Ledger,
}

impl StrengthCalculator {
    /// Create a calculator for one gear design with an empty ledger.
    pub fn new(geometry: GearGeometry, load: LoadConditions, material: MaterialProperties) -> Self {
        StrengthCalculator {
            geometry,
            load,
            material,
            ledger: Ledger::new(),
        }
    }

    /// Tangential force at the pinion pitch circle (ISO 6336-1).
    ///
    /// Records two steps: the pitch radius derivation and the force itself.
    pub fn calculate_tangential_force(&mut self) -> GearResult<f64> {
        let (r1, draft) = stages::pitch_radius(&self.geometry)?;
        self.ledger.record(draft);

        let (ft, draft) = stages::tangential_force(&self.load, r1)?;
        self.ledger.record(draft);
        Ok(ft)
    }

    /// Tooth-root bending stresses for pinion and gear (ISO 6336-3).
    ///
    /// Each member records its own form factor, stress correction factor and
    /// bending stress with distinct variable snapshots.
    pub fn calculate_bending_stress(&mut self, ft_n: f64) -> GearResult<(f64, f64)> {
        let sigma_f_pinion = self.bending_stress_for(Member::Pinion, ft_n)?;
        let sigma_f_gear = self.bending_stress_for(Member::Gear, ft_n)?;
        Ok((sigma_f_pinion, sigma_f_gear))
    }

    fn bending_stress_for(&mut self, member: Member, ft_n: f64) -> GearResult<f64> {
        let (y_fa, draft) = stages::form_factor(member, &self.geometry)?;
        self.ledger.record(draft);

        let (y_sa, draft) = stages::stress_correction_factor(member, &self.geometry)?;
        self.ledger.record(draft);

        let (sigma_f, draft) = stages::bending_stress(member, &self.geometry, ft_n, y_fa, y_sa)?;
        self.ledger.record(draft);
        Ok(sigma_f)
    }

    /// Hertzian contact stress (ISO 6336-2).
    ///
    /// Records the zone factor, elastic coefficient, contact-ratio factor and
    /// the Hertz combination.
    pub fn calculate_contact_stress(&mut self, ft_n: f64) -> GearResult<f64> {
        let (z_h, draft) = stages::zone_factor(&self.geometry)?;
        self.ledger.record(draft);

        let (z_e, draft) = stages::elastic_coefficient(&self.material)?;
        self.ledger.record(draft);

        let (z_eps, draft) = stages::contact_ratio_factor();
        self.ledger.record(draft);

        let (sigma_h, draft) = stages::contact_stress(&self.geometry, ft_n, z_h, z_e, z_eps)?;
        self.ledger.record(draft);
        Ok(sigma_h)
    }

    /// Safety factors against the material allowables.
    ///
    /// Degenerate (zero or negative) stresses are errors, not infinite
    /// margins; steps recorded before a failure stay in the ledger for
    /// diagnosis.
    pub fn calculate_safety_factors(
        &mut self,
        sigma_f_pinion_mpa: f64,
        sigma_f_gear_mpa: f64,
        sigma_h_mpa: f64,
    ) -> GearResult<(f64, f64, f64)> {
        let (sf_pinion, draft) =
            stages::bending_safety_factor(Member::Pinion, &self.material, sigma_f_pinion_mpa)?;
        self.ledger.record(draft);

        let (sf_gear, draft) =
            stages::bending_safety_factor(Member::Gear, &self.material, sigma_f_gear_mpa)?;
        self.ledger.record(draft);

        let (sh, draft) = stages::contact_safety_factor(&self.material, sigma_h_mpa)?;
        self.ledger.record(draft);
        Ok((sf_pinion, sf_gear, sh))
    }

    /// Run the full pipeline: force, bending, contact, safety.
    ///
    /// Inputs are validated up front; stage-level arithmetic guards still
    /// apply throughout.
    pub fn evaluate(&mut self) -> GearResult<RatingResult> {
        self.geometry.validate()?;
        self.load.validate()?;
        self.material.validate()?;

        let ft = self.calculate_tangential_force()?;
        let (sigma_f_pinion, sigma_f_gear) = self.calculate_bending_stress(ft)?;
        let sigma_h = self.calculate_contact_stress(ft)?;
        let (sf_pinion, sf_gear, sh) =
            self.calculate_safety_factors(sigma_f_pinion, sigma_f_gear, sigma_h)?;

        Ok(RatingResult {
            tangential_force_n: ft,
            bending_stress_pinion_mpa: sigma_f_pinion,
            bending_stress_gear_mpa: sigma_f_gear,
            contact_stress_mpa: sigma_h,
            safety_bending_pinion: sf_pinion,
            safety_bending_gear: sf_gear,
            safety_contact: sh,
        })
    }

    /// Read-only view of the calculation ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Render the step-by-step derivation report.
    pub fn report(&self) -> String {
        report::render(&self.ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard_calculator() -> StrengthCalculator {
        let geometry = GearGeometry {
            module_mm: 2.0,
            teeth_pinion: 20,
            teeth_gear: 100,
            face_width_mm: 20.0,
            pressure_angle_deg: 20.0,
        };
        let load = LoadConditions::from_torque_speed(20.0, 1500.0);
        StrengthCalculator::new(geometry, load, MaterialProperties::carburized_steel())
    }

    #[test]
    fn test_worked_scenario() {
        let mut calc = standard_calculator();
        let rating = calc.evaluate().unwrap();

        // module 2 mm, z1=20, u=5, T=20 N·m: r1 = 20 mm, Ft = 1000 N
        assert!((rating.tangential_force_n - 1000.0).abs() < 1e-9);
        // σF pinion = (1000 × 0.1084 × 1.5894)/(20 × 2) ≈ 4.307 MPa
        assert!((rating.bending_stress_pinion_mpa - 4.307).abs() < 1e-2);
        // gear (z=100): Y_Fa = 0.16659, Y_Sa ≈ 1.84657 → σF ≈ 7.691 MPa
        assert!((rating.bending_stress_gear_mpa - 7.691).abs() < 1e-2);
        // σH ≈ 16.35 MPa under the GPa elastic-modulus convention
        assert!((rating.contact_stress_mpa - 16.35).abs() < 0.05);

        assert!((rating.safety_bending_pinion - 280.0 / rating.bending_stress_pinion_mpa).abs() < 1e-9);
        assert!((rating.safety_bending_gear - 280.0 / rating.bending_stress_gear_mpa).abs() < 1e-9);
        assert!((rating.safety_contact - 750.0 / rating.contact_stress_mpa).abs() < 1e-9);
        assert!(rating.passes());
    }

    #[test]
    fn test_full_run_records_contiguous_steps() {
        let mut calc = standard_calculator();
        calc.evaluate().unwrap();

        // 2 force + 2×3 bending + 4 contact + 3 safety = 15 steps
        let steps = calc.ledger().steps();
        assert_eq!(steps.len(), 15);
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step.step_number, i as u32 + 1);
        }
    }

    #[test]
    fn test_pipeline_order() {
        let mut calc = standard_calculator();
        calc.evaluate().unwrap();
        let descriptions: Vec<&str> = calc
            .ledger()
            .steps()
            .iter()
            .map(|s| s.description.as_str())
            .collect();

        assert!(descriptions[0].contains("pitch radius"));
        assert!(descriptions[1].contains("Tangential force"));
        assert!(descriptions[2].contains("Form factor"));
        assert!(descriptions[4].contains("Bending stress"));
        assert!(descriptions[8].contains("Zone factor"));
        assert!(descriptions[11].contains("Hertzian"));
        assert!(descriptions[14].contains("Contact safety"));
    }

    #[test]
    fn test_reevaluation_is_deterministic() {
        let mut calc = standard_calculator();
        let first = calc.evaluate().unwrap();
        let second = calc.evaluate().unwrap();

        // Same numbers, and the ledger keeps appending rather than resetting
        assert_eq!(first, second);
        assert_eq!(calc.ledger().len(), 30);
        assert_eq!(calc.ledger().steps()[29].step_number, 30);
    }

    #[test]
    fn test_invalid_geometry_rejected_before_any_step() {
        let geometry = GearGeometry {
            module_mm: 0.0,
            teeth_pinion: 20,
            teeth_gear: 100,
            face_width_mm: 20.0,
            pressure_angle_deg: 20.0,
        };
        let load = LoadConditions::from_torque_speed(20.0, 1500.0);
        let mut calc = StrengthCalculator::new(geometry, load, MaterialProperties::carburized_steel());

        assert!(calc.evaluate().is_err());
        assert!(calc.ledger().is_empty());
    }

    #[test]
    fn test_zero_torque_rejected() {
        let geometry = GearGeometry {
            module_mm: 2.0,
            teeth_pinion: 20,
            teeth_gear: 100,
            face_width_mm: 20.0,
            pressure_angle_deg: 20.0,
        };
        let load = LoadConditions::from_torque_speed(0.0, 1500.0);
        let mut calc = StrengthCalculator::new(geometry, load, MaterialProperties::carburized_steel());

        let err = calc.evaluate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_partial_ledger_survives_stage_failure() {
        let mut calc = standard_calculator();
        let ft = calc.calculate_tangential_force().unwrap();
        assert_eq!(calc.ledger().len(), 2);

        // Degenerate stress fed directly to the safety stage
        assert!(calc.calculate_safety_factors(0.0, 1.0, 1.0).is_err());
        // Earlier steps stay recorded for diagnosis
        assert_eq!(calc.ledger().len(), 2);
        assert!((ft - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_governing_condition() {
        let rating = RatingResult {
            tangential_force_n: 1000.0,
            bending_stress_pinion_mpa: 100.0,
            bending_stress_gear_mpa: 50.0,
            contact_stress_mpa: 700.0,
            safety_bending_pinion: 2.8,
            safety_bending_gear: 5.6,
            safety_contact: 1.07,
        };
        assert_eq!(rating.governing_condition(), "Contact");
        assert!(!rating.passes());
    }

    #[test]
    fn test_result_serialization() {
        let mut calc = standard_calculator();
        let rating = calc.evaluate().unwrap();
        let json = serde_json::to_string_pretty(&rating).unwrap();
        assert!(json.contains("tangential_force_n"));
        assert!(json.contains("safety_contact"));

        // Bit-exact equality needs serde_json's float_roundtrip feature;
        // fields like the gear safety factor carry full 17-digit fractions
        let roundtrip: RatingResult = serde_json::from_str(&json).unwrap();
        assert_eq!(rating, roundtrip);
        assert_eq!(
            rating.safety_bending_gear.to_bits(),
            roundtrip.safety_bending_gear.to_bits()
        );
    }
}
