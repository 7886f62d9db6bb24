//! # Pipeline Stages
//!
//! Each rating stage is a pure function that computes one quantity and
//! returns it together with a [`StepDraft`] describing the derivation. The
//! caller decides when to commit drafts to a [`crate::ledger::Ledger`], which
//! keeps the arithmetic unit-testable without a calculator instance and makes
//! the bookkeeping explicit.
//!
//! Every stage validates its own denominators and logarithm arguments and
//! raises immediately; `NaN`/`Inf` never leave a stage.

use serde::{Deserialize, Serialize};

use crate::equations;
use crate::errors::{GearError, GearResult};
use crate::geometry::GearGeometry;
use crate::ledger::{StepDraft, StepVariable};
use crate::loads::LoadConditions;
use crate::materials::MaterialProperties;

/// Which member of the pair a per-gear sub-stage applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Member {
    /// Driving gear (z₁)
    Pinion,
    /// Driven gear (z₂)
    Gear,
}

impl Member {
    /// Display label for step descriptions
    pub fn label(&self) -> &'static str {
        match self {
            Member::Pinion => "pinion",
            Member::Gear => "gear",
        }
    }

    /// Tooth count of this member
    pub fn teeth(&self, geometry: &GearGeometry) -> u32 {
        match self {
            Member::Pinion => geometry.teeth_pinion,
            Member::Gear => geometry.teeth_gear,
        }
    }
}

/// Pinion pitch radius r₁ = d₁/2 (mm).
pub fn pitch_radius(geometry: &GearGeometry) -> GearResult<(f64, StepDraft)> {
    let d1 = geometry.pitch_diameter_pinion();
    // Guards are written as negated comparisons so NaN fails them too
    if !(d1 > 0.0) {
        return Err(GearError::zero_denominator(
            "pitch diameter d₁",
            "pinion pitch radius",
        ));
    }
    let r1 = d1 / 2.0;
    let draft = StepDraft {
        description: "Pinion pitch radius".to_string(),
        formula: "r₁ = d₁/2 = (mn × z₁)/2".to_string(),
        variables: vec![
            StepVariable::float("mn", geometry.module_mm),
            StepVariable::int("z₁", i64::from(geometry.teeth_pinion)),
            StepVariable::float("d₁", d1),
        ],
        substitution: format!("r₁ = {:.3}/2", d1),
        result: r1,
        unit: "mm".to_string(),
        notes: "Pitch radius converts input torque into tangential force".to_string(),
    };
    Ok((r1, draft))
}

/// Tangential force Ft = T×1000/r₁ (N), torque converted from N·m to N·mm.
pub fn tangential_force(load: &LoadConditions, pitch_radius_mm: f64) -> GearResult<(f64, StepDraft)> {
    if !(pitch_radius_mm > 0.0) {
        return Err(GearError::zero_denominator(
            "pitch radius r₁",
            "tangential force",
        ));
    }
    let ft = equations::tangential_force(load.input_torque_nm, pitch_radius_mm);
    let draft = StepDraft {
        description: "Tangential force (basic power transmission)".to_string(),
        formula: "Ft = T/r₁".to_string(),
        variables: vec![
            StepVariable::float("T", load.input_torque_nm),
            StepVariable::float("r₁", pitch_radius_mm),
        ],
        substitution: format!("Ft = ({:.3} × 1000)/{:.3}", load.input_torque_nm, pitch_radius_mm),
        result: ft,
        unit: "N".to_string(),
        notes: "Tangential force is the primary load on the gear teeth".to_string(),
    };
    Ok((ft, draft))
}

/// Tooth form factor Y_Fa for one member (ISO 6336-3 table approximation).
pub fn form_factor(member: Member, geometry: &GearGeometry) -> GearResult<(f64, StepDraft)> {
    let teeth = member.teeth(geometry);
    if teeth == 0 {
        return Err(GearError::invalid_input(
            "teeth",
            teeth.to_string(),
            "Tooth count must be positive",
        ));
    }
    let y_fa = equations::form_factor(teeth);
    let (formula, substitution) = if teeth < 12 {
        (
            "Y_Fa = 0.18 + 0.15×z/12 (z < 12)",
            format!("Y_Fa = 0.18 + 0.15×{}/12", teeth),
        )
    } else if teeth <= 25 {
        (
            "Y_Fa = 0.154 − 0.912/z (12 ≤ z ≤ 25)",
            format!("Y_Fa = 0.154 − 0.912/{}", teeth),
        )
    } else if teeth <= 100 {
        (
            "Y_Fa = 0.175 − 0.841/z (25 < z ≤ 100)",
            format!("Y_Fa = 0.175 − 0.841/{}", teeth),
        )
    } else {
        (
            "Y_Fa = 0.175 − 84.1/z (z > 100)",
            format!("Y_Fa = 0.175 − 84.1/{}", teeth),
        )
    };
    let draft = StepDraft {
        description: format!("Form factor Y_Fa ({}, z = {})", member.label(), teeth),
        formula: formula.to_string(),
        variables: vec![StepVariable::int("z", i64::from(teeth))],
        substitution,
        result: y_fa,
        unit: "-".to_string(),
        notes: "Form factor captures stress concentration from tooth shape".to_string(),
    };
    Ok((y_fa, draft))
}

/// Stress correction factor Y_Sa for one member.
pub fn stress_correction_factor(
    member: Member,
    geometry: &GearGeometry,
) -> GearResult<(f64, StepDraft)> {
    let teeth = member.teeth(geometry);
    if teeth == 0 {
        return Err(GearError::log_domain(0.0, "stress correction factor"));
    }
    let y_sa = equations::stress_correction_factor(teeth);
    let (formula, substitution) = if teeth <= 25 {
        (
            "Y_Sa = 1.2 + 0.13×ln(z) (z ≤ 25)",
            format!("Y_Sa = 1.2 + 0.13×ln({})", teeth),
        )
    } else {
        (
            "Y_Sa = 1.5 + 0.25×ln(z/25) (z > 25)",
            format!("Y_Sa = 1.5 + 0.25×ln({}/25)", teeth),
        )
    };
    let draft = StepDraft {
        description: format!("Stress correction factor Y_Sa ({}, z = {})", member.label(), teeth),
        formula: formula.to_string(),
        variables: vec![StepVariable::int("z", i64::from(teeth))],
        substitution,
        result: y_sa,
        unit: "-".to_string(),
        notes: "Stress correction factor adjusts the root stress distribution".to_string(),
    };
    Ok((y_sa, draft))
}

/// Tooth-root bending stress σF for one member (ISO 6336-3).
pub fn bending_stress(
    member: Member,
    geometry: &GearGeometry,
    ft_n: f64,
    y_fa: f64,
    y_sa: f64,
) -> GearResult<(f64, StepDraft)> {
    // Checked individually: a product check would accept two negative factors
    if !(geometry.face_width_mm > 0.0) || !(geometry.module_mm > 0.0) {
        return Err(GearError::zero_denominator(
            "face width × module",
            "bending stress",
        ));
    }
    let sigma_f = equations::bending_stress(ft_n, y_fa, y_sa, geometry.face_width_mm, geometry.module_mm);
    let notes = match member {
        Member::Pinion => "The pinion usually sees the higher bending stress",
        Member::Gear => "More teeth on the driven gear give a lower bending stress",
    };
    let draft = StepDraft {
        description: format!("Bending stress σF ({}, ISO 6336-3)", member.label()),
        formula: "σF = (Ft × Y_Fa × Y_Sa)/(b × mn)".to_string(),
        variables: vec![
            StepVariable::float("Ft", ft_n),
            StepVariable::float("Y_Fa", y_fa),
            StepVariable::float("Y_Sa", y_sa),
            StepVariable::float("b", geometry.face_width_mm),
            StepVariable::float("mn", geometry.module_mm),
        ],
        substitution: format!(
            "σF = ({:.1} × {:.3} × {:.3})/({:.1} × {:.1})",
            ft_n, y_fa, y_sa, geometry.face_width_mm, geometry.module_mm
        ),
        result: sigma_f,
        unit: "MPa".to_string(),
        notes: notes.to_string(),
    };
    Ok((sigma_f, draft))
}

/// Zone factor Z_H (ISO 6336-2, external spur gears).
pub fn zone_factor(geometry: &GearGeometry) -> GearResult<(f64, StepDraft)> {
    let alpha_rad = geometry.pressure_angle_deg.to_radians();
    let sin_alpha = alpha_rad.sin();
    let cos_alpha = alpha_rad.cos();
    if !(sin_alpha > 0.0) {
        return Err(GearError::zero_denominator("sin(αn)", "zone factor"));
    }
    // Angles at or beyond 90° make the radicand non-positive
    let radicand = 2.0 * cos_alpha / sin_alpha;
    if !(radicand > 0.0) {
        return Err(GearError::invalid_input(
            "pressure_angle_deg",
            geometry.pressure_angle_deg.to_string(),
            "Pressure angle must be between 0 and 90 degrees",
        ));
    }
    let z_h = radicand.sqrt();
    let draft = StepDraft {
        description: "Zone factor Z_H".to_string(),
        formula: "Z_H = √(2×cos(αn)/sin(αn))".to_string(),
        variables: vec![
            StepVariable::float("αn", geometry.pressure_angle_deg),
            StepVariable::float("cos(αn)", cos_alpha),
            StepVariable::float("sin(αn)", sin_alpha),
        ],
        substitution: format!("Z_H = √(2×{:.3}/{:.3})", cos_alpha, sin_alpha),
        result: z_h,
        unit: "-".to_string(),
        notes: "Zone factor covers flank curvature at the pitch point".to_string(),
    };
    Ok((z_h, draft))
}

/// Elastic coefficient Z_E for an identical-material pairing.
pub fn elastic_coefficient(material: &MaterialProperties) -> GearResult<(f64, StepDraft)> {
    if !(material.elastic_modulus_gpa > 0.0) {
        return Err(GearError::zero_denominator(
            "elastic modulus E",
            "elastic coefficient",
        ));
    }
    let z_e = equations::elastic_coefficient(material.elastic_modulus_gpa, material.poisson_ratio);
    let draft = StepDraft {
        description: "Elastic coefficient Z_E (steel-steel)".to_string(),
        formula: "Z_E = √(1/(π×((1−ν₁²)/E₁ + (1−ν₂²)/E₂)))".to_string(),
        variables: vec![
            StepVariable::float("ν", material.poisson_ratio),
            StepVariable::float("E", material.elastic_modulus_gpa),
        ],
        substitution: format!(
            "Z_E = √(1/(π×2×(1−{:.2}²)/{:.1}))",
            material.poisson_ratio, material.elastic_modulus_gpa
        ),
        result: z_e,
        unit: "√MPa".to_string(),
        notes: "Same material on both members, elastic modulus applied twice".to_string(),
    };
    Ok((z_e, draft))
}

/// Contact-ratio factor Z_ε (fixed standard-gear approximation).
pub fn contact_ratio_factor() -> (f64, StepDraft) {
    let z_eps = equations::contact_ratio_factor();
    let draft = StepDraft {
        description: "Contact-ratio factor Z_ε".to_string(),
        formula: "Z_ε = √(εα×0.5) (εα ≈ 1.8 for standard gears)".to_string(),
        variables: vec![StepVariable::float("εα", 1.8)],
        substitution: "Z_ε = √(1.8×0.5) = √0.9".to_string(),
        result: z_eps,
        unit: "-".to_string(),
        notes: "Typical contact ratio for standard external spur gears".to_string(),
    };
    (z_eps, draft)
}

/// Hertzian contact stress σH (ISO 6336-2).
pub fn contact_stress(
    geometry: &GearGeometry,
    ft_n: f64,
    z_h: f64,
    z_e: f64,
    z_eps: f64,
) -> GearResult<(f64, StepDraft)> {
    let u = geometry.gear_ratio();
    let d1 = geometry.pitch_diameter_pinion();
    // Each factor on its own: u goes infinite (or NaN) for a zero pinion
    // tooth count and a product check would wave that through
    if !(geometry.face_width_mm > 0.0) || !(d1 > 0.0) || !(u > 0.0) || !u.is_finite() {
        return Err(GearError::zero_denominator(
            "face width × d₁ × u",
            "contact stress",
        ));
    }
    if !(ft_n >= 0.0) {
        return Err(GearError::invalid_input(
            "ft_n",
            ft_n.to_string(),
            "Tangential force must be non-negative",
        ));
    }
    let sigma_h = equations::contact_stress(z_h, z_e, z_eps, ft_n, u, geometry.face_width_mm, d1);
    let draft = StepDraft {
        description: "Hertzian contact stress σH (ISO 6336-2)".to_string(),
        formula: "σH = Z_H × Z_E × Z_ε × √(Ft×(u+1)/(b×d₁×u))".to_string(),
        variables: vec![
            StepVariable::float("Z_H", z_h),
            StepVariable::float("Z_E", z_e),
            StepVariable::float("Z_ε", z_eps),
            StepVariable::float("Ft", ft_n),
            StepVariable::float("u", u),
            StepVariable::float("b", geometry.face_width_mm),
            StepVariable::float("d₁", d1),
        ],
        substitution: format!(
            "σH = {:.2}×{:.2}×{:.3}×√({:.1}×{:.1}/({:.1}×{:.1}×{:.1}))",
            z_h,
            z_e,
            z_eps,
            ft_n,
            u + 1.0,
            geometry.face_width_mm,
            d1,
            u
        ),
        result: sigma_h,
        unit: "MPa".to_string(),
        notes: "Contact stress is the same for both members".to_string(),
    };
    Ok((sigma_h, draft))
}

/// Bending safety factor SF for one member.
///
/// A zero or negative computed stress is rejected rather than reported as an
/// infinite margin; an unbounded safety factor reads as "safe" when the real
/// story is a degenerate load case.
pub fn bending_safety_factor(
    member: Member,
    material: &MaterialProperties,
    sigma_f_mpa: f64,
) -> GearResult<(f64, StepDraft)> {
    if !(sigma_f_mpa > 0.0) {
        return Err(GearError::zero_denominator(
            "bending stress σF",
            "bending safety factor",
        ));
    }
    let sf = equations::safety_factor(material.allowable_bending_mpa, sigma_f_mpa);
    let notes = match member {
        Member::Pinion => "Bending safety factor of at least 1.5 is recommended (ISO 6336-3)",
        Member::Gear => "The driven gear usually carries the higher bending safety factor",
    };
    let draft = StepDraft {
        description: format!("Bending safety factor SF ({})", member.label()),
        formula: "SF = σF,lim / σF".to_string(),
        variables: vec![
            StepVariable::float("σF,lim", material.allowable_bending_mpa),
            StepVariable::float("σF", sigma_f_mpa),
        ],
        substitution: format!("SF = {:.1}/{:.3}", material.allowable_bending_mpa, sigma_f_mpa),
        result: sf,
        unit: "-".to_string(),
        notes: notes.to_string(),
    };
    Ok((sf, draft))
}

/// Contact safety factor SH.
pub fn contact_safety_factor(
    material: &MaterialProperties,
    sigma_h_mpa: f64,
) -> GearResult<(f64, StepDraft)> {
    if !(sigma_h_mpa > 0.0) {
        return Err(GearError::zero_denominator(
            "contact stress σH",
            "contact safety factor",
        ));
    }
    let sh = equations::safety_factor(material.allowable_contact_mpa, sigma_h_mpa);
    let draft = StepDraft {
        description: "Contact safety factor SH".to_string(),
        formula: "SH = σH,lim / σH".to_string(),
        variables: vec![
            StepVariable::float("σH,lim", material.allowable_contact_mpa),
            StepVariable::float("σH", sigma_h_mpa),
        ],
        substitution: format!("SH = {:.1}/{:.3}", material.allowable_contact_mpa, sigma_h_mpa),
        result: sh,
        unit: "-".to_string(),
        notes: "Contact safety factor of at least 1.2 is recommended (ISO 6336-2)".to_string(),
    };
    Ok((sh, draft))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_geometry() -> GearGeometry {
        GearGeometry {
            module_mm: 2.0,
            teeth_pinion: 20,
            teeth_gear: 100,
            face_width_mm: 20.0,
            pressure_angle_deg: 20.0,
        }
    }

    #[test]
    fn test_pitch_radius_and_force() {
        let geo = test_geometry();
        let load = LoadConditions::from_torque_speed(20.0, 1500.0);

        let (r1, radius_draft) = pitch_radius(&geo).unwrap();
        assert_eq!(r1, 20.0);
        assert_eq!(radius_draft.unit, "mm");

        let (ft, force_draft) = tangential_force(&load, r1).unwrap();
        assert!((ft - 1000.0).abs() < 1e-9);
        assert_eq!(force_draft.unit, "N");
        assert!(force_draft.substitution.contains("1000"));
    }

    #[test]
    fn test_tangential_force_rejects_zero_radius() {
        let load = LoadConditions::from_torque_speed(20.0, 1500.0);
        let err = tangential_force(&load, 0.0).unwrap_err();
        assert_eq!(err.error_code(), "ZERO_DENOMINATOR");
    }

    #[test]
    fn test_form_factor_snapshots_member_teeth() {
        let geo = test_geometry();
        let (y_fa_p, draft_p) = form_factor(Member::Pinion, &geo).unwrap();
        let (y_fa_g, draft_g) = form_factor(Member::Gear, &geo).unwrap();

        assert!((y_fa_p - 0.1084).abs() < 1e-6);
        assert!((y_fa_g - (0.175 - 0.841 / 100.0)).abs() < 1e-9);
        assert!(draft_p.description.contains("pinion"));
        assert!(draft_g.description.contains("gear"));
        assert_ne!(draft_p.variables, draft_g.variables);
    }

    #[test]
    fn test_stress_correction_rejects_zero_teeth() {
        let mut geo = test_geometry();
        geo.teeth_pinion = 0;
        let err = stress_correction_factor(Member::Pinion, &geo).unwrap_err();
        assert_eq!(err.error_code(), "LOG_DOMAIN");
    }

    #[test]
    fn test_bending_stress_worked_scenario() {
        let geo = test_geometry();
        let (y_fa, _) = form_factor(Member::Pinion, &geo).unwrap();
        let (y_sa, _) = stress_correction_factor(Member::Pinion, &geo).unwrap();
        let (sigma_f, draft) = bending_stress(Member::Pinion, &geo, 1000.0, y_fa, y_sa).unwrap();

        assert!((sigma_f - 4.307).abs() < 1e-2);
        assert_eq!(draft.unit, "MPa");
        assert_eq!(draft.variables.len(), 5);
    }

    #[test]
    fn test_tangential_force_rejects_nan_radius() {
        let load = LoadConditions::from_torque_speed(20.0, 1500.0);
        let err = tangential_force(&load, f64::NAN).unwrap_err();
        assert_eq!(err.error_code(), "ZERO_DENOMINATOR");
    }

    #[test]
    fn test_bending_stress_rejects_negative_dimensions() {
        // Both dimensions negative: their product is positive, the stage
        // must still refuse
        let mut geo = test_geometry();
        geo.face_width_mm = -20.0;
        geo.module_mm = -2.0;
        assert!(bending_stress(Member::Pinion, &geo, 1000.0, 0.1084, 1.589).is_err());
    }

    #[test]
    fn test_zone_factor_draft() {
        let geo = test_geometry();
        let (z_h, draft) = zone_factor(&geo).unwrap();
        assert!((z_h - 2.344133).abs() < 1e-5);
        assert!(draft.formula.contains("Z_H"));
    }

    #[test]
    fn test_zone_factor_rejects_out_of_range_angle() {
        // sin(180°) rounds to ~1.2e-16, so the sine alone passes; the
        // negative radicand must be caught before the square root
        let mut geo = test_geometry();
        geo.pressure_angle_deg = 180.0;
        let err = zone_factor(&geo).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        geo.pressure_angle_deg = 120.0;
        assert!(zone_factor(&geo).is_err());

        geo.pressure_angle_deg = 200.0;
        assert!(zone_factor(&geo).is_err());

        geo.pressure_angle_deg = f64::NAN;
        assert!(zone_factor(&geo).is_err());
    }

    #[test]
    fn test_elastic_coefficient_uses_stored_unit() {
        let mat = MaterialProperties::carburized_steel();
        let (z_e, draft) = elastic_coefficient(&mat).unwrap();
        // E enters as 206 (GPa convention), so Z_E ≈ 6.00, not the
        // handbook 189.8 √MPa for steel
        assert!((z_e - 6.0024).abs() < 1e-3);
        assert_eq!(draft.unit, "√MPa");
    }

    #[test]
    fn test_contact_stress_stage() {
        let geo = test_geometry();
        let (z_h, _) = zone_factor(&geo).unwrap();
        let (z_e, _) = elastic_coefficient(&MaterialProperties::carburized_steel()).unwrap();
        let (z_eps, _) = contact_ratio_factor();
        let (sigma_h, draft) = contact_stress(&geo, 1000.0, z_h, z_e, z_eps).unwrap();

        // √(1000×6/(20×40×5)) = √1.5, times the three factors
        let expected = z_h * z_e * z_eps * 1.5_f64.sqrt();
        assert!((sigma_h - expected).abs() < 1e-9);
        assert_eq!(draft.variables.len(), 7);
    }

    #[test]
    fn test_contact_stress_rejects_degenerate_geometry() {
        // Zero pinion teeth give d₁ = 0 and u = inf
        let mut geo = test_geometry();
        geo.teeth_pinion = 0;
        let (z_eps, _) = contact_ratio_factor();
        let err = contact_stress(&geo, 1000.0, 2.344, 6.002, z_eps).unwrap_err();
        assert_eq!(err.error_code(), "ZERO_DENOMINATOR");

        // Negative tangential force would put a negative radicand under the root
        let geo = test_geometry();
        assert!(contact_stress(&geo, -1000.0, 2.344, 6.002, z_eps).is_err());
    }

    #[test]
    fn test_safety_factors() {
        let mat = MaterialProperties::carburized_steel();
        let (sf, draft) = bending_safety_factor(Member::Pinion, &mat, 4.307).unwrap();
        assert!((sf - 280.0 / 4.307).abs() < 1e-9);
        assert!(draft.notes.contains("1.5"));

        let (sh, _) = contact_safety_factor(&mat, 16.35).unwrap();
        assert!((sh - 750.0 / 16.35).abs() < 1e-9);
    }

    #[test]
    fn test_safety_factor_rejects_degenerate_stress() {
        let mat = MaterialProperties::carburized_steel();
        for bad in [0.0, -4.3, f64::NAN] {
            assert_eq!(
                bending_safety_factor(Member::Pinion, &mat, bad).unwrap_err().error_code(),
                "ZERO_DENOMINATOR"
            );
            assert_eq!(
                contact_safety_factor(&mat, bad).unwrap_err().error_code(),
                "ZERO_DENOMINATOR"
            );
        }
    }

    #[test]
    fn test_safety_factor_strictly_decreasing_in_stress() {
        let mat = MaterialProperties::carburized_steel();
        let (sf_low, _) = bending_safety_factor(Member::Pinion, &mat, 4.307).unwrap();
        let (sf_high, _) = bending_safety_factor(Member::Pinion, &mat, 4.307 + 1e-6).unwrap();
        assert!(sf_high < sf_low);
    }
}
