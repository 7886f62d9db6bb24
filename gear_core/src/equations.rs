//! # ISO 6336 Rating Formulas
//!
//! The raw strength-rating formulas, kept in one place so they can be
//! verified against the standard independently of ledger bookkeeping. All
//! functions are pure f64 math; input validation and arithmetic guards live
//! one layer up in [`crate::stages`].
//!
//! ## Notation
//!
//! - `mn` = Normal module (mm)
//! - `z` = Tooth count, `z₁` pinion, `z₂` gear
//! - `d₁` = Pinion pitch diameter (mm)
//! - `b` = Face width (mm)
//! - `u` = Gear ratio z₂/z₁
//! - `T` = Input torque (N·m)
//! - `Ft` = Tangential force at the pitch circle (N)
//! - `Y_Fa` = Tooth form factor
//! - `Y_Sa` = Stress correction factor
//! - `Z_H` = Zone factor
//! - `Z_E` = Elastic coefficient
//! - `Z_ε` = Contact-ratio factor
//! - `σF` = Tooth-root bending stress (MPa)
//! - `σH` = Hertzian contact stress (MPa)
//!
//! ## References
//!
//! - ISO 6336-1: Basic principles and general influence factors
//! - ISO 6336-2: Surface durability (pitting)
//! - ISO 6336-3: Tooth bending strength

use std::f64::consts::PI;

// =============================================================================
// FORCE (ISO 6336-1)
// =============================================================================

/// Tangential force at the pinion pitch circle.
///
/// # Formula
/// Ft = T×1000 / r₁, with T in N·m converted to N·mm and r₁ = d₁/2 in mm.
///
/// # Arguments
/// * `torque_nm` - Input torque (N·m)
/// * `pitch_radius_mm` - Pinion pitch radius (mm), must be nonzero
#[inline]
pub fn tangential_force(torque_nm: f64, pitch_radius_mm: f64) -> f64 {
    torque_nm * 1000.0 / pitch_radius_mm
}

// =============================================================================
// BENDING (ISO 6336-3)
// =============================================================================

/// Tooth form factor Y_Fa, piecewise in tooth count.
///
/// Empirical approximation of the standard's lookup table for 20° pressure
/// angle. The bands are intentionally discontinuous at z = 12, 25 and 100;
/// each band approximates a different region of the table and the seams are
/// part of the documented behavior, not smoothed.
///
/// # Formula
/// - z < 12:       Y_Fa = 0.18 + 0.15×z/12
/// - 12 ≤ z ≤ 25:  Y_Fa = 0.154 − 0.912/z
/// - 25 < z ≤ 100: Y_Fa = 0.175 − 0.841/z
/// - z > 100:      Y_Fa = 0.175 − 84.1/z
#[inline]
pub fn form_factor(teeth: u32) -> f64 {
    let z = f64::from(teeth);
    if teeth < 12 {
        0.18 + 0.15 * z / 12.0
    } else if teeth <= 25 {
        0.154 - 0.912 / z
    } else if teeth <= 100 {
        0.175 - 0.841 / z
    } else {
        0.175 - 84.1 / z
    }
}

/// Stress correction factor Y_Sa.
///
/// # Formula
/// - z ≤ 25: Y_Sa = 1.2 + 0.13×ln(z)
/// - z > 25: Y_Sa = 1.5 + 0.25×ln(z/25)
///
/// Caller must guarantee z > 0 (logarithm domain).
#[inline]
pub fn stress_correction_factor(teeth: u32) -> f64 {
    let z = f64::from(teeth);
    if teeth <= 25 {
        1.2 + 0.13 * z.ln()
    } else {
        1.5 + 0.25 * (z / 25.0).ln()
    }
}

/// Tooth-root bending stress.
///
/// # Formula
/// σF = (Ft × Y_Fa × Y_Sa) / (b × mn)
#[inline]
pub fn bending_stress(ft_n: f64, y_fa: f64, y_sa: f64, face_width_mm: f64, module_mm: f64) -> f64 {
    (ft_n * y_fa * y_sa) / (face_width_mm * module_mm)
}

// =============================================================================
// CONTACT (ISO 6336-2)
// =============================================================================

/// Zone factor Z_H for external spur gears.
///
/// # Formula
/// Z_H = √(2×cos(α)/sin(α)), α = pressure angle in radians
#[inline]
pub fn zone_factor(pressure_angle_rad: f64) -> f64 {
    (2.0 * pressure_angle_rad.cos() / pressure_angle_rad.sin()).sqrt()
}

/// Elastic coefficient Z_E for a steel-steel pairing (identical material on
/// both members).
///
/// # Formula
/// Z_E = √(1 / (π × 2×(1−ν²)/E))
///
/// E is used exactly as stored on the material record (GPa by convention in
/// this crate), so the resulting Z_E is not directly comparable to handbook
/// values computed with E in MPa. See [`crate::materials`] module docs.
#[inline]
pub fn elastic_coefficient(elastic_modulus: f64, poisson_ratio: f64) -> f64 {
    (1.0 / (PI * 2.0 * (1.0 - poisson_ratio.powi(2)) / elastic_modulus)).sqrt()
}

/// Contact-ratio factor Z_ε for standard external spur gears.
///
/// # Formula
/// Z_ε = √0.9, a fixed approximation for a transverse contact ratio εα ≈ 1.8.
/// Not parameterized by the actual contact ratio.
#[inline]
pub fn contact_ratio_factor() -> f64 {
    0.9_f64.sqrt()
}

/// Hertzian contact stress at the pitch point.
///
/// # Formula
/// σH = Z_H × Z_E × Z_ε × √(Ft×(u+1) / (b×d₁×u))
#[inline]
pub fn contact_stress(
    z_h: f64,
    z_e: f64,
    z_eps: f64,
    ft_n: f64,
    gear_ratio: f64,
    face_width_mm: f64,
    pitch_diameter_pinion_mm: f64,
) -> f64 {
    z_h * z_e
        * z_eps
        * (ft_n * (gear_ratio + 1.0) / (face_width_mm * pitch_diameter_pinion_mm * gear_ratio))
            .sqrt()
}

// =============================================================================
// SAFETY
// =============================================================================

/// Safety factor: ratio of allowable stress to computed stress.
///
/// # Formula
/// S = σ_lim / σ
#[inline]
pub fn safety_factor(allowable_mpa: f64, actual_mpa: f64) -> f64 {
    allowable_mpa / actual_mpa
}
