//! # Standard Gear System Factory
//!
//! Convenience constructor for the common case: derive a full
//! geometry/load/material description from five user parameters. Standard
//! proportions are applied (face width = 10×module, 20° pressure angle) with
//! an SCM415 carburized-steel material.

use serde::{Deserialize, Serialize};

use crate::errors::GearResult;
use crate::geometry::GearGeometry;
use crate::loads::LoadConditions;
use crate::materials::MaterialProperties;

/// A complete gear design description, ready for a
/// [`crate::calculator::StrengthCalculator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearSystem {
    pub geometry: GearGeometry,
    pub load: LoadConditions,
    pub material: MaterialProperties,
}

/// Build a standard gear system from basic design parameters.
///
/// The gear tooth count is `teeth_pinion × gear_ratio` truncated to an
/// integer, so the effective ratio of the returned geometry can differ
/// slightly from the requested one. Power is derived from torque and speed.
///
/// # Arguments
///
/// * `module_mm` - Normal module (mm)
/// * `teeth_pinion` - Pinion tooth count
/// * `gear_ratio` - Requested ratio z₂/z₁
/// * `input_torque_nm` - Input torque (N·m)
/// * `input_speed_rpm` - Input speed (rpm)
///
/// # Example
///
/// ```rust
/// use gear_core::system::create_standard_gear_system;
///
/// let system = create_standard_gear_system(2.0, 20, 5.0, 20.0, 1500.0).unwrap();
/// assert_eq!(system.geometry.teeth_gear, 100);
/// assert_eq!(system.geometry.face_width_mm, 20.0);
/// ```
pub fn create_standard_gear_system(
    module_mm: f64,
    teeth_pinion: u32,
    gear_ratio: f64,
    input_torque_nm: f64,
    input_speed_rpm: f64,
) -> GearResult<GearSystem> {
    let teeth_gear = (f64::from(teeth_pinion) * gear_ratio) as u32;

    let geometry = GearGeometry {
        module_mm,
        teeth_pinion,
        teeth_gear,
        face_width_mm: module_mm * 10.0,
        pressure_angle_deg: 20.0,
    };
    geometry.validate()?;

    let load = LoadConditions::from_torque_speed(input_torque_nm, input_speed_rpm);
    load.validate()?;

    let material = MaterialProperties::carburized_steel();
    material.validate()?;

    Ok(GearSystem {
        geometry,
        load,
        material,
    })
}
