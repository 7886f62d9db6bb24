//! # Gear Pair Geometry
//!
//! Geometric description of a single-stage external spur gear pair.
//!
//! Only the five defining parameters are stored; everything else (pitch
//! diameters, gear ratio, center distance) is recomputed on demand so the
//! derived values can never drift out of sync with the stored fields.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "module_mm": 2.0,
//!   "teeth_pinion": 20,
//!   "teeth_gear": 100,
//!   "face_width_mm": 20.0,
//!   "pressure_angle_deg": 20.0
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{GearError, GearResult};

/// Geometry of a spur gear pair.
///
/// Units follow ISO 6336 conventions: lengths in millimeters, angles in
/// degrees. Metric module `mn` relates tooth size to pitch diameter via
/// `d = mn × z`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GearGeometry {
    /// Normal module mn (mm)
    pub module_mm: f64,

    /// Pinion (driving gear) tooth count z₁
    pub teeth_pinion: u32,

    /// Gear (driven gear) tooth count z₂
    pub teeth_gear: u32,

    /// Face width b (mm)
    pub face_width_mm: f64,

    /// Normal pressure angle αn (degrees), 20° for standard gears
    pub pressure_angle_deg: f64,
}

impl GearGeometry {
    /// Gear ratio u = z₂/z₁
    pub fn gear_ratio(&self) -> f64 {
        f64::from(self.teeth_gear) / f64::from(self.teeth_pinion)
    }

    /// Pinion pitch diameter d₁ = mn × z₁ (mm)
    pub fn pitch_diameter_pinion(&self) -> f64 {
        self.module_mm * f64::from(self.teeth_pinion)
    }

    /// Gear pitch diameter d₂ = mn × z₂ (mm)
    pub fn pitch_diameter_gear(&self) -> f64 {
        self.module_mm * f64::from(self.teeth_gear)
    }

    /// Center distance a = (d₁ + d₂)/2 (mm)
    pub fn center_distance(&self) -> f64 {
        (self.pitch_diameter_pinion() + self.pitch_diameter_gear()) / 2.0
    }

    /// Validate geometric parameters.
    pub fn validate(&self) -> GearResult<()> {
        if self.module_mm <= 0.0 {
            return Err(GearError::invalid_input(
                "module_mm",
                self.module_mm.to_string(),
                "Module must be positive",
            ));
        }
        if self.teeth_pinion == 0 {
            return Err(GearError::invalid_input(
                "teeth_pinion",
                self.teeth_pinion.to_string(),
                "Pinion tooth count must be positive",
            ));
        }
        if self.teeth_gear == 0 {
            return Err(GearError::invalid_input(
                "teeth_gear",
                self.teeth_gear.to_string(),
                "Gear tooth count must be positive",
            ));
        }
        if self.face_width_mm <= 0.0 {
            return Err(GearError::invalid_input(
                "face_width_mm",
                self.face_width_mm.to_string(),
                "Face width must be positive",
            ));
        }
        if self.pressure_angle_deg <= 0.0 || self.pressure_angle_deg >= 90.0 {
            return Err(GearError::invalid_input(
                "pressure_angle_deg",
                self.pressure_angle_deg.to_string(),
                "Pressure angle must be between 0 and 90 degrees",
            ));
        }
        Ok(())
    }
}
