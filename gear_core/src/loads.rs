//! # Load Conditions
//!
//! Operating load on the gear pair: input torque and speed, with the
//! transmitted power carried alongside. Power can be supplied directly or
//! derived from torque and speed via [`LoadConditions::from_torque_speed`].

use serde::{Deserialize, Serialize};

use crate::errors::{GearError, GearResult};

/// Operating load conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadConditions {
    /// Input torque T (N·m)
    pub input_torque_nm: f64,

    /// Input speed n (rpm)
    pub input_speed_rpm: f64,

    /// Transmitted power P (kW)
    pub power_kw: f64,
}

impl LoadConditions {
    /// Build load conditions from torque and speed, deriving power.
    ///
    /// P = T × ω = T × n × 2π/60, reported in kW.
    pub fn from_torque_speed(input_torque_nm: f64, input_speed_rpm: f64) -> Self {
        let power_kw = input_torque_nm * input_speed_rpm * 2.0 * std::f64::consts::PI / 60.0 / 1000.0;
        LoadConditions {
            input_torque_nm,
            input_speed_rpm,
            power_kw,
        }
    }

    /// Validate load parameters.
    pub fn validate(&self) -> GearResult<()> {
        if self.input_torque_nm <= 0.0 {
            return Err(GearError::invalid_input(
                "input_torque_nm",
                self.input_torque_nm.to_string(),
                "Input torque must be positive",
            ));
        }
        if self.input_speed_rpm <= 0.0 {
            return Err(GearError::invalid_input(
                "input_speed_rpm",
                self.input_speed_rpm.to_string(),
                "Input speed must be positive",
            ));
        }
        if self.power_kw < 0.0 {
            return Err(GearError::invalid_input(
                "power_kw",
                self.power_kw.to_string(),
                "Power must be non-negative",
            ));
        }
        Ok(())
    }
}
