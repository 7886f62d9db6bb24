//! # Material Properties
//!
//! Material data for gear strength rating: allowable stresses for the
//! bending and contact limit states plus the elastic constants feeding the
//! Hertzian contact calculation.
//!
//! ## Unit convention for the elastic modulus
//!
//! `elastic_modulus_gpa` is stored in GPa (≈206 for steel) and is fed to the
//! elastic-coefficient formula as-is. The classical steel value of
//! Z_E ≈ 189.8 √MPa assumes E expressed in MPa, so ratings produced with the
//! GPa convention are only comparable to each other, not to handbook Z_E
//! values. See [`crate::equations::elastic_coefficient`].

use serde::{Deserialize, Serialize};

use crate::errors::{GearError, GearResult};

/// Material properties of a gear pair (same material on both members).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Material designation (e.g., "SCM415 carburized steel")
    pub name: String,

    /// Allowable bending stress σF,lim (MPa)
    pub allowable_bending_mpa: f64,

    /// Allowable contact stress σH,lim (MPa)
    pub allowable_contact_mpa: f64,

    /// Elastic modulus E (GPa) - see module docs for the unit convention
    pub elastic_modulus_gpa: f64,

    /// Poisson's ratio ν
    pub poisson_ratio: f64,

    /// Density ρ (kg/m³)
    pub density_kg_m3: f64,
}

impl MaterialProperties {
    /// SCM415 carburized steel, the default pairing for standard gear systems.
    pub fn carburized_steel() -> Self {
        MaterialProperties {
            name: "SCM415 carburized steel".to_string(),
            allowable_bending_mpa: 280.0,
            allowable_contact_mpa: 750.0,
            elastic_modulus_gpa: 206.0,
            poisson_ratio: 0.3,
            density_kg_m3: 7850.0,
        }
    }

    /// Validate material parameters.
    pub fn validate(&self) -> GearResult<()> {
        if self.allowable_bending_mpa <= 0.0 {
            return Err(GearError::invalid_input(
                "allowable_bending_mpa",
                self.allowable_bending_mpa.to_string(),
                "Allowable bending stress must be positive",
            ));
        }
        if self.allowable_contact_mpa <= 0.0 {
            return Err(GearError::invalid_input(
                "allowable_contact_mpa",
                self.allowable_contact_mpa.to_string(),
                "Allowable contact stress must be positive",
            ));
        }
        if self.elastic_modulus_gpa <= 0.0 {
            return Err(GearError::invalid_input(
                "elastic_modulus_gpa",
                self.elastic_modulus_gpa.to_string(),
                "Elastic modulus must be positive",
            ));
        }
        if self.poisson_ratio <= 0.0 || self.poisson_ratio >= 0.5 {
            return Err(GearError::invalid_input(
                "poisson_ratio",
                self.poisson_ratio.to_string(),
                "Poisson's ratio must be between 0 and 0.5",
            ));
        }
        if self.density_kg_m3 <= 0.0 {
            return Err(GearError::invalid_input(
                "density_kg_m3",
                self.density_kg_m3.to_string(),
                "Density must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_steel_validates() {
        let mat = MaterialProperties::carburized_steel();
        assert!(mat.validate().is_ok());
        assert_eq!(mat.allowable_bending_mpa, 280.0);
        assert_eq!(mat.allowable_contact_mpa, 750.0);
        assert_eq!(mat.elastic_modulus_gpa, 206.0);
    }

    #[test]
    fn test_validate_rejects_bad_poisson() {
        for bad in [0.0, -0.1, 0.5, 0.7] {
            let mut mat = MaterialProperties::carburized_steel();
            mat.poisson_ratio = bad;
            assert!(mat.validate().is_err(), "nu {} should be rejected", bad);
        }
    }

    #[test]
    fn test_validate_rejects_nonpositive_allowables() {
        let mut mat = MaterialProperties::carburized_steel();
        mat.allowable_bending_mpa = 0.0;
        assert!(mat.validate().is_err());

        let mut mat = MaterialProperties::carburized_steel();
        mat.allowable_contact_mpa = -750.0;
        assert!(mat.validate().is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mat = MaterialProperties::carburized_steel();
        let json = serde_json::to_string_pretty(&mat).unwrap();
        let roundtrip: MaterialProperties = serde_json::from_str(&json).unwrap();
        assert_eq!(mat, roundtrip);
    }
}
