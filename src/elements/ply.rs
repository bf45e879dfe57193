//! Ply - a single orthotropic lamina

use serde::{Deserialize, Serialize};

use crate::error::{LaminateError, LaminateResult};
use crate::math::{self, Mat3};

/// Raw lamina properties as supplied by a caller or a JSON payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlyProperties {
    /// Longitudinal modulus E1 (fibre direction)
    pub e1: f64,
    /// Transverse modulus E2
    pub e2: f64,
    /// Major Poisson's ratio v12
    pub v12: f64,
    /// In-plane shear modulus G12
    pub g12: f64,
    /// Ply thickness
    pub thickness: f64,
}

/// An orthotropic lamina with its reduced stiffness in material axes
///
/// Moduli are in any consistent pressure unit (MPa in the examples) and the
/// thickness in the matching length unit (mm).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "PlyProperties", into = "PlyProperties")]
pub struct Ply {
    properties: PlyProperties,
    q0: Mat3,
}

impl Ply {
    /// Create a new ply from E1, E2, v12, G12 and thickness
    pub fn new(e1: f64, e2: f64, v12: f64, g12: f64, thickness: f64) -> LaminateResult<Self> {
        Self::from_properties(PlyProperties {
            e1,
            e2,
            v12,
            g12,
            thickness,
        })
    }

    /// Create a ply from a property record, validating every field
    pub fn from_properties(properties: PlyProperties) -> LaminateResult<Self> {
        let PlyProperties {
            e1,
            e2,
            v12,
            g12,
            thickness,
        } = properties;

        for (name, value) in [("E1", e1), ("E2", e2), ("G12", g12), ("t", thickness)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LaminateError::material(
                    name,
                    value,
                    "must be a finite positive number",
                ));
            }
        }
        if !v12.is_finite() || !(0.0..1.0).contains(&v12) {
            return Err(LaminateError::material("v12", v12, "must lie in [0, 1)"));
        }

        let v21 = v12 * e2 / e1;
        let denom = 1.0 - v12 * v21;
        if denom <= 0.0 {
            return Err(LaminateError::material(
                "v12",
                v12,
                "v12 * v21 must be below 1 for a positive definite stiffness",
            ));
        }

        let q11 = e1 / denom;
        let q22 = e2 / denom;
        let q12 = v12 * e2 / denom;

        let q0 = Mat3::new(
            q11, q12, 0.0,
            q12, q22, 0.0,
            0.0, 0.0, g12,
        );

        Ok(Self { properties, q0 })
    }

    /// Longitudinal modulus E1
    pub fn e1(&self) -> f64 {
        self.properties.e1
    }

    /// Transverse modulus E2
    pub fn e2(&self) -> f64 {
        self.properties.e2
    }

    /// Major Poisson's ratio v12
    pub fn v12(&self) -> f64 {
        self.properties.v12
    }

    /// Minor Poisson's ratio from the reciprocal relation v21 = v12 * E2 / E1
    pub fn v21(&self) -> f64 {
        self.properties.v12 * self.properties.e2 / self.properties.e1
    }

    /// In-plane shear modulus G12
    pub fn g12(&self) -> f64 {
        self.properties.g12
    }

    pub fn thickness(&self) -> f64 {
        self.properties.thickness
    }

    pub fn properties(&self) -> &PlyProperties {
        &self.properties
    }

    /// Reduced stiffness matrix [Q] in material axes
    pub fn q0(&self) -> &Mat3 {
        &self.q0
    }

    /// Transformed reduced stiffness [Q̄] for a ply laid at `theta_deg` degrees
    pub fn qbar(&self, theta_deg: f64) -> LaminateResult<Mat3> {
        if !theta_deg.is_finite() {
            return Err(LaminateError::InvalidLayup(format!(
                "ply angle must be finite, got {theta_deg}"
            )));
        }
        Ok(math::rotate_stiffness(&self.q0, theta_deg.to_radians()))
    }

    /// Copy of this ply with a different thickness
    pub fn with_thickness(&self, thickness: f64) -> LaminateResult<Self> {
        Self::from_properties(PlyProperties {
            thickness,
            ..self.properties
        })
    }
}

impl PartialEq for Ply {
    fn eq(&self, other: &Self) -> bool {
        self.properties == other.properties
    }
}

impl TryFrom<PlyProperties> for Ply {
    type Error = LaminateError;

    fn try_from(properties: PlyProperties) -> LaminateResult<Self> {
        Self::from_properties(properties)
    }
}

impl From<Ply> for PlyProperties {
    fn from(ply: Ply) -> Self {
        ply.properties
    }
}
