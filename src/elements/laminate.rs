//! Laminate - an ordered stack of plies and its [A], [B], [D] stiffness
//!
//! The layup is listed bottom to top. Interface coordinates are measured from
//! the midplane, so for `n` plies there are `n + 1` z values running from
//! `-H/2` to `+H/2`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use clt_solver::prelude::*;
//!
//! let ply = Arc::new(Ply::new(129_500.0, 9_370.0, 0.38, 5_240.0, 0.2).unwrap());
//! let laminate = Laminate::from_angles(&[90.0, 0.0, 0.0, 90.0], ply).unwrap();
//!
//! assert_eq!(laminate.z_positions().len(), 5);
//! assert!(laminate.b().abs().max() < 1e-9);
//! ```

use std::fmt;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::elements::Ply;
use crate::error::{LaminateError, LaminateResult};
use crate::math::{self, Mat3, Mat6};
use crate::results::EngineeringConstants;

/// One entry of a stacking sequence: a ply laid at an angle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayupEntry {
    /// Orientation of the fibre direction relative to the laminate x axis, in degrees
    pub angle: f64,
    /// Shared handle to the ply; the same ply may appear in many entries
    #[serde(rename = "ply")]
    pub ply_reference: Arc<Ply>,
}

impl LayupEntry {
    pub fn new(angle: f64, ply_reference: Arc<Ply>) -> Self {
        Self {
            angle,
            ply_reference,
        }
    }

    pub fn thickness(&self) -> f64 {
        self.ply_reference.thickness()
    }
}

/// A laminate with its stiffness matrices computed at construction
#[derive(Debug, Clone, Serialize)]
pub struct Laminate {
    layup: Vec<LayupEntry>,
    /// Ply interface coordinates from the midplane
    z: Vec<f64>,
    /// Transformed stiffness of each ply, in layup order
    #[serde(skip)]
    q_layup: Vec<Mat3>,
    /// Extensional stiffness [A]
    a: Mat3,
    /// Coupling stiffness [B]
    b: Mat3,
    /// Bending stiffness [D]
    d: Mat3,
}

impl Laminate {
    /// Build a laminate from a bottom-to-top stacking sequence
    pub fn new(layup: Vec<LayupEntry>) -> LaminateResult<Self> {
        if layup.is_empty() {
            return Err(LaminateError::InvalidLayup(
                "layup must contain at least one ply".to_string(),
            ));
        }

        let mut q_layup = Vec::with_capacity(layup.len());
        for (index, entry) in layup.iter().enumerate() {
            if !entry.angle.is_finite() {
                return Err(LaminateError::InvalidLayup(format!(
                    "entry {index}: angle must be finite, got {}",
                    entry.angle
                )));
            }
            q_layup.push(entry.ply_reference.qbar(entry.angle)?);
        }

        let z = z_positions(&layup);

        let mut a = Mat3::zeros();
        let mut b = Mat3::zeros();
        let mut d = Mat3::zeros();

        for (k, qbar) in q_layup.iter().enumerate() {
            let z0 = z[k];
            let z1 = z[k + 1];

            a += qbar * (z1 - z0);
            b += qbar * (0.5 * (z1 * z1 - z0 * z0));
            d += qbar * ((z1.powi(3) - z0.powi(3)) / 3.0);
        }

        let laminate = Self {
            layup,
            z,
            q_layup,
            a: math::symmetrize(&a),
            b: math::symmetrize(&b),
            d: math::symmetrize(&d),
        };

        debug!(
            "assembled laminate: {} plies, thickness {:.4}, D11={:.4e} D22={:.4e} D66={:.4e}",
            laminate.layup.len(),
            laminate.total_thickness(),
            laminate.d[(0, 0)],
            laminate.d[(1, 1)],
            laminate.d[(2, 2)]
        );

        Ok(laminate)
    }

    /// Build a laminate where every entry uses the same ply
    pub fn from_angles(angles: &[f64], ply: Arc<Ply>) -> LaminateResult<Self> {
        let layup = angles
            .iter()
            .map(|&angle| LayupEntry::new(angle, Arc::clone(&ply)))
            .collect();
        Self::new(layup)
    }

    /// Build a laminate from a JSON array of `{"angle": .., "ply": {..}}` entries
    pub fn from_json(json: &str) -> LaminateResult<Self> {
        let layup: Vec<LayupEntry> = serde_json::from_str(json)?;
        Self::new(layup)
    }

    pub fn layup(&self) -> &[LayupEntry] {
        &self.layup
    }

    /// Ply interface coordinates, bottom (`-H/2`) to top (`+H/2`)
    pub fn z_positions(&self) -> &[f64] {
        &self.z
    }

    /// Transformed stiffness [Q̄] of each ply in layup order
    pub fn qbar_layup(&self) -> &[Mat3] {
        &self.q_layup
    }

    /// Extensional stiffness [A] (force per unit length)
    pub fn a(&self) -> &Mat3 {
        &self.a
    }

    /// Extension-bending coupling stiffness [B]
    pub fn b(&self) -> &Mat3 {
        &self.b
    }

    /// Bending stiffness [D] (moment times length)
    pub fn d(&self) -> &Mat3 {
        &self.d
    }

    /// The full 6x6 [A B; B D] matrix
    pub fn abd(&self) -> Mat6 {
        math::assemble_abd(&self.a, &self.b, &self.d)
    }

    pub fn total_thickness(&self) -> f64 {
        self.layup.iter().map(LayupEntry::thickness).sum()
    }

    /// True when the layup mirrors itself about the midplane in angle and ply
    pub fn is_symmetric(&self) -> bool {
        let n = self.layup.len();
        (0..n / 2).all(|i| {
            let lower = &self.layup[i];
            let upper = &self.layup[n - 1 - i];
            lower.angle == upper.angle && lower.ply_reference == upper.ply_reference
        })
    }

    /// Membrane engineering constants of the laminate
    ///
    /// Uses the in-plane compliance `H·[A]⁻¹`, so any [B] coupling is
    /// ignored.
    pub fn engineering_constants(&self) -> LaminateResult<EngineeringConstants> {
        let a_inv = self.a.try_inverse().ok_or_else(|| {
            LaminateError::InvalidStiffnessMatrix("[A] is singular".to_string())
        })?;
        let h = self.total_thickness();

        Ok(EngineeringConstants {
            ex: 1.0 / (h * a_inv[(0, 0)]),
            ey: 1.0 / (h * a_inv[(1, 1)]),
            gxy: 1.0 / (h * a_inv[(2, 2)]),
            vxy: -a_inv[(0, 1)] / a_inv[(0, 0)],
            vyx: -a_inv[(0, 1)] / a_inv[(1, 1)],
        })
    }
}

/// Interface z coordinates for a layup, centered on the midplane
fn z_positions(layup: &[LayupEntry]) -> Vec<f64> {
    let total: f64 = layup.iter().map(LayupEntry::thickness).sum();

    let mut current = -total / 2.0;
    let mut z = Vec::with_capacity(layup.len() + 1);
    z.push(current);
    for entry in layup {
        current += entry.thickness();
        z.push(current);
    }
    z
}

impl PartialEq for Laminate {
    fn eq(&self, other: &Self) -> bool {
        self.layup == other.layup
    }
}

impl fmt::Display for Laminate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, m) in [("A", &self.a), ("B", &self.b), ("D", &self.d)] {
            writeln!(f, "[{label}] is:")?;
            for i in 0..3 {
                writeln!(
                    f,
                    "  [{:>14.6e} {:>14.6e} {:>14.6e}]",
                    m[(i, 0)],
                    m[(i, 1)],
                    m[(i, 2)]
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
