//! Mathematical utilities for laminate calculations
//!
//! Plane-stress quantities use contracted (Voigt) notation with engineering
//! shear strain: stress `{σ1, σ2, τ12}`, strain `{ε1, ε2, γ12}`.

use nalgebra::{Matrix3, Matrix6};

use crate::error::{LaminateError, LaminateResult};

pub type Mat3 = Matrix3<f64>;
/// 6x6 matrix for the assembled [A B; B D] laminate stiffness
pub type Mat6 = Matrix6<f64>;

/// Relative tolerance used when checking matrix symmetry
pub const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Stress transformation matrix [T_σ] for a rotation of `theta` radians
///
/// Maps global stresses `{σx, σy, τxy}` to material stresses `{σ1, σ2, τ12}`.
pub fn stress_transformation(theta: f64) -> Mat3 {
    let (s, c) = theta.sin_cos();

    Mat3::new(
        c * c,   s * s,  2.0 * c * s,
        s * s,   c * c,  -2.0 * c * s,
        -c * s,  c * s,  c * c - s * s,
    )
}

/// Strain transformation matrix [T_ε] for a rotation of `theta` radians
///
/// Same as [T_σ] but acting on engineering shear strain, so the shear terms
/// are scaled by two in the last row instead of the last column.
pub fn strain_transformation(theta: f64) -> Mat3 {
    let (s, c) = theta.sin_cos();

    Mat3::new(
        c * c,        s * s,       c * s,
        s * s,        c * c,       -c * s,
        -2.0 * c * s, 2.0 * c * s, c * c - s * s,
    )
}

/// Rotate a material-axis stiffness matrix into global axes
///
/// Computes `[T_σ]⁻¹ [Q] [T_ε]`. Since `[T_σ]⁻¹ = [T_ε]ᵀ` this is the
/// congruence `[T_ε]ᵀ [Q] [T_ε]`, which keeps the result symmetric.
pub fn rotate_stiffness(q: &Mat3, theta: f64) -> Mat3 {
    let t_eps = strain_transformation(theta);
    symmetrize(&(t_eps.transpose() * q * t_eps))
}

/// Average a matrix with its transpose to remove round-off asymmetry
pub fn symmetrize(m: &Mat3) -> Mat3 {
    (m + m.transpose()) * 0.5
}

/// Largest absolute entry of a matrix
pub fn max_abs(m: &Mat3) -> f64 {
    m.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
}

/// Check symmetry relative to the largest entry of the matrix
pub fn is_symmetric(m: &Mat3, rel_tol: f64) -> bool {
    let scale = max_abs(m).max(f64::MIN_POSITIVE);
    for i in 0..3 {
        for j in (i + 1)..3 {
            if (m[(i, j)] - m[(j, i)]).abs() > rel_tol * scale {
                return false;
            }
        }
    }
    true
}

/// Validate a bending stiffness matrix [D] before it is used in a buckling solve
///
/// Requires finite entries, symmetry, positive D11/D22/D66 and positive
/// definiteness.
pub fn validate_bending_stiffness(d: &Mat3) -> LaminateResult<()> {
    if d.iter().any(|v| !v.is_finite()) {
        return Err(LaminateError::InvalidStiffnessMatrix(
            "D contains non-finite entries".to_string(),
        ));
    }
    if !is_symmetric(d, SYMMETRY_TOLERANCE) {
        return Err(LaminateError::InvalidStiffnessMatrix(format!(
            "D is not symmetric (D12={}, D21={}, D16={}, D61={}, D26={}, D62={})",
            d[(0, 1)],
            d[(1, 0)],
            d[(0, 2)],
            d[(2, 0)],
            d[(1, 2)],
            d[(2, 1)]
        )));
    }
    for (idx, label) in [(0, "D11"), (1, "D22"), (2, "D66")] {
        let value = d[(idx, idx)];
        if value <= 0.0 {
            return Err(LaminateError::InvalidStiffnessMatrix(format!(
                "{label} must be positive, got {value}"
            )));
        }
    }
    if (*d).cholesky().is_none() {
        return Err(LaminateError::InvalidStiffnessMatrix(
            "D is not positive definite".to_string(),
        ));
    }
    Ok(())
}

/// Assemble the 6x6 laminate stiffness matrix [A B; B D]
pub fn assemble_abd(a: &Mat3, b: &Mat3, d: &Mat3) -> Mat6 {
    let mut abd = Mat6::zeros();
    abd.fixed_view_mut::<3, 3>(0, 0).copy_from(a);
    abd.fixed_view_mut::<3, 3>(0, 3).copy_from(b);
    abd.fixed_view_mut::<3, 3>(3, 0).copy_from(b);
    abd.fixed_view_mut::<3, 3>(3, 3).copy_from(d);
    abd
}
