//! Closed-form critical buckling load
//!
//! For a simply supported specially orthotropic plate the load for mode
//! (m, n) is
//!
//! ```text
//! Nx = π² [D11 (m/a)⁴ + 2 (D12 + 2 D66) (m/a)² (n/b)² + D22 (n/b)⁴]
//!      / [(m/a)² + k (n/b)²]
//! ```
//!
//! For fixed n this is unimodal in m, so each row scan stops as soon as the
//! load starts to rise. Rows are scanned in n until the cap, or under pure Nx
//! until a lower bound on the whole row exceeds the best load found. D12 + 2·D66
//! may be negative, in which case short plates buckle with n > 1.

use std::f64::consts::PI;

use log::{debug, warn};

use super::{BucklingOptions, PlateProblem};
use crate::error::LaminateResult;
use crate::math::Mat3;
use crate::results::BucklingResult;

/// Critical uniaxial buckling load Nx with default options
///
/// `length` runs along the loaded direction, `width` across it. The result is
/// a force per unit width (N/mm for MPa and mm inputs).
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use clt_solver::prelude::*;
///
/// let ply = Arc::new(Ply::new(129_500.0, 9_370.0, 0.38, 5_240.0, 0.2).unwrap());
/// let laminate = Laminate::from_angles(&[0.0, 90.0, 90.0, 0.0], ply).unwrap();
///
/// let nx = buckling_load(200.0, 400.0, laminate.d()).unwrap();
/// assert!(nx > 0.0);
/// ```
pub fn buckling_load(width: f64, length: f64, d: &Mat3) -> LaminateResult<f64> {
    buckling_load_with(width, length, d, &BucklingOptions::default()).map(|r| r.load)
}

/// Critical buckling load and mode with explicit options
pub fn buckling_load_with(
    width: f64,
    length: f64,
    d: &Mat3,
    options: &BucklingOptions,
) -> LaminateResult<BucklingResult> {
    options.validate()?;
    let plate = PlateProblem::new(width, length, d, options.load_case)?;

    let (mut load, mut m) = row_minimum(&plate, 1, options.mode_cap);
    let mut n = 1;
    for row in 2..=options.mode_cap {
        if plate.is_uniaxial() && uniaxial_row_bound(&plate, row) >= load {
            break;
        }
        let (row_load, row_m) = row_minimum(&plate, row, options.mode_cap);
        if row_load < load {
            load = row_load;
            m = row_m;
            n = row;
        }
    }

    let converged = plate.is_local_minimum(m, n, |m, n| mode_load(&plate, m, n));
    if !converged {
        warn!(
            "closed-form buckling search hit mode cap {} with best mode (m={m}, n={n}); \
             a higher mode may be critical",
            options.mode_cap
        );
    }
    debug!("closed-form buckling: Nx={load:.6e} at (m={m}, n={n})");

    let result = BucklingResult {
        load,
        m,
        n,
        width,
        converged,
    };

    if options.strict {
        result.require_converged()
    } else {
        Ok(result)
    }
}

/// Lowest load along one row of constant n, scanning m upward
fn row_minimum(plate: &PlateProblem, n: usize, mode_cap: usize) -> (f64, usize) {
    let mut best_load = mode_load(plate, 1, n);
    let mut best_m = 1;

    for m in 2..=mode_cap {
        let load = mode_load(plate, m, n);
        if load < best_load {
            best_load = load;
            best_m = m;
        } else {
            break;
        }
    }

    (best_load, best_m)
}

/// Lower bound on every mode load in row n under pure Nx
///
/// Minimizing over a continuous m gives 2π² (√(D11·D22) + D3) (n/b)². Positive
/// definiteness keeps √(D11·D22) + D3 > 0, so the bound grows with n.
fn uniaxial_row_bound(plate: &PlateProblem, n: usize) -> f64 {
    let rn = (n as f64 / plate.b).powi(2);
    2.0 * PI * PI * ((plate.d11 * plate.d22).sqrt() + plate.d3) * rn
}

/// Buckling load of a single (m, n) mode
fn mode_load(plate: &PlateProblem, m: usize, n: usize) -> f64 {
    let rm = (m as f64 / plate.a).powi(2);
    let rn = (n as f64 / plate.b).powi(2);

    let stiffness = plate.d11 * rm * rm + 2.0 * plate.d3 * rm * rn + plate.d22 * rn * rn;
    PI * PI * stiffness / (rm + plate.k * rn)
}
