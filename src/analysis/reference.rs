//! Reference critical buckling load by exhaustive mode search
//!
//! Evaluates every (m, n) pair in the requested range with no early exit,
//! using the wave-number form of the plate equation. This is much slower than
//! [`buckling_load`](super::buckling_load) and exists to cross-check it.

use std::f64::consts::PI;

use log::{debug, warn};

use super::{PlateProblem, SearchParams};
use crate::error::LaminateResult;
use crate::math::Mat3;
use crate::results::BucklingResult;

/// Reference critical uniaxial buckling load Nx with the default search range
pub fn critical_buckling(width: f64, length: f64, d: &Mat3) -> LaminateResult<f64> {
    critical_buckling_with(width, length, d, &SearchParams::default()).map(|r| r.load)
}

/// Reference critical buckling load over an explicit search range
pub fn critical_buckling_with(
    width: f64,
    length: f64,
    d: &Mat3,
    params: &SearchParams,
) -> LaminateResult<BucklingResult> {
    params.validate()?;
    let plate = PlateProblem::new(width, length, d, params.load_case)?;

    let mut best = (f64::INFINITY, 1, 1);
    for m in 1..=params.m_max {
        for n in 1..=params.n_max {
            let load = wave_load(&plate, m, n);
            if load < best.0 {
                best = (load, m, n);
            }
        }
    }
    let (load, m, n) = best;

    let converged = plate.is_local_minimum(m, n, |m, n| wave_load(&plate, m, n));
    if !converged {
        warn!(
            "reference buckling search over {}x{} modes is still decreasing at (m={m}, n={n})",
            params.m_max, params.n_max
        );
    }
    debug!(
        "reference buckling: Nx={load:.6e} at (m={m}, n={n}) after {} evaluations",
        params.evaluations()
    );

    let result = BucklingResult {
        load,
        m,
        n,
        width,
        converged,
    };

    if params.strict {
        result.require_converged()
    } else {
        Ok(result)
    }
}

/// Mode load from the half-wave numbers α = mπ/a, β = nπ/b
fn wave_load(plate: &PlateProblem, m: usize, n: usize) -> f64 {
    let alpha = m as f64 * PI / plate.a;
    let beta = n as f64 * PI / plate.b;
    let alpha2 = alpha * alpha;
    let beta2 = beta * beta;

    (plate.d11 * alpha2 * alpha2 + 2.0 * plate.d3 * alpha2 * beta2 + plate.d22 * beta2 * beta2)
        / (alpha2 + plate.k * beta2)
}
