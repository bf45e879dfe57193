//! Result types for laminate and buckling analysis

use serde::{Deserialize, Serialize};

use crate::error::{LaminateError, LaminateResult};

/// Outcome of a critical buckling search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucklingResult {
    /// Critical compressive load Nx, force per unit width of the loaded edge
    pub load: f64,
    /// Half-waves along the loaded direction (plate length)
    pub m: usize,
    /// Half-waves across the plate width
    pub n: usize,
    /// Plate width, kept so the total edge load can be recovered
    pub width: f64,
    /// False when a neighbouring mode outside the searched range is lower
    pub converged: bool,
}

impl BucklingResult {
    /// Minimizing half-wave pair (m, n)
    pub fn mode(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    /// Total critical force on the loaded edge, Nx times the plate width
    pub fn total_load(&self) -> f64 {
        self.load * self.width
    }

    /// Turn a non-converged search into an error
    pub fn require_converged(self) -> LaminateResult<Self> {
        if self.converged {
            Ok(self)
        } else {
            Err(LaminateError::NumericConvergenceFailure {
                best_load: self.load,
                m: self.m,
                n: self.n,
            })
        }
    }

    /// Relative difference of the critical loads of two results
    pub fn relative_difference(&self, other: &BucklingResult) -> f64 {
        let scale = self.load.abs().max(other.load.abs());
        if scale == 0.0 {
            0.0
        } else {
            (self.load - other.load).abs() / scale
        }
    }
}

/// Effective in-plane engineering constants of a laminate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineeringConstants {
    /// Effective modulus along x
    pub ex: f64,
    /// Effective modulus along y
    pub ey: f64,
    /// Effective in-plane shear modulus
    pub gxy: f64,
    /// Poisson's ratio, contraction in y under x load
    pub vxy: f64,
    /// Poisson's ratio, contraction in x under y load
    pub vyx: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(load: f64, converged: bool) -> BucklingResult {
        BucklingResult {
            load,
            m: 3,
            n: 1,
            width: 200.0,
            converged,
        }
    }

    #[test]
    fn test_total_load() {
        assert_eq!(sample(2.5, true).total_load(), 500.0);
    }

    #[test]
    fn test_require_converged() {
        assert!(sample(1.0, true).require_converged().is_ok());
        match sample(1.0, false).require_converged() {
            Err(LaminateError::NumericConvergenceFailure { best_load, m, n }) => {
                assert_eq!(best_load, 1.0);
                assert_eq!((m, n), (3, 1));
            }
            other => panic!("expected convergence failure, got {other:?}"),
        }
    }

    #[test]
    fn test_relative_difference() {
        let a = sample(100.0, true);
        let b = sample(101.0, true);
        assert!((a.relative_difference(&b) - 1.0 / 101.0).abs() < 1e-15);
        assert_eq!(a.relative_difference(&a), 0.0);
    }
}
