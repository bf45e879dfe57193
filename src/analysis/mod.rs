//! Critical buckling analysis of simply supported rectangular laminated plates
//!
//! The plate has length `a` along x (the loaded direction) and width `b`
//! along y, is simply supported on all four edges, and carries a compressive
//! edge load Nx (force per unit width), optionally with a proportional
//! transverse load Ny = k·Nx.
//!
//! Two solvers are provided:
//! - [`buckling_load`]: closed-form mode minimization with early exit
//! - [`critical_buckling`]: exhaustive grid search, kept as the reference
//!   the closed-form solver is checked against
//!
//! Both treat the laminate as specially orthotropic and ignore the
//! bending-twisting terms D16/D26. A warning is logged when those terms are
//! large enough to make the result unconservative.

mod buckling;
mod reference;

pub use buckling::{buckling_load, buckling_load_with};
pub use reference::{critical_buckling, critical_buckling_with};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{LaminateError, LaminateResult};
use crate::math::{self, Mat3};

/// Default half-wave cap for the closed-form solver
pub const DEFAULT_MODE_CAP: usize = 20;

/// Default half-wave cap, per direction, for the reference grid search
pub const DEFAULT_REFERENCE_MODES: usize = 60;

/// max(|D16|, |D26|) / sqrt(D11·D22) above which coupling is reported
pub const COUPLING_WARN_RATIO: f64 = 0.1;

/// In-plane loading applied to the plate edges
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoadCase {
    /// Compression Nx on the edges x = 0 and x = a only
    #[default]
    Uniaxial,
    /// Compression Nx plus Ny = ratio·Nx on the edges y = 0 and y = b
    Biaxial { ratio: f64 },
}

impl LoadCase {
    /// Ny/Nx ratio, zero for uniaxial compression
    pub fn ratio(&self) -> f64 {
        match self {
            LoadCase::Uniaxial => 0.0,
            LoadCase::Biaxial { ratio } => *ratio,
        }
    }

    fn validate(&self) -> LaminateResult<()> {
        let ratio = self.ratio();
        if !ratio.is_finite() || ratio < 0.0 {
            return Err(LaminateError::InvalidInput(format!(
                "biaxial load ratio must be finite and non-negative, got {ratio}"
            )));
        }
        Ok(())
    }
}

/// Options for the closed-form buckling solver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BucklingOptions {
    /// Largest half-wave number searched along each direction
    pub mode_cap: usize,
    /// Edge loading
    pub load_case: LoadCase,
    /// Return an error instead of a flagged result when the search does not converge
    pub strict: bool,
}

impl Default for BucklingOptions {
    fn default() -> Self {
        Self {
            mode_cap: DEFAULT_MODE_CAP,
            load_case: LoadCase::Uniaxial,
            strict: false,
        }
    }
}

impl BucklingOptions {
    /// Set the half-wave cap
    pub fn with_mode_cap(mut self, mode_cap: usize) -> Self {
        self.mode_cap = mode_cap;
        self
    }

    /// Set the load case
    pub fn with_load_case(mut self, load_case: LoadCase) -> Self {
        self.load_case = load_case;
        self
    }

    /// Fail with `NumericConvergenceFailure` instead of flagging the result
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    fn validate(&self) -> LaminateResult<()> {
        if self.mode_cap == 0 {
            return Err(LaminateError::InvalidInput(
                "mode_cap must be at least 1".to_string(),
            ));
        }
        self.load_case.validate()
    }
}

/// Search range for the reference grid solver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Largest half-wave number along the loaded direction
    pub m_max: usize,
    /// Largest half-wave number across the width
    pub n_max: usize,
    /// Edge loading
    pub load_case: LoadCase,
    /// Return an error instead of a flagged result when the search does not converge
    pub strict: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            m_max: DEFAULT_REFERENCE_MODES,
            n_max: DEFAULT_REFERENCE_MODES,
            load_case: LoadCase::Uniaxial,
            strict: false,
        }
    }
}

impl SearchParams {
    /// Set both half-wave limits
    pub fn with_range(mut self, m_max: usize, n_max: usize) -> Self {
        self.m_max = m_max;
        self.n_max = n_max;
        self
    }

    /// Set the load case
    pub fn with_load_case(mut self, load_case: LoadCase) -> Self {
        self.load_case = load_case;
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Number of modes the grid search evaluates
    pub fn evaluations(&self) -> usize {
        self.m_max.saturating_mul(self.n_max)
    }

    fn validate(&self) -> LaminateResult<()> {
        if self.m_max == 0 || self.n_max == 0 {
            return Err(LaminateError::InvalidInput(format!(
                "search range must be at least 1x1, got {}x{}",
                self.m_max, self.n_max
            )));
        }
        self.load_case.validate()
    }
}

/// Validated plate geometry and the orthotropic bending terms used by both solvers
#[derive(Debug, Clone, Copy)]
pub(crate) struct PlateProblem {
    /// Length along the loaded direction
    pub a: f64,
    /// Width across the loaded direction
    pub b: f64,
    pub d11: f64,
    pub d22: f64,
    /// D12 + 2·D66
    pub d3: f64,
    /// Ny/Nx
    pub k: f64,
}

impl PlateProblem {
    pub fn new(width: f64, length: f64, d: &Mat3, load_case: LoadCase) -> LaminateResult<Self> {
        for (name, value) in [("width", width), ("length", length)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LaminateError::InvalidGeometry(format!(
                    "plate {name} must be finite and positive, got {value}"
                )));
            }
        }
        math::validate_bending_stiffness(d)?;

        let d11 = d[(0, 0)];
        let d22 = d[(1, 1)];
        let coupling = d[(0, 2)].abs().max(d[(1, 2)].abs()) / (d11 * d22).sqrt();
        if coupling > COUPLING_WARN_RATIO {
            warn!(
                "bending-twisting coupling ratio {coupling:.3} exceeds {COUPLING_WARN_RATIO}; \
                 D16/D26 are ignored and the buckling load may be unconservative"
            );
        }

        Ok(Self {
            a: length,
            b: width,
            d11,
            d22,
            d3: d[(0, 1)] + 2.0 * d[(2, 2)],
            k: load_case.ratio(),
        })
    }

    /// Whether the plate carries Nx alone
    pub fn is_uniaxial(&self) -> bool {
        self.k == 0.0
    }

    /// Whether no neighbouring mode just outside (m, n) gives a lower load
    pub fn is_local_minimum(&self, m: usize, n: usize, load_at: impl Fn(usize, usize) -> f64) -> bool {
        let best = load_at(m, n);
        let along = load_at(m + 1, n) >= best;
        let across = load_at(m, n + 1) >= best;
        along && across
    }
}
