//! CLT Solver - classical laminate theory for fibre-reinforced composites
//!
//! This library computes laminate stiffness and plate buckling loads:
//! - Ply reduced stiffness [Q] and its rotation [Q̄] to laminate axes
//! - Laminate [A], [B], [D] assembly from a bottom-to-top stacking sequence
//! - Critical buckling load of simply supported rectangular plates, with a
//!   closed-form solver and an exhaustive reference solver
//!
//! Inputs use any consistent unit system; the examples use MPa and mm, which
//! gives buckling loads in N/mm.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use clt_solver::prelude::*;
//!
//! let ply = Arc::new(Ply::new(129_500.0, 9_370.0, 0.38, 5_240.0, 0.2).unwrap());
//!
//! let laminate = Laminate::from_angles(
//!     &[90.0, 90.0, 0.0, 90.0, 90.0, 0.0, 90.0, 90.0],
//!     ply,
//! )
//! .unwrap();
//!
//! // Critical load in N/mm for a 360 mm x 360 mm plate
//! let nx = buckling_load(360.0, 360.0, laminate.d()).unwrap();
//! let reference = critical_buckling(360.0, 360.0, laminate.d()).unwrap();
//! assert!(((nx - reference) / reference).abs() < 1e-6);
//! ```

pub mod analysis;
pub mod elements;
pub mod error;
pub mod math;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{
        buckling_load, buckling_load_with, critical_buckling, critical_buckling_with,
        BucklingOptions, LoadCase, SearchParams,
    };
    pub use crate::elements::{Laminate, LayupEntry, Ply, PlyProperties};
    pub use crate::error::{LaminateError, LaminateResult};
    pub use crate::math::{Mat3, Mat6};
    pub use crate::results::{BucklingResult, EngineeringConstants};
}
