//! Error types for the laminate solver

use thiserror::Error;

/// Main error type for laminate and buckling operations
#[derive(Error, Debug)]
pub enum LaminateError {
    #[error("Invalid material parameter '{name}' = {value}: {reason}")]
    InvalidMaterialParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Invalid layup: {0}")]
    InvalidLayup(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid stiffness matrix: {0}")]
    InvalidStiffnessMatrix(String),

    #[error(
        "Mode search did not converge: best load {best_load} at (m={m}, n={n}) sits on the search boundary"
    )]
    NumericConvergenceFailure { best_load: f64, m: usize, n: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl LaminateError {
    pub(crate) fn material(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidMaterialParameter {
            name,
            value,
            reason,
        }
    }
}

/// Result type for laminate operations
pub type LaminateResult<T> = Result<T, LaminateError>;
