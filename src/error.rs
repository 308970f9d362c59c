//! Error types for the fracture-mechanics core.

use pyo3::exceptions::PyValueError;
use pyo3::PyErr;
use thiserror::Error;

/// Result type alias using the crate Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the orientation, rotation and Stroh computations.
///
/// All variants are raised at the point of detection and propagate to the
/// caller; the core never recovers silently or substitutes defaults.
#[derive(Error, Debug)]
pub enum Error {
    /// A symmetry-direction code outside the canonical lookup table.
    #[error("unsupported orientation: {0}")]
    UnsupportedOrientation(String),

    /// A direction vector of zero length.
    #[error("degenerate direction: {0}")]
    DegenerateDirection(String),

    /// A direction triple that is not an orthonormal frame.
    #[error("invalid orientation frame: {0}")]
    InvalidOrientation(String),

    /// A matrix that must be inverted (T, B, L, stiffness) is singular.
    #[error("singular matrix: {0}")]
    SingularMatrix(String),

    /// The Stroh eigenvalue problem does not have three eigenvalues with
    /// strictly positive imaginary part, or a root is repeated.
    #[error("degenerate Stroh spectrum: {0}")]
    DegenerateSpectrum(String),

    /// A physically invalid scalar or malformed index list.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<Error> for PyErr {
    fn from(err: Error) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
