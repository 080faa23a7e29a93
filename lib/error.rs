//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length, or when a linear system has no rows at all.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb && na > 0).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned when grids that must share a shape do not, or when a grid is too
/// small to hold a single interior cell.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// Two grids of one simulation have different dimensions.
    #[error("{what} grid has shape {got:?}, but the potential has shape {expected:?}")]
    Mismatch {
        what: &'static str,
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// Grids need at least one interior cell along each axis.
    #[error("grids must be at least 3×3; got {0:?}")]
    TooSmall((usize, usize)),
}

impl ShapeError {
    pub(crate) fn check<S, T>(
        what: &'static str,
        potential: &nd::ArrayBase<S, nd::Ix2>,
        other: &nd::ArrayBase<T, nd::Ix2>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = f64>,
        T: nd::Data<Elem = f64>,
    {
        let expected = potential.dim();
        let got = other.dim();
        (expected == got).then_some(())
            .ok_or(Self::Mismatch { what, expected, got })
    }

    pub(crate) fn check_size(dim: (usize, usize)) -> Result<(), Self> {
        (dim.0 >= 3 && dim.1 >= 3).then_some(()).ok_or(Self::TooSmall(dim))
    }
}

/// Returned when a scheme tag is not one of `ftcs`, `btcs`, or `ctcs`.
#[derive(Debug, Error)]
#[error("unknown integration scheme {0:?}; expected one of \"ftcs\", \"btcs\", \"ctcs\"")]
pub struct SchemeError(pub String);

/// Returned when elimination in a tridiagonal solve meets an exactly zero
/// pivot.
#[derive(Debug, Error)]
#[error("tridiagonal system is singular: zero pivot at row {0}")]
pub struct SingularError(pub usize);

/// Returned from [`tridiag`][crate::tridiag] solver functions.
#[derive(Debug, Error)]
pub enum SolveError {
    /// [`LengthError`]
    #[error("length error: {0}")]
    Length(#[from] LengthError),

    /// [`SingularError`]
    #[error("singular system: {0}")]
    Singular(#[from] SingularError),
}

/// Returned from construction of, and stepping with, an
/// [`Integrator`][crate::timedep::Integrator].
#[derive(Debug, Error)]
pub enum IntegratorError {
    /// Returned when a step or physical constant is not a positive, finite
    /// number.
    #[error("{0} must be positive and finite; got {1}")]
    BadParameter(&'static str, f64),

    /// [`ShapeError`]
    #[error("invalid shape: {0}")]
    Shape(#[from] ShapeError),

    /// [`SchemeError`]
    #[error("{0}")]
    Scheme(#[from] SchemeError),

    /// [`SolveError`]
    #[error("linear solve failed: {0}")]
    Solve(#[from] SolveError),
}

impl IntegratorError {
    pub(crate) fn check_positive(name: &'static str, value: f64)
        -> Result<(), Self>
    {
        (value.is_finite() && value > 0.0).then_some(())
            .ok_or(Self::BadParameter(name, value))
    }
}

/// Returned from loading and resolving a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when a symbolic argument has no entry in the named-constant
    /// table.
    #[error("unknown named constant {0:?}")]
    UnknownConstant(String),

    /// Returned when an initial-condition generator receives the wrong number
    /// of arguments.
    #[error("{0} expects {1} arguments; got {2}")]
    Arity(&'static str, usize, usize),

    /// Returned when an initial-condition generator argument is out of range.
    #[error("{0}: argument {1} must be positive and finite; got {2}")]
    BadArgument(&'static str, &'static str, f64),

    /// Returned when the snapshot interval is zero.
    #[error("span must be at least 1")]
    BadSpan,

    /// Returned when a domain has too few points or unordered extents.
    #[error("invalid domain: {0}")]
    BadDomain(String),

    /// [`SchemeError`]
    #[error("{0}")]
    Scheme(#[from] SchemeError),

    /// [`IntegratorError`]
    #[error("integrator error: {0}")]
    Integrator(#[from] IntegratorError),

    /// [`std::io::Error`]
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// [`serde_json::Error`]
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Returned from checkpoint [`Store`][crate::checkpoint::Store]s.
#[derive(Debug, Error)]
pub enum StoreError {
    /// [`std::io::Error`]
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// [`serde_json::Error`]
    #[error("json error on line {0}: {1}")]
    Json(usize, serde_json::Error),

    /// Returned when serializing a document fails.
    #[error("could not serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Returned from the run loop in [`monitor`][crate::monitor].
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Returned when a run is to be resumed but the store holds no snapshot
    /// for it.
    #[error("no snapshot found for run {0}")]
    MissingSnapshot(String),

    /// [`ConfigError`]
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// [`IntegratorError`]
    #[error("integrator error: {0}")]
    Integrator(#[from] IntegratorError),

    /// [`StoreError`]
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// [`std::io::Error`]
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
