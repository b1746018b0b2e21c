//! Errors for the evidence tensor (construction checks, label lookups,
//! reweighting arguments, and degenerate probability computations).
//!
//! This module defines a single error type, [`HanselError`], used by every
//! fallible operation in the `evidence` subtree, together with the result
//! alias [`HanselResult`]. It implements `Display`/`Error` and, when the
//! `python-bindings` feature is enabled, converts to `PyErr` for PyO3.
//!
//! ## Conventions
//! - Labels (symbols and positions) are rendered with their `Debug`
//!   representation so the error type does not depend on the label types.
//! - A probability whose denominator is zero is always reported as
//!   [`HanselError::InsufficientEvidence`]; it is never folded into a numeric
//!   sentinel such as `-inf` or `NaN`.
//! - Errors are detected at the call that triggers them and are never
//!   retried internally.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Crate-wide result alias for operations that may produce [`HanselError`].
pub type HanselResult<T> = Result<T, HanselError>;

/// Unified error type for the evidence tensor.
///
/// Covers construction-time validation, storage shape checks, label lookups,
/// reweighting arguments, and probability computations without evidence.
/// Implements `Display`/`Error` and converts to a Python `ValueError` at
/// PyO3 boundaries.
#[derive(Debug, Clone, PartialEq)]
pub enum HanselError {
    // ---- Construction ----
    /// Bad construction arguments (alphabet, unsymbols, positions, options).
    Configuration { reason: String },

    /// Caller-supplied storage does not have the shape `[S, S, P+2, P+2]`.
    ShapeMismatch { expected: [usize; 4], actual: Vec<usize> },

    // ---- Lookups ----
    /// Symbol is not registered, or is an unsymbol where a real symbol is required.
    UnknownSymbol { symbol: String, reason: &'static str },

    /// Position label is not registered.
    UnknownPosition { position: String },

    // ---- Mutation ----
    /// Reweight ratio outside `[0, 1]` (or not finite).
    InvalidRatio { ratio: f64 },

    // ---- Derived quantities ----
    /// A normalizing denominator is zero: there is no evidence to normalize over.
    InsufficientEvidence { what: String },
}

impl HanselError {
    pub(crate) fn configuration(reason: impl Into<String>) -> HanselError {
        HanselError::Configuration { reason: reason.into() }
    }

    pub(crate) fn unknown_symbol<S: std::fmt::Debug>(
        symbol: &S, reason: &'static str,
    ) -> HanselError {
        HanselError::UnknownSymbol { symbol: format!("{symbol:?}"), reason }
    }

    pub(crate) fn insufficient_evidence(what: impl Into<String>) -> HanselError {
        HanselError::InsufficientEvidence { what: what.into() }
    }
}

impl std::error::Error for HanselError {}

impl std::fmt::Display for HanselError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Construction ----
            HanselError::Configuration { reason } => {
                write!(f, "Invalid configuration: {reason}")
            }
            HanselError::ShapeMismatch { expected, actual } => {
                write!(f, "Count storage must have shape {expected:?}; got: {actual:?}")
            }
            // ---- Lookups ----
            HanselError::UnknownSymbol { symbol, reason } => {
                write!(f, "Unknown symbol {symbol}: {reason}")
            }
            HanselError::UnknownPosition { position } => {
                write!(f, "Unknown position {position}: not a registered position label")
            }
            // ---- Mutation ----
            HanselError::InvalidRatio { ratio } => {
                write!(f, "Reweight ratio must lie in [0, 1]; got: {ratio}")
            }
            // ---- Derived quantities ----
            HanselError::InsufficientEvidence { what } => {
                write!(f, "Insufficient evidence: no observations to normalize {what}")
            }
        }
    }
}

/// Convert a [`HanselError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<HanselError> for PyErr {
    fn from(err: HanselError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
