//! hansel — dense co-occurrence evidence for sequence reconstruction, with
//! Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the evidence structure to Python via the `_hansel` extension
//! module. When the `python-bindings` feature is enabled, this module defines
//! the Python-facing `Hansel` class.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust module (`evidence`) as the public crate surface.
//! - Define a `#[pyclass]` wrapper over `evidence::Hansel<String, i64>` and the
//!   `#[pymodule]` initializer for the `_hansel` extension.
//!
//! Invariants & assumptions
//! ------------------------
//! - All counting and probability work is implemented in `evidence`; this
//!   file performs only FFI glue, argument conversion, and error mapping.
//! - Python symbols are strings and positions are integers; the sentinels
//!   are addressed with the strings `"head"` and `"tail"`.
//!
//! Conventions
//! -----------
//! - Errors from core Rust code are propagated as [`HanselError`] internally
//!   and converted to `ValueError` at the PyO3 boundary.
//! - A numpy array passed at construction is copied into Rust-owned storage;
//!   the `counts` property returns a fresh copy.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on [`evidence`] directly and can ignore
//!   the PyO3 items guarded by the `python-bindings` feature.
//! - Rust callers that need shared, caller-owned storage use
//!   `evidence::Hansel::with_counts` with an `ArrayViewMut4`.
//!
//! Testing notes
//! -------------
//! - Behavior is covered by unit tests in `evidence` and the integration
//!   tests under `tests/`; the PyO3 layer is exercised from Python.
//!
//! [`HanselError`]: crate::evidence::HanselError

pub mod evidence;
pub mod utils;

#[cfg(feature = "python-bindings")]
use std::collections::HashMap;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray4, PyReadonlyArray4};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    evidence::Hansel as Evidence,
    utils::{PyPosition, build_options, extract_counts, extract_path, extract_site},
};

/// Hansel — Python-facing wrapper for the co-occurrence evidence structure.
///
/// Purpose
/// -------
/// Expose [`evidence::Hansel`] to Python callers with string symbols and
/// integer positions while preserving the core invariants and errors.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `Hansel(symbols, positions, unsymbols=None, lookback=None, prune_below=None, counts=None)`:
/// - `symbols`: `list[str]`
///   Ordered, unique alphabet.
/// - `positions`: `list[int]`
///   Strictly increasing position labels.
/// - `unsymbols`: `Optional[list[str]]`
///   Subset of `symbols` excluded from weighting.
/// - `lookback`: `Optional[int]`
///   Positive lookback order; `None` consults the whole path.
/// - `prune_below`: `Optional[float]`
///   Floor below which spent evidence is zeroed.
/// - `counts`: `Optional[numpy.ndarray]`
///   Pre-populated `float64` array of shape `(S, S, n + 2, n + 2)`.
///
/// Fields
/// ------
/// - `inner`: `evidence::Hansel<String, i64>`
///   Owned structure backing every method.
///
/// Notes
/// -----
/// - Position arguments accept an `int` or `"head"` / `"tail"`.
/// - `counts` is copied at construction; later writes to the numpy array are
///   not seen by the structure, and the structure's updates are not seen by
///   the array. Producers sharing one buffer must populate it before
///   construction, or use `evidence::Hansel::with_counts` from Rust with an
///   `ArrayViewMut4`.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "hansel", unsendable)]
pub struct Hansel {
    pub inner: Evidence<String, PyPosition>,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl Hansel {
    #[new]
    #[pyo3(
        signature = (
            symbols,
            positions,
            unsymbols = None,
            lookback = None,
            prune_below = None,
            counts = None,
        ),
        text_signature = "(symbols, positions, /, unsymbols=None, lookback=None, \
                          prune_below=None, counts=None)"
    )]
    pub fn new<'py>(
        symbols: Vec<String>, positions: Vec<PyPosition>, unsymbols: Option<Vec<String>>,
        lookback: Option<usize>, prune_below: Option<f64>,
        counts: Option<PyReadonlyArray4<'py, f64>>,
    ) -> PyResult<Self> {
        let unsymbols = unsymbols.unwrap_or_default();
        let options = build_options(lookback, prune_below)?;
        let inner = match counts {
            Some(raw) => {
                Evidence::with_counts(symbols, &unsymbols, positions, extract_counts(raw), options)?
            }
            None => Evidence::new(symbols, &unsymbols, positions, options)?,
        };
        Ok(Hansel { inner })
    }

    /// Record one piece of evidence linking `a` at `i` to `b` at `j`.
    pub fn add_observation(
        &mut self, a: String, b: String, i: &Bound<'_, PyAny>, j: &Bound<'_, PyAny>,
    ) -> PyResult<()> {
        Ok(self.inner.add_observation(&a, &b, extract_site(i)?, extract_site(j)?)?)
    }

    /// Raw evidence count for `(a, b, i, j)`.
    pub fn get_observation(
        &self, a: String, b: String, i: &Bound<'_, PyAny>, j: &Bound<'_, PyAny>,
    ) -> PyResult<f64> {
        Ok(self.inner.get_observation(&a, &b, extract_site(i)?, extract_site(j)?)?)
    }

    /// Spend `ratio` of the evidence for `(a, b, i, j)`.
    pub fn reweight_observation(
        &mut self, a: String, b: String, i: &Bound<'_, PyAny>, j: &Bound<'_, PyAny>, ratio: f64,
    ) -> PyResult<()> {
        Ok(self.inner.reweight_observation(&a, &b, extract_site(i)?, extract_site(j)?, ratio)?)
    }

    /// Per-symbol evidence arriving at `j`.
    pub fn get_counts_at(&self, j: &Bound<'_, PyAny>) -> PyResult<HashMap<String, f64>> {
        Ok(self.inner.get_counts_at(extract_site(j)?)?)
    }

    /// Total non-unsymbol evidence arriving at `j`.
    pub fn get_total_at(&self, j: &Bound<'_, PyAny>) -> PyResult<f64> {
        Ok(self.inner.get_total_at(extract_site(j)?)?)
    }

    /// `log10` marginal probability of `symbol` at `j`.
    pub fn get_marginal_of_at(&self, symbol: String, j: &Bound<'_, PyAny>) -> PyResult<f64> {
        Ok(self.inner.get_marginal_of_at(&symbol, extract_site(j)?)?)
    }

    /// `log10 P(b at j | a at i)`.
    pub fn get_conditional_of_at(
        &self, a: String, i: &Bound<'_, PyAny>, b: String, j: &Bound<'_, PyAny>,
    ) -> PyResult<f64> {
        Ok(self.inner.get_conditional_of_at(&a, extract_site(i)?, &b, extract_site(j)?)?)
    }

    /// Raw support for `b` at `j` spanning from `i`.
    pub fn get_spanning_support(
        &self, b: String, i: &Bound<'_, PyAny>, j: &Bound<'_, PyAny>,
    ) -> PyResult<f64> {
        Ok(self.inner.get_spanning_support(&b, extract_site(i)?, extract_site(j)?)?)
    }

    /// `log10` edge weights at `j` given a path of `(site, symbol)` pairs.
    pub fn get_edge_weights_at<'py>(
        &self, j: &Bound<'py, PyAny>, path: Vec<(Bound<'py, PyAny>, String)>,
    ) -> PyResult<HashMap<String, f64>> {
        let path = extract_path(path)?;
        Ok(self.inner.get_edge_weights_at(extract_site(j)?, &path)?)
    }

    #[getter]
    pub fn symbols(&self) -> Vec<String> {
        self.inner.symbols().labels().to_vec()
    }

    #[getter]
    pub fn unsymbols(&self) -> Vec<String> {
        self.inner.symbols().unsymbols().cloned().collect()
    }

    #[getter]
    pub fn positions(&self) -> Vec<PyPosition> {
        self.inner.positions().labels().to_vec()
    }

    /// Configured lookback order, `None` when unbounded.
    #[getter]
    pub fn lookback(&self) -> Option<usize> {
        self.inner.lookback().order()
    }

    #[getter]
    pub fn observations(&self) -> u64 {
        self.inner.observations()
    }

    #[getter]
    pub fn is_weighted(&self) -> bool {
        self.inner.is_weighted()
    }

    /// Tensor dimensions `(S, S, n + 2, n + 2)`.
    #[getter]
    pub fn shape(&self) -> (usize, usize, usize, usize) {
        let [a, b, i, j] = self.inner.shape().dims();
        (a, b, i, j)
    }

    /// Copy of the raw count tensor.
    #[getter]
    pub fn counts<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray4<f64>> {
        self.inner.counts().to_owned().into_pyarray(py)
    }

    fn __repr__(&self) -> String {
        let [s, _, slots, _] = self.inner.shape().dims();
        format!(
            "Hansel(symbols={s}, positions={}, observations={})",
            slots - 2,
            self.inner.observations()
        )
    }
}

#[cfg(feature = "python-bindings")]
#[pymodule]
fn _hansel(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Hansel>()?;
    Ok(())
}
