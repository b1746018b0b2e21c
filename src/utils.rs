//! utils — conversion helpers for the PyO3 boundary.
//!
//! Turn loosely typed Python arguments into the validated Rust types the
//! evidence structure expects: position sites (integers or the strings
//! `"head"` / `"tail"`), traversal paths, construction options, and numpy
//! count arrays. Only compiled with the `python-bindings` feature.
#[cfg(feature = "python-bindings")]
use ndarray::Array4;

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArray4;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::evidence::{HanselOptions, Site};

/// Python-side position label type.
#[cfg(feature = "python-bindings")]
pub type PyPosition = i64;

/// Interpret a Python object as a [`Site`].
///
/// Accepts an `int` position label, or the case-insensitive strings
/// `"head"` / `"tail"` for the sentinels.
#[cfg(feature = "python-bindings")]
pub fn extract_site(raw: &Bound<'_, PyAny>) -> PyResult<Site<PyPosition>> {
    if let Ok(label) = raw.extract::<PyPosition>() {
        return Ok(Site::At(label));
    }
    let name: String = raw.extract().map_err(|_| {
        PyTypeError::new_err("expected an int position label or one of 'head' / 'tail'")
    })?;
    match name.to_ascii_lowercase().as_str() {
        "head" => Ok(Site::Head),
        "tail" => Ok(Site::Tail),
        other => Err(PyTypeError::new_err(format!(
            "unrecognized sentinel {other:?}; expected 'head' or 'tail'"
        ))),
    }
}

/// Convert a Python sequence of `(site, symbol)` pairs into a traversal path.
#[cfg(feature = "python-bindings")]
pub fn extract_path(
    raw: Vec<(Bound<'_, PyAny>, String)>,
) -> PyResult<Vec<(Site<PyPosition>, String)>> {
    raw.into_iter().map(|(site, symbol)| Ok((extract_site(&site)?, symbol))).collect()
}

/// Build [`HanselOptions`] from the optional keyword arguments of the
/// Python constructor. Validation errors surface as `ValueError`.
#[cfg(feature = "python-bindings")]
pub fn build_options(
    lookback: Option<usize>, prune_below: Option<f64>,
) -> PyResult<HanselOptions> {
    let options = HanselOptions::new(lookback)?;
    let options = match prune_below {
        Some(floor) => options.with_prune_below(floor)?,
        None => options,
    };
    Ok(options)
}

/// Copy a read-only numpy array into owned count storage.
#[cfg(feature = "python-bindings")]
pub fn extract_counts(raw: PyReadonlyArray4<'_, f64>) -> Array4<f64> {
    raw.as_array().to_owned()
}
