//! Validation helpers for the evidence tensor — centralized input guards.
//!
//! Purpose
//! -------
//! Collect the construction-time and call-time checks used across the
//! `evidence` subtree in one place: alphabet and unsymbol sets, position
//! labels, lookback order, pruning floor, caller-supplied storage, and
//! reweight ratios. Constructors and mutators call these helpers before
//! touching any index or tensor state.
//!
//! Key behaviors
//! -------------
//! - Reject empty or duplicated alphabets, unsymbols outside the alphabet,
//!   and empty or non-increasing position lists as
//!   [`HanselError::Configuration`].
//! - Reject caller storage whose dimensions disagree with the derived shape
//!   as [`HanselError::ShapeMismatch`], and storage holding negative or
//!   non-finite entries as [`HanselError::Configuration`].
//! - Reject reweight ratios outside `[0, 1]` as [`HanselError::InvalidRatio`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Labels only need `Eq + Hash` (symbols) or `Ord` (positions) plus `Debug`
//!   for error messages; no other structure is assumed.
//! - Every helper is side-effect free and returns `Ok(())` on success.
//!
//! Conventions
//! -----------
//! - Error messages name the offending label or value using `Debug`
//!   formatting.
//! - Helpers are `pub` so callers that populate storage externally can run
//!   the same checks before constructing a [`Hansel`](crate::evidence::Hansel).
//!
//! Testing notes
//! -------------
//! - Unit tests cover every error branch plus a success path per helper.
use crate::evidence::errors::{HanselError, HanselResult};
use ndarray::{ArrayBase, Data, Ix4};
use std::{collections::HashSet, fmt::Debug, hash::Hash};

/// Validate a symbol alphabet: non-empty, no duplicates.
///
/// Errors
/// ------
/// - `HanselError::Configuration`
///   Returned when `alphabet` is empty or contains a label twice.
pub fn validate_alphabet<S>(alphabet: &[S]) -> HanselResult<()>
where
    S: Eq + Hash + Debug,
{
    if alphabet.is_empty() {
        return Err(HanselError::configuration("alphabet must contain at least one symbol"));
    }
    let mut seen = HashSet::with_capacity(alphabet.len());
    for symbol in alphabet {
        if !seen.insert(symbol) {
            return Err(HanselError::configuration(format!(
                "duplicate symbol {symbol:?} in alphabet"
            )));
        }
    }
    Ok(())
}

/// Validate that every unsymbol is a member of the alphabet.
///
/// Repeated unsymbols are tolerated; they flag the same code twice.
///
/// Errors
/// ------
/// - `HanselError::Configuration`
///   Returned for the first unsymbol not present in `alphabet`.
pub fn validate_unsymbols<S>(alphabet: &[S], unsymbols: &[S]) -> HanselResult<()>
where
    S: Eq + Debug,
{
    match unsymbols.iter().find(|u| !alphabet.contains(u)) {
        Some(missing) => Err(HanselError::configuration(format!(
            "unsymbol {missing:?} is not a member of the alphabet"
        ))),
        None => Ok(()),
    }
}

/// Validate position labels: non-empty and strictly increasing.
///
/// Errors
/// ------
/// - `HanselError::Configuration`
///   Returned when `positions` is empty or when a label is not strictly
///   greater than its predecessor.
pub fn validate_positions<P>(positions: &[P]) -> HanselResult<()>
where
    P: Ord + Debug,
{
    if positions.is_empty() {
        return Err(HanselError::configuration("at least one position label is required"));
    }
    if let Some(pair) = positions.windows(2).find(|w| w[0] >= w[1]) {
        return Err(HanselError::configuration(format!(
            "position labels must be strictly increasing; {:?} is followed by {:?}",
            pair[0], pair[1]
        )));
    }
    Ok(())
}

/// Validate a lookback order: when given, it must be at least one.
pub fn validate_lookback(lookback: Option<usize>) -> HanselResult<()> {
    match lookback {
        Some(0) => Err(HanselError::configuration("lookback order must be a positive integer")),
        _ => Ok(()),
    }
}

/// Validate a pruning floor: finite and non-negative.
pub fn validate_prune_floor(floor: f64) -> HanselResult<()> {
    if !floor.is_finite() || floor < 0.0 {
        return Err(HanselError::configuration(format!(
            "prune floor must be finite and >= 0; got: {floor}"
        )));
    }
    Ok(())
}

/// Validate caller-supplied count storage against the derived shape.
///
/// Parameters
/// ----------
/// - `counts`: any 4-D `ndarray` (owned or borrowed).
/// - `expected`: `[S, S, P+2, P+2]` derived from the two indices.
///
/// Errors
/// ------
/// - `HanselError::ShapeMismatch`
///   Returned when `counts.shape() != expected`.
/// - `HanselError::Configuration`
///   Returned when any entry is negative or non-finite.
///
/// Notes
/// -----
/// - The value scan is O(S²·P²); it runs once at construction.
pub fn validate_counts<D>(counts: &ArrayBase<D, Ix4>, expected: [usize; 4]) -> HanselResult<()>
where
    D: Data<Elem = f64>,
{
    if counts.shape() != expected {
        return Err(HanselError::ShapeMismatch { expected, actual: counts.shape().to_vec() });
    }
    if let Some((index, value)) =
        counts.indexed_iter().find(|(_, v)| !v.is_finite() || **v < 0.0)
    {
        return Err(HanselError::configuration(format!(
            "count storage must hold finite, non-negative entries; {index:?} holds {value}"
        )));
    }
    Ok(())
}

/// Validate a reweight ratio: finite and within `[0, 1]`.
///
/// Errors
/// ------
/// - `HanselError::InvalidRatio`
///   Returned when `ratio` is NaN, infinite, negative, or greater than one.
pub fn validate_ratio(ratio: f64) -> HanselResult<()> {
    if !(0.0..=1.0).contains(&ratio) {
        return Err(HanselError::InvalidRatio { ratio });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array4;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Every error branch of the validation helpers.
    // - One success path per helper.
    //
    // They intentionally DO NOT cover:
    // - How constructors combine these checks; see `models::hansel`.
    // -------------------------------------------------------------------------

    fn is_configuration<T: Debug>(result: HanselResult<T>) -> bool {
        matches!(result, Err(HanselError::Configuration { .. }))
    }

    #[test]
    // Purpose
    // -------
    // Verify alphabet checks for empty and duplicated inputs.
    //
    // Given
    // -----
    // - An empty alphabet, an alphabet with 'A' twice, and a valid alphabet.
    //
    // Expect
    // ------
    // - Configuration errors for the first two, `Ok` for the last.
    fn alphabet_rejects_empty_and_duplicates() {
        let empty: [char; 0] = [];

        assert!(is_configuration(validate_alphabet(&empty)));
        assert!(is_configuration(validate_alphabet(&['A', 'C', 'A'])));
        assert!(validate_alphabet(&['A', 'C', 'G', 'T', '_']).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Ensure unsymbols must be drawn from the alphabet.
    //
    // Given
    // -----
    // - Alphabet `ACGT_`; unsymbols `[_]` and `[N]`.
    //
    // Expect
    // ------
    // - `[_]` passes, `[N]` fails with a message naming 'N'.
    fn unsymbols_must_be_subset_of_alphabet() {
        let alphabet = ['A', 'C', 'G', 'T', '_'];

        assert!(validate_unsymbols(&alphabet, &['_']).is_ok());
        let err = validate_unsymbols(&alphabet, &['N']).unwrap_err();
        assert!(err.to_string().contains("'N'"), "Got: {err}");
    }

    #[test]
    // Purpose
    // -------
    // Verify position checks for empty, repeated and decreasing labels.
    //
    // Given
    // -----
    // - `[]`, `[1, 3, 3]`, `[5, 3]`, `[1, 3, 5]`.
    //
    // Expect
    // ------
    // - Only `[1, 3, 5]` passes.
    fn positions_must_be_non_empty_and_strictly_increasing() {
        let empty: [u32; 0] = [];

        assert!(is_configuration(validate_positions(&empty)));
        assert!(is_configuration(validate_positions(&[1, 3, 3])));
        assert!(is_configuration(validate_positions(&[5, 3])));
        assert!(validate_positions(&[1, 3, 5]).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Check lookback and prune-floor guards.
    //
    // Expect
    // ------
    // - Lookback 0 fails; `None` and 3 pass.
    // - Negative or NaN floors fail; 0.0 and 1.0 pass.
    fn lookback_and_floor_guards() {
        assert!(is_configuration(validate_lookback(Some(0))));
        assert!(validate_lookback(None).is_ok());
        assert!(validate_lookback(Some(3)).is_ok());

        assert!(is_configuration(validate_prune_floor(-0.5)));
        assert!(is_configuration(validate_prune_floor(f64::NAN)));
        assert!(validate_prune_floor(0.0).is_ok());
        assert!(validate_prune_floor(1.0).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Ensure storage checks distinguish shape mismatches from bad values.
    //
    // Given
    // -----
    // - A `[2, 2, 3, 3]` array checked against `[2, 2, 4, 4]`.
    // - A correctly shaped array holding one negative entry.
    //
    // Expect
    // ------
    // - `ShapeMismatch` with both shapes for the first.
    // - `Configuration` for the second.
    fn counts_check_shape_then_values() {
        let wrong = Array4::<f64>::zeros((2, 2, 3, 3));
        let err = validate_counts(&wrong, [2, 2, 4, 4]).unwrap_err();
        assert_eq!(
            err,
            HanselError::ShapeMismatch { expected: [2, 2, 4, 4], actual: vec![2, 2, 3, 3] }
        );

        let mut negative = Array4::<f64>::zeros((2, 2, 4, 4));
        negative[[1, 0, 2, 3]] = -1.0;
        assert!(is_configuration(validate_counts(&negative, [2, 2, 4, 4])));

        let fine = Array4::<f64>::ones((2, 2, 4, 4));
        assert!(validate_counts(&fine.view(), [2, 2, 4, 4]).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Verify the ratio guard accepts the closed unit interval only.
    fn ratio_must_lie_in_unit_interval() {
        assert!(validate_ratio(0.0).is_ok());
        assert!(validate_ratio(0.5).is_ok());
        assert!(validate_ratio(1.0).is_ok());
        assert_eq!(validate_ratio(1.01), Err(HanselError::InvalidRatio { ratio: 1.01 }));
        assert_eq!(validate_ratio(-0.1), Err(HanselError::InvalidRatio { ratio: -0.1 }));
        assert!(matches!(validate_ratio(f64::NAN), Err(HanselError::InvalidRatio { .. })));
    }
}
