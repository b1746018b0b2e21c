//! Base-10 log normalization of non-negative evidence scores.
//!
//! Every derived probability in this crate is a ratio of non-negative counts
//! reported as `log10(numerator / denominator)`. These helpers enforce the
//! shared rule: a zero denominator is [`HanselError::InsufficientEvidence`],
//! while a zero numerator over a positive denominator is a genuine
//! probability of zero and maps to `f64::NEG_INFINITY`.
use crate::evidence::errors::{HanselError, HanselResult};

/// `log10(numerator / denominator)`.
///
/// Errors
/// ------
/// - `HanselError::InsufficientEvidence` when `denominator <= 0`; `what`
///   names the quantity in the message.
pub fn log10_ratio(
    numerator: f64, denominator: f64, what: impl FnOnce() -> String,
) -> HanselResult<f64> {
    if denominator <= 0.0 {
        return Err(HanselError::insufficient_evidence(what()));
    }
    Ok((numerator / denominator).log10())
}

/// Normalize keyed scores into base-10 log probabilities.
///
/// Returns `(key, log10(score / Σ scores))` in input order.
///
/// Errors
/// ------
/// - `HanselError::InsufficientEvidence` when the scores sum to zero
///   (including the empty input).
pub fn log10_normalize<K>(
    scores: Vec<(K, f64)>, what: impl FnOnce() -> String,
) -> HanselResult<Vec<(K, f64)>> {
    let total: f64 = scores.iter().map(|(_, score)| score).sum();
    if total <= 0.0 {
        return Err(HanselError::insufficient_evidence(what()));
    }
    Ok(scores.into_iter().map(|(key, score)| (key, (score / total).log10())).collect())
}
