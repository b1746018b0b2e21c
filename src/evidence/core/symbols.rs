//! Symbol index — bidirectional alphabet ↔ dense code mapping.
//!
//! Purpose
//! -------
//! Map a caller-supplied, ordered alphabet onto dense codes `0..S` used to
//! address the first two axes of the count tensor, and record which codes
//! are *unsymbols* (placeholder or invalid symbols that are counted but
//! excluded from every probability-weighting computation).
//!
//! Key behaviors
//! -------------
//! - [`SymbolIndex::new`] validates the alphabet and unsymbol subset once and
//!   freezes the mapping; codes follow the order the alphabet was supplied in.
//! - [`SymbolIndex::code`] resolves any registered label, unsymbols included.
//! - [`SymbolIndex::weighted_code`] resolves a label that must take part in
//!   weighting and rejects unsymbols.
//! - [`SymbolIndex::weighted_codes`] iterates the codes of all non-unsymbols
//!   in alphabet order.
//!
//! Invariants & assumptions
//! ------------------------
//! - The alphabet is non-empty and duplicate-free.
//! - Every unsymbol is a member of the alphabet.
//! - The index is immutable after construction, so a symbol's code is stable
//!   for the lifetime of the owning structure.
//!
//! Performance
//! -----------
//! - Lookups are O(1) through a `HashMap`; the unsymbol flags are a dense
//!   `Vec<bool>` indexed by code.
use crate::evidence::{
    core::validation::{validate_alphabet, validate_unsymbols},
    errors::{HanselError, HanselResult},
};
use std::{collections::HashMap, fmt::Debug, hash::Hash};

/// Bounds required of symbol labels.
///
/// Blanket-implemented for every `Eq + Hash + Clone + Debug` type, so
/// characters, strings, and small enums all work out of the box.
pub trait SymbolLabel: Eq + Hash + Clone + Debug {}

impl<T: Eq + Hash + Clone + Debug> SymbolLabel for T {}

/// SymbolIndex — frozen alphabet with unsymbol flags.
///
/// Fields
/// ------
/// - `labels`: `Vec<S>`
///   Alphabet in caller order; `labels[code]` is the label for `code`.
/// - `codes`: `HashMap<S, usize>`
///   Reverse mapping from label to dense code.
/// - `unsymbol`: `Vec<bool>`
///   `unsymbol[code]` is `true` when the symbol is excluded from weighting.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolIndex<S: SymbolLabel> {
    labels: Vec<S>,
    codes: HashMap<S, usize>,
    unsymbol: Vec<bool>,
}

impl<S: SymbolLabel> SymbolIndex<S> {
    /// Build the index from an alphabet and its unsymbol subset.
    ///
    /// Parameters
    /// ----------
    /// - `alphabet`: `Vec<S>`
    ///   Ordered, unique labels. Dense codes follow this order.
    /// - `unsymbols`: `&[S]`
    ///   Labels to flag as unsymbols; each must appear in `alphabet`.
    ///
    /// Errors
    /// ------
    /// - `HanselError::Configuration`
    ///   Returned when the alphabet is empty or duplicated, or when an
    ///   unsymbol is not in the alphabet.
    pub fn new(alphabet: Vec<S>, unsymbols: &[S]) -> HanselResult<Self> {
        validate_alphabet(&alphabet)?;
        validate_unsymbols(&alphabet, unsymbols)?;

        let codes: HashMap<S, usize> =
            alphabet.iter().enumerate().map(|(code, label)| (label.clone(), code)).collect();
        let unsymbol = alphabet.iter().map(|label| unsymbols.contains(label)).collect();

        Ok(SymbolIndex { labels: alphabet, codes, unsymbol })
    }

    /// Alphabet size `S` (unsymbols included).
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always `false`; construction rejects empty alphabets.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Alphabet in code order.
    pub fn labels(&self) -> &[S] {
        &self.labels
    }

    /// Label stored at `code`.
    ///
    /// Panics if `code >= self.len()`; codes handed out by this index are
    /// always in range.
    pub fn label(&self, code: usize) -> &S {
        &self.labels[code]
    }

    pub fn is_unsymbol(&self, code: usize) -> bool {
        self.unsymbol[code]
    }

    /// Labels flagged as unsymbols, in alphabet order.
    pub fn unsymbols(&self) -> impl Iterator<Item = &S> + '_ {
        self.labels.iter().zip(&self.unsymbol).filter(|(_, flag)| **flag).map(|(s, _)| s)
    }

    /// Dense code of any registered symbol, unsymbols included.
    ///
    /// Errors
    /// ------
    /// - `HanselError::UnknownSymbol` when `symbol` is not in the alphabet.
    pub fn code(&self, symbol: &S) -> HanselResult<usize> {
        self.codes
            .get(symbol)
            .copied()
            .ok_or_else(|| HanselError::unknown_symbol(symbol, "not a member of the alphabet"))
    }

    /// Dense code of a symbol that takes part in weighting.
    ///
    /// Errors
    /// ------
    /// - `HanselError::UnknownSymbol` when `symbol` is unregistered or is an
    ///   unsymbol.
    pub fn weighted_code(&self, symbol: &S) -> HanselResult<usize> {
        let code = self.code(symbol)?;
        if self.unsymbol[code] {
            return Err(HanselError::unknown_symbol(
                symbol,
                "unsymbols are excluded from weighting",
            ));
        }
        Ok(code)
    }

    /// Codes of every non-unsymbol, in alphabet order.
    pub fn weighted_codes(&self) -> impl Iterator<Item = usize> + '_ {
        self.unsymbol.iter().enumerate().filter(|(_, flag)| !**flag).map(|(code, _)| code)
    }
}
