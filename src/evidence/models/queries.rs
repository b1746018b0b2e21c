//! Derived quantities — counts-at, marginal, conditional, spanning support,
//! and lookback-windowed edge weights.
//!
//! Purpose
//! -------
//! Turn the raw counts of a [`Hansel`] into the quantities a traversal
//! algorithm consumes when deciding which symbol to place at the next
//! position. Every function here is a pure read of the tensor at call time.
//!
//! Key behaviors
//! -------------
//! - [`Hansel::get_counts_at`]: per-symbol evidence arriving at a position
//!   from any other slot, from non-unsymbol sources only.
//! - [`Hansel::get_marginal_of_at`]: `log10` share of one symbol in that table.
//! - [`Hansel::get_conditional_of_at`]: `log10 P(b at j | a at i)` over the
//!   evidence linking `i` and `j`.
//! - [`Hansel::get_spanning_support`]: raw evidence from `i` to `j` ending in
//!   `b`, counting only non-unsymbol origins.
//! - [`Hansel::get_edge_weights_at`]: spanning support summed over the last
//!   `min(L, |path|)` path entries, normalized into `log10` weights.
//!
//! Invariants & assumptions
//! ------------------------
//! - Unsymbols never appear as keys in any returned mapping and are rejected
//!   wherever they would be the destination or candidate symbol.
//! - A zero denominator is reported as `HanselError::InsufficientEvidence`;
//!   a zero numerator over a positive denominator yields `f64::NEG_INFINITY`.
//! - Sentinel slots take part in every sum exactly like interior slots.
//!
//! Conventions
//! -----------
//! - Returned mappings are keyed by cloned symbol labels.
//! - Path entries are `(site, symbol)` pairs ordered oldest first; the
//!   symbol must be registered but does not enter the score.
//!
//! Performance
//! -----------
//! - `get_counts_at` is O(S²·n); conditional and spanning support are O(S);
//!   edge weights are O(S²·min(L, |path|)).
use crate::evidence::{
    core::{PositionLabel, Site, SymbolLabel, log10_normalize, log10_ratio},
    errors::HanselResult,
    models::hansel::Hansel,
};
use ndarray::Data;
use slog::trace;
use std::collections::HashMap;

impl<S, P, D> Hansel<S, P, D>
where
    S: SymbolLabel,
    P: PositionLabel,
    D: Data<Elem = f64>,
{
    /// Evidence supporting each non-unsymbol at `j`.
    ///
    /// For every non-unsymbol `s`, returns
    /// `Σ_{a ∉ unsymbols} Σ_{i ≠ j} H[a, s, i, j]`.
    ///
    /// Errors
    /// ------
    /// - `HanselError::UnknownPosition` when `j` is not registered.
    pub fn get_counts_at(&self, j: impl Into<Site<P>>) -> HanselResult<HashMap<S, f64>> {
        let j = self.positions.code(&j.into())?;
        Ok(self.keyed(self.counts_at_code(j)))
    }

    /// Total non-unsymbol evidence arriving at `j`: the sum of
    /// [`Hansel::get_counts_at`] over all keys.
    pub fn get_total_at(&self, j: impl Into<Site<P>>) -> HanselResult<f64> {
        let j = self.positions.code(&j.into())?;
        Ok(self.counts_at_code(j).iter().map(|(_, support)| support).sum())
    }

    /// `log10( counts_at(j)[symbol] / Σ_s counts_at(j)[s] )`.
    ///
    /// Errors
    /// ------
    /// - `HanselError::UnknownSymbol` when `symbol` is unregistered or an
    ///   unsymbol.
    /// - `HanselError::UnknownPosition` when `j` is not registered.
    /// - `HanselError::InsufficientEvidence` when nothing arrives at `j`.
    pub fn get_marginal_of_at(&self, symbol: &S, j: impl Into<Site<P>>) -> HanselResult<f64> {
        let b = self.symbols.weighted_code(symbol)?;
        let site = j.into();
        let j = self.positions.code(&site)?;

        let table = self.counts_at_code(j);
        let total: f64 = table.iter().map(|(_, support)| support).sum();
        let own = table.iter().find(|(code, _)| *code == b).map_or(0.0, |(_, support)| *support);
        log10_ratio(own, total, || format!("the marginal at {site:?}"))
    }

    /// `log10( H[a, b, i, j] / Σ_{b' ∉ unsymbols} H[a, b', i, j] )`.
    ///
    /// Parameters
    /// ----------
    /// - `a`: any registered symbol, unsymbols included (diagnostic queries).
    /// - `i`, `j`: source and destination sites.
    /// - `b`: destination symbol; must not be an unsymbol.
    ///
    /// Errors
    /// ------
    /// - `HanselError::UnknownSymbol` when `a` is unregistered, or `b` is
    ///   unregistered or an unsymbol.
    /// - `HanselError::UnknownPosition` for unregistered sites.
    /// - `HanselError::InsufficientEvidence` when no evidence links `a` at
    ///   `i` to any non-unsymbol at `j`.
    pub fn get_conditional_of_at(
        &self, a: &S, i: impl Into<Site<P>>, b: &S, j: impl Into<Site<P>>,
    ) -> HanselResult<f64> {
        let a_code = self.symbols.code(a)?;
        let b_code = self.symbols.weighted_code(b)?;
        let (i_site, j_site) = (i.into(), j.into());
        let i = self.positions.code(&i_site)?;
        let j = self.positions.code(&j_site)?;

        let linked = self.counts.get([a_code, b_code, i, j]);
        let total = self.counts.sum_destinations(a_code, self.symbols.weighted_codes(), i, j);
        log10_ratio(linked, total, || {
            format!("the conditional at {j_site:?} given {a:?} at {i_site:?}")
        })
    }

    /// `Σ_{a ∉ unsymbols} H[a, b, i, j]`: raw, un-logged support for `b`
    /// at `j` spanning from `i`.
    ///
    /// Errors
    /// ------
    /// - `HanselError::UnknownSymbol` when `b` is unregistered or an unsymbol.
    /// - `HanselError::UnknownPosition` for unregistered sites.
    pub fn get_spanning_support(
        &self, b: &S, i: impl Into<Site<P>>, j: impl Into<Site<P>>,
    ) -> HanselResult<f64> {
        let b = self.symbols.weighted_code(b)?;
        let i = self.positions.code(&i.into())?;
        let j = self.positions.code(&j.into())?;
        Ok(self.spanning_support_codes(b, i, j))
    }

    /// Log10 edge weights for every candidate symbol at `j` given the path
    /// walked so far.
    ///
    /// Parameters
    /// ----------
    /// - `j`: the site being decided.
    /// - `path`: `&[(Site<P>, S)]`
    ///   Choices already made, oldest first, ending before `j`.
    ///
    /// Returns
    /// -------
    /// `HanselResult<HashMap<S, f64>>`
    ///   For each non-unsymbol candidate `c`,
    ///   `log10( score(c) / Σ_{c'} score(c') )` where
    ///   `score(c) = Σ_k spanning_support(c, i_k, j)` over the last
    ///   `min(L, |path|)` entries. With an empty path the weights are the
    ///   marginal log probabilities at `j`.
    ///
    /// Errors
    /// ------
    /// - `HanselError::UnknownPosition` when `j` or a windowed path site is
    ///   not registered.
    /// - `HanselError::UnknownSymbol` when a windowed path symbol is not
    ///   registered.
    /// - `HanselError::InsufficientEvidence` when every candidate scores zero.
    ///
    /// Notes
    /// -----
    /// - Entries older than the lookback window are not read at all, so they
    ///   are neither validated nor scored.
    pub fn get_edge_weights_at(
        &self, j: impl Into<Site<P>>, path: &[(Site<P>, S)],
    ) -> HanselResult<HashMap<S, f64>> {
        let site = j.into();
        let j = self.positions.code(&site)?;

        if path.is_empty() {
            let weights =
                log10_normalize(self.counts_at_code(j), || format!("the marginal at {site:?}"))?;
            return Ok(self.keyed(weights));
        }

        let window = self.lookback.window(path.len());
        if window < path.len() {
            trace!(self.logger, "lookback truncates path";
                "at" => format!("{site:?}"), "path_len" => path.len(), "window" => window);
        }

        let sources = path[path.len() - window..]
            .iter()
            .map(|(step, symbol)| {
                self.symbols.code(symbol)?;
                self.positions.code(step)
            })
            .collect::<HanselResult<Vec<usize>>>()?;

        let scores: Vec<(usize, f64)> = self
            .symbols
            .weighted_codes()
            .map(|c| {
                let score: f64 =
                    sources.iter().map(|&i| self.spanning_support_codes(c, i, j)).sum();
                (c, score)
            })
            .collect();
        let weights = log10_normalize(scores, || format!("edge weights at {site:?}"))?;
        Ok(self.keyed(weights))
    }

    // ---- Helper Methods ----

    fn spanning_support_codes(&self, b: usize, i: usize, j: usize) -> f64 {
        self.counts.sum_sources(self.symbols.weighted_codes(), b, i, j)
    }

    fn counts_at_code(&self, j: usize) -> Vec<(usize, f64)> {
        self.symbols
            .weighted_codes()
            .map(|b| {
                let support: f64 =
                    self.symbols.weighted_codes().map(|a| self.counts.sum_into(a, b, j)).sum();
                (b, support)
            })
            .collect()
    }

    fn keyed(&self, values: Vec<(usize, f64)>) -> HashMap<S, f64> {
        values.into_iter().map(|(code, value)| (self.symbols.label(code).clone(), value)).collect()
    }
}
