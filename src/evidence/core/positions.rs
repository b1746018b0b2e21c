//! Position index — ordered labels ↔ dense codes, bracketed by sentinels.
//!
//! Purpose
//! -------
//! Map caller-supplied, strictly increasing position labels (coordinates,
//! timestamps, ...) onto the position axes of the count tensor. Two extra
//! sentinel slots bracket the sequence: code `0` is [`Site::Head`] and code
//! `n + 1` is [`Site::Tail`], so real labels occupy `1..=n` in caller order.
//!
//! Invariants & assumptions
//! ------------------------
//! - At least one label; labels strictly increasing.
//! - `slots() == n + 2`.
//! - The index is immutable after construction.
use crate::evidence::{
    core::{site::Site, validation::validate_positions},
    errors::{HanselError, HanselResult},
};
use std::{collections::HashMap, fmt::Debug, hash::Hash};

/// Bounds required of position labels.
pub trait PositionLabel: Ord + Hash + Clone + Debug {}

impl<T: Ord + Hash + Clone + Debug> PositionLabel for T {}

/// PositionIndex — frozen position labels plus two sentinel slots.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionIndex<P: PositionLabel> {
    labels: Vec<P>,
    codes: HashMap<P, usize>,
}

impl<P: PositionLabel> PositionIndex<P> {
    /// Build the index from strictly increasing labels.
    ///
    /// Errors
    /// ------
    /// - `HanselError::Configuration` when `positions` is empty or not
    ///   strictly increasing.
    pub fn new(positions: Vec<P>) -> HanselResult<Self> {
        validate_positions(&positions)?;
        let codes =
            positions.iter().enumerate().map(|(idx, label)| (label.clone(), idx + 1)).collect();
        Ok(PositionIndex { labels: positions, codes })
    }

    /// Number of real positions `n` (sentinels excluded).
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Length of the position axes: `n + 2`.
    pub fn slots(&self) -> usize {
        self.labels.len() + 2
    }

    pub fn labels(&self) -> &[P] {
        &self.labels
    }

    pub fn head_code(&self) -> usize {
        0
    }

    pub fn tail_code(&self) -> usize {
        self.labels.len() + 1
    }

    /// Dense code of a site.
    ///
    /// Errors
    /// ------
    /// - `HanselError::UnknownPosition` when a `Site::At` label is not
    ///   registered.
    pub fn code(&self, site: &Site<P>) -> HanselResult<usize> {
        match site {
            Site::Head => Ok(self.head_code()),
            Site::Tail => Ok(self.tail_code()),
            Site::At(label) => self
                .codes
                .get(label)
                .copied()
                .ok_or_else(|| HanselError::UnknownPosition { position: format!("{label:?}") }),
        }
    }

    /// Site stored at `code`. Panics if `code >= self.slots()`.
    pub fn site(&self, code: usize) -> Site<&P> {
        match code {
            0 => Site::Head,
            c if c == self.tail_code() => Site::Tail,
            c => Site::At(&self.labels[c - 1]),
        }
    }
}
