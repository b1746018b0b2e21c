//! core — indices, storage, options, and numeric helpers for the evidence tensor.
//!
//! Purpose
//! -------
//! Collect the building blocks the [`Hansel`](crate::evidence::Hansel)
//! structure is assembled from: the symbol and position indices that map
//! labels onto dense codes, the count tensor that stores evidence, the shape
//! descriptor tying them together, construction options, validation guards,
//! and the log-normalization helpers shared by every derived probability.
//!
//! Key behaviors
//! -------------
//! - [`SymbolIndex`] and [`PositionIndex`] are built once, validated, and
//!   frozen; all hot-path label lookups are O(1).
//! - [`CountTensor`] addresses owned or borrowed `ndarray` storage through
//!   the same `[a, b, i, j]` scheme.
//! - [`Site`] lets callers name the two sentinel slots alongside real labels.
//! - [`log10_ratio`] / [`log10_normalize`] turn non-negative counts into
//!   base-10 log probabilities and report zero denominators as errors.
//!
//! Invariants & assumptions
//! ------------------------
//! - Alphabet non-empty and duplicate-free; unsymbols ⊆ alphabet.
//! - Position labels non-empty and strictly increasing; sentinels at codes
//!   `0` and `n + 1`.
//! - Tensor shape `[S, S, n + 2, n + 2]`, entries finite and ≥ 0.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; the tensor axis order is source symbol,
//!   destination symbol, source slot, destination slot.
//! - This module performs no logging; diagnostics are emitted by the
//!   structure in `models`.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its own invariants; end-to-end
//!   behavior is covered in `models` and the integration tests.

pub mod normalize;
pub mod options;
pub mod positions;
pub mod shape;
pub mod site;
pub mod symbols;
pub mod tensor;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::normalize::{log10_normalize, log10_ratio};
pub use self::options::{HanselOptions, Lookback};
pub use self::positions::{PositionIndex, PositionLabel};
pub use self::shape::TensorShape;
pub use self::site::Site;
pub use self::symbols::{SymbolIndex, SymbolLabel};
pub use self::tensor::CountTensor;
pub use self::validation::{
    validate_alphabet, validate_counts, validate_lookback, validate_positions,
    validate_prune_floor, validate_ratio, validate_unsymbols,
};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::options::{HanselOptions, Lookback};
    pub use super::shape::TensorShape;
    pub use super::site::Site;
    pub use super::symbols::SymbolLabel;
    pub use super::positions::PositionLabel;
}
