//! evidence — dense co-occurrence accounting for sequence reconstruction.
//!
//! Purpose
//! -------
//! Record, for every ordered pair of symbols at every ordered pair of
//! positions, how much evidence exhibited that pair jointly, and derive the
//! marginal, conditional, and path-weighted probabilities an external
//! reconstruction algorithm needs to walk the implied graph. This is the main
//! entry point of the crate and the surface the Python bindings wrap.
//!
//! Key behaviors
//! -------------
//! - Collect the building blocks in [`core`]: symbol and position indices,
//!   the count tensor over owned or borrowed `ndarray` storage, sentinel
//!   addressing via [`Site`], construction options, validation guards, and
//!   `log10` normalization.
//! - Expose the structure itself in [`models`] via [`Hansel`] and its
//!   borrowed-storage alias [`HanselView`].
//! - Centralize the error surface in [`errors`] ([`HanselError`] and the
//!   [`HanselResult`] alias).
//!
//! Invariants & assumptions
//! ------------------------
//! - Indices are validated once at construction and never change; the tensor
//!   shape `[S, S, n + 2, n + 2]` is fixed for the structure's lifetime.
//! - Every tensor entry is finite and ≥ 0 after any sequence of public
//!   mutations.
//! - Unsymbols may be recorded but never contribute to weighting.
//! - There is no internal synchronization; a single structure is used from
//!   one thread at a time.
//!
//! Conventions
//! -----------
//! - All probabilities are base-10 logarithms. A zero denominator is an
//!   [`HanselError::InsufficientEvidence`] error; a zero numerator over a
//!   positive denominator is `f64::NEG_INFINITY`.
//! - The structure performs no I/O. Diagnostics go to the `slog::Logger`
//!   carried by [`HanselOptions`], which discards everything by default.
//!
//! Downstream usage
//! ----------------
//! - Typical flow:
//!   1. Build [`HanselOptions`] (lookback order, optional pruning floor,
//!      optional logger).
//!   2. Construct with [`Hansel::new`], or adopt pre-populated storage with
//!      [`Hansel::with_counts`].
//!   3. Ingest evidence with `add_observation` (or bulk writes through
//!      `counts_mut`).
//!   4. During traversal, query `get_edge_weights_at` for the next step and
//!      call `reweight_observation` to spend evidence on rejected paths.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`core`] cover index construction, tensor addressing,
//!   options, validation, and normalization.
//! - Unit tests in [`models`] cover every accessor and mutation; integration
//!   and property tests under `tests/` exercise full pipelines.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    HanselOptions, Lookback, PositionIndex, PositionLabel, Site, SymbolIndex, SymbolLabel,
    TensorShape,
};

#[cfg(feature = "obs_slog")]
pub use self::core::options::term_logger;

pub use self::errors::{HanselError, HanselResult};

pub use self::models::{Hansel, HanselView};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use hansel::evidence::prelude::*;
//
// to import the structure, its options, and its errors in a single line.

pub mod prelude {
    pub use super::{
        Hansel, HanselError, HanselOptions, HanselResult, HanselView, Lookback, Site, TensorShape,
    };
}
