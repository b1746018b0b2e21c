//! models — the Hansel evidence structure and its derived queries.
//!
//! Purpose
//! -------
//! Collect the user-facing structure built on top of `evidence::core`: the
//! [`Hansel`] type with its construction, raw access, and mutations, plus the
//! derived-probability queries a traversal algorithm consumes.
//!
//! Key behaviors
//! -------------
//! - [`hansel`] defines [`Hansel`] / [`HanselView`], `add_observation`,
//!   `get_observation`, and `reweight_observation`.
//! - [`queries`] adds `get_counts_at`, `get_total_at`, `get_marginal_of_at`,
//!   `get_conditional_of_at`, `get_spanning_support`, and
//!   `get_edge_weights_at` as a second `impl` block on the same type.
//!
//! Invariants & assumptions
//! ------------------------
//! - Reads are pure functions of the tensor at call time; mutations require
//!   exclusive access and take effect immediately.
//!
//! Testing notes
//! -------------
//! - Each file carries unit tests for its own operations; end-to-end
//!   scenarios and randomized invariants live under `tests/`.

pub mod hansel;
pub mod queries;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::hansel::{Hansel, HanselView};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::hansel::{Hansel, HanselView};
}
