//! Hansel options — construction-time configuration for the evidence tensor.
//!
//! Purpose
//! -------
//! Collect the knobs that shape how the structure *uses* its evidence,
//! without affecting storage: the lookback order consulted by edge
//! weighting, an optional pruning floor applied when evidence is spent, and
//! the structured logger used for diagnostics.
//!
//! Key behaviors
//! -------------
//! - [`Lookback`] bounds how many trailing path entries edge weighting
//!   consults; `Lookback::Unbounded` consults the whole path.
//! - [`HanselOptions`] bundles the lookback, the pruning floor, and a
//!   `slog::Logger`. The default is unbounded lookback, no pruning, and a
//!   logger that discards every record.
//! - With the `obs_slog` feature, [`term_logger`] builds an asynchronous
//!   terminal logger suitable for [`HanselOptions::with_logger`].
//!
//! Invariants & assumptions
//! ------------------------
//! - A bounded lookback is at least one.
//! - A pruning floor, when set, is finite and ≥ 0.
//!
//! Conventions
//! -----------
//! - Builders validate their argument and return [`HanselResult`] so invalid
//!   options surface as [`HanselError::Configuration`] at construction
//!   time, never later during queries.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the defaults, the builder error paths, and window
//!   computation for both lookback variants.
use crate::evidence::{
    core::validation::{validate_lookback, validate_prune_floor},
    errors::HanselResult,
};
use slog::{Discard, Logger, o};

/// Lookback — how many trailing path entries edge weighting consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lookback {
    /// Consult the entire path.
    #[default]
    Unbounded,
    /// Consult at most this many of the most recent entries (≥ 1).
    Bounded(usize),
}

impl Lookback {
    /// Build from an optional order; `None` means unbounded.
    ///
    /// Errors
    /// ------
    /// - `HanselError::Configuration` when `order == Some(0)`.
    pub fn new(order: Option<usize>) -> HanselResult<Lookback> {
        validate_lookback(order)?;
        Ok(order.map_or(Lookback::Unbounded, Lookback::Bounded))
    }

    /// Number of trailing entries consulted for a path of `path_len` entries:
    /// `min(L, path_len)`.
    pub fn window(&self, path_len: usize) -> usize {
        match *self {
            Lookback::Unbounded => path_len,
            Lookback::Bounded(order) => order.min(path_len),
        }
    }

    /// The configured order, `None` when unbounded.
    pub fn order(&self) -> Option<usize> {
        match *self {
            Lookback::Unbounded => None,
            Lookback::Bounded(order) => Some(order),
        }
    }
}

/// HanselOptions — configuration for a [`Hansel`](crate::evidence::Hansel).
///
/// Fields
/// ------
/// - `lookback`: [`Lookback`]
///   Windowing used by edge weighting. Does not affect storage.
/// - `prune_below`: `Option<f64>`
///   When set, a reweight with `ratio > 0` that leaves a cell below this
///   floor sets the cell to exactly zero instead.
/// - `logger`: `slog::Logger`
///   Destination for construction and reweighting diagnostics.
#[derive(Clone)]
pub struct HanselOptions {
    pub lookback: Lookback,
    pub prune_below: Option<f64>,
    pub logger: Logger,
}

impl HanselOptions {
    /// Options with the given lookback order and defaults elsewhere.
    ///
    /// Errors
    /// ------
    /// - `HanselError::Configuration` when `lookback == Some(0)`.
    pub fn new(lookback: Option<usize>) -> HanselResult<HanselOptions> {
        Ok(HanselOptions { lookback: Lookback::new(lookback)?, ..HanselOptions::default() })
    }

    /// Set the pruning floor applied when evidence is spent.
    ///
    /// Errors
    /// ------
    /// - `HanselError::Configuration` when `floor` is negative or not finite.
    pub fn with_prune_below(mut self, floor: f64) -> HanselResult<HanselOptions> {
        validate_prune_floor(floor)?;
        self.prune_below = Some(floor);
        Ok(self)
    }

    /// Route diagnostics to `logger`.
    pub fn with_logger(mut self, logger: Logger) -> HanselOptions {
        self.logger = logger;
        self
    }
}

impl Default for HanselOptions {
    fn default() -> Self {
        HanselOptions {
            lookback: Lookback::Unbounded,
            prune_below: None,
            logger: Logger::root(Discard, o!()),
        }
    }
}

impl std::fmt::Debug for HanselOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HanselOptions")
            .field("lookback", &self.lookback)
            .field("prune_below", &self.prune_below)
            .finish_non_exhaustive()
    }
}

/// Asynchronous terminal logger for interactive diagnostics.
#[cfg(feature = "obs_slog")]
pub fn term_logger() -> Logger {
    use slog::Drain;

    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    Logger::root(drain, o!("crate" => "hansel"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::errors::HanselError;

    #[test]
    // Purpose
    // -------
    // Verify the documented defaults.
    fn defaults_are_unbounded_without_pruning() {
        let opts = HanselOptions::default();

        assert_eq!(opts.lookback, Lookback::Unbounded);
        assert_eq!(opts.prune_below, None);
    }

    #[test]
    // Purpose
    // -------
    // Ensure malformed lookback orders and floors are rejected.
    fn builders_reject_malformed_values() {
        assert!(matches!(HanselOptions::new(Some(0)), Err(HanselError::Configuration { .. })));
        assert!(matches!(
            HanselOptions::default().with_prune_below(-1.0),
            Err(HanselError::Configuration { .. })
        ));

        let opts = HanselOptions::new(Some(2)).unwrap().with_prune_below(1.0).unwrap();
        assert_eq!(opts.lookback, Lookback::Bounded(2));
        assert_eq!(opts.prune_below, Some(1.0));
    }

    #[test]
    // Purpose
    // -------
    // Check window sizes for short and long paths under both variants.
    //
    // Expect
    // ------
    // - Bounded(2): window(0) = 0, window(1) = 1, window(5) = 2.
    // - Unbounded: window(5) = 5.
    fn window_is_min_of_order_and_path_length() {
        let bounded = Lookback::new(Some(2)).unwrap();

        assert_eq!(bounded.window(0), 0);
        assert_eq!(bounded.window(1), 1);
        assert_eq!(bounded.window(5), 2);
        assert_eq!(bounded.order(), Some(2));
        assert_eq!(Lookback::Unbounded.window(5), 5);
        assert_eq!(Lookback::Unbounded.order(), None);
    }
}
