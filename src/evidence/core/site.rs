//! Sentinel-aware position handles.
//!
//! A [`Site`] names one slot along the position axis of the count tensor:
//! either a caller-registered position label or one of the two sentinels
//! bracketing the sequence. Sentinels let boundary observations ("this read
//! starts before the first position") be recorded without special cases.
//!
//! Any label converts into [`Site::At`] through `From`, so call sites can pass
//! plain labels wherever a `Site` is accepted.

/// One slot on the position axis: a sentinel or a registered label.
///
/// Variants
/// --------
/// - `Head`
///   The "before the first real position" sentinel (dense code `0`).
/// - `At(label)`
///   A registered position label (dense codes `1..=n`).
/// - `Tail`
///   The "after the last real position" sentinel (dense code `n + 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Site<P> {
    Head,
    At(P),
    Tail,
}

impl<P> Site<P> {
    /// Returns `true` for the two sentinel slots.
    pub fn is_sentinel(&self) -> bool {
        !matches!(self, Site::At(_))
    }

    /// The wrapped label, if this is not a sentinel.
    pub fn label(&self) -> Option<&P> {
        match self {
            Site::At(label) => Some(label),
            Site::Head | Site::Tail => None,
        }
    }
}

impl<P> From<P> for Site<P> {
    fn from(label: P) -> Site<P> {
        Site::At(label)
    }
}
