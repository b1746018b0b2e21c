//! Hansel — the co-occurrence evidence structure.
//!
//! Purpose
//! -------
//! Record, for every ordered pair of symbols observed at every ordered pair
//! of positions, how much evidence exhibited that pair jointly, and expose
//! that evidence to an external sequence-reconstruction algorithm. This file
//! holds construction, raw cell access, and the two mutations (observe and
//! reweight); the derived probabilities live in
//! [`queries`](crate::evidence::models::queries).
//!
//! Key behaviors
//! -------------
//! - [`Hansel::new`] builds both indices and allocates a zero-filled tensor.
//! - [`Hansel::with_counts`] adopts caller storage (owned `Array4<f64>` or a
//!   borrowed `ArrayViewMut4<'_, f64>`) after checking shape and contents,
//!   so several producers can populate shared memory before construction.
//! - [`Hansel::add_observation`] increments one cell by one;
//!   [`Hansel::reweight_observation`] spends a fraction of one cell.
//! - [`Hansel::counts`] / [`Hansel::counts_mut`] expose the raw storage for
//!   bulk reads and external population.
//!
//! Invariants & assumptions
//! ------------------------
//! - Both indices are immutable after construction; tensor shape is fixed.
//! - Every cell is finite and ≥ 0 after any sequence of `add_observation` /
//!   `reweight_observation` calls. External writers through `counts_mut`
//!   must preserve this.
//! - `H[a, b, i, j]` and `H[b, a, j, i]` are distinct cells; the structure
//!   does not reorder positions.
//!
//! Conventions
//! -----------
//! - Symbol arguments are borrowed labels; position arguments accept anything
//!   convertible into [`Site`], so plain labels and the `Head`/`Tail`
//!   sentinels are interchangeable at call sites.
//! - No implicit synchronization. Mutation needs `&mut self`; callers sharing
//!   borrowed storage across producers coordinate writes themselves.
//! - Diagnostics go to the `slog::Logger` in [`HanselOptions`].
//!
//! Testing notes
//! -------------
//! - Unit tests here cover construction errors, single-cell isolation of
//!   `add_observation`, reweight arithmetic (including pruning), and
//!   borrowed-storage write-through. Derived quantities are tested in
//!   `queries`; end-to-end scenarios live in `tests/`.
use crate::evidence::{
    core::{
        CountTensor, HanselOptions, Lookback, PositionIndex, PositionLabel, Site, SymbolIndex,
        SymbolLabel, TensorShape,
        validation::{validate_lookback, validate_prune_floor, validate_ratio},
    },
    errors::HanselResult,
};
use ndarray::{
    ArrayBase, ArrayView4, ArrayViewMut4, Data, DataMut, Ix4, OwnedRepr, RawData, ViewRepr,
};
use slog::{Logger, debug, o};

/// Hansel — dense co-occurrence counts with label-aware accessors.
///
/// Purpose
/// -------
/// Own the symbol index, the position index, and the count tensor
/// `H[a, b, i, j]`, and route every accessor through the two index mappings.
///
/// Type Parameters
/// ---------------
/// - `S`: symbol label (`Eq + Hash + Clone + Debug`), e.g. `char` or `String`.
/// - `P`: position label (`Ord + Hash + Clone + Debug`), e.g. `u64`.
/// - `D`: tensor storage. Defaults to owned storage; [`HanselView`] names
///   the borrowed variant.
///
/// Fields
/// ------
/// - `symbols`: [`SymbolIndex<S>`]
/// - `positions`: [`PositionIndex<P>`]
/// - `counts`: [`CountTensor<D>`] of shape `[S, S, n + 2, n + 2]`.
/// - `lookback`: [`Lookback`] consulted by edge weighting.
/// - `prune_below`: optional floor applied when evidence is spent.
/// - `logger`: child logger carrying the tensor dimensions.
/// - `observations`: number of successful `add_observation` calls.
/// - `weighted`: whether any reweight has been applied.
///
/// Performance
/// -----------
/// - Label resolution is O(1); cell access is O(1); derived quantities are
///   O(S²·n) at most (counts-at) and O(S²·L) for edge weights.
pub struct Hansel<S, P, D = OwnedRepr<f64>>
where
    S: SymbolLabel,
    P: PositionLabel,
    D: RawData<Elem = f64>,
{
    pub(crate) symbols: SymbolIndex<S>,
    pub(crate) positions: PositionIndex<P>,
    pub(crate) counts: CountTensor<D>,
    pub(crate) lookback: Lookback,
    prune_below: Option<f64>,
    pub(crate) logger: Logger,
    observations: u64,
    weighted: bool,
}

/// A [`Hansel`] over caller-owned, mutably borrowed storage.
pub type HanselView<'a, S, P> = Hansel<S, P, ViewRepr<&'a mut f64>>;

impl<S: SymbolLabel, P: PositionLabel> Hansel<S, P> {
    /// Build the indices and allocate a zero-filled count tensor.
    ///
    /// Parameters
    /// ----------
    /// - `alphabet`: `Vec<S>`
    ///   Ordered, unique symbol labels; dense codes follow this order.
    /// - `unsymbols`: `&[S]`
    ///   Labels to exclude from weighting; each must be in `alphabet`.
    /// - `positions`: `Vec<P>`
    ///   Strictly increasing position labels.
    /// - `options`: [`HanselOptions`]
    ///   Lookback order, pruning floor, and logger.
    ///
    /// Errors
    /// ------
    /// - `HanselError::Configuration`
    ///   Empty/duplicated alphabet, unsymbol outside the alphabet, empty /
    ///   non-increasing positions, a zero lookback order, or a negative /
    ///   non-finite pruning floor (however the options were built).
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use hansel::evidence::{Hansel, HanselOptions};
    /// let hansel = Hansel::new(
    ///     vec!['A', 'C', 'G', 'T', '_'],
    ///     &['_'],
    ///     vec![1_u64, 3, 5],
    ///     HanselOptions::new(Some(2)).unwrap(),
    /// )
    /// .unwrap();
    /// assert_eq!(hansel.shape().dims(), [5, 5, 5, 5]);
    /// ```
    pub fn new(
        alphabet: Vec<S>, unsymbols: &[S], positions: Vec<P>, options: HanselOptions,
    ) -> HanselResult<Self> {
        let symbols = SymbolIndex::new(alphabet, unsymbols)?;
        let positions = PositionIndex::new(positions)?;
        let counts = CountTensor::zeros(TensorShape::of(&symbols, &positions));
        Hansel::assemble(symbols, positions, counts, options)
    }
}

impl<S, P, D> Hansel<S, P, D>
where
    S: SymbolLabel,
    P: PositionLabel,
    D: Data<Elem = f64>,
{
    /// Build the indices over caller-supplied count storage.
    ///
    /// Parameters
    /// ----------
    /// - `alphabet`, `unsymbols`, `positions`, `options`
    ///   As for [`Hansel::new`].
    /// - `counts`: `ArrayBase<D, Ix4>`
    ///   Storage of shape exactly `[S, S, n + 2, n + 2]` holding finite,
    ///   non-negative values. Pass an owned `Array4<f64>` to hand the memory
    ///   over, or `array.view_mut()` to keep ownership with the caller.
    ///
    /// Errors
    /// ------
    /// - `HanselError::Configuration`
    ///   Bad alphabet/unsymbols/positions, or storage holding a negative or
    ///   non-finite entry.
    /// - `HanselError::ShapeMismatch`
    ///   Storage dimensions disagree with the derived shape.
    ///
    /// Notes
    /// -----
    /// - Existing values are kept as-is; they count as evidence immediately
    ///   but are not reflected in [`Hansel::observations`].
    pub fn with_counts(
        alphabet: Vec<S>, unsymbols: &[S], positions: Vec<P>, counts: ArrayBase<D, Ix4>,
        options: HanselOptions,
    ) -> HanselResult<Self> {
        let symbols = SymbolIndex::new(alphabet, unsymbols)?;
        let positions = PositionIndex::new(positions)?;
        let counts = CountTensor::from_storage(counts, TensorShape::of(&symbols, &positions))?;
        Hansel::assemble(symbols, positions, counts, options)
    }

    fn assemble(
        symbols: SymbolIndex<S>, positions: PositionIndex<P>, counts: CountTensor<D>,
        options: HanselOptions,
    ) -> HanselResult<Self> {
        validate_lookback(options.lookback.order())?;
        if let Some(floor) = options.prune_below {
            validate_prune_floor(floor)?;
        }
        let logger = options
            .logger
            .new(o!("symbols" => symbols.len(), "positions" => positions.len()));
        debug!(logger, "evidence tensor ready";
            "dims" => format!("{:?}", counts.shape().dims()),
            "unsymbols" => symbols.unsymbols().count(),
            "lookback" => format!("{:?}", options.lookback));
        Ok(Hansel {
            symbols,
            positions,
            counts,
            lookback: options.lookback,
            prune_below: options.prune_below,
            logger,
            observations: 0,
            weighted: false,
        })
    }

    pub fn symbols(&self) -> &SymbolIndex<S> {
        &self.symbols
    }

    pub fn positions(&self) -> &PositionIndex<P> {
        &self.positions
    }

    pub fn shape(&self) -> TensorShape {
        self.counts.shape()
    }

    pub fn lookback(&self) -> Lookback {
        self.lookback
    }

    /// Number of `add_observation` calls recorded so far.
    pub fn observations(&self) -> u64 {
        self.observations
    }

    /// Whether any evidence has been spent by `reweight_observation`.
    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Read-only view of the raw `[S, S, n + 2, n + 2]` storage.
    pub fn counts(&self) -> ArrayView4<'_, f64> {
        self.counts.view()
    }

    /// Give back the storage, dropping the indices.
    pub fn into_counts(self) -> ArrayBase<D, Ix4> {
        self.counts.into_inner()
    }

    /// Resolve four labels into a dense tensor cell.
    pub(crate) fn cell(
        &self, a: &S, b: &S, i: &Site<P>, j: &Site<P>,
    ) -> HanselResult<[usize; 4]> {
        Ok([
            self.symbols.code(a)?,
            self.symbols.code(b)?,
            self.positions.code(i)?,
            self.positions.code(j)?,
        ])
    }

    /// `H[a, b, i, j]`: evidence with `a` at `i` and `b` at `j` on the same piece.
    ///
    /// Errors
    /// ------
    /// - `HanselError::UnknownSymbol` / `HanselError::UnknownPosition` for
    ///   unregistered labels. Unsymbols are valid here.
    pub fn get_observation(
        &self, a: &S, b: &S, i: impl Into<Site<P>>, j: impl Into<Site<P>>,
    ) -> HanselResult<f64> {
        let cell = self.cell(a, b, &i.into(), &j.into())?;
        Ok(self.counts.get(cell))
    }
}

impl<S, P, D> Hansel<S, P, D>
where
    S: SymbolLabel,
    P: PositionLabel,
    D: DataMut<Elem = f64>,
{
    /// Record one piece of evidence: `H[a, b, i, j] += 1`.
    ///
    /// Errors
    /// ------
    /// - `HanselError::UnknownSymbol` / `HanselError::UnknownPosition` for
    ///   unregistered labels. Unsymbols may be recorded.
    ///
    /// Notes
    /// -----
    /// - No ordering is enforced between `i` and `j`; callers conventionally
    ///   pass the earlier position first.
    pub fn add_observation(
        &mut self, a: &S, b: &S, i: impl Into<Site<P>>, j: impl Into<Site<P>>,
    ) -> HanselResult<()> {
        let cell = self.cell(a, b, &i.into(), &j.into())?;
        self.counts.increment(cell);
        self.observations += 1;
        Ok(())
    }

    /// Spend a fraction of the evidence for one pair:
    /// `H[a, b, i, j] ← H[a, b, i, j] − H[a, b, i, j] · ratio`.
    ///
    /// Parameters
    /// ----------
    /// - `ratio`: `f64`
    ///   Fraction in `[0, 1]`. `0` leaves the cell untouched; `1` zeroes it.
    ///
    /// Errors
    /// ------
    /// - `HanselError::InvalidRatio` when `ratio` is outside `[0, 1]`.
    /// - `HanselError::UnknownSymbol` / `HanselError::UnknownPosition` for
    ///   unregistered labels.
    ///
    /// Notes
    /// -----
    /// - With a pruning floor configured and `ratio > 0`, a result below the
    ///   floor is set to exactly zero.
    /// - The update is applied in place and is visible to the next read.
    pub fn reweight_observation(
        &mut self, a: &S, b: &S, i: impl Into<Site<P>>, j: impl Into<Site<P>>, ratio: f64,
    ) -> HanselResult<()> {
        validate_ratio(ratio)?;
        let (i, j) = (i.into(), j.into());
        let cell = self.cell(a, b, &i, &j)?;

        let old = self.counts.get(cell);
        let mut new = old - old * ratio;
        if ratio > 0.0 && self.prune_below.is_some_and(|floor| new < floor) {
            new = 0.0;
        }
        if old != 0.0 {
            debug!(self.logger, "reducing support";
                "from" => format!("{i:?}({a:?})"),
                "to" => format!("{j:?}({b:?})"),
                "ratio" => ratio,
                "old" => old,
                "new" => new);
        }
        self.counts.set(cell, new);
        self.weighted = true;
        Ok(())
    }

    /// Mutable view of the raw storage for bulk external population.
    ///
    /// Writers must keep every entry finite and ≥ 0.
    pub fn counts_mut(&mut self) -> ArrayViewMut4<'_, f64> {
        self.counts.view_mut()
    }
}

impl<S, P, D> std::fmt::Debug for Hansel<S, P, D>
where
    S: SymbolLabel,
    P: PositionLabel,
    D: Data<Elem = f64>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hansel")
            .field("symbols", &self.symbols.labels())
            .field("positions", &self.positions.labels())
            .field("counts", &self.counts)
            .field("lookback", &self.lookback)
            .field("observations", &self.observations)
            .field("weighted", &self.weighted)
            .finish()
    }
}
