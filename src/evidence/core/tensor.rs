//! Count tensor — dense `[S, S, slots, slots]` evidence storage.
//!
//! Purpose
//! -------
//! Hold the accumulated co-occurrence evidence `H[a, b, i, j]` behind one
//! addressing scheme, whether the memory is owned by the tensor or borrowed
//! from a caller (for example, a buffer several producers filled before the
//! structure was built).
//!
//! Key behaviors
//! -------------
//! - [`CountTensor::zeros`] allocates and zero-fills owned storage.
//! - [`CountTensor::from_storage`] adopts any 4-D `ndarray` storage (owned
//!   `Array4<f64>` or borrowed `ArrayViewMut4<'_, f64>`) after checking its
//!   shape and contents.
//! - Cells are addressed by dense codes `[a, b, i, j]`; reads need only
//!   `Data`, writes need `DataMut`.
//! - Reduction helpers sum over the source- or destination-symbol axis for a
//!   fixed pair of slots, restricted to a caller-chosen set of symbol codes.
//!
//! Invariants & assumptions
//! ------------------------
//! - The shape is fixed at construction; the tensor never reshapes or
//!   reallocates.
//! - Every entry is finite and ≥ 0. Construction checks this; [`CountTensor::set`]
//!   clamps at zero; external writers through a raw view must preserve it.
//!
//! Conventions
//! -----------
//! - Axis order: source symbol, destination symbol, source slot,
//!   destination slot. `H[a, b, i, j]` and `H[b, a, j, i]` are distinct cells.
//! - The tensor knows nothing about labels; label resolution lives in the
//!   symbol and position indices.
//!
//! Performance
//! -----------
//! - `ndarray` provides stride-based 4-index addressing; single-cell reads
//!   and writes are O(1), reductions are O(S) per slot pair.
use crate::evidence::{
    core::{shape::TensorShape, validation::validate_counts},
    errors::HanselResult,
};
use ndarray::{
    Array4, ArrayBase, ArrayView4, ArrayViewMut4, Data, DataMut, Ix4, OwnedRepr, RawData, s,
};

/// CountTensor — evidence counts over owned or borrowed 4-D storage.
///
/// Type Parameters
/// ---------------
/// - `D`: `ndarray` storage. `OwnedRepr<f64>` when the tensor allocates,
///   `ViewRepr<&'a mut f64>` when it borrows caller memory.
pub struct CountTensor<D: RawData<Elem = f64>> {
    data: ArrayBase<D, Ix4>,
    shape: TensorShape,
}

impl<D: Data<Elem = f64>> std::fmt::Debug for CountTensor<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountTensor")
            .field("shape", &self.shape)
            .field("total", &self.data.sum())
            .finish()
    }
}

impl CountTensor<OwnedRepr<f64>> {
    /// Allocate a zero-filled tensor of the given shape.
    pub fn zeros(shape: TensorShape) -> Self {
        let [s0, s1, p0, p1] = shape.dims();
        CountTensor { data: Array4::zeros((s0, s1, p0, p1)), shape }
    }
}

impl<D: Data<Elem = f64>> CountTensor<D> {
    /// Adopt caller-supplied storage.
    ///
    /// Errors
    /// ------
    /// - `HanselError::ShapeMismatch` when `data.shape() != shape.dims()`.
    /// - `HanselError::Configuration` when any entry is negative or
    ///   non-finite.
    pub fn from_storage(data: ArrayBase<D, Ix4>, shape: TensorShape) -> HanselResult<Self> {
        validate_counts(&data, shape.dims())?;
        Ok(CountTensor { data, shape })
    }

    pub fn shape(&self) -> TensorShape {
        self.shape
    }

    /// Value of cell `[a, b, i, j]`.
    #[inline]
    pub fn get(&self, cell: [usize; 4]) -> f64 {
        self.data[cell]
    }

    /// `Σ_{a ∈ sources} H[a, b, i, j]`.
    pub fn sum_sources<I>(&self, sources: I, b: usize, i: usize, j: usize) -> f64
    where
        I: IntoIterator<Item = usize>,
    {
        let column = self.data.slice(s![.., b, i, j]);
        sources.into_iter().map(|a| column[a]).sum()
    }

    /// `Σ_{b ∈ destinations} H[a, b, i, j]`.
    pub fn sum_destinations<I>(&self, a: usize, destinations: I, i: usize, j: usize) -> f64
    where
        I: IntoIterator<Item = usize>,
    {
        let row = self.data.slice(s![a, .., i, j]);
        destinations.into_iter().map(|b| row[b]).sum()
    }

    /// `Σ_{i ≠ j} H[a, b, i, j]`: evidence for `(a, b)` arriving at `j` from
    /// any other slot.
    pub fn sum_into(&self, a: usize, b: usize, j: usize) -> f64 {
        let lane = self.data.slice(s![a, b, .., j]);
        lane.slice(s![..j]).sum() + lane.slice(s![j + 1..]).sum()
    }

    /// Read-only view of the full storage.
    pub fn view(&self) -> ArrayView4<'_, f64> {
        self.data.view()
    }

    /// Give back the underlying storage.
    pub fn into_inner(self) -> ArrayBase<D, Ix4> {
        self.data
    }
}

impl<D: DataMut<Elem = f64>> CountTensor<D> {
    /// Add one to cell `[a, b, i, j]`.
    #[inline]
    pub fn increment(&mut self, cell: [usize; 4]) {
        self.data[cell] += 1.0;
    }

    /// Overwrite cell `[a, b, i, j]`, clamping negative values to zero.
    #[inline]
    pub fn set(&mut self, cell: [usize; 4], value: f64) {
        self.data[cell] = value.max(0.0);
    }

    /// Mutable view of the full storage for bulk external population.
    pub fn view_mut(&mut self) -> ArrayViewMut4<'_, f64> {
        self.data.view_mut()
    }
}
