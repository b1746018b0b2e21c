//! Tensor shape descriptor derived from the two indices.
use crate::evidence::core::{
    positions::{PositionIndex, PositionLabel},
    symbols::{SymbolIndex, SymbolLabel},
};

/// TensorShape — alphabet size and position-slot count of the count tensor.
///
/// Fields
/// ------
/// - `symbols`: `usize`
///   Alphabet size `S`, unsymbols included.
/// - `slots`: `usize`
///   Number of position slots, i.e. registered positions plus the two
///   sentinels.
///
/// The tensor is laid out as `[S, S, slots, slots]` in that axis order:
/// source symbol, destination symbol, source slot, destination slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TensorShape {
    pub symbols: usize,
    pub slots: usize,
}

impl TensorShape {
    pub fn new(symbols: usize, slots: usize) -> TensorShape {
        TensorShape { symbols, slots }
    }

    /// Shape implied by a pair of indices.
    pub fn of<S: SymbolLabel, P: PositionLabel>(
        symbols: &SymbolIndex<S>, positions: &PositionIndex<P>,
    ) -> TensorShape {
        TensorShape::new(symbols.len(), positions.slots())
    }

    /// `[S, S, slots, slots]`.
    pub fn dims(&self) -> [usize; 4] {
        [self.symbols, self.symbols, self.slots, self.slots]
    }

    /// Total number of cells.
    pub fn cells(&self) -> usize {
        self.dims().iter().product()
    }
}
