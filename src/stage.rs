use std::fmt::{Display, Formatter};

use rand::Rng;

use crate::grid::{Arrangement, CellPosition, Dimension, FixedPositions, ValueSequence};
use crate::shuffle::derange;

/// A stage layout as loaded from level content: the hidden target
/// arrangement, the fixed scaffolding cells, the canonical order of movable
/// cells and the category partition hints operate on.
///
/// Built with a [`StageBuilder`](crate::StageBuilder). The stage itself is
/// immutable; gameplay mutates an [`Arrangement`] obtained from
/// [`shuffled_start`](Stage::shuffled_start).
#[derive(Debug)]
pub struct Stage {
    // rows, columns
    dims: (Dimension, Dimension),
    target: Arrangement,
    fixed: Arrangement,
    order: Vec<CellPosition>,
    categories: Vec<Vec<CellPosition>>,
}

impl Stage {
    pub(crate) fn new(
        dims: (Dimension, Dimension),
        target: Arrangement,
        fixed: Arrangement,
        order: Vec<CellPosition>,
        categories: Vec<Vec<CellPosition>>,
    ) -> Self {
        Self {
            dims,
            target,
            fixed,
            order,
            categories,
        }
    }

    /// The grid dimensions in `(rows, columns)` order.
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// The target arrangement of the movable cells.
    pub fn target(&self) -> &Arrangement {
        &self.target
    }

    /// The fixed cells and their display values.
    pub fn fixed(&self) -> &Arrangement {
        &self.fixed
    }

    /// The set of positions excluded from shuffling, solving and hinting.
    pub fn fixed_positions(&self) -> FixedPositions {
        self.fixed.positions().collect()
    }

    /// The movable cells in canonical (reading) order. Index `i` of any
    /// [`ValueSequence`] for this stage refers to `order()[i]`.
    pub fn order(&self) -> &[CellPosition] {
        &self.order
    }

    /// The category partition of the movable cells; one category per grid
    /// column unless the builder was given an explicit partition.
    pub fn categories(&self) -> &[Vec<CellPosition>] {
        &self.categories
    }

    /// The target values in canonical order.
    pub fn target_sequence(&self) -> ValueSequence {
        self.sequence_of(&self.target)
    }

    /// The values of `current` in canonical order, for handing to the solver
    /// alongside [`target_sequence`](Stage::target_sequence).
    ///
    /// A movable cell `current` holds no value for contributes an empty
    /// string, keeping the sequence aligned with the canonical order.
    pub fn current_sequence(&self, current: &Arrangement) -> ValueSequence {
        self.sequence_of(current)
    }

    fn sequence_of(&self, arrangement: &Arrangement) -> ValueSequence {
        self.order
            .iter()
            .map(|&position| {
                arrangement
                    .values_at(position)
                    .and_then(|values| values.first())
                    .cloned()
                    .unwrap_or_default()
            })
            .collect()
    }

    /// A shuffled-but-solvable starting arrangement: the target values,
    /// derangement-shuffled and laid back onto the movable cells.
    pub fn shuffled_start<R: Rng + ?Sized>(&self, rng: &mut R) -> Arrangement {
        let shuffled = derange(&self.target_sequence(), rng);
        self.order
            .iter()
            .copied()
            .zip(shuffled)
            .map(|(position, value)| (position, vec![value]))
            .collect()
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.dims.0.get() {
            for col in 0..self.dims.1.get() {
                if col > 0 {
                    write!(f, " ")?;
                }
                let position = CellPosition(row, col);
                let cell = self
                    .target
                    .values_at(position)
                    .or_else(|| self.fixed.values_at(position));
                match cell {
                    Some(values) => write!(f, "{}", values.join("|"))?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
