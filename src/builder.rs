use std::num::NonZero;
use std::ops::IndexMut;

use itertools::Itertools;
use ndarray::{Array2, AssignElem};

use crate::grid::{Arrangement, CellPosition, Dimension};
use crate::stage::Stage;

/// Reasons a [`StageBuilder`] may become invalid while building.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LayoutInvalidReason {
    /// A cell was declared outside the bounds specified by `dims` on a builder.
    CellOutOfBounds,
    /// The same position was declared more than once.
    CellRedeclared,
    /// A fixed cell was declared with no display values.
    EmptyFixedCell,
    /// A category names a position that is not a movable cell of this layout.
    UnknownCategoryPosition,
}

#[derive(Clone, Debug, Default)]
enum LayoutCell {
    #[default]
    Hole,
    Movable {
        value: String,
    },
    Fixed {
        values: Vec<String>,
    },
}

/// A builder for [`Stage`] layouts: the hidden target arrangement, the fixed
/// scaffolding cells, and the category partition hints operate on.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save
/// their state at some point. Positions left undeclared are holes; a stage
/// need not use every slot of its bounding grid.
#[derive(Clone)]
pub struct StageBuilder {
    // rows, columns
    dims: (Dimension, Dimension),
    cells: Array2<LayoutCell>,
    categories: Option<Vec<Vec<CellPosition>>>,
    invalid_reasons: Vec<LayoutInvalidReason>,
}

impl Default for StageBuilder {
    fn default() -> Self {
        Self::with_dims((NonZero::new(5).unwrap(), NonZero::new(5).unwrap()))
    }
}

impl StageBuilder {
    /// Construct a new builder for a grid with the specified dimensions,
    /// specified in `(rows, columns)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            cells: Array2::from_shape_simple_fn((dims.0.get(), dims.1.get()), LayoutCell::default),
            categories: None,
            invalid_reasons: Vec::new(),
        }
    }

    #[inline]
    fn in_bounds(&self, position: CellPosition) -> bool {
        position.row() < self.dims.0.get() && position.col() < self.dims.1.get()
    }

    /// Declare the target value of the movable cell at `position`.
    ///
    /// May cause the builder to enter a
    /// [`CellOutOfBounds`](LayoutInvalidReason::CellOutOfBounds) or
    /// [`CellRedeclared`](LayoutInvalidReason::CellRedeclared) invalid state.
    /// If the builder is already in an invalid state, this function does
    /// nothing.
    pub fn set_value(&mut self, position: CellPosition, value: impl Into<String>) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !self.in_bounds(position) {
            self.invalid_reasons.push(LayoutInvalidReason::CellOutOfBounds);
            return self;
        }

        let cell = self.cells.index_mut(position.as_index());
        if !matches!(cell, LayoutCell::Hole) {
            self.invalid_reasons.push(LayoutInvalidReason::CellRedeclared);
            return self;
        }
        cell.assign_elem(LayoutCell::Movable { value: value.into() });

        self
    }

    /// Declare a fixed cell at `position` displaying `values` (possibly more
    /// than one line). Fixed cells are never shuffled, solved or hinted.
    ///
    /// May cause the builder to enter a
    /// [`CellOutOfBounds`](LayoutInvalidReason::CellOutOfBounds),
    /// [`CellRedeclared`](LayoutInvalidReason::CellRedeclared) or
    /// [`EmptyFixedCell`](LayoutInvalidReason::EmptyFixedCell) invalid state.
    /// If the builder is already in an invalid state, this function does
    /// nothing.
    pub fn set_fixed(&mut self, position: CellPosition, values: Vec<String>) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !self.in_bounds(position) {
            self.invalid_reasons.push(LayoutInvalidReason::CellOutOfBounds);
            return self;
        }
        if values.is_empty() {
            self.invalid_reasons.push(LayoutInvalidReason::EmptyFixedCell);
            return self;
        }

        let cell = self.cells.index_mut(position.as_index());
        if !matches!(cell, LayoutCell::Hole) {
            self.invalid_reasons.push(LayoutInvalidReason::CellRedeclared);
            return self;
        }
        cell.assign_elem(LayoutCell::Fixed { values });

        self
    }

    /// Override the default category partition (one category per grid column)
    /// with an explicit one.
    ///
    /// Declare cells before calling this: every named position must already
    /// be a movable cell, otherwise the builder enters an
    /// [`UnknownCategoryPosition`](LayoutInvalidReason::UnknownCategoryPosition)
    /// invalid state. If the builder is already in an invalid state, this
    /// function does nothing.
    pub fn with_categories(&mut self, categories: Vec<Vec<CellPosition>>) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        for &position in categories.iter().flatten() {
            let known = self.in_bounds(position)
                && matches!(&self.cells[position.as_index()], LayoutCell::Movable { .. });
            if !known {
                self.invalid_reasons
                    .push(LayoutInvalidReason::UnknownCategoryPosition);
                return self;
            }
        }
        self.categories = Some(categories);

        self
    }

    /// Check the validity of this builder, ensuring no [`LayoutInvalidReason`]
    /// condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<LayoutInvalidReason>)`
    /// otherwise.
    pub fn is_valid(&self) -> Option<&Vec<LayoutInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Stage`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of
    /// [`LayoutInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Stage, &Vec<LayoutInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        let mut target = Arrangement::new();
        let mut fixed = Arrangement::new();
        let mut order = Vec::new();
        // indexed_iter is row-major, so order comes out in reading order
        for (index, cell) in self.cells.indexed_iter() {
            let position = CellPosition::from(index);
            match cell {
                LayoutCell::Hole => {}
                LayoutCell::Movable { value } => {
                    order.push(position);
                    target.set_one(position, value.clone());
                }
                LayoutCell::Fixed { values } => {
                    fixed.set(position, values.clone());
                }
            }
        }

        let categories = match &self.categories {
            Some(explicit) => explicit.clone(),
            None => (0..self.dims.1.get())
                .map(|col| {
                    order
                        .iter()
                        .copied()
                        .filter(|position| position.col() == col)
                        .collect_vec()
                })
                .filter(|column: &Vec<CellPosition>| !column.is_empty())
                .collect_vec(),
        };

        Ok(Stage::new(self.dims, target, fixed, order, categories))
    }
}
