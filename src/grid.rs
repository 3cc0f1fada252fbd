use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Ix;

pub(crate) type Coord = usize;

/// One side of a stage grid, in cells.
pub type Dimension = NonZero<Coord>;

/// A cell `(row, col)` on the stage grid. The top left corner is `CellPosition(0, 0)`.
///
/// Positions compare by row first and column second, which is the canonical
/// reading order used everywhere a deterministic iteration order is needed.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CellPosition(pub Coord, pub Coord);

impl CellPosition {
    /// The row of this position, counted from the top edge.
    pub fn row(&self) -> Coord {
        self.0
    }

    /// The column of this position, counted from the left edge.
    pub fn col(&self) -> Coord {
        self.1
    }

    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.0, self.1)
    }
}

impl From<(Ix, Ix)> for CellPosition {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.0, value.1)
    }
}

impl Display for CellPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// Positions whose values the player can never rearrange.
///
/// Fixed cells are excluded from shuffling, solving and hinting; they exist
/// only so a layout can carry static scaffolding such as grid corners.
pub type FixedPositions = HashSet<CellPosition>;

/// Values listed in canonical position order.
///
/// Index `i` of a shuffled sequence refers to the same grid position as index
/// `i` of the target sequence. Duplicate values are legitimate; two cells may
/// hold the identical word fragment.
pub type ValueSequence = Vec<String>;

/// A mapping from grid positions to the word fragment(s) displayed there.
///
/// A cell may hold more than one string (e.g. a two-line fixed cell), but
/// every movable cell holds exactly one value for swap purposes. The
/// arrangement a game session manipulates contains movable cells only.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Arrangement {
    cells: HashMap<CellPosition, Vec<String>>,
}

impl Arrangement {
    /// An arrangement with no cells.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of populated positions.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no position holds a value.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `position` holds any value.
    pub fn contains(&self, position: CellPosition) -> bool {
        self.cells.contains_key(&position)
    }

    /// The value(s) at `position`, or [`None`] if the cell is unpopulated.
    pub fn values_at(&self, position: CellPosition) -> Option<&[String]> {
        self.cells.get(&position).map(Vec::as_slice)
    }

    /// Replace the value list at `position`.
    pub fn set(&mut self, position: CellPosition, values: Vec<String>) {
        self.cells.insert(position, values);
    }

    /// Replace the cell at `position` with a single value, as movable cells hold.
    pub fn set_one(&mut self, position: CellPosition, value: impl Into<String>) {
        self.cells.insert(position, vec![value.into()]);
    }

    /// Exchange the value lists at `a` and `b` in place.
    ///
    /// An unpopulated side is treated as empty: its partner's values move over
    /// and it leaves the other cell unpopulated.
    pub fn swap(&mut self, a: CellPosition, b: CellPosition) {
        if a == b {
            return;
        }
        let at_a = self.cells.remove(&a);
        let at_b = self.cells.remove(&b);
        if let Some(values) = at_a {
            self.cells.insert(b, values);
        }
        if let Some(values) = at_b {
            self.cells.insert(a, values);
        }
    }

    /// Every populated position, in arbitrary order.
    pub fn positions(&self) -> impl Iterator<Item = CellPosition> + '_ {
        self.cells.keys().copied()
    }

    /// Whether this arrangement agrees with `target` at `position`.
    ///
    /// A position this arrangement holds no value for is vacuously correct;
    /// not-yet-populated cells cannot be wrong.
    pub fn matches_at(&self, target: &Arrangement, position: CellPosition) -> bool {
        match self.values_at(position) {
            None => true,
            Some(values) => target.values_at(position) == Some(values),
        }
    }
}

impl FromIterator<(CellPosition, Vec<String>)> for Arrangement {
    fn from_iter<T: IntoIterator<Item = (CellPosition, Vec<String>)>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
