//! Occupancy index over grid cells.

use blockwright_core::GridCell;
use hashbrown::HashSet;

/// Set of grid cells covered by a block.
///
/// No two blocks may share a cell. Adding an occupied cell is a caller bug:
/// it trips a debug assertion and is otherwise ignored.
#[derive(Debug, Default, Clone)]
pub struct OccupancyIndex {
    cells: HashSet<GridCell>,
}

impl OccupancyIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if a block covers `cell`.
    #[inline]
    #[must_use]
    pub fn is_occupied(&self, cell: GridCell) -> bool {
        self.cells.contains(&cell)
    }

    /// Mark `cell` as occupied.
    pub fn add(&mut self, cell: GridCell) {
        let inserted = self.cells.insert(cell);
        debug_assert!(inserted, "cell {cell} is already occupied");
    }

    /// Free `cell`. Returns `true` if it was occupied.
    pub fn remove(&mut self, cell: GridCell) -> bool {
        self.cells.remove(&cell)
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if no cell is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate occupied cells in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.cells.iter().copied()
    }
}
