//! Block and selection store.

use blockwright_core::{BlockId, ColorIndex, GridCell};
use glam::Vec3;
use hashbrown::HashSet;
use tracing::{debug, info};

use crate::occupancy::OccupancyIndex;

/// A placed unit cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub id: BlockId,
    pub cell: GridCell,
    pub color: ColorIndex,
}

/// Ordered collection of placed blocks plus the selected subset.
///
/// Every insert and removal updates the occupancy index in the same call, so
/// `occupancy == { b.cell for b in blocks }` holds between operations.
/// Selected ids always refer to live blocks.
#[derive(Debug, Default)]
pub struct BlockStore {
    /// Blocks in placement order. Ids increase monotonically, so this is
    /// also sorted by id.
    blocks: Vec<Block>,
    occupancy: OccupancyIndex,
    selection: HashSet<BlockId>,
    next_id: u64,
}

impl BlockStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a block in `cell`.
    ///
    /// Returns `None` without changing anything if the cell is occupied.
    pub fn place(&mut self, cell: GridCell, color: ColorIndex) -> Option<BlockId> {
        if self.occupancy.is_occupied(cell) {
            debug!(%cell, "place rejected: cell occupied");
            return None;
        }

        let id = BlockId(self.next_id);
        self.next_id += 1;
        self.blocks.push(Block { id, cell, color });
        self.occupancy.add(cell);
        info!(%id, %cell, color = color.0, "block placed");
        Some(id)
    }

    /// Delete a block, freeing its cell and dropping it from the selection.
    ///
    /// Unknown ids are ignored.
    pub fn delete(&mut self, id: BlockId) -> Option<Block> {
        let index = self.position(id)?;
        let block = self.blocks.remove(index);
        self.occupancy.remove(block.cell);
        self.selection.remove(&id);
        info!(%id, cell = %block.cell, "block deleted");
        Some(block)
    }

    /// Flip selection membership of a block.
    ///
    /// Returns the new membership, or `None` for unknown ids.
    pub fn toggle_select(&mut self, id: BlockId) -> Option<bool> {
        self.position(id)?;
        let selected = if self.selection.remove(&id) {
            false
        } else {
            self.selection.insert(id);
            true
        };
        debug!(%id, selected, "selection toggled");
        Some(selected)
    }

    /// Deselect everything, returning the ids that were selected (sorted).
    pub fn clear_selection(&mut self) -> Vec<BlockId> {
        let mut cleared: Vec<BlockId> = self.selection.drain().collect();
        cleared.sort_unstable();
        cleared
    }

    /// Delete every selected block, returning them in id order.
    pub fn delete_selected(&mut self) -> Vec<Block> {
        let snapshot = self.clear_selection();
        let deleted: Vec<Block> = snapshot.into_iter().filter_map(|id| self.delete(id)).collect();
        info!(count = deleted.len(), "selection deleted");
        deleted
    }

    /// Look up a block by id.
    #[must_use]
    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.position(id).map(|index| &self.blocks[index])
    }

    /// Block occupying `cell`, if any.
    #[must_use]
    pub fn block_at(&self, cell: GridCell) -> Option<&Block> {
        if !self.occupancy.is_occupied(cell) {
            return None;
        }
        self.blocks.iter().find(|b| b.cell == cell)
    }

    /// Blocks in placement order.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of placed blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if no block is placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Returns `true` if the block is selected.
    #[must_use]
    pub fn is_selected(&self, id: BlockId) -> bool {
        self.selection.contains(&id)
    }

    /// Selected ids in unspecified order.
    pub fn selection(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.selection.iter().copied()
    }

    /// Number of selected blocks.
    #[must_use]
    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    /// Occupancy index backing this store.
    #[must_use]
    pub const fn occupancy(&self) -> &OccupancyIndex {
        &self.occupancy
    }

    /// Mean of all block centres, or `None` when the store is empty.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn centroid(&self) -> Option<Vec3> {
        if self.blocks.is_empty() {
            return None;
        }
        let sum: Vec3 = self.blocks.iter().map(|b| b.cell.center()).sum();
        Some(sum / self.blocks.len() as f32)
    }

    fn position(&self, id: BlockId) -> Option<usize> {
        self.blocks.binary_search_by_key(&id, |b| b.id).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_occupancy_matches(store: &BlockStore) {
        let mut from_blocks: Vec<GridCell> = store.blocks().iter().map(|b| b.cell).collect();
        let mut from_index: Vec<GridCell> = store.occupancy().iter().collect();
        let key = |c: &GridCell| (c.x, c.y, c.z);
        from_blocks.sort_by_key(key);
        from_index.sort_by_key(key);
        assert_eq!(from_blocks, from_index);
    }

    #[test]
    fn place_and_delete() {
        let mut store = BlockStore::new();
        let id = store.place(GridCell::ORIGIN, ColorIndex(2)).unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.occupancy().is_occupied(GridCell::ORIGIN));
        assert_eq!(store.get(id).unwrap().color, ColorIndex(2));
        assert_eq!(store.block_at(GridCell::ORIGIN).unwrap().id, id);

        let block = store.delete(id).unwrap();
        assert_eq!(block.cell, GridCell::ORIGIN);
        assert!(store.is_empty());
        assert!(!store.occupancy().is_occupied(GridCell::ORIGIN));
    }

    #[test]
    fn place_on_occupied_cell_is_noop() {
        let mut store = BlockStore::new();
        store.place(GridCell::ORIGIN, ColorIndex(0)).unwrap();
        assert!(store.place(GridCell::ORIGIN, ColorIndex(1)).is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.blocks()[0].color, ColorIndex(0));
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let mut store = BlockStore::new();
        store.place(GridCell::ORIGIN, ColorIndex(0)).unwrap();
        assert!(store.delete(BlockId(99)).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn ids_are_not_reused() {
        let mut store = BlockStore::new();
        let a = store.place(GridCell::ORIGIN, ColorIndex(0)).unwrap();
        store.delete(a);
        let b = store.place(GridCell::ORIGIN, ColorIndex(0)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn occupancy_invariant_holds_across_operations() {
        let mut store = BlockStore::new();
        let mut ids = Vec::new();

        // Deterministic pseudo-random walk over a small grid so cells collide.
        let mut seed: u32 = 0x2545_F491;
        for step in 0..400 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let coord = |shift: u32| ((seed >> shift) % 4) as i32 - 2;
            let cell = GridCell::new(coord(0), coord(8), coord(16));

            if step % 3 == 2 && !ids.is_empty() {
                let id = ids.remove((seed as usize) % ids.len());
                store.delete(id);
            } else if let Some(id) = store.place(cell, ColorIndex(0)) {
                ids.push(id);
            }
            if step % 7 == 0 {
                if let Some(&id) = ids.first() {
                    store.toggle_select(id);
                }
            }
            if step % 50 == 49 {
                let deleted = store.delete_selected();
                ids.retain(|id| !deleted.iter().any(|b| b.id == *id));
            }

            assert_occupancy_matches(&store);
            assert_eq!(store.len(), ids.len());
            assert!(store.selection().all(|id| store.get(id).is_some()));
        }
    }

    #[test]
    fn delete_purges_selection() {
        let mut store = BlockStore::new();
        let id = store.place(GridCell::ORIGIN, ColorIndex(0)).unwrap();
        assert_eq!(store.toggle_select(id), Some(true));
        store.delete(id);
        assert!(!store.is_selected(id));
        assert_eq!(store.selection_len(), 0);
    }

    #[test]
    fn toggle_select_flips_membership() {
        let mut store = BlockStore::new();
        let id = store.place(GridCell::ORIGIN, ColorIndex(0)).unwrap();
        assert_eq!(store.toggle_select(id), Some(true));
        assert!(store.is_selected(id));
        assert_eq!(store.toggle_select(id), Some(false));
        assert!(!store.is_selected(id));
        assert_eq!(store.toggle_select(BlockId(42)), None);
    }

    #[test]
    fn clear_selection_is_idempotent() {
        let mut store = BlockStore::new();
        let id = store.place(GridCell::ORIGIN, ColorIndex(0)).unwrap();
        store.toggle_select(id);

        assert_eq!(store.clear_selection(), vec![id]);
        assert_eq!(store.selection_len(), 0);
        assert!(store.clear_selection().is_empty());
        assert_eq!(store.selection_len(), 0);
    }

    #[test]
    fn delete_selected_removes_only_selected() {
        let mut store = BlockStore::new();
        let a = store.place(GridCell::new(0, 0, 0), ColorIndex(0)).unwrap();
        let b = store.place(GridCell::new(1, 0, 0), ColorIndex(0)).unwrap();
        let c = store.place(GridCell::new(2, 0, 0), ColorIndex(0)).unwrap();
        store.toggle_select(c);
        store.toggle_select(a);

        let deleted: Vec<BlockId> = store.delete_selected().iter().map(|b| b.id).collect();
        assert_eq!(deleted, vec![a, c]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.blocks()[0].id, b);
        assert_occupancy_matches(&store);
    }

    #[test]
    fn centroid_of_blocks() {
        let mut store = BlockStore::new();
        assert!(store.centroid().is_none());

        store.place(GridCell::new(0, 0, 0), ColorIndex(0));
        store.place(GridCell::new(2, 0, 0), ColorIndex(0));
        store.place(GridCell::new(1, 3, 0), ColorIndex(0));
        assert_eq!(store.centroid(), Some(Vec3::new(1.0, 1.0, 0.0)));
    }
}
