//! Per-floor spatial index over committed room cells.

use std::collections::BTreeMap;

use crate::types::{GridCoord, RoomKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Placement {
    pub(super) cell: GridCoord,
    pub(super) kind: RoomKind,
}

/// Cell occupancy for one floor, ordinary and secret rooms together.
///
/// Placements keep commit order. All ordinary rooms are committed before the first secret
/// room, so a placement's slot is also its position in the floor's emitted room list.
#[derive(Clone, Debug)]
pub(super) struct SpatialIndex {
    floor_index: u32,
    slots: BTreeMap<GridCoord, usize>,
    placements: Vec<Placement>,
    ordinary_count: usize,
}

impl SpatialIndex {
    pub(super) fn new(floor_index: u32) -> Self {
        Self { floor_index, slots: BTreeMap::new(), placements: Vec::new(), ordinary_count: 0 }
    }

    pub(super) fn floor_index(&self) -> u32 {
        self.floor_index
    }

    pub(super) fn is_occupied(&self, cell: GridCoord) -> bool {
        self.slots.contains_key(&cell)
    }

    pub(super) fn slot_at(&self, cell: GridCoord) -> Option<usize> {
        self.slots.get(&cell).copied()
    }

    /// Returns false, leaving the index untouched, when the cell is already taken.
    pub(super) fn commit(&mut self, cell: GridCoord, kind: RoomKind) -> bool {
        if self.is_occupied(cell) {
            return false;
        }
        debug_assert!(
            kind == RoomKind::Secret || self.secret_count() == 0,
            "ordinary rooms must be committed before secret rooms"
        );

        self.slots.insert(cell, self.placements.len());
        self.placements.push(Placement { cell, kind });
        if kind == RoomKind::Ordinary {
            self.ordinary_count += 1;
        }
        true
    }

    pub(super) fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub(super) fn ordinary_cell(&self, index: usize) -> GridCoord {
        self.placements[..self.ordinary_count][index].cell
    }

    pub(super) fn ordinary_count(&self) -> usize {
        self.ordinary_count
    }

    pub(super) fn secret_count(&self) -> usize {
        self.placements.len() - self.ordinary_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_commit_is_rejected_regardless_of_kind() {
        let mut index = SpatialIndex::new(0);
        assert!(index.commit(GridCoord::ORIGIN, RoomKind::Ordinary));
        assert!(!index.commit(GridCoord::ORIGIN, RoomKind::Ordinary));
        assert!(index.commit(GridCoord::new(0, 1), RoomKind::Secret));
        assert!(!index.commit(GridCoord::new(0, 1), RoomKind::Secret));
        assert_eq!(index.placements().len(), 2);
        assert_eq!(index.ordinary_count(), 1);
        assert_eq!(index.secret_count(), 1);
    }

    #[test]
    fn slots_follow_commit_order() {
        let mut index = SpatialIndex::new(2);
        index.commit(GridCoord::new(0, 0), RoomKind::Ordinary);
        index.commit(GridCoord::new(1, 0), RoomKind::Ordinary);
        index.commit(GridCoord::new(1, 1), RoomKind::Secret);

        assert_eq!(index.floor_index(), 2);
        assert_eq!(index.slot_at(GridCoord::new(1, 0)), Some(1));
        assert_eq!(index.slot_at(GridCoord::new(1, 1)), Some(2));
        assert_eq!(index.slot_at(GridCoord::new(5, 5)), None);
        assert_eq!(index.ordinary_cell(1), GridCoord::new(1, 0));
    }
}
