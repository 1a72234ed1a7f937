//! Secret room allocation: hidden cells anchored beside ordinary rooms.

use crate::config::ProbeOrder;
use crate::error::{AllocationStage, LayoutError};
use crate::random::RandomSource;
use crate::types::{Direction, RoomKind};

use super::occupancy::SpatialIndex;
use super::walk::AttemptBudget;

const CANONICAL_PROBES: [Direction; 4] =
    [Direction::North, Direction::East, Direction::South, Direction::West];

// Offsets (0,-1), (-1,0), (+1,0), (0,+1): the historical generator's sequence.
const LEGACY_PROBES: [Direction; 4] =
    [Direction::South, Direction::West, Direction::East, Direction::North];

pub(super) fn probe_sequence(order: ProbeOrder) -> [Direction; 4] {
    match order {
        ProbeOrder::Canonical => CANONICAL_PROBES,
        ProbeOrder::Legacy => LEGACY_PROBES,
    }
}

pub(super) fn allocate_secret_rooms(
    index: &mut SpatialIndex,
    target: u32,
    order: ProbeOrder,
    budget: &mut AttemptBudget,
    rng: &mut impl RandomSource,
) -> Result<(), LayoutError> {
    let probes = probe_sequence(order);

    while index.secret_count() < target as usize {
        if index.ordinary_count() == 0 || !budget.try_spend() {
            return Err(LayoutError::GenerationStalled {
                floor: index.floor_index(),
                stage: AllocationStage::SecretRooms,
                placed: index.secret_count() as u32,
                target,
                attempts: budget.spent(),
            });
        }

        let anchor = index.ordinary_cell(rng.next_below(index.ordinary_count()));
        let free_cell = probes
            .iter()
            .map(|&direction| anchor.step(direction))
            .find(|&cell| !index.is_occupied(cell));
        if let Some(cell) = free_cell {
            index.commit(cell, RoomKind::Secret);
        }
    }

    Ok(())
}
