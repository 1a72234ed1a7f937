//! Random-walk allocation of ordinary room cells with stuck escape.

use tracing::trace;

use crate::error::{AllocationStage, LayoutError};
use crate::random::RandomSource;
use crate::types::{Direction, GridCoord, RoomKind};

use super::occupancy::SpatialIndex;

/// Hard ceiling on allocator iterations for one floor, shared by both allocators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct AttemptBudget {
    limit: u64,
    spent: u64,
}

impl AttemptBudget {
    pub(super) fn new(limit: u64) -> Self {
        Self { limit, spent: 0 }
    }

    pub(super) fn try_spend(&mut self) -> bool {
        if self.spent >= self.limit {
            return false;
        }
        self.spent += 1;
        true
    }

    pub(super) fn spent(&self) -> u64 {
        self.spent
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct WalkStats {
    pub(super) attempts: u64,
    pub(super) escapes: u32,
}

/// Axis first (x or z), then sign (+ or -).
pub(super) fn draw_step(rng: &mut impl RandomSource) -> Direction {
    let along_x = rng.next_below(2) == 0;
    let positive = rng.next_below(2) == 0;
    match (along_x, positive) {
        (true, true) => Direction::East,
        (true, false) => Direction::West,
        (false, true) => Direction::North,
        (false, false) => Direction::South,
    }
}

pub(super) fn allocate_rooms(
    index: &mut SpatialIndex,
    target: u32,
    failsafe_threshold: u32,
    budget: &mut AttemptBudget,
    rng: &mut impl RandomSource,
) -> Result<WalkStats, LayoutError> {
    let mut stats = WalkStats::default();
    if target == 0 {
        return Ok(stats);
    }

    index.commit(GridCoord::ORIGIN, RoomKind::Ordinary);

    let mut origin = GridCoord::ORIGIN;
    let mut attempt = 0_u64;
    let mut last_success = 0_u64;

    while index.ordinary_count() < target as usize {
        if !budget.try_spend() {
            return Err(LayoutError::GenerationStalled {
                floor: index.floor_index(),
                stage: AllocationStage::Rooms,
                placed: index.ordinary_count() as u32,
                target,
                attempts: budget.spent(),
            });
        }

        let candidate = origin.step(draw_step(rng));
        if index.commit(candidate, RoomKind::Ordinary) {
            origin = candidate;
            last_success = attempt + 1;
        }
        attempt += 1;

        if attempt > last_success + u64::from(failsafe_threshold) {
            let slot = rng.next_below(index.ordinary_count());
            origin = index.ordinary_cell(slot);
            last_success = attempt;
            stats.escapes += 1;
            trace!(floor = index.floor_index(), attempt, ?origin, "walk escaped to placed room");
        }
    }

    stats.attempts = attempt;
    Ok(stats)
}
