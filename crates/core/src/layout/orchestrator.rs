//! Floor-by-floor generation pipeline: allocate rooms, allocate secret rooms, classify faces, emit.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace, warn};

use crate::config::GeneratorConfig;
use crate::error::LayoutError;
use crate::random::RandomSource;
use crate::types::{RoomId, RoomKind};

use super::adjacency::resolve_fixtures;
use super::geometry::cell_origin;
use super::model::{FloorLayout, RoomRecord};
use super::occupancy::SpatialIndex;
use super::progression::{FloorPlan, floor_plans};
use super::secret::allocate_secret_rooms;
use super::walk::{AttemptBudget, allocate_rooms};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    ConfigValidated,
    AllocatingRooms { floor: u32 },
    AllocatingSecretRooms { floor: u32 },
    ClassifyingAdjacency { floor: u32 },
    Emitting { floor: u32 },
    Done,
}

/// Receives each finished floor, in floor order.
pub trait LayoutSink {
    fn emit_floor(&mut self, floor: FloorLayout);
}

impl LayoutSink for Vec<FloorLayout> {
    fn emit_floor(&mut self, floor: FloorLayout) {
        self.push(floor);
    }
}

/// Shared flag checked between floors. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub floors: u32,
    pub rooms: u32,
    pub secret_rooms: u32,
    pub doors: u32,
    pub walk_attempts: u64,
    pub walk_escapes: u32,
}

pub struct FloorOrchestrator {
    config: GeneratorConfig,
    phase: Phase,
    next_room_id: u32,
}

impl FloorOrchestrator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config, phase: Phase::Idle, next_room_id: 0 }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Generates every floor, handing each one to `sink` as soon as it is complete.
    ///
    /// An invalid configuration is rejected before the first floor, so nothing reaches the
    /// sink. A stall or cancellation stops the run; floors already emitted stay emitted.
    pub fn run(
        &mut self,
        rng: &mut impl RandomSource,
        sink: &mut impl LayoutSink,
        cancel: &CancelToken,
    ) -> Result<RunSummary, LayoutError> {
        self.phase = Phase::Idle;
        self.next_room_id = 0;

        self.config.validate()?;
        self.transition(Phase::ConfigValidated);

        let mut summary = RunSummary::default();
        let plans: Vec<FloorPlan> = floor_plans(&self.config).collect();
        for plan in plans {
            if cancel.is_cancelled() {
                debug!(completed_floors = summary.floors, "layout generation cancelled");
                return Err(LayoutError::Cancelled { completed_floors: summary.floors });
            }

            let (floor, walk_attempts, walk_escapes) = self.generate_floor(&plan, rng)?;

            summary.floors += 1;
            summary.rooms += plan.target_rooms;
            summary.secret_rooms += plan.target_secret_rooms;
            summary.doors += floor.door_count() as u32;
            summary.walk_attempts += walk_attempts;
            summary.walk_escapes += walk_escapes;

            self.transition(Phase::Emitting { floor: plan.index });
            sink.emit_floor(floor);
        }

        self.transition(Phase::Done);
        Ok(summary)
    }

    fn generate_floor(
        &mut self,
        plan: &FloorPlan,
        rng: &mut impl RandomSource,
    ) -> Result<(FloorLayout, u64, u32), LayoutError> {
        debug!(
            floor = plan.index,
            rooms = plan.target_rooms,
            secret_rooms = plan.target_secret_rooms,
            "generating floor"
        );

        let mut index = SpatialIndex::new(plan.index);
        let mut budget = AttemptBudget::new(self.config.max_attempts_per_floor);

        self.transition(Phase::AllocatingRooms { floor: plan.index });
        let walk = allocate_rooms(
            &mut index,
            plan.target_rooms,
            self.config.failsafe_threshold,
            &mut budget,
            rng,
        )
        .inspect_err(|error| warn!(%error, "room allocation gave up"))?;

        self.transition(Phase::AllocatingSecretRooms { floor: plan.index });
        allocate_secret_rooms(
            &mut index,
            plan.target_secret_rooms,
            self.config.probe_order,
            &mut budget,
            rng,
        )
        .inspect_err(|error| warn!(%error, "secret room allocation gave up"))?;

        self.transition(Phase::ClassifyingAdjacency { floor: plan.index });
        let rooms = self.build_room_records(&index, plan);
        let fixtures = resolve_fixtures(&rooms, &index, &self.config, plan.bottom_elevation);

        let floor = FloorLayout {
            index: plan.index,
            bottom_elevation: plan.bottom_elevation,
            top_elevation: plan.top_elevation,
            rooms,
            fixtures,
        };
        debug!(
            floor = plan.index,
            doors = floor.door_count(),
            attempts = budget.spent(),
            escapes = walk.escapes,
            "floor generated"
        );
        Ok((floor, walk.attempts, walk.escapes))
    }

    fn build_room_records(&mut self, index: &SpatialIndex, plan: &FloorPlan) -> Vec<RoomRecord> {
        let mut ordinary = 0_u32;
        let mut secret = 0_u32;
        index
            .placements()
            .iter()
            .map(|placement| {
                let ordinal = match placement.kind {
                    RoomKind::Ordinary => {
                        ordinary += 1;
                        ordinary
                    }
                    RoomKind::Secret => {
                        secret += 1;
                        secret
                    }
                };
                let id = RoomId(self.next_room_id);
                self.next_room_id += 1;
                RoomRecord {
                    id,
                    cell: placement.cell,
                    origin: cell_origin(
                        placement.cell,
                        self.config.room_width,
                        plan.bottom_elevation,
                    ),
                    floor_index: plan.index,
                    kind: placement.kind,
                    ordinal,
                }
            })
            .collect()
    }

    fn transition(&mut self, next: Phase) {
        trace!(from = ?self.phase, to = ?next, "orchestrator phase");
        self.phase = next;
    }
}
