//! Door-versus-wall classification for every face of every placed room.

use crate::config::GeneratorConfig;
use crate::types::{Direction, FixtureKind, RoomKind};

use super::geometry::face_position;
use super::model::{DoorWallRecord, RoomRecord};
use super::occupancy::SpatialIndex;

/// A face becomes a door only between two ordinary rooms on the same floor.
///
/// The rule only looks at the unordered pair of rooms, so both sides of a shared edge always
/// agree without either side consulting the other's records.
pub(super) fn classify(owner: &RoomRecord, neighbour: Option<&RoomRecord>) -> FixtureKind {
    match neighbour {
        Some(neighbour)
            if owner.kind == RoomKind::Ordinary
                && neighbour.kind == RoomKind::Ordinary
                && owner.floor_index == neighbour.floor_index =>
        {
            FixtureKind::Door
        }
        _ => FixtureKind::Wall,
    }
}

fn is_destructible(
    owner: &RoomRecord,
    neighbour: Option<&RoomRecord>,
    kind: FixtureKind,
    config: &GeneratorConfig,
) -> bool {
    if !config.destructible_secret_walls || kind != FixtureKind::Wall {
        return false;
    }
    neighbour.is_some_and(|neighbour| {
        owner.kind == RoomKind::Secret || neighbour.kind == RoomKind::Secret
    })
}

/// `rooms` must be in the index's commit order.
pub(super) fn resolve_fixtures(
    rooms: &[RoomRecord],
    index: &SpatialIndex,
    config: &GeneratorConfig,
    bottom_elevation: f32,
) -> Vec<DoorWallRecord> {
    debug_assert_eq!(rooms.len(), index.placements().len());

    let mut fixtures = Vec::with_capacity(rooms.len() * Direction::ALL.len());
    for room in rooms {
        for direction in Direction::ALL {
            let neighbour = index.slot_at(room.cell.step(direction)).map(|slot| &rooms[slot]);
            let kind = classify(room, neighbour);
            fixtures.push(DoorWallRecord {
                owner: room.id,
                direction,
                position: face_position(room.cell, direction, config, bottom_elevation),
                rotation_degrees: direction.rotation_degrees(),
                kind,
                destructible: is_destructible(room, neighbour, kind, config),
            });
        }
    }
    fixtures
}
