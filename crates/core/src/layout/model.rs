//! Public records handed to geometry, physics, and scene collaborators.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{Direction, FixtureKind, GridCoord, RoomId, RoomKind, WorldPoint};

use super::geometry;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub id: RoomId,
    pub cell: GridCoord,
    /// Corner of the room at floor level; the room extends one room width along +x and +z.
    pub origin: WorldPoint,
    pub floor_index: u32,
    pub kind: RoomKind,
    /// 1-based position among rooms of the same kind on the same floor.
    pub ordinal: u32,
}

impl RoomRecord {
    pub fn display_name(&self) -> String {
        let label = match self.kind {
            RoomKind::Ordinary => "Room",
            RoomKind::Secret => "Secret Room",
        };
        format!("{label} {} F{}", self.ordinal, self.floor_index + 1)
    }

    pub fn interior_anchor(&self, room_width: f32) -> WorldPoint {
        geometry::interior_anchor(self.cell, room_width, self.origin.y)
    }

    pub fn light_anchor(&self, room_width: f32, room_height: f32) -> WorldPoint {
        geometry::light_anchor(self.cell, room_width, self.origin.y + room_height)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DoorWallRecord {
    pub owner: RoomId,
    pub direction: Direction,
    pub position: WorldPoint,
    pub rotation_degrees: u16,
    pub kind: FixtureKind,
    /// Only ever set on walls bordering a secret room.
    pub destructible: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloorLayout {
    pub index: u32,
    pub bottom_elevation: f32,
    pub top_elevation: f32,
    /// Ordinary rooms in placement order, then secret rooms in placement order.
    pub rooms: Vec<RoomRecord>,
    /// Four per room, grouped by owner in room order, north/east/south/west within a group.
    pub fixtures: Vec<DoorWallRecord>,
}

impl FloorLayout {
    pub fn room(&self, id: RoomId) -> Option<&RoomRecord> {
        self.rooms.iter().find(|room| room.id == id)
    }

    pub fn fixtures_of(&self, id: RoomId) -> impl Iterator<Item = &DoorWallRecord> + '_ {
        self.fixtures.iter().filter(move |fixture| fixture.owner == id)
    }

    pub fn rooms_of_kind(&self, kind: RoomKind) -> impl Iterator<Item = &RoomRecord> + '_ {
        self.rooms.iter().filter(move |room| room.kind == kind)
    }

    pub fn door_count(&self) -> usize {
        self.fixtures.iter().filter(|fixture| fixture.kind == FixtureKind::Door).count()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Seed the stream was actually built from, even when the configuration asked for zero.
    pub seed: u64,
    pub floors: Vec<FloorLayout>,
}

impl Layout {
    pub fn room_count(&self) -> usize {
        self.floors.iter().map(|floor| floor.rooms.len()).sum()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.seed.to_le_bytes());
        bytes.extend((self.floors.len() as u32).to_le_bytes());
        for floor in &self.floors {
            bytes.extend(floor.index.to_le_bytes());
            bytes.extend(floor.bottom_elevation.to_bits().to_le_bytes());
            bytes.extend(floor.top_elevation.to_bits().to_le_bytes());

            bytes.extend((floor.rooms.len() as u32).to_le_bytes());
            for room in &floor.rooms {
                bytes.extend(room.id.0.to_le_bytes());
                bytes.extend(room.cell.x.to_le_bytes());
                bytes.extend(room.cell.z.to_le_bytes());
                push_point(&mut bytes, room.origin);
                bytes.extend(room.floor_index.to_le_bytes());
                bytes.push(match room.kind {
                    RoomKind::Ordinary => 0,
                    RoomKind::Secret => 1,
                });
                bytes.extend(room.ordinal.to_le_bytes());
            }

            bytes.extend((floor.fixtures.len() as u32).to_le_bytes());
            for fixture in &floor.fixtures {
                bytes.extend(fixture.owner.0.to_le_bytes());
                bytes.push(match fixture.direction {
                    Direction::North => 0,
                    Direction::East => 1,
                    Direction::South => 2,
                    Direction::West => 3,
                });
                push_point(&mut bytes, fixture.position);
                bytes.extend(fixture.rotation_degrees.to_le_bytes());
                bytes.push(match fixture.kind {
                    FixtureKind::Door => 0,
                    FixtureKind::Wall => 1,
                });
                bytes.push(u8::from(fixture.destructible));
            }
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn push_point(bytes: &mut Vec<u8>, point: WorldPoint) {
    bytes.extend(point.x.to_bits().to_le_bytes());
    bytes.extend(point.y.to_bits().to_le_bytes());
    bytes.extend(point.z.to_bits().to_le_bytes());
}
