//! World-space derivations from grid cells, faces, and configured dimensions.
//!
//! A room occupies the square `[x * w, (x + 1) * w] x [z * w, (z + 1) * w]` where `w` is the
//! room width. Face points are derived from integer edge indices so two rooms sharing an edge
//! compute bit-identical positions for it.

use serde::{Deserialize, Serialize};

use crate::config::{DoorStyle, GeneratorConfig, SlideSide};
use crate::types::{Direction, FixtureKind, GridCoord, WorldPoint};

use super::model::DoorWallRecord;

const LIGHT_CEILING_GAP: f32 = 0.1;

pub fn cell_origin(cell: GridCoord, room_width: f32, bottom_elevation: f32) -> WorldPoint {
    WorldPoint::new(cell.x as f32 * room_width, bottom_elevation, cell.z as f32 * room_width)
}

/// Midpoint of a room face at door mid-height.
pub fn face_position(
    cell: GridCoord,
    direction: Direction,
    config: &GeneratorConfig,
    bottom_elevation: f32,
) -> WorldPoint {
    let w = config.room_width;
    let y = bottom_elevation + config.door_height / 2.0;
    let mid_x = (cell.x as f32 + 0.5) * w;
    let mid_z = (cell.z as f32 + 0.5) * w;
    match direction {
        Direction::North => WorldPoint::new(mid_x, y, (cell.z + 1) as f32 * w),
        Direction::East => WorldPoint::new((cell.x + 1) as f32 * w, y, mid_z),
        Direction::South => WorldPoint::new(mid_x, y, cell.z as f32 * w),
        Direction::West => WorldPoint::new(cell.x as f32 * w, y, mid_z),
    }
}

pub fn interior_anchor(cell: GridCoord, room_width: f32, bottom_elevation: f32) -> WorldPoint {
    WorldPoint::new(
        (cell.x as f32 + 0.5) * room_width,
        bottom_elevation,
        (cell.z as f32 + 0.5) * room_width,
    )
}

pub fn light_anchor(cell: GridCoord, room_width: f32, top_elevation: f32) -> WorldPoint {
    WorldPoint { y: top_elevation - LIGHT_CEILING_GAP, ..interior_anchor(cell, room_width, 0.0) }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixtureExtent {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

/// Box size a geometry builder should give a fixture before rotating it into place.
pub fn fixture_extent(kind: FixtureKind, config: &GeneratorConfig) -> FixtureExtent {
    let depth = match kind {
        FixtureKind::Door => config.wall_width / 2.0,
        FixtureKind::Wall => config.wall_width,
    };
    FixtureExtent { width: config.door_width, height: config.door_height, depth }
}

/// Where a sliding door panel rests when open. Walls have no open position.
pub fn door_open_position(record: &DoorWallRecord, config: &GeneratorConfig) -> Option<WorldPoint> {
    if record.kind != FixtureKind::Door {
        return None;
    }

    let DoorStyle::SlidingSingle { slide } = config.door_style;
    let travel = match slide {
        SlideSide::Left => config.door_width,
        SlideSide::Right => -config.door_width,
    };
    let position = record.position;
    Some(match record.direction {
        Direction::North | Direction::South => WorldPoint { x: position.x + travel, ..position },
        Direction::East | Direction::West => WorldPoint { z: position.z + travel, ..position },
    })
}

/// Seconds a sliding door takes to travel from closed to open at the configured speed.
pub fn door_open_duration(config: &GeneratorConfig) -> f32 {
    config.door_width / config.door_speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RoomId;

    fn config() -> GeneratorConfig {
        GeneratorConfig {
            room_width: 10.0,
            room_height: 3.0,
            wall_width: 1.0,
            door_width: 2.0,
            door_height: 2.5,
            ..GeneratorConfig::default()
        }
    }

    fn record(direction: Direction, kind: FixtureKind) -> DoorWallRecord {
        let config = config();
        DoorWallRecord {
            owner: RoomId(0),
            direction,
            position: face_position(GridCoord::ORIGIN, direction, &config, 0.0),
            rotation_degrees: direction.rotation_degrees(),
            kind,
            destructible: false,
        }
    }

    #[test]
    fn face_positions_sit_on_room_edges_at_door_mid_height() {
        let config = config();
        let cell = GridCoord::new(1, -1);
        assert_eq!(
            face_position(cell, Direction::North, &config, 3.0),
            WorldPoint::new(15.0, 4.25, 0.0)
        );
        assert_eq!(
            face_position(cell, Direction::East, &config, 3.0),
            WorldPoint::new(20.0, 4.25, -5.0)
        );
        assert_eq!(
            face_position(cell, Direction::South, &config, 3.0),
            WorldPoint::new(15.0, 4.25, -10.0)
        );
        assert_eq!(
            face_position(cell, Direction::West, &config, 3.0),
            WorldPoint::new(10.0, 4.25, -5.0)
        );
    }

    #[test]
    fn shared_edges_resolve_to_identical_points_for_awkward_widths() {
        let config = GeneratorConfig { room_width: 2.7, door_width: 0.3, ..config() };
        for x in -20..20 {
            for z in -20..20 {
                let cell = GridCoord::new(x, z);
                for direction in Direction::ALL {
                    let neighbour = cell.step(direction);
                    assert_eq!(
                        face_position(cell, direction, &config, 0.0),
                        face_position(neighbour, direction.opposite(), &config, 0.0),
                    );
                }
            }
        }
    }

    #[test]
    fn anchors_center_the_room_between_floor_and_ceiling() {
        let cell = GridCoord::new(-2, 3);
        assert_eq!(cell_origin(cell, 10.0, 6.0), WorldPoint::new(-20.0, 6.0, 30.0));
        assert_eq!(interior_anchor(cell, 10.0, 6.0), WorldPoint::new(-15.0, 6.0, 35.0));
        let light = light_anchor(cell, 10.0, 9.0);
        assert_eq!((light.x, light.z), (-15.0, 35.0));
        assert!((light.y - 8.9).abs() < 1e-5);
    }

    #[test]
    fn doors_are_half_as_deep_as_walls() {
        let config = config();
        let door = fixture_extent(FixtureKind::Door, &config);
        let wall = fixture_extent(FixtureKind::Wall, &config);
        assert_eq!(door, FixtureExtent { width: 2.0, height: 2.5, depth: 0.5 });
        assert_eq!(wall, FixtureExtent { width: 2.0, height: 2.5, depth: 1.0 });
    }

    #[test]
    fn sliding_doors_travel_one_door_width_along_the_face() {
        let config = config();
        let north = record(Direction::North, FixtureKind::Door);
        assert_eq!(door_open_position(&north, &config), Some(WorldPoint::new(7.0, 1.25, 10.0)));

        let right = GeneratorConfig {
            door_style: DoorStyle::SlidingSingle { slide: SlideSide::Right },
            ..config.clone()
        };
        let east = record(Direction::East, FixtureKind::Door);
        assert_eq!(door_open_position(&east, &right), Some(WorldPoint::new(10.0, 1.25, 3.0)));
    }

    #[test]
    fn door_travel_time_follows_width_and_speed() {
        let config = GeneratorConfig { door_width: 2.0, door_speed: 4.0, ..config() };
        assert_eq!(door_open_duration(&config), 0.5);

        let slow = GeneratorConfig { door_speed: 0.5, ..config };
        assert_eq!(door_open_duration(&slow), 4.0);
    }

    #[test]
    fn walls_never_slide() {
        let wall = record(Direction::West, FixtureKind::Wall);
        assert_eq!(door_open_position(&wall, &config()), None);
    }
}
