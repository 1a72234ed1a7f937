//! Generator configuration, its defaults, and the validation gate run before any floor.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeOrder {
    /// North, east, south, west.
    #[default]
    Canonical,
    /// Offset sequence of the first released generator, kept so old seeds regenerate identically.
    Legacy,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideSide {
    #[default]
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DoorStyle {
    SlidingSingle { slide: SlideSide },
}

impl Default for DoorStyle {
    fn default() -> Self {
        DoorStyle::SlidingSingle { slide: SlideSide::Left }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Zero asks for a fresh runtime seed.
    pub seed: u64,
    pub floors: u32,
    pub room_width: f32,
    pub room_height: f32,
    pub wall_width: f32,
    pub door_width: f32,
    pub door_height: f32,
    pub max_rooms: u32,
    pub extra_rooms: u32,
    pub max_secret_rooms: u32,
    pub extra_secret_rooms: u32,
    pub failsafe_threshold: u32,
    pub max_attempts_per_floor: u64,
    pub probe_order: ProbeOrder,
    pub door_style: DoorStyle,
    pub door_speed: f32,
    pub destructible_secret_walls: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            floors: 1,
            room_width: 10.0,
            room_height: 3.0,
            wall_width: 1.0,
            door_width: 2.0,
            door_height: 2.5,
            max_rooms: 10,
            extra_rooms: 2,
            max_secret_rooms: 1,
            extra_secret_rooms: 0,
            failsafe_threshold: 10,
            max_attempts_per_floor: 1_000_000,
            probe_order: ProbeOrder::Canonical,
            door_style: DoorStyle::default(),
            door_speed: 2.0,
            destructible_secret_walls: false,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.floors == 0 {
            return Err(ConfigError::NoFloors);
        }

        for (field, value) in [
            ("room_width", self.room_width),
            ("room_height", self.room_height),
            ("wall_width", self.wall_width),
            ("door_width", self.door_width),
            ("door_height", self.door_height),
            ("door_speed", self.door_speed),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositiveDimension { field, value });
            }
        }

        if self.door_height > self.room_height {
            return Err(ConfigError::DoorTallerThanRoom {
                door_height: self.door_height,
                room_height: self.room_height,
            });
        }
        if self.door_width > self.room_width {
            return Err(ConfigError::DoorWiderThanRoom {
                door_width: self.door_width,
                room_width: self.room_width,
            });
        }

        if self.failsafe_threshold == 0 {
            return Err(ConfigError::ZeroFailsafeThreshold);
        }
        if self.max_attempts_per_floor == 0 {
            return Err(ConfigError::ZeroAttemptBudget);
        }

        if let Some(floor) = self.first_anchorless_floor() {
            let secret_rooms = scaled_target(self.max_secret_rooms, self.extra_secret_rooms, floor);
            return Err(ConfigError::SecretRoomsWithoutAnchors { floor, secret_rooms });
        }

        Ok(())
    }

    /// First floor asking for secret rooms while having no ordinary room to attach them to.
    ///
    /// Room targets never shrink with depth, so only floor 0 can be empty unless both room
    /// counts are zero, and then only floors 0 and 1 need checking.
    fn first_anchorless_floor(&self) -> Option<u32> {
        if self.max_rooms > 0 {
            return None;
        }
        if self.max_secret_rooms > 0 {
            return Some(0);
        }
        let later_floors_empty = self.extra_rooms == 0 && self.floors > 1;
        (later_floors_empty && self.extra_secret_rooms > 0).then_some(1)
    }
}

pub(crate) fn scaled_target(initial: u32, extra_per_floor: u32, floor_index: u32) -> u32 {
    initial.saturating_add(extra_per_floor.saturating_mul(floor_index))
}
