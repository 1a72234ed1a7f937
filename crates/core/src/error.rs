//! Error types surfaced by configuration validation and layout generation.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("door height {door_height} can't be greater than room height {room_height}")]
    DoorTallerThanRoom { door_height: f32, room_height: f32 },

    #[error("door width {door_width} can't be greater than room width {room_width}")]
    DoorWiderThanRoom { door_width: f32, room_width: f32 },

    #[error("{field} must be a positive finite number, got {value}")]
    NonPositiveDimension { field: &'static str, value: f32 },

    #[error("at least one floor is required")]
    NoFloors,

    #[error("failsafe threshold must be greater than zero")]
    ZeroFailsafeThreshold,

    #[error("attempt budget per floor must be greater than zero")]
    ZeroAttemptBudget,

    #[error(
        "floor {floor} wants {secret_rooms} secret rooms but has no ordinary room to anchor them"
    )]
    SecretRoomsWithoutAnchors { floor: u32, secret_rooms: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocationStage {
    Rooms,
    SecretRooms,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("invalid configuration: {0}")]
    ConfigInvalid(#[from] ConfigError),

    #[error(
        "stalled on floor {floor} placing {stage:?}: {placed}/{target} after {attempts} attempts"
    )]
    GenerationStalled {
        floor: u32,
        stage: AllocationStage,
        placed: u32,
        target: u32,
        attempts: u64,
    },

    #[error("generation cancelled after {completed_floors} floors")]
    Cancelled { completed_floors: u32 },
}
