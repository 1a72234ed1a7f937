//! Per-floor room targets and vertical elevation bands.

use crate::config::{GeneratorConfig, scaled_target};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloorPlan {
    pub index: u32,
    pub target_rooms: u32,
    pub target_secret_rooms: u32,
    pub bottom_elevation: f32,
    pub top_elevation: f32,
}

pub fn floor_plan(config: &GeneratorConfig, index: u32) -> FloorPlan {
    let bottom_elevation = config.room_height * index as f32;
    FloorPlan {
        index,
        target_rooms: scaled_target(config.max_rooms, config.extra_rooms, index),
        target_secret_rooms: scaled_target(
            config.max_secret_rooms,
            config.extra_secret_rooms,
            index,
        ),
        bottom_elevation,
        top_elevation: bottom_elevation + config.room_height,
    }
}

pub fn floor_plans(config: &GeneratorConfig) -> impl Iterator<Item = FloorPlan> + '_ {
    (0..config.floors).map(move |index| floor_plan(config, index))
}
