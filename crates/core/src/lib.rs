pub mod config;
pub mod error;
pub mod layout;
mod layout_file;
pub mod random;
pub mod types;

pub use config::{DoorStyle, GeneratorConfig, ProbeOrder, SlideSide};
pub use error::{AllocationStage, ConfigError, LayoutError};
pub use layout::{
    CancelToken, DoorWallRecord, FloorLayout, FloorOrchestrator, Layout, LayoutSink, Phase,
    RoomRecord, RunSummary, generate_layout, generate_layout_with_seed,
};
pub use random::{RandomSource, SeedChoice, SeededRandom, resolve_seed};
pub use types::*;
