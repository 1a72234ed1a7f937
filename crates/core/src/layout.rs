//! Multi-floor room layout generation split into coherent submodules.

pub mod geometry;
pub mod model;
pub mod orchestrator;
pub mod progression;

mod adjacency;
mod occupancy;
mod secret;
mod walk;

pub use geometry::{FixtureExtent, door_open_duration, door_open_position, fixture_extent};
pub use model::{DoorWallRecord, FloorLayout, Layout, RoomRecord};
pub use orchestrator::{CancelToken, FloorOrchestrator, LayoutSink, Phase, RunSummary};
pub use progression::{FloorPlan, floor_plan, floor_plans};

use tracing::info;

use crate::config::GeneratorConfig;
use crate::error::LayoutError;
use crate::random::{SeedChoice, SeededRandom, resolve_seed};

/// Generates every floor into memory from `config.seed`.
pub fn generate_layout(config: &GeneratorConfig) -> Result<Layout, LayoutError> {
    generate_layout_with_seed(config, config.seed, &CancelToken::new())
}

/// Generates every floor into memory from `seed`, which takes the place of `config.seed`.
///
/// A seed of zero is replaced by a runtime seed; the returned layout always reports the seed
/// its stream was built from, so it can be replayed.
pub fn generate_layout_with_seed(
    config: &GeneratorConfig,
    seed: u64,
    cancel: &CancelToken,
) -> Result<Layout, LayoutError> {
    let choice = resolve_seed(seed);
    if let SeedChoice::Generated(value) = choice {
        info!(seed = value, "no seed configured, generated one");
    }

    let mut rng = SeededRandom::new(choice.value());
    let mut floors = Vec::new();
    FloorOrchestrator::new(config.clone()).run(&mut rng, &mut floors, cancel)?;
    Ok(Layout { seed: rng.seed(), floors })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_layout_matches_orchestrator_output() {
        let config = GeneratorConfig { seed: 123, floors: 2, ..GeneratorConfig::default() };

        let from_helper = generate_layout(&config).unwrap();

        let mut floors = Vec::new();
        FloorOrchestrator::new(config.clone())
            .run(&mut SeededRandom::new(123), &mut floors, &CancelToken::new())
            .unwrap();

        assert_eq!(from_helper, Layout { seed: 123, floors });
    }

    #[test]
    fn zero_seed_reports_the_generated_seed() {
        let config = GeneratorConfig { seed: 0, ..GeneratorConfig::default() };
        let layout = generate_layout(&config).unwrap();
        assert_ne!(layout.seed, 0);

        let replayed =
            generate_layout(&GeneratorConfig { seed: layout.seed, ..config.clone() }).unwrap();
        assert_eq!(layout, replayed);
    }

    #[test]
    fn explicit_zero_seed_is_replaced_and_replays() {
        let config = GeneratorConfig { seed: 77, floors: 2, ..GeneratorConfig::default() };
        let layout = generate_layout_with_seed(&config, 0, &CancelToken::new()).unwrap();
        assert_ne!(layout.seed, 0);

        let replayed =
            generate_layout_with_seed(&config, layout.seed, &CancelToken::new()).unwrap();
        assert_eq!(layout, replayed);
    }

    #[test]
    fn explicit_seed_overrides_the_configured_one() {
        let config = GeneratorConfig { seed: 77, floors: 2, ..GeneratorConfig::default() };
        let layout = generate_layout_with_seed(&config, 78, &CancelToken::new()).unwrap();
        let expected = generate_layout(&GeneratorConfig { seed: 78, ..config.clone() }).unwrap();
        assert_eq!(layout.seed, 78);
        assert_eq!(layout, expected);
    }
}
