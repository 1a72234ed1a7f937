use std::collections::BTreeSet;

use anyhow::{Result, bail};
use clap::Parser;
use dungeon_core::{
    AllocationStage, Direction, DoorStyle, FixtureKind, GeneratorConfig, GridCoord, Layout,
    LayoutError, ProbeOrder, RoomKind, SlideSide, generate_layout,
    layout::{door_open_duration, door_open_position, floor_plan},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 500)]
    runs: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn between(rng: &mut ChaCha8Rng, low: u32, high: u32) -> u32 {
    low + (rng.next_u64() % u64::from(high - low + 1)) as u32
}

fn random_config(rng: &mut ChaCha8Rng) -> GeneratorConfig {
    let room_width = choose(rng, &[4.0_f32, 7.5, 10.0, 12.25]);
    let room_height = choose(rng, &[2.5_f32, 3.0, 4.0]);
    GeneratorConfig {
        seed: rng.next_u64() | 1,
        floors: between(rng, 1, 4),
        room_width,
        room_height,
        wall_width: choose(rng, &[0.25_f32, 0.5, 1.0]),
        door_width: room_width / 4.0,
        door_height: room_height * 0.8,
        max_rooms: between(rng, 1, 40),
        extra_rooms: between(rng, 0, 6),
        max_secret_rooms: between(rng, 0, 6),
        extra_secret_rooms: between(rng, 0, 2),
        failsafe_threshold: between(rng, 1, 25),
        max_attempts_per_floor: 200_000,
        probe_order: choose(rng, &[ProbeOrder::Canonical, ProbeOrder::Legacy]),
        door_style: DoorStyle::SlidingSingle {
            slide: choose(rng, &[SlideSide::Left, SlideSide::Right]),
        },
        door_speed: choose(rng, &[0.5_f32, 2.0, 6.0]),
        destructible_secret_walls: choose(rng, &[false, true]),
    }
}

/// Any non-empty floor leaves at least four free cells next to its ordinary rooms. Past that a
/// compact walk can run out of anchors.
fn secrets_may_saturate(config: &GeneratorConfig) -> bool {
    (0..config.floors).any(|index| floor_plan(config, index).target_secret_rooms > 4)
}

fn check(config: &GeneratorConfig, layout: &Layout) -> Result<()> {
    let mut ids = BTreeSet::new();
    for floor in &layout.floors {
        let plan = floor_plan(config, floor.index);
        let ordinary = floor.rooms_of_kind(RoomKind::Ordinary).count() as u32;
        let secret = floor.rooms_of_kind(RoomKind::Secret).count() as u32;
        if (ordinary, secret) != (plan.target_rooms, plan.target_secret_rooms) {
            bail!("floor {} has {ordinary}+{secret} rooms, wanted {plan:?}", floor.index);
        }

        let cells: BTreeSet<GridCoord> = floor.rooms.iter().map(|room| room.cell).collect();
        if cells.len() != floor.rooms.len() {
            bail!("floor {} reuses a cell", floor.index);
        }

        for room in &floor.rooms {
            if !ids.insert(room.id) {
                bail!("room id {:?} repeats", room.id);
            }
            let faces: Vec<Direction> =
                floor.fixtures_of(room.id).map(|fixture| fixture.direction).collect();
            if faces != Direction::ALL {
                bail!("room {:?} has faces {faces:?}", room.id);
            }
        }

        for fixture in &floor.fixtures {
            let Some(owner) = floor.room(fixture.owner) else {
                bail!("fixture owned by unknown room {:?}", fixture.owner);
            };
            if owner.kind == RoomKind::Secret && fixture.kind == FixtureKind::Door {
                bail!("secret room {:?} has a door", owner.id);
            }
            if fixture.kind == FixtureKind::Door {
                let neighbour_cell = owner.cell.step(fixture.direction);
                let Some(neighbour) = floor.rooms.iter().find(|room| room.cell == neighbour_cell)
                else {
                    bail!("door of {:?} opens onto nothing", owner.id);
                };
                let reciprocal = floor.fixtures_of(neighbour.id).any(|other| {
                    other.direction == fixture.direction.opposite()
                        && other.kind == FixtureKind::Door
                        && other.position == fixture.position
                });
                if !reciprocal {
                    bail!("door between {:?} and {:?} is one-sided", owner.id, neighbour.id);
                }
                if door_open_position(fixture, config).is_none() {
                    bail!("door of {:?} has no open position", owner.id);
                }
                let duration = door_open_duration(config);
                if !(duration.is_finite() && duration > 0.0) {
                    bail!("door of {:?} opens in {duration} seconds", owner.id);
                }
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting layout fuzz on seed {} for {} runs...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut stalls = 0;

    for run in 0..args.runs {
        let config = random_config(&mut rng);
        match generate_layout(&config) {
            Ok(layout) => {
                if let Err(error) = check(&config, &layout) {
                    println!("{}", serde_json::to_string_pretty(&config)?);
                    bail!("run {run}: invariant failed: {error}");
                }
            }
            Err(LayoutError::GenerationStalled { stage: AllocationStage::SecretRooms, .. })
                if secrets_may_saturate(&config) =>
            {
                stalls += 1;
            }
            Err(error) => {
                println!("{}", serde_json::to_string_pretty(&config)?);
                bail!("run {run}: generation failed: {error}");
            }
        }
    }

    println!("Fuzz complete: {} runs, {} tolerated stalls.", args.runs, stalls);
    Ok(())
}
