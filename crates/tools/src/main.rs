use anyhow::{Context, Result};
use clap::Parser;
use dungeon_core::{GeneratorConfig, Layout, RoomKind, generate_layout};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML generator configuration; omitted fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Overrides the configured seed (0 picks one at runtime)
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(short, long)]
    floors: Option<u32>,
    /// Where to write the layout as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    let Some(path) = path else {
        return Ok(GeneratorConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&text)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn print_summary(layout: &Layout) {
    println!("Seed: {}", layout.seed);
    for floor in &layout.floors {
        println!(
            "Floor {}: {} rooms, {} secret rooms, {} doorways, elevation {}..{}",
            floor.index + 1,
            floor.rooms_of_kind(RoomKind::Ordinary).count(),
            floor.rooms_of_kind(RoomKind::Secret).count(),
            floor.door_count() / 2,
            floor.bottom_elevation,
            floor.top_elevation,
        );
    }
    println!("Fingerprint: {:016x}", layout.fingerprint());
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(floors) = args.floors {
        config.floors = floors;
    }

    let layout = generate_layout(&config).context("Layout generation failed")?;
    info!(seed = layout.seed, rooms = layout.room_count(), "layout generated");
    print_summary(&layout);

    if let Some(output) = &args.output {
        layout
            .write_atomic(output)
            .with_context(|| format!("Failed to write layout: {}", output.display()))?;
        println!("Wrote {}", output.display());
    }

    Ok(())
}
