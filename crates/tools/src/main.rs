use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dungeon_core::{
    Dungeon, DungeonGenerator, DungeonRequest, SeededRng, export_dungeon, read_export,
    write_export,
};
use tools::{init_tracing, load_registries};

#[derive(Parser)]
#[command(author, version, about = "Generate and inspect procedural dungeons", long_about = None)]
struct Args {
    /// TOML file with extra room types, themes and content entries
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a dungeon and print its export, or write it to a file
    Generate {
        #[arg(long)]
        name: String,
        /// Difficulty of the first floor
        #[arg(long, default_value_t = 1)]
        level: u32,
        #[arg(long, default_value_t = 1)]
        floors: u32,
        /// Rooms requested per floor (defaults to the size preset, capped at 15)
        #[arg(long)]
        rooms: Option<u32>,
        #[arg(long)]
        theme: Option<String>,
        /// small, medium, large or huge
        #[arg(long)]
        size: Option<String>,
        /// Seed for a reproducible dungeon; random when omitted
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Validate an exported dungeon and print a summary
    Inspect {
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    match args.command {
        Commands::Generate { name, level, floors, rooms, theme, size, seed, out } => {
            let (registries, catalog) = load_registries(args.config.as_deref())?;

            let mut request = DungeonRequest::new(name, level, floors);
            request.rooms_per_floor = rooms;
            request.theme = theme;
            request.size = size;

            let mut rng = seed.map(SeededRng::new).unwrap_or_else(SeededRng::from_runtime_entropy);
            tracing::info!(seed = rng.seed(), "generating dungeon");

            let dungeon = DungeonGenerator::new(&registries, &catalog)
                .generate(&request, &mut rng)
                .context("Dungeon request was rejected")?;

            match out {
                Some(path) => {
                    write_export(&path, &dungeon).with_context(|| {
                        format!("Failed to write dungeon export: {}", path.display())
                    })?;
                    print_summary(&dungeon);
                    println!("Written to {}", path.display());
                }
                None => {
                    println!("{}", export_dungeon(&dungeon).context("Failed to export dungeon")?)
                }
            }
        }
        Commands::Inspect { input } => {
            let dungeon = read_export(&input)
                .with_context(|| format!("Failed to load dungeon export: {}", input.display()))?;
            print_summary(&dungeon);
        }
    }

    Ok(())
}

fn print_summary(dungeon: &Dungeon) {
    println!("Dungeon: {} ({})", dungeon.name, dungeon.id);
    println!("Theme: {}  Size: {}  Level: {}", dungeon.theme, dungeon.size, dungeon.level);
    println!("Created: {}", dungeon.created_at.to_rfc3339());
    println!("Fingerprint: {:016x}", dungeon.fingerprint());
    for floor in &dungeon.floors {
        println!(
            "  Floor {} (level {}): {}/{} rooms, {} corridors, {}x{} grid",
            floor.number,
            floor.level,
            floor.achieved_rooms(),
            floor.requested_rooms,
            floor.corridors.len(),
            floor.grid_width,
            floor.grid_height
        );
        for passage in floor.entrances.iter().chain(&floor.exits) {
            println!("    {:?} -> room {}", passage.kind, passage.room_id);
        }
    }
}
