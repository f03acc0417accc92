use anyhow::{Result, bail};
use clap::Parser;
use dungeon_core::{
    DungeonGenerator, DungeonRequest, RandomSource, SeededRng, SizeClass, export_dungeon,
    import_dungeon, validate_dungeon,
};
use tools::{init_tracing, load_registries};

#[derive(Parser)]
#[command(author, version, about = "Soak-test dungeon generation across random requests", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 500)]
    iterations: u32,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let (registries, catalog) = load_registries(None)?;
    let themes: Vec<&str> = registries.themes.ids().collect();
    let generator = DungeonGenerator::new(&registries, &catalog);

    println!("Starting fuzz harness on seed {} for {} dungeons...", args.seed, args.iterations);
    let mut params = SeededRng::new(args.seed);
    let mut total_rooms = 0_usize;
    let mut short_floors = 0_usize;

    for iteration in 0..args.iterations {
        let dungeon_seed = params.next_u64();
        let size = SizeClass::ALL[params.below(SizeClass::ALL.len() as u64) as usize];
        let theme = themes[params.below(themes.len() as u64) as usize];
        let level = params.range_u32(1, 20);
        let floors = params.range_u32(1, 5);
        let request = DungeonRequest::new(format!("Fuzz {iteration}"), level, floors)
            .with_rooms_per_floor(params.range_u32(1, 20))
            .with_size(size.label())
            .with_theme(theme);

        let dungeon = generator.generate(&request, &mut SeededRng::new(dungeon_seed))?;

        // Assert invariants
        if let Err(err) = validate_dungeon(&dungeon) {
            bail!("Invariant failed for dungeon seed {dungeon_seed} ({request:?}): {err}");
        }
        let imported = import_dungeon(&export_dungeon(&dungeon)?)?;
        if imported != dungeon {
            bail!("Export round trip changed dungeon seed {dungeon_seed}");
        }

        for floor in &dungeon.floors {
            total_rooms += floor.achieved_rooms();
            if floor.achieved_rooms() < floor.requested_rooms as usize {
                short_floors += 1;
            }
        }
    }

    println!(
        "Fuzzing complete. {} dungeons, {} rooms, {} floors below their requested room count.",
        args.iterations, total_rooms, short_floors
    );
    Ok(())
}
