use std::fs;

use dungeon_core::{
    ContentCatalog, DungeonGenerator, DungeonRequest, GeneratorConfig, Registries, RoomContent,
    SeededRng, read_export, write_export,
};
use tempfile::tempdir;

const OBSERVATORY: &str = r#"
[[room_types]]
id = "observatory"
name = "Observatory"
weight = 3.0
min_width = 4
max_width = 5
min_height = 4
max_height = 5
features = ["brass_telescope", "star_charts"]
content = "combat"

[themes.stargazer]
name = "Stargazer Tower"
adjectives = ["moonlit"]
room_types = ["observatory"]
corridor_features = ["spiral_stairs"]

[[content]]
category = "monster"
id = "star_spawn"
name = "Star Spawn"
difficulty = 1
"#;

#[test]
fn test_config_file_extends_generation_end_to_end() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("generator.toml");
    fs::write(&config_path, OBSERVATORY).unwrap();

    let mut registries = Registries::with_defaults();
    let mut catalog = ContentCatalog::new();
    GeneratorConfig::load(&config_path)
        .unwrap()
        .apply(&mut registries, &mut catalog)
        .unwrap();

    let request = DungeonRequest::new("Tower", 1, 2).with_theme("stargazer");
    let dungeon = DungeonGenerator::new(&registries, &catalog)
        .generate(&request, &mut SeededRng::new(31))
        .unwrap();

    for room in dungeon.floors.iter().flat_map(|floor| &floor.rooms) {
        assert_eq!(room.room_type, "observatory");
        assert!(room.description.starts_with("A moonlit observatory"));
        for content in &room.contents {
            assert!(matches!(
                content,
                RoomContent::Monster { entry_id, .. } if entry_id == "star_spawn"
            ));
        }
    }
    for corridor in dungeon.floors.iter().flat_map(|floor| &floor.corridors) {
        assert!(corridor.features.iter().all(|feature| feature == "spiral_stairs"));
    }

    let export_path = dir.path().join("tower.json");
    write_export(&export_path, &dungeon).unwrap();
    assert_eq!(read_export(&export_path).unwrap(), dungeon);
}
