use dungeon_core::{
    ConfigError, ContentCatalog, ContentCategory, ContentEntry, ContentRegistry, DungeonGenerator,
    DungeonRequest, PassageKind, Registries, RoomContent, SeededRng, ThemeDefinition,
    export_dungeon, import_dungeon, validate_dungeon,
};

/// Content source that knows no monsters but forwards every other category.
struct NoMonsters(ContentCatalog);

impl ContentRegistry for NoMonsters {
    fn list_by_category(&self, category: ContentCategory) -> Vec<&ContentEntry> {
        match category {
            ContentCategory::Monster => Vec::new(),
            other => self.0.list_by_category(other),
        }
    }
}

#[test]
fn test_single_small_floor_with_five_rooms() {
    let registries = Registries::with_defaults();
    let catalog = ContentCatalog::build_default();
    let request = DungeonRequest::new("Crypt of Tests", 1, 1)
        .with_rooms_per_floor(5)
        .with_size("small");

    for seed in 0..20 {
        let dungeon = DungeonGenerator::new(&registries, &catalog)
            .generate(&request, &mut SeededRng::new(seed))
            .expect("valid request");

        assert_eq!(dungeon.floors.len(), 1);
        let floor = &dungeon.floors[0];
        assert_eq!((floor.grid_width, floor.grid_height), (10, 10));
        assert_eq!(floor.requested_rooms, 5);
        assert!((1..=5).contains(&floor.rooms.len()), "seed {seed}: {} rooms", floor.rooms.len());
        assert_eq!(floor.corridors.len(), floor.rooms.len() - 1);
        assert_eq!(floor.entrances.len(), 1);
        assert_eq!(floor.exits.len(), 1);
        assert_eq!(floor.entrances[0].kind, PassageKind::DungeonEntrance);
        assert_eq!(floor.exits[0].kind, PassageKind::DungeonExit);
        validate_dungeon(&dungeon).expect("generated dungeon is structurally valid");
    }
}

#[test]
fn test_three_floors_ramp_difficulty_from_level_one() {
    let registries = Registries::with_defaults();
    let catalog = ContentCatalog::build_default();
    let request = DungeonRequest::new("Three Deep", 1, 3).with_rooms_per_floor(10);

    let dungeon = DungeonGenerator::new(&registries, &catalog)
        .generate(&request, &mut SeededRng::new(2_024))
        .expect("valid request");

    let levels: Vec<u32> = dungeon.floors.iter().map(|floor| floor.level).collect();
    assert_eq!(levels, vec![1, 2, 3]);
    for floor in &dungeon.floors {
        assert_eq!(floor.requested_rooms, 10);
        assert!(floor.is_connected());
        for content in floor.rooms.iter().flat_map(|room| &room.contents) {
            if let RoomContent::Monster { difficulty, .. } = content {
                assert!(*difficulty <= floor.level, "monster above floor level");
            }
        }
    }
}

#[test]
fn test_combat_rooms_without_monsters_stay_empty() {
    let mut registries = Registries::with_defaults();
    registries
        .register_theme(
            "arena",
            ThemeDefinition {
                name: "Arena".to_string(),
                room_types: vec!["combat".to_string()],
                ..ThemeDefinition::default()
            },
        )
        .expect("theme registers");
    let content = NoMonsters(ContentCatalog::build_default());
    let request = DungeonRequest::new("Empty Arena", 1, 1).with_theme("arena");

    let dungeon = DungeonGenerator::new(&registries, &content)
        .generate(&request, &mut SeededRng::new(8))
        .expect("valid request");

    let rooms = &dungeon.floors[0].rooms;
    assert!(!rooms.is_empty());
    for room in rooms {
        assert_eq!(room.room_type, "combat");
        assert!(room.contents.is_empty(), "no monsters to draw from: {:?}", room.contents);
    }
}

#[test]
fn test_puzzle_floor_survives_export_round_trip() {
    let mut registries = Registries::with_defaults();
    registries
        .register_theme(
            "riddle_halls",
            ThemeDefinition {
                name: "Riddle Halls".to_string(),
                room_types: vec!["puzzle".to_string()],
                ..ThemeDefinition::default()
            },
        )
        .expect("theme registers");
    let catalog = ContentCatalog::build_default();
    let request = DungeonRequest::new("Sphinx Gate", 3, 2).with_theme("riddle_halls");

    let dungeon = DungeonGenerator::new(&registries, &catalog)
        .generate(&request, &mut SeededRng::new(17))
        .expect("valid request");

    for floor in &dungeon.floors {
        for room in &floor.rooms {
            assert!(matches!(
                room.contents.as_slice(),
                [RoomContent::Puzzle { difficulty, .. }] if *difficulty == floor.level
            ));
        }
    }

    let text = export_dungeon(&dungeon).expect("export");
    assert!(text.contains(r#""type": "puzzle""#));
    assert_eq!(import_dungeon(&text).expect("import"), dungeon);
}

#[test]
fn test_unknown_theme_fails_before_generation() {
    let registries = Registries::with_defaults();
    let catalog = ContentCatalog::build_default();
    let request = DungeonRequest::new("Lost", 1, 1).with_theme("lost_city");

    let err = DungeonGenerator::new(&registries, &catalog)
        .generate(&request, &mut SeededRng::new(1))
        .expect_err("unknown theme");
    assert_eq!(err, ConfigError::UnknownTheme("lost_city".to_string()));
}
