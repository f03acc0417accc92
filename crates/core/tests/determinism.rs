use chrono::Duration;
use dungeon_core::{
    ContentCatalog, Dungeon, DungeonGenerator, DungeonRequest, Registries, SeededRng,
};

fn generate(seed: u64, request: &DungeonRequest) -> Dungeon {
    let registries = Registries::with_defaults();
    let catalog = ContentCatalog::build_default();
    DungeonGenerator::new(&registries, &catalog)
        .generate(request, &mut SeededRng::new(seed))
        .expect("request is valid")
}

#[test]
fn test_determinism_identical_seeds_produce_same_fingerprint() {
    let request = DungeonRequest::new("Mirror Halls", 3, 3).with_size("large");
    let first = generate(12_345, &request);
    let second = generate(12_345, &request);

    assert_eq!(first.fingerprint(), second.fingerprint(), "identical runs must match");
    assert_eq!(first.id, second.id, "identifiers come from the seeded source too");
    assert_eq!(first.floors, second.floors);
}

#[test]
fn test_determinism_different_seeds_produce_different_fingerprints() {
    let request = DungeonRequest::new("Mirror Halls", 3, 3);
    assert_ne!(generate(123, &request).fingerprint(), generate(456, &request).fingerprint());
}

#[test]
fn test_fingerprint_ignores_creation_time() {
    let request = DungeonRequest::new("Clockless", 1, 2);
    let dungeon = generate(99, &request);
    let mut later = dungeon.clone();
    later.created_at += Duration::hours(6);

    assert_eq!(dungeon.canonical_bytes(), later.canonical_bytes());
    assert_eq!(dungeon.fingerprint(), later.fingerprint());
}

#[test]
fn test_request_parameters_change_the_fingerprint() {
    let base = generate(7, &DungeonRequest::new("Variant", 1, 2));
    let deeper = generate(7, &DungeonRequest::new("Variant", 2, 2));
    let themed = generate(7, &DungeonRequest::new("Variant", 1, 2).with_theme("crypt"));

    assert_ne!(base.fingerprint(), deeper.fingerprint());
    assert_ne!(base.fingerprint(), themed.fingerprint());
}
