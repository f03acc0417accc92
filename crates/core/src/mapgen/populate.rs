//! Encounter, treasure and puzzle content for placed rooms, plus their
//! descriptions.

use crate::content::{ContentCategory, ContentEntry, ContentRegistry};
use crate::registry::{ContentPolicy, RoomBlueprint, ThemeDefinition};
use crate::rng::RandomSource;

use super::model::{Room, RoomContent};

/// Puzzle kinds used when the content registry has no puzzle entries.
pub(crate) const ABSTRACT_PUZZLE_KINDS: [&str; 5] =
    ["riddle", "lever_sequence", "pressure_plates", "rune_lock", "mirror_alignment"];

const MIN_DRAWS: u32 = 1;
const MAX_DRAWS: u32 = 3;
const GOLD_PER_LEVEL_MIN: u32 = 10;
const GOLD_PER_LEVEL_MAX: u32 = 50;

pub(crate) fn contents_for_policy(
    policy: ContentPolicy,
    level: u32,
    content: &dyn ContentRegistry,
    rng: &mut dyn RandomSource,
) -> Vec<RoomContent> {
    match policy {
        ContentPolicy::Combat => {
            let pool = content
                .filter_by_max_difficulty(content.list_by_category(ContentCategory::Monster), level);
            draw_entries(&pool, rng)
        }
        ContentPolicy::Treasure => {
            let gold = rng.range_u32(
                level.saturating_mul(GOLD_PER_LEVEL_MIN),
                level.saturating_mul(GOLD_PER_LEVEL_MAX),
            );
            let mut contents = vec![RoomContent::Currency { gold }];
            contents.extend(draw_entries(&content.list_by_category(ContentCategory::Item), rng));
            contents
        }
        ContentPolicy::Puzzle => {
            let puzzles = content.list_by_category(ContentCategory::Puzzle);
            let kind = match rng.index(puzzles.len()) {
                Some(index) => puzzles[index].id().to_string(),
                None => {
                    let index = rng.below(ABSTRACT_PUZZLE_KINDS.len() as u64) as usize;
                    ABSTRACT_PUZZLE_KINDS[index].to_string()
                }
            };
            vec![RoomContent::Puzzle { kind, difficulty: level }]
        }
        ContentPolicy::Ambient => Vec::new(),
    }
}

/// One to three uniform draws, with replacement. An empty pool yields nothing.
fn draw_entries(pool: &[&ContentEntry], rng: &mut dyn RandomSource) -> Vec<RoomContent> {
    if pool.is_empty() {
        return Vec::new();
    }
    let count = rng.range_u32(MIN_DRAWS, MAX_DRAWS);
    (0..count)
        .filter_map(|_| rng.index(pool.len()).map(|index| content_from_entry(pool[index])))
        .collect()
}

fn content_from_entry(entry: &ContentEntry) -> RoomContent {
    let entry_id = entry.id().to_string();
    let name = entry.name().to_string();
    let difficulty = entry.difficulty();
    match entry.category() {
        ContentCategory::Monster => RoomContent::Monster { entry_id, name, difficulty },
        ContentCategory::Item | ContentCategory::Spell => {
            RoomContent::Item { entry_id, name, difficulty }
        }
        ContentCategory::Puzzle => RoomContent::Puzzle { kind: entry_id, difficulty },
    }
}

/// Fills in contents and descriptions for every room on a floor. Rooms whose
/// type is not among `blueprints` keep empty contents.
pub(super) fn populate_rooms(
    rooms: &mut [Room],
    blueprints: &[&dyn RoomBlueprint],
    theme: &ThemeDefinition,
    level: u32,
    content: &dyn ContentRegistry,
    rng: &mut dyn RandomSource,
) {
    for room in rooms {
        let Some(blueprint) =
            blueprints.iter().find(|blueprint| blueprint.definition().id == room.room_type)
        else {
            continue;
        };
        room.contents = blueprint.populate(level, content, rng);
        room.description = describe_room(&blueprint.definition().name, &room.features, theme, rng);
    }
}

pub(super) fn describe_room(
    type_name: &str,
    features: &[String],
    theme: &ThemeDefinition,
    rng: &mut dyn RandomSource,
) -> String {
    let noun = type_name.to_lowercase();
    let subject = match rng.index(theme.adjectives.len()) {
        Some(index) => format!("{} {noun}", theme.adjectives[index]),
        None => noun,
    };
    let mut description = format!("{} {subject}", article_for(&subject));

    let features: Vec<String> = features.iter().map(|feature| feature.replace('_', " ")).collect();
    if let Some((last, rest)) = features.split_last() {
        if rest.is_empty() {
            description.push_str(&format!(" with {last}"));
        } else {
            description.push_str(&format!(" with {} and {last}", rest.join(", ")));
        }
    }
    description.push('.');
    description
}

fn article_for(word: &str) -> &'static str {
    match word.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "An",
        _ => "A",
    }
}
