//! Content catalog consumed by room population.
//!
//! Generation only ever reads content through [`ContentRegistry`]. The
//! in-memory [`ContentCatalog`] implements it for the CLI and for tests, and
//! validates every entry when it is registered rather than when it is read.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};

use crate::error::RegistryError;
use crate::registry::validate_identifier;

pub mod keys {
    pub const MONSTER_GIANT_RAT: &str = "giant_rat";
    pub const MONSTER_GOBLIN: &str = "goblin";
    pub const MONSTER_SKELETON: &str = "skeleton";
    pub const MONSTER_ORC_WARRIOR: &str = "orc_warrior";
    pub const MONSTER_GHOUL: &str = "ghoul";
    pub const MONSTER_OGRE: &str = "ogre";
    pub const MONSTER_WRAITH: &str = "wraith";
    pub const MONSTER_TROLL: &str = "troll";
    pub const MONSTER_YOUNG_DRAGON: &str = "young_dragon";
    pub const MONSTER_LICH: &str = "lich";

    pub const ITEM_HEALING_POTION: &str = "healing_potion";
    pub const ITEM_ROPE_LADDER: &str = "rope_ladder";
    pub const ITEM_SILVER_DAGGER: &str = "silver_dagger";
    pub const ITEM_SCROLL_OF_LIGHT: &str = "scroll_of_light";
    pub const ITEM_ENCHANTED_SHIELD: &str = "enchanted_shield";
    pub const ITEM_RING_OF_WARDING: &str = "ring_of_warding";
    pub const ITEM_STAFF_OF_EMBERS: &str = "staff_of_embers";

    pub const SPELL_MAGIC_MISSILE: &str = "magic_missile";
    pub const SPELL_MISTY_STEP: &str = "misty_step";
    pub const SPELL_FIREBALL: &str = "fireball";

    pub const PUZZLE_RIDDLE_DOOR: &str = "riddle_door";
    pub const PUZZLE_LEVER_SEQUENCE: &str = "lever_sequence";
    pub const PUZZLE_PRESSURE_PLATES: &str = "pressure_plates";
    pub const PUZZLE_RUNE_LOCK: &str = "rune_lock";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentCategory {
    Monster,
    Item,
    Spell,
    Puzzle,
}

impl ContentCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Monster => "monster",
            Self::Item => "item",
            Self::Spell => "spell",
            Self::Puzzle => "puzzle",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterEntry {
    pub id: String,
    pub name: String,
    /// Challenge rating compared against the floor level.
    pub difficulty: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEntry {
    pub id: String,
    pub name: String,
    pub difficulty: u32,
    #[serde(default)]
    pub value: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellEntry {
    pub id: String,
    pub name: String,
    pub difficulty: u32,
    #[serde(default)]
    pub school: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleEntry {
    pub id: String,
    pub name: String,
    pub difficulty: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ContentEntry {
    Monster(MonsterEntry),
    Item(ItemEntry),
    Spell(SpellEntry),
    Puzzle(PuzzleEntry),
}

impl ContentEntry {
    pub fn category(&self) -> ContentCategory {
        match self {
            Self::Monster(_) => ContentCategory::Monster,
            Self::Item(_) => ContentCategory::Item,
            Self::Spell(_) => ContentCategory::Spell,
            Self::Puzzle(_) => ContentCategory::Puzzle,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Monster(entry) => &entry.id,
            Self::Item(entry) => &entry.id,
            Self::Spell(entry) => &entry.id,
            Self::Puzzle(entry) => &entry.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Monster(entry) => &entry.name,
            Self::Item(entry) => &entry.name,
            Self::Spell(entry) => &entry.name,
            Self::Puzzle(entry) => &entry.name,
        }
    }

    pub fn difficulty(&self) -> u32 {
        match self {
            Self::Monster(entry) => entry.difficulty,
            Self::Item(entry) => entry.difficulty,
            Self::Spell(entry) => entry.difficulty,
            Self::Puzzle(entry) => entry.difficulty,
        }
    }

    fn validate(&self) -> Result<(), RegistryError> {
        validate_identifier(self.id())?;
        if self.name().trim().is_empty() {
            return Err(RegistryError::EmptyName {
                kind: self.category().label(),
                id: self.id().to_string(),
            });
        }
        Ok(())
    }
}

/// Read-only lookup over the content catalog.
pub trait ContentRegistry {
    fn list_by_category(&self, category: ContentCategory) -> Vec<&ContentEntry>;

    fn filter_by_max_difficulty<'a>(
        &self,
        entries: Vec<&'a ContentEntry>,
        level: u32,
    ) -> Vec<&'a ContentEntry> {
        entries.into_iter().filter(|entry| entry.difficulty() <= level).collect()
    }
}

new_key_type! {
    pub struct EntryKey;
}

#[derive(Clone, Debug, Default)]
pub struct ContentCatalog {
    entries: SlotMap<EntryKey, ContentEntry>,
    by_category: BTreeMap<ContentCategory, Vec<EntryKey>>,
}

impl ContentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: ContentEntry) -> Result<EntryKey, RegistryError> {
        entry.validate()?;
        if self.entries.values().any(|existing| {
            existing.category() == entry.category() && existing.id() == entry.id()
        }) {
            return Err(RegistryError::Duplicate {
                kind: entry.category().label(),
                id: entry.id().to_string(),
            });
        }
        tracing::debug!(category = entry.category().label(), id = entry.id(), "registered content");
        Ok(self.insert(entry))
    }

    pub fn get(&self, key: EntryKey) -> Option<&ContentEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, entry: ContentEntry) -> EntryKey {
        let category = entry.category();
        let key = self.entries.insert(entry);
        self.by_category.entry(category).or_default().push(key);
        key
    }

    pub fn build_default() -> Self {
        let mut catalog = Self::new();
        let monsters = [
            (keys::MONSTER_GIANT_RAT, "Giant Rat", 1, &["beast"][..]),
            (keys::MONSTER_GOBLIN, "Goblin", 1, &["humanoid"][..]),
            (keys::MONSTER_SKELETON, "Skeleton", 2, &["undead"][..]),
            (keys::MONSTER_ORC_WARRIOR, "Orc Warrior", 3, &["humanoid"][..]),
            (keys::MONSTER_GHOUL, "Ghoul", 4, &["undead"][..]),
            (keys::MONSTER_OGRE, "Ogre", 5, &["giant"][..]),
            (keys::MONSTER_WRAITH, "Wraith", 6, &["undead"][..]),
            (keys::MONSTER_TROLL, "Troll", 7, &["giant"][..]),
            (keys::MONSTER_YOUNG_DRAGON, "Young Dragon", 9, &["dragon"][..]),
            (keys::MONSTER_LICH, "Lich", 12, &["undead", "caster"][..]),
        ];
        for (id, name, difficulty, tags) in monsters {
            catalog.insert(ContentEntry::Monster(MonsterEntry {
                id: id.to_string(),
                name: name.to_string(),
                difficulty,
                tags: tags.iter().map(|tag| tag.to_string()).collect(),
            }));
        }

        let items = [
            (keys::ITEM_HEALING_POTION, "Potion of Healing", 1, 50),
            (keys::ITEM_ROPE_LADDER, "Rope Ladder", 1, 10),
            (keys::ITEM_SILVER_DAGGER, "Silver Dagger", 2, 120),
            (keys::ITEM_SCROLL_OF_LIGHT, "Scroll of Light", 1, 25),
            (keys::ITEM_ENCHANTED_SHIELD, "Enchanted Shield", 4, 400),
            (keys::ITEM_RING_OF_WARDING, "Ring of Warding", 6, 900),
            (keys::ITEM_STAFF_OF_EMBERS, "Staff of Embers", 8, 1_500),
        ];
        for (id, name, difficulty, value) in items {
            catalog.insert(ContentEntry::Item(ItemEntry {
                id: id.to_string(),
                name: name.to_string(),
                difficulty,
                value,
            }));
        }

        let spells = [
            (keys::SPELL_MAGIC_MISSILE, "Magic Missile", 1, "evocation"),
            (keys::SPELL_MISTY_STEP, "Misty Step", 2, "conjuration"),
            (keys::SPELL_FIREBALL, "Fireball", 3, "evocation"),
        ];
        for (id, name, difficulty, school) in spells {
            catalog.insert(ContentEntry::Spell(SpellEntry {
                id: id.to_string(),
                name: name.to_string(),
                difficulty,
                school: school.to_string(),
            }));
        }

        let puzzles = [
            (keys::PUZZLE_RIDDLE_DOOR, "Riddle Door", 1),
            (keys::PUZZLE_LEVER_SEQUENCE, "Lever Sequence", 2),
            (keys::PUZZLE_PRESSURE_PLATES, "Pressure Plates", 3),
            (keys::PUZZLE_RUNE_LOCK, "Rune Lock", 5),
        ];
        for (id, name, difficulty) in puzzles {
            catalog.insert(ContentEntry::Puzzle(PuzzleEntry {
                id: id.to_string(),
                name: name.to_string(),
                difficulty,
            }));
        }

        catalog
    }
}

impl ContentRegistry for ContentCatalog {
    fn list_by_category(&self, category: ContentCategory) -> Vec<&ContentEntry> {
        self.by_category
            .get(&category)
            .map(|keys| keys.iter().filter_map(|&key| self.entries.get(key)).collect())
            .unwrap_or_default()
    }
}
