use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

use super::room_types::{
    ROOM_TYPE_COMBAT, ROOM_TYPE_PUZZLE, ROOM_TYPE_REST, ROOM_TYPE_SPECIAL, ROOM_TYPE_TREASURE,
};
use super::validate_identifier;

pub const DEFAULT_THEME: &str = "dungeon";

/// Flavor bundle applied to a whole dungeon. An empty `room_types` list
/// means every registered room type is eligible.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub room_types: Vec<String>,
    #[serde(default)]
    pub adjectives: Vec<String>,
    #[serde(default)]
    pub corridor_features: Vec<String>,
}

impl ThemeDefinition {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, ThemeDefinition>,
}

impl ThemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (id, theme) in default_themes() {
            registry.themes.insert(id.to_string(), theme);
        }
        registry
    }

    pub fn register(
        &mut self,
        id: impl Into<String>,
        definition: ThemeDefinition,
    ) -> Result<(), RegistryError> {
        let id = id.into();
        validate_identifier(&id)?;
        if definition.name.trim().is_empty() {
            return Err(RegistryError::EmptyName { kind: "theme", id });
        }
        if self.themes.contains_key(&id) {
            return Err(RegistryError::Duplicate { kind: "theme", id });
        }
        tracing::debug!(id = %id, room_types = definition.room_types.len(), "registered theme");
        self.themes.insert(id, definition);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ThemeDefinition> {
        self.themes.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn default_themes() -> Vec<(&'static str, ThemeDefinition)> {
    vec![
        (
            DEFAULT_THEME,
            ThemeDefinition {
                name: "Classic Dungeon".to_string(),
                description: "Stone corridors and torchlit chambers beneath the earth.".to_string(),
                room_types: Vec::new(),
                adjectives: strings(&["torchlit", "dusty", "vaulted", "cramped"]),
                corridor_features: strings(&["torch_sconces", "cobwebs", "rubble"]),
            },
        ),
        (
            "crypt",
            ThemeDefinition {
                name: "Forgotten Crypt".to_string(),
                description: "Burial halls where the dead do not rest easily.".to_string(),
                room_types: strings(&[
                    ROOM_TYPE_COMBAT,
                    ROOM_TYPE_TREASURE,
                    ROOM_TYPE_PUZZLE,
                    ROOM_TYPE_SPECIAL,
                ]),
                adjectives: strings(&["bone-strewn", "silent", "cold", "candlelit"]),
                corridor_features: strings(&["burial_niches", "skulls", "cobwebs"]),
            },
        ),
        (
            "cavern",
            ThemeDefinition {
                name: "Deep Caverns".to_string(),
                description: "Natural caves carved by water and time.".to_string(),
                room_types: strings(&[
                    ROOM_TYPE_COMBAT,
                    ROOM_TYPE_TREASURE,
                    ROOM_TYPE_REST,
                    ROOM_TYPE_SPECIAL,
                ]),
                adjectives: strings(&["damp", "echoing", "moss-covered", "glittering"]),
                corridor_features: strings(&["stalactites", "dripping_water", "glowing_fungus"]),
            },
        ),
        (
            "fortress",
            ThemeDefinition {
                name: "Ruined Fortress".to_string(),
                description: "A garrison keep overrun and half collapsed.".to_string(),
                room_types: strings(&[ROOM_TYPE_COMBAT, ROOM_TYPE_TREASURE, ROOM_TYPE_REST]),
                adjectives: strings(&["scorched", "barricaded", "crumbling"]),
                corridor_features: strings(&["arrow_slits", "collapsed_beams", "banners"]),
            },
        ),
    ]
}
