use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::content::{ContentCatalog, ContentEntry};
use crate::error::ConfigFileError;
use crate::registry::{Registries, RoomTypeDefinition, ThemeDefinition};

/// TOML schema for generator extensions: extra room types, themes and
/// content entries layered onto the built-in registries.
///
/// ```toml
/// [[room_types]]
/// id = "library"
/// name = "Library"
/// weight = 1.0
/// min_width = 4
/// max_width = 6
/// min_height = 4
/// max_height = 5
/// features = ["bookshelves"]
/// content = "puzzle"
///
/// [themes.archive]
/// name = "Sunken Archive"
/// room_types = ["library", "rest"]
///
/// [[content]]
/// category = "monster"
/// id = "bookwyrm"
/// name = "Bookwyrm"
/// difficulty = 3
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub room_types: Vec<RoomTypeDefinition>,
    #[serde(default)]
    pub themes: BTreeMap<String, ThemeDefinition>,
    #[serde(default)]
    pub content: Vec<ContentEntry>,
}

impl GeneratorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigFileError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigFileError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Registers everything through the validating registration API. Stops at
    /// the first rejected entry; entries registered before it stay registered.
    pub fn apply(
        self,
        registries: &mut Registries,
        catalog: &mut ContentCatalog,
    ) -> Result<(), ConfigFileError> {
        let (room_types, themes, entries) =
            (self.room_types.len(), self.themes.len(), self.content.len());

        for definition in self.room_types {
            registries.register_room_type(definition)?;
        }
        for (id, theme) in self.themes {
            registries.register_theme(id, theme)?;
        }
        for entry in self.content {
            catalog.register(entry)?;
        }

        tracing::debug!(room_types, themes, entries, "applied generator config");
        Ok(())
    }
}
