//! Room-type and theme registries, bundled into the [`Registries`] value a
//! generator borrows for the duration of a run.

mod room_types;
mod themes;

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ConfigError, RegistryError};

pub use room_types::{
    ContentPolicy, FEATURE_INCLUSION_PROBABILITY, ROOM_TYPE_COMBAT, ROOM_TYPE_PUZZLE,
    ROOM_TYPE_REST, ROOM_TYPE_SPECIAL, ROOM_TYPE_TREASURE, RoomBlueprint, RoomTypeDefinition,
    RoomTypeRegistry,
};
pub use themes::{DEFAULT_THEME, ThemeDefinition, ThemeRegistry};

static IDENTIFIER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9_-]*$").expect("identifier pattern is a valid regex")
});

pub(crate) fn validate_identifier(id: &str) -> Result<(), RegistryError> {
    if IDENTIFIER_PATTERN.is_match(id) {
        Ok(())
    } else {
        Err(RegistryError::InvalidIdentifier(id.to_string()))
    }
}

/// Everything a generator looks up by identifier. Built once at startup
/// (optionally extended from a config file) and then only borrowed.
#[derive(Debug, Default)]
pub struct Registries {
    pub room_types: RoomTypeRegistry,
    pub themes: ThemeRegistry,
}

impl Registries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        Self { room_types: RoomTypeRegistry::with_defaults(), themes: ThemeRegistry::with_defaults() }
    }

    pub fn register_room_type(&mut self, definition: RoomTypeDefinition) -> Result<(), RegistryError> {
        self.room_types.register(definition)
    }

    pub fn register_theme(
        &mut self,
        id: impl Into<String>,
        definition: ThemeDefinition,
    ) -> Result<(), RegistryError> {
        self.themes.register(id, definition)
    }

    /// Resolves a theme and the room types it may place on a
    /// `width × height` grid. Types whose minimum footprint cannot fit the
    /// grid interior are left out.
    pub(crate) fn candidates_for(
        &self,
        theme_id: &str,
        width: u32,
        height: u32,
    ) -> Result<(&ThemeDefinition, Vec<&dyn RoomBlueprint>), ConfigError> {
        let theme =
            self.themes.get(theme_id).ok_or_else(|| ConfigError::UnknownTheme(theme_id.to_string()))?;

        let mut blueprints = Vec::new();
        if theme.room_types.is_empty() {
            blueprints.extend(self.room_types.iter());
        } else {
            for room_type in &theme.room_types {
                let blueprint = self.room_types.get(room_type).ok_or_else(|| {
                    ConfigError::UnknownRoomType {
                        theme: theme_id.to_string(),
                        room_type: room_type.clone(),
                    }
                })?;
                blueprints.push(blueprint);
            }
        }

        blueprints.retain(|blueprint| {
            let definition = blueprint.definition();
            fits_interior(definition.min_width, width)
                && fits_interior(definition.min_height, height)
        });
        if blueprints.is_empty() {
            return Err(ConfigError::NoRoomTypeFits { theme: theme_id.to_string(), width, height });
        }
        Ok((theme, blueprints))
    }
}

/// A one-cell border on each side must remain around the room.
fn fits_interior(min: u32, extent: u32) -> bool {
    min.checked_add(2).is_some_and(|padded| padded <= extent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_must_be_lowercase_slugs() {
        assert!(validate_identifier("stone_hall-2").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("2fast").is_err());
        assert!(validate_identifier("Throne").is_err());
        assert!(validate_identifier("with space").is_err());
    }

    #[test]
    fn default_theme_offers_every_registered_room_type() {
        let registries = Registries::with_defaults();
        let (_, candidates) =
            registries.candidates_for(DEFAULT_THEME, 20, 20).expect("default theme resolves");
        assert_eq!(candidates.len(), registries.room_types.len());
    }

    #[test]
    fn unknown_theme_is_a_config_error() {
        let registries = Registries::with_defaults();
        let err = registries.candidates_for("moon_base", 20, 20).map(|_| ()).unwrap_err();
        assert_eq!(err, ConfigError::UnknownTheme("moon_base".to_string()));
    }

    #[test]
    fn theme_with_unknown_room_type_is_rejected() {
        let mut registries = Registries::with_defaults();
        registries
            .register_theme(
                "broken",
                ThemeDefinition {
                    name: "Broken".to_string(),
                    room_types: vec!["ballroom".to_string()],
                    ..ThemeDefinition::default()
                },
            )
            .expect("theme registration validates only its own fields");

        let err = registries.candidates_for("broken", 20, 20).map(|_| ()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownRoomType { .. }));
    }

    #[test]
    fn room_types_too_large_for_the_grid_are_filtered_out() {
        let mut registries = Registries::new();
        registries
            .register_theme(DEFAULT_THEME, ThemeDefinition::named("Plain"))
            .expect("theme registers");
        registries
            .register_room_type(RoomTypeDefinition {
                id: "hall".to_string(),
                name: "Great Hall".to_string(),
                weight: 1.0,
                min_width: 12,
                max_width: 14,
                min_height: 4,
                max_height: 6,
                features: Vec::new(),
                content: ContentPolicy::Ambient,
            })
            .expect("room type registers");

        let err = registries.candidates_for(DEFAULT_THEME, 10, 10).map(|_| ()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NoRoomTypeFits { theme: DEFAULT_THEME.to_string(), width: 10, height: 10 }
        );
        assert!(registries.candidates_for(DEFAULT_THEME, 20, 20).is_ok());
    }

    #[test]
    fn huge_minimum_sizes_are_filtered_without_overflow() {
        let mut registries = Registries::new();
        registries
            .register_theme(DEFAULT_THEME, ThemeDefinition::named("Plain"))
            .expect("theme registers");
        registries
            .register_room_type(RoomTypeDefinition {
                id: "endless".to_string(),
                name: "Endless Gallery".to_string(),
                weight: 1.0,
                min_width: u32::MAX,
                max_width: u32::MAX,
                min_height: u32::MAX - 1,
                max_height: u32::MAX,
                features: Vec::new(),
                content: ContentPolicy::Ambient,
            })
            .expect("room type registers");

        let err = registries.candidates_for(DEFAULT_THEME, 40, 40).map(|_| ()).unwrap_err();
        assert!(matches!(err, ConfigError::NoRoomTypeFits { .. }));
        assert!(!fits_interior(u32::MAX, u32::MAX));
        assert!(fits_interior(3, 5));
    }
}
