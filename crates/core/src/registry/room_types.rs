//! Weighted room-type definitions and the capability interface placement and
//! population go through.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::content::ContentRegistry;
use crate::error::RegistryError;
use crate::mapgen::model::RoomContent;
use crate::mapgen::populate::contents_for_policy;
use crate::rng::RandomSource;

use super::validate_identifier;

pub const ROOM_TYPE_COMBAT: &str = "combat";
pub const ROOM_TYPE_TREASURE: &str = "treasure";
pub const ROOM_TYPE_PUZZLE: &str = "puzzle";
pub const ROOM_TYPE_REST: &str = "rest";
pub const ROOM_TYPE_SPECIAL: &str = "special";

/// Chance that each of a room type's feature tags shows up on a placed room.
pub const FEATURE_INCLUSION_PROBABILITY: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentPolicy {
    Combat,
    Treasure,
    Puzzle,
    /// Flavor only: rest areas, shrines and other set pieces.
    Ambient,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomTypeDefinition {
    pub id: String,
    pub name: String,
    pub weight: f64,
    pub min_width: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub max_height: u32,
    #[serde(default)]
    pub features: Vec<String>,
    pub content: ContentPolicy,
}

impl RoomTypeDefinition {
    pub fn width_bounds(&self) -> (u32, u32) {
        (self.min_width, self.max_width)
    }

    pub fn height_bounds(&self) -> (u32, u32) {
        (self.min_height, self.max_height)
    }

    fn validate(&self) -> Result<(), RegistryError> {
        validate_identifier(&self.id)?;
        if self.name.trim().is_empty() {
            return Err(RegistryError::EmptyName { kind: "room type", id: self.id.clone() });
        }
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(RegistryError::InvalidWeight { id: self.id.clone(), weight: self.weight });
        }
        for (axis, min, max) in [
            ("width", self.min_width, self.max_width),
            ("height", self.min_height, self.max_height),
        ] {
            if min == 0 {
                return Err(RegistryError::InvalidBounds {
                    id: self.id.clone(),
                    reason: format!("minimum {axis} must be at least 1"),
                });
            }
            if min > max {
                return Err(RegistryError::InvalidBounds {
                    id: self.id.clone(),
                    reason: format!("minimum {axis} {min} exceeds maximum {max}"),
                });
            }
        }
        Ok(())
    }
}

/// What placement and population need from a room type. The provided
/// methods cover data-driven definitions; extensions can override them.
pub trait RoomBlueprint: fmt::Debug + Send + Sync {
    fn definition(&self) -> &RoomTypeDefinition;

    /// Uniform width and height within the declared inclusive bounds.
    fn sample_size(&self, rng: &mut dyn RandomSource) -> (u32, u32) {
        let definition = self.definition();
        let width = rng.range_u32(definition.min_width, definition.max_width);
        let height = rng.range_u32(definition.min_height, definition.max_height);
        (width, height)
    }

    fn decorate(&self, rng: &mut dyn RandomSource) -> Vec<String> {
        self.definition()
            .features
            .iter()
            .filter(|_| rng.chance(FEATURE_INCLUSION_PROBABILITY))
            .cloned()
            .collect()
    }

    fn populate(
        &self,
        level: u32,
        content: &dyn ContentRegistry,
        rng: &mut dyn RandomSource,
    ) -> Vec<RoomContent> {
        contents_for_policy(self.definition().content, level, content, rng)
    }
}

impl RoomBlueprint for RoomTypeDefinition {
    fn definition(&self) -> &RoomTypeDefinition {
        self
    }
}

#[derive(Debug, Default)]
pub struct RoomTypeRegistry {
    blueprints: Vec<Box<dyn RoomBlueprint>>,
}

impl RoomTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.blueprints.extend(
            default_room_types()
                .into_iter()
                .map(|definition| Box::new(definition) as Box<dyn RoomBlueprint>),
        );
        registry
    }

    pub fn register(&mut self, definition: RoomTypeDefinition) -> Result<(), RegistryError> {
        self.register_blueprint(Box::new(definition))
    }

    /// Registers a custom blueprint. Its definition is validated like a
    /// plain one and its identifier must be new.
    pub fn register_blueprint(
        &mut self,
        blueprint: Box<dyn RoomBlueprint>,
    ) -> Result<(), RegistryError> {
        let definition = blueprint.definition();
        definition.validate()?;
        if self.get(&definition.id).is_some() {
            return Err(RegistryError::Duplicate { kind: "room type", id: definition.id.clone() });
        }
        tracing::debug!(id = %definition.id, weight = definition.weight, "registered room type");
        self.blueprints.push(blueprint);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&dyn RoomBlueprint> {
        self.blueprints
            .iter()
            .find(|blueprint| blueprint.definition().id == id)
            .map(|blueprint| blueprint.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn RoomBlueprint> {
        self.blueprints.iter().map(|blueprint| blueprint.as_ref())
    }

    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }
}

fn room_type(
    id: &str,
    name: &str,
    weight: f64,
    (min_width, max_width): (u32, u32),
    (min_height, max_height): (u32, u32),
    features: &[&str],
    content: ContentPolicy,
) -> RoomTypeDefinition {
    RoomTypeDefinition {
        id: id.to_string(),
        name: name.to_string(),
        weight,
        min_width,
        max_width,
        min_height,
        max_height,
        features: features.iter().map(|feature| feature.to_string()).collect(),
        content,
    }
}

fn default_room_types() -> Vec<RoomTypeDefinition> {
    vec![
        room_type(
            ROOM_TYPE_COMBAT,
            "Guard Chamber",
            4.0,
            (3, 7),
            (3, 6),
            &["pillars", "rubble", "weapon_rack", "blood_stains"],
            ContentPolicy::Combat,
        ),
        room_type(
            ROOM_TYPE_TREASURE,
            "Treasury",
            1.5,
            (3, 5),
            (3, 5),
            &["chest", "gilded_alcove", "hidden_cache"],
            ContentPolicy::Treasure,
        ),
        room_type(
            ROOM_TYPE_PUZZLE,
            "Puzzle Chamber",
            1.0,
            (4, 6),
            (4, 6),
            &["pressure_plates", "rune_circle", "levers"],
            ContentPolicy::Puzzle,
        ),
        room_type(
            ROOM_TYPE_REST,
            "Resting Nook",
            1.5,
            (3, 5),
            (3, 4),
            &["campfire", "bedrolls", "fresh_water"],
            ContentPolicy::Ambient,
        ),
        room_type(
            ROOM_TYPE_SPECIAL,
            "Shrine",
            0.5,
            (4, 8),
            (4, 8),
            &["altar", "statue", "shimmering_portal"],
            ContentPolicy::Ambient,
        ),
    ]
}
