//! Generation requests and the size presets they resolve against.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::registry::DEFAULT_THEME;

/// Upper bound on rooms requested per floor.
pub const MAX_ROOMS_PER_FLOOR: u32 = 15;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    Small,
    #[default]
    Medium,
    Large,
    Huge,
}

impl SizeClass {
    pub const ALL: [Self; 4] = [Self::Small, Self::Medium, Self::Large, Self::Huge];

    pub fn label(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Huge => "huge",
        }
    }

    /// Grid `(width, height)` in cells.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Small => (10, 10),
            Self::Medium => (20, 20),
            Self::Large => (30, 30),
            Self::Huge => (40, 40),
        }
    }

    pub fn default_room_count(self) -> u32 {
        match self {
            Self::Small => 5,
            Self::Medium => 8,
            Self::Large => 12,
            Self::Huge => 15,
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SizeClass {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|size| size.label() == normalized)
            .ok_or_else(|| ConfigError::UnknownSize(value.to_string()))
    }
}

/// Caller-facing generation parameters. Optional fields fall back to the
/// `dungeon` theme, the medium size class and that size's room count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DungeonRequest {
    pub name: String,
    pub level: u32,
    pub floors: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms_per_floor: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl DungeonRequest {
    pub fn new(name: impl Into<String>, level: u32, floors: u32) -> Self {
        Self { name: name.into(), level, floors, rooms_per_floor: None, theme: None, size: None }
    }

    pub fn with_rooms_per_floor(mut self, rooms: u32) -> Self {
        self.rooms_per_floor = Some(rooms);
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Checks the request and resolves defaults. Theme existence is checked
    /// later against the registries.
    pub fn validate(&self) -> Result<GenerationPlan, ConfigError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.level == 0 {
            return Err(ConfigError::NotPositive { field: "level" });
        }
        if self.floors == 0 {
            return Err(ConfigError::NotPositive { field: "floors" });
        }

        let size = match &self.size {
            Some(size) => size.parse::<SizeClass>()?,
            None => SizeClass::default(),
        };
        let rooms_per_floor = match self.rooms_per_floor {
            Some(0) => return Err(ConfigError::NotPositive { field: "roomsPerFloor" }),
            Some(rooms) => rooms.min(MAX_ROOMS_PER_FLOOR),
            None => size.default_room_count(),
        };
        let theme = self.theme.clone().unwrap_or_else(|| DEFAULT_THEME.to_string());

        Ok(GenerationPlan {
            name: name.to_string(),
            level: self.level,
            floors: self.floors,
            rooms_per_floor,
            theme,
            size,
        })
    }
}

/// A validated request with every default filled in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationPlan {
    pub name: String,
    pub level: u32,
    pub floors: u32,
    pub rooms_per_floor: u32,
    pub theme: String,
    pub size: SizeClass,
}
