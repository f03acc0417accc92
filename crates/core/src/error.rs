//! Error types for request validation, registration, configuration files and
//! dungeon import/export.

use std::io;

use thiserror::Error;

/// A generation request was rejected before any grid work started.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("dungeon name must not be empty")]
    EmptyName,

    #[error("{field} must be at least 1")]
    NotPositive { field: &'static str },

    #[error("unknown size class `{0}` (expected small, medium, large or huge)")]
    UnknownSize(String),

    #[error("unknown theme `{0}`")]
    UnknownTheme(String),

    #[error("theme `{theme}` references unknown room type `{room_type}`")]
    UnknownRoomType { theme: String, room_type: String },

    #[error("no room type of theme `{theme}` fits a {width}x{height} grid")]
    NoRoomTypeFits { theme: String, width: u32, height: u32 },
}

/// A room type, theme or content entry failed validation at registration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistryError {
    #[error("invalid identifier `{0}` (expected lowercase ascii, digits, `_` or `-`)")]
    InvalidIdentifier(String),

    #[error("{kind} `{id}` is already registered")]
    Duplicate { kind: &'static str, id: String },

    #[error("room type `{id}` has invalid weight {weight}")]
    InvalidWeight { id: String, weight: f64 },

    #[error("room type `{id}` has invalid size bounds: {reason}")]
    InvalidBounds { id: String, reason: String },

    #[error("{kind} `{id}` must have a non-empty name")]
    EmptyName { kind: &'static str, id: String },
}

/// Structural or integrity failure while importing an exported dungeon.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DungeonDataError {
    #[error("invalid dungeon data: malformed document: {0}")]
    Malformed(String),

    #[error("invalid dungeon data: unsupported format version {0}")]
    UnsupportedVersion(u16),

    #[error("invalid dungeon data: checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid dungeon data: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize dungeon: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("dungeon export I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Reading an exported dungeon from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dungeon import I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Data(#[from] DungeonDataError),
}

#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("failed to read generator config: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse generator config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
