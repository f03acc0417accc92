pub mod config;
pub mod content;
pub mod error;
pub mod export;
pub mod ids;
pub mod mapgen;
pub mod registry;
pub mod request;
pub mod rng;
pub mod types;

pub use config::GeneratorConfig;
pub use content::{ContentCatalog, ContentCategory, ContentEntry, ContentRegistry};
pub use error::{
    ConfigError, ConfigFileError, DungeonDataError, ExportError, LoadError, RegistryError,
};
pub use export::{
    EXPORT_FORMAT_VERSION, export_dungeon, import_dungeon, read_export, validate_dungeon,
    write_export,
};
pub use ids::{CorridorId, DungeonId, FloorId, RoomId};
pub use mapgen::{
    Connection, Corridor, CorridorEndpoint, CorridorShape, Dungeon, DungeonGenerator, Floor,
    Passage, PassageKind, Room, RoomContent, SpatialGrid,
};
pub use registry::{
    ContentPolicy, Registries, RoomBlueprint, RoomTypeDefinition, RoomTypeRegistry,
    ThemeDefinition, ThemeRegistry,
};
pub use request::{DungeonRequest, GenerationPlan, MAX_ROOMS_PER_FLOOR, SizeClass};
pub use rng::{RandomSource, SeededRng};
pub use types::{Pos, Rect};
