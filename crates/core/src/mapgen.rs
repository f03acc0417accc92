//! Dungeon generation split into placement, connectivity and population
//! stages, composed by [`DungeonGenerator`].

pub mod model;

mod corridors;
mod generator;
mod grid;
mod layout;
pub(crate) mod populate;

pub use generator::DungeonGenerator;
pub use grid::SpatialGrid;
pub use model::{
    Connection, Corridor, CorridorEndpoint, CorridorShape, Dungeon, Floor, Passage, PassageKind,
    Room, RoomContent,
};
