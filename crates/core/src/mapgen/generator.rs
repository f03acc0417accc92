//! Multi-floor dungeon generation on top of [`FloorBuilder`].

mod pipeline;

use chrono::Utc;

use crate::content::ContentRegistry;
use crate::error::ConfigError;
use crate::ids::DungeonId;
use crate::registry::Registries;
use crate::request::DungeonRequest;
use crate::rng::RandomSource;

use super::model::Dungeon;
use pipeline::FloorBuilder;

/// Builds dungeons from requests. Holds shared borrows of the registries, so
/// nothing can be registered while a generator is alive.
pub struct DungeonGenerator<'a> {
    registries: &'a Registries,
    content: &'a dyn ContentRegistry,
}

impl<'a> DungeonGenerator<'a> {
    pub fn new(registries: &'a Registries, content: &'a dyn ContentRegistry) -> Self {
        Self { registries, content }
    }

    /// Validates `request` and generates every floor in order. Floor `i`
    /// (0-based) gets difficulty `level + i`. All configuration problems are
    /// reported before any floor is built.
    pub fn generate(
        &self,
        request: &DungeonRequest,
        rng: &mut dyn RandomSource,
    ) -> Result<Dungeon, ConfigError> {
        let plan = request.validate()?;
        let (grid_width, grid_height) = plan.size.dimensions();
        let (theme, blueprints) =
            self.registries.candidates_for(&plan.theme, grid_width, grid_height)?;

        let id = DungeonId::generate(rng);
        let builder = FloorBuilder {
            dungeon_name: &plan.name,
            theme_id: &plan.theme,
            theme,
            blueprints: &blueprints,
            content: self.content,
            grid_width,
            grid_height,
            requested_rooms: plan.rooms_per_floor,
            floor_count: plan.floors,
        };

        let mut floors = Vec::with_capacity(plan.floors as usize);
        for index in 0..plan.floors {
            floors.push(builder.build(index + 1, plan.level.saturating_add(index), rng));
        }

        let dungeon = Dungeon {
            id,
            name: plan.name.clone(),
            level: plan.level,
            theme: plan.theme.clone(),
            size: plan.size,
            floors,
            created_at: Utc::now(),
        };
        tracing::info!(
            dungeon = %dungeon.id,
            name = %dungeon.name,
            floors = dungeon.floors.len(),
            rooms = dungeon.room_count(),
            corridors = dungeon.corridor_count(),
            "generated dungeon"
        );
        Ok(dungeon)
    }
}
