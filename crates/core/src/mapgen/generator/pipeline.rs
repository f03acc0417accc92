//! Single-floor build: placement, corridors, population, then entrance and
//! exit assignment.

use crate::content::ContentRegistry;
use crate::ids::FloorId;
use crate::registry::{RoomBlueprint, ThemeDefinition};
use crate::rng::RandomSource;

use super::super::corridors::connect_rooms;
use super::super::grid::SpatialGrid;
use super::super::layout::RoomPlacer;
use super::super::model::{Floor, Passage, PassageKind, Room};
use super::super::populate::populate_rooms;

pub(super) struct FloorBuilder<'a> {
    pub(super) dungeon_name: &'a str,
    pub(super) theme_id: &'a str,
    pub(super) theme: &'a ThemeDefinition,
    pub(super) blueprints: &'a [&'a dyn RoomBlueprint],
    pub(super) content: &'a dyn ContentRegistry,
    pub(super) grid_width: u32,
    pub(super) grid_height: u32,
    pub(super) requested_rooms: u32,
    pub(super) floor_count: u32,
}

impl FloorBuilder<'_> {
    pub(super) fn build(&self, number: u32, level: u32, rng: &mut dyn RandomSource) -> Floor {
        let id = FloorId::generate(rng);
        let mut grid = SpatialGrid::new(self.grid_width, self.grid_height);

        let mut rooms = RoomPlacer::new(self.blueprints).place_rooms(
            &mut grid,
            id,
            self.requested_rooms,
            rng,
        );
        let corridors = connect_rooms(&mut rooms, &self.theme.corridor_features, rng);
        populate_rooms(&mut rooms, self.blueprints, self.theme, level, self.content, rng);

        let (entrances, exits) = self.passages(number, &rooms);
        let description = format!(
            "Floor {number} of {}: {} ({} rooms, level {level}).",
            self.dungeon_name,
            self.theme.name,
            rooms.len()
        );

        Floor {
            id,
            number,
            level,
            theme: self.theme_id.to_string(),
            grid_width: self.grid_width,
            grid_height: self.grid_height,
            requested_rooms: self.requested_rooms,
            rooms,
            corridors,
            entrances,
            exits,
            description,
        }
    }

    /// First placed room is the way in, last placed room the way out. On a
    /// single-room floor both point at the same room.
    fn passages(&self, number: u32, rooms: &[Room]) -> (Vec<Passage>, Vec<Passage>) {
        let entrance_kind =
            if number == 1 { PassageKind::DungeonEntrance } else { PassageKind::StairsUp };
        let exit_kind = if number == self.floor_count {
            PassageKind::DungeonExit
        } else {
            PassageKind::StairsDown
        };

        let entrances = rooms
            .first()
            .map(|room| Passage { room_id: room.id, kind: entrance_kind })
            .into_iter()
            .collect();
        let exits = rooms
            .last()
            .map(|room| Passage { room_id: room.id, kind: exit_kind })
            .into_iter()
            .collect();
        (entrances, exits)
    }
}
