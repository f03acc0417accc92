//! Weighted room selection and placement on a single floor.

use crate::ids::{FloorId, RoomId};
use crate::registry::RoomBlueprint;
use crate::rng::RandomSource;
use crate::types::Pos;

use super::grid::SpatialGrid;
use super::model::Room;

/// Random top-left positions tried per room before it is dropped.
pub(super) const PLACEMENT_ATTEMPTS: u32 = 100;

pub(super) struct RoomPlacer<'a> {
    blueprints: &'a [&'a dyn RoomBlueprint],
    total_weight: f64,
}

impl<'a> RoomPlacer<'a> {
    pub(super) fn new(blueprints: &'a [&'a dyn RoomBlueprint]) -> Self {
        let total_weight = blueprints.iter().map(|blueprint| blueprint.definition().weight).sum();
        Self { blueprints, total_weight }
    }

    /// Roulette-wheel draw: the first blueprint whose cumulative weight
    /// exceeds a uniform draw in `[0, total)`.
    pub(super) fn pick(&self, rng: &mut dyn RandomSource) -> Option<&'a dyn RoomBlueprint> {
        let draw = rng.unit() * self.total_weight;
        let mut cumulative = 0.0;
        for &blueprint in self.blueprints {
            cumulative += blueprint.definition().weight;
            if draw < cumulative {
                return Some(blueprint);
            }
        }
        // Float rounding can leave the draw at the very top of the wheel.
        self.blueprints.last().copied()
    }

    /// Places up to `requested` rooms. A room that finds no free spot within
    /// [`PLACEMENT_ATTEMPTS`] tries is dropped, so fewer rooms than requested
    /// is a normal outcome.
    pub(super) fn place_rooms(
        &self,
        grid: &mut SpatialGrid,
        floor_id: FloorId,
        requested: u32,
        rng: &mut dyn RandomSource,
    ) -> Vec<Room> {
        let mut rooms = Vec::with_capacity(requested as usize);
        for _ in 0..requested {
            let Some(blueprint) = self.pick(rng) else {
                break;
            };
            let (width, height) = blueprint.sample_size(rng);
            if !within_declared_bounds(blueprint, width, height) {
                tracing::debug!(
                    room_type = %blueprint.definition().id,
                    width,
                    height,
                    "sampled size outside declared bounds; room dropped"
                );
                continue;
            }
            let Some(position) = find_position(grid, width, height, rng) else {
                continue;
            };

            let room = new_room(blueprint, floor_id, position, (width, height), rng);
            grid.mark(&room);
            rooms.push(room);
        }

        if rooms.len() < requested as usize {
            tracing::debug!(
                floor = %floor_id,
                requested,
                placed = rooms.len(),
                "room placement fell short"
            );
        }

        if rooms.is_empty()
            && let Some(room) = self.fallback_room(grid, floor_id, rng)
        {
            grid.mark(&room);
            rooms.push(room);
        }

        rooms
    }

    /// Smallest candidate at its minimum size, at the first free interior spot.
    fn fallback_room(
        &self,
        grid: &SpatialGrid,
        floor_id: FloorId,
        rng: &mut dyn RandomSource,
    ) -> Option<Room> {
        let blueprint = self.blueprints.iter().copied().min_by_key(|blueprint| {
            let definition = blueprint.definition();
            u64::from(definition.min_width) * u64::from(definition.min_height)
        })?;
        let definition = blueprint.definition();
        let position = grid.first_free_interior(definition.min_width, definition.min_height)?;
        tracing::debug!(floor = %floor_id, room_type = %definition.id, "placing fallback room");
        Some(new_room(
            blueprint,
            floor_id,
            position,
            (definition.min_width, definition.min_height),
            rng,
        ))
    }
}

fn within_declared_bounds(blueprint: &dyn RoomBlueprint, width: u32, height: u32) -> bool {
    let definition = blueprint.definition();
    let (min_width, max_width) = definition.width_bounds();
    let (min_height, max_height) = definition.height_bounds();
    (min_width..=max_width).contains(&width) && (min_height..=max_height).contains(&height)
}

fn find_position(
    grid: &SpatialGrid,
    width: u32,
    height: u32,
    rng: &mut dyn RandomSource,
) -> Option<Pos> {
    let max_x = grid.width().checked_sub(width.checked_add(1)?)?;
    let max_y = grid.height().checked_sub(height.checked_add(1)?)?;
    if max_x < 1 || max_y < 1 {
        return None;
    }

    (0..PLACEMENT_ATTEMPTS).find_map(|_| {
        let x = rng.range_u32(1, max_x);
        let y = rng.range_u32(1, max_y);
        grid.can_place(x, y, width, height).then_some(Pos::new(x, y))
    })
}

fn new_room(
    blueprint: &dyn RoomBlueprint,
    floor_id: FloorId,
    position: Pos,
    (width, height): (u32, u32),
    rng: &mut dyn RandomSource,
) -> Room {
    let id = RoomId::generate(rng);
    let features = blueprint.decorate(rng);
    Room {
        id,
        room_type: blueprint.definition().id.clone(),
        position,
        width,
        height,
        floor_id,
        contents: Vec::new(),
        features,
        description: String::new(),
        connections: Vec::new(),
    }
}
