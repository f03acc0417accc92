//! Occupancy grid used to keep rooms apart while a floor is being laid out.

use crate::ids::RoomId;
use crate::types::{Pos, Rect};

use super::model::Room;

/// Cells a room keeps free around itself.
const BUFFER_MARGIN: u32 = 1;

#[derive(Clone, Debug)]
pub struct SpatialGrid {
    width: u32,
    height: u32,
    cells: Vec<Option<RoomId>>,
}

impl SpatialGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, cells: vec![None; (width as usize) * (height as usize)] }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Whether a `w × h` room fits at `(x, y)` with a free one-cell buffer
    /// around it. The buffer is clamped to the grid edges.
    pub fn can_place(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        let rect = Rect::new(x, y, w, h);
        if !rect.fits_within(self.width, self.height) {
            return false;
        }

        let buffered = rect.expanded(BUFFER_MARGIN);
        let right = buffered.right().min(self.width - 1);
        let bottom = buffered.bottom().min(self.height - 1);
        (buffered.y..=bottom).all(|cy| {
            (buffered.x..=right).all(|cx| self.cells[self.index(Pos::new(cx, cy))].is_none())
        })
    }

    /// Claims every cell of `room`. Callers check [`Self::can_place`] first.
    pub fn mark(&mut self, room: &Room) {
        debug_assert!(room.rect().fits_within(self.width, self.height));
        for pos in room.rect().cells() {
            let index = self.index(pos);
            self.cells[index] = Some(room.id);
        }
    }

    pub fn occupant(&self, pos: Pos) -> Option<RoomId> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells[self.index(pos)]
    }

    /// First top-left interior position where a `w × h` room fits, scanning
    /// rows top to bottom.
    pub(super) fn first_free_interior(&self, w: u32, h: u32) -> Option<Pos> {
        let max_x = self.width.checked_sub(w + 1)?;
        let max_y = self.height.checked_sub(h + 1)?;
        (1..=max_y)
            .flat_map(|y| (1..=max_x).map(move |x| Pos::new(x, y)))
            .find(|pos| self.can_place(pos.x, pos.y, w, h))
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * (self.width as usize) + (pos.x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::FloorId;
    use crate::rng::SeededRng;

    fn room_at(rng: &mut SeededRng, x: u32, y: u32, width: u32, height: u32) -> Room {
        Room {
            id: RoomId::generate(rng),
            room_type: "rest".to_string(),
            position: Pos::new(x, y),
            width,
            height,
            floor_id: FloorId::generate(rng),
            contents: Vec::new(),
            features: Vec::new(),
            description: String::new(),
            connections: Vec::new(),
        }
    }

    #[test]
    fn rejects_rects_outside_the_grid_or_empty() {
        let grid = SpatialGrid::new(10, 10);
        assert!(grid.can_place(0, 0, 10, 10));
        assert!(!grid.can_place(5, 5, 6, 2));
        assert!(!grid.can_place(2, 2, 0, 3));
        assert!(!grid.can_place(10, 0, 1, 1));
    }

    #[test]
    fn buffer_keeps_adjacent_rooms_apart() {
        let mut rng = SeededRng::new(4);
        let mut grid = SpatialGrid::new(20, 20);
        let room = room_at(&mut rng, 2, 2, 4, 4);
        grid.mark(&room);

        assert!(!grid.can_place(6, 2, 3, 3), "touching the right edge");
        assert!(!grid.can_place(2, 6, 3, 3), "touching the bottom edge");
        assert!(!grid.can_place(6, 6, 3, 3), "touching diagonally");
        assert!(grid.can_place(7, 2, 3, 3), "one free column between rooms");
    }

    #[test]
    fn buffer_is_clamped_at_grid_edges() {
        let mut rng = SeededRng::new(5);
        let mut grid = SpatialGrid::new(8, 8);
        assert!(grid.can_place(0, 0, 3, 3));

        let room = room_at(&mut rng, 5, 5, 3, 3);
        grid.mark(&room);
        assert!(grid.can_place(0, 0, 3, 3));
        assert!(!grid.can_place(2, 2, 3, 3));
    }

    #[test]
    fn mark_records_the_occupying_room() {
        let mut rng = SeededRng::new(6);
        let mut grid = SpatialGrid::new(10, 10);
        let room = room_at(&mut rng, 1, 1, 2, 3);
        grid.mark(&room);

        assert_eq!(grid.occupant(Pos::new(2, 3)), Some(room.id));
        assert_eq!(grid.occupant(Pos::new(3, 3)), None);
        assert_eq!(grid.occupant(Pos::new(40, 3)), None);
    }

    #[test]
    fn first_free_interior_skips_occupied_space() {
        let mut rng = SeededRng::new(7);
        let mut grid = SpatialGrid::new(10, 10);
        assert_eq!(grid.first_free_interior(3, 3), Some(Pos::new(1, 1)));

        let room = room_at(&mut rng, 1, 1, 3, 3);
        grid.mark(&room);
        assert_eq!(grid.first_free_interior(3, 3), Some(Pos::new(5, 1)));
        assert_eq!(grid.first_free_interior(9, 9), None);
    }
}
