//! Greedy nearest-neighbour corridor network joining every room on a floor.

use crate::ids::CorridorId;
use crate::rng::RandomSource;
use crate::types::{Pos, manhattan};

use super::model::{Connection, Corridor, CorridorEndpoint, CorridorShape, Room};

const CROSS_PROBABILITY: f64 = 0.05;
const T_SHAPED_PROBABILITY: f64 = 0.10;
const CORRIDOR_FEATURE_PROBABILITY: f64 = 0.25;

/// Joins `rooms` with `rooms.len() - 1` corridors. Starting from the first
/// room, each step links the closest (connected, unconnected) pair of room
/// centers; ties go to the pair seen first. Both rooms of each pair get a
/// connection record.
pub(super) fn connect_rooms(
    rooms: &mut [Room],
    corridor_features: &[String],
    rng: &mut dyn RandomSource,
) -> Vec<Corridor> {
    if rooms.len() < 2 {
        return Vec::new();
    }

    let mut corridors = Vec::with_capacity(rooms.len() - 1);
    let mut connected_room_indices = vec![0_usize];
    let mut pending_room_indices: Vec<usize> = (1..rooms.len()).collect();

    while !pending_room_indices.is_empty() {
        let mut best_choice: Option<(u32, usize, usize)> = None;
        for &connected_index in &connected_room_indices {
            let connected_center = rooms[connected_index].center();
            for (pending_slot, &pending_index) in pending_room_indices.iter().enumerate() {
                let distance = manhattan(connected_center, rooms[pending_index].center());
                if best_choice.is_none_or(|(best_distance, _, _)| distance < best_distance) {
                    best_choice = Some((distance, connected_index, pending_slot));
                }
            }
        }

        let Some((_, connected_index, pending_slot)) = best_choice else {
            break;
        };
        let pending_index = pending_room_indices.remove(pending_slot);

        let corridor =
            build_corridor(&rooms[connected_index], &rooms[pending_index], corridor_features, rng);
        let from_id = rooms[connected_index].id;
        let to_id = rooms[pending_index].id;
        rooms[connected_index]
            .connections
            .push(Connection { target_room_id: to_id, corridor_id: corridor.id });
        rooms[pending_index]
            .connections
            .push(Connection { target_room_id: from_id, corridor_id: corridor.id });

        corridors.push(corridor);
        connected_room_indices.push(pending_index);
    }

    corridors
}

fn build_corridor(
    from: &Room,
    to: &Room,
    corridor_features: &[String],
    rng: &mut dyn RandomSource,
) -> Corridor {
    let start = from.center();
    let end = to.center();
    let id = CorridorId::generate(rng);
    let shape = corridor_shape(start, end, rng);
    let features = corridor_features
        .iter()
        .filter(|_| rng.chance(CORRIDOR_FEATURE_PROBABILITY))
        .cloned()
        .collect();

    Corridor {
        id,
        shape,
        from: CorridorEndpoint { room_id: from.id, cell: start },
        to: CorridorEndpoint { room_id: to.id, cell: end },
        path: corridor_path(start, end),
        features,
    }
}

/// Axis-aligned endpoints give a straight corridor. Everything else is an
/// L, occasionally relabelled as a T or a cross junction. The label never
/// changes the path.
fn corridor_shape(start: Pos, end: Pos, rng: &mut dyn RandomSource) -> CorridorShape {
    if start.x == end.x || start.y == end.y {
        return CorridorShape::Straight;
    }
    let roll = rng.unit();
    if roll < CROSS_PROBABILITY {
        CorridorShape::Cross
    } else if roll < CROSS_PROBABILITY + T_SHAPED_PROBABILITY {
        CorridorShape::TShaped
    } else {
        CorridorShape::LShaped
    }
}

/// Every cell from `start` to `end`, both included: horizontal run first,
/// then vertical.
fn corridor_path(start: Pos, end: Pos) -> Vec<Pos> {
    let mut path = Vec::with_capacity((manhattan(start, end) + 1) as usize);
    let mut cursor = start;
    path.push(cursor);
    while cursor.x != end.x {
        cursor.x = if end.x > cursor.x { cursor.x + 1 } else { cursor.x - 1 };
        path.push(cursor);
    }
    while cursor.y != end.y {
        cursor.y = if end.y > cursor.y { cursor.y + 1 } else { cursor.y - 1 };
        path.push(cursor);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{FloorId, RoomId};
    use crate::rng::SeededRng;

    fn rooms_at(rng: &mut SeededRng, origins: &[(u32, u32)]) -> Vec<Room> {
        let floor_id = FloorId::generate(rng);
        origins
            .iter()
            .map(|&(x, y)| Room {
                id: RoomId::generate(rng),
                room_type: "rest".to_string(),
                position: Pos::new(x, y),
                width: 3,
                height: 3,
                floor_id,
                contents: Vec::new(),
                features: Vec::new(),
                description: String::new(),
                connections: Vec::new(),
            })
            .collect()
    }

    #[test]
    fn path_walks_horizontally_then_vertically() {
        let path = corridor_path(Pos::new(5, 2), Pos::new(2, 4));
        assert_eq!(
            path,
            vec![
                Pos::new(5, 2),
                Pos::new(4, 2),
                Pos::new(3, 2),
                Pos::new(2, 2),
                Pos::new(2, 3),
                Pos::new(2, 4),
            ]
        );
    }

    #[test]
    fn single_room_needs_no_corridor() {
        let mut rng = SeededRng::new(1);
        let mut rooms = rooms_at(&mut rng, &[(1, 1)]);
        assert!(connect_rooms(&mut rooms, &[], &mut rng).is_empty());
        assert!(rooms[0].connections.is_empty());
    }

    #[test]
    fn greedy_links_follow_nearest_neighbour_order() {
        let mut rng = SeededRng::new(2);
        // Centers: (2,2), (22,2), (7,2), (12,2).
        let mut rooms = rooms_at(&mut rng, &[(1, 1), (21, 1), (6, 1), (11, 1)]);
        let corridors = connect_rooms(&mut rooms, &[], &mut rng);

        let links: Vec<(RoomId, RoomId)> =
            corridors.iter().map(|corridor| (corridor.from.room_id, corridor.to.room_id)).collect();
        assert_eq!(
            links,
            vec![(rooms[0].id, rooms[2].id), (rooms[2].id, rooms[3].id), (rooms[3].id, rooms[1].id)]
        );
        assert!(corridors.iter().all(|corridor| corridor.shape == CorridorShape::Straight));
    }

    #[test]
    fn ties_go_to_the_first_pair_encountered() {
        let mut rng = SeededRng::new(3);
        // Rooms 1 and 2 are both 10 cells from room 0.
        let mut rooms = rooms_at(&mut rng, &[(6, 6), (16, 6), (6, 16)]);
        let corridors = connect_rooms(&mut rooms, &[], &mut rng);
        assert_eq!(corridors[0].to.room_id, rooms[1].id);
    }

    #[test]
    fn every_link_is_recorded_on_both_rooms() {
        let mut rng = SeededRng::new(4);
        let mut rooms = rooms_at(&mut rng, &[(1, 1), (8, 9), (15, 2), (3, 14), (12, 14)]);
        let features = vec!["cobwebs".to_string(), "rubble".to_string()];
        let corridors = connect_rooms(&mut rooms, &features, &mut rng);

        assert_eq!(corridors.len(), rooms.len() - 1);
        let total_connections: usize = rooms.iter().map(|room| room.connections.len()).sum();
        assert_eq!(total_connections, 2 * corridors.len());

        for corridor in &corridors {
            assert_eq!(corridor.path.first(), Some(&corridor.from.cell));
            assert_eq!(corridor.path.last(), Some(&corridor.to.cell));
            assert!(corridor.features.iter().all(|feature| features.contains(feature)));
            let from = rooms.iter().find(|room| room.id == corridor.from.room_id).expect("from room");
            assert!(from.connections.iter().any(|connection| {
                connection.corridor_id == corridor.id && connection.target_room_id == corridor.to.room_id
            }));
        }
    }
}
