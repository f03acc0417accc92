//! Public data model for generated dungeons, floors, rooms and corridors.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::ids::{CorridorId, DungeonId, FloorId, RoomId};
use crate::request::SizeClass;
use crate::types::{Pos, Rect};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum RoomContent {
    Monster { entry_id: String, name: String, difficulty: u32 },
    Item { entry_id: String, name: String, difficulty: u32 },
    Currency { gold: u32 },
    Puzzle { kind: String, difficulty: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub target_room_id: RoomId,
    pub corridor_id: CorridorId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub room_type: String,
    pub position: Pos,
    pub width: u32,
    pub height: u32,
    pub floor_id: FloorId,
    pub contents: Vec<RoomContent>,
    pub features: Vec<String>,
    pub description: String,
    pub connections: Vec<Connection>,
}

impl Room {
    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    pub fn center(&self) -> Pos {
        self.rect().center()
    }
}

/// Geometric label of a corridor. The path itself is always walked
/// horizontally first, then vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorridorShape {
    Straight,
    LShaped,
    TShaped,
    Cross,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorridorEndpoint {
    pub room_id: RoomId,
    pub cell: Pos,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Corridor {
    pub id: CorridorId,
    pub shape: CorridorShape,
    pub from: CorridorEndpoint,
    pub to: CorridorEndpoint,
    pub path: Vec<Pos>,
    pub features: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassageKind {
    DungeonEntrance,
    StairsUp,
    StairsDown,
    DungeonExit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passage {
    pub room_id: RoomId,
    pub kind: PassageKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: FloorId,
    /// 1-based position of the floor within its dungeon.
    pub number: u32,
    pub level: u32,
    pub theme: String,
    pub grid_width: u32,
    pub grid_height: u32,
    /// Rooms asked of the placer; `rooms.len()` is what it achieved.
    pub requested_rooms: u32,
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
    pub entrances: Vec<Passage>,
    pub exits: Vec<Passage>,
    pub description: String,
}

impl Floor {
    pub fn achieved_rooms(&self) -> usize {
        self.rooms.len()
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == id)
    }

    /// True when every room can reach every other room through corridors.
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.rooms.first().map(|room| room.id) else {
            return true;
        };

        let mut adjacency: BTreeMap<RoomId, Vec<RoomId>> = BTreeMap::new();
        for corridor in &self.corridors {
            adjacency.entry(corridor.from.room_id).or_default().push(corridor.to.room_id);
            adjacency.entry(corridor.to.room_id).or_default().push(corridor.from.room_id);
        }

        let mut open = VecDeque::from([start]);
        let mut seen = BTreeSet::from([start]);
        while let Some(room_id) = open.pop_front() {
            for &next in adjacency.get(&room_id).into_iter().flatten() {
                if seen.insert(next) {
                    open.push_back(next);
                }
            }
        }

        self.rooms.iter().all(|room| seen.contains(&room.id))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dungeon {
    pub id: DungeonId,
    pub name: String,
    pub level: u32,
    pub theme: String,
    pub size: SizeClass,
    pub floors: Vec<Floor>,
    pub created_at: DateTime<Utc>,
}

impl Dungeon {
    pub fn floor(&self, number: u32) -> Option<&Floor> {
        self.floors.iter().find(|floor| floor.number == number)
    }

    pub fn room_count(&self) -> usize {
        self.floors.iter().map(Floor::achieved_rooms).sum()
    }

    pub fn corridor_count(&self) -> usize {
        self.floors.iter().map(|floor| floor.corridors.len()).sum()
    }

    /// Stable byte encoding of everything generation decides. The creation
    /// timestamp is left out so seeded runs compare equal.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.id.as_uuid().as_bytes());
        push_str(&mut bytes, &self.name);
        bytes.extend(self.level.to_le_bytes());
        push_str(&mut bytes, &self.theme);
        bytes.push(self.size as u8);

        bytes.extend((self.floors.len() as u32).to_le_bytes());
        for floor in &self.floors {
            bytes.extend(floor.id.as_uuid().as_bytes());
            bytes.extend(floor.number.to_le_bytes());
            bytes.extend(floor.level.to_le_bytes());
            bytes.extend(floor.grid_width.to_le_bytes());
            bytes.extend(floor.grid_height.to_le_bytes());
            bytes.extend(floor.requested_rooms.to_le_bytes());

            bytes.extend((floor.rooms.len() as u32).to_le_bytes());
            for room in &floor.rooms {
                bytes.extend(room.id.as_uuid().as_bytes());
                push_str(&mut bytes, &room.room_type);
                bytes.extend(room.position.x.to_le_bytes());
                bytes.extend(room.position.y.to_le_bytes());
                bytes.extend(room.width.to_le_bytes());
                bytes.extend(room.height.to_le_bytes());
                bytes.extend((room.features.len() as u32).to_le_bytes());
                for feature in &room.features {
                    push_str(&mut bytes, feature);
                }
                bytes.extend((room.contents.len() as u32).to_le_bytes());
                for content in &room.contents {
                    push_content(&mut bytes, content);
                }
                bytes.extend((room.connections.len() as u32).to_le_bytes());
                for connection in &room.connections {
                    bytes.extend(connection.target_room_id.as_uuid().as_bytes());
                    bytes.extend(connection.corridor_id.as_uuid().as_bytes());
                }
            }

            bytes.extend((floor.corridors.len() as u32).to_le_bytes());
            for corridor in &floor.corridors {
                bytes.extend(corridor.id.as_uuid().as_bytes());
                bytes.push(match corridor.shape {
                    CorridorShape::Straight => 0,
                    CorridorShape::LShaped => 1,
                    CorridorShape::TShaped => 2,
                    CorridorShape::Cross => 3,
                });
                bytes.extend(corridor.from.room_id.as_uuid().as_bytes());
                bytes.extend(corridor.to.room_id.as_uuid().as_bytes());
                bytes.extend((corridor.path.len() as u32).to_le_bytes());
                for cell in &corridor.path {
                    bytes.extend(cell.x.to_le_bytes());
                    bytes.extend(cell.y.to_le_bytes());
                }
                bytes.extend((corridor.features.len() as u32).to_le_bytes());
                for feature in &corridor.features {
                    push_str(&mut bytes, feature);
                }
            }

            for passage in floor.entrances.iter().chain(&floor.exits) {
                bytes.extend(passage.room_id.as_uuid().as_bytes());
                bytes.push(match passage.kind {
                    PassageKind::DungeonEntrance => 0,
                    PassageKind::StairsUp => 1,
                    PassageKind::StairsDown => 2,
                    PassageKind::DungeonExit => 3,
                });
            }
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn push_str(bytes: &mut Vec<u8>, value: &str) {
    bytes.extend((value.len() as u32).to_le_bytes());
    bytes.extend(value.as_bytes());
}

fn push_content(bytes: &mut Vec<u8>, content: &RoomContent) {
    match content {
        RoomContent::Monster { entry_id, difficulty, .. } => {
            bytes.push(0);
            push_str(bytes, entry_id);
            bytes.extend(difficulty.to_le_bytes());
        }
        RoomContent::Item { entry_id, difficulty, .. } => {
            bytes.push(1);
            push_str(bytes, entry_id);
            bytes.extend(difficulty.to_le_bytes());
        }
        RoomContent::Currency { gold } => {
            bytes.push(2);
            bytes.extend(gold.to_le_bytes());
        }
        RoomContent::Puzzle { kind, difficulty } => {
            bytes.push(3);
            push_str(bytes, kind);
            bytes.extend(difficulty.to_le_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRng;

    fn room(rng: &mut SeededRng, floor_id: FloorId, x: u32, y: u32) -> Room {
        Room {
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
        }
    }

    fn corridor(rng: &mut SeededRng, from: &Room, to: &Room) -> Corridor {
        Corridor {
            id: CorridorId::generate(rng),
            shape: CorridorShape::Straight,
            from: CorridorEndpoint { room_id: from.id, cell: from.center() },
            to: CorridorEndpoint { room_id: to.id, cell: to.center() },
            path: vec![from.center(), to.center()],
            features: Vec::new(),
        }
    }

    fn floor_with(rooms: Vec<Room>, corridors: Vec<Corridor>, floor_id: FloorId) -> Floor {
        Floor {
            id: floor_id,
            number: 1,
            level: 1,
            theme: "dungeon".to_string(),
            grid_width: 20,
            grid_height: 20,
            requested_rooms: rooms.len() as u32,
            rooms,
            corridors,
            entrances: Vec::new(),
            exits: Vec::new(),
            description: String::new(),
        }
    }

    #[test]
    fn floor_without_corridors_between_rooms_is_disconnected() {
        let mut rng = SeededRng::new(1);
        let floor_id = FloorId::generate(&mut rng);
        let a = room(&mut rng, floor_id, 1, 1);
        let b = room(&mut rng, floor_id, 10, 10);
        let c = room(&mut rng, floor_id, 1, 10);

        let linked = corridor(&mut rng, &a, &b);
        let floor = floor_with(vec![a, b, c], vec![linked], floor_id);
        assert!(!floor.is_connected());
    }

    #[test]
    fn floor_with_spanning_corridors_is_connected() {
        let mut rng = SeededRng::new(2);
        let floor_id = FloorId::generate(&mut rng);
        let a = room(&mut rng, floor_id, 1, 1);
        let b = room(&mut rng, floor_id, 10, 10);
        let c = room(&mut rng, floor_id, 1, 10);

        let corridors = vec![corridor(&mut rng, &c, &b), corridor(&mut rng, &b, &a)];
        let floor = floor_with(vec![a, b, c], corridors, floor_id);
        assert!(floor.is_connected());
    }

    #[test]
    fn room_content_serializes_with_type_tag_and_camel_case_fields() {
        let content = RoomContent::Monster {
            entry_id: "goblin".to_string(),
            name: "Goblin".to_string(),
            difficulty: 1,
        };
        let json = serde_json::to_value(&content).expect("serialize");
        assert_eq!(json["type"], "monster");
        assert_eq!(json["entryId"], "goblin");
    }

    #[test]
    fn puzzle_content_keeps_its_kind_next_to_the_type_tag() {
        let content = RoomContent::Puzzle { kind: "riddle".to_string(), difficulty: 4 };
        let json = serde_json::to_value(&content).expect("serialize");
        assert_eq!(json["type"], "puzzle");
        assert_eq!(json["kind"], "riddle");

        let back: RoomContent = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, content);
    }
}
