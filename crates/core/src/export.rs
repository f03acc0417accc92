//! Checksummed JSON export of generated dungeons.
//!
//! An export is a single JSON document:
//! - `formatVersion`: schema version, currently [`EXPORT_FORMAT_VERSION`].
//! - `sha256Hex`: SHA-256 of the compact JSON encoding of `dungeon`.
//! - `dungeon`: the full [`Dungeon`] tree.
//!
//! Import rejects unknown versions, checksum mismatches and any structural
//! violation of the generation invariants. It never returns a partial
//! dungeon.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::{DungeonDataError, ExportError, LoadError};
use crate::ids::RoomId;
use crate::mapgen::{Dungeon, Floor};
use crate::types::manhattan;

pub const EXPORT_FORMAT_VERSION: u16 = 1;

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ExportEnvelope {
    format_version: u16,
    sha256_hex: String,
    dungeon: Dungeon,
}

/// Hex SHA-256 of the compact JSON encoding of `dungeon`.
pub fn dungeon_checksum(dungeon: &Dungeon) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(dungeon)?;
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    let result = hasher.finalize();
    Ok(format!("{result:064x}"))
}

pub fn export_dungeon(dungeon: &Dungeon) -> Result<String, ExportError> {
    let envelope = ExportEnvelope {
        format_version: EXPORT_FORMAT_VERSION,
        sha256_hex: dungeon_checksum(dungeon)?,
        dungeon: dungeon.clone(),
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

pub fn import_dungeon(text: &str) -> Result<Dungeon, DungeonDataError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| DungeonDataError::Malformed(e.to_string()))?;
    let version = value
        .get("formatVersion")
        .and_then(Value::as_u64)
        .ok_or_else(|| DungeonDataError::Malformed("missing formatVersion".to_string()))?;
    if version != u64::from(EXPORT_FORMAT_VERSION) {
        return Err(DungeonDataError::UnsupportedVersion(
            u16::try_from(version).unwrap_or(u16::MAX),
        ));
    }

    let envelope: ExportEnvelope =
        serde_json::from_value(value).map_err(|e| DungeonDataError::Malformed(e.to_string()))?;
    let checksum = dungeon_checksum(&envelope.dungeon)
        .map_err(|e| DungeonDataError::Malformed(e.to_string()))?;
    if !checksum.eq_ignore_ascii_case(&envelope.sha256_hex) {
        return Err(DungeonDataError::ChecksumMismatch);
    }

    validate_dungeon(&envelope.dungeon)?;
    Ok(envelope.dungeon)
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// Writes the export next to `path` and renames it into place, so readers
/// never observe a half-written file.
pub fn write_export(path: &Path, dungeon: &Dungeon) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, export_dungeon(dungeon)?)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

pub fn read_export(path: &Path) -> Result<Dungeon, LoadError> {
    let content = fs::read_to_string(path)?;
    Ok(import_dungeon(&content)?)
}

// ---------------------------------------------------------------------------
// Structural validation
// ---------------------------------------------------------------------------

/// Checks every structural invariant a generated dungeon satisfies.
pub fn validate_dungeon(dungeon: &Dungeon) -> Result<(), DungeonDataError> {
    if dungeon.name.trim().is_empty() {
        return Err(invalid("dungeon name is empty"));
    }
    if dungeon.level == 0 {
        return Err(invalid("dungeon level must be at least 1"));
    }
    if dungeon.floors.is_empty() {
        return Err(invalid("dungeon has no floors"));
    }

    let mut ids = IdSet::default();
    ids.insert(*dungeon.id.as_uuid()).map_err(invalid)?;
    for (index, floor) in dungeon.floors.iter().enumerate() {
        if floor.number as usize != index + 1 {
            return Err(invalid(format!(
                "floor at position {} is numbered {}",
                index + 1,
                floor.number
            )));
        }
        let expected_level = dungeon.level.saturating_add(index as u32);
        if floor.level != expected_level {
            return Err(invalid(format!(
                "floor {} has level {}, expected {expected_level}",
                floor.number, floor.level
            )));
        }
        ids.insert(*floor.id.as_uuid()).map_err(invalid)?;
        validate_floor(floor, &mut ids)
            .map_err(|message| invalid(format!("floor {}: {message}", floor.number)))?;
    }
    Ok(())
}

fn validate_floor(floor: &Floor, ids: &mut IdSet) -> Result<(), String> {
    if floor.grid_width == 0 || floor.grid_height == 0 {
        return Err("grid has no cells".to_string());
    }
    if floor.rooms.is_empty() {
        return Err("floor has no rooms".to_string());
    }

    let mut room_ids = BTreeSet::new();
    for (index, room) in floor.rooms.iter().enumerate() {
        ids.insert(*room.id.as_uuid())?;
        room_ids.insert(room.id);
        if room.floor_id != floor.id {
            return Err(format!("room {} belongs to another floor", room.id));
        }
        if !room.rect().fits_within(floor.grid_width, floor.grid_height) {
            return Err(format!("room {} lies outside the grid", room.id));
        }
        for other in &floor.rooms[index + 1..] {
            if room.rect().expanded(1).intersects(&other.rect()) {
                return Err(format!("rooms {} and {} overlap or touch", room.id, other.id));
            }
        }
    }

    let mut corridor_ids = BTreeSet::new();
    for corridor in &floor.corridors {
        ids.insert(*corridor.id.as_uuid())?;
        corridor_ids.insert(corridor.id);
        for endpoint in [&corridor.from, &corridor.to] {
            if !room_ids.contains(&endpoint.room_id) {
                return Err(format!(
                    "corridor {} references unknown room {}",
                    corridor.id, endpoint.room_id
                ));
            }
        }
        if corridor.path.first() != Some(&corridor.from.cell)
            || corridor.path.last() != Some(&corridor.to.cell)
        {
            return Err(format!("corridor {} path does not join its endpoints", corridor.id));
        }
        if corridor
            .path
            .iter()
            .any(|cell| cell.x >= floor.grid_width || cell.y >= floor.grid_height)
        {
            return Err(format!("corridor {} leaves the grid", corridor.id));
        }
        if corridor.path.windows(2).any(|step| manhattan(step[0], step[1]) != 1) {
            return Err(format!("corridor {} path is not contiguous", corridor.id));
        }
    }

    for room in &floor.rooms {
        for connection in &room.connections {
            if !room_ids.contains(&connection.target_room_id)
                || !corridor_ids.contains(&connection.corridor_id)
            {
                return Err(format!("room {} has a dangling connection", room.id));
            }
        }
    }
    check_connection_records(floor)?;

    check_passages(floor, &room_ids)?;

    if !floor.is_connected() {
        return Err("rooms are not all reachable".to_string());
    }
    // Connected with exactly n - 1 corridors means no cycles.
    if floor.corridors.len() != floor.rooms.len() - 1 {
        return Err(format!(
            "{} corridors do not form a spanning tree over {} rooms",
            floor.corridors.len(),
            floor.rooms.len()
        ));
    }
    Ok(())
}

/// Every corridor is recorded on both of its rooms, and nothing else is.
fn check_connection_records(floor: &Floor) -> Result<(), String> {
    let mut expected = BTreeSet::new();
    for corridor in &floor.corridors {
        expected.insert((corridor.from.room_id, corridor.to.room_id, corridor.id));
        expected.insert((corridor.to.room_id, corridor.from.room_id, corridor.id));
    }

    let mut recorded = BTreeSet::new();
    for room in &floor.rooms {
        for connection in &room.connections {
            if !recorded.insert((room.id, connection.target_room_id, connection.corridor_id)) {
                return Err(format!("room {} repeats a connection", room.id));
            }
        }
    }

    if recorded != expected {
        return Err("connection records do not match the corridors".to_string());
    }
    Ok(())
}

fn check_passages(floor: &Floor, room_ids: &BTreeSet<RoomId>) -> Result<(), String> {
    if floor.entrances.is_empty() {
        return Err("floor has no entrance".to_string());
    }
    if floor.exits.is_empty() {
        return Err("floor has no exit".to_string());
    }
    for passage in floor.entrances.iter().chain(&floor.exits) {
        if !room_ids.contains(&passage.room_id) {
            return Err(format!("passage references unknown room {}", passage.room_id));
        }
    }
    Ok(())
}

#[derive(Default)]
struct IdSet(BTreeSet<Uuid>);

impl IdSet {
    fn insert(&mut self, id: Uuid) -> Result<(), String> {
        if self.0.insert(id) { Ok(()) } else { Err(format!("duplicate identifier {id}")) }
    }
}

fn invalid(message: impl Into<String>) -> DungeonDataError {
    DungeonDataError::Invalid(message.into())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
