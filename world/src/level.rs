//! Declarative map strings loaded once per stage.
//!
//! A map is a `;`-separated list of `Kind(column,row)` items. Coordinates are
//! wall-tile units counted from the arena origin.

use tank_arena_core::{Point, Rect, Scenery, TILE_SIZE};
use thiserror::Error;

/// Errors raised while parsing a map string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    /// The item does not follow the `Kind(column,row)` shape.
    #[error("malformed map item `{item}`")]
    MalformedItem {
        /// Offending item text.
        item: String,
    },
    /// The item names a scenery kind the world cannot build.
    #[error("unknown map item kind `{kind}`")]
    UnknownKind {
        /// Offending kind name.
        kind: String,
    },
}

/// One piece of scenery placed on the tile grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapItem {
    /// What to build.
    pub scenery: Scenery,
    /// Tile column from the arena's left edge.
    pub column: i32,
    /// Tile row from the arena's top edge.
    pub row: i32,
}

impl MapItem {
    /// Upper-left corner of the item in arena pixels.
    #[must_use]
    pub const fn position(&self, bounds: Rect) -> Point {
        Point::new(bounds.x + self.column * TILE_SIZE, bounds.y + self.row * TILE_SIZE)
    }
}

/// Parses a map string. Empty items, such as a trailing `;`, are skipped.
pub fn parse_map(map: &str) -> Result<Vec<MapItem>, LevelError> {
    map.split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(parse_item)
        .collect()
}

fn parse_item(item: &str) -> Result<MapItem, LevelError> {
    let malformed = || LevelError::MalformedItem {
        item: item.to_owned(),
    };
    let (kind, rest) = item.split_once('(').ok_or_else(malformed)?;
    let arguments = rest.strip_suffix(')').ok_or_else(malformed)?;
    let (column, row) = arguments.split_once(',').ok_or_else(malformed)?;
    let column: u16 = column.trim().parse().map_err(|_| malformed())?;
    let row: u16 = row.trim().parse().map_err(|_| malformed())?;

    let scenery = match kind.trim() {
        "BrickWall" => Scenery::BrickWall,
        "SteelWall" => Scenery::SteelWall,
        "Base" => Scenery::Base,
        "Water" => Scenery::Water,
        "Trees" => Scenery::Trees,
        other => {
            return Err(LevelError::UnknownKind {
                kind: other.to_owned(),
            })
        }
    };

    Ok(MapItem {
        scenery,
        column: i32::from(column),
        row: i32::from(row),
    })
}
