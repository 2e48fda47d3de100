//! Level snapshots: the persisted layout and its validation.
//!
//! A snapshot stores the grid dimensions, the row-major tile flags, the
//! door list and the entities. FOV is never stored; [`Level::restore`]
//! recomputes it from the restored player position.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use warren_core::{Point, Range};
use warren_rl::{Door, Doors, Grid, Tile};

use crate::entity::{Actor, Player};
use crate::level::Level;

/// The persisted form of a [`Level`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub width: i32,
    pub height: i32,
    /// Row-major, `width × height` entries.
    pub tiles: Vec<Tile>,
    pub doors: Vec<Door>,
    pub rooms: Vec<Range>,
    pub player: Player,
    pub actors: Vec<Actor>,
    pub fov_radius: i32,
}

impl LevelSnapshot {
    /// Serialize to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON. Structural validation happens in
    /// [`Level::restore`], not here.
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

/// A snapshot failed validation on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Tile count disagrees with the declared dimensions.
    DimensionMismatch { expected: usize, found: usize },
    /// Two stored doors share one coordinate.
    DuplicateDoor(Point),
    /// A stored position lies outside the grid.
    OutOfRange { what: &'static str, pos: Point },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { expected, found } => {
                write!(f, "snapshot holds {found} tiles, dimensions say {expected}")
            }
            Self::DuplicateDoor(pos) => write!(f, "snapshot has two doors at {pos}"),
            Self::OutOfRange { what, pos } => write!(f, "snapshot {what} at {pos} is off the grid"),
        }
    }
}

impl std::error::Error for LoadError {}

impl Level {
    /// Capture the level's persistent state.
    pub fn snapshot(&self) -> LevelSnapshot {
        LevelSnapshot {
            width: self.grid.width(),
            height: self.grid.height(),
            tiles: self.grid.tiles().to_vec(),
            doors: self.doors.iter().collect(),
            rooms: self.rooms.clone(),
            player: self.player.clone(),
            actors: self.actors.clone(),
            fov_radius: self.fov_radius,
        }
    }

    /// Rebuild a level from its persisted form.
    ///
    /// Tiles and doors are restored verbatim (including `explored` flags
    /// and door open states); FOV is recomputed fresh. Inconsistent data
    /// is a hard error, never a silent fixup.
    pub fn restore(snap: LevelSnapshot) -> Result<Level, LoadError> {
        let LevelSnapshot {
            width,
            height,
            tiles,
            doors,
            rooms,
            player,
            actors,
            fov_radius,
        } = snap;

        let expected = (width.max(0) as usize) * (height.max(0) as usize);
        let found = tiles.len();
        let Some(grid) = Grid::from_tiles(width, height, tiles) else {
            return Err(LoadError::DimensionMismatch { expected, found });
        };

        let mut seen = HashSet::new();
        for d in &doors {
            if !grid.contains(d.pos) {
                return Err(LoadError::OutOfRange {
                    what: "door",
                    pos: d.pos,
                });
            }
            if !seen.insert(d.pos) {
                return Err(LoadError::DuplicateDoor(d.pos));
            }
        }
        if !grid.contains(player.pos) {
            return Err(LoadError::OutOfRange {
                what: "player",
                pos: player.pos,
            });
        }
        for a in &actors {
            if !grid.contains(a.pos) {
                return Err(LoadError::OutOfRange {
                    what: "actor",
                    pos: a.pos,
                });
            }
        }

        let doors: Doors = doors.into_iter().collect();
        Ok(Level::from_parts(
            grid, doors, rooms, player, actors, fov_radius,
        ))
    }
}
