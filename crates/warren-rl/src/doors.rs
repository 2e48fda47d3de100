//! Door overlay and effective walkability/sight queries.
//!
//! Doors occupy exactly one grid cell each and override that cell's state:
//! a closed door is non-walkable and opaque no matter what the tile under
//! it says; an open door defers entirely to the tile. By construction the
//! generators only place doors on cells they have just carved walkable, so
//! opening a door always yields passable, transparent ground.

use warren_core::Point;

use crate::grid::Grid;

/// A door at a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Door {
    pub pos: Point,
    pub open: bool,
}

/// The set of doors on a level. At most one door per coordinate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Doors {
    doors: Vec<Door>,
}

impl Doors {
    /// Create an empty door set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a closed door at `pos`.
    ///
    /// Placing where a door already exists is a no-op; returns whether a
    /// door was actually added.
    pub fn place(&mut self, pos: Point) -> bool {
        if self.at(pos).is_some() {
            return false;
        }
        self.doors.push(Door { pos, open: false });
        true
    }

    /// The door at `pos`, if any.
    pub fn at(&self, pos: Point) -> Option<Door> {
        self.doors.iter().copied().find(|d| d.pos == pos)
    }

    /// Flip the open/closed state of the door at `pos`.
    ///
    /// Returns `false` (and changes nothing) when there is no door there.
    /// Callers owning a cached FOV must recompute it after a successful
    /// toggle; sightlines through the cell have changed.
    pub fn toggle(&mut self, pos: Point) -> bool {
        match self.doors.iter_mut().find(|d| d.pos == pos) {
            Some(d) => {
                d.open = !d.open;
                true
            }
            None => false,
        }
    }

    /// Number of doors.
    pub fn len(&self) -> usize {
        self.doors.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.doors.is_empty()
    }

    /// Iterate over all doors.
    pub fn iter(&self) -> impl Iterator<Item = Door> + '_ {
        self.doors.iter().copied()
    }
}

impl FromIterator<Door> for Doors {
    /// Collect doors, dropping duplicates at the same coordinate
    /// (first occurrence wins, preserving its open state).
    fn from_iter<I: IntoIterator<Item = Door>>(iter: I) -> Self {
        let mut set = Doors::new();
        for d in iter {
            if set.at(d.pos).is_none() {
                set.doors.push(d);
            }
        }
        set
    }
}

/// Effective walkability of a cell: a closed door blocks; otherwise the
/// tile's own flag applies. Out of bounds is never walkable.
pub fn is_walkable(grid: &Grid, doors: &Doors, p: Point) -> bool {
    match doors.at(p) {
        Some(d) if !d.open => false,
        _ => grid.walkable_at(p),
    }
}

/// Effective opacity of a cell: a closed door blocks sight; otherwise the
/// tile's own flag applies. Out of bounds is opaque.
pub fn blocks_sight(grid: &Grid, doors: &Doors, p: Point) -> bool {
    match doors.at(p) {
        Some(d) if !d.open => true,
        _ => grid.at(p).is_none_or(|t| t.block_sight),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Tile;

    fn open_3x3() -> Grid {
        let mut g = Grid::new(3, 3);
        for p in g.bounds().iter() {
            g.set(p, Tile::floor());
        }
        g
    }

    #[test]
    fn place_is_idempotent() {
        let mut doors = Doors::new();
        let p = Point::new(1, 1);
        assert!(doors.place(p));
        assert!(!doors.place(p));
        assert_eq!(doors.len(), 1);
        assert_eq!(doors.at(p), Some(Door { pos: p, open: false }));
    }

    #[test]
    fn toggle_flips_state() {
        let mut doors = Doors::new();
        let p = Point::new(2, 0);
        doors.place(p);
        assert!(doors.toggle(p));
        assert_eq!(doors.at(p).map(|d| d.open), Some(true));
        assert!(doors.toggle(p));
        assert_eq!(doors.at(p).map(|d| d.open), Some(false));
        assert!(!doors.toggle(Point::new(0, 0)));
    }

    #[test]
    fn closed_door_overrides_floor() {
        let grid = open_3x3();
        let mut doors = Doors::new();
        let p = Point::new(1, 1);
        doors.place(p);

        assert!(!is_walkable(&grid, &doors, p));
        assert!(blocks_sight(&grid, &doors, p));

        doors.toggle(p);
        assert!(is_walkable(&grid, &doors, p));
        assert!(!blocks_sight(&grid, &doors, p));
    }

    #[test]
    fn out_of_bounds_defaults() {
        let grid = open_3x3();
        let doors = Doors::new();
        assert!(!is_walkable(&grid, &doors, Point::new(-1, 0)));
        assert!(blocks_sight(&grid, &doors, Point::new(3, 3)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn door_round_trips() {
        let d = Door {
            pos: Point::new(7, 3),
            open: true,
        };
        let json = serde_json::to_string(&d).unwrap();
        let back: Door = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn from_iter_dedupes() {
        let p = Point::new(1, 2);
        let doors: Doors = [
            Door { pos: p, open: true },
            Door { pos: p, open: false },
            Door {
                pos: Point::new(0, 0),
                open: false,
            },
        ]
        .into_iter()
        .collect();
        assert_eq!(doors.len(), 2);
        assert_eq!(doors.at(p).map(|d| d.open), Some(true));
    }
}
