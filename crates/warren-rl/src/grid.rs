//! The tile grid a level is made of.
//!
//! [`Grid`] owns its backing buffer outright; generators return fresh grids
//! rather than mutating shared state, so a failed generation can be dropped
//! and retried without aliasing concerns.

use warren_core::{Point, Range};

/// One map cell.
///
/// `blocked` means not walkable, `block_sight` means opaque to field-of-view
/// traversal. The two are independent so terrain like chasms (blocked but
/// transparent) stays representable. `explored` is set the first time the
/// tile enters the player's FOV and is kept for the rest of the level's
/// life, including across save round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub blocked: bool,
    pub block_sight: bool,
    pub explored: bool,
}

impl Tile {
    /// A solid wall: not walkable, opaque.
    pub const fn wall() -> Self {
        Self {
            blocked: true,
            block_sight: true,
            explored: false,
        }
    }

    /// Open floor: walkable, transparent.
    pub const fn floor() -> Self {
        Self {
            blocked: false,
            block_sight: false,
            explored: false,
        }
    }

    /// Whether the tile itself is walkable (door state not considered).
    #[inline]
    pub const fn walkable(self) -> bool {
        !self.blocked
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::wall()
    }
}

/// A dense `width × height` grid of [`Tile`]s in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Create a new grid filled with walls.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            tiles: vec![Tile::wall(); (width * height) as usize],
        }
    }

    /// Rebuild a grid from a row-major tile buffer.
    ///
    /// Returns `None` if the buffer length disagrees with the dimensions
    /// or the dimensions are not positive.
    pub fn from_tiles(width: i32, height: i32, tiles: Vec<Tile>) -> Option<Self> {
        if width <= 0 || height <= 0 {
            return None;
        }
        if tiles.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            tiles,
        })
    }

    /// Width of the grid.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the grid.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The grid's bounding range, `[0,0)..(width,height)`.
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Whether `p` lies inside the grid.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    fn idx(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width as usize + p.x as usize)
    }

    /// The tile at `p`, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<Tile> {
        self.idx(p).map(|i| self.tiles[i])
    }

    /// Set the tile at `p`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, p: Point, tile: Tile) {
        if let Some(i) = self.idx(p) {
            self.tiles[i] = tile;
        }
    }

    /// Mark the tile at `p` as explored. Out-of-bounds is ignored.
    pub fn explore(&mut self, p: Point) {
        if let Some(i) = self.idx(p) {
            self.tiles[i].explored = true;
        }
    }

    /// Whether the tile at `p` is walkable; `false` out of bounds.
    ///
    /// Door overlays are not consulted here; see
    /// [`doors::is_walkable`](crate::doors::is_walkable) for the effective
    /// query.
    pub fn walkable_at(&self, p: Point) -> bool {
        self.at(p).is_some_and(Tile::walkable)
    }

    /// Count tiles satisfying a predicate.
    pub fn count(&self, f: impl Fn(Tile) -> bool) -> usize {
        self.tiles.iter().filter(|&&t| f(t)).count()
    }

    /// Iterate over `(Point, Tile)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Tile)> + '_ {
        self.bounds().iter().zip(self.tiles.iter().copied())
    }

    /// The raw row-major tile buffer.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_wall() {
        let g = Grid::new(4, 3);
        assert_eq!(g.width(), 4);
        assert_eq!(g.height(), 3);
        assert_eq!(g.count(|t| t.blocked), 12);
    }

    #[test]
    fn set_and_at() {
        let mut g = Grid::new(4, 4);
        let p = Point::new(2, 3);
        g.set(p, Tile::floor());
        assert_eq!(g.at(p), Some(Tile::floor()));
        assert!(g.walkable_at(p));
        assert!(!g.walkable_at(Point::new(0, 0)));
    }

    #[test]
    fn out_of_bounds_is_safe() {
        let mut g = Grid::new(4, 4);
        assert_eq!(g.at(Point::new(4, 0)), None);
        assert_eq!(g.at(Point::new(-1, 2)), None);
        assert!(!g.walkable_at(Point::new(0, 99)));
        // Writes out of bounds are dropped, not panics.
        g.set(Point::new(-1, -1), Tile::floor());
        g.explore(Point::new(100, 100));
        assert_eq!(g.count(|t| t.explored), 0);
    }

    #[test]
    fn explore_sets_flag_only() {
        let mut g = Grid::new(3, 3);
        let p = Point::new(1, 1);
        g.set(p, Tile::floor());
        g.explore(p);
        let t = g.at(p).unwrap();
        assert!(t.explored);
        assert!(!t.blocked);
    }

    #[test]
    fn from_tiles_validates_dimensions() {
        let tiles = vec![Tile::floor(); 12];
        assert!(Grid::from_tiles(4, 3, tiles.clone()).is_some());
        assert!(Grid::from_tiles(4, 4, tiles.clone()).is_none());
        assert!(Grid::from_tiles(0, 0, Vec::new()).is_none());
        assert!(Grid::from_tiles(-4, -3, tiles).is_none());
    }

    #[test]
    fn iter_is_row_major() {
        let mut g = Grid::new(3, 2);
        g.set(Point::new(1, 0), Tile::floor());
        let items: Vec<_> = g.iter().collect();
        assert_eq!(items.len(), 6);
        assert_eq!(items[1], (Point::new(1, 0), Tile::floor()));
        assert_eq!(items[3].0, Point::new(0, 1));
    }
}
