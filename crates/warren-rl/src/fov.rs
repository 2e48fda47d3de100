//! Field of view via recursive shadow casting.
//!
//! The map is scanned in 8 octants from the origin outward; opaque cells
//! cast shadows that narrow the visible cone row by row. Slopes are kept
//! as exact integer fractions so visibility never depends on float
//! rounding.

use warren_core::{Point, Range};

use crate::doors::{Doors, blocks_sight};
use crate::grid::Grid;

/// An exact slope `num/den` with `den > 0`.
#[derive(Debug, Clone, Copy)]
struct Slope {
    num: i32,
    den: i32,
}

impl Slope {
    fn gt(self, o: Slope) -> bool {
        self.num * o.den > o.num * self.den
    }

    fn lt(self, o: Slope) -> bool {
        self.num * o.den < o.num * self.den
    }
}

/// Map (row, col) octant coordinates to a grid offset from the origin.
fn octant_offset(octant: u8, row: i32, col: i32) -> Point {
    match octant {
        0 => Point::new(-col, -row),
        1 => Point::new(-row, -col),
        2 => Point::new(-row, col),
        3 => Point::new(col, -row),
        4 => Point::new(col, row),
        5 => Point::new(row, col),
        6 => Point::new(row, -col),
        _ => Point::new(-col, row),
    }
}

/// A reusable visibility map over a grid rectangle.
///
/// [`compute`](Self::compute) fills the map from one origin; the result is
/// queried with [`visible`](Self::visible) until the next compute. The
/// candidate set is the **Euclidean** disc `dx² + dy² ≤ radius²`.
pub struct FovMap {
    rng: Range,
    width: usize,
    visible: Vec<bool>,
    visibles: Vec<Point>,
}

impl FovMap {
    /// Create a new FOV map for the given rectangle.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            width: rng.width().max(0) as usize,
            visible: vec![false; rng.len()],
            visibles: Vec::new(),
        }
    }

    /// Replace the rectangle, growing the buffer if needed.
    pub fn set_range(&mut self, rng: Range) {
        self.rng = rng;
        self.width = rng.width().max(0) as usize;
        if self.visible.len() < rng.len() {
            self.visible.resize(rng.len(), false);
        }
    }

    /// The rectangle this map covers.
    pub fn range(&self) -> Range {
        self.rng
    }

    fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let q = p - self.rng.min;
        Some(q.y as usize * self.width + q.x as usize)
    }

    fn mark(&mut self, p: Point) {
        if let Some(i) = self.idx(p) {
            if !self.visible[i] {
                self.visible[i] = true;
                self.visibles.push(p);
            }
        }
    }

    /// Compute visibility from `origin` out to `radius`.
    ///
    /// A cell is visible when an unobstructed sight line from the origin
    /// reaches it within Euclidean distance `radius`; obstruction is the
    /// effective opacity of grid + door state (a closed door blocks). The
    /// origin itself is always visible, whatever its own flags. An origin
    /// outside the map yields an empty result.
    pub fn compute(&mut self, grid: &Grid, doors: &Doors, origin: Point, radius: i32) {
        for v in &mut self.visible {
            *v = false;
        }
        self.visibles.clear();

        if !self.rng.contains(origin) {
            return;
        }
        self.mark(origin);
        if radius <= 0 {
            return;
        }

        let opaque = |p: Point| blocks_sight(grid, doors, p);
        for octant in 0..8 {
            self.cast(
                &opaque,
                origin,
                radius,
                octant,
                1,
                Slope { num: 1, den: 1 },
                Slope { num: 0, den: 1 },
            );
        }
    }

    /// Scan one octant row and recurse into the sub-cones that opaque
    /// cells leave open.
    #[allow(clippy::too_many_arguments)]
    fn cast(
        &mut self,
        opaque: &impl Fn(Point) -> bool,
        origin: Point,
        radius: i32,
        octant: u8,
        row: i32,
        start: Slope,
        end: Slope,
    ) {
        if row > radius || start.lt(end) {
            return;
        }

        let mut start = start;
        let mut prev_blocked = false;
        let mut shadow_start = start;

        for col in (0..=row).rev() {
            let l_slope = Slope {
                num: 2 * col + 1,
                den: 2 * row - 1,
            };
            let r_slope = Slope {
                num: 2 * col - 1,
                den: 2 * row + 1,
            };
            if r_slope.gt(start) {
                continue;
            }
            if l_slope.lt(end) {
                break;
            }

            let p = origin + octant_offset(octant, row, col);
            if col * col + row * row <= radius * radius {
                self.mark(p);
            }

            let blocked_cell = opaque(p);
            if prev_blocked {
                if blocked_cell {
                    shadow_start = r_slope;
                } else {
                    prev_blocked = false;
                    start = shadow_start;
                }
            } else if blocked_cell {
                prev_blocked = true;
                self.cast(opaque, origin, radius, octant, row + 1, start, l_slope);
                shadow_start = r_slope;
            }
        }

        if !prev_blocked {
            self.cast(opaque, origin, radius, octant, row + 1, start, end);
        }
    }

    /// Whether `p` was visible in the last compute. Out-of-range points
    /// are never visible (not an error).
    pub fn visible(&self, p: Point) -> bool {
        match self.idx(p) {
            Some(i) => self.visible[i],
            None => false,
        }
    }

    /// Iterate over the points visible in the last compute.
    pub fn iter_visible(&self) -> impl Iterator<Item = Point> + '_ {
        self.visibles.iter().copied()
    }
}
