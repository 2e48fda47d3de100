//! Cellular-automata cave generation.
//!
//! Random noise smoothed by repeated neighbour-count passes. The output is
//! not guaranteed to be connected; callers validate with a connectivity
//! query and regenerate when the largest region is too small.

use rand::Rng;
use rand::RngExt;
use warren_core::Point;

use crate::grid::{Grid, Tile};

/// Parameters for [`generate_cave`].
#[derive(Debug, Clone)]
pub struct CaveParams {
    /// Probability that an interior cell starts as a wall.
    pub wall_probability: f64,
    /// Number of smoothing passes.
    pub iterations: u32,
    /// A wall with fewer than this many wall neighbours becomes floor.
    pub wall_rule: u32,
    /// A floor with at least this many wall neighbours becomes wall.
    pub floor_rule: u32,
}

impl Default for CaveParams {
    fn default() -> Self {
        Self {
            wall_probability: 0.45,
            iterations: 4,
            wall_rule: 4,
            floor_rule: 5,
        }
    }
}

/// Generate a cave grid.
///
/// The border is walled, the interior is seeded with walls at
/// `wall_probability` (one uniform draw per interior cell, row-major, so a
/// seeded rng reproduces the same grid), then smoothed `iterations` times.
pub fn generate_cave(width: i32, height: i32, params: &CaveParams, rng: &mut impl Rng) -> Grid {
    let mut grid = Grid::new(width, height);
    random_fill(&mut grid, params.wall_probability, rng);
    for _ in 0..params.iterations {
        smooth(&mut grid, params.wall_rule, params.floor_rule);
    }
    grid
}

/// Seed the interior with random walls. Border cells stay wall and consume
/// no randomness.
fn random_fill(grid: &mut Grid, probability: f64, rng: &mut impl Rng) {
    let interior = grid.bounds().inset(1);
    for p in interior.iter() {
        let r: f64 = rng.random();
        if r >= probability {
            grid.set(p, Tile::floor());
        }
    }
}

/// One smoothing pass over the interior.
///
/// Every cell is updated from a frozen snapshot of the previous
/// generation; writes made during the pass are never visible to neighbour
/// counts within the same pass.
fn smooth(grid: &mut Grid, wall_rule: u32, floor_rule: u32) {
    let prev = grid.clone();
    for p in prev.bounds().inset(1).iter() {
        let walls = wall_neighbors(&prev, p);
        let Some(t) = prev.at(p) else { continue };
        if t.blocked {
            if walls < wall_rule {
                grid.set(p, Tile::floor());
            }
        } else if walls >= floor_rule {
            grid.set(p, Tile::wall());
        }
    }
}

/// Count wall cells among the 8 neighbours of `p`; cells outside the grid
/// count as walls.
fn wall_neighbors(grid: &Grid, p: Point) -> u32 {
    let mut count = 0;
    for n in p.neighbors_8() {
        match grid.at(n) {
            Some(t) if t.blocked => count += 1,
            Some(_) => {}
            None => count += 1,
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn on_border(grid: &Grid, p: Point) -> bool {
        p.x == 0 || p.y == 0 || p.x == grid.width() - 1 || p.y == grid.height() - 1
    }

    #[test]
    fn border_is_always_wall() {
        for seed in 0..4 {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = generate_cave(30, 20, &CaveParams::default(), &mut rng);
            for (p, t) in grid.iter() {
                if on_border(&grid, p) {
                    assert!(t.blocked, "border cell {p} is not a wall");
                    assert!(t.block_sight);
                }
            }
        }
    }

    #[test]
    fn same_seed_same_cave() {
        let params = CaveParams {
            wall_probability: 0.45,
            iterations: 4,
            wall_rule: 4,
            floor_rule: 5,
        };
        let a = generate_cave(10, 10, &params, &mut StdRng::seed_from_u64(77));
        let b = generate_cave(10, 10, &params, &mut StdRng::seed_from_u64(77));
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_usually_differ() {
        let params = CaveParams::default();
        let a = generate_cave(20, 20, &params, &mut StdRng::seed_from_u64(1));
        let b = generate_cave(20, 20, &params, &mut StdRng::seed_from_u64(2));
        assert_ne!(a, b);
    }

    #[test]
    fn produces_some_floor() {
        let mut rng = StdRng::seed_from_u64(9);
        let grid = generate_cave(40, 30, &CaveParams::default(), &mut rng);
        let floors = grid.count(|t| !t.blocked);
        assert!(floors > 0);
        assert!(floors < (40 * 30) as usize);
    }

    /// A pass must read the previous generation only. With
    /// `wall_rule = floor_rule = 4`, (1,1) becomes a wall during the pass;
    /// (2,1) counts exactly 3 wall neighbours in the old generation and 4
    /// in the new one, so in-place smoothing keeps (2,1) a wall while the
    /// double-buffered pass turns it into floor.
    #[test]
    fn smoothing_reads_a_frozen_snapshot() {
        // 5x5, border walls. Interior:
        //   (1,1) floor  (2,1) wall   (3,1) floor
        //   (1,2) floor  (2,2) floor  (3,2) floor
        //   (1,3) floor  (2,3) floor  (3,3) floor
        let mut grid = Grid::new(5, 5);
        for p in grid.bounds().inset(1).iter() {
            grid.set(p, Tile::floor());
        }
        grid.set(Point::new(2, 1), Tile::wall());

        // Snapshot counts: (1,1) has 6 wall neighbours (>= 4, becomes
        // wall); (2,1) has 3 (< 4, becomes floor). In-place smoothing
        // would see the fresh wall at (1,1) and count 4 for (2,1),
        // keeping it a wall.
        smooth(&mut grid, 4, 4);
        assert!(grid.at(Point::new(1, 1)).unwrap().blocked);
        assert!(!grid.at(Point::new(2, 1)).unwrap().blocked);
    }

    #[test]
    fn all_wall_probability_leaves_no_floor() {
        let params = CaveParams {
            wall_probability: 1.1, // every draw lands below this
            ..CaveParams::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let grid = generate_cave(12, 12, &params, &mut rng);
        assert_eq!(grid.count(|t| !t.blocked), 0);
    }
}
