//! Spawn placement over generated maps.
//!
//! Positions come from the largest connected walkable region, sampled
//! without replacement so entities never stack. Maps whose largest region
//! cannot hold the required count are rejected; the level generator
//! retries up to a fixed cap and then fails explicitly instead of looping
//! forever on pathological parameters.

use std::fmt;

use rand::Rng;
use warren_core::Point;
use warren_paths::{CardinalPather, RegionRange};
use warren_rl::Grid;

/// Upper bound on map regeneration attempts.
pub const MAX_GENERATION_RETRIES: u32 = 32;

/// Level generation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Every attempt produced a largest walkable region smaller than the
    /// number of entities needing placement.
    RetriesExhausted { attempts: u32, required: usize },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RetriesExhausted { attempts, required } => write!(
                f,
                "no map with room for {required} spawns after {attempts} attempts"
            ),
        }
    }
}

impl std::error::Error for GenerationError {}

/// Pick `count` distinct cells from the largest walkable region of `grid`.
///
/// Returns `None` when the map has no walkable region that large; the
/// caller regenerates. Door state is irrelevant here: regions are computed
/// over tile walkability, and doors only ever sit on carved floor.
pub fn spawn_points(grid: &Grid, count: usize, rng: &mut impl Rng) -> Option<Vec<Point>> {
    let bounds = grid.bounds();
    let mut rr = RegionRange::new(bounds);
    let pather = CardinalPather { rng: bounds };
    let regions = rr.regions(&pather, |p| grid.walkable_at(p));

    let largest = regions.into_iter().max_by_key(|r| r.len())?;
    if largest.len() < count {
        return None;
    }

    let picks = rand::seq::index::sample(rng, largest.len(), count);
    Some(picks.iter().map(|i| largest[i]).collect())
}
