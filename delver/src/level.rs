//! Level state and the operations the turn loop drives.

use rand::Rng;
use warren_core::{Point, Range};
use warren_paths::manhattan;
use warren_rl::{
    BspParams, CaveParams, Doors, FovMap, Grid, generate_bsp, generate_cave, is_walkable,
};

use crate::entity::{Actor, ActorKind, Player};
use crate::spawn::{self, GenerationError, MAX_GENERATION_RETRIES};

/// Which generator builds the level topology.
#[derive(Debug, Clone)]
pub enum MapKind {
    /// Cellular-automata cave. No doors.
    Cave(CaveParams),
    /// BSP rooms and corridors with doors at wall punctures.
    Rooms(BspParams),
}

/// Outcome of a player move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The player stepped onto the target cell and FOV was recomputed.
    Moved,
    /// An actor occupies the target; index into [`Level::actors`].
    Bumped(usize),
    /// The target is out of bounds, blocked, or not adjacent.
    Blocked,
}

/// One dungeon level: grid, door overlay, FOV, player and actors.
///
/// The grid and doors are created by one generation call (or restored from
/// a snapshot) and from then on mutate only through door toggles. FOV is
/// derived state: every operation that can change sightlines recomputes it
/// before returning, and each recompute folds the visible set into the
/// grid's `explored` flags.
pub struct Level {
    pub grid: Grid,
    pub doors: Doors,
    /// Rooms in carve order; empty for cave levels.
    pub rooms: Vec<Range>,
    pub player: Player,
    pub actors: Vec<Actor>,
    pub fov_radius: i32,
    fov: FovMap,
}

impl Level {
    /// Generate a level and place the player plus the given actor roster.
    ///
    /// Maps whose largest walkable region cannot hold every spawn are
    /// discarded and regenerated, at most [`MAX_GENERATION_RETRIES`]
    /// times.
    pub fn generate(
        width: i32,
        height: i32,
        kind: &MapKind,
        roster: &[(&str, ActorKind)],
        fov_radius: i32,
        rng: &mut impl Rng,
    ) -> Result<Self, GenerationError> {
        let required = roster.len() + 1;

        for attempt in 1..=MAX_GENERATION_RETRIES {
            let (grid, doors, rooms) = match kind {
                MapKind::Cave(params) => (
                    generate_cave(width, height, params, rng),
                    Doors::new(),
                    Vec::new(),
                ),
                MapKind::Rooms(params) => {
                    let level = generate_bsp(width, height, params, rng);
                    (level.grid, level.doors, level.rooms)
                }
            };

            let Some(points) = spawn::spawn_points(&grid, required, rng) else {
                log::warn!(
                    "generation attempt {attempt}/{MAX_GENERATION_RETRIES}: \
                     largest region cannot hold {required} spawns"
                );
                continue;
            };

            let mut points = points.into_iter();
            let Some(player_pos) = points.next() else {
                continue;
            };
            let actors = roster
                .iter()
                .zip(points)
                .map(|((name, kind), pos)| Actor {
                    pos,
                    name: (*name).to_string(),
                    kind: kind.clone(),
                })
                .collect();

            return Ok(Self::from_parts(
                grid,
                doors,
                rooms,
                Player::new(player_pos),
                actors,
                fov_radius,
            ));
        }

        Err(GenerationError::RetriesExhausted {
            attempts: MAX_GENERATION_RETRIES,
            required,
        })
    }

    /// Assemble a level from already-validated parts and compute its FOV.
    pub fn from_parts(
        grid: Grid,
        doors: Doors,
        rooms: Vec<Range>,
        player: Player,
        actors: Vec<Actor>,
        fov_radius: i32,
    ) -> Self {
        let fov = FovMap::new(grid.bounds());
        let mut level = Self {
            grid,
            doors,
            rooms,
            player,
            actors,
            fov_radius,
            fov,
        };
        level.update_fov();
        level
    }

    /// Effective walkability at `p`: tile flags plus door state.
    pub fn is_walkable(&self, p: Point) -> bool {
        is_walkable(&self.grid, &self.doors, p)
    }

    /// Whether `p` is currently visible. Out-of-bounds is never visible.
    pub fn in_fov(&self, p: Point) -> bool {
        self.fov.visible(p)
    }

    /// Index of the actor standing on `p`, if any.
    pub fn actor_at(&self, p: Point) -> Option<usize> {
        self.actors.iter().position(|a| a.pos == p)
    }

    /// Step the player onto `target`, or report what is in the way.
    ///
    /// Closed doors and walls block; an actor on the target is reported
    /// for the caller to interact with; anything farther than one cardinal
    /// step is rejected. A successful step recomputes FOV.
    pub fn move_player(&mut self, target: Point) -> MoveOutcome {
        if !self.is_walkable(target) {
            return MoveOutcome::Blocked;
        }
        if let Some(i) = self.actor_at(target) {
            return MoveOutcome::Bumped(i);
        }
        if manhattan(self.player.pos, target) != 1 {
            return MoveOutcome::Blocked;
        }
        self.player.pos = target;
        self.update_fov();
        MoveOutcome::Moved
    }

    /// Toggle the door at `p`, if one is there.
    ///
    /// A successful toggle recomputes FOV before returning; stale
    /// visibility is never observable.
    pub fn toggle_door(&mut self, p: Point) -> bool {
        let toggled = self.doors.toggle(p);
        if toggled {
            self.update_fov();
        }
        toggled
    }

    /// Recompute FOV from the player and fold the visible set into the
    /// grid's explored flags.
    fn update_fov(&mut self) {
        self.fov
            .compute(&self.grid, &self.doors, self.player.pos, self.fov_radius);
        for p in self.fov.iter_visible() {
            self.grid.explore(p);
        }
    }
}
