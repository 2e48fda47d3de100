//! BSP room-and-corridor generation.
//!
//! The interior is recursively partitioned, one room is carved per leaf
//! partition, and consecutive rooms are joined by L-shaped corridors.
//! Every wall cell a corridor punctures receives a closed door, so doors
//! mark exactly the wall-to-corridor transitions and never sit on open
//! floor.

use rand::Rng;
use rand::RngExt;
use warren_core::{Point, Range};

use crate::doors::Doors;
use crate::grid::{Grid, Tile};

/// Parameters for [`generate_bsp`].
#[derive(Debug, Clone)]
pub struct BspParams {
    /// Minimum width/height of a carved room.
    pub min_room_size: i32,
    /// Maximum partition recursion depth.
    pub split_depth: u32,
}

impl Default for BspParams {
    fn default() -> Self {
        Self {
            min_room_size: 5,
            split_depth: 4,
        }
    }
}

/// A generated BSP level: the grid, the door overlay and the rooms in
/// carve order.
#[derive(Debug, Clone)]
pub struct BspLevel {
    pub grid: Grid,
    pub doors: Doors,
    pub rooms: Vec<Range>,
}

/// Generate a room-and-corridor level.
///
/// Splitting is strictly depth-first (first child before second), so the
/// room and door order is deterministic for a fixed rng sequence. The
/// border stays wall. Partitions too small to hold a `min_room_size` room
/// are dropped silently, which can reduce spawn capacity on small grids;
/// callers validate connectivity and capacity before use.
pub fn generate_bsp(width: i32, height: i32, params: &BspParams, rng: &mut impl Rng) -> BspLevel {
    let mut grid = Grid::new(width, height);
    let mut rooms = Vec::new();

    let root = grid.bounds().inset(1);
    if !root.is_empty() {
        let min_room = params.min_room_size.max(1);
        split(&mut grid, &mut rooms, root, params.split_depth, min_room, rng);
    }

    let mut doors = Doors::new();
    for i in 1..rooms.len() {
        carve_corridor(
            &mut grid,
            &mut doors,
            rooms[i - 1].center(),
            rooms[i].center(),
            rng,
        );
    }

    log::debug!(
        "bsp {}x{}: {} rooms, {} doors",
        width,
        height,
        rooms.len(),
        doors.len()
    );
    BspLevel { grid, doors, rooms }
}

fn split(
    grid: &mut Grid,
    rooms: &mut Vec<Range>,
    part: Range,
    depth: u32,
    min_room: i32,
    rng: &mut impl Rng,
) {
    // A child partition needs room + a 1-cell margin on both sides.
    let min_split = 2 * (min_room + 2);
    let can_x = part.width() >= min_split;
    let can_y = part.height() >= min_split;

    if depth == 0 || (!can_x && !can_y) {
        carve_room(grid, rooms, part, min_room, rng);
        return;
    }

    let split_x = if can_x && can_y {
        rng.random_range(0..2u32) == 0
    } else {
        can_x
    };

    if split_x {
        let sx = rng.random_range(part.min.x + min_room + 2..=part.max.x - min_room - 2);
        split(
            grid,
            rooms,
            Range::new(part.min.x, part.min.y, sx, part.max.y),
            depth - 1,
            min_room,
            rng,
        );
        split(
            grid,
            rooms,
            Range::new(sx, part.min.y, part.max.x, part.max.y),
            depth - 1,
            min_room,
            rng,
        );
    } else {
        let sy = rng.random_range(part.min.y + min_room + 2..=part.max.y - min_room - 2);
        split(
            grid,
            rooms,
            Range::new(part.min.x, part.min.y, part.max.x, sy),
            depth - 1,
            min_room,
            rng,
        );
        split(
            grid,
            rooms,
            Range::new(part.min.x, sy, part.max.x, part.max.y),
            depth - 1,
            min_room,
            rng,
        );
    }
}

/// Carve one room inside a leaf partition, keeping a 1-cell margin so the
/// room never touches the partition's edge. Partitions with no space for
/// even a `min_room` room produce nothing.
fn carve_room(
    grid: &mut Grid,
    rooms: &mut Vec<Range>,
    part: Range,
    min_room: i32,
    rng: &mut impl Rng,
) {
    let max_w = part.width() - 2;
    let max_h = part.height() - 2;
    if max_w < min_room || max_h < min_room {
        return;
    }

    let w = rng.random_range(min_room..=max_w);
    let h = rng.random_range(min_room..=max_h);
    let x0 = part.min.x + rng.random_range(1..=part.width() - 1 - w);
    let y0 = part.min.y + rng.random_range(1..=part.height() - 1 - h);

    let room = Range::new(x0, y0, x0 + w, y0 + h);
    for p in room.iter() {
        grid.set(p, Tile::floor());
    }
    rooms.push(room);
}

/// Join two room centers with an L-shaped 1-cell tunnel, randomly routed
/// horizontal-then-vertical or vertical-then-horizontal.
fn carve_corridor(grid: &mut Grid, doors: &mut Doors, a: Point, b: Point, rng: &mut impl Rng) {
    if rng.random_range(0..2u32) == 0 {
        carve_h(grid, doors, a.x, b.x, a.y);
        carve_v(grid, doors, a.y, b.y, b.x);
    } else {
        carve_v(grid, doors, a.y, b.y, a.x);
        carve_h(grid, doors, a.x, b.x, b.y);
    }
}

fn carve_h(grid: &mut Grid, doors: &mut Doors, x1: i32, x2: i32, y: i32) {
    for x in x1.min(x2)..=x1.max(x2) {
        dig(grid, doors, Point::new(x, y));
    }
}

fn carve_v(grid: &mut Grid, doors: &mut Doors, y1: i32, y2: i32, x: i32) {
    for y in y1.min(y2)..=y1.max(y2) {
        dig(grid, doors, Point::new(x, y));
    }
}

/// Open up one tunnel cell. A cell that was still blocked marks a
/// wall-to-corridor transition and gets a door (duplicate placement is a
/// no-op); cells that were already walkable are left alone.
fn dig(grid: &mut Grid, doors: &mut Doors, p: Point) {
    if let Some(t) = grid.at(p) {
        if t.blocked {
            grid.set(p, Tile::floor());
            doors.place(p);
        }
    }
}
