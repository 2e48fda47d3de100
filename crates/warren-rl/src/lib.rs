//! Dungeon map core: grid model, procedural generation, doors, field of view.
//!
//! Two generators produce the walkable topology of a level:
//!
//! - [`mapgen::generate_cave`]: cellular-automata smoothing of random noise.
//! - [`bsp::generate_bsp`]: recursive binary-space partitioning into rooms
//!   joined by corridors, with doors marking every wall-to-corridor
//!   transition.
//!
//! [`fov::FovMap`] computes visibility from an origin over the combined
//! grid + door state, and [`doors`] holds the mutable open/closed overlay.

pub mod bsp;
pub mod doors;
pub mod fov;
pub mod grid;
pub mod mapgen;

pub use bsp::{BspLevel, BspParams, generate_bsp};
pub use doors::{Door, Doors, blocks_sight, is_walkable};
pub use fov::FovMap;
pub use grid::{Grid, Tile};
pub use mapgen::{CaveParams, generate_cave};
