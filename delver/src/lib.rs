//! Turn-based dungeon level state over the warren map crates.
//!
//! [`Level`] ties a generated grid, its door overlay and a field-of-view
//! map to the player and the placed actors. Every operation that can
//! change sightlines (moving, toggling a door) recomputes FOV before it
//! returns, so visibility can never be observed stale.

pub mod entity;
pub mod level;
pub mod save;
pub mod spawn;

pub use entity::{Actor, ActorKind, Player};
pub use level::{Level, MapKind, MoveOutcome};
pub use save::{LevelSnapshot, LoadError};
pub use spawn::{GenerationError, MAX_GENERATION_RETRIES, spawn_points};
