//! Tower-Defense Engine
//!
//! Fixed-timestep simulation of the tower-defense board: enemies walk a
//! static waypoint path, towers fire at the nearest enemy in range, and
//! projectiles fly to a snapshot of the target's position.
//!
//! ## Module Structure
//!
//! - `map`: the enemy path and board geometry
//! - `state`: aggregate game state, tower catalog, placement rules
//! - `tick`: the per-tick update pipeline
//! - `events`: per-tick event stream drained by the shell
//!
//! The tick clock is engine-internal: every call to [`tick::tick`] advances
//! simulated time by [`crate::TICK_MS`] regardless of wall time, so a round
//! is reproducible from its seed and operation sequence alone.

pub mod events;
pub mod map;
pub mod state;
pub mod tick;

// Re-export key types
pub use events::{DefenseEvent, DefenseEventData};
pub use map::{snap_to_cell, PATH};
pub use state::{DefenseConfig, DefenseState, Enemy, Phase, Projectile, Tower, TowerKind};
pub use tick::tick;
