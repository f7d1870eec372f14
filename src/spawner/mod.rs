//! Obstacle spawner.
//!
//! Owns one fixed-capacity pool per lane, a spawn timer and interval, the
//! scroll speed, and a queue of staggered spawns on its own logical clock.
//! Each spawn event rolls a policy from a constant weighted table and emits
//! a single obstacle, a formation, or a staggered multi-lane batch.

pub mod logic;
pub mod patterns;
pub mod types;

pub use logic::*;
pub use patterns::*;
pub use types::{Obstacle, ObstaclePool, ObstacleSpawner, ObstacleSpec, ObstacleVariant, PendingSpawn};
