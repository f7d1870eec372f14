//! Run state machine: the player's form, swap gauge, cooldown, score
//! multiplier, and the lane-matching rule that decides which overlaps are
//! fatal.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::{Form, RunState, SwitchDirection, VerticalDirection};
