//! Run state data structures: player forms and the per-run state block.

use crate::config::RunConfig;
use crate::constants::*;
use crate::field::{Aabb, Anchor, Lane, MoleSlot};
use serde::{Deserialize, Serialize};

/// The player's current form. Switching cycles Dino -> Eagle -> Mole -> Dino.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Form {
    /// Ground runner, jumps over ground obstacles.
    Dino,
    /// Flyer, drifts up and down inside the sky band.
    Eagle,
    /// Burrower, steps between three underground slots.
    Mole,
}

impl Form {
    pub const ALL: [Form; 3] = [Form::Dino, Form::Eagle, Form::Mole];

    pub fn index(self) -> usize {
        match self {
            Form::Dino => 0,
            Form::Eagle => 1,
            Form::Mole => 2,
        }
    }

    pub fn next(self) -> Form {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Form {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Lane this form occupies.
    pub fn lane(self) -> Lane {
        match self {
            Form::Dino => Lane::Ground,
            Form::Eagle => Lane::Sky,
            Form::Mole => Lane::Underground,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Form::Dino => "Dino",
            Form::Eagle => "Eagle",
            Form::Mole => "Mole",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchDirection {
    Prev,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalDirection {
    Up,
    Down,
}

/// Everything that changes during one run. Created fresh at run start and
/// fully reset on restart.
#[derive(Debug, Clone)]
pub struct RunState {
    pub(crate) config: RunConfig,

    // -- Player --
    pub form: Form,
    /// Current world y of the player's anchor (feet for Dino, center otherwise).
    pub player_y: f64,
    /// Last sky position, restored when switching back to Eagle.
    pub eagle_y: f64,
    /// Last underground slot, restored when switching back to Mole.
    pub mole_slot: MoleSlot,
    /// Dino only: true between a jump and landing.
    pub airborne: bool,
    /// Dino only: vertical velocity in px/s (negative = upward).
    pub vertical_velocity: f64,

    // -- Gauge and multiplier --
    /// Swap energy in [0, max_gauge].
    pub gauge: f64,
    /// Remaining switch lockout; switching is blocked while > 0.
    pub swap_cooldown_ms: f64,
    pub score: f64,
    /// Score multiplier, always >= 1.
    pub multiplier: u32,
    /// Energized switches this run.
    pub swap_count: u32,

    pub game_over: bool,
    /// Run time accumulated by `tick`.
    pub run_time_ms: u64,
}

impl RunState {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            form: Form::Dino,
            player_y: DINO_GROUND_Y,
            eagle_y: SKY_Y,
            mole_slot: MoleSlot::Middle,
            airborne: false,
            vertical_velocity: 0.0,
            gauge: config.max_gauge,
            swap_cooldown_ms: 0.0,
            score: 0.0,
            multiplier: 1,
            swap_count: 0,
            game_over: false,
            run_time_ms: 0,
        }
    }

    /// Restore every field to its starting value.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Player hitbox for the current form at `PLAYER_X`.
    pub fn player_bounds(&self) -> Aabb {
        let ((width, height), anchor) = match self.form {
            Form::Dino => (DINO_BOX, Anchor::BottomCenter),
            Form::Eagle => (EAGLE_BOX, Anchor::Center),
            Form::Mole => (MOLE_BOX, Anchor::Center),
        };
        Aabb::from_anchor(PLAYER_X, self.player_y, width, height, anchor)
    }

    /// Score as shown to the player.
    pub fn display_score(&self) -> u64 {
        self.score.floor() as u64
    }

    /// Energized switches banked toward the next multiplier step.
    pub fn swap_progress(&self) -> u32 {
        self.swap_count % self.config.swaps_per_multiplier
    }

    pub fn gauge_fraction(&self) -> f64 {
        (self.gauge / self.config.max_gauge).clamp(0.0, 1.0)
    }

    pub fn cooldown_fraction(&self) -> f64 {
        if self.config.swap_cooldown_ms > 0.0 {
            (self.swap_cooldown_ms / self.config.swap_cooldown_ms).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn can_switch(&self) -> bool {
        !self.game_over && self.swap_cooldown_ms <= 0.0
    }
}
