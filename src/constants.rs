//! World geometry and fixed rules of the three-lane field.
//!
//! Positions are world-space pixels on a 1200x600 field with y growing
//! downward. Tunable numbers (gauge, cooldown, speeds, intervals) live in
//! [`crate::config::RunConfig`]; the values here are part of the game's rules.

// Field geometry
pub const FIELD_WIDTH: f64 = 1200.0;
pub const FIELD_HEIGHT: f64 = 600.0;
pub const LANE_HEIGHT: f64 = FIELD_HEIGHT / 3.0;
pub const SKY_Y: f64 = LANE_HEIGHT / 2.0; // 100
pub const GROUND_Y: f64 = LANE_HEIGHT * 2.0; // 400, ground surface on the lane boundary
pub const UNDERGROUND_Y: f64 = FIELD_HEIGHT - LANE_HEIGHT / 2.0; // 500

// Player placement
pub const PLAYER_X: f64 = 150.0;
/// Feet baseline of the ground form (bottom-anchored).
pub const DINO_GROUND_Y: f64 = 396.0;
pub const MOLE_SLOT_OFFSET: f64 = 50.0;

// Player hitboxes per form (world-space, already scaled)
pub const DINO_BOX: (f64, f64) = (40.0, 55.0);
pub const EAGLE_BOX: (f64, f64) = (48.0, 32.0);
pub const MOLE_BOX: (f64, f64) = (30.0, 12.0);

// Ground form jump physics (px/s and px/s^2)
pub const DINO_JUMP_VELOCITY: f64 = -600.0;
pub const WORLD_GRAVITY: f64 = 1000.0;
pub const DINO_GRAVITY: f64 = 1200.0;
/// Gravity felt while airborne: world gravity plus the body's own.
pub const JUMP_GRAVITY: f64 = WORLD_GRAVITY + DINO_GRAVITY;

// Sky form movement (per simulation step while held)
pub const EAGLE_STEP: f64 = 3.0;
pub const EAGLE_MIN_Y: f64 = SKY_Y - 50.0;
pub const EAGLE_MAX_Y: f64 = SKY_Y + 50.0;

// Lane-matching tolerances for fatal overlaps
pub const DINO_OBSTACLE_LANE_TOLERANCE: f64 = 30.0;
pub const DINO_PLAYER_TOLERANCE: f64 = 40.0;
pub const EAGLE_TOLERANCE: f64 = 40.0;
pub const MOLE_TOLERANCE: f64 = 30.0;

// Obstacle spawning
pub const SPAWN_MARGIN: f64 = 50.0;
pub const SPAWN_X: f64 = FIELD_WIDTH + SPAWN_MARGIN;
pub const RECYCLE_X: f64 = -100.0;
pub const GROUND_OBSTACLE_Y: f64 = GROUND_Y + 8.0;
pub const SKY_SPAWN_TOP: f64 = 20.0;
pub const SKY_SPAWN_BOTTOM: f64 = LANE_HEIGHT - 20.0;
pub const GROUND_ROW_SPACING: f64 = 80.0;
pub const SKY_FORMATION_SPACING: f64 = 100.0;
/// Spawn interval shrink applied with every speed increase.
pub const SPAWN_INTERVAL_DECAY: f64 = 0.95;

// Obstacle hitboxes
pub const GROUND_OBSTACLE_BOX: (f64, f64) = (40.0, 50.0);
pub const GROUND_OBSTACLE_FRAMES: [u8; 8] = [0, 1, 7, 8, 9, 10, 16, 17];
pub const SKY_OBSTACLE_BASE_BOX: (f64, f64) = (800.0, 400.0);
pub const SKY_SCALE_MIN: f64 = 0.15;
pub const SKY_SCALE_MAX: f64 = 0.40;
pub const ROCK_FRAMES: u8 = 6;
pub const ROCK_SCALE: f64 = 2.0;
pub const ROCK_BOX: f64 = 20.0 * ROCK_SCALE;
pub const FORCED_ROCK_SCALE: f64 = 2.5;
pub const FORCED_ROCK_BOX: f64 = 25.0 * FORCED_ROCK_SCALE;

// Simulation timing
/// Fixed simulation step (~60 FPS).
pub const SIM_STEP_MS: u64 = 16;
/// Frame deltas are clamped to this to avoid a burst after a pause or lag.
pub const MAX_FRAME_MS: u64 = 100;
