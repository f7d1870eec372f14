//! Obstacle spawner logic: spawn cadence, pattern dispatch, per-lane spawn
//! routines, recycling and speed ramping.

use super::patterns::{select_policy, Formation, SpawnPattern, SpawnPolicy};
use super::types::*;
use crate::constants::*;
use crate::field::{Anchor, Lane, MoleSlot};
use rand::Rng;
use std::cmp::Reverse;
use tracing::{debug, trace};

/// Result of a spawn event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnOutcome {
    pub pattern: SpawnPattern,
    /// Obstacles placed immediately. Staggered chaos spawns are not counted.
    pub spawned: usize,
}

/// What one `advance` call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    /// Set when the spawn timer crossed the interval.
    pub spawn_event: Option<SpawnOutcome>,
    /// Obstacles placed this call, staggered spawns included.
    pub spawned: usize,
    pub recycled: usize,
}

/// Advance the spawner by `elapsed_ms`.
///
/// Order: move the logical clock, fire staggered spawns that are due, run at
/// most one spawn event if the timer reached the interval (the timer then
/// restarts from 0), then recycle obstacles that left the field. Obstacle
/// motion is applied separately by [`integrate`].
pub fn advance<R: Rng>(
    spawner: &mut ObstacleSpawner,
    elapsed_ms: u64,
    rng: &mut R,
) -> AdvanceReport {
    let mut report = AdvanceReport::default();

    spawner.clock_ms += elapsed_ms;
    report.spawned += fire_due_spawns(spawner, rng);

    spawner.spawn_timer_ms += elapsed_ms as f64;
    if spawner.spawn_timer_ms >= spawner.spawn_interval_ms {
        let outcome = spawn_event(spawner, rng);
        report.spawned += outcome.spawned;
        report.spawn_event = Some(outcome);
        spawner.spawn_timer_ms = 0.0;
    }

    report.recycled = recycle(spawner);
    report
}

/// Roll a spawn policy and emit its obstacles.
pub fn spawn_event<R: Rng>(spawner: &mut ObstacleSpawner, rng: &mut R) -> SpawnOutcome {
    spawner.spawn_events += 1;

    let roll: f64 = rng.gen();
    let outcome = match select_policy(roll) {
        SpawnPolicy::Single => {
            let lane = Lane::ALL[rng.gen_range(0..Lane::ALL.len())];
            SpawnOutcome {
                pattern: SpawnPattern::Single,
                spawned: usize::from(spawn_in_lane(spawner, lane, rng)),
            }
        }
        SpawnPolicy::Formation => {
            let formation = Formation::ALL[rng.gen_range(0..Formation::ALL.len())];
            SpawnOutcome {
                pattern: SpawnPattern::Formation(formation),
                spawned: spawn_formation(spawner, formation, rng),
            }
        }
        SpawnPolicy::Chaos => {
            let lanes = rng.gen_range(2..=3);
            schedule_chaos(spawner, lanes);
            SpawnOutcome {
                pattern: SpawnPattern::Chaos { lanes },
                spawned: 0,
            }
        }
    };

    debug!(
        roll,
        pattern = ?outcome.pattern,
        spawned = outcome.spawned,
        clock_ms = spawner.clock_ms,
        "spawn event"
    );
    outcome
}

/// Multiply the scroll speed by `factor` and shrink the spawn interval by 5%,
/// floored at the configured minimum. Factors below 1.0 are treated as 1.0
/// so the scroll speed never decreases within a run.
pub fn increase_speed(spawner: &mut ObstacleSpawner, factor: f64) {
    spawner.scroll_speed *= factor.max(1.0);
    spawner.spawn_interval_ms = (spawner.spawn_interval_ms * SPAWN_INTERVAL_DECAY)
        .max(spawner.config.min_spawn_interval_ms);
    debug!(
        scroll_speed = spawner.scroll_speed,
        spawn_interval_ms = spawner.spawn_interval_ms,
        "speed increased"
    );
}

/// Apply each active obstacle's velocity over `elapsed_ms`.
pub fn integrate(spawner: &mut ObstacleSpawner, elapsed_ms: u64) {
    let dt = elapsed_ms as f64 / 1000.0;
    for pool in &mut spawner.pools {
        for obstacle in pool.slots_mut().iter_mut().filter(|o| o.active) {
            obstacle.x += obstacle.velocity_x * dt;
        }
    }
}

/// Spawn one obstacle in `lane` using that lane's routine.
pub fn spawn_in_lane<R: Rng>(spawner: &mut ObstacleSpawner, lane: Lane, rng: &mut R) -> bool {
    match lane {
        Lane::Ground => spawn_ground(spawner, 0.0, rng),
        Lane::Sky => spawn_sky(spawner, 0.0, rng),
        Lane::Underground => {
            let slot = MoleSlot::ALL[rng.gen_range(0..MoleSlot::ALL.len())];
            spawn_rock(spawner, slot, false, rng)
        }
    }
}

/// Emit a formation and return how many obstacles were placed.
pub fn spawn_formation<R: Rng>(
    spawner: &mut ObstacleSpawner,
    formation: Formation,
    rng: &mut R,
) -> usize {
    let mut spawned = 0;
    match formation {
        Formation::GroundRow => {
            let count = rng.gen_range(2..=3);
            for i in 0..count {
                spawned += usize::from(spawn_ground(spawner, i as f64 * GROUND_ROW_SPACING, rng));
            }
        }
        Formation::UndergroundForced => {
            let safe = rng.gen_range(0..MoleSlot::ALL.len());
            for (i, slot) in MoleSlot::ALL.into_iter().enumerate() {
                if i != safe {
                    spawned += usize::from(spawn_rock(spawner, slot, true, rng));
                }
            }
        }
        Formation::SkyFormation => {
            let count = rng.gen_range(2..=4);
            for i in 0..count {
                spawned += usize::from(spawn_sky(spawner, i as f64 * SKY_FORMATION_SPACING, rng));
            }
        }
        Formation::VerticalWall => {
            let lanes = rng.gen_range(2..=3);
            for lane in Lane::ALL.into_iter().take(lanes) {
                spawned += usize::from(spawn_in_lane(spawner, lane, rng));
            }
        }
    }
    spawned
}

/// Ground obstacle resting on the ground surface.
fn spawn_ground<R: Rng>(spawner: &mut ObstacleSpawner, x_offset: f64, rng: &mut R) -> bool {
    let frame = GROUND_OBSTACLE_FRAMES[rng.gen_range(0..GROUND_OBSTACLE_FRAMES.len())];
    let (width, height) = GROUND_OBSTACLE_BOX;
    place(
        spawner,
        Lane::Ground,
        ObstacleSpec {
            x: SPAWN_X + x_offset,
            y: GROUND_OBSTACLE_Y,
            width,
            height,
            anchor: Anchor::BottomCenter,
            variant: ObstacleVariant { frame, scale: 1.0 },
        },
    )
}

/// Sky obstacle at a random height; the hitbox follows the random scale so
/// the visual and physical sizes agree.
fn spawn_sky<R: Rng>(spawner: &mut ObstacleSpawner, x_offset: f64, rng: &mut R) -> bool {
    let y = rng.gen_range(SKY_SPAWN_TOP..SKY_SPAWN_BOTTOM);
    let scale = rng.gen_range(SKY_SCALE_MIN..SKY_SCALE_MAX);
    let (base_w, base_h) = SKY_OBSTACLE_BASE_BOX;
    place(
        spawner,
        Lane::Sky,
        ObstacleSpec {
            x: SPAWN_X + x_offset,
            y,
            width: base_w * scale,
            height: base_h * scale,
            anchor: Anchor::Center,
            variant: ObstacleVariant { frame: 0, scale },
        },
    )
}

/// Rock in one underground slot. Forced formations use bigger rocks.
fn spawn_rock<R: Rng>(
    spawner: &mut ObstacleSpawner,
    slot: MoleSlot,
    forced: bool,
    rng: &mut R,
) -> bool {
    let frame = rng.gen_range(0..ROCK_FRAMES);
    let (scale, size) = if forced {
        (FORCED_ROCK_SCALE, FORCED_ROCK_BOX)
    } else {
        (ROCK_SCALE, ROCK_BOX)
    };
    place(
        spawner,
        Lane::Underground,
        ObstacleSpec {
            x: SPAWN_X,
            y: slot.y(),
            width: size,
            height: size,
            anchor: Anchor::Center,
            variant: ObstacleVariant { frame, scale },
        },
    )
}

/// Take a slot from the lane's pool. An exhausted pool skips the spawn.
fn place(spawner: &mut ObstacleSpawner, lane: Lane, spec: ObstacleSpec) -> bool {
    let velocity_x = -spawner.scroll_speed;
    let placed = spawner.pool_mut(lane).spawn(spec, velocity_x);
    if !placed {
        debug!(lane = lane.name(), "obstacle pool exhausted, spawn skipped");
    }
    placed
}

/// Queue `lanes` lanes (ground, sky, underground order), lane `i` firing
/// `i * chaos_stagger_ms` after now. Nothing spawns synchronously; the first
/// lane fires on the next `advance`.
fn schedule_chaos(spawner: &mut ObstacleSpawner, lanes: usize) {
    let stagger = spawner.config.chaos_stagger_ms;
    for (i, lane) in Lane::ALL.into_iter().take(lanes).enumerate() {
        let pending = PendingSpawn {
            fire_at_ms: spawner
                .clock_ms
                .saturating_add((i as u64).saturating_mul(stagger)),
            seq: spawner.next_seq,
            lane,
        };
        spawner.next_seq += 1;
        trace!(?pending, "staggered spawn queued");
        spawner.pending.push(Reverse(pending));
    }
}

fn fire_due_spawns<R: Rng>(spawner: &mut ObstacleSpawner, rng: &mut R) -> usize {
    let mut spawned = 0;
    while let Some(Reverse(next)) = spawner.pending.peek().copied() {
        if next.fire_at_ms > spawner.clock_ms {
            break;
        }
        spawner.pending.pop();
        spawned += usize::from(spawn_in_lane(spawner, next.lane, rng));
    }
    spawned
}

/// Deactivate obstacles that scrolled past the recycle line.
fn recycle(spawner: &mut ObstacleSpawner) -> usize {
    let mut recycled = 0;
    for pool in &mut spawner.pools {
        for obstacle in pool.slots_mut() {
            if obstacle.active && obstacle.x < RECYCLE_X {
                obstacle.recycle();
                recycled += 1;
            }
        }
    }
    recycled
}
