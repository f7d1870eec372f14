//! Obstacle spawner data structures: pooled obstacles and the spawner state.

use crate::config::RunConfig;
use crate::field::{Aabb, Anchor, Lane};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Visual variant picked at spawn time. Only the renderer reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleVariant {
    pub frame: u8,
    pub scale: f64,
}

impl Default for ObstacleVariant {
    fn default() -> Self {
        Self {
            frame: 0,
            scale: 1.0,
        }
    }
}

/// Placement for a new obstacle, filled in by the per-lane spawn routines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleSpec {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub anchor: Anchor,
    pub variant: ObstacleVariant,
}

/// A pooled obstacle slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub lane: Lane,
    /// Anchor position in world space.
    pub x: f64,
    pub y: f64,
    /// Horizontal velocity in px/s (negative = leftward).
    pub velocity_x: f64,
    pub width: f64,
    pub height: f64,
    pub anchor: Anchor,
    pub variant: ObstacleVariant,
    /// Inactive slots are never rendered, moved or collision-tested.
    pub active: bool,
}

impl Obstacle {
    fn dormant(lane: Lane) -> Self {
        Self {
            lane,
            x: 0.0,
            y: 0.0,
            velocity_x: 0.0,
            width: 0.0,
            height: 0.0,
            anchor: Anchor::Center,
            variant: ObstacleVariant::default(),
            active: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_anchor(self.x, self.y, self.width, self.height, self.anchor)
    }

    /// Deactivate and park at the origin with no motion.
    pub(crate) fn recycle(&mut self) {
        self.active = false;
        self.x = 0.0;
        self.y = 0.0;
        self.velocity_x = 0.0;
    }
}

/// Fixed-capacity arena of obstacle slots for one lane. Slots are reused by
/// index, never freed.
#[derive(Debug, Clone)]
pub struct ObstaclePool {
    lane: Lane,
    slots: Vec<Obstacle>,
}

impl ObstaclePool {
    pub fn new(lane: Lane, capacity: usize) -> Self {
        Self {
            lane,
            slots: vec![Obstacle::dormant(lane); capacity],
        }
    }

    pub fn lane(&self) -> Lane {
        self.lane
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Activate the first free slot with `spec`. Returns false (and changes
    /// nothing) when every slot is live.
    pub fn spawn(&mut self, spec: ObstacleSpec, velocity_x: f64) -> bool {
        let Some(slot) = self.slots.iter_mut().find(|o| !o.active) else {
            return false;
        };
        slot.x = spec.x;
        slot.y = spec.y;
        slot.width = spec.width;
        slot.height = spec.height;
        slot.anchor = spec.anchor;
        slot.variant = spec.variant;
        slot.velocity_x = velocity_x;
        slot.active = true;
        true
    }

    pub fn active(&self) -> impl Iterator<Item = &Obstacle> {
        self.slots.iter().filter(|o| o.active)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn slots(&self) -> &[Obstacle] {
        &self.slots
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Obstacle] {
        &mut self.slots
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.recycle();
        }
    }
}

/// A lane spawn deferred to a later point on the spawner's clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PendingSpawn {
    pub fire_at_ms: u64,
    /// Insertion order, breaks ties between equal fire times.
    pub seq: u64,
    pub lane: Lane,
}

/// Spawner state: three pools, spawn cadence, scroll speed and the queue of
/// staggered spawns.
#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    pub(crate) config: RunConfig,
    pub(crate) pools: [ObstaclePool; 3],
    /// Time accumulated toward the next spawn event.
    pub spawn_timer_ms: f64,
    pub spawn_interval_ms: f64,
    /// Current scroll speed in px/s, applied to obstacles as they spawn.
    pub scroll_speed: f64,
    /// Logical clock, advanced only by `advance`.
    pub clock_ms: u64,
    pub(crate) pending: BinaryHeap<Reverse<PendingSpawn>>,
    pub(crate) next_seq: u64,
    /// Spawn events fired since the last reset.
    pub spawn_events: u64,
}

impl ObstacleSpawner {
    pub fn new(config: RunConfig) -> Self {
        let capacity = config.pool_capacity;
        Self {
            config,
            pools: [
                ObstaclePool::new(Lane::Ground, capacity),
                ObstaclePool::new(Lane::Sky, capacity),
                ObstaclePool::new(Lane::Underground, capacity),
            ],
            spawn_timer_ms: 0.0,
            spawn_interval_ms: config.initial_spawn_interval_ms,
            scroll_speed: config.initial_scroll_speed,
            clock_ms: 0,
            pending: BinaryHeap::new(),
            next_seq: 0,
            spawn_events: 0,
        }
    }

    /// Deactivate every obstacle, drop pending spawns and restore the
    /// starting speed and cadence.
    pub fn reset(&mut self) {
        for pool in &mut self.pools {
            pool.clear();
        }
        self.pending.clear();
        self.next_seq = 0;
        self.spawn_timer_ms = 0.0;
        self.spawn_interval_ms = self.config.initial_spawn_interval_ms;
        self.scroll_speed = self.config.initial_scroll_speed;
        self.clock_ms = 0;
        self.spawn_events = 0;
    }

    /// Drop staggered spawns that have not fired yet.
    pub fn cancel_pending(&mut self) {
        self.pending.clear();
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn pool(&self, lane: Lane) -> &ObstaclePool {
        &self.pools[lane.index()]
    }

    pub(crate) fn pool_mut(&mut self, lane: Lane) -> &mut ObstaclePool {
        &mut self.pools[lane.index()]
    }

    /// Active obstacles across all three lanes.
    pub fn active_obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.pools.iter().flat_map(|pool| pool.active())
    }

    pub fn active_count(&self) -> usize {
        self.pools.iter().map(ObstaclePool::active_count).sum()
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }
}
