//! Headless balance simulator.
//!
//! Plays many seeded runs with the rule-based [`autopilot`] at full speed
//! and aggregates survival and scoring into a [`SimReport`]. Used to check how
//! tuning in [`RunConfig`] affects difficulty.

pub mod autopilot;
pub mod report;

pub use report::{RunStats, SimReport};

use crate::config::RunConfig;
use crate::constants::SIM_STEP_MS;
use crate::session::{Screen, Session, SessionEvent};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub num_runs: u32,
    /// Base seed; run `i` uses `seed + i`. `None` picks a random base.
    pub seed: Option<u64>,
    /// Runs still alive at this run time are stopped and counted as timed out.
    pub max_run_ms: u64,
    pub run: RunConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 200,
            seed: None,
            max_run_ms: 5 * 60 * 1000,
            run: RunConfig::default(),
        }
    }
}

pub fn run_simulation(config: &SimConfig) -> SimReport {
    let base_seed = config.seed.unwrap_or_else(rand::random);
    let runs = (0..config.num_runs)
        .map(|i| simulate_single_run(config, base_seed.wrapping_add(u64::from(i))))
        .collect();
    SimReport::from_runs(runs)
}

/// Play one run to its end or the time limit.
pub fn simulate_single_run(config: &SimConfig, seed: u64) -> RunStats {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut session = Session::new(config.run);
    session.start_run();

    let mut stats = RunStats {
        seed,
        score: 0,
        run_time_ms: 0,
        hit_lane: None,
        switches: 0,
        energized_switches: 0,
        peak_multiplier: 1,
        jumps: 0,
        spawn_events: 0,
        final_scroll_speed: 0.0,
    };

    while session.screen == Screen::Playing && session.run.run_time_ms < config.max_run_ms {
        let decision = autopilot::decide(&session);
        session.set_held(decision.held);

        let mut events = Vec::new();
        for input in decision.inputs {
            events.extend(session.handle_input(input));
        }
        events.extend(session.tick(SIM_STEP_MS, &mut rng));

        for event in events {
            match event {
                SessionEvent::FormSwitched { energized, .. } => {
                    stats.switches += 1;
                    if energized {
                        stats.energized_switches += 1;
                    }
                }
                SessionEvent::Jumped => stats.jumps += 1,
                SessionEvent::GameOver { hit_lane, .. } => stats.hit_lane = Some(hit_lane),
                _ => {}
            }
        }
        stats.peak_multiplier = stats.peak_multiplier.max(session.run.multiplier);
    }

    stats.score = session.run.display_score();
    stats.run_time_ms = session.run.run_time_ms;
    stats.spawn_events = session.spawner.spawn_events;
    stats.final_scroll_speed = session.spawner.scroll_speed;

    debug!(
        seed,
        score = stats.score,
        run_time_ms = stats.run_time_ms,
        "simulated run finished"
    );
    stats
}
