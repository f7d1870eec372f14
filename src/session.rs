//! Session: screen flow (menu, playing, game over) and the fixed-step
//! simulation loop that drives the run state and the spawner together.

use crate::config::RunConfig;
use crate::constants::{MAX_FRAME_MS, SIM_STEP_MS};
use crate::field::{Lane, MoleSlot};
use crate::run::{self, Form, RunState, SwitchDirection, VerticalDirection};
use crate::spawner::{self, ObstacleSpawner};
use rand::Rng;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    GameOver,
}

/// UI-agnostic input edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionInput {
    SwitchPrev,
    SwitchNext,
    /// Jump (Dino). Also confirms on the game-over screen.
    Primary,
    UpEdge,
    DownEdge,
    Confirm,
    Restart,
    Quit,
    /// Any other key. Starts a run from the menu.
    Other,
}

/// Vertical keys currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldInput {
    pub up: bool,
    pub down: bool,
}

/// Something the player should notice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    RunStarted,
    FormSwitched { from: Form, to: Form, energized: bool },
    MultiplierRaised(u32),
    Jumped,
    LaneChanged(MoleSlot),
    SpeedIncreased { scroll_speed: f64 },
    GameOver { score: u64, hit_lane: Lane },
    ReturnedToMenu,
}

pub struct Session {
    config: RunConfig,
    pub screen: Screen,
    pub run: RunState,
    pub spawner: ObstacleSpawner,
    held: HeldInput,
    accumulated_ms: u64,
    /// Run time since the last speed increase.
    ramp_timer_ms: u64,
    /// Best score since the process started.
    pub best_score: u64,
    pub runs_played: u32,
    quit_requested: bool,
}

impl Session {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            screen: Screen::Menu,
            run: RunState::new(config),
            spawner: ObstacleSpawner::new(config),
            held: HeldInput::default(),
            accumulated_ms: 0,
            ramp_timer_ms: 0,
            best_score: 0,
            runs_played: 0,
            quit_requested: false,
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn held(&self) -> HeldInput {
        self.held
    }

    pub fn set_held(&mut self, held: HeldInput) {
        self.held = held;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Reset run and spawner and enter the playing screen.
    pub fn start_run(&mut self) -> SessionEvent {
        self.run.reset();
        self.spawner.reset();
        self.accumulated_ms = 0;
        self.ramp_timer_ms = 0;
        self.held = HeldInput::default();
        self.screen = Screen::Playing;
        self.runs_played += 1;
        info!(run = self.runs_played, "run started");
        SessionEvent::RunStarted
    }

    /// Apply one input edge for the current screen.
    pub fn handle_input(&mut self, input: SessionInput) -> Vec<SessionEvent> {
        if input == SessionInput::Quit {
            debug!("quit requested");
            self.quit_requested = true;
            return Vec::new();
        }

        match self.screen {
            Screen::Menu => vec![self.start_run()],
            Screen::Playing => self.handle_playing_input(input),
            Screen::GameOver => match input {
                SessionInput::Confirm | SessionInput::Primary => {
                    self.screen = Screen::Menu;
                    debug!("returned to menu");
                    vec![SessionEvent::ReturnedToMenu]
                }
                SessionInput::Restart => vec![self.start_run()],
                _ => Vec::new(),
            },
        }
    }

    fn handle_playing_input(&mut self, input: SessionInput) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        match input {
            SessionInput::SwitchPrev => self.switch(SwitchDirection::Prev, &mut events),
            SessionInput::SwitchNext => self.switch(SwitchDirection::Next, &mut events),
            SessionInput::Primary => {
                if run::handle_primary_action(&mut self.run) {
                    events.push(SessionEvent::Jumped);
                }
            }
            SessionInput::UpEdge => self.lane_step(VerticalDirection::Up, &mut events),
            SessionInput::DownEdge => self.lane_step(VerticalDirection::Down, &mut events),
            SessionInput::Restart => events.push(self.start_run()),
            SessionInput::Confirm | SessionInput::Quit | SessionInput::Other => {}
        }
        events
    }

    fn switch(&mut self, direction: SwitchDirection, events: &mut Vec<SessionEvent>) {
        let Some(outcome) = run::switch_form(&mut self.run, direction) else {
            debug!(
                cooldown_ms = self.run.swap_cooldown_ms,
                "form switch rejected"
            );
            return;
        };

        debug!(
            from = outcome.from.name(),
            to = outcome.to.name(),
            energized = outcome.energized,
            swaps = self.run.swap_count,
            "form switched"
        );
        events.push(SessionEvent::FormSwitched {
            from: outcome.from,
            to: outcome.to,
            energized: outcome.energized,
        });
        if outcome.multiplier_raised {
            info!(multiplier = self.run.multiplier, "multiplier raised");
            events.push(SessionEvent::MultiplierRaised(self.run.multiplier));
        }
    }

    fn lane_step(&mut self, direction: VerticalDirection, events: &mut Vec<SessionEvent>) {
        if let Some(slot) = run::handle_lane_step(&mut self.run, direction) {
            events.push(SessionEvent::LaneChanged(slot));
        }
    }

    /// Advance the simulation by a frame delta.
    ///
    /// `dt_ms` is clamped to `MAX_FRAME_MS` and consumed in `SIM_STEP_MS`
    /// steps; any remainder carries over to the next call. Stepping stops at
    /// the first fatal collision.
    pub fn tick<R: Rng>(&mut self, dt_ms: u64, rng: &mut R) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.screen != Screen::Playing {
            return events;
        }

        self.accumulated_ms += dt_ms.min(MAX_FRAME_MS);

        while self.accumulated_ms >= SIM_STEP_MS {
            self.accumulated_ms -= SIM_STEP_MS;
            self.step(rng, &mut events);

            if self.screen != Screen::Playing {
                self.accumulated_ms = 0;
                break;
            }
        }

        events
    }

    /// Single simulation step.
    fn step<R: Rng>(&mut self, rng: &mut R, events: &mut Vec<SessionEvent>) {
        // 1. Gauge, cooldown, score
        run::tick(&mut self.run, SIM_STEP_MS);

        // 2. Speed ramp
        self.ramp_timer_ms += SIM_STEP_MS;
        if self.ramp_timer_ms >= self.config.speed_ramp_interval_ms {
            self.ramp_timer_ms -= self.config.speed_ramp_interval_ms;
            spawner::increase_speed(&mut self.spawner, self.config.speed_ramp_factor);
            events.push(SessionEvent::SpeedIncreased {
                scroll_speed: self.spawner.scroll_speed,
            });
        }

        // 3. Spawns and recycling
        spawner::advance(&mut self.spawner, SIM_STEP_MS, rng);

        // 4. Held keys
        match self.run.form {
            Form::Dino if self.held.up => {
                if run::handle_primary_action(&mut self.run) {
                    events.push(SessionEvent::Jumped);
                }
            }
            Form::Eagle => {
                if self.held.up && !self.held.down {
                    run::handle_vertical_input(&mut self.run, VerticalDirection::Up);
                } else if self.held.down && !self.held.up {
                    run::handle_vertical_input(&mut self.run, VerticalDirection::Down);
                }
            }
            _ => {}
        }

        // 5. Movement
        run::apply_gravity(&mut self.run, SIM_STEP_MS);
        spawner::integrate(&mut self.spawner, SIM_STEP_MS);

        // 6. Collision
        let player = self.run.player_bounds();
        let hit_lane = self
            .spawner
            .active_obstacles()
            .find(|o| o.bounds().overlaps(&player) && run::should_collide(&self.run, o))
            .map(|o| o.lane);

        if let Some(hit_lane) = hit_lane {
            if run::on_collision(&mut self.run) {
                self.spawner.cancel_pending();
                self.screen = Screen::GameOver;

                let score = self.run.display_score();
                self.best_score = self.best_score.max(score);
                info!(
                    score,
                    best = self.best_score,
                    form = self.run.form.name(),
                    lane = hit_lane.name(),
                    run_time_ms = self.run.run_time_ms,
                    "game over"
                );
                events.push(SessionEvent::GameOver { score, hit_lane });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::field::Anchor;
    use crate::spawner::{ObstacleSpec, ObstacleVariant};
    use rand::rngs::mock::StepRng;

    fn lowest_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    fn playing_session() -> Session {
        let mut session = Session::new(RunConfig::default());
        session.handle_input(SessionInput::Other);
        session
    }

    fn run_for(session: &mut Session, total_ms: u64) -> Vec<SessionEvent> {
        let mut rng = lowest_rng();
        let mut events = Vec::new();
        for _ in 0..total_ms / 100 {
            events.extend(session.tick(100, &mut rng));
        }
        events
    }

    fn place_ground_obstacle_on_player(session: &mut Session) {
        let spec = ObstacleSpec {
            x: PLAYER_X,
            y: GROUND_OBSTACLE_Y,
            width: GROUND_OBSTACLE_BOX.0,
            height: GROUND_OBSTACLE_BOX.1,
            anchor: Anchor::BottomCenter,
            variant: ObstacleVariant::default(),
        };
        assert!(session.spawner.pool_mut(Lane::Ground).spawn(spec, 0.0));
    }

    #[test]
    fn test_starts_on_menu() {
        let mut session = Session::new(RunConfig::default());
        assert_eq!(session.screen, Screen::Menu);

        let events = session.tick(100, &mut lowest_rng());
        assert!(events.is_empty());
        assert_eq!(session.run.run_time_ms, 0);
    }

    #[test]
    fn test_any_key_starts_run() {
        let mut session = Session::new(RunConfig::default());
        let events = session.handle_input(SessionInput::SwitchNext);
        assert_eq!(events, vec![SessionEvent::RunStarted]);
        assert_eq!(session.screen, Screen::Playing);
        // The starting key is not applied to the run
        assert_eq!(session.run.form, Form::Dino);
    }

    #[test]
    fn test_quit_from_any_screen() {
        let mut session = Session::new(RunConfig::default());
        session.handle_input(SessionInput::Quit);
        assert!(session.quit_requested());
        assert_eq!(session.screen, Screen::Menu);
    }

    #[test]
    fn test_frame_delta_is_clamped() {
        let mut session = playing_session();
        session.tick(5000, &mut lowest_rng());
        // 100ms clamp, six whole 16ms steps
        assert_eq!(session.run.run_time_ms, 96);
    }

    #[test]
    fn test_remainder_carries_between_frames() {
        let mut session = playing_session();
        let mut rng = lowest_rng();
        session.tick(10, &mut rng);
        assert_eq!(session.run.run_time_ms, 0);
        session.tick(10, &mut rng);
        assert_eq!(session.run.run_time_ms, 16);
    }

    #[test]
    fn test_speed_ramp_every_interval() {
        let mut session = playing_session();
        let events = run_for(&mut session, 3100);

        let ramps = events
            .iter()
            .filter(|e| matches!(e, SessionEvent::SpeedIncreased { .. }))
            .count();
        assert_eq!(ramps, 1);
        assert!((session.spawner.scroll_speed - 204.0).abs() < 1e-9);
        assert!((session.spawner.spawn_interval_ms - 1900.0).abs() < 1e-9);
    }

    #[test]
    fn test_switch_events() {
        let mut session = playing_session();
        let events = session.handle_input(SessionInput::SwitchNext);
        assert_eq!(
            events,
            vec![SessionEvent::FormSwitched {
                from: Form::Dino,
                to: Form::Eagle,
                energized: true,
            }]
        );

        // Cooldown blocks the next one
        assert!(session.handle_input(SessionInput::SwitchNext).is_empty());

        run_for(&mut session, 1100);
        let events = session.handle_input(SessionInput::SwitchPrev);
        assert!(events.contains(&SessionEvent::MultiplierRaised(2)));
    }

    #[test]
    fn test_held_up_moves_eagle() {
        let mut session = playing_session();
        session.handle_input(SessionInput::SwitchNext);
        session.set_held(HeldInput {
            up: true,
            down: false,
        });

        session.tick(48, &mut lowest_rng());

        assert_eq!(session.run.eagle_y, SKY_Y - 3.0 * EAGLE_STEP);
    }

    #[test]
    fn test_both_held_cancel_out() {
        let mut session = playing_session();
        session.handle_input(SessionInput::SwitchNext);
        session.set_held(HeldInput { up: true, down: true });

        session.tick(48, &mut lowest_rng());

        assert_eq!(session.run.eagle_y, SKY_Y);
    }

    #[test]
    fn test_held_up_jumps_dino() {
        let mut session = playing_session();
        session.set_held(HeldInput {
            up: true,
            down: false,
        });
        let events = session.tick(16, &mut lowest_rng());
        assert_eq!(events, vec![SessionEvent::Jumped]);
        assert!(session.run.airborne);
        assert!(session.run.player_y < DINO_GROUND_Y);
    }

    #[test]
    fn test_mole_edges_step_slots() {
        let mut session = playing_session();
        session.handle_input(SessionInput::SwitchPrev);
        assert_eq!(session.run.form, Form::Mole);

        let events = session.handle_input(SessionInput::DownEdge);
        assert_eq!(events, vec![SessionEvent::LaneChanged(MoleSlot::Bottom)]);
        assert!(session.handle_input(SessionInput::DownEdge).is_empty());
    }

    #[test]
    fn test_collision_ends_run_once() {
        let mut session = playing_session();
        place_ground_obstacle_on_player(&mut session);

        let events = session.tick(100, &mut lowest_rng());

        let game_overs: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, SessionEvent::GameOver { .. }))
            .collect();
        assert_eq!(game_overs.len(), 1);
        assert_eq!(session.screen, Screen::GameOver);
        assert!(session.run.game_over);
        // Stepping stopped at the collision
        assert_eq!(session.run.run_time_ms, 16);

        let frozen_score = session.run.score;
        assert!(session.tick(100, &mut lowest_rng()).is_empty());
        assert_eq!(session.run.score, frozen_score);
    }

    #[test]
    fn test_game_over_cancels_staggered_spawns() {
        let mut session = playing_session();
        session.spawner.pending.push(std::cmp::Reverse(crate::spawner::PendingSpawn {
            fire_at_ms: 10_000,
            seq: 0,
            lane: Lane::Sky,
        }));
        place_ground_obstacle_on_player(&mut session);

        session.tick(16, &mut lowest_rng());

        assert_eq!(session.screen, Screen::GameOver);
        assert_eq!(session.spawner.pending_count(), 0);
    }

    #[test]
    fn test_other_form_ignores_ground_obstacle() {
        let mut session = playing_session();
        session.handle_input(SessionInput::SwitchNext);
        place_ground_obstacle_on_player(&mut session);

        session.tick(100, &mut lowest_rng());

        assert_eq!(session.screen, Screen::Playing);
    }

    #[test]
    fn test_dino_eventually_hits_ground_obstacle() {
        // Lowest rolls always spawn single ground obstacles
        let mut session = playing_session();
        let events = run_for(&mut session, 10_000);

        assert_eq!(session.screen, Screen::GameOver);
        assert!(events.contains(&SessionEvent::GameOver {
            score: session.run.display_score(),
            hit_lane: Lane::Ground,
        }));
        assert_eq!(session.best_score, session.run.display_score());
    }

    #[test]
    fn test_game_over_confirm_and_restart() {
        let mut session = playing_session();
        place_ground_obstacle_on_player(&mut session);
        session.tick(16, &mut lowest_rng());
        assert_eq!(session.screen, Screen::GameOver);

        assert!(session.handle_input(SessionInput::SwitchNext).is_empty());

        let events = session.handle_input(SessionInput::Restart);
        assert_eq!(events, vec![SessionEvent::RunStarted]);
        assert_eq!(session.screen, Screen::Playing);
        assert!(!session.run.game_over);
        assert_eq!(session.spawner.active_count(), 0);
        assert_eq!(session.runs_played, 2);

        place_ground_obstacle_on_player(&mut session);
        session.tick(16, &mut lowest_rng());
        let events = session.handle_input(SessionInput::Confirm);
        assert_eq!(events, vec![SessionEvent::ReturnedToMenu]);
        assert_eq!(session.screen, Screen::Menu);
    }

    #[test]
    fn test_best_score_kept_across_runs() {
        let mut session = playing_session();
        run_for(&mut session, 1000);
        place_ground_obstacle_on_player(&mut session);
        session.tick(16, &mut lowest_rng());
        let first = session.best_score;
        assert!(first > 0);

        session.handle_input(SessionInput::Restart);
        place_ground_obstacle_on_player(&mut session);
        session.tick(16, &mut lowest_rng());

        assert_eq!(session.best_score, first);
    }
}
