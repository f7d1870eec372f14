//! Run state logic: form switching, gauge/cooldown/score timers, per-form
//! movement and the lane-matching collision predicate.

use super::types::*;
use crate::constants::*;
use crate::field::MoleSlot;
use crate::spawner::Obstacle;

/// Result of an accepted form switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchOutcome {
    pub from: Form,
    pub to: Form,
    /// The gauge still had energy, so the switch counted toward the multiplier.
    pub energized: bool,
    pub multiplier_raised: bool,
}

/// Rotate to the previous or next form.
///
/// Rejected (returns `None`, nothing changes) while the cooldown is running
/// or the run is over. Otherwise re-seats the player at the new form's
/// remembered position, refills the gauge, arms the cooldown and applies the
/// multiplier rule: every `swaps_per_multiplier`-th energized switch raises
/// the multiplier by one.
pub fn switch_form(run: &mut RunState, direction: SwitchDirection) -> Option<SwitchOutcome> {
    if !run.can_switch() {
        return None;
    }

    let from = run.form;
    let to = match direction {
        SwitchDirection::Next => from.next(),
        SwitchDirection::Prev => from.prev(),
    };

    run.form = to;
    run.player_y = match to {
        Form::Dino => DINO_GROUND_Y,
        Form::Eagle => run.eagle_y,
        Form::Mole => run.mole_slot.y(),
    };
    run.airborne = false;
    run.vertical_velocity = 0.0;

    let energized = run.gauge > 0.0;
    run.gauge = run.config.max_gauge;
    run.swap_cooldown_ms = run.config.swap_cooldown_ms;

    let mut multiplier_raised = false;
    if energized {
        run.swap_count += 1;
        if run.swap_count % run.config.swaps_per_multiplier == 0 {
            run.multiplier += 1;
            multiplier_raised = true;
        }
    }

    Some(SwitchOutcome {
        from,
        to,
        energized,
        multiplier_raised,
    })
}

/// Advance the run's timers by `elapsed_ms`. No-op once the run is over.
pub fn tick(run: &mut RunState, elapsed_ms: u64) {
    if run.game_over {
        return;
    }

    let elapsed = elapsed_ms as f64;

    run.gauge = (run.gauge - run.config.gauge_decay_per_sec * elapsed / 1000.0).max(0.0);
    if run.gauge <= 0.0 {
        run.multiplier = 1;
    }

    run.swap_cooldown_ms = (run.swap_cooldown_ms - elapsed).max(0.0);

    run.score += elapsed * run.config.score_per_ms * run.multiplier as f64;
    run.run_time_ms += elapsed_ms;
}

/// Dino jump. Returns true if a jump started.
pub fn handle_primary_action(run: &mut RunState) -> bool {
    if run.game_over || run.form != Form::Dino || run.airborne {
        return false;
    }
    run.vertical_velocity = DINO_JUMP_VELOCITY;
    run.airborne = true;
    true
}

/// Integrate the Dino's jump over `elapsed_ms`. Returns true on landing.
pub fn apply_gravity(run: &mut RunState, elapsed_ms: u64) -> bool {
    if run.game_over || run.form != Form::Dino || !run.airborne {
        return false;
    }

    let dt = elapsed_ms as f64 / 1000.0;
    run.vertical_velocity += JUMP_GRAVITY * dt;
    run.player_y += run.vertical_velocity * dt;

    if run.player_y >= DINO_GROUND_Y {
        run.player_y = DINO_GROUND_Y;
        run.vertical_velocity = 0.0;
        run.airborne = false;
        return true;
    }
    false
}

/// Held vertical input: nudges the Eagle one step inside the sky band.
/// Returns true if the player moved.
pub fn handle_vertical_input(run: &mut RunState, direction: VerticalDirection) -> bool {
    if run.game_over || run.form != Form::Eagle {
        return false;
    }

    let before = run.eagle_y;
    run.eagle_y = match direction {
        VerticalDirection::Up => (run.eagle_y - EAGLE_STEP).max(EAGLE_MIN_Y),
        VerticalDirection::Down => (run.eagle_y + EAGLE_STEP).min(EAGLE_MAX_Y),
    };
    run.player_y = run.eagle_y;
    run.eagle_y != before
}

/// Edge-triggered vertical input: moves the Mole exactly one slot,
/// saturating at the ends. Returns the new slot if it changed.
pub fn handle_lane_step(run: &mut RunState, direction: VerticalDirection) -> Option<MoleSlot> {
    if run.game_over || run.form != Form::Mole {
        return None;
    }

    let before = run.mole_slot;
    run.mole_slot = match direction {
        VerticalDirection::Up => before.up(),
        VerticalDirection::Down => before.down(),
    };
    run.player_y = run.mole_slot.y();
    (run.mole_slot != before).then_some(run.mole_slot)
}

/// Whether an overlap with `obstacle` is fatal.
///
/// Never once the run is over. Otherwise the obstacle must sit in the lane
/// the current form occupies, judged by y distance:
/// - Dino: obstacle within 30 of the ground surface and player feet within
///   40 of the obstacle. There is no blanket airborne immunity; a jump only
///   clears an obstacle once the feet are 40 or more above it.
/// - Eagle: player within 40 of the obstacle.
/// - Mole: player within 30 of the obstacle.
pub fn should_collide(run: &RunState, obstacle: &Obstacle) -> bool {
    if run.game_over || !obstacle.active {
        return false;
    }

    let obstacle_y = obstacle.y;
    match run.form {
        Form::Dino => {
            (obstacle_y - GROUND_Y).abs() < DINO_OBSTACLE_LANE_TOLERANCE
                && (run.player_y - obstacle_y).abs() < DINO_PLAYER_TOLERANCE
        }
        Form::Eagle => (run.player_y - obstacle_y).abs() < EAGLE_TOLERANCE,
        Form::Mole => (obstacle_y - run.player_y).abs() < MOLE_TOLERANCE,
    }
}

/// Mark the run over. Returns true only on the first call.
pub fn on_collision(run: &mut RunState) -> bool {
    if run.game_over {
        return false;
    }
    run.game_over = true;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::field::{Anchor, Lane};
    use crate::spawner::ObstacleVariant;

    fn new_run() -> RunState {
        RunState::new(RunConfig::default())
    }

    fn obstacle(lane: Lane, y: f64) -> Obstacle {
        Obstacle {
            lane,
            x: PLAYER_X,
            y,
            velocity_x: -200.0,
            width: 40.0,
            height: 40.0,
            anchor: Anchor::Center,
            variant: ObstacleVariant::default(),
            active: true,
        }
    }

    /// Let the cooldown run out without touching anything else that matters.
    fn wait_cooldown(run: &mut RunState) {
        tick(run, run.config.swap_cooldown_ms as u64);
    }

    // ── Form switching ──

    #[test]
    fn test_switch_next_and_prev() {
        let mut run = new_run();

        let outcome = switch_form(&mut run, SwitchDirection::Next).unwrap();
        assert_eq!((outcome.from, outcome.to), (Form::Dino, Form::Eagle));
        assert_eq!(run.player_y, SKY_Y);

        wait_cooldown(&mut run);
        switch_form(&mut run, SwitchDirection::Prev).unwrap();
        assert_eq!(run.form, Form::Dino);
        assert_eq!(run.player_y, DINO_GROUND_Y);

        wait_cooldown(&mut run);
        switch_form(&mut run, SwitchDirection::Prev).unwrap();
        assert_eq!(run.form, Form::Mole);
        assert_eq!(run.player_y, MoleSlot::Middle.y());
    }

    #[test]
    fn test_switch_rejected_during_cooldown() {
        let mut run = new_run();
        switch_form(&mut run, SwitchDirection::Next).unwrap();
        tick(&mut run, 500);
        let before = run.clone();

        assert!(switch_form(&mut run, SwitchDirection::Next).is_none());

        assert_eq!(run.form, before.form);
        assert_eq!(run.gauge, before.gauge);
        assert_eq!(run.swap_count, before.swap_count);
        assert_eq!(run.swap_cooldown_ms, before.swap_cooldown_ms);
    }

    #[test]
    fn test_switch_refills_gauge_and_arms_cooldown() {
        let mut run = new_run();
        tick(&mut run, 2000);
        assert!(run.gauge < 100.0);

        switch_form(&mut run, SwitchDirection::Next).unwrap();

        assert_eq!(run.gauge, 100.0);
        assert_eq!(run.swap_cooldown_ms, 1000.0);
    }

    #[test]
    fn test_switch_restores_remembered_positions() {
        let mut run = new_run();
        switch_form(&mut run, SwitchDirection::Next).unwrap(); // Eagle
        for _ in 0..5 {
            handle_vertical_input(&mut run, VerticalDirection::Up);
        }
        assert_eq!(run.eagle_y, SKY_Y - 15.0);

        wait_cooldown(&mut run);
        switch_form(&mut run, SwitchDirection::Next).unwrap(); // Mole
        handle_lane_step(&mut run, VerticalDirection::Down);
        assert_eq!(run.mole_slot, MoleSlot::Bottom);

        wait_cooldown(&mut run);
        switch_form(&mut run, SwitchDirection::Prev).unwrap(); // Eagle
        assert_eq!(run.player_y, SKY_Y - 15.0);

        wait_cooldown(&mut run);
        switch_form(&mut run, SwitchDirection::Next).unwrap(); // Mole
        assert_eq!(run.player_y, MoleSlot::Bottom.y());
    }

    #[test]
    fn test_switch_mid_jump_lands_player() {
        let mut run = new_run();
        handle_primary_action(&mut run);
        apply_gravity(&mut run, 100);
        assert!(run.airborne);

        switch_form(&mut run, SwitchDirection::Next).unwrap();

        assert!(!run.airborne);
        assert_eq!(run.vertical_velocity, 0.0);
    }

    // ── Multiplier ──

    #[test]
    fn test_four_energized_switches_reach_x3() {
        let mut run = new_run();

        for i in 0..4 {
            assert!(run.gauge > 0.0);
            let outcome = switch_form(&mut run, SwitchDirection::Next).unwrap();
            assert!(outcome.energized);
            assert_eq!(outcome.multiplier_raised, i % 2 == 1);
            wait_cooldown(&mut run);
        }

        assert_eq!(run.swap_count, 4);
        assert_eq!(run.multiplier, 3);
    }

    #[test]
    fn test_empty_gauge_switch_not_energized() {
        let mut run = new_run();
        tick(&mut run, 3400);
        assert_eq!(run.gauge, 0.0);
        assert_eq!(run.multiplier, 1);

        let outcome = switch_form(&mut run, SwitchDirection::Next).unwrap();

        assert!(!outcome.energized);
        assert!(!outcome.multiplier_raised);
        assert_eq!(run.swap_count, 0);
        assert_eq!(run.gauge, 100.0);
        assert_eq!(run.multiplier, 1);
    }

    #[test]
    fn test_multiplier_resets_when_gauge_empties() {
        let mut run = new_run();
        run.multiplier = 4;
        run.gauge = 10.0;

        tick(&mut run, 200);
        assert_eq!(run.multiplier, 4);

        tick(&mut run, 200);
        assert_eq!(run.gauge, 0.0);
        assert_eq!(run.multiplier, 1);
    }

    #[test]
    fn test_multiplier_has_no_ceiling() {
        let mut run = new_run();
        for _ in 0..60 {
            switch_form(&mut run, SwitchDirection::Next).unwrap();
            wait_cooldown(&mut run);
        }
        assert_eq!(run.multiplier, 31);
    }

    // ── Timers ──

    #[test]
    fn test_tick_gauge_cooldown_score() {
        let mut run = new_run();
        run.swap_cooldown_ms = 300.0;

        tick(&mut run, 1000);

        assert!((run.gauge - 70.0).abs() < 1e-9);
        assert_eq!(run.swap_cooldown_ms, 0.0);
        assert!((run.score - 100.0).abs() < 1e-9);
        assert_eq!(run.run_time_ms, 1000);
    }

    #[test]
    fn test_score_scales_with_multiplier() {
        let mut run = new_run();
        run.multiplier = 3;

        tick(&mut run, 100);

        assert!((run.score - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_gauge_clamped() {
        let mut run = new_run();
        for _ in 0..100 {
            tick(&mut run, 250);
            assert!(run.gauge >= 0.0 && run.gauge <= run.config.max_gauge);
        }
        assert_eq!(run.gauge, 0.0);
    }

    #[test]
    fn test_tick_frozen_after_game_over() {
        let mut run = new_run();
        tick(&mut run, 500);
        on_collision(&mut run);
        let before = run.clone();

        tick(&mut run, 5000);

        assert_eq!(run.gauge, before.gauge);
        assert_eq!(run.score, before.score);
        assert_eq!(run.run_time_ms, before.run_time_ms);
    }

    // ── Movement ──

    #[test]
    fn test_jump_arc_lands_on_baseline() {
        let mut run = new_run();
        assert!(handle_primary_action(&mut run));
        assert!(!handle_primary_action(&mut run), "no double jump");

        let mut peak = run.player_y;
        let mut landed = false;
        for _ in 0..200 {
            if apply_gravity(&mut run, SIM_STEP_MS) {
                landed = true;
                break;
            }
            peak = peak.min(run.player_y);
        }

        assert!(landed);
        assert!(!run.airborne);
        assert_eq!(run.player_y, DINO_GROUND_Y);
        assert_eq!(run.vertical_velocity, 0.0);
        // Apex of v^2 / 2g is about 82px above the baseline
        assert!(DINO_GROUND_Y - peak > 70.0);
        assert!(DINO_GROUND_Y - peak < 90.0);
    }

    #[test]
    fn test_jump_only_in_dino_form() {
        let mut run = new_run();
        switch_form(&mut run, SwitchDirection::Next).unwrap();
        assert!(!handle_primary_action(&mut run));
        assert!(!run.airborne);
    }

    #[test]
    fn test_eagle_band_clamp() {
        let mut run = new_run();
        switch_form(&mut run, SwitchDirection::Next).unwrap();

        for _ in 0..100 {
            handle_vertical_input(&mut run, VerticalDirection::Up);
        }
        assert_eq!(run.eagle_y, EAGLE_MIN_Y);
        assert!(!handle_vertical_input(&mut run, VerticalDirection::Up));

        for _ in 0..100 {
            handle_vertical_input(&mut run, VerticalDirection::Down);
        }
        assert_eq!(run.eagle_y, EAGLE_MAX_Y);
        assert_eq!(run.player_y, EAGLE_MAX_Y);
    }

    #[test]
    fn test_vertical_input_ignored_outside_eagle() {
        let mut run = new_run();
        assert!(!handle_vertical_input(&mut run, VerticalDirection::Up));
        assert_eq!(run.player_y, DINO_GROUND_Y);
        assert_eq!(run.eagle_y, SKY_Y);
    }

    #[test]
    fn test_mole_lane_steps_saturate() {
        let mut run = new_run();
        switch_form(&mut run, SwitchDirection::Prev).unwrap();
        assert_eq!(run.form, Form::Mole);

        assert_eq!(
            handle_lane_step(&mut run, VerticalDirection::Up),
            Some(MoleSlot::Top)
        );
        assert_eq!(handle_lane_step(&mut run, VerticalDirection::Up), None);
        assert_eq!(run.player_y, MoleSlot::Top.y());

        handle_lane_step(&mut run, VerticalDirection::Down);
        handle_lane_step(&mut run, VerticalDirection::Down);
        assert_eq!(run.mole_slot, MoleSlot::Bottom);
        assert_eq!(handle_lane_step(&mut run, VerticalDirection::Down), None);
    }

    // ── Collision gating ──

    #[test]
    fn test_dino_collides_with_ground_obstacle() {
        let run = new_run();
        assert!(should_collide(&run, &obstacle(Lane::Ground, GROUND_OBSTACLE_Y)));
        assert!(!should_collide(&run, &obstacle(Lane::Sky, SKY_Y)));
        assert!(!should_collide(&run, &obstacle(Lane::Underground, MoleSlot::Top.y())));
    }

    #[test]
    fn test_airborne_dino_uses_tolerance_band() {
        let mut run = new_run();
        run.airborne = true;
        let ground = obstacle(Lane::Ground, GROUND_OBSTACLE_Y);

        // Low in the jump: still within 40 of the obstacle
        run.player_y = GROUND_OBSTACLE_Y - 39.0;
        assert!(should_collide(&run, &ground));

        // High enough to clear
        run.player_y = GROUND_OBSTACLE_Y - 40.0;
        assert!(!should_collide(&run, &ground));
    }

    #[test]
    fn test_eagle_collision_follows_height() {
        let mut run = new_run();
        switch_form(&mut run, SwitchDirection::Next).unwrap();

        assert!(should_collide(&run, &obstacle(Lane::Sky, SKY_Y + 39.0)));
        assert!(!should_collide(&run, &obstacle(Lane::Sky, SKY_Y + 40.0)));
        assert!(!should_collide(&run, &obstacle(Lane::Ground, GROUND_OBSTACLE_Y)));
    }

    #[test]
    fn test_mole_collides_only_in_own_slot() {
        let mut run = new_run();
        switch_form(&mut run, SwitchDirection::Prev).unwrap();

        assert!(should_collide(&run, &obstacle(Lane::Underground, MoleSlot::Middle.y())));
        assert!(!should_collide(&run, &obstacle(Lane::Underground, MoleSlot::Top.y())));
        assert!(!should_collide(&run, &obstacle(Lane::Underground, MoleSlot::Bottom.y())));
    }

    #[test]
    fn test_inactive_obstacle_never_collides() {
        let run = new_run();
        let mut parked = obstacle(Lane::Ground, GROUND_OBSTACLE_Y);
        parked.active = false;
        assert!(!should_collide(&run, &parked));
    }

    #[test]
    fn test_on_collision_is_idempotent() {
        let mut run = new_run();
        let ground = obstacle(Lane::Ground, GROUND_OBSTACLE_Y);

        assert!(should_collide(&run, &ground));
        assert!(on_collision(&mut run));
        assert!(run.game_over);

        assert!(!should_collide(&run, &ground));
        assert!(!on_collision(&mut run));
        assert!(switch_form(&mut run, SwitchDirection::Next).is_none());
        assert!(!handle_primary_action(&mut run));
    }
}
