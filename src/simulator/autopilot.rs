//! Rule-based player for headless runs.
//!
//! Looks a short distance ahead of the player and, when the current lane is
//! threatened, switches to a clear form if the cooldown allows, otherwise
//! dodges inside the lane. Also switches early to keep the gauge from
//! emptying.

use crate::constants::{DINO_GROUND_Y, PLAYER_X};
use crate::field::MoleSlot;
use crate::run::{self, Form, RunState};
use crate::session::{HeldInput, Session, SessionInput};
use crate::spawner::Obstacle;

/// Seconds of scrolling the autopilot looks ahead.
const LOOKAHEAD_SECS: f64 = 0.6;
/// Ground obstacles closer than this (in seconds) trigger a jump.
const JUMP_LEAD_SECS: f64 = 0.12;
/// Gauge fraction below which a preemptive switch is attempted.
const LOW_GAUGE: f64 = 0.25;

/// What the autopilot does this step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decision {
    pub inputs: Vec<SessionInput>,
    pub held: HeldInput,
}

fn seat_y(run: &RunState, form: Form) -> f64 {
    match form {
        Form::Dino => DINO_GROUND_Y,
        Form::Eagle => run.eagle_y,
        Form::Mole => run.mole_slot.y(),
    }
}

/// Obstacles in the look-ahead window that would be fatal for `candidate`.
fn threats<'a>(
    session: &'a Session,
    candidate: &'a RunState,
) -> impl Iterator<Item = &'a Obstacle> + 'a {
    let horizon = PLAYER_X + session.spawner.scroll_speed * LOOKAHEAD_SECS;
    let player = candidate.player_bounds();
    session.spawner.active_obstacles().filter(move |o| {
        let b = o.bounds();
        b.right >= player.left && b.left <= horizon && run::should_collide(candidate, o)
    })
}

fn as_form(run: &RunState, form: Form, y: f64) -> RunState {
    let mut candidate = run.clone();
    candidate.form = form;
    candidate.player_y = y;
    candidate.airborne = false;
    candidate
}

fn is_clear(session: &Session, form: Form, y: f64) -> bool {
    let candidate = as_form(&session.run, form, y);
    let clear = threats(session, &candidate).next().is_none();
    clear
}

fn switch_to_clear(session: &Session) -> Option<SessionInput> {
    let run = &session.run;
    if !run.can_switch() {
        return None;
    }
    [
        (run.form.next(), SessionInput::SwitchNext),
        (run.form.prev(), SessionInput::SwitchPrev),
    ]
    .into_iter()
    .find(|(form, _)| is_clear(session, *form, seat_y(run, *form)))
    .map(|(_, input)| input)
}

/// Choose inputs for the next simulation step.
pub fn decide(session: &Session) -> Decision {
    let run = &session.run;
    let mut decision = Decision::default();

    let current = as_form(run, run.form, run.player_y);
    let nearest = threats(session, &current).min_by(|a, b| a.x.total_cmp(&b.x)).cloned();

    let Some(threat) = nearest else {
        if run.gauge_fraction() < LOW_GAUGE {
            decision.inputs.extend(switch_to_clear(session));
        }
        return decision;
    };

    // Mid-jump the Dino is committed
    if run.form == Form::Dino && run.airborne {
        return decision;
    }

    if let Some(input) = switch_to_clear(session) {
        decision.inputs.push(input);
        return decision;
    }

    match run.form {
        Form::Dino => {
            let gap = threat.bounds().left - run.player_bounds().right;
            if gap <= session.spawner.scroll_speed * JUMP_LEAD_SECS {
                decision.inputs.push(SessionInput::Primary);
            }
        }
        Form::Eagle => {
            if threat.y >= run.player_y {
                decision.held.up = true;
            } else {
                decision.held.down = true;
            }
        }
        Form::Mole => {
            let target = MoleSlot::ALL
                .into_iter()
                .filter(|slot| is_clear(session, Form::Mole, slot.y()))
                .min_by_key(|slot| slot.index().abs_diff(run.mole_slot.index()));
            if let Some(target) = target {
                if target.index() < run.mole_slot.index() {
                    decision.inputs.push(SessionInput::UpEdge);
                } else if target.index() > run.mole_slot.index() {
                    decision.inputs.push(SessionInput::DownEdge);
                }
            }
        }
    }

    decision
}
