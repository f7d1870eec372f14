//! Keyboard input: maps crossterm key events onto session inputs and tracks
//! which vertical keys count as held.
//!
//! Terminals rarely report key releases, so a vertical key stays held for
//! `HELD_KEY_TIMEOUT` after its last press or auto-repeat event.

use crate::session::{HeldInput, Session, SessionEvent, SessionInput};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

/// How long a vertical key stays held without a fresh press/repeat event.
pub const HELD_KEY_TIMEOUT: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VerticalKey {
    Up,
    Down,
}

/// Last-seen timestamps for the vertical keys.
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    up: Option<Instant>,
    down: Option<Instant>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, key: VerticalKey) -> &mut Option<Instant> {
        match key {
            VerticalKey::Up => &mut self.up,
            VerticalKey::Down => &mut self.down,
        }
    }

    fn refresh(&mut self, key: VerticalKey, now: Instant) {
        *self.slot(key) = Some(now);
    }

    fn release(&mut self, key: VerticalKey) {
        *self.slot(key) = None;
    }

    /// Held state as of `now`.
    pub fn state(&self, now: Instant) -> HeldInput {
        let live = |seen: Option<Instant>| {
            seen.is_some_and(|t| now.saturating_duration_since(t) < HELD_KEY_TIMEOUT)
        };
        HeldInput {
            up: live(self.up),
            down: live(self.down),
        }
    }
}

fn vertical_key(code: KeyCode) -> Option<VerticalKey> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(VerticalKey::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(VerticalKey::Down),
        _ => None,
    }
}

/// Map a key press to a session input.
pub fn map_key(key: KeyEvent) -> SessionInput {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return SessionInput::Quit;
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => SessionInput::SwitchPrev,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => SessionInput::SwitchNext,
        KeyCode::Char(' ') => SessionInput::Primary,
        KeyCode::Enter => SessionInput::Confirm,
        KeyCode::Char('r') | KeyCode::Char('R') => SessionInput::Restart,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => SessionInput::Quit,
        code => match vertical_key(code) {
            Some(VerticalKey::Up) => SessionInput::UpEdge,
            Some(VerticalKey::Down) => SessionInput::DownEdge,
            None => SessionInput::Other,
        },
    }
}

/// Route one key event into the session.
///
/// Presses refresh held state and fire an edge. Auto-repeats only refresh
/// held state, so the Mole steps once per physical press. Releases clear
/// held state at once on terminals that report them.
pub fn handle_key_event(
    session: &mut Session,
    held: &mut HeldKeys,
    key: KeyEvent,
    now: Instant,
) -> Vec<SessionEvent> {
    let vertical = vertical_key(key.code);

    match key.kind {
        KeyEventKind::Release => {
            if let Some(v) = vertical {
                held.release(v);
            }
            Vec::new()
        }
        KeyEventKind::Repeat => {
            if let Some(v) = vertical {
                held.refresh(v, now);
            }
            Vec::new()
        }
        KeyEventKind::Press => {
            if let Some(v) = vertical {
                held.refresh(v, now);
            }
            session.handle_input(map_key(key))
        }
    }
}
