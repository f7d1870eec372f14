pub mod game_common;
pub mod menu_scene;
pub mod runner_scene;

use crate::session::{Screen, Session};
use ratatui::Frame;

/// Draw the current screen.
pub fn draw(frame: &mut Frame, session: &Session) {
    let area = frame.size();
    match session.screen {
        Screen::Menu => menu_scene::render_menu_scene(frame, area, session),
        Screen::Playing | Screen::GameOver => {
            runner_scene::render_runner_scene(frame, area, session)
        }
    }
}
