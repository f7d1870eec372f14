//! Lane runner scene: the three-lane play field scaled from world space into
//! a cell buffer, plus the status bar, info panel and game-over overlay.

use super::game_common::{
    create_game_layout, meter, render_game_over_overlay, render_info_panel_frame,
    render_status_bar, Cell, CellBuffer, RunResultType,
};
use crate::constants::{FIELD_HEIGHT, FIELD_WIDTH, GROUND_Y, LANE_HEIGHT, PLAYER_X};
use crate::field::{Aabb, Lane, MoleSlot};
use crate::run::Form;
use crate::session::{Screen, Session};
use crate::spawner::Obstacle;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SKY_BG: Color = Color::Rgb(20, 28, 48);
const UNDERGROUND_BG: Color = Color::Rgb(40, 28, 18);
const GROUND_CHAR: char = '\u{2593}'; // ▓
const DIRT_CHAR: char = '\u{2591}'; // ░

/// World-to-cell mapping for the current play field size.
#[derive(Debug, Clone, Copy)]
struct FieldScale {
    x: f64,
    y: f64,
}

impl FieldScale {
    fn new(width: usize, height: usize) -> Self {
        Self {
            x: width as f64 / FIELD_WIDTH,
            y: height as f64 / FIELD_HEIGHT,
        }
    }

    fn row(self, world_y: f64) -> i32 {
        (world_y * self.y).floor() as i32
    }

    fn col(self, world_x: f64) -> i32 {
        (world_x * self.x).floor() as i32
    }

    /// Column and row ranges covered by a box, at least one cell each.
    fn span(self, bounds: &Aabb) -> ((i32, i32), (i32, i32)) {
        let left = self.col(bounds.left);
        let right = ((bounds.right * self.x).ceil() as i32).max(left + 1);
        let top = self.row(bounds.top);
        let bottom = ((bounds.bottom * self.y).ceil() as i32).max(top + 1);
        ((left, right), (top, bottom))
    }
}

pub fn form_color(form: Form) -> Color {
    match form {
        Form::Dino => Color::LightYellow,
        Form::Eagle => Color::LightCyan,
        Form::Mole => Color::LightRed,
    }
}

/// Render the playing or game-over screen.
pub fn render_runner_scene(frame: &mut Frame, area: Rect, session: &Session) {
    let run = &session.run;
    let layout = create_game_layout(frame, area, " Laneshift ", form_color(run.form), 12, 24);

    render_play_field(frame, layout.content, session);
    render_status_bar_content(frame, layout.status_bar, session);
    render_info_panel(frame, layout.info_panel, session);

    if session.screen == Screen::GameOver {
        render_run_over(frame, layout.content, session);
    }
}

fn render_play_field(frame: &mut Frame, area: Rect, session: &Session) {
    if area.height < 6 || area.width < 20 {
        return;
    }

    let mut buffer = CellBuffer::new(area.width, area.height);
    let scale = FieldScale::new(buffer.width(), buffer.height());

    draw_lanes(&mut buffer, scale, session.run.form.lane());

    for obstacle in session.spawner.active_obstacles() {
        draw_obstacle(&mut buffer, scale, obstacle);
    }

    draw_player(&mut buffer, scale, session);

    // HUD (top-left)
    let run = &session.run;
    buffer.text(
        1,
        0,
        &format!("Score {}  x{}", run.display_score(), run.multiplier),
        Color::White,
    );

    buffer.render(frame, area);
}

fn draw_lanes(buffer: &mut CellBuffer, scale: FieldScale, active: Lane) {
    let ground_row = scale.row(GROUND_Y);
    let sky_end = scale.row(LANE_HEIGHT);

    for row in 0..buffer.height() as i32 {
        if row < sky_end {
            buffer.fill_row_bg(row, SKY_BG);
        } else if row > ground_row {
            buffer.fill_row_bg(row, UNDERGROUND_BG);
            for col in (0..buffer.width() as i32).filter(|c| (c + row * 3) % 7 == 0) {
                buffer.text(col, row, &DIRT_CHAR.to_string(), Color::Rgb(70, 50, 35));
            }
        }
    }

    for col in 0..buffer.width() as i32 {
        buffer.put(
            col,
            ground_row,
            Cell {
                ch: GROUND_CHAR,
                fg: Color::Rgb(90, 70, 50),
                bg: Color::Rgb(50, 40, 30),
            },
        );
    }

    // Marker for the lane the player occupies
    let marker_row = match active {
        Lane::Sky => scale.row(LANE_HEIGHT / 2.0),
        Lane::Ground => scale.row(GROUND_Y) - 1,
        Lane::Underground => scale.row(MoleSlot::Middle.y()),
    };
    buffer.text(0, marker_row, "\u{25b6}", Color::White);
}

fn draw_obstacle(buffer: &mut CellBuffer, scale: FieldScale, obstacle: &Obstacle) {
    let (ch, fg) = match obstacle.lane {
        Lane::Ground => {
            if obstacle.variant.frame % 2 == 0 {
                ('|', Color::Rgb(60, 150, 60))
            } else {
                ('#', Color::Rgb(130, 110, 80))
            }
        }
        Lane::Sky => ('\u{2592}', Color::Rgb(200, 200, 220)), // ▒
        Lane::Underground => ('@', Color::Rgb(150, 130, 110)),
    };
    let (cols, rows) = scale.span(&obstacle.bounds());
    buffer.fill(cols, rows, ch, fg);
}

fn draw_player(buffer: &mut CellBuffer, scale: FieldScale, session: &Session) {
    let run = &session.run;
    let (cols, rows) = scale.span(&run.player_bounds());
    let ch = match run.form {
        Form::Dino => '\u{2588}',  // █
        Form::Eagle => '\u{25b2}', // ▲
        Form::Mole => '\u{25ac}',  // ▬
    };
    let color = if run.game_over {
        Color::Red
    } else {
        form_color(run.form)
    };
    buffer.fill(cols, rows, ch, color);

    // Keep the player visible even on very small fields
    if rows.0 >= buffer.height() as i32 {
        buffer.text(scale.col(PLAYER_X), buffer.height() as i32 - 1, "*", color);
    }
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, session: &Session) {
    if session.screen == Screen::GameOver {
        render_status_bar(
            frame,
            area,
            "Crashed",
            Color::Red,
            &[("[Space/Enter]", "Menu"), ("[R]", "Retry"), ("[Q]", "Quit")],
        );
        return;
    }

    let run = &session.run;
    let status = if run.can_switch() {
        format!("{}: switch ready", run.form.name())
    } else {
        format!("{}: cooling down", run.form.name())
    };
    let move_hint: &[(&str, &str)] = match run.form {
        Form::Dino => &[("[Space/Up]", "Jump")],
        Form::Eagle => &[("[Up/Down]", "Fly")],
        Form::Mole => &[("[Up/Down]", "Dig")],
    };

    let mut controls: Vec<(&str, &str)> = vec![("[Left/Right]", "Switch")];
    controls.extend_from_slice(move_hint);
    controls.push(("[R]", "Restart"));
    controls.push(("[Q]", "Quit"));

    render_status_bar(frame, area, &status, form_color(run.form), &controls);
}

fn render_info_panel(frame: &mut Frame, area: Rect, session: &Session) {
    let inner = render_info_panel_frame(frame, area);
    let run = &session.run;
    let spawner = &session.spawner;
    let bar_width = (inner.width as usize).saturating_sub(3).min(16);

    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::DarkGray));
    let value = |text: String| Span::styled(text, Style::default().fg(Color::White));

    let gauge_color = if run.gauge_fraction() > 0.3 {
        Color::Green
    } else if run.gauge > 0.0 {
        Color::Yellow
    } else {
        Color::Red
    };

    let lines: Vec<Line> = vec![
        Line::from(vec![
            label("Form: "),
            Span::styled(
                run.form.name(),
                Style::default()
                    .fg(form_color(run.form))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            label("Score: "),
            Span::styled(
                run.display_score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![label("Best: "), value(session.best_score.to_string())]),
        Line::from(vec![
            label("Multiplier: "),
            value(format!("x{}", run.multiplier)),
        ]),
        Line::from(vec![
            label("Next x: "),
            value(format!(
                "{}/{}",
                run.swap_progress(),
                run.config().swaps_per_multiplier
            )),
        ]),
        Line::from(""),
        Line::from(label("Gauge")),
        Line::from(Span::styled(
            meter(run.gauge_fraction(), bar_width),
            Style::default().fg(gauge_color),
        )),
        Line::from(label("Cooldown")),
        Line::from(Span::styled(
            meter(run.cooldown_fraction(), bar_width),
            Style::default().fg(Color::Magenta),
        )),
        Line::from(""),
        Line::from(vec![
            label("Speed: "),
            value(format!("{:.0}px/s", spawner.scroll_speed)),
        ]),
        Line::from(vec![
            label("Spawn: "),
            value(format!("{:.0}ms", spawner.spawn_interval_ms)),
        ]),
        Line::from(vec![
            label("Obstacles: "),
            value(spawner.active_count().to_string()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_run_over(frame: &mut Frame, area: Rect, session: &Session) {
    let run = &session.run;
    let score = run.display_score();
    let new_best = score > 0 && score == session.best_score;

    let (result_type, title) = if new_best {
        (RunResultType::NewBest, "NEW BEST RUN!")
    } else {
        (RunResultType::Crashed, "CRASHED")
    };

    let seconds = run.run_time_ms as f64 / 1000.0;
    let details = vec![
        format!("Score: {}", score),
        format!("Best: {}", session.best_score),
        format!("Survived {:.1}s as the {}", seconds, run.form.name()),
    ];

    render_game_over_overlay(
        frame,
        area,
        result_type,
        title,
        &details,
        &[("[Space/Enter]", "Menu"), ("[R]", "Retry")],
    );
}
