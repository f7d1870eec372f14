//! Title screen with controls and the best score of this session.

use super::game_common::controls_line;
use super::runner_scene::form_color;
use crate::build_info;
use crate::run::Form;
use crate::session::Session;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const TITLE_ART: [&str; 3] = [
    "╦  ╔═╗╔╗╔╔═╗╔═╗╦ ╦╦╔═╗╔╦╗",
    "║  ╠═╣║║║║╣ ╚═╗╠═╣║╠╣  ║ ",
    "╩═╝╩ ╩╝╚╝╚═╝╚═╝╩ ╩╩╚   ╩ ",
];

pub fn render_menu_scene(frame: &mut Frame, area: Rect, session: &Session) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightYellow))
        .title(" Laneshift ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = vec![Line::from("")];
    lines.extend(TITLE_ART.iter().map(|row| {
        Line::from(Span::styled(
            *row,
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ))
    }));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Three lanes, three forms. Switch before the gauge runs dry.",
        Style::default().fg(Color::Gray),
    )));
    lines.push(Line::from(""));

    for form in Form::ALL {
        let hint = match form {
            Form::Dino => "runs the ground, jumps with Space/Up",
            Form::Eagle => "flies the sky, hold Up/Down to drift",
            Form::Mole => "digs underground, Up/Down change tunnel",
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:>6} ", form.name()),
                Style::default()
                    .fg(form_color(form))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(hint, Style::default().fg(Color::DarkGray)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(controls_line(&[
        ("[Left/Right]", "Switch form"),
        ("[R]", "Restart"),
        ("[Q/Esc]", "Quit"),
    ]));
    lines.push(Line::from(""));

    if session.best_score > 0 {
        lines.push(Line::from(vec![
            Span::styled("Best this session: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                session.best_score.to_string(),
                Style::default().fg(Color::White),
            ),
        ]));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "[ Press any key to start ]",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);

    if inner.height > 1 {
        let footer = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(
                build_info::version_line(),
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Right),
            footer,
        );
    }
}
