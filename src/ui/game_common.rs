//! Shared UI pieces: the framed game layout, status bar, info panel frame,
//! result overlay, and a colored cell buffer for the play field.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Layout areas returned by `create_game_layout`.
pub struct GameLayout {
    /// Play field, inside the outer border.
    pub content: Rect,
    /// Two-line status bar under the play field.
    pub status_bar: Rect,
    /// Right-hand info panel.
    pub info_panel: Rect,
}

/// Outer bordered frame split into play field, status bar and info panel.
///
/// ```text
/// ┌─ Title ─────────────────────────┬─ Info ──────┐
/// │   [content]                     │  [info]     │
/// │ [status bar, 2 lines]           │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    content_min_height: u16,
    info_panel_width: u16,
) -> GameLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(info_panel_width)])
        .split(inner);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(content_min_height), Constraint::Length(2)])
        .split(h_chunks[0]);

    GameLayout {
        content: v_chunks[0],
        status_bar: v_chunks[1],
        info_panel: h_chunks[1],
    }
}

/// Status line plus a line of `(key, action)` control hints, both centered.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height < 1 {
        return;
    }

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height >= 2 && !controls.is_empty() {
        frame.render_widget(
            Paragraph::new(controls_line(controls)).alignment(Alignment::Center),
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

/// `[key] action` hints separated by two spaces.
pub fn controls_line<'a>(controls: &[(&'a str, &'a str)]) -> Line<'a> {
    let mut spans = Vec::new();
    for (i, (key, action)) in controls.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Bordered " Info " panel. Returns the inner area.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// How a run ended, for overlay coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunResultType {
    Crashed,
    NewBest,
}

impl RunResultType {
    pub fn color(self) -> Color {
        match self {
            RunResultType::Crashed => Color::Red,
            RunResultType::NewBest => Color::Green,
        }
    }
}

/// Centered result box drawn over the play field. The area behind it stays
/// visible.
pub fn render_game_over_overlay(
    frame: &mut Frame,
    area: Rect,
    result_type: RunResultType,
    title: &str,
    details: &[String],
    controls: &[(&str, &str)],
) {
    let color = result_type.color();
    let box_height = (details.len() as u16 + 6).min(area.height);
    let box_width = 44u16.min(area.width);
    let overlay = Rect::new(
        area.x + area.width.saturating_sub(box_width) / 2,
        area.y + area.height.saturating_sub(box_height) / 2,
        box_width,
        box_height,
    );

    frame.render_widget(Clear, overlay);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let mut lines = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(
        details
            .iter()
            .map(|d| Line::from(Span::styled(d.as_str(), Style::default().fg(Color::White)))),
    );
    lines.push(Line::from(""));
    lines.push(controls_line(controls));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Text meter like `[████░░░░]`.
pub fn meter(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    let mut bar = String::with_capacity(width + 2);
    bar.push('[');
    bar.extend(std::iter::repeat('\u{2588}').take(filled));
    bar.extend(std::iter::repeat('\u{2591}').take(width - filled));
    bar.push(']');
    bar
}

/// Buffer cell with its own colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

/// Grid of colored cells, stamped row by row as runs of styled spans.
pub struct CellBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CellBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let (width, height) = (width as usize, height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, col: i32, row: i32) -> Option<&Cell> {
        self.index(col, row).map(|i| &self.cells[i])
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    /// Set a cell. Out-of-range coordinates are ignored.
    pub fn put(&mut self, col: i32, row: i32, cell: Cell) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = cell;
        }
    }

    /// Fill a whole row's background, keeping characters.
    pub fn fill_row_bg(&mut self, row: i32, bg: Color) {
        for col in 0..self.width as i32 {
            if let Some(i) = self.index(col, row) {
                self.cells[i].bg = bg;
            }
        }
    }

    /// Write a string starting at `col`, keeping the existing background.
    pub fn text(&mut self, col: i32, row: i32, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            if let Some(idx) = self.index(col + i as i32, row) {
                let bg = self.cells[idx].bg;
                self.cells[idx] = Cell { ch, fg, bg };
            }
        }
    }

    /// Fill a rectangle of cells with `ch`, keeping the existing background.
    pub fn fill(&mut self, cols: (i32, i32), rows: (i32, i32), ch: char, fg: Color) {
        for row in rows.0..rows.1 {
            for col in cols.0..cols.1 {
                if let Some(idx) = self.index(col, row) {
                    let bg = self.cells[idx].bg;
                    self.cells[idx] = Cell { ch, fg, bg };
                }
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        for (row_idx, row) in self.cells.chunks(self.width.max(1)).enumerate() {
            let y = area.y + row_idx as u16;
            if y >= area.y + area.height {
                break;
            }

            let mut spans: Vec<Span> = Vec::new();
            let mut current = Cell::default();
            let mut text = String::new();
            for &cell in row {
                if (cell.fg != current.fg || cell.bg != current.bg) && !text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut text),
                        Style::default().fg(current.fg).bg(current.bg),
                    ));
                }
                current = cell;
                text.push(cell.ch);
            }
            if !text.is_empty() {
                spans.push(Span::styled(
                    text,
                    Style::default().fg(current.fg).bg(current.bg),
                ));
            }

            frame.render_widget(
                Paragraph::new(Line::from(spans)),
                Rect::new(area.x, y, self.width as u16, 1),
            );
        }
    }
}
