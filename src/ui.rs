//! Terminal UI rendering with ratatui
//!
//! Draws whatever a `Snapshot` holds; the engine knows nothing about cells on screen.

use crate::board::Cell;
use crate::game::{GameState, Snapshot};
use crate::settings::Settings;
use crate::shape::BlockColor;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Width of the score panel next to the board
const STATS_WIDTH: u16 = 16;

/// What the app is showing on top of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Nothing started yet
    Title,
    Playing,
}

impl From<BlockColor> for Color {
    fn from(color: BlockColor) -> Self {
        match color {
            BlockColor::Cyan => Color::Cyan,
            BlockColor::Yellow => Color::Yellow,
            BlockColor::Purple => Color::Magenta,
            BlockColor::Orange => Color::Rgb(255, 165, 0),
            BlockColor::Blue => Color::Blue,
            BlockColor::Green => Color::Green,
            BlockColor::Red => Color::Red,
        }
    }
}

/// Render the board, the score panel and any overlay
pub fn render(frame: &mut Frame, snapshot: &Snapshot, settings: &Settings, screen: Screen) {
    let area = frame.area();
    let board_width = snapshot.board.columns() as u16 * 2 + 2;
    let board_height = snapshot.board.rows() as u16 + 2;

    // Center the game area
    let game_area = center_rect(area, board_width + STATS_WIDTH, board_height);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(board_width),
            Constraint::Length(STATS_WIDTH),
        ])
        .split(game_area);

    render_board(frame, layout[0], snapshot, settings, screen);
    render_stats(frame, layout[1], snapshot);

    match (screen, snapshot.state) {
        (Screen::Title, _) => render_overlay(frame, area, "BLOCKFALL", "Press Enter to start"),
        (Screen::Playing, GameState::GameOver) => render_overlay(
            frame,
            area,
            "GAME OVER",
            &format!("Score {} - Enter", snapshot.score.points),
        ),
        (Screen::Playing, GameState::Running) => {}
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn render_board(frame: &mut Frame, area: Rect, snapshot: &Snapshot, settings: &Settings, screen: Screen) {
    let (block_char, empty_char) = settings.visual.block_chars();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // The falling piece only exists once a game has started
    let piece_cells: Vec<(i32, i32)> = match screen {
        Screen::Playing => snapshot.piece.cells().collect(),
        Screen::Title => Vec::new(),
    };

    let lines: Vec<Line> = snapshot
        .board
        .iter_rows()
        .enumerate()
        .map(|(y, row)| {
            let spans: Vec<Span> = row
                .iter()
                .enumerate()
                .map(|(x, cell)| {
                    let color = if piece_cells.contains(&(x as i32, y as i32)) {
                        Some(snapshot.piece.color)
                    } else if let Cell::Filled(color) = cell {
                        Some(*color)
                    } else {
                        None
                    };
                    match color {
                        Some(color) => Span::styled(block_char, Style::default().fg(color.into())),
                        None => Span::styled(empty_char, Style::default().fg(Color::DarkGray)),
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let score = snapshot.score;
    let lines = vec![
        Line::from(Span::styled("SCORE", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", score.points),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::raw(""),
        Line::from(Span::styled("LINES", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", score.lines),
            Style::default().fg(Color::Green),
        )),
        Line::raw(""),
        Line::from(Span::styled("PIECES", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", score.pieces),
            Style::default().fg(Color::Cyan),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render an overlay (for title / game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_width = 26u16;
    let popup_height = 5u16;
    let popup_area = center_rect(area, popup_width, popup_height);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title, Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle, Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
