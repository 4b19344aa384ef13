//! Rendering for the TUI client.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::UiState;
use crate::board::{Cell, CellState};
use crate::client::GameService;
use crate::feedback::Feedback;
use crate::session::SessionController;

/// Draws one frame.
pub fn draw<S: GameService>(
    frame: &mut Frame,
    controller: &SessionController<S>,
    state: &UiState,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(5),
            Constraint::Length(6),
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(28)])
        .split(rows[0]);

    let title = if controller.explore_on() {
        "Wordle [explore]"
    } else {
        "Wordle"
    };
    let board = Paragraph::new(board_lines(controller, state))
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(board, columns[0]);

    let panel = Paragraph::new(panel_lines(controller, state))
        .block(Block::default().title("Hints").borders(Borders::ALL));
    frame.render_widget(panel, columns[1]);

    let keyboard = Paragraph::new(keyboard_lines(controller))
        .block(Block::default().title("Keyboard").borders(Borders::ALL));
    frame.render_widget(keyboard, rows[1]);

    let status = Paragraph::new(status_lines(controller))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, rows[2]);
}

fn cell_style(state: CellState) -> Style {
    match state {
        CellState::Blank => Style::default().fg(Color::White),
        CellState::Absent => Style::default().bg(Color::DarkGray).fg(Color::White),
        CellState::Present => Style::default().bg(Color::Yellow).fg(Color::Black),
        CellState::Correct => Style::default().bg(Color::Green).fg(Color::Black),
        CellState::ExploreNeutral => Style::default().bg(Color::Gray).fg(Color::Black),
        CellState::ExplorePresent => Style::default().bg(Color::LightYellow).fg(Color::Black),
        CellState::ExploreCorrect => Style::default().bg(Color::LightGreen).fg(Color::Black),
    }
}

fn board_lines<S: GameService>(
    controller: &SessionController<S>,
    state: &UiState,
) -> Vec<Line<'static>> {
    let grid = controller.board();
    let mut lines = Vec::with_capacity(grid.len() * 2);
    for (row_idx, row) in grid.iter().enumerate() {
        let mut spans = vec![Span::raw(" ")];
        for (col_idx, cell) in row.iter().enumerate() {
            let Cell { letter, state: cell_state } = *cell;
            let mut style = cell_style(cell_state);
            if controller.explore_on() && state.cursor == (row_idx, col_idx) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let text = match letter {
                Some(letter) => format!(" {letter} "),
                None => " · ".to_string(),
            };
            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
        lines.push(Line::raw(""));
    }
    lines
}

fn keyboard_lines<S: GameService>(controller: &SessionController<S>) -> Vec<Line<'static>> {
    let hints = controller
        .session()
        .map(|s| s.letter_hints())
        .unwrap_or_default();

    ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"]
        .iter()
        .enumerate()
        .map(|(i, keys)| {
            let mut spans = vec![Span::raw(" ".repeat(i + 1))];
            for letter in keys.chars() {
                let style = match hints.get(&letter) {
                    Some(Feedback::Correct) => Style::default().fg(Color::Green),
                    Some(Feedback::Present) => Style::default().fg(Color::Yellow),
                    Some(Feedback::Absent) => Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::DIM),
                    None => Style::default().fg(Color::White),
                };
                spans.push(Span::styled(letter.to_string(), style));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        })
        .collect()
}

fn panel_lines<S: GameService>(
    controller: &SessionController<S>,
    state: &UiState,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let Some(session) = controller.session() else {
        return vec![Line::raw("no session")];
    };

    if state.show_remaining {
        if let Some(remaining) = session.remaining_count() {
            lines.push(Line::styled(
                format!("remaining: {remaining}"),
                Style::default().fg(Color::Cyan),
            ));
        }
    }

    if state.show_best {
        // With a single candidate left the list would give the answer away.
        let informative = session.remaining_count().map_or(true, |n| n > 1);
        if informative && !state.best_words.is_empty() {
            lines.push(Line::styled(
                "best words:",
                Style::default().add_modifier(Modifier::BOLD),
            ));
            for word in &state.best_words {
                lines.push(Line::styled(
                    format!("  {word}"),
                    Style::default().fg(Color::Yellow),
                ));
            }
        }
    }

    if lines.is_empty() {
        lines.push(Line::raw("Ctrl-B best words"));
        lines.push(Line::raw("Ctrl-N remaining"));
    }
    lines
}

fn status_lines<S: GameService>(controller: &SessionController<S>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(session) = controller.session() {
        if *session.won() {
            lines.push(Line::styled(
                "You won!",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ));
        } else if *session.lost() {
            lines.push(Line::styled(
                "You lost!",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }
        if let Some(word) = session.revealed_word() {
            lines.push(Line::styled(
                format!("The word was: {word}"),
                Style::default().fg(Color::Magenta),
            ));
        }
    }

    if let Some(err) = controller.last_error() {
        lines.push(Line::styled(
            err.to_string(),
            Style::default().fg(Color::Red),
        ));
    }

    lines.push(Line::styled(
        "type letters | Enter submit | Ctrl-R restart | Ctrl-E explore | Ctrl-G reveal | Esc quit",
        Style::default().fg(Color::DarkGray),
    ));
    if controller.explore_on() {
        lines.push(Line::styled(
            "arrows move cursor | Space cycles cell",
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines
}
