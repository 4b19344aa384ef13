//! Board projection.
//!
//! Maps session state plus transient input into the renderable grid. The
//! projection is a pure function with no counters or caches, so the front
//! end can recompute it on every frame without drift.

use crate::explore::ExploreOverlay;
use crate::feedback::{Feedback, MAX_GUESSES};

/// Visual state of one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Empty or uncommitted cell.
    Blank,
    /// Server feedback: letter absent.
    Absent,
    /// Server feedback: letter present elsewhere.
    Present,
    /// Server feedback: letter correct.
    Correct,
    /// Explore annotation, neutral.
    ExploreNeutral,
    /// Explore annotation, present-style.
    ExplorePresent,
    /// Explore annotation, correct-style.
    ExploreCorrect,
}

impl CellState {
    fn from_feedback(feedback: Feedback) -> Self {
        match feedback {
            Feedback::Absent => CellState::Absent,
            Feedback::Present => CellState::Present,
            Feedback::Correct => CellState::Correct,
        }
    }

    fn from_explore(value: u8) -> Self {
        match value {
            1 => CellState::ExplorePresent,
            2 => CellState::ExploreCorrect,
            _ => CellState::ExploreNeutral,
        }
    }
}

/// One cell of the projected grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Letter shown in the cell, if any.
    pub letter: Option<char>,
    /// Visual state of the cell.
    pub state: CellState,
}

impl Cell {
    const BLANK: Self = Self {
        letter: None,
        state: CellState::Blank,
    };
}

/// Projects the session into a `MAX_GUESSES × word_length` grid.
///
/// Per-cell priority: rows beyond both the recorded guesses and the single
/// pending-input row are blank; the pending-input row shows typed letters
/// but never carries feedback or overlay styling; an explore annotation
/// (explore mode on) overrides server feedback; otherwise server feedback
/// styles the cell; otherwise the cell is neutral with the recorded letter.
pub fn project(
    guesses: &[String],
    feedback_rows: &[Vec<Feedback>],
    pending: &str,
    explore_on: bool,
    overlay: &ExploreOverlay,
    word_length: usize,
) -> Vec<Vec<Cell>> {
    let pending_row = (guesses.len() < MAX_GUESSES).then_some(guesses.len());

    (0..MAX_GUESSES)
        .map(|row| {
            let guess = guesses.get(row);
            let mut letters = match guess {
                Some(word) => word.chars(),
                None if pending_row == Some(row) => pending.chars(),
                None => "".chars(),
            };

            (0..word_length)
                .map(|col| {
                    let letter = letters.next();
                    if guess.is_none() {
                        // Pending-input row shows letters unstyled; rows
                        // past it are blank outright.
                        return Cell {
                            letter,
                            state: CellState::Blank,
                        };
                    }
                    if explore_on {
                        if let Some(value) = overlay.get(row, col) {
                            return Cell {
                                letter,
                                state: CellState::from_explore(value),
                            };
                        }
                    }
                    match feedback_rows.get(row).and_then(|fb| fb.get(col)) {
                        Some(&feedback) => Cell {
                            letter,
                            state: CellState::from_feedback(feedback),
                        },
                        None => Cell { letter, ..Cell::BLANK },
                    }
                })
                .collect()
        })
        .collect()
}
