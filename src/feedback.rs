//! Per-letter feedback and facts derived from it.
//!
//! Everything here is a pure function over the full guess/feedback
//! history. Derived sets are recomputed from scratch on every call rather
//! than patched incrementally, so replayed or reordered state updates can
//! never leave them stale.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum number of guesses in a game.
pub const MAX_GUESSES: usize = 6;

/// Tri-state match result for one letter position.
///
/// Ordered so that a better score compares greater, which lets hint
/// derivation keep the best score a letter ever achieved with `max`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Feedback {
    /// Letter does not appear at this position or, as far as this cell
    /// knows, anywhere.
    Absent,
    /// Letter appears in the word at a different position.
    Present,
    /// Letter is correct at this position.
    Correct,
}

/// A feedback value outside `{0, 1, 2}` arrived on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("feedback value {value} out of range (expected 0..=2)")]
pub struct FeedbackValueError {
    /// The offending wire value.
    pub value: u8,
}

impl TryFrom<u8> for Feedback {
    type Error = FeedbackValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Feedback::Absent),
            1 => Ok(Feedback::Present),
            2 => Ok(Feedback::Correct),
            value => Err(FeedbackValueError { value }),
        }
    }
}

impl From<Feedback> for u8 {
    fn from(feedback: Feedback) -> Self {
        match feedback {
            Feedback::Absent => 0,
            Feedback::Present => 1,
            Feedback::Correct => 2,
        }
    }
}

/// Best score each guessed letter ever achieved, keyed by uppercase letter.
///
/// A letter absent from the map has not been played yet and carries no
/// keyboard marking. Letters mapped to [`Feedback::Absent`] scored 0 at
/// every position of every guess they appeared in.
pub fn letter_hints(guesses: &[String], rows: &[Vec<Feedback>]) -> BTreeMap<char, Feedback> {
    let mut hints = BTreeMap::new();
    for (guess, row) in guesses.iter().zip(rows) {
        for (letter, &feedback) in guess.chars().zip(row) {
            let letter = letter.to_ascii_uppercase();
            hints
                .entry(letter)
                .and_modify(|best: &mut Feedback| *best = (*best).max(feedback))
                .or_insert(feedback);
        }
    }
    hints
}

/// Letters provably absent from the answer given all feedback seen so far.
///
/// A letter is eliminated iff it appeared in at least one guess and every
/// occurrence across every guess scored [`Feedback::Absent`].
pub fn eliminated_letters(guesses: &[String], rows: &[Vec<Feedback>]) -> Vec<char> {
    letter_hints(guesses, rows)
        .into_iter()
        .filter(|&(_, best)| best == Feedback::Absent)
        .map(|(letter, _)| letter)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(raw: &[&[u8]]) -> Vec<Vec<Feedback>> {
        raw.iter()
            .map(|row| row.iter().map(|&v| Feedback::try_from(v).unwrap()).collect())
            .collect()
    }

    #[test]
    fn feedback_rejects_out_of_range() {
        assert!(Feedback::try_from(3).is_err());
        assert_eq!(Feedback::try_from(2).unwrap(), Feedback::Correct);
    }

    #[test]
    fn unplayed_letters_are_not_eliminated() {
        let eliminated = eliminated_letters(&[], &[]);
        assert!(eliminated.is_empty());
    }

    #[test]
    fn letter_scoring_anywhere_survives() {
        // R scores Present in ROBIN, so a 0 in CRANE does not eliminate it.
        // A scores 0 in CRANE and never reappears, so A is eliminated.
        let guesses = vec!["CRANE".to_string(), "ROBIN".to_string()];
        let feedback = rows(&[&[0, 1, 0, 2, 0], &[1, 0, 0, 0, 0]]);

        let eliminated = eliminated_letters(&guesses, &feedback);
        assert!(eliminated.contains(&'A'));
        assert!(!eliminated.contains(&'R'));
        assert!(eliminated.contains(&'C'));
        assert!(eliminated.contains(&'E'));
        // N scored Correct in CRANE.
        assert!(!eliminated.contains(&'N'));
    }

    #[test]
    fn elimination_is_monotonic_across_guesses() {
        let guesses = vec!["CRANE".to_string(), "ROBIN".to_string()];
        let feedback = rows(&[&[0, 1, 0, 2, 0], &[1, 0, 0, 0, 0]]);

        let after_first = eliminated_letters(&guesses[..1], &feedback[..1]);
        let after_second = eliminated_letters(&guesses, &feedback);
        for letter in after_first {
            assert!(
                after_second.contains(&letter),
                "{letter} lost its elimination after a later guess"
            );
        }
    }

    #[test]
    fn hints_keep_best_score() {
        // E scores Absent then Correct; the hint must be Correct.
        let guesses = vec!["CRANE".to_string(), "ELOPE".to_string()];
        let feedback = rows(&[&[0, 0, 0, 0, 0], &[0, 0, 0, 0, 2]]);

        let hints = letter_hints(&guesses, &feedback);
        assert_eq!(hints.get(&'E'), Some(&Feedback::Correct));
        assert_eq!(hints.get(&'C'), Some(&Feedback::Absent));
        assert_eq!(hints.get(&'Z'), None);
    }

    #[test]
    fn lowercase_guesses_fold_to_uppercase() {
        let guesses = vec!["crane".to_string()];
        let feedback = rows(&[&[0, 0, 0, 0, 0]]);
        let eliminated = eliminated_letters(&guesses, &feedback);
        assert!(eliminated.contains(&'C'));
    }
}
