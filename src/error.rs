//! Error taxonomy for session operations.
//!
//! Every service-boundary failure is caught by the controller operation
//! that issued it and converted into one of these kinds; none propagate
//! further as raw transport errors. The controller surfaces at most one
//! error at a time and clears it on the next successful operation.

use derive_more::{Display, Error};

/// A user-facing session error.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// Start/restart request failed; any prior session is left untouched.
    #[display("failed to start game")]
    SessionStart,

    /// The server rejected the submitted word as not in its dictionary.
    #[display("invalid word: {word}")]
    InvalidGuess {
        /// The word the player attempted.
        word: String,
    },

    /// Any other guess or explore submission failure.
    #[display("failed to submit guess")]
    Submission,

    /// Reveal request failed; the answer stays unknown.
    #[display("failed to reveal the word")]
    Reveal,

    /// Best-words fetch failed. Never surfaced to the player; the
    /// suggestion list degrades to empty instead.
    #[display("failed to fetch suggestions")]
    HintFetch,
}
