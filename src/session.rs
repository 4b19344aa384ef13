//! Session state machine.
//!
//! [`Session`] is the value describing one game; [`SessionController`] is
//! the single mutator. Every state transition happens in response to one
//! user action or the completion of the one request that action issued,
//! and every derived view (board grid, eliminated letters) is recomputed
//! from the session value rather than patched incrementally.

use crate::board::{self, Cell};
use crate::client::{GameService, GuessOutcome, ServiceError};
use crate::error::GameError;
use crate::explore::ExploreOverlay;
use crate::feedback::{self, Feedback};
use derive_getters::Getters;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// Word length assumed before the first session starts.
const DEFAULT_WORD_LENGTH: usize = 5;

/// One complete, stateful game attempt.
///
/// Created by a successful start call and replaced wholesale on restart,
/// never mutated back into a fresh state. `won`/`lost` are monotonic and
/// `revealed_word` is sticky: only replacement clears them.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Session {
    /// Opaque server-side game id.
    id: String,
    /// Word length, fixed for the session's lifetime.
    word_length: usize,
    /// Committed guesses, append-only.
    guesses: Vec<String>,
    /// Feedback rows aligned 1:1 with `guesses`.
    feedback_rows: Vec<Vec<Feedback>>,
    /// Whether the game is won.
    won: bool,
    /// Whether the game is lost.
    lost: bool,
    /// The answer, once disclosed.
    revealed_word: Option<String>,
    /// Remaining-candidate count hint from the service.
    remaining_count: Option<usize>,
    /// Remaining-candidate words from explore responses.
    remaining_words: Vec<String>,
}

impl Session {
    /// Creates a fresh session for a newly started game.
    pub fn new(id: String, word_length: usize) -> Self {
        Self {
            id,
            word_length,
            guesses: Vec::new(),
            feedback_rows: Vec::new(),
            won: false,
            lost: false,
            revealed_word: None,
            remaining_count: None,
            remaining_words: Vec::new(),
        }
    }

    /// Whether the game has reached a terminal state.
    pub fn is_over(&self) -> bool {
        self.won || self.lost
    }

    /// Letters provably absent from the answer.
    pub fn eliminated_letters(&self) -> Vec<char> {
        feedback::eliminated_letters(&self.guesses, &self.feedback_rows)
    }

    /// Best score each guessed letter ever achieved, for keyboard styling.
    pub fn letter_hints(&self) -> BTreeMap<char, Feedback> {
        feedback::letter_hints(&self.guesses, &self.feedback_rows)
    }

    /// Merges a successful guess/explore response.
    ///
    /// The service returns the full guess list but only the new feedback
    /// row(s); guesses are replaced and feedback appended, restoring the
    /// `len(feedback_rows) == len(guesses)` invariant.
    fn apply_outcome(&mut self, outcome: GuessOutcome) {
        self.guesses = outcome.guesses;
        self.feedback_rows.extend(outcome.feedback_rows);
        if self.feedback_rows.len() > self.guesses.len() {
            warn!(
                rows = self.feedback_rows.len(),
                guesses = self.guesses.len(),
                "dropping surplus feedback rows"
            );
            self.feedback_rows.truncate(self.guesses.len());
        }
        self.won = self.won || outcome.won;
        if self.won {
            self.lost = false;
        } else {
            self.lost = self.lost || outcome.lost;
        }
        if self.revealed_word.is_none() {
            self.revealed_word = outcome.the_word;
        }
        if outcome.remaining.is_some() {
            self.remaining_count = outcome.remaining;
        }
        if let Some(words) = outcome.remaining_words {
            self.remaining_words = words;
        }
    }

    /// Records the disclosed answer. Set-once: later calls are ignored.
    fn set_revealed(&mut self, word: String) {
        if self.revealed_word.is_none() {
            self.revealed_word = Some(word);
        }
    }
}

/// Single source of truth for the active session.
///
/// Owns the session value, the in-progress input, the explore overlay,
/// and the one-slot error surface; every mutation goes through one of its
/// operations. Completions are guarded by the session id captured at
/// dispatch time, so a response outlived by a restart is discarded
/// instead of merged into the wrong session.
#[derive(Debug)]
pub struct SessionController<S> {
    service: S,
    session: Option<Session>,
    pending: String,
    explore_on: bool,
    overlay: ExploreOverlay,
    last_error: Option<GameError>,
}

impl<S: GameService> SessionController<S> {
    /// Creates a controller with no active session.
    pub fn new(service: S) -> Self {
        Self {
            service,
            session: None,
            pending: String::new(),
            explore_on: false,
            overlay: ExploreOverlay::new(),
            last_error: None,
        }
    }

    /// The active session, if one has been started.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Letters typed for the next, not-yet-submitted guess.
    pub fn pending_input(&self) -> &str {
        &self.pending
    }

    /// Whether explore mode is active.
    pub fn explore_on(&self) -> bool {
        self.explore_on
    }

    /// The explore annotation overlay.
    pub fn overlay(&self) -> &ExploreOverlay {
        &self.overlay
    }

    /// The most recent surfaced error, cleared by any successful operation.
    pub fn last_error(&self) -> Option<&GameError> {
        self.last_error.as_ref()
    }

    /// Projects the current state into the renderable grid.
    pub fn board(&self) -> Vec<Vec<Cell>> {
        let (guesses, rows, word_length): (&[String], &[Vec<Feedback>], usize) =
            match &self.session {
                Some(s) => (s.guesses(), s.feedback_rows(), *s.word_length()),
                None => (&[], &[], DEFAULT_WORD_LENGTH),
            };
        board::project(
            guesses,
            rows,
            &self.pending,
            self.explore_on,
            &self.overlay,
            word_length,
        )
    }

    /// Starts a new game, replacing any current session.
    ///
    /// On failure the previous session (if any) is left untouched and a
    /// [`GameError::SessionStart`] is surfaced.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> Result<(), GameError> {
        let previous_id = self.session.as_ref().map(|s| s.id().clone());
        match self.service.start(previous_id.as_deref()).await {
            Ok(res) => {
                info!(game_id = %res.game_id, length = res.length, "session started");
                self.session = Some(Session::new(res.game_id, res.length));
                self.pending.clear();
                self.overlay.clear();
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to start session");
                self.fail(GameError::SessionStart)
            }
        }
    }

    /// Starts over at the player's request.
    #[instrument(skip(self))]
    pub async fn restart(&mut self) -> Result<(), GameError> {
        self.start().await
    }

    /// Appends a letter to the pending input, if the session accepts one.
    pub fn push_letter(&mut self, letter: char) {
        let Some(session) = &self.session else { return };
        if session.is_over() || !letter.is_ascii_alphabetic() {
            return;
        }
        if self.pending.chars().count() < *session.word_length() {
            self.pending.push(letter.to_ascii_uppercase());
        }
    }

    /// Removes the last pending letter, if any.
    pub fn pop_letter(&mut self) {
        self.pending.pop();
    }

    /// Submits the pending input as a guess.
    ///
    /// Silent no-op unless a session exists, the input is exactly the
    /// word length, and the game is still open. In explore mode the
    /// overlay row for the row about to be filled travels with the
    /// request. On failure the pending input is cleared and the session
    /// is left exactly as it was.
    #[instrument(skip(self))]
    pub async fn submit_guess(&mut self) -> Result<(), GameError> {
        let Some(session) = &self.session else {
            return Ok(());
        };
        if session.is_over() {
            debug!("game over, ignoring submit");
            return Ok(());
        }
        let word = self.pending.to_ascii_uppercase();
        if word.chars().count() != *session.word_length() {
            debug!(len = word.chars().count(), "incomplete input, ignoring submit");
            return Ok(());
        }

        let game_id = session.id().clone();
        let outcome = if self.explore_on {
            let states = self
                .overlay
                .row_states(session.guesses().len(), *session.word_length());
            self.service.explore(&game_id, &word, &states).await
        } else {
            self.service.guess(&game_id, &word).await
        };
        self.finish_submit(&game_id, word, outcome)
    }

    /// Merges a submit completion, discarding it if the session changed
    /// while the request was outstanding.
    fn finish_submit(
        &mut self,
        dispatched_id: &str,
        word: String,
        outcome: Result<GuessOutcome, ServiceError>,
    ) -> Result<(), GameError> {
        if !self.is_current(dispatched_id) {
            debug!(game_id = dispatched_id, "discarding stale submit completion");
            return Ok(());
        }
        match outcome {
            Ok(outcome) => {
                if let Some(session) = self.session.as_mut() {
                    session.apply_outcome(outcome);
                }
                self.pending.clear();
                // Guess count changed; explore annotations no longer line up.
                self.overlay.clear();
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                self.pending.clear();
                let err = if err.is_invalid_word() {
                    GameError::InvalidGuess { word }
                } else {
                    warn!(error = %err, "guess submission failed");
                    GameError::Submission
                };
                self.fail(err)
            }
        }
    }

    /// Obtains the answer.
    ///
    /// Normal mode asks the service, once per session. Explore mode never
    /// touches the network: the single remaining candidate is adopted
    /// locally when `remaining_count == 1` and the candidate list is
    /// non-empty, and anything else is a no-op.
    #[instrument(skip(self))]
    pub async fn reveal(&mut self) -> Result<(), GameError> {
        let Some(session) = &self.session else {
            return Ok(());
        };
        if session.revealed_word().is_some() {
            return Ok(());
        }

        if self.explore_on {
            if *session.remaining_count() == Some(1) {
                if let Some(word) = session.remaining_words().first().cloned() {
                    info!(%word, "adopting single remaining candidate");
                    if let Some(session) = self.session.as_mut() {
                        session.set_revealed(word);
                    }
                    self.last_error = None;
                }
            }
            return Ok(());
        }

        let game_id = session.id().clone();
        let result = self.service.reveal(&game_id).await;
        if !self.is_current(&game_id) {
            debug!(game_id = %game_id, "discarding stale reveal completion");
            return Ok(());
        }
        match result {
            Ok(word) => {
                info!("answer revealed");
                if let Some(session) = self.session.as_mut() {
                    session.set_revealed(word);
                }
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "reveal failed");
                self.fail(GameError::Reveal)
            }
        }
    }

    /// Switches explore mode. The overlay is cleared either way.
    pub fn toggle_explore(&mut self, on: bool) {
        debug!(on, "toggling explore mode");
        self.explore_on = on;
        self.overlay.clear();
    }

    /// Cycles the annotation on one cell. Only effective in explore mode.
    pub fn cycle_cell(&mut self, row: usize, col: usize) {
        if self.explore_on {
            self.overlay.cycle(row, col);
        }
    }

    /// Fetches the suggestion list, degrading to empty on any failure.
    #[instrument(skip(self))]
    pub async fn fetch_best_words(&mut self) -> Vec<String> {
        match self.try_best_words().await {
            Ok(words) => words,
            Err(err) => {
                debug!(error = %err, "suggestions unavailable");
                Vec::new()
            }
        }
    }

    /// Fetches the suggestion list, surfacing nothing on failure.
    pub async fn try_best_words(&mut self) -> Result<Vec<String>, GameError> {
        let Some(game_id) = self.session.as_ref().map(|s| s.id().clone()) else {
            return Ok(Vec::new());
        };
        self.service
            .best_words(&game_id)
            .await
            .map_err(|_| GameError::HintFetch)
    }

    fn is_current(&self, game_id: &str) -> bool {
        self.session.as_ref().is_some_and(|s| s.id() == game_id)
    }

    fn fail(&mut self, err: GameError) -> Result<(), GameError> {
        self.last_error = Some(err.clone());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::StartResponse;
    use async_trait::async_trait;

    /// Service stub for exercising completion handling directly; none of
    /// these tests go through a dispatch.
    struct NullService;

    #[async_trait]
    impl GameService for NullService {
        async fn start(&self, _: Option<&str>) -> Result<StartResponse, ServiceError> {
            Err(ServiceError::new("unused"))
        }
        async fn guess(&self, _: &str, _: &str) -> Result<GuessOutcome, ServiceError> {
            Err(ServiceError::new("unused"))
        }
        async fn explore(&self, _: &str, _: &str, _: &[u8]) -> Result<GuessOutcome, ServiceError> {
            Err(ServiceError::new("unused"))
        }
        async fn status(&self, _: &str) -> Result<crate::client::StatusResponse, ServiceError> {
            Err(ServiceError::new("unused"))
        }
        async fn best_words(&self, _: &str) -> Result<Vec<String>, ServiceError> {
            Err(ServiceError::new("unused"))
        }
        async fn reveal(&self, _: &str) -> Result<String, ServiceError> {
            Err(ServiceError::new("unused"))
        }
    }

    fn outcome(guesses: &[&str], rows: &[&[u8]]) -> GuessOutcome {
        GuessOutcome {
            guesses: guesses.iter().map(|g| g.to_string()).collect(),
            feedback_rows: rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|&v| Feedback::try_from(v).unwrap())
                        .collect()
                })
                .collect(),
            won: false,
            lost: false,
            the_word: None,
            remaining: None,
            remaining_words: None,
        }
    }

    fn controller_with_session(id: &str) -> SessionController<NullService> {
        let mut controller = SessionController::new(NullService);
        controller.session = Some(Session::new(id.to_string(), 5));
        controller
    }

    #[test]
    fn merge_restores_row_alignment() {
        let mut session = Session::new("g1".to_string(), 5);
        session.apply_outcome(outcome(&["CRANE"], &[&[0, 1, 0, 2, 0]]));
        assert_eq!(session.guesses().len(), session.feedback_rows().len());

        session.apply_outcome(outcome(&["CRANE", "ROBIN"], &[&[1, 0, 0, 0, 0]]));
        assert_eq!(session.guesses().len(), 2);
        assert_eq!(session.feedback_rows().len(), 2);
    }

    #[test]
    fn won_and_lost_are_never_both_set() {
        let mut session = Session::new("g1".to_string(), 5);
        let mut both = outcome(&["CRANE"], &[&[2, 2, 2, 2, 2]]);
        both.won = true;
        both.lost = true;
        session.apply_outcome(both);
        assert!(*session.won());
        assert!(!*session.lost());
    }

    #[test]
    fn revealed_word_is_sticky() {
        let mut session = Session::new("g1".to_string(), 5);
        session.set_revealed("CRANE".to_string());
        session.set_revealed("ROBIN".to_string());
        assert_eq!(session.revealed_word().as_deref(), Some("CRANE"));
    }

    #[test]
    fn stale_submit_completion_is_discarded() {
        let mut controller = controller_with_session("new_game");

        // Completion for a request dispatched before the session changed.
        let result = controller.finish_submit(
            "old_game",
            "CRANE".to_string(),
            Ok(outcome(&["CRANE"], &[&[0, 0, 0, 0, 0]])),
        );
        assert!(result.is_ok());
        let session = controller.session().unwrap();
        assert!(session.guesses().is_empty());
        assert!(controller.last_error().is_none());
    }

    #[test]
    fn stale_failure_does_not_surface_an_error() {
        let mut controller = controller_with_session("new_game");
        let result = controller.finish_submit(
            "old_game",
            "CRANE".to_string(),
            Err(ServiceError::new("Invalid word: crane")),
        );
        assert!(result.is_ok());
        assert!(controller.last_error().is_none());
    }

    #[test]
    fn current_submit_failure_classifies_invalid_word() {
        let mut controller = controller_with_session("g1");
        controller.pending = "XYZZY".to_string();
        let result = controller.finish_submit(
            "g1",
            "XYZZY".to_string(),
            Err(ServiceError {
                status: Some(400),
                message: "Invalid word: xyzzy".to_string(),
            }),
        );
        assert_eq!(
            result.unwrap_err(),
            GameError::InvalidGuess {
                word: "XYZZY".to_string()
            }
        );
        assert!(controller.pending_input().is_empty());
        assert!(controller.session().unwrap().guesses().is_empty());
    }
}
