//! Wordle client library - session state machine for a Wordle game server
//!
//! The server owns word selection, answer checking, and best-guess
//! ranking; this library owns the player's side: the session state
//! machine, the board and keyboard projections, and the explore-mode
//! annotation overlay.
//!
//! # Architecture
//!
//! - **Client**: HTTP/JSON boundary to the game service ([`GameService`],
//!   [`HttpGameClient`]); normalizes wire feedback shapes.
//! - **Session**: the [`Session`] value plus [`SessionController`], the
//!   single mutator of session state.
//! - **Board**: pure projection of session + input into a renderable grid.
//! - **Feedback**: derived facts (eliminated letters, keyboard hints).
//! - **Explore**: per-cell hypothetical annotations that never affect the
//!   real game.
//!
//! # Example
//!
//! ```no_run
//! use wordle_client::{HttpGameClient, SessionController};
//!
//! # async fn example() -> Result<(), wordle_client::GameError> {
//! let client = HttpGameClient::new("http://localhost:18080".to_string());
//! let mut controller = SessionController::new(client);
//! controller.start().await?;
//! for letter in "CRANE".chars() {
//!     controller.push_letter(letter);
//! }
//! controller.submit_guess().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod cli;
mod client;
mod error;
mod explore;
mod feedback;
mod session;
mod tui;

// Crate-level exports - Board projection
pub use board::{Cell, CellState, project};

// Crate-level exports - CLI
pub use cli::{Cli, Command, DEFAULT_SERVER_URL};

// Crate-level exports - Service boundary
pub use client::{
    FeedbackShape, GameService, GuessOutcome, GuessResponse, HttpGameClient, ServiceError,
    StartResponse, StatusResponse,
};

// Crate-level exports - Errors
pub use error::GameError;

// Crate-level exports - Explore overlay
pub use explore::ExploreOverlay;

// Crate-level exports - Feedback model
pub use feedback::{Feedback, FeedbackValueError, MAX_GUESSES, eliminated_letters, letter_hints};

// Crate-level exports - Session management
pub use session::{Session, SessionController};

// Crate-level exports - TUI entry point
pub use tui::run as run_tui;
