//! HTTP boundary to the game service.
//!
//! The service owns word selection, answer checking, and suggestion
//! ranking; this module consumes it as an opaque request/response
//! contract. Feedback arrives from the wire either as a single flat row
//! or as a list of rows; both shapes are normalized here, and only here,
//! into `Vec<Vec<Feedback>>` so no caller ever branches on shape.

use crate::feedback::Feedback;
use async_trait::async_trait;
use derive_more::{Display, Error};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

/// A failed call to the game service.
///
/// Carries the HTTP status when one was received and the message from the
/// `{error}` body when the service supplied one.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("service error: {message}")]
pub struct ServiceError {
    /// HTTP status code, absent for transport-level failures.
    pub status: Option<u16>,
    /// Error message from the response body or the transport.
    pub message: String,
}

impl ServiceError {
    /// Creates an error with no HTTP status (transport or decode failure).
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// Whether the service rejected the submitted word as invalid.
    ///
    /// The contract is a lowercase substring match on `"invalid word"`;
    /// everything else is an ordinary failure.
    pub fn is_invalid_word(&self) -> bool {
        self.message.to_lowercase().contains("invalid word")
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// Error body shape for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Response to a start request.
#[derive(Debug, Clone, Deserialize)]
pub struct StartResponse {
    /// Opaque id of the newly created game.
    pub game_id: String,
    /// Word length, fixed for the session's lifetime.
    pub length: usize,
}

/// Feedback as it appears on the wire: one flat row when a single guess
/// was processed, or a list of rows.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FeedbackShape {
    /// A single feedback row.
    Row(Vec<u8>),
    /// Multiple feedback rows.
    Rows(Vec<Vec<u8>>),
}

impl FeedbackShape {
    /// Normalizes to the canonical list-of-rows shape.
    ///
    /// An empty flat row means no new feedback and normalizes to no rows.
    pub fn into_rows(self) -> Vec<Vec<u8>> {
        match self {
            FeedbackShape::Row(row) if row.is_empty() => Vec::new(),
            FeedbackShape::Row(row) => vec![row],
            FeedbackShape::Rows(rows) => rows,
        }
    }
}

/// Wire response to a guess or explore request.
#[derive(Debug, Clone, Deserialize)]
pub struct GuessResponse {
    /// Full guess list for the game so far.
    pub guesses: Vec<String>,
    /// Feedback for the guess(es) just processed.
    pub feedback: FeedbackShape,
    /// Whether the game is won.
    pub won: bool,
    /// Whether the game is lost.
    pub lost: bool,
    /// The answer, disclosed on loss.
    #[serde(default)]
    pub the_word: Option<String>,
    /// How many candidate words remain.
    #[serde(default)]
    pub remaining: Option<usize>,
    /// Remaining candidate words (explore responses only).
    #[serde(default)]
    pub remaining_words: Option<Vec<String>>,
}

/// A guess/explore response with feedback normalized and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    /// Full guess list for the game so far.
    pub guesses: Vec<String>,
    /// Newly delivered feedback rows, canonical shape.
    pub feedback_rows: Vec<Vec<Feedback>>,
    /// Whether the game is won.
    pub won: bool,
    /// Whether the game is lost.
    pub lost: bool,
    /// The answer, disclosed on loss.
    pub the_word: Option<String>,
    /// How many candidate words remain.
    pub remaining: Option<usize>,
    /// Remaining candidate words, when the service listed them.
    pub remaining_words: Option<Vec<String>>,
}

impl GuessResponse {
    /// Normalizes the wire response, validating every feedback cell and
    /// requiring each row to match the submitted word's length.
    pub fn normalize(self, word_length: usize) -> Result<GuessOutcome, ServiceError> {
        let mut feedback_rows = Vec::new();
        for row in self.feedback.into_rows() {
            if row.len() != word_length {
                return Err(ServiceError::new(format!(
                    "feedback row has {} entries, expected {}",
                    row.len(),
                    word_length
                )));
            }
            let row = row
                .into_iter()
                .map(Feedback::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| ServiceError::new(e.to_string()))?;
            feedback_rows.push(row);
        }
        Ok(GuessOutcome {
            guesses: self.guesses,
            feedback_rows,
            won: self.won,
            lost: self.lost,
            the_word: self.the_word,
            remaining: self.remaining,
            remaining_words: self.remaining_words,
        })
    }
}

/// Response to a status query.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    /// Guesses recorded for the game.
    #[serde(default)]
    pub guesses: Vec<String>,
    /// Whether the game is won.
    pub won: bool,
    /// Whether the game is lost.
    pub lost: bool,
    /// Word length for the game.
    pub length: usize,
    /// The answer, present once the game is over.
    #[serde(default)]
    pub answer: Option<String>,
    /// The answer, present on loss (older field name).
    #[serde(default)]
    pub the_word: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BestResponse {
    #[serde(default)]
    best: Vec<String>,
}

/// Reveal responses have used several field names over time.
#[derive(Debug, Deserialize)]
struct RevealResponse {
    #[serde(default)]
    word: Option<String>,
    #[serde(default)]
    the_word: Option<String>,
    #[serde(default)]
    answer: Option<String>,
}

impl RevealResponse {
    fn into_word(self) -> Option<String> {
        self.word.or(self.the_word).or(self.answer)
    }
}

/// The game service as the session controller consumes it.
///
/// `HttpGameClient` is the production implementation; tests drive the
/// controller through scripted fakes.
#[async_trait]
pub trait GameService: Send + Sync {
    /// Starts a new game, optionally replacing a previous one.
    async fn start(&self, previous_id: Option<&str>) -> Result<StartResponse, ServiceError>;

    /// Submits a real guess.
    async fn guess(&self, game_id: &str, guess: &str) -> Result<GuessOutcome, ServiceError>;

    /// Submits an explore guess carrying the overlay row for the target row.
    async fn explore(
        &self,
        game_id: &str,
        guess: &str,
        explore_state: &[u8],
    ) -> Result<GuessOutcome, ServiceError>;

    /// Reads a game's status out of band.
    async fn status(&self, game_id: &str) -> Result<StatusResponse, ServiceError>;

    /// Fetches the suggestion list. Callers treat failure as best-effort.
    async fn best_words(&self, game_id: &str) -> Result<Vec<String>, ServiceError>;

    /// Asks the service to disclose the answer.
    async fn reveal(&self, game_id: &str) -> Result<String, ServiceError>;
}

/// HTTP/JSON client for the game service.
#[derive(Debug, Clone)]
pub struct HttpGameClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGameClient {
    /// Creates a client against the given base URL.
    #[instrument]
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Sends a request and decodes the JSON response, converting non-2xx
    /// responses into [`ServiceError`] with the `{error}` body message.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ServiceError> {
        let response = request.send().await.map_err(|e| {
            error!(error = %e, "request failed");
            ServiceError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(error = %e, "failed to read response body");
            ServiceError::from(e)
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            error!(status = %status, message = %message, "service returned error");
            return Err(ServiceError {
                status: Some(status.as_u16()),
                message,
            });
        }

        debug!(status = %status, body_len = body.len(), "decoding response");
        serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "failed to decode response");
            ServiceError::new(format!("failed to decode response: {e}"))
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl GameService for HttpGameClient {
    #[instrument(skip(self))]
    async fn start(&self, previous_id: Option<&str>) -> Result<StartResponse, ServiceError> {
        debug!("starting game");
        let body = match previous_id {
            Some(id) => serde_json::json!({ "game_id": id }),
            None => serde_json::json!({}),
        };
        self.send(self.client.post(self.url("/start")).json(&body))
            .await
    }

    #[instrument(skip(self))]
    async fn guess(&self, game_id: &str, guess: &str) -> Result<GuessOutcome, ServiceError> {
        debug!(guess, "submitting guess");
        let body = serde_json::json!({ "game_id": game_id, "guess": guess });
        let response: GuessResponse = self
            .send(self.client.post(self.url("/guess")).json(&body))
            .await?;
        response.normalize(guess.chars().count())
    }

    #[instrument(skip(self))]
    async fn explore(
        &self,
        game_id: &str,
        guess: &str,
        explore_state: &[u8],
    ) -> Result<GuessOutcome, ServiceError> {
        debug!(guess, ?explore_state, "submitting explore guess");
        let body = serde_json::json!({
            "game_id": game_id,
            "guess": guess,
            "explore_state": explore_state,
        });
        let response: GuessResponse = self
            .send(self.client.post(self.url("/explore")).json(&body))
            .await?;
        response.normalize(guess.chars().count())
    }

    #[instrument(skip(self))]
    async fn status(&self, game_id: &str) -> Result<StatusResponse, ServiceError> {
        debug!("querying status");
        self.send(
            self.client
                .get(self.url("/status"))
                .query(&[("game_id", game_id)]),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn best_words(&self, game_id: &str) -> Result<Vec<String>, ServiceError> {
        debug!("fetching best words");
        let body = serde_json::json!({ "game_id": game_id });
        let response: BestResponse = self
            .send(self.client.post(self.url("/best")).json(&body))
            .await?;
        Ok(response.best)
    }

    #[instrument(skip(self))]
    async fn reveal(&self, game_id: &str) -> Result<String, ServiceError> {
        debug!("revealing word");
        let body = serde_json::json!({ "game_id": game_id });
        let response: RevealResponse = self
            .send(self.client.post(self.url("/reveal")).json(&body))
            .await?;
        response
            .into_word()
            .ok_or_else(|| ServiceError::new("reveal response carried no word"))
    }
}
