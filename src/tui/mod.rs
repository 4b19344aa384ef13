//! Terminal UI for the Wordle client.

mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tracing::{info, warn};

use crate::client::{GameService, HttpGameClient};
use crate::feedback::MAX_GUESSES;
use crate::session::SessionController;

/// Transient front-end state that never belongs in the session.
pub struct UiState {
    /// Explore-mode cell cursor.
    pub cursor: (usize, usize),
    /// Whether the best-words panel is shown.
    pub show_best: bool,
    /// Whether the remaining-count line is shown.
    pub show_remaining: bool,
    /// Cached suggestion list.
    pub best_words: Vec<String>,
    /// (session id, guess count) the cache was fetched for.
    best_key: Option<(String, usize)>,
}

impl UiState {
    fn new() -> Self {
        Self {
            cursor: (0, 0),
            show_best: false,
            show_remaining: false,
            best_words: Vec::new(),
            best_key: None,
        }
    }

    fn move_cursor(&mut self, key: KeyCode, word_length: usize) {
        let (row, col) = self.cursor;
        self.cursor = match key {
            KeyCode::Up => (row.saturating_sub(1), col),
            KeyCode::Down => ((row + 1).min(MAX_GUESSES - 1), col),
            KeyCode::Left => (row, col.saturating_sub(1)),
            KeyCode::Right => (row, (col + 1).min(word_length.saturating_sub(1))),
            _ => (row, col),
        };
    }
}

/// Run the TUI client against the given server.
pub async fn run(server_url: String) -> Result<()> {
    // Log to a file so tracing output does not fight the terminal.
    let log_file = std::fs::File::create("wordle_client_tui.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(server_url = %server_url, "starting wordle client TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let client = HttpGameClient::new(server_url);
    let mut controller = SessionController::new(client);
    if let Err(err) = controller.start().await {
        // Surfaced through the error line; the player can retry with Ctrl-R.
        warn!(error = %err, "initial session start failed");
    }

    let res = run_loop(&mut terminal, &mut controller).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    controller: &mut SessionController<HttpGameClient>,
) -> Result<()> {
    let mut state = UiState::new();

    loop {
        refresh_best_words(controller, &mut state).await;
        terminal.draw(|frame| ui::draw(frame, controller, &state))?;

        if !event::poll(Duration::from_millis(150))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => break,
            KeyCode::Char('c') if ctrl => break,
            KeyCode::Char('r') if ctrl => {
                let _ = controller.restart().await;
                state.cursor = (0, 0);
            }
            KeyCode::Char('e') if ctrl => {
                controller.toggle_explore(!controller.explore_on());
            }
            KeyCode::Char('g') if ctrl => {
                let _ = controller.reveal().await;
            }
            KeyCode::Char('b') if ctrl => {
                state.show_best = !state.show_best;
            }
            KeyCode::Char('n') if ctrl => {
                state.show_remaining = !state.show_remaining;
            }
            KeyCode::Enter => {
                let _ = controller.submit_guess().await;
            }
            KeyCode::Backspace => controller.pop_letter(),
            KeyCode::Char(' ') => {
                let (row, col) = state.cursor;
                controller.cycle_cell(row, col);
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                let word_length = controller
                    .session()
                    .map(|s| *s.word_length())
                    .unwrap_or(5);
                state.move_cursor(key.code, word_length);
            }
            KeyCode::Char(c) if !ctrl => controller.push_letter(c),
            _ => {}
        }
    }

    Ok(())
}

/// Keeps the suggestion cache in step with the session, fetching only
/// when the panel is visible and the (session, guess count) key moved.
async fn refresh_best_words<S: GameService>(
    controller: &mut SessionController<S>,
    state: &mut UiState,
) {
    if !state.show_best {
        state.best_words.clear();
        state.best_key = None;
        return;
    }
    let Some(key) = controller
        .session()
        .map(|s| (s.id().clone(), s.guesses().len()))
    else {
        return;
    };
    if state.best_key.as_ref() == Some(&key) {
        return;
    }
    state.best_words = controller.fetch_best_words().await;
    state.best_key = Some(key);
}
