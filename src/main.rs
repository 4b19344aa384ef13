//! Wordle client - terminal front end for a Wordle game server.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wordle_client::{Cli, Command, GameService, HttpGameClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Tui { server_url } => wordle_client::run_tui(server_url).await,
        Command::Status {
            server_url,
            game_id,
        } => print_status(server_url, game_id).await,
    }
}

/// One-shot status query against a running server.
async fn print_status(server_url: String, game_id: String) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    info!(server_url = %server_url, game_id = %game_id, "querying status");

    let client = HttpGameClient::new(server_url);
    let status = client.status(&game_id).await?;

    println!("game:    {game_id}");
    println!("length:  {}", status.length);
    println!("won:     {}", status.won);
    println!("lost:    {}", status.lost);
    if !status.guesses.is_empty() {
        println!("guesses: {}", status.guesses.join(", "));
    }
    if let Some(answer) = status.answer.or(status.the_word) {
        println!("answer:  {answer}");
    }

    Ok(())
}
