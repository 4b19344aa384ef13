//! Command-line interface for wordle_client.

use clap::{Parser, Subcommand};

/// Default game server URL, matching the reference server's bind port.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:18080";

/// Wordle client - terminal front end for a Wordle game server
#[derive(Parser, Debug)]
#[command(name = "wordle_client")]
#[command(about = "Play Wordle against a game server from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the terminal UI client
    Tui {
        /// Game server URL
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server_url: String,
    },

    /// Print the status of an existing game and exit
    Status {
        /// Game server URL
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server_url: String,

        /// Id of the game to query
        #[arg(long)]
        game_id: String,
    },
}
