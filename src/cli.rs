//! Command-line interface for tictactoe_ledger.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tic-tac-toe ledger - games, move history and scores in SQLite
#[derive(Parser, Debug)]
#[command(name = "tictactoe_ledger")]
#[command(about = "Play tic-tac-toe and keep a ledger of games and scores", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file, overriding the config file
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register a new player
    Register {
        /// Unique player name
        name: String,

        /// Contact email
        #[arg(long)]
        email: Option<String>,
    },

    /// Start a game between two registered players
    NewGame {
        /// Player who moves first (X)
        player_x: String,

        /// Player who moves second (O)
        player_o: String,
    },

    /// Place the mover's symbol on a cell
    Move {
        /// Game id
        game: i32,

        /// Player making the move
        player: String,

        /// Cell number, 1-9 left to right, top to bottom
        #[arg(allow_negative_numbers = true)]
        position: i64,
    },

    /// Cancel an active game
    Cancel {
        /// Game id
        game: i32,
    },

    /// Show a game's board and status
    Show {
        /// Game id
        game: i32,
    },

    /// List a game's moves in order
    History {
        /// Game id
        game: i32,
    },

    /// List players by score
    Leaderboard,

    /// List a player's active games
    Active {
        /// Player name
        player: String,
    },

    /// Show the average number of moves across active games
    Stats,
}
