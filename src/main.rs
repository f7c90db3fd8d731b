//! Tic-tac-toe ledger - unified CLI
//!
//! Registers players, plays games move by move and reports scores, all
//! against one SQLite database.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use serde::Serialize;
use tictactoe_ledger::{
    AppConfig, GameKey, GameRepository, GameService, MoveRecord, PlayerName, PlayerProfile,
    Position, StoredGame,
};
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    initialize_tracing(&config);

    let repository = GameRepository::new(config.db_path().clone())?;
    repository.run_migrations()?;
    let service = GameService::new(repository);

    run(&service, cli.command, cli.json)
}

/// Reads the config file, if any, then applies command-line overrides.
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Loading config from {}", path.display()))?,
        None => AppConfig::default(),
    };

    Ok(match &cli.db_path {
        Some(db_path) => config.with_db_path(db_path.clone()),
        None => config,
    })
}

/// Logs go to stderr so `--json` output stays machine readable.
fn initialize_tracing(config: &AppConfig) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[instrument(skip(service))]
fn run(service: &GameService<GameRepository>, command: Command, json: bool) -> Result<()> {
    debug!(?command, "Dispatching command");
    match command {
        Command::Register { name, email } => {
            let profile = service.register_player(PlayerName::new(name), email.as_deref())?;
            emit(json, &profile, |p| format!("Registered {}", p.name()))
        }
        Command::NewGame { player_x, player_o } => {
            let stored =
                service.start_game(PlayerName::new(player_x), PlayerName::new(player_o))?;
            emit(json, &stored, render_game)
        }
        Command::Move {
            game,
            player,
            position,
        } => {
            let (stored, record) =
                service.apply_move(GameKey::new(game), &PlayerName::new(player), position)?;
            info!(key = %stored.key(), %record, "Move recorded");
            emit(json, &stored, render_game)
        }
        Command::Cancel { game } => {
            let stored = service.cancel_game(GameKey::new(game))?;
            emit(json, &stored, render_game)
        }
        Command::Show { game } => {
            let stored = service.get_game(GameKey::new(game))?;
            emit(json, &stored, render_game)
        }
        Command::History { game } => {
            let history = service.get_history(GameKey::new(game))?;
            emit(json, &history, |history| render_history(history))
        }
        Command::Leaderboard => {
            let players = service.leaderboard()?;
            emit(json, &players, |players| render_leaderboard(players))
        }
        Command::Active { player } => {
            let games = service.active_games(&PlayerName::new(player))?;
            emit(json, &games, |games| {
                games.iter().map(render_game).collect::<Vec<_>>().join("\n\n")
            })
        }
        Command::Stats => {
            let average = service.average_moves()?;
            emit(json, &average, |average| match average {
                Some(avg) => format!("Average moves per active game: {:.2}", avg),
                None => "No active games".to_string(),
            })
        }
    }
}

/// Prints `value` as JSON or through the plain-text renderer.
fn emit<T, F>(json: bool, value: &T, render: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", render(value));
    }
    Ok(())
}

fn render_game(stored: &StoredGame) -> String {
    let game = stored.game();
    let mut out = format!(
        "Game {}: {} (X) vs {} (O)\n{}\n\nStatus: {}",
        stored.key(),
        game.player_x(),
        game.player_o(),
        game.board().display(),
        game.status()
    );
    if let Some(winner) = game.winner() {
        out.push_str(&format!(", winner {}", winner));
    }
    if let Some(next) = game.next_turn() {
        let free = Position::valid_moves(game.board())
            .iter()
            .map(|p| p.number().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(", {} to move\nFree cells: {}", next, free));
    }
    out
}

fn render_history(history: &[MoveRecord]) -> String {
    if history.is_empty() {
        return "No moves yet".to_string();
    }
    history
        .iter()
        .enumerate()
        .map(|(i, record)| format!("{:>2}. {}", i + 1, record))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_leaderboard(players: &[PlayerProfile]) -> String {
    if players.is_empty() {
        return "No players registered".to_string();
    }
    players
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{:>2}. {:<20} {}", i + 1, p.name().as_str(), p.score()))
        .collect::<Vec<_>>()
        .join("\n")
}
