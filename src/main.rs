/// Entry point: config, logging, terminal setup, then the game loop.

mod config;
mod domain;
mod error;
mod game_loop;
mod sim;
mod ui;

use std::fs::OpenOptions;
use std::process::ExitCode;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::{GameConfig, LogConfig};
use error::GameError;
use game_loop::{GameLoop, TICK_RATE};
use sim::state::GameState;
use ui::renderer::Terminal;

fn main() -> ExitCode {
    let config = GameConfig::load();
    init_logging(&config.log);
    info!(seed = ?config.seed, "termsnake starting");

    match play(&config) {
        Ok(score) => {
            info!(score, "normal exit");
            println!("Thanks for playing termsnake!");
            println!("Final Score: {score}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Run one game and return the final score.
///
/// The terminal is owned by the game loop; it is restored when `game`
/// drops, which happens before this returns on every path.
fn play(config: &GameConfig) -> Result<u32, GameError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(GameError::Runtime)?;

    let terminal = Terminal::init().map_err(GameError::TerminalInit)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let state = GameState::new(&mut rng);
    let mut game = GameLoop::new(state, terminal, rng, config.theme.clone());

    let (tx, mut rx) = mpsc::channel(1);
    let reader = ui::input::spawn_reader(tx).map_err(GameError::InputThread)?;

    let result = runtime.block_on(game.run(&mut rx, TICK_RATE));
    let score = game.state().score;

    drop(game);
    // Closing the channel stops the reader at its next poll
    drop(rx);
    let input = reader.join().unwrap_or_else(|_| {
        error!("input thread panicked");
        Ok(())
    });

    result?;
    // A dead terminal also closes the channel; that is not a user exit
    input.map_err(GameError::Input)?;
    Ok(score)
}

/// Log to a file: stdout belongs to the game screen.
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(cfg: &LogConfig) {
    let file = match OpenOptions::new().create(true).append(true).open(&cfg.file) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: could not open log file {}: {e}", cfg.file.display());
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
