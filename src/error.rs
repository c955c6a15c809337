/// Fatal errors. Losing the game is a status, not an error.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("terminal init failed: {0}")]
    TerminalInit(#[source] io::Error),

    #[error("async runtime init failed: {0}")]
    Runtime(#[source] io::Error),

    #[error("input thread could not start: {0}")]
    InputThread(#[source] io::Error),

    #[error("input failed: {0}")]
    Input(#[source] io::Error),

    #[error("render failed: {0}")]
    Render(#[from] io::Error),
}
