//! Error type shared by the library and the terminal front end.
//!
//! Collisions are not errors. A run ending against a wall or the snake's
//! own body is carried by `RunState::GameOver`.

use super::constants::{MAX_GRID_SIZE, MIN_GRID_SIZE};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SerpentError {
    /// No terminal to draw on. Raised before any game state is created.
    #[error("renderer unavailable: {0}")]
    RendererUnavailable(String),

    #[error("invalid grid size {} (expected {}..={})", .0, MIN_GRID_SIZE, MAX_GRID_SIZE)]
    InvalidGridSize(i16),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SerpentError>;
