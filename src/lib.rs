//! Serpent - terminal snake game library.
//!
//! Exposes the game core and its collaborators (settings, leaderboard,
//! audio, menu and input mapping) for testing. The terminal front end
//! lives in the binary.

pub mod audio;
pub mod core;
pub mod game;
pub mod input;
pub mod leaderboard;
pub mod menu;
pub mod settings;
pub mod utils;
