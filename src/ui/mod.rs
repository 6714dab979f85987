//! Terminal rendering for each screen.

pub mod game_common;
pub mod game_scene;
pub mod leaderboard_scene;
pub mod menu_scene;
pub mod name_entry;
