//! User settings persisted in `~/.serpent/settings.json`.
//!
//! Layering: built-in defaults, then the file, then command line overrides
//! via [`Settings::with_overrides`].

use crate::core::constants::{DEFAULT_GRID_SIZE, MAX_GRID_SIZE, MIN_GRID_SIZE, SETTINGS_FILE};
use crate::core::error::{Result, SerpentError};
use crate::game::Difficulty;
use crate::utils::persistence::{
    load_json_or_default, load_json_or_default_at, save_json, save_json_at,
};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub sound_enabled: bool,
    pub grid_size: i16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            sound_enabled: true,
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

/// Command line values that take precedence over the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub difficulty: Option<Difficulty>,
    pub grid_size: Option<i16>,
    pub mute: bool,
}

impl Settings {
    pub fn load() -> Self {
        load_json_or_default(SETTINGS_FILE)
    }

    pub fn save(&self) -> io::Result<()> {
        save_json(SETTINGS_FILE, self)
    }

    pub fn load_from(path: &Path) -> Self {
        load_json_or_default_at(path)
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        save_json_at(path, self)
    }

    /// Apply command line overrides. Fails on an out-of-range grid size,
    /// whether it came from the file or the command line.
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self> {
        if let Some(difficulty) = overrides.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(grid_size) = overrides.grid_size {
            self.grid_size = grid_size;
        }
        if overrides.mute {
            self.sound_enabled = false;
        }
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(SerpentError::InvalidGridSize(self.grid_size));
        }
        Ok(self)
    }

    /// Carry the fields that changed between `before` and `after` onto
    /// `self`. Used to persist menu edits to the file layer without
    /// writing command line overrides along with them.
    pub fn merge_changes(&self, before: &Settings, after: &Settings) -> Settings {
        let mut merged = *self;
        if after.difficulty != before.difficulty {
            merged.difficulty = after.difficulty;
        }
        if after.sound_enabled != before.sound_enabled {
            merged.sound_enabled = after.sound_enabled;
        }
        if after.grid_size != before.grid_size {
            merged.grid_size = after.grid_size;
        }
        merged
    }
}
