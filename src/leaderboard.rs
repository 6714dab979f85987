//! Persistent high score table.
//!
//! Stored as JSON in `~/.serpent/leaderboard.json`. Entries are kept sorted
//! by score, highest first; equal scores keep the order they were recorded.

use crate::core::constants::{LEADERBOARD_CAPACITY, LEADERBOARD_FILE, PLAYER_NAME_MAX_LEN};
use crate::game::{Collision, Difficulty};
use crate::utils::persistence::{
    load_json_or_default, load_json_or_default_at, save_json, save_json_at,
};
use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub reason: Option<Collision>,
    /// Unix timestamp (seconds).
    #[serde(default)]
    pub recorded_at: i64,
}

impl LeaderboardEntry {
    pub fn new(name: &str, score: u32, difficulty: Difficulty, reason: Collision) -> Self {
        Self {
            name: name.trim().to_string(),
            score,
            difficulty: Some(difficulty),
            reason: Some(reason),
            recorded_at: Utc::now().timestamp(),
        }
    }

    /// `YYYY-MM-DD` of the recording time, or `-` if unknown.
    pub fn date_label(&self) -> String {
        match Utc.timestamp_opt(self.recorded_at, 0).single() {
            Some(at) if self.recorded_at > 0 => at.format("%Y-%m-%d").to_string(),
            _ => "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    #[serde(default)]
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `~/.serpent/`. A missing or unreadable file gives an empty table.
    pub fn load() -> Self {
        let board: Self = load_json_or_default(LEADERBOARD_FILE);
        board.normalized()
    }

    pub fn save(&self) -> io::Result<()> {
        save_json(LEADERBOARD_FILE, self)
    }

    pub fn load_from(path: &Path) -> Self {
        let board: Self = load_json_or_default_at(path);
        board.normalized()
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        save_json_at(path, self)
    }

    /// Hand-edited files may be unsorted or oversized.
    fn normalized(mut self) -> Self {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(LEADERBOARD_CAPACITY);
        self
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best recorded score, 0 when empty.
    pub fn high_score(&self) -> u32 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }

    /// Whether `score` would earn a place on the table. Any score fits
    /// while the table has room, zero included.
    pub fn qualifies(&self, score: u32) -> bool {
        self.entries.len() < LEADERBOARD_CAPACITY
            || self.entries.last().is_some_and(|last| score > last.score)
    }

    /// Insert an entry. Returns its 0-based rank, or `None` if it did not
    /// make the table.
    pub fn record(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }
        let rank = self
            .entries
            .iter()
            .position(|e| e.score < entry.score)
            .unwrap_or(self.entries.len());
        tracing::info!(name = %entry.name, score = entry.score, rank, "leaderboard entry recorded");
        self.entries.insert(rank, entry);
        self.entries.truncate(LEADERBOARD_CAPACITY);
        Some(rank)
    }
}

/// Check a player name for the leaderboard.
pub fn validate_player_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }

    if trimmed.chars().count() > PLAYER_NAME_MAX_LEN {
        return Err(format!(
            "Name must be {} characters or less",
            PLAYER_NAME_MAX_LEN
        ));
    }

    let valid_chars = trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_');

    if !valid_chars {
        return Err(
            "Name can only contain letters, numbers, spaces, hyphens, and underscores".to_string(),
        );
    }

    Ok(())
}
