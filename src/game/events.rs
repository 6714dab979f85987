//! What the game loop reports to its collaborators.
//!
//! [`GameEvent`]s go to the audio and leaderboard side; a [`Snapshot`] is
//! everything a renderer needs for one frame. Neither carries UI types.

use super::effects::EffectKind;
use super::food::{Food, FoodKind};
use super::types::{Collision, Difficulty, Direction, Position, RunState};
use serde::Serialize;

/// A single event produced by the game loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A run began (first start or restart).
    Started {
        difficulty: Difficulty,
        interval_ms: u64,
    },

    Paused,

    Resumed,

    /// Food consumed. `points` already includes the multiplier.
    FoodEaten {
        kind: FoodKind,
        points: u32,
        position: Position,
    },

    /// A food effect took hold or had its timer reset.
    EffectApplied {
        effect: EffectKind,
        refreshed: bool,
        superseded: Option<EffectKind>,
    },

    EffectExpired { effect: EffectKind },

    /// The run ended. Terminal until the next start.
    GameOver { final_score: u32, reason: Collision },
}

/// An active effect as shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActiveEffect {
    pub kind: EffectKind,
    pub remaining_ms: u64,
}

/// Read-only view of the game for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub state: RunState,
    pub difficulty: Difficulty,
    pub grid_size: i16,
    /// Head first.
    pub snake: Vec<Position>,
    pub direction: Direction,
    pub food: Food,
    pub score: u32,
    pub multiplier: u32,
    pub tick_interval_ms: u64,
    pub active_effects: Vec<ActiveEffect>,
    pub tick_count: u64,
}

impl Snapshot {
    pub fn effect_names(&self) -> Vec<&'static str> {
        self.active_effects.iter().map(|e| e.kind.name()).collect()
    }
}
