//! Food types, weighted type selection and placement.

use super::effects::EffectKind;
use super::snake::Snake;
use super::types::Position;
use crate::core::constants::{EFFECT_DURATION_MS, FOOD_SPAWN_ATTEMPTS};
use rand::Rng;
use serde::Serialize;

/// The fixed set of food types. Variant order is the order of the
/// cumulative probability walk in [`FoodKind::from_roll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodKind {
    Normal,
    Speed,
    Slow,
    Double,
}

/// Timed effect triggered by eating a food.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodEffect {
    pub kind: EffectKind,
    pub duration_ms: u64,
}

impl FoodKind {
    pub const ALL: [FoodKind; 4] = [
        FoodKind::Normal,
        FoodKind::Speed,
        FoodKind::Slow,
        FoodKind::Double,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Speed => "Speed",
            Self::Slow => "Slow",
            Self::Double => "Double",
        }
    }

    /// Points before the score multiplier.
    pub fn points(&self) -> u32 {
        match self {
            Self::Normal => 10,
            Self::Speed => 20,
            Self::Slow => 15,
            Self::Double => 30,
        }
    }

    /// Selection probability. Sums to 1.0 across [`FoodKind::ALL`].
    pub fn probability(&self) -> f64 {
        match self {
            Self::Normal => 0.7,
            Self::Speed | Self::Slow | Self::Double => 0.1,
        }
    }

    pub fn effect(&self) -> Option<FoodEffect> {
        let kind = match self {
            Self::Normal => return None,
            Self::Speed => EffectKind::Speed,
            Self::Slow => EffectKind::Slow,
            Self::Double => EffectKind::Double,
        };
        Some(FoodEffect {
            kind,
            duration_ms: EFFECT_DURATION_MS,
        })
    }

    /// Pick the first type whose cumulative probability reaches `roll`
    /// (a uniform draw in `[0, 1)`). Falls back to the last type so
    /// rounding in the running sum can never leave nothing selected.
    pub fn from_roll(roll: f64) -> Self {
        let mut cumulative = 0.0;
        for kind in Self::ALL {
            cumulative += kind.probability();
            if roll <= cumulative {
                return kind;
            }
        }
        Self::ALL[Self::ALL.len() - 1]
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::from_roll(rng.gen::<f64>())
    }
}

/// The single food item on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
}

/// Spawn a food of random type on a cell not covered by the snake.
pub fn spawn_food<R: Rng>(grid_size: i16, snake: &Snake, rng: &mut R) -> Food {
    let kind = FoodKind::random(rng);
    let position = spawn_position(grid_size, snake, rng);
    Food { position, kind }
}

/// Uniform random empty cell. Draws x and y independently a bounded number
/// of times, then falls back to picking among the remaining free cells.
/// On a completely full board the last draw is returned as is.
pub fn spawn_position<R: Rng>(grid_size: i16, snake: &Snake, rng: &mut R) -> Position {
    let mut pos = Position::new(0, 0);
    for _ in 0..FOOD_SPAWN_ATTEMPTS {
        pos = Position::new(rng.gen_range(0..grid_size), rng.gen_range(0..grid_size));
        if !snake.occupies(pos) {
            return pos;
        }
    }

    let free: Vec<Position> = (0..grid_size)
        .flat_map(|y| (0..grid_size).map(move |x| Position::new(x, y)))
        .filter(|&p| !snake.occupies(p))
        .collect();
    if free.is_empty() {
        return pos;
    }
    free[rng.gen_range(0..free.len())]
}
