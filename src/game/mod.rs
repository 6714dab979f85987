//! The snake game core: board model, effects, tick scheduling and the
//! state machine that ties them together. No terminal or file I/O here.

pub mod effects;
pub mod events;
pub mod food;
pub mod logic;
pub mod scheduler;
pub mod snake;
pub mod types;

pub use effects::{EffectKind, EffectManager, Modifiers};
pub use events::{ActiveEffect, GameEvent, Snapshot};
pub use food::{Food, FoodKind};
pub use logic::{process_input, GameInput, SnakeGame};
pub use snake::Snake;
pub use types::{Collision, Difficulty, Direction, Position, RunState};
