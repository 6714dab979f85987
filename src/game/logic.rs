//! Snake game loop: run lifecycle, timed ticks, scoring and effects.
//!
//! The game owns a millisecond clock that only moves while a run is
//! active. [`SnakeGame::update`] advances it and works through every effect
//! expiry and tick that falls due, one at a time and in time order, so a
//! tick never starts while another is in progress.

use super::effects::{EffectManager, Modifiers};
use super::events::{ActiveEffect, GameEvent, Snapshot};
use super::food::{spawn_food, Food};
use super::scheduler::TickScheduler;
use super::snake::Snake;
use super::types::{Collision, Difficulty, Direction, Position, RunState};
use crate::core::constants::{
    DEFAULT_GRID_SIZE, INITIAL_SNAKE_LENGTH, MAX_FRAME_DT_MS, MAX_GRID_SIZE, MIN_GRID_SIZE,
};
use crate::core::error::{Result, SerpentError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

/// UI-agnostic input actions for the game screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    Turn(Direction),
    TogglePause,
    Restart,
    Other,
}

/// Main game state.
#[derive(Debug, Clone)]
pub struct SnakeGame {
    difficulty: Difficulty,
    grid_size: i16,
    state: RunState,

    pub snake: Snake,
    pub food: Food,
    score: u32,

    modifiers: Modifiers,
    effects: EffectManager,
    /// Sole authority on whether a tick is armed.
    scheduler: TickScheduler,

    /// Game clock in milliseconds.
    clock_ms: u64,
    /// Movement steps in the current run.
    tick_count: u64,
    rng: StdRng,
}

impl SnakeGame {
    /// Create a game that has not started yet. The board already holds the
    /// initial snake and a food so it can be drawn behind a menu.
    pub fn new(difficulty: Difficulty, grid_size: i16, rng: StdRng) -> Result<Self> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&grid_size) {
            return Err(SerpentError::InvalidGridSize(grid_size));
        }
        Ok(Self::build(difficulty, grid_size, rng))
    }

    /// Default-size board with a reproducible food sequence.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::build(difficulty, DEFAULT_GRID_SIZE, StdRng::seed_from_u64(seed))
    }

    fn build(difficulty: Difficulty, grid_size: i16, mut rng: StdRng) -> Self {
        let snake = initial_snake(grid_size);
        let food = spawn_food(grid_size, &snake, &mut rng);
        Self {
            difficulty,
            grid_size,
            state: RunState::NotStarted,
            snake,
            food,
            score: 0,
            modifiers: Modifiers::new(difficulty.base_interval_ms()),
            effects: EffectManager::new(),
            scheduler: TickScheduler::new(),
            clock_ms: 0,
            tick_count: 0,
            rng,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn grid_size(&self) -> i16 {
        self.grid_size
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn multiplier(&self) -> u32 {
        self.modifiers.multiplier
    }

    /// Interval currently in force, effects included.
    pub fn tick_interval_ms(&self) -> u64 {
        self.modifiers.tick_interval_ms
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn effects(&self) -> &EffectManager {
        &self.effects
    }

    pub fn is_timer_active(&self) -> bool {
        self.scheduler.is_active()
    }

    pub fn timer_interval_ms(&self) -> Option<u64> {
        self.scheduler.interval_ms()
    }

    pub fn next_tick_due_ms(&self) -> Option<u64> {
        self.scheduler.next_due_ms()
    }

    /// Applies from the next `start`.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Begin a fresh run, from any state. Resets snake, score and effects,
    /// spawns the first food and arms the tick timer at the base interval.
    pub fn start(&mut self) -> Vec<GameEvent> {
        self.scheduler.cancel();

        self.snake = initial_snake(self.grid_size);
        self.score = 0;
        self.tick_count = 0;
        self.modifiers = Modifiers::new(self.difficulty.base_interval_ms());
        self.effects.clear(&mut self.modifiers);
        self.food = spawn_food(self.grid_size, &self.snake, &mut self.rng);

        self.state = RunState::Running;
        self.scheduler
            .start(self.modifiers.tick_interval_ms, self.clock_ms);

        info!(
            difficulty = self.difficulty.name(),
            interval_ms = self.modifiers.tick_interval_ms,
            "run started"
        );
        vec![GameEvent::Started {
            difficulty: self.difficulty,
            interval_ms: self.modifiers.tick_interval_ms,
        }]
    }

    /// Buffer a turn. Only accepted while running and when it does not
    /// reverse the current heading.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.state != RunState::Running {
            return false;
        }
        self.snake.set_direction(direction)
    }

    /// Running -> Paused. Cancels the tick timer.
    pub fn pause(&mut self) -> Option<GameEvent> {
        if self.state != RunState::Running {
            return None;
        }
        self.state = RunState::Paused;
        self.scheduler.cancel();
        info!(score = self.score, "paused");
        Some(GameEvent::Paused)
    }

    /// Paused -> Running. Arms the timer at the current interval unless one
    /// is already armed.
    pub fn resume(&mut self) -> Option<GameEvent> {
        if self.state != RunState::Paused {
            return None;
        }
        self.state = RunState::Running;
        if !self.scheduler.is_active() {
            self.scheduler
                .start(self.modifiers.tick_interval_ms, self.clock_ms);
        }
        info!(interval_ms = self.modifiers.tick_interval_ms, "resumed");
        Some(GameEvent::Resumed)
    }

    pub fn toggle_pause(&mut self) -> Option<GameEvent> {
        match self.state {
            RunState::Running => self.pause(),
            RunState::Paused => self.resume(),
            _ => None,
        }
    }

    /// Advance the game clock by `dt_ms` (clamped to 500ms to avoid a burst
    /// of ticks after a stall) and process what falls due. Expiries due at
    /// the same instant as a tick go first.
    pub fn update(&mut self, dt_ms: u64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.state != RunState::Running {
            return events;
        }

        let target = self.clock_ms + dt_ms.min(MAX_FRAME_DT_MS);
        loop {
            let next_tick = self.scheduler.next_due_ms();
            let next_expiry = self.effects.next_expiry().map(|(_, at)| at);
            let next = match (next_tick, next_expiry) {
                (Some(tick), Some(expiry)) => Some(tick.min(expiry)),
                (tick, expiry) => tick.or(expiry),
            };
            let at = match next {
                Some(at) if at <= target => at,
                _ => break,
            };
            self.clock_ms = self.clock_ms.max(at);

            if next_expiry.is_some_and(|expiry| expiry <= at) {
                self.expire_effects(&mut events);
                continue;
            }

            if self.scheduler.fire_if_due(self.clock_ms) {
                self.step(&mut events);
            }
            if self.state != RunState::Running {
                return events;
            }
        }

        self.clock_ms = target;
        events
    }

    /// One movement step: advance, collide, then resolve food.
    fn step(&mut self, events: &mut Vec<GameEvent>) {
        self.tick_count += 1;

        let ate = self.snake.advance(self.food.position);
        if let Some(reason) = self.snake.check_collision(self.grid_size) {
            self.end_run(reason, events);
            return;
        }
        if !ate {
            return;
        }

        let eaten = self.food;
        let points = eaten.kind.points() * self.modifiers.multiplier;
        self.score += points;
        debug!(
            kind = eaten.kind.name(),
            points,
            score = self.score,
            "food eaten"
        );
        events.push(GameEvent::FoodEaten {
            kind: eaten.kind,
            points,
            position: eaten.position,
        });

        if let Some(effect) = eaten.kind.effect() {
            let before = self.modifiers.tick_interval_ms;
            let applied = self.effects.apply(
                effect.kind,
                effect.duration_ms,
                self.clock_ms,
                &mut self.modifiers,
            );
            self.sync_timer_interval(before);
            debug!(
                effect = effect.kind.name(),
                refreshed = applied.refreshed,
                "effect applied"
            );
            events.push(GameEvent::EffectApplied {
                effect: effect.kind,
                refreshed: applied.refreshed,
                superseded: applied.superseded,
            });
        }

        self.food = spawn_food(self.grid_size, &self.snake, &mut self.rng);
    }

    fn expire_effects(&mut self, events: &mut Vec<GameEvent>) {
        let before = self.modifiers.tick_interval_ms;
        for effect in self.effects.expire_due(self.clock_ms, &mut self.modifiers) {
            debug!(effect = effect.name(), "effect expired");
            events.push(GameEvent::EffectExpired { effect });
        }
        self.sync_timer_interval(before);
    }

    /// Re-arm immediately when an effect changed the interval.
    fn sync_timer_interval(&mut self, before: u64) {
        if self.modifiers.tick_interval_ms != before {
            self.scheduler
                .rearm(self.modifiers.tick_interval_ms, self.clock_ms);
        }
    }

    fn end_run(&mut self, reason: Collision, events: &mut Vec<GameEvent>) {
        self.state = RunState::GameOver { reason };
        self.scheduler.cancel();
        self.effects.clear(&mut self.modifiers);
        info!(
            score = self.score,
            reason = reason.describe(),
            ticks = self.tick_count,
            "game over"
        );
        events.push(GameEvent::GameOver {
            final_score: self.score,
            reason,
        });
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            difficulty: self.difficulty,
            grid_size: self.grid_size,
            snake: self.snake.body().iter().copied().collect(),
            direction: self.snake.direction(),
            food: self.food,
            score: self.score,
            multiplier: self.modifiers.multiplier,
            tick_interval_ms: self.modifiers.tick_interval_ms,
            active_effects: self
                .effects
                .active()
                .map(|(kind, at)| ActiveEffect {
                    kind,
                    remaining_ms: at.saturating_sub(self.clock_ms),
                })
                .collect(),
            tick_count: self.tick_count,
        }
    }
}

/// Three segments at the centre of the board, heading right.
fn initial_snake(grid_size: i16) -> Snake {
    let center = grid_size / 2;
    Snake::new(
        Position::new(center, center),
        Direction::Right,
        INITIAL_SNAKE_LENGTH,
    )
}

/// Process player input.
pub fn process_input(game: &mut SnakeGame, input: GameInput) -> Vec<GameEvent> {
    match input {
        GameInput::Turn(direction) => {
            game.set_direction(direction);
            Vec::new()
        }
        GameInput::TogglePause => game.toggle_pause().into_iter().collect(),
        GameInput::Restart => {
            if game.state() == RunState::Running {
                Vec::new()
            } else {
                game.start()
            }
        }
        GameInput::Other => Vec::new(),
    }
}
