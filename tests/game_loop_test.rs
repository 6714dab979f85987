//! Integration test: Game loop mechanics
//!
//! Drives `SnakeGame` through its public API the way the terminal front
//! end does: inputs in, `update(dt)` per frame, events out.

use serpent::game::{
    process_input, Collision, Difficulty, Direction, EffectKind, Food, FoodKind, GameEvent,
    GameInput, Position, RunState, SnakeGame,
};

const EASY_INTERVAL: u64 = 150;

fn started_game(difficulty: Difficulty) -> SnakeGame {
    let mut game = SnakeGame::with_seed(difficulty, 42);
    game.start();
    game
}

fn place_food(game: &mut SnakeGame, x: i16, y: i16, kind: FoodKind) {
    game.food = Food {
        position: Position::new(x, y),
        kind,
    };
}

/// Move the food somewhere the tests never steer through.
fn park_food(game: &mut SnakeGame) {
    place_food(game, 0, 0, FoodKind::Normal);
}

/// Clockwise around the rectangle x in 9..=13, y in 10..=13.
fn steer_rectangle(game: &mut SnakeGame) {
    let head = game.snake.head();
    let direction = if head.y == 10 && head.x < 13 {
        Direction::Right
    } else if head.x == 13 && head.y < 13 {
        Direction::Down
    } else if head.y == 13 && head.x > 9 {
        Direction::Left
    } else {
        Direction::Up
    };
    game.set_direction(direction);
}

#[test]
fn test_start_builds_initial_board() {
    let game = started_game(Difficulty::Easy);
    let snap = game.snapshot();

    assert_eq!(snap.state, RunState::Running);
    assert_eq!(
        snap.snake,
        vec![
            Position::new(10, 10),
            Position::new(9, 10),
            Position::new(8, 10)
        ]
    );
    assert_eq!(snap.direction, Direction::Right);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.multiplier, 1);
    assert_eq!(snap.tick_interval_ms, EASY_INTERVAL);
    assert!(snap.active_effects.is_empty());
    assert!(!game.snake.occupies(snap.food.position));
    assert!(game.is_timer_active());
}

#[test]
fn test_difficulty_sets_tick_interval() {
    assert_eq!(started_game(Difficulty::Medium).tick_interval_ms(), 100);
    assert_eq!(started_game(Difficulty::Hard).tick_interval_ms(), 70);
}

#[test]
fn test_runs_into_wall() {
    let mut game = started_game(Difficulty::Easy);

    // Head starts at x=10; x=19 is the last cell.
    for _ in 0..9 {
        park_food(&mut game);
        let events = game.update(EASY_INTERVAL);
        assert!(events.is_empty(), "unexpected events: {events:?}");
    }
    assert_eq!(game.snake.head(), Position::new(19, 10));

    park_food(&mut game);
    let events = game.update(EASY_INTERVAL);
    assert_eq!(
        events,
        vec![GameEvent::GameOver {
            final_score: 0,
            reason: Collision::Wall
        }]
    );
    assert_eq!(
        game.state(),
        RunState::GameOver {
            reason: Collision::Wall
        }
    );
    assert!(!game.is_timer_active());

    // Terminal: no more ticks.
    assert!(game.update(EASY_INTERVAL).is_empty());
    assert_eq!(game.tick_count(), 10);
}

#[test]
fn test_double_then_normal_scores_with_multiplier_until_expiry() {
    let mut game = started_game(Difficulty::Easy);

    place_food(&mut game, 11, 10, FoodKind::Double);
    let events = game.update(EASY_INTERVAL);
    assert!(events.contains(&GameEvent::FoodEaten {
        kind: FoodKind::Double,
        points: 30,
        position: Position::new(11, 10),
    }));
    assert!(events.contains(&GameEvent::EffectApplied {
        effect: EffectKind::Double,
        refreshed: false,
        superseded: None,
    }));
    assert_eq!(game.multiplier(), 2);

    place_food(&mut game, 12, 10, FoodKind::Normal);
    let events = game.update(EASY_INTERVAL);
    assert!(events.contains(&GameEvent::FoodEaten {
        kind: FoodKind::Normal,
        points: 20,
        position: Position::new(12, 10),
    }));
    assert_eq!(game.score(), 50);
    assert_eq!(game.snake.len(), 5);

    // Circle until the 5s effect runs out (eaten at 150ms, expires at 5150ms).
    let mut expired_at = None;
    for _ in 0..40 {
        park_food(&mut game);
        steer_rectangle(&mut game);
        let events = game.update(EASY_INTERVAL);
        assert_eq!(game.state(), RunState::Running);
        if events.contains(&GameEvent::EffectExpired {
            effect: EffectKind::Double,
        }) {
            expired_at = Some(game.clock_ms());
            break;
        }
        assert_eq!(game.multiplier(), 2);
    }
    // Reported by the frame that crossed 5150ms.
    assert_eq!(expired_at, Some(5250));
    assert_eq!(game.multiplier(), 1);
    assert!(game.effects().is_empty());
}

#[test]
fn test_pause_freezes_ticks_and_effect_timers() {
    let mut game = started_game(Difficulty::Easy);
    place_food(&mut game, 11, 10, FoodKind::Speed);
    game.update(EASY_INTERVAL);
    park_food(&mut game);

    assert_eq!(game.tick_interval_ms(), 75);
    assert_eq!(game.timer_interval_ms(), Some(75));
    assert_eq!(game.effects().remaining_ms(EffectKind::Speed, game.clock_ms()), Some(5000));

    assert_eq!(
        process_input(&mut game, GameInput::TogglePause),
        vec![GameEvent::Paused]
    );
    assert!(!game.is_timer_active());

    let head = game.snake.head();
    let clock = game.clock_ms();
    assert!(game.update(2000).is_empty());
    assert_eq!(game.snake.head(), head);
    assert_eq!(game.clock_ms(), clock);

    // Turns are ignored while paused.
    process_input(&mut game, GameInput::Turn(Direction::Up));
    assert_eq!(game.snake.next_direction(), Direction::Right);

    assert_eq!(
        process_input(&mut game, GameInput::TogglePause),
        vec![GameEvent::Resumed]
    );
    assert_eq!(game.timer_interval_ms(), Some(75));
    assert_eq!(game.next_tick_due_ms(), Some(clock + 75));
    assert_eq!(game.effects().remaining_ms(EffectKind::Speed, game.clock_ms()), Some(5000));
}

#[test]
fn test_slow_supersedes_speed_and_rearms_timer() {
    let mut game = started_game(Difficulty::Easy);
    place_food(&mut game, 11, 10, FoodKind::Speed);
    game.update(EASY_INTERVAL);
    assert_eq!(game.next_tick_due_ms(), Some(225));

    place_food(&mut game, 12, 10, FoodKind::Slow);
    let events = game.update(75);
    assert!(events.contains(&GameEvent::EffectApplied {
        effect: EffectKind::Slow,
        refreshed: false,
        superseded: Some(EffectKind::Speed),
    }));
    assert_eq!(game.tick_interval_ms(), 225);
    assert_eq!(game.timer_interval_ms(), Some(225));
    assert_eq!(game.next_tick_due_ms(), Some(450));
    assert!(!game.effects().is_active(EffectKind::Speed));
    assert_eq!(game.score(), 35);
}

#[test]
fn test_restart_only_outside_running() {
    let mut game = started_game(Difficulty::Easy);
    park_food(&mut game);
    game.update(EASY_INTERVAL);
    assert!(process_input(&mut game, GameInput::Restart).is_empty());
    assert_eq!(game.tick_count(), 1);

    // Turn a tight loop back onto the start cell.
    game.set_direction(Direction::Up);
    park_food(&mut game);
    game.update(EASY_INTERVAL);
    game.set_direction(Direction::Left);
    park_food(&mut game);
    game.update(EASY_INTERVAL);
    game.set_direction(Direction::Down);
    park_food(&mut game);
    let events = game.update(EASY_INTERVAL);
    // The tail has already left (10,10); the run is still alive.
    assert!(events.is_empty());

    game.pause();
    let events = process_input(&mut game, GameInput::Restart);
    assert_eq!(
        events,
        vec![GameEvent::Started {
            difficulty: Difficulty::Easy,
            interval_ms: EASY_INTERVAL
        }]
    );
    assert_eq!(game.state(), RunState::Running);
    assert_eq!(game.tick_count(), 0);
    assert_eq!(game.snake.head(), Position::new(10, 10));
}

#[test]
fn test_large_frame_gap_is_clamped() {
    let mut game = started_game(Difficulty::Easy);
    park_food(&mut game);
    game.update(10_000);
    // 500ms at most: three ticks at 150, 300 and 450.
    assert_eq!(game.tick_count(), 3);
    assert_eq!(game.clock_ms(), 500);
}

#[test]
fn test_start_leaves_not_started_immediately() {
    // The front end calls start() before showing the board, so renderers
    // only ever see Running, Paused or GameOver.
    let mut game = SnakeGame::with_seed(Difficulty::Easy, 42);
    assert_eq!(game.state(), RunState::NotStarted);
    assert!(game.update(EASY_INTERVAL).is_empty());

    game.start();
    assert_eq!(game.snapshot().state, RunState::Running);

    for _ in 0..10 {
        park_food(&mut game);
        game.update(EASY_INTERVAL);
    }
    assert!(game.state().is_over());
    game.start();
    assert_eq!(game.snapshot().state, RunState::Running);
}
