//! Integration test: finished runs flowing into the leaderboard file.

use serpent::audio::{notify, AudioSink, SoundCue};
use serpent::game::{Collision, Difficulty, Food, FoodKind, GameEvent, Position, RunState, SnakeGame};
use serpent::leaderboard::{validate_player_name, Leaderboard, LeaderboardEntry};
use serpent::settings::{Overrides, Settings};

#[derive(Default)]
struct CountingSink {
    cues: Vec<SoundCue>,
}

impl AudioSink for CountingSink {
    fn play(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }
}

/// Run to the right wall, eating `meals` Normal foods first. Returns the
/// events of the whole run.
fn play_to_wall(game: &mut SnakeGame, meals: i16) -> Vec<GameEvent> {
    let mut events = game.start();
    let interval = game.tick_interval_ms();
    for step in 0..20 {
        let head = game.snake.head();
        let position = if step < meals {
            Position::new(head.x + 1, head.y)
        } else {
            Position::new(0, 0)
        };
        game.food = Food {
            position,
            kind: FoodKind::Normal,
        };
        events.extend(game.update(interval));
        if game.state().is_over() {
            break;
        }
    }
    events
}

#[test]
fn test_finished_run_is_recorded_and_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leaderboard.json");

    let mut game = SnakeGame::with_seed(Difficulty::Medium, 9);
    let events = play_to_wall(&mut game, 3);

    let final_score = events.iter().find_map(|e| match e {
        GameEvent::GameOver { final_score, .. } => Some(*final_score),
        _ => None,
    });
    assert_eq!(final_score, Some(30));

    let mut sink = CountingSink::default();
    notify(&mut sink, &events);
    assert_eq!(
        sink.cues,
        vec![
            SoundCue::Eat,
            SoundCue::Eat,
            SoundCue::Eat,
            SoundCue::GameOver
        ]
    );

    let mut board = Leaderboard::load_from(&path);
    assert!(board.is_empty());
    assert!(board.qualifies(game.score()));

    let reason = match game.state() {
        RunState::GameOver { reason } => reason,
        other => panic!("expected game over, got {other:?}"),
    };
    assert!(validate_player_name("Ada").is_ok());
    let rank = board.record(LeaderboardEntry::new(
        "Ada",
        game.score(),
        game.difficulty(),
        reason,
    ));
    assert_eq!(rank, Some(0));
    board.save_to(&path).unwrap();

    let reloaded = Leaderboard::load_from(&path);
    assert_eq!(reloaded.high_score(), 30);
    let top = &reloaded.entries()[0];
    assert_eq!(top.name, "Ada");
    assert_eq!(top.difficulty, Some(Difficulty::Medium));
    assert_eq!(top.reason, Some(Collision::Wall));
    assert!(top.recorded_at > 0);
}

#[test]
fn test_zero_score_run_is_recorded_until_table_fills() {
    let mut game = SnakeGame::with_seed(Difficulty::Easy, 3);
    play_to_wall(&mut game, 0);
    assert_eq!(game.score(), 0);

    let mut board = Leaderboard::new();
    assert!(board.qualifies(game.score()));
    let rank = board.record(LeaderboardEntry::new(
        "Zed",
        game.score(),
        game.difficulty(),
        Collision::Wall,
    ));
    assert_eq!(rank, Some(0));

    for score in 1..=10 {
        board.record(LeaderboardEntry::new("p", score, Difficulty::Easy, Collision::Wall));
    }
    // Ten positive scores push the zero out, and another zero no longer fits.
    assert!(board.entries().iter().all(|e| e.score > 0));
    assert!(!board.qualifies(0));
}

#[test]
fn test_full_table_keeps_top_ten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores").join("leaderboard.json");

    let mut board = Leaderboard::new();
    for score in [50, 10, 90, 30, 70, 20, 80, 40, 60, 100, 5, 110] {
        board.record(LeaderboardEntry::new(
            "p",
            score,
            Difficulty::Hard,
            Collision::SelfCollision,
        ));
    }
    board.save_to(&path).unwrap();

    let reloaded = Leaderboard::load_from(&path);
    let scores: Vec<u32> = reloaded.entries().iter().map(|e| e.score).collect();
    assert_eq!(scores, vec![110, 100, 90, 80, 70, 60, 50, 40, 30, 20]);
}

#[test]
fn test_settings_file_and_overrides_pick_game_setup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    Settings {
        difficulty: Difficulty::Medium,
        sound_enabled: true,
        grid_size: 12,
    }
    .save_to(&path)
    .unwrap();

    let settings = Settings::load_from(&path)
        .with_overrides(Overrides {
            difficulty: Some(Difficulty::Hard),
            ..Default::default()
        })
        .unwrap();
    let rng = rand::SeedableRng::seed_from_u64(1);
    let mut game = SnakeGame::new(settings.difficulty, settings.grid_size, rng).unwrap();
    game.start();

    assert_eq!(game.grid_size(), 12);
    assert_eq!(game.tick_interval_ms(), 70);
    assert_eq!(game.snake.head(), Position::new(6, 6));
}
