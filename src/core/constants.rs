// Board
pub const DEFAULT_GRID_SIZE: i16 = 20;
pub const MIN_GRID_SIZE: i16 = 8;
pub const MAX_GRID_SIZE: i16 = 40;
pub const INITIAL_SNAKE_LENGTH: usize = 3;

// Timing
pub const MAX_FRAME_DT_MS: u64 = 500;
pub const FRAME_POLL_MS: u64 = 10;
pub const EFFECT_DURATION_MS: u64 = 5000;

// Effect modifiers on the tick interval, as (numerator, denominator)
pub const SPEED_INTERVAL_RATIO: (u64, u64) = (1, 2);
pub const SLOW_INTERVAL_RATIO: (u64, u64) = (3, 2);
pub const DOUBLE_SCORE_MULTIPLIER: u32 = 2;

// Food spawning
pub const FOOD_SPAWN_ATTEMPTS: usize = 64;

// Leaderboard
pub const LEADERBOARD_CAPACITY: usize = 10;
pub const PLAYER_NAME_MAX_LEN: usize = 16;

// Persistence
pub const DATA_DIR_NAME: &str = ".serpent";
pub const LEADERBOARD_FILE: &str = "leaderboard.json";
pub const SETTINGS_FILE: &str = "settings.json";
pub const LOG_FILE: &str = "serpent.log";
