mod ui;

use clap::{Parser, Subcommand};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::tty::IsTty;
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use serpent::audio::{self, TerminalBell};
use serpent::core::constants::{FRAME_POLL_MS, LOG_FILE};
use serpent::core::error::{Result, SerpentError};
use serpent::game::{process_input, Difficulty, GameEvent, RunState, SnakeGame};
use serpent::input::{is_quit_key, map_game_input, map_menu_input, NameEntryOutcome, NameInput};
use serpent::leaderboard::{Leaderboard, LeaderboardEntry};
use serpent::menu::{MainMenu, MenuAction};
use serpent::settings::{Overrides, Settings};
use serpent::utils::frame_clock::FrameClock;
use serpent::utils::persistence::data_path;
use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Serpent - terminal snake with power-up food
#[derive(Parser)]
#[command(name = "serpent")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Starting difficulty (overrides settings.json)
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Board width and height in cells (8-40)
    #[arg(long)]
    grid_size: Option<i16>,

    /// Seed the food generator for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Disable the terminal bell
    #[arg(long)]
    mute: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the leaderboard and exit
    Scores,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Menu,
    Game,
    NameEntry,
    GameOver,
    Leaderboard { back: Back },
}

/// Where the leaderboard screen returns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Back {
    Menu,
    GameOver,
}

struct App {
    screen: Screen,
    settings: Settings,
    /// Settings as stored on disk, without command line overrides.
    file_settings: Settings,
    leaderboard: Leaderboard,
    menu: MainMenu,
    game: SnakeGame,
    name_input: NameInput,
    bell: TerminalBell,
    /// High score before the current run started.
    best_before_run: u32,
    /// Rank of the last recorded entry, for highlighting.
    last_rank: Option<usize>,
    quit: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Command::Scores) = cli.command {
        print_scores(&Leaderboard::load());
        return Ok(());
    }

    let file_settings = Settings::load();
    let settings = file_settings.with_overrides(Overrides {
        difficulty: cli.difficulty,
        grid_size: cli.grid_size,
        mute: cli.mute,
    })?;

    // Nothing to draw on: refuse to run headless.
    if !io::stdout().is_tty() {
        return Err(SerpentError::RendererUnavailable(
            "stdout is not a terminal".to_string(),
        ));
    }

    init_logging();

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let game = SnakeGame::new(settings.difficulty, settings.grid_size, rng)?;
    info!(
        difficulty = settings.difficulty.name(),
        grid_size = settings.grid_size,
        seed = ?cli.seed,
        "serpent starting"
    );

    let mut app = App {
        screen: Screen::Menu,
        settings,
        file_settings,
        leaderboard: Leaderboard::load(),
        menu: MainMenu::new(),
        game,
        name_input: NameInput::new(),
        bell: TerminalBell::new(settings.sound_enabled),
        best_before_run: 0,
        last_rank: None,
        quit: false,
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("serpent exiting");
    result
}

/// Log to ~/.serpent/serpent.log. The terminal belongs to the UI, so
/// logging is skipped entirely if the file can't be opened.
fn init_logging() {
    let file = match data_path(LOG_FILE)
        .and_then(|path| OpenOptions::new().create(true).append(true).open(path))
    {
        Ok(file) => file,
        Err(_) => return,
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "serpent=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
}

fn print_scores(leaderboard: &Leaderboard) {
    if leaderboard.is_empty() {
        println!("No scores recorded yet.");
        return;
    }
    println!("{:>2}  {:<16}  {:>6}  {:<6}  Date", "#", "Name", "Score", "Level");
    for (i, entry) in leaderboard.entries().iter().enumerate() {
        println!(
            "{:>2}  {:<16}  {:>6}  {:<6}  {}",
            i + 1,
            entry.name,
            entry.score,
            entry.difficulty.map(|d| d.name()).unwrap_or("-"),
            entry.date_label()
        );
    }
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let mut frame_clock = FrameClock::new(Instant::now());

    while !app.quit {
        terminal.draw(|f| draw(f, app))?;

        if event::poll(Duration::from_millis(FRAME_POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if is_quit_key(&key) {
                        break;
                    }
                    handle_key(app, &key);
                }
            }
        }

        let dt_ms = frame_clock.elapsed_ms(Instant::now());

        if app.screen == Screen::Game {
            let events = app.game.update(dt_ms);
            handle_game_events(app, &events);
        }
    }
    Ok(())
}

fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.size();
    match app.screen {
        Screen::Menu => ui::menu_scene::render_menu_scene(
            frame,
            area,
            &app.menu,
            &app.settings,
            app.leaderboard.high_score(),
        ),
        Screen::Game => ui::game_scene::render_game_scene(
            frame,
            area,
            &app.game.snapshot(),
            app.leaderboard.high_score(),
        ),
        Screen::NameEntry => ui::name_entry::render_name_entry(
            frame,
            area,
            &app.name_input,
            app.game.score(),
            app.leaderboard.qualifies(app.game.score()),
        ),
        Screen::GameOver => ui::game_scene::render_game_over_scene(
            frame,
            area,
            &app.game.snapshot(),
            app.best_before_run,
            app.last_rank,
        ),
        Screen::Leaderboard { .. } => ui::leaderboard_scene::render_leaderboard_scene(
            frame,
            area,
            &app.leaderboard,
            app.last_rank,
        ),
    }
}

fn handle_key(app: &mut App, key: &KeyEvent) {
    match app.screen {
        Screen::Menu => {
            let input = map_menu_input(key);
            let before = app.settings;
            match app.menu.process_input(input, &mut app.settings) {
                Some(MenuAction::StartGame) => start_run(app),
                Some(MenuAction::ShowLeaderboard) => {
                    app.last_rank = None;
                    app.screen = Screen::Leaderboard { back: Back::Menu };
                }
                Some(MenuAction::SettingsChanged) => {
                    app.bell.enabled = app.settings.sound_enabled;
                    app.game.set_difficulty(app.settings.difficulty);
                    app.file_settings =
                        app.file_settings.merge_changes(&before, &app.settings);
                    if let Err(e) = app.file_settings.save() {
                        warn!(error = %e, "failed to save settings");
                    }
                }
                Some(MenuAction::Quit) => app.quit = true,
                None => {}
            }
        }
        Screen::Game => {
            // Leaving mid-run abandons it; the next start resets everything.
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
                && app.game.state() != RunState::Running
            {
                app.screen = Screen::Menu;
                return;
            }
            let events = process_input(&mut app.game, map_game_input(key));
            handle_game_events(app, &events);
        }
        Screen::NameEntry => match app.name_input.handle_key(key) {
            NameEntryOutcome::Editing => {}
            NameEntryOutcome::Submitted(name) => {
                record_score(app, &name);
                app.screen = Screen::GameOver;
            }
            NameEntryOutcome::Skipped => app.screen = Screen::GameOver,
        },
        Screen::GameOver => match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => start_run(app),
            KeyCode::Char('l') | KeyCode::Char('L') => {
                app.screen = Screen::Leaderboard {
                    back: Back::GameOver,
                }
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc | KeyCode::Enter => {
                app.screen = Screen::Menu
            }
            _ => {}
        },
        Screen::Leaderboard { back } => {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q')
            ) {
                app.screen = match back {
                    Back::Menu => Screen::Menu,
                    Back::GameOver => Screen::GameOver,
                };
            }
        }
    }
}

fn start_run(app: &mut App) {
    app.game.set_difficulty(app.settings.difficulty);
    app.best_before_run = app.leaderboard.high_score();
    app.last_rank = None;
    let events = app.game.start();
    handle_game_events(app, &events);
    app.screen = Screen::Game;
}

fn handle_game_events(app: &mut App, events: &[GameEvent]) {
    audio::notify(&mut app.bell, events);

    for event in events {
        match event {
            GameEvent::Started { .. } => {
                app.best_before_run = app.leaderboard.high_score();
                app.last_rank = None;
                app.screen = Screen::Game;
            }
            GameEvent::GameOver { final_score, .. } => {
                // Every run gets the name prompt; record() drops scores
                // that miss the table.
                debug!(
                    final_score = *final_score,
                    qualifies = app.leaderboard.qualifies(*final_score),
                    "run over"
                );
                app.name_input.reset();
                app.screen = Screen::NameEntry;
            }
            _ => {}
        }
    }
}

fn record_score(app: &mut App, name: &str) {
    let reason = match app.game.state() {
        RunState::GameOver { reason } => reason,
        _ => return,
    };
    let entry = LeaderboardEntry::new(name, app.game.score(), app.game.difficulty(), reason);
    app.last_rank = app.leaderboard.record(entry);
    if let Err(e) = app.leaderboard.save() {
        warn!(error = %e, "failed to save leaderboard");
    }
}
