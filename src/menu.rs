//! Main menu state machine.

use crate::game::Difficulty;
use crate::settings::Settings;

/// Input actions for the main menu (UI-agnostic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    Up,
    Down,
    Select, // Enter / Space
    Left,
    Right,
    Back, // Esc / q
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Start,
    Difficulty,
    Leaderboard,
    Sound,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 5] = [
        MenuItem::Start,
        MenuItem::Difficulty,
        MenuItem::Leaderboard,
        MenuItem::Sound,
        MenuItem::Quit,
    ];

    /// Display label, including the current value for toggles.
    pub fn label(&self, settings: &Settings) -> String {
        match self {
            Self::Start => "Start Game".to_string(),
            Self::Difficulty => format!("Difficulty: {}", settings.difficulty.name()),
            Self::Leaderboard => "Leaderboard".to_string(),
            Self::Sound => format!(
                "Sound: {}",
                if settings.sound_enabled { "On" } else { "Off" }
            ),
            Self::Quit => "Quit".to_string(),
        }
    }
}

/// What the caller should do after a menu input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    StartGame,
    ShowLeaderboard,
    /// A setting changed and should be saved.
    SettingsChanged,
    Quit,
}

#[derive(Debug, Clone, Default)]
pub struct MainMenu {
    pub selected: usize,
}

impl MainMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_item(&self) -> MenuItem {
        MenuItem::ALL[self.selected.min(MenuItem::ALL.len() - 1)]
    }

    pub fn navigate_up(&mut self) {
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(MenuItem::ALL.len() - 1);
    }

    pub fn navigate_down(&mut self) {
        self.selected = (self.selected + 1) % MenuItem::ALL.len();
    }

    /// Process a menu input. Toggles edit `settings` in place.
    pub fn process_input(&mut self, input: MenuInput, settings: &mut Settings) -> Option<MenuAction> {
        match input {
            MenuInput::Up => {
                self.navigate_up();
                None
            }
            MenuInput::Down => {
                self.navigate_down();
                None
            }
            MenuInput::Select => match self.selected_item() {
                MenuItem::Start => Some(MenuAction::StartGame),
                MenuItem::Leaderboard => Some(MenuAction::ShowLeaderboard),
                MenuItem::Quit => Some(MenuAction::Quit),
                MenuItem::Difficulty | MenuItem::Sound => self.cycle(settings, true),
            },
            MenuInput::Right => self.cycle(settings, true),
            MenuInput::Left => self.cycle(settings, false),
            MenuInput::Back => Some(MenuAction::Quit),
            MenuInput::Other => None,
        }
    }

    fn cycle(&self, settings: &mut Settings, forward: bool) -> Option<MenuAction> {
        match self.selected_item() {
            MenuItem::Difficulty => {
                settings.difficulty = if forward {
                    settings.difficulty.next()
                } else {
                    previous_difficulty(settings.difficulty)
                };
                Some(MenuAction::SettingsChanged)
            }
            MenuItem::Sound => {
                settings.sound_enabled = !settings.sound_enabled;
                Some(MenuAction::SettingsChanged)
            }
            _ => None,
        }
    }
}

fn previous_difficulty(difficulty: Difficulty) -> Difficulty {
    difficulty.next().next()
}
