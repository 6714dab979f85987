//! Key mapping for each screen, plus the name entry buffer.
//!
//! Keeps crossterm key codes out of the game and menu state machines.

use crate::core::constants::PLAYER_NAME_MAX_LEN;
use crate::game::{Direction, GameInput};
use crate::leaderboard::validate_player_name;
use crate::menu::MenuInput;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Ctrl+C quits from any screen.
pub fn is_quit_key(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Map a key to a game input. Arrows or WASD steer; Esc, Space and `p`
/// toggle pause; `r` restarts.
pub fn map_game_input(key: &KeyEvent) -> GameInput {
    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => GameInput::Turn(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            GameInput::Turn(Direction::Down)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            GameInput::Turn(Direction::Left)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            GameInput::Turn(Direction::Right)
        }
        KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
            GameInput::TogglePause
        }
        KeyCode::Char('r') | KeyCode::Char('R') => GameInput::Restart,
        _ => GameInput::Other,
    }
}

pub fn map_menu_input(key: &KeyEvent) -> MenuInput {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => MenuInput::Up,
        KeyCode::Down | KeyCode::Char('j') => MenuInput::Down,
        KeyCode::Left => MenuInput::Left,
        KeyCode::Right => MenuInput::Right,
        KeyCode::Enter | KeyCode::Char(' ') => MenuInput::Select,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => MenuInput::Back,
        _ => MenuInput::Other,
    }
}

/// Outcome of a key press on the name entry screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameEntryOutcome {
    Editing,
    /// A valid name was confirmed.
    Submitted(String),
    /// Empty input confirmed, or Esc: don't record the score.
    Skipped,
}

/// Single-line text buffer with a cursor, counted in chars.
#[derive(Debug, Clone, Default)]
pub struct NameInput {
    pub text: String,
    pub cursor_position: usize,
    pub validation_error: Option<String>,
}

impl NameInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> NameEntryOutcome {
        match key.code {
            KeyCode::Char(c) => self.handle_char_input(c),
            KeyCode::Backspace => self.handle_backspace(),
            KeyCode::Left => self.cursor_position = self.cursor_position.saturating_sub(1),
            KeyCode::Right => {
                self.cursor_position = (self.cursor_position + 1).min(self.text.chars().count())
            }
            KeyCode::Enter => return self.submit(),
            KeyCode::Esc => return NameEntryOutcome::Skipped,
            _ => {}
        }
        NameEntryOutcome::Editing
    }

    pub fn handle_char_input(&mut self, c: char) {
        if c.is_control() || self.text.chars().count() >= PLAYER_NAME_MAX_LEN {
            return;
        }
        let byte_idx = self.byte_index(self.cursor_position);
        self.text.insert(byte_idx, c);
        self.cursor_position += 1;
        self.validate();
    }

    pub fn handle_backspace(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let byte_idx = self.byte_index(self.cursor_position - 1);
        self.text.remove(byte_idx);
        self.cursor_position -= 1;
        self.validate();
    }

    pub fn validate(&mut self) {
        self.validation_error = if self.text.trim().is_empty() {
            None
        } else {
            validate_player_name(&self.text).err()
        };
    }

    pub fn submit(&mut self) -> NameEntryOutcome {
        if self.text.trim().is_empty() {
            return NameEntryOutcome::Skipped;
        }
        self.validate();
        match self.validation_error {
            Some(_) => NameEntryOutcome::Editing,
            None => NameEntryOutcome::Submitted(self.text.trim().to_string()),
        }
    }

    pub fn reset(&mut self) {
        self.text.clear();
        self.cursor_position = 0;
        self.validation_error = None;
    }

    /// Text with `_` marking the cursor.
    pub fn display_text(&self) -> String {
        let byte_idx = self.byte_index(self.cursor_position);
        format!("{}_{}", &self.text[..byte_idx], &self.text[byte_idx..])
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}
