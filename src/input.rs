//! Keyboard mapping from raw key events to game commands
//!
//! Only key presses matter; each press yields at most one input.

use crate::game::Command;
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Start,
    Quit,
}

/// Key bindings resolved to key codes - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct InputMapper {
    move_left: Vec<KeyCode>,
    move_right: Vec<KeyCode>,
    drop: Vec<KeyCode>,
    rotate: Vec<KeyCode>,
    start: Vec<KeyCode>,
    quit: Vec<KeyCode>,
}

impl InputMapper {
    /// Parse a key string into KeyCode. Unknown names bind nothing
    fn parse_key(s: &str) -> Option<KeyCode> {
        let lower = s.to_lowercase();
        let code = match lower.as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => {
                        tracing::warn!("Unknown key name in bindings: {:?}", s);
                        return None;
                    }
                }
            }
        };
        Some(code)
    }

    /// Parse a list of key strings into KeyCodes
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter().filter_map(|s| Self::parse_key(s)).collect()
    }

    /// Create the mapper from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let keys = &settings.keys;
        Self {
            move_left: Self::parse_keys(&keys.move_left),
            move_right: Self::parse_keys(&keys.move_right),
            drop: Self::parse_keys(&keys.drop),
            rotate: Self::parse_keys(&keys.rotate),
            start: Self::parse_keys(&keys.start),
            quit: Self::parse_keys(&keys.quit),
        }
    }

    /// Map a key event; None for releases and unbound keys
    pub fn map(&self, key: KeyEvent) -> Option<Input> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Input::Quit);
        }

        let code = normalize_key(key.code);

        if self.move_left.contains(&code) {
            Some(Input::Command(Command::MoveLeft))
        } else if self.move_right.contains(&code) {
            Some(Input::Command(Command::MoveRight))
        } else if self.drop.contains(&code) {
            Some(Input::Command(Command::Drop))
        } else if self.rotate.contains(&code) {
            Some(Input::Command(Command::Rotate))
        } else if self.start.contains(&code) {
            Some(Input::Start)
        } else if self.quit.contains(&code) {
            Some(Input::Quit)
        } else {
            None
        }
    }
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
