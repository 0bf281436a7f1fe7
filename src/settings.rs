//! Settings loaded from TOML
//!
//! Reads ~/.config/blockfall/settings.toml (or platform equivalent).
//! Anything missing falls back to the defaults below.

use crate::game::GameConfig;
use crate::score::ScoringRules;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Smallest board the spawn position still fits on
pub const MIN_ROWS: usize = 4;
pub const MIN_COLUMNS: usize = 6;
pub const MAX_ROWS: usize = 100;
pub const MAX_COLUMNS: usize = 100;
/// Fastest gravity accepted
pub const MIN_SPEED_MS: u64 = 16;

/// Game settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub board: BoardSettings,
    pub gameplay: GameplaySettings,
    pub scoring: ScoringRules,
    pub keys: KeyBindings,
    pub visual: VisualSettings,
}

/// Board dimensions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    pub rows: usize,
    pub columns: usize,
}

/// Gameplay settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Milliseconds between gravity ticks
    pub speed_ms: u64,
}

/// Key bindings (stored as strings for easy editing)
/// Each action can have one or more keys bound to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_left: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_right: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub rotate: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub start: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub quit: Vec<String>,
}

/// Deserialize keys as either a single string or array of strings
fn deserialize_keys<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct KeysVisitor;

    impl<'de> Visitor<'de> for KeysVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or array of strings")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut keys = Vec::new();
            while let Some(key) = seq.next_element::<String>()? {
                keys.push(key);
            }
            Ok(keys)
        }
    }

    deserializer.deserialize_any(KeysVisitor)
}

/// Serialize keys: single key as string, multiple as array
fn serialize_keys<S>(keys: &Vec<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;

    if let [key] = keys.as_slice() {
        serializer.serialize_str(key)
    } else {
        let mut seq = serializer.serialize_seq(Some(keys.len()))?;
        for key in keys {
            seq.serialize_element(key)?;
        }
        seq.end()
    }
}

/// Visual settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Block style: "solid", "bracket", "round"
    pub block_style: String,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            rows: crate::board::DEFAULT_ROWS,
            columns: crate::board::DEFAULT_COLUMNS,
        }
    }
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self { speed_ms: 1000 }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec!["Left".to_string()],
            move_right: vec!["Right".to_string()],
            drop: vec!["Down".to_string()],
            rotate: vec!["Up".to_string()],
            start: vec!["Enter".to_string(), "s".to_string()],
            quit: vec!["q".to_string(), "Esc".to_string()],
        }
    }
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            block_style: "solid".to_string(),
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "blockfall", "blockfall")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from file, or fall back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory, using default settings");
            return Self::default();
        };

        let settings = match fs::read_to_string(&path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(settings) => {
                    info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    warn!("Ignoring invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                info!("No settings at {} ({}), using defaults", path.display(), e);
                Self::default()
            }
        };
        settings.clamped()
    }

    /// Parse settings from TOML text
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Pull out-of-range values back into range
    pub fn clamped(mut self) -> Self {
        let rows = self.board.rows.clamp(MIN_ROWS, MAX_ROWS);
        let columns = self.board.columns.clamp(MIN_COLUMNS, MAX_COLUMNS);
        if (rows, columns) != (self.board.rows, self.board.columns) {
            warn!(
                "Board {}x{} out of range, using {}x{}",
                self.board.rows, self.board.columns, rows, columns
            );
            self.board.rows = rows;
            self.board.columns = columns;
        }
        if self.gameplay.speed_ms < MIN_SPEED_MS {
            warn!(
                "speed_ms={} too fast, using {}",
                self.gameplay.speed_ms, MIN_SPEED_MS
            );
            self.gameplay.speed_ms = MIN_SPEED_MS;
        }
        self
    }

    /// Engine parameters described by these settings
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            rows: self.board.rows,
            columns: self.board.columns,
            speed: Duration::from_millis(self.gameplay.speed_ms),
            scoring: self.scoring,
        }
    }
}

impl VisualSettings {
    /// Get the filled and empty cell glyphs based on style
    pub fn block_chars(&self) -> (&'static str, &'static str) {
        match self.block_style.as_str() {
            "bracket" => ("[]", " ."),
            "round" => ("()", " ."),
            _ => ("██", "  "), // "solid" or default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.game_config(), GameConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let settings = Settings::parse(
            r#"
            [board]
            columns = 12

            [scoring]
            per_merge = 10
            "#,
        )
        .unwrap();
        assert_eq!(settings.board.rows, 20);
        assert_eq!(settings.board.columns, 12);
        assert_eq!(settings.scoring.per_merge, 10);
        assert_eq!(settings.scoring.per_line, 100);
        assert_eq!(settings.gameplay.speed_ms, 1000);
    }

    #[test]
    fn test_keys_accept_string_or_array() {
        let settings = Settings::parse(
            r#"
            [keys]
            move_left = "a"
            rotate = ["Up", "w"]
            "#,
        )
        .unwrap();
        assert_eq!(settings.keys.move_left, vec!["a"]);
        assert_eq!(settings.keys.rotate, vec!["Up", "w"]);
        assert_eq!(settings.keys.drop, vec!["Down"]);
    }

    #[test]
    fn test_keys_round_trip_through_toml() {
        let settings = Settings::default();
        let text = toml::to_string_pretty(&settings).unwrap();
        assert!(text.contains("move_left = \"Left\""));
        assert_eq!(Settings::parse(&text).unwrap(), settings);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        assert!(Settings::parse("[board]\nrows = \"tall\"").is_err());
    }

    #[test]
    fn test_clamped() {
        let mut settings = Settings::default();
        settings.board.rows = 1;
        settings.board.columns = 1000;
        settings.gameplay.speed_ms = 0;
        let settings = settings.clamped();
        assert_eq!(settings.board.rows, MIN_ROWS);
        assert_eq!(settings.board.columns, MAX_COLUMNS);
        assert_eq!(settings.gameplay.speed_ms, MIN_SPEED_MS);
    }

    #[test]
    fn test_block_chars() {
        let mut visual = VisualSettings::default();
        assert_eq!(visual.block_chars().0, "██");
        visual.block_style = "bracket".to_string();
        assert_eq!(visual.block_chars().0, "[]");
    }
}
