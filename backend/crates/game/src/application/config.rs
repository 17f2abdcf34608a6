//! Application Configuration
//!
//! Configuration for the game application layer.

use std::env;

/// Environment variable overriding [`GameConfig::win_message`]
pub const WIN_MESSAGE_ENV: &str = "GAME_WIN_MESSAGE";

/// Game application configuration
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Message recorded and returned when a guess matches the secret
    pub win_message: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            win_message: "Congratulations! You guessed the number.".to_string(),
        }
    }
}

impl GameConfig {
    /// Defaults, overridden by environment variables that are set and non-empty
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            win_message: env::var(WIN_MESSAGE_ENV)
                .ok()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(defaults.win_message),
        }
    }
}
