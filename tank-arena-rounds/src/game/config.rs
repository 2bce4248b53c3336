//! Game Configuration
//!
//! Numeric parameters fixed for the life of a game.

use std::time::Duration;

use serde::{Serialize, Deserialize};

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Could not parse the configuration document.
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A threshold that must be at least one was zero.
    #[error("{field} must be at least 1")]
    ZeroThreshold {
        /// Offending field.
        field: &'static str,
    },

    /// A delay or time limit was negative, NaN, infinite or too large for a `Duration`.
    #[error("{field} must be a non-negative number of seconds that fits a duration (got {value})")]
    InvalidSeconds {
        /// Offending field.
        field: &'static str,
        /// Value supplied.
        value: f32,
    },

    /// The game time cap must be strictly positive.
    #[error("max_game_time_secs must be greater than zero")]
    ZeroGameTime,
}

/// Round and game parameters.
///
/// Times are seconds, as they appear in config files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Rounds a player must win to take the game.
    pub rounds_to_win: u32,
    /// Losses after which a player's opponent takes the game.
    pub max_losses: u32,
    /// Pause between RoundStarting and RoundPlaying.
    pub start_delay_secs: f32,
    /// Pause after a round is resolved.
    pub end_delay_secs: f32,
    /// Total game time before both players lose to the clock.
    pub max_game_time_secs: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rounds_to_win: 5,
            max_losses: 5,
            start_delay_secs: 3.0,
            end_delay_secs: 3.0,
            max_game_time_secs: 240.0, // 4 minutes
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every parameter is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rounds_to_win == 0 {
            return Err(ConfigError::ZeroThreshold { field: "rounds_to_win" });
        }
        if self.max_losses == 0 {
            return Err(ConfigError::ZeroThreshold { field: "max_losses" });
        }

        check_seconds("start_delay_secs", self.start_delay_secs)?;
        check_seconds("end_delay_secs", self.end_delay_secs)?;
        check_seconds("max_game_time_secs", self.max_game_time_secs)?;

        if self.max_game_time_secs == 0.0 {
            return Err(ConfigError::ZeroGameTime);
        }

        Ok(())
    }

    /// Delay between RoundStarting and RoundPlaying.
    pub fn start_delay(&self) -> Duration {
        Duration::from_secs_f32(self.start_delay_secs)
    }

    /// Delay after RoundEnding.
    pub fn end_delay(&self) -> Duration {
        Duration::from_secs_f32(self.end_delay_secs)
    }

    /// Game time cap.
    pub fn max_game_time(&self) -> Duration {
        Duration::from_secs_f32(self.max_game_time_secs)
    }
}

/// Accepts exactly the values the `Duration` accessors can convert.
fn check_seconds(field: &'static str, value: f32) -> Result<(), ConfigError> {
    match Duration::try_from_secs_f32(value) {
        Ok(_) => Ok(()),
        Err(_) => Err(ConfigError::InvalidSeconds { field, value }),
    }
}
