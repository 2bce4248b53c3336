//! Game Events
//!
//! Emitted by the controller at each phase transition so hosts can react
//! (sound cues, logging, network relays) without polling state.

use serde::{Serialize, Deserialize};

use crate::game::player::PlayerId;
use crate::game::state::GameOutcome;

/// Game event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEventData {
    /// A round began; tanks are reset and frozen.
    RoundStarted {
        /// Round number, 1-based.
        round: u32,
    },

    /// Players took control.
    RoundPlaying {
        /// Round number.
        round: u32,
    },

    /// A round was resolved.
    RoundEnded {
        /// Round number.
        round: u32,
        /// Last tank standing, `None` for a draw.
        winner: Option<PlayerId>,
    },

    /// The game finished.
    GameEnded {
        /// How it finished.
        outcome: GameOutcome,
        /// Rounds played, including any interrupted one.
        rounds_played: u32,
    },

    /// State was reinitialised for a new game.
    GameRestarted,
}

/// A game event stamped with the frame it happened on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Frame when the event occurred
    pub frame: u64,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(frame: u64, data: GameEventData) -> Self {
        Self { frame, data }
    }

    /// Create round started event.
    pub fn round_started(frame: u64, round: u32) -> Self {
        Self::new(frame, GameEventData::RoundStarted { round })
    }

    /// Create round playing event.
    pub fn round_playing(frame: u64, round: u32) -> Self {
        Self::new(frame, GameEventData::RoundPlaying { round })
    }

    /// Create round ended event.
    pub fn round_ended(frame: u64, round: u32, winner: Option<PlayerId>) -> Self {
        Self::new(frame, GameEventData::RoundEnded { round, winner })
    }

    /// Create game ended event.
    pub fn game_ended(frame: u64, outcome: GameOutcome, rounds_played: u32) -> Self {
        Self::new(frame, GameEventData::GameEnded { outcome, rounds_played })
    }

    /// Create game restarted event.
    pub fn game_restarted(frame: u64) -> Self {
        Self::new(frame, GameEventData::GameRestarted)
    }

    /// Serialize for logs and relays.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rules::VictoryReason;

    #[test]
    fn test_event_json_shape() {
        let event = GameEvent::round_ended(42, 3, Some(PlayerId(2)));
        let json = event.to_json().unwrap();

        assert_eq!(json, r#"{"frame":42,"data":{"type":"round_ended","round":3,"winner":2}}"#);
    }

    #[test]
    fn test_game_ended_json() {
        let outcome = GameOutcome::Winner {
            player: PlayerId(1),
            reason: VictoryReason::RoundsWon,
        };
        let json = GameEvent::game_ended(7, outcome, 5).to_json().unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(back.data, GameEventData::GameEnded { outcome, rounds_played: 5 });
    }
}
