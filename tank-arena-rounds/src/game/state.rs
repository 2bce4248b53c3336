//! Game State Definitions
//!
//! Round phase and per-game progression. Mutated only by the controller's
//! phase transitions.

use std::time::Duration;

use serde::{Serialize, Deserialize};

use crate::core::hash::{StateHash, StateHasher, compute_state_hash};
use crate::game::player::{Player, PlayerId};
use crate::game::rules::VictoryReason;

// =============================================================================
// ROUND PHASE
// =============================================================================

/// Current phase of the round loop.
///
/// Waiting phases carry their armed timer; the controller counts it down by
/// each tick's delta instead of sleeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Tanks reset and frozen, round banner showing.
    RoundStarting {
        /// Time until play begins.
        remaining: Duration,
    },
    /// Tanks under player control.
    RoundPlaying,
    /// Round resolved, result showing.
    RoundEnding {
        /// Time until the next round or game over.
        remaining: Duration,
    },
    /// Game decided, final summary showing.
    GameOver {
        /// Time until the game restarts from scratch.
        restart_in: Duration,
    },
}

impl RoundPhase {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            RoundPhase::RoundStarting { .. } => "round_starting",
            RoundPhase::RoundPlaying => "round_playing",
            RoundPhase::RoundEnding { .. } => "round_ending",
            RoundPhase::GameOver { .. } => "game_over",
        }
    }

    /// Feed the phase and its armed timer into a state hash.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        let (tag, timer) = match *self {
            RoundPhase::RoundStarting { remaining } => (0, remaining),
            RoundPhase::RoundPlaying => (1, Duration::ZERO),
            RoundPhase::RoundEnding { remaining } => (2, remaining),
            RoundPhase::GameOver { restart_in } => (3, restart_in),
        };
        hasher.update_u8(tag);
        hasher.update_u64(timer.as_millis() as u64);
    }
}

// =============================================================================
// GAME OUTCOME
// =============================================================================

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// One player took the game.
    Winner {
        /// Winning player.
        player: PlayerId,
        /// Threshold that decided it.
        reason: VictoryReason,
    },
    /// Ended without either threshold being met.
    Tie,
    /// The clock ran out; both players lose.
    Timeout,
}

// =============================================================================
// GAME STATE
// =============================================================================

/// Progression of the current game.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Ticks processed since the game (re)started.
    pub frame: u64,
    /// Current round, 0 before the first RoundStarting.
    pub round_number: u32,
    /// Game time accumulated while the game is active.
    pub elapsed: Duration,
    /// The game clock has expired.
    pub time_up: bool,
    /// No further rounds will be played.
    pub game_ended: bool,
    /// Winner of the round being resolved. Cleared every RoundEnding.
    pub round_winner: Option<PlayerId>,
    /// Winner of the game, if decided.
    pub game_winner: Option<PlayerId>,
    /// Why `game_winner` won.
    pub victory_reason: Option<VictoryReason>,
}

impl GameState {
    /// Fresh state for a new game.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the game winner.
    pub fn set_game_winner(&mut self, winner: Option<(PlayerId, VictoryReason)>) {
        self.game_winner = winner.map(|(id, _)| id);
        self.victory_reason = winner.map(|(_, reason)| reason);
    }

    /// Outcome as it stands now.
    pub fn outcome(&self) -> GameOutcome {
        match (self.game_winner, self.victory_reason) {
            (Some(player), Some(reason)) => GameOutcome::Winner { player, reason },
            _ if self.time_up => GameOutcome::Timeout,
            _ => GameOutcome::Tie,
        }
    }

    /// Hash progression, the current phase and tallies for run comparison.
    pub fn compute_hash(&self, phase: RoundPhase, players: &[Player]) -> StateHash {
        compute_state_hash(self.frame, self.round_number, |hasher| {
            phase.hash_into(hasher);
            hasher.update_u64(self.elapsed.as_millis() as u64);
            hasher.update_bool(self.time_up);
            hasher.update_bool(self.game_ended);
            hasher.update_opt_u8(self.round_winner.map(|id| id.number()));
            hasher.update_opt_u8(self.game_winner.map(|id| id.number()));
            hasher.update_opt_u8(self.victory_reason.map(|r| r as u8));

            for player in players {
                player.hash_into(hasher);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new();
        assert_eq!(state.round_number, 0);
        assert_eq!(state.elapsed, Duration::ZERO);
        assert!(!state.time_up);
        assert!(!state.game_ended);
        assert_eq!(state.game_winner, None);
        assert_eq!(state.outcome(), GameOutcome::Tie);
    }

    #[test]
    fn test_outcome_variants() {
        let mut state = GameState::new();
        state.time_up = true;
        assert_eq!(state.outcome(), GameOutcome::Timeout);

        state.set_game_winner(Some((PlayerId(2), VictoryReason::OpponentLosses)));
        assert_eq!(
            state.outcome(),
            GameOutcome::Winner { player: PlayerId(2), reason: VictoryReason::OpponentLosses }
        );

        state.set_game_winner(None);
        assert_eq!(state.victory_reason, None);
        assert_eq!(state.outcome(), GameOutcome::Timeout);
    }

    #[test]
    fn test_hash_tracks_progression() {
        let a = GameState::new();
        let mut b = GameState::new();
        let phase = RoundPhase::RoundPlaying;
        assert_eq!(a.compute_hash(phase, &[]), b.compute_hash(phase, &[]));

        b.round_number = 1;
        assert_ne!(a.compute_hash(phase, &[]), b.compute_hash(phase, &[]));
    }

    #[test]
    fn test_hash_covers_victory_reason() {
        let phase = RoundPhase::GameOver { restart_in: Duration::from_secs(10) };
        let mut a = GameState::new();
        let mut b = GameState::new();
        a.set_game_winner(Some((PlayerId(1), VictoryReason::RoundsWon)));
        b.set_game_winner(Some((PlayerId(1), VictoryReason::OpponentLosses)));

        assert_ne!(a.compute_hash(phase, &[]), b.compute_hash(phase, &[]));
    }

    #[test]
    fn test_hash_covers_phase_and_timer() {
        let state = GameState::new();
        let starting = |ms| RoundPhase::RoundStarting { remaining: Duration::from_millis(ms) };

        assert_ne!(
            state.compute_hash(starting(1500), &[]),
            state.compute_hash(starting(1000), &[])
        );
        assert_ne!(
            state.compute_hash(RoundPhase::RoundPlaying, &[]),
            state.compute_hash(RoundPhase::RoundEnding { remaining: Duration::ZERO }, &[])
        );
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(RoundPhase::RoundPlaying.name(), "round_playing");
        assert_eq!(
            RoundPhase::GameOver { restart_in: Duration::from_secs(10) }.name(),
            "game_over"
        );
    }
}
