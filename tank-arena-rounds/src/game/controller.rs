//! Round Controller
//!
//! The round loop as an explicit state machine advanced once per frame:
//!
//! ```text
//! RoundStarting --start delay--> RoundPlaying --one tank left--> RoundEnding
//!       ^                             |                               |
//!       +---------- no winner --------+------------ end delay --------+
//!                                     |                               |
//!                              clock expired                   winner decided
//!                                     v                               v
//!                                  GameOver <-------------------------+
//!                                     |
//!                             restart delay -> reset_state()
//! ```
//!
//! The game clock runs in every phase until the game ends. If it expires
//! before a winner is decided the game ends at once with nobody winning.

use std::time::Duration;

use tracing::{info, warn};

use crate::game::arena::{ActorHandle, Arena, CameraRig, Presentation};
use crate::game::config::{ConfigError, GameConfig};
use crate::game::events::GameEvent;
use crate::game::messages;
use crate::game::player::{Player, PlayerId, PlayerSetup};
use crate::game::rules;
use crate::game::state::{GameOutcome, GameState, RoundPhase};
use crate::game::timer;
use crate::core::hash::StateHash;

/// Delay between game over and the automatic restart.
pub const RESTART_DELAY: Duration = Duration::from_secs(10);

/// Roster size the win/loss rules are defined for.
pub const REQUIRED_PLAYERS: usize = 2;

/// Controller construction errors.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// Roster is not a duel.
    #[error("Expected exactly {expected} players, got {found}")]
    PlayerCount {
        /// Required roster size.
        expected: usize,
        /// Roster size supplied.
        found: usize,
    },

    /// Config failed validation.
    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),
}

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Whether the controller is sitting in game over after this tick
    pub game_over: bool,
}

/// Sequences rounds for a two-player game.
///
/// Owns the players and all progression state; tanks, camera and text are
/// reached through the collaborator traits.
pub struct RoundController<A, C, P> {
    config: GameConfig,
    players: Vec<Player>,
    state: GameState,
    phase: RoundPhase,
    arena: A,
    camera: C,
    presentation: P,
    pending_events: Vec<GameEvent>,
}

impl<A, C, P> RoundController<A, C, P>
where
    A: Arena,
    C: CameraRig,
    P: Presentation,
{
    /// Spawn the tanks, aim the camera and enter the first RoundStarting.
    pub fn new(
        config: GameConfig,
        roster: &[PlayerSetup],
        mut arena: A,
        mut camera: C,
        presentation: P,
    ) -> Result<Self, ControllerError> {
        config.validate()?;

        if roster.len() != REQUIRED_PLAYERS {
            return Err(ControllerError::PlayerCount {
                expected: REQUIRED_PLAYERS,
                found: roster.len(),
            });
        }

        let players: Vec<Player> = roster
            .iter()
            .enumerate()
            .map(|(i, setup)| {
                let actor = arena.spawn(&setup.spawn);
                Player::new(PlayerId(i as u8 + 1), setup, actor)
            })
            .collect();

        let targets: Vec<ActorHandle> = players.iter().map(|p| p.actor).collect();
        camera.set_targets(&targets);

        info!(
            "Game configured: first to {} rounds, {} losses max, {:.0}s on the clock",
            config.rounds_to_win, config.max_losses, config.max_game_time_secs
        );

        let phase = RoundPhase::RoundStarting {
            remaining: config.start_delay(),
        };
        let mut controller = Self {
            config,
            players,
            state: GameState::new(),
            phase,
            arena,
            camera,
            presentation,
            pending_events: Vec::new(),
        };
        controller.enter_round_starting();

        Ok(controller)
    }

    // =========================================================================
    // Tick
    // =========================================================================

    /// Advance by one frame of `dt` game time.
    pub fn tick(&mut self, dt: Duration) -> TickResult {
        self.state.frame += 1;

        #[cfg(feature = "debug-tracing")]
        tracing::debug!(frame = self.state.frame, phase = self.phase.name(), "tick");

        let timed_out = !self.state.game_ended && self.update_clock(dt);

        if !timed_out {
            self.step_phase(dt);
        }

        TickResult {
            events: std::mem::take(&mut self.pending_events),
            game_over: self.is_game_over(),
        }
    }

    /// Returns true if the clock just ended the game.
    fn update_clock(&mut self, dt: Duration) -> bool {
        self.state.elapsed = self.state.elapsed.saturating_add(dt);

        let max = self.config.max_game_time();
        let readout = timer::readout(self.state.elapsed, max);
        self.presentation.set_timer(&readout.text, readout.color);

        if self.state.elapsed < max || self.state.time_up {
            return false;
        }

        self.state.time_up = true;

        if self.state.game_winner.is_some() {
            // Already decided this round; let RoundEnding finish
            return false;
        }

        warn!("Game clock expired in round {}, both players lose", self.state.round_number);
        self.state.set_game_winner(None);
        self.enter_game_over();
        true
    }

    fn step_phase(&mut self, dt: Duration) {
        match self.phase {
            RoundPhase::RoundStarting { remaining } => {
                let remaining = remaining.saturating_sub(dt);
                if remaining.is_zero() {
                    self.enter_round_playing();
                } else {
                    self.phase = RoundPhase::RoundStarting { remaining };
                }
            }
            RoundPhase::RoundPlaying => self.poll_round(),
            RoundPhase::RoundEnding { remaining } => {
                let remaining = remaining.saturating_sub(dt);
                if !remaining.is_zero() {
                    self.phase = RoundPhase::RoundEnding { remaining };
                } else if self.state.game_winner.is_some() || self.state.game_ended {
                    self.enter_game_over();
                } else {
                    self.enter_round_starting();
                }
            }
            RoundPhase::GameOver { restart_in } => {
                let restart_in = restart_in.saturating_sub(dt);
                if restart_in.is_zero() {
                    self.reset_state();
                } else {
                    self.phase = RoundPhase::GameOver { restart_in };
                }
            }
        }
    }

    /// Per-frame check while tanks are fighting.
    fn poll_round(&mut self) {
        if self.state.time_up || self.state.game_ended {
            self.state.game_ended = true;
            self.enter_game_over();
            return;
        }

        if rules::at_most_one_alive(&self.alive_flags()) {
            self.enter_round_ending();
        }
    }

    // =========================================================================
    // Phase entry
    // =========================================================================

    fn enter_round_starting(&mut self) {
        for player in &self.players {
            self.arena.reset(player.actor);
            self.arena.disable_control(player.actor);
        }
        self.camera.snap_to_start();

        self.state.round_number += 1;
        let round = self.state.round_number;
        self.presentation.set_message(&messages::round_banner(round));

        info!("Round {} starting", round);
        self.push_event(GameEvent::round_started(self.state.frame, round));

        self.phase = RoundPhase::RoundStarting {
            remaining: self.config.start_delay(),
        };
    }

    fn enter_round_playing(&mut self) {
        self.set_control(true);
        self.presentation.set_message("");

        self.push_event(GameEvent::round_playing(self.state.frame, self.state.round_number));
        self.phase = RoundPhase::RoundPlaying;

        // First check happens on the frame play begins
        self.poll_round();
    }

    fn enter_round_ending(&mut self) {
        self.set_control(false);

        self.state.round_winner = None;
        let winner = rules::round_winner(&self.players, &self.alive_flags());
        self.state.round_winner = winner;

        rules::apply_round_result(&mut self.players, winner);
        self.state
            .set_game_winner(rules::resolve_game_winner(&self.players, &self.config));

        let message = messages::round_end(&self.players, winner, self.state.game_winner);
        self.presentation.set_message(&message);

        let round = self.state.round_number;
        match winner {
            Some(id) => info!("Round {} won by player {}", round, id.number()),
            None => info!("Round {} drawn", round),
        }
        self.push_event(GameEvent::round_ended(self.state.frame, round, winner));

        self.phase = RoundPhase::RoundEnding {
            remaining: self.config.end_delay(),
        };
    }

    fn enter_game_over(&mut self) {
        self.state.game_ended = true;
        self.set_control(false);

        let outcome = self.state.outcome();
        let elapsed = self.state.elapsed;
        let message = match outcome {
            GameOutcome::Winner { player, .. } => {
                messages::game_over(&self.players, player, &self.config, elapsed)
            }
            GameOutcome::Tie => messages::perfect_tie(&self.players, elapsed),
            GameOutcome::Timeout => messages::time_expired(&self.players, elapsed),
        };
        self.presentation.set_message(&message);

        info!("Game over after {} rounds: {:?}", self.state.round_number, outcome);
        self.push_event(GameEvent::game_ended(
            self.state.frame,
            outcome,
            self.state.round_number,
        ));

        self.phase = RoundPhase::GameOver {
            restart_in: RESTART_DELAY,
        };
    }

    // =========================================================================
    // External control
    // =========================================================================

    /// Force the game into game over. With no winner decided it is a tie.
    pub fn end_game(&mut self) {
        if self.is_game_over() {
            return;
        }
        info!("Game ended externally in round {}", self.state.round_number);
        self.state.game_ended = true;
        self.enter_game_over();
    }

    /// Reinitialise all progression in place and begin a fresh game.
    pub fn reset_state(&mut self) {
        self.state = GameState::new();
        for player in &mut self.players {
            player.reset_counters();
        }

        info!("Game restarting");
        self.push_event(GameEvent::game_restarted(self.state.frame));
        self.enter_round_starting();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Game parameters.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Players in roster order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Look up a player.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Progression state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current phase.
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Whether the game has finished and is waiting to restart.
    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, RoundPhase::GameOver { .. })
    }

    /// Final outcome, once the game is over.
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.is_game_over().then(|| self.state.outcome())
    }

    /// Hash of progression, phase and tallies.
    pub fn compute_hash(&self) -> StateHash {
        self.state.compute_hash(self.phase, &self.players)
    }

    /// Arena collaborator.
    pub fn arena(&self) -> &A {
        &self.arena
    }

    /// Arena collaborator, for hosts that step it alongside the controller.
    pub fn arena_mut(&mut self) -> &mut A {
        &mut self.arena
    }

    /// Camera collaborator.
    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// Presentation collaborator.
    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn alive_flags(&self) -> Vec<bool> {
        self.players
            .iter()
            .map(|p| self.arena.is_alive(p.actor))
            .collect()
    }

    fn set_control(&mut self, enabled: bool) {
        for player in &self.players {
            if enabled {
                self.arena.enable_control(player.actor);
            } else {
                self.arena.disable_control(player.actor);
            }
        }
    }

    fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================
