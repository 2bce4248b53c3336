//! Game Logic Module
//!
//! Round sequencing and win/loss resolution. Engine-facing work goes through
//! the traits in `arena`.
//!
//! ## Module Structure
//!
//! - `arena`: Collaborator traits (tanks, camera, on-screen text)
//! - `config`: Game parameters
//! - `player`: Player identity and tallies
//! - `state`: Round phase and game progression
//! - `rules`: Round/game winner resolution
//! - `timer`: Countdown formatting
//! - `messages`: Status text
//! - `events`: Events emitted per tick
//! - `controller`: The round state machine
//! - `sim`: Headless collaborators and skirmish driver

pub mod arena;
pub mod config;
pub mod player;
pub mod state;
pub mod rules;
pub mod timer;
pub mod messages;
pub mod events;
pub mod controller;
pub mod sim;

// Re-export key types
pub use arena::{ActorHandle, Arena, CameraRig, Presentation, SpawnPoint, TimerColor};
pub use config::{GameConfig, ConfigError};
pub use player::{Player, PlayerId, PlayerSetup, PlayerColor};
pub use state::{GameState, GameOutcome, RoundPhase};
pub use rules::VictoryReason;
pub use events::{GameEvent, GameEventData};
pub use controller::{RoundController, ControllerError, TickResult};
