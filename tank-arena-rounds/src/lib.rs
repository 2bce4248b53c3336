//! # Tank Arena Rounds
//!
//! Round and game progression for a two-player local tank arena.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    TANK ARENA ROUNDS                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Deterministic primitives                 │
//! │  ├── rng.rs       - Xorshift128+ PRNG for simulated fights   │
//! │  └── hash.rs      - State hashing for run comparison         │
//! │                                                              │
//! │  game/            - Round logic                              │
//! │  ├── arena.rs     - Engine collaborator traits               │
//! │  ├── config.rs    - Game parameters                          │
//! │  ├── player.rs    - Player identity and tallies              │
//! │  ├── state.rs     - Round phase and game state               │
//! │  ├── rules.rs     - Round/game winner resolution             │
//! │  ├── timer.rs     - Countdown formatting                     │
//! │  ├── messages.rs  - Status text                              │
//! │  ├── events.rs    - Per-tick events                          │
//! │  ├── controller.rs- Round state machine                      │
//! │  └── sim.rs       - Headless collaborators                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Driving the controller
//!
//! The host calls [`RoundController::tick`] once per rendered frame with the
//! frame's delta time. Waits are armed timers inside the phase, never sleeps,
//! so the controller is single-threaded and fully deterministic for a given
//! sequence of deltas and actor deaths.
//!
//! ```
//! use std::time::Duration;
//! use tank_arena::game::{sim::sim_controller, GameConfig, RoundPhase};
//!
//! let mut game = sim_controller(GameConfig::default()).unwrap();
//! assert_eq!(game.state().round_number, 1);
//!
//! // Three seconds of round banner at 60 Hz
//! for _ in 0..181 {
//!     game.tick(Duration::from_secs(1) / 60);
//! }
//! assert_eq!(game.phase(), RoundPhase::RoundPlaying);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::rng::DeterministicRng;
pub use game::{
    GameConfig, GameOutcome, GameState, Player, PlayerId, RoundController, RoundPhase,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Host frame rate assumed by the headless runner (Hz)
pub const TICK_RATE: u32 = 60;
