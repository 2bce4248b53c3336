//! Player Definitions
//!
//! Identity and per-game tallies of each tank driver.

use serde::{Serialize, Deserialize};

use crate::core::hash::StateHasher;
use crate::game::arena::{ActorHandle, SpawnPoint};

/// Player number, 1-based, in roster order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Player number as shown on screen.
    pub const fn number(self) -> u8 {
        self.0
    }
}

/// Tank tint, used by the host when rendering labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl PlayerColor {
    /// Blue tank.
    pub const BLUE: Self = Self { r: 42, g: 100, b: 178 };
    /// Red tank.
    pub const RED: Self = Self { r: 229, g: 46, b: 40 };

    /// `#RRGGBB` form.
    pub fn to_hex(self) -> String {
        format!("#{}", hex::encode_upper([self.r, self.g, self.b]))
    }
}

/// How a player enters the game: where they spawn and what they look like.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSetup {
    /// Spawn point for every round.
    pub spawn: SpawnPoint,
    /// Tank tint.
    pub color: PlayerColor,
}

impl PlayerSetup {
    /// Default two-tank duel: blue on the left facing right, red opposite.
    pub fn duel() -> Vec<Self> {
        vec![
            Self {
                spawn: SpawnPoint::new([-30.0, 0.0, 0.0], 90.0),
                color: PlayerColor::BLUE,
            },
            Self {
                spawn: SpawnPoint::new([30.0, 0.0, 0.0], 270.0),
                color: PlayerColor::RED,
            },
        ]
    }
}

/// A player in the game.
///
/// The actor is owned by the arena; the player only keeps its handle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    /// Player number
    pub id: PlayerId,
    /// Tank tint
    pub color: PlayerColor,
    /// Spawn point
    pub spawn: SpawnPoint,
    /// Handle to the tank actor
    pub actor: ActorHandle,
    /// Rounds won this game
    pub wins: u32,
    /// Rounds lost this game
    pub losses: u32,
}

impl Player {
    /// Create a player around a freshly spawned actor.
    pub fn new(id: PlayerId, setup: &PlayerSetup, actor: ActorHandle) -> Self {
        Self {
            id,
            color: setup.color,
            spawn: setup.spawn,
            actor,
            wins: 0,
            losses: 0,
        }
    }

    /// Display label, e.g. `PLAYER 1`.
    pub fn label(&self) -> String {
        format!("PLAYER {}", self.id.number())
    }

    /// Tally line used in every scoreboard message.
    pub fn tally(&self) -> String {
        format!("{}: {} wins, {} losses", self.label(), self.wins, self.losses)
    }

    /// Clear per-game counters.
    pub fn reset_counters(&mut self) {
        self.wins = 0;
        self.losses = 0;
    }

    /// Hash this player's tallies.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u8(self.id.number());
        hasher.update_u32(self.wins);
        hasher.update_u32(self.losses);
    }
}
