//! Engine Collaborators
//!
//! The round controller never touches tanks, cameras or text directly. The
//! host engine implements these traits and the controller drives them.

use serde::{Serialize, Deserialize};

/// Opaque handle to a tank actor owned by the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorHandle(pub u32);

/// Where a tank is placed at the start of every round.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// World position (x, y, z).
    pub position: [f32; 3],
    /// Heading around the vertical axis, in degrees.
    pub rotation_deg: f32,
}

impl SpawnPoint {
    /// Create a spawn point.
    pub const fn new(position: [f32; 3], rotation_deg: f32) -> Self {
        Self { position, rotation_deg }
    }
}

/// Hint for how the timer text should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerColor {
    /// Plenty of time left.
    Normal,
    /// Final minute, or expired.
    Warning,
}

/// Tank actors in the arena.
pub trait Arena {
    /// Instantiate a tank at a spawn point.
    fn spawn(&mut self, spawn: &SpawnPoint) -> ActorHandle;
    /// Put a tank back at its spawn point, alive and at full health.
    fn reset(&mut self, actor: ActorHandle);
    /// Let the player drive and shoot.
    fn enable_control(&mut self, actor: ActorHandle);
    /// Freeze the player's input.
    fn disable_control(&mut self, actor: ActorHandle);
    /// Whether the tank is still active in the arena.
    fn is_alive(&self, actor: ActorHandle) -> bool;
}

/// Camera that keeps every tank in frame.
pub trait CameraRig {
    /// Tanks the camera should follow.
    fn set_targets(&mut self, targets: &[ActorHandle]);
    /// Jump straight to the framing for the current targets.
    fn snap_to_start(&mut self);
}

/// On-screen text.
pub trait Presentation {
    /// Replace the central status message. Empty clears it.
    fn set_message(&mut self, text: &str);
    /// Replace the game timer readout.
    fn set_timer(&mut self, text: &str, color: TimerColor);
}
