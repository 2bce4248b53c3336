//! Core deterministic primitives.
//!
//! Seeded randomness for simulated skirmishes and hashing for run verification.

pub mod rng;
pub mod hash;

// Re-export core types
pub use rng::DeterministicRng;
pub use hash::{StateHash, StateHasher, compute_state_hash};
