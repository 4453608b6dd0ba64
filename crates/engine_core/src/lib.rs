//! Core engine types and utilities for DogDash.
//!
//! This crate provides the foundational types used across all simulation crates:
//! - Frame clock (delta time derivation)
//! - Lane geometry for the three-lane track
//! - Common component types for track entities in the ECS
//! - The seedable random source threaded through every system

pub mod components;
pub mod lane;
pub mod time;

pub use components::*;
pub use lane::*;
pub use time::*;

// Re-export commonly used types
pub use glam::Vec2;
pub use hecs::{Entity, World};

use rand::SeedableRng;

/// The single random source used by gameplay systems. Seeded for replayable runs.
pub type SimRng = rand::rngs::StdRng;

/// Build the simulation RNG. `None` seeds from OS entropy.
pub fn sim_rng(seed: Option<u64>) -> SimRng {
    match seed {
        Some(s) => SimRng::seed_from_u64(s),
        None => SimRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn seeded_rng_is_replayable() {
        let mut a = sim_rng(Some(42));
        let mut b = sim_rng(Some(42));
        for _ in 0..16 {
            assert_eq!(a.gen::<u32>(), b.gen::<u32>());
        }
    }
}
