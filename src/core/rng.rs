//! Shared random number source for the simulation.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Random number generator shared by every system that needs randomness
/// (patrol destinations, spawn intensities, spawn points, respawn points).
///
/// Seed it for reproducible runs; the default pulls from OS entropy.
#[derive(Resource)]
pub struct SimRng(pub StdRng);

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}
