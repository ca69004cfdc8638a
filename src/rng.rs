//! Shared random-number source for all gameplay randomness.
//!
//! Spawn rolls and explosion particle parameters draw from this single
//! resource rather than thread-local RNGs, so a test can insert a
//! [`GameRng::seeded`] value and replay an exact session.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// The simulation's random-number generator.
///
/// Systems take `ResMut<GameRng>` and call `rand::Rng` methods on the inner
/// [`StdRng`].
#[derive(Resource)]
pub struct GameRng(pub StdRng);

impl GameRng {
    /// OS-entropy seed; what the game binary uses.
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    /// Fixed seed for deterministic tests.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}
