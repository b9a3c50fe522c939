use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game::domain::choice::Choice;
use crate::game::domain::opponent::Opponent;

/// Opponent that picks uniformly among the three choices.
///
/// Generic over the random source so tests and replays can inject a
/// seeded generator.
pub struct RandomOpponent<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomOpponent<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomOpponent<StdRng> {
    /// Reproducible sequence of choices for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng + Send> Opponent for RandomOpponent<R> {
    fn choose(&mut self) -> Choice {
        Choice::ALL[self.rng.random_range(0..Choice::ALL.len())]
    }
}
