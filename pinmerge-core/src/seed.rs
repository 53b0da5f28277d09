//! Reproducible random number generation

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seed used when none is configured
pub const DEFAULT_SEED: u64 = 0;

/// Deterministic generator for mask sampling and data shuffling
pub fn seeded_rng(seed: u64) -> StdRng {
    log::debug!("seeding rng with {seed}");
    StdRng::seed_from_u64(seed)
}
