pub mod sweep;

pub use sweep::{accept_probability, metropolis_sweep};

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

/// Generator for one simulation: seeded when `seed` is given, otherwise
/// drawn from OS entropy.
pub fn make_rng(seed: Option<u64>) -> Xoshiro256StarStar {
    match seed {
        Some(seed) => Xoshiro256StarStar::seed_from_u64(seed),
        None => Xoshiro256StarStar::from_entropy(),
    }
}
