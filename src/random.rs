//! Random number generation for the sampling kernels.
//!
//! Each thread owns its own ChaCha20 stream, so parallel pixel workers
//! never contend or produce correlated samples. Tests can reseed the
//! current thread's stream for reproducible runs.

use rand::{rng, Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::cell::RefCell;

thread_local! {
    /// Thread-local ChaCha20 PRNG for quality random numbers.
    static RNG: RefCell<ChaCha20Rng> = RefCell::new(ChaCha20Rng::from_rng(&mut rng()));
}

/// Generate a random f32 in [0.0, 1.0)
pub fn random_f32() -> f32 {
    RNG.with(|rng| rng.borrow_mut().random())
}

/// Generate a random f32 in [min, max)
pub fn random_f32_range(min: f32, max: f32) -> f32 {
    min + (max - min) * random_f32()
}

/// Generate a random RGB color with components in [0.0, 1.0)
pub fn random_color() -> glam::Vec3A {
    glam::Vec3A::new(random_f32(), random_f32(), random_f32())
}

/// Generate a random RGB color with components in [min, max)
pub fn random_color_range(min: f32, max: f32) -> glam::Vec3A {
    glam::Vec3A::new(
        random_f32_range(min, max),
        random_f32_range(min, max),
        random_f32_range(min, max),
    )
}

/// Reseed the current thread's stream. Deterministic sequences for tests.
pub fn reseed(seed: u64) {
    RNG.with(|rng| *rng.borrow_mut() = ChaCha20Rng::seed_from_u64(seed));
}
