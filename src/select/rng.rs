//! Shared uniform random source, safe for concurrent selection calls.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::config::SelectionConfig;

/// Process-wide random source producing uniform reals in `[0, 1)`.
///
/// Access is serialized behind a mutex so concurrent selection calls neither
/// corrupt generator state nor observe correlated sequences. There is no
/// teardown; reseeding matters only for test determinism.
#[derive(Debug)]
pub struct SharedRandomSource {
    inner: Mutex<StdRng>,
}

impl SharedRandomSource {
    /// Source seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Deterministically seeded source for tests and replay.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Source honoring a configured seed, falling back to OS entropy.
    #[must_use]
    pub fn from_config(selection: &SelectionConfig) -> Self {
        selection.rng_seed.map_or_else(Self::new, Self::seeded)
    }

    /// One uniform draw in `[0, 1)`.
    pub fn next_unit(&self) -> f64 {
        self.inner.lock().random::<f64>()
    }
}

impl Default for SharedRandomSource {
    fn default() -> Self {
        Self::new()
    }
}
