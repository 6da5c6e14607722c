/// SceneRng - the single random source of a mount
///
/// Population draws every random value from this generator. A seed gives a
/// reproducible layout; without one the generator is seeded from the clock.

use std::time::{SystemTime, UNIX_EPOCH};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

#[derive(Debug, Clone)]
pub struct SceneRng {
    inner: StdRng,
    seed: u64,
}

impl SceneRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Fresh layout on every call
    pub fn from_time() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or(0);
        Self::seeded(nanos)
    }

    /// Seeded when `seed` is set, time-seeded otherwise
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_time(),
        }
    }

    /// Seed the generator started from (useful to reproduce a layout)
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RngCore for SceneRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}
