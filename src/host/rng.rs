use rand::Rng as _;

/// Abstracts the `RAND` syscall's source of randomness so tests can swap in a seeded generator.
pub trait Rng {
    /// Returns a value uniformly distributed in `[0, max)`, or 0 if `max == 0`.
    fn uniform(&mut self, max: u8) -> u8;
}

/// The production RNG: thread-local, cryptographically-unspecified but fast.
pub struct ThreadRandom;

impl Rng for ThreadRandom {
    fn uniform(&mut self, max: u8) -> u8 {
        if max == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..max)
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl Rng for rand::rngs::SmallRng {
    fn uniform(&mut self, max: u8) -> u8 {
        if max == 0 {
            0
        } else {
            self.gen_range(0..max)
        }
    }
}
