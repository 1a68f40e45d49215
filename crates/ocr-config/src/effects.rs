//! Injectable randomness for configuration builds
//!
//! The ephemeral secret (and the shared secret, when the caller does not supply
//! one) is drawn from a [`RandomSource`] passed into the assembler rather than a
//! process-wide generator:
//! - Production: operating-system entropy
//! - Testing: seeded deterministic RNG (reproducible builds)

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use std::sync::{Arc, Mutex};

/// Abstract randomness source - OS entropy or a seeded deterministic RNG
///
/// Implementations used outside of tests must be cryptographically secure.
pub trait RandomSource: Send + Sync {
    /// Fill a byte buffer with random data
    fn fill_bytes(&self, dest: &mut [u8]);

    /// Whether the source is deterministic (seeded)
    fn is_deterministic(&self) -> bool {
        false
    }
}

/// Real randomness source using OS entropy (production use)
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandomSource;

impl OsRandomSource {
    /// Create a new OS random source
    pub fn new() -> Self {
        OsRandomSource
    }
}

impl RandomSource for OsRandomSource {
    fn fill_bytes(&self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }
}

/// Seeded deterministic RNG for tests and reproducible builds
///
/// Same seed, same byte sequence. Never use for a configuration that is
/// going on-chain.
#[derive(Debug, Clone)]
pub struct SeededRandomSource {
    rng: Arc<Mutex<StdRng>>,
}

impl SeededRandomSource {
    /// Create a new seeded RNG with the given seed
    pub fn new(seed: u64) -> Self {
        SeededRandomSource {
            rng: Arc::new(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }
}

impl RandomSource for SeededRandomSource {
    fn fill_bytes(&self, dest: &mut [u8]) {
        #[allow(clippy::expect_used)] // Mutex poisoning is unrecoverable
        let mut rng = self.rng.lock().expect("RNG lock poisoned");
        rng.fill_bytes(dest);
    }

    fn is_deterministic(&self) -> bool {
        true
    }
}

/// Generate random bytes into a fixed-size array from any RandomSource
pub fn gen_random_bytes<const N: usize>(source: &dyn RandomSource) -> [u8; N] {
    let mut bytes = [0u8; N];
    source.fill_bytes(&mut bytes);
    bytes
}

/// Shared handle to the production randomness source
pub fn production_random() -> Arc<dyn RandomSource> {
    Arc::new(OsRandomSource::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_source_is_reproducible() {
        let a = SeededRandomSource::new(42);
        let b = SeededRandomSource::new(42);

        let bytes_a: [u8; 32] = gen_random_bytes(&a);
        let bytes_b: [u8; 32] = gen_random_bytes(&b);
        assert_eq!(bytes_a, bytes_b);

        // The sequence advances
        let next_a: [u8; 32] = gen_random_bytes(&a);
        assert_ne!(bytes_a, next_a);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a: [u8; 16] = gen_random_bytes(&SeededRandomSource::new(1));
        let b: [u8; 16] = gen_random_bytes(&SeededRandomSource::new(2));
        assert_ne!(a, b);
    }

    #[test]
    fn test_os_source_fills_buffer() {
        let source = OsRandomSource::new();
        assert!(!source.is_deterministic());

        let first: [u8; 32] = gen_random_bytes(&source);
        let second: [u8; 32] = gen_random_bytes(&source);
        assert_ne!(first, second);
    }
}
