//! Injectable randomness for generation.
//!
//! Every generation step draws from a [`RandomSource`]. Seeding a
//! [`SeededRng`] makes a whole dungeon (layout, content, identifiers)
//! reproducible; [`SeededRng::from_runtime_entropy`] covers the unseeded case.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use uuid::{Builder, Uuid};
use xxhash_rust::xxh3::xxh3_64;

pub trait RandomSource {
    fn next_u64(&mut self) -> u64;

    /// Uniform value in `0..bound`; returns 0 for an empty bound.
    fn below(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        // Draws under `threshold` would favor the low residues.
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let value = self.next_u64();
            if value >= threshold {
                return value % bound;
            }
        }
    }

    /// Uniform value in `min..=max`.
    fn range_u32(&mut self, min: u32, max: u32) -> u32 {
        debug_assert!(min <= max);
        let span = u64::from(max - min) + 1;
        min + self.below(span) as u32
    }

    /// Uniform float in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.unit() < probability
    }

    fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.below(len as u64) as usize)
    }

    fn uuid(&mut self) -> Uuid {
        let mut bytes = [0_u8; 16];
        bytes[..8].copy_from_slice(&self.next_u64().to_le_bytes());
        bytes[8..].copy_from_slice(&self.next_u64().to_le_bytes());
        Builder::from_random_bytes(bytes).into_uuid()
    }
}

/// ChaCha8-backed random source. Two instances built from the same seed
/// produce identical streams.
#[derive(Debug, Clone)]
pub struct SeededRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed), seed }
    }

    pub fn from_runtime_entropy() -> Self {
        Self::new(runtime_seed())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRng {
    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }
}

static RUNTIME_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Hashes wall-clock time, the process id and a per-process counter, so two
/// unseeded generators in the same process still diverge.
fn runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let counter = RUNTIME_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let mut entropy = [0_u8; 28];
    entropy[..16].copy_from_slice(&now_nanos.to_le_bytes());
    entropy[16..20].copy_from_slice(&process::id().to_le_bytes());
    entropy[20..].copy_from_slice(&counter.to_le_bytes());
    xxh3_64(&entropy)
}
