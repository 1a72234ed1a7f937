//! Seeded random stream shared by every allocator, plus runtime seed resolution.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// Source of the single pseudo-random stream a layout is generated from.
///
/// Every draw made during generation goes through this trait, in a fixed order, so a seeded
/// implementation reproduces the same layout and a scripted one can steer tests.
pub trait RandomSource {
    fn next_u64(&mut self) -> u64;

    /// Uniform draw in `0..bound`. `bound` must be non-zero.
    ///
    /// Raw draws in the short tail that does not fill a whole multiple of `bound` are discarded,
    /// so every residue is equally likely.
    fn next_below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        let bound = bound as u64;
        let tail = (u64::MAX % bound + 1) % bound;
        let last_accepted = u64::MAX - tail;
        loop {
            let draw = self.next_u64();
            if draw <= last_accepted {
                return (draw % bound) as usize;
            }
        }
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}

pub struct SeededRandom {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { seed, rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Configured(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Configured(seed) | Self::Generated(seed) => seed,
        }
    }
}

/// A configured seed of zero means no reproducible stream was requested.
pub fn resolve_seed(configured: u64) -> SeedChoice {
    if configured == 0 {
        SeedChoice::Generated(generate_runtime_seed())
    } else {
        SeedChoice::Configured(configured)
    }
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    // Zero is reserved for "generate one", so never hand it back.
    match mix_seed(entropy) {
        0 => 0x9E37_79B9_7F4A_7C15,
        seed => seed,
    }
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;

    use super::RandomSource;

    /// Replays a fixed script of raw draws and panics when it runs dry.
    pub(crate) struct ScriptedRandom {
        draws: VecDeque<u64>,
        consumed: usize,
    }

    impl ScriptedRandom {
        pub(crate) fn new(draws: &[u64]) -> Self {
            Self { draws: draws.iter().copied().collect(), consumed: 0 }
        }

        pub(crate) fn consumed(&self) -> usize {
            self.consumed
        }

        pub(crate) fn remaining(&self) -> usize {
            self.draws.len()
        }
    }

    impl RandomSource for ScriptedRandom {
        fn next_u64(&mut self) -> u64 {
            self.consumed += 1;
            self.draws.pop_front().expect("scripted random source ran out of draws")
        }
    }
}
