use std::hint::black_box;

use rand::{rngs::SmallRng, Rng, SeedableRng};

use super::{Strategy, StrategyKind};
use crate::BenchError;

/// Fills a buffer with a permutation of `0..buffer.len()`.
pub trait Shuffle {
    fn shuffle(&mut self, buffer: &mut [u64]);
}

/// Pivot-swap shuffle: every pivot is swapped with a random slot strictly after it.
///
/// A fresh generator is created for each call. Without a seed it draws from OS
/// entropy, so permutations differ between runs. With a seed the generator is
/// derived from the seed and the buffer length.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomShuffle {
    seed: Option<u64>,
}

impl RandomShuffle {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    fn rng(&self, n: usize) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(n as u64)),
            None => SmallRng::from_entropy(),
        }
    }
}

impl Shuffle for RandomShuffle {
    fn shuffle(&mut self, buffer: &mut [u64]) {
        let n = buffer.len();
        for (i, slot) in buffer.iter_mut().enumerate() {
            *slot = i as u64;
        }
        let mut rng = self.rng(n);
        for pivot in 0..n.saturating_sub(1) {
            let rnd_idx = rng.gen_range(pivot + 1..n);
            buffer.swap(pivot, rnd_idx);
        }
    }
}

/// Returns true if following `buffer[idx]` from index 0 visits every index
/// exactly once before coming back to 0.
pub fn is_single_cycle(buffer: &[u64]) -> bool {
    let n = buffer.len();
    let mut visited = vec![false; n];
    let mut idx = 0usize;
    for _ in 0..n {
        if visited[idx] {
            return false;
        }
        visited[idx] = true;
        match usize::try_from(buffer[idx]) {
            Ok(next) if next < n => idx = next,
            _ => return false,
        }
    }
    idx == 0 && visited.iter().all(|v| *v)
}

/// Pointer-chasing through a single-cycle permutation.
///
/// Every read address depends on the previous read, so neither the
/// prefetcher nor out-of-order execution can hide memory latency.
#[derive(Debug, Default, Clone)]
pub struct Indirect<S: Shuffle = RandomShuffle> {
    shuffle: S,
}

impl<S: Shuffle> Indirect<S> {
    pub fn new(shuffle: S) -> Self {
        Self { shuffle }
    }
}

impl<S: Shuffle> Strategy for Indirect<S> {
    fn name(&self) -> &'static str {
        StrategyKind::Indirect.name()
    }

    fn setup(&mut self, n: usize, buffer: &mut [u64]) -> Result<(), BenchError> {
        let buffer = &mut buffer[..n];
        self.shuffle.shuffle(buffer);
        // The shuffle alone does not prove the cycle property.
        if !is_single_cycle(buffer) {
            return Err(BenchError::SetupConsistency { n });
        }
        Ok(())
    }

    fn sum(&self, _n: usize, buffer: &[u64]) -> u64 {
        let buffer = black_box(buffer);
        let mut answer = 0u64;
        let mut idx = buffer[0];
        while idx != 0 {
            answer += idx;
            idx = buffer[idx as usize];
        }
        black_box(answer)
    }
}
