use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::BenchError;

mod direct;
mod indirect;
mod vector;

pub use direct::Direct;
pub use indirect::{is_single_cycle, Indirect, RandomShuffle, Shuffle};
pub use vector::Vector;

/// One way of populating and then summing the working buffer.
///
/// The sweep calls [`Strategy::setup`] outside of the timed region, and then
/// times a single call to [`Strategy::sum`]. Both receive a buffer of exactly
/// `n` elements.
pub trait Strategy {
    fn name(&self) -> &'static str;

    /// Prepare `buffer` for summation. Only consistency failures are reported.
    fn setup(&mut self, n: usize, buffer: &mut [u64]) -> Result<(), BenchError>;

    /// Sum `0..n` using this strategy's access pattern.
    fn sum(&self, n: usize, buffer: &[u64]) -> u64;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn setup(&mut self, n: usize, buffer: &mut [u64]) -> Result<(), BenchError> {
        (**self).setup(n, buffer)
    }

    fn sum(&self, n: usize, buffer: &[u64]) -> u64 {
        (**self).sum(n, buffer)
    }
}

/// Selects the single strategy that is active for a run.
#[derive(ValueEnum, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Loop counter only, the buffer is never touched
    Direct,
    /// Unit-stride reads over the identity sequence
    Vector,
    /// Pointer-chasing through a random single-cycle permutation
    Indirect,
}

impl StrategyKind {
    /// Instantiate the strategy. `seed` only affects [`StrategyKind::Indirect`].
    pub fn build(self, seed: Option<u64>) -> Box<dyn Strategy> {
        match self {
            Self::Direct => Box::new(Direct),
            Self::Vector => Box::new(Vector),
            Self::Indirect => Box::new(Indirect::new(RandomShuffle::new(seed))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Vector => "vector",
            Self::Indirect => "indirect",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The correctness oracle: `0 + 1 + ... + (n - 1)`.
///
/// Exact for every size a [`crate::ProblemSizes`] accepts.
pub fn expected_sum(n: usize) -> u64 {
    let n = n as u64;
    n * n.saturating_sub(1) / 2
}
