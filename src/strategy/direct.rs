use std::hint::black_box;

use super::{Strategy, StrategyKind};
use crate::BenchError;

/// Baseline: pure loop arithmetic with no memory traffic on the buffer.
#[derive(Debug, Default, Clone, Copy)]
pub struct Direct;

impl Strategy for Direct {
    fn name(&self) -> &'static str {
        StrategyKind::Direct.name()
    }

    fn setup(&mut self, _n: usize, _buffer: &mut [u64]) -> Result<(), BenchError> {
        Ok(())
    }

    fn sum(&self, n: usize, _buffer: &[u64]) -> u64 {
        let n = black_box(n as u64);
        let mut answer = 0u64;
        for i in 1..n {
            answer += i;
        }
        black_box(answer)
    }
}
