use std::hint::black_box;

use super::{Strategy, StrategyKind};
use crate::BenchError;

/// Sequential, unit-stride reads over `A[i] = i`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Vector;

impl Strategy for Vector {
    fn name(&self) -> &'static str {
        StrategyKind::Vector.name()
    }

    fn setup(&mut self, n: usize, buffer: &mut [u64]) -> Result<(), BenchError> {
        for (i, slot) in buffer[..n].iter_mut().enumerate() {
            *slot = i as u64;
        }
        Ok(())
    }

    fn sum(&self, n: usize, buffer: &[u64]) -> u64 {
        let buffer = black_box(buffer);
        let mut answer = 0u64;
        for &value in buffer.iter().take(n).skip(1) {
            answer += value;
        }
        black_box(answer)
    }
}
