use std::{io::Write, time::Instant};

use crate::{
    record::{CsvWriter, TimingRecord},
    strategy::{expected_sum, Strategy},
    BenchError,
};

/// Largest problem size of the default sweep (256M elements).
pub const DEFAULT_MAX_PROBLEM_SIZE: usize = 1 << 28;
/// Number of halvings below the maximum in the default sweep.
pub const DEFAULT_HALVINGS: u32 = 5;
/// Largest accepted problem size. `n * (n - 1)` still fits in a `u64`.
pub const MAX_PROBLEM_SIZE: u64 = 1 << 32;

/// The ordered problem sizes of one sweep. Never empty, never zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemSizes(Vec<usize>);

impl ProblemSizes {
    pub fn new(sizes: Vec<usize>) -> Result<Self, BenchError> {
        if sizes.is_empty() {
            return Err(BenchError::InvalidProblemSize(
                "the sweep has no problem sizes".to_owned(),
            ));
        }
        if let Some(i) = sizes.iter().position(|n| *n == 0) {
            return Err(BenchError::InvalidProblemSize(format!(
                "problem size #{} is zero",
                i
            )));
        }
        if let Some(n) = sizes.iter().find(|n| **n as u64 > MAX_PROBLEM_SIZE) {
            return Err(BenchError::InvalidProblemSize(format!(
                "problem size {} exceeds the maximum of {}",
                n, MAX_PROBLEM_SIZE
            )));
        }
        Ok(Self(sizes))
    }

    /// `max >> halvings, ..., max >> 1, max`
    pub fn halving(max: usize, halvings: u32) -> Result<Self, BenchError> {
        if halvings >= usize::BITS {
            return Err(BenchError::InvalidProblemSize(format!(
                "cannot halve {} {} times",
                max, halvings
            )));
        }
        Self::new((0..=halvings).rev().map(|shift| max >> shift).collect())
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn max(&self) -> usize {
        self.0.iter().copied().max().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ProblemSizes {
    fn default() -> Self {
        Self(
            (0..=DEFAULT_HALVINGS)
                .rev()
                .map(|shift| DEFAULT_MAX_PROBLEM_SIZE >> shift)
                .collect(),
        )
    }
}

/// Drives one strategy over every problem size and emits a CSV row per size.
///
/// The working buffer is owned here and lent to the strategy for each call.
pub struct Sweep<S: Strategy, W: Write> {
    sizes: ProblemSizes,
    strategy: S,
    writer: CsvWriter<W>,
    buffer: Vec<u64>,
}

impl<S: Strategy, W: Write> Sweep<S, W> {
    pub fn new(sizes: ProblemSizes, strategy: S, out: W) -> Self {
        Self {
            sizes,
            strategy,
            writer: CsvWriter::new(out),
            buffer: Vec::new(),
        }
    }

    fn run_one(&mut self, n: usize) -> Result<TimingRecord, BenchError> {
        self.buffer.resize(n, 0);
        self.strategy.setup(n, &mut self.buffer)?;
        // Only `sum` is timed.
        let start_time = Instant::now();
        let total = self.strategy.sum(n, &self.buffer);
        let elapsed = start_time.elapsed();
        let record = TimingRecord {
            problem_size: n,
            elapsed,
        };
        self.writer.write_record(&record)?;
        let expected = expected_sum(n);
        if total != expected {
            return Err(BenchError::SumCorrectness {
                n,
                expected,
                actual: total,
            });
        }
        self.buffer.clear();
        Ok(record)
    }

    /// Run the whole sweep. The first failure stops it.
    pub fn run(&mut self) -> Result<Vec<TimingRecord>, BenchError> {
        log::info!(
            "Sweeping {} problem sizes with the {} strategy",
            self.sizes.len(),
            self.strategy.name()
        );
        self.writer.write_header()?;
        let sizes = self.sizes.as_slice().to_vec();
        let mut records = Vec::with_capacity(sizes.len());
        for n in sizes {
            log::debug!("Working on problem size N={}", n);
            let record = self.run_one(n)?;
            log::debug!("N={} done in {:.8}s", n, record.elapsed_seconds());
            records.push(record);
        }
        log::info!("Sweep finished: {} sizes validated", records.len());
        Ok(records)
    }

    /// Give back the strategy and the output sink.
    pub fn into_parts(self) -> (S, W) {
        (self.strategy, self.writer.into_inner())
    }
}
