mod bencher;
mod error;
pub mod record;
pub mod strategy;

pub use bencher::{
    ProblemSizes, Sweep, DEFAULT_HALVINGS, DEFAULT_MAX_PROBLEM_SIZE, MAX_PROBLEM_SIZE,
};
pub use error::BenchError;
pub use record::{CsvWriter, TimingRecord};
pub use strategy::{expected_sum, Strategy, StrategyKind};

/// Run one strategy over `sizes`, writing the CSV stream to stdout.
pub fn run(
    sizes: ProblemSizes,
    strategy: impl Strategy,
) -> Result<Vec<TimingRecord>, BenchError> {
    let stdout = std::io::stdout();
    let mut sweep = Sweep::new(sizes, strategy, stdout.lock());
    sweep.run()
}
