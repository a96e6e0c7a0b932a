use thiserror::Error;

/// Fatal conditions detected while sweeping. None of these are retried.
#[derive(Error, Debug)]
pub enum BenchError {
    /// The permutation built by the indirect strategy is not a single cycle.
    #[error("Error in setup method for N={n}: permutation is not a single cycle")]
    SetupConsistency { n: usize },
    /// `sum()` disagreed with `n * (n - 1) / 2`.
    #[error("Error: incorrect sum result for N={n} (expected {expected}, got {actual})")]
    SumCorrectness { n: usize, expected: u64, actual: u64 },
    #[error("Invalid problem size: {0}")]
    InvalidProblemSize(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BenchError {
    /// The problem size that triggered the failure, if there is one.
    pub fn problem_size(&self) -> Option<usize> {
        match self {
            Self::SetupConsistency { n } | Self::SumCorrectness { n, .. } => Some(*n),
            _ => None,
        }
    }
}
