use std::path::Path;

use polars::prelude::*;
use sumbench::StrategyKind;

/// One strategy's sweep, as captured from `sumbench run`.
#[derive(Debug, Clone, PartialEq)]
pub struct Timings {
    pub problem_sizes: Vec<i64>,
    pub elapsed_times: Vec<f64>,
}

pub fn get_data(csv: &Path) -> anyhow::Result<Timings> {
    let df = CsvReader::from_path(csv)?.has_header(true).finish()?;
    let problem_sizes = df
        .column("problem_size")?
        .cast(&DataType::Int64)?
        .i64()?
        .into_iter()
        .collect::<Option<Vec<_>>>();
    let elapsed_times = df
        .column("elapsed_time")?
        .cast(&DataType::Float64)?
        .f64()?
        .into_iter()
        .collect::<Option<Vec<_>>>();
    match (problem_sizes, elapsed_times) {
        (Some(problem_sizes), Some(elapsed_times)) => Ok(Timings {
            problem_sizes,
            elapsed_times,
        }),
        _ => anyhow::bail!("Missing values in {}", csv.display()),
    }
}

/// Theoretical peak memory bandwidth.
#[derive(Debug, Clone, Copy)]
pub struct MemorySystem {
    pub memory_mhz: f64,
    pub bus_width: f64,
    pub channels: f64,
}

impl MemorySystem {
    /// Bytes per second
    pub fn capacity(&self) -> f64 {
        self.memory_mhz * 1e6 * self.bus_width * self.channels
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Time,
    Mflops,
    Bandwidth,
    Latency,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Self::Time, Self::Mflops, Self::Bandwidth, Self::Latency];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Mflops => "mflops",
            Self::Bandwidth => "bandwidth",
            Self::Latency => "latency",
        }
    }

    pub fn units(&self) -> &'static str {
        match self {
            Self::Time => "sec",
            Self::Mflops => "MFLOP/s",
            Self::Bandwidth => "% of peak bandwidth",
            Self::Latency => "sec per access",
        }
    }
}

/// Memory accesses one sum performs. The direct strategy never reads the buffer.
fn accesses(kind: StrategyKind, n: i64) -> f64 {
    match kind {
        StrategyKind::Direct => 0.0,
        StrategyKind::Vector | StrategyKind::Indirect => n as f64,
    }
}

pub fn metric_values(
    metric: Metric,
    kind: StrategyKind,
    timings: &Timings,
    memory: &MemorySystem,
) -> Vec<Option<f64>> {
    let bytes_per_access = std::mem::size_of::<u64>() as f64;
    timings
        .problem_sizes
        .iter()
        .zip(&timings.elapsed_times)
        .map(|(&n, &time)| match metric {
            Metric::Time => Some(time),
            Metric::Mflops => Some(n as f64 / 1e6 / time),
            Metric::Bandwidth => {
                let bytes = accesses(kind, n) * bytes_per_access;
                Some(bytes / time / memory.capacity() * 100.0)
            }
            Metric::Latency => {
                let accesses = accesses(kind, n);
                if accesses == 0.0 {
                    None
                } else {
                    Some(time / accesses)
                }
            }
        })
        .collect()
}

/// All three sweeps must cover the same problem sizes in the same order.
pub fn check_problem_sizes(runs: &[(StrategyKind, &Path, &Timings)]) -> anyhow::Result<()> {
    let Some((_, _, first)) = runs.first() else {
        return Ok(());
    };
    for (kind, path, timings) in runs {
        if timings.problem_sizes != first.problem_sizes {
            anyhow::bail!(
                "Problem sizes of the {} run ({}) differ: {:?} vs {:?}",
                kind,
                path.display(),
                timings.problem_sizes,
                first.problem_sizes
            );
        }
    }
    Ok(())
}

/// One metric for every strategy, one row per problem size.
pub fn metric_frame(
    metric: Metric,
    runs: &[(StrategyKind, &Timings)],
    memory: &MemorySystem,
) -> anyhow::Result<DataFrame> {
    let Some((_, first)) = runs.first() else {
        anyhow::bail!("No benchmark results");
    };
    let mut columns = vec![Series::new("problem_size", first.problem_sizes.as_slice())];
    for (kind, timings) in runs {
        let values = metric_values(metric, *kind, timings, memory);
        columns.push(Series::new(kind.name(), values));
    }
    Ok(DataFrame::new(columns)?)
}

/// Mean of `numerator / denominator` over all problem sizes.
pub fn mean_ratio(df: &DataFrame, numerator: &str, denominator: &str) -> anyhow::Result<Option<f64>> {
    let ratio = df
        .clone()
        .lazy()
        .select([(col(numerator) / col(denominator)).mean().alias("ratio")])
        .collect()?;
    Ok(ratio.column("ratio")?.f64()?.get(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    const MEMORY: MemorySystem = MemorySystem {
        memory_mhz: 2400.0,
        bus_width: 8.0,
        channels: 2.0,
    };

    fn timings(times: &[f64]) -> Timings {
        Timings {
            problem_sizes: vec![1_000_000, 2_000_000],
            elapsed_times: times.to_vec(),
        }
    }

    #[test]
    fn test_capacity() {
        assert_eq!(MEMORY.capacity(), 38_400_000_000.0);
    }

    #[test]
    fn test_metric_values() {
        let t = timings(&[0.5, 1.0]);
        let mflops = metric_values(Metric::Mflops, StrategyKind::Vector, &t, &MEMORY);
        assert_eq!(mflops, vec![Some(2.0), Some(2.0)]);
        let latency = metric_values(Metric::Latency, StrategyKind::Indirect, &t, &MEMORY);
        assert_eq!(latency, vec![Some(0.5e-6), Some(0.5e-6)]);
        let latency = metric_values(Metric::Latency, StrategyKind::Direct, &t, &MEMORY);
        assert_eq!(latency, vec![None, None]);
        let bandwidth = metric_values(Metric::Bandwidth, StrategyKind::Direct, &t, &MEMORY);
        assert_eq!(bandwidth, vec![Some(0.0), Some(0.0)]);
        let bandwidth = metric_values(Metric::Bandwidth, StrategyKind::Vector, &t, &MEMORY);
        let expected = 8_000_000.0 / 0.5 / MEMORY.capacity() * 100.0;
        assert!((bandwidth[0].unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_mismatched_problem_sizes() {
        let a = timings(&[0.1, 0.2]);
        let mut b = timings(&[0.1, 0.2]);
        b.problem_sizes.reverse();
        let path = Path::new("vector.csv");
        let runs = [
            (StrategyKind::Direct, path, &a),
            (StrategyKind::Vector, path, &b),
        ];
        assert!(check_problem_sizes(&runs).is_err());
        assert!(check_problem_sizes(&runs[..1]).is_ok());
    }

    #[test]
    fn test_frame_and_ratio() -> anyhow::Result<()> {
        let vector = timings(&[0.1, 0.2]);
        let indirect = timings(&[0.4, 0.8]);
        let df = metric_frame(
            Metric::Time,
            &[
                (StrategyKind::Vector, &vector),
                (StrategyKind::Indirect, &indirect),
            ],
            &MEMORY,
        )?;
        assert_eq!(df.shape(), (2, 3));
        let ratio = mean_ratio(&df, "vector", "indirect")?.unwrap();
        assert!((ratio - 0.25).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_get_data() -> anyhow::Result<()> {
        let dir = TempDir::new("sumbench")?;
        let csv = dir.path().join("sum_vector.csv");
        std::fs::write(
            &csv,
            "problem_size,elapsed_time\n8,0.00000010\n16,0.00000020\n",
        )?;
        let t = get_data(&csv)?;
        assert_eq!(t.problem_sizes, vec![8, 16]);
        assert_eq!(t.elapsed_times, vec![0.0000001, 0.0000002]);
        Ok(())
    }
}
