use std::path::PathBuf;

use clap::Parser;
use sumbench::StrategyKind;

use self::{
    data::{MemorySystem, Metric, Timings},
    printer::MarkdownPrinter,
};

mod data;
mod printer;

/// Compare the CSV output of one run per strategy
#[derive(Parser)]
pub struct ReportArgs {
    /// CSV captured from `sumbench run --strategy direct`
    #[arg(long)]
    pub direct: PathBuf,
    /// CSV captured from `sumbench run --strategy vector`
    #[arg(long)]
    pub vector: PathBuf,
    /// CSV captured from `sumbench run --strategy indirect`
    #[arg(long)]
    pub indirect: PathBuf,
    /// Memory clock in MHz, for the peak bandwidth estimate
    #[arg(long, default_value = "2400")]
    pub memory_mhz: f64,
    /// Memory bus width in bytes
    #[arg(long, default_value = "8")]
    pub bus_width: f64,
    /// Number of memory channels
    #[arg(long, default_value = "2")]
    pub channels: f64,
}

impl ReportArgs {
    fn memory_system(&self) -> MemorySystem {
        MemorySystem {
            memory_mhz: self.memory_mhz,
            bus_width: self.bus_width,
            channels: self.channels,
        }
    }

    fn load_runs(&self) -> anyhow::Result<Vec<(StrategyKind, Timings)>> {
        let files = [
            (StrategyKind::Direct, &self.direct),
            (StrategyKind::Vector, &self.vector),
            (StrategyKind::Indirect, &self.indirect),
        ];
        let mut runs = vec![];
        for (kind, path) in files {
            if !path.exists() {
                anyhow::bail!("Benchmark results not found: {}", path.display());
            }
            log::debug!("Loading {} results from {}", kind, path.display());
            runs.push((kind, data::get_data(path)?));
        }
        let checked = runs
            .iter()
            .zip(files)
            .map(|((kind, timings), (_, path))| (*kind, path.as_path(), timings))
            .collect::<Vec<_>>();
        data::check_problem_sizes(&checked)?;
        Ok(runs)
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let runs = self.load_runs()?;
        let runs = runs.iter().map(|(k, t)| (*k, t)).collect::<Vec<_>>();
        let memory = self.memory_system();
        let mut printer = MarkdownPrinter::new();
        printer.add("# Comparison of ways to compute 0 + 1 + ... + N-1\n\n");
        printer.add(format!(
            "* peak memory bandwidth: `{:.1} GB/s`\n",
            memory.capacity() / 1e9
        ));
        for metric in Metric::ALL {
            let df = data::metric_frame(metric, &runs, &memory)?;
            printer.add(format!("\n## {} ({})\n\n", metric.name(), metric.units()));
            printer.add_dataframe(&df)?;
            if let Some(ratio) = data::mean_ratio(&df, "vector", "indirect")? {
                printer.add(format!("\n{} vector/indirect = `{:.4}`\n", metric.name(), ratio));
            }
        }
        printer.dump();
        Ok(())
    }
}
