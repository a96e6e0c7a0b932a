use std::path::PathBuf;

use clap::Parser;
use sumbench::StrategyKind;

use crate::{
    config::{self, Profile},
    platform_info::PLATFORM_INFO,
};

mod checks;

/// Sweep one summation strategy over the problem sizes and print CSV timings
#[derive(Parser)]
pub struct RunArgs {
    #[arg(short = 's', long, value_enum)]
    /// Summation strategy. Defaults to the profile's strategy.
    pub strategy: Option<StrategyKind>,
    #[arg(long, default_value = "default")]
    /// Benchmarking profile
    pub profile: String,
    #[arg(long)]
    /// Manifest to load profiles from, instead of ./Cargo.toml
    pub config: Option<PathBuf>,
    #[arg(long)]
    /// Largest problem size. Replaces the profile's size list with a halving series.
    pub max_size: Option<usize>,
    #[arg(long)]
    /// Number of halvings below the largest problem size
    pub halvings: Option<u32>,
    #[arg(long)]
    /// Seed for the indirect strategy's shuffle
    pub seed: Option<u64>,
    #[arg(long, default_value = "false")]
    /// Run even if the largest buffer does not fit in available memory
    pub allow_low_memory: bool,
    /// (Linux only) Do not warn about non-`performance` scaling governors
    #[arg(long, default_value = "false")]
    pub allow_any_scaling_governor: bool,
}

impl RunArgs {
    /// Command-line values win over the profile.
    fn apply_overrides(&self, mut profile: Profile) -> Profile {
        if let Some(strategy) = self.strategy {
            profile.strategy = strategy;
        }
        if self.max_size.is_some() || self.halvings.is_some() {
            profile.sizes = None;
        }
        if let Some(max_size) = self.max_size {
            profile.max_problem_size = max_size;
        }
        if let Some(halvings) = self.halvings {
            profile.halvings = halvings;
        }
        if self.seed.is_some() {
            profile.seed = self.seed;
        }
        profile
    }

    pub fn run(&self) -> anyhow::Result<()> {
        // Load benchmark profile
        let config = config::load_from_cargo_toml(self.config.as_deref())?;
        let profile = self.apply_overrides(config.profile(&self.profile)?);
        let sizes = profile.problem_sizes()?;
        // Pre-benchmarking checks
        PLATFORM_INFO.log();
        self.pre_benchmarking_checks(&sizes)?;
        log::info!(
            "Profile `{}`: strategy={}, sizes={:?}",
            self.profile,
            profile.strategy,
            sizes.as_slice()
        );
        // Run the sweep
        let strategy = profile.strategy.build(profile.seed);
        sumbench::run(sizes, strategy)?;
        Ok(())
    }
}
