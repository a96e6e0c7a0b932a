use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use sumbench::{
    BenchError, ProblemSizes, StrategyKind, DEFAULT_HALVINGS, DEFAULT_MAX_PROBLEM_SIZE,
};

pub const DEFAULT_PROFILE: &str = "default";

#[derive(Deserialize)]
struct CargoConfig {
    #[serde(default)]
    package: Option<CargoConfigPackage>,
    #[serde(flatten)]
    _others: HashMap<String, toml::Value>,
}

#[derive(Deserialize)]
struct CargoConfigPackage {
    #[serde(default)]
    metadata: Option<CargoConfigPackageMetadata>,
    #[serde(flatten)]
    _others: HashMap<String, toml::Value>,
}

#[derive(Deserialize)]
struct CargoConfigPackageMetadata {
    #[serde(default)]
    sumbench: Option<Config>,
    #[serde(flatten)]
    _others: HashMap<String, toml::Value>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

fn default_strategy() -> StrategyKind {
    StrategyKind::Direct
}

fn default_max_problem_size() -> usize {
    DEFAULT_MAX_PROBLEM_SIZE
}

fn default_halvings() -> u32 {
    DEFAULT_HALVINGS
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Profile {
    /// The strategy to sweep
    #[serde(default = "default_strategy")]
    pub strategy: StrategyKind,
    /// Largest problem size of the halving series
    #[serde(default = "default_max_problem_size")]
    pub max_problem_size: usize,
    /// Number of halvings below `max-problem-size`
    #[serde(default = "default_halvings")]
    pub halvings: u32,
    /// Explicit problem sizes. Takes precedence over the halving series.
    #[serde(default)]
    pub sizes: Option<Vec<usize>>,
    /// Seed for the indirect strategy's shuffle. Fresh entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            max_problem_size: default_max_problem_size(),
            halvings: default_halvings(),
            sizes: None,
            seed: None,
        }
    }
}

impl Profile {
    pub fn problem_sizes(&self) -> Result<ProblemSizes, BenchError> {
        match &self.sizes {
            Some(sizes) => ProblemSizes::new(sizes.clone()),
            None => ProblemSizes::halving(self.max_problem_size, self.halvings),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let cargo = toml::from_str::<CargoConfig>(s)?;
        Ok(cargo
            .package
            .and_then(|p| p.metadata)
            .and_then(|m| m.sumbench)
            .unwrap_or_default())
    }

    /// Look up a profile. `default` falls back to the built-in profile.
    pub fn profile(&self, name: &str) -> anyhow::Result<Profile> {
        if let Some(profile) = self.profiles.get(name) {
            return Ok(profile.clone());
        }
        if name == DEFAULT_PROFILE {
            return Ok(Profile::default());
        }
        anyhow::bail!("Could not find sumbench profile `{}`", name);
    }
}

/// Load `[package.metadata.sumbench]` from `path`, or from `./Cargo.toml`.
///
/// An explicit path must exist. A missing `./Cargo.toml` yields an empty config.
pub fn load_from_cargo_toml(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!("Failed to load {}", path.display());
            }
            path.to_owned()
        }
        None => {
            let path = PathBuf::from("./Cargo.toml");
            if !path.is_file() {
                log::debug!("No ./Cargo.toml found, using the built-in profile");
                return Ok(Config::default());
            }
            path
        }
    };
    let s = std::fs::read_to_string(&path)?;
    Config::from_toml_str(&s)
}
