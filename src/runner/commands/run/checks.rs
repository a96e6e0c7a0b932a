use sumbench::ProblemSizes;

use crate::platform_info::{to_gb, PLATFORM_INFO};

impl super::RunArgs {
    /// The largest working buffer must fit in memory, or the sweep measures swapping.
    fn memory_check(&self, sizes: &ProblemSizes) -> anyhow::Result<()> {
        let required = (sizes.max() as u64).saturating_mul(std::mem::size_of::<u64>() as u64);
        let available = PLATFORM_INFO.available_memory;
        if available == 0 || required <= available {
            return Ok(());
        }
        let msg = format!(
            "Largest buffer needs {:.1}GB but only {:.1}GB is available",
            to_gb(required),
            to_gb(available)
        );
        if self.allow_low_memory {
            log::warn!("🚨 {}", msg);
            Ok(())
        } else {
            anyhow::bail!("{}", msg);
        }
    }

    #[cfg(target_os = "linux")]
    fn scaling_governor_check(&self) {
        if self.allow_any_scaling_governor {
            return;
        }
        if !PLATFORM_INFO
            .scaling_governor
            .iter()
            .all(|g| g == "performance")
        {
            log::warn!(
                "🚨 Not all scaling governors are set to `performance`: [{}]",
                PLATFORM_INFO.scaling_governor.join(", ")
            );
        }
    }

    #[cfg(target_os = "linux")]
    pub(super) fn pre_benchmarking_checks(&self, sizes: &ProblemSizes) -> anyhow::Result<()> {
        self.memory_check(sizes)?;
        // Check if all the scaling governors are set to `performance`
        self.scaling_governor_check();
        Ok(())
    }

    #[cfg(not(target_os = "linux"))]
    pub(super) fn pre_benchmarking_checks(&self, sizes: &ProblemSizes) -> anyhow::Result<()> {
        self.memory_check(sizes)?;
        Ok(())
    }
}
