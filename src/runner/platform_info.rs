use once_cell::sync::Lazy;
use sysinfo::{CpuExt, System, SystemExt};

#[derive(Debug, Clone)]
pub struct PlatformInfo {
    pub host: String,
    pub os: String,
    pub arch: String,
    pub kernel_version: String,
    pub cpu_model: String,
    /// Total memory in bytes
    pub memory: u64,
    /// Available memory in bytes
    pub available_memory: u64,
    #[cfg(target_os = "linux")]
    pub scaling_governor: Vec<String>,
}

impl PlatformInfo {
    pub fn log(&self) {
        log::info!("Host: {} ({}, {})", self.host, self.os, self.arch);
        log::info!("Kernel: {}", self.kernel_version);
        log::info!("CPU: {}", self.cpu_model);
        log::info!(
            "Memory: {:.1}GB total, {:.1}GB available",
            to_gb(self.memory),
            to_gb(self.available_memory)
        );
    }
}

pub fn to_gb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0 / 1024.0
}

#[cfg(target_os = "linux")]
fn get_scaling_governor() -> anyhow::Result<Vec<String>> {
    let mut governors = Vec::new();
    for path in (std::fs::read_dir("/sys/devices/system/cpu/")?).flatten() {
        let path = path.path();
        if path.is_dir() {
            let path = path.join("cpufreq/scaling_governor");
            if path.exists() {
                if let Ok(governor) = std::fs::read_to_string(path) {
                    governors.push(governor.trim().to_owned());
                }
            }
        }
    }
    Ok(governors)
}

pub static PLATFORM_INFO: Lazy<PlatformInfo> = Lazy::new(|| {
    let mut sys = System::new_all();
    sys.refresh_all();
    const UNKNOWN: &str = "<unknown>";
    PlatformInfo {
        host: sys.host_name().unwrap_or(UNKNOWN.to_string()),
        os: sys.long_os_version().unwrap_or(UNKNOWN.to_string()),
        arch: std::env::consts::ARCH.to_string(),
        kernel_version: sys.kernel_version().unwrap_or(UNKNOWN.to_string()),
        cpu_model: sys.global_cpu_info().brand().to_owned(),
        memory: sys.total_memory(),
        available_memory: sys.available_memory(),
        #[cfg(target_os = "linux")]
        scaling_governor: get_scaling_governor().unwrap_or_default(),
    }
});
