//! Read-only queries about the host, backing the `os` command.

use std::path::PathBuf;
use std::thread;

use sysinfo::{CpuExt, System, SystemExt};

#[derive(Debug, Clone, PartialEq)]
pub struct CpuInfo {
    pub model: String,
    pub speed_mhz: Option<f64>,
}

pub trait OsInfoProvider {
    fn eol(&self) -> &'static str;
    fn cpus(&self) -> Vec<CpuInfo>;
    fn home_dir(&self) -> Option<PathBuf>;
    fn username(&self) -> String;
    fn architecture(&self) -> &'static str;
}

/// [`OsInfoProvider`] backed by the machine the process runs on.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInfo;

impl SystemInfo {
    pub fn new() -> Self {
        Self
    }
}

impl OsInfoProvider for SystemInfo {
    fn eol(&self) -> &'static str {
        if cfg!(windows) {
            "\r\n"
        } else {
            "\n"
        }
    }

    fn cpus(&self) -> Vec<CpuInfo> {
        let mut system = System::new();
        system.refresh_cpu();
        let cpus: Vec<CpuInfo> = system
            .cpus()
            .iter()
            .map(|cpu| CpuInfo {
                model: cpu.brand().trim().to_string(),
                speed_mhz: Some(cpu.frequency())
                    .filter(|&mhz| mhz > 0)
                    .map(|mhz| mhz as f64),
            })
            .collect();
        if !cpus.is_empty() {
            return cpus;
        }

        let count = thread::available_parallelism().map_or(1, |n| n.get());
        (0..count)
            .map(|_| CpuInfo {
                model: "unknown".to_string(),
                speed_mhz: None,
            })
            .collect()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn username(&self) -> String {
        whoami::username()
    }

    fn architecture(&self) -> &'static str {
        std::env::consts::ARCH
    }
}
