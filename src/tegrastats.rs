//! tegrastats line parser
//!
//! Each metric category has its own matcher. Matchers are pure functions over
//! the whole line and never depend on each other, so a line may contain any
//! subset of the categories:
//!
//! ```text
//! RAM 2847/3964MB (lfb 120x4MB) CPU [12%@1479,16%@1479,off,off] GR3D_FREQ 45%@921 CPU@45.5C
//! ```
//!
//! Unrecognized or malformed content is never an error; the corresponding
//! category is simply absent from the result.

use crate::core::cpu::{CoreLoad, CpuReading};
use crate::core::gpu::GpuReading;
use crate::core::memory::RamReading;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref CPU_BLOCK: Regex = Regex::new(r"CPU \[([^\]]*)\]").unwrap();
    static ref CPU_CORE: Regex = Regex::new(r"(\d+)%(?:@\[?(\d+)\]?)?").unwrap();
    static ref GPU: Regex = Regex::new(r"GR3D_FREQ (\d+)%(?:@\[?(\d+)\]?)?").unwrap();
    static ref RAM: Regex = Regex::new(r"RAM (\d+)/(\d+)MB").unwrap();
    static ref TEMP_CPU: Regex = Regex::new(r"CPU@([\d.]+)C").unwrap();
}

/// Metrics recognized in a single line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineMetrics {
    /// CPU block
    pub cpu: Option<CpuReading>,
    /// GPU (`GR3D_FREQ`) entry
    pub gpu: Option<GpuReading>,
    /// RAM entry
    pub ram: Option<RamReading>,
    /// CPU temperature in Celsius
    pub temp_cpu: Option<f64>,
}

impl LineMetrics {
    /// True if no category was recognized
    pub fn is_empty(&self) -> bool {
        self.cpu.is_none() && self.gpu.is_none() && self.ram.is_none() && self.temp_cpu.is_none()
    }

    /// Mean CPU usage across reporting cores
    pub fn cpu_avg(&self) -> Option<f64> {
        self.cpu.as_ref().map(CpuReading::average)
    }

    /// Per-core CPU usage
    pub fn cpu_cores(&self) -> Option<Vec<u32>> {
        self.cpu.as_ref().map(CpuReading::usages)
    }

    pub fn gpu_usage(&self) -> Option<u32> {
        self.gpu.map(|g| g.usage)
    }

    /// GPU frequency in MHz. `None` both when there is no GPU entry and when
    /// the entry has no frequency suffix.
    pub fn gpu_freq(&self) -> Option<u32> {
        self.gpu.and_then(|g| g.freq_mhz)
    }

    pub fn ram_used(&self) -> Option<u64> {
        self.ram.map(|r| r.used_mb)
    }

    pub fn ram_total(&self) -> Option<u64> {
        self.ram.map(|r| r.total_mb)
    }

    pub fn ram_percent(&self) -> Option<f64> {
        self.ram.map(|r| r.percent())
    }

    pub fn temp_cpu(&self) -> Option<f64> {
        self.temp_cpu
    }
}

/// Parse one tegrastats line
pub fn parse_line(line: &str) -> LineMetrics {
    LineMetrics {
        cpu: parse_cpu(line),
        gpu: parse_gpu(line),
        ram: parse_ram(line),
        temp_cpu: parse_temp_cpu(line),
    }
}

/// Parse the `CPU [usage%@freq,...]` block
pub fn parse_cpu(line: &str) -> Option<CpuReading> {
    let block = CPU_BLOCK.captures(line)?.get(1)?.as_str();

    let cores = block
        .split(',')
        .filter_map(|entry| {
            let caps = CPU_CORE.captures(entry)?;
            let usage = caps[1].parse().ok()?;
            let freq_mhz = caps.get(2).and_then(|m| m.as_str().parse().ok());
            Some(CoreLoad { usage, freq_mhz })
        })
        .collect();

    CpuReading::new(cores)
}

/// Parse the `GR3D_FREQ usage%[@freq]` entry
pub fn parse_gpu(line: &str) -> Option<GpuReading> {
    let caps = GPU.captures(line)?;
    let usage = caps[1].parse().ok()?;
    let freq_mhz = caps.get(2).and_then(|m| m.as_str().parse().ok());
    Some(GpuReading { usage, freq_mhz })
}

/// Parse the `RAM used/totalMB` entry
pub fn parse_ram(line: &str) -> Option<RamReading> {
    let caps = RAM.captures(line)?;
    Some(RamReading {
        used_mb: caps[1].parse().ok()?,
        total_mb: caps[2].parse().ok()?,
    })
}

/// Parse the `CPU@tempC` entry
pub fn parse_temp_cpu(line: &str) -> Option<f64> {
    TEMP_CPU.captures(line)?[1].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NANO_LINE: &str = "RAM 2847/3964MB (lfb 120x4MB) SWAP 0/1982MB (cached 0MB) \
        CPU [12%@1479,16%@1479,14%@1479,13%@1479] EMC_FREQ 0% GR3D_FREQ 45%@921 APE 25 \
        PLL@38C CPU@45.5C PMIC@100C GPU@40C AO@48.5C thermal@42.25C POM_5V_IN 2936/2936";

    #[test]
    fn test_full_line() {
        let metrics = parse_line(NANO_LINE);
        assert_eq!(metrics.cpu_avg(), Some(13.75));
        assert_eq!(metrics.cpu_cores(), Some(vec![12, 16, 14, 13]));
        assert_eq!(metrics.gpu_usage(), Some(45));
        assert_eq!(metrics.gpu_freq(), Some(921));
        assert_eq!(metrics.ram_used(), Some(2847));
        assert_eq!(metrics.ram_total(), Some(3964));
        assert_eq!(metrics.temp_cpu(), Some(45.5));
    }

    #[test]
    fn test_cpu_block() {
        let metrics = parse_line("CPU [12%@1479,16%@1479]");
        assert_eq!(metrics.cpu_avg(), Some(14.0));
        assert_eq!(metrics.cpu_cores(), Some(vec![12, 16]));
        assert!(metrics.gpu.is_none());
        assert!(metrics.ram.is_none());
        assert!(metrics.temp_cpu.is_none());

        let cpu = metrics.cpu.unwrap();
        assert_eq!(cpu.cores[0].freq_mhz, Some(1479));
    }

    #[test]
    fn test_cpu_offline_cores() {
        let cpu = parse_cpu("CPU [20%@2035,off,off,40%]").unwrap();
        assert_eq!(cpu.usages(), vec![20, 40]);
        assert_eq!(cpu.cores[1].freq_mhz, None);
        assert_eq!(cpu.average(), 30.0);
    }

    #[test]
    fn test_cpu_block_without_percentages() {
        assert!(parse_cpu("CPU [off,off]").is_none());
        assert!(parse_cpu("CPU []").is_none());
        assert!(parse_line("CPU [off,off]").is_empty());
    }

    #[test]
    fn test_gpu_without_frequency() {
        let metrics = parse_line("GR3D_FREQ 45%");
        assert_eq!(metrics.gpu_usage(), Some(45));
        assert_eq!(metrics.gpu_freq(), None);
        assert_eq!(metrics.gpu.unwrap().freq_mhz, None);
    }

    #[test]
    fn test_gpu_with_frequency() {
        assert_eq!(parse_line("GR3D_FREQ 45%@300").gpu_freq(), Some(300));
        assert_eq!(parse_line("GR3D_FREQ 0%@[305,305]").gpu_freq(), Some(305));
    }

    #[test]
    fn test_ram() {
        let metrics = parse_line("RAM 2847/3964MB");
        assert_eq!(metrics.ram_used(), Some(2847));
        assert_eq!(metrics.ram_total(), Some(3964));
        assert!((metrics.ram_percent().unwrap() - 71.82).abs() < 0.01);
    }

    #[test]
    fn test_ram_zero_total() {
        assert_eq!(parse_line("RAM 0/0MB").ram_percent(), Some(0.0));
    }

    #[test]
    fn test_temperature() {
        assert_eq!(parse_line("CPU@45.5C").temp_cpu(), Some(45.5));
        assert_eq!(parse_line("CPU@52C").temp_cpu(), Some(52.0));
        assert_eq!(parse_line("CPU@4.5.5C").temp_cpu(), None);
    }

    #[test]
    fn test_unrecognized_lines() {
        assert!(parse_line("").is_empty());
        assert!(parse_line("tegrastats started").is_empty());
        assert!(parse_line("SWAP 0/1982MB GPU@40C").is_empty());
    }

    #[test]
    fn test_overflowing_values() {
        assert!(parse_gpu("GR3D_FREQ 99999999999%").is_none());
        assert_eq!(parse_gpu("GR3D_FREQ 10%@99999999999").unwrap().freq_mhz, None);
        assert!(parse_ram("RAM 1/999999999999999999999MB").is_none());
    }
}
