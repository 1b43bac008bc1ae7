//! CPU load readings

use serde::{Deserialize, Serialize};

/// Load of a single core as printed in the `CPU [...]` block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreLoad {
    /// Utilization percentage
    pub usage: u32,
    /// Current frequency in MHz, if printed
    pub freq_mhz: Option<u32>,
}

/// CPU block of one tegrastats line
///
/// Offline cores (`off`) carry no percentage and are not part of `cores`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuReading {
    /// Per-core loads, in the order they were printed
    pub cores: Vec<CoreLoad>,
}

impl CpuReading {
    /// Build a reading; `None` if no core reported a percentage
    pub fn new(cores: Vec<CoreLoad>) -> Option<Self> {
        if cores.is_empty() {
            None
        } else {
            Some(Self { cores })
        }
    }

    /// Arithmetic mean of the core usages
    pub fn average(&self) -> f64 {
        let sum: u64 = self.cores.iter().map(|c| c.usage as u64).sum();
        sum as f64 / self.cores.len() as f64
    }

    /// Core usages in print order
    pub fn usages(&self) -> Vec<u32> {
        self.cores.iter().map(|c| c.usage).collect()
    }
}
