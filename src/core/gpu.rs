//! GPU load readings

use serde::{Deserialize, Serialize};

/// `GR3D_FREQ` entry of one tegrastats line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuReading {
    /// GPU load percentage
    pub usage: u32,
    /// GPU frequency in MHz; `None` when the device did not report it
    pub freq_mhz: Option<u32>,
}

