//! Memory readings

use serde::{Deserialize, Serialize};

/// `RAM used/totalMB` entry of one tegrastats line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RamReading {
    /// Used RAM in MB
    pub used_mb: u64,
    /// Total RAM in MB
    pub total_mb: u64,
}

impl RamReading {
    /// Get RAM usage percentage (0 when total is 0)
    pub fn percent(&self) -> f64 {
        if self.total_mb == 0 {
            0.0
        } else {
            (self.used_mb as f64 / self.total_mb as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        let ram = RamReading {
            used_mb: 2847,
            total_mb: 3964,
        };
        assert!((ram.percent() - 71.82).abs() < 0.01);
    }

    #[test]
    fn test_zero_total() {
        let ram = RamReading {
            used_mb: 0,
            total_mb: 0,
        };
        assert_eq!(ram.percent(), 0.0);

        let ram = RamReading {
            used_mb: 10,
            total_mb: 0,
        };
        assert_eq!(ram.percent(), 0.0);
    }
}
