//! Summary statistics over a series

use crate::error::{Error, Result};
use crate::series::{Channel, Series};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean and maximum of one channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelSummary {
    pub mean: f64,
    pub max: f64,
}

impl ChannelSummary {
    /// Summarize non-empty values; `None` for an empty slice
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let sum: f64 = values.iter().sum();
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            mean: sum / values.len() as f64,
            max,
        })
    }
}

/// Per-channel summary of a series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// Series name
    pub name: String,
    /// Number of samples summarized
    pub samples: usize,
    /// Time covered by the series in seconds
    pub duration_secs: f64,
    pub cpu_avg: ChannelSummary,
    pub gpu_usage: ChannelSummary,
    pub ram_percent: ChannelSummary,
    pub temp_cpu: ChannelSummary,
}

impl Summary {
    /// Compute the summary of a series
    ///
    /// Callers are expected to check `Series::is_empty` first; an empty series
    /// is refused with `Error::EmptySeries`.
    pub fn from_series(series: &Series) -> Result<Self> {
        if series.is_empty() {
            warn!("refusing to summarize empty series '{}'", series.name());
            return Err(Error::EmptySeries(series.name().to_string()));
        }

        let channel = |c: Channel| {
            ChannelSummary::from_values(&series.values(c))
                .ok_or_else(|| Error::EmptySeries(series.name().to_string()))
        };

        Ok(Self {
            name: series.name().to_string(),
            samples: series.len(),
            duration_secs: series.duration().num_milliseconds() as f64 / 1000.0,
            cpu_avg: channel(Channel::CpuAvg)?,
            gpu_usage: channel(Channel::GpuUsage)?,
            ram_percent: channel(Channel::RamPercent)?,
            temp_cpu: channel(Channel::TempCpu)?,
        })
    }

    /// Summary of one channel
    pub fn channel(&self, channel: Channel) -> &ChannelSummary {
        match channel {
            Channel::CpuAvg => &self.cpu_avg,
            Channel::GpuUsage => &self.gpu_usage,
            Channel::RamPercent => &self.ram_percent,
            Channel::TempCpu => &self.temp_cpu,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Statistics for {} ({} samples, {:.1}s):",
            self.name, self.samples, self.duration_secs
        )?;
        writeln!(f, "   CPU mean:   {:.1}%", self.cpu_avg.mean)?;
        writeln!(f, "   CPU max:    {:.1}%", self.cpu_avg.max)?;
        writeln!(f, "   GPU mean:   {:.1}%", self.gpu_usage.mean)?;
        writeln!(f, "   GPU max:    {:.1}%", self.gpu_usage.max)?;
        writeln!(f, "   RAM mean:   {:.1}%", self.ram_percent.mean)?;
        writeln!(f, "   RAM max:    {:.1}%", self.ram_percent.max)?;
        writeln!(f, "   Temp mean:  {:.1}C", self.temp_cpu.mean)?;
        write!(f, "   Temp max:   {:.1}C", self.temp_cpu.max)
    }
}
