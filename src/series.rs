//! Time series built from a tegrastats log
//!
//! tegrastats lines carry no timestamp, so every sample is placed on a
//! synthetic time axis: `start + index * interval`. The index counts emitted
//! samples only; comment lines and lines without any recognized metric do
//! not consume a slot. The interval is an assumption about how tegrastats was
//! launched (`--interval 500` by default) and is never derived from the log.

use crate::error::{Error, Result};
use crate::tegrastats::{parse_line, LineMetrics};
use chrono::{DateTime, Duration, Local};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Assumed time between two samples in milliseconds
pub const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 500;

/// Suffix stripped from log file stems to get the series name
const STATS_SUFFIX: &str = "_stats";

/// One metric category tracked across a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Mean CPU usage (%)
    CpuAvg,
    /// GPU usage (%)
    GpuUsage,
    /// RAM usage (%)
    RamPercent,
    /// CPU temperature (°C)
    TempCpu,
}

impl Channel {
    /// All charted channels, in panel order
    pub const ALL: [Channel; 4] = [
        Channel::CpuAvg,
        Channel::GpuUsage,
        Channel::RamPercent,
        Channel::TempCpu,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Channel::CpuAvg => "CPU usage",
            Channel::GpuUsage => "GPU usage",
            Channel::RamPercent => "RAM usage",
            Channel::TempCpu => "CPU temperature",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Channel::TempCpu => "°C",
            _ => "%",
        }
    }

    /// Whether values are percentages bounded to 0..=100
    pub fn is_percentage(&self) -> bool {
        !matches!(self, Channel::TempCpu)
    }

    /// Value of this channel in a parsed line, if present
    pub fn value(&self, metrics: &LineMetrics) -> Option<f64> {
        match self {
            Channel::CpuAvg => metrics.cpu_avg(),
            Channel::GpuUsage => metrics.gpu_usage().map(f64::from),
            Channel::RamPercent => metrics.ram_percent(),
            Channel::TempCpu => metrics.temp_cpu(),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.unit())
    }
}

/// One timestamped set of parsed metrics
#[derive(Debug, Clone, Serialize)]
pub struct Sample {
    /// Position in the series
    pub index: usize,
    /// Synthetic timestamp
    pub timestamp: DateTime<Local>,
    /// Parsed metrics, never empty
    pub metrics: LineMetrics,
}

/// Ordered samples extracted from one log file
#[derive(Debug, Clone)]
pub struct Series {
    name: String,
    start: DateTime<Local>,
    interval: Duration,
    samples: Vec<Sample>,
}

impl Series {
    /// Build a series from log lines
    ///
    /// Fails only if a synthetic timestamp falls outside the representable
    /// date range.
    pub fn from_lines<I, S>(
        name: &str,
        lines: I,
        start: DateTime<Local>,
        interval: Duration,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut samples = Vec::new();
        let mut skipped = 0usize;

        for line in lines {
            let line = line.as_ref();
            if line.starts_with('#') {
                continue;
            }

            let metrics = parse_line(line);
            if metrics.is_empty() {
                skipped += 1;
                continue;
            }

            let index = samples.len();
            let timestamp = i32::try_from(index)
                .ok()
                .and_then(|i| interval.checked_mul(i))
                .and_then(|offset| start.checked_add_signed(offset))
                .ok_or_else(|| {
                    Error::InvalidValue(format!(
                        "{}: timestamp of sample {} is out of range (interval {} ms)",
                        name,
                        index,
                        interval.num_milliseconds()
                    ))
                })?;
            samples.push(Sample {
                index,
                timestamp,
                metrics,
            });
        }

        debug!(
            "{}: {} samples, {} unrecognized lines",
            name,
            samples.len(),
            skipped
        );

        Ok(Self {
            name: name.to_string(),
            start,
            interval,
            samples,
        })
    }

    /// Read a whole log file; the series starts at the current local time
    ///
    /// Invalid UTF-8 is replaced rather than rejected, so a corrupted line
    /// only loses its own metrics.
    pub fn from_file(path: &Path, interval: Duration) -> Result<Self> {
        Self::from_file_at(path, Local::now(), interval)
    }

    /// Read a whole log file with an explicit start time
    pub fn from_file_at(path: &Path, start: DateTime<Local>, interval: Duration) -> Result<Self> {
        let bytes = fs::read(path)?;
        let contents = String::from_utf8_lossy(&bytes);
        Self::from_lines(&series_name(path), contents.lines(), start, interval)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> DateTime<Local> {
        self.start
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Per-sample values of a channel, 0.0 where the line did not report it
    pub fn values(&self, channel: Channel) -> Vec<f64> {
        self.samples
            .iter()
            .map(|s| channel.value(&s.metrics).unwrap_or(0.0))
            .collect()
    }

    /// Sample times in seconds relative to the first sample
    pub fn elapsed_seconds(&self) -> Vec<f64> {
        let Some(first) = self.samples.first() else {
            return Vec::new();
        };
        self.samples
            .iter()
            .map(|s| (s.timestamp - first.timestamp).num_milliseconds() as f64 / 1000.0)
            .collect()
    }

    /// Time covered by the series
    pub fn duration(&self) -> Duration {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last.timestamp - first.timestamp,
            _ => Duration::zero(),
        }
    }
}

/// Series name for a log file: the file stem without its `_stats` suffix
pub fn series_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match stem.strip_suffix(STATS_SUFFIX) {
        Some(name) => name.to_string(),
        None => stem,
    }
}
