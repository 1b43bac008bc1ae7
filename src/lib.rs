//! # tegraplot
//!
//! Turns logs written by the Jetson `tegrastats` utility into time series,
//! summary statistics and resource usage charts. Typical use is one log per
//! monitored workload (for example one per processed video), collected as
//! `stats/<name>_stats.log`.
//!
//! ## Quick Start
//!
//! ```
//! use tegraplot::tegrastats::parse_line;
//!
//! let metrics = parse_line("RAM 2847/3964MB CPU [12%@1479,16%@1479] GR3D_FREQ 45% CPU@45.5C");
//! assert_eq!(metrics.cpu_avg(), Some(14.0));
//! assert_eq!(metrics.gpu_usage(), Some(45));
//! assert_eq!(metrics.gpu_freq(), None);
//! assert_eq!(metrics.temp_cpu(), Some(45.5));
//! ```
//!
//! ```no_run
//! use tegraplot::{Config, Report};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = Report::new(Config::default());
//! for file in report.process_all()?.files {
//!     println!("{}", file.summary);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - the `tegraplot` command-line tool, implies `plot` (default)
//! - `plot` - PNG chart rendering via plotters; library users without it get
//!   `Error::MissingDependency` from the chart functions
//! - `full` - all features enabled

pub mod chart; // PNG chart rendering (plotters, `plot` feature)
pub mod config; // Configuration management with TOML persistence
pub mod core; // Typed CPU/GPU/RAM readings
pub mod error;
pub mod report; // File discovery and batch processing
pub mod series; // Synthetic-time series built from a log file
pub mod stats; // Mean/max summaries per channel
pub mod tegrastats; // Line parser

pub use config::Config;
pub use error::{Error, Result};
pub use report::Report;
pub use series::{Channel, Sample, Series};
pub use stats::{ChannelSummary, Summary};
pub use tegrastats::{parse_line, LineMetrics};
