//! Batch processing of tegrastats logs
//!
//! Discovers `*_stats.log` files, builds a [`Series`] per file, renders the
//! per-file and combined charts and returns the summaries for printing.

use crate::chart;
use crate::config::Config;
use crate::error::Result;
use crate::series::Series;
use crate::stats::Summary;
use chrono::Local;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// File name suffix of tegrastats logs
pub const LOG_SUFFIX: &str = "_stats.log";

/// File name of the combined chart
pub const COMBINED_CHART: &str = "combined_stats.png";

/// Find all `*_stats.log` files in a directory, sorted by path
///
/// A missing directory yields an empty list.
pub fn discover(stats_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if !stats_dir.is_dir() {
        debug!("stats directory {} does not exist", stats_dir.display());
        return Ok(files);
    }

    for entry in fs::read_dir(stats_dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(LOG_SUFFIX));
        if matches {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Chart path for a series: `<plots_dir>/<name>_stats.png`
pub fn output_path(plots_dir: &Path, name: &str) -> PathBuf {
    plots_dir.join(format!("{}_stats.png", name))
}

/// Path of the combined chart
pub fn combined_output_path(plots_dir: &Path) -> PathBuf {
    plots_dir.join(COMBINED_CHART)
}

/// Result of processing one log file
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Chart written for the file
    pub chart: PathBuf,
    /// Summary statistics of the file
    pub summary: Summary,
}

/// Everything produced by a full run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Per-file results, in discovery order
    pub files: Vec<FileReport>,
    /// Combined chart, if one was written
    pub combined: Option<PathBuf>,
}

/// Drives series building, charting and statistics
pub struct Report {
    config: Config,
}

impl Report {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the series of one file using the configured interval
    pub fn load(&self, path: &Path) -> Result<Series> {
        Series::from_file(path, self.config.sample_interval()?)
    }

    /// Build the series of several files; they share one start time
    pub fn load_all(&self, files: &[PathBuf]) -> Result<Vec<Series>> {
        let interval = self.config.sample_interval()?;
        let start = Local::now();
        files
            .iter()
            .map(|path| Series::from_file_at(path, start, interval))
            .collect()
    }

    /// Chart and summarize a single file
    ///
    /// Returns `Ok(None)` when the file contains no recognizable samples.
    pub fn process_file(&self, path: &Path) -> Result<Option<FileReport>> {
        let series = self.load(path)?;
        self.chart_series(path, &series)
    }

    /// Render the combined chart of every discovered file
    ///
    /// Returns `Ok(None)` when no log files were found.
    pub fn process_combined(&self) -> Result<Option<PathBuf>> {
        let files = self.discover()?;
        if files.is_empty() {
            return Ok(None);
        }
        let series = self.load_all(&files)?;
        self.chart_combined(&series).map(Some)
    }

    /// Process every discovered file individually, then the combined chart
    ///
    /// Each file is read once; the same series feed both charts.
    pub fn process_all(&self) -> Result<RunReport> {
        let files = self.discover()?;
        let mut report = RunReport::default();
        if files.is_empty() {
            return Ok(report);
        }

        let series = self.load_all(&files)?;
        for (path, s) in files.iter().zip(&series) {
            if let Some(file) = self.chart_series(path, s)? {
                report.files.push(file);
            }
        }

        report.combined = Some(self.chart_combined(&series)?);
        Ok(report)
    }

    fn chart_series(&self, path: &Path, series: &Series) -> Result<Option<FileReport>> {
        if series.is_empty() {
            warn!("no samples found in {}", path.display());
            return Ok(None);
        }

        let plots_dir = &self.config.general.plots_dir;
        fs::create_dir_all(plots_dir)?;

        let out = output_path(plots_dir, series.name());
        chart::render_series(series, &self.config.chart, &out)?;
        info!("chart written to {}", out.display());

        let summary = Summary::from_series(series)?;
        Ok(Some(FileReport {
            chart: out,
            summary,
        }))
    }

    fn chart_combined(&self, series: &[Series]) -> Result<PathBuf> {
        let plots_dir = &self.config.general.plots_dir;
        fs::create_dir_all(plots_dir)?;

        let out = combined_output_path(plots_dir);
        chart::render_combined(series, &self.config.chart, &out)?;
        info!("combined chart written to {}", out.display());
        Ok(out)
    }

    /// Log files in the configured stats directory
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let stats_dir = &self.config.general.stats_dir;
        let files = discover(stats_dir)?;
        if files.is_empty() {
            warn!("no *{} files found in {}", LOG_SUFFIX, stats_dir.display());
        }
        Ok(files)
    }
}
