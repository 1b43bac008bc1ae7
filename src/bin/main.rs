//! CLI tool for tegraplot

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tegraplot::report::FileReport;
use tegraplot::{chart, Config, Report, Summary};

#[derive(Parser)]
#[command(name = "tegraplot")]
#[command(about = "Plot CPU, GPU, RAM and temperature usage recorded by tegrastats", long_about = None)]
#[command(version)]
struct Cli {
    /// Single log file to process (default: every stats/*_stats.log)
    path: Option<PathBuf>,

    /// Only produce the combined chart of all logs
    #[arg(long, conflicts_with = "path")]
    all: bool,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing *_stats.log files
    #[arg(long)]
    stats_dir: Option<PathBuf>,

    /// Directory charts are written to
    #[arg(long)]
    plots_dir: Option<PathBuf>,

    /// Assumed tegrastats sampling interval in milliseconds
    #[arg(short, long)]
    interval_ms: Option<u64>,

    /// Summary output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// What a run produces, selected by `[PATH]` and `--all`
#[derive(Debug, PartialEq, Eq)]
enum Mode<'a> {
    /// Every log individually, then the combined chart
    Everything,
    /// Combined chart only
    Combined,
    /// One file only
    File(&'a Path),
}

impl Cli {
    fn mode(&self) -> Mode<'_> {
        match (&self.path, self.all) {
            (_, true) => Mode::Combined,
            (Some(path), false) => Mode::File(path),
            (None, false) => Mode::Everything,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::init();

    if !chart::is_available() {
        eprintln!("ERROR: {}", chart::INSTALL_HINT);
        std::process::exit(1);
    }

    if let Err(e) = run(&cli) {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> tegraplot::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::default(),
    };

    if let Some(dir) = &cli.stats_dir {
        config.general.stats_dir = dir.clone();
    }
    if let Some(dir) = &cli.plots_dir {
        config.general.plots_dir = dir.clone();
    }
    if let Some(ms) = cli.interval_ms {
        config.general.sample_interval_ms = ms;
    }

    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let report = Report::new(load_config(cli)?);
    let general = &report.config().general;

    if cli.format == Format::Text {
        println!("{}", "=".repeat(60));
        println!("  tegraplot - resource usage charts");
        println!("{}", "=".repeat(60));
        println!();
    }

    let mut summaries: Vec<Summary> = Vec::new();

    match cli.mode() {
        Mode::Combined => {
            if let Some(out) = report.process_combined()? {
                print_written(cli, "combined chart", &out);
            } else {
                print_no_files(cli, general.stats_dir.display());
                return Ok(());
            }
        }
        Mode::File(path) => {
            if let Some(file) = report.process_file(path)? {
                summaries.push(print_file(cli, file));
            } else {
                eprintln!("WARNING: no data found in {}", path.display());
            }
        }
        Mode::Everything => {
            let run = report.process_all()?;
            if run.files.is_empty() && run.combined.is_none() {
                print_no_files(cli, general.stats_dir.display());
                return Ok(());
            }
            for file in run.files {
                summaries.push(print_file(cli, file));
            }
            if let Some(out) = &run.combined {
                print_written(cli, "combined chart", out);
            }
        }
    }

    match cli.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        Format::Text => {
            println!();
            println!("{}", "=".repeat(60));
            println!("Done. Charts saved in: {}", general.plots_dir.display());
            println!("{}", "=".repeat(60));
        }
    }

    Ok(())
}

fn print_file(cli: &Cli, file: FileReport) -> Summary {
    print_written(cli, "chart", &file.chart);
    if cli.format == Format::Text {
        println!("\n{}\n", file.summary);
    }
    file.summary
}

fn print_written(cli: &Cli, what: &str, path: &Path) {
    if cli.format == Format::Text {
        println!("[OK] {} saved: {}", what, path.display());
    }
}

fn print_no_files(cli: &Cli, stats_dir: std::path::Display<'_>) {
    eprintln!("WARNING: no *_stats.log files found in {}/", stats_dir);
    if cli.format == Format::Json {
        println!("[]");
    }
}
