//! Command-line interface for dutyline.
//!
//! A single batch run: parse the controller log, resolve the analysis
//! window, reconstruct midnight statuses, aggregate per-day ON time, and
//! write the CSV table and charts. Arguments are positional and optional,
//! so `dutyline` with no arguments analyses the configured default log
//! into the current directory.

use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

use chrono::Utc;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{DutylineError, Result};
use crate::export::{ChartRenderer, CsvExporter, ReportPaths, Summary};
use crate::parser::LogParser;
use crate::reconstruction::{Aggregation, Boundaries};
use crate::window::AnalysisWindow;

/// Reconstruct per-day ON time from a temperature controller log.
#[derive(Debug, Parser)]
#[command(name = "dutyline")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log file to analyse (default: the configured logfile).
    pub logfile: Option<PathBuf>,

    /// Analysis start date: epoch seconds or YYYY-MM-DD.
    pub start: Option<String>,

    /// Analysis end date: epoch seconds or YYYY-MM-DD.
    pub end: Option<String>,

    /// Directory report files are written into (default: configured directory).
    pub output_dir: Option<PathBuf>,

    /// Write the CSV table only, skip chart rendering.
    #[arg(long, env = "DUTYLINE_SKIP_CHARTS")]
    pub skip_charts: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, default_value = "warn", env = "DUTYLINE_LOG_LEVEL")]
    pub log_level: LogLevel,

    /// Log format (text, json, compact, pretty).
    #[arg(long, default_value = "text", env = "DUTYLINE_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Log output file (default: stderr).
    #[arg(long, env = "DUTYLINE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose diagnostics (same as --log-level debug).
    #[arg(short = 'v', long, env = "DUTYLINE_VERBOSE")]
    pub verbose: bool,

    /// Only log errors (same as --log-level error).
    #[arg(short = 'q', long, env = "DUTYLINE_QUIET")]
    pub quiet: bool,

    /// Path to custom configuration file.
    #[arg(long, env = "DUTYLINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Generate shell completions and exit.
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<CompletionShell>,
}

impl Cli {
    /// Log level after applying the `-v`/`-q` shorthands.
    ///
    /// Quiet wins over verbose when both are given.
    #[must_use]
    pub fn effective_log_level(&self) -> LogLevel {
        if self.quiet {
            LogLevel::Error
        } else if self.verbose {
            LogLevel::Debug
        } else {
            self.log_level
        }
    }
}

/// Log level options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    #[default]
    Warn,
    /// Errors, warnings, and informational messages.
    Info,
    /// All of the above plus debug messages.
    Debug,
    /// All messages including trace-level details.
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter level.
    #[must_use]
    pub fn to_filter_string(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Log format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format.
    #[default]
    Text,
    /// Structured JSON format for machine consumption.
    Json,
    /// Compact single-line format.
    Compact,
    /// Pretty format with full details.
    Pretty,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompletionShell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// PowerShell.
    Powershell,
    /// Elvish shell.
    Elvish,
}

impl From<CompletionShell> for Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Shell::Bash,
            CompletionShell::Zsh => Shell::Zsh,
            CompletionShell::Fish => Shell::Fish,
            CompletionShell::Powershell => Shell::PowerShell,
            CompletionShell::Elvish => Shell::Elvish,
        }
    }
}

/// Generate shell completions and print to stdout.
pub fn generate_completions(shell: CompletionShell) {
    let mut cmd = Cli::command();
    let shell: Shell = shell.into();
    generate(shell, &mut cmd, "dutyline", &mut io::stdout());
}

/// Initialize tracing/logging based on CLI options.
fn init_logging(cli: &Cli) {
    use tracing_subscriber::{
        fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
        layer::SubscriberExt,
        util::SubscriberInitExt,
        EnvFilter,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.effective_log_level().to_filter_string()));

    let writer = match &cli.log_file {
        Some(path) => match std::fs::File::create(path) {
            Ok(file) => BoxMakeWriter::new(std::sync::Arc::new(file)),
            Err(e) => {
                eprintln!("Warning: Could not open log file {}: {e}", path.display());
                BoxMakeWriter::new(std::io::stderr)
            }
        },
        None => BoxMakeWriter::new(std::io::stderr),
    };

    // Build subscriber based on log format
    let result = match cli.log_format {
        LogFormat::Json => {
            // Structured JSON format for machine consumption
            let layer = fmt::layer()
                .json()
                .with_span_events(FmtSpan::CLOSE)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(writer);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
        LogFormat::Compact => {
            // Compact single-line format
            let layer = fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(writer);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
        LogFormat::Pretty => {
            // Pretty format with full details
            let layer = fmt::layer()
                .pretty()
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(writer);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
        LogFormat::Text => {
            // Default human-readable text format
            let layer = fmt::layer().with_writer(writer);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
    };

    if let Err(e) = result {
        eprintln!("Warning: Could not initialize logging: {e}");
    }
}

/// Pick the log file to analyse.
///
/// An explicitly named file that does not exist falls back to the
/// configured default with a warning rather than aborting.
fn resolve_logfile(cli: &Cli, config: &Config) -> PathBuf {
    match &cli.logfile {
        Some(path) if path.exists() => path.clone(),
        Some(path) => {
            warn!(
                path = %path.display(),
                "cannot find the log file given, using the configured default"
            );
            config.input.logfile.clone()
        }
        None => config.input.logfile.clone(),
    }
}

/// Run one analysis pass end to end.
fn execute(cli: &Cli, config: &Config) -> Result<()> {
    let logfile = resolve_logfile(cli, config);
    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output.directory.clone());

    info!(path = %logfile.display(), "analysing log file");

    let parsed = LogParser::new().parse_file(&logfile)?;
    if !parsed.has_events() {
        return Err(DutylineError::no_events(&logfile));
    }

    let window = AnalysisWindow::resolve(&parsed, cli.start.as_deref(), cli.end.as_deref())?;
    let boundaries = Boundaries::reconstruct(window, &parsed.events);
    let aggregation = Aggregation::compute(&window, &boundaries, &parsed.events);
    let records = aggregation.records();

    let summary =
        Summary::from_records(records).ok_or(DutylineError::InsufficientData { days: 0 })?;
    let headline = summary.headline();
    println!("{headline}");
    println!("{}", summary.extremes_line());

    std::fs::create_dir_all(&output_dir).map_err(|e| {
        DutylineError::io(
            format!("failed to create output directory: {}", output_dir.display()),
            e,
        )
    })?;

    let paths = ReportPaths::new(&output_dir, &Utc::now());
    println!("Saving csv of results to {}", paths.csv.display());
    CsvExporter::new().export_to_path(&paths.csv, records)?;

    if cli.skip_charts {
        info!("chart rendering skipped");
    } else {
        println!("Saving plots of results");
        let renderer = ChartRenderer::new().with_size(config.chart.width, config.chart.height);
        renderer.render_bar_chart(&paths.bar_chart, records, &headline)?;
        renderer.render_line_chart(&paths.line_chart, records, &headline)?;
    }

    Ok(())
}

/// Run the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(&cli);

    if let Some(shell) = cli.completions {
        generate_completions(shell);
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config from {}: {}", path.display(), e);
            Config::default()
        }),
        None => Config::load().unwrap_or_default(),
    };

    execute(&cli, &config)
}
