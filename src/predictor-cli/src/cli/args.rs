//! CLI argument structures and parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use predictor_protocol::{DEFAULT_COUNTRY_CODE, FOUNDED_YEAR_MAX, ReferenceKind};

/// Log verbosity level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only show errors
    Error,
    /// Show warnings and errors
    Warn,
    /// Show informational messages, warnings, and errors (default)
    #[default]
    Info,
    /// Show debug messages and above
    Debug,
    /// Show all messages including trace-level details
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<LogLevel> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// Startup Success Predictor
///
/// Without a subcommand, opens the interactive form.
#[derive(Debug, Parser)]
#[command(name = "predictor")]
#[command(author, version)]
#[command(about = "Predict the success of a startup from a few company attributes", long_about = None)]
pub struct Cli {
    /// Base URL of the prediction service
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Configuration file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level for headless commands
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Enable debug mode: writes trace-level logs to ./predictor-debug.log
    #[arg(long, global = true, help_heading = "Debugging")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Whether the command runs without the interactive form.
    pub fn is_headless(&self) -> bool {
        self.command.is_some()
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Request a prediction without opening the form
    Predict(PredictArgs),

    /// Print the regions, cities or categories offered by the service
    Reference(ReferenceArgs),
}

/// Arguments for `predictor predict`.
#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Region (state or province)
    #[arg(long, default_value = "")]
    pub region: String,

    /// City
    #[arg(long, default_value = "")]
    pub city: String,

    /// Industry category; repeat for several
    #[arg(long = "category", value_name = "CATEGORY")]
    pub categories: Vec<String>,

    /// ISO 3166-1 alpha-3 country code
    #[arg(long, default_value = DEFAULT_COUNTRY_CODE)]
    pub country: String,

    /// Year the company was founded (clamped to 1995-2015)
    #[arg(long, default_value_t = FOUNDED_YEAR_MAX, allow_negative_numbers = true)]
    pub founded_year: i32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Which reference list to print.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReferenceTarget {
    Regions,
    Cities,
    Categories,
    #[default]
    All,
}

impl ReferenceTarget {
    pub fn kinds(&self) -> Vec<ReferenceKind> {
        match self {
            ReferenceTarget::Regions => vec![ReferenceKind::Regions],
            ReferenceTarget::Cities => vec![ReferenceKind::Cities],
            ReferenceTarget::Categories => vec![ReferenceKind::Categories],
            ReferenceTarget::All => ReferenceKind::ALL.to_vec(),
        }
    }
}

/// Arguments for `predictor reference`.
#[derive(Debug, Args)]
pub struct ReferenceArgs {
    /// List to print
    #[arg(value_enum, default_value_t = ReferenceTarget::All)]
    pub list: ReferenceTarget,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
