//! Command-line interface for the demo binary
//!
//! The `remote-select` binary opens an interactive select over an
//! in-memory option list, printing the final selection as JSON on exit.
//!
//! ```bash
//! # Single select over the built-in city list
//! remote-select
//!
//! # Multi select over a JSON file, 5 options per page, 300ms fake latency
//! remote-select --multi --data options.json --page-size 5 --latency-ms 300
//!
//! # Log fetch traffic to a file
//! remote-select --log-level debug --log-file select.log
//! ```

use crate::SelectError;
use crate::config::SelectConfig;
use crate::model::SelectOption;
use crate::source::InMemorySource;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Built-in options used when no data file is given
const SAMPLE_CITIES: &[&str] = &[
    "Ambon",
    "Balikpapan",
    "Banda Aceh",
    "Bandar Lampung",
    "Bandung",
    "Banjarmasin",
    "Batam",
    "Bekasi",
    "Bengkulu",
    "Bogor",
    "Cirebon",
    "Denpasar",
    "Depok",
    "Jakarta",
    "Jambi",
    "Jayapura",
    "Kendari",
    "Kupang",
    "Makassar",
    "Malang",
    "Manado",
    "Mataram",
    "Medan",
    "Padang",
    "Palangka Raya",
    "Palembang",
    "Palu",
    "Pekanbaru",
    "Pontianak",
    "Samarinda",
    "Semarang",
    "Serang",
    "Solo",
    "Surabaya",
    "Tangerang",
    "Tasikmalaya",
    "Ternate",
    "Yogyakarta",
];

/// Log verbosity
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    #[must_use]
    pub const fn as_filter_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "remote-select")]
#[command(about = "Searchable, paginated select over an option list", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Allow picking several options
    #[arg(short = 'm', long = "multi")]
    pub multi: bool,

    /// JSON file with an array of options ({"id": .., "label": ..})
    #[arg(short = 'd', long = "data", value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Options returned per page
    #[arg(short = 'p', long = "page-size", default_value_t = InMemorySource::DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Artificial delay for every fetch, in milliseconds
    #[arg(short = 'l', long = "latency-ms", value_name = "MS")]
    pub latency_ms: Option<u64>,

    /// Settings file (defaults to the user config directory)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log verbosity; `RUST_LOG` takes precedence when set
    #[arg(long = "log-level", value_enum, default_value_t)]
    pub log_level: LogLevel,

    /// Write logs to this file; nothing is logged without it
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Settings from `--config` or the default location, with `--multi` applied
    ///
    /// # Errors
    ///
    /// Returns `SelectError::Config` if the settings file cannot be read or parsed.
    pub fn load_config(&self) -> Result<SelectConfig, SelectError> {
        let config = match &self.config {
            Some(path) => SelectConfig::load_from(path)?,
            None => SelectConfig::load_or_default()?,
        };

        Ok(if self.multi { config.with_multi(true) } else { config })
    }

    /// Option source from `--data` or the built-in list
    ///
    /// # Errors
    ///
    /// Returns `SelectError::Source` if the data file cannot be read or parsed.
    pub fn build_source(&self) -> Result<InMemorySource, SelectError> {
        let source = match &self.data {
            Some(path) => InMemorySource::from_json_file(path)?,
            None => InMemorySource::new(sample_options()),
        };

        let source = source.with_page_size(self.page_size);
        Ok(match self.latency_ms {
            Some(ms) => source.with_latency(Duration::from_millis(ms)),
            None => source,
        })
    }
}

/// The built-in option list
#[must_use]
pub fn sample_options() -> Vec<SelectOption> {
    SAMPLE_CITIES
        .iter()
        .zip(1_i64..)
        .map(|(name, id)| SelectOption::new(id, *name))
        .collect()
}
