//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and their conversion into library requests.

use std::convert::Infallible;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::constants::DB_PATH_ENV;
use crate::error_handling::ExportError;
use crate::export::{BatchSize, ConditionParam, ExportRequest};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// One JSON object per line for machine parsing
    Json,
}

/// Command-line interface.
///
/// # Examples
///
/// ```bash
/// # Concatenate the SMILES column of matching rows into one file
/// column_export export --db zinc.sqlite --table compounds --column smiles \
///     --where "variable1 = ? AND variable3 = ?" --param 1 --param Zinc_Plus \
///     --output sqlite_out.txt
///
/// # Same, fetching 500 rows at a time, one value per line
/// column_export export --db zinc.sqlite --table compounds --column smiles \
///     --where "1" --output out.txt --batch-size 500 --separator '\n'
///
/// # List the columns of a table
/// column_export columns --db zinc.sqlite --table compounds
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "column_export",
    version,
    about = "Streams one SQLite column, for rows matching a condition, into a file."
)]
pub struct Cli {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write one column of the matching rows to a file
    Export(ExportArgs),
    /// List the column names of a table
    Columns(ColumnsArgs),
}

/// Options for the `export` subcommand.
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Database path (SQLite file, must exist)
    #[arg(long, env = DB_PATH_ENV)]
    pub db: PathBuf,

    /// Table (or view) to read from
    #[arg(long)]
    pub table: String,

    /// Column whose values are written
    #[arg(long)]
    pub column: String,

    /// Filter predicate placed after WHERE; may contain `?` placeholders
    #[arg(long = "where", value_name = "CONDITION")]
    pub condition: String,

    /// Value bound to the next `?` placeholder (integer, real, or text)
    #[arg(
        long = "param",
        value_name = "VALUE",
        value_parser = parse_param,
        allow_negative_numbers = true
    )]
    pub params: Vec<ConditionParam>,

    /// Output file (created or truncated)
    #[arg(long)]
    pub output: PathBuf,

    /// Fetch this many rows at a time instead of one by one
    #[arg(long, allow_negative_numbers = true)]
    pub batch_size: Option<i64>,

    /// Written between values (escapes: \n \t \0 \\); default is no separator
    #[arg(long)]
    pub separator: Option<String>,
}

/// Options for the `columns` subcommand.
#[derive(Debug, Args)]
pub struct ColumnsArgs {
    /// Database path (SQLite file, must exist)
    #[arg(long, env = DB_PATH_ENV)]
    pub db: PathBuf,

    /// Table (or view) to inspect
    #[arg(long)]
    pub table: String,
}

impl ExportArgs {
    /// Converts parsed arguments into a validated export request.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::InvalidConfiguration` for a non-positive batch size
    /// or an empty required field.
    pub fn into_request(self) -> Result<ExportRequest, ExportError> {
        let batch_size = self.batch_size.map(BatchSize::new).transpose()?;
        let request = ExportRequest {
            source_location: self.db,
            table_name: self.table,
            condition: self.condition,
            condition_params: self.params,
            content_column: self.column,
            destination: self.output,
            batch_size,
            separator: self.separator.as_deref().map(unescape_separator),
        };
        request.validate()?;
        Ok(request)
    }
}

// clap would otherwise pick `From<String>` and bind every value as text
fn parse_param(raw: &str) -> Result<ConditionParam, Infallible> {
    raw.parse()
}

/// Expands `\n`, `\t`, `\r`, `\0` and `\\`; other sequences are kept as written.
pub(crate) fn unescape_separator(raw: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buf = [0u8; 4];
            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }
        match chars.next() {
            Some('n') => out.push(b'\n'),
            Some('t') => out.push(b'\t'),
            Some('r') => out.push(b'\r'),
            Some('0') => out.push(0),
            Some('\\') => out.push(b'\\'),
            Some(other) => {
                let mut buf = [0u8; 4];
                out.push(b'\\');
                out.extend_from_slice(other.encode_utf8(&mut buf).as_bytes());
            }
            None => out.push(b'\\'),
        }
    }
    out
}
