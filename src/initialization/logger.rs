//! Logger initialization.
//!
//! All log output goes to stderr; stdout is reserved for the CLI summary.

use std::io::{IsTerminal, Write};

use crate::config::{LogFormat, LOG_TARGET};
use crate::error_handling::InitializationError;
use colored::*;
use log::{Level, LevelFilter};

/// Initializes the logger with the specified level and format.
///
/// The logger reads `RUST_LOG` first; `level` then overrides the global and
/// crate-level filters. sqlx statement logging is capped at `warn` (or lower,
/// when `level` is lower) so the SQL text only appears through this crate's
/// own `debug` records.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Quick debugging without CLI flags
/// RUST_LOG=debug column_export columns --db my.sqlite --table my_table
///
/// # CLI flag takes precedence
/// RUST_LOG=debug column_export --log-level warn export --db my.sqlite ...
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(std::io::stderr().is_terminal());

    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stderr);
    builder.filter_level(level);
    builder.filter_module("sqlx", sqlx_level(level));
    builder.filter_module(LOG_TARGET, level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                let line = json_line(
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    &record.args().to_string(),
                );
                writeln!(buf, "{line}")
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let line = plain_line(record.level(), record.target(), &record.args().to_string());
                writeln!(buf, "{line}")
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)?;
    Ok(())
}

/// sqlx never logs above `warn`, and not at all below the requested level.
fn sqlx_level(level: LevelFilter) -> LevelFilter {
    level.min(LevelFilter::Warn)
}

/// One JSON object per record: `{"ts":..,"level":..,"target":..,"msg":..}`.
fn json_line(ts_millis: i64, level: Level, target: &str, msg: &str) -> String {
    serde_json::json!({
        "ts": ts_millis,
        "level": level.as_str(),
        "target": target,
        "msg": msg,
    })
    .to_string()
}

fn plain_line(level: Level, target: &str, msg: &str) -> String {
    let label = format!("{level:<5}");
    let label = match level {
        Level::Error => label.red().bold(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug => label.blue(),
        Level::Trace => label.purple(),
    };
    format!("{} {} {}", label, target.cyan(), msg)
}
