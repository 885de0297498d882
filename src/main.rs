//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `column_export` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use std::process;

use column_export::config::{Cli, ColumnsArgs, Command, ExportArgs};
use column_export::initialization::{init_logger_with, load_dotenv};
use column_export::{column_names, export};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // .env may supply COLUMN_EXPORT_DB, so load it before parsing
    let dotenv_path = load_dotenv();

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;
    if let Some(path) = dotenv_path {
        debug!("Loaded environment from {}", path.display());
    }

    let outcome = match cli.command {
        Command::Export(args) => run_export(args).await,
        Command::Columns(args) => run_columns(args).await,
    };

    if let Err(e) = outcome {
        eprintln!("column_export error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn run_export(args: ExportArgs) -> Result<()> {
    let request = args
        .into_request()
        .context("Invalid export arguments")?;
    let rows = export(&request).await.with_context(|| {
        format!(
            "Failed to export {}.{}",
            request.table_name, request.content_column
        )
    })?;
    println!(
        "Wrote {} row{} to {}",
        rows,
        if rows == 1 { "" } else { "s" },
        request.destination.display()
    );
    Ok(())
}

async fn run_columns(args: ColumnsArgs) -> Result<()> {
    let columns = column_names(&args.db, &args.table)
        .await
        .with_context(|| format!("Failed to list columns of {}", args.table))?;
    for column in columns {
        println!("{column}");
    }
    Ok(())
}
