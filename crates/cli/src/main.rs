// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod commands;
mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use formflow_domain::{CatalogEntity, FormSchema, Report, Response, ResponseValues};
use serde_json::Value as Json;
use std::path::PathBuf;
use time::OffsetDateTime;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Validate form schemas, walk conditional navigation and run reports.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log filter (e.g. `debug`, `formflow=trace`). Overrides `RUST_LOG`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Validate a form schema
    Validate {
        /// Path to the schema JSON file
        #[arg(short, long)]
        schema: PathBuf,

        /// Also apply the checks required before publishing
        #[arg(long)]
        publish: bool,
    },
    /// Compute the next position and visited path for a set of answers
    Navigate {
        /// Path to the schema JSON file
        #[arg(short, long)]
        schema: PathBuf,

        /// Path to the answers JSON file (field id to value)
        #[arg(short, long)]
        values: PathBuf,

        /// Field just answered; omit to get the first field
        #[arg(long)]
        from: Option<String>,
    },
    /// Check answers against a schema
    Check {
        /// Path to the schema JSON file
        #[arg(short, long)]
        schema: PathBuf,

        /// Path to the answers JSON file (field id to value)
        #[arg(short, long)]
        values: PathBuf,

        /// Enforce required fields on the navigation path
        #[arg(long)]
        submit: bool,
    },
    /// Run every visualization of a report
    Report {
        /// Path to the report JSON file
        #[arg(short, long)]
        report: PathBuf,

        /// Path to the responses JSON file (an array of responses)
        #[arg(long)]
        responses: PathBuf,
    },
    /// Import catalog entities from a CSV with `code` and `name` columns
    ImportCatalog {
        /// Path to the CSV file
        #[arg(long)]
        csv: PathBuf,

        /// Academic year the imported entities belong to
        #[arg(long)]
        academic_year: String,

        /// Path to the existing catalog JSON file to merge into
        #[arg(long)]
        existing: Option<PathBuf>,
    },
}

fn init_tracing(log_level: Option<&str>) {
    let filter: EnvFilter = log_level.map_or_else(
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        EnvFilter::new,
    );

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn render(output: &Json, pretty: bool) -> Result<String, CliError> {
    let rendered: String = if pretty {
        serde_json::to_string_pretty(output)?
    } else {
        serde_json::to_string(output)?
    };
    Ok(rendered)
}

/// Runs a command, printing its JSON output to stdout.
fn run(command: &Command, pretty: bool) -> Result<(), CliError> {
    match command {
        Command::Validate { schema, publish } => {
            let schema: FormSchema = commands::read_json(schema)?;
            println!("{}", render(&commands::validate(&schema, *publish)?, pretty)?);
        }
        Command::Navigate {
            schema,
            values,
            from,
        } => {
            let schema: FormSchema = commands::read_json(schema)?;
            let values: ResponseValues = commands::read_json(values)?;
            let output: Json = commands::navigate(&schema, &values, from.as_deref())?;
            println!("{}", render(&output, pretty)?);
        }
        Command::Check {
            schema,
            values,
            submit,
        } => {
            let schema: FormSchema = commands::read_json(schema)?;
            let values: ResponseValues = commands::read_json(values)?;
            let (output, count) = commands::check(&schema, &values, *submit)?;
            println!("{}", render(&output, pretty)?);
            if count > 0 {
                return Err(CliError::CheckFailed { count });
            }
        }
        Command::Report { report, responses } => {
            let report: Report = commands::read_json(report)?;
            let responses: Vec<Response> = commands::read_json(responses)?;
            println!("{}", render(&commands::report(&report, responses)?, pretty)?);
        }
        Command::ImportCatalog {
            csv,
            academic_year,
            existing,
        } => {
            let content: String = commands::read_text(csv)?;
            let existing: Vec<CatalogEntity> = match existing {
                Some(path) => commands::read_json(path)?,
                None => Vec::new(),
            };
            let output: Json = commands::import(
                &content,
                academic_year,
                &existing,
                OffsetDateTime::now_utc(),
            )?;
            println!("{}", render(&output, pretty)?);
        }
    }
    Ok(())
}

fn main() -> std::process::ExitCode {
    let args: Args = Args::parse();
    init_tracing(args.log_level.as_deref());

    info!(command = ?args.command, "Running formflow");

    match run(&args.command, args.pretty) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Command failed");
            eprintln!("error: {err}");
            std::process::ExitCode::FAILURE
        }
    }
}
