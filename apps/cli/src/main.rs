mod args;
mod config;
mod dirs;

use std::io::{self, Write};
use std::path::Path;

use cdr_app::{AppPaths, AppState, ensure_app_data_dir};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use args::{CliArgs, Command};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config = config::load_or_create().map_err(io::Error::other)?;
    init_tracing(&config.config.log_filter);
    if config.created {
        tracing::info!(path = %config.file.display(), "created default config");
    }

    let app_state = match args.db {
        Some(ref db_path) => AppState::new(db_path.clone()),
        None => {
            let data_dir =
                dirs::resolve_data_dir(config.config.data_dir.as_deref()).map_err(io::Error::other)?;
            tracing::debug!(
                dir = %data_dir.dir.display(),
                existing = data_dir.matched_existing,
                "using data dir"
            );
            let paths = AppPaths::new(data_dir.dir);
            ensure_app_data_dir(&paths)?;
            AppState::new(paths.db_path)
        }
    };
    app_state
        .setup_db()
        .map_err(|err| io::Error::other(format!("failed to initialize database: {}", err)))?;

    let services = &app_state.services;
    match args.command {
        Command::Ingest { path } => {
            let stats = if path == Path::new("-") {
                services.ingest.run_reader(io::stdin().lock(), "-")?
            } else {
                services.ingest.run_path(&path)?
            };
            print_json(&stats)?;
        }
        Command::Upload { file } => {
            let contents = std::fs::read(&file)?;
            let file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| file.to_string_lossy().to_string());
            let stats = services.ingest.upload(&file_name, &contents)?;
            print_json(&stats)?;
        }
        Command::Records { summary } => {
            if summary {
                print_json(&services.records.summary()?)?;
            } else {
                print_json(&services.records.list()?)?;
            }
        }
        Command::Record { id } => print_json(&services.records.get(id)?)?,
        Command::Runs { limit } => print_json(&services.records.runs(limit)?)?,
    }

    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<(), cdr_app::AppError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
