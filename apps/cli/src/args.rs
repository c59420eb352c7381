use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "cdr-tracker", about = "Ingest and query call detail records")]
pub struct CliArgs {
    /// Use this database file instead of the one in the data dir.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ingest a CDR file, a directory of CDR files, or `-` for stdin.
    Ingest { path: PathBuf },
    /// Ingest a file as a single upload, labelled with its file name.
    Upload { file: PathBuf },
    /// Print every stored record.
    Records {
        /// Print per-format totals instead of the records.
        #[arg(long)]
        summary: bool,
    },
    /// Print the record with the given id.
    Record { id: u64 },
    /// Print recent ingest runs.
    Runs {
        #[arg(long)]
        limit: Option<u32>,
    },
}
