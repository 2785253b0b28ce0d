//! binlist CLI
//!
//! Command-line access to list files written by `binlist_core`.
//!
//! Every invocation opens the file, runs one operation and exits. The
//! `--kind` flag picks the record codec and must match the one the file
//! was written with; the file itself does not record it.
//!
//! # Commands
//!
//! - `push`, `insert`, `erase`, `get`, `update` - single-record operations
//! - `pop-back`, `pop-front`, `clear` - removals
//! - `print`, `size`, `sort`, `iter` - whole-list operations
//! - `inspect` - Display header and space usage
//! - `verify` - Check the link chain against the header

mod commands;

use clap::{Parser, Subcommand};
use commands::{Kind, OutputFormat};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Operate on file-backed binary lists.
#[derive(Parser)]
#[command(name = "binlist")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the list file (defaults to intList.bin, strList.bin or personList.bin)
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Record kind stored in the file
    #[arg(global = true, short, long, value_enum, default_value_t = Kind::String)]
    kind: Kind,

    /// Report rejected indices and empty-list pops as errors
    #[arg(global = true, long)]
    strict: bool,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Operations exposed on the command line.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Append a value at the tail
    Push {
        /// Value to append (the name, for person lists)
        value: String,

        /// Age, for person lists
        #[arg(short, long)]
        age: Option<i32>,
    },

    /// Insert a value so it ends up at INDEX
    Insert {
        /// Target position (0..=size)
        index: usize,

        /// Value to insert (the name, for person lists)
        value: String,

        /// Age, for person lists
        #[arg(short, long)]
        age: Option<i32>,
    },

    /// Remove the value at INDEX
    Erase {
        /// Position to remove
        index: usize,
    },

    /// Print the value at INDEX
    Get {
        /// Position to read
        index: usize,
    },

    /// Replace the value at INDEX
    Update {
        /// Position to overwrite
        index: usize,

        /// New value (the name, for person lists)
        value: String,

        /// Age, for person lists
        #[arg(short, long)]
        age: Option<i32>,
    },

    /// Remove the last value
    PopBack,

    /// Remove the first value
    PopFront,

    /// Delete every value and reset the file
    Clear,

    /// Print a numbered listing
    Print,

    /// Print the number of values
    Size,

    /// Sort values in ascending order
    Sort,

    /// Walk the list with the built-in cursor, one value per line
    Iter,

    /// Display header and space usage
    Inspect {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Check the link chain against the header
    Verify,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Version = cli.command {
        println!("binlist CLI v{}", env!("CARGO_PKG_VERSION"));
        println!("binlist core v{}", binlist_core::VERSION);
        return Ok(());
    }

    let path = cli
        .path
        .unwrap_or_else(|| PathBuf::from(cli.kind.default_file()));
    commands::run(&path, cli.kind, cli.strict, cli.command)?;

    Ok(())
}
