//! # CLI Module
//!
//! This module defines the command-line interface for summarise using `clap`.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `list` | Print the selected files, one per line |
//! | `run` | Write the summary document to a file |
//! | `defaults` | Print the built-in exclude rules |
//! | `init` | Create a default `summarise.toml` |
//!
//! ## Global Options
//!
//! - `-v, --verbose` - Increase verbosity level (use multiple times: -v, -vv, -vvv)
//! - `-c, --config <FILE>` - Path to configuration file
//!
//! Setting `VERBOSE=1` in the environment has the same effect as `-vv`.
//! Diagnostics are written to stderr, prefixed with `LOG:`.
//!
//! ## Examples
//!
//! ```bash
//! # Show what would be summarised
//! summarise list . .summariseignore
//!
//! # Write the summary document
//! summarise run . /tmp/summary.txt .summariseignore
//! ```
//!
//! ## Migrating from positional invocations
//!
//! Scripts that called the tool as `ROOT OUTPUT [IGNORE_FILE]` or
//! `--test-list-files ROOT [IGNORE_FILE]` map onto the subcommands directly,
//! with the same argument order:
//!
//! | Positional form | Subcommand |
//! |-----------------|------------|
//! | `ROOT OUTPUT [IGNORE_FILE]` | `summarise run ROOT OUTPUT [IGNORE_FILE]` |
//! | `--test-list-files ROOT [IGNORE_FILE]` | `summarise list ROOT [IGNORE_FILE]` |

pub mod commands;
pub mod exit_codes;
pub mod logging;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{DefaultsArgs, GenerateManArgs, InitArgs, ListArgs, RunArgs};

/// summarise - Flatten a project tree into one annotated document
#[derive(Parser, Debug)]
#[command(name = "summarise")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file (defaults to ROOT/summarise.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the selected files, one per line
    List(ListArgs),

    /// Select files and write the summary document
    Run(RunArgs),

    /// Print the built-in default exclude rules
    Defaults(DefaultsArgs),

    /// Create a default summarise.toml
    Init(InitArgs),

    /// Generate man page (hidden, for packaging)
    #[command(hide = true)]
    GenerateMan(GenerateManArgs),
}
