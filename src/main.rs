//! summarise - flatten a project tree into one annotated document
//!
//! This is the main entry point for the CLI application.

use clap::Parser;
use colored::Colorize;

use summarise::cli::{self, Cli, Commands};
use summarise::exit_codes;

fn main() {
    let cli = Cli::parse();

    let env_verbose = std::env::var(cli::logging::VERBOSE_ENV).ok();
    cli::logging::setup_logging(cli.verbose, env_verbose.as_deref());

    let config = cli.config.as_deref();
    let result: anyhow::Result<i32> = match cli.command {
        Commands::List(args) => cli::commands::list::execute(args, config).map_err(Into::into),
        Commands::Run(args) => cli::commands::run::execute(args, config).map_err(Into::into),
        Commands::Defaults(args) => cli::commands::defaults::execute(args).map_err(Into::into),
        Commands::Init(args) => cli::commands::init::execute(args),
        Commands::GenerateMan(args) => cli::commands::generate_man::execute(args),
    };

    match result {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(exit_codes::for_error(&e));
        }
    }
}
