//! Init command - write a default summarise.toml

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::fs;

use super::InitArgs;
use crate::config::{Config, CONFIG_FILENAME};
use crate::exit_codes;

pub fn execute(args: InitArgs) -> Result<i32> {
    if !args.directory.is_dir() {
        bail!("'{}' is not a directory", args.directory.display());
    }

    let config_path = args.directory.join(CONFIG_FILENAME);
    if config_path.exists() && !args.force {
        eprintln!(
            "{} {} already exists. Use --force to overwrite.",
            "Error:".red().bold(),
            config_path.display()
        );
        return Ok(exit_codes::ERROR);
    }

    let content = Config::default().to_toml()?;
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!(
        "{} Created {}",
        "Success:".green().bold(),
        config_path.display().to_string().cyan()
    );

    Ok(exit_codes::SUCCESS)
}
