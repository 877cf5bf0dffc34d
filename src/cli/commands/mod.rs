//! CLI commands module

pub mod defaults;
pub mod generate_man;
pub mod init;
pub mod list;
pub mod run;

use clap::Args;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Config;
use crate::error::{SelectError, SummariseError};
use crate::rules::{RuleOrigin, RuleSet};
use crate::scanner::validate_root;

/// Selection options shared by `list` and `run`
#[derive(Args, Debug, Default)]
pub struct SelectionArgs {
    /// Extra exclude pattern, applied after the defaults (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Do not apply the built-in default excludes
    #[arg(long)]
    pub no_default_excludes: bool,

    /// Follow symbolic links while walking
    #[arg(long)]
    pub follow_links: bool,
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Project root directory
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Ignore file with additional rules
    #[arg(value_name = "IGNORE_FILE")]
    pub ignore_file: Option<PathBuf>,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Project root directory
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Destination file for the summary document
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Ignore file with additional rules
    #[arg(value_name = "IGNORE_FILE")]
    pub ignore_file: Option<PathBuf>,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Leave unreadable files out instead of failing
    #[arg(long)]
    pub skip_unreadable: bool,
}

/// Arguments for the defaults command
#[derive(Args, Debug)]
pub struct DefaultsArgs {
    /// Print bare patterns without comments and blank lines
    #[arg(long)]
    pub patterns_only: bool,
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to create summarise.toml in
    #[arg(value_name = "DIR", default_value = ".")]
    pub directory: PathBuf,

    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the generate-man command
#[derive(Args, Debug)]
pub struct GenerateManArgs {
    /// Output directory for the man page
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,
}

/// Validate `root` and load the configuration that applies to it
pub(crate) fn load_config(root: &Path, explicit: Option<&Path>) -> Result<Config, SummariseError> {
    validate_root(root)?;

    let config = match explicit {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load_or_default(root)?,
    };
    debug!("Effective config: {:?}", config);

    Ok(config)
}

/// Merge command-line selection flags into the configuration
pub(crate) fn apply_selection_args(config: &mut Config, args: SelectionArgs) {
    config.exclude.extend(args.exclude);
    if args.no_default_excludes {
        config.use_default_excludes = false;
    }
    if args.follow_links {
        config.follow_links = true;
    }
}

/// Build the layered rule set: defaults, configured excludes, ignore file
pub(crate) fn build_rules(
    config: &Config,
    root: &Path,
    ignore_file: Option<&Path>,
) -> Result<RuleSet, SelectError> {
    let mut rules = if config.use_default_excludes {
        RuleSet::with_defaults()
    } else {
        RuleSet::new()
    };

    if !config.exclude.is_empty() {
        rules.add_text(&config.exclude.join("\n"), RuleOrigin::Config);
    }

    let ignore_file = ignore_file
        .map(Path::to_path_buf)
        .or_else(|| config.resolved_ignore_file(root));
    if let Some(path) = ignore_file {
        rules.add_ignore_file(&path)?;
    }

    debug!(
        "Rule set holds {} rules ({} skipped lines)",
        rules.len(),
        rules.warnings().len()
    );

    Ok(rules)
}
