//! Run command - select files and write the summary document

use colored::Colorize;
use std::path::Path;
use tracing::{debug, info, warn};

use super::{apply_selection_args, build_rules, load_config, RunArgs};
use crate::aggregator::{Aggregator, ReadErrorPolicy};
use crate::error::SummariseError;
use crate::exit_codes;
use crate::rules::{IgnoreRule, RuleOrigin};
use crate::scanner::{relative_path, Selector};
use crate::utils::timing::{RunTiming, Timer};

pub fn execute(args: RunArgs, config_path: Option<&Path>) -> Result<i32, SummariseError> {
    let mut config = load_config(&args.root, config_path)?;
    apply_selection_args(&mut config, args.selection);
    if args.skip_unreadable {
        config.skip_unreadable = true;
    }

    let mut rules = build_rules(&config, &args.root, args.ignore_file.as_deref())?;

    // A document from a previous run must not end up inside the next one
    if let Some(rel) = destination_inside_root(&args.root, &args.output) {
        match IgnoreRule::exclude_exact(&rel, RuleOrigin::Destination) {
            Ok(rule) => {
                debug!("Excluding destination {} from the selection", rel);
                rules.push(rule);
            }
            Err(e) => warn!("Could not exclude destination '{}': {}", rel, e),
        }
    }

    let timer = Timer::start();
    let selection = Selector::new(rules)
        .follow_links(config.follow_links)
        .select(&args.root)?;
    let selection_time = timer.elapsed();

    let policy = if config.skip_unreadable {
        ReadErrorPolicy::Skip
    } else {
        ReadErrorPolicy::Abort
    };

    let timer = Timer::start();
    let count = Aggregator::new()
        .on_read_error(policy)
        .write_to_file(&args.root, &selection, &args.output)?;

    let timing = RunTiming {
        selection: selection_time,
        aggregation: timer.elapsed(),
    };
    info!("Run finished: {}", timing.summary());

    println!(
        "{} Wrote {} files to {}",
        "Success:".green().bold(),
        count,
        args.output.display().to_string().cyan()
    );

    Ok(exit_codes::SUCCESS)
}

/// Path of `destination` relative to `root`, if it lies below it
pub(crate) fn destination_inside_root(root: &Path, destination: &Path) -> Option<String> {
    let root = root.canonicalize().ok()?;
    let file_name = destination.file_name()?;
    let parent = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let destination = parent.canonicalize().ok()?.join(file_name);

    relative_path(&root, &destination).filter(|rel| !rel.is_empty())
}
