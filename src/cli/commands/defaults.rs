//! Defaults command - print the built-in exclude rules

use std::io::{self, Write};

use super::DefaultsArgs;
use crate::error::{AggregateError, SummariseError};
use crate::exit_codes;
use crate::rules::constants::DEFAULT_EXCLUDES;

pub fn execute(args: DefaultsArgs) -> Result<i32, SummariseError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match write_defaults(args.patterns_only, &mut out) {
        Ok(()) => {}
        // A closed pipe (`| head`) is not a failure
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
        Err(e) => {
            return Err(AggregateError::OutputWrite {
                path: "<stdout>".to_string(),
                source: e,
            }
            .into())
        }
    }

    Ok(exit_codes::SUCCESS)
}

/// Write the default rule text to `out`
pub fn write_defaults<W: Write>(patterns_only: bool, out: &mut W) -> io::Result<()> {
    out.write_all(render(patterns_only).as_bytes())?;
    out.flush()
}

/// The default rule text, optionally stripped to bare patterns
pub fn render(patterns_only: bool) -> String {
    if !patterns_only {
        return DEFAULT_EXCLUDES.to_string();
    }

    DEFAULT_EXCLUDES
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| format!("{l}\n"))
        .collect()
}
