//! List command - print the selected files, one per line

use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::{apply_selection_args, build_rules, load_config, ListArgs};
use crate::error::{AggregateError, SummariseError};
use crate::exit_codes;
use crate::scanner::{Selection, Selector};

pub fn execute(args: ListArgs, config_path: Option<&Path>) -> Result<i32, SummariseError> {
    let mut config = load_config(&args.root, config_path)?;
    apply_selection_args(&mut config, args.selection);

    let rules = build_rules(&config, &args.root, args.ignore_file.as_deref())?;
    let selection = Selector::new(rules)
        .follow_links(config.follow_links)
        .select(&args.root)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match write_listing(&selection, &mut out) {
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

/// Write one path per line
pub fn write_listing<W: Write>(selection: &Selection, out: &mut W) -> io::Result<()> {
    for path in selection {
        writeln!(out, "{}", path)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_listing() {
        let selection: Selection = ["b.txt", "a/c.md"].into_iter().map(String::from).collect();
        let mut out = Vec::new();

        write_listing(&selection, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "a/c.md\nb.txt\n");
    }

    #[test]
    fn test_write_listing_empty() {
        let mut out = Vec::new();
        write_listing(&Selection::default(), &mut out).unwrap();
        assert!(out.is_empty());
    }
}
