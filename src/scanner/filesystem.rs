//! File system walking with rule-based pruning

use std::collections::BTreeSet;
use std::path::{Component, Path};

use tracing::{trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::rules::RuleSet;

/// Relative, `/`-separated form of `path` below `root`.
///
/// Returns `None` when `path` is not below `root` or a component is not
/// valid UTF-8.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;

    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            _ => return None,
        }
    }

    Some(parts.join("/"))
}

/// Whether the walker should keep `entry` (and descend into it)
fn keep_entry(root: &Path, entry: &DirEntry, rules: &RuleSet) -> bool {
    if entry.depth() == 0 {
        return true;
    }

    let Some(rel) = relative_path(root, entry.path()) else {
        warn!(
            "Skipping non UTF-8 path: {}",
            entry.path().to_string_lossy()
        );
        return false;
    };

    let is_dir = entry.file_type().is_dir();
    match rules.last_match(&rel, is_dir) {
        Some(rule) if !rule.is_negation() => {
            trace!(
                "Excluded {}{} by '{}' ({})",
                rel,
                if is_dir { "/" } else { "" },
                rule.pattern(),
                rule.origin()
            );
            false
        }
        _ => true,
    }
}

/// Whether `entry` is a regular file, following a symlink that the walker
/// did not follow itself
fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

/// Walk `root` and collect every included regular file.
///
/// Excluded directories are pruned, so nothing below them is ever visited.
pub fn scan_directory(root: &Path, rules: &RuleSet, follow_links: bool) -> BTreeSet<String> {
    let mut files = BTreeSet::new();

    let walker = WalkDir::new(root)
        .follow_links(follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| keep_entry(root, entry, rules));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if entry.depth() == 0 || !is_regular_file(&entry) {
            continue;
        }

        if let Some(rel) = relative_path(root, entry.path()) {
            if !files.insert(rel.clone()) {
                trace!("Duplicate path ignored: {}", rel);
            }
        }
    }

    files
}
