//! Scanner module - file selection
//!
//! The [`Selector`] walks a root directory, evaluates every entry against a
//! [`RuleSet`] and returns a [`Selection`]: a sorted, deduplicated list of
//! `/`-separated file paths relative to the root.
//!
//! An excluded directory is pruned. Negation rules targeting paths below it
//! never apply, since nothing below it is visited:
//!
//! ```text
//! build/
//! !build/keep.txt     # has no effect, build/ is never entered
//! ```

mod filesystem;

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::SelectError;
use crate::rules::RuleSet;
use crate::utils::timing::Timer;

pub use filesystem::relative_path;

/// The ordered set of selected files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    paths: Vec<String>,
}

impl Selection {
    /// All selected paths, sorted byte-wise
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.paths.iter()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths
            .binary_search_by(|p| p.as_str().cmp(path))
            .is_ok()
    }
}

impl From<BTreeSet<String>> for Selection {
    fn from(set: BTreeSet<String>) -> Self {
        Self {
            paths: set.into_iter().collect(),
        }
    }
}

impl FromIterator<String> for Selection {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        iter.into_iter().collect::<BTreeSet<_>>().into()
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// Walks a directory tree and applies a rule set
#[derive(Debug, Clone)]
pub struct Selector {
    rules: RuleSet,
    follow_links: bool,
}

impl Selector {
    /// Create a selector over an already-built rule set
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            follow_links: false,
        }
    }

    /// Follow symbolic links while walking
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Select every included regular file below `root`
    pub fn select(&self, root: &Path) -> Result<Selection, SelectError> {
        validate_root(root)?;

        let timer = Timer::start();
        let files = filesystem::scan_directory(root, &self.rules, self.follow_links);
        let selection = Selection::from(files);

        info!(
            "Selected {} files under {} in {}",
            selection.len(),
            root.display(),
            timer.elapsed_formatted()
        );

        Ok(selection)
    }
}

/// Ensure `root` exists, is a directory and can be listed
pub fn validate_root(root: &Path) -> Result<(), SelectError> {
    let invalid = |reason: &str| SelectError::InvalidRoot {
        path: root.display().to_string(),
        reason: reason.to_string(),
    };

    match root.metadata() {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(invalid("not a directory")),
        Err(e) => return Err(invalid(&e.to_string())),
    }

    // An unlistable root would otherwise walk as an empty tree
    fs::read_dir(root)
        .map(|_| ())
        .map_err(|e| invalid(&format!("cannot list directory: {}", e)))
}

/// Select files below `root` using the built-in defaults followed by the
/// rules of `ignore_file`, if given
pub fn select(root: &Path, ignore_file: Option<&Path>) -> Result<Selection, SelectError> {
    validate_root(root)?;

    let mut rules = RuleSet::with_defaults();
    if let Some(path) = ignore_file {
        rules.add_ignore_file(path)?;
    }
    debug!("Rule set holds {} rules", rules.len());

    Selector::new(rules).select(root)
}
