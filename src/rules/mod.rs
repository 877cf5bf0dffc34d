//! Ignore rules - parsing, layering and evaluation
//!
//! A [`RuleSet`] is a single ordered list of [`IgnoreRule`]s built from, in
//! order, the built-in defaults, configured extra excludes and an optional
//! user ignore file. Evaluation is last-match-wins.

pub mod constants;
pub mod pattern;

use std::fmt;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::SelectError;
use constants::DEFAULT_EXCLUDES;
use pattern::Glob;

/// Where a rule came from, used in diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOrigin {
    /// Built-in default excludes
    Default,
    /// `exclude` list of the configuration file
    Config,
    /// A user-supplied ignore file
    IgnoreFile(String),
    /// Generated to keep the output document out of its own selection
    Destination,
}

impl fmt::Display for RuleOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "defaults"),
            Self::Config => write!(f, "config"),
            Self::IgnoreFile(path) => write!(f, "{}", path),
            Self::Destination => write!(f, "destination"),
        }
    }
}

/// A single ignore rule
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    glob: Glob,
    negated: bool,
    anchored: bool,
    dir_only: bool,
    origin: RuleOrigin,
}

impl IgnoreRule {
    /// Parse one ignore-file line.
    ///
    /// Returns `Ok(None)` for blank and comment lines, and `Err(reason)` for
    /// lines that cannot be turned into a rule.
    pub fn parse(line: &str, origin: RuleOrigin) -> Result<Option<Self>, String> {
        let line = trim_unescaped_end(line.trim_start());
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (negated, mut pattern) = match line.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, line),
        };

        let mut dir_only = false;
        if pattern.ends_with('/') && !pattern.ends_with("\\/") {
            dir_only = true;
            pattern = &pattern[..pattern.len() - 1];
        }

        let mut anchored = false;
        if let Some(rest) = pattern.strip_prefix('/') {
            anchored = true;
            pattern = rest;
        }

        if pattern.is_empty() {
            return Err("empty pattern".to_string());
        }
        anchored |= pattern.contains('/');

        let glob = Glob::new(pattern)?;

        Ok(Some(Self {
            glob,
            negated,
            anchored,
            dir_only,
            origin,
        }))
    }

    /// A rooted rule excluding exactly one relative path
    pub fn exclude_exact(path: &str, origin: RuleOrigin) -> Result<Self, String> {
        let mut escaped = String::with_capacity(path.len());
        for c in path.chars() {
            if matches!(c, '*' | '?' | '\\') {
                escaped.push('\\');
            }
            escaped.push(c);
        }

        Ok(Self {
            glob: Glob::new(&escaped)?,
            negated: false,
            anchored: true,
            dir_only: false,
            origin,
        })
    }

    /// Whether this rule re-includes what it matches
    pub fn is_negation(&self) -> bool {
        self.negated
    }

    /// Whether the pattern is matched against the full relative path
    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// Whether the rule only applies to directories
    pub fn is_dir_only(&self) -> bool {
        self.dir_only
    }

    /// Where this rule was declared
    pub fn origin(&self) -> &RuleOrigin {
        &self.origin
    }

    /// The glob, without `!` and trailing `/`
    pub fn pattern(&self) -> &str {
        self.glob.as_str()
    }

    /// Check a `/`-separated path relative to the root
    pub fn matches(&self, path: &str, is_dir: bool) -> bool {
        if self.dir_only && !is_dir {
            return false;
        }

        if self.anchored {
            self.glob.is_match(path)
        } else {
            let basename = path.rsplit('/').next().unwrap_or(path);
            self.glob.is_match(basename)
        }
    }
}

/// Strip trailing whitespace, keeping one whitespace character escaped by
/// an odd run of backslashes (`foo\ ` matches `foo `)
fn trim_unescaped_end(line: &str) -> &str {
    let trimmed = line.trim_end();
    if trimmed.len() == line.len() {
        return trimmed;
    }

    let backslashes = trimmed.chars().rev().take_while(|&c| c == '\\').count();
    if backslashes % 2 == 1 {
        let kept = line[trimmed.len()..]
            .chars()
            .next()
            .map_or(0, char::len_utf8);
        &line[..trimmed.len() + kept]
    } else {
        trimmed
    }
}

/// A malformed ignore-file line that was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternWarning {
    /// Where the line came from
    pub origin: RuleOrigin,
    /// 1-based line number
    pub line: usize,
    /// The offending line, trimmed
    pub pattern: String,
    /// Why it was rejected
    pub reason: String,
}

impl fmt::Display for PatternWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: skipping pattern '{}': {}",
            self.origin, self.line, self.pattern, self.reason
        )
    }
}

/// Ordered rule list, evaluated last-match-wins
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<IgnoreRule>,
    warnings: Vec<PatternWarning>,
}

impl RuleSet {
    /// An empty rule set; everything is included
    pub fn new() -> Self {
        Self::default()
    }

    /// A rule set holding only the built-in defaults
    pub fn with_defaults() -> Self {
        let mut set = Self::new();
        set.add_text(DEFAULT_EXCLUDES, RuleOrigin::Default);
        set
    }

    /// Append every rule parsed from ignore-file formatted `text`
    pub fn add_text(&mut self, text: &str, origin: RuleOrigin) {
        for (index, line) in text.lines().enumerate() {
            match IgnoreRule::parse(line, origin.clone()) {
                Ok(Some(rule)) => self.rules.push(rule),
                Ok(None) => {}
                Err(reason) => {
                    let warning = PatternWarning {
                        origin: origin.clone(),
                        line: index + 1,
                        pattern: line.trim().to_string(),
                        reason,
                    };
                    warn!("{}", warning);
                    self.warnings.push(warning);
                }
            }
        }
    }

    /// Append the rules of a user ignore file
    pub fn add_ignore_file(&mut self, path: &Path) -> Result<(), SelectError> {
        let content = fs::read_to_string(path).map_err(|e| SelectError::IgnoreFileUnreadable {
            path: path.display().to_string(),
            source: e,
        })?;

        let before = self.rules.len();
        self.add_text(&content, RuleOrigin::IgnoreFile(path.display().to_string()));
        debug!(
            "Loaded {} rules from {}",
            self.rules.len() - before,
            path.display()
        );

        Ok(())
    }

    /// Append a single rule
    pub fn push(&mut self, rule: IgnoreRule) {
        self.rules.push(rule);
    }

    /// The rule that decides `path`, if any
    pub fn last_match(&self, path: &str, is_dir: bool) -> Option<&IgnoreRule> {
        self.rules.iter().rev().find(|r| r.matches(path, is_dir))
    }

    /// Whether `path` is excluded; unmatched paths are included
    pub fn is_excluded(&self, path: &str, is_dir: bool) -> bool {
        self.last_match(path, is_dir)
            .is_some_and(|rule| !rule.is_negation())
    }

    /// All rules in evaluation order
    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    /// Lines skipped while building the set
    pub fn warnings(&self) -> &[PatternWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
