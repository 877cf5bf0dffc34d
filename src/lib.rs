//! summarise library
//!
//! Selects files from a project tree with layered ignore rules and
//! concatenates them into a single annotated document.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let root = Path::new(".");
//! let selection = summarise::select(root, Some(Path::new(".summariseignore")))?;
//! let mut out = Vec::new();
//! summarise::aggregate(root, &selection, &mut out)?;
//! # Ok::<(), summarise::SummariseError>(())
//! ```

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod error;
pub mod rules;
pub mod scanner;
pub mod utils;

pub use aggregator::{aggregate, Aggregator, ReadErrorPolicy};
pub use cli::exit_codes;
pub use error::SummariseError;
pub use rules::{IgnoreRule, RuleSet};
pub use scanner::{select, Selection, Selector};
