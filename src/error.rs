//! Error types for summarise
//!
//! This module defines custom error types using `thiserror`. Every fatal
//! error names the path involved and the underlying reason so the CLI can
//! print it verbatim.

use thiserror::Error;

/// Main error type for summarise
#[derive(Error, Debug)]
pub enum SummariseError {
    /// Selection-related errors
    #[error(transparent)]
    Select(#[from] SelectError),

    /// Aggregation-related errors
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SummariseError {
    /// Whether the error stems from invalid input (root, ignore file, config)
    /// rather than from I/O performed while producing the document
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::Select(_) | Self::Config(_))
    }
}

/// Errors that occur while building the rule set or walking the tree
#[derive(Error, Debug)]
pub enum SelectError {
    /// The root is missing or is not a directory
    #[error("Invalid root directory '{path}': {reason}")]
    InvalidRoot {
        /// Root path as given by the caller
        path: String,
        /// Why the root was rejected
        reason: String,
    },

    /// The user-supplied ignore file could not be read
    #[error("Cannot read ignore file '{path}': {source}")]
    IgnoreFileUnreadable {
        /// Path to the ignore file
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },
}

/// Errors that occur while writing the summary document
#[derive(Error, Debug)]
pub enum AggregateError {
    /// A selected file could not be read
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        /// Path relative to the root
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The destination could not be created, written or persisted
    #[error("Failed to write output '{path}': {source}")]
    OutputWrite {
        /// Destination path
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },
}

/// Errors that occur while loading the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        /// Path to the configuration file
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this tool
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        /// Path to the configuration file
        path: String,
        /// The underlying TOML error
        source: toml::de::Error,
    },

    /// The configuration could not be rendered as TOML
    #[error("Failed to serialize config: {message}")]
    Serialize {
        /// Error message
        message: String,
    },
}
