//! Configuration module
//!
//! Settings are read from an optional `summarise.toml`. Command-line flags
//! take precedence over the file.

pub mod loader;

pub use loader::{Config, CONFIG_FILENAME};
