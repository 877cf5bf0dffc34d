//! Exit codes for the CLI
//!
//! | Code | Constant | Meaning | Example |
//! |------|----------|---------|---------|
//! | 0 | `SUCCESS` | Success | Selection listed, document written |
//! | 1 | `ERROR` | Runtime error | Selected file unreadable, output not writable |
//! | 2 | `INVALID_INPUT` | Invalid input | Missing root, unreadable ignore file, bad config |
//!
//! Argument errors reported by clap also exit with 2.

use crate::error::SummariseError;

/// Operation completed successfully.
pub const SUCCESS: i32 = 0;

/// Runtime error while producing output.
///
/// Used when:
/// - A selected file cannot be read (abort policy)
/// - The destination cannot be written or renamed into place
/// - Writing a configuration file or man page fails
pub const ERROR: i32 = 1;

/// Invalid input.
///
/// Used when:
/// - The root is missing or is not a directory
/// - The ignore file cannot be read
/// - The configuration file cannot be read or parsed
pub const INVALID_INPUT: i32 = 2;

/// Exit code for an error returned by a command
pub fn for_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<SummariseError>() {
        Some(e) if e.is_invalid_input() => INVALID_INPUT,
        _ => ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AggregateError, SelectError};
    use std::io;

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [SUCCESS, ERROR, INVALID_INPUT];
        for i in 0..codes.len() {
            for j in (i + 1)..codes.len() {
                assert_ne!(codes[i], codes[j]);
            }
        }
    }

    #[test]
    fn test_for_error_invalid_root() {
        let err = anyhow::Error::from(SummariseError::from(SelectError::InvalidRoot {
            path: "x".to_string(),
            reason: "missing".to_string(),
        }));
        assert_eq!(for_error(&err), INVALID_INPUT);
    }

    #[test]
    fn test_for_error_file_read() {
        let err = anyhow::Error::from(SummariseError::from(AggregateError::FileRead {
            path: "x".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        }));
        assert_eq!(for_error(&err), ERROR);
    }

    #[test]
    fn test_for_error_other() {
        assert_eq!(for_error(&anyhow::anyhow!("boom")), ERROR);
    }
}
