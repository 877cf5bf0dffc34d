//! Aggregator module - writes the summary document
//!
//! The document is a sequence of file blocks separated by one blank line:
//!
//! ```text
//! === FILE: relative/path/one ===
//! <raw content of file one>
//!
//! === FILE: relative/path/two ===
//! <raw content of file two>
//! ```
//!
//! File content is copied byte for byte. A newline is appended after content
//! that does not end with one, so the next delimiter always starts a line.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::AggregateError;
use crate::scanner::Selection;
use crate::utils::timing::Timer;

const HEADER_PREFIX: &str = "=== FILE: ";
const HEADER_SUFFIX: &str = " ===";

/// Delimiter line (without newline) for a relative path
pub fn file_header(path: &str) -> String {
    format!("{HEADER_PREFIX}{path}{HEADER_SUFFIX}")
}

/// What to do when a selected file cannot be read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadErrorPolicy {
    /// Stop with [`AggregateError::FileRead`]; the document is incomplete
    #[default]
    Abort,
    /// Log a warning and leave the file out of the document
    Skip,
}

/// Concatenates selected files into one document
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    on_read_error: ReadErrorPolicy,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_read_error(mut self, policy: ReadErrorPolicy) -> Self {
        self.on_read_error = policy;
        self
    }

    /// Write the document for `selection` to `out`, returning the number of
    /// file blocks written
    pub fn aggregate<W: Write>(
        &self,
        root: &Path,
        selection: &Selection,
        out: &mut W,
    ) -> Result<usize, AggregateError> {
        self.write_document(root, selection, out, "<stream>")
    }

    /// Write the document to `destination`, replacing it only on success.
    ///
    /// The document is built in a temporary file next to `destination` and
    /// renamed over it once complete; on error the temporary file is removed.
    pub fn write_to_file(
        &self,
        root: &Path,
        selection: &Selection,
        destination: &Path,
    ) -> Result<usize, AggregateError> {
        let label = destination.display().to_string();
        let write_error = |source: io::Error| AggregateError::OutputWrite {
            path: label.clone(),
            source,
        };

        let parent = destination
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let temp = NamedTempFile::new_in(parent).map_err(write_error)?;
        debug!("Writing document to temporary file {}", temp.path().display());

        let mut writer = BufWriter::new(temp);
        let count = self.write_document(root, selection, &mut writer, &label)?;

        let temp = writer
            .into_inner()
            .map_err(|e| write_error(e.into_error()))?;
        temp.persist(destination)
            .map_err(|e| write_error(e.error))?;

        Ok(count)
    }

    fn write_document<W: Write>(
        &self,
        root: &Path,
        selection: &Selection,
        out: &mut W,
        label: &str,
    ) -> Result<usize, AggregateError> {
        let timer = Timer::start();
        let write_error = |source: io::Error| AggregateError::OutputWrite {
            path: label.to_string(),
            source,
        };

        let mut written = 0;
        for path in selection {
            let content = match fs::read(root.join(path)) {
                Ok(content) => content,
                Err(source) => match self.on_read_error {
                    ReadErrorPolicy::Abort => {
                        return Err(AggregateError::FileRead {
                            path: path.clone(),
                            source,
                        })
                    }
                    ReadErrorPolicy::Skip => {
                        warn!("Skipping unreadable file '{}': {}", path, source);
                        continue;
                    }
                },
            };

            if written > 0 {
                out.write_all(b"\n").map_err(write_error)?;
            }
            writeln!(out, "{}", file_header(path)).map_err(write_error)?;
            out.write_all(&content).map_err(write_error)?;
            if !content.is_empty() && !content.ends_with(b"\n") {
                out.write_all(b"\n").map_err(write_error)?;
            }

            debug!("Wrote {} ({} bytes)", path, content.len());
            written += 1;
        }
        out.flush().map_err(write_error)?;

        info!(
            "Wrote {} of {} files in {}",
            written,
            selection.len(),
            timer.elapsed_formatted()
        );

        Ok(written)
    }
}

/// Write the document for `selection` to `out` with the default abort policy
pub fn aggregate<W: Write>(
    root: &Path,
    selection: &Selection,
    out: &mut W,
) -> Result<usize, AggregateError> {
    Aggregator::new().aggregate(root, selection, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn selection(paths: &[&str]) -> Selection {
        paths.iter().map(|p| p.to_string()).collect()
    }

    fn render(root: &Path, paths: &[&str]) -> String {
        let mut out = Vec::new();
        aggregate(root, &selection(paths), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_file_header_format() {
        assert_eq!(file_header("src/main.rs"), "=== FILE: src/main.rs ===");
    }

    #[test]
    fn test_single_file_has_no_trailing_separator() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "alpha\n").unwrap();

        assert_eq!(render(dir.path(), &["a.txt"]), "=== FILE: a.txt ===\nalpha\n");
    }

    #[test]
    fn test_blocks_separated_by_one_blank_line() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a.txt"), "alpha\n").unwrap();
        fs::write(dir.path().join("sub/b.md"), "beta\n").unwrap();

        assert_eq!(
            render(dir.path(), &["a.txt", "sub/b.md"]),
            "=== FILE: a.txt ===\nalpha\n\n=== FILE: sub/b.md ===\nbeta\n"
        );
    }

    #[test]
    fn test_content_without_final_newline() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "alpha").unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        fs::write(dir.path().join("c.txt"), "gamma").unwrap();

        assert_eq!(
            render(dir.path(), &["a.txt", "b.txt", "c.txt"]),
            "=== FILE: a.txt ===\nalpha\n\n=== FILE: b.txt ===\n\n=== FILE: c.txt ===\ngamma\n"
        );
    }

    #[test]
    fn test_content_is_copied_byte_for_byte() {
        let dir = tempdir().unwrap();
        let bytes: &[u8] = b"line one\r\n\tline two\r\n\xff\xfe\n";
        fs::write(dir.path().join("raw.bin"), bytes).unwrap();

        let mut out = Vec::new();
        aggregate(dir.path(), &selection(&["raw.bin"]), &mut out).unwrap();

        let header = b"=== FILE: raw.bin ===\n";
        assert_eq!(&out[..header.len()], header);
        assert_eq!(&out[header.len()..], bytes);
    }

    #[test]
    fn test_missing_file_aborts_by_default() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "alpha\n").unwrap();

        let mut out = Vec::new();
        let err = aggregate(dir.path(), &selection(&["a.txt", "gone.txt"]), &mut out).unwrap_err();

        match err {
            AggregateError::FileRead { path, .. } => assert_eq!(path, "gone.txt"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_skip_policy_continues_past_missing_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "alpha\n").unwrap();
        fs::write(dir.path().join("c.txt"), "gamma\n").unwrap();

        let mut out = Vec::new();
        let count = Aggregator::new()
            .on_read_error(ReadErrorPolicy::Skip)
            .aggregate(dir.path(), &selection(&["a.txt", "b.txt", "c.txt"]), &mut out)
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "=== FILE: a.txt ===\nalpha\n\n=== FILE: c.txt ===\ngamma\n"
        );
    }

    #[test]
    fn test_empty_selection_writes_nothing() {
        let dir = tempdir().unwrap();
        assert_eq!(render(dir.path(), &[]), "");
    }

    #[test]
    fn test_write_to_file_persists_document() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("root");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("a.txt"), "alpha\n").unwrap();
        let dest = dir.path().join("summary.txt");

        let count = Aggregator::new()
            .write_to_file(&root, &selection(&["a.txt"]), &dest)
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(
            fs::read_to_string(&dest).unwrap(),
            "=== FILE: a.txt ===\nalpha\n"
        );
    }

    #[test]
    fn test_write_to_file_keeps_previous_document_on_error() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("root");
        fs::create_dir(&root).unwrap();
        let dest = dir.path().join("summary.txt");
        fs::write(&dest, "previous").unwrap();

        let result = Aggregator::new().write_to_file(&root, &selection(&["missing.txt"]), &dest);

        assert!(matches!(result, Err(AggregateError::FileRead { .. })));
        assert_eq!(fs::read_to_string(&dest).unwrap(), "previous");
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name() != "root" && e.file_name() != "summary.txt")
            .collect();
        assert!(leftovers.is_empty(), "temporary file was not cleaned up");
    }
}
