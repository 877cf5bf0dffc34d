//! Glob-to-matcher compiler
//!
//! Translates an ignore-file glob into an anchored [`Regex`]. Only the small
//! glob dialect used by ignore files is understood:
//!
//! | Glob | Matches |
//! |------|---------|
//! | `*` | any run of characters except `/` |
//! | `?` | exactly one character except `/` |
//! | `**/` (leading) | zero or more leading directories |
//! | `/**/` (interior) | zero or more intermediate directories |
//! | `/**` (trailing) | everything below the preceding directory |
//! | `\x` | the literal character `x` |
//!
//! Any other character, including `[` and `]`, is matched literally.

use regex::Regex;

/// A compiled glob
#[derive(Debug, Clone)]
pub struct Glob {
    source: String,
    regex: Regex,
}

impl Glob {
    /// Compile a glob. Fails with a human-readable reason on malformed input.
    pub fn new(glob: &str) -> Result<Self, String> {
        let translated = translate(glob)?;
        let regex = Regex::new(&translated).map_err(|e| e.to_string())?;

        Ok(Self {
            source: glob.to_string(),
            regex,
        })
    }

    /// The glob as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the glob matches the whole of `text`
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Translate a glob into an anchored regular expression.
///
/// The `s` flag lets `**` match every character `*` does, newlines included.
fn translate(glob: &str) -> Result<String, String> {
    let chars: Vec<char> = glob.chars().collect();
    let mut out = String::with_capacity(glob.len() * 2 + 6);
    out.push_str("(?s)^");

    let mut i = 0;
    let mut segment_start = true;

    while i < chars.len() {
        match chars[i] {
            '\\' => {
                let Some(&next) = chars.get(i + 1) else {
                    return Err("dangling escape at end of pattern".to_string());
                };
                out.push_str(&regex::escape(&next.to_string()));
                segment_start = next == '/';
                i += 2;
            }
            '*' => {
                let run = chars[i..].iter().take_while(|&&c| c == '*').count();
                let after = i + run;
                let segment_end = after == chars.len() || chars[after] == '/';

                if run >= 2 && segment_start && segment_end {
                    if after == chars.len() {
                        // `**` or `dir/**`
                        out.push_str(".*");
                        i = after;
                    } else {
                        // `**/` at any position consumes its slash
                        out.push_str("(?:.*/)?");
                        i = after + 1;
                    }
                    segment_start = true;
                } else {
                    out.push_str("[^/]*");
                    segment_start = false;
                    i = after;
                }
            }
            '?' => {
                out.push_str("[^/]");
                segment_start = false;
                i += 1;
            }
            c => {
                out.push_str(&regex::escape(&c.to_string()));
                segment_start = c == '/';
                i += 1;
            }
        }
    }

    out.push('$');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(glob: &str, text: &str) -> bool {
        Glob::new(glob).unwrap().is_match(text)
    }

    #[test]
    fn test_star_stays_within_segment() {
        assert!(matches("*.log", "error.log"));
        assert!(matches("*.log", ".log"));
        assert!(!matches("*.log", "logs/error.log"));
        assert!(!matches("*.log", "error.log.txt"));
    }

    #[test]
    fn test_question_mark_matches_single_char() {
        assert!(matches("file?.txt", "file1.txt"));
        assert!(!matches("file?.txt", "file.txt"));
        assert!(!matches("file?.txt", "file12.txt"));
        assert!(!matches("a?b", "a/b"));
    }

    #[test]
    fn test_leading_globstar() {
        assert!(matches("**/foo.txt", "foo.txt"));
        assert!(matches("**/foo.txt", "a/foo.txt"));
        assert!(matches("**/foo.txt", "a/b/c/foo.txt"));
        assert!(!matches("**/foo.txt", "a/xfoo.txt"));
    }

    #[test]
    fn test_interior_globstar() {
        assert!(matches("a/**/b", "a/b"));
        assert!(matches("a/**/b", "a/x/b"));
        assert!(matches("a/**/b", "a/x/y/b"));
        assert!(!matches("a/**/b", "ab"));
        assert!(!matches("a/**/b", "x/a/b"));
    }

    #[test]
    fn test_trailing_globstar() {
        assert!(matches("docs/**", "docs/a.md"));
        assert!(matches("docs/**", "docs/deep/a.md"));
        assert!(!matches("docs/**", "docs"));
        assert!(!matches("docs/**", "other/a.md"));
    }

    #[test]
    fn test_bare_globstar_matches_everything() {
        assert!(matches("**", "a"));
        assert!(matches("**", "a/b/c"));
    }

    #[test]
    fn test_globstar_matches_newlines_in_names() {
        assert!(matches("*", "a\nb"));
        assert!(matches("docs/**", "docs/a\nb"));
        assert!(matches("**/x", "a\nb/x"));
        assert!(matches("a/**/b", "a/c\nd/b"));
        assert!(!matches("?", "\n\n"));
    }

    #[test]
    fn test_double_star_inside_segment_acts_as_star() {
        assert!(matches("a**b", "axxb"));
        assert!(!matches("a**b", "a/b"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert!(matches("a+b(c).txt", "a+b(c).txt"));
        assert!(!matches("a.b", "axb"));
        assert!(matches("[abc]", "[abc]"));
        assert!(!matches("[abc]", "a"));
    }

    #[test]
    fn test_escaped_wildcards_are_literal() {
        assert!(matches(r"\*.txt", "*.txt"));
        assert!(!matches(r"\*.txt", "a.txt"));
        assert!(matches(r"what\?", "what?"));
        assert!(!matches(r"what\?", "whatx"));
    }

    #[test]
    fn test_dangling_escape_is_rejected() {
        let err = Glob::new("foo\\").unwrap_err();
        assert!(err.contains("dangling escape"));
    }

    #[test]
    fn test_as_str_returns_source() {
        assert_eq!(Glob::new("src/*.rs").unwrap().as_str(), "src/*.rs");
    }
}
