//! Route file loading from disk.
//!
//! The route file is UTF-8 text with one record per line:
//!
//! ```text
//! # comment
//! /net/lldp   git   https://example.org/net/lldp.git
//! ```
//!
//! Loading is all-or-nothing. The first malformed line or duplicate prefix
//! aborts the whole load and no partial table is returned.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::routing::table::{RouteTable, Source};

/// Error type for route file loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{}: {source}", .file.display())]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {reason}", .file.display())]
    Parse {
        file: PathBuf,
        /// 1-based line number.
        line: usize,
        reason: ParseErrorKind,
    },
}

impl ConfigError {
    /// Line number for parse errors, `None` for I/O failures.
    pub fn line(&self) -> Option<usize> {
        match self {
            ConfigError::Io { .. } => None,
            ConfigError::Parse { line, .. } => Some(*line),
        }
    }
}

/// Why a single line was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    InvalidUtf8,
    /// Also covers an empty prefix: fields never come out of the split empty.
    FieldCount(usize),
    DuplicateEntry(String),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::InvalidUtf8 => write!(f, "invalid UTF-8"),
            ParseErrorKind::FieldCount(n) => {
                write!(f, "expected 3 fields (prefix vcs url), found {}", n)
            }
            ParseErrorKind::DuplicateEntry(p) => write!(f, "duplicate entry {}", p),
        }
    }
}

/// Load a route table from `path`.
pub fn load(path: &Path) -> Result<RouteTable, ConfigError> {
    let bytes = fs::read(path).map_err(|source| ConfigError::Io {
        file: path.to_path_buf(),
        source,
    })?;

    let table = parse(path, &bytes)?;

    tracing::debug!(path = %path.display(), routes = table.len(), "Route file parsed");
    Ok(table)
}

/// Parse route file contents. `file` is only used for error reporting.
pub fn parse(file: &Path, contents: &[u8]) -> Result<RouteTable, ConfigError> {
    let mut table = RouteTable::new();

    for (idx, raw) in contents.split(|b| *b == b'\n').enumerate() {
        let line = idx + 1;
        let fail = |reason| ConfigError::Parse {
            file: file.to_path_buf(),
            line,
            reason,
        };

        let mut text = std::str::from_utf8(raw).map_err(|_| fail(ParseErrorKind::InvalidUtf8))?;
        if line == 1 {
            text = text.strip_prefix('\u{feff}').unwrap_or(text);
        }
        if text.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        let &[prefix, vcs, url] = fields.as_slice() else {
            return Err(fail(ParseErrorKind::FieldCount(fields.len())));
        };

        if !can_match(prefix) {
            tracing::warn!(
                file = %file.display(),
                line,
                prefix,
                "Prefix can never match a request path"
            );
        }

        table
            .try_insert(prefix, Source::new(vcs, url))
            .map_err(|dup| fail(ParseErrorKind::DuplicateEntry(dup.0)))?;
    }

    Ok(table)
}

// Every resolver candidate of an absolute request path starts with '/'.
fn can_match(prefix: &str) -> bool {
    prefix.starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse_str(s: &str) -> Result<RouteTable, ConfigError> {
        parse(Path::new("routes.txt"), s.as_bytes())
    }

    fn parse_reason(s: &str) -> (usize, ParseErrorKind) {
        match parse_str(s) {
            Err(ConfigError::Parse { line, reason, .. }) => (line, reason),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_well_formed() {
        let table = parse_str(
            "\n# comment\n/net/lldp git https://example.org/net/lldp.git\n/www\thg   https://example.org/www\n",
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get("/net/lldp"),
            Some(&Source::new("git", "https://example.org/net/lldp.git"))
        );
        assert_eq!(table.get("/www"), Some(&Source::new("hg", "https://example.org/www")));
    }

    #[test]
    fn test_crlf_and_blank_whitespace_lines() {
        let table = parse_str("/a git u1\r\n   \r\n\t\n/b git u2\r\n").unwrap();
        assert_eq!(table.get("/a").unwrap().url, "u1");
        assert_eq!(table.get("/b").unwrap().url, "u2");
    }

    #[test]
    fn test_wrong_field_count_names_line() {
        let (line, reason) = parse_reason("# header\n/a git u1\n/b git\n/c git u3\n");
        assert_eq!(line, 3);
        assert_eq!(reason, ParseErrorKind::FieldCount(2));

        let (line, reason) = parse_reason("/a git u1 extra\n");
        assert_eq!(line, 1);
        assert_eq!(reason, ParseErrorKind::FieldCount(4));
    }

    #[test]
    fn test_duplicate_reports_second_occurrence() {
        let (line, reason) = parse_reason("/a git u1\n\n/b git u2\n/a hg u3\n");
        assert_eq!(line, 4);
        assert_eq!(reason, ParseErrorKind::DuplicateEntry("/a".into()));
    }

    #[test]
    fn test_any_non_empty_prefix_loads() {
        let table = parse_str("/ git https://example.org/root.git\npkg git u2\n/net/ git u3\n").unwrap();
        assert_eq!(table.len(), 3);

        let m = crate::routing::resolve(&table, "/").unwrap();
        assert_eq!(m.root, "/");
        assert_eq!(m.source.url, "https://example.org/root.git");
        assert_eq!(table.get("pkg").unwrap().url, "u2");
    }

    #[test]
    fn test_leading_bom_is_ignored() {
        let table = parse(Path::new("routes.txt"), "\u{feff}/a git u1\n/b git u2\n".as_bytes()).unwrap();
        assert_eq!(table.get("/a").unwrap().url, "u1");

        let table = parse_str("\u{feff}# comment\n/a git u1\n").unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_comment_only_when_first_char() {
        // an indented '#' is not a comment, so this is a 4-field record
        let (line, _) = parse_reason("  # not a comment\n");
        assert_eq!(line, 1);
        assert!(parse_str("#/a git u\n").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let err = parse(Path::new("routes.txt"), b"/a git u1\n/b git \xff\xfe\n").unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert!(matches!(
            err,
            ConfigError::Parse { reason: ParseErrorKind::InvalidUtf8, .. }
        ));
    }

    #[test]
    fn test_error_display_includes_file_and_line() {
        let err = parse_str("/a git u\n/a git u\n").unwrap_err();
        assert_eq!(err.to_string(), "routes.txt:2: duplicate entry /a");
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "/www hg https://example.org/www").unwrap();

        let table = load(file.path()).unwrap();
        assert_eq!(table.get("/www").unwrap().vcs, "hg");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert_eq!(err.line(), None);
    }
}
