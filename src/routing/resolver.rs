//! Longest-prefix route resolution.
//!
//! Candidates are produced by dropping trailing path segments one at a time,
//! so a prefix only ever matches on a segment boundary: `/net` matches
//! `/net` and `/net/lldp` but never `/network`.

use crate::routing::table::{RouteTable, Source};

/// A successful lookup: the source and the prefix it was registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMatch<'t> {
    pub source: &'t Source,
    pub root: &'t str,
}

/// No registered prefix is an ancestor of the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no route matches path")]
pub struct NotFound;

/// Find the longest registered prefix of `path`.
///
/// Tries the full path first, then each shorter path obtained by cutting at
/// the last `/`, down to and including the empty string.
pub fn resolve<'t>(table: &'t RouteTable, path: &str) -> Result<RouteMatch<'t>, NotFound> {
    let mut candidate = path;
    loop {
        if let Some((root, source)) = table.get_key_value(candidate) {
            return Ok(RouteMatch { source, root });
        }
        match candidate.rfind('/') {
            Some(idx) => candidate = &candidate[..idx],
            None if candidate.is_empty() => return Err(NotFound),
            None => candidate = "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str, &str)]) -> RouteTable {
        let mut t = RouteTable::new();
        for (prefix, vcs, url) in entries {
            t.try_insert(*prefix, Source::new(*vcs, *url)).unwrap();
        }
        t
    }

    #[test]
    fn test_segment_boundary() {
        let t = table(&[("/net", "git", "https://example.org/net.git")]);

        assert_eq!(resolve(&t, "/network"), Err(NotFound));

        let m = resolve(&t, "/net/lldp").unwrap();
        assert_eq!(m.root, "/net");
        assert_eq!(m.source.url, "https://example.org/net.git");

        assert_eq!(resolve(&t, "/net").unwrap().root, "/net");
    }

    #[test]
    fn test_longest_prefix_wins() {
        let t = table(&[
            ("/net", "git", "https://example.org/net.git"),
            ("/net/lldp", "git", "https://example.org/net/lldp.git"),
        ]);

        let m = resolve(&t, "/net/lldp/internal/x").unwrap();
        assert_eq!(m.root, "/net/lldp");
        assert_eq!(m.source.url, "https://example.org/net/lldp.git");

        let m = resolve(&t, "/net/other").unwrap();
        assert_eq!(m.root, "/net");
    }

    #[test]
    fn test_trailing_slash_falls_back_to_parent() {
        let t = table(&[("/www", "hg", "https://example.org/www")]);
        assert_eq!(resolve(&t, "/www/").unwrap().root, "/www");
    }

    #[test]
    fn test_not_found() {
        let t = table(&[("/www", "hg", "https://example.org/www")]);
        assert_eq!(resolve(&t, "/other"), Err(NotFound));
        assert_eq!(resolve(&t, "/"), Err(NotFound));
        assert_eq!(resolve(&t, ""), Err(NotFound));
        assert_eq!(resolve(&RouteTable::new(), "/www"), Err(NotFound));
    }

    #[test]
    fn test_path_without_leading_slash() {
        let t = table(&[("a", "git", "u")]);
        assert_eq!(resolve(&t, "a/b").unwrap().root, "a");
    }
}
