//! Discovery page rendering.
//!
//! The fetch tool reads a single meta tag:
//!
//! ```text
//! <meta name="go-import" content="{host}{root} {vcs} {url}">
//! ```
//!
//! All interpolated values come from the request or the route file, so they
//! are attribute-escaped.

use crate::routing::RouteMatch;

/// Render the import page for a resolved route.
pub fn import_page(host: &str, matched: &RouteMatch<'_>) -> String {
    let content = format!(
        "{}{} {} {}",
        host, matched.root, matched.source.vcs, matched.source.url
    );
    format!(
        "<html>\n\t<head>\n\t\t<meta name=\"go-import\" content=\"{}\">\n\t</head>\n\t<body></body>\n</html>",
        escape_attr(&content)
    )
}

/// Escape text for a double-quoted HTML attribute.
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            '\0' => out.push('\u{FFFD}'),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Source;

    #[test]
    fn test_import_page() {
        let source = Source::new("git", "https://example.org/net/lldp.git");
        let matched = RouteMatch {
            source: &source,
            root: "/net/lldp",
        };

        let page = import_page("example.com", &matched);
        assert!(page.contains(
            r#"<meta name="go-import" content="example.com/net/lldp git https://example.org/net/lldp.git">"#
        ));
        assert!(page.starts_with("<html>"));
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(
            escape_attr(r#"a"><script>&'"#),
            "a&#34;&gt;&lt;script&gt;&amp;&#39;"
        );
        assert_eq!(escape_attr("plain/path"), "plain/path");
    }
}
