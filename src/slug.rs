//! Slugs, ids and display names derived from paths and category titles.

use regex::Regex;
use std::sync::LazyLock;

static RE_WORD_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w").unwrap());

/// URL stub for a category title.
///
/// - replace whitespace with underscores
/// - lowercase
/// - strip everything outside `[a-z0-9_-]`
/// - lowercase again
pub fn url_stub(category: &str) -> String {
    let underscored: String = category
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    let lowered = underscored.to_lowercase();
    let mut stub = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            stub.push(c);
        }
        // All other chars (including '/', '.', ':') are stripped
    }
    stub.to_lowercase()
}

/// Strip a trailing `.md` / `.mdx` extension.
pub fn strip_doc_extension(path: &str) -> &str {
    path.strip_suffix(".mdx")
        .or_else(|| path.strip_suffix(".md"))
        .unwrap_or(path)
}

/// Stable document id for a relative source path.
///
/// "runtime/fundamentals/testing.md" → "runtime-fundamentals-testing"
pub fn document_id(relative_path: &str) -> String {
    let mut id = String::with_capacity(relative_path.len());
    for c in strip_doc_extension(relative_path).chars() {
        match c {
            '/' | '\\' => id.push('-'),
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' => id.push(c),
            _ => {}
        }
    }
    id.to_lowercase()
}

/// Title-cased name from the last path segment.
///
/// "runtime/getting_started/first-project.md" → "First Project"
pub fn title_from_path(relative_path: &str) -> String {
    let stem = strip_doc_extension(relative_path);
    let last = stem.rsplit('/').next().unwrap_or(stem);
    let spaced = last.replace(['-', '_'], " ");
    RE_WORD_START
        .replace_all(&spaced, |caps: &regex::Captures| caps[0].to_uppercase())
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_simple() {
        assert_eq!(url_stub("File System"), "file_system");
    }

    #[test]
    fn stub_strips_punctuation() {
        assert_eq!(url_stub("Fetch API"), "fetch_api");
        assert_eq!(url_stub("assert/strict"), "assertstrict");
        assert_eq!(url_stub("I/O"), "io");
        assert_eq!(url_stub("Web-Sockets 2.0"), "web-sockets_20");
    }

    #[test]
    fn stub_is_idempotent() {
        let once = url_stub("Network  Streams");
        assert_eq!(once, "network__streams");
        assert_eq!(url_stub(&once), once);
    }

    #[test]
    fn id_from_nested_path() {
        assert_eq!(
            document_id("runtime/fundamentals/testing.md"),
            "runtime-fundamentals-testing"
        );
        assert_eq!(document_id("deploy/API Reference/index.mdx"), "deploy-apireference-index");
    }

    #[test]
    fn id_is_deterministic() {
        let path = "examples/tutorials/fresh_app.md";
        assert_eq!(document_id(path), document_id(path));
        assert_eq!(document_id(path), "examples-tutorials-fresh_app");
    }

    #[test]
    fn title_from_last_segment() {
        assert_eq!(title_from_path("runtime/getting_started/first-project.md"), "First Project");
        assert_eq!(title_from_path("lint/index.mdx"), "Index");
    }

    #[test]
    fn extension_strip() {
        assert_eq!(strip_doc_extension("a/b.mdx"), "a/b");
        assert_eq!(strip_doc_extension("a/b.md"), "a/b");
        assert_eq!(strip_doc_extension("a/b.json"), "a/b.json");
    }
}
