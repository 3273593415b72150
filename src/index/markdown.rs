//! Markdown / MDX page indexer.

use crate::index::{DocType, DocumentIndexer, IndexedDocument, InputFile};
use crate::slug::{document_id, strip_doc_extension, title_from_path};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::fs;
use std::sync::LazyLock;

const CLI_PAGES: &str = "runtime/reference/cli/";
const TUTORIALS: &str = "examples/tutorials/";

static RE_FRONTMATTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---\r?\n(.*?)\r?\n---\r?\n(.*)\z").unwrap());
static RE_H1: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^# (.+)$").unwrap());
static RE_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#{1,3} (.+)$").unwrap());
static RE_TITLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^title:\s*["'](.+)["']"#).unwrap());
static RE_TITLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^title:[ \t]*(\S.*)$").unwrap());
static RE_DESCRIPTION_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^description:\s*["'](.+)["']"#).unwrap());
static RE_DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^description:[ \t]*(\S.*)$").unwrap());
static RE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^url:[ \t]*(\S.*)$").unwrap());
static RE_TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"tags: \[(.*?)\]").unwrap());
static RE_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bcommand:\s*["']?([a-zA-Z0-9_-]+)"#).unwrap());
static RE_COMMAND_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([a-z0-9_-]+)\.(md|mdx)$").unwrap());

// Content cleaning, applied in this order
static RE_NAV: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<nav\b[^>]*>.*?</nav>").unwrap());
static RE_ROLE_NAV_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<([a-zA-Z][\w:-]*)[^>]*\brole=["']navigation["'][^>]*>"#).unwrap()
});
static RE_CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static RE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static RE_IMAGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!\[.*?\]\(.*?\)").unwrap());
static RE_LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());
static RE_BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());
static RE_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

pub struct MarkdownIndexer {
    base_url: String,
    min_content_length: usize,
}

impl MarkdownIndexer {
    pub fn new(base_url: &str, min_content_length: usize) -> Self {
        Self {
            base_url: base_url.to_string(),
            min_content_length,
        }
    }

    fn index(&self, file: &InputFile) -> Result<Option<IndexedDocument>> {
        let source = fs::read_to_string(&file.full_path)
            .with_context(|| format!("failed to read {}", file.full_path.display()))?;
        let last_modified = fs::metadata(&file.full_path)
            .and_then(|m| m.modified())
            .map(|t| DateTime::<Utc>::from(t).timestamp_millis())
            .unwrap_or_else(|_| Utc::now().timestamp_millis());

        Ok(index_markdown(
            &file.path.replace('\\', "/"),
            &source,
            &self.base_url,
            self.min_content_length,
            last_modified,
        ))
    }
}

impl DocumentIndexer for MarkdownIndexer {
    fn accepts(&self, file: &InputFile) -> bool {
        file.doc_type == DocType::Markdown
    }

    fn try_index(&self, file: &InputFile) -> Vec<IndexedDocument> {
        match self.index(file) {
            Ok(Some(doc)) => {
                tracing::debug!("Indexed document: {}", doc.title);
                vec![doc]
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Error indexing file {}: {:#}", file.path, e);
                Vec::new()
            }
        }
    }
}

/// Build the document for one markdown source, or `None` when its cleaned
/// body is shorter than `min_content_length` characters.
pub fn index_markdown(
    relative_path: &str,
    source: &str,
    base_url: &str,
    min_content_length: usize,
    last_modified: i64,
) -> Option<IndexedDocument> {
    let source = source.replace("\r\n", "\n");
    let (frontmatter, body) = split_frontmatter(&source);

    let content = clean_content(body);
    let content_len = content.chars().count();
    if content_len < min_content_length {
        tracing::debug!("Skipping {} - content too short ({} chars)", relative_path, content_len);
        return None;
    }

    let title = extract_title(frontmatter, body, relative_path);
    let description = frontmatter_value(frontmatter, &RE_DESCRIPTION_QUOTED, &RE_DESCRIPTION);

    let (kind, command) = if relative_path.starts_with(CLI_PAGES) {
        (Some("cli".to_string()), command_name(frontmatter, relative_path))
    } else {
        (None, None)
    };

    let mut segments = relative_path.split('/');
    let category = non_empty_or_general(segments.next());
    let section = non_empty_or_general(segments.next());
    let subsection = segments.next().map(str::to_string);

    let path = page_path(relative_path, frontmatter);

    Some(IndexedDocument {
        id: document_id(relative_path),
        title,
        content,
        url: format!("{}{}", base_url, path),
        path: Some(path),
        category,
        section,
        subsection,
        description,
        tags: extract_tags(frontmatter),
        headings: extract_headings(body),
        last_modified,
        kind,
        command,
        api_info: None,
    })
}

/// Split a leading `---` block off. Without one the frontmatter is empty.
pub fn split_frontmatter(source: &str) -> (&str, &str) {
    match RE_FRONTMATTER.captures(source) {
        Some(caps) => match (caps.get(1), caps.get(2)) {
            (Some(fm), Some(body)) => (fm.as_str(), body.as_str()),
            _ => ("", source),
        },
        None => ("", source),
    }
}

/// Frontmatter `title`, else the first H1, else the file name title-cased.
fn extract_title(frontmatter: &str, body: &str, relative_path: &str) -> String {
    if let Some(title) = frontmatter_value(frontmatter, &RE_TITLE_QUOTED, &RE_TITLE) {
        return title;
    }
    if let Some(caps) = RE_H1.captures(body) {
        return caps[1].trim().to_string();
    }
    title_from_path(relative_path)
}

fn frontmatter_value(frontmatter: &str, quoted: &Regex, bare: &Regex) -> Option<String> {
    quoted
        .captures(frontmatter)
        .or_else(|| bare.captures(frontmatter))
        .map(|caps| caps[1].trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn extract_tags(frontmatter: &str) -> Vec<String> {
    let Some(caps) = RE_TAGS.captures(frontmatter) else {
        return Vec::new();
    };
    caps[1]
        .split(',')
        .map(|tag| tag.trim().replace(['"', '\''], ""))
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// H1 to H3 heading texts in document order.
pub fn extract_headings(body: &str) -> Vec<String> {
    RE_HEADING
        .captures_iter(body)
        .map(|caps| caps[1].trim().to_string())
        .collect()
}

pub fn clean_content(body: &str) -> String {
    let text = RE_NAV.replace_all(body, "");
    let text = strip_role_navigation(&text);
    let text = RE_CODE_FENCE.replace_all(&text, "");
    let text = RE_COMMENT.replace_all(&text, "");
    let text = RE_TAG.replace_all(&text, "");
    let text = RE_IMAGE.replace_all(&text, "");
    let text = RE_LINK.replace_all(&text, "$1");
    let text = RE_BLANK_LINES.replace_all(&text, "\n\n");
    let text = RE_SPACES.replace_all(&text, " ");
    text.trim().to_string()
}

/// Drop elements carrying `role="navigation"` along with their content.
fn strip_role_navigation(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(caps) = RE_ROLE_NAV_OPEN.captures(rest) {
        let (Some(open), Some(tag)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        // ASCII folding keeps byte offsets valid for slicing `after`
        let closing = format!("</{}>", tag.as_str().to_ascii_lowercase());
        let after = &rest[open.end()..];
        let Some(close_at) = after.to_ascii_lowercase().find(&closing) else {
            break;
        };
        out.push_str(&rest[..open.start()]);
        rest = &after[close_at + closing.len()..];
    }
    out.push_str(rest);
    out
}

/// Root-relative page path: the frontmatter `url:` when present, else the
/// file path without extension.
fn page_path(relative_path: &str, frontmatter: &str) -> String {
    if let Some(caps) = RE_URL.captures(frontmatter) {
        let declared = caps[1].trim();
        let declared = declared
            .strip_prefix(['"', '\'', '`'])
            .unwrap_or(declared);
        let declared = declared
            .strip_suffix(['"', '\'', '`'])
            .unwrap_or(declared);
        return ensure_leading_slash(declared);
    }

    let mut path = strip_doc_extension(relative_path).to_string();
    if let Some(tutorial) = path.strip_prefix(TUTORIALS) {
        path = format!("examples/{}_tutorial", tutorial);
    }
    if let Some(dir) = path.strip_suffix("/index") {
        path = format!("{}/", dir);
    }
    ensure_leading_slash(&path)
}

fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

fn command_name(frontmatter: &str, relative_path: &str) -> Option<String> {
    if let Some(caps) = RE_COMMAND.captures(frontmatter) {
        return Some(caps[1].to_string());
    }
    let file_name = relative_path.rsplit('/').next().unwrap_or(relative_path);
    RE_COMMAND_FILE
        .captures(file_name)
        .map(|caps| caps[1].to_string())
}

fn non_empty_or_general(segment: Option<&str>) -> String {
    match segment {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => "general".to_string(),
    }
}
