//! Human-readable summary of a generated full index.

use crate::index::IndexedDocument;
use crate::render::json::FullIndex;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const LISTED: usize = 5;
const TOP_TAGS: usize = 10;
const VERY_SHORT: usize = 100;
const VERY_LONG: usize = 10_000;

pub fn load(path: &Path) -> Result<FullIndex> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid index file {}", path.display()))
}

pub fn summarize(index: &FullIndex) -> String {
    let docs = &index.documents;
    let stats = &index.metadata.stats;
    let mut out = String::new();

    out.push_str("General Statistics:\n");
    out.push_str(&format!("   Documents: {}\n", docs.len()));
    out.push_str(&format!("   Generated: {}\n", index.metadata.generated_at));
    out.push_str(&format!("   Total characters: {}\n", stats.total_characters));
    out.push_str(&format!("   Average length: {} chars\n", stats.average_document_length));
    out.push('\n');

    let mut categories: IndexMap<&str, usize> = IndexMap::new();
    for doc in docs {
        *categories.entry(doc.category.as_str()).or_default() += 1;
    }
    // Stable: equal counts keep first-seen order
    categories.sort_by(|_, a, _, b| b.cmp(a));
    out.push_str("Documents by Category:\n");
    for (category, count) in &categories {
        out.push_str(&format!("   {}: {} documents\n", category, count));
    }
    out.push('\n');

    let mut by_length: Vec<&IndexedDocument> = docs.iter().collect();
    by_length.sort_by_key(|d| std::cmp::Reverse(d.content_len()));
    out.push_str("Longest Documents:\n");
    for doc in by_length.iter().take(LISTED) {
        out.push_str(&format!("   \"{}\" ({} chars)\n", doc.title, doc.content_len()));
    }
    out.push_str("Shortest Documents:\n");
    for doc in by_length.iter().rev().take(LISTED) {
        out.push_str(&format!("   \"{}\" ({} chars)\n", doc.title, doc.content_len()));
    }
    out.push('\n');

    let mut tag_counts: IndexMap<&str, usize> = IndexMap::new();
    for tag in docs.iter().flat_map(|d| d.tags.iter()) {
        *tag_counts.entry(tag.as_str()).or_default() += 1;
    }
    out.push_str("Tags Found:\n");
    if tag_counts.is_empty() {
        out.push_str("   No tags found\n");
    } else {
        out.push_str(&format!("   Total unique tags: {}\n", tag_counts.len()));
        tag_counts.sort_by(|_, a, _, b| b.cmp(a));
        out.push_str("   Most common tags:\n");
        for (tag, count) in tag_counts.iter().take(TOP_TAGS) {
            out.push_str(&format!("     {}: {} documents\n", tag, count));
        }
    }
    out.push('\n');

    let described = docs.iter().filter(|d| d.description.is_some()).count();
    let untagged = docs.iter().filter(|d| d.tags.is_empty()).count();
    out.push_str("Descriptions:\n");
    out.push_str(&format!(
        "   Documents with descriptions: {}/{} ({}%)\n",
        described,
        docs.len(),
        percent(described, docs.len())
    ));
    out.push_str(&format!("   Documents without descriptions: {}\n", docs.len() - described));
    out.push_str(&format!("   Documents without tags: {}\n", untagged));
    out.push('\n');

    out.push_str("Potential Issues:\n");
    let issues = issues(docs);
    if issues.is_empty() {
        out.push_str("   No issues detected\n");
    } else {
        for issue in issues {
            out.push_str(&format!("   {}\n", issue));
        }
    }
    out
}

fn issues(docs: &[IndexedDocument]) -> Vec<String> {
    let very_short = docs.iter().filter(|d| d.content_len() < VERY_SHORT).count();
    let very_long = docs.iter().filter(|d| d.content_len() > VERY_LONG).count();
    let poor_titles = docs.iter().filter(|d| d.title.chars().count() < 3).count();

    let mut seen = HashSet::new();
    let mut duplicates = HashSet::new();
    for doc in docs {
        if !seen.insert(doc.url.as_str()) {
            duplicates.insert(doc.url.as_str());
        }
    }

    let mut found = Vec::new();
    if very_short > 0 {
        found.push(format!("{} documents are very short (< {} chars)", very_short, VERY_SHORT));
    }
    if very_long > 0 {
        found.push(format!("{} documents are very long (> {} chars)", very_long, VERY_LONG));
    }
    if poor_titles > 0 {
        found.push(format!("{} documents have poor titles", poor_titles));
    }
    if !duplicates.is_empty() {
        found.push(format!("{} duplicate URLs found", duplicates.len()));
    }
    found
}

fn percent(part: usize, whole: usize) -> usize {
    if whole == 0 {
        0
    } else {
        (part as f64 / whole as f64 * 100.0).round() as usize
    }
}
