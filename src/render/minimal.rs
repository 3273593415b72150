//! Minimal index: no full content, a short preview and the first headings.

use crate::error::Result;
use crate::index::{IndexCollection, IndexedDocument};
use crate::render::{write_json, IndexOutput, Metadata};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const FILE_NAME: &str = "orama-index-minimal.json";
const PREVIEW_CHARS: usize = 200;
const PREVIEW_HEADINGS: usize = 3;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimalDocument {
    pub id: String,
    pub title: String,
    pub url: String,
    pub category: String,
    pub section: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub headings: Vec<String>,
    pub content_preview: String,
}

impl From<&IndexedDocument> for MinimalDocument {
    fn from(doc: &IndexedDocument) -> Self {
        Self {
            id: doc.id.clone(),
            title: doc.title.clone(),
            url: doc.url.clone(),
            category: doc.category.clone(),
            section: doc.section.clone(),
            description: doc.description.clone(),
            tags: doc.tags.clone(),
            headings: doc.headings.iter().take(PREVIEW_HEADINGS).cloned().collect(),
            content_preview: preview(&doc.content),
        }
    }
}

/// First 200 characters, with `...` when anything was cut.
pub fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

#[derive(Serialize)]
struct MinimalIndex {
    metadata: Metadata,
    documents: Vec<MinimalDocument>,
}

pub struct MinimalJsonOutput {
    out_dir: PathBuf,
    base_url: String,
}

impl MinimalJsonOutput {
    pub fn new(out_dir: &Path, base_url: &str) -> Self {
        Self {
            out_dir: out_dir.to_path_buf(),
            base_url: base_url.to_string(),
        }
    }
}

impl IndexOutput for MinimalJsonOutput {
    fn file_name(&self) -> &str {
        FILE_NAME
    }

    fn write(&self, index: &IndexCollection) -> Result<PathBuf> {
        let data = MinimalIndex {
            metadata: Metadata::new(index, &self.base_url),
            documents: index.documents.iter().map(MinimalDocument::from).collect(),
        };
        let path = self.out_dir.join(FILE_NAME);
        write_json(&path, &data, "minimal index")?;
        Ok(path)
    }
}
