//! Search index: file selection, per-file indexers and the in-memory
//! collection the output writers serialize.

pub mod api;
pub mod markdown;
pub mod select;

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How a selected file is to be indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocType {
    Markdown,
    /// A generated reference artifact for `package`, whose pages live under
    /// `base_url`.
    ApiReference { package: String, base_url: String },
}

/// A file picked by the [`select::FileSelector`].
#[derive(Debug, Clone)]
pub struct InputFile {
    /// Relative to the docs root, `/`-separated.
    pub path: String,
    pub full_path: PathBuf,
    pub doc_type: DocType,
}

/// One searchable unit. Key names are consumed by the search service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedDocument {
    pub id: String,
    pub title: String,
    pub content: String,
    pub url: String,
    /// Root-relative URL, without the base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub category: String,
    pub section: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub headings: Vec<String>,
    /// Milliseconds since the Unix epoch.
    pub last_modified: i64,
    /// "cli" for command pages, "api" for reference symbols.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_info: Option<ApiInfo>,
}

impl IndexedDocument {
    /// Content length in characters.
    pub fn content_len(&self) -> usize {
        self.content.chars().count()
    }

    fn label(&self) -> String {
        format!("{} ({} chars)", self.title, self.content_len())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInfo {
    pub symbol_type: String,
    pub symbol_path: String,
    pub package_name: String,
}

/// Turns one input file into zero or more documents.
///
/// Failures are logged and yield nothing; they never abort a run.
pub trait DocumentIndexer: Send + Sync {
    fn accepts(&self, file: &InputFile) -> bool;
    fn try_index(&self, file: &InputFile) -> Vec<IndexedDocument>;
}

/// Fallback that accepts everything and indexes nothing.
pub struct NullIndexer;

impl DocumentIndexer for NullIndexer {
    fn accepts(&self, _file: &InputFile) -> bool {
        true
    }

    fn try_index(&self, file: &InputFile) -> Vec<IndexedDocument> {
        tracing::warn!("No valid indexer found for file: {}", file.full_path.display());
        Vec::new()
    }
}

/// Ordered, append-only document list.
#[derive(Debug, Default)]
pub struct IndexCollection {
    pub documents: Vec<IndexedDocument>,
}

impl IndexCollection {
    /// `None` is the "nothing indexed" sentinel and is ignored.
    pub fn add(&mut self, document: Option<IndexedDocument>) {
        if let Some(doc) = document {
            self.documents.push(doc);
        }
    }

    pub fn extend(&mut self, documents: impl IntoIterator<Item = IndexedDocument>) {
        for doc in documents {
            self.add(Some(doc));
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Recomputed from the current documents on every call.
    pub fn stats(&self) -> IndexStats {
        let docs = &self.documents;
        let total_characters: usize = docs.iter().map(IndexedDocument::content_len).sum();
        let average_document_length = if docs.is_empty() {
            0
        } else {
            (total_characters as f64 / docs.len() as f64).round() as usize
        };

        let mut category_counts: IndexMap<String, usize> = IndexMap::new();
        let mut section_counts: IndexMap<String, usize> = IndexMap::new();
        for doc in docs {
            *category_counts.entry(doc.category.clone()).or_default() += 1;
            *section_counts
                .entry(format!("{}/{}", doc.category, doc.section))
                .or_default() += 1;
        }

        // First-seen wins on ties
        let mut longest: Option<&IndexedDocument> = None;
        let mut shortest: Option<&IndexedDocument> = None;
        for doc in docs {
            let len = doc.content_len();
            if longest.map_or(true, |l| len > l.content_len()) {
                longest = Some(doc);
            }
            if shortest.map_or(true, |s| len < s.content_len()) {
                shortest = Some(doc);
            }
        }

        let api_documents = docs.iter().filter(|d| d.api_info.is_some()).count();

        IndexStats {
            total_documents: docs.len(),
            total_characters,
            average_document_length,
            category_counts,
            section_counts,
            documents_with_tags: docs.iter().filter(|d| !d.tags.is_empty()).count(),
            documents_with_descriptions: docs.iter().filter(|d| d.description.is_some()).count(),
            longest_document: longest.map(IndexedDocument::label).unwrap_or_default(),
            shortest_document: shortest.map(IndexedDocument::label).unwrap_or_default(),
            api_documents,
            markdown_documents: docs.len() - api_documents,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub total_documents: usize,
    pub total_characters: usize,
    pub average_document_length: usize,
    pub category_counts: IndexMap<String, usize>,
    pub section_counts: IndexMap<String, usize>,
    pub documents_with_tags: usize,
    pub documents_with_descriptions: usize,
    pub longest_document: String,
    pub shortest_document: String,
    #[serde(default)]
    pub api_documents: usize,
    #[serde(default)]
    pub markdown_documents: usize,
}

/// Index `files` in parallel with the first indexer that accepts each one.
/// Documents are appended in file order.
pub fn build_index(files: &[InputFile], indexers: &[Box<dyn DocumentIndexer>]) -> IndexCollection {
    let per_file: Vec<Vec<IndexedDocument>> = files
        .par_iter()
        .map(|file| {
            indexers
                .iter()
                .find(|indexer| indexer.accepts(file))
                .map(|indexer| indexer.try_index(file))
                .unwrap_or_default()
        })
        .collect();

    let mut collection = IndexCollection::default();
    for docs in per_file {
        collection.extend(docs);
    }
    tracing::info!("Indexed {} documents from {} files", collection.len(), files.len());
    collection
}

/// Markdown, then API reference, then the null fallback.
pub fn default_indexers(base_url: &str, min_content_length: usize) -> Vec<Box<dyn DocumentIndexer>> {
    vec![
        Box::new(markdown::MarkdownIndexer::new(base_url, min_content_length)),
        Box::new(api::ApiReferenceIndexer::new(base_url, min_content_length)),
        Box::new(NullIndexer),
    ]
}
