//! Indexes the symbols of a generated reference artifact.

use crate::index::{ApiInfo, DocType, DocumentIndexer, IndexedDocument, InputFile};
use crate::model::SymbolKind;
use crate::reference::artifact::{ReferenceArtifact, SymbolEntry};
use crate::slug::document_id;
use chrono::{DateTime, Utc};
use std::fs;

pub struct ApiReferenceIndexer {
    base_url: String,
    min_content_length: usize,
}

impl ApiReferenceIndexer {
    pub fn new(base_url: &str, min_content_length: usize) -> Self {
        Self {
            base_url: base_url.to_string(),
            min_content_length,
        }
    }

    /// One document per non-namespace symbol with enough text.
    pub fn index_artifact(
        &self,
        artifact: &ReferenceArtifact,
        package: &str,
        reference_base: &str,
        last_modified: i64,
    ) -> Vec<IndexedDocument> {
        artifact
            .symbols
            .iter()
            .filter(|entry| *entry.record.kind() != SymbolKind::Namespace)
            .filter_map(|entry| self.index_symbol(entry, package, reference_base, last_modified))
            .collect()
    }

    fn index_symbol(
        &self,
        entry: &SymbolEntry,
        package: &str,
        reference_base: &str,
        last_modified: i64,
    ) -> Option<IndexedDocument> {
        let record = &entry.record;
        let members = record.data.member_names();

        let mut parts = Vec::new();
        if let Some(doc) = record.data.doc_text().map(str::trim).filter(|d| !d.is_empty()) {
            parts.push(doc.to_string());
        }
        if !members.is_empty() {
            parts.push(members.join(" "));
        }
        let content = parts.join("\n\n");
        if content.chars().count() < self.min_content_length {
            tracing::debug!("Skipping {} - content too short", record.identifier);
            return None;
        }

        let path = format!("{}/{}", reference_base, record.identifier);
        let kind = record.kind().as_str().to_string();

        Some(IndexedDocument {
            id: document_id(&format!("api-{}-{}", package, record.identifier)),
            title: record.full_name.clone(),
            content,
            url: format!("{}{}", self.base_url, path),
            path: Some(path),
            category: "api".to_string(),
            section: package.to_lowercase(),
            subsection: Some(kind.clone()),
            description: record
                .data
                .js_doc
                .as_ref()
                .and_then(|d| d.first_paragraph())
                .map(str::to_string),
            tags: record.data.category_tags().map(str::to_string).collect(),
            headings: members,
            last_modified,
            kind: Some("api".to_string()),
            command: None,
            api_info: Some(ApiInfo {
                symbol_type: kind,
                symbol_path: record.identifier.clone(),
                package_name: package.to_string(),
            }),
        })
    }
}

impl DocumentIndexer for ApiReferenceIndexer {
    fn accepts(&self, file: &InputFile) -> bool {
        matches!(file.doc_type, DocType::ApiReference { .. })
    }

    fn try_index(&self, file: &InputFile) -> Vec<IndexedDocument> {
        let DocType::ApiReference { package, base_url } = &file.doc_type else {
            return Vec::new();
        };
        let artifact = match ReferenceArtifact::read(&file.full_path) {
            Ok(artifact) => artifact,
            Err(e) => {
                tracing::warn!("Error indexing file {}: {:#}", file.path, e);
                return Vec::new();
            }
        };
        let last_modified = fs::metadata(&file.full_path)
            .and_then(|m| m.modified())
            .map(|t| DateTime::<Utc>::from(t).timestamp_millis())
            .unwrap_or_else(|_| Utc::now().timestamp_millis());

        let docs = self.index_artifact(&artifact, package, base_url, last_modified);
        tracing::info!("{}: indexed {} API symbols from {}", package, docs.len(), file.path);
        docs
    }
}
