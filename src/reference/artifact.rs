//! Per-package reference artifact written by `refindex reference` and read
//! back by the API-reference indexer.

use crate::error::Result;
use crate::model::{PageKind, SymbolRecord};
use crate::reference::category::ALL_SYMBOLS;
use crate::reference::decorate::NamespaceContents;
use crate::reference::queries::{filter_by_category, group_by_kind, leaf_symbols, tag_includes, KIND_SECTIONS};
use crate::reference::PackageReference;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceArtifact {
    pub package: String,
    pub generated_at: String,
    pub total_symbols: usize,
    pub categories: Vec<CategoryEntry>,
    pub namespaces: NamespaceContents,
    pub symbols: Vec<SymbolEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEntry {
    pub title: String,
    pub description: String,
    pub url_stub: String,
    pub url: String,
    /// Listed symbols come from Node.js type definitions.
    pub from_node: bool,
    pub symbols: Vec<String>,
    /// Section title → identifiers, for the non-empty kind sections.
    pub sections: IndexMap<String, Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolEntry {
    #[serde(flatten)]
    pub record: SymbolRecord,
    pub url: String,
    pub kind: String,
    pub page: PageKind,
}

impl ReferenceArtifact {
    pub fn build(reference: &PackageReference, url_root: &str, generated_at: &str) -> Self {
        let package_path = format!("{}/{}", url_root, reference.package.to_lowercase());

        let mut leaves = leaf_symbols(&reference.symbols);
        leaves.sort_by(|a, b| a.name.cmp(&b.name));

        let categories = reference
            .categories
            .iter()
            .map(|(name, details)| {
                let members = if name == ALL_SYMBOLS {
                    leaves.clone()
                } else {
                    filter_by_category(&leaves, name)
                };
                let grouped = group_by_kind(&members);
                let sections = KIND_SECTIONS
                    .iter()
                    .filter_map(|(title, kind)| {
                        grouped.get(*kind).map(|items| {
                            (
                                title.to_string(),
                                items.iter().map(|s| s.identifier.clone()).collect(),
                            )
                        })
                    })
                    .collect();
                CategoryEntry {
                    title: details.title.clone(),
                    description: details.description.clone(),
                    url_stub: details.url_stub.clone(),
                    url: format!("{}/{}", package_path, details.url_stub),
                    from_node: tag_includes(&members, "node"),
                    symbols: members.iter().map(|s| s.identifier.clone()).collect(),
                    sections,
                }
            })
            .collect();

        let symbols = reference
            .symbols
            .iter()
            .map(|record| SymbolEntry {
                url: format!("{}/{}", package_path, record.identifier),
                kind: record.kind().as_str().to_string(),
                page: record.kind().page_kind(),
                record: record.clone(),
            })
            .collect();

        Self {
            package: reference.package.clone(),
            generated_at: generated_at.to_string(),
            total_symbols: reference.symbols.len(),
            categories,
            namespaces: reference.namespaces.clone(),
            symbols,
        }
    }

    /// Write as `<package lowercased>.json` inside `out_dir`.
    pub fn write(&self, out_dir: &Path) -> Result<PathBuf> {
        let path = out_dir.join(format!("{}.json", self.package.to_lowercase()));
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, &json)?;
        tracing::info!("Generated reference: {} ({} bytes)", path.display(), json.len());
        Ok(path)
    }

    pub fn read(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("invalid reference artifact {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{category, parse_symbol_source, process_source};

    fn reference() -> PackageReference {
        let nodes = parse_symbol_source(
            r#"[
                { "name": "fetch", "kind": "function", "jsDoc": { "tags": [{ "kind": "category", "doc": "Fetch API" }] } },
                { "name": "Request", "kind": "class", "jsDoc": { "tags": [{ "kind": "category", "doc": "Fetch API" }] } },
                { "name": "NS", "kind": "namespace", "namespaceDef": { "elements": [{ "name": "inner", "kind": "variable" }] } }
            ]"#,
        )
        .unwrap();
        let (symbols, namespaces) = process_source(nodes, "Web");
        let categories = category::category_catalog(&symbols, None);
        PackageReference {
            package: "Web".to_string(),
            symbols,
            namespaces,
            categories,
        }
    }

    #[test]
    fn categories_list_their_symbols() {
        let artifact = ReferenceArtifact::build(&reference(), "/api", "2024-01-01T00:00:00.000Z");
        assert_eq!(artifact.total_symbols, 4);
        assert_eq!(artifact.categories.len(), 2);

        let fetch = &artifact.categories[0];
        assert_eq!(fetch.url, "/api/web/fetch_api");
        assert_eq!(fetch.symbols, vec!["Request", "fetch"]);
        assert_eq!(fetch.sections.keys().collect::<Vec<_>>(), vec!["Classes", "Functions"]);
        assert!(!fetch.from_node);

        let all = &artifact.categories[1];
        assert_eq!(all.title, ALL_SYMBOLS);
        assert_eq!(all.symbols, vec!["Request", "fetch", "NS.inner"]);
    }

    #[test]
    fn symbols_carry_urls_and_pages() {
        let artifact = ReferenceArtifact::build(&reference(), "/api", "now");
        let ns = artifact.symbols.iter().find(|s| s.record.identifier == "NS").unwrap();
        assert_eq!(ns.page, PageKind::Namespace);
        assert_eq!(ns.url, "/api/web/NS");
        assert_eq!(artifact.namespaces["NS"], vec!["NS.inner"]);
    }

    #[test]
    fn written_artifact_reads_back() {
        let dir = tempfile::TempDir::new().unwrap();
        let artifact = ReferenceArtifact::build(&reference(), "/api", "now");
        let path = artifact.write(dir.path()).unwrap();
        assert!(path.ends_with("web.json"));
        let back = ReferenceArtifact::read(&path).unwrap();
        assert_eq!(back.symbols.len(), artifact.symbols.len());
        assert_eq!(back.symbols[1].record, artifact.symbols[1].record);
    }
}
