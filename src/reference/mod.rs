//! Reference pipeline: symbol trees in, one merged symbol list and category
//! catalog per package out.
//!
//! Each symbol source file is decorated, grouped by identifier and merged on
//! its own; the merged results of a package's files are then appended.

pub mod artifact;
pub mod category;
pub mod decorate;
pub mod identity;
pub mod merge;
pub mod queries;

use crate::config::PackageConfig;
use crate::error::{Error, Result};
use crate::model::{CategoryDetails, JsDoc, JsDocTag, SymbolNode, SymbolRecord};
use decorate::NamespaceContents;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything generated for one package.
#[derive(Debug, Default)]
pub struct PackageReference {
    pub package: String,
    pub symbols: Vec<SymbolRecord>,
    pub namespaces: NamespaceContents,
    pub categories: IndexMap<String, CategoryDetails>,
}

/// Doc-extraction output: either a bare node list or a versioned envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum SymbolSource {
    Nodes(Vec<SymbolNode>),
    Versioned { nodes: Vec<SymbolNode> },
}

/// Read a symbol-tree JSON file.
pub fn load_symbol_source(path: &Path) -> Result<Vec<SymbolNode>> {
    let text = fs::read_to_string(path).map_err(|e| Error::SymbolSource {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_symbol_source(&text).map_err(|e| Error::SymbolSource {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

pub fn parse_symbol_source(text: &str) -> serde_json::Result<Vec<SymbolNode>> {
    Ok(match serde_json::from_str::<SymbolSource>(text)? {
        SymbolSource::Nodes(nodes) => nodes,
        SymbolSource::Versioned { nodes } => nodes,
    })
}

/// Read a category description file: a flat object of name → description.
/// Non-string values are ignored.
pub fn load_category_docs(path: &Path) -> Result<IndexMap<String, String>> {
    let text = fs::read_to_string(path)?;
    let raw: Map<String, Value> = serde_json::from_str(&text)?;
    Ok(raw
        .into_iter()
        .filter_map(|(k, v)| match v {
            Value::String(s) => Some((k, s)),
            _ => None,
        })
        .collect())
}

/// Tag symbols from `node__<module>.d.ts` sources with their module as a
/// category and with a `node` tag.
///
/// "node__fs--promises.d.ts" → category "fs/promises"
pub fn add_auto_tags(nodes: &mut [SymbolNode], source_file_name: &str) {
    let Some(rest) = source_file_name.strip_prefix("node__") else {
        return;
    };
    let module = rest
        .strip_suffix(".d.ts")
        .or_else(|| rest.strip_suffix(".json"))
        .unwrap_or(rest)
        .replacen("--", "/", 1);

    for node in nodes {
        let js_doc = node.js_doc.get_or_insert_with(JsDoc::default);
        js_doc.tags.push(JsDocTag::category(&module));
        js_doc.tags.push(JsDocTag {
            kind: "tags".to_string(),
            doc: None,
            tags: vec!["node".to_string()],
            extra: Map::new(),
        });
    }
}

/// Decorate, group and merge the symbols of one source file.
pub fn process_source(nodes: Vec<SymbolNode>, package: &str) -> (Vec<SymbolRecord>, NamespaceContents) {
    let decorated = decorate::decorate(nodes, package);
    let groups = merge::group_by_identifier(decorated.records);
    (merge::merge_colliding(groups), decorated.namespaces)
}

/// Expand a package's file patterns into existing paths, sorted.
pub fn expand_sources(patterns: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        match glob::glob(pattern) {
            Ok(paths) => {
                let matches: Vec<_> = paths.filter_map(|r| r.ok()).filter(|p| p.is_file()).collect();
                if matches.is_empty() {
                    tracing::warn!("no symbol sources matched: {}", pattern);
                }
                files.extend(matches);
            }
            Err(e) => tracing::warn!("invalid glob pattern {}: {}", pattern, e),
        }
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    files
}

/// Build the merged symbols and category catalog for one package.
///
/// Unreadable sources are logged and skipped.
pub fn build_package(config: &PackageConfig) -> PackageReference {
    let mut reference = PackageReference {
        package: config.name.clone(),
        ..Default::default()
    };

    for path in expand_sources(&config.files) {
        let mut nodes = match load_symbol_source(&path) {
            Ok(nodes) => nodes,
            Err(e) => {
                tracing::warn!("skipping {}", e);
                continue;
            }
        };
        let source_file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        add_auto_tags(&mut nodes, &source_file_name);

        tracing::info!(
            "{}:{} has {} symbols",
            config.name,
            source_file_name,
            decorate::count_symbols(&nodes)
        );

        let (merged, namespaces) = process_source(nodes, &config.name);
        reference.symbols.extend(merged);
        for (ns, children) in namespaces {
            let listed = reference.namespaces.entry(ns).or_default();
            for child in children {
                if !listed.contains(&child) {
                    listed.push(child);
                }
            }
        }
    }

    let descriptions = config
        .category_docs
        .as_deref()
        .and_then(|path| match load_category_docs(path) {
            Ok(map) => Some(map),
            Err(e) => {
                tracing::warn!("ignoring category docs {}: {}", path.display(), e);
                None
            }
        });

    reference.categories = category::category_catalog(&reference.symbols, descriptions.as_ref());
    tracing::info!(
        "{}: {} symbols, {} categories",
        reference.package,
        reference.symbols.len(),
        reference.categories.len()
    );
    reference
}
