//! Collision merge: combine records that share an identifier.
//!
//! A type-declaration source frequently declares the same name more than
//! once (an interface plus a `declare var` of the same name, or a class
//! re-opened by an interface). Each group collapses into one record.

use crate::model::{SymbolKind, SymbolRecord};
use indexmap::IndexMap;
use serde_json::Value;

/// Member collections appended from secondary records into the primary.
const MEMBER_COLLECTIONS: &[&str] = &[
    "constructors",
    "methods",
    "properties",
    "indexSignatures",
    "decorators",
    "typeParams",
    "implements",
];

/// Group records by identifier, preserving first-seen order.
pub fn group_by_identifier(records: Vec<SymbolRecord>) -> IndexMap<String, Vec<SymbolRecord>> {
    let mut groups: IndexMap<String, Vec<SymbolRecord>> = IndexMap::new();
    for record in records {
        groups
            .entry(record.identifier.clone())
            .or_default()
            .push(record);
    }
    groups
}

/// Collapse each group into a single record, in group order.
pub fn merge_colliding(groups: IndexMap<String, Vec<SymbolRecord>>) -> Vec<SymbolRecord> {
    groups.into_values().filter_map(merge_group).collect()
}

/// Merge priority: classes first, then interfaces, then everything else.
fn priority(kind: &SymbolKind) -> u8 {
    match kind {
        SymbolKind::Class => 0,
        SymbolKind::Interface => 1,
        _ => 2,
    }
}

/// Merge records that share one identifier.
///
/// The highest-priority record becomes the primary. Its documentation is
/// replaced by every record's documentation joined with blank lines, and for
/// namespaces, classes and interfaces the secondary records' member lists are
/// appended to the primary's. Duplicates are kept as-is.
fn merge_group(mut records: Vec<SymbolRecord>) -> Option<SymbolRecord> {
    if records.len() < 2 {
        // Single source, nothing to merge
        return records.pop();
    }

    // Stable: ties keep their input order
    records.sort_by_key(|r| priority(r.kind()));

    let doc = records
        .iter()
        .filter_map(|r| r.data.doc_text())
        .filter(|d| !d.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    let mut rest = records.split_off(1);
    let mut primary = records.pop()?;

    if !doc.is_empty() {
        primary.data.js_doc.get_or_insert_with(Default::default).doc = Some(doc);
    }

    let primary_kind = primary.kind().clone();
    if let Some(target) = primary.data.member_fields_mut() {
        for key in MEMBER_COLLECTIONS {
            let Some(Value::Array(into)) = target.get_mut(*key) else {
                continue;
            };
            for source in rest.iter_mut() {
                if *source.kind() != primary_kind {
                    continue;
                }
                let Some(fields) = source.data.member_fields_mut() else {
                    continue;
                };
                if let Some(Value::Array(items)) = fields.get_mut(*key) {
                    into.append(items);
                }
            }
        }
    }

    Some(primary)
}
