//! Read-only lookups over a package's merged symbols.

use crate::model::{SymbolKind, SymbolRecord};
use indexmap::IndexMap;

/// Section headings for grouped symbol listings, paired with the kind they list.
pub const KIND_SECTIONS: &[(&str, &str)] = &[
    ("Classes", "class"),
    ("Enums", "enum"),
    ("Functions", "function"),
    ("Interfaces", "interface"),
    ("Namespaces", "namespace"),
    ("Type Aliases", "typeAlias"),
    ("Variables", "variable"),
];

/// Every symbol except namespaces. The list is already flat, so a namespace's
/// descendants are present in their own right.
pub fn leaf_symbols(items: &[SymbolRecord]) -> Vec<&SymbolRecord> {
    items
        .iter()
        .filter(|item| *item.kind() != SymbolKind::Namespace)
        .collect()
}

pub fn first_of_kind<'a>(items: &[&'a SymbolRecord], kind: &SymbolKind) -> Option<&'a SymbolRecord> {
    items.iter().copied().find(|item| item.kind() == kind)
}

/// Group by kind string in first-seen order, without duplicate entries.
pub fn group_by_kind<'a>(items: &[&'a SymbolRecord]) -> IndexMap<String, Vec<&'a SymbolRecord>> {
    let mut groups: IndexMap<String, Vec<&'a SymbolRecord>> = IndexMap::new();
    for item in items {
        let group = groups.entry(item.kind().as_str().to_string()).or_default();
        if !group.iter().any(|existing| std::ptr::eq(*existing, *item)) {
            group.push(*item);
        }
    }
    groups
}

/// Symbols carrying a `category` tag equal to `category`, ignoring case.
pub fn filter_by_category<'a>(items: &[&'a SymbolRecord], category: &str) -> Vec<&'a SymbolRecord> {
    let wanted = category.to_lowercase();
    items
        .iter()
        .copied()
        .filter(|item| item.data.category_tags().any(|c| c.to_lowercase() == wanted))
        .collect()
}

/// Whether any symbol has a `tags`-kind tag listing `value`.
pub fn tag_includes(items: &[&SymbolRecord], value: &str) -> bool {
    items.iter().any(|item| {
        item.data
            .tags()
            .iter()
            .any(|tag| tag.kind == "tags" && tag.tags.iter().any(|t| t == value))
    })
}
