//! Category catalog derived from `category` tags.
//!
//! Categories exist only because some symbol is tagged with them. The
//! description map is a lookup table and never adds entries of its own.

use crate::model::{CategoryDetails, SymbolKind, SymbolRecord};
use crate::reference::queries::{filter_by_category, first_of_kind};
use crate::slug::url_stub;
use indexmap::IndexMap;
use std::collections::BTreeSet;

pub const ALL_SYMBOLS: &str = "All Symbols";
const ALL_SYMBOLS_DESCRIPTION: &str = "All symbols in this package";
const ALL_SYMBOLS_STUB: &str = "all_symbols";

/// Categories found on `symbols`, sorted by name.
///
/// With a description map, each category's description comes from it (empty
/// when missing). Without one, the first paragraph of a `moduleDoc` symbol
/// tagged with the category is used.
pub fn categories_from_symbols(
    symbols: &[SymbolRecord],
    descriptions: Option<&IndexMap<String, String>>,
) -> IndexMap<String, CategoryDetails> {
    let names: BTreeSet<&str> = symbols
        .iter()
        .flat_map(|s| s.data.category_tags())
        .collect();

    let all: Vec<&SymbolRecord> = symbols.iter().collect();

    names
        .into_iter()
        .map(|name| {
            let description = match descriptions {
                Some(map) => map.get(name).cloned().unwrap_or_default(),
                None => module_doc_description(&all, name),
            };
            let details = CategoryDetails {
                title: name.to_string(),
                description,
                url_stub: url_stub(name),
            };
            (name.to_string(), details)
        })
        .collect()
}

/// Full catalog: the categories plus a trailing "All Symbols" entry when
/// there is at least one category.
pub fn category_catalog(
    symbols: &[SymbolRecord],
    descriptions: Option<&IndexMap<String, String>>,
) -> IndexMap<String, CategoryDetails> {
    let mut catalog = categories_from_symbols(symbols, descriptions);
    if !catalog.is_empty() {
        catalog.insert(
            ALL_SYMBOLS.to_string(),
            CategoryDetails {
                title: ALL_SYMBOLS.to_string(),
                description: ALL_SYMBOLS_DESCRIPTION.to_string(),
                url_stub: ALL_SYMBOLS_STUB.to_string(),
            },
        );
    }
    catalog
}

fn module_doc_description(symbols: &[&SymbolRecord], category: &str) -> String {
    let tagged = filter_by_category(symbols, category);
    first_of_kind(&tagged, &SymbolKind::ModuleDoc)
        .and_then(|m| m.data.js_doc.as_ref())
        .and_then(|doc| doc.first_paragraph())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{JsDoc, JsDocTag, SymbolNode};

    fn tagged(name: &str, kind: SymbolKind, category: &str, doc: Option<&str>) -> SymbolRecord {
        let mut data = SymbolNode::new(name, kind);
        data.js_doc = Some(JsDoc {
            doc: doc.map(str::to_string),
            tags: vec![JsDocTag::category(category)],
            ..Default::default()
        });
        SymbolRecord {
            name: name.to_string(),
            full_name: name.to_string(),
            identifier: name.to_string(),
            namespace: String::new(),
            package: "Web".to_string(),
            data,
        }
    }

    fn class_for(category: &str) -> SymbolRecord {
        tagged("A", SymbolKind::Class, category, None)
    }

    fn map(entries: &[(&str, &str)]) -> IndexMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn no_metadata_still_surfaces_categories() {
        let cats = categories_from_symbols(&[class_for("cat-1"), class_for("cat-2")], Some(&map(&[])));
        assert_eq!(cats.len(), 2);
        assert_eq!(cats["cat-1"].description, "");
        assert_eq!(cats["cat-2"].description, "");
    }

    #[test]
    fn metadata_without_symbols_yields_nothing() {
        let descriptions = map(&[("cat-1", "Category 1"), ("cat-2", "Category 2")]);
        assert!(categories_from_symbols(&[], Some(&descriptions)).is_empty());
        assert!(category_catalog(&[], Some(&descriptions)).is_empty());
    }

    #[test]
    fn single_tag_with_empty_map() {
        let cats = categories_from_symbols(&[class_for("cat-1")], Some(&map(&[])));
        assert_eq!(cats.len(), 1);
        assert_eq!(cats["cat-1"].description, "");
    }

    #[test]
    fn tagged_symbol_and_matching_metadata() {
        let cats = categories_from_symbols(&[class_for("cat-1")], Some(&map(&[("cat-1", "Category 1")])));
        assert_eq!(cats.len(), 1);
        assert_eq!(cats["cat-1"].description, "Category 1");
    }

    #[test]
    fn names_are_sorted_and_distinct() {
        let symbols = vec![class_for("Network"), class_for("Fetch API"), class_for("Network")];
        let cats = categories_from_symbols(&symbols, None);
        assert_eq!(cats.keys().collect::<Vec<_>>(), vec!["Fetch API", "Network"]);
        assert_eq!(cats["Fetch API"].url_stub, "fetch_api");
        assert_eq!(cats["Fetch API"].title, "Fetch API");
    }

    #[test]
    fn names_are_case_sensitive() {
        let cats = categories_from_symbols(&[class_for("io"), class_for("IO")], None);
        assert_eq!(cats.len(), 2);
    }

    #[test]
    fn module_doc_fallback_without_map() {
        let symbols = vec![
            class_for("Streams"),
            tagged(
                "",
                SymbolKind::ModuleDoc,
                "Streams",
                Some("Readable and writable streams.\n\nLonger text."),
            ),
        ];
        let cats = categories_from_symbols(&symbols, None);
        assert_eq!(cats["Streams"].description, "Readable and writable streams.");
    }

    #[test]
    fn module_doc_ignored_when_map_given() {
        let symbols = vec![tagged("", SymbolKind::ModuleDoc, "Streams", Some("From module."))];
        let cats = categories_from_symbols(&symbols, Some(&map(&[])));
        assert_eq!(cats["Streams"].description, "");
    }

    #[test]
    fn catalog_appends_all_symbols_last() {
        let catalog = category_catalog(&[class_for("Zeta"), class_for("Alpha")], None);
        let keys: Vec<_> = catalog.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Alpha", "Zeta", ALL_SYMBOLS]);
        let all = &catalog[ALL_SYMBOLS];
        assert_eq!(all.description, "All symbols in this package");
        assert_eq!(all.url_stub, "all_symbols");
    }
}
