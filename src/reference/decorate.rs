//! Flatten a raw symbol tree into decorated records.
//!
//! Depth-first, pre-order: a namespace is emitted before its descendants and
//! source declaration order is kept. Namespace membership is returned as a
//! separate map instead of being written back into the tree.

use crate::model::{SymbolKind, SymbolNode, SymbolRecord};
use crate::reference::identity::symbol_identity;
use indexmap::IndexMap;

/// Namespace identifier → identifiers of its direct children.
pub type NamespaceContents = IndexMap<String, Vec<String>>;

/// Output of [`decorate`].
#[derive(Debug, Default)]
pub struct Decorated {
    pub records: Vec<SymbolRecord>,
    pub namespaces: NamespaceContents,
}

/// Decorate every node of `nodes` for `package`.
///
/// Namespace nodes give up their `elements`: the children become records of
/// their own and are listed in [`Decorated::namespaces`].
pub fn decorate(nodes: Vec<SymbolNode>, package: &str) -> Decorated {
    let mut out = Decorated::default();
    decorate_into(nodes, package, "", &mut out);
    out
}

/// Returns the identifiers of the records emitted at this level.
fn decorate_into(
    nodes: Vec<SymbolNode>,
    package: &str,
    namespace: &str,
    out: &mut Decorated,
) -> Vec<String> {
    let mut emitted = Vec::with_capacity(nodes.len());

    for mut node in nodes {
        let identity = symbol_identity(&node.name, package, namespace);
        emitted.push(identity.clone());

        let children = match node.kind {
            SymbolKind::Namespace => node
                .namespace_def
                .as_mut()
                .map(|def| std::mem::take(&mut def.elements)),
            _ => None,
        };

        out.records.push(SymbolRecord {
            name: node.name.clone(),
            full_name: identity.clone(),
            identifier: identity.clone(),
            namespace: namespace.to_string(),
            package: package.to_string(),
            data: node,
        });

        if let Some(children) = children {
            let child_ids = decorate_into(children, package, &identity, out);
            let listed = out.namespaces.entry(identity).or_default();
            for id in child_ids {
                if !listed.contains(&id) {
                    listed.push(id);
                }
            }
        }
    }

    emitted
}

/// Count nodes in a tree, including everything nested in namespaces.
pub fn count_symbols(nodes: &[SymbolNode]) -> usize {
    nodes
        .iter()
        .map(|node| {
            1 + node
                .namespace_def
                .as_ref()
                .filter(|_| node.kind == SymbolKind::Namespace)
                .map(|def| count_symbols(&def.elements))
                .unwrap_or(0)
        })
        .sum()
}
