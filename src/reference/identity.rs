//! Canonical identifiers for decorated symbols.

/// Identifier for a symbol: `namespace.name`, or just `name` at top level.
///
/// `_package` does not participate. Symbols from different packages can
/// therefore share an identifier, which is why merging only ever runs
/// within a single package.
pub fn symbol_identity(name: &str, _package: &str, namespace: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", namespace, name)
    }
}
