//! Data model for extracted reference symbols.
//!
//! The doc-extraction tool emits a nested tree of [`SymbolNode`]s. Only the
//! fields the pipeline reasons about are typed; everything else is carried
//! through opaquely so the reference artifact round-trips it unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Declaration kind reported by the doc-extraction tool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SymbolKind {
    ModuleDoc,
    Namespace,
    Class,
    Interface,
    Function,
    Variable,
    Enum,
    TypeAlias,
    Import,
    /// Kinds this tool does not know about. Treated as leaves.
    Other(String),
}

impl SymbolKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::ModuleDoc => "moduleDoc",
            Self::Namespace => "namespace",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Function => "function",
            Self::Variable => "variable",
            Self::Enum => "enum",
            Self::TypeAlias => "typeAlias",
            Self::Import => "import",
            Self::Other(kind) => kind,
        }
    }

    /// Page family used to present a symbol of this kind.
    pub fn page_kind(&self) -> PageKind {
        match self {
            Self::ModuleDoc => PageKind::Module,
            Self::Namespace => PageKind::Namespace,
            Self::Class => PageKind::Class,
            Self::Interface => PageKind::Interface,
            Self::Function => PageKind::Function,
            Self::Variable => PageKind::Variable,
            Self::Enum => PageKind::Enum,
            Self::TypeAlias => PageKind::TypeAlias,
            Self::Import => PageKind::Import,
            Self::Other(_) => PageKind::NotImplemented,
        }
    }
}

impl From<String> for SymbolKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "moduleDoc" => Self::ModuleDoc,
            "namespace" => Self::Namespace,
            "class" => Self::Class,
            "interface" => Self::Interface,
            "function" => Self::Function,
            "variable" => Self::Variable,
            "enum" => Self::Enum,
            "typeAlias" => Self::TypeAlias,
            "import" => Self::Import,
            _ => Self::Other(kind),
        }
    }
}

impl From<SymbolKind> for String {
    fn from(kind: SymbolKind) -> Self {
        kind.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageKind {
    Module,
    Namespace,
    Class,
    Interface,
    Function,
    Variable,
    Enum,
    TypeAlias,
    Import,
    NotImplemented,
}

/// Documentation block attached to a symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<JsDocTag>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JsDoc {
    /// First blank-line separated paragraph of the free text, trimmed.
    pub fn first_paragraph(&self) -> Option<&str> {
        let doc = self.doc.as_deref()?.trim();
        let para = doc.split("\n\n").next().unwrap_or(doc).trim();
        if para.is_empty() {
            None
        } else {
            Some(para)
        }
    }
}

/// One `@tag` entry. `kind` discriminates (`category`, `experimental`, `tags`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsDocTag {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Only populated for `tags`-kind entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JsDocTag {
    pub fn category(name: &str) -> Self {
        Self {
            kind: "category".to_string(),
            doc: Some(name.to_string()),
            tags: Vec::new(),
            extra: Map::new(),
        }
    }
}

/// Node of the raw symbol tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolNode {
    pub name: String,
    pub kind: SymbolKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub js_doc: Option<JsDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace_def: Option<NamespaceDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_def: Option<MemberDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_def: Option<MemberDef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SymbolNode {
    #[cfg(test)]
    pub fn new(name: &str, kind: SymbolKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            js_doc: None,
            namespace_def: None,
            class_def: None,
            interface_def: None,
            extra: Map::new(),
        }
    }

    pub fn doc_text(&self) -> Option<&str> {
        self.js_doc.as_ref().and_then(|d| d.doc.as_deref())
    }

    pub fn tags(&self) -> &[JsDocTag] {
        self.js_doc.as_ref().map(|d| d.tags.as_slice()).unwrap_or(&[])
    }

    /// Values of every `category` tag, trimmed, in declaration order.
    pub fn category_tags(&self) -> impl Iterator<Item = &str> {
        self.tags()
            .iter()
            .filter(|t| t.kind == "category")
            .filter_map(|t| t.doc.as_deref())
            .map(str::trim)
    }

    /// Member collections for the kinds that have them.
    pub fn member_fields(&self) -> Option<&Map<String, Value>> {
        match self.kind {
            SymbolKind::Namespace => self.namespace_def.as_ref().map(|d| &d.fields),
            SymbolKind::Class => self.class_def.as_ref().map(|d| &d.fields),
            SymbolKind::Interface => self.interface_def.as_ref().map(|d| &d.fields),
            _ => None,
        }
    }

    pub fn member_fields_mut(&mut self) -> Option<&mut Map<String, Value>> {
        match self.kind {
            SymbolKind::Namespace => self.namespace_def.as_mut().map(|d| &mut d.fields),
            SymbolKind::Class => self.class_def.as_mut().map(|d| &mut d.fields),
            SymbolKind::Interface => self.interface_def.as_mut().map(|d| &mut d.fields),
            _ => None,
        }
    }

    /// Names of methods and properties, in declaration order.
    pub fn member_names(&self) -> Vec<String> {
        let Some(fields) = self.member_fields() else {
            return Vec::new();
        };
        ["methods", "properties"]
            .iter()
            .filter_map(|key| fields.get(*key).and_then(Value::as_array))
            .flatten()
            .filter_map(|m| m.get("name").and_then(Value::as_str))
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamespaceDef {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<SymbolNode>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// `classDef` / `interfaceDef` payload, kept as raw JSON fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberDef {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A decorated symbol: one documented entity plus its place in the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolRecord {
    pub name: String,
    pub full_name: String,
    pub identifier: String,
    /// Owning namespace path; empty for top-level symbols.
    pub namespace: String,
    pub package: String,
    pub data: SymbolNode,
}

impl SymbolRecord {
    pub fn kind(&self) -> &SymbolKind {
        &self.data.kind
    }
}

/// One entry of a package's category catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetails {
    pub title: String,
    pub description: String,
    pub url_stub: String,
}
