//! Write-once symbol table scoped to a single analysis run.
//!
//! Names are unique across kinds: an object and a list can never share a
//! name. `declare` refuses duplicates without mutating; the caller turns the
//! refusal into a diagnostic using the surviving record's kind and line.
//! Lookup uses a hash map; a separate declaration-order sequence backs the
//! debug view, so enumeration never depends on map iteration order.

use crate::grammar::ast::ValueType;
use crate::grammar::keywords::Keyword;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Kind of a declared entity. Serialized with the Spanish names the debug
/// surface has always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    #[serde(rename = "objeto")]
    Object,
    #[serde(rename = "lista")]
    List,
}

impl SymbolKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Object => "objeto",
            Self::List => "lista",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-kind type metadata accumulated while the entity's body is traversed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SymbolMetadata {
    Object {
        #[serde(rename = "propiedades")]
        properties: HashMap<String, ValueType>,
    },
    List {
        #[serde(rename = "tipos_elementos")]
        element_types: Vec<ValueType>,
    },
}

impl SymbolMetadata {
    pub fn empty_object() -> Self {
        Self::Object {
            properties: HashMap::new(),
        }
    }

    pub fn empty_list() -> Self {
        Self::List {
            element_types: Vec::new(),
        }
    }

    pub fn properties(&self) -> Option<&HashMap<String, ValueType>> {
        match self {
            Self::Object { properties } => Some(properties),
            Self::List { .. } => None,
        }
    }

    pub fn element_types(&self) -> Option<&[ValueType]> {
        match self {
            Self::List { element_types } => Some(element_types),
            Self::Object { .. } => None,
        }
    }
}

/// One declared entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub name: String,
    pub kind: SymbolKind,
    /// Declaration position; line 1-based, column 1-based (user-facing)
    pub line: u32,
    pub column: u32,
    pub metadata: SymbolMetadata,
}

impl SymbolRecord {
    /// Record the inferred type for a property key. The last write for a
    /// repeated key overwrites the entry. No-op for list records.
    pub fn set_property_type(&mut self, key: &str, value_type: ValueType) {
        if let SymbolMetadata::Object { properties } = &mut self.metadata {
            properties.insert(key.to_string(), value_type);
        }
    }

    /// Existing type recorded for a property key, if any.
    pub fn property_type(&self, key: &str) -> Option<ValueType> {
        self.metadata.properties().and_then(|p| p.get(key).copied())
    }

    /// Append an element type in encounter order. No-op for object records.
    pub fn push_element_type(&mut self, value_type: ValueType) {
        if let SymbolMetadata::List { element_types } = &mut self.metadata {
            element_types.push(value_type);
        }
    }
}

/// Debug-view row: `{name, tipo_entidad, metadatos}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolDebugEntry {
    pub name: String,
    #[serde(rename = "tipo_entidad")]
    pub kind: SymbolKind,
    #[serde(rename = "metadatos")]
    pub metadata: SymbolMetadata,
}

/// The symbol table. Created fresh per analysis run and discarded after.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, SymbolRecord>,
    declaration_order: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive membership test against the fixed keyword set.
    pub fn is_reserved(&self, name: &str) -> bool {
        Keyword::is_reserved_word(name)
    }

    pub fn lookup(&self, name: &str) -> Option<&SymbolRecord> {
        self.symbols.get(name)
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut SymbolRecord> {
        self.symbols.get_mut(name)
    }

    /// Declare a new symbol. Returns `false` without mutating when the name
    /// already exists, regardless of the requested kind.
    pub fn declare(
        &mut self,
        name: &str,
        kind: SymbolKind,
        line: u32,
        column: u32,
        metadata: SymbolMetadata,
    ) -> bool {
        if self.symbols.contains_key(name) {
            return false;
        }
        self.symbols.insert(
            name.to_string(),
            SymbolRecord {
                name: name.to_string(),
                kind,
                line,
                column,
                metadata,
            },
        );
        self.declaration_order.push(name.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Records in declaration order.
    pub fn iter_in_declaration_order(&self) -> impl Iterator<Item = &SymbolRecord> {
        self.declaration_order
            .iter()
            .filter_map(move |name| self.symbols.get(name))
    }

    /// Simplified view of the table for diagnostics and tooling, in
    /// declaration order.
    pub fn debug_view(&self) -> Vec<SymbolDebugEntry> {
        self.iter_in_declaration_order()
            .map(|record| SymbolDebugEntry {
                name: record.name.clone(),
                kind: record.kind,
                metadata: record.metadata.clone(),
            })
            .collect()
    }

}
