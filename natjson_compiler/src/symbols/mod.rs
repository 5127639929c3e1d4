//! Symbol table for declared entities.

pub mod table;

pub use table::{SymbolDebugEntry, SymbolKind, SymbolMetadata, SymbolRecord, SymbolTable};
