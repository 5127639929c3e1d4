//! Parse tree node definitions for the two command productions.
//!
//! Literal values are decoded exactly once at this boundary into the
//! [`Literal`] sum type; every later pass (semantic analysis, IR building,
//! emission) matches on the union instead of re-deriving the kind from
//! syntax.

use crate::utils::{Span, Spanned};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Generic identifier type. Validation rules: `[a-zA-Z_][a-zA-Z0-9_]*`.
pub type Identifier = String;

/// A literal value decoded into its native representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// Quote characters stripped, escape sequences resolved
    String(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
}

impl Literal {
    /// The logical type tag recorded in symbol metadata and IR arguments.
    /// Integer and decimal forms share the NUMBER tag.
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::String(_) => ValueType::String,
            Self::Integer(_) | Self::Decimal(_) => ValueType::Number,
            Self::Boolean(_) => ValueType::Boolean,
        }
    }

    /// Convert to a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::String(s) => serde_json::Value::from(s.clone()),
            Self::Integer(i) => serde_json::Value::from(*i),
            Self::Decimal(d) => serde_json::Value::from(*d),
            Self::Boolean(b) => serde_json::Value::from(*b),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "\"{}\"", s),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Decimal(d) => write!(f, "{}", d),
            Self::Boolean(true) => write!(f, "VERDADERO"),
            Self::Boolean(false) => write!(f, "FALSO"),
        }
    }
}

/// Logical value-type tag. UNKNOWN is representable for metadata robustness
/// but never produced by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValueType {
    String,
    Number,
    Boolean,
    Unknown,
}

impl ValueType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Number => "NUMBER",
            Self::Boolean => "BOOLEAN",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A `key : value` pair inside an object-creation command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub key: Identifier,
    pub key_span: Span,
    pub value: Spanned<Literal>,
}

/// `CREAR OBJETO name CON prop, prop, ...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectCommand {
    pub name: Identifier,
    pub name_span: Span,
    pub properties: Vec<Property>,
    pub span: Span,
}

/// `CREAR LISTA name CON ELEMENTOS value, value, ...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListCommand {
    pub name: Identifier,
    pub name_span: Span,
    pub elements: Vec<Spanned<Literal>>,
    pub span: Span,
}

/// One top-level command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    CreateObject(ObjectCommand),
    CreateList(ListCommand),
}

impl Command {
    pub fn name(&self) -> &str {
        match self {
            Self::CreateObject(cmd) => &cmd.name,
            Self::CreateList(cmd) => &cmd.name,
        }
    }

    pub fn name_span(&self) -> Span {
        match self {
            Self::CreateObject(cmd) => cmd.name_span,
            Self::CreateList(cmd) => cmd.name_span,
        }
    }
}

/// A parsed source unit: a flat sequence of commands.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    pub commands: Vec<Command>,
    pub span: Span,
}

impl Program {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_tags() {
        assert_eq!(
            Literal::String("hola".into()).value_type(),
            ValueType::String
        );
        assert_eq!(Literal::Integer(30).value_type(), ValueType::Number);
        assert_eq!(Literal::Decimal(2.5).value_type(), ValueType::Number);
        assert_eq!(Literal::Boolean(true).value_type(), ValueType::Boolean);
    }

    #[test]
    fn test_value_type_strings() {
        assert_eq!(ValueType::String.as_str(), "STRING");
        assert_eq!(ValueType::Number.as_str(), "NUMBER");
        assert_eq!(ValueType::Boolean.as_str(), "BOOLEAN");
        assert_eq!(ValueType::Unknown.as_str(), "UNKNOWN");
    }

    #[test]
    fn test_literal_to_json() {
        assert_eq!(
            Literal::String("Juan".into()).to_json(),
            serde_json::json!("Juan")
        );
        assert_eq!(Literal::Integer(30).to_json(), serde_json::json!(30));
        assert_eq!(Literal::Decimal(2.5).to_json(), serde_json::json!(2.5));
        assert_eq!(Literal::Boolean(false).to_json(), serde_json::json!(false));
    }

    #[test]
    fn test_value_type_serializes_uppercase() {
        let json = serde_json::to_string(&ValueType::Number).unwrap();
        assert_eq!(json, "\"NUMBER\"");
    }
}
