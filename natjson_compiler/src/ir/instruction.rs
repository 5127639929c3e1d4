//! The closed, domain-specific instruction set.
//!
//! Instructions are immutable once appended; the optimizer always produces
//! a new sequence. The typed [`Instruction`] enum is what the passes work
//! on; [`IrRecord`] is the stable serialized hand-off shape
//! (`{"opcode": "...", "args": [...]}`) consumed by external tooling.

use crate::grammar::ast::Literal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Instruction opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Opcode {
    CreateObject,
    SetProperty,
    CreateList,
    AppendList,
}

impl Opcode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateObject => "CREATE_OBJECT",
            Self::SetProperty => "SET_PROPERTY",
            Self::CreateList => "CREATE_LIST",
            Self::AppendList => "APPEND_LIST",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One IR instruction with typed payload.
///
/// Invariant (by construction order, not separately checked): every
/// `SetProperty`/`AppendList` for an entity is preceded somewhere earlier in
/// the sequence by the matching creation instruction for that name.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    CreateObject {
        name: String,
    },
    SetProperty {
        object: String,
        key: String,
        value: Literal,
    },
    CreateList {
        name: String,
    },
    AppendList {
        list: String,
        value: Literal,
    },
}

impl Instruction {
    pub fn opcode(&self) -> Opcode {
        match self {
            Self::CreateObject { .. } => Opcode::CreateObject,
            Self::SetProperty { .. } => Opcode::SetProperty,
            Self::CreateList { .. } => Opcode::CreateList,
            Self::AppendList { .. } => Opcode::AppendList,
        }
    }

    /// The entity this instruction targets (always the first argument).
    pub fn target(&self) -> &str {
        match self {
            Self::CreateObject { name } | Self::CreateList { name } => name,
            Self::SetProperty { object, .. } => object,
            Self::AppendList { list, .. } => list,
        }
    }

    pub fn is_creation(&self) -> bool {
        matches!(self, Self::CreateObject { .. } | Self::CreateList { .. })
    }

    pub fn is_operation(&self) -> bool {
        !self.is_creation()
    }

    /// Serialized hand-off record with the documented argument shapes.
    pub fn to_record(&self) -> IrRecord {
        let (opcode, args) = match self {
            Self::CreateObject { name } => {
                (Opcode::CreateObject, vec![serde_json::json!(name)])
            }
            Self::SetProperty { object, key, value } => (
                Opcode::SetProperty,
                vec![
                    serde_json::json!(object),
                    serde_json::json!(key),
                    serde_json::json!(value.value_type().as_str()),
                    value.to_json(),
                ],
            ),
            Self::CreateList { name } => (Opcode::CreateList, vec![serde_json::json!(name)]),
            Self::AppendList { list, value } => (
                Opcode::AppendList,
                vec![
                    serde_json::json!(list),
                    serde_json::json!(value.value_type().as_str()),
                    value.to_json(),
                ],
            ),
        };
        IrRecord { opcode, args }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateObject { name } => write!(f, "CREATE_OBJECT {}", name),
            Self::SetProperty { object, key, value } => {
                write!(f, "SET_PROPERTY {} {} {}", object, key, value)
            }
            Self::CreateList { name } => write!(f, "CREATE_LIST {}", name),
            Self::AppendList { list, value } => write!(f, "APPEND_LIST {} {}", list, value),
        }
    }
}

/// Stable hand-off format for external consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrRecord {
    pub opcode: Opcode,
    pub args: Vec<serde_json::Value>,
}

/// Convert a whole sequence into hand-off records.
pub fn to_records(instructions: &[Instruction]) -> Vec<IrRecord> {
    instructions.iter().map(Instruction::to_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_strings() {
        assert_eq!(Opcode::CreateObject.as_str(), "CREATE_OBJECT");
        assert_eq!(Opcode::SetProperty.as_str(), "SET_PROPERTY");
        assert_eq!(Opcode::CreateList.as_str(), "CREATE_LIST");
        assert_eq!(Opcode::AppendList.as_str(), "APPEND_LIST");
    }

    #[test]
    fn test_opcode_serializes_as_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&Opcode::AppendList).unwrap(),
            "\"APPEND_LIST\""
        );
    }

    #[test]
    fn test_target() {
        let instr = Instruction::SetProperty {
            object: "usuario".into(),
            key: "edad".into(),
            value: Literal::Integer(30),
        };
        assert_eq!(instr.target(), "usuario");
        assert!(instr.is_operation());
        assert!(!instr.is_creation());
    }

    #[test]
    fn test_set_property_record_shape() {
        let record = Instruction::SetProperty {
            object: "usuario".into(),
            key: "nombre".into(),
            value: Literal::String("Juan".into()),
        }
        .to_record();
        assert_eq!(record.opcode, Opcode::SetProperty);
        assert_eq!(
            record.args,
            vec![
                serde_json::json!("usuario"),
                serde_json::json!("nombre"),
                serde_json::json!("STRING"),
                serde_json::json!("Juan"),
            ]
        );
    }

    #[test]
    fn test_append_list_record_shape() {
        let record = Instruction::AppendList {
            list: "numeros".into(),
            value: Literal::Integer(1),
        }
        .to_record();
        assert_eq!(record.opcode, Opcode::AppendList);
        assert_eq!(
            record.args,
            vec![
                serde_json::json!("numeros"),
                serde_json::json!("NUMBER"),
                serde_json::json!(1),
            ]
        );
    }

    #[test]
    fn test_creation_record_shape() {
        let record = Instruction::CreateObject {
            name: "config".into(),
        }
        .to_record();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"opcode": "CREATE_OBJECT", "args": ["config"]})
        );
    }
}
