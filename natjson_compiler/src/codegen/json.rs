//! JSON materialization by replaying the optimized IR.
//!
//! Entities appear in creation order; object keys in write order. Writes
//! targeting an entity that was never created are skipped — that sequence
//! only exists for hand-built IR, never for IR lowered from a validated
//! program.

use crate::ir::instruction::Instruction;
use serde_json::{Map, Value};

/// Replay the instruction sequence into a JSON document.
pub fn json_from_ir(instructions: &[Instruction]) -> Value {
    let mut root = Map::new();

    for instr in instructions {
        match instr {
            Instruction::CreateObject { name } => {
                root.insert(name.clone(), Value::Object(Map::new()));
            }
            Instruction::SetProperty { object, key, value } => {
                match root.get_mut(object) {
                    Some(Value::Object(properties)) => {
                        properties.insert(key.clone(), value.to_json());
                    }
                    _ => log::debug!("skipping write to undeclared object '{}'", object),
                }
            }
            Instruction::CreateList { name } => {
                root.insert(name.clone(), Value::Array(Vec::new()));
            }
            Instruction::AppendList { list, value } => match root.get_mut(list) {
                Some(Value::Array(items)) => items.push(value.to_json()),
                _ => log::debug!("skipping append to undeclared list '{}'", list),
            },
        }
    }

    Value::Object(root)
}

/// The JSON document as a 2-space-indented string.
pub fn json_string(instructions: &[Instruction]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&json_from_ir(instructions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::ast::Literal;

    #[test]
    fn test_object_document() {
        let ir = vec![
            Instruction::CreateObject {
                name: "usuario".into(),
            },
            Instruction::SetProperty {
                object: "usuario".into(),
                key: "nombre".into(),
                value: Literal::String("Juan".into()),
            },
            Instruction::SetProperty {
                object: "usuario".into(),
                key: "edad".into(),
                value: Literal::Integer(30),
            },
        ];
        assert_eq!(
            json_from_ir(&ir),
            serde_json::json!({"usuario": {"nombre": "Juan", "edad": 30}})
        );
    }

    #[test]
    fn test_list_document() {
        let ir = vec![
            Instruction::CreateList {
                name: "numeros".into(),
            },
            Instruction::AppendList {
                list: "numeros".into(),
                value: Literal::Integer(1),
            },
            Instruction::AppendList {
                list: "numeros".into(),
                value: Literal::Integer(2),
            },
            Instruction::AppendList {
                list: "numeros".into(),
                value: Literal::Integer(3),
            },
        ];
        assert_eq!(json_from_ir(&ir), serde_json::json!({"numeros": [1, 2, 3]}));
    }

    #[test]
    fn test_entities_keep_creation_order() {
        let ir = vec![
            Instruction::CreateObject { name: "zeta".into() },
            Instruction::CreateList { name: "alfa".into() },
        ];
        let text = json_string(&ir).unwrap();
        let zeta_at = text.find("zeta").unwrap();
        let alfa_at = text.find("alfa").unwrap();
        assert!(zeta_at < alfa_at);
    }

    #[test]
    fn test_writes_to_missing_entities_are_skipped() {
        let ir = vec![
            Instruction::SetProperty {
                object: "ghost".into(),
                key: "x".into(),
                value: Literal::Integer(1),
            },
            Instruction::AppendList {
                list: "phantom".into(),
                value: Literal::Integer(2),
            },
        ];
        assert_eq!(json_from_ir(&ir), serde_json::json!({}));
    }

    #[test]
    fn test_non_ascii_stays_unescaped() {
        let ir = vec![
            Instruction::CreateObject {
                name: "config".into(),
            },
            Instruction::SetProperty {
                object: "config".into(),
                key: "título".into(),
                value: Literal::String("añejo".into()),
            },
        ];
        let text = json_string(&ir).unwrap();
        assert!(text.contains("título"));
        assert!(text.contains("añejo"));
    }

    #[test]
    fn test_pretty_output_uses_two_space_indent() {
        let ir = vec![Instruction::CreateObject {
            name: "usuario".into(),
        }];
        let text = json_string(&ir).unwrap();
        assert_eq!(text, "{\n  \"usuario\": {}\n}");
    }
}
