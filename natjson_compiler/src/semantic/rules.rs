//! Declaration-level validation rules applied while recording properties.

use crate::grammar::ast::ValueType;

/// Domain type expectations for well-known property keys.
const DOMAIN_RULES: &[(&str, ValueType)] = &[
    ("edad", ValueType::Number),
    ("activo", ValueType::Boolean),
];

/// Expected type for a key bound by a domain rule.
pub fn expected_type_for(key: &str) -> Option<ValueType> {
    DOMAIN_RULES
        .iter()
        .find(|(rule_key, _)| *rule_key == key)
        .map(|(_, expected)| *expected)
}

/// Domain-rule violation message, if the key is bound and the found type
/// disagrees.
pub fn check_domain_rule(key: &str, found: ValueType) -> Option<String> {
    let expected = expected_type_for(key)?;
    if found == expected {
        return None;
    }
    Some(format!(
        "La propiedad '{}' debe ser de tipo {}, pero se encontró {}.",
        key, expected, found
    ))
}

/// Same-command consistency: a key repeated with a different type is an
/// error. A same-type repeat stays silent; the metadata entry is simply
/// overwritten and the optimizer collapses the writes later.
pub fn check_consistency(key: &str, previous: ValueType, found: ValueType) -> Option<String> {
    if previous == found {
        return None;
    }
    Some(format!(
        "La propiedad '{}' no puede redefinirse con un tipo distinto ({} a {}) en el mismo comando.",
        key, previous, found
    ))
}
