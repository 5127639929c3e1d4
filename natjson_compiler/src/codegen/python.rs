//! Python source emission: a deterministic template per opcode.

use crate::grammar::ast::Literal;
use crate::ir::instruction::Instruction;

/// Generate Python code that reconstructs every entity when executed.
pub fn emit_python(instructions: &[Instruction]) -> String {
    let mut lines = vec!["# --- Codigo Generado ---".to_string()];

    for instr in instructions {
        match instr {
            Instruction::CreateObject { name } => {
                lines.push(format!("{} = {{}}", name));
            }
            Instruction::SetProperty { object, key, value } => {
                lines.push(format!(
                    "{}[\"{}\"] = {}",
                    object,
                    key,
                    python_literal(value)
                ));
            }
            Instruction::CreateList { name } => {
                lines.push(format!("{} = []", name));
            }
            Instruction::AppendList { list, value } => {
                lines.push(format!("{}.append({})", list, python_literal(value)));
            }
        }
    }

    lines.join("\n")
}

/// Render a literal as valid Python source.
pub fn python_literal(value: &Literal) -> String {
    match value {
        Literal::String(s) => python_repr(s),
        Literal::Integer(i) => i.to_string(),
        // a decimal must stay a Python float literal even when the
        // fractional part is zero
        Literal::Decimal(d) if d.fract() == 0.0 && d.is_finite() => format!("{:.1}", d),
        Literal::Decimal(d) => d.to_string(),
        Literal::Boolean(true) => "True".to_string(),
        Literal::Boolean(false) => "False".to_string(),
    }
}

/// repr()-style quoting: single quotes by default, double quotes when the
/// content holds a single quote but no double quote.
fn python_repr(s: &str) -> String {
    let use_double = s.contains('\'') && !s.contains('"');
    let quote = if use_double { '"' } else { '\'' };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
