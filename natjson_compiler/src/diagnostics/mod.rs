//! Diagnostic collection and user-facing formatting.
//!
//! Three diagnostic kinds — lexical, syntactic, semantic — share one
//! arrival-ordered list and keep per-kind counters. Nothing here is ever
//! thrown: the reporter is the single place the pipeline's gates look at.
//!
//! Lexical and syntactic reports arrive as raw recognizer messages (the
//! ANTLR shapes `mismatched input … expecting …`, `extraneous input …`,
//! `missing … at …`, `no viable alternative at input …`) and are rewritten
//! into user-facing Spanish sentences; unrecognized shapes fall back to a
//! generic wording.

use crate::config::constants::diagnostics::MAX_DIAGNOSTICS;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    Lexical,
    Syntactic,
    Semantic,
}

impl DiagnosticKind {
    /// Spanish label used in the formatted sentence.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lexical => "Léxico",
            Self::Syntactic => "Sintáctico",
            Self::Semantic => "Semántico",
        }
    }
}

/// One collected diagnostic. `column` is 1-indexed (user-facing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub source_name: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl Diagnostic {
    /// The full user-facing sentence.
    pub fn formatted(&self) -> String {
        format!(
            "Error {} en '{}' (Línea {}:Columna {}): {}",
            self.kind.label(),
            self.source_name,
            self.line,
            self.column,
            self.message
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

/// Accumulates diagnostics for one analysis run.
#[derive(Debug, Clone)]
pub struct ErrorReporter {
    source_name: String,
    lexical_errors: usize,
    syntactic_errors: usize,
    semantic_errors: usize,
    diagnostics: Vec<Diagnostic>,
}

impl ErrorReporter {
    pub fn new(source_name: &str) -> Self {
        Self {
            source_name: source_name.to_string(),
            lexical_errors: 0,
            syntactic_errors: 0,
            semantic_errors: 0,
            diagnostics: Vec::new(),
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn lexical_errors(&self) -> usize {
        self.lexical_errors
    }

    pub fn syntactic_errors(&self) -> usize {
        self.syntactic_errors
    }

    pub fn semantic_errors(&self) -> usize {
        self.semantic_errors
    }

    /// Sum of all three counters; the coarse pipeline gate.
    pub fn total_errors(&self) -> usize {
        self.lexical_errors + self.syntactic_errors + self.semantic_errors
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Report a lexical error. `column` is 0-indexed as delivered by the
    /// scanner; the stored diagnostic is shifted to 1-indexed.
    pub fn report_lexical_error(&mut self, line: u32, column: u32, raw_message: &str) {
        self.lexical_errors += 1;
        let message = reformat_lexical(raw_message);
        self.push(DiagnosticKind::Lexical, line, column + 1, message);
    }

    /// Report a syntax error from the parser callback contract. `column` is
    /// 0-indexed; `offending_text` is the source rendering of the offending
    /// token (`None` and `<EOF>` both present as end-of-input).
    pub fn report_syntax_error(
        &mut self,
        line: u32,
        column: u32,
        raw_message: &str,
        offending_text: Option<&str>,
    ) {
        self.syntactic_errors += 1;
        let offending = match offending_text {
            None | Some("<EOF>") => "fin de la entrada",
            Some(text) => text,
        };
        let message = reformat_syntactic(raw_message, offending);
        self.push(DiagnosticKind::Syntactic, line, column + 1, message);
    }

    /// Record a semantic error. `column` is already 1-indexed: semantic
    /// callers shift positions before reporting, matching the callback
    /// contract of the other two kinds shifting internally.
    pub fn add_semantic_error(&mut self, line: u32, column: u32, message: impl Into<String>) {
        self.semantic_errors += 1;
        self.push(DiagnosticKind::Semantic, line, column, message.into());
    }

    fn push(&mut self, kind: DiagnosticKind, line: u32, column: u32, message: String) {
        if self.diagnostics.len() >= MAX_DIAGNOSTICS {
            log::warn!(
                "diagnostic list at capacity ({}); further messages dropped",
                MAX_DIAGNOSTICS
            );
            return;
        }
        self.diagnostics.push(Diagnostic {
            kind,
            source_name: self.source_name.clone(),
            line,
            column,
            message,
        });
    }

    /// All diagnostics as formatted sentences, in arrival order.
    pub fn formatted_messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(Diagnostic::formatted).collect()
    }

    /// The boxed error summary block, or the empty string when clean.
    pub fn summary(&self) -> String {
        if self.diagnostics.is_empty() {
            return String::new();
        }
        let mut summary = String::from("╔═════════════════════════════════════╗\n");
        summary.push_str("║     Resumen de Errores Detectados     ║\n");
        summary.push_str("╚═════════════════════════════════════╝\n");
        let lines: Vec<String> = self
            .diagnostics
            .iter()
            .map(|d| format!("  ⚠️  {}", d.formatted()))
            .collect();
        summary.push_str(&lines.join("\n"));
        summary
    }
}

/// Rewrite a raw lexer message into Spanish.
fn reformat_lexical(raw: &str) -> String {
    const MARKER: &str = "token recognition error at: '";
    if let Some(rest) = raw.split(MARKER).nth(1) {
        match rest.strip_suffix('\'') {
            Some(problem) => format!("Carácter inesperado o no reconocido: '{}'.", problem),
            None => "Error de reconocimiento de token no especificado.".to_string(),
        }
    } else {
        format!("Error léxico general: {}", raw)
    }
}

/// Rewrite a raw parser message into Spanish by pattern matching the known
/// recognizer shapes.
fn reformat_syntactic(raw: &str, offending: &str) -> String {
    if raw.contains("mismatched input") && raw.contains("expecting") {
        match raw.split("expecting ").nth(1) {
            Some(expected) => format!(
                "Se encontró '{}' pero se esperaba {}.",
                offending, expected
            ),
            None => format!("Entrada no coincide: '{}'. {}", offending, raw),
        }
    } else if raw.contains("extraneous input") && raw.contains("expecting") {
        match raw.split("expecting ").nth(1) {
            Some(expected) => format!(
                "Entrada adicional o fuera de lugar: '{}'. Se esperaba {} antes o después.",
                offending, expected
            ),
            None => format!("Entrada sobrante: '{}'. {}", offending, raw),
        }
    } else if raw.contains("missing") && raw.contains(" at") {
        let missing = raw
            .split("missing ")
            .nth(1)
            .and_then(|rest| rest.split(" at").next());
        match missing {
            Some(token) => format!(
                "Falta el símbolo/palabra clave '{}' cerca de '{}'.",
                token, offending
            ),
            None => format!("Elemento faltante. {}", raw),
        }
    } else if raw.contains("no viable alternative at input") {
        format!(
            "No se reconoce la estructura del comando cerca de '{}'. Verifica la sintaxis.",
            offending
        )
    } else {
        format!(
            "Error de estructura cerca de '{}'. Detalle: {}",
            offending, raw
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_and_total() {
        let mut reporter = ErrorReporter::new("test");
        reporter.report_lexical_error(1, 0, "token recognition error at: '@'");
        reporter.report_syntax_error(2, 4, "mismatched input 'x' expecting CON", Some("x"));
        reporter.add_semantic_error(3, 1, "Redefinición del símbolo 'a'.");
        assert_eq!(reporter.lexical_errors(), 1);
        assert_eq!(reporter.syntactic_errors(), 1);
        assert_eq!(reporter.semantic_errors(), 1);
        assert_eq!(reporter.total_errors(), 3);
        assert_eq!(reporter.diagnostics().len(), 3);
    }

    #[test]
    fn test_lexical_reformat_extracts_character() {
        let mut reporter = ErrorReporter::new("in");
        reporter.report_lexical_error(1, 5, "token recognition error at: '@'");
        let d = &reporter.diagnostics()[0];
        assert_eq!(d.column, 6); // shifted to 1-indexed
        assert_eq!(d.message, "Carácter inesperado o no reconocido: '@'.");
        assert!(d
            .formatted()
            .starts_with("Error Léxico en 'in' (Línea 1:Columna 6):"));
    }

    #[test]
    fn test_lexical_reformat_fallback() {
        let mut reporter = ErrorReporter::new("in");
        reporter.report_lexical_error(1, 0, "something unusual");
        assert_eq!(
            reporter.diagnostics()[0].message,
            "Error léxico general: something unusual"
        );
    }

    #[test]
    fn test_mismatched_input_shape() {
        let mut reporter = ErrorReporter::new("in");
        reporter.report_syntax_error(
            1,
            13,
            "mismatched input 'CON' expecting IDENTIFICADOR",
            Some("CON"),
        );
        assert_eq!(
            reporter.diagnostics()[0].message,
            "Se encontró 'CON' pero se esperaba IDENTIFICADOR."
        );
    }

    #[test]
    fn test_extraneous_input_shape() {
        let mut reporter = ErrorReporter::new("in");
        reporter.report_syntax_error(
            1,
            20,
            "extraneous input 'y' expecting {COMA, KW_CREAR, EOF}",
            Some("y"),
        );
        assert_eq!(
            reporter.diagnostics()[0].message,
            "Entrada adicional o fuera de lugar: 'y'. Se esperaba {COMA, KW_CREAR, EOF} antes o después."
        );
    }

    #[test]
    fn test_missing_token_shape() {
        let mut reporter = ErrorReporter::new("in");
        reporter.report_syntax_error(1, 8, "missing KW_CON at 'nombre'", Some("nombre"));
        assert_eq!(
            reporter.diagnostics()[0].message,
            "Falta el símbolo/palabra clave 'KW_CON' cerca de 'nombre'."
        );
    }

    #[test]
    fn test_no_viable_alternative_shape() {
        let mut reporter = ErrorReporter::new("in");
        reporter.report_syntax_error(1, 0, "no viable alternative at input 'xyz'", Some("xyz"));
        assert_eq!(
            reporter.diagnostics()[0].message,
            "No se reconoce la estructura del comando cerca de 'xyz'. Verifica la sintaxis."
        );
    }

    #[test]
    fn test_unrecognized_shape_fallback() {
        let mut reporter = ErrorReporter::new("in");
        reporter.report_syntax_error(1, 0, "rule blew up", Some("x"));
        assert_eq!(
            reporter.diagnostics()[0].message,
            "Error de estructura cerca de 'x'. Detalle: rule blew up"
        );
    }

    #[test]
    fn test_eof_presents_as_end_of_input() {
        let mut reporter = ErrorReporter::new("in");
        reporter.report_syntax_error(2, 0, "no viable alternative at input '<EOF>'", None);
        assert!(reporter.diagnostics()[0]
            .message
            .contains("'fin de la entrada'"));
    }

    #[test]
    fn test_summary_empty_when_clean() {
        let reporter = ErrorReporter::new("in");
        assert_eq!(reporter.summary(), "");
    }

    #[test]
    fn test_summary_block_format() {
        let mut reporter = ErrorReporter::new("entrada.txt");
        reporter.add_semantic_error(4, 1, "Redefinición del símbolo 'usuario'.");
        let summary = reporter.summary();
        assert!(summary.starts_with("╔"));
        assert!(summary.contains("Resumen de Errores Detectados"));
        assert!(summary.contains("  ⚠️  Error Semántico en 'entrada.txt' (Línea 4:Columna 1):"));
    }

    #[test]
    fn test_arrival_order_preserved() {
        let mut reporter = ErrorReporter::new("in");
        reporter.add_semantic_error(5, 1, "primero");
        reporter.add_semantic_error(2, 1, "segundo");
        let messages = reporter.formatted_messages();
        assert!(messages[0].contains("primero"));
        assert!(messages[1].contains("segundo"));
    }
}
