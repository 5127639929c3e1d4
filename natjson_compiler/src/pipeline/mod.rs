//! End-to-end analysis pipeline over one source unit.
//!
//! Stage order and gating:
//!
//! 1. lexical analysis (lexical diagnostics collected),
//! 2. syntax analysis (syntactic diagnostics collected, recovery keeps the
//!    parse going),
//! 3. semantic analysis — only when stages 1–2 reported nothing,
//! 4. IR build → optimize → JSON + Python emission — only when stage 3 also
//!    reported nothing.
//!
//! When a gate fails, no output artifact exists; the error summary and the
//! stats are available on every path.

mod error;
mod result;

pub use error::PipelineError;
pub use result::{AnalysisResult, AnalysisStats};

use crate::codegen;
use crate::diagnostics::ErrorReporter;
use crate::ir::{optimize, IrBuilder};
use crate::lexical::LexicalAnalyzer;
use crate::semantic::SemanticAnalyzer;
use crate::symbols::SymbolTable;
use crate::syntax::Parser;
use crate::tokens::TokenStream;
use std::path::Path;
use std::time::Instant;

/// Run the full pipeline over in-memory source text.
pub fn process_source(source_name: &str, content: &str) -> Result<AnalysisResult, PipelineError> {
    let start_time = Instant::now();
    log::info!("processing source unit '{}'", source_name);

    let mut reporter = ErrorReporter::new(source_name);
    let mut stats = AnalysisStats::default();

    // Stage 1: lexical analysis
    let tokens = LexicalAnalyzer::new().tokenize(content, &mut reporter);
    let token_listing = render_token_listing(&tokens);
    stats.parser_token_count = tokens.parser_token_count();

    // Stage 2: syntax analysis (recovering; the program may be partial)
    let program = Parser::new(tokens, &mut reporter).parse_program();

    let mut symbols = Vec::new();
    let mut ir = Vec::new();
    let mut json_output = None;
    let mut python_output = None;

    // Stage 3: semantic analysis, gated on a clean front end
    if reporter.total_errors() == 0 {
        let mut table = SymbolTable::new();
        SemanticAnalyzer::analyze(&program, &mut table, &mut reporter);
        symbols = table.debug_view();

        // Stage 4: lowering, optimization, and emission, gated on zero
        // semantic findings
        if reporter.semantic_errors() == 0 {
            let raw_ir = IrBuilder::build(&program);
            ir = optimize(&raw_ir);
            stats.commands_processed = ir.iter().filter(|i| i.is_creation()).count();
            json_output = Some(codegen::json_string(&ir)?);
            python_output = Some(codegen::emit_python(&ir));
        }
    }

    stats.lexical_errors = reporter.lexical_errors();
    stats.syntactic_errors = reporter.syntactic_errors();
    stats.semantic_errors = reporter.semantic_errors();
    stats.set_duration(start_time.elapsed());

    let error_summary = reporter.summary();
    if reporter.total_errors() > 0 {
        log::info!(
            "'{}' finished with {} diagnostics; no output produced",
            source_name,
            reporter.total_errors()
        );
    } else {
        log::info!("'{}' finished clean", source_name);
    }

    Ok(AnalysisResult {
        json_output,
        python_output,
        ir,
        symbols,
        diagnostics: reporter.diagnostics().to_vec(),
        error_summary,
        token_listing,
        stats,
    })
}

/// Convenience entry point: read a file and run the pipeline on it. The
/// source name in diagnostics is the file name.
pub fn process_file<P: AsRef<Path>>(path: P) -> Result<AnalysisResult, PipelineError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| PipelineError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let source_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    process_source(&source_name, &content)
}

/// Textual listing of the tokens the lexer recognized.
fn render_token_listing(tokens: &TokenStream) -> String {
    let mut lines = vec!["--- Tokens Reconocidos por el Analizador Léxico ---".to_string()];
    let mut count = 0usize;
    for spanned in tokens.iter_significant() {
        lines.push(format!(
            "  ● Token #{}: Tipo={:<18} Texto='{}' (L:{}, C:{})",
            count,
            spanned.value.symbolic_name(),
            spanned.value.source_text(),
            spanned.span.start.line,
            spanned.span.start.user_column(),
        ));
        count += 1;
    }
    if count == 0 {
        lines.push("  No se reconocieron tokens del canal por defecto.".to_string());
    }
    lines.push("-------------------------------------------------\n".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::ast::ValueType;
    use crate::ir::Opcode;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_end_to_end_object() {
        let result =
            process_source("test", r#"CREAR OBJETO usuario CON nombre:"Juan", edad:30"#).unwrap();
        assert!(result.is_clean());
        assert_eq!(result.error_summary, "");

        let records = result.ir_records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].opcode, Opcode::CreateObject);
        assert_eq!(records[0].args, vec![serde_json::json!("usuario")]);
        assert_eq!(records[1].opcode, Opcode::SetProperty);
        assert_eq!(
            records[1].args,
            vec![
                serde_json::json!("usuario"),
                serde_json::json!("nombre"),
                serde_json::json!("STRING"),
                serde_json::json!("Juan"),
            ]
        );
        assert_eq!(records[2].args[1], serde_json::json!("edad"));
        assert_eq!(records[2].args[2], serde_json::json!("NUMBER"));
        assert_eq!(records[2].args[3], serde_json::json!(30));

        let json: serde_json::Value =
            serde_json::from_str(result.json_output.as_deref().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"usuario": {"nombre": "Juan", "edad": 30}})
        );
    }

    #[test]
    fn test_end_to_end_list() {
        let result = process_source("test", "CREAR LISTA numeros CON ELEMENTOS 1, 2, 3").unwrap();
        assert!(result.is_clean());

        let records = result.ir_records();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].opcode, Opcode::CreateList);
        for (record, expected) in records[1..].iter().zip([1, 2, 3]) {
            assert_eq!(record.opcode, Opcode::AppendList);
            assert_eq!(record.args[1], serde_json::json!("NUMBER"));
            assert_eq!(record.args[2], serde_json::json!(expected));
        }

        let json: serde_json::Value =
            serde_json::from_str(result.json_output.as_deref().unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({"numeros": [1, 2, 3]}));
    }

    #[test]
    fn test_mixed_commands_and_python_emission() {
        let source = "CREAR OBJETO config CON debug:FALSO\nCREAR LISTA ips CON ELEMENTOS \"192.168.1.1\", \"127.0.0.1\"";
        let result = process_source("test", source).unwrap();
        assert!(result.is_clean());
        assert_eq!(result.stats.commands_processed, 2);

        let python = result.python_output.unwrap();
        assert!(python.starts_with("# --- Codigo Generado ---"));
        assert!(python.contains("config = {}"));
        assert!(python.contains("config[\"debug\"] = False"));
        assert!(python.contains("ips = []"));
        assert!(python.contains("ips.append('192.168.1.1')"));
    }

    #[test]
    fn test_optimizer_runs_in_pipeline() {
        // interleaved writes collapse and group
        let source = "CREAR OBJETO a CON x:1\nCREAR OBJETO b CON y:2\nCREAR OBJETO c CON z:3";
        let result = process_source("test", source).unwrap();
        assert!(result.is_clean());
        let targets: Vec<_> = result.ir.iter().map(|i| i.target().to_string()).collect();
        assert_eq!(targets, vec!["a", "a", "b", "b", "c", "c"]);
    }

    #[test]
    fn test_semantic_gate_blocks_output() {
        let source = "CREAR OBJETO datos CON x:1\nCREAR OBJETO datos CON y:2";
        let result = process_source("test", source).unwrap();
        assert_eq!(result.stats.semantic_errors, 1);
        assert_eq!(result.stats.lexical_errors, 0);
        assert_eq!(result.stats.syntactic_errors, 0);
        assert!(result.json_output.is_none());
        assert!(result.python_output.is_none());
        assert!(result.ir.is_empty());
        assert_eq!(result.stats.commands_processed, 0);
        assert!(result
            .error_summary
            .contains("Redefinición del símbolo 'datos'"));
        // the symbol view is still exposed for tooling
        assert_eq!(result.symbols.len(), 1);
    }

    #[test]
    fn test_front_end_gate_blocks_semantic_analysis() {
        // lexical error: semantic analysis must not even run
        let result = process_source("test", "CREAR OBJETO a CON x:@1").unwrap();
        assert!(result.stats.lexical_errors > 0);
        assert_eq!(result.stats.semantic_errors, 0);
        assert!(result.symbols.is_empty());
        assert!(result.json_output.is_none());
    }

    #[test]
    fn test_reserved_name_yields_semantic_error() {
        let result = process_source("test", "CREAR OBJETO lista CON x:1").unwrap();
        assert_eq!(result.stats.semantic_errors, 1);
        assert!(result.error_summary.contains("palabra reservada"));
        assert!(result.json_output.is_none());
    }

    #[test]
    fn test_symbols_debug_view() {
        let source = "CREAR OBJETO usuario CON nombre:\"Juan\", edad:30, activo:VERDADERO\nCREAR LISTA numeros CON ELEMENTOS 1, 2, 3";
        let result = process_source("test", source).unwrap();
        assert!(result.is_clean());

        let usuario = result
            .symbols
            .iter()
            .find(|entry| entry.name == "usuario")
            .unwrap();
        assert_eq!(usuario.kind.as_str(), "objeto");
        let properties = usuario.metadata.properties().unwrap();
        assert_eq!(properties["nombre"], ValueType::String);
        assert_eq!(properties["edad"], ValueType::Number);
        assert_eq!(properties["activo"], ValueType::Boolean);

        let numeros = result
            .symbols
            .iter()
            .find(|entry| entry.name == "numeros")
            .unwrap();
        assert_eq!(numeros.kind.as_str(), "lista");
        assert_eq!(
            numeros.metadata.element_types().unwrap(),
            &[ValueType::Number; 3]
        );
    }

    #[test]
    fn test_stats_token_count() {
        let result = process_source("test", "CREAR LISTA n CON ELEMENTOS 1, 2").unwrap();
        // CREAR LISTA n CON ELEMENTOS 1 , 2 -> 8 significant tokens
        assert_eq!(result.stats.parser_token_count, 8);
        assert!(result.stats.analysis_seconds >= 0.0);
    }

    #[test]
    fn test_token_listing() {
        let result = process_source("test", "CREAR OBJETO a CON x:1").unwrap();
        assert!(result
            .token_listing
            .starts_with("--- Tokens Reconocidos por el Analizador Léxico ---"));
        assert!(result.token_listing.contains("Tipo=KW_CREAR"));
        assert!(result.token_listing.contains("Texto='CREAR' (L:1, C:1)"));
    }

    #[test]
    fn test_token_listing_empty_input() {
        let result = process_source("test", "").unwrap();
        assert!(result
            .token_listing
            .contains("No se reconocieron tokens del canal por defecto."));
        // empty program is clean and produces an empty document
        assert_eq!(result.json_output.as_deref(), Some("{}"));
    }

    #[test]
    fn test_process_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "CREAR LISTA tags CON ELEMENTOS \"v1\", \"beta\"").unwrap();

        let result = process_file(file.path()).unwrap();
        assert!(result.is_clean());
        let json: serde_json::Value =
            serde_json::from_str(result.json_output.as_deref().unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({"tags": ["v1", "beta"]}));
    }

    #[test]
    fn test_process_missing_file() {
        let error = process_file("/definitely/not/here.txt").unwrap_err();
        assert_matches!(error, PipelineError::FileRead { .. });
    }

    #[test]
    fn test_diagnostics_carry_source_name() {
        let result = process_source("entrada.txt", "CREAR OBJETO lista CON x:1").unwrap();
        assert_eq!(result.diagnostics[0].source_name, "entrada.txt");
        assert!(result
            .error_summary
            .contains("en 'entrada.txt'"));
    }
}
