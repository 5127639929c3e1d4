use crate::diagnostics::Diagnostic;
use crate::ir::instruction::{to_records, IrRecord};
use crate::ir::Instruction;
use crate::symbols::SymbolDebugEntry;
use serde::Serialize;
use std::time::Duration;

/// Per-run statistics, mirroring what the analyzer has always exposed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisStats {
    /// Wall-clock analysis time in seconds, rounded to 4 decimals
    #[serde(rename = "tiempo_analisis_seg")]
    pub analysis_seconds: f64,
    /// Entities materialized on the successful path
    #[serde(rename = "comandos_procesados")]
    pub commands_processed: usize,
    /// Significant tokens handed to the parser (EOF excluded)
    #[serde(rename = "tokens_al_parser")]
    pub parser_token_count: usize,
    #[serde(rename = "errores_lexicos")]
    pub lexical_errors: usize,
    #[serde(rename = "errores_sintacticos")]
    pub syntactic_errors: usize,
    #[serde(rename = "errores_semanticos")]
    pub semantic_errors: usize,
}

impl AnalysisStats {
    pub(crate) fn set_duration(&mut self, duration: Duration) {
        self.analysis_seconds = (duration.as_secs_f64() * 10_000.0).round() / 10_000.0;
    }
}

/// Everything one analysis run produces. The output artifacts are `None`
/// whenever a gate failed; the diagnostics and stats are always present.
#[derive(Debug)]
pub struct AnalysisResult {
    /// JSON document, gated on zero errors of any kind
    pub json_output: Option<String>,
    /// Generated Python source, same gating
    pub python_output: Option<String>,
    /// Optimized instruction sequence (empty when gated)
    pub ir: Vec<Instruction>,
    /// Symbol-table debug view in declaration order
    pub symbols: Vec<SymbolDebugEntry>,
    /// Collected diagnostics in arrival order
    pub diagnostics: Vec<Diagnostic>,
    /// Boxed summary block; empty string when clean
    pub error_summary: String,
    /// Textual listing of recognized tokens
    pub token_listing: String,
    pub stats: AnalysisStats,
}

impl AnalysisResult {
    /// True when no diagnostic of any kind was collected.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The IR in its stable serialized hand-off shape.
    pub fn ir_records(&self) -> Vec<IrRecord> {
        to_records(&self.ir)
    }
}
