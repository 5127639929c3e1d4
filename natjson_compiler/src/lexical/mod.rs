//! Lexical analysis stage.

pub mod analyzer;

pub use analyzer::{LexicalAnalyzer, LexicalMetrics};

use crate::diagnostics::ErrorReporter;
use crate::tokens::TokenStream;

/// Tokenize a source unit, reporting malformed input as lexical
/// diagnostics. Scanning always runs to the end of input.
pub fn tokenize(source: &str, reporter: &mut ErrorReporter) -> TokenStream {
    LexicalAnalyzer::new().tokenize(source, reporter)
}
