//! Syntax analysis stage.

pub mod parser;

pub use parser::Parser;

use crate::diagnostics::ErrorReporter;
use crate::grammar::ast::Program;
use crate::tokens::TokenStream;

/// Parse a token stream into a program, reporting violations as syntactic
/// diagnostics. Recovery keeps the parse going, so the returned program may
/// be partial when errors were reported.
pub fn parse(tokens: TokenStream, reporter: &mut ErrorReporter) -> Program {
    Parser::new(tokens, reporter).parse_program()
}
