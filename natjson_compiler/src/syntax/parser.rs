//! Recursive-descent parser for the two command productions.
//!
//! Violations are reported through the raw-message callback contract: the
//! parser emits recognizer-shaped messages (`mismatched input … expecting
//! …`, `missing … at …`, …) and the reporter rewrites them for users. Two
//! recovery strategies keep the walk going:
//!
//! - a missing structural keyword (`CON`, `ELEMENTOS`) or `:` is reported
//!   and treated as present (single-token insertion);
//! - anything else abandons the current command and synchronizes to the
//!   next `CREAR`.

use crate::diagnostics::ErrorReporter;
use crate::grammar::ast::{
    Command, ListCommand, Literal, ObjectCommand, Program, Property,
};
use crate::grammar::keywords::Keyword;
use crate::tokens::{Token, TokenStream};
use crate::utils::{Span, Spanned};

pub struct Parser<'a> {
    tokens: TokenStream,
    reporter: &'a mut ErrorReporter,
    last_span: Span,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: TokenStream, reporter: &'a mut ErrorReporter) -> Self {
        Self {
            tokens,
            reporter,
            last_span: Span::dummy(),
        }
    }

    /// Parse the whole unit. Always returns a program; commands that failed
    /// to parse are simply absent from it.
    pub fn parse_program(mut self) -> Program {
        log::debug!("starting syntax analysis: {} tokens", self.tokens.len());

        let start_span = self.tokens.current_span().unwrap_or_else(Span::dummy);
        let mut commands = Vec::new();

        while !self.tokens.is_at_end() {
            match self.tokens.current_token() {
                Some(Token::Keyword(Keyword::Crear)) => match self.parse_command() {
                    Some(command) => commands.push(command),
                    None => self.synchronize(),
                },
                Some(_) => {
                    let (line, column, text) = self.current_info();
                    let raw = if commands.is_empty() {
                        format!("no viable alternative at input '{}'", text)
                    } else {
                        format!("extraneous input '{}' expecting {{KW_CREAR, EOF}}", text)
                    };
                    self.reporter
                        .report_syntax_error(line, column, &raw, Some(&text));
                    self.synchronize();
                }
                None => break,
            }
        }

        let span = commands
            .iter()
            .fold(None::<Span>, |acc, command| {
                let command_span = match command {
                    Command::CreateObject(cmd) => cmd.span,
                    Command::CreateList(cmd) => cmd.span,
                };
                Some(match acc {
                    Some(span) => span.merge(command_span),
                    None => command_span,
                })
            })
            .unwrap_or(start_span);

        log::debug!(
            "syntax analysis finished: {} commands, {} syntax errors",
            commands.len(),
            self.reporter.syntactic_errors()
        );

        Program { commands, span }
    }

    fn parse_command(&mut self) -> Option<Command> {
        let crear_span = self.tokens.current_span().unwrap_or(self.last_span);
        self.bump(); // CREAR

        match self.tokens.current_token() {
            Some(Token::Keyword(Keyword::Objeto)) => {
                self.bump();
                self.parse_object_body(crear_span)
            }
            Some(Token::Keyword(Keyword::Lista)) => {
                self.bump();
                self.parse_list_body(crear_span)
            }
            _ => {
                self.report_mismatched("{KW_OBJETO, KW_LISTA}");
                None
            }
        }
    }

    fn parse_object_body(&mut self, crear_span: Span) -> Option<Command> {
        let (name, name_span) = self.expect_identifier()?;
        self.expect_structural(Keyword::Con.symbolic_name(), |t| {
            t.is_keyword(Keyword::Con)
        });

        let mut properties = vec![self.parse_property()?];
        while matches!(self.tokens.current_token(), Some(Token::Comma)) {
            self.bump();
            properties.push(self.parse_property()?);
        }

        let end_span = properties.last().map(|p| p.value.span).unwrap_or(name_span);
        Some(Command::CreateObject(ObjectCommand {
            name,
            name_span,
            properties,
            span: crear_span.merge(end_span),
        }))
    }

    fn parse_list_body(&mut self, crear_span: Span) -> Option<Command> {
        let (name, name_span) = self.expect_identifier()?;
        self.expect_structural(Keyword::Con.symbolic_name(), |t| {
            t.is_keyword(Keyword::Con)
        });
        self.expect_structural(Keyword::Elementos.symbolic_name(), |t| {
            t.is_keyword(Keyword::Elementos)
        });

        let mut elements = vec![self.parse_value()?];
        while matches!(self.tokens.current_token(), Some(Token::Comma)) {
            self.bump();
            elements.push(self.parse_value()?);
        }

        let end_span = elements.last().map(|v| v.span).unwrap_or(name_span);
        Some(Command::CreateList(ListCommand {
            name,
            name_span,
            elements,
            span: crear_span.merge(end_span),
        }))
    }

    fn parse_property(&mut self) -> Option<Property> {
        let (key, key_span) = self.expect_identifier()?;
        self.expect_structural("DOS_PUNTOS", |t| matches!(t, Token::Colon));
        let value = self.parse_value()?;
        Some(Property {
            key,
            key_span,
            value,
        })
    }

    fn parse_value(&mut self) -> Option<Spanned<Literal>> {
        let span = self.tokens.current_span().unwrap_or(self.last_span);
        let literal = match self.tokens.current_token() {
            Some(Token::StringLiteral(s)) => Literal::String(s.clone()),
            Some(Token::Integer(i)) => Literal::Integer(*i),
            Some(Token::Decimal(d)) => Literal::Decimal(*d),
            Some(Token::Keyword(Keyword::Verdadero)) => Literal::Boolean(true),
            Some(Token::Keyword(Keyword::Falso)) => Literal::Boolean(false),
            _ => {
                self.report_mismatched(
                    "{STRING, NUMERO_ENTERO, NUMERO_DECIMAL, KW_VERDADERO, KW_FALSO}",
                );
                return None;
            }
        };
        self.bump();
        Some(Spanned::new(literal, span))
    }

    fn expect_identifier(&mut self) -> Option<(String, Span)> {
        if let Some(Token::Identifier(name)) = self.tokens.current_token() {
            let name = name.clone();
            let span = self.tokens.current_span().unwrap_or(self.last_span);
            self.bump();
            return Some((name, span));
        }
        self.report_mismatched("IDENTIFICADOR");
        None
    }

    /// Single-token insertion for a missing structural token: report it and
    /// continue as if it were present.
    fn expect_structural(&mut self, symbolic_name: &str, matches: impl Fn(&Token) -> bool) {
        if self.tokens.current_token().is_some_and(&matches) {
            self.bump();
            return;
        }
        let (line, column, text) = self.current_info();
        self.reporter.report_syntax_error(
            line,
            column,
            &format!("missing {} at '{}'", symbolic_name, text),
            Some(&text),
        );
    }

    fn report_mismatched(&mut self, expected: &str) {
        let (line, column, text) = self.current_info();
        self.reporter.report_syntax_error(
            line,
            column,
            &format!("mismatched input '{}' expecting {}", text, expected),
            Some(&text),
        );
    }

    /// Position and source text of the current token; past the end of the
    /// stream this degrades to the last seen position and `<EOF>`.
    fn current_info(&self) -> (u32, u32, String) {
        match self.tokens.current() {
            Some(spanned) => (
                spanned.span.start.line,
                spanned.span.start.column,
                spanned.value.source_text(),
            ),
            None => (
                self.last_span.start.line,
                self.last_span.start.column,
                "<EOF>".to_string(),
            ),
        }
    }

    fn bump(&mut self) {
        if let Some(span) = self.tokens.current_span() {
            self.last_span = span;
        }
        self.tokens.advance();
    }

    /// Panic-mode recovery: skip the offending token, then everything up to
    /// the next CREAR.
    fn synchronize(&mut self) {
        if !self.tokens.is_at_end() {
            self.bump();
        }
        while !self.tokens.is_at_end() {
            if matches!(
                self.tokens.current_token(),
                Some(Token::Keyword(Keyword::Crear))
            ) {
                break;
            }
            self.bump();
        }
    }
}
