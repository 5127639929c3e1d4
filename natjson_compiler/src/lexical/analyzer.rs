//! Single-pass scanner for the command language.
//!
//! Malformed input never aborts the scan: each problem is handed to the
//! error reporter as a lexical diagnostic (in the raw recognizer shape the
//! reporter knows how to rewrite) and scanning resumes at the next
//! character. The parser decides nothing here; keywords are recognized by
//! exact uppercase match and everything else word-like is an identifier.

use crate::config::constants::lexical::*;
use crate::diagnostics::ErrorReporter;
use crate::tokens::token::{classify_word, Token};
use crate::tokens::{SpannedToken, TokenStream};
use crate::utils::{Position, Span, Spanned};

/// Per-run scanner metrics.
#[derive(Debug, Default, Clone)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub keyword_tokens: usize,
    pub identifier_tokens: usize,
    pub literal_tokens: usize,
    pub comment_count: usize,
    pub invalid_chars: usize,
    pub max_string_length: usize,
}

impl LexicalMetrics {
    fn record_token(&mut self, token: &Token) {
        self.total_tokens += 1;
        match token {
            Token::Keyword(_) => self.keyword_tokens += 1,
            Token::Identifier(_) => self.identifier_tokens += 1,
            Token::StringLiteral(s) => {
                self.literal_tokens += 1;
                self.max_string_length = self.max_string_length.max(s.len());
            }
            Token::Integer(_) | Token::Decimal(_) => self.literal_tokens += 1,
            Token::Comment(_) => self.comment_count += 1,
            _ => {}
        }
    }
}

pub struct LexicalAnalyzer {
    metrics: LexicalMetrics,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self {
            metrics: LexicalMetrics::default(),
        }
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    /// Tokenize one source unit. Lexical problems are reported through
    /// `reporter`; the returned stream always ends with an EOF token.
    pub fn tokenize(&mut self, source: &str, reporter: &mut ErrorReporter) -> TokenStream {
        self.metrics = LexicalMetrics::default();

        log::debug!(
            "starting lexical analysis: {} bytes, source '{}'",
            source.len(),
            reporter.source_name()
        );

        let mut scanner = Scanner::new(source);
        let mut tokens: Vec<SpannedToken> = Vec::new();

        while let Some(ch) = scanner.peek() {
            if tokens.len() >= MAX_TOKEN_COUNT {
                reporter.report_lexical_error(
                    scanner.pos.line,
                    scanner.pos.column,
                    &format!("token recognition error at: '{}'", ch),
                );
                break;
            }

            let start = scanner.pos;
            match ch {
                ' ' | '\t' | '\r' | '\n' => {
                    scanner.bump();
                }
                '#' => {
                    let token = scanner.scan_comment();
                    self.push(&mut tokens, token, start, scanner.pos);
                }
                '"' => match scanner.scan_string(reporter) {
                    Some(token) => self.push(&mut tokens, token, start, scanner.pos),
                    None => {}
                },
                '-' if scanner.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => {
                    match scanner.scan_number(reporter) {
                        Some(token) => self.push(&mut tokens, token, start, scanner.pos),
                        None => {}
                    }
                }
                c if c.is_ascii_digit() => match scanner.scan_number(reporter) {
                    Some(token) => self.push(&mut tokens, token, start, scanner.pos),
                    None => {}
                },
                c if c.is_alphabetic() || c == '_' => {
                    match scanner.scan_word(reporter) {
                        Some(token) => self.push(&mut tokens, token, start, scanner.pos),
                        None => {}
                    }
                }
                ':' => {
                    scanner.bump();
                    self.push(&mut tokens, Token::Colon, start, scanner.pos);
                }
                ',' => {
                    scanner.bump();
                    self.push(&mut tokens, Token::Comma, start, scanner.pos);
                }
                other => {
                    self.metrics.invalid_chars += 1;
                    reporter.report_lexical_error(
                        start.line,
                        start.column,
                        &format!("token recognition error at: '{}'", other),
                    );
                    scanner.bump();
                }
            }
        }

        let eof_pos = scanner.pos;
        tokens.push(Spanned::new(Token::Eof, Span::new(eof_pos, eof_pos)));

        log::debug!(
            "lexical analysis finished: {} tokens, {} lexical errors",
            tokens.len(),
            reporter.lexical_errors()
        );

        TokenStream::new(tokens)
    }

    fn push(&mut self, tokens: &mut Vec<SpannedToken>, token: Token, start: Position, end: Position) {
        self.metrics.record_token(&token);
        tokens.push(Spanned::new(token, Span::new(start, end)));
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Character cursor with position tracking.
struct Scanner {
    chars: Vec<char>,
    index: usize,
    pos: Position,
}

impl Scanner {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            index: 0,
            pos: Position::start(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.index + ahead).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.index += 1;
        self.pos = self.pos.advance(ch);
        Some(ch)
    }

    /// `#` to end of line (newline not consumed).
    fn scan_comment(&mut self) -> Token {
        self.bump(); // '#'
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            text.push(ch);
            self.bump();
        }
        Token::Comment(text)
    }

    /// Double-quoted string; resolves `\"`, `\\`, `\n`, `\t`, `\r`.
    fn scan_string(&mut self, reporter: &mut ErrorReporter) -> Option<Token> {
        let start = self.pos;
        self.bump(); // opening quote
        let mut content = String::new();

        loop {
            match self.peek() {
                None | Some('\n') => {
                    reporter.report_lexical_error(
                        start.line,
                        start.column,
                        &format!("token recognition error at: '\"{}'", content),
                    );
                    return None;
                }
                Some('"') => {
                    self.bump();
                    break;
                }
                Some('\\') => {
                    self.bump();
                    match self.bump() {
                        Some('"') => content.push('"'),
                        Some('\\') => content.push('\\'),
                        Some('n') => content.push('\n'),
                        Some('t') => content.push('\t'),
                        Some('r') => content.push('\r'),
                        Some(other) => {
                            // unknown escape passes through verbatim
                            content.push('\\');
                            content.push(other);
                        }
                        None => {}
                    }
                }
                Some(ch) => {
                    content.push(ch);
                    self.bump();
                }
            }
            if content.len() > MAX_STRING_SIZE {
                let preview: String = content.chars().take(32).collect();
                reporter.report_lexical_error(
                    start.line,
                    start.column,
                    &format!("token recognition error at: '\"{}'", preview),
                );
                return None;
            }
        }

        Some(Token::StringLiteral(content))
    }

    /// Integer or decimal, optional leading `-`. A digit run with exactly
    /// one interior `.` followed by a digit is a decimal.
    fn scan_number(&mut self, reporter: &mut ErrorReporter) -> Option<Token> {
        let start = self.pos;
        let mut text = String::new();

        if self.peek() == Some('-') {
            text.push('-');
            self.bump();
        }
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.bump();
            } else {
                break;
            }
        }

        let mut is_decimal = false;
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            is_decimal = true;
            text.push('.');
            self.bump();
            while let Some(ch) = self.peek() {
                if ch.is_ascii_digit() {
                    text.push(ch);
                    self.bump();
                } else {
                    break;
                }
            }
        }

        if is_decimal {
            match text.parse::<f64>() {
                Ok(value) => Some(Token::Decimal(value)),
                Err(_) => {
                    reporter.report_lexical_error(
                        start.line,
                        start.column,
                        &format!("token recognition error at: '{}'", text),
                    );
                    None
                }
            }
        } else {
            match text.parse::<i64>() {
                Ok(value) => Some(Token::Integer(value)),
                Err(_) => {
                    reporter.report_lexical_error(
                        start.line,
                        start.column,
                        &format!("token recognition error at: '{}'", text),
                    );
                    None
                }
            }
        }
    }

    /// Keyword or identifier.
    fn scan_word(&mut self, reporter: &mut ErrorReporter) -> Option<Token> {
        let start = self.pos;
        let mut word = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                word.push(ch);
                self.bump();
            } else {
                break;
            }
        }

        if word.chars().count() > MAX_IDENTIFIER_LENGTH {
            let preview: String = word.chars().take(32).collect();
            reporter.report_lexical_error(
                start.line,
                start.column,
                &format!("token recognition error at: '{}'", preview),
            );
            return None;
        }

        Some(classify_word(&word))
    }
}
