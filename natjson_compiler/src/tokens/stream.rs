//! Cursor-based token stream that filters comment tokens out of the
//! parser's view while keeping them available for the token listing.

use crate::tokens::token::Token;
use crate::utils::{Span, Spanned};

/// A token with span information.
pub type SpannedToken = Spanned<Token>;

#[derive(Debug, Clone)]
pub struct TokenStream {
    /// All tokens (including comments) with original spans
    all_tokens: Vec<SpannedToken>,
    /// Indices into all_tokens for significant tokens
    significant_indices: Vec<usize>,
    /// Current position in significant_indices
    position: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<SpannedToken>) -> Self {
        let significant_indices = tokens
            .iter()
            .enumerate()
            .filter(|(_, spanned)| spanned.value.is_significant())
            .map(|(i, _)| i)
            .collect();
        Self {
            all_tokens: tokens,
            significant_indices,
            position: 0,
        }
    }

    /// The current significant token.
    pub fn current(&self) -> Option<&SpannedToken> {
        self.significant_indices
            .get(self.position)
            .and_then(|&idx| self.all_tokens.get(idx))
    }

    /// The current token value, without span.
    pub fn current_token(&self) -> Option<&Token> {
        self.current().map(|spanned| &spanned.value)
    }

    /// The span of the current token.
    pub fn current_span(&self) -> Option<Span> {
        self.current().map(|spanned| spanned.span)
    }

    /// Peek at the next significant token without advancing.
    pub fn peek(&self) -> Option<&SpannedToken> {
        self.peek_ahead(1)
    }

    /// Peek ahead by n significant tokens.
    pub fn peek_ahead(&self, n: usize) -> Option<&SpannedToken> {
        self.significant_indices
            .get(self.position + n)
            .and_then(|&idx| self.all_tokens.get(idx))
    }

    /// Advance to the next significant token.
    pub fn advance(&mut self) -> Option<&SpannedToken> {
        if self.position < self.significant_indices.len() {
            self.position += 1;
        }
        self.current()
    }

    /// True once the cursor sits on EOF (or past the end).
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_token(), None | Some(Token::Eof))
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of significant tokens, including EOF.
    pub fn len(&self) -> usize {
        self.significant_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.significant_indices.is_empty()
    }

    /// Number of tokens the parser actually consumes (significant, minus EOF).
    pub fn parser_token_count(&self) -> usize {
        self.significant_indices
            .iter()
            .filter(|&&idx| !matches!(self.all_tokens[idx].value, Token::Eof))
            .count()
    }

    /// Iterate over significant tokens in order, EOF excluded. Used by the
    /// token-listing debug view.
    pub fn iter_significant(&self) -> impl Iterator<Item = &SpannedToken> {
        self.significant_indices
            .iter()
            .map(move |&idx| &self.all_tokens[idx])
            .filter(|spanned| !matches!(spanned.value, Token::Eof))
    }
}
