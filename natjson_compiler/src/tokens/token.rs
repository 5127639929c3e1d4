//! Token vocabulary: seven structural keywords, identifiers, literals, and
//! the two punctuation marks of the grammar.

use crate::grammar::keywords::Keyword;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Token {
    /// Structural keyword (includes the boolean literals VERDADERO / FALSO)
    Keyword(Keyword),
    /// User-defined name
    Identifier(String),
    /// String literal with quotes stripped and escapes resolved
    StringLiteral(String),
    /// Integer literal (64-bit signed)
    Integer(i64),
    /// Decimal literal (IEEE 754 double precision)
    Decimal(f64),
    /// `:` separating a property key from its value
    Colon,
    /// `,` separating properties or list elements
    Comma,
    /// Comment (# to end of line), filtered before parsing
    Comment(String),
    /// End of file marker
    Eof,
}

impl Token {
    /// Symbolic token name as shown in the token-listing debug view.
    pub fn symbolic_name(&self) -> &'static str {
        match self {
            Self::Keyword(kw) => kw.symbolic_name(),
            Self::Identifier(_) => "IDENTIFICADOR",
            Self::StringLiteral(_) => "STRING",
            Self::Integer(_) => "NUMERO_ENTERO",
            Self::Decimal(_) => "NUMERO_DECIMAL",
            Self::Colon => "DOS_PUNTOS",
            Self::Comma => "COMA",
            Self::Comment(_) => "COMENTARIO",
            Self::Eof => "EOF",
        }
    }

    /// Check if this token matches a specific keyword.
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, Self::Keyword(kw) if *kw == keyword)
    }

    /// Get identifier name if this token is an identifier.
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Check if this token can start a literal value. The boolean keywords
    /// count: they become `Literal::Boolean` at the grammar boundary.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::StringLiteral(_)
                | Self::Integer(_)
                | Self::Decimal(_)
                | Self::Keyword(Keyword::Verdadero)
                | Self::Keyword(Keyword::Falso)
        )
    }

    /// Tokens the parser never sees.
    pub fn is_ignorable(&self) -> bool {
        matches!(self, Self::Comment(_))
    }

    pub fn is_significant(&self) -> bool {
        !self.is_ignorable()
    }

    /// Render the token as it appeared in source, for diagnostics and the
    /// token listing. EOF renders as the ANTLR-style `<EOF>` marker.
    pub fn source_text(&self) -> String {
        match self {
            Self::Keyword(kw) => kw.as_str().to_string(),
            Self::Identifier(name) => name.clone(),
            Self::StringLiteral(s) => format!("\"{}\"", s),
            Self::Integer(i) => i.to_string(),
            Self::Decimal(d) => d.to_string(),
            Self::Colon => ":".to_string(),
            Self::Comma => ",".to_string(),
            Self::Comment(text) => format!("#{}", text),
            Self::Eof => "<EOF>".to_string(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source_text())
    }
}

/// Classify a word as keyword or identifier (exact-case keyword match).
pub fn classify_word(word: &str) -> Token {
    match Keyword::from_str(word) {
        Some(keyword) => Token::Keyword(keyword),
        None => Token::Identifier(word.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_word() {
        assert_eq!(classify_word("CREAR"), Token::Keyword(Keyword::Crear));
        assert_eq!(
            classify_word("usuario"),
            Token::Identifier("usuario".into())
        );
        // lowercase keyword spellings are ordinary identifiers at lex time
        assert_eq!(classify_word("crear"), Token::Identifier("crear".into()));
    }

    #[test]
    fn test_symbolic_names() {
        assert_eq!(
            Token::Keyword(Keyword::Elementos).symbolic_name(),
            "KW_ELEMENTOS"
        );
        assert_eq!(Token::Identifier("x".into()).symbolic_name(), "IDENTIFICADOR");
        assert_eq!(Token::Integer(1).symbolic_name(), "NUMERO_ENTERO");
        assert_eq!(Token::Decimal(1.5).symbolic_name(), "NUMERO_DECIMAL");
        assert_eq!(Token::Colon.symbolic_name(), "DOS_PUNTOS");
    }

    #[test]
    fn test_literal_classification() {
        assert!(Token::StringLiteral("x".into()).is_literal());
        assert!(Token::Integer(3).is_literal());
        assert!(Token::Keyword(Keyword::Verdadero).is_literal());
        assert!(Token::Keyword(Keyword::Falso).is_literal());
        assert!(!Token::Keyword(Keyword::Con).is_literal());
        assert!(!Token::Identifier("x".into()).is_literal());
    }

    #[test]
    fn test_source_text() {
        assert_eq!(Token::StringLiteral("Juan".into()).source_text(), "\"Juan\"");
        assert_eq!(Token::Eof.source_text(), "<EOF>");
        assert_eq!(Token::Comma.source_text(), ",");
    }
}
