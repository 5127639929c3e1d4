//! Keyword vocabulary of the command language.
//!
//! The language has exactly seven structural keywords; everything else a word
//! can be is an identifier. Keyword recognition during lexing is exact
//! (uppercase), while the reserved-word check used by semantic analysis is
//! case-insensitive.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural keywords of the command language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Crear,
    Objeto,
    Lista,
    Con,
    Elementos,
    Verdadero,
    Falso,
}

impl Keyword {
    pub const ALL: [Keyword; 7] = [
        Self::Crear,
        Self::Objeto,
        Self::Lista,
        Self::Con,
        Self::Elementos,
        Self::Verdadero,
        Self::Falso,
    ];

    /// The exact string representation as it appears in source.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crear => "CREAR",
            Self::Objeto => "OBJETO",
            Self::Lista => "LISTA",
            Self::Con => "CON",
            Self::Elementos => "ELEMENTOS",
            Self::Verdadero => "VERDADERO",
            Self::Falso => "FALSO",
        }
    }

    /// Symbolic token name used by the token-listing debug view.
    pub const fn symbolic_name(self) -> &'static str {
        match self {
            Self::Crear => "KW_CREAR",
            Self::Objeto => "KW_OBJETO",
            Self::Lista => "KW_LISTA",
            Self::Con => "KW_CON",
            Self::Elementos => "KW_ELEMENTOS",
            Self::Verdadero => "KW_VERDADERO",
            Self::Falso => "KW_FALSO",
        }
    }

    /// Parse keyword from a word with exact case matching.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "CREAR" => Some(Self::Crear),
            "OBJETO" => Some(Self::Objeto),
            "LISTA" => Some(Self::Lista),
            "CON" => Some(Self::Con),
            "ELEMENTOS" => Some(Self::Elementos),
            "VERDADERO" => Some(Self::Verdadero),
            "FALSO" => Some(Self::Falso),
            _ => None,
        }
    }

    /// Case-insensitive membership test against the keyword set.
    pub fn is_reserved_word(name: &str) -> bool {
        Self::ALL
            .iter()
            .any(|kw| kw.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
