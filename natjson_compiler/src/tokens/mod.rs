//! Token system for the command language.

pub mod stream;
pub mod token;

pub use stream::{SpannedToken, TokenStream};
pub use token::Token;
