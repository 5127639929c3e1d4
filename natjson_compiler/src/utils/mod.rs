//! Shared utilities for the compiler pipeline.

pub mod span;

pub use span::{Position, Span, Spanned};
