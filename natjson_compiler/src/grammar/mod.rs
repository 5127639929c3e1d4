//! Grammar layer: keyword vocabulary, parse tree nodes, and tree traversal.

pub mod ast;
pub mod keywords;
pub mod visit;

pub use ast::{Command, ListCommand, Literal, ObjectCommand, Program, Property, ValueType};
pub use keywords::Keyword;
pub use visit::{walk_program, EntityState, Visitor};
