//! Compile-time configuration for the compiler.

pub mod constants;
