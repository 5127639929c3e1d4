//! Back-end emission from the optimized IR.
//!
//! The IR is the single source of truth for every artifact: the JSON
//! document and the generated Python source are both replays of the same
//! instruction sequence.

pub mod json;
pub mod python;

pub use json::{json_from_ir, json_string};
pub use python::emit_python;
