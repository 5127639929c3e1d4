//! Intermediate representation: a flat, ordered instruction sequence
//! lowered from validated commands, plus the optimization passes over it.

pub mod builder;
pub mod instruction;
pub mod optimizer;

pub use builder::IrBuilder;
pub use instruction::{Instruction, IrRecord, Opcode};
pub use optimizer::optimize;
