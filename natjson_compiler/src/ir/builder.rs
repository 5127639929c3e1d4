//! IR lowering pass.
//!
//! A second, independent tree walk (run only when semantic analysis found
//! nothing) that flattens validated commands into the instruction list.
//! Property instructions are appended on property *exit* so the fully
//! decoded value is in hand; list appends fire only for values that are
//! list elements by tree position, never for property values.

use crate::grammar::ast::{ListCommand, Literal, ObjectCommand, Program, Property};
use crate::grammar::visit::{walk_program, EntityState, Visitor};
use crate::ir::instruction::Instruction;
use crate::utils::Spanned;

/// Single-use builder: construct, walk, read.
#[derive(Debug, Default)]
pub struct IrBuilder {
    instructions: Vec<Instruction>,
    state: EntityState,
}

impl IrBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower a whole program into its instruction sequence.
    pub fn build(program: &Program) -> Vec<Instruction> {
        let mut builder = IrBuilder::new();
        walk_program(program, &mut builder);
        log::debug!("IR lowering produced {} instructions", builder.instructions.len());
        builder.into_instructions()
    }

    /// The accumulated instruction list, in append order.
    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }
}

impl Visitor for IrBuilder {
    fn enter_object_command(&mut self, cmd: &ObjectCommand) {
        self.instructions.push(Instruction::CreateObject {
            name: cmd.name.clone(),
        });
        self.state = EntityState::InObject(cmd.name.clone());
    }

    fn exit_object_command(&mut self, _cmd: &ObjectCommand) {
        self.state = EntityState::Idle;
    }

    fn exit_property(&mut self, prop: &Property) {
        if let Some(object) = self.state.object_name() {
            self.instructions.push(Instruction::SetProperty {
                object: object.to_string(),
                key: prop.key.clone(),
                value: prop.value.value.clone(),
            });
        }
    }

    fn enter_list_command(&mut self, cmd: &ListCommand) {
        self.instructions.push(Instruction::CreateList {
            name: cmd.name.clone(),
        });
        self.state = EntityState::InList(cmd.name.clone());
    }

    fn exit_list_command(&mut self, _cmd: &ListCommand) {
        self.state = EntityState::Idle;
    }

    fn exit_element(&mut self, value: &Spanned<Literal>) {
        if let Some(list) = self.state.list_name() {
            self.instructions.push(Instruction::AppendList {
                list: list.to_string(),
                value: value.value.clone(),
            });
        }
    }
}
