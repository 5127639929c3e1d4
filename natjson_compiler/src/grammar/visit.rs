//! Tree traversal contract over the parse tree.
//!
//! Passes receive enter/exit callbacks per production, mirroring a
//! listener-style walk. Value-role disambiguation is structural: the walker
//! only reports `exit_element` for values that are direct children of a
//! list's element sequence, so a property value can never be observed as a
//! list element.

use crate::grammar::ast::{ListCommand, Literal, ObjectCommand, Program, Property};
use crate::utils::Spanned;

/// Listener-style visitor over the parse tree. All callbacks default to
/// no-ops so passes implement only what they consume.
pub trait Visitor {
    fn enter_object_command(&mut self, _cmd: &ObjectCommand) {}
    fn exit_object_command(&mut self, _cmd: &ObjectCommand) {}
    fn enter_property(&mut self, _prop: &Property) {}
    fn exit_property(&mut self, _prop: &Property) {}
    fn enter_list_command(&mut self, _cmd: &ListCommand) {}
    fn exit_list_command(&mut self, _cmd: &ListCommand) {}
    fn exit_element(&mut self, _value: &Spanned<Literal>) {}
}

/// Drive a visitor over every command in the program, in source order.
pub fn walk_program<V: Visitor + ?Sized>(program: &Program, visitor: &mut V) {
    for command in &program.commands {
        match command {
            crate::grammar::ast::Command::CreateObject(cmd) => {
                visitor.enter_object_command(cmd);
                for prop in &cmd.properties {
                    visitor.enter_property(prop);
                    visitor.exit_property(prop);
                }
                visitor.exit_object_command(cmd);
            }
            crate::grammar::ast::Command::CreateList(cmd) => {
                visitor.enter_list_command(cmd);
                for value in &cmd.elements {
                    visitor.exit_element(value);
                }
                visitor.exit_list_command(cmd);
            }
        }
    }
}

/// Which entity's body a traversal is currently inside. Commands do not
/// nest, so the states are mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EntityState {
    #[default]
    Idle,
    InObject(String),
    InList(String),
}

impl EntityState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Name of the current object, if inside one.
    pub fn object_name(&self) -> Option<&str> {
        match self {
            Self::InObject(name) => Some(name),
            _ => None,
        }
    }

    /// Name of the current list, if inside one.
    pub fn list_name(&self) -> Option<&str> {
        match self {
            Self::InList(name) => Some(name),
            _ => None,
        }
    }
}
