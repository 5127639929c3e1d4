//! Semantic analysis pass.
//!
//! A tree walk that populates the symbol table, rejects reserved-word and
//! duplicate declarations, records per-entity type metadata, and applies the
//! declaration-level rules in [`rules`]. All findings go through the error
//! reporter; the pass itself never fails.
//!
//! The walk tracks which entity's body it is inside with an explicit
//! [`EntityState`] machine. The state is entered on command entry only when
//! the declaration succeeded, and reset unconditionally on command exit, so
//! properties of a rejected command are never recorded and can never leak
//! into a sibling command.

pub mod rules;

use crate::diagnostics::ErrorReporter;
use crate::grammar::ast::{ListCommand, Literal, ObjectCommand, Program, Property};
use crate::grammar::visit::{walk_program, EntityState, Visitor};
use crate::symbols::{SymbolKind, SymbolMetadata, SymbolTable};
use crate::utils::{Span, Spanned};

pub struct SemanticAnalyzer<'a> {
    table: &'a mut SymbolTable,
    reporter: &'a mut ErrorReporter,
    state: EntityState,
}

impl<'a> SemanticAnalyzer<'a> {
    pub fn new(table: &'a mut SymbolTable, reporter: &'a mut ErrorReporter) -> Self {
        Self {
            table,
            reporter,
            state: EntityState::Idle,
        }
    }

    /// Run the pass over a whole program.
    pub fn analyze(program: &Program, table: &mut SymbolTable, reporter: &mut ErrorReporter) {
        log::debug!(
            "starting semantic analysis: {} commands",
            program.commands.len()
        );
        let mut analyzer = SemanticAnalyzer::new(table, reporter);
        walk_program(program, &mut analyzer);
        log::debug!(
            "semantic analysis finished: {} symbols, {} semantic errors",
            analyzer.table.len(),
            analyzer.reporter.semantic_errors()
        );
    }

    /// Shared declaration protocol for both command kinds. Returns the new
    /// state: the entity name on success, idle on rejection.
    fn declare_entity(
        &mut self,
        name: &str,
        kind: SymbolKind,
        name_span: Span,
        metadata: SymbolMetadata,
    ) -> EntityState {
        let line = name_span.start.line;
        let column = name_span.start.user_column();

        if self.table.is_reserved(name) {
            self.reporter.add_semantic_error(
                line,
                column,
                format!(
                    "El nombre '{}' es una palabra reservada del lenguaje y no puede usarse como identificador.",
                    name
                ),
            );
            return EntityState::Idle;
        }

        if self.table.declare(name, kind, line, column, metadata) {
            match kind {
                SymbolKind::Object => EntityState::InObject(name.to_string()),
                SymbolKind::List => EntityState::InList(name.to_string()),
            }
        } else {
            // `declare` refused without mutating; the surviving record
            // carries the original declaration for the message.
            let previous = self
                .table
                .lookup(name)
                .expect("refused declaration implies an existing record");
            self.reporter.add_semantic_error(
                line,
                column,
                format!(
                    "Redefinición del símbolo '{}'. Ya fue declarado como '{}' en la línea {}.",
                    name, previous.kind, previous.line
                ),
            );
            EntityState::Idle
        }
    }
}

impl Visitor for SemanticAnalyzer<'_> {
    fn enter_object_command(&mut self, cmd: &ObjectCommand) {
        self.state = self.declare_entity(
            &cmd.name,
            SymbolKind::Object,
            cmd.name_span,
            SymbolMetadata::empty_object(),
        );
    }

    fn exit_object_command(&mut self, _cmd: &ObjectCommand) {
        self.state = EntityState::Idle;
    }

    fn enter_property(&mut self, prop: &Property) {
        let Some(name) = self.state.object_name().map(str::to_string) else {
            return;
        };
        let value_type = prop.value.value.value_type();
        let line = prop.key_span.start.line;
        let column = prop.key_span.start.user_column();

        if let Some(message) = rules::check_domain_rule(&prop.key, value_type) {
            self.reporter.add_semantic_error(line, column, message);
        }

        let Some(record) = self.table.lookup_mut(&name) else {
            return;
        };
        if record.kind != SymbolKind::Object {
            return;
        }
        if let Some(previous) = record.property_type(&prop.key) {
            if let Some(message) = rules::check_consistency(&prop.key, previous, value_type) {
                self.reporter.add_semantic_error(line, column, message);
            }
        }
        // last write wins at the metadata level, with or without a
        // consistency finding
        record.set_property_type(&prop.key, value_type);
    }

    fn enter_list_command(&mut self, cmd: &ListCommand) {
        self.state = self.declare_entity(
            &cmd.name,
            SymbolKind::List,
            cmd.name_span,
            SymbolMetadata::empty_list(),
        );
    }

    fn exit_list_command(&mut self, _cmd: &ListCommand) {
        self.state = EntityState::Idle;
    }

    fn exit_element(&mut self, value: &Spanned<Literal>) {
        let Some(name) = self.state.list_name().map(str::to_string) else {
            return;
        };
        let value_type = value.value.value_type();
        if let Some(record) = self.table.lookup_mut(&name) {
            if record.kind == SymbolKind::List {
                record.push_element_type(value_type);
            }
        }
    }
}
