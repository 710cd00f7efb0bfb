//! Canonical Java rendering of a [`SourceFile`].
//!
//! Output is deterministic: four-space indentation, one member per
//! paragraph, declaration annotations on their own lines and parameter
//! annotations inline. Recipe tests compare printed text, so two trees that
//! differ only in node allocation order print the same.

use crate::arena::{NodeArena, SourceFile};
use crate::base::NodeIndex;
use crate::node::{
    ClassDeclarationData, LiteralValue, MethodDeclarationData, Modifier, NodeData,
    VariableDeclarationsData,
};

const INDENT: &str = "    ";

/// Print `file` as Java source text.
pub fn print_source(file: &SourceFile) -> String {
    let mut printer = Printer::new(&file.arena);
    printer.emit_compilation_unit(file.root);
    printer.finish()
}

/// Print a single expression, as used in logs and diagnostics.
pub fn print_expression(arena: &NodeArena, expression: NodeIndex) -> String {
    let mut printer = Printer::new(arena);
    printer.emit_expression(expression);
    printer.finish()
}

struct Printer<'a> {
    arena: &'a NodeArena,
    out: String,
    indent: usize,
    at_line_start: bool,
}

impl<'a> Printer<'a> {
    fn new(arena: &'a NodeArena) -> Self {
        Self {
            arena,
            out: String::new(),
            indent: 0,
            at_line_start: true,
        }
    }

    fn finish(self) -> String {
        self.out
    }

    // =========================================================================
    // Writer helpers
    // =========================================================================

    fn write(&mut self, text: &str) {
        if self.at_line_start && !text.is_empty() {
            for _ in 0..self.indent {
                self.out.push_str(INDENT);
            }
            self.at_line_start = false;
        }
        self.out.push_str(text);
    }

    fn write_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.write(ch.encode_utf8(&mut buf));
    }

    fn write_line(&mut self) {
        self.out.push('\n');
        self.at_line_start = true;
    }

    fn increase_indent(&mut self) {
        self.indent += 1;
    }

    fn decrease_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    fn write_separated(&mut self, nodes: &[NodeIndex], separator: &str) {
        for (i, &node) in nodes.iter().enumerate() {
            if i > 0 {
                self.write(separator);
            }
            self.emit_expression(node);
        }
    }

    fn write_modifiers(&mut self, modifiers: &[Modifier]) {
        for modifier in modifiers {
            self.write(modifier.kind.keyword());
            self.write_char(' ');
        }
    }

    fn write_comments(&mut self, comments: &[String]) {
        for comment in comments {
            self.write(comment);
            self.write_line();
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn emit_compilation_unit(&mut self, root: NodeIndex) {
        let Some(NodeData::CompilationUnit(cu)) = self.arena.data(root) else {
            return;
        };
        let mut paragraph = false;
        if let Some(package) = &cu.package_name {
            self.write("package ");
            self.write(package);
            self.write_char(';');
            self.write_line();
            paragraph = true;
        }
        if !cu.imports.is_empty() {
            if paragraph {
                self.write_line();
            }
            for import in &cu.imports {
                self.write("import ");
                self.write(import);
                self.write_char(';');
                self.write_line();
            }
            paragraph = true;
        }
        for &class in &cu.classes {
            if paragraph {
                self.write_line();
            }
            self.emit_member(class);
            paragraph = true;
        }
    }

    fn emit_member(&mut self, member: NodeIndex) {
        match self.arena.data(member) {
            Some(NodeData::ClassDeclaration(class)) => self.emit_class(class),
            Some(NodeData::MethodDeclaration(method)) => self.emit_method(method),
            Some(NodeData::VariableDeclarations(decls)) => {
                self.emit_declaration_annotations(&decls.annotations);
                self.emit_variable_declarations(decls, false);
                self.write_char(';');
                self.write_line();
            }
            Some(_) => self.emit_statement(member),
            None => {}
        }
    }

    fn emit_declaration_annotations(&mut self, annotations: &[NodeIndex]) {
        for &annotation in annotations {
            self.emit_expression(annotation);
            self.write_line();
        }
    }

    fn emit_class(&mut self, class: &ClassDeclarationData) {
        self.emit_declaration_annotations(&class.annotations);
        self.write_modifiers(&class.modifiers);
        self.write(class.class_kind.keyword());
        self.write_char(' ');
        self.emit_expression(class.name);
        self.write(" {");
        self.write_line();
        self.increase_indent();
        let members = match self.arena.data(class.body) {
            Some(NodeData::Block(block)) => block.statements.as_slice(),
            _ => &[],
        };
        for (i, &member) in members.iter().enumerate() {
            if i > 0 {
                self.write_line();
            }
            self.emit_member(member);
        }
        self.decrease_indent();
        self.write_char('}');
        self.write_line();
    }

    fn emit_method(&mut self, method: &MethodDeclarationData) {
        self.write_comments(&method.comments);
        self.emit_declaration_annotations(&method.annotations);
        self.write_modifiers(&method.modifiers);
        if method.return_type.is_some() {
            self.emit_expression(method.return_type);
            self.write_char(' ');
        }
        self.emit_expression(method.name);
        self.write_char('(');
        for (i, &param) in method.parameters.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_inline_declaration(param);
        }
        self.write_char(')');
        if method.body.is_some() {
            self.write_char(' ');
            self.emit_block(method.body);
            self.write_line();
        } else {
            self.write_char(';');
            self.write_line();
        }
    }

    /// Parameters and resources: annotations stay on the same line.
    fn emit_inline_declaration(&mut self, declaration: NodeIndex) {
        if let Some(decls) = self.arena.get_variable_declarations(declaration) {
            for &annotation in &decls.annotations {
                self.emit_expression(annotation);
                self.write_char(' ');
            }
            self.emit_variable_declarations(decls, false);
        }
    }

    fn emit_variable_declarations(&mut self, decls: &VariableDeclarationsData, untyped: bool) {
        self.write_modifiers(&decls.modifiers);
        if decls.type_expr.is_some() && !untyped {
            self.emit_expression(decls.type_expr);
            self.write_char(' ');
        }
        for (i, &var) in decls.variables.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if let Some(named) = self.arena.get_named_variable(var) {
                self.emit_expression(named.name);
                if named.initializer.is_some() {
                    self.write(" = ");
                    self.emit_expression(named.initializer);
                }
            }
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Emit `{ ... }` without a trailing newline.
    fn emit_block(&mut self, block: NodeIndex) {
        self.write_char('{');
        self.write_line();
        self.increase_indent();
        if let Some(NodeData::Block(data)) = self.arena.data(block) {
            for &statement in &data.statements {
                self.emit_statement(statement);
            }
        }
        self.decrease_indent();
        self.write_char('}');
    }

    fn emit_statement(&mut self, statement: NodeIndex) {
        let Some(data) = self.arena.data(statement) else {
            return;
        };
        match data {
            NodeData::Block(_) => {
                self.emit_block(statement);
                self.write_line();
            }
            NodeData::VariableDeclarations(decls) => {
                for &annotation in &decls.annotations {
                    self.emit_expression(annotation);
                    self.write_char(' ');
                }
                self.emit_variable_declarations(decls, false);
                self.write_char(';');
                self.write_line();
            }
            NodeData::Return(ret) => {
                self.write("return");
                if ret.expression.is_some() {
                    self.write_char(' ');
                    self.emit_expression(ret.expression);
                }
                self.write_char(';');
                self.write_line();
            }
            NodeData::ForLoop(for_loop) => {
                self.write("for (");
                for (i, &init) in for_loop.init.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    match self.arena.get_variable_declarations(init) {
                        Some(decls) => self.emit_variable_declarations(decls, false),
                        None => self.emit_expression(init),
                    }
                }
                self.write("; ");
                self.emit_expression(for_loop.condition);
                self.write("; ");
                self.write_separated(&for_loop.update, ", ");
                self.write(") ");
                self.emit_body(for_loop.body);
            }
            NodeData::Try(try_stmt) => {
                self.write("try ");
                if !try_stmt.resources.is_empty() {
                    self.write_char('(');
                    for (i, &resource) in try_stmt.resources.iter().enumerate() {
                        if i > 0 {
                            self.write("; ");
                        }
                        self.emit_inline_declaration(resource);
                    }
                    self.write(") ");
                }
                self.emit_block(try_stmt.body);
                if try_stmt.finally.is_some() {
                    self.write(" finally ");
                    self.emit_block(try_stmt.finally);
                }
                self.write_line();
            }
            NodeData::ClassDeclaration(class) => self.emit_class(class),
            NodeData::MethodDeclaration(method) => self.emit_method(method),
            _ => {
                self.emit_expression(statement);
                self.write_char(';');
                self.write_line();
            }
        }
    }

    fn emit_body(&mut self, body: NodeIndex) {
        if matches!(self.arena.data(body), Some(NodeData::Block(_))) {
            self.emit_block(body);
            self.write_line();
        } else {
            self.emit_statement(body);
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn emit_expression(&mut self, expression: NodeIndex) {
        let Some(data) = self.arena.data(expression) else {
            return;
        };
        match data {
            NodeData::Identifier(ident) => self.write(&ident.simple_name),
            NodeData::FieldAccess(access) => {
                self.emit_expression(access.target);
                self.write_char('.');
                self.emit_expression(access.name);
            }
            NodeData::MethodInvocation(call) => {
                if call.select.is_some() {
                    self.emit_expression(call.select);
                    self.write_char('.');
                }
                self.emit_expression(call.name);
                self.write_char('(');
                self.write_separated(&call.arguments, ", ");
                self.write_char(')');
            }
            NodeData::NewClass(new_class) => {
                self.write("new ");
                self.emit_expression(new_class.class_expr);
                self.write_char('(');
                self.write_separated(&new_class.arguments, ", ");
                self.write_char(')');
            }
            NodeData::Literal(lit) => self.emit_literal(&lit.value),
            NodeData::Annotation(annotation) => {
                self.write_char('@');
                self.emit_expression(annotation.annotation_type);
                if !annotation.arguments.is_empty() {
                    self.write_char('(');
                    self.write_separated(&annotation.arguments, ", ");
                    self.write_char(')');
                }
            }
            NodeData::Assignment(assign) => {
                self.emit_expression(assign.variable);
                self.write(" = ");
                self.emit_expression(assign.value);
            }
            NodeData::NewArray(array) => {
                self.write_char('{');
                self.write_separated(&array.elements, ", ");
                self.write_char('}');
            }
            NodeData::Lambda(lambda) => {
                self.write_char('(');
                for (i, &param) in lambda.parameters.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    if let Some(decls) = self.arena.get_variable_declarations(param) {
                        self.emit_variable_declarations(decls, false);
                    }
                }
                self.write(") -> ");
                if matches!(self.arena.data(lambda.body), Some(NodeData::Block(_))) {
                    self.emit_block(lambda.body);
                } else {
                    self.emit_expression(lambda.body);
                }
            }
            NodeData::Binary(binary) => {
                self.emit_expression(binary.left);
                self.write_char(' ');
                self.write(binary.operator.symbol());
                self.write_char(' ');
                self.emit_expression(binary.right);
            }
            NodeData::VariableDeclarations(decls) => self.emit_variable_declarations(decls, false),
            NodeData::NamedVariable(named) => self.emit_expression(named.name),
            NodeData::CompilationUnit(_)
            | NodeData::ClassDeclaration(_)
            | NodeData::MethodDeclaration(_)
            | NodeData::Block(_)
            | NodeData::Return(_)
            | NodeData::ForLoop(_)
            | NodeData::Try(_) => self.emit_statement(expression),
        }
    }

    fn emit_literal(&mut self, value: &LiteralValue) {
        match value {
            LiteralValue::String(s) => {
                self.write_char('"');
                self.emit_escaped_string(s);
                self.write_char('"');
            }
            LiteralValue::Int(v) => self.write(&v.to_string()),
            LiteralValue::Long(v) => {
                self.write(&v.to_string());
                self.write_char('L');
            }
            LiteralValue::Boolean(v) => self.write(if *v { "true" } else { "false" }),
            LiteralValue::Null => self.write("null"),
        }
    }

    fn emit_escaped_string(&mut self, s: &str) {
        for ch in s.chars() {
            match ch {
                '\n' => self.write("\\n"),
                '\r' => self.write("\\r"),
                '\t' => self.write("\\t"),
                '\\' => self.write("\\\\"),
                '"' => self.write("\\\""),
                c if (c as u32) < 0x20 => self.write(&format!("\\u{:04x}", c as u32)),
                c => self.write_char(c),
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/printer_tests.rs"]
mod printer_tests;
