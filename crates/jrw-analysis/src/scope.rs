//! Lexical scope frames.
//!
//! A frame is a node that introduces bindings, viewed from the child the
//! scope walk arrived from. Only the bindings visible from that child are
//! candidates: a block exposes the statements before it, every other frame
//! exposes all of its declarations.

use jrw_tree::{ModifierKind, NodeArena, NodeData, NodeIndex, has_modifier};

/// One enclosing lexical context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeFrame<'a> {
    /// Method parameters.
    Method(&'a [NodeIndex]),
    /// Statements of a block visible from the current position.
    Block(&'a [NodeIndex]),
    /// For-loop initializer declarations.
    Loop(&'a [NodeIndex]),
    /// Try-with-resources declarations.
    ResourceClause(&'a [NodeIndex]),
    /// Lambda parameters.
    FunctionLiteral(&'a [NodeIndex]),
    /// A declaration statement seen from one of its own initializers.
    SingleDeclaration(NodeIndex),
}

/// A named binding found in a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    /// The `VariableDeclarations` node.
    pub declaration: NodeIndex,
    /// The `NamedVariable` node.
    pub variable: NodeIndex,
    pub is_final: bool,
    /// `NONE` when the binding has no initializer.
    pub initializer: NodeIndex,
}

impl<'a> ScopeFrame<'a> {
    /// The frame `node` forms when entered from `prior`, if it is one.
    pub fn classify(arena: &'a NodeArena, node: NodeIndex, prior: NodeIndex) -> Option<Self> {
        let frame = match arena.data(node)? {
            NodeData::MethodDeclaration(method) => ScopeFrame::Method(&method.parameters),
            NodeData::Block(block) => {
                let statements = block.statements.as_slice();
                let type_body = matches!(
                    arena.parent(node).and_then(|p| arena.data(p)),
                    Some(NodeData::ClassDeclaration(_))
                );
                if type_body {
                    ScopeFrame::Block(statements)
                } else {
                    match statements.iter().position(|&s| s == prior) {
                        Some(end) => ScopeFrame::Block(&statements[..end]),
                        None => ScopeFrame::Block(statements),
                    }
                }
            }
            NodeData::ForLoop(for_loop) => ScopeFrame::Loop(&for_loop.init),
            NodeData::Try(try_stmt) if !try_stmt.resources.is_empty() => {
                ScopeFrame::ResourceClause(&try_stmt.resources)
            }
            NodeData::Lambda(lambda) => ScopeFrame::FunctionLiteral(&lambda.parameters),
            NodeData::VariableDeclarations(_) => ScopeFrame::SingleDeclaration(node),
            _ => return None,
        };
        Some(frame)
    }

    /// Declaration-like nodes this frame exposes.
    pub fn candidates(&self) -> &[NodeIndex] {
        match self {
            ScopeFrame::Method(nodes)
            | ScopeFrame::Block(nodes)
            | ScopeFrame::Loop(nodes)
            | ScopeFrame::ResourceClause(nodes)
            | ScopeFrame::FunctionLiteral(nodes) => nodes,
            ScopeFrame::SingleDeclaration(node) => std::slice::from_ref(node),
        }
    }

    /// First binding named `name`, in declaration order.
    pub fn find(&self, arena: &NodeArena, name: &str) -> Option<Binding> {
        self.candidates().iter().find_map(|&candidate| {
            let decls = arena.get_variable_declarations(candidate)?;
            decls.variables.iter().find_map(|&variable| {
                let named = arena.get_named_variable(variable)?;
                (arena.get_identifier_text(named.name)? == name).then(|| Binding {
                    declaration: candidate,
                    variable,
                    is_final: has_modifier(&decls.modifiers, ModifierKind::Final),
                    initializer: named.initializer,
                })
            })
        })
    }
}

#[cfg(test)]
#[path = "../tests/scope_tests.rs"]
mod scope_tests;
