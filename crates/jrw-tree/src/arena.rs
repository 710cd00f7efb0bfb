//! Node arena and source file container.

use crate::base::{NodeIndex, TypeId};
use crate::node::{
    AnnotationData, ClassDeclarationData, IdentifierData, LiteralData, MethodDeclarationData,
    MethodInvocationData, NamedVariableData, Node, NodeData, NodeKind, VariableDeclarationsData,
};
use crate::types::TypeTable;
use serde::{Deserialize, Serialize};

/// Arena-based storage for tree nodes.
/// Nodes are stored contiguously and referenced by index.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena { nodes: Vec::new() }
    }

    /// Add a node and adopt its children (their parent becomes the new node).
    pub fn add(&mut self, data: NodeData) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        for child in data.children() {
            if let Some(node) = self.nodes.get_mut(child.0 as usize) {
                node.parent = index;
            }
        }
        self.nodes.push(Node {
            parent: NodeIndex::NONE,
            data,
        });
        index
    }

    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    pub fn data(&self, index: NodeIndex) -> Option<&NodeData> {
        self.get(index).map(|node| &node.data)
    }

    pub fn kind(&self, index: NodeIndex) -> Option<NodeKind> {
        self.data(index).map(NodeData::kind)
    }

    /// Parent of `index`, or `None` at the compilation unit.
    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.get(index).and_then(|node| node.parent.into_option())
    }

    pub fn children(&self, index: NodeIndex) -> crate::node::Children {
        self.data(index).map(NodeData::children).unwrap_or_default()
    }

    /// Re-point the slot of `parent` holding `old` at `new`, re-parenting `new`.
    ///
    /// Returns false (and changes nothing) when `old` is not a child of `parent`.
    pub fn replace_child(&mut self, parent: NodeIndex, old: NodeIndex, new: NodeIndex) -> bool {
        if self.get(new).is_none() {
            return false;
        }
        let replaced = match self.get_mut(parent) {
            Some(node) => node.data.replace_child(old, new),
            None => false,
        };
        if replaced {
            if let Some(node) = self.get_mut(new) {
                node.parent = parent;
            }
            // `old` may already have been adopted by `new` (wrapping edits).
            if let Some(node) = self.get_mut(old)
                && node.parent == parent
            {
                node.parent = NodeIndex::NONE;
            }
        }
        replaced
    }

    /// Recompute every parent link from the child slots.
    pub fn relink_parents(&mut self) {
        for node in &mut self.nodes {
            node.parent = NodeIndex::NONE;
        }
        for idx in 0..self.nodes.len() {
            let children = self.nodes[idx].data.children();
            for child in children {
                if let Some(node) = self.nodes.get_mut(child.0 as usize) {
                    node.parent = NodeIndex(idx as u32);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in allocation order, detached ones included.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeIndex(idx as u32), node))
    }

    /// Nodes reachable from `root`, in pre-order.
    pub fn descendants(&self, root: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(idx) = stack.pop() {
            if self.get(idx).is_none() {
                continue;
            }
            out.push(idx);
            let children = self.children(idx);
            stack.extend(children.iter().rev().copied());
        }
        out
    }

    // -------------------------------------------------------------------------
    // Typed accessors
    // -------------------------------------------------------------------------

    pub fn get_identifier(&self, index: NodeIndex) -> Option<&IdentifierData> {
        match self.data(index)? {
            NodeData::Identifier(ident) => Some(ident),
            _ => None,
        }
    }

    pub fn get_identifier_text(&self, index: NodeIndex) -> Option<&str> {
        self.get_identifier(index)
            .map(|ident| ident.simple_name.as_str())
    }

    pub fn get_literal(&self, index: NodeIndex) -> Option<&LiteralData> {
        match self.data(index)? {
            NodeData::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    pub fn get_string_literal(&self, index: NodeIndex) -> Option<&str> {
        self.get_literal(index).and_then(|lit| lit.value.as_str())
    }

    pub fn get_class(&self, index: NodeIndex) -> Option<&ClassDeclarationData> {
        match self.data(index)? {
            NodeData::ClassDeclaration(class) => Some(class),
            _ => None,
        }
    }

    pub fn get_method(&self, index: NodeIndex) -> Option<&MethodDeclarationData> {
        match self.data(index)? {
            NodeData::MethodDeclaration(method) => Some(method),
            _ => None,
        }
    }

    pub fn get_invocation(&self, index: NodeIndex) -> Option<&MethodInvocationData> {
        match self.data(index)? {
            NodeData::MethodInvocation(call) => Some(call),
            _ => None,
        }
    }

    pub fn get_variable_declarations(&self, index: NodeIndex) -> Option<&VariableDeclarationsData> {
        match self.data(index)? {
            NodeData::VariableDeclarations(decls) => Some(decls),
            _ => None,
        }
    }

    pub fn get_named_variable(&self, index: NodeIndex) -> Option<&NamedVariableData> {
        match self.data(index)? {
            NodeData::NamedVariable(var) => Some(var),
            _ => None,
        }
    }

    pub fn get_annotation(&self, index: NodeIndex) -> Option<&AnnotationData> {
        match self.data(index)? {
            NodeData::Annotation(annotation) => Some(annotation),
            _ => None,
        }
    }

    /// Static type of an expression node; invocations report their return type.
    pub fn expression_type(&self, index: NodeIndex, types: &TypeTable) -> Option<TypeId> {
        match self.data(index)? {
            NodeData::MethodInvocation(call) => types
                .as_method(call.method_type?)
                .and_then(|method| method.return_type),
            data => data.expression_type(),
        }
    }

    /// The `JavaType::Variable` named by an identifier or field access.
    pub fn referenced_variable(&self, index: NodeIndex) -> Option<TypeId> {
        match self.data(index)? {
            NodeData::Identifier(ident) => ident.field_type,
            NodeData::FieldAccess(access) => self.get_identifier(access.name)?.field_type,
            _ => None,
        }
    }
}

/// A single attributed compilation unit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    pub arena: NodeArena,
    pub types: TypeTable,
    pub root: NodeIndex,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, arena: NodeArena, types: TypeTable, root: NodeIndex) -> Self {
        Self {
            path: path.into(),
            arena,
            types,
            root,
        }
    }

    /// Deserialize from the JSON interchange form, restoring derived indexes.
    pub fn from_json(text: &str) -> serde_json::Result<SourceFile> {
        let mut file: SourceFile = serde_json::from_str(text)?;
        file.types.reindex();
        file.arena.relink_parents();
        Ok(file)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Whether any class type named `fully_qualified_name` is referenced.
    pub fn uses_type(&self, fully_qualified_name: &str) -> bool {
        self.types.lookup_class(fully_qualified_name).is_some()
    }
}

#[cfg(test)]
#[path = "../tests/arena_tests.rs"]
mod arena_tests;
