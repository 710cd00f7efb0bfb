//! Tree edits.
//!
//! Recipes never mutate the tree they analyze. They describe changes as an
//! [`EditSet`], which is validated as a whole and then applied to a copy of
//! the file. Either every edit of the set lands or none does.

use crate::arena::{NodeArena, SourceFile};
use crate::base::{NodeIndex, TypeId};
use crate::builder::TreeBuilder;
use crate::node::{
    FieldAccessData, IdentifierData, LiteralValue, MethodInvocationData, ModifierKind, NodeData,
    NodeKind,
};
use crate::types::{JavaType, Primitive, TypeTable};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

/// A method signature spelled with type names.
///
/// Type names are fully-qualified class names or primitive keywords.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    pub declaring_type: String,
    pub name: String,
    pub return_type: Option<String>,
    pub parameter_types: Vec<String>,
}

impl MethodSignature {
    pub fn new(
        declaring_type: impl Into<String>,
        name: impl Into<String>,
        return_type: Option<&str>,
        parameter_types: &[&str],
    ) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            name: name.into(),
            return_type: return_type.map(str::to_string),
            parameter_types: parameter_types.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A replacement expression, materialized into the target file on apply.
#[derive(Clone, Debug, PartialEq)]
pub enum Snippet {
    /// Re-use a node of the file being edited.
    Existing(NodeIndex),
    StringLiteral(String),
    /// A type name used as an expression, as in `MediaType.parse(...)`.
    TypeName(String),
    /// Static field access `Target.name`.
    StaticField {
        target: Box<Snippet>,
        owner: String,
        name: String,
        field_type: Option<String>,
    },
    Invocation {
        select: Option<Box<Snippet>>,
        signature: MethodSignature,
        arguments: Vec<Snippet>,
    },
}

impl Snippet {
    fn existing_nodes(&self, out: &mut Vec<NodeIndex>) {
        match self {
            Snippet::Existing(idx) => out.push(*idx),
            Snippet::StringLiteral(_) | Snippet::TypeName(_) => {}
            Snippet::StaticField { target, .. } => target.existing_nodes(out),
            Snippet::Invocation {
                select, arguments, ..
            } => {
                if let Some(select) = select {
                    select.existing_nodes(out);
                }
                for arg in arguments {
                    arg.existing_nodes(out);
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TreeEdit {
    /// Replace the value of a literal node.
    SetLiteral {
        literal: NodeIndex,
        value: LiteralValue,
    },
    /// Replace an expression with a snippet.
    ReplaceExpression { target: NodeIndex, snippet: Snippet },
    RenameIdentifier { identifier: NodeIndex, name: String },
    /// Drop a modifier. For methods its comments move onto the declaration.
    RemoveModifier {
        declaration: NodeIndex,
        modifier: ModifierKind,
    },
    /// Rename a class type in the file's type table.
    RenameClassType { from: String, to: String },
    /// Rename a method type, keeping its declaring type and parameters.
    RenameMethodType { method_type: TypeId, name: String },
    /// Point an invocation at another overload.
    RetypeInvocation {
        invocation: NodeIndex,
        signature: MethodSignature,
    },
}

impl TreeEdit {
    /// The node this edit rewrites, if it targets one.
    pub fn target(&self) -> Option<NodeIndex> {
        match self {
            TreeEdit::SetLiteral { literal, .. } => Some(*literal),
            TreeEdit::ReplaceExpression { target, .. } => Some(*target),
            TreeEdit::RenameIdentifier { identifier, .. } => Some(*identifier),
            TreeEdit::RemoveModifier { declaration, .. } => Some(*declaration),
            TreeEdit::RetypeInvocation { invocation, .. } => Some(*invocation),
            TreeEdit::RenameClassType { .. } | TreeEdit::RenameMethodType { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    MissingNode(NodeIndex),
    UnexpectedKind {
        node: NodeIndex,
        expected: &'static str,
        found: NodeKind,
    },
    /// The target has no parent to splice a replacement into.
    Detached(NodeIndex),
    /// Two edits rewrite the same node differently.
    Conflict(NodeIndex),
    MissingType(TypeId),
    /// A class rename onto a name the file already uses for another class.
    TypeNameTaken(String),
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::MissingNode(idx) => write!(f, "edit targets missing node {}", idx.0),
            EditError::UnexpectedKind {
                node,
                expected,
                found,
            } => write!(
                f,
                "edit expected {expected} at node {} but found {found:?}",
                node.0
            ),
            EditError::Detached(idx) => {
                write!(f, "cannot replace node {} without a parent", idx.0)
            }
            EditError::Conflict(idx) => write!(f, "conflicting edits for node {}", idx.0),
            EditError::MissingType(id) => write!(f, "edit targets missing type {}", id.0),
            EditError::TypeNameTaken(name) => {
                write!(f, "cannot rename a class to `{name}`, which already exists")
            }
        }
    }
}

impl std::error::Error for EditError {}

/// An ordered, de-duplicated set of edits for one file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditSet {
    edits: Vec<TreeEdit>,
}

impl EditSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edit; exact duplicates are dropped.
    pub fn push(&mut self, edit: TreeEdit) {
        if !self.edits.contains(&edit) {
            self.edits.push(edit);
        }
    }

    pub fn extend(&mut self, other: EditSet) {
        for edit in other.edits {
            self.push(edit);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TreeEdit> {
        self.edits.iter()
    }

    /// Check every edit against `file` without changing anything.
    pub fn validate(&self, file: &SourceFile) -> Result<(), EditError> {
        let arena = &file.arena;
        let mut claimed: FxHashMap<NodeIndex, &TreeEdit> = FxHashMap::default();
        for edit in &self.edits {
            match edit {
                TreeEdit::SetLiteral { literal, .. } => {
                    expect_kind(arena, *literal, NodeKind::Literal, "a literal")?;
                }
                TreeEdit::ReplaceExpression { target, snippet } => {
                    arena.get(*target).ok_or(EditError::MissingNode(*target))?;
                    if arena.parent(*target).is_none() {
                        return Err(EditError::Detached(*target));
                    }
                    let mut reused = Vec::new();
                    snippet.existing_nodes(&mut reused);
                    for idx in reused {
                        arena.get(idx).ok_or(EditError::MissingNode(idx))?;
                    }
                }
                TreeEdit::RenameIdentifier { identifier, .. } => {
                    expect_kind(arena, *identifier, NodeKind::Identifier, "an identifier")?;
                }
                TreeEdit::RemoveModifier { declaration, .. } => {
                    let data = arena
                        .data(*declaration)
                        .ok_or(EditError::MissingNode(*declaration))?;
                    if !matches!(
                        data,
                        NodeData::ClassDeclaration(_)
                            | NodeData::MethodDeclaration(_)
                            | NodeData::VariableDeclarations(_)
                    ) {
                        return Err(EditError::UnexpectedKind {
                            node: *declaration,
                            expected: "a declaration",
                            found: data.kind(),
                        });
                    }
                }
                TreeEdit::RenameClassType { from, to } => {
                    if from != to
                        && file.types.lookup_class(from).is_some()
                        && file.types.lookup_class(to).is_some()
                    {
                        return Err(EditError::TypeNameTaken(to.clone()));
                    }
                }
                TreeEdit::RenameMethodType { method_type, .. } => {
                    file.types
                        .as_method(*method_type)
                        .ok_or(EditError::MissingType(*method_type))?;
                }
                TreeEdit::RetypeInvocation { invocation, .. } => {
                    expect_kind(
                        arena,
                        *invocation,
                        NodeKind::MethodInvocation,
                        "a method invocation",
                    )?;
                }
            }
            if let Some(target) = edit.target() {
                match claimed.get(&target) {
                    Some(previous) if !compatible(previous, edit) => {
                        return Err(EditError::Conflict(target));
                    }
                    _ => {
                        claimed.insert(target, edit);
                    }
                }
            }
        }
        Ok(())
    }

    /// Apply to a copy of `file`. On error nothing is applied.
    pub fn apply(&self, file: &SourceFile) -> Result<SourceFile, EditError> {
        self.validate(file)?;
        if self.edits.is_empty() {
            return Ok(file.clone());
        }
        debug!(path = %file.path, edits = self.edits.len(), "applying edits");

        let mut builder = TreeBuilder::from_parts(
            file.path.clone(),
            file.arena.clone(),
            file.types.clone(),
        );
        for edit in &self.edits {
            trace!(?edit, "apply");
            apply_one(&mut builder, edit)?;
        }
        let (arena, types) = builder.into_parts();
        Ok(SourceFile::new(file.path.clone(), arena, types, file.root))
    }
}

/// Two edits on one node are compatible when they do not both rewrite it.
fn compatible(a: &TreeEdit, b: &TreeEdit) -> bool {
    match (a, b) {
        (
            TreeEdit::RemoveModifier { modifier: m1, .. },
            TreeEdit::RemoveModifier { modifier: m2, .. },
        ) => m1 != m2,
        _ => a == b,
    }
}

fn expect_kind(
    arena: &NodeArena,
    idx: NodeIndex,
    kind: NodeKind,
    expected: &'static str,
) -> Result<(), EditError> {
    let found = arena.kind(idx).ok_or(EditError::MissingNode(idx))?;
    if found == kind {
        Ok(())
    } else {
        Err(EditError::UnexpectedKind {
            node: idx,
            expected,
            found,
        })
    }
}

fn intern_type_name(types: &mut TypeTable, name: &str) -> TypeId {
    match Primitive::from_keyword(name) {
        Some(primitive) => types.primitive(primitive),
        None => types.class(name),
    }
}

fn intern_signature(types: &mut TypeTable, signature: &MethodSignature) -> TypeId {
    let declaring = types.class(&signature.declaring_type);
    let return_type = signature
        .return_type
        .as_deref()
        .map(|name| intern_type_name(types, name));
    let parameters = signature
        .parameter_types
        .iter()
        .map(|name| intern_type_name(types, name))
        .collect();
    types.method(declaring, &signature.name, return_type, parameters)
}

fn materialize(builder: &mut TreeBuilder, snippet: &Snippet) -> NodeIndex {
    match snippet {
        Snippet::Existing(idx) => *idx,
        Snippet::StringLiteral(value) => builder.string_literal(value),
        Snippet::TypeName(name) => {
            let ty = builder.class_type(name);
            builder.type_ref(ty)
        }
        Snippet::StaticField {
            target,
            owner,
            name,
            field_type,
        } => {
            let target = materialize(builder, target);
            let owner = builder.class_type(owner);
            let ty = field_type
                .as_deref()
                .map(|name| intern_type_name(builder.types_mut(), name));
            let variable = builder.variable_type(name, Some(owner), ty);
            let name = builder.add(NodeData::Identifier(IdentifierData {
                simple_name: name.clone(),
                ty,
                field_type: Some(variable),
            }));
            builder.add(NodeData::FieldAccess(FieldAccessData { target, name, ty }))
        }
        Snippet::Invocation {
            select,
            signature,
            arguments,
        } => {
            let select = match select {
                Some(select) => materialize(builder, select),
                None => NodeIndex::NONE,
            };
            let arguments = arguments
                .iter()
                .map(|arg| materialize(builder, arg))
                .collect();
            let method_type = intern_signature(builder.types_mut(), signature);
            let return_type = builder
                .types()
                .as_method(method_type)
                .and_then(|m| m.return_type);
            let name = builder.identifier(&signature.name, return_type);
            builder.add(NodeData::MethodInvocation(MethodInvocationData {
                select,
                name,
                arguments,
                method_type: Some(method_type),
            }))
        }
    }
}

fn apply_one(builder: &mut TreeBuilder, edit: &TreeEdit) -> Result<(), EditError> {
    match edit {
        TreeEdit::SetLiteral { literal, value } => {
            let arena = builder.arena_mut();
            if let Some(NodeData::Literal(lit)) = arena.get_mut(*literal).map(|n| &mut n.data) {
                lit.value = value.clone();
            }
        }
        TreeEdit::ReplaceExpression { target, snippet } => {
            let parent = builder
                .arena()
                .parent(*target)
                .ok_or(EditError::Detached(*target))?;
            let replacement = materialize(builder, snippet);
            let arena = builder.arena_mut();
            if !arena.replace_child(parent, *target, replacement) {
                return Err(EditError::Detached(*target));
            }
        }
        TreeEdit::RenameIdentifier { identifier, name } => {
            let arena = builder.arena_mut();
            if let Some(NodeData::Identifier(ident)) =
                arena.get_mut(*identifier).map(|n| &mut n.data)
            {
                ident.simple_name = name.clone();
            }
        }
        TreeEdit::RemoveModifier {
            declaration,
            modifier,
        } => {
            let arena = builder.arena_mut();
            if let Some(node) = arena.get_mut(*declaration) {
                let mut moved = Vec::new();
                if let Some(modifiers) = node.data.modifiers_mut() {
                    modifiers.retain_mut(|m| {
                        if m.kind == *modifier {
                            moved.append(&mut m.comments);
                            false
                        } else {
                            true
                        }
                    });
                }
                if let NodeData::MethodDeclaration(method) = &mut node.data {
                    method.comments.extend(moved);
                }
            }
        }
        TreeEdit::RenameClassType { from, to } => {
            builder.types_mut().rename_class(from, to);
        }
        TreeEdit::RenameMethodType { method_type, name } => {
            let types = builder.types_mut();
            match types.get_mut(*method_type) {
                Some(JavaType::Method(method)) => method.name = name.clone(),
                _ => return Err(EditError::MissingType(*method_type)),
            }
        }
        TreeEdit::RetypeInvocation {
            invocation,
            signature,
        } => {
            let method_type = intern_signature(builder.types_mut(), signature);
            let arena = builder.arena_mut();
            if let Some(NodeData::MethodInvocation(call)) =
                arena.get_mut(*invocation).map(|n| &mut n.data)
            {
                call.method_type = Some(method_type);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/edit_tests.rs"]
mod edit_tests;
