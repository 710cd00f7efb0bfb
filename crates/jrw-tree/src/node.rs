//! Node definitions for the typed Java syntax tree.
//!
//! Every node is a [`Node`] header (parent link) plus a [`NodeData`] payload.
//! `NodeData` is a closed enum: the set of syntax forms the recipes operate on
//! is fixed, so matches over it are exhaustive.
//!
//! Type-bearing nodes carry an optional [`TypeId`] into the file's
//! [`TypeTable`](crate::TypeTable). `None` means the front end could not
//! attribute a type; analyses treat such nodes conservatively.

use crate::base::{NodeIndex, NodeList, TypeId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A node header plus its payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    /// Enclosing node (`NodeIndex::NONE` for the compilation unit).
    pub parent: NodeIndex,
    pub data: NodeData,
}

/// Discriminant of [`NodeData`], cheap to compare and log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    CompilationUnit,
    ClassDeclaration,
    MethodDeclaration,
    Block,
    VariableDeclarations,
    NamedVariable,
    Identifier,
    FieldAccess,
    MethodInvocation,
    NewClass,
    Literal,
    Annotation,
    Assignment,
    NewArray,
    Return,
    ForLoop,
    Try,
    Lambda,
    Binary,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum NodeData {
    CompilationUnit(CompilationUnitData),
    ClassDeclaration(ClassDeclarationData),
    MethodDeclaration(MethodDeclarationData),
    Block(BlockData),
    VariableDeclarations(VariableDeclarationsData),
    NamedVariable(NamedVariableData),
    Identifier(IdentifierData),
    FieldAccess(FieldAccessData),
    MethodInvocation(MethodInvocationData),
    NewClass(NewClassData),
    Literal(LiteralData),
    Annotation(AnnotationData),
    Assignment(AssignmentData),
    NewArray(NewArrayData),
    Return(ReturnData),
    ForLoop(ForLoopData),
    Try(TryData),
    Lambda(LambdaData),
    Binary(BinaryData),
}

// =============================================================================
// Modifiers
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierKind {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
    Default,
    Synchronized,
}

impl ModifierKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            ModifierKind::Public => "public",
            ModifierKind::Protected => "protected",
            ModifierKind::Private => "private",
            ModifierKind::Static => "static",
            ModifierKind::Final => "final",
            ModifierKind::Abstract => "abstract",
            ModifierKind::Default => "default",
            ModifierKind::Synchronized => "synchronized",
        }
    }
}

/// A modifier keyword together with the comments written in front of it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifier {
    pub kind: ModifierKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
}

impl Modifier {
    pub const fn new(kind: ModifierKind) -> Self {
        Self {
            kind,
            comments: Vec::new(),
        }
    }

    pub fn with_comment(kind: ModifierKind, comment: impl Into<String>) -> Self {
        Self {
            kind,
            comments: vec![comment.into()],
        }
    }
}

/// Returns true when `modifiers` contains `kind`.
pub fn has_modifier(modifiers: &[Modifier], kind: ModifierKind) -> bool {
    modifiers.iter().any(|m| m.kind == kind)
}

// =============================================================================
// Payloads
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompilationUnitData {
    pub package_name: Option<String>,
    /// Import lines as written (`org.example.Foo`, `org.example.*`).
    pub imports: Vec<String>,
    pub classes: NodeList,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

impl ClassKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Enum => "enum",
            ClassKind::Record => "record",
            ClassKind::Annotation => "@interface",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassDeclarationData {
    pub annotations: NodeList,
    pub modifiers: Vec<Modifier>,
    pub class_kind: ClassKind,
    /// Identifier node carrying the simple name.
    pub name: NodeIndex,
    /// Block holding the members.
    pub body: NodeIndex,
    pub class_type: Option<TypeId>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MethodDeclarationData {
    /// Comments written before the declaration.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
    pub annotations: NodeList,
    pub modifiers: Vec<Modifier>,
    /// Return type expression; `NONE` for constructors.
    pub return_type: NodeIndex,
    pub name: NodeIndex,
    /// `VariableDeclarations` nodes, one per parameter.
    pub parameters: NodeList,
    /// Body block; `NONE` for abstract and interface methods.
    pub body: NodeIndex,
    pub method_type: Option<TypeId>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BlockData {
    pub statements: NodeList,
}

/// A declaration statement, field, parameter or resource: one type, one
/// modifier list, one or more named variables.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariableDeclarationsData {
    pub annotations: NodeList,
    pub modifiers: Vec<Modifier>,
    /// Declared type expression; `NONE` for untyped lambda parameters.
    pub type_expr: NodeIndex,
    /// `NamedVariable` nodes.
    pub variables: NodeList,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NamedVariableData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
    /// `JavaType::Variable` describing the binding.
    pub variable_type: Option<TypeId>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IdentifierData {
    pub simple_name: String,
    /// Type of the expression (or of the type reference when used as a type).
    pub ty: Option<TypeId>,
    /// `JavaType::Variable` when the identifier names a variable.
    pub field_type: Option<TypeId>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldAccessData {
    pub target: NodeIndex,
    /// Identifier node; its `field_type` names the accessed variable.
    pub name: NodeIndex,
    pub ty: Option<TypeId>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MethodInvocationData {
    /// Receiver expression; `NONE` for unqualified calls.
    pub select: NodeIndex,
    pub name: NodeIndex,
    pub arguments: NodeList,
    pub method_type: Option<TypeId>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewClassData {
    pub class_expr: NodeIndex,
    pub arguments: NodeList,
    pub ty: Option<TypeId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    String(String),
    Int(i32),
    Long(i64),
    Boolean(bool),
    Null,
}

impl LiteralValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LiteralValue::String(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LiteralData {
    pub value: LiteralValue,
    pub ty: Option<TypeId>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnnotationData {
    /// Identifier or field access naming the annotation type.
    pub annotation_type: NodeIndex,
    /// Either a single bare value, or `Assignment` nodes (`name = value`).
    pub arguments: NodeList,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssignmentData {
    pub variable: NodeIndex,
    pub value: NodeIndex,
    pub ty: Option<TypeId>,
}

/// Array initializer, as in `{ "a", "b" }`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewArrayData {
    pub elements: NodeList,
    pub ty: Option<TypeId>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReturnData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForLoopData {
    /// Initializer statements; declarations are `VariableDeclarations`.
    pub init: NodeList,
    pub condition: NodeIndex,
    pub update: NodeList,
    pub body: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TryData {
    /// Resource `VariableDeclarations`; empty for a plain `try`.
    pub resources: NodeList,
    pub body: NodeIndex,
    pub finally: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LambdaData {
    /// Parameter `VariableDeclarations`.
    pub parameters: NodeList,
    /// Expression or block.
    pub body: NodeIndex,
    pub ty: Option<TypeId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    LessThan,
    GreaterThan,
    Equal,
    NotEqual,
}

impl BinaryOperator {
    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::LessThan => "<",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BinaryData {
    pub left: NodeIndex,
    pub operator: BinaryOperator,
    pub right: NodeIndex,
    pub ty: Option<TypeId>,
}

// =============================================================================
// Structural helpers
// =============================================================================

pub type Children = SmallVec<[NodeIndex; 8]>;

fn push_some(out: &mut Children, idx: NodeIndex) {
    if idx.is_some() {
        out.push(idx);
    }
}

fn replace_in(slot: &mut NodeIndex, old: NodeIndex, new: NodeIndex) -> bool {
    if *slot == old {
        *slot = new;
        true
    } else {
        false
    }
}

fn replace_in_list(list: &mut NodeList, old: NodeIndex, new: NodeIndex) -> bool {
    match list.iter_mut().find(|slot| **slot == old) {
        Some(slot) => {
            *slot = new;
            true
        }
        None => false,
    }
}

impl NodeData {
    pub const fn kind(&self) -> NodeKind {
        match self {
            NodeData::CompilationUnit(_) => NodeKind::CompilationUnit,
            NodeData::ClassDeclaration(_) => NodeKind::ClassDeclaration,
            NodeData::MethodDeclaration(_) => NodeKind::MethodDeclaration,
            NodeData::Block(_) => NodeKind::Block,
            NodeData::VariableDeclarations(_) => NodeKind::VariableDeclarations,
            NodeData::NamedVariable(_) => NodeKind::NamedVariable,
            NodeData::Identifier(_) => NodeKind::Identifier,
            NodeData::FieldAccess(_) => NodeKind::FieldAccess,
            NodeData::MethodInvocation(_) => NodeKind::MethodInvocation,
            NodeData::NewClass(_) => NodeKind::NewClass,
            NodeData::Literal(_) => NodeKind::Literal,
            NodeData::Annotation(_) => NodeKind::Annotation,
            NodeData::Assignment(_) => NodeKind::Assignment,
            NodeData::NewArray(_) => NodeKind::NewArray,
            NodeData::Return(_) => NodeKind::Return,
            NodeData::ForLoop(_) => NodeKind::ForLoop,
            NodeData::Try(_) => NodeKind::Try,
            NodeData::Lambda(_) => NodeKind::Lambda,
            NodeData::Binary(_) => NodeKind::Binary,
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Children {
        let mut out = Children::new();
        match self {
            NodeData::CompilationUnit(cu) => out.extend(cu.classes.iter().copied()),
            NodeData::ClassDeclaration(class) => {
                out.extend(class.annotations.iter().copied());
                push_some(&mut out, class.name);
                push_some(&mut out, class.body);
            }
            NodeData::MethodDeclaration(method) => {
                out.extend(method.annotations.iter().copied());
                push_some(&mut out, method.return_type);
                push_some(&mut out, method.name);
                out.extend(method.parameters.iter().copied());
                push_some(&mut out, method.body);
            }
            NodeData::Block(block) => out.extend(block.statements.iter().copied()),
            NodeData::VariableDeclarations(decls) => {
                out.extend(decls.annotations.iter().copied());
                push_some(&mut out, decls.type_expr);
                out.extend(decls.variables.iter().copied());
            }
            NodeData::NamedVariable(var) => {
                push_some(&mut out, var.name);
                push_some(&mut out, var.initializer);
            }
            NodeData::Identifier(_) | NodeData::Literal(_) => {}
            NodeData::FieldAccess(access) => {
                push_some(&mut out, access.target);
                push_some(&mut out, access.name);
            }
            NodeData::MethodInvocation(call) => {
                push_some(&mut out, call.select);
                push_some(&mut out, call.name);
                out.extend(call.arguments.iter().copied());
            }
            NodeData::NewClass(new_class) => {
                push_some(&mut out, new_class.class_expr);
                out.extend(new_class.arguments.iter().copied());
            }
            NodeData::Annotation(annotation) => {
                push_some(&mut out, annotation.annotation_type);
                out.extend(annotation.arguments.iter().copied());
            }
            NodeData::Assignment(assign) => {
                push_some(&mut out, assign.variable);
                push_some(&mut out, assign.value);
            }
            NodeData::NewArray(array) => out.extend(array.elements.iter().copied()),
            NodeData::Return(ret) => push_some(&mut out, ret.expression),
            NodeData::ForLoop(for_loop) => {
                out.extend(for_loop.init.iter().copied());
                push_some(&mut out, for_loop.condition);
                out.extend(for_loop.update.iter().copied());
                push_some(&mut out, for_loop.body);
            }
            NodeData::Try(try_stmt) => {
                out.extend(try_stmt.resources.iter().copied());
                push_some(&mut out, try_stmt.body);
                push_some(&mut out, try_stmt.finally);
            }
            NodeData::Lambda(lambda) => {
                out.extend(lambda.parameters.iter().copied());
                push_some(&mut out, lambda.body);
            }
            NodeData::Binary(binary) => {
                push_some(&mut out, binary.left);
                push_some(&mut out, binary.right);
            }
        }
        out
    }

    /// Replace the child slot holding `old` with `new`.
    ///
    /// Returns false when `old` is not a direct child.
    pub fn replace_child(&mut self, old: NodeIndex, new: NodeIndex) -> bool {
        match self {
            NodeData::CompilationUnit(cu) => replace_in_list(&mut cu.classes, old, new),
            NodeData::ClassDeclaration(class) => {
                replace_in_list(&mut class.annotations, old, new)
                    || replace_in(&mut class.name, old, new)
                    || replace_in(&mut class.body, old, new)
            }
            NodeData::MethodDeclaration(method) => {
                replace_in_list(&mut method.annotations, old, new)
                    || replace_in(&mut method.return_type, old, new)
                    || replace_in(&mut method.name, old, new)
                    || replace_in_list(&mut method.parameters, old, new)
                    || replace_in(&mut method.body, old, new)
            }
            NodeData::Block(block) => replace_in_list(&mut block.statements, old, new),
            NodeData::VariableDeclarations(decls) => {
                replace_in_list(&mut decls.annotations, old, new)
                    || replace_in(&mut decls.type_expr, old, new)
                    || replace_in_list(&mut decls.variables, old, new)
            }
            NodeData::NamedVariable(var) => {
                replace_in(&mut var.name, old, new) || replace_in(&mut var.initializer, old, new)
            }
            NodeData::Identifier(_) | NodeData::Literal(_) => false,
            NodeData::FieldAccess(access) => {
                replace_in(&mut access.target, old, new) || replace_in(&mut access.name, old, new)
            }
            NodeData::MethodInvocation(call) => {
                replace_in(&mut call.select, old, new)
                    || replace_in(&mut call.name, old, new)
                    || replace_in_list(&mut call.arguments, old, new)
            }
            NodeData::NewClass(new_class) => {
                replace_in(&mut new_class.class_expr, old, new)
                    || replace_in_list(&mut new_class.arguments, old, new)
            }
            NodeData::Annotation(annotation) => {
                replace_in(&mut annotation.annotation_type, old, new)
                    || replace_in_list(&mut annotation.arguments, old, new)
            }
            NodeData::Assignment(assign) => {
                replace_in(&mut assign.variable, old, new) || replace_in(&mut assign.value, old, new)
            }
            NodeData::NewArray(array) => replace_in_list(&mut array.elements, old, new),
            NodeData::Return(ret) => replace_in(&mut ret.expression, old, new),
            NodeData::ForLoop(for_loop) => {
                replace_in_list(&mut for_loop.init, old, new)
                    || replace_in(&mut for_loop.condition, old, new)
                    || replace_in_list(&mut for_loop.update, old, new)
                    || replace_in(&mut for_loop.body, old, new)
            }
            NodeData::Try(try_stmt) => {
                replace_in_list(&mut try_stmt.resources, old, new)
                    || replace_in(&mut try_stmt.body, old, new)
                    || replace_in(&mut try_stmt.finally, old, new)
            }
            NodeData::Lambda(lambda) => {
                replace_in_list(&mut lambda.parameters, old, new)
                    || replace_in(&mut lambda.body, old, new)
            }
            NodeData::Binary(binary) => {
                replace_in(&mut binary.left, old, new) || replace_in(&mut binary.right, old, new)
            }
        }
    }

    /// Modifier list of declarations that have one.
    pub fn modifiers_mut(&mut self) -> Option<&mut Vec<Modifier>> {
        match self {
            NodeData::ClassDeclaration(class) => Some(&mut class.modifiers),
            NodeData::MethodDeclaration(method) => Some(&mut method.modifiers),
            NodeData::VariableDeclarations(decls) => Some(&mut decls.modifiers),
            _ => None,
        }
    }

    /// Expression type, for expression nodes.
    pub fn expression_type(&self) -> Option<TypeId> {
        match self {
            NodeData::Identifier(ident) => ident.ty,
            NodeData::FieldAccess(access) => access.ty,
            NodeData::NewClass(new_class) => new_class.ty,
            NodeData::Literal(lit) => lit.ty,
            NodeData::Assignment(assign) => assign.ty,
            NodeData::NewArray(array) => array.ty,
            NodeData::Lambda(lambda) => lambda.ty,
            NodeData::Binary(binary) => binary.ty,
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../tests/node_tests.rs"]
mod node_tests;
