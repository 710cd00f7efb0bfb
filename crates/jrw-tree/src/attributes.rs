//! Annotation metadata access.
//!
//! Annotation arguments are exposed as an ordered list of `(key, value)`
//! attributes. A value is either one slot or an array of slots, and every
//! slot remembers the node holding it, so an edit can target exactly one
//! array element without touching its siblings.

use crate::arena::NodeArena;
use crate::base::NodeIndex;
use crate::node::NodeData;
use crate::types::TypeTable;

/// Attribute name Java uses for the single unnamed argument.
pub const VALUE_ATTRIBUTE: &str = "value";

/// One value position inside an annotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttributeSlot {
    /// The value expression (literal, identifier, field access, ...).
    pub node: NodeIndex,
    /// The node whose child slot holds `node`.
    pub container: NodeIndex,
    /// Position inside an array initializer.
    pub element: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttributeValue {
    Single(AttributeSlot),
    Array(Vec<AttributeSlot>),
}

impl AttributeValue {
    pub fn slots(&self) -> &[AttributeSlot] {
        match self {
            AttributeValue::Single(slot) => std::slice::from_ref(slot),
            AttributeValue::Array(slots) => slots,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    pub value: AttributeValue,
}

fn attribute_value(arena: &NodeArena, container: NodeIndex, node: NodeIndex) -> AttributeValue {
    match arena.data(node) {
        Some(NodeData::NewArray(array)) => AttributeValue::Array(
            array
                .elements
                .iter()
                .enumerate()
                .map(|(element, &slot)| AttributeSlot {
                    node: slot,
                    container: node,
                    element: Some(element),
                })
                .collect(),
        ),
        _ => AttributeValue::Single(AttributeSlot {
            node,
            container,
            element: None,
        }),
    }
}

/// Attributes of `annotation` in source order.
///
/// A bare argument (`@Bean("x")`) is reported under the `value` key.
pub fn annotation_attributes(arena: &NodeArena, annotation: NodeIndex) -> Vec<Attribute> {
    let Some(data) = arena.get_annotation(annotation) else {
        return Vec::new();
    };
    data.arguments
        .iter()
        .filter_map(|&arg| match arena.data(arg)? {
            NodeData::Assignment(assign) => Some(Attribute {
                key: arena.get_identifier_text(assign.variable)?.to_string(),
                value: attribute_value(arena, arg, assign.value),
            }),
            _ => Some(Attribute {
                key: VALUE_ATTRIBUTE.to_string(),
                value: attribute_value(arena, annotation, arg),
            }),
        })
        .collect()
}

/// Fully-qualified name of an annotation's type, when attributed.
pub fn annotation_type_name<'t>(
    arena: &NodeArena,
    types: &'t TypeTable,
    annotation: NodeIndex,
) -> Option<&'t str> {
    let data = arena.get_annotation(annotation)?;
    let ty = arena.expression_type(data.annotation_type, types)?;
    types.type_name(ty)
}

/// Annotations attached to a class, method or variable declaration.
pub fn annotations_of(arena: &NodeArena, declaration: NodeIndex) -> &[NodeIndex] {
    match arena.data(declaration) {
        Some(NodeData::ClassDeclaration(class)) => &class.annotations,
        Some(NodeData::MethodDeclaration(method)) => &method.annotations,
        Some(NodeData::VariableDeclarations(decls)) => &decls.annotations,
        _ => &[],
    }
}

#[cfg(test)]
#[path = "../tests/attributes_tests.rs"]
mod attributes_tests;
