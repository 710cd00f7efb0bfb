//! Typed Java syntax tree for the jrw rewrite engine.
//!
//! This crate provides the data the recipes operate on:
//! - Arena storage for nodes (`NodeArena`, `NodeIndex`) and the per-file
//!   container (`SourceFile`)
//! - Attributed types (`TypeTable`, `JavaType`)
//! - Annotation attribute access
//! - The edit service (`EditSet`, `TreeEdit`)
//! - A canonical Java printer

// Index types
pub mod base;
pub use base::{NodeIndex, NodeList, TypeId};

// Node payloads
pub mod node;
pub use node::{
    BinaryOperator, ClassKind, LiteralValue, Modifier, ModifierKind, Node, NodeData, NodeKind,
    has_modifier,
};

// Type table
pub mod types;
pub use types::{
    ClassType, JavaType, MethodType, Primitive, TypeTable, VariableType, is_of_type,
    simple_name_of,
};

// Arena and source file
pub mod arena;
pub use arena::{NodeArena, SourceFile};

// Construction helpers for hosts and tests
pub mod builder;
pub use builder::{
    ClassSpec, DeclarationSpec, Declared, JAVA_LANG_STRING, MethodSpec, TreeBuilder,
    VariableSpec, modifiers,
};

// Annotation attributes
pub mod attributes;
pub use attributes::{
    Attribute, AttributeSlot, AttributeValue, VALUE_ATTRIBUTE, annotation_attributes,
    annotation_type_name, annotations_of,
};

// Edits
pub mod edit;
pub use edit::{EditError, EditSet, MethodSignature, Snippet, TreeEdit};

// Printing
pub mod printer;
pub use printer::{print_expression, print_source};
