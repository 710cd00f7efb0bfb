//! Owner chains.
//!
//! Every variable, method and nested class type records what it belongs to.
//! Following those links ends at a top-level class: the *root owner*. Two
//! positions with the same root owner live in the same top-level type, which
//! is the precondition for resolving a name lexically.

use crate::limits::{MAX_OWNER_CHAIN_DEPTH, MAX_SCOPE_WALK_DEPTH};
use crate::walk::{Walk, walk_outward};
use jrw_tree::{JavaType, NodeArena, NodeData, NodeIndex, TypeId, TypeTable};
use std::ops::ControlFlow;
use tracing::warn;

/// End of an owner chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RootOwner {
    /// A top-level class, or a type that cannot be owned (primitive, unknown).
    Type(TypeId),
    /// The chain ended without an owner, e.g. at the compilation unit.
    Unowned,
}

fn owner_of(types: &TypeTable, ty: TypeId) -> Option<TypeId> {
    match types.get(ty)? {
        JavaType::Variable(var) => var.owner,
        JavaType::Method(method) => Some(method.declaring_type),
        JavaType::Class(class) => class.owning_class,
        JavaType::Primitive(_) | JavaType::Unknown => None,
    }
}

/// Root owner of `ty`. `None` when the chain is too deep to follow.
pub fn root_owner(types: &TypeTable, ty: TypeId) -> Option<RootOwner> {
    let walk = walk_outward(
        ty,
        MAX_OWNER_CHAIN_DEPTH,
        |current| owner_of(types, current),
        |current| match types.get(current) {
            Some(JavaType::Variable(_)) | Some(JavaType::Method(_)) | None => {
                ControlFlow::Continue(())
            }
            Some(JavaType::Class(class)) if class.owning_class.is_some() => {
                ControlFlow::Continue(())
            }
            Some(_) => ControlFlow::Break(current),
        },
    );
    match walk {
        Walk::Found(root) => Some(RootOwner::Type(root)),
        Walk::Exhausted => Some(RootOwner::Unowned),
        Walk::LimitReached => {
            warn!(type_id = ty.0, "owner chain exceeds depth limit");
            None
        }
    }
}

fn declaration_walk(arena: &NodeArena, position: NodeIndex) -> Walk<NodeIndex> {
    let Some(start) = arena.parent(position) else {
        return Walk::Exhausted;
    };
    let walk = walk_outward(
        start,
        MAX_SCOPE_WALK_DEPTH,
        |current| arena.parent(current),
        |current| match arena.data(current) {
            Some(
                NodeData::MethodDeclaration(_)
                | NodeData::ClassDeclaration(_)
                | NodeData::CompilationUnit(_),
            ) => ControlFlow::Break(current),
            _ => ControlFlow::Continue(()),
        },
    );
    if walk == Walk::LimitReached {
        warn!(node = position.0, "enclosing declaration walk exceeds depth limit");
    }
    walk
}

/// Nearest method declaration, class declaration or compilation unit strictly
/// enclosing `position`.
pub fn enclosing_declaration(arena: &NodeArena, position: NodeIndex) -> Option<NodeIndex> {
    declaration_walk(arena, position).found()
}

/// Root owner of the code at `position`.
///
/// Inside a method this is the root owner of the method type; inside a class
/// body, of the class type. At file level (or in a detached fragment) there
/// is no owner. `None` when a depth bound was hit.
pub fn local_root_owner(
    arena: &NodeArena,
    types: &TypeTable,
    position: NodeIndex,
) -> Option<RootOwner> {
    let declaration = match declaration_walk(arena, position) {
        Walk::Found(declaration) => declaration,
        Walk::Exhausted => return Some(RootOwner::Unowned),
        Walk::LimitReached => return None,
    };
    let declared_type = match arena.data(declaration) {
        Some(NodeData::MethodDeclaration(method)) => method.method_type,
        Some(NodeData::ClassDeclaration(class)) => class.class_type,
        _ => None,
    };
    match declared_type {
        Some(ty) => root_owner(types, ty),
        None => Some(RootOwner::Unowned),
    }
}

#[cfg(test)]
#[path = "../tests/owner_tests.rs"]
mod owner_tests;
