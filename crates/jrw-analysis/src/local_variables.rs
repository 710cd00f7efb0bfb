//! Resolution of names to the initializers of immutable local bindings.
//!
//! A reference resolves when it names a variable owned by the same top-level
//! type as the code it appears in, the innermost binding with that name is
//! declared `final`, and that binding has an initializer. Anything else is
//! left as written.

use crate::limits::MAX_SCOPE_WALK_DEPTH;
use crate::owner::{local_root_owner, root_owner};
use crate::scope::{Binding, ScopeFrame};
use crate::walk::{Walk, walk_outward};
use jrw_tree::{NodeArena, NodeData, NodeIndex, TypeTable};
use std::ops::ControlFlow;
use tracing::{trace, warn};

/// Resolves references against one file.
#[derive(Clone, Copy, Debug)]
pub struct LocalVariableResolver<'a> {
    arena: &'a NodeArena,
    types: &'a TypeTable,
}

impl<'a> LocalVariableResolver<'a> {
    pub fn new(arena: &'a NodeArena, types: &'a TypeTable) -> Self {
        Self { arena, types }
    }

    /// The initializer `reference` stands for at `position`, or `reference`
    /// itself when it does not resolve.
    pub fn resolve(&self, reference: NodeIndex, position: NodeIndex) -> NodeIndex {
        let Some(variable) = self.arena.referenced_variable(reference) else {
            return reference;
        };
        let Some(name) = self.types.as_variable(variable).map(|v| v.name.as_str()) else {
            return reference;
        };

        let (Some(owner), Some(local)) = (
            root_owner(self.types, variable),
            local_root_owner(self.arena, self.types, position),
        ) else {
            return reference;
        };
        if owner != local {
            trace!(name, "reference owned by another type");
            return reference;
        }

        match self.find_binding(name, position) {
            Some(binding) if binding.is_final && binding.initializer.is_some() => {
                trace!(name, initializer = binding.initializer.0, "resolved local");
                binding.initializer
            }
            _ => reference,
        }
    }

    /// Innermost binding named `name` visible from `position`.
    pub fn find_binding(&self, name: &str, position: NodeIndex) -> Option<Binding> {
        let arena = self.arena;
        let start = (position, arena.parent(position)?);
        let walk = walk_outward(
            start,
            MAX_SCOPE_WALK_DEPTH,
            |(_, current)| arena.parent(current).map(|parent| (current, parent)),
            |(prior, current)| {
                if matches!(arena.data(current), Some(NodeData::CompilationUnit(_))) {
                    return ControlFlow::Break(None);
                }
                match ScopeFrame::classify(arena, current, prior)
                    .and_then(|frame| frame.find(arena, name))
                {
                    Some(binding) => ControlFlow::Break(Some(binding)),
                    None => ControlFlow::Continue(()),
                }
            },
        );
        match walk {
            Walk::Found(binding) => binding,
            Walk::Exhausted => None,
            Walk::LimitReached => {
                warn!(name, "scope walk exceeds depth limit");
                None
            }
        }
    }
}

/// Free-function form of [`LocalVariableResolver::resolve`].
pub fn resolve_local_initializer(
    arena: &NodeArena,
    types: &TypeTable,
    reference: NodeIndex,
    position: NodeIndex,
) -> NodeIndex {
    LocalVariableResolver::new(arena, types).resolve(reference, position)
}

#[cfg(test)]
#[path = "../tests/local_variables_tests.rs"]
mod local_variables_tests;
