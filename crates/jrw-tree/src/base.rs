//! Shared base types for tree storage.

use serde::{Deserialize, Serialize};

/// Index of a node in a [`NodeArena`](crate::NodeArena).
///
/// `NodeIndex::NONE` marks an absent child (no initializer, no body, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != u32::MAX
    }

    /// Returns `None` for `NodeIndex::NONE`.
    #[inline]
    pub const fn into_option(self) -> Option<NodeIndex> {
        if self.is_none() { None } else { Some(self) }
    }
}

impl Default for NodeIndex {
    fn default() -> Self {
        NodeIndex::NONE
    }
}

/// Ordered list of child nodes.
pub type NodeList = Vec<NodeIndex>;

/// Index of a type in a [`TypeTable`](crate::TypeTable).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub u32);
