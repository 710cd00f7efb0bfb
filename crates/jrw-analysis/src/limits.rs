//! Bounds for the upward walks.
//!
//! Well-formed trees never come close to these. They exist so a malformed
//! tree (a parent cycle, a self-owning type) degrades to "unresolved"
//! instead of hanging.

/// Maximum number of enclosing nodes visited by one scope or
/// enclosing-declaration walk.
pub const MAX_SCOPE_WALK_DEPTH: u32 = 10_000;

/// Maximum number of owner links followed from a variable, method or class
/// type to its top-level class.
pub const MAX_OWNER_CHAIN_DEPTH: u32 = 256;
