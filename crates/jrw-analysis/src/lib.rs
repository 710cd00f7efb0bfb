//! Scope analysis for jrw syntax trees.
//!
//! - `walk`: the bounded outward walk everything here is built on
//! - `owner`: owner chains and the enclosing declaration of a position
//! - `scope`: lexical scope frames and their bindings
//! - `local_variables`: resolving a name to a `final` local's initializer

pub mod limits;
pub mod walk;
pub use walk::{Walk, walk_outward};

pub mod owner;
pub use owner::{RootOwner, enclosing_declaration, local_root_owner, root_owner};

pub mod scope;
pub use scope::{Binding, ScopeFrame};

pub mod local_variables;
pub use local_variables::{LocalVariableResolver, resolve_local_initializer};
