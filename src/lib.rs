//! jrw: scope-aware rename and migration recipes for typed Java syntax trees.
//!
//! The engine lives in the workspace crates:
//! - `jrw-tree`: arena AST, type table, edits, printer
//! - `jrw-analysis`: owner chains, lexical scopes, local initializer resolution
//! - `jrw-recipes`: the Spring recipes
//!
//! This package adds the command-line host.

pub use jrw_analysis as analysis;
pub use jrw_recipes as recipes;
pub use jrw_tree as tree;

pub mod cli;
pub mod tracing_config;
