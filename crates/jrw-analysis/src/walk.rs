//! The upward walk shared by every analysis in this crate.
//!
//! Owner chains, enclosing-declaration lookup and the lexical scope walk are
//! all "start somewhere, step to the enclosing thing, stop when a visitor
//! says so". [`walk_outward`] is that loop, with the depth bound applied in
//! one place.

use std::ops::ControlFlow;

/// How an outward walk ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Walk<B> {
    /// The visitor stopped the walk with a value.
    Found(B),
    /// There was nothing further out.
    Exhausted,
    /// The depth bound was hit before either of the above.
    LimitReached,
}

impl<B> Walk<B> {
    pub fn found(self) -> Option<B> {
        match self {
            Walk::Found(value) => Some(value),
            Walk::Exhausted | Walk::LimitReached => None,
        }
    }
}

/// Visit `start`, then each successive `enclosing` step, until `visit`
/// breaks, `enclosing` returns `None`, or `limit` steps have been visited.
pub fn walk_outward<S, B>(
    start: S,
    limit: u32,
    enclosing: impl Fn(S) -> Option<S>,
    mut visit: impl FnMut(S) -> ControlFlow<B>,
) -> Walk<B>
where
    S: Copy,
{
    let mut current = start;
    let mut steps = 0;
    loop {
        steps += 1;
        if steps > limit {
            return Walk::LimitReached;
        }
        if let ControlFlow::Break(value) = visit(current) {
            return Walk::Found(value);
        }
        match enclosing(current) {
            Some(next) => current = next,
            None => return Walk::Exhausted,
        }
    }
}

#[cfg(test)]
#[path = "../tests/walk_tests.rs"]
mod walk_tests;
