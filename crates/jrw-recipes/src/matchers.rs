//! Annotation and method matchers.
//!
//! Both compare attributed types, never spelled names: `@Bean` written with
//! an import and `@org.springframework.context.annotation.Bean` match alike,
//! and an annotation that merely shares the simple name does not.

use crate::error::MatcherError;
use jrw_tree::{NodeArena, NodeIndex, TypeId, TypeTable, annotation_type_name};

/// Matches annotations of one type, from a pattern like `@org.example.Bean`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotationMatcher {
    fully_qualified_name: String,
}

impl AnnotationMatcher {
    pub fn new(pattern: &str) -> Result<Self, MatcherError> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(MatcherError::EmptyPattern);
        }
        match pattern.strip_prefix('@') {
            Some(name) if !name.is_empty() => Ok(Self {
                fully_qualified_name: name.to_string(),
            }),
            _ => Err(MatcherError::MissingAnnotationPrefix(pattern.to_string())),
        }
    }

    /// Matcher for a type name without the `@` prefix.
    pub fn for_type(fully_qualified_name: &str) -> Self {
        Self {
            fully_qualified_name: fully_qualified_name.to_string(),
        }
    }

    pub fn fully_qualified_name(&self) -> &str {
        &self.fully_qualified_name
    }

    pub fn matches(&self, arena: &NodeArena, types: &TypeTable, annotation: NodeIndex) -> bool {
        annotation_type_name(arena, types, annotation)
            .is_some_and(|name| name == self.fully_qualified_name)
    }

    /// First annotation in `annotations` this matcher accepts.
    pub fn find(
        &self,
        arena: &NodeArena,
        types: &TypeTable,
        annotations: &[NodeIndex],
    ) -> Option<NodeIndex> {
        annotations
            .iter()
            .copied()
            .find(|&annotation| self.matches(arena, types, annotation))
    }
}

/// Matches method types, from a pattern like
/// `org.springframework.http.MediaType parseMediaType(java.lang.String)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodMatcher {
    declaring_type: String,
    name: String,
    parameter_types: Vec<String>,
}

impl MethodMatcher {
    pub fn new(pattern: &str) -> Result<Self, MatcherError> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(MatcherError::EmptyPattern);
        }
        let malformed = || MatcherError::MalformedMethodPattern(pattern.to_string());

        let (declaring_type, signature) = pattern.split_once(char::is_whitespace).ok_or_else(malformed)?;
        let signature = signature.trim();
        let (name, rest) = signature.split_once('(').ok_or_else(malformed)?;
        let arguments = rest.strip_suffix(')').ok_or_else(malformed)?;
        let name = name.trim();
        if name.is_empty() || declaring_type.is_empty() {
            return Err(malformed());
        }

        let parameter_types = if arguments.trim().is_empty() {
            Vec::new()
        } else {
            arguments
                .split(',')
                .map(|arg| {
                    let arg = arg.trim();
                    if arg.is_empty() {
                        Err(malformed())
                    } else {
                        Ok(arg.to_string())
                    }
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(Self {
            declaring_type: declaring_type.to_string(),
            name: name.to_string(),
            parameter_types,
        })
    }

    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matches_type(&self, types: &TypeTable, method_type: TypeId) -> bool {
        let Some(method) = types.as_method(method_type) else {
            return false;
        };
        method.name == self.name
            && types.type_name(method.declaring_type) == Some(self.declaring_type.as_str())
            && method.parameter_types.len() == self.parameter_types.len()
            && method
                .parameter_types
                .iter()
                .zip(&self.parameter_types)
                .all(|(&actual, expected)| types.type_name(actual) == Some(expected.as_str()))
    }

    /// Whether `invocation` calls a method this matcher accepts.
    pub fn matches(&self, arena: &NodeArena, types: &TypeTable, invocation: NodeIndex) -> bool {
        arena
            .get_invocation(invocation)
            .and_then(|call| call.method_type)
            .is_some_and(|method_type| self.matches_type(types, method_type))
    }
}

#[cfg(test)]
#[path = "../tests/matchers_tests.rs"]
mod matchers_tests;
