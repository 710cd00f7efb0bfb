//! Recipe errors.

use jrw_tree::EditError;

/// A matcher pattern that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatcherError {
    EmptyPattern,
    /// Annotation patterns are written `@fully.qualified.Name`.
    MissingAnnotationPrefix(String),
    /// Method patterns are written `declaring.Type name(arg.Type, ...)`.
    MalformedMethodPattern(String),
}

impl std::fmt::Display for MatcherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatcherError::EmptyPattern => write!(f, "empty matcher pattern"),
            MatcherError::MissingAnnotationPrefix(pattern) => {
                write!(f, "annotation pattern `{pattern}` must start with `@`")
            }
            MatcherError::MalformedMethodPattern(pattern) => write!(
                f,
                "method pattern `{pattern}` is not of the form `Type name(args)`"
            ),
        }
    }
}

impl std::error::Error for MatcherError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeError {
    /// A required option was empty or absent.
    MissingArgument {
        recipe: &'static str,
        argument: &'static str,
    },
    InvalidPattern(MatcherError),
    /// The edit set computed for a file could not be applied.
    Edit { path: String, source: EditError },
}

impl std::fmt::Display for RecipeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecipeError::MissingArgument { recipe, argument } => {
                write!(f, "{recipe}: missing required argument `{argument}`")
            }
            RecipeError::InvalidPattern(err) => write!(f, "invalid pattern: {err}"),
            RecipeError::Edit { path, source } => write!(f, "{path}: {source}"),
        }
    }
}

impl std::error::Error for RecipeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecipeError::InvalidPattern(err) => Some(err),
            RecipeError::Edit { source, .. } => Some(source),
            RecipeError::MissingArgument { .. } => None,
        }
    }
}

impl From<MatcherError> for RecipeError {
    fn from(err: MatcherError) -> Self {
        RecipeError::InvalidPattern(err)
    }
}
