//! `MultipartConfigFactory` size setters to `DataSize`.
//!
//! The `long`/`int` and `String` overloads of the size setters were replaced
//! by a single `DataSize` overload. Numeric arguments become
//! `DataSize.ofBytes(arg)`, strings become `DataSize.parse(arg)`.

use crate::error::RecipeError;
use crate::matchers::MethodMatcher;
use crate::recipe::{Recipe, RecipeRun, edit_files};
use jrw_tree::{EditSet, MethodSignature, NodeIndex, Snippet, SourceFile, TreeEdit};
use tracing::trace;

pub const MULTIPART_CONFIG_FACTORY: &str = "org.springframework.boot.web.servlet.MultipartConfigFactory";
pub const DATA_SIZE: &str = "org.springframework.util.unit.DataSize";

const SETTERS: [(&str, &str); 3] = [
    ("setMaxFileSize", "long"),
    ("setMaxRequestSize", "long"),
    ("setFileSizeThreshold", "int"),
];

/// How an argument is turned into a `DataSize`.
#[derive(Clone, Debug)]
struct Conversion {
    setter: MethodMatcher,
    factory_method: &'static str,
    parameter_type: &'static str,
}

#[derive(Clone, Debug)]
pub struct MigrateMultipartConfigFactory {
    conversions: Vec<Conversion>,
}

impl MigrateMultipartConfigFactory {
    pub const NAME: &'static str = "migrateMultipartConfigFactory";

    pub fn new() -> Result<Self, RecipeError> {
        let mut conversions = Vec::with_capacity(SETTERS.len() * 2);
        for (setter, numeric) in SETTERS {
            conversions.push(Conversion {
                setter: MethodMatcher::new(&format!("{MULTIPART_CONFIG_FACTORY} {setter}({numeric})"))?,
                factory_method: "ofBytes",
                parameter_type: "long",
            });
            conversions.push(Conversion {
                setter: MethodMatcher::new(&format!(
                    "{MULTIPART_CONFIG_FACTORY} {setter}(java.lang.String)"
                ))?,
                factory_method: "parse",
                parameter_type: "java.lang.CharSequence",
            });
        }
        Ok(Self { conversions })
    }

    fn plan(&self, file: &SourceFile) -> EditSet {
        let mut edits = EditSet::new();
        if !file.uses_type(MULTIPART_CONFIG_FACTORY) {
            return edits;
        }
        let (arena, types) = (&file.arena, &file.types);
        for node in arena.descendants(file.root) {
            let Some(conversion) = self
                .conversions
                .iter()
                .find(|conversion| conversion.setter.matches(arena, types, node))
            else {
                continue;
            };
            let Some(call) = arena.get_invocation(node) else {
                continue;
            };
            let [argument] = call.arguments.as_slice() else {
                continue;
            };
            let return_type = call
                .method_type
                .and_then(|ty| types.as_method(ty))
                .and_then(|method| method.return_type)
                .and_then(|ty| types.type_name(ty));
            trace!(
                node = node.0,
                setter = conversion.setter.name(),
                conversion = conversion.factory_method,
                "size setter"
            );
            edits.push(wrap_argument(*argument, conversion));
            edits.push(TreeEdit::RetypeInvocation {
                invocation: node,
                signature: MethodSignature::new(
                    MULTIPART_CONFIG_FACTORY,
                    conversion.setter.name(),
                    return_type,
                    &[DATA_SIZE],
                ),
            });
        }
        edits
    }
}

fn wrap_argument(argument: NodeIndex, conversion: &Conversion) -> TreeEdit {
    TreeEdit::ReplaceExpression {
        target: argument,
        snippet: Snippet::Invocation {
            select: Some(Box::new(Snippet::TypeName(DATA_SIZE.to_string()))),
            signature: MethodSignature::new(
                DATA_SIZE,
                conversion.factory_method,
                Some(DATA_SIZE),
                &[conversion.parameter_type],
            ),
            arguments: vec![Snippet::Existing(argument)],
        },
    }
}

impl Recipe for MigrateMultipartConfigFactory {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn display_name(&self) -> &'static str {
        "Use `DataSize` with `MultipartConfigFactory`"
    }

    fn description(&self) -> &'static str {
        "The size setters of `MultipartConfigFactory` take a `DataSize`."
    }

    fn run(&self, files: &[SourceFile]) -> Result<RecipeRun, RecipeError> {
        edit_files(Self::NAME, files, |_, file| self.plan(file))
    }
}

#[cfg(test)]
#[path = "../tests/migrate_multipart_config_factory_tests.rs"]
mod migrate_multipart_config_factory_tests;
