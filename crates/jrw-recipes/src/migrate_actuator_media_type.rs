//! `ActuatorMediaType` constants to `ApiVersion`.
//!
//! Rewrites `MediaType.parseMediaType(ActuatorMediaType.V2_JSON)` into
//! `MediaType.asMediaType(ApiVersion.V2.getProducedMimeType())`, and the
//! same for `V3_JSON`. The argument may also be a `final` local holding the
//! constant.

use crate::error::RecipeError;
use crate::matchers::MethodMatcher;
use crate::recipe::{Recipe, RecipeRun, edit_files};
use jrw_analysis::resolve_local_initializer;
use jrw_tree::{
    EditSet, MethodSignature, NodeArena, NodeData, NodeIndex, Snippet, SourceFile, TreeEdit,
    TypeTable, is_of_type,
};
use tracing::trace;

pub const ACTUATOR_MEDIA_TYPE: &str = "org.springframework.boot.actuate.endpoint.http.ActuatorMediaType";
pub const API_VERSION: &str = "org.springframework.boot.actuate.endpoint.ApiVersion";
const MEDIA_TYPE: &str = "org.springframework.http.MediaType";
const MIME_TYPE: &str = "org.springframework.util.MimeType";

const PARSE_MEDIA_TYPE: &str = "org.springframework.http.MediaType parseMediaType(java.lang.String)";

/// `ActuatorMediaType` constant to `ApiVersion` constant.
const VERSIONS: [(&str, &str); 2] = [("V2_JSON", "V2"), ("V3_JSON", "V3")];

#[derive(Clone, Debug)]
pub struct MigrateActuatorMediaTypeToApiVersion {
    parse_media_type: MethodMatcher,
}

impl MigrateActuatorMediaTypeToApiVersion {
    pub const NAME: &'static str = "migrateActuatorMediaTypeToApiVersion";

    pub fn new() -> Result<Self, RecipeError> {
        Ok(Self {
            parse_media_type: MethodMatcher::new(PARSE_MEDIA_TYPE)?,
        })
    }

    fn plan(&self, file: &SourceFile) -> EditSet {
        let mut edits = EditSet::new();
        if !file.uses_type(ACTUATOR_MEDIA_TYPE) {
            return edits;
        }
        let (arena, types) = (&file.arena, &file.types);
        for node in arena.descendants(file.root) {
            if !self.parse_media_type.matches(arena, types, node) {
                continue;
            }
            let Some(call) = arena.get_invocation(node) else {
                continue;
            };
            let [argument] = call.arguments.as_slice() else {
                continue;
            };
            let Some(version) = api_version(arena, types, *argument) else {
                continue;
            };
            trace!(node = node.0, version, "parseMediaType on actuator constant");

            let select = if call.select.is_some() {
                Snippet::Existing(call.select)
            } else {
                Snippet::TypeName(MEDIA_TYPE.to_string())
            };
            let produced = Snippet::Invocation {
                select: Some(Box::new(Snippet::StaticField {
                    target: Box::new(Snippet::TypeName(API_VERSION.to_string())),
                    owner: API_VERSION.to_string(),
                    name: version.to_string(),
                    field_type: Some(API_VERSION.to_string()),
                })),
                signature: MethodSignature::new(API_VERSION, "getProducedMimeType", Some(MIME_TYPE), &[]),
                arguments: Vec::new(),
            };
            edits.push(TreeEdit::ReplaceExpression {
                target: node,
                snippet: Snippet::Invocation {
                    select: Some(Box::new(select)),
                    signature: MethodSignature::new(MEDIA_TYPE, "asMediaType", Some(MEDIA_TYPE), &[MIME_TYPE]),
                    arguments: vec![produced],
                },
            });
        }
        edits
    }
}

/// The `ApiVersion` constant matching the actuator constant `argument`
/// stands for.
fn api_version(arena: &NodeArena, types: &TypeTable, argument: NodeIndex) -> Option<&'static str> {
    actuator_constant(arena, types, argument).or_else(|| {
        let resolved = resolve_local_initializer(arena, types, argument, argument);
        if resolved == argument {
            None
        } else {
            actuator_constant(arena, types, resolved)
        }
    })
}

fn actuator_constant(arena: &NodeArena, types: &TypeTable, node: NodeIndex) -> Option<&'static str> {
    let NodeData::FieldAccess(access) = arena.data(node)? else {
        return None;
    };
    let target_type = arena.expression_type(access.target, types);
    if !is_of_type(types, target_type, ACTUATOR_MEDIA_TYPE) {
        return None;
    }
    let name = arena.get_identifier_text(access.name)?;
    VERSIONS
        .iter()
        .find(|(constant, _)| *constant == name)
        .map(|(_, version)| *version)
}

impl Recipe for MigrateActuatorMediaTypeToApiVersion {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn display_name(&self) -> &'static str {
        "Migrate `ActuatorMediaType` to `ApiVersion`"
    }

    fn description(&self) -> &'static str {
        "`ActuatorMediaType` was deprecated in favor of `ApiVersion#getProducedMimeType()`."
    }

    fn run(&self, files: &[SourceFile]) -> Result<RecipeRun, RecipeError> {
        edit_files(Self::NAME, files, |_, file| self.plan(file))
    }
}

#[cfg(test)]
#[path = "../tests/migrate_actuator_media_type_tests.rs"]
mod migrate_actuator_media_type_tests;
