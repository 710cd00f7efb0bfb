use crate::error::RecipeError;
use crate::matchers::AnnotationMatcher;
use crate::recipe::{Recipe, RecipeRun, edit_files};
use crate::rename_bean::BEAN;
use jrw_tree::{EditSet, ModifierKind, NodeData, SourceFile, TreeEdit, has_modifier};

/// Drops `public` from `@Bean` methods. Comments written before the keyword
/// are kept on the method.
#[derive(Clone, Debug)]
pub struct BeanMethodsNotPublic {
    bean: AnnotationMatcher,
}

impl BeanMethodsNotPublic {
    pub const NAME: &'static str = "beanMethodsNotPublic";

    pub fn new() -> Self {
        Self {
            bean: AnnotationMatcher::for_type(BEAN),
        }
    }

    fn plan(&self, file: &SourceFile) -> EditSet {
        let mut edits = EditSet::new();
        for node in file.arena.descendants(file.root) {
            let Some(NodeData::MethodDeclaration(method)) = file.arena.data(node) else {
                continue;
            };
            if has_modifier(&method.modifiers, ModifierKind::Public)
                && self
                    .bean
                    .find(&file.arena, &file.types, &method.annotations)
                    .is_some()
            {
                edits.push(TreeEdit::RemoveModifier {
                    declaration: node,
                    modifier: ModifierKind::Public,
                });
            }
        }
        edits
    }
}

impl Default for BeanMethodsNotPublic {
    fn default() -> Self {
        Self::new()
    }
}

impl Recipe for BeanMethodsNotPublic {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn display_name(&self) -> &'static str {
        "Remove `public` from `@Bean` methods"
    }

    fn description(&self) -> &'static str {
        "Bean factory methods are not required to be public."
    }

    fn run(&self, files: &[SourceFile]) -> Result<RecipeRun, RecipeError> {
        edit_files(Self::NAME, files, |_, file| self.plan(file))
    }
}

#[cfg(test)]
#[path = "../tests/bean_methods_not_public_tests.rs"]
mod bean_methods_not_public_tests;
