//! Spring recipes for jrw syntax trees.
//!
//! - `rename_bean`: rename a bean and every qualifier that names it
//! - `bean_methods_not_public`: drop `public` from `@Bean` methods
//! - `migrate_actuator_media_type`: `ActuatorMediaType` to `ApiVersion`
//! - `migrate_multipart_config_factory`: size setters to `DataSize`

pub mod error;
pub use error::{MatcherError, RecipeError};

pub mod matchers;
pub use matchers::{AnnotationMatcher, MethodMatcher};

pub mod recipe;
pub use recipe::{FileChange, Recipe, RecipeRun};

pub mod rename_bean;
pub use rename_bean::{BeanDeclaration, NameSource, NamedSlot, RenameBean, rename_symbol};

pub mod bean_methods_not_public;
pub use bean_methods_not_public::BeanMethodsNotPublic;

pub mod migrate_actuator_media_type;
pub use migrate_actuator_media_type::MigrateActuatorMediaTypeToApiVersion;

pub mod migrate_multipart_config_factory;
pub use migrate_multipart_config_factory::MigrateMultipartConfigFactory;

#[cfg(test)]
pub(crate) mod test_fixtures;
