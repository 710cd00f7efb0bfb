use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;

use jrw_recipes::{
    BeanMethodsNotPublic, MigrateActuatorMediaTypeToApiVersion, MigrateMultipartConfigFactory,
    Recipe, RenameBean,
};

use super::args::{CliArgs, RecipeName};

/// Contents of a `recipes.json` file.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RecipeConfig {
    #[serde(default)]
    pub recipes: Vec<RecipeSpec>,
}

/// One configured recipe, tagged by its `recipe` name.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "recipe", rename_all = "camelCase")]
pub enum RecipeSpec {
    RenameBean {
        #[serde(default, rename = "type")]
        type_filter: Option<String>,
        #[serde(rename = "oldName")]
        old_name: String,
        #[serde(rename = "newName")]
        new_name: String,
    },
    BeanMethodsNotPublic,
    MigrateActuatorMediaTypeToApiVersion,
    MigrateMultipartConfigFactory,
}

impl From<RecipeName> for RecipeSpec {
    fn from(name: RecipeName) -> Self {
        match name {
            RecipeName::BeanMethodsNotPublic => RecipeSpec::BeanMethodsNotPublic,
            RecipeName::MigrateActuatorMediaTypeToApiVersion => {
                RecipeSpec::MigrateActuatorMediaTypeToApiVersion
            }
            RecipeName::MigrateMultipartConfigFactory => RecipeSpec::MigrateMultipartConfigFactory,
        }
    }
}

impl RecipeSpec {
    pub fn build(&self) -> Result<Box<dyn Recipe>> {
        let recipe: Box<dyn Recipe> = match self {
            RecipeSpec::RenameBean {
                type_filter,
                old_name,
                new_name,
            } => Box::new(RenameBean::new(
                type_filter.clone(),
                old_name.as_str(),
                new_name.as_str(),
            )?),
            RecipeSpec::BeanMethodsNotPublic => Box::new(BeanMethodsNotPublic::new()),
            RecipeSpec::MigrateActuatorMediaTypeToApiVersion => {
                Box::new(MigrateActuatorMediaTypeToApiVersion::new()?)
            }
            RecipeSpec::MigrateMultipartConfigFactory => {
                Box::new(MigrateMultipartConfigFactory::new()?)
            }
        };
        Ok(recipe)
    }
}

pub fn parse_config(source: &str) -> Result<RecipeConfig> {
    serde_json::from_str(source).context("failed to parse recipe configuration")
}

pub fn load_config(path: &Path) -> Result<RecipeConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_config(&source).with_context(|| format!("in {}", path.display()))
}

/// The recipe list for a run: configured recipes first, then `--recipe`
/// flags, then the ad-hoc rename.
pub fn resolve_recipes(args: &CliArgs) -> Result<Vec<RecipeSpec>> {
    let mut specs = match &args.config {
        Some(path) => load_config(path)?.recipes,
        None => Vec::new(),
    };
    specs.extend(args.recipes.iter().copied().map(RecipeSpec::from));
    if let Some((type_filter, old_name, new_name)) = args.rename() {
        specs.push(RecipeSpec::RenameBean {
            type_filter: type_filter.map(str::to_string),
            old_name: old_name.to_string(),
            new_name: new_name.to_string(),
        });
    } else if args.type_filter.is_some() {
        bail!("--type requires --old-name and --new-name");
    }
    if specs.is_empty() {
        bail!("no recipes selected; pass --config, --recipe or --old-name/--new-name");
    }
    Ok(specs)
}
