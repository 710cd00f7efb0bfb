use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the jrw binary.
#[derive(Parser, Debug)]
#[command(
    name = "jrw",
    version,
    about = "Scope-aware rename and migration recipes for typed Java syntax trees"
)]
pub struct CliArgs {
    /// Tree files (`*.json`) or directories searched recursively for them.
    pub paths: Vec<PathBuf>,

    /// Recipe configuration file.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Run a recipe that takes no options. May be repeated.
    #[arg(short = 'r', long = "recipe", value_enum)]
    pub recipes: Vec<RecipeName>,

    // ==================== Ad-hoc bean rename ====================
    /// Only rename beans of this fully qualified type.
    #[arg(long = "type")]
    pub type_filter: Option<String>,

    /// Bean name to rename.
    #[arg(long = "old-name", alias = "oldName", requires = "new_name")]
    pub old_name: Option<String>,

    /// Replacement bean name.
    #[arg(long = "new-name", alias = "newName", requires = "old_name")]
    pub new_name: Option<String>,

    // ==================== Output ====================
    /// Write changed trees under this directory instead of in place.
    #[arg(short = 'o', long = "out-dir", alias = "outDir")]
    pub out_dir: Option<PathBuf>,

    /// Print the rendered source of every changed file.
    #[arg(long)]
    pub print: bool,

    /// Report changes without writing anything.
    #[arg(long = "dry-run", alias = "dryRun")]
    pub dry_run: bool,
}

/// Recipes selectable with `--recipe`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RecipeName {
    #[value(name = "beanMethodsNotPublic")]
    BeanMethodsNotPublic,
    #[value(name = "migrateActuatorMediaTypeToApiVersion")]
    MigrateActuatorMediaTypeToApiVersion,
    #[value(name = "migrateMultipartConfigFactory")]
    MigrateMultipartConfigFactory,
}

impl CliArgs {
    /// The ad-hoc rename requested on the command line, if any.
    pub fn rename(&self) -> Option<(Option<&str>, &str, &str)> {
        match (&self.old_name, &self.new_name) {
            (Some(old), Some(new)) => Some((self.type_filter.as_deref(), old, new)),
            _ => None,
        }
    }
}
