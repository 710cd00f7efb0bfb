//! Batch driver: load trees, run recipes in order, write the results.

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span};
use walkdir::WalkDir;

use jrw_recipes::Recipe;
use jrw_tree::{SourceFile, print_source};

use super::args::CliArgs;
use super::config::resolve_recipes;

/// A tree file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeInput {
    pub path: PathBuf,
    /// `path` relative to the argument it was found under.
    pub relative: PathBuf,
}

/// A file some recipe changed.
#[derive(Debug, Clone)]
pub struct ChangedFile {
    /// Source path recorded in the tree.
    pub source_path: String,
    pub tree_path: PathBuf,
    /// Recipes that changed it, in run order.
    pub recipes: Vec<&'static str>,
    /// Where the rewritten tree was written, unless `--dry-run`.
    pub written: Option<PathBuf>,
    /// Rendered Java source, with `--print`.
    pub rendered: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RunResult {
    pub files_read: usize,
    pub recipes: Vec<&'static str>,
    pub changed: Vec<ChangedFile>,
}

/// Collect `*.json` trees from files and directories, in a stable order.
pub fn discover_trees(paths: &[PathBuf]) -> Result<Vec<TreeInput>> {
    let mut inputs = Vec::new();
    for root in paths {
        if root.is_file() {
            let relative = root
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| root.clone());
            inputs.push(TreeInput {
                path: root.clone(),
                relative,
            });
            continue;
        }
        if !root.is_dir() {
            bail!("{} does not exist", root.display());
        }
        let mut found = Vec::new();
        for entry in WalkDir::new(root).follow_links(true) {
            let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
            found.push(TreeInput {
                path: path.to_path_buf(),
                relative,
            });
        }
        found.sort_by(|a, b| a.path.cmp(&b.path));
        inputs.extend(found);
    }
    Ok(inputs)
}

fn load_tree(path: &Path) -> Result<SourceFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    SourceFile::from_json(&text).with_context(|| format!("failed to parse tree {}", path.display()))
}

pub fn load_trees(inputs: &[TreeInput]) -> Result<Vec<SourceFile>> {
    inputs.par_iter().map(|input| load_tree(&input.path)).collect()
}

/// Run `recipes` one after another, each seeing the previous one's output.
///
/// Returns, per file of `batch`, the names of the recipes that changed it.
pub fn apply_recipes(
    recipes: &[Box<dyn Recipe>],
    batch: &mut [SourceFile],
) -> Result<Vec<Vec<&'static str>>> {
    let mut changed_by = vec![Vec::new(); batch.len()];
    for recipe in recipes {
        let _span = info_span!("apply", recipe = recipe.name()).entered();
        let run = recipe
            .run(batch)
            .with_context(|| format!("recipe `{}` failed", recipe.name()))?;
        for change in &run.changes {
            if let Some(recipes) = changed_by.get_mut(change.index) {
                recipes.push(run.recipe);
            }
        }
        debug!(changes = run.changes.len(), "recipe finished");
        run.merge_into(batch);
    }
    Ok(changed_by)
}

fn write_tree(file: &SourceFile, destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = file
        .to_json()
        .with_context(|| format!("failed to serialize {}", file.path))?;
    std::fs::write(destination, json)
        .with_context(|| format!("failed to write {}", destination.display()))
}

pub fn run(args: &CliArgs) -> Result<RunResult> {
    let _span = info_span!("run").entered();

    let specs = resolve_recipes(args)?;
    let recipes = specs
        .iter()
        .map(|spec| spec.build())
        .collect::<Result<Vec<_>>>()?;

    let inputs = discover_trees(&args.paths)?;
    if inputs.is_empty() {
        bail!("no tree files found");
    }
    let mut batch = load_trees(&inputs)?;
    info!(files = batch.len(), recipes = recipes.len(), "loaded trees");

    let changed_by = apply_recipes(&recipes, &mut batch)?;

    let mut result = RunResult {
        files_read: batch.len(),
        recipes: recipes.iter().map(|recipe| recipe.name()).collect(),
        changed: Vec::new(),
    };
    for ((file, input), recipes) in batch.iter().zip(&inputs).zip(changed_by) {
        if recipes.is_empty() {
            continue;
        }
        let written = if args.dry_run {
            None
        } else {
            let destination = match &args.out_dir {
                Some(out_dir) => out_dir.join(&input.relative),
                None => input.path.clone(),
            };
            write_tree(file, &destination)?;
            Some(destination)
        };
        result.changed.push(ChangedFile {
            source_path: file.path.clone(),
            tree_path: input.path.clone(),
            recipes,
            written,
            rendered: args.print.then(|| print_source(file)),
        });
    }
    info!(changed = result.changed.len(), "run finished");
    Ok(result)
}
