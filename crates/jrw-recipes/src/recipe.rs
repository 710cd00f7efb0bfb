//! The recipe abstraction and run results.

use crate::error::RecipeError;
use jrw_tree::{EditSet, SourceFile};
use rayon::prelude::*;
use tracing::{debug, info_span};

/// A source-to-source transformation over a batch of files.
///
/// `run` never mutates its input. Each changed file is reported with the
/// edits computed for it and the rewritten tree.
pub trait Recipe: Send + Sync {
    /// Stable identifier, used in configuration files.
    fn name(&self) -> &'static str;

    fn display_name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn run(&self, files: &[SourceFile]) -> Result<RecipeRun, RecipeError>;
}

/// One rewritten file.
#[derive(Clone, Debug)]
pub struct FileChange {
    /// Position of the file in the batch the recipe ran over.
    pub index: usize,
    pub path: String,
    pub edits: EditSet,
    pub after: SourceFile,
}

/// Outcome of running one recipe over a batch.
#[derive(Clone, Debug)]
pub struct RecipeRun {
    pub recipe: &'static str,
    /// Changed files, in batch order.
    pub changes: Vec<FileChange>,
}

impl RecipeRun {
    pub fn new(recipe: &'static str) -> Self {
        Self {
            recipe,
            changes: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// The rewritten tree for `path`, if the recipe changed it.
    pub fn changed(&self, path: &str) -> Option<&SourceFile> {
        self.changes
            .iter()
            .find(|change| change.path == path)
            .map(|change| &change.after)
    }

    /// Replace the files of `batch` this run rewrote.
    ///
    /// `batch` must be the batch the run was computed from; changes are
    /// matched by position, so files sharing a path stay distinct.
    pub fn merge_into(self, batch: &mut [SourceFile]) {
        for change in self.changes {
            if let Some(slot) = batch.get_mut(change.index) {
                *slot = change.after;
            }
        }
    }
}

/// Compute and apply an edit set for every file of `files` in parallel.
///
/// `plan` receives each file with its position in the batch. Files for which
/// it returns an empty set are not reported. The first edit set that fails
/// to apply aborts the run.
pub(crate) fn edit_files<F>(
    recipe: &'static str,
    files: &[SourceFile],
    plan: F,
) -> Result<RecipeRun, RecipeError>
where
    F: Fn(usize, &SourceFile) -> EditSet + Sync,
{
    let _span = info_span!("recipe", recipe, files = files.len()).entered();

    let changes = files
        .par_iter()
        .enumerate()
        .map(|(idx, file)| -> Result<Option<FileChange>, RecipeError> {
            let edits = plan(idx, file);
            if edits.is_empty() {
                return Ok(None);
            }
            debug!(recipe, path = %file.path, edits = edits.len(), "planned edits");
            let after = edits.apply(file).map_err(|source| RecipeError::Edit {
                path: file.path.clone(),
                source,
            })?;
            Ok(Some(FileChange {
                index: idx,
                path: file.path.clone(),
                edits,
                after,
            }))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RecipeRun {
        recipe,
        changes: changes.into_iter().flatten().collect(),
    })
}

#[cfg(test)]
#[path = "../tests/recipe_tests.rs"]
mod recipe_tests;
