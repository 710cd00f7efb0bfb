use super::*;
use crate::test_fixtures::{MY_TYPE, config_file};
use jrw_tree::{LiteralValue, NodeData, NodeIndex, TreeEdit};

fn first_string_literal(file: &SourceFile) -> NodeIndex {
    file.arena
        .descendants(file.root)
        .into_iter()
        .find(|&node| file.arena.get_string_literal(node).is_some())
        .expect("fixture has a string literal")
}

fn named_config(value: &str) -> SourceFile {
    config_file(|c| {
        let bean = c.annotation(crate::rename_bean::BEAN, value);
        c.bean_method(vec![bean], MY_TYPE, "myType");
    })
}

fn set_literal(literal: NodeIndex, value: &str) -> TreeEdit {
    TreeEdit::SetLiteral {
        literal,
        value: LiteralValue::String(value.to_string()),
    }
}

#[test]
fn test_edit_files_reports_changed_files_only() {
    let mut untouched = named_config("a");
    untouched.path = "sample/Untouched.java".to_string();
    let changed = named_config("b");
    let files = [untouched, changed];

    let run = edit_files("test", &files, |idx, file| {
        let mut edits = EditSet::new();
        if idx == 1 {
            edits.push(set_literal(first_string_literal(file), "c"));
        }
        edits
    })
    .expect("edits apply");

    assert_eq!(run.recipe, "test");
    assert_eq!(run.changes.len(), 1);
    assert!(run.changed("sample/Untouched.java").is_none());
    let after = run.changed(&files[1].path).expect("changed");
    assert_eq!(after.arena.get_string_literal(first_string_literal(after)), Some("c"));
}

#[test]
fn test_conflicting_edits_abort_the_run() {
    let files = [named_config("a")];
    let result = edit_files("test", &files, |_, file| {
        let literal = first_string_literal(file);
        let mut edits = EditSet::new();
        edits.push(set_literal(literal, "x"));
        edits.push(set_literal(literal, "y"));
        edits
    });
    match result {
        Err(RecipeError::Edit { path, source }) => {
            assert_eq!(path, files[0].path);
            assert!(matches!(source, jrw_tree::EditError::Conflict(_)));
        }
        other => panic!("expected an edit error, got {other:?}"),
    }
    // The input is never modified.
    assert_eq!(
        files[0].arena.get_string_literal(first_string_literal(&files[0])),
        Some("a")
    );
}

#[test]
fn test_merge_into_replaces_changed_files() {
    let mut batch = vec![named_config("a")];
    let run = edit_files("test", &batch, |_, file| {
        let mut edits = EditSet::new();
        edits.push(set_literal(first_string_literal(file), "merged"));
        edits
    })
    .expect("edits apply");
    run.merge_into(&mut batch);

    let literal = first_string_literal(&batch[0]);
    assert!(matches!(
        batch[0].arena.data(literal),
        Some(NodeData::Literal(lit)) if lit.value == LiteralValue::String("merged".into())
    ));
}

#[test]
fn test_merge_into_matches_files_by_position() {
    let mut untouched = named_config("a");
    let changed = named_config("b");
    untouched.path = changed.path.clone();
    let mut batch = vec![untouched, changed];

    let run = edit_files("test", &batch, |idx, file| {
        let mut edits = EditSet::new();
        if idx == 1 {
            edits.push(set_literal(first_string_literal(file), "c"));
        }
        edits
    })
    .expect("edits apply");
    assert_eq!(run.changes[0].index, 1);
    run.merge_into(&mut batch);

    assert_eq!(batch[0].arena.get_string_literal(first_string_literal(&batch[0])), Some("a"));
    assert_eq!(batch[1].arena.get_string_literal(first_string_literal(&batch[1])), Some("c"));
}
