use super::*;
use crate::builder::{MethodSpec, TreeBuilder};
use crate::node::Modifier;
use crate::printer::print_expression;

struct Fixture {
    file: SourceFile,
    literal: NodeIndex,
    argument: NodeIndex,
    call: NodeIndex,
    method: NodeIndex,
    method_type: TypeId,
}

fn fixture() -> Fixture {
    let mut b = TreeBuilder::new("Factory.java");
    let factory = b.class_type("org.example.Factory");
    let long = b.primitive(Primitive::Long);
    let setter = b.method_type(factory, "setMaxFileSize", None, vec![long]);
    let owner = b.method_type(factory, "configure", None, Vec::new());

    let literal = b.string_literal("old");
    let size = b.variable_type("size", Some(owner), Some(long));
    let argument = b.variable_ref(size);
    let receiver = b.identifier("factory", Some(factory));
    let call = b.invoke(receiver, setter, vec![argument]);
    let body = b.block(vec![call, literal]);
    let method = b.method(MethodSpec {
        modifiers: vec![Modifier::with_comment(ModifierKind::Public, "// keep me")],
        name: "configure",
        body,
        method_type: Some(owner),
        ..Default::default()
    });
    let file = b.finish(None, &[], vec![method]);
    Fixture {
        file,
        literal,
        argument,
        call,
        method,
        method_type: owner,
    }
}

#[test]
fn test_set_literal_leaves_input_untouched() {
    let fx = fixture();
    let mut edits = EditSet::new();
    edits.push(TreeEdit::SetLiteral {
        literal: fx.literal,
        value: LiteralValue::String("new".into()),
    });
    let edited = edits.apply(&fx.file).unwrap();
    assert_eq!(edited.arena.get_string_literal(fx.literal), Some("new"));
    assert_eq!(fx.file.arena.get_string_literal(fx.literal), Some("old"));
}

#[test]
fn test_duplicate_edits_collapse() {
    let fx = fixture();
    let mut edits = EditSet::new();
    let edit = TreeEdit::SetLiteral {
        literal: fx.literal,
        value: LiteralValue::String("new".into()),
    };
    edits.push(edit.clone());
    edits.push(edit);
    assert_eq!(edits.len(), 1);
    assert!(edits.apply(&fx.file).is_ok());
}

#[test]
fn test_conflicting_edits_apply_nothing() {
    let fx = fixture();
    let mut edits = EditSet::new();
    edits.push(TreeEdit::SetLiteral {
        literal: fx.literal,
        value: LiteralValue::String("a".into()),
    });
    edits.push(TreeEdit::SetLiteral {
        literal: fx.literal,
        value: LiteralValue::String("b".into()),
    });
    assert_eq!(edits.apply(&fx.file).unwrap_err(), EditError::Conflict(fx.literal));
}

#[test]
fn test_wrong_target_kind_is_rejected() {
    let fx = fixture();
    let mut edits = EditSet::new();
    edits.push(TreeEdit::RenameIdentifier {
        identifier: fx.literal,
        name: "x".into(),
    });
    match edits.apply(&fx.file) {
        Err(EditError::UnexpectedKind { node, .. }) => assert_eq!(node, fx.literal),
        other => panic!("expected UnexpectedKind, got {other:?}"),
    }
}

#[test]
fn test_replacing_the_root_is_detached() {
    let fx = fixture();
    let mut edits = EditSet::new();
    edits.push(TreeEdit::ReplaceExpression {
        target: fx.file.root,
        snippet: Snippet::StringLiteral("x".into()),
    });
    assert_eq!(edits.apply(&fx.file).unwrap_err(), EditError::Detached(fx.file.root));
}

#[test]
fn test_wrap_argument_in_invocation() {
    let fx = fixture();
    let data_size = "org.springframework.util.unit.DataSize";
    let mut edits = EditSet::new();
    edits.push(TreeEdit::ReplaceExpression {
        target: fx.argument,
        snippet: Snippet::Invocation {
            select: Some(Box::new(Snippet::TypeName(data_size.into()))),
            signature: MethodSignature::new(data_size, "ofBytes", Some(data_size), &["long"]),
            arguments: vec![Snippet::Existing(fx.argument)],
        },
    });
    edits.push(TreeEdit::RetypeInvocation {
        invocation: fx.call,
        signature: MethodSignature::new("org.example.Factory", "setMaxFileSize", None, &[data_size]),
    });
    let edited = edits.apply(&fx.file).unwrap();

    assert_eq!(
        print_expression(&edited.arena, fx.call),
        "factory.setMaxFileSize(DataSize.ofBytes(size))"
    );
    let wrapper = edited.arena.parent(fx.argument);
    assert_eq!(wrapper.and_then(|w| edited.arena.parent(w)), Some(fx.call));

    let retyped = edited
        .arena
        .get_invocation(fx.call)
        .and_then(|c| c.method_type)
        .and_then(|t| edited.types.as_method(t));
    let param = retyped.map(|m| m.parameter_types[0]);
    assert_eq!(param.and_then(|p| edited.types.type_name(p)), Some(data_size));
}

#[test]
fn test_remove_modifier_keeps_comments() {
    let fx = fixture();
    let mut edits = EditSet::new();
    edits.push(TreeEdit::RemoveModifier {
        declaration: fx.method,
        modifier: ModifierKind::Public,
    });
    let edited = edits.apply(&fx.file).unwrap();
    let method = edited.arena.get_method(fx.method).cloned();
    let method = method.as_ref();
    assert_eq!(method.map(|m| m.modifiers.is_empty()), Some(true));
    assert_eq!(
        method.map(|m| m.comments.clone()),
        Some(vec!["// keep me".to_string()])
    );
}

#[test]
fn test_rename_types() {
    let fx = fixture();
    let mut edits = EditSet::new();
    edits.push(TreeEdit::RenameClassType {
        from: "org.example.Factory".into(),
        to: "org.example.Builder".into(),
    });
    edits.push(TreeEdit::RenameMethodType {
        method_type: fx.method_type,
        name: "setup".into(),
    });
    let edited = edits.apply(&fx.file).unwrap();
    assert!(edited.uses_type("org.example.Builder"));
    assert!(!edited.uses_type("org.example.Factory"));
    assert_eq!(
        edited.types.as_method(fx.method_type).map(|m| m.name.as_str()),
        Some("setup")
    );
}

#[test]
fn test_missing_method_type() {
    let fx = fixture();
    let mut edits = EditSet::new();
    edits.push(TreeEdit::RenameMethodType {
        method_type: TypeId(9999),
        name: "x".into(),
    });
    assert_eq!(edits.apply(&fx.file).unwrap_err(), EditError::MissingType(TypeId(9999)));
}

#[test]
fn test_rename_class_onto_existing_class_is_rejected() {
    let fx = fixture();
    let mut file = fx.file.clone();
    file.types.class("org.example.Builder");
    let mut edits = EditSet::new();
    edits.push(TreeEdit::RenameClassType {
        from: "org.example.Factory".into(),
        to: "org.example.Builder".into(),
    });
    assert_eq!(
        edits.apply(&file).unwrap_err(),
        EditError::TypeNameTaken("org.example.Builder".to_string())
    );
}
