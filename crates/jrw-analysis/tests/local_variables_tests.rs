use super::*;
use jrw_tree::node::IdentifierData;
use jrw_tree::{
    ClassSpec, DeclarationSpec, LiteralValue, MethodSpec, Modifier, ModifierKind, Primitive,
    SourceFile, TreeBuilder, VariableSpec, modifiers,
};

fn final_mods() -> Vec<Modifier> {
    modifiers(&[ModifierKind::Final])
}

/// ```java
/// package com.example;
/// class Config {
///     static final String CONST = "c";
///     void run(final String param) {
///         final String a = "x";
///         String mutable = "m";
///         { final String a = "shadow"; a; }
///         a; mutable; later;
///         final String later = "l";
///         CONST; param;
///         for (final int i = 0; ; ) { i; }
///         try (final String r = "r") { r; }
///         (a) -> a;
///         final String first = "f", second = first;
///         a /* owned by Other */; a /* owned by Config$Inner */; a /* unattributed */; ghost;
///     }
/// }
/// ```
struct Scenario {
    file: SourceFile,
    x: NodeIndex,
    shadow: NodeIndex,
    inner_a: NodeIndex,
    inner_ref: NodeIndex,
    a_ref: NodeIndex,
    mutable_ref: NodeIndex,
    later_ref: NodeIndex,
    c: NodeIndex,
    const_ref: NodeIndex,
    param_ref: NodeIndex,
    zero: NodeIndex,
    i_ref: NodeIndex,
    r: NodeIndex,
    r_ref: NodeIndex,
    lambda_ref: NodeIndex,
    f: NodeIndex,
    first_ref: NodeIndex,
    foreign_ref: NodeIndex,
    nested_ref: NodeIndex,
    bare: NodeIndex,
    ghost_ref: NodeIndex,
}

fn scenario() -> Scenario {
    let mut b = TreeBuilder::new("Config.java");
    let config = b.class_type("com.example.Config");
    let string = b.string_type();
    let void = b.primitive(Primitive::Void);
    let int = b.primitive(Primitive::Int);
    let run = b.method_type(config, "run", Some(void), vec![string]);

    let c = b.string_literal("c");
    let constant = b.variable(
        modifiers(&[ModifierKind::Static, ModifierKind::Final]),
        Some(string),
        "CONST",
        Some(config),
        c,
    );
    let param = b.variable(final_mods(), Some(string), "param", Some(run), NodeIndex::NONE);

    let x = b.string_literal("x");
    let a = b.variable(final_mods(), Some(string), "a", Some(run), x);
    let m = b.string_literal("m");
    let mutable = b.variable(Vec::new(), Some(string), "mutable", Some(run), m);

    let shadow = b.string_literal("shadow");
    let inner = b.variable(final_mods(), Some(string), "a", Some(run), shadow);
    let inner_ref = b.variable_ref(inner.variable());
    let inner_block = b.block(vec![inner.node, inner_ref]);

    let a_ref = b.variable_ref(a.variable());
    let mutable_ref = b.variable_ref(mutable.variable());
    let l = b.string_literal("l");
    let later = b.variable(final_mods(), Some(string), "later", Some(run), l);
    let later_ref = b.variable_ref(later.variable());
    let const_ref = b.variable_ref(constant.variable());
    let param_ref = b.variable_ref(param.variable());

    let zero = b.literal(LiteralValue::Int(0));
    let i = b.variable(final_mods(), Some(int), "i", Some(run), zero);
    let i_ref = b.variable_ref(i.variable());
    let loop_body = b.block(vec![i_ref]);
    let for_loop = b.for_loop(vec![i.node], NodeIndex::NONE, Vec::new(), loop_body);

    let r = b.string_literal("r");
    let resource = b.variable(final_mods(), Some(string), "r", Some(run), r);
    let r_ref = b.variable_ref(resource.variable());
    let try_body = b.block(vec![r_ref]);
    let try_stmt = b.try_stmt(vec![resource.node], try_body, NodeIndex::NONE);

    let lambda_param = b.variable(Vec::new(), None, "a", Some(run), NodeIndex::NONE);
    let lambda_ref = b.variable_ref(lambda_param.variable());
    let lambda = b.lambda(vec![lambda_param.node], lambda_ref, None);

    let f = b.string_literal("f");
    let first_var = b.variable_type("first", Some(run), Some(string));
    let first_ref = b.variable_ref(first_var);
    let multi = b.declaration(DeclarationSpec {
        modifiers: final_mods(),
        ty: Some(string),
        variables: vec![
            VariableSpec {
                name: "first",
                owner: Some(run),
                initializer: f,
            },
            VariableSpec {
                name: "second",
                owner: Some(run),
                initializer: first_ref,
            },
        ],
        ..Default::default()
    });

    let other = b.class_type("com.example.Other");
    let other_method = b.method_type(other, "go", Some(void), Vec::new());
    let foreign = b.variable_type("a", Some(other_method), Some(string));
    let foreign_ref = b.variable_ref(foreign);

    let nested = b.nested_class_type("com.example.Config$Inner", config);
    let nested_method = b.method_type(nested, "call", Some(void), Vec::new());
    let nested_var = b.variable_type("a", Some(nested_method), Some(string));
    let nested_ref = b.variable_ref(nested_var);

    let bare = b.identifier("a", Some(string));
    let ghost = b.variable_type("ghost", Some(run), Some(string));
    let ghost_ref = b.variable_ref(ghost);

    let body = b.block(vec![
        a.node,
        mutable.node,
        inner_block,
        a_ref,
        mutable_ref,
        later_ref,
        later.node,
        const_ref,
        param_ref,
        for_loop,
        try_stmt,
        lambda,
        multi.node,
        foreign_ref,
        nested_ref,
        bare,
        ghost_ref,
    ]);
    let method = b.method(MethodSpec {
        return_type: Some(void),
        name: "run",
        parameters: vec![param.node],
        body,
        method_type: Some(run),
        ..Default::default()
    });
    let class = b.class(ClassSpec {
        name: "Config",
        members: vec![constant.node, method],
        class_type: Some(config),
        ..Default::default()
    });
    let file = b.finish(Some("com.example"), &[], vec![class]);

    Scenario {
        file,
        x,
        shadow,
        inner_a: inner.node,
        inner_ref,
        a_ref,
        mutable_ref,
        later_ref,
        c,
        const_ref,
        param_ref,
        zero,
        i_ref,
        r,
        r_ref,
        lambda_ref,
        f,
        first_ref,
        foreign_ref,
        nested_ref,
        bare,
        ghost_ref,
    }
}

fn resolve(s: &Scenario, reference: NodeIndex) -> NodeIndex {
    resolve_local_initializer(&s.file.arena, &s.file.types, reference, reference)
}

#[test]
fn test_final_local_resolves_to_initializer() {
    let s = scenario();
    assert_eq!(resolve(&s, s.a_ref), s.x);
}

#[test]
fn test_inner_block_shadows_outer_binding() {
    let s = scenario();
    assert_eq!(resolve(&s, s.inner_ref), s.shadow);
    let resolver = LocalVariableResolver::new(&s.file.arena, &s.file.types);
    let binding = resolver.find_binding("a", s.inner_ref);
    assert_eq!(binding.map(|b| b.declaration), Some(s.inner_a));
}

#[test]
fn test_mutable_binding_is_unchanged() {
    let s = scenario();
    assert_eq!(resolve(&s, s.mutable_ref), s.mutable_ref);
    let resolver = LocalVariableResolver::new(&s.file.arena, &s.file.types);
    let binding = resolver.find_binding("mutable", s.mutable_ref);
    assert_eq!(binding.map(|b| b.is_final), Some(false));
}

#[test]
fn test_later_declaration_is_not_visible() {
    let s = scenario();
    assert_eq!(resolve(&s, s.later_ref), s.later_ref);
}

#[test]
fn test_type_body_constants_are_visible() {
    let s = scenario();
    assert_eq!(resolve(&s, s.const_ref), s.c);
}

#[test]
fn test_final_parameter_without_initializer_is_unchanged() {
    let s = scenario();
    assert_eq!(resolve(&s, s.param_ref), s.param_ref);
}

#[test]
fn test_loop_and_resource_frames() {
    let s = scenario();
    assert_eq!(resolve(&s, s.i_ref), s.zero);
    assert_eq!(resolve(&s, s.r_ref), s.r);
}

#[test]
fn test_non_final_lambda_parameter_hides_outer_final() {
    let s = scenario();
    assert_eq!(resolve(&s, s.lambda_ref), s.lambda_ref);
}

#[test]
fn test_sibling_in_same_declaration() {
    let s = scenario();
    assert_eq!(resolve(&s, s.first_ref), s.f);
}

#[test]
fn test_reference_owned_by_other_type_is_unchanged() {
    let s = scenario();
    assert_eq!(resolve(&s, s.foreign_ref), s.foreign_ref);
}

#[test]
fn test_nested_type_shares_root_owner() {
    let s = scenario();
    assert_eq!(resolve(&s, s.nested_ref), s.x);
}

#[test]
fn test_unattributed_and_unbound_references_are_unchanged() {
    let s = scenario();
    assert_eq!(resolve(&s, s.bare), s.bare);
    assert_eq!(resolve(&s, s.ghost_ref), s.ghost_ref);
}

#[test]
fn test_position_controls_visibility() {
    let s = scenario();
    // `later` is visible from the statement after its declaration.
    let resolver = LocalVariableResolver::new(&s.file.arena, &s.file.types);
    assert!(resolver.find_binding("later", s.later_ref).is_none());
    assert!(resolver.find_binding("later", s.const_ref).is_some());
}

#[test]
fn test_detached_position_does_not_resolve() {
    let mut s = scenario();
    let field_type = s.file.arena.referenced_variable(s.a_ref);
    let orphan = s.file.arena.add(NodeData::Identifier(IdentifierData {
        simple_name: "a".to_string(),
        ty: None,
        field_type,
    }));
    let resolved = resolve_local_initializer(&s.file.arena, &s.file.types, orphan, orphan);
    assert_eq!(resolved, orphan);
}
