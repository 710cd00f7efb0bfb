use super::*;
use jrw_tree::{ClassSpec, MethodSpec, Primitive, TreeBuilder};

#[test]
fn test_nested_class_roots_at_top_level() {
    let mut types = TypeTable::new();
    let outer = types.class("com.example.Outer");
    let inner = types.class_with_owner("com.example.Outer$Inner", Some(outer));
    let method = types.method(inner, "run", None, Vec::new());
    let var = types.variable("x", Some(method), None);
    assert_eq!(root_owner(&types, var), Some(RootOwner::Type(outer)));
    assert_eq!(root_owner(&types, outer), Some(RootOwner::Type(outer)));
}

#[test]
fn test_unowned_variable_and_primitive() {
    let mut types = TypeTable::new();
    let var = types.variable("x", None, None);
    let int = types.primitive(Primitive::Int);
    assert_eq!(root_owner(&types, var), Some(RootOwner::Unowned));
    assert_eq!(root_owner(&types, int), Some(RootOwner::Type(int)));
}

#[test]
fn test_owner_cycle_hits_the_limit() {
    let mut types = TypeTable::new();
    let looped = types.class("Looped");
    if let Some(JavaType::Class(class)) = types.get_mut(looped) {
        class.owning_class = Some(looped);
    }
    assert_eq!(root_owner(&types, looped), None);
}

#[test]
fn test_local_root_owner_follows_enclosing_declaration() {
    let mut b = TreeBuilder::new("A.java");
    let outer = b.class_type("com.example.A");
    let inner = b.nested_class_type("com.example.A$B", outer);
    let method_type = b.method_type(inner, "run", None, Vec::new());
    let probe = b.identifier("probe", None);
    let body = b.block(vec![probe]);
    let method = b.method(MethodSpec {
        name: "run",
        body,
        method_type: Some(method_type),
        ..Default::default()
    });
    let field_probe = b.identifier("field", None);
    let class = b.class(ClassSpec {
        name: "B",
        members: vec![method, field_probe],
        class_type: Some(inner),
        ..Default::default()
    });
    let file = b.finish(None, &[], vec![class]);

    assert_eq!(enclosing_declaration(&file.arena, probe), Some(method));
    assert_eq!(enclosing_declaration(&file.arena, field_probe), Some(class));
    assert_eq!(enclosing_declaration(&file.arena, class), Some(file.root));
    assert_eq!(
        local_root_owner(&file.arena, &file.types, probe),
        Some(RootOwner::Type(outer))
    );
    assert_eq!(
        local_root_owner(&file.arena, &file.types, class),
        Some(RootOwner::Unowned)
    );
}
