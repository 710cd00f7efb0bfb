use super::*;
use crate::test_fixtures::{ClassFixture, sample_source};
use jrw_tree::{LiteralValue, MethodSpec, Primitive, print_source};

/// ```java
/// class Uploads {
///     void configure(<Factory> factory) {
///         factory.setMaxFileSize(1024L);
///         factory.setMaxRequestSize("10MB");
///         factory.setFileSizeThreshold(512);
///         factory.setLocation("/tmp");
///     }
/// }
/// ```
fn uploads(factory_type: &str) -> (SourceFile, Vec<NodeIndex>) {
    let mut fx = ClassFixture::new("Uploads");
    let factory = fx.b.class_type(factory_type);
    let void = fx.b.primitive(Primitive::Void);
    let long = fx.b.primitive(Primitive::Long);
    let int = fx.b.primitive(Primitive::Int);
    let string = fx.b.string_type();
    let configure = fx.b.method_type(fx.class_type, "configure", Some(void), vec![factory]);
    let param = fx
        .b
        .variable(Vec::new(), Some(factory), "factory", Some(configure), NodeIndex::NONE);

    let calls = [
        ("setMaxFileSize", long, LiteralValue::Long(1024)),
        ("setMaxRequestSize", string, LiteralValue::String("10MB".into())),
        ("setFileSizeThreshold", int, LiteralValue::Int(512)),
        ("setLocation", string, LiteralValue::String("/tmp".into())),
    ];
    let mut statements = Vec::new();
    for (setter, parameter, value) in calls {
        let setter = fx.b.method_type(factory, setter, Some(void), vec![parameter]);
        let receiver = fx.b.variable_ref(param.variable());
        let argument = fx.b.literal(value);
        statements.push(fx.b.invoke(receiver, setter, vec![argument]));
    }
    let body = fx.b.block(statements.clone());
    let method = fx.b.method(MethodSpec {
        return_type: Some(void),
        name: "configure",
        parameters: vec![param.node],
        body,
        method_type: Some(configure),
        ..Default::default()
    });
    fx.members.push(method);
    (fx.finish(Vec::new()), statements)
}

#[test]
fn test_size_setters_take_data_size() {
    let (file, calls) = uploads(MULTIPART_CONFIG_FACTORY);
    let recipe = MigrateMultipartConfigFactory::new().expect("valid matchers");
    let run = recipe.run(std::slice::from_ref(&file)).expect("edits apply");
    let after = run.changed(&file.path).expect("uploads changed");
    assert_eq!(
        print_source(after),
        sample_source(concat!(
            "class Uploads {\n",
            "    void configure(MultipartConfigFactory factory) {\n",
            "        factory.setMaxFileSize(DataSize.ofBytes(1024L));\n",
            "        factory.setMaxRequestSize(DataSize.parse(\"10MB\"));\n",
            "        factory.setFileSizeThreshold(DataSize.ofBytes(512));\n",
            "        factory.setLocation(\"/tmp\");\n",
            "    }\n",
            "}\n",
        ))
    );

    // The three setters now call the `DataSize` overload.
    for &call in &calls[..3] {
        let method_type = after
            .arena
            .get_invocation(call)
            .and_then(|call| call.method_type)
            .and_then(|ty| after.types.as_method(ty))
            .expect("retyped invocation");
        let parameters: Vec<_> = method_type
            .parameter_types
            .iter()
            .filter_map(|&ty| after.types.type_name(ty))
            .collect();
        assert_eq!(parameters, vec![DATA_SIZE]);
        assert_eq!(
            method_type.return_type.and_then(|ty| after.types.type_name(ty)),
            Some("void")
        );
    }
}

#[test]
fn test_other_factory_types_are_skipped() {
    let (file, _) = uploads("org.example.UploadFactory");
    let recipe = MigrateMultipartConfigFactory::new().expect("valid matchers");
    let run = recipe.run(std::slice::from_ref(&file)).expect("nothing to apply");
    assert!(run.is_empty());
}

#[test]
fn test_migrated_setters_are_not_wrapped_twice() {
    let (file, _) = uploads(MULTIPART_CONFIG_FACTORY);
    let recipe = MigrateMultipartConfigFactory::new().expect("valid matchers");
    let mut batch = vec![file];
    recipe.run(&batch).expect("edits apply").merge_into(&mut batch);
    let second = recipe.run(&batch).expect("nothing to apply");
    assert!(second.is_empty());
}
