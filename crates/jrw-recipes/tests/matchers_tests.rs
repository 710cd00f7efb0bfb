use super::*;
use jrw_tree::{Primitive, TreeBuilder};

const LOCAL_BEAN: &str = "com.example.Bean";

#[test]
fn test_annotation_pattern_requires_prefix() {
    assert_eq!(AnnotationMatcher::new("  "), Err(MatcherError::EmptyPattern));
    assert_eq!(
        AnnotationMatcher::new("org.example.Bean"),
        Err(MatcherError::MissingAnnotationPrefix("org.example.Bean".into()))
    );
    assert_eq!(
        AnnotationMatcher::new("@"),
        Err(MatcherError::MissingAnnotationPrefix("@".into()))
    );
    let matcher = AnnotationMatcher::new("@org.example.Bean").expect("valid pattern");
    assert_eq!(matcher.fully_qualified_name(), "org.example.Bean");
}

#[test]
fn test_annotation_matches_by_type_not_simple_name() {
    let mut b = TreeBuilder::new("Config.java");
    let spring = b.annotation("org.springframework.context.annotation.Bean", Vec::new());
    let local = b.annotation(LOCAL_BEAN, Vec::new());
    let (arena, types) = (b.arena(), b.types());

    let matcher = AnnotationMatcher::new("@org.springframework.context.annotation.Bean")
        .expect("valid pattern");
    assert!(matcher.matches(arena, types, spring));
    assert!(!matcher.matches(arena, types, local));
    assert_eq!(matcher.find(arena, types, &[local, spring]), Some(spring));
    assert_eq!(matcher.find(arena, types, &[local]), None);
}

#[test]
fn test_method_pattern_parsing() {
    let matcher = MethodMatcher::new(
        "org.springframework.http.MediaType parseMediaType(java.lang.String)",
    )
    .expect("valid pattern");
    assert_eq!(matcher.declaring_type(), "org.springframework.http.MediaType");
    assert_eq!(matcher.name(), "parseMediaType");

    let no_args = MethodMatcher::new("org.example.Factory build()").expect("valid pattern");
    assert_eq!(no_args.name(), "build");

    for bad in ["org.example.Factory", "org.example.Factory build(", "org.example.Factory (int)", "org.example.Factory build(int,)"] {
        assert_eq!(
            MethodMatcher::new(bad),
            Err(MatcherError::MalformedMethodPattern(bad.to_string())),
            "{bad}"
        );
    }
}

#[test]
fn test_method_matches_declaring_type_name_and_parameters() {
    let mut b = TreeBuilder::new("Factory.java");
    let factory = b.class_type("org.example.Factory");
    let other = b.class_type("org.example.Other");
    let long = b.primitive(Primitive::Long);
    let string = b.string_type();

    let by_long = b.method_type(factory, "setMaxFileSize", None, vec![long]);
    let by_string = b.method_type(factory, "setMaxFileSize", None, vec![string]);
    let elsewhere = b.method_type(other, "setMaxFileSize", None, vec![long]);

    let receiver = b.identifier("factory", Some(factory));
    let size = b.literal(jrw_tree::LiteralValue::Long(1));
    let call = b.invoke(receiver, by_long, vec![size]);

    let matcher = MethodMatcher::new("org.example.Factory setMaxFileSize(long)").expect("valid pattern");
    let types = b.types();
    assert!(matcher.matches_type(types, by_long));
    assert!(!matcher.matches_type(types, by_string));
    assert!(!matcher.matches_type(types, elsewhere));
    assert!(!matcher.matches_type(types, factory));
    assert!(matcher.matches(b.arena(), types, call));
    assert!(!matcher.matches(b.arena(), types, receiver));
}
