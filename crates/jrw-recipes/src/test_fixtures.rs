//! Tree fixtures for recipe tests.
//!
//! Each fixture builds one class in the `sample` package, member by member,
//! the way a small Spring source file would read.

use crate::rename_bean::{BEAN, QUALIFIER, decapitalize};
use jrw_tree::{
    ClassSpec, DeclarationSpec, MethodSpec, ModifierKind, NodeIndex, NodeList, Primitive,
    SourceFile, TreeBuilder, TypeId, VariableSpec, modifiers, simple_name_of,
};

pub(crate) const PACKAGE: &str = "sample";
pub(crate) const MY_TYPE: &str = "sample.MyType";
pub(crate) const STRING: &str = "java.lang.String";
pub(crate) const CONFIGURATION: &str = "org.springframework.context.annotation.Configuration";
pub(crate) const COMPONENT: &str = "org.springframework.stereotype.Component";
pub(crate) const MY_ANNOTATION: &str = "sample.MyAnnotation";

/// Builder for a single-class file `sample/<Name>.java`.
pub(crate) struct ClassFixture {
    pub b: TreeBuilder,
    pub class_type: TypeId,
    pub members: NodeList,
    simple_name: String,
}

impl ClassFixture {
    pub(crate) fn new(simple_name: &str) -> Self {
        let mut b = TreeBuilder::new(format!("{PACKAGE}/{simple_name}.java"));
        let class_type = b.class_type(&format!("{PACKAGE}.{simple_name}"));
        Self {
            b,
            class_type,
            members: Vec::new(),
            simple_name: simple_name.to_string(),
        }
    }

    /// `@Type`
    pub(crate) fn marker(&mut self, fully_qualified_name: &str) -> NodeIndex {
        self.b.annotation(fully_qualified_name, Vec::new())
    }

    /// `@Type("value")`
    pub(crate) fn annotation(&mut self, fully_qualified_name: &str, value: &str) -> NodeIndex {
        self.b.annotation_with_value(fully_qualified_name, value)
    }

    /// `@Type(key = "value")`
    pub(crate) fn annotation_attribute(
        &mut self,
        fully_qualified_name: &str,
        key: &str,
        value: &str,
    ) -> NodeIndex {
        let literal = self.b.string_literal(value);
        let assignment = self.b.assignment(key, literal);
        self.b.annotation(fully_qualified_name, vec![assignment])
    }

    /// `@Type(key = {"a", "b"})`, or `@Type({"a", "b"})` without a key.
    pub(crate) fn annotation_array(
        &mut self,
        fully_qualified_name: &str,
        key: Option<&str>,
        values: &[&str],
    ) -> NodeIndex {
        let elements = values.iter().map(|v| self.b.string_literal(v)).collect();
        let array = self.b.new_array(elements);
        let argument = match key {
            Some(key) => self.b.assignment(key, array),
            None => array,
        };
        self.b.annotation(fully_qualified_name, vec![argument])
    }

    pub(crate) fn bean(&mut self) -> NodeIndex {
        self.marker(BEAN)
    }

    pub(crate) fn qualifier(&mut self, value: &str) -> NodeIndex {
        self.annotation(QUALIFIER, value)
    }

    /// `static final String <name> = "<value>";`, or without `final`.
    pub(crate) fn constant(&mut self, name: &str, value: &str, is_final: bool) -> TypeId {
        let string = self.b.string_type();
        let literal = self.b.string_literal(value);
        let kinds: &[ModifierKind] = if is_final {
            &[ModifierKind::Static, ModifierKind::Final]
        } else {
            &[ModifierKind::Static]
        };
        let declared = self
            .b
            .variable(modifiers(kinds), Some(string), name, Some(self.class_type), literal);
        self.members.push(declared.node);
        declared.variable()
    }

    /// `<annotations> public <Type> <name>() { return new <Type>(); }`
    ///
    /// Returns the method type.
    pub(crate) fn bean_method(
        &mut self,
        annotations: NodeList,
        return_type: &str,
        name: &str,
    ) -> TypeId {
        let ret = self.b.class_type(return_type);
        let method_type = self.b.method_type(self.class_type, name, Some(ret), Vec::new());
        let created = self.b.new_class(ret, Vec::new());
        let ret_stmt = self.b.return_stmt(created);
        let body = self.b.block(vec![ret_stmt]);
        let method = self.b.method(MethodSpec {
            annotations,
            modifiers: modifiers(&[ModifierKind::Public]),
            return_type: Some(ret),
            name,
            body,
            method_type: Some(method_type),
            ..Default::default()
        });
        self.members.push(method);
        method_type
    }

    /// `void inject(<annotations> <Type> <type>) { }`
    ///
    /// Returns the parameter declaration.
    pub(crate) fn injection_method(&mut self, annotations: NodeList, param_type: &str) -> NodeIndex {
        let ty = self.b.class_type(param_type);
        let void = self.b.primitive(Primitive::Void);
        let method_type = self.b.method_type(self.class_type, "inject", Some(void), vec![ty]);
        let name = decapitalize(simple_name_of(param_type));
        let param = self.b.declaration(DeclarationSpec {
            annotations,
            ty: Some(ty),
            variables: vec![VariableSpec {
                name: &name,
                owner: Some(method_type),
                initializer: NodeIndex::NONE,
            }],
            ..Default::default()
        });
        let body = self.b.block(Vec::new());
        let method = self.b.method(MethodSpec {
            return_type: Some(void),
            name: "inject",
            parameters: vec![param.node],
            body,
            method_type: Some(method_type),
            ..Default::default()
        });
        self.members.push(method);
        param.node
    }

    /// `<annotations> private <Type> <type>;`
    pub(crate) fn field(&mut self, annotations: NodeList, field_type: &str) -> NodeIndex {
        let ty = self.b.class_type(field_type);
        let name = decapitalize(simple_name_of(field_type));
        let field = self.b.declaration(DeclarationSpec {
            annotations,
            modifiers: modifiers(&[ModifierKind::Private]),
            ty: Some(ty),
            variables: vec![VariableSpec {
                name: &name,
                owner: Some(self.class_type),
                initializer: NodeIndex::NONE,
            }],
        });
        self.members.push(field.node);
        field.node
    }

    /// `<Name>() { }`
    pub(crate) fn constructor(&mut self) -> NodeIndex {
        let body = self.b.block(Vec::new());
        let name = self.simple_name.clone();
        let constructor = self.b.method(MethodSpec {
            name: &name,
            body,
            ..Default::default()
        });
        self.members.push(constructor);
        constructor
    }

    pub(crate) fn finish(self, annotations: NodeList) -> SourceFile {
        let ClassFixture {
            mut b,
            class_type,
            members,
            simple_name,
        } = self;
        let class = b.class(ClassSpec {
            annotations,
            name: &simple_name,
            members,
            class_type: Some(class_type),
            ..Default::default()
        });
        b.finish(Some(PACKAGE), &[], vec![class])
    }
}

/// `@Configuration class Config` holding what `build` adds.
pub(crate) fn config_file(build: impl FnOnce(&mut ClassFixture)) -> SourceFile {
    let mut fixture = ClassFixture::new("Config");
    build(&mut fixture);
    let configuration = fixture.marker(CONFIGURATION);
    fixture.finish(vec![configuration])
}

/// Expected printout of a `sample` file whose class prints as `class`.
pub(crate) fn sample_source(class: &str) -> String {
    format!("package {PACKAGE};\n\n{class}")
}
