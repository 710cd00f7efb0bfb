//! Programmatic tree construction.
//!
//! Hosts that own a front end attribute trees themselves; `TreeBuilder` is
//! the in-process equivalent used by recipes (for replacement fragments) and
//! by tests. Children must be built before their parents; `NodeArena::add`
//! wires up the parent links.

use crate::arena::{NodeArena, SourceFile};
use crate::base::{NodeIndex, NodeList, TypeId};
use crate::node::{
    AnnotationData, AssignmentData, BinaryData, BinaryOperator, BlockData, ClassDeclarationData,
    ClassKind, CompilationUnitData, FieldAccessData, ForLoopData, IdentifierData, LambdaData,
    LiteralData, LiteralValue, MethodDeclarationData, MethodInvocationData, Modifier,
    ModifierKind, NamedVariableData, NewArrayData, NewClassData, NodeData, ReturnData, TryData,
    VariableDeclarationsData,
};
use crate::types::{JavaType, Primitive, TypeTable, simple_name_of};

pub const JAVA_LANG_STRING: &str = "java.lang.String";

/// Build a modifier list from keywords.
pub fn modifiers(kinds: &[ModifierKind]) -> Vec<Modifier> {
    kinds.iter().copied().map(Modifier::new).collect()
}

/// One named variable inside a declaration.
#[derive(Clone, Debug, Default)]
pub struct VariableSpec<'a> {
    pub name: &'a str,
    /// Declaring method or class type.
    pub owner: Option<TypeId>,
    pub initializer: NodeIndex,
}

/// A declaration statement, parameter, field or resource.
#[derive(Clone, Debug, Default)]
pub struct DeclarationSpec<'a> {
    pub annotations: NodeList,
    pub modifiers: Vec<Modifier>,
    pub ty: Option<TypeId>,
    pub variables: Vec<VariableSpec<'a>>,
}

/// Result of building a declaration.
#[derive(Clone, Debug)]
pub struct Declared {
    /// The `VariableDeclarations` node.
    pub node: NodeIndex,
    /// `JavaType::Variable` ids, one per declared variable.
    pub variables: Vec<TypeId>,
}

impl Declared {
    /// The first (usually only) variable type.
    pub fn variable(&self) -> TypeId {
        self.variables[0]
    }
}

#[derive(Clone, Debug, Default)]
pub struct MethodSpec<'a> {
    pub comments: Vec<String>,
    pub annotations: NodeList,
    pub modifiers: Vec<Modifier>,
    /// `None` for constructors.
    pub return_type: Option<TypeId>,
    pub name: &'a str,
    pub parameters: NodeList,
    /// Block node or `NONE`.
    pub body: NodeIndex,
    pub method_type: Option<TypeId>,
}

#[derive(Clone, Debug)]
pub struct ClassSpec<'a> {
    pub annotations: NodeList,
    pub modifiers: Vec<Modifier>,
    pub kind: ClassKind,
    pub name: &'a str,
    pub members: NodeList,
    pub class_type: Option<TypeId>,
}

impl Default for ClassSpec<'_> {
    fn default() -> Self {
        Self {
            annotations: Vec::new(),
            modifiers: Vec::new(),
            kind: ClassKind::Class,
            name: "",
            members: Vec::new(),
            class_type: None,
        }
    }
}

#[derive(Debug)]
pub struct TreeBuilder {
    path: String,
    arena: NodeArena,
    types: TypeTable,
}

impl TreeBuilder {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            arena: NodeArena::new(),
            types: TypeTable::new(),
        }
    }

    /// Continue building into an existing file (used when materializing
    /// replacement fragments).
    pub fn from_parts(path: impl Into<String>, arena: NodeArena, types: TypeTable) -> Self {
        Self {
            path: path.into(),
            arena,
            types,
        }
    }

    pub fn into_parts(self) -> (NodeArena, TypeTable) {
        (self.arena, self.types)
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut NodeArena {
        &mut self.arena
    }

    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    pub fn types_mut(&mut self) -> &mut TypeTable {
        &mut self.types
    }

    // -------------------------------------------------------------------------
    // Types
    // -------------------------------------------------------------------------

    pub fn class_type(&mut self, fully_qualified_name: &str) -> TypeId {
        self.types.class(fully_qualified_name)
    }

    pub fn nested_class_type(&mut self, fully_qualified_name: &str, owner: TypeId) -> TypeId {
        self.types.class_with_owner(fully_qualified_name, Some(owner))
    }

    pub fn primitive(&mut self, primitive: Primitive) -> TypeId {
        self.types.primitive(primitive)
    }

    pub fn string_type(&mut self) -> TypeId {
        self.types.class(JAVA_LANG_STRING)
    }

    pub fn method_type(
        &mut self,
        declaring_type: TypeId,
        name: &str,
        return_type: Option<TypeId>,
        parameter_types: Vec<TypeId>,
    ) -> TypeId {
        self.types
            .method(declaring_type, name, return_type, parameter_types)
    }

    pub fn variable_type(&mut self, name: &str, owner: Option<TypeId>, ty: Option<TypeId>) -> TypeId {
        self.types.variable(name, owner, ty)
    }

    // -------------------------------------------------------------------------
    // Expressions
    // -------------------------------------------------------------------------

    pub fn identifier(&mut self, name: &str, ty: Option<TypeId>) -> NodeIndex {
        self.arena.add(NodeData::Identifier(IdentifierData {
            simple_name: name.to_string(),
            ty,
            field_type: None,
        }))
    }

    /// Identifier spelling a type by its simple name (or primitive keyword).
    pub fn type_ref(&mut self, ty: TypeId) -> NodeIndex {
        let name = match self.types.get(ty) {
            Some(JavaType::Class(class)) => class.simple_name().to_string(),
            Some(JavaType::Primitive(primitive)) => primitive.keyword().to_string(),
            _ => String::from("var"),
        };
        self.identifier(&name, Some(ty))
    }

    /// Identifier naming a variable; name and type come from `variable`.
    pub fn variable_ref(&mut self, variable: TypeId) -> NodeIndex {
        let (name, ty) = match self.types.as_variable(variable) {
            Some(var) => (var.name.clone(), var.var_type),
            None => (String::new(), None),
        };
        self.arena.add(NodeData::Identifier(IdentifierData {
            simple_name: name,
            ty,
            field_type: Some(variable),
        }))
    }

    /// `target.name`, where `name` is the variable `variable`.
    pub fn field_access(&mut self, target: NodeIndex, variable: TypeId) -> NodeIndex {
        let name = self.variable_ref(variable);
        let ty = self
            .types
            .as_variable(variable)
            .and_then(|var| var.var_type);
        self.arena
            .add(NodeData::FieldAccess(FieldAccessData { target, name, ty }))
    }

    pub fn literal(&mut self, value: LiteralValue) -> NodeIndex {
        let ty = match &value {
            LiteralValue::String(_) => Some(self.string_type()),
            LiteralValue::Int(_) => Some(self.primitive(Primitive::Int)),
            LiteralValue::Long(_) => Some(self.primitive(Primitive::Long)),
            LiteralValue::Boolean(_) => Some(self.primitive(Primitive::Boolean)),
            LiteralValue::Null => None,
        };
        self.arena.add(NodeData::Literal(LiteralData { value, ty }))
    }

    pub fn string_literal(&mut self, value: &str) -> NodeIndex {
        self.literal(LiteralValue::String(value.to_string()))
    }

    pub fn new_class(&mut self, ty: TypeId, arguments: NodeList) -> NodeIndex {
        let class_expr = self.type_ref(ty);
        self.arena.add(NodeData::NewClass(NewClassData {
            class_expr,
            arguments,
            ty: Some(ty),
        }))
    }

    /// Invocation of `method_type` on `select` (`NONE` for unqualified calls).
    pub fn invoke(&mut self, select: NodeIndex, method_type: TypeId, arguments: NodeList) -> NodeIndex {
        let (name, return_type) = match self.types.as_method(method_type) {
            Some(method) => (method.name.clone(), method.return_type),
            None => (String::new(), None),
        };
        let name = self.identifier(&name, return_type);
        self.arena
            .add(NodeData::MethodInvocation(MethodInvocationData {
                select,
                name,
                arguments,
                method_type: Some(method_type),
            }))
    }

    pub fn new_array(&mut self, elements: NodeList) -> NodeIndex {
        self.arena
            .add(NodeData::NewArray(NewArrayData { elements, ty: None }))
    }

    /// `name = value`, as used for annotation attributes.
    pub fn assignment(&mut self, name: &str, value: NodeIndex) -> NodeIndex {
        let variable = self.identifier(name, None);
        let ty = self.arena.expression_type(value, &self.types);
        self.arena
            .add(NodeData::Assignment(AssignmentData { variable, value, ty }))
    }

    pub fn binary(&mut self, left: NodeIndex, operator: BinaryOperator, right: NodeIndex) -> NodeIndex {
        let ty = self.arena.expression_type(left, &self.types);
        self.arena.add(NodeData::Binary(BinaryData {
            left,
            operator,
            right,
            ty,
        }))
    }

    pub fn lambda(&mut self, parameters: NodeList, body: NodeIndex, ty: Option<TypeId>) -> NodeIndex {
        self.arena.add(NodeData::Lambda(LambdaData {
            parameters,
            body,
            ty,
        }))
    }

    // -------------------------------------------------------------------------
    // Annotations
    // -------------------------------------------------------------------------

    pub fn annotation(&mut self, fully_qualified_name: &str, arguments: NodeList) -> NodeIndex {
        let ty = self.class_type(fully_qualified_name);
        let annotation_type = self.identifier(simple_name_of(fully_qualified_name), Some(ty));
        self.arena.add(NodeData::Annotation(AnnotationData {
            annotation_type,
            arguments,
        }))
    }

    /// `@Type("value")`.
    pub fn annotation_with_value(&mut self, fully_qualified_name: &str, value: &str) -> NodeIndex {
        let literal = self.string_literal(value);
        self.annotation(fully_qualified_name, vec![literal])
    }

    // -------------------------------------------------------------------------
    // Statements
    // -------------------------------------------------------------------------

    pub fn block(&mut self, statements: NodeList) -> NodeIndex {
        self.arena.add(NodeData::Block(BlockData { statements }))
    }

    pub fn return_stmt(&mut self, expression: NodeIndex) -> NodeIndex {
        self.arena.add(NodeData::Return(ReturnData { expression }))
    }

    pub fn for_loop(
        &mut self,
        init: NodeList,
        condition: NodeIndex,
        update: NodeList,
        body: NodeIndex,
    ) -> NodeIndex {
        self.arena.add(NodeData::ForLoop(ForLoopData {
            init,
            condition,
            update,
            body,
        }))
    }

    pub fn try_stmt(&mut self, resources: NodeList, body: NodeIndex, finally: NodeIndex) -> NodeIndex {
        self.arena.add(NodeData::Try(TryData {
            resources,
            body,
            finally,
        }))
    }

    // -------------------------------------------------------------------------
    // Declarations
    // -------------------------------------------------------------------------

    pub fn declaration(&mut self, spec: DeclarationSpec<'_>) -> Declared {
        let type_expr = match spec.ty {
            Some(ty) => self.type_ref(ty),
            None => NodeIndex::NONE,
        };
        let mut variables = Vec::with_capacity(spec.variables.len());
        let mut nodes = Vec::with_capacity(spec.variables.len());
        for var in spec.variables {
            let variable = self.variable_type(var.name, var.owner, spec.ty);
            let name = self.variable_ref(variable);
            nodes.push(self.arena.add(NodeData::NamedVariable(NamedVariableData {
                name,
                initializer: var.initializer,
                variable_type: Some(variable),
            })));
            variables.push(variable);
        }
        let node = self
            .arena
            .add(NodeData::VariableDeclarations(VariableDeclarationsData {
                annotations: spec.annotations,
                modifiers: spec.modifiers,
                type_expr,
                variables: nodes,
            }));
        Declared { node, variables }
    }

    /// Single-variable declaration shorthand.
    pub fn variable(
        &mut self,
        modifiers: Vec<Modifier>,
        ty: Option<TypeId>,
        name: &str,
        owner: Option<TypeId>,
        initializer: NodeIndex,
    ) -> Declared {
        self.declaration(DeclarationSpec {
            annotations: Vec::new(),
            modifiers,
            ty,
            variables: vec![VariableSpec {
                name,
                owner,
                initializer,
            }],
        })
    }

    pub fn method(&mut self, spec: MethodSpec<'_>) -> NodeIndex {
        let return_type = match spec.return_type {
            Some(ty) => self.type_ref(ty),
            None => NodeIndex::NONE,
        };
        let name = self.identifier(spec.name, None);
        self.arena
            .add(NodeData::MethodDeclaration(MethodDeclarationData {
                comments: spec.comments,
                annotations: spec.annotations,
                modifiers: spec.modifiers,
                return_type,
                name,
                parameters: spec.parameters,
                body: spec.body,
                method_type: spec.method_type,
            }))
    }

    pub fn class(&mut self, spec: ClassSpec<'_>) -> NodeIndex {
        let name = self.identifier(spec.name, spec.class_type);
        let body = self.block(spec.members);
        self.arena
            .add(NodeData::ClassDeclaration(ClassDeclarationData {
                annotations: spec.annotations,
                modifiers: spec.modifiers,
                class_kind: spec.kind,
                name,
                body,
                class_type: spec.class_type,
            }))
    }

    /// Close the compilation unit and hand out the finished file.
    pub fn finish(mut self, package_name: Option<&str>, imports: &[&str], classes: NodeList) -> SourceFile {
        let root = self
            .arena
            .add(NodeData::CompilationUnit(CompilationUnitData {
                package_name: package_name.map(str::to_string),
                imports: imports.iter().map(|s| s.to_string()).collect(),
                classes,
            }));
        SourceFile::new(self.path, self.arena, self.types, root)
    }

    /// Add a free-standing node (used by the edit service).
    pub fn add(&mut self, data: NodeData) -> NodeIndex {
        self.arena.add(data)
    }
}

#[cfg(test)]
#[path = "../tests/builder_tests.rs"]
mod builder_tests;
