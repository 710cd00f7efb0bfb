//! Attributed types.
//!
//! Each source file owns a [`TypeTable`]. Class types are interned by their
//! fully-qualified name, so comparing two class `TypeId`s from the same table
//! is comparing type identity. Method and variable types record their owner,
//! which is what the owner-chain analysis in `jrw-analysis` walks.

use crate::base::TypeId;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Primitive {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl Primitive {
    pub const fn keyword(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Char => "char",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Void => "void",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Primitive> {
        Some(match keyword {
            "boolean" => Primitive::Boolean,
            "byte" => Primitive::Byte,
            "char" => Primitive::Char,
            "short" => Primitive::Short,
            "int" => Primitive::Int,
            "long" => Primitive::Long,
            "float" => Primitive::Float,
            "double" => Primitive::Double,
            "void" => Primitive::Void,
            _ => return None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassType {
    pub fully_qualified_name: String,
    /// Enclosing class for nested types.
    pub owning_class: Option<TypeId>,
}

impl ClassType {
    /// Name after the last `.` or `$`.
    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.fully_qualified_name)
    }

    /// Package prefix (without trailing dot), empty for the default package.
    pub fn package_name(&self) -> &str {
        match self.fully_qualified_name.rfind('.') {
            Some(dot) => &self.fully_qualified_name[..dot],
            None => "",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodType {
    pub declaring_type: TypeId,
    pub name: String,
    pub return_type: Option<TypeId>,
    pub parameter_types: Vec<TypeId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableType {
    pub name: String,
    /// The method or class the variable is declared in.
    pub owner: Option<TypeId>,
    pub var_type: Option<TypeId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JavaType {
    Class(ClassType),
    Primitive(Primitive),
    Method(MethodType),
    Variable(VariableType),
    Unknown,
}

/// Simple name of a fully-qualified or binary class name.
pub fn simple_name_of(fully_qualified_name: &str) -> &str {
    let cut = fully_qualified_name
        .rfind(['.', '$'])
        .map_or(0, |idx| idx + 1);
    &fully_qualified_name[cut..]
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TypeTable {
    types: Vec<JavaType>,
    #[serde(skip)]
    classes: FxHashMap<String, TypeId>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the class index after deserialization.
    pub fn reindex(&mut self) {
        self.classes.clear();
        for (idx, ty) in self.types.iter().enumerate() {
            if let JavaType::Class(class) = ty {
                self.classes
                    .insert(class.fully_qualified_name.clone(), TypeId(idx as u32));
            }
        }
    }

    fn push(&mut self, ty: JavaType) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(ty);
        id
    }

    /// Intern a top-level class type.
    pub fn class(&mut self, fully_qualified_name: &str) -> TypeId {
        self.class_with_owner(fully_qualified_name, None)
    }

    /// Intern a class type nested in `owning_class`.
    pub fn class_with_owner(
        &mut self,
        fully_qualified_name: &str,
        owning_class: Option<TypeId>,
    ) -> TypeId {
        if let Some(&id) = self.classes.get(fully_qualified_name) {
            return id;
        }
        let id = self.push(JavaType::Class(ClassType {
            fully_qualified_name: fully_qualified_name.to_string(),
            owning_class,
        }));
        self.classes.insert(fully_qualified_name.to_string(), id);
        id
    }

    pub fn primitive(&mut self, primitive: Primitive) -> TypeId {
        if let Some(idx) = self
            .types
            .iter()
            .position(|ty| *ty == JavaType::Primitive(primitive))
        {
            return TypeId(idx as u32);
        }
        self.push(JavaType::Primitive(primitive))
    }

    pub fn method(
        &mut self,
        declaring_type: TypeId,
        name: &str,
        return_type: Option<TypeId>,
        parameter_types: Vec<TypeId>,
    ) -> TypeId {
        let method = MethodType {
            declaring_type,
            name: name.to_string(),
            return_type,
            parameter_types,
        };
        if let Some(idx) = self
            .types
            .iter()
            .position(|ty| matches!(ty, JavaType::Method(existing) if *existing == method))
        {
            return TypeId(idx as u32);
        }
        self.push(JavaType::Method(method))
    }

    pub fn variable(&mut self, name: &str, owner: Option<TypeId>, var_type: Option<TypeId>) -> TypeId {
        self.push(JavaType::Variable(VariableType {
            name: name.to_string(),
            owner,
            var_type,
        }))
    }

    pub fn get(&self, id: TypeId) -> Option<&JavaType> {
        self.types.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: TypeId) -> Option<&mut JavaType> {
        self.types.get_mut(id.0 as usize)
    }

    pub fn lookup_class(&self, fully_qualified_name: &str) -> Option<TypeId> {
        self.classes.get(fully_qualified_name).copied()
    }

    pub fn as_class(&self, id: TypeId) -> Option<&ClassType> {
        match self.get(id)? {
            JavaType::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_method(&self, id: TypeId) -> Option<&MethodType> {
        match self.get(id)? {
            JavaType::Method(method) => Some(method),
            _ => None,
        }
    }

    pub fn as_variable(&self, id: TypeId) -> Option<&VariableType> {
        match self.get(id)? {
            JavaType::Variable(var) => Some(var),
            _ => None,
        }
    }

    /// Fully-qualified name for class types, keyword for primitives.
    pub fn type_name(&self, id: TypeId) -> Option<&str> {
        match self.get(id)? {
            JavaType::Class(class) => Some(&class.fully_qualified_name),
            JavaType::Primitive(primitive) => Some(primitive.keyword()),
            _ => None,
        }
    }

    /// Rename a class type in place, keeping its id.
    ///
    /// Returns false, leaving the table untouched, when there is no class
    /// named `from` or another class is already named `to`.
    pub fn rename_class(&mut self, from: &str, to: &str) -> bool {
        if from == to {
            return self.classes.contains_key(from);
        }
        if self.classes.contains_key(to) {
            return false;
        }
        let Some(id) = self.classes.remove(from) else {
            return false;
        };
        if let Some(JavaType::Class(class)) = self.types.get_mut(id.0 as usize) {
            class.fully_qualified_name = to.to_string();
        }
        self.classes.insert(to.to_string(), id);
        true
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &JavaType)> {
        self.types
            .iter()
            .enumerate()
            .map(|(idx, ty)| (TypeId(idx as u32), ty))
    }
}

/// Type identity check against a fully-qualified name.
///
/// Class types compare by fully-qualified name, primitives by keyword.
/// Unattributed types (`None`) never match.
pub fn is_of_type(types: &TypeTable, ty: Option<TypeId>, fully_qualified_name: &str) -> bool {
    ty.and_then(|id| types.type_name(id))
        .is_some_and(|name| name == fully_qualified_name)
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod types_tests;
