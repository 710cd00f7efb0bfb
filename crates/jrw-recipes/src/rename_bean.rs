//! Spring bean rename.
//!
//! A bean is either a `@Bean` factory method or a class carrying a stereotype
//! annotation. Its name comes from, in order of precedence:
//!
//! 1. the `value` of a `@Qualifier` on the declaration,
//! 2. the `value`/`name` attribute of the marker annotation,
//! 3. the declaration itself (method name, or class simple name with the
//!    first letter lower-cased).
//!
//! Renaming a bean rewrites whichever of these supplied the name, plus every
//! `@Qualifier` on a parameter or field that refers to the bean by its old
//! name and type. An implicit name is changed by renaming the declaration, so
//! a factory method rename also renames its invocations and a class rename
//! renames the type everywhere in the batch.
//!
//! The recipe runs in two phases: a read-only scan of the whole batch finds
//! the beans and plans declaration renames, then each file gets one edit set
//! computed against the original trees.

use crate::error::RecipeError;
use crate::matchers::AnnotationMatcher;
use crate::recipe::{Recipe, RecipeRun, edit_files};
use jrw_analysis::resolve_local_initializer;
use jrw_tree::{
    AttributeSlot, EditSet, LiteralValue, NodeArena, NodeData, NodeIndex, Snippet, SourceFile,
    TreeEdit, TypeId, TypeTable, VALUE_ATTRIBUTE, annotation_attributes, annotations_of,
    simple_name_of,
};
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

pub const BEAN: &str = "org.springframework.context.annotation.Bean";
pub const QUALIFIER: &str = "org.springframework.beans.factory.annotation.Qualifier";

/// Annotations that make a class a bean.
pub const STEREOTYPES: [&str; 6] = [
    "org.springframework.stereotype.Component",
    "org.springframework.stereotype.Service",
    "org.springframework.stereotype.Repository",
    "org.springframework.stereotype.Controller",
    "org.springframework.web.bind.annotation.RestController",
    "org.springframework.context.annotation.Configuration",
];

const NAME_ATTRIBUTE: &str = "name";

/// A declaration that defines a bean.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BeanDeclaration {
    /// A `@Bean` method.
    FactoryMethod {
        node: NodeIndex,
        marker: NodeIndex,
    },
    /// A class with a stereotype annotation.
    Stereotype {
        node: NodeIndex,
        marker: NodeIndex,
    },
}

impl BeanDeclaration {
    /// Classify `node` as a bean declaration.
    pub fn classify(arena: &NodeArena, types: &TypeTable, node: NodeIndex) -> Option<Self> {
        match arena.data(node)? {
            NodeData::MethodDeclaration(method) => {
                let marker = AnnotationMatcher::for_type(BEAN).find(arena, types, &method.annotations)?;
                Some(BeanDeclaration::FactoryMethod { node, marker })
            }
            NodeData::ClassDeclaration(class) => {
                let marker = STEREOTYPES.iter().find_map(|stereotype| {
                    AnnotationMatcher::for_type(stereotype).find(arena, types, &class.annotations)
                })?;
                Some(BeanDeclaration::Stereotype { node, marker })
            }
            _ => None,
        }
    }

    pub fn node(&self) -> NodeIndex {
        match *self {
            BeanDeclaration::FactoryMethod { node, .. } | BeanDeclaration::Stereotype { node, .. } => {
                node
            }
        }
    }

    pub fn marker(&self) -> NodeIndex {
        match *self {
            BeanDeclaration::FactoryMethod { marker, .. }
            | BeanDeclaration::Stereotype { marker, .. } => marker,
        }
    }

    /// The bean's type: the factory method's return type or the class itself.
    pub fn bean_type(&self, arena: &NodeArena) -> Option<TypeId> {
        match *self {
            BeanDeclaration::FactoryMethod { node, .. } => {
                let method = arena.get_method(node)?;
                arena.data(method.return_type)?.expression_type()
            }
            BeanDeclaration::Stereotype { node, .. } => arena.get_class(node)?.class_type,
        }
    }

    /// The name the bean gets when no attribute names it.
    pub fn implicit_name(&self, arena: &NodeArena) -> Option<String> {
        match *self {
            BeanDeclaration::FactoryMethod { node, .. } => {
                let method = arena.get_method(node)?;
                arena.get_identifier_text(method.name).map(str::to_string)
            }
            BeanDeclaration::Stereotype { node, .. } => {
                let class = arena.get_class(node)?;
                arena.get_identifier_text(class.name).map(decapitalize)
            }
        }
    }
}

/// An attribute slot naming a bean.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedSlot {
    pub slot: AttributeSlot,
    /// `None` when the slot's value could not be determined.
    pub name: Option<String>,
    /// The name came from a constant the slot refers to.
    pub aliased: bool,
}

/// Where a bean's name comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NameSource {
    /// One or more attribute slots; an array attribute gives several names.
    Explicit(Vec<NamedSlot>),
    Implicit(String),
}

impl NameSource {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        let (explicit, implicit) = match self {
            NameSource::Explicit(slots) => (Some(slots), None),
            NameSource::Implicit(name) => (None, Some(name.as_str())),
        };
        explicit
            .into_iter()
            .flatten()
            .filter_map(|slot| slot.name.as_deref())
            .chain(implicit)
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }
}

/// Resolve the string an attribute slot holds.
///
/// Literals are read directly; a reference to a `final` binding is traced to
/// its initializer. Returns the value and whether it was traced.
fn slot_value(arena: &NodeArena, types: &TypeTable, node: NodeIndex) -> Option<(String, bool)> {
    if let Some(value) = arena.get_string_literal(node) {
        return Some((value.to_string(), false));
    }
    arena.referenced_variable(node)?;
    let resolved = resolve_local_initializer(arena, types, node, node);
    if resolved == node {
        return None;
    }
    arena
        .get_string_literal(resolved)
        .map(|value| (value.to_string(), true))
}

fn named_slots(
    arena: &NodeArena,
    types: &TypeTable,
    annotation: NodeIndex,
    keys: &[&str],
) -> Vec<NamedSlot> {
    annotation_attributes(arena, annotation)
        .iter()
        .filter(|attr| keys.contains(&attr.key.as_str()))
        .flat_map(|attr| attr.value.slots().iter().copied())
        .map(|slot| {
            let value = slot_value(arena, types, slot.node);
            NamedSlot {
                slot,
                aliased: value.as_ref().is_some_and(|(_, aliased)| *aliased),
                name: value.map(|(name, _)| name),
            }
        })
        .collect()
}

/// The name source of `declaration`.
pub fn name_source(
    arena: &NodeArena,
    types: &TypeTable,
    declaration: &BeanDeclaration,
) -> Option<NameSource> {
    let annotations = annotations_of(arena, declaration.node());
    if let Some(qualifier) = AnnotationMatcher::for_type(QUALIFIER).find(arena, types, annotations) {
        let slots = named_slots(arena, types, qualifier, &[VALUE_ATTRIBUTE]);
        if !slots.is_empty() {
            return Some(NameSource::Explicit(slots));
        }
    }
    let slots = named_slots(
        arena,
        types,
        declaration.marker(),
        &[VALUE_ATTRIBUTE, NAME_ATTRIBUTE],
    );
    if !slots.is_empty() {
        return Some(NameSource::Explicit(slots));
    }
    declaration.implicit_name(arena).map(NameSource::Implicit)
}

pub(crate) fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Everything before the simple name, including the trailing `.` or `$`.
fn name_prefix(fully_qualified_name: &str) -> &str {
    let simple = simple_name_of(fully_qualified_name);
    &fully_qualified_name[..fully_qualified_name.len() - simple.len()]
}

/// A factory method whose implicit name is being changed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct MethodRename {
    declaring_type: String,
    name: String,
    parameter_types: Vec<String>,
}

impl MethodRename {
    fn of(types: &TypeTable, method_type: TypeId) -> Option<Self> {
        let method = types.as_method(method_type)?;
        Some(Self {
            declaring_type: types.type_name(method.declaring_type)?.to_string(),
            name: method.name.clone(),
            parameter_types: method
                .parameter_types
                .iter()
                .map(|&ty| types.type_name(ty).map(str::to_string))
                .collect::<Option<Vec<_>>>()?,
        })
    }
}

/// A class being renamed across the batch.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ClassRename {
    from: String,
    to: String,
}

impl ClassRename {
    fn new(from: &str, new_simple_name: &str) -> Self {
        Self {
            from: from.to_string(),
            to: format!("{}{new_simple_name}", name_prefix(from)),
        }
    }

    fn old_simple_name(&self) -> &str {
        simple_name_of(&self.from)
    }

    fn new_simple_name(&self) -> &str {
        simple_name_of(&self.to)
    }
}

/// A bean found by the scan phase.
#[derive(Clone, Debug)]
struct FoundBean {
    file: usize,
    declaration: BeanDeclaration,
    bean_type: String,
    source: NameSource,
}

/// What the scan phase decided.
#[derive(Debug, Default)]
struct RenamePlan {
    beans: Vec<FoundBean>,
    methods: FxHashSet<MethodRename>,
    classes: Vec<ClassRename>,
    /// Types a `@Qualifier` reference must have to be rewritten.
    linked_types: FxHashSet<String>,
}

pub struct RenameBean {
    type_filter: Option<String>,
    old_name: String,
    new_name: String,
}

impl RenameBean {
    pub const NAME: &'static str = "renameBean";

    pub fn new(
        type_filter: Option<String>,
        old_name: impl Into<String>,
        new_name: impl Into<String>,
    ) -> Result<Self, RecipeError> {
        let old_name = old_name.into();
        let new_name = new_name.into();
        if old_name.is_empty() {
            return Err(RecipeError::MissingArgument {
                recipe: Self::NAME,
                argument: "oldName",
            });
        }
        if new_name.is_empty() {
            return Err(RecipeError::MissingArgument {
                recipe: Self::NAME,
                argument: "newName",
            });
        }
        Ok(Self {
            type_filter: type_filter.filter(|ty| !ty.is_empty()),
            old_name,
            new_name,
        })
    }

    fn passes_filter(&self, bean_type: &str) -> bool {
        self.type_filter
            .as_deref()
            .is_none_or(|filter| filter == bean_type)
    }

    fn scan(&self, files: &[SourceFile]) -> RenamePlan {
        let mut plan = RenamePlan::default();
        if let Some(filter) = &self.type_filter {
            plan.linked_types.insert(filter.clone());
        }

        for (file_idx, file) in files.iter().enumerate() {
            let (arena, types) = (&file.arena, &file.types);
            for node in arena.descendants(file.root) {
                let Some(declaration) = BeanDeclaration::classify(arena, types, node) else {
                    continue;
                };
                let Some(bean_type) = declaration
                    .bean_type(arena)
                    .and_then(|ty| types.type_name(ty))
                else {
                    trace!(node = node.0, "bean declaration without a type");
                    continue;
                };
                if !self.passes_filter(bean_type) {
                    continue;
                }
                let Some(source) = name_source(arena, types, &declaration) else {
                    continue;
                };
                if !source.has_name(&self.old_name) {
                    continue;
                }
                debug!(path = %file.path, bean_type, ?source, "found bean");

                if let NameSource::Implicit(_) = source {
                    match declaration {
                        BeanDeclaration::FactoryMethod { node, .. } => {
                            if let Some(rename) = arena
                                .get_method(node)
                                .and_then(|m| m.method_type)
                                .and_then(|ty| MethodRename::of(types, ty))
                            {
                                plan.methods.insert(rename);
                            }
                        }
                        BeanDeclaration::Stereotype { .. } => {
                            let new_simple = capitalize(&self.new_name);
                            let rename = ClassRename::new(bean_type, &new_simple);
                            let companion = ClassRename::new(
                                &format!("{}Test", rename.from),
                                &format!("{new_simple}Test"),
                            );
                            for rename in [rename, companion] {
                                if !plan.classes.contains(&rename) {
                                    plan.classes.push(rename);
                                }
                            }
                        }
                    }
                }

                if self.type_filter.is_none() {
                    plan.linked_types.insert(bean_type.to_string());
                }
                plan.beans.push(FoundBean {
                    file: file_idx,
                    declaration,
                    bean_type: bean_type.to_string(),
                    source,
                });
            }
        }
        plan
    }

    fn rename_slot(&self, edits: &mut EditSet, slot: &NamedSlot) {
        if slot.name.as_deref() != Some(self.old_name.as_str()) {
            return;
        }
        let edit = if slot.aliased {
            TreeEdit::ReplaceExpression {
                target: slot.slot.node,
                snippet: Snippet::StringLiteral(self.new_name.clone()),
            }
        } else {
            TreeEdit::SetLiteral {
                literal: slot.slot.node,
                value: LiteralValue::String(self.new_name.clone()),
            }
        };
        edits.push(edit);
    }

    fn plan_file(&self, plan: &RenamePlan, file_idx: usize, file: &SourceFile) -> EditSet {
        let (arena, types) = (&file.arena, &file.types);
        let mut edits = EditSet::new();

        for bean in plan.beans.iter().filter(|bean| bean.file == file_idx) {
            match &bean.source {
                NameSource::Explicit(slots) => {
                    for slot in slots {
                        self.rename_slot(&mut edits, slot);
                    }
                }
                NameSource::Implicit(_) => {
                    if let BeanDeclaration::FactoryMethod { node, .. } = bean.declaration
                        && let Some(method) = arena.get_method(node)
                    {
                        edits.push(TreeEdit::RenameIdentifier {
                            identifier: method.name,
                            name: self.new_name.clone(),
                        });
                        if let Some(method_type) = method.method_type {
                            edits.push(TreeEdit::RenameMethodType {
                                method_type,
                                name: self.new_name.clone(),
                            });
                        }
                    }
                }
            }
            trace!(bean_type = %bean.bean_type, edits = edits.len(), "bean edits");
        }

        let class_ids: Vec<(TypeId, &ClassRename)> = plan
            .classes
            .iter()
            .filter_map(|rename| Some((types.lookup_class(&rename.from)?, rename)))
            .collect();
        for (_, rename) in &class_ids {
            edits.push(TreeEdit::RenameClassType {
                from: rename.from.clone(),
                to: rename.to.clone(),
            });
        }

        for node in arena.descendants(file.root) {
            match arena.data(node) {
                Some(NodeData::MethodInvocation(call)) if !plan.methods.is_empty() => {
                    let Some(method_type) = call.method_type else {
                        continue;
                    };
                    if MethodRename::of(types, method_type)
                        .is_some_and(|rename| plan.methods.contains(&rename))
                    {
                        edits.push(TreeEdit::RenameIdentifier {
                            identifier: call.name,
                            name: self.new_name.clone(),
                        });
                        edits.push(TreeEdit::RenameMethodType {
                            method_type,
                            name: self.new_name.clone(),
                        });
                    }
                }
                Some(NodeData::Identifier(ident)) if ident.field_type.is_none() => {
                    let Some(ty) = ident.ty else {
                        continue;
                    };
                    if let Some((_, rename)) = class_ids
                        .iter()
                        .find(|(id, rename)| *id == ty && rename.old_simple_name() == ident.simple_name)
                    {
                        edits.push(TreeEdit::RenameIdentifier {
                            identifier: node,
                            name: rename.new_simple_name().to_string(),
                        });
                    }
                }
                Some(NodeData::ClassDeclaration(class)) => {
                    let Some(class_type) = class.class_type else {
                        continue;
                    };
                    if let Some((_, rename)) = class_ids.iter().find(|(id, _)| *id == class_type) {
                        rename_constructors(arena, class.body, rename, &mut edits);
                    }
                }
                Some(NodeData::VariableDeclarations(_)) => {
                    self.plan_reference(plan, arena, types, node, &mut edits);
                }
                _ => {}
            }
        }
        edits
    }

    /// Rewrite the `@Qualifier` of a parameter or field that names the bean.
    fn plan_reference(
        &self,
        plan: &RenamePlan,
        arena: &NodeArena,
        types: &TypeTable,
        declaration: NodeIndex,
        edits: &mut EditSet,
    ) {
        if !is_parameter_or_field(arena, declaration) {
            return;
        }
        let Some(decls) = arena.get_variable_declarations(declaration) else {
            return;
        };
        let Some(qualifier) = AnnotationMatcher::for_type(QUALIFIER).find(arena, types, &decls.annotations)
        else {
            return;
        };
        let declared = arena
            .data(decls.type_expr)
            .and_then(NodeData::expression_type)
            .and_then(|ty| types.type_name(ty));
        if !declared.is_some_and(|name| plan.linked_types.contains(name)) {
            return;
        }
        for slot in named_slots(arena, types, qualifier, &[VALUE_ATTRIBUTE]) {
            self.rename_slot(edits, &slot);
        }
    }
}

/// Constructors spell the class name but carry no type of their own.
fn rename_constructors(
    arena: &NodeArena,
    body: NodeIndex,
    rename: &ClassRename,
    edits: &mut EditSet,
) {
    let Some(NodeData::Block(block)) = arena.data(body) else {
        return;
    };
    for &member in &block.statements {
        let Some(method) = arena.get_method(member) else {
            continue;
        };
        if method.return_type.is_none()
            && arena.get_identifier_text(method.name) == Some(rename.old_simple_name())
        {
            edits.push(TreeEdit::RenameIdentifier {
                identifier: method.name,
                name: rename.new_simple_name().to_string(),
            });
        }
    }
}

/// Method parameters and class-body fields; locals never reference beans.
fn is_parameter_or_field(arena: &NodeArena, declaration: NodeIndex) -> bool {
    let Some(parent) = arena.parent(declaration) else {
        return false;
    };
    match arena.data(parent) {
        Some(NodeData::MethodDeclaration(method)) => method.parameters.contains(&declaration),
        Some(NodeData::Block(_)) => matches!(
            arena.parent(parent).and_then(|p| arena.data(p)),
            Some(NodeData::ClassDeclaration(_))
        ),
        _ => false,
    }
}

impl Recipe for RenameBean {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn display_name(&self) -> &'static str {
        "Rename bean"
    }

    fn description(&self) -> &'static str {
        "Renames a Spring bean, along with the qualifiers that refer to it."
    }

    fn run(&self, files: &[SourceFile]) -> Result<RecipeRun, RecipeError> {
        let plan = self.scan(files);
        debug!(
            old_name = %self.old_name,
            new_name = %self.new_name,
            beans = plan.beans.len(),
            linked_types = plan.linked_types.len(),
            "bean rename planned"
        );
        if plan.beans.is_empty() && self.type_filter.is_none() {
            return Ok(RecipeRun::new(Self::NAME));
        }
        edit_files(Self::NAME, files, |file_idx, file| {
            self.plan_file(&plan, file_idx, file)
        })
    }
}

/// Rename the bean `old_name` to `new_name` within a single file.
///
/// Returns the file unchanged when nothing refers to the bean.
pub fn rename_symbol(
    type_filter: Option<&str>,
    old_name: &str,
    new_name: &str,
    source: &SourceFile,
) -> Result<SourceFile, RecipeError> {
    let recipe = RenameBean::new(type_filter.map(str::to_string), old_name, new_name)?;
    let run = recipe.run(std::slice::from_ref(source))?;
    Ok(run.changed(&source.path).cloned().unwrap_or_else(|| source.clone()))
}

#[cfg(test)]
#[path = "../tests/rename_bean_tests.rs"]
mod rename_bean_tests;
