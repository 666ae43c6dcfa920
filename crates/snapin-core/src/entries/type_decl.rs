//! Type declaration entry.
//!
//! This module provides `TypeDecl` for classes and interfaces, covering both
//! template declarations and delegate types.

use serde::{Deserialize, Serialize};

use crate::{GenericOwner, Modifiers, QualifiedName, TypeRef};

use super::{MethodDecl, ParamDecl};

/// Kind of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

impl DeclKind {
    pub fn is_interface(self) -> bool {
        matches!(self, DeclKind::Interface | DeclKind::Annotation)
    }
}

/// A generic type parameter with its (possibly empty) bound list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeParamDecl {
    pub name: String,
    /// Upper bounds, `T extends A & B`.
    #[serde(default)]
    pub bounds: Vec<TypeRef>,
}

impl TypeParamDecl {
    /// An unbounded type parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    /// Add an upper bound.
    pub fn bounded_by(mut self, bound: TypeRef) -> Self {
        self.bounds.push(bound);
        self
    }
}

/// A constructor, tracked only for extensibility checks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConstructorDecl {
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
}

impl ConstructorDecl {
    pub fn new(modifiers: Modifiers) -> Self {
        Self {
            modifiers,
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }
}

/// Declaration of a class, interface, enum or annotation type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Fully qualified name.
    pub name: QualifiedName,
    pub kind: DeclKind,
    #[serde(default)]
    pub modifiers: Modifiers,

    // === Generics ===
    #[serde(default)]
    pub type_params: Vec<TypeParamDecl>,

    // === Supertypes ===
    #[serde(default)]
    pub superclass: Option<TypeRef>,
    /// Directly implemented (or, for interfaces, extended) interfaces.
    #[serde(default)]
    pub interfaces: Vec<TypeRef>,

    // === Members ===
    /// Methods declared directly on this type, in declaration order.
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
    /// Declared constructors. Empty means the implicit public no-arg one.
    #[serde(default)]
    pub constructors: Vec<ConstructorDecl>,
}

impl TypeDecl {
    /// Create a new type declaration.
    pub fn new(name: impl Into<QualifiedName>, kind: DeclKind) -> Self {
        Self {
            name: name.into(),
            kind,
            modifiers: Modifiers::PUBLIC,
            type_params: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
        }
    }

    /// Create a class declaration.
    pub fn class(name: impl Into<QualifiedName>) -> Self {
        Self::new(name, DeclKind::Class)
    }

    /// Create an interface declaration.
    pub fn interface(name: impl Into<QualifiedName>) -> Self {
        Self::new(name, DeclKind::Interface)
    }

    // === Builder Methods ===

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_type_param(mut self, param: TypeParamDecl) -> Self {
        self.type_params.push(param);
        self
    }

    pub fn with_superclass(mut self, superclass: TypeRef) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn with_interface(mut self, interface: TypeRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_constructor(mut self, ctor: ConstructorDecl) -> Self {
        self.constructors.push(ctor);
        self
    }

    // === Queries ===

    /// Generic owner identity for this type's own parameters.
    pub fn owner(&self) -> GenericOwner {
        GenericOwner::Type(self.name.clone())
    }

    /// Reference to one of this type's own type variables.
    pub fn type_var(&self, name: impl Into<String>) -> TypeRef {
        TypeRef::var(name, self.owner())
    }

    /// This type as seen from inside its own declaration (`Foo<T, U>`).
    pub fn as_type_ref(&self) -> TypeRef {
        TypeRef::declared(
            self.name.clone(),
            self.type_params.iter().map(|p| self.type_var(&p.name)).collect(),
        )
    }

    pub fn is_interface(&self) -> bool {
        self.kind.is_interface()
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(Modifiers::ABSTRACT)
    }

    pub fn is_final(&self) -> bool {
        self.modifiers.contains(Modifiers::FINAL)
    }

    /// Unfinished (`protected abstract`) operations, in declaration order.
    pub fn template_operations(&self) -> impl Iterator<Item = &MethodDecl> {
        self.methods
            .iter()
            .filter(|m| m.modifiers.is_template_operation())
    }

    /// Instance operations visible to a forwarding caller (non-static, non-private).
    pub fn instance_operations(&self) -> impl Iterator<Item = &MethodDecl> {
        self.methods
            .iter()
            .filter(|m| !m.modifiers.intersects(Modifiers::STATIC | Modifiers::PRIVATE))
    }

    /// Whether a subclass in `package` can call a no-argument constructor.
    pub fn has_accessible_noarg_ctor(&self, package: &[String]) -> bool {
        if self.constructors.is_empty() {
            return true;
        }
        self.constructors
            .iter()
            .filter(|c| c.params.is_empty())
            .any(|c| {
                if c.modifiers.intersects(Modifiers::PUBLIC | Modifiers::PROTECTED) {
                    true
                } else if c.modifiers.contains(Modifiers::PRIVATE) {
                    false
                } else {
                    self.name.package_path() == package
                }
            })
    }

    /// A class that a type in `package` may extend.
    pub fn is_extensible_from(&self, package: &[String]) -> bool {
        self.kind == DeclKind::Class && !self.is_final() && self.has_accessible_noarg_ctor(package)
    }
}
