//! Type variable bindings.
//!
//! A [`BindingEnvironment`] maps a type variable, identified by its generic
//! owner and simple name, to the output type it stands for. Environments are
//! immutable once built: extending one for a method produces a derived copy,
//! so the delegate's base bindings are never polluted by one operation's
//! renames.
//!
//! An environment may also name a *generating scope*: the declaration whose
//! type parameters are being copied onto the generated class. Variables of
//! that owner resolve to same-named variables of the generated class without
//! needing explicit bindings.

use rustc_hash::FxHashMap;

use snapin_core::{GenericOwner, QualifiedName, TypeDecl, TypeParamDecl, TypeRef};

use crate::model::CodeType;
use crate::renamer::RenameMap;

/// Identity of a type variable: `(owner, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeVarKey {
    pub owner: GenericOwner,
    pub name: String,
}

impl TypeVarKey {
    pub fn new(owner: GenericOwner, name: impl Into<String>) -> Self {
        Self {
            owner,
            name: name.into(),
        }
    }
}

/// Mapping from type variables to output types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingEnvironment {
    bindings: FxHashMap<TypeVarKey, CodeType>,
    scope: Option<GenericOwner>,
}

impl BindingEnvironment {
    /// Empty environment with no generating scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty environment whose own variables belong to `scope`.
    pub fn scoped(scope: GenericOwner) -> Self {
        Self {
            bindings: FxHashMap::default(),
            scope: Some(scope),
        }
    }

    /// Bind the type parameters of `decl` positionally to `args`.
    ///
    /// Extra parameters or arguments are ignored. A raw reference (no
    /// arguments) binds every parameter to its erasure instead.
    pub fn from_type_arguments(decl: &TypeDecl, args: &[CodeType]) -> Self {
        if args.is_empty() {
            return Self::erased(decl);
        }
        let owner = decl.owner();
        let bindings = decl
            .type_params
            .iter()
            .zip(args)
            .map(|(param, arg)| (TypeVarKey::new(owner.clone(), &param.name), arg.clone()))
            .collect();
        Self {
            bindings,
            scope: None,
        }
    }

    /// Bind every type parameter of `decl` to the class its first bound
    /// names, or `java.lang.Object` when unbounded.
    pub fn erased(decl: &TypeDecl) -> Self {
        let owner = decl.owner();
        let bindings = decl
            .type_params
            .iter()
            .map(|param| {
                let erasure = CodeType::class(erasure_of(decl, param, 0));
                (TypeVarKey::new(owner.clone(), &param.name), erasure)
            })
            .collect();
        Self {
            bindings,
            scope: None,
        }
    }

    /// Add one binding.
    pub fn bind(mut self, owner: GenericOwner, name: impl Into<String>, ty: CodeType) -> Self {
        self.bindings.insert(TypeVarKey::new(owner, name), ty);
        self
    }

    /// Derived copy that also binds each renamed parameter of `owner` to
    /// the output variable carrying its new name.
    pub fn extended(&self, owner: &GenericOwner, renames: &RenameMap) -> Self {
        let mut derived = self.clone();
        for entry in renames.iter() {
            derived.bindings.insert(
                TypeVarKey::new(owner.clone(), &entry.original),
                CodeType::var(&entry.renamed),
            );
        }
        derived
    }

    pub fn lookup(&self, owner: &GenericOwner, name: &str) -> Option<&CodeType> {
        if self.bindings.is_empty() {
            return None;
        }
        self.bindings.get(&TypeVarKey::new(owner.clone(), name))
    }

    pub fn scope(&self) -> Option<&GenericOwner> {
        self.scope.as_ref()
    }

    pub fn is_scope(&self, owner: &GenericOwner) -> bool {
        self.scope.as_ref() == Some(owner)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Erasure of `param`, following bounds that name a sibling parameter.
fn erasure_of(decl: &TypeDecl, param: &TypeParamDecl, depth: usize) -> QualifiedName {
    match param.bounds.first() {
        Some(TypeRef::Declared { name, .. }) => name.clone(),
        Some(TypeRef::TypeVar { name, owner })
            if *owner == decl.owner() && depth < decl.type_params.len() =>
        {
            match decl.type_params.iter().find(|p| &p.name == name) {
                Some(sibling) => erasure_of(decl, sibling, depth + 1),
                None => QualifiedName::from(OBJECT),
            }
        }
        _ => QualifiedName::from(OBJECT),
    }
}

const OBJECT: &str = "java.lang.Object";
