//! Type reference resolution.
//!
//! Converts input [`TypeRef`]s into output [`CodeType`]s under a
//! [`BindingEnvironment`]. Resolution never fails: anything that cannot be
//! mapped faithfully degrades to a [`CodeType::Raw`] carrying the source
//! text, so generated code still names what the declaration wrote.

use tracing::warn;

use snapin_core::{TypeParamDecl, TypeRef, TypeUniverse, WildcardBound};

use crate::binding::BindingEnvironment;
use crate::model::{CodeType, TypeParam};
use crate::renamer::RenameMap;

/// Resolves type references against one type universe.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'u, U: ?Sized> {
    universe: &'u U,
}

impl<'u, U: TypeUniverse + ?Sized> TypeResolver<'u, U> {
    pub fn new(universe: &'u U) -> Self {
        Self { universe }
    }

    /// Resolve one reference.
    pub fn resolve(&self, ty: &TypeRef, env: &BindingEnvironment) -> CodeType {
        match ty {
            TypeRef::Primitive { primitive } => CodeType::Primitive(*primitive),
            TypeRef::Void => CodeType::Void,
            TypeRef::Declared { name, args } => {
                let expected = self.universe.lookup(name).map(|d| d.type_params.len());
                if let Some(expected) = expected.filter(|&n| !args.is_empty() && n != args.len()) {
                    warn!(
                        ty = %ty,
                        expected,
                        found = args.len(),
                        "type argument count mismatch; emitting raw text"
                    );
                    return CodeType::Raw(ty.to_string());
                }
                CodeType::narrowed(name.clone(), self.resolve_all(args, env))
            }
            TypeRef::TypeVar { name, owner } => {
                if let Some(bound) = env.lookup(owner, name) {
                    bound.clone()
                } else if env.is_scope(owner) {
                    CodeType::var(name)
                } else {
                    warn!(var = %name, owner = %owner, "unbound type variable; emitting raw text");
                    CodeType::Raw(name.clone())
                }
            }
            TypeRef::Wildcard { bound: None } => CodeType::Wildcard,
            TypeRef::Wildcard {
                bound: Some(WildcardBound::Extends(bound)),
            } => CodeType::WildcardExtends(Box::new(self.resolve(bound, env))),
            TypeRef::Wildcard {
                bound: Some(WildcardBound::Super(bound)),
            } => CodeType::WildcardSuper(Box::new(self.resolve(bound, env))),
            TypeRef::Array { component } => CodeType::array(self.resolve(component, env)),
            TypeRef::Error { text } => {
                warn!(ty = %text, "unresolved type; emitting raw text");
                CodeType::Raw(text.clone())
            }
        }
    }

    pub fn resolve_all(&self, types: &[TypeRef], env: &BindingEnvironment) -> Vec<CodeType> {
        types.iter().map(|t| self.resolve(t, env)).collect()
    }

    /// Output type parameters for declarations copied without renaming.
    pub fn type_params(
        &self,
        params: &[TypeParamDecl],
        env: &BindingEnvironment,
    ) -> Vec<TypeParam> {
        params
            .iter()
            .map(|p| TypeParam::new(&p.name, self.resolve_all(&p.bounds, env)))
            .collect()
    }

    /// Output type parameters for a renamed copy.
    ///
    /// `env` must already bind the originals to their new names so bounds
    /// that mention sibling parameters follow the rename.
    pub fn renamed_type_params(
        &self,
        renames: &RenameMap,
        env: &BindingEnvironment,
    ) -> Vec<TypeParam> {
        renames
            .iter()
            .map(|r| TypeParam::new(&r.renamed, self.resolve_all(&r.bounds, env)))
            .collect()
    }
}
