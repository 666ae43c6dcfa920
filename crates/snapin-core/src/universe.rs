//! Host type-system introspection.
//!
//! The generator never discovers declarations itself; it asks a
//! [`TypeUniverse`] for them. Erasure-based assignability is provided on top
//! of plain lookup.

use rustc_hash::FxHashSet;

use crate::{QualifiedName, TypeDecl};

/// Lookup facility over every declaration visible to one generation run.
pub trait TypeUniverse {
    /// Find a declaration by qualified name.
    fn lookup(&self, name: &QualifiedName) -> Option<&TypeDecl>;

    /// Check if a declaration exists.
    fn contains(&self, name: &QualifiedName) -> bool {
        self.lookup(name).is_some()
    }

    /// Whether the erasure of `sub` is assignable to the erasure of `sup`.
    ///
    /// Walks superclasses and interfaces transitively. Supertypes missing
    /// from the universe end the walk along that path; cycles are tolerated.
    fn is_subtype_of(&self, sub: &QualifiedName, sup: &QualifiedName) -> bool {
        let mut visited = FxHashSet::default();
        let mut pending = vec![sub.clone()];

        while let Some(current) = pending.pop() {
            if &current == sup {
                return true;
            }
            if !visited.insert(current.clone()) {
                continue;
            }
            if let Some(decl) = self.lookup(&current) {
                pending.extend(
                    decl.superclass
                        .iter()
                        .chain(decl.interfaces.iter())
                        .filter_map(|t| t.erasure_name().cloned()),
                );
            }
        }
        false
    }
}

impl<U: TypeUniverse + ?Sized> TypeUniverse for &U {
    fn lookup(&self, name: &QualifiedName) -> Option<&TypeDecl> {
        (**self).lookup(name)
    }
}
