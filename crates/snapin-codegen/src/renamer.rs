//! Type variable renaming.
//!
//! When an operation's own type parameters are copied onto a generated
//! method, their names may clash with the generated class's type
//! parameters. The renamer applies a prefix repeatedly until each name is
//! unused, then records the name so later parameters of the same operation
//! cannot take it either.
//!
//! ```
//! use snapin_codegen::renamer::TypeVariableRenamer;
//! use snapin_core::TypeParamDecl;
//!
//! let mut renamer = TypeVariableRenamer::new(["T", "_T"], "_");
//! let renames = renamer.copy(&[TypeParamDecl::new("T"), TypeParamDecl::new("U")]);
//!
//! assert_eq!(renames.get("T"), Some("__T"));
//! assert_eq!(renames.get("U"), Some("U"));
//! ```

use rustc_hash::FxHashSet;
use tracing::debug;

use snapin_core::{TypeParamDecl, TypeRef};

use crate::config::DEFAULT_RENAME_PREFIX;

/// One copied type parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedParam {
    pub original: String,
    pub renamed: String,
    /// Bounds as declared, still in terms of the original names.
    pub bounds: Vec<TypeRef>,
}

impl RenamedParam {
    pub fn is_renamed(&self) -> bool {
        self.original != self.renamed
    }
}

/// Original name to new name, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameMap {
    entries: Vec<RenamedParam>,
}

impl RenameMap {
    /// New name for `original`, if it was copied.
    pub fn get(&self, original: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.original == original)
            .map(|e| e.renamed.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenamedParam> {
        self.entries.iter()
    }

    pub fn renamed_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.renamed.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// First name in the sequence `name`, `prefix+name`, `prefix+prefix+name`, ...
/// that is not in `used`.
///
/// An empty prefix falls back to the default so the sequence always advances.
pub fn unique_name(name: &str, used: &FxHashSet<String>, prefix: &str) -> String {
    let prefix = if prefix.is_empty() {
        DEFAULT_RENAME_PREFIX
    } else {
        prefix
    };
    let mut candidate = name.to_string();
    while used.contains(&candidate) {
        candidate.insert_str(0, prefix);
    }
    candidate
}

/// Copies type parameters into a scope that already has some names taken.
#[derive(Debug, Clone)]
pub struct TypeVariableRenamer {
    used: FxHashSet<String>,
    prefix: String,
}

impl TypeVariableRenamer {
    /// Create a renamer with `taken` names already in scope.
    pub fn new<I, S>(taken: I, prefix: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prefix = if prefix.is_empty() {
            DEFAULT_RENAME_PREFIX
        } else {
            prefix
        };
        Self {
            used: taken.into_iter().map(Into::into).collect(),
            prefix: prefix.to_string(),
        }
    }

    /// Reserve a unique name derived from `name`.
    pub fn fresh_name(&mut self, name: &str) -> String {
        let fresh = unique_name(name, &self.used, &self.prefix);
        self.used.insert(fresh.clone());
        fresh
    }

    /// Copy `params` in order, renaming any that clash.
    pub fn copy(&mut self, params: &[TypeParamDecl]) -> RenameMap {
        let entries = params
            .iter()
            .map(|param| {
                let renamed = self.fresh_name(&param.name);
                if renamed != param.name {
                    debug!(from = %param.name, to = %renamed, "renamed type variable");
                }
                RenamedParam {
                    original: param.name.clone(),
                    renamed,
                    bounds: param.bounds.clone(),
                }
            })
            .collect();
        RenameMap { entries }
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(name)
    }
}
