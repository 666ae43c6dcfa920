//! Output code model.
//!
//! The synthesizer builds [`DefinedClass`]es here; the
//! [`JavaWriter`](crate::emit::JavaWriter) turns them into source text.
//!
//! - [`CodeType`]: Types as written in generated source
//! - [`DefinedClass`], [`Method`], [`Field`], [`Param`]: Declarations
//! - [`Block`], [`Stmt`], [`Expr`]: Method bodies

mod class;
mod stmt;
mod types;

use std::collections::BTreeMap;

use snapin_core::QualifiedName;

pub use class::{DefinedClass, Field, Method, OVERRIDE, Param, TypeParam};
pub use stmt::{Block, Expr, Stmt};
pub use types::CodeType;

/// Every class defined during a generation run, ordered by name.
#[derive(Debug, Clone, Default)]
pub struct CodeModel {
    classes: BTreeMap<QualifiedName, DefinedClass>,
}

impl CodeModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a finished class.
    ///
    /// Hands the class back if its name is already defined.
    pub fn define_class(&mut self, class: DefinedClass) -> Result<&DefinedClass, DefinedClass> {
        if self.classes.contains_key(&class.name) {
            return Err(class);
        }
        let name = class.name.clone();
        Ok(self.classes.entry(name).or_insert(class))
    }

    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.classes.contains_key(name)
    }

    pub fn get(&self, name: &QualifiedName) -> Option<&DefinedClass> {
        self.classes.get(name)
    }

    pub fn classes(&self) -> impl Iterator<Item = &DefinedClass> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapin_core::Modifiers;

    #[test]
    fn define_class_rejects_duplicates() {
        let mut model = CodeModel::new();
        assert!(model.define_class(DefinedClass::new(Modifiers::PUBLIC, "a.X")).is_ok());
        let rejected = model
            .define_class(DefinedClass::new(Modifiers::FINAL, "a.X"))
            .unwrap_err();
        assert_eq!(rejected.modifiers, Modifiers::FINAL);
        assert_eq!(model.len(), 1);
        assert_eq!(model.get(&"a.X".into()).unwrap().modifiers, Modifiers::PUBLIC);
    }

    #[test]
    fn classes_iterate_in_name_order() {
        let mut model = CodeModel::new();
        model.define_class(DefinedClass::new(Modifiers::PUBLIC, "b.Y")).unwrap();
        model.define_class(DefinedClass::new(Modifiers::PUBLIC, "a.X")).unwrap();
        let names: Vec<_> = model.classes().map(|c| c.name.to_string()).collect();
        assert_eq!(names, vec!["a.X", "b.Y"]);
    }
}
