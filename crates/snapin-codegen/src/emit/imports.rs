//! Import computation for one generated compilation unit.
//!
//! A referenced class is written by simple name when that is unambiguous:
//! `java.lang` classes and classes in the unit's own package need no
//! import, everything else is imported. A simple name shared by two
//! referenced classes, or shadowed by a type variable or the generated class
//! itself, stays fully qualified everywhere.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashSet;

use snapin_core::QualifiedName;

use crate::model::{Block, DefinedClass, Expr, Method, Stmt};

const JAVA_LANG: [&str; 2] = ["java", "lang"];

/// Imports and simple-name spellings for one class.
#[derive(Debug, Clone, Default)]
pub struct ImportSet {
    imports: BTreeSet<QualifiedName>,
    by_simple_name: FxHashSet<QualifiedName>,
}

impl ImportSet {
    /// Compute imports for everything `class` references.
    pub fn for_class(class: &DefinedClass) -> Self {
        let mut referenced = BTreeSet::new();
        visit_class(class, &mut |name| {
            referenced.insert(name.clone());
        });

        let mut shadowed: FxHashSet<&str> = class.type_param_names().collect();
        for method in &class.methods {
            shadowed.extend(method.type_params.iter().map(|p| p.name.as_str()));
        }

        let mut groups: BTreeMap<&str, Vec<&QualifiedName>> = BTreeMap::new();
        for name in &referenced {
            groups.entry(name.simple_name()).or_default().push(name);
        }

        let mut set = ImportSet::default();
        set.by_simple_name.insert(class.name.clone());
        for (simple, names) in groups {
            let [name] = names.as_slice() else {
                continue;
            };
            if **name == class.name {
                continue;
            }
            if shadowed.contains(simple) || simple == class.name.simple_name() {
                continue;
            }
            let needs_import = !(name.package_path() == JAVA_LANG
                || name.package_path() == class.name.package_path()
                || name.is_unnamed_package());
            if needs_import {
                set.imports.insert((*name).clone());
            }
            set.by_simple_name.insert((*name).clone());
        }
        set
    }

    /// How `name` is written in this unit.
    pub fn spell(&self, name: &QualifiedName) -> String {
        if self.by_simple_name.contains(name) {
            name.simple_name().to_string()
        } else {
            name.to_string()
        }
    }

    /// Import declarations, sorted by qualified name.
    pub fn imports(&self) -> impl Iterator<Item = &QualifiedName> {
        self.imports.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }
}

// ============================================================================
// Reference collection
// ============================================================================

fn visit_class<'a>(class: &'a DefinedClass, visit: &mut impl FnMut(&'a QualifiedName)) {
    let bounds = class.type_params.iter().flat_map(|p| &p.bounds);
    let supertypes = class.extends.iter().chain(&class.implements);
    let fields = class.fields.iter().map(|f| &f.ty);
    for ty in bounds.chain(supertypes).chain(fields) {
        ty.visit_classes(visit);
    }
    for method in &class.methods {
        visit_method(method, visit);
    }
}

fn visit_method<'a>(method: &'a Method, visit: &mut impl FnMut(&'a QualifiedName)) {
    for annotation in &method.annotations {
        visit(annotation);
    }
    let bounds = method.type_params.iter().flat_map(|p| &p.bounds);
    let params = method.params.iter().map(|p| &p.ty);
    for ty in bounds
        .chain(std::iter::once(&method.return_type))
        .chain(params)
        .chain(&method.throws)
    {
        ty.visit_classes(visit);
    }
    if let Some(body) = &method.body {
        visit_block(body, visit);
    }
}

fn visit_block<'a>(block: &'a Block, visit: &mut impl FnMut(&'a QualifiedName)) {
    for stmt in &block.stmts {
        match stmt {
            Stmt::If { cond, then } => {
                visit_expr(cond, visit);
                visit_block(then, visit);
            }
            Stmt::Synchronized { lock, body } => {
                visit_expr(lock, visit);
                visit_block(body, visit);
            }
            Stmt::Assign { target, value } => {
                visit_expr(target, visit);
                visit_expr(value, visit);
            }
            Stmt::Throw(expr) | Stmt::Expr(expr) | Stmt::Return(Some(expr)) => {
                visit_expr(expr, visit)
            }
            Stmt::Return(None) => {}
            Stmt::TryFinally { body, finally } => {
                visit_block(body, visit);
                visit_block(finally, visit);
            }
        }
    }
}

fn visit_expr<'a>(expr: &'a Expr, visit: &mut impl FnMut(&'a QualifiedName)) {
    match expr {
        Expr::Eq(lhs, rhs) | Expr::Ne(lhs, rhs) => {
            visit_expr(lhs, visit);
            visit_expr(rhs, visit);
        }
        Expr::New { ty, args } => {
            ty.visit_classes(visit);
            for arg in args {
                visit_expr(arg, visit);
            }
        }
        Expr::Invoke { target, args, .. } => {
            if let Some(target) = target {
                visit_expr(target, visit);
            }
            for arg in args {
                visit_expr(arg, visit);
            }
        }
        Expr::Null | Expr::This | Expr::FieldRef(_) | Expr::Var(_) | Expr::StringLit(_) => {}
    }
}
