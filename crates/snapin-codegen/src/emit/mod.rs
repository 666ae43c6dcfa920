//! Java source emission.
//!
//! [`JavaWriter`] renders one [`DefinedClass`] as a compilation unit:
//! package clause, imports, then the class body with fields before methods.
//! Classes are written by simple name wherever [`ImportSet`] allows it.

mod imports;

use std::fmt;

use snapin_core::{Modifiers, QualifiedName};

use crate::model::{Block, CodeType, DefinedClass, Expr, Method, Param, Stmt, TypeParam};

pub use imports::ImportSet;

/// Renders generated classes as Java source text.
#[derive(Debug, Clone)]
pub struct JavaWriter {
    indent: String,
}

impl Default for JavaWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl JavaWriter {
    /// Four-space indentation.
    pub fn new() -> Self {
        Self {
            indent: "    ".to_string(),
        }
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Render `class` as a complete `.java` file.
    pub fn render(&self, class: &DefinedClass) -> String {
        let imports = ImportSet::for_class(class);
        let mut unit = Unit {
            writer: self,
            imports: &imports,
            out: String::new(),
        };
        unit.class(class);
        unit.out
    }
}

/// Relative path of the source file for `name`, e.g. `a/b/Snap.java`.
pub fn source_path(name: &QualifiedName) -> std::path::PathBuf {
    let mut path: std::path::PathBuf = name.package_path().iter().collect();
    path.push(format!("{}.java", name.simple_name()));
    path
}

// ============================================================================
// Unit
// ============================================================================

/// Rendering state for one compilation unit.
struct Unit<'w> {
    writer: &'w JavaWriter,
    imports: &'w ImportSet,
    out: String,
}

impl Unit<'_> {
    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str(&self.writer.indent);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn ty(&self, ty: &CodeType) -> String {
        Spelled {
            ty,
            imports: self.imports,
        }
        .to_string()
    }

    fn class(&mut self, class: &DefinedClass) {
        if !class.name.is_unnamed_package() {
            self.line(0, &format!("package {};", class.name.package_string()));
            self.out.push('\n');
        }
        if !self.imports.is_empty() {
            let lines: Vec<String> =
                self.imports.imports().map(|i| format!("import {i};")).collect();
            for line in lines {
                self.line(0, &line);
            }
            self.out.push('\n');
        }

        let mut header = format!(
            "{}class {}{}",
            modifier_prefix(class.modifiers),
            class.name.simple_name(),
            self.type_params(&class.type_params)
        );
        if let Some(extends) = &class.extends {
            header.push_str(" extends ");
            header.push_str(&self.ty(extends));
        }
        if !class.implements.is_empty() {
            header.push_str(" implements ");
            header.push_str(&self.type_list(&class.implements));
        }
        header.push_str(" {");
        self.line(0, &header);

        for field in &class.fields {
            self.out.push('\n');
            let text = format!(
                "{}{} {};",
                modifier_prefix(field.modifiers),
                self.ty(&field.ty),
                field.name
            );
            self.line(1, &text);
        }
        for method in &class.methods {
            self.out.push('\n');
            self.method(method);
        }
        self.line(0, "}");
    }

    fn type_params(&self, params: &[TypeParam]) -> String {
        if params.is_empty() {
            return String::new();
        }
        let rendered: Vec<String> = params
            .iter()
            .map(|p| {
                if p.bounds.is_empty() {
                    p.name.clone()
                } else {
                    let bounds: Vec<String> = p.bounds.iter().map(|b| self.ty(b)).collect();
                    format!("{} extends {}", p.name, bounds.join(" & "))
                }
            })
            .collect();
        format!("<{}>", rendered.join(", "))
    }

    fn type_list(&self, types: &[CodeType]) -> String {
        types.iter().map(|t| self.ty(t)).collect::<Vec<_>>().join(", ")
    }

    fn param(&self, param: &Param) -> String {
        let ellipsis = if param.variadic { "..." } else { "" };
        format!(
            "{}{}{} {}",
            modifier_prefix(param.modifiers),
            self.ty(&param.ty),
            ellipsis,
            param.name
        )
    }

    fn method(&mut self, method: &Method) {
        for annotation in &method.annotations {
            let text = format!("@{}", self.imports.spell(annotation));
            self.line(1, &text);
        }

        let mut signature = modifier_prefix(method.modifiers);
        if !method.type_params.is_empty() {
            signature.push_str(&self.type_params(&method.type_params));
            signature.push(' ');
        }
        let params: Vec<String> = method.params.iter().map(|p| self.param(p)).collect();
        signature.push_str(&format!(
            "{} {}({})",
            self.ty(&method.return_type),
            method.name,
            params.join(", ")
        ));
        if !method.throws.is_empty() {
            signature.push_str(" throws ");
            signature.push_str(&self.type_list(&method.throws));
        }

        match &method.body {
            None => {
                signature.push(';');
                self.line(1, &signature);
            }
            Some(body) => {
                signature.push_str(" {");
                self.line(1, &signature);
                self.block(body, 2);
                self.line(1, "}");
            }
        }
    }

    fn block(&mut self, block: &Block, depth: usize) {
        for stmt in &block.stmts {
            self.stmt(stmt, depth);
        }
    }

    fn stmt(&mut self, stmt: &Stmt, depth: usize) {
        match stmt {
            Stmt::If { cond, then } => {
                let text = format!("if ({}) {{", self.expr(cond));
                self.line(depth, &text);
                self.block(then, depth + 1);
                self.line(depth, "}");
            }
            Stmt::Throw(expr) => {
                let text = format!("throw {};", self.expr(expr));
                self.line(depth, &text);
            }
            Stmt::Synchronized { lock, body } => {
                let text = format!("synchronized ({}) {{", self.expr(lock));
                self.line(depth, &text);
                self.block(body, depth + 1);
                self.line(depth, "}");
            }
            Stmt::Assign { target, value } => {
                let text = format!("{} = {};", self.expr(target), self.expr(value));
                self.line(depth, &text);
            }
            Stmt::Expr(expr) => {
                let text = format!("{};", self.expr(expr));
                self.line(depth, &text);
            }
            Stmt::Return(None) => self.line(depth, "return;"),
            Stmt::Return(Some(expr)) => {
                let text = format!("return {};", self.expr(expr));
                self.line(depth, &text);
            }
            Stmt::TryFinally { body, finally } => {
                self.line(depth, "try {");
                self.block(body, depth + 1);
                self.line(depth, "} finally {");
                self.block(finally, depth + 1);
                self.line(depth, "}");
            }
        }
    }

    fn expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Null => "null".to_string(),
            Expr::This => "this".to_string(),
            Expr::FieldRef(name) => format!("this.{name}"),
            Expr::Var(name) => name.clone(),
            Expr::Eq(lhs, rhs) => format!("{} == {}", self.expr(lhs), self.expr(rhs)),
            Expr::Ne(lhs, rhs) => format!("{} != {}", self.expr(lhs), self.expr(rhs)),
            Expr::New { ty, args } => format!("new {}({})", self.ty(ty), self.args(args)),
            Expr::Invoke {
                target: Some(target),
                method,
                args,
            } => format!("{}.{}({})", self.expr(target), method, self.args(args)),
            Expr::Invoke {
                target: None,
                method,
                args,
            } => format!("{}({})", method, self.args(args)),
            Expr::StringLit(text) => string_literal(text),
        }
    }

    fn args(&self, args: &[Expr]) -> String {
        args.iter().map(|a| self.expr(a)).collect::<Vec<_>>().join(", ")
    }
}

/// A type spelled with the unit's imports in effect.
struct Spelled<'a> {
    ty: &'a CodeType,
    imports: &'a ImportSet,
}

impl fmt::Display for Spelled<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.ty.write_with(f, &|name: &QualifiedName| self.imports.spell(name))
    }
}

/// Keywords followed by a space, or nothing for empty modifiers.
fn modifier_prefix(modifiers: Modifiers) -> String {
    if modifiers.is_empty() {
        String::new()
    } else {
        format!("{modifiers} ")
    }
}

fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
