//! Output-side type references.
//!
//! A [`CodeType`] is what ends up in generated source. Unlike the input
//! [`TypeRef`](snapin_core::TypeRef) it carries no owner identity: type
//! variables are plain names already valid in the scope where they are used,
//! and anything the resolver could not make sense of is kept as raw text.

use std::fmt;

use snapin_core::{PrimitiveKind, QualifiedName};

/// A type as written in generated source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CodeType {
    Primitive(PrimitiveKind),
    Void,
    /// A declared class or interface, possibly parameterized.
    Class {
        name: QualifiedName,
        args: Vec<CodeType>,
    },
    /// A type variable in scope at the point of use.
    Var(String),
    /// `?`
    Wildcard,
    /// `? extends T`
    WildcardExtends(Box<CodeType>),
    /// `? super T`
    WildcardSuper(Box<CodeType>),
    Array(Box<CodeType>),
    /// Best-effort textual reference for a type that could not be resolved.
    Raw(String),
}

impl CodeType {
    /// Raw (non-parameterized) reference to a class.
    pub fn class(name: impl Into<QualifiedName>) -> Self {
        CodeType::Class {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Parameterized reference to a class.
    pub fn narrowed(name: impl Into<QualifiedName>, args: Vec<CodeType>) -> Self {
        CodeType::Class {
            name: name.into(),
            args,
        }
    }

    pub fn var(name: impl Into<String>) -> Self {
        CodeType::Var(name.into())
    }

    pub fn array(component: CodeType) -> Self {
        CodeType::Array(Box::new(component))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, CodeType::Void)
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, CodeType::Raw(_))
    }

    /// Element type of an array, used for variable-arity parameters.
    pub fn element_type(&self) -> Option<&CodeType> {
        match self {
            CodeType::Array(component) => Some(component),
            _ => None,
        }
    }

    /// Type arguments of a parameterized class; empty otherwise.
    pub fn type_args(&self) -> &[CodeType] {
        match self {
            CodeType::Class { args, .. } => args,
            _ => &[],
        }
    }

    pub fn class_name(&self) -> Option<&QualifiedName> {
        match self {
            CodeType::Class { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Visit every class name referenced by this type, outermost first.
    pub fn visit_classes<'a>(&'a self, visit: &mut impl FnMut(&'a QualifiedName)) {
        match self {
            CodeType::Class { name, args } => {
                visit(name);
                for arg in args {
                    arg.visit_classes(visit);
                }
            }
            CodeType::WildcardExtends(bound) | CodeType::WildcardSuper(bound) => {
                bound.visit_classes(visit)
            }
            CodeType::Array(component) => component.visit_classes(visit),
            _ => {}
        }
    }

    /// Render with a caller-chosen spelling for class names.
    ///
    /// The emitter uses this to print imported classes by simple name.
    pub fn write_with(
        &self,
        f: &mut impl fmt::Write,
        class_name: &impl Fn(&QualifiedName) -> String,
    ) -> fmt::Result {
        match self {
            CodeType::Primitive(p) => write!(f, "{p}"),
            CodeType::Void => f.write_str("void"),
            CodeType::Class { name, args } => {
                f.write_str(&class_name(name))?;
                if !args.is_empty() {
                    f.write_char('<')?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        arg.write_with(f, class_name)?;
                    }
                    f.write_char('>')?;
                }
                Ok(())
            }
            CodeType::Var(name) | CodeType::Raw(name) => f.write_str(name),
            CodeType::Wildcard => f.write_char('?'),
            CodeType::WildcardExtends(bound) => {
                f.write_str("? extends ")?;
                bound.write_with(f, class_name)
            }
            CodeType::WildcardSuper(bound) => {
                f.write_str("? super ")?;
                bound.write_with(f, class_name)
            }
            CodeType::Array(component) => {
                component.write_with(f, class_name)?;
                f.write_str("[]")
            }
        }
    }
}

/// Fully qualified rendering.
impl fmt::Display for CodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_with(f, &|name: &QualifiedName| name.to_string())
    }
}
