//! Type references as reported by the host's type-system introspection.
//!
//! A [`TypeRef`] is the *input* form of a type: it names declarations and
//! type variables by identity, and may carry error types the host could not
//! resolve. The generator turns these into output code-model types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::QualifiedName;

use super::PrimitiveKind;

/// The generic declaration that introduces a type variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenericOwner {
    /// A generic type, e.g. `java.util.function.Function` owning `T` and `R`.
    Type(QualifiedName),
    /// A generic method, e.g. `Function#compose` owning `V`.
    Method { owner: QualifiedName, method: String },
}

impl GenericOwner {
    /// Owner for a generic method declared on `owner`.
    pub fn method(owner: QualifiedName, method: impl Into<String>) -> Self {
        GenericOwner::Method {
            owner,
            method: method.into(),
        }
    }

    /// The type that declares this owner (itself, or the method's type).
    pub fn declaring_type(&self) -> &QualifiedName {
        match self {
            GenericOwner::Type(name) => name,
            GenericOwner::Method { owner, .. } => owner,
        }
    }
}

impl fmt::Display for GenericOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenericOwner::Type(name) => write!(f, "{name}"),
            GenericOwner::Method { owner, method } => write!(f, "{owner}#{method}"),
        }
    }
}

/// Bound of a wildcard type argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WildcardBound {
    /// `? extends T`
    Extends(Box<TypeRef>),
    /// `? super T`
    Super(Box<TypeRef>),
}

/// A reference to a type in the host type universe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    /// A primitive value type.
    Primitive { primitive: PrimitiveKind },
    /// The `void` pseudo-type (return types only).
    Void,
    /// A declared class or interface, possibly parameterized.
    Declared {
        name: QualifiedName,
        #[serde(default)]
        args: Vec<TypeRef>,
    },
    /// A type variable introduced by `owner`.
    TypeVar { name: String, owner: GenericOwner },
    /// A wildcard type argument.
    Wildcard {
        #[serde(default)]
        bound: Option<WildcardBound>,
    },
    /// An array type.
    Array { component: Box<TypeRef> },
    /// A type the host could not resolve; only its source text is known.
    Error { text: String },
}

impl TypeRef {
    /// A primitive type.
    pub fn primitive(primitive: PrimitiveKind) -> Self {
        TypeRef::Primitive { primitive }
    }

    /// A non-generic declared type.
    pub fn class(name: impl Into<QualifiedName>) -> Self {
        TypeRef::Declared {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A parameterized declared type.
    pub fn declared(name: impl Into<QualifiedName>, args: Vec<TypeRef>) -> Self {
        TypeRef::Declared {
            name: name.into(),
            args,
        }
    }

    /// A type variable owned by `owner`.
    pub fn var(name: impl Into<String>, owner: GenericOwner) -> Self {
        TypeRef::TypeVar {
            name: name.into(),
            owner,
        }
    }

    /// An array of `component`.
    pub fn array(component: TypeRef) -> Self {
        TypeRef::Array {
            component: Box::new(component),
        }
    }

    /// `?`
    pub fn unbounded() -> Self {
        TypeRef::Wildcard { bound: None }
    }

    /// `? extends bound`
    pub fn wildcard_extends(bound: TypeRef) -> Self {
        TypeRef::Wildcard {
            bound: Some(WildcardBound::Extends(Box::new(bound))),
        }
    }

    /// `? super bound`
    pub fn wildcard_super(bound: TypeRef) -> Self {
        TypeRef::Wildcard {
            bound: Some(WildcardBound::Super(Box::new(bound))),
        }
    }

    /// An unresolvable type known only by its text.
    pub fn error(text: impl Into<String>) -> Self {
        TypeRef::Error { text: text.into() }
    }

    /// `java.lang.String`, used often enough to warrant a shorthand.
    pub fn string() -> Self {
        TypeRef::class("java.lang.String")
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Void)
    }

    /// Name of the erased declaration, for declared types.
    pub fn erasure_name(&self) -> Option<&QualifiedName> {
        match self {
            TypeRef::Declared { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Type arguments of a declared type; empty otherwise.
    pub fn type_args(&self) -> &[TypeRef] {
        match self {
            TypeRef::Declared { args, .. } => args,
            _ => &[],
        }
    }

    /// Element type of an array type.
    pub fn component(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::Array { component } => Some(component),
            _ => None,
        }
    }

    /// Whether this reference (or anything nested in it) is an error type.
    pub fn contains_error(&self) -> bool {
        match self {
            TypeRef::Error { .. } => true,
            TypeRef::Declared { args, .. } => args.iter().any(TypeRef::contains_error),
            TypeRef::Array { component } => component.contains_error(),
            TypeRef::Wildcard {
                bound: Some(WildcardBound::Extends(b) | WildcardBound::Super(b)),
            } => b.contains_error(),
            _ => false,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive { primitive } => write!(f, "{primitive}"),
            TypeRef::Void => write!(f, "void"),
            TypeRef::Declared { name, args } => {
                write!(f, "{name}")?;
                if !args.is_empty() {
                    let args: Vec<String> = args.iter().map(ToString::to_string).collect();
                    write!(f, "<{}>", args.join(","))?;
                }
                Ok(())
            }
            TypeRef::TypeVar { name, .. } => write!(f, "{name}"),
            TypeRef::Wildcard { bound: None } => write!(f, "?"),
            TypeRef::Wildcard {
                bound: Some(WildcardBound::Extends(b)),
            } => write!(f, "? extends {b}"),
            TypeRef::Wildcard {
                bound: Some(WildcardBound::Super(b)),
            } => write!(f, "? super {b}"),
            TypeRef::Array { component } => write!(f, "{component}[]"),
            TypeRef::Error { text } => write!(f, "{text}"),
        }
    }
}
