//! Declaration entry types.
//!
//! - [`TypeDecl`] - Classes, interfaces, enums and annotation types
//! - [`MethodDecl`] - Methods with generics, variadic tail and thrown types
//! - [`ParamDecl`] - Method/constructor parameters
//! - [`TypeParamDecl`] - Generic parameters with bounds
//! - [`ConstructorDecl`] - Constructors (for extensibility checks)

mod method;
mod type_decl;

pub use method::{MethodDecl, ParamDecl};
pub use type_decl::{ConstructorDecl, DeclKind, TypeDecl, TypeParamDecl};
