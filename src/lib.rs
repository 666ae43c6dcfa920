//! Snap-in class generator.
//!
//! A snap-in template is an abstract class that implements a marker contract
//! parameterized by a *delegate* type. For each template the generator
//! produces a class that:
//!
//! - keeps every unfinished (`protected abstract`) operation abstract,
//! - adds a wrapper per operation that temporarily installs a delegate,
//!   calls the operation, and clears the delegate again,
//! - implements the delegate type by forwarding to whatever delegate is
//!   currently installed.
//!
//! ## Crates
//!
//! - [`snapin_core`]: Declaration model and errors
//! - [`snapin_registry`]: In-memory type universe
//! - [`snapin_codegen`]: Synthesis and Java emission
//!
//! This crate adds the batch [`Generator`] and the [`SnapinCell`] runtime.

mod generator;
mod runtime;

pub use generator::{GenerationReport, Generator, TemplateRequest};
pub use runtime::SnapinCell;

pub use {snapin_codegen, snapin_core, snapin_registry};

pub mod prelude {
    pub use crate::generator::{GenerationReport, Generator, TemplateRequest};
    pub use crate::runtime::SnapinCell;
    pub use snapin_codegen::{
        ClassSynthesizer, CodeModel, CodeType, DefinedClass, GeneratorConfig, JavaWriter,
        MemberCollisionPolicy,
    };
    pub use snapin_core::{
        ConfigError, DEFAULT_MARKER_CONTRACT, DeclKind, GenerationError, GenericOwner, MethodDecl,
        Modifiers, ParamDecl, PrimitiveKind, QualifiedName, SnapinError, TypeDecl, TypeParamDecl,
        TypeRef, TypeUniverse, ValidationError,
    };
    pub use snapin_registry::DeclarationRegistry;
}
