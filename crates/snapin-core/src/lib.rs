//! Core declaration model for the snap-in generator.
//!
//! A snap-in template is an abstract class whose unfinished operations are
//! callback points, paired with a delegate type that is temporarily "snapped
//! in" for the duration of each callback. This crate holds everything the
//! generator reads: names, type references, declarations, the host
//! introspection trait, and the error taxonomy.
//!
//! ## Modules
//!
//! - [`entries`]: Type, method, parameter and type-parameter declarations
//! - [`types`]: Type references and generic owners
//! - [`error`]: Validation, generation, configuration and runtime errors

pub mod entries;
pub mod error;
mod modifiers;
mod qualified_name;
pub mod types;
mod universe;

pub use entries::{
    ConstructorDecl, DeclKind, MethodDecl, ParamDecl, TypeDecl, TypeParamDecl,
};
pub use error::{
    ConfigError, GenerationError, RegistrationError, SnapinError, ValidationError,
};
pub use modifiers::Modifiers;
pub use qualified_name::QualifiedName;
pub use types::{GenericOwner, PrimitiveKind, TypeRef, WildcardBound};
pub use universe::TypeUniverse;

/// Qualified name of the marker contract templates implement by default.
pub const DEFAULT_MARKER_CONTRACT: &str = "mbenson.snapin.SnapinTemplate";
