//! Snap-in class synthesis and Java emission.
//!
//! ## Pipeline
//!
//! ```text
//! TypeDecl ─► DeclarationValidator ─► ClassSynthesizer ─► CodeModel ─► JavaWriter
//!                                        │
//!                                        ├─ BindingEnvironment
//!                                        ├─ TypeResolver
//!                                        └─ TypeVariableRenamer
//! ```
//!
//! ## Modules
//!
//! - [`validation`]: Template precondition checks
//! - [`binding`]: Type variable to output type mappings
//! - [`resolver`]: Input type references to output types
//! - [`renamer`]: Collision-free type parameter copying
//! - [`synthesizer`]: Builds the generated class
//! - [`model`]: Output code model
//! - [`emit`]: Java source rendering
//! - [`config`]: Generator settings

pub mod binding;
pub mod config;
pub mod emit;
pub mod model;
pub mod renamer;
pub mod resolver;
pub mod synthesizer;
pub mod validation;

pub use binding::{BindingEnvironment, TypeVarKey};
pub use config::{DEFAULT_RENAME_PREFIX, GeneratorConfig, MemberCollisionPolicy};
pub use emit::{ImportSet, JavaWriter, source_path};
pub use model::{CodeModel, CodeType, DefinedClass};
pub use renamer::{RenameMap, TypeVariableRenamer};
pub use resolver::TypeResolver;
pub use synthesizer::ClassSynthesizer;
pub use validation::DeclarationValidator;
