//! Unified error types for snap-in generation.
//!
//! ## Error Hierarchy
//!
//! ```text
//! GenerationError (per-template, terminal for that template only)
//! ├── ValidationError   - template declaration is malformed
//! ├── TemplateNotFound  - request names an unknown declaration
//! ├── ClassAlreadyDefined
//! └── MemberCollision   - only under the `deny` collision policy
//! RegistrationError     - declarations could not be registered
//! ConfigError           - generator configuration could not be used
//! SnapinError           - runtime holder contract violations
//! ```
//!
//! Type resolution failures have no variant: unresolved types degrade to
//! textual references.

use thiserror::Error;

use crate::QualifiedName;

// ============================================================================
// Validation Errors
// ============================================================================

/// A template declaration failed a precondition check.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The template is an interface, enum or annotation.
    #[error("{template} should be a class")]
    NotAClass { template: QualifiedName },

    /// The template is not `abstract`.
    #[error("{template} should be abstract")]
    NotAbstract { template: QualifiedName },

    /// The template does not implement the marker contract.
    #[error("{template} should implement {contract}")]
    ContractNotImplemented {
        template: QualifiedName,
        contract: QualifiedName,
    },

    /// No `protected abstract` operations were found.
    #[error("found no template methods in {template}")]
    NoUnfinishedOperations { template: QualifiedName },

    /// The marker contract carries no type argument.
    #[error("unable to discover snap-in type for {template}")]
    DelegateTypeUnresolvable { template: QualifiedName },

    /// The marker contract's argument is not a declared type.
    #[error("unexpected snap-in type {found} on {template}")]
    DelegateTypeWrongKind {
        template: QualifiedName,
        found: String,
    },

    /// The requested generated class name is blank.
    #[error("snap-in name for {template} was blank")]
    BlankGeneratedName { template: QualifiedName },
}

impl ValidationError {
    /// The offending template declaration.
    pub fn template(&self) -> &QualifiedName {
        match self {
            ValidationError::NotAClass { template }
            | ValidationError::NotAbstract { template }
            | ValidationError::ContractNotImplemented { template, .. }
            | ValidationError::NoUnfinishedOperations { template }
            | ValidationError::DelegateTypeUnresolvable { template }
            | ValidationError::DelegateTypeWrongKind { template, .. }
            | ValidationError::BlankGeneratedName { template } => template,
        }
    }
}

// ============================================================================
// Generation Errors
// ============================================================================

/// Errors that stop generation of one template.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested template is not in the type universe.
    #[error("template {template} not found")]
    TemplateNotFound { template: QualifiedName },

    /// The generated name is already taken in the target package.
    #[error("unable to define class {name} for {template}: already defined")]
    ClassAlreadyDefined {
        template: QualifiedName,
        name: QualifiedName,
    },

    /// A template operation and a delegate operation share name and arity.
    #[error("{class}: member '{member}' with {arity} parameter(s) generated more than once")]
    MemberCollision {
        template: QualifiedName,
        class: QualifiedName,
        member: String,
        arity: usize,
    },
}

impl GenerationError {
    /// The template whose generation failed.
    pub fn template(&self) -> &QualifiedName {
        match self {
            GenerationError::Validation(e) => e.template(),
            GenerationError::TemplateNotFound { template }
            | GenerationError::ClassAlreadyDefined { template, .. }
            | GenerationError::MemberCollision { template, .. } => template,
        }
    }
}

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors populating a declaration registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    /// A declaration with this name already exists.
    #[error("duplicate type: {0}")]
    DuplicateType(QualifiedName),

    /// A declaration document could not be decoded.
    #[error("invalid declaration document: {0}")]
    InvalidDocument(String),

    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors loading or validating generator configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("invalid configuration: {0}")]
    Parse(String),

    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

// ============================================================================
// Runtime Errors
// ============================================================================

/// Violations of the holder contract, raised synchronously and never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SnapinError {
    /// A wrapper was invoked while a delegate was already installed.
    #[error("Re-entry not permitted")]
    Reentrancy,

    /// A wrapper was invoked without a delegate.
    #[error("delegate must not be null")]
    NullArgument,

    /// A forwarding call arrived while no delegate was installed.
    #[error("no delegate is active")]
    NotActive,
}
