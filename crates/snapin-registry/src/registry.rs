//! DeclarationRegistry - the in-memory type universe.
//!
//! # Storage Model
//!
//! - **Types**: All declarations stored in a single map by `QualifiedName`
//! - **Packages**: A secondary index, package -> simple names, used to answer
//!   "is this name taken in the target package" without a scan
//!
//! # Thread Safety
//!
//! `DeclarationRegistry` is populated single-threaded before generation and
//! only read afterwards. Generation of independent templates may share it
//! through `&DeclarationRegistry` across threads.
//!
//! # Example
//!
//! ```
//! use snapin_core::{TypeDecl, TypeUniverse};
//! use snapin_registry::DeclarationRegistry;
//!
//! let mut registry = DeclarationRegistry::with_marker_contract();
//! registry.register_type(TypeDecl::interface("a.Example")).unwrap();
//!
//! assert!(registry.contains(&"a.Example".into()));
//! assert!(registry.contains(&"mbenson.snapin.SnapinTemplate".into()));
//! ```

use std::path::Path;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use tracing::debug;

use snapin_core::{
    QualifiedName, RegistrationError, TypeDecl, TypeParamDecl, TypeUniverse,
    DEFAULT_MARKER_CONTRACT,
};

/// Shape of a JSON declaration document.
#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Wrapped { types: Vec<TypeDecl> },
    Bare(Vec<TypeDecl>),
}

impl Document {
    fn into_types(self) -> Vec<TypeDecl> {
        match self {
            Document::Wrapped { types } | Document::Bare(types) => types,
        }
    }
}

/// In-memory declaration storage.
#[derive(Debug, Default, Clone)]
pub struct DeclarationRegistry {
    /// Declarations by qualified name (PRIMARY storage).
    types: FxHashMap<QualifiedName, TypeDecl>,

    /// Package index: dotted package -> simple names declared in it.
    types_by_package: FxHashMap<String, FxHashSet<String>>,
}

impl DeclarationRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the default marker contract
    /// `mbenson.snapin.SnapinTemplate<T>`.
    pub fn with_marker_contract() -> Self {
        let mut registry = Self::new();
        registry.register_marker_contract(QualifiedName::from(DEFAULT_MARKER_CONTRACT));
        registry
    }

    /// Decode declarations from a JSON document.
    ///
    /// Accepts either a bare array of declarations or `{ "types": [...] }`.
    /// The default marker contract is registered unless the document
    /// declares it itself.
    pub fn from_json_str(json: &str) -> Result<Self, RegistrationError> {
        let document: Document = serde_json::from_str(json)
            .map_err(|e| RegistrationError::InvalidDocument(e.to_string()))?;

        let mut registry = Self::new();
        for decl in document.into_types() {
            registry.register_type(decl)?;
        }
        let marker = QualifiedName::from(DEFAULT_MARKER_CONTRACT);
        if !registry.contains(&marker) {
            registry.register_marker_contract(marker);
        }
        Ok(registry)
    }

    /// Read and decode a JSON declaration document from disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RegistrationError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| RegistrationError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&json)
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a declaration.
    ///
    /// Returns an error if a declaration with the same qualified name exists.
    pub fn register_type(&mut self, decl: TypeDecl) -> Result<(), RegistrationError> {
        if self.types.contains_key(&decl.name) {
            return Err(RegistrationError::DuplicateType(decl.name.clone()));
        }

        debug!(name = %decl.name, kind = ?decl.kind, "registered declaration");

        self.types_by_package
            .entry(decl.name.package_string())
            .or_default()
            .insert(decl.name.simple_name().to_string());
        self.types.insert(decl.name.clone(), decl);
        Ok(())
    }

    /// Register a generic marker interface `name<T>`, replacing any previous one.
    pub fn register_marker_contract(&mut self, name: QualifiedName) {
        let marker = TypeDecl::interface(name.clone()).with_type_param(TypeParamDecl::new("T"));
        self.types_by_package
            .entry(name.package_string())
            .or_default()
            .insert(name.simple_name().to_string());
        self.types.insert(name, marker);
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// Get a declaration by its dotted name string.
    pub fn get_by_name(&self, name: &str) -> Option<&TypeDecl> {
        self.types.get(&QualifiedName::from_qualified_string(name))
    }

    /// Simple names declared in a dotted package.
    pub fn types_in_package(&self, package: &str) -> impl Iterator<Item = &str> {
        self.types_by_package
            .get(package)
            .into_iter()
            .flat_map(|names| names.iter().map(String::as_str))
    }

    /// Iterate over all declarations.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDecl> {
        self.types.values()
    }

    /// Number of registered declarations.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }
}

impl TypeUniverse for DeclarationRegistry {
    fn lookup(&self, name: &QualifiedName) -> Option<&TypeDecl> {
        self.types.get(name)
    }
}
