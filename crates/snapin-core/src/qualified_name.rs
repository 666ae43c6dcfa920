use std::fmt;

use serde::{Deserialize, Serialize};

/// Qualified name for type identity during generation.
///
/// Used as primary key for declaration lookup and as the identity of
/// generated classes.
///
/// # Examples
///
/// ```
/// use snapin_core::QualifiedName;
///
/// // Default package
/// let example = QualifiedName::unnamed("Example");
/// assert_eq!(example.to_string(), "Example");
///
/// // With package
/// let list = QualifiedName::new("List", vec!["java".into(), "util".into()]);
/// assert_eq!(list.to_string(), "java.util.List");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct QualifiedName {
    /// Simple name (e.g., "List", "ExampleSnapin")
    pub name: String,
    /// Package path (e.g., ["java", "util"])
    /// Empty for the unnamed package
    pub package: Vec<String>,
}

impl QualifiedName {
    /// Create a new qualified name in a package.
    pub fn new(name: impl Into<String>, package: Vec<String>) -> Self {
        Self {
            name: name.into(),
            package,
        }
    }

    /// Create a qualified name in the unnamed package.
    pub fn unnamed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: Vec::new(),
        }
    }

    /// Create from a dotted string (e.g., "java.util.List").
    ///
    /// Splits on "." - the last segment is the name, rest is the package.
    /// Empty segments are dropped, so "java..util.List" == "java.util.List".
    pub fn from_qualified_string(s: &str) -> Self {
        let mut parts: Vec<String> = s
            .split('.')
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        match parts.pop() {
            Some(name) => Self {
                name,
                package: parts,
            },
            None => Self::unnamed(""),
        }
    }

    /// Check if this is in the unnamed package.
    pub fn is_unnamed_package(&self) -> bool {
        self.package.is_empty()
    }

    /// Get the simple (unqualified) name.
    pub fn simple_name(&self) -> &str {
        &self.name
    }

    /// Get the package path.
    pub fn package_path(&self) -> &[String] {
        &self.package
    }

    /// Get the package as a dotted string.
    pub fn package_string(&self) -> String {
        self.package.join(".")
    }

    /// Create a sibling name in the same package.
    ///
    /// Example: `a.b.Template` + `Snapin` = `a.b.Snapin`
    pub fn sibling(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: self.package.clone(),
        }
    }

    /// Create a child name nested under this one.
    ///
    /// Example: `a.b` + `Snapin` = `a.b.Snapin`
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut package = self.package.clone();
        package.push(self.name.clone());
        Self {
            name: name.into(),
            package,
        }
    }

    /// Get the enclosing package as a QualifiedName (if any).
    ///
    /// Example: `java.util.List` -> Some(`java.util`)
    pub fn parent(&self) -> Option<Self> {
        let (name, package) = self.package.split_last()?;
        Some(Self {
            name: name.clone(),
            package: package.to_vec(),
        })
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.package.join("."), self.name)
        }
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self::from_qualified_string(s)
    }
}

impl From<String> for QualifiedName {
    fn from(s: String) -> Self {
        Self::from_qualified_string(&s)
    }
}

impl From<QualifiedName> for String {
    fn from(name: QualifiedName) -> Self {
        name.to_string()
    }
}
