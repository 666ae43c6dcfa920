//! Generator configuration.
//!
//! Every knob has a default matching the stock snap-in contract, so an empty
//! TOML document is a valid configuration:
//!
//! ```toml
//! marker_contract = "mbenson.snapin.SnapinTemplate"
//! holder_field = "delegate"
//! rename_prefix = "_"
//! member_collisions = "warn"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use snapin_core::{ConfigError, DEFAULT_MARKER_CONTRACT, QualifiedName};

/// Prefix applied to clashing type variable names until they are unique.
pub const DEFAULT_RENAME_PREFIX: &str = "_";

/// What to do when a template member and a delegate member share name and arity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberCollisionPolicy {
    /// Emit both members silently.
    Allow,
    /// Emit both members and log a warning.
    #[default]
    Warn,
    /// Fail the template with a member collision error.
    Deny,
}

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Interface templates implement; its first type argument names the delegate type.
    pub marker_contract: QualifiedName,
    /// Name of the generated holder field and the wrapper's leading parameter.
    pub holder_field: String,
    pub rename_prefix: String,
    /// Thrown by a wrapper invoked while a delegate is installed.
    pub reentrancy_error: QualifiedName,
    pub reentrancy_message: String,
    /// Thrown by a wrapper invoked with a null delegate.
    pub null_argument_error: QualifiedName,
    /// Thrown by a forwarding implementation when no delegate is installed.
    pub not_active_error: QualifiedName,
    pub member_collisions: MemberCollisionPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            marker_contract: QualifiedName::from(DEFAULT_MARKER_CONTRACT),
            holder_field: "delegate".to_string(),
            rename_prefix: DEFAULT_RENAME_PREFIX.to_string(),
            reentrancy_error: QualifiedName::from("java.lang.IllegalStateException"),
            reentrancy_message: "Re-entry not permitted".to_string(),
            null_argument_error: QualifiedName::from("java.lang.NullPointerException"),
            not_active_error: QualifiedName::from("java.lang.IllegalStateException"),
            member_collisions: MemberCollisionPolicy::default(),
        }
    }
}

impl GeneratorConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    pub fn with_member_collisions(mut self, policy: MemberCollisionPolicy) -> Self {
        self.member_collisions = policy;
        self
    }

    pub fn with_marker_contract(mut self, marker: impl Into<QualifiedName>) -> Self {
        self.marker_contract = marker.into();
        self
    }

    pub fn with_holder_field(mut self, name: impl Into<String>) -> Self {
        self.holder_field = name.into();
        self
    }

    pub fn with_rename_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.rename_prefix = prefix.into();
        self
    }

    /// Check that generated names will be legal identifiers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_identifier(&self.holder_field) {
            return Err(ConfigError::Invalid {
                field: "holder_field",
                reason: format!("'{}' is not a Java identifier", self.holder_field),
            });
        }
        if self.rename_prefix.is_empty() || !self.rename_prefix.chars().all(is_identifier_part) {
            return Err(ConfigError::Invalid {
                field: "rename_prefix",
                reason: format!(
                    "'{}' must be a non-empty run of identifier characters",
                    self.rename_prefix
                ),
            });
        }
        if self.marker_contract.simple_name().is_empty() {
            return Err(ConfigError::Invalid {
                field: "marker_contract",
                reason: "must name a type".to_string(),
            });
        }
        Ok(())
    }
}

fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Loose Java identifier check: letters, digits, `_` and `$`, not leading with a digit.
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if !first.is_ascii_digit() && is_identifier_part(first) => {
            chars.all(is_identifier_part)
        }
        _ => false,
    }
}
