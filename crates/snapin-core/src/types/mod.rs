//! Type system definitions for the declaration model.
//!
//! - [`PrimitiveKind`]: Built-in value types
//! - [`TypeRef`]: Type references as seen through host introspection
//! - [`GenericOwner`]: Identity of the declaration introducing a type variable
//! - [`WildcardBound`]: Upper/lower wildcard bounds

mod primitive_kind;
mod type_ref;

pub use primitive_kind::PrimitiveKind;
pub use type_ref::{GenericOwner, TypeRef, WildcardBound};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_kind_names() {
        assert_eq!(PrimitiveKind::Boolean.name(), "boolean");
        assert_eq!(PrimitiveKind::Char.name(), "char");
        assert_eq!(PrimitiveKind::Int.name(), "int");
        assert_eq!(PrimitiveKind::Long.name(), "long");
        assert_eq!(PrimitiveKind::Double.name(), "double");
    }

    #[test]
    fn primitive_kind_display() {
        assert_eq!(format!("{}", PrimitiveKind::Int), "int");
        assert_eq!(format!("{}", PrimitiveKind::Float), "float");
    }
}
