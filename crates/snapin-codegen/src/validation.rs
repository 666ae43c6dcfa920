//! Template declaration checks.
//!
//! Validation is a pure precondition gate: it either accepts a template
//! or reports the first rule it breaks. Rules are checked in a fixed order,
//! so the reported error is deterministic for a given declaration.

use snapin_core::{QualifiedName, TypeDecl, TypeRef, TypeUniverse, ValidationError};

use crate::config::GeneratorConfig;

/// Checks templates against one marker contract.
#[derive(Debug, Clone)]
pub struct DeclarationValidator<'c> {
    marker: &'c QualifiedName,
}

impl<'c> DeclarationValidator<'c> {
    pub fn new(config: &'c GeneratorConfig) -> Self {
        Self {
            marker: &config.marker_contract,
        }
    }

    pub fn with_marker(marker: &'c QualifiedName) -> Self {
        Self { marker }
    }

    /// Check every precondition for generating `generated_name` from `template`.
    pub fn validate<U: TypeUniverse + ?Sized>(
        &self,
        universe: &U,
        template: &TypeDecl,
        generated_name: &str,
    ) -> Result<(), ValidationError> {
        let name = || template.name.clone();

        if template.kind != snapin_core::DeclKind::Class {
            return Err(ValidationError::NotAClass { template: name() });
        }
        if !template.is_abstract() {
            return Err(ValidationError::NotAbstract { template: name() });
        }
        if !self.implements_marker(universe, template) {
            return Err(ValidationError::ContractNotImplemented {
                template: name(),
                contract: self.marker.clone(),
            });
        }
        if template.template_operations().next().is_none() {
            return Err(ValidationError::NoUnfinishedOperations { template: name() });
        }

        match self.delegate_type(template) {
            None => return Err(ValidationError::DelegateTypeUnresolvable { template: name() }),
            Some(TypeRef::Declared { name: delegate, .. }) => {
                if !universe.contains(delegate) {
                    return Err(ValidationError::DelegateTypeUnresolvable { template: name() });
                }
            }
            Some(other) => {
                return Err(ValidationError::DelegateTypeWrongKind {
                    template: name(),
                    found: other.to_string(),
                });
            }
        }

        if generated_name.trim().is_empty() {
            return Err(ValidationError::BlankGeneratedName { template: name() });
        }
        Ok(())
    }

    /// First type argument of the first directly implemented marker contract.
    pub fn delegate_type<'d>(&self, template: &'d TypeDecl) -> Option<&'d TypeRef> {
        template
            .interfaces
            .iter()
            .filter(|i| i.erasure_name() == Some(self.marker))
            .flat_map(TypeRef::type_args)
            .next()
    }

    fn implements_marker<U: TypeUniverse + ?Sized>(
        &self,
        universe: &U,
        template: &TypeDecl,
    ) -> bool {
        template
            .superclass
            .iter()
            .chain(&template.interfaces)
            .filter_map(TypeRef::erasure_name)
            .any(|sup| universe.is_subtype_of(sup, self.marker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapin_core::{DEFAULT_MARKER_CONTRACT, MethodDecl, Modifiers, PrimitiveKind, TypeParamDecl};
    use snapin_registry::DeclarationRegistry;

    fn marker_of(delegate: TypeRef) -> TypeRef {
        TypeRef::declared(DEFAULT_MARKER_CONTRACT, vec![delegate])
    }

    fn template() -> TypeDecl {
        TypeDecl::class("a.Tmpl")
            .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
            .with_interface(marker_of(TypeRef::class("a.Example")))
            .with_method(MethodDecl::template("foo"))
    }

    fn registry() -> DeclarationRegistry {
        let mut registry = DeclarationRegistry::with_marker_contract();
        registry.register_type(TypeDecl::interface("a.Example")).unwrap();
        registry
    }

    fn check(decl: &TypeDecl, name: &str) -> Result<(), ValidationError> {
        let marker = QualifiedName::from(DEFAULT_MARKER_CONTRACT);
        DeclarationValidator::with_marker(&marker).validate(&registry(), decl, name)
    }

    #[test]
    fn well_formed_template_passes() {
        assert_eq!(check(&template(), "ExampleSnapin"), Ok(()));
    }

    #[test]
    fn interface_template_is_not_a_class() {
        let mut decl = template();
        decl.kind = snapin_core::DeclKind::Interface;
        assert!(matches!(check(&decl, "S"), Err(ValidationError::NotAClass { .. })));
    }

    #[test]
    fn concrete_template_is_rejected() {
        let decl = template().with_modifiers(Modifiers::PUBLIC);
        assert!(matches!(check(&decl, "S"), Err(ValidationError::NotAbstract { .. })));
    }

    #[test]
    fn missing_marker_is_rejected() {
        let mut decl = template();
        decl.interfaces.clear();
        let err = check(&decl, "S").unwrap_err();
        assert_eq!(err.to_string(), "a.Tmpl should implement mbenson.snapin.SnapinTemplate");
    }

    #[test]
    fn marker_through_superclass_satisfies_contract_but_not_delegate() {
        let mut registry = registry();
        registry
            .register_type(
                TypeDecl::class("a.Base")
                    .with_modifiers(Modifiers::ABSTRACT)
                    .with_interface(marker_of(TypeRef::class("a.Example"))),
            )
            .unwrap();
        let mut decl = template().with_superclass(TypeRef::class("a.Base"));
        decl.interfaces.clear();

        let marker = QualifiedName::from(DEFAULT_MARKER_CONTRACT);
        let result = DeclarationValidator::with_marker(&marker).validate(&registry, &decl, "S");
        assert!(matches!(result, Err(ValidationError::DelegateTypeUnresolvable { .. })));
    }

    #[test]
    fn public_abstract_methods_are_not_template_operations() {
        let mut decl = template();
        decl.methods = vec![
            MethodDecl::new("run").with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT),
        ];
        assert!(matches!(
            check(&decl, "S"),
            Err(ValidationError::NoUnfinishedOperations { .. })
        ));
    }

    #[test]
    fn raw_marker_has_no_delegate() {
        let mut decl = template();
        decl.interfaces = vec![TypeRef::class(DEFAULT_MARKER_CONTRACT)];
        assert!(matches!(
            check(&decl, "S"),
            Err(ValidationError::DelegateTypeUnresolvable { .. })
        ));
    }

    #[test]
    fn unknown_delegate_is_unresolvable() {
        let mut decl = template();
        decl.interfaces = vec![marker_of(TypeRef::class("a.Nowhere"))];
        assert!(matches!(
            check(&decl, "S"),
            Err(ValidationError::DelegateTypeUnresolvable { .. })
        ));
    }

    #[test]
    fn non_declared_delegate_is_wrong_kind() {
        let mut decl = template().with_type_param(TypeParamDecl::new("T"));
        decl.interfaces = vec![marker_of(TypeRef::var("T", decl.owner()))];
        assert_eq!(
            check(&decl, "S"),
            Err(ValidationError::DelegateTypeWrongKind {
                template: "a.Tmpl".into(),
                found: "T".into(),
            })
        );

        decl.interfaces = vec![marker_of(TypeRef::array(TypeRef::primitive(PrimitiveKind::Int)))];
        assert!(matches!(
            check(&decl, "S"),
            Err(ValidationError::DelegateTypeWrongKind { .. })
        ));
    }

    #[test]
    fn blank_name_is_rejected_last() {
        assert!(matches!(
            check(&template(), "   "),
            Err(ValidationError::BlankGeneratedName { .. })
        ));

        let decl = template().with_modifiers(Modifiers::PUBLIC);
        assert!(matches!(check(&decl, ""), Err(ValidationError::NotAbstract { .. })));
    }

    #[test]
    fn delegate_type_reads_first_marker_argument() {
        let marker = QualifiedName::from(DEFAULT_MARKER_CONTRACT);
        let decl = template();
        assert_eq!(
            DeclarationValidator::with_marker(&marker).delegate_type(&decl),
            Some(&TypeRef::class("a.Example"))
        );
    }
}
