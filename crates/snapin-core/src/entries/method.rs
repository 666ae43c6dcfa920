//! Method and parameter declarations.

use serde::{Deserialize, Serialize};

use crate::{GenericOwner, Modifiers, QualifiedName, TypeRef};

use super::TypeParamDecl;

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Only `final` is meaningful on parameters.
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl ParamDecl {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            modifiers: Modifiers::empty(),
        }
    }
}

fn void() -> TypeRef {
    TypeRef::Void
}

/// A method declared on a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Type parameters introduced by the method itself.
    #[serde(default)]
    pub type_params: Vec<TypeParamDecl>,
    #[serde(default = "void")]
    pub return_type: TypeRef,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
    /// Declared failure (`throws`) types.
    #[serde(default)]
    pub thrown: Vec<TypeRef>,
    /// Last parameter is a variable-arity tail; its declared type is an array.
    #[serde(default)]
    pub varargs: bool,
}

impl MethodDecl {
    /// Create a `void` method with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::PUBLIC,
            type_params: Vec::new(),
            return_type: TypeRef::Void,
            params: Vec::new(),
            thrown: Vec::new(),
            varargs: false,
        }
    }

    /// Create a `protected abstract` template operation.
    pub fn template(name: impl Into<String>) -> Self {
        Self::new(name).with_modifiers(Modifiers::PROTECTED | Modifiers::ABSTRACT)
    }

    // === Builder Methods ===

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_type_param(mut self, param: TypeParamDecl) -> Self {
        self.type_params.push(param);
        self
    }

    pub fn returns(mut self, return_type: TypeRef) -> Self {
        self.return_type = return_type;
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.params.push(ParamDecl::new(name, ty));
        self
    }

    /// Append a variable-arity tail parameter of `element` type.
    pub fn with_var_param(mut self, name: impl Into<String>, element: TypeRef) -> Self {
        self.params.push(ParamDecl::new(name, TypeRef::array(element)));
        self.varargs = true;
        self
    }

    pub fn throws(mut self, ty: TypeRef) -> Self {
        self.thrown.push(ty);
        self
    }

    // === Queries ===

    /// Generic owner identity for type variables introduced by this method.
    pub fn owner_on(&self, declaring_type: &QualifiedName) -> GenericOwner {
        GenericOwner::method(declaring_type.clone(), &self.name)
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Whether parameter `index` is the variable-arity tail.
    pub fn is_var_param(&self, index: usize) -> bool {
        self.varargs && index + 1 == self.params.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn var_param_marks_tail_only() {
        let m = MethodDecl::template("baz")
            .with_param("prefix", TypeRef::string())
            .with_var_param("s", TypeRef::string());
        assert!(m.varargs);
        assert!(!m.is_var_param(0));
        assert!(m.is_var_param(1));
        assert_eq!(m.params[1].ty.to_string(), "java.lang.String[]");
        assert_eq!(m.arity(), 2);
    }

    #[test]
    fn template_shape() {
        let m = MethodDecl::template("foo");
        assert!(m.modifiers.is_template_operation());
        assert!(m.return_type.is_void());
    }

    #[test]
    fn owner_is_method_scoped() {
        let m = MethodDecl::new("compose");
        let owner = m.owner_on(&QualifiedName::from("java.util.function.Function"));
        assert_eq!(owner.to_string(), "java.util.function.Function#compose");
    }

    #[test]
    fn return_type_defaults_to_void_in_json() {
        let m: MethodDecl = serde_json::from_str(r#"{ "name": "run" }"#).unwrap();
        assert!(m.return_type.is_void());
        assert!(m.params.is_empty());
    }
}
