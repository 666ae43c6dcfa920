//! Generated class, field and method declarations.

use snapin_core::{Modifiers, QualifiedName};

use crate::model::{Block, CodeType, Expr};

/// `java.lang.Override`
pub const OVERRIDE: &str = "java.lang.Override";

/// A generic parameter on a generated class or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParam {
    pub name: String,
    pub bounds: Vec<CodeType>,
}

impl TypeParam {
    pub fn new(name: impl Into<String>, bounds: Vec<CodeType>) -> Self {
        Self {
            name: name.into(),
            bounds,
        }
    }
}

/// A field on a generated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub modifiers: Modifiers,
    pub ty: CodeType,
    pub name: String,
}

/// A parameter on a generated method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub modifiers: Modifiers,
    /// For a variadic parameter, the element type.
    pub ty: CodeType,
    pub name: String,
    pub variadic: bool,
}

/// A method on a generated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub modifiers: Modifiers,
    pub name: String,
    pub type_params: Vec<TypeParam>,
    pub return_type: CodeType,
    pub params: Vec<Param>,
    pub throws: Vec<CodeType>,
    pub annotations: Vec<QualifiedName>,
    /// `None` for abstract methods.
    pub body: Option<Block>,
}

impl Method {
    /// Create a method; abstract methods get no body.
    pub fn new(modifiers: Modifiers, return_type: CodeType, name: impl Into<String>) -> Self {
        let body = (!modifiers.contains(Modifiers::ABSTRACT)).then(Block::new);
        Self {
            modifiers,
            name: name.into(),
            type_params: Vec::new(),
            return_type,
            params: Vec::new(),
            throws: Vec::new(),
            annotations: Vec::new(),
            body,
        }
    }

    pub fn generify(&mut self, param: TypeParam) -> &mut Self {
        self.type_params.push(param);
        self
    }

    /// Add a parameter and return a reference expression to it.
    pub fn param(&mut self, modifiers: Modifiers, ty: CodeType, name: impl Into<String>) -> Expr {
        self.push_param(modifiers, ty, name.into(), false)
    }

    /// Add the variable-arity tail parameter of `element` type.
    ///
    /// Must be the last parameter added.
    pub fn var_param(
        &mut self,
        modifiers: Modifiers,
        element: CodeType,
        name: impl Into<String>,
    ) -> Expr {
        self.push_param(modifiers, element, name.into(), true)
    }

    fn push_param(
        &mut self,
        modifiers: Modifiers,
        ty: CodeType,
        name: String,
        variadic: bool,
    ) -> Expr {
        let reference = Expr::var(&name);
        self.params.push(Param {
            modifiers,
            ty,
            name,
            variadic,
        });
        reference
    }

    pub fn throws(&mut self, ty: CodeType) -> &mut Self {
        self.throws.push(ty);
        self
    }

    pub fn annotate(&mut self, annotation: impl Into<QualifiedName>) -> &mut Self {
        self.annotations.push(annotation.into());
        self
    }

    /// Body of a concrete method, created on first access.
    pub fn body(&mut self) -> &mut Block {
        self.body.get_or_insert_with(Block::new)
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(Modifiers::ABSTRACT)
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn is_varargs(&self) -> bool {
        self.params.last().is_some_and(|p| p.variadic)
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }
}

/// A class in the output code model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinedClass {
    pub name: QualifiedName,
    pub modifiers: Modifiers,
    pub type_params: Vec<TypeParam>,
    pub extends: Option<CodeType>,
    pub implements: Vec<CodeType>,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
}

impl DefinedClass {
    pub fn new(modifiers: Modifiers, name: impl Into<QualifiedName>) -> Self {
        Self {
            name: name.into(),
            modifiers,
            type_params: Vec::new(),
            extends: None,
            implements: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn generify(&mut self, param: TypeParam) -> &mut Self {
        self.type_params.push(param);
        self
    }

    pub fn extends(&mut self, ty: CodeType) -> &mut Self {
        self.extends = Some(ty);
        self
    }

    pub fn implements(&mut self, ty: CodeType) -> &mut Self {
        self.implements.push(ty);
        self
    }

    /// Add a field and return an expression referring to it.
    pub fn field(&mut self, modifiers: Modifiers, ty: CodeType, name: impl Into<String>) -> Expr {
        let name = name.into();
        let reference = Expr::field(&name);
        self.fields.push(Field { modifiers, ty, name });
        reference
    }

    /// Add a method and return it for further building.
    pub fn method(
        &mut self,
        modifiers: Modifiers,
        return_type: CodeType,
        name: impl Into<String>,
    ) -> &mut Method {
        self.push_method(Method::new(modifiers, return_type, name))
    }

    pub fn push_method(&mut self, method: Method) -> &mut Method {
        let index = self.methods.len();
        self.methods.push(method);
        &mut self.methods[index]
    }

    // === Queries ===

    pub fn type_param_names(&self) -> impl Iterator<Item = &str> {
        self.type_params.iter().map(|p| p.name.as_str())
    }

    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Method> {
        self.methods.iter().filter(move |m| m.name == name)
    }

    /// This class as seen from inside its declaration (`Foo<T, U>`).
    pub fn as_type(&self) -> CodeType {
        CodeType::narrowed(
            self.name.clone(),
            self.type_params.iter().map(|p| CodeType::var(&p.name)).collect(),
        )
    }
}
