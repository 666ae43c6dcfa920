//! Snap-in class synthesis.
//!
//! Builds one generated class from a validated template:
//!
//! 1. Declare `public abstract class <Name>` in the template's package,
//!    copying the template's type parameters.
//! 2. Add the private holder field typed by the delegate type.
//! 3. For each unfinished (`protected abstract`) template operation, add a
//!    pair: an abstract copy and a `final synchronized` wrapper taking the
//!    delegate as its leading parameter.
//! 4. Implement or extend the delegate type where possible and add a
//!    `public final synchronized` forwarding method for each of its instance
//!    operations.
//!
//! # Wrapper body
//!
//! ```text
//! if (this.delegate != null) throw new IllegalStateException("Re-entry not permitted");
//! if (delegate == null) throw new NullPointerException();
//! synchronized (this) {
//!     this.delegate = delegate;
//!     try {
//!         return foo(args);        // or: foo(args); return;
//!     } finally {
//!         this.delegate = null;
//!     }
//! }
//! ```
//!
//! # Forwarding body
//!
//! ```text
//! if (this.delegate == null) throw new IllegalStateException();
//! return this.delegate.bar(args);  // or: this.delegate.bar(args); return;
//! ```

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use snapin_core::{
    GenerationError, MethodDecl, Modifiers, QualifiedName, TypeDecl, TypeRef, TypeUniverse,
    ValidationError,
};

use crate::binding::BindingEnvironment;
use crate::config::{GeneratorConfig, MemberCollisionPolicy};
use crate::model::{
    Block, CodeModel, CodeType, DefinedClass, Expr, Method, OVERRIDE, Stmt, TypeParam,
};
use crate::renamer::{RenameMap, TypeVariableRenamer, unique_name};
use crate::resolver::TypeResolver;
use crate::validation::DeclarationValidator;

// ============================================================================
// Member bookkeeping
// ============================================================================

/// Which side of the snap-in a generated member came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Template,
    Delegate,
}

#[derive(Debug, Default, Clone, Copy)]
struct Origins {
    template: bool,
    delegate: bool,
}

/// Tracks generated members by `(name, arity)` to spot template/delegate clashes.
///
/// Overloads from the same side are legal Java and never reported.
#[derive(Debug)]
struct MemberLedger {
    policy: MemberCollisionPolicy,
    seen: FxHashMap<(String, usize), Origins>,
}

impl MemberLedger {
    fn new(policy: MemberCollisionPolicy) -> Self {
        Self {
            policy,
            seen: FxHashMap::default(),
        }
    }

    /// Record a member, returning whether it clashes with the other side.
    fn record(&mut self, origin: Origin, name: &str, arity: usize) -> bool {
        let origins = self.seen.entry((name.to_string(), arity)).or_default();
        let clash = match origin {
            Origin::Template => origins.delegate,
            Origin::Delegate => origins.template,
        };
        match origin {
            Origin::Template => origins.template = true,
            Origin::Delegate => origins.delegate = true,
        }
        clash
    }
}

// ============================================================================
// Draft
// ============================================================================

/// A generated class under construction.
struct Draft<'t> {
    template: &'t QualifiedName,
    class: DefinedClass,
    delegate_type: CodeType,
    holder: Expr,
    members: MemberLedger,
}

impl Draft<'_> {
    fn record(&mut self, origin: Origin, name: &str, arity: usize) -> Result<(), GenerationError> {
        if !self.members.record(origin, name, arity) {
            return Ok(());
        }
        match self.members.policy {
            MemberCollisionPolicy::Allow => Ok(()),
            MemberCollisionPolicy::Warn => {
                warn!(
                    class = %self.class.name,
                    member = name,
                    arity,
                    "template and delegate members share a signature shape"
                );
                Ok(())
            }
            MemberCollisionPolicy::Deny => Err(GenerationError::MemberCollision {
                template: self.template.clone(),
                class: self.class.name.clone(),
                member: name.to_string(),
                arity,
            }),
        }
    }

    fn taken_type_vars(&self) -> Vec<String> {
        self.class.type_param_names().map(str::to_string).collect()
    }
}

/// Shape of one copied parameter.
#[derive(Debug, Clone)]
struct ParamShape {
    modifiers: Modifiers,
    ty: CodeType,
    name: String,
    variadic: bool,
}

impl ParamShape {
    fn add_to(&self, method: &mut Method) -> Expr {
        if self.variadic {
            method.var_param(self.modifiers, self.ty.clone(), &self.name)
        } else {
            method.param(self.modifiers, self.ty.clone(), &self.name)
        }
    }
}

/// Resolved signature parts shared by every copy of one operation.
struct Signature {
    type_params: Vec<TypeParam>,
    return_type: CodeType,
    params: Vec<ParamShape>,
    thrown: Vec<CodeType>,
}

impl Signature {
    fn apply_to(&self, method: &mut Method) -> Vec<Expr> {
        for param in &self.type_params {
            method.generify(param.clone());
        }
        let args = self.params.iter().map(|p| p.add_to(method)).collect();
        for ty in &self.thrown {
            method.throws(ty.clone());
        }
        args
    }
}

// ============================================================================
// ClassSynthesizer
// ============================================================================

/// Generates snap-in classes from template declarations.
pub struct ClassSynthesizer<'a, U: ?Sized> {
    universe: &'a U,
    config: &'a GeneratorConfig,
    resolver: TypeResolver<'a, U>,
}

impl<'a, U: TypeUniverse + ?Sized> ClassSynthesizer<'a, U> {
    pub fn new(universe: &'a U, config: &'a GeneratorConfig) -> Self {
        Self {
            universe,
            config,
            resolver: TypeResolver::new(universe),
        }
    }

    /// Synthesize a class and define it in `model`.
    ///
    /// Fails with `ClassAlreadyDefined` if the model already holds the name;
    /// the model is left untouched on any failure.
    pub fn synthesize_into<'m>(
        &self,
        model: &'m mut CodeModel,
        template: &TypeDecl,
        generated_name: &str,
    ) -> Result<&'m DefinedClass, GenerationError> {
        let target = template.name.sibling(generated_name.trim());
        if model.contains(&target) {
            return Err(GenerationError::ClassAlreadyDefined {
                template: template.name.clone(),
                name: target,
            });
        }
        let class = self.synthesize(template, generated_name)?;
        model
            .define_class(class)
            .map_err(|class| GenerationError::ClassAlreadyDefined {
                template: template.name.clone(),
                name: class.name,
            })
    }

    /// Validate `template` and build the class named `generated_name` for it.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn synthesize(
        &self,
        template: &TypeDecl,
        generated_name: &str,
    ) -> Result<DefinedClass, GenerationError> {
        let validator = DeclarationValidator::new(self.config);
        validator.validate(self.universe, template, generated_name)?;

        let unresolvable = || ValidationError::DelegateTypeUnresolvable {
            template: template.name.clone(),
        };
        let delegate_ref = validator.delegate_type(template).ok_or_else(unresolvable)?;
        let delegate_decl = delegate_ref
            .erasure_name()
            .and_then(|name| self.universe.lookup(name))
            .ok_or_else(unresolvable)?;

        let name = template.name.sibling(generated_name.trim());
        if self.universe.contains(&name) {
            return Err(GenerationError::ClassAlreadyDefined {
                template: template.name.clone(),
                name,
            });
        }

        let class_env = BindingEnvironment::scoped(template.owner());
        let mut class = DefinedClass::new(Modifiers::PUBLIC | Modifiers::ABSTRACT, name);
        for param in self.resolver.type_params(&template.type_params, &class_env) {
            class.generify(param);
        }

        let delegate_type = self.resolver.resolve(delegate_ref, &class_env);
        let holder = class.field(
            Modifiers::PRIVATE,
            delegate_type.clone(),
            &self.config.holder_field,
        );

        let mut draft = Draft {
            template: &template.name,
            class,
            delegate_type,
            holder,
            members: MemberLedger::new(self.config.member_collisions),
        };

        for op in template.template_operations() {
            self.add_wrapper_pair(&mut draft, template, op, &class_env)?;
        }
        self.implement_delegate(&mut draft, template, delegate_decl)?;

        info!(
            class = %draft.class.name,
            template = %template.name,
            delegate = %draft.delegate_type,
            methods = draft.class.methods.len(),
            "synthesized snap-in class"
        );
        Ok(draft.class)
    }

    // ========================================================================
    // Template operations
    // ========================================================================

    fn add_wrapper_pair(
        &self,
        draft: &mut Draft<'_>,
        template: &TypeDecl,
        op: &MethodDecl,
        class_env: &BindingEnvironment,
    ) -> Result<(), GenerationError> {
        let mut renamer =
            TypeVariableRenamer::new(draft.taken_type_vars(), &self.config.rename_prefix);
        let renames = renamer.copy(&op.type_params);
        let env = class_env.extended(&op.owner_on(&template.name), &renames);
        let signature = self.signature(op, &renames, &env);

        draft.record(Origin::Template, &op.name, signature.params.len())?;
        draft.record(Origin::Template, &op.name, signature.params.len() + 1)?;

        let mut unfinished = Method::new(
            Modifiers::PROTECTED | Modifiers::ABSTRACT,
            signature.return_type.clone(),
            &op.name,
        );
        signature.apply_to(&mut unfinished);

        let mut wrapper = Method::new(
            Modifiers::FINAL | Modifiers::SYNCHRONIZED,
            signature.return_type.clone(),
            &op.name,
        );
        for param in &signature.type_params {
            wrapper.generify(param.clone());
        }
        let taken = op.params.iter().map(|p| p.name.clone()).collect();
        let delegate_name =
            unique_name(&self.config.holder_field, &taken, &self.config.rename_prefix);
        let delegate_param = wrapper.param(
            Modifiers::empty(),
            draft.delegate_type.clone(),
            &delegate_name,
        );
        let call = Expr::invoke(&op.name)
            .args(signature.params.iter().map(|p| p.add_to(&mut wrapper)).collect::<Vec<_>>());
        for ty in &signature.thrown {
            wrapper.throws(ty.clone());
        }

        self.wrapper_body(
            wrapper.body(),
            &draft.holder,
            delegate_param,
            call,
            signature.return_type.is_void(),
        );

        debug!(
            class = %draft.class.name,
            operation = %op.name,
            arity = signature.params.len(),
            "added template wrapper pair"
        );
        draft.class.push_method(unfinished);
        draft.class.push_method(wrapper);
        Ok(())
    }

    fn wrapper_body(
        &self,
        body: &mut Block,
        holder: &Expr,
        delegate_param: Expr,
        call: Expr,
        void_call: bool,
    ) {
        let reentrancy = Expr::new_instance(CodeType::class(self.config.reentrancy_error.clone()))
            .arg(Expr::StringLit(self.config.reentrancy_message.clone()));
        let null_argument =
            Expr::new_instance(CodeType::class(self.config.null_argument_error.clone()));

        body.throw_if(holder.clone().not_equal_to(Expr::Null), reentrancy);
        body.throw_if(delegate_param.clone().equal_to(Expr::Null), null_argument);

        let mut attempt = Block::new();
        attempt.call_and_return(call, void_call);
        let mut cleanup = Block::new();
        cleanup.assign(holder.clone(), Expr::Null);

        let mut guarded = Block::new();
        guarded.assign(holder.clone(), delegate_param);
        guarded.push(Stmt::TryFinally {
            body: attempt,
            finally: cleanup,
        });
        body.push(Stmt::Synchronized {
            lock: Expr::This,
            body: guarded,
        });
    }

    // ========================================================================
    // Delegate operations
    // ========================================================================

    fn implement_delegate(
        &self,
        draft: &mut Draft<'_>,
        template: &TypeDecl,
        delegate: &TypeDecl,
    ) -> Result<(), GenerationError> {
        let (inheritance, extending) = if delegate.is_interface() {
            draft.class.implements(draft.delegate_type.clone());
            (true, false)
        } else if delegate.is_extensible_from(template.name.package_path()) {
            draft.class.extends(draft.delegate_type.clone());
            (true, true)
        } else {
            debug!(delegate = %delegate.name, "delegate class is not extensible; forwarding only");
            (false, false)
        };

        let base_env =
            BindingEnvironment::from_type_arguments(delegate, draft.delegate_type.type_args());
        for op in delegate.instance_operations() {
            // A subclass cannot redeclare its superclass's final methods.
            if extending && op.modifiers.contains(Modifiers::FINAL) {
                debug!(
                    delegate = %delegate.name,
                    operation = %op.name,
                    "skipping final method of extended delegate"
                );
                continue;
            }
            self.add_forwarding(draft, delegate, op, &base_env, inheritance)?;
        }
        Ok(())
    }

    fn add_forwarding(
        &self,
        draft: &mut Draft<'_>,
        delegate: &TypeDecl,
        op: &MethodDecl,
        base_env: &BindingEnvironment,
        inheritance: bool,
    ) -> Result<(), GenerationError> {
        let mut renamer =
            TypeVariableRenamer::new(draft.taken_type_vars(), &self.config.rename_prefix);
        let renames = renamer.copy(&op.type_params);
        let env = base_env.extended(&op.owner_on(&delegate.name), &renames);
        let signature = self.signature(op, &renames, &env);

        draft.record(Origin::Delegate, &op.name, signature.params.len())?;

        let mut forward = Method::new(
            Modifiers::PUBLIC | Modifiers::SYNCHRONIZED | Modifiers::FINAL,
            signature.return_type.clone(),
            &op.name,
        );
        if inheritance {
            forward.annotate(OVERRIDE);
        }
        let args = signature.apply_to(&mut forward);
        let call = draft.holder.clone().invoke_on(&op.name).args(args);

        let not_active = Expr::new_instance(CodeType::class(self.config.not_active_error.clone()));
        forward
            .body()
            .throw_if(draft.holder.clone().equal_to(Expr::Null), not_active)
            .call_and_return(call, signature.return_type.is_void());

        debug!(
            class = %draft.class.name,
            operation = %op.name,
            arity = signature.params.len(),
            "added forwarding implementation"
        );
        draft.class.push_method(forward);
        Ok(())
    }

    // ========================================================================
    // Signatures
    // ========================================================================

    fn signature(
        &self,
        op: &MethodDecl,
        renames: &RenameMap,
        env: &BindingEnvironment,
    ) -> Signature {
        let params = op
            .params
            .iter()
            .enumerate()
            .map(|(index, param)| {
                let ty = self.resolver.resolve(&param.ty, env);
                let modifiers = param.modifiers & Modifiers::FINAL;
                let (ty, variadic) = if op.is_var_param(index) {
                    variadic_element(op, &param.ty, ty)
                } else {
                    (ty, false)
                };
                ParamShape {
                    modifiers,
                    ty,
                    name: param.name.clone(),
                    variadic,
                }
            })
            .collect();

        Signature {
            type_params: self.resolver.renamed_type_params(renames, env),
            return_type: self.resolver.resolve(&op.return_type, env),
            params,
            thrown: self.resolver.resolve_all(&op.thrown, env),
        }
    }
}

/// Element type for a variable-arity tail, or the type itself when the
/// declared tail is not an array.
fn variadic_element(op: &MethodDecl, declared: &TypeRef, resolved: CodeType) -> (CodeType, bool) {
    match resolved {
        CodeType::Array(element) => (*element, true),
        other => {
            warn!(
                operation = %op.name,
                ty = %declared,
                "variable-arity parameter is not an array; emitting as a plain parameter"
            );
            (other, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapin_core::{
        ConstructorDecl, DEFAULT_MARKER_CONTRACT, GenericOwner, ParamDecl, PrimitiveKind,
        TypeParamDecl,
    };
    use snapin_registry::DeclarationRegistry;

    fn marker_of(delegate: TypeRef) -> TypeRef {
        TypeRef::declared(DEFAULT_MARKER_CONTRACT, vec![delegate])
    }

    fn abstract_class(name: &str) -> TypeDecl {
        TypeDecl::class(name).with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
    }

    fn example_interface() -> TypeDecl {
        TypeDecl::interface("a.Example").with_method(
            MethodDecl::new("call")
                .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
                .returns(TypeRef::primitive(PrimitiveKind::Int)),
        )
    }

    fn simple_template() -> TypeDecl {
        abstract_class("a.Tmpl")
            .with_interface(marker_of(TypeRef::class("a.Example")))
            .with_method(MethodDecl::template("foo").with_param("s", TypeRef::string()))
    }

    fn registry_with(decls: Vec<TypeDecl>) -> DeclarationRegistry {
        let mut registry = DeclarationRegistry::with_marker_contract();
        for decl in decls {
            registry.register_type(decl).unwrap();
        }
        registry
    }

    fn synthesize(
        registry: &DeclarationRegistry,
        template: &str,
        config: &GeneratorConfig,
    ) -> Result<DefinedClass, GenerationError> {
        let decl = registry.get_by_name(template).unwrap();
        ClassSynthesizer::new(registry, config).synthesize(decl, "Snap")
    }

    #[test]
    fn class_shape() {
        let registry = registry_with(vec![example_interface(), simple_template()]);
        let class = synthesize(&registry, "a.Tmpl", &GeneratorConfig::default()).unwrap();

        assert_eq!(class.name.to_string(), "a.Snap");
        assert_eq!(class.modifiers, Modifiers::PUBLIC | Modifiers::ABSTRACT);
        assert_eq!(class.implements, vec![CodeType::class("a.Example")]);
        assert_eq!(class.extends, None);

        let holder = class.get_field("delegate").unwrap();
        assert_eq!(holder.modifiers, Modifiers::PRIVATE);
        assert_eq!(holder.ty, CodeType::class("a.Example"));

        let kinds: Vec<_> = class.methods.iter().map(|m| (m.name.as_str(), m.arity())).collect();
        assert_eq!(kinds, vec![("foo", 1), ("foo", 2), ("call", 0)]);
    }

    #[test]
    fn wrapper_pair_modifiers_and_body() {
        let registry = registry_with(vec![example_interface(), simple_template()]);
        let class = synthesize(&registry, "a.Tmpl", &GeneratorConfig::default()).unwrap();

        let unfinished = &class.methods[0];
        assert_eq!(unfinished.modifiers, Modifiers::PROTECTED | Modifiers::ABSTRACT);
        assert!(unfinished.body.is_none());

        let wrapper = &class.methods[1];
        assert_eq!(wrapper.modifiers, Modifiers::FINAL | Modifiers::SYNCHRONIZED);
        assert_eq!(wrapper.params[0].name, "delegate");
        assert_eq!(wrapper.params[0].ty, CodeType::class("a.Example"));

        let body = wrapper.body.as_ref().unwrap();
        assert_eq!(body.stmts.len(), 3);
        assert!(matches!(&body.stmts[0], Stmt::If { cond: Expr::Ne(..), .. }));
        assert!(matches!(&body.stmts[1], Stmt::If { cond: Expr::Eq(..), .. }));
        let Stmt::Synchronized { lock, body: guarded } = &body.stmts[2] else {
            panic!("expected a synchronized block");
        };
        assert_eq!(lock, &Expr::This);
        assert_eq!(
            guarded.stmts[0],
            Stmt::Assign {
                target: Expr::field("delegate"),
                value: Expr::var("delegate"),
            }
        );
        let Stmt::TryFinally { body: attempt, finally } = &guarded.stmts[1] else {
            panic!("expected try/finally");
        };
        assert_eq!(
            attempt.stmts,
            vec![
                Stmt::Expr(Expr::invoke("foo").arg(Expr::var("s"))),
                Stmt::Return(None),
            ]
        );
        assert_eq!(
            finally.stmts,
            vec![Stmt::Assign {
                target: Expr::field("delegate"),
                value: Expr::Null,
            }]
        );
    }

    #[test]
    fn forwarding_shape() {
        let registry = registry_with(vec![example_interface(), simple_template()]);
        let class = synthesize(&registry, "a.Tmpl", &GeneratorConfig::default()).unwrap();

        let forward = class.methods_named("call").next().unwrap();
        assert_eq!(
            forward.modifiers,
            Modifiers::PUBLIC | Modifiers::FINAL | Modifiers::SYNCHRONIZED
        );
        assert_eq!(forward.annotations, vec![QualifiedName::from(OVERRIDE)]);
        assert_eq!(forward.return_type, CodeType::Primitive(PrimitiveKind::Int));
        let body = forward.body.as_ref().unwrap();
        assert_eq!(
            body.stmts[1],
            Stmt::Return(Some(Expr::field("delegate").invoke_on("call")))
        );
    }

    #[test]
    fn extensible_class_delegate_is_extended() {
        let base = TypeDecl::class("a.Base").with_method(MethodDecl::new("run"));
        let template = abstract_class("a.Tmpl")
            .with_interface(marker_of(TypeRef::class("a.Base")))
            .with_method(MethodDecl::template("foo"));
        let registry = registry_with(vec![base, template]);

        let class = synthesize(&registry, "a.Tmpl", &GeneratorConfig::default()).unwrap();
        assert_eq!(class.extends, Some(CodeType::class("a.Base")));
        assert!(class.implements.is_empty());
        assert_eq!(class.methods_named("run").next().unwrap().annotations.len(), 1);
    }

    #[test]
    fn final_methods_of_extended_class_are_not_redeclared() {
        let base = TypeDecl::class("a.Base")
            .with_method(MethodDecl::new("run").with_modifiers(Modifiers::PUBLIC))
            .with_method(
                MethodDecl::new("locked").with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL),
            );
        let template = abstract_class("a.Tmpl")
            .with_interface(marker_of(TypeRef::class("a.Base")))
            .with_method(MethodDecl::template("foo"));
        let registry = registry_with(vec![base, template]);

        let class = synthesize(&registry, "a.Tmpl", &GeneratorConfig::default()).unwrap();
        assert_eq!(class.extends, Some(CodeType::class("a.Base")));
        assert_eq!(class.methods_named("locked").count(), 0);
        assert_eq!(class.methods_named("run").count(), 1);
    }

    #[test]
    fn final_methods_of_sealed_class_are_still_forwarded() {
        let sealed = TypeDecl::class("b.Sealed")
            .with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL)
            .with_method(
                MethodDecl::new("locked").with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL),
            );
        let template = abstract_class("a.Tmpl")
            .with_interface(marker_of(TypeRef::class("b.Sealed")))
            .with_method(MethodDecl::template("foo"));
        let registry = registry_with(vec![sealed, template]);

        let class = synthesize(&registry, "a.Tmpl", &GeneratorConfig::default()).unwrap();
        assert_eq!(class.extends, None);
        assert_eq!(class.methods_named("locked").count(), 1);
    }

    #[test]
    fn raw_generic_delegate_forwards_erased_types() {
        let function = TypeDecl::interface("j.Function")
            .with_type_param(TypeParamDecl::new("T"))
            .with_type_param(
                TypeParamDecl::new("R").bounded_by(TypeRef::class("java.lang.CharSequence")),
            );
        let t = function.type_var("T");
        let r = function.type_var("R");
        let function = function.with_method(
            MethodDecl::new("apply")
                .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
                .returns(r)
                .with_param("t", t),
        );
        let template = abstract_class("a.Tmpl")
            .with_interface(marker_of(TypeRef::class("j.Function")))
            .with_method(MethodDecl::template("foo"));
        let registry = registry_with(vec![function, template]);

        let class = synthesize(&registry, "a.Tmpl", &GeneratorConfig::default()).unwrap();
        assert_eq!(class.implements, vec![CodeType::class("j.Function")]);
        assert!(class.type_params.is_empty());

        let apply = class.methods_named("apply").next().unwrap();
        assert_eq!(apply.return_type, CodeType::class("java.lang.CharSequence"));
        assert_eq!(apply.params[0].ty, CodeType::class("java.lang.Object"));
        assert!(!apply.return_type.is_raw() && !apply.params[0].ty.is_raw());
    }

    #[test]
    fn final_class_delegate_is_forwarded_without_override() {
        let sealed = TypeDecl::class("b.Sealed")
            .with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL)
            .with_method(MethodDecl::new("run"));
        let template = abstract_class("a.Tmpl")
            .with_interface(marker_of(TypeRef::class("b.Sealed")))
            .with_method(MethodDecl::template("foo"));
        let registry = registry_with(vec![sealed, template]);

        let class = synthesize(&registry, "a.Tmpl", &GeneratorConfig::default()).unwrap();
        assert_eq!(class.extends, None);
        let run = class.methods_named("run").next().unwrap();
        assert!(run.annotations.is_empty());
    }

    #[test]
    fn package_private_ctor_only_extends_within_package() {
        let base = TypeDecl::class("b.Base")
            .with_constructor(ConstructorDecl::new(Modifiers::empty()))
            .with_method(MethodDecl::new("run"));
        let template = abstract_class("a.Tmpl")
            .with_interface(marker_of(TypeRef::class("b.Base")))
            .with_method(MethodDecl::template("foo"));
        let registry = registry_with(vec![base, template]);

        let class = synthesize(&registry, "a.Tmpl", &GeneratorConfig::default()).unwrap();
        assert_eq!(class.extends, None);
    }

    #[test]
    fn static_and_private_delegate_methods_are_skipped() {
        let delegate = TypeDecl::interface("a.Example")
            .with_method(MethodDecl::new("of").with_modifiers(Modifiers::PUBLIC | Modifiers::STATIC))
            .with_method(MethodDecl::new("helper").with_modifiers(Modifiers::PRIVATE))
            .with_method(MethodDecl::new("call"));
        let registry = registry_with(vec![delegate, simple_template()]);

        let class = synthesize(&registry, "a.Tmpl", &GeneratorConfig::default()).unwrap();
        assert_eq!(class.methods_named("of").count(), 0);
        assert_eq!(class.methods_named("helper").count(), 0);
        assert_eq!(class.methods_named("call").count(), 1);
    }

    #[test]
    fn wrapper_delegate_param_avoids_template_param_names() {
        let template = abstract_class("a.Tmpl")
            .with_interface(marker_of(TypeRef::class("a.Example")))
            .with_method(MethodDecl::template("foo").with_param("delegate", TypeRef::string()));
        let registry = registry_with(vec![example_interface(), template]);

        let class = synthesize(&registry, "a.Tmpl", &GeneratorConfig::default()).unwrap();
        let wrapper = &class.methods[1];
        assert_eq!(wrapper.param_names().collect::<Vec<_>>(), vec!["_delegate", "delegate"]);
    }

    #[test]
    fn thrown_types_copied_to_both_members() {
        let template = abstract_class("a.Tmpl")
            .with_interface(marker_of(TypeRef::class("a.Example")))
            .with_method(MethodDecl::template("foo").throws(TypeRef::class("java.io.IOException")));
        let registry = registry_with(vec![example_interface(), template]);

        let class = synthesize(&registry, "a.Tmpl", &GeneratorConfig::default()).unwrap();
        for method in class.methods_named("foo") {
            assert_eq!(method.throws, vec![CodeType::class("java.io.IOException")]);
        }
    }

    #[test]
    fn operation_type_params_clashing_with_class_are_renamed() {
        let template = abstract_class("a.Tmpl").with_type_param(TypeParamDecl::new("T"));
        let owner = GenericOwner::method(template.name.clone(), "pick");
        let template = template
            .with_interface(marker_of(TypeRef::class("a.Example")))
            .with_method(
                MethodDecl::template("pick")
                    .with_type_param(TypeParamDecl::new("T"))
                    .returns(TypeRef::var("T", owner.clone()))
                    .with_param("t", TypeRef::var("T", owner)),
            );
        let registry = registry_with(vec![example_interface(), template]);

        let class = synthesize(&registry, "a.Tmpl", &GeneratorConfig::default()).unwrap();
        for method in class.methods_named("pick") {
            assert_eq!(method.type_params[0].name, "_T");
            assert_eq!(method.return_type, CodeType::var("_T"));
        }
        assert_eq!(class.type_params[0].name, "T");
    }

    #[test]
    fn varargs_use_the_element_type() {
        let template = abstract_class("a.Tmpl")
            .with_interface(marker_of(TypeRef::class("a.Example")))
            .with_method(MethodDecl::template("baz").with_var_param("s", TypeRef::string()));
        let registry = registry_with(vec![example_interface(), template]);

        let class = synthesize(&registry, "a.Tmpl", &GeneratorConfig::default()).unwrap();
        for method in class.methods_named("baz") {
            let tail = method.params.last().unwrap();
            assert!(tail.variadic);
            assert_eq!(tail.ty, CodeType::class("java.lang.String"));
        }
    }

    #[test]
    fn varargs_flag_on_non_array_tail_is_plain() {
        let mut op = MethodDecl::template("baz");
        op.params.push(ParamDecl::new("s", TypeRef::string()));
        op.varargs = true;
        let template = abstract_class("a.Tmpl")
            .with_interface(marker_of(TypeRef::class("a.Example")))
            .with_method(op);
        let registry = registry_with(vec![example_interface(), template]);

        let class = synthesize(&registry, "a.Tmpl", &GeneratorConfig::default()).unwrap();
        assert!(!class.methods[0].params[0].variadic);
    }

    #[test]
    fn collision_policies() {
        let delegate = TypeDecl::interface("a.Example")
            .with_method(MethodDecl::new("foo").with_param("s", TypeRef::string()));
        let registry = registry_with(vec![delegate, simple_template()]);

        let warned = synthesize(&registry, "a.Tmpl", &GeneratorConfig::default()).unwrap();
        assert_eq!(warned.methods_named("foo").count(), 3);

        let allowed = GeneratorConfig::default().with_member_collisions(MemberCollisionPolicy::Allow);
        assert!(synthesize(&registry, "a.Tmpl", &allowed).is_ok());

        let denied = GeneratorConfig::default().with_member_collisions(MemberCollisionPolicy::Deny);
        assert_eq!(
            synthesize(&registry, "a.Tmpl", &denied),
            Err(GenerationError::MemberCollision {
                template: "a.Tmpl".into(),
                class: "a.Snap".into(),
                member: "foo".into(),
                arity: 1,
            })
        );
    }

    #[test]
    fn same_side_overloads_are_not_collisions() {
        let delegate = TypeDecl::interface("a.Example")
            .with_method(MethodDecl::new("put").with_param("s", TypeRef::string()))
            .with_method(MethodDecl::new("put").with_param("i", TypeRef::primitive(PrimitiveKind::Int)));
        let registry = registry_with(vec![delegate, simple_template()]);
        let denied = GeneratorConfig::default().with_member_collisions(MemberCollisionPolicy::Deny);
        assert!(synthesize(&registry, "a.Tmpl", &denied).is_ok());
    }

    #[test]
    fn name_taken_in_universe() {
        let registry = registry_with(vec![
            example_interface(),
            simple_template(),
            TypeDecl::class("a.Snap"),
        ]);
        assert!(matches!(
            synthesize(&registry, "a.Tmpl", &GeneratorConfig::default()),
            Err(GenerationError::ClassAlreadyDefined { .. })
        ));
    }

    #[test]
    fn name_taken_in_model() {
        let registry = registry_with(vec![example_interface(), simple_template()]);
        let config = GeneratorConfig::default();
        let synthesizer = ClassSynthesizer::new(&registry, &config);
        let template = registry.get_by_name("a.Tmpl").unwrap();

        let mut model = CodeModel::new();
        synthesizer.synthesize_into(&mut model, template, "Snap").unwrap();
        let err = synthesizer
            .synthesize_into(&mut model, template, "Snap")
            .unwrap_err();
        assert_eq!(
            err,
            GenerationError::ClassAlreadyDefined {
                template: "a.Tmpl".into(),
                name: "a.Snap".into(),
            }
        );
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn invalid_template_is_reported_before_synthesis() {
        let template = simple_template().with_modifiers(Modifiers::PUBLIC);
        let registry = registry_with(vec![example_interface(), template]);
        assert!(matches!(
            synthesize(&registry, "a.Tmpl", &GeneratorConfig::default()),
            Err(GenerationError::Validation(ValidationError::NotAbstract { .. }))
        ));
    }
}
