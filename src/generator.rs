//! Batch generation API.
//!
//! A [`Generator`] owns a type universe and a configuration, accepts
//! [`TemplateRequest`]s, and turns each into a generated class. Requests are
//! independent: one failing template is recorded in the
//! [`GenerationReport`] and the rest of the batch still runs.
//!
//! # Example
//!
//! ```
//! use snapin::prelude::*;
//!
//! let mut registry = DeclarationRegistry::with_marker_contract();
//! registry.register_type(TypeDecl::interface("a.Example")).unwrap();
//! registry
//!     .register_type(
//!         TypeDecl::class("a.ExampleTemplate")
//!             .with_modifiers(Modifiers::ABSTRACT)
//!             .with_interface(TypeRef::declared(
//!                 DEFAULT_MARKER_CONTRACT,
//!                 vec![TypeRef::class("a.Example")],
//!             ))
//!             .with_method(MethodDecl::template("foo")),
//!     )
//!     .unwrap();
//!
//! let mut generator = Generator::new(registry);
//! generator.add_request(TemplateRequest::new("a.ExampleTemplate", "ExampleSnapin"));
//!
//! let report = generator.generate();
//! assert!(report.is_success());
//! let (name, source) = &report.render()[0];
//! assert_eq!(name.to_string(), "a.ExampleSnapin");
//! assert!(source.contains("public abstract class ExampleSnapin implements Example {"));
//! ```

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use snapin_codegen::{
    ClassSynthesizer, CodeModel, DefinedClass, GeneratorConfig, JavaWriter, source_path,
};
use snapin_core::{ConfigError, GenerationError, QualifiedName, TypeUniverse};

/// One generation request: a template and the simple name of the class to
/// generate beside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRequest {
    pub template: QualifiedName,
    pub generated_name: String,
}

impl TemplateRequest {
    pub fn new(template: impl Into<QualifiedName>, generated_name: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            generated_name: generated_name.into(),
        }
    }
}

/// Generates snap-in classes from templates in a type universe.
#[derive(Debug)]
pub struct Generator<U> {
    universe: U,
    config: GeneratorConfig,
    requests: Vec<TemplateRequest>,
}

impl<U: TypeUniverse> Generator<U> {
    /// Create a generator with the default configuration.
    pub fn new(universe: U) -> Self {
        Self {
            universe,
            config: GeneratorConfig::default(),
            requests: Vec::new(),
        }
    }

    /// Create a generator with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn with_config(universe: U, config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            universe,
            config,
            requests: Vec::new(),
        })
    }

    /// Queue a request for the next [`generate`](Self::generate).
    pub fn add_request(&mut self, request: TemplateRequest) -> &mut Self {
        self.requests.push(request);
        self
    }

    pub fn requests(&self) -> &[TemplateRequest] {
        &self.requests
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn universe(&self) -> &U {
        &self.universe
    }

    /// Run every queued request.
    pub fn generate(&self) -> GenerationReport {
        self.generate_requests(&self.requests)
    }

    /// Run `requests` in order against one shared output model.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn generate_requests(&self, requests: &[TemplateRequest]) -> GenerationReport {
        let synthesizer = ClassSynthesizer::new(&self.universe, &self.config);
        let mut report = GenerationReport::default();

        for request in requests {
            match self.generate_one(&synthesizer, &mut report.model, request) {
                Ok(name) => info!(template = %request.template, class = %name, "generated snap-in"),
                Err(e) => {
                    error!(template = %request.template, error = %e, "snap-in generation failed");
                    report.failures.push(e);
                }
            }
        }
        report
    }

    fn generate_one(
        &self,
        synthesizer: &ClassSynthesizer<'_, U>,
        model: &mut CodeModel,
        request: &TemplateRequest,
    ) -> Result<QualifiedName, GenerationError> {
        let template = self.universe.lookup(&request.template).ok_or_else(|| {
            GenerationError::TemplateNotFound {
                template: request.template.clone(),
            }
        })?;
        let class = synthesizer.synthesize_into(model, template, &request.generated_name)?;
        Ok(class.name.clone())
    }
}

/// Outcome of one batch: the generated classes plus per-template failures.
#[derive(Debug, Default)]
pub struct GenerationReport {
    model: CodeModel,
    failures: Vec<GenerationError>,
}

impl GenerationReport {
    pub fn model(&self) -> &CodeModel {
        &self.model
    }

    pub fn failures(&self) -> &[GenerationError] {
        &self.failures
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn class(&self, name: &QualifiedName) -> Option<&DefinedClass> {
        self.model.get(name)
    }

    /// Failure recorded for `template`, if any.
    pub fn failure_for(&self, template: &QualifiedName) -> Option<&GenerationError> {
        self.failures.iter().find(|e| e.template() == template)
    }

    /// Java source for each generated class, ordered by class name.
    pub fn render(&self) -> Vec<(QualifiedName, String)> {
        self.render_with(&JavaWriter::new())
    }

    pub fn render_with(&self, writer: &JavaWriter) -> Vec<(QualifiedName, String)> {
        self.model
            .classes()
            .map(|class| (class.name.clone(), writer.render(class)))
            .collect()
    }

    /// Write each generated class under `dir` in its package directory.
    ///
    /// Returns the paths written.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> io::Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let mut written = Vec::new();
        for (name, source) in self.render() {
            let path = dir.join(source_path(&name));
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, source)?;
            written.push(path);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapin_core::{DEFAULT_MARKER_CONTRACT, MethodDecl, Modifiers, TypeDecl, TypeRef};
    use snapin_registry::DeclarationRegistry;

    fn registry() -> DeclarationRegistry {
        let mut registry = DeclarationRegistry::with_marker_contract();
        registry.register_type(TypeDecl::interface("a.Example")).unwrap();
        registry
            .register_type(
                TypeDecl::class("a.Tmpl")
                    .with_modifiers(Modifiers::ABSTRACT)
                    .with_interface(TypeRef::declared(
                        DEFAULT_MARKER_CONTRACT,
                        vec![TypeRef::class("a.Example")],
                    ))
                    .with_method(MethodDecl::template("foo")),
            )
            .unwrap();
        registry
    }

    #[test]
    fn unknown_template_is_not_found() {
        let generator = Generator::new(registry());
        let report = generator.generate_requests(&[TemplateRequest::new("a.Missing", "X")]);
        assert_eq!(
            report.failures(),
            &[GenerationError::TemplateNotFound {
                template: "a.Missing".into()
            }]
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = GeneratorConfig::default().with_rename_prefix("");
        assert!(Generator::with_config(registry(), config).is_err());
    }

    #[test]
    fn queued_requests_run_in_order() {
        let mut generator = Generator::new(registry());
        generator
            .add_request(TemplateRequest::new("a.Tmpl", "One"))
            .add_request(TemplateRequest::new("a.Tmpl", "Two"));
        let report = generator.generate();
        assert!(report.is_success());
        let names: Vec<_> = report.render().into_iter().map(|(n, _)| n.to_string()).collect();
        assert_eq!(names, vec!["a.One", "a.Two"]);
    }

    #[test]
    fn borrowed_universe() {
        let registry = registry();
        let generator = Generator::new(&registry);
        let report = generator.generate_requests(&[TemplateRequest::new("a.Tmpl", "Snap")]);
        assert!(report.class(&"a.Snap".into()).is_some());
    }

    #[test]
    fn request_from_json() {
        let request: TemplateRequest =
            serde_json::from_str(r#"{ "template": "a.Tmpl", "generated_name": "Snap" }"#).unwrap();
        assert_eq!(request, TemplateRequest::new("a.Tmpl", "Snap"));
    }
}
