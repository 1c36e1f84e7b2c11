//! Generation orchestrator
//!
//! Builds, renders and writes the three layers for one entity, in the order
//! repository, service, resolver. The layers share nothing at runtime beyond
//! the naming rules, so each can also be generated on its own.

use crate::artifact::{Artifact, ArtifactKind, BindingDirective};
use crate::builders::{repository, resolver, service};
use crate::config::RuntimeModules;
use crate::emit::{read_existing, write_atomic, Renderer, WriteStatus};
use crate::entity::{EntityDescriptor, GenerateOptions};
use crate::error::Result;
use serde::Serialize;
use std::path::PathBuf;

/// A file written by the generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    /// Layer the file implements
    pub kind: ArtifactKind,
    /// Absolute or base-relative path of the file
    pub path: PathBuf,
    /// What the write did
    pub status: WriteStatus,
}

/// Outcome of generating one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Entity object name
    pub entity: String,
    /// Written files, in generation order
    pub files: Vec<GeneratedFile>,
}

impl GenerationReport {
    /// Files whose content changed (created or updated)
    pub fn changed(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files
            .iter()
            .filter(|file| file.status != WriteStatus::Unchanged)
    }
}

/// Comparison of a file on disk with what would be generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCheck {
    /// Layer the file implements
    pub kind: ArtifactKind,
    /// Target path
    pub path: PathBuf,
    /// Current content, `None` if the file is missing
    pub current: Option<String>,
    /// Content a generation run would write
    pub expected: String,
}

impl FileCheck {
    /// Whether the file is missing or differs from the expected content
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.current.as_deref() != Some(self.expected.as_str())
    }
}

/// CRUD layer generator
///
/// Holds the runtime module names used in generated imports and a renderer
/// with all templates registered.
pub struct Generator {
    runtime: RuntimeModules,
    renderer: Renderer,
}

impl Generator {
    /// Create a generator for the given runtime modules
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to compile.
    pub fn new(runtime: RuntimeModules) -> Result<Self> {
        Ok(Self {
            runtime,
            renderer: Renderer::new()?,
        })
    }

    /// Runtime module names in use
    #[must_use]
    pub const fn runtime(&self) -> &RuntimeModules {
        &self.runtime
    }

    /// Generate all three layers for an entity
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or a file cannot be written.
    /// Layers written before the failure stay on disk.
    pub fn generate(&self, object_name: &str, options: &GenerateOptions) -> Result<GenerationReport> {
        let descriptor = EntityDescriptor::new(object_name, options)?;
        self.generate_layers(&descriptor, &ArtifactKind::ALL)
    }

    /// Generate the selected layers for a resolved entity
    ///
    /// Layers are always produced in repository, service, resolver order,
    /// whatever the order of `kinds`.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub fn generate_layers(
        &self,
        descriptor: &EntityDescriptor,
        kinds: &[ArtifactKind],
    ) -> Result<GenerationReport> {
        let mut files = Vec::new();

        for kind in ArtifactKind::ALL {
            if !kinds.contains(&kind) {
                continue;
            }
            files.push(self.write(descriptor, kind)?);
        }

        Ok(GenerationReport {
            entity: descriptor.object_name().to_string(),
            files,
        })
    }

    /// Generate only the repository layer
    ///
    /// # Errors
    ///
    /// See [`Self::generate_layers`].
    pub fn generate_repository(&self, descriptor: &EntityDescriptor) -> Result<GeneratedFile> {
        self.write(descriptor, ArtifactKind::Repository)
    }

    /// Generate only the service layer
    ///
    /// # Errors
    ///
    /// See [`Self::generate_layers`].
    pub fn generate_service(&self, descriptor: &EntityDescriptor) -> Result<GeneratedFile> {
        self.write(descriptor, ArtifactKind::Service)
    }

    /// Generate only the resolver layer
    ///
    /// # Errors
    ///
    /// See [`Self::generate_layers`].
    pub fn generate_resolver(&self, descriptor: &EntityDescriptor) -> Result<GeneratedFile> {
        self.write(descriptor, ArtifactKind::Resolver)
    }

    /// Build the in-memory description of one layer
    #[must_use]
    pub fn artifact(&self, descriptor: &EntityDescriptor, kind: ArtifactKind) -> Artifact {
        match kind {
            ArtifactKind::Repository => repository::build(descriptor, &self.runtime),
            ArtifactKind::Service => service::build(descriptor, &self.runtime),
            ArtifactKind::Resolver => resolver::build(descriptor, &self.runtime),
        }
    }

    /// Render one layer without writing it
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to render.
    pub fn render(&self, descriptor: &EntityDescriptor, kind: ArtifactKind) -> Result<String> {
        self.renderer.render(&self.artifact(descriptor, kind))
    }

    /// Compare every layer on disk with what would be generated
    ///
    /// Nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or an existing file cannot be read.
    pub fn check(&self, descriptor: &EntityDescriptor) -> Result<Vec<FileCheck>> {
        ArtifactKind::ALL
            .into_iter()
            .map(|kind| {
                let path = descriptor.artifact_path(kind);
                let expected = self.render(descriptor, kind)?;
                let current = read_existing(&path)?;
                if current.as_deref() != Some(expected.as_str()) {
                    tracing::debug!(entity = descriptor.object_name(), %kind, path = %path.display(), "Stale file");
                }
                Ok(FileCheck {
                    kind,
                    path,
                    current,
                    expected,
                })
            })
            .collect()
    }

    /// Binding directives of the resolver fields that survive the excludes
    #[must_use]
    pub fn bindings(&self, descriptor: &EntityDescriptor) -> Vec<BindingDirective> {
        resolver::surviving_bindings(descriptor)
            .into_iter()
            .map(|(exposed_name, binding)| resolver::directive(descriptor, &exposed_name, binding))
            .collect()
    }

    fn write(&self, descriptor: &EntityDescriptor, kind: ArtifactKind) -> Result<GeneratedFile> {
        let artifact = self.artifact(descriptor, kind);
        let content = self.renderer.render(&artifact)?;
        let path = artifact.path().to_path_buf();
        let status = write_atomic(&path, &content)?;

        tracing::info!(
            entity = descriptor.object_name(),
            %kind,
            %status,
            path = %path.display(),
            "Generated file"
        );

        Ok(GeneratedFile { kind, path, status })
    }
}

/// Generate all three layers with the default runtime modules
///
/// # Example
///
/// ```rust,no_run
/// use crudgen::GenerateOptions;
///
/// # fn example() -> crudgen::Result<()> {
/// let options = GenerateOptions::default()
///     .base_dir("./src")
///     .exclude("deleteOrder");
/// let report = crudgen::generate("order", &options)?;
/// assert_eq!(report.files.len(), 3);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if the name is invalid or a file cannot be written.
pub fn generate(object_name: &str, options: &GenerateOptions) -> Result<GenerationReport> {
    Generator::new(RuntimeModules::default())?.generate(object_name, options)
}

/// Generate only the repository layer with the default runtime modules
///
/// # Errors
///
/// See [`generate`].
pub fn generate_repository(object_name: &str, options: &GenerateOptions) -> Result<GeneratedFile> {
    let descriptor = EntityDescriptor::new(object_name, options)?;
    Generator::new(RuntimeModules::default())?.generate_repository(&descriptor)
}

/// Generate only the service layer with the default runtime modules
///
/// # Errors
///
/// See [`generate`].
pub fn generate_service(object_name: &str, options: &GenerateOptions) -> Result<GeneratedFile> {
    let descriptor = EntityDescriptor::new(object_name, options)?;
    Generator::new(RuntimeModules::default())?.generate_service(&descriptor)
}

/// Generate only the resolver layer with the default runtime modules
///
/// # Errors
///
/// See [`generate`].
pub fn generate_resolver(object_name: &str, options: &GenerateOptions) -> Result<GeneratedFile> {
    let descriptor = EntityDescriptor::new(object_name, options)?;
    Generator::new(RuntimeModules::default())?.generate_resolver(&descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeneratorError;
    use std::fs;
    use tempfile::tempdir;

    fn generator() -> Generator {
        Generator::new(RuntimeModules::default()).unwrap()
    }

    #[test]
    fn test_generate_writes_three_files_in_order() {
        let temp_dir = tempdir().unwrap();
        let options = GenerateOptions::default().base_dir(temp_dir.path());

        let report = generator().generate("order", &options).unwrap();

        let kinds: Vec<_> = report.files.iter().map(|file| file.kind).collect();
        assert_eq!(kinds, ArtifactKind::ALL);
        assert!(report.files.iter().all(|file| file.status == WriteStatus::Created));
        assert!(temp_dir.path().join("generated/order/order.repository.ts").is_file());
        assert!(temp_dir.path().join("generated/order/order.service.ts").is_file());
        assert!(temp_dir.path().join("generated/order/order.resolver.ts").is_file());
    }

    #[test]
    fn test_second_run_is_unchanged() {
        let temp_dir = tempdir().unwrap();
        let options = GenerateOptions::default().base_dir(temp_dir.path());
        let generator = generator();

        generator.generate("order", &options).unwrap();
        let report = generator.generate("order", &options).unwrap();

        assert_eq!(report.changed().count(), 0);
    }

    #[test]
    fn test_generate_layers_keeps_fixed_order() {
        let temp_dir = tempdir().unwrap();
        let options = GenerateOptions::default().base_dir(temp_dir.path());
        let descriptor = EntityDescriptor::new("order", &options).unwrap();

        let report = generator()
            .generate_layers(&descriptor, &[ArtifactKind::Resolver, ArtifactKind::Repository])
            .unwrap();

        let kinds: Vec<_> = report.files.iter().map(|file| file.kind).collect();
        assert_eq!(kinds, [ArtifactKind::Repository, ArtifactKind::Resolver]);
        assert!(!temp_dir.path().join("generated/order/order.service.ts").exists());
    }

    #[test]
    fn test_invalid_name_writes_nothing() {
        let temp_dir = tempdir().unwrap();
        let options = GenerateOptions::default().base_dir(temp_dir.path());

        let result = generator().generate("Order", &options);

        assert!(matches!(result, Err(GeneratorError::InvalidEntityName { .. })));
        assert!(!temp_dir.path().join("generated").exists());
    }

    #[test]
    fn test_check_detects_edits() {
        let temp_dir = tempdir().unwrap();
        let options = GenerateOptions::default().base_dir(temp_dir.path());
        let descriptor = EntityDescriptor::new("order", &options).unwrap();
        let generator = generator();

        assert!(generator.check(&descriptor).unwrap().iter().all(FileCheck::is_stale));

        generator.generate_layers(&descriptor, &ArtifactKind::ALL).unwrap();
        assert!(!generator.check(&descriptor).unwrap().iter().any(FileCheck::is_stale));

        let service = descriptor.artifact_path(ArtifactKind::Service);
        fs::write(&service, "// edited\n").unwrap();
        let stale: Vec<_> = generator
            .check(&descriptor)
            .unwrap()
            .into_iter()
            .filter(FileCheck::is_stale)
            .map(|check| check.kind)
            .collect();
        assert_eq!(stale, [ArtifactKind::Service]);
    }

    #[test]
    fn test_bindings_follow_excludes() {
        let options = GenerateOptions::default()
            .base_dir("/work")
            .exclude("deleteOrder")
            .exclude("orderAggregate");
        let descriptor = EntityDescriptor::new("order", &options).unwrap();

        let names: Vec<_> = generator()
            .bindings(&descriptor)
            .into_iter()
            .map(|binding| binding.exposed_name)
            .collect();

        assert_eq!(
            names,
            ["order", "orders", "createOrder", "updateOrder", "updateManyOrders", "upsertOrder"]
        );
    }

    #[test]
    fn test_render_matches_written_file() {
        let temp_dir = tempdir().unwrap();
        let options = GenerateOptions::default().base_dir(temp_dir.path());
        let descriptor = EntityDescriptor::new("product", &options).unwrap();
        let generator = generator();

        let written = generator.generate_resolver(&descriptor).unwrap();

        assert_eq!(
            fs::read_to_string(&written.path).unwrap(),
            generator.render(&descriptor, ArtifactKind::Resolver).unwrap()
        );
    }
}
