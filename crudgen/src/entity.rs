//! Entity descriptor: the resolved input of one generation call

use crate::artifact::ArtifactKind;
use crate::error::{GeneratorError, Result};
use crate::naming::EntityNames;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Directory under the base directory that receives generated files
pub const GENERATED_DIR: &str = "generated";

/// Relation expression used when none is configured
pub const DEFAULT_RELATIONS: &str = "[]";

/// Caller-supplied options for one entity
///
/// Every field is optional; see [`EntityDescriptor::new`] for defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Output base directory
    pub base_dir: Option<PathBuf>,
    /// Resolver fields to leave out, by exposed name
    pub excludes: Vec<String>,
    /// Module prefix for sibling argument/input/aggregate types
    pub module_dir: Option<String>,
    /// Relation eager-load expression, inserted verbatim
    pub relations: Option<String>,
}

impl GenerateOptions {
    /// Set the output base directory
    #[must_use]
    pub fn base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Exclude a resolver field by exposed name
    #[must_use]
    pub fn exclude(mut self, exposed_name: impl Into<String>) -> Self {
        self.excludes.push(exposed_name.into());
        self
    }

    /// Set the module prefix for sibling types
    #[must_use]
    pub fn module_dir(mut self, module_dir: impl Into<String>) -> Self {
        self.module_dir = Some(module_dir.into());
        self
    }

    /// Set the relation eager-load expression
    #[must_use]
    pub fn relations(mut self, relations: impl Into<String>) -> Self {
        self.relations = Some(relations.into());
        self
    }
}

/// Immutable description of the entity being generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    names: EntityNames,
    base_dir: PathBuf,
    module_dir: String,
    excludes: BTreeSet<String>,
    relations: String,
}

impl EntityDescriptor {
    /// Resolve options into a descriptor
    ///
    /// Defaults: `base_dir` is the current directory, `module_dir` is
    /// `@{object}`, `relations` is `[]`, `excludes` is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the object name is not a valid identifier stem, or
    /// if the current directory is needed and cannot be read.
    pub fn new(object_name: &str, options: &GenerateOptions) -> Result<Self> {
        let names = EntityNames::derive(object_name)?;

        let base_dir = match &options.base_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().map_err(|err| GeneratorError::io(".", err))?,
        };

        let module_dir = options
            .module_dir
            .clone()
            .unwrap_or_else(|| format!("@{object_name}"));

        let relations = options
            .relations
            .clone()
            .unwrap_or_else(|| DEFAULT_RELATIONS.to_string());

        Ok(Self {
            names,
            base_dir,
            module_dir,
            excludes: options.excludes.iter().cloned().collect(),
            relations,
        })
    }

    /// Derived names
    #[must_use]
    pub const fn names(&self) -> &EntityNames {
        &self.names
    }

    /// Entity object name
    #[must_use]
    pub fn object_name(&self) -> &str {
        self.names.object_name()
    }

    /// Output base directory
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Module prefix for sibling types
    #[must_use]
    pub fn module_dir(&self) -> &str {
        &self.module_dir
    }

    /// Relation eager-load expression
    #[must_use]
    pub fn relations(&self) -> &str {
        &self.relations
    }

    /// Excluded resolver fields
    #[must_use]
    pub const fn excludes(&self) -> &BTreeSet<String> {
        &self.excludes
    }

    /// Whether a resolver field is excluded
    #[must_use]
    pub fn is_excluded(&self, exposed_name: &str) -> bool {
        self.excludes.contains(exposed_name)
    }

    /// Directory receiving this entity's files: `{base}/generated/{object}`
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.base_dir.join(GENERATED_DIR).join(self.object_name())
    }

    /// Target path of one artifact: `{base}/generated/{object}/{object}.{kind}.ts`
    #[must_use]
    pub fn artifact_path(&self, kind: ArtifactKind) -> PathBuf {
        self.output_dir().join(kind.file_name(self.object_name()))
    }

    /// Module specifier of a sibling type file, e.g. `@order/order.input`
    #[must_use]
    pub fn sibling_module(&self, suffix: &str) -> String {
        format!("{}/{}.{suffix}", self.module_dir, self.object_name())
    }
}
