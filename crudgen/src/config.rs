//! Configuration management for crudgen
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `CRUDGEN_` prefix, `__` for nesting)
//! 2. The configuration file (`./crudgen.toml` unless another path is given)
//! 3. Hardcoded defaults (fallback)
//!
//! Command-line flags are applied on top by the CLI.
//!
//! Environment keys are lowercased, so `CRUDGEN_ENTITIES__ORDERITEM__MODULE_DIR`
//! lands under `entities.orderitem`. [`CrudgenConfig::options_for`] therefore
//! falls back to an ASCII case-insensitive match when no entity key matches
//! exactly.
//!
//! # Example Configuration
//!
//! ```toml
//! # crudgen.toml
//! base_dir = "./src/modules"
//!
//! [runtime]
//! exception = "@app/errors"
//! exception_class = "NotFound"
//!
//! [entities.order]
//! excludes = ["deleteOrder"]
//! relations = "['customer', 'items']"
//!
//! [entities.product]
//! module_dir = "@catalog"
//! ```

use crate::entity::GenerateOptions;
use crate::error::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "crudgen.toml";

/// Module specifiers and symbols the generated code imports from its runtime
///
/// None of these are generated; they are the external contracts the emitted
/// classes bind to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeModules {
    /// Module exporting the `Injectable` DI marker
    pub injectable: String,

    /// Module exporting the `InjectRepository` parameter decorator
    pub inject_repository: String,

    /// Module exporting the exception class thrown by generated bodies
    pub exception: String,

    /// Exception class thrown when a record is missing or a delete affects nothing
    pub exception_class: String,

    /// ORM module exporting the `Repository<T>` handle type
    pub orm: String,

    /// GraphQL module exporting `Resolver`, `Query`, `Mutation`, `Arg`, `Args`
    pub graphql: String,

    /// Module prefix of entity models (`{entity_dir}/{object}.entity`)
    pub entity_dir: String,
}

impl Default for RuntimeModules {
    fn default() -> Self {
        Self {
            injectable: "@tiejs/common".to_string(),
            inject_repository: "@tiejs/typeorm".to_string(),
            exception: "@tiejs/exception".to_string(),
            exception_class: "BadRequest".to_string(),
            orm: "typeorm".to_string(),
            graphql: "type-graphql".to_string(),
            entity_dir: "@entity".to_string(),
        }
    }
}

/// Per-entity settings from the configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitySettings {
    /// Resolver fields to leave out (exact exposed names)
    pub excludes: Vec<String>,

    /// Module prefix for sibling types (defaults to `@{object}`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_dir: Option<String>,

    /// Relation eager-load expression (defaults to `[]`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relations: Option<String>,
}

/// Complete crudgen configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrudgenConfig {
    /// Output base directory (defaults to the current directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,

    /// Runtime module specifiers
    #[serde(default)]
    pub runtime: RuntimeModules,

    /// Settings keyed by entity object name
    #[serde(default)]
    pub entities: BTreeMap<String, EntitySettings>,
}

impl CrudgenConfig {
    /// Load configuration from a specific file
    ///
    /// A missing file is not an error: defaults and environment variables
    /// still apply.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use crudgen::config::CrudgenConfig;
    ///
    /// # fn example() -> crudgen::Result<()> {
    /// let config = CrudgenConfig::load_from("./crudgen.toml")?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the file or environment contain values of the
    /// wrong shape.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), exists = path.exists(), "Loading configuration");

        let config = Figment::new()
            // Start with defaults
            .merge(Toml::string(&toml::to_string(&Self::default())?))
            // Load from specified file (if it exists)
            .merge(Toml::file(path))
            // Environment variables override everything (prefix CRUDGEN_, double underscore for nesting)
            .merge(Env::prefixed("CRUDGEN_").split("__").lowercase(true))
            .extract()?;

        Ok(config)
    }

    /// Load `./crudgen.toml`
    ///
    /// # Errors
    ///
    /// See [`Self::load_from`].
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Settings for an entity; an exact key wins over a case-insensitive one
    #[must_use]
    pub fn entity_settings(&self, object_name: &str) -> Option<&EntitySettings> {
        self.entities.get(object_name).or_else(|| {
            self.entities
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(object_name))
                .map(|(_, settings)| settings)
        })
    }

    /// Generation options for an entity, before command-line overrides
    #[must_use]
    pub fn options_for(&self, object_name: &str) -> GenerateOptions {
        let settings = self.entity_settings(object_name).cloned().unwrap_or_default();

        GenerateOptions {
            base_dir: self.base_dir.clone(),
            excludes: settings.excludes,
            module_dir: settings.module_dir,
            relations: settings.relations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_runtime_defaults() {
        let runtime = RuntimeModules::default();
        assert_eq!(runtime.injectable, "@tiejs/common");
        assert_eq!(runtime.orm, "typeorm");
        assert_eq!(runtime.graphql, "type-graphql");
        assert_eq!(runtime.exception_class, "BadRequest");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = tempdir().unwrap();
        let config = CrudgenConfig::load_from(temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.runtime, RuntimeModules::default());
        assert!(config.entities.is_empty());
    }

    #[test]
    fn test_load_entities_and_runtime() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("crudgen.toml");
        fs::write(
            &path,
            r#"
base_dir = "out"

[runtime]
exception_class = "NotFound"

[entities.order]
excludes = ["deleteOrder"]
relations = "['customer']"
"#,
        )
        .unwrap();

        let config = CrudgenConfig::load_from(&path).unwrap();
        assert_eq!(config.base_dir, Some(PathBuf::from("out")));
        assert_eq!(config.runtime.exception_class, "NotFound");
        // Untouched keys keep their defaults
        assert_eq!(config.runtime.orm, "typeorm");

        let options = config.options_for("order");
        assert_eq!(options.excludes, vec!["deleteOrder".to_string()]);
        assert_eq!(options.relations.as_deref(), Some("['customer']"));
        assert_eq!(options.module_dir, None);
        assert_eq!(options.base_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_options_for_lowercased_entity_key() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("crudgen.toml");
        fs::write(
            &path,
            r#"
[entities.orderitem]
module_dir = "@sales"

[entities.product]
module_dir = "@catalog"

[entities.Product]
module_dir = "@shop"
"#,
        )
        .unwrap();

        let config = CrudgenConfig::load_from(&path).unwrap();
        assert_eq!(config.options_for("orderItem").module_dir.as_deref(), Some("@sales"));
        assert_eq!(config.options_for("product").module_dir.as_deref(), Some("@catalog"));
        assert_eq!(config.options_for("orderitem").module_dir.as_deref(), Some("@sales"));
    }

    #[test]
    fn test_options_for_unknown_entity() {
        let config = CrudgenConfig::default();
        let options = config.options_for("invoice");
        assert!(options.excludes.is_empty());
        assert_eq!(options.base_dir, None);
    }
}
