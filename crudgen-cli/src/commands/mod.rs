//! CLI command implementations

pub mod bindings;
pub mod catalog;
pub mod check;
pub mod generate;

pub use bindings::BindingsCommand;
pub use catalog::CatalogCommand;
pub use check::CheckCommand;
pub use generate::GenerateCommand;

use crudgen::{ArtifactKind, CrudgenConfig, GenerateOptions};
use std::path::PathBuf;

/// Per-entity settings given on the command line
///
/// Values replace the ones from the configuration file; excludes are added to
/// the configured ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, clap::Args)]
pub struct OverrideArgs {
    /// Output base directory [default: current directory]
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Resolver field to leave out, by exposed name (repeatable)
    #[arg(long = "exclude", value_name = "NAME")]
    pub excludes: Vec<String>,

    /// Module prefix of argument/input/aggregate types [default: @<entity>]
    #[arg(long, value_name = "PREFIX")]
    pub module_dir: Option<String>,

    /// Relation eager-load expression, inserted verbatim [default: []]
    #[arg(long, value_name = "EXPR")]
    pub relations: Option<String>,
}

impl OverrideArgs {
    /// Options for `entity`: configuration file first, then these flags
    #[must_use]
    pub fn options_for(&self, config: &CrudgenConfig, entity: &str) -> GenerateOptions {
        let mut options = config.options_for(entity);

        if let Some(base_dir) = &self.base_dir {
            options.base_dir = Some(base_dir.clone());
        }
        for exclude in &self.excludes {
            if !options.excludes.contains(exclude) {
                options.excludes.push(exclude.clone());
            }
        }
        if let Some(module_dir) = &self.module_dir {
            options.module_dir = Some(module_dir.clone());
        }
        if let Some(relations) = &self.relations {
            options.relations = Some(relations.clone());
        }

        options
    }
}

/// Layer selector for `--only`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LayerArg {
    /// Data-access class
    Repository,
    /// Business-logic class
    Service,
    /// GraphQL resolver class
    Resolver,
}

impl From<LayerArg> for ArtifactKind {
    fn from(layer: LayerArg) -> Self {
        match layer {
            LayerArg::Repository => Self::Repository,
            LayerArg::Service => Self::Service,
            LayerArg::Resolver => Self::Resolver,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crudgen::config::EntitySettings;

    fn config() -> CrudgenConfig {
        let mut config = CrudgenConfig {
            base_dir: Some(PathBuf::from("/srv/app")),
            ..Default::default()
        };
        config.entities.insert(
            "order".to_string(),
            EntitySettings {
                excludes: vec!["deleteOrder".to_string()],
                module_dir: Some("@modules/order".to_string()),
                relations: None,
            },
        );
        config
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let options = OverrideArgs::default().options_for(&config(), "order");
        assert_eq!(options.base_dir, Some(PathBuf::from("/srv/app")));
        assert_eq!(options.excludes, ["deleteOrder"]);
        assert_eq!(options.module_dir.as_deref(), Some("@modules/order"));
        assert_eq!(options.relations, None);
    }

    #[test]
    fn test_flags_override_config() {
        let overrides = OverrideArgs {
            base_dir: Some(PathBuf::from("/tmp/out")),
            excludes: vec!["deleteOrder".to_string(), "orderAggregate".to_string()],
            module_dir: None,
            relations: Some("['items']".to_string()),
        };

        let options = overrides.options_for(&config(), "order");

        assert_eq!(options.base_dir, Some(PathBuf::from("/tmp/out")));
        assert_eq!(options.excludes, ["deleteOrder", "orderAggregate"]);
        assert_eq!(options.module_dir.as_deref(), Some("@modules/order"));
        assert_eq!(options.relations.as_deref(), Some("['items']"));
    }

    #[test]
    fn test_unconfigured_entity_uses_global_base_dir() {
        let options = OverrideArgs::default().options_for(&config(), "product");
        assert_eq!(options.base_dir, Some(PathBuf::from("/srv/app")));
        assert!(options.excludes.is_empty());
        assert_eq!(options.module_dir, None);
    }
}
