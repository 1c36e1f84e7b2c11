//! `crudgen bindings`: resolver field directives as JSON

use super::OverrideArgs;
use anyhow::{Context, Result};
use crudgen::{BindingDirective, CrudgenConfig, EntityDescriptor, Generator};

/// Print the binding directives of the resolver fields that survive the excludes
#[derive(Debug, Clone, clap::Args)]
pub struct BindingsCommand {
    /// Entity object name
    #[arg(value_name = "ENTITY")]
    pub entity: String,

    /// Settings that replace or extend the configuration file
    #[command(flatten)]
    pub overrides: OverrideArgs,
}

impl BindingsCommand {
    /// Directives for the entity
    ///
    /// # Errors
    ///
    /// Returns an error if the entity name is invalid.
    pub fn directives(&self, config: &CrudgenConfig) -> Result<Vec<BindingDirective>> {
        let generator =
            Generator::new(config.runtime.clone()).context("Failed to create generator")?;
        let descriptor =
            EntityDescriptor::new(&self.entity, &self.overrides.options_for(config, &self.entity))
                .with_context(|| format!("Invalid entity '{}'", self.entity))?;

        Ok(generator.bindings(&descriptor))
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the entity name is invalid.
    pub fn execute(&self, config: &CrudgenConfig) -> Result<()> {
        let directives = self.directives(config)?;
        let json =
            serde_json::to_string_pretty(&directives).context("Failed to serialize bindings")?;
        println!("{json}");
        Ok(())
    }
}
