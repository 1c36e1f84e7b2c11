//! `crudgen generate`

use super::{LayerArg, OverrideArgs};
use anyhow::{Context, Result};
use console::{style, Emoji};
use crudgen::{ArtifactKind, CrudgenConfig, EntityDescriptor, Generator, WriteStatus};
use indicatif::{ProgressBar, ProgressStyle};

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "");

/// Generate the CRUD layers for one or more entities
#[derive(Debug, Clone, clap::Args)]
pub struct GenerateCommand {
    /// Entity object names (`lowerCamelCase`, e.g. `order`, `orderItem`)
    #[arg(required = true, value_name = "ENTITY")]
    pub entities: Vec<String>,

    /// Settings that replace or extend the configuration file
    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// Generate only these layers (repeatable) [default: all]
    #[arg(long, value_enum, value_name = "LAYER")]
    pub only: Vec<LayerArg>,
}

impl GenerateCommand {
    /// Layers selected by `--only`, or all of them
    #[must_use]
    pub fn layers(&self) -> Vec<ArtifactKind> {
        if self.only.is_empty() {
            ArtifactKind::ALL.to_vec()
        } else {
            self.only.iter().copied().map(ArtifactKind::from).collect()
        }
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if an entity name is invalid or a file cannot be written.
    pub fn execute(&self, config: &CrudgenConfig) -> Result<()> {
        let generator =
            Generator::new(config.runtime.clone()).context("Failed to create generator")?;
        let layers = self.layers();

        for entity in &self.entities {
            println!(
                "\n{} {}",
                style("Generating CRUD layers for").cyan().bold(),
                style(entity).green().bold()
            );

            let descriptor = EntityDescriptor::new(entity, &self.overrides.options_for(config, entity))
                .with_context(|| format!("Invalid entity '{entity}'"))?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .context("Failed to set progress style")?,
            );
            spinner.enable_steady_tick(std::time::Duration::from_millis(100));
            spinner.set_message(format!("Writing {}...", descriptor.output_dir().display()));

            let report = generator.generate_layers(&descriptor, &layers);
            spinner.finish_and_clear();
            let report = report.with_context(|| format!("Failed to generate '{entity}'"))?;

            for file in &report.files {
                let status = style(format!("{:<9}", file.status.to_string()));
                let status = match file.status {
                    WriteStatus::Created => status.green(),
                    WriteStatus::Updated => status.yellow(),
                    WriteStatus::Unchanged => status.dim(),
                };
                println!(
                    "  {}{:<10} {} {}",
                    style(CHECK).green(),
                    file.kind.as_str(),
                    status,
                    style(file.path.display()).dim()
                );
            }
        }

        Ok(())
    }
}
