//! `crudgen check`: report generated files that are missing or edited

use super::OverrideArgs;
use anyhow::{Context, Result};
use console::{style, Emoji};
use crudgen::{CrudgenConfig, EntityDescriptor, FileCheck, Generator};
use similar::{ChangeTag, TextDiff};

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "");
static CROSS: Emoji<'_, '_> = Emoji("✗ ", "");

/// Compare generated files on disk with a fresh render, without writing
#[derive(Debug, Clone, clap::Args)]
pub struct CheckCommand {
    /// Entity object names
    #[arg(required = true, value_name = "ENTITY")]
    pub entities: Vec<String>,

    /// Settings that replace or extend the configuration file
    #[command(flatten)]
    pub overrides: OverrideArgs,
}

impl CheckCommand {
    /// Execute the command
    ///
    /// Returns `true` when every file is up to date.
    ///
    /// # Errors
    ///
    /// Returns an error if an entity name is invalid or a file cannot be read.
    pub fn execute(&self, config: &CrudgenConfig) -> Result<bool> {
        let generator =
            Generator::new(config.runtime.clone()).context("Failed to create generator")?;
        let mut stale = 0_usize;

        for entity in &self.entities {
            let descriptor = EntityDescriptor::new(entity, &self.overrides.options_for(config, entity))
                .with_context(|| format!("Invalid entity '{entity}'"))?;
            let checks = generator
                .check(&descriptor)
                .with_context(|| format!("Failed to check '{entity}'"))?;

            for check in checks {
                if check.is_stale() {
                    stale += 1;
                    print_stale(&check);
                } else {
                    println!(
                        "{}{}",
                        style(CHECK).green(),
                        style(check.path.display()).dim()
                    );
                }
            }
        }

        if stale == 0 {
            println!("\n{}", style("All generated files are up to date").green().bold());
        } else {
            println!(
                "\n{} {} stale file(s); run {} to regenerate",
                style("Found").red().bold(),
                stale,
                style("crudgen generate").yellow()
            );
        }

        Ok(stale == 0)
    }
}

fn print_stale(check: &FileCheck) {
    let Some(current) = &check.current else {
        println!(
            "{}{} {}",
            style(CROSS).red(),
            check.path.display(),
            style("(missing)").red()
        );
        return;
    };

    println!(
        "{}{} {}",
        style(CROSS).red(),
        check.path.display(),
        style("(differs)").yellow()
    );

    let diff = TextDiff::from_lines(current, &check.expected);
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Delete => {
                print!("{}", style(format!("-{change}")).red());
            }
            ChangeTag::Insert => {
                print!("{}", style(format!("+{change}")).green());
            }
            ChangeTag::Equal => {
                print!(" {change}");
            }
        }
    }
    println!();
}
