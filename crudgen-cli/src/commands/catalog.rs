//! `crudgen catalog`: print the operation catalog

use anyhow::{Context, Result};
use console::style;
use crudgen::catalog::{CATALOG, RESOLVER_BINDINGS};
use crudgen::EntityNames;

/// Print every operation and the resolver fields bound to it
#[derive(Debug, Clone, clap::Args)]
pub struct CatalogCommand {
    /// Entity whose names fill in the type patterns
    #[arg(value_name = "ENTITY", default_value = "entity")]
    pub entity: String,
}

impl CatalogCommand {
    /// Table rows: operation, kind, parameter, result, exposed fields
    ///
    /// # Errors
    ///
    /// Returns an error if the entity name is invalid.
    pub fn rows(&self) -> Result<Vec<[String; 5]>> {
        let names = EntityNames::derive(&self.entity)
            .with_context(|| format!("Invalid entity '{}'", self.entity))?;

        Ok(CATALOG
            .iter()
            .map(|entry| {
                let exposed: Vec<String> = RESOLVER_BINDINGS
                    .iter()
                    .filter(|binding| binding.operation == entry.operation)
                    .map(|binding| binding.exposed.resolve(&names))
                    .collect();

                [
                    entry.operation.method_name().to_string(),
                    entry.kind.to_string(),
                    names.type_name(entry.param),
                    names.type_name(entry.result),
                    if exposed.is_empty() {
                        "-".to_string()
                    } else {
                        exposed.join(", ")
                    },
                ]
            })
            .collect())
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the entity name is invalid.
    pub fn execute(&self) -> Result<()> {
        let header = ["operation", "kind", "parameter", "result", "resolver fields"];
        let rows = self.rows()?;

        let widths: Vec<usize> = (0..header.len())
            .map(|column| {
                rows.iter()
                    .map(|row| row[column].len())
                    .chain(std::iter::once(header[column].len()))
                    .max()
                    .unwrap_or_default()
            })
            .collect();

        let line = |cells: Vec<&str>| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        println!("{}", style(line(header.to_vec())).bold());
        for row in &rows {
            println!("{}", line(row.iter().map(String::as_str).collect()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_cover_catalog() {
        let command = CatalogCommand {
            entity: "order".to_string(),
        };
        let rows = command.rows().unwrap();

        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0], ["findOne", "Query", "QueryOrderArgs", "Order", "order"]);
        assert_eq!(rows[2][4], "-");
        assert_eq!(rows[5][4], "updateOrder, updateManyOrders");
    }

    #[test]
    fn test_invalid_entity() {
        let command = CatalogCommand {
            entity: "Order".to_string(),
        };
        assert!(command.rows().is_err());
    }
}
