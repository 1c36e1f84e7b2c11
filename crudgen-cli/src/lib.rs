//! crudgen CLI library
//!
//! Command implementations and logging setup for the `crudgen` binary.

pub mod commands;
pub mod observability;

pub use commands::{BindingsCommand, CatalogCommand, CheckCommand, GenerateCommand};
pub use observability::{LogFormat, ObservabilityConfig};
