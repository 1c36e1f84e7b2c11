//! crudgen: CRUD layer generator for TypeScript GraphQL services
//!
//! Given an entity name such as `order`, crudgen writes three coupled classes
//! under `{base}/generated/order/`:
//! - **Repository**: data access over an ORM repository of the model
//! - **Service**: one delegate per repository method
//! - **Resolver**: GraphQL queries and mutations delegating to the service
//!
//! All three are driven by one fixed [operation catalog](catalog), so the
//! method a resolver field calls always exists on the service, and the service
//! method always exists on the repository.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use crudgen::GenerateOptions;
//!
//! # fn main() -> crudgen::Result<()> {
//! let options = GenerateOptions::default()
//!     .base_dir("./src")
//!     .exclude("deleteOrder")
//!     .relations("['items']");
//!
//! for file in crudgen::generate("order", &options)?.files {
//!     println!("{} {}", file.status, file.path.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Runtime module names used in generated imports come from
//! [`RuntimeModules`], usually loaded from `crudgen.toml` via
//! [`CrudgenConfig`].

pub mod artifact;
pub mod builders;
pub mod catalog;
pub mod config;
pub mod emit;
pub mod entity;
pub mod error;
pub mod generator;
pub mod naming;

pub use artifact::{Artifact, ArtifactKind, BindingDirective};
pub use config::{CrudgenConfig, RuntimeModules};
pub use emit::WriteStatus;
pub use entity::{EntityDescriptor, GenerateOptions};
pub use error::{GeneratorError, Result};
pub use generator::{
    generate, generate_repository, generate_resolver, generate_service, FileCheck, GeneratedFile,
    GenerationReport, Generator,
};
pub use naming::EntityNames;
