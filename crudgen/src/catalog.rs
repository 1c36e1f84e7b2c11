//! Operation catalog
//!
//! The single source of truth for every generated method. [`CATALOG`] lists the
//! eight CRUD operations with their signatures and the repository body each one
//! compiles to; [`RESOLVER_BINDINGS`] lists how those operations are exposed on
//! the GraphQL resolver.
//!
//! Cross-layer consistency is structural: a resolver binding names its target
//! through [`Operation`], and service and repository methods are named by
//! [`Operation::method_name`], so a binding cannot delegate to a method that
//! the lower layers do not emit.
//!
//! Body templates are Handlebars sources rendered with these variables:
//!
//! | variable | meaning |
//! |---|---|
//! | `collaborator` | constructor field of the next layer down |
//! | `method` | method to call on the collaborator |
//! | `param` | name of the method's parameter |
//! | `relations` | relation eager-load expression |
//! | `exception` | exception class thrown on failure |
//! | `model` | entity model name |

use crate::naming::{EntityNames, TypeName};
use serde::Serialize;
use std::fmt;

/// Whether an operation reads or mutates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OperationKind {
    /// Read-only
    Query,
    /// Mutating
    Mutation,
}

impl OperationKind {
    /// Decorator name used on the resolver (`Query` / `Mutation`)
    #[must_use]
    pub const fn decorator(self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::Mutation => "Mutation",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.decorator())
    }
}

/// The eight catalog operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Operation {
    /// Look up one record
    FindOne,
    /// List records
    FindMany,
    /// Count records
    Count,
    /// Aggregate over records
    Aggregate,
    /// Create a record
    Create,
    /// Update a record
    Update,
    /// Update or create a record
    Upsert,
    /// Delete records
    Delete,
}

impl Operation {
    /// Method name on the repository and service layers
    #[must_use]
    pub const fn method_name(self) -> &'static str {
        match self {
            Self::FindOne => "findOne",
            Self::FindMany => "findMany",
            Self::Count => "count",
            Self::Aggregate => "aggregate",
            Self::Create => "create",
            Self::Update => "update",
            Self::Upsert => "upsert",
            Self::Delete => "delete",
        }
    }

    /// Position of this operation in [`CATALOG`]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::FindOne => 0,
            Self::FindMany => 1,
            Self::Count => 2,
            Self::Aggregate => 3,
            Self::Create => 4,
            Self::Update => 5,
            Self::Upsert => 6,
            Self::Delete => 7,
        }
    }

    /// Catalog entry for this operation
    #[must_use]
    pub const fn entry(self) -> &'static CatalogEntry {
        &CATALOG[self.index()]
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}

/// One catalog operation
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    /// Operation identity
    pub operation: Operation,
    /// Read-only or mutating
    pub kind: OperationKind,
    /// Parameter type
    pub param: TypeName,
    /// Result type (wrapped in `Promise<...>` on every layer)
    pub result: TypeName,
    /// Human-readable description
    pub description: &'static str,
    /// Repository implementation body
    pub repository_body: &'static str,
}

impl CatalogEntry {
    /// Handlebars template name of the repository body
    #[must_use]
    pub fn repository_template(&self) -> String {
        format!("repository.{}", self.operation.method_name())
    }
}

/// Body of every service and resolver method: forward the parameter unchanged.
pub const DELEGATE_BODY: &str = "return await this.{{collaborator}}.{{method}}({{param}})";

/// Handlebars template name of [`DELEGATE_BODY`]
pub const DELEGATE_TEMPLATE: &str = "delegate";

const FIND_ONE_BODY: &str = "\
const condition = { relations: {{relations}}, where: {{param}} } as any
const result = await this.{{collaborator}}.findOne(condition)
if (result) return result
throw new {{exception}}('{{model}} not found')";

const FIND_MANY_BODY: &str = "\
const { where = {}, first: take, skip, orderBy = 'id_ASC' } = {{param}}
const separator = orderBy.lastIndexOf('_')
const order = separator < 0
  ? { [orderBy]: 'ASC' }
  : { [orderBy.slice(0, separator)]: orderBy.slice(separator + 1) }
const condition = { relations: {{relations}}, where, take, skip, order } as any
return await this.{{collaborator}}.find(condition)";

const COUNT_BODY: &str = "return await this.{{collaborator}}.count({ ...{{param}}.where })";

const AGGREGATE_BODY: &str = "\
return {
  count: await this.count({{param}}),
}";

const CREATE_BODY: &str = "return await this.{{collaborator}}.save({{param}})";

const UPDATE_BODY: &str = "\
const { where = {}, data = {} } = {{param}}
const result = await this.findOne(where)
if (!result) throw new {{exception}}('{{model}} to update not found')

await this.{{collaborator}}.update(result.id, data)

// Merged locally: storage-side defaults and triggers are not read back.
return { ...result, ...data }";

const UPSERT_BODY: &str = "\
const { where, update, create } = {{param}}
try {
  await this.findOne(where)
  return await this.update({ where, data: update })
} catch (error) {
  return await this.create(create)
}";

const DELETE_BODY: &str = "\
const result = await this.{{collaborator}}.delete({{param}})
if (result.affected) return true
throw new {{exception}}('Failed to delete {{model}}, check the delete condition')";

/// The operation catalog, in emission order
pub static CATALOG: [CatalogEntry; 8] = [
    CatalogEntry {
        operation: Operation::FindOne,
        kind: OperationKind::Query,
        param: TypeName::QueryArgs,
        result: TypeName::Model,
        description: "Get one",
        repository_body: FIND_ONE_BODY,
    },
    CatalogEntry {
        operation: Operation::FindMany,
        kind: OperationKind::Query,
        param: TypeName::QueryManyArgs,
        result: TypeName::ModelList,
        description: "Get list",
        repository_body: FIND_MANY_BODY,
    },
    CatalogEntry {
        operation: Operation::Count,
        kind: OperationKind::Query,
        param: TypeName::AggregateArgs,
        result: TypeName::Number,
        description: "Count",
        repository_body: COUNT_BODY,
    },
    CatalogEntry {
        operation: Operation::Aggregate,
        kind: OperationKind::Query,
        param: TypeName::AggregateArgs,
        result: TypeName::Aggregate,
        description: "Aggregate query",
        repository_body: AGGREGATE_BODY,
    },
    CatalogEntry {
        operation: Operation::Create,
        kind: OperationKind::Mutation,
        param: TypeName::CreateInput,
        result: TypeName::Model,
        description: "Create",
        repository_body: CREATE_BODY,
    },
    CatalogEntry {
        operation: Operation::Update,
        kind: OperationKind::Mutation,
        param: TypeName::UpdateInput,
        result: TypeName::Model,
        description: "Update one",
        repository_body: UPDATE_BODY,
    },
    CatalogEntry {
        operation: Operation::Upsert,
        kind: OperationKind::Mutation,
        param: TypeName::UpsertInput,
        result: TypeName::Model,
        description: "Update or create",
        repository_body: UPSERT_BODY,
    },
    CatalogEntry {
        operation: Operation::Delete,
        kind: OperationKind::Mutation,
        param: TypeName::DeleteInput,
        result: TypeName::Boolean,
        description: "Delete one",
        repository_body: DELETE_BODY,
    },
];

/// Pattern for a resolver's exposed field name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExposedName {
    /// `{object}{suffix}`, e.g. `orders`
    Object {
        /// Appended to the object name
        suffix: &'static str,
    },
    /// `{prefix}{Model}{suffix}`, e.g. `updateManyOrders`
    Model {
        /// Prepended to the model name
        prefix: &'static str,
        /// Appended to the model name
        suffix: &'static str,
    },
}

impl ExposedName {
    /// Resolve the pattern for an entity
    #[must_use]
    pub fn resolve(self, names: &EntityNames) -> String {
        match self {
            Self::Object { suffix } => format!("{}{suffix}", names.object_name()),
            Self::Model { prefix, suffix } => format!("{prefix}{}{suffix}", names.model_name()),
        }
    }
}

/// How an operation is exposed on the resolver
#[derive(Debug, Clone, Copy)]
pub struct ResolverBinding {
    /// Exposed field name pattern
    pub exposed: ExposedName,
    /// Service method the binding delegates to
    pub operation: Operation,
    /// Description carried by the binding directive
    pub description: &'static str,
}

impl ResolverBinding {
    /// Query or mutation, as declared by the delegated catalog entry
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        self.operation.entry().kind
    }

    /// Parameter type, as declared by the delegated catalog entry
    #[must_use]
    pub const fn param(&self) -> TypeName {
        self.operation.entry().param
    }

    /// Result type, as declared by the delegated catalog entry
    #[must_use]
    pub const fn result(&self) -> TypeName {
        self.operation.entry().result
    }
}

/// Resolver bindings, in emission order
///
/// `count` is only reachable through `aggregate`; `update` is exposed twice.
pub static RESOLVER_BINDINGS: [ResolverBinding; 8] = [
    ResolverBinding {
        exposed: ExposedName::Object { suffix: "" },
        operation: Operation::FindOne,
        description: "Get one",
    },
    ResolverBinding {
        exposed: ExposedName::Object { suffix: "s" },
        operation: Operation::FindMany,
        description: "Get list",
    },
    ResolverBinding {
        exposed: ExposedName::Object { suffix: "Aggregate" },
        operation: Operation::Aggregate,
        description: "Aggregate query",
    },
    ResolverBinding {
        exposed: ExposedName::Model { prefix: "create", suffix: "" },
        operation: Operation::Create,
        description: "Create",
    },
    ResolverBinding {
        exposed: ExposedName::Model { prefix: "update", suffix: "" },
        operation: Operation::Update,
        description: "Update one",
    },
    ResolverBinding {
        exposed: ExposedName::Model { prefix: "updateMany", suffix: "s" },
        operation: Operation::Update,
        description: "Update many",
    },
    ResolverBinding {
        exposed: ExposedName::Model { prefix: "upsert", suffix: "" },
        operation: Operation::Upsert,
        description: "Update or create",
    },
    ResolverBinding {
        exposed: ExposedName::Model { prefix: "delete", suffix: "" },
        operation: Operation::Delete,
        description: "Delete one",
    },
];

/// Every body template as `(name, source)`, for registration with the renderer
pub fn body_templates() -> impl Iterator<Item = (String, &'static str)> {
    CATALOG
        .iter()
        .map(|entry| (entry.repository_template(), entry.repository_body))
        .chain(std::iter::once((DELEGATE_TEMPLATE.to_string(), DELEGATE_BODY)))
}
