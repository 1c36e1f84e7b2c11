//! Identifier derivation for generated code
//!
//! Every name used by the three generated artifacts is derived from the entity's
//! object name (`lowerCamelCase`) by fixed concatenation rules:
//!
//! ```text
//! order  → Order, QueryOrderArgs, QueryOrdersArgs, OrderAggregateArgs,
//!          CreateOrderInput, UpdateOrderInput, UpdateManyOrderInput,
//!          UpsertOrderInput, DeleteOrderInput, OrderAggregate
//! ```
//!
//! The derivation is purely syntactic: no pluralization rules, no collision
//! checks. The object name is validated up front so that every derived name is
//! a valid TypeScript identifier.

use crate::error::{GeneratorError, Result};
use serde::Serialize;

/// Type names referenced by generated signatures
///
/// Resolved to concrete text by [`EntityNames::type_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TypeName {
    /// The entity model (`Order`)
    Model,
    /// A list of the entity model (`Order[]`)
    ModelList,
    /// Built-in `number`
    Number,
    /// Built-in `boolean`
    Boolean,
    /// `{Model}Aggregate`
    Aggregate,
    /// `Query{Model}Args`
    QueryArgs,
    /// `Query{Model}sArgs`
    QueryManyArgs,
    /// `{Model}AggregateArgs`
    AggregateArgs,
    /// `Create{Model}Input`
    CreateInput,
    /// `Update{Model}Input`
    UpdateInput,
    /// `Upsert{Model}Input`
    UpsertInput,
    /// `Delete{Model}Input`
    DeleteInput,
}

/// Where a referenced type is imported from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeOrigin {
    /// Language built-in, never imported
    Builtin,
    /// `@entity/{object}.entity`
    Entity,
    /// `{moduleDir}/{object}.type`
    Types,
    /// `{moduleDir}/{object}.input`
    Inputs,
    /// `{moduleDir}/{object}.args`
    Args,
}

impl TypeName {
    /// Import origin of this type
    #[must_use]
    pub const fn origin(self) -> TypeOrigin {
        match self {
            Self::Number | Self::Boolean => TypeOrigin::Builtin,
            Self::Model | Self::ModelList => TypeOrigin::Entity,
            Self::Aggregate => TypeOrigin::Types,
            Self::CreateInput
            | Self::UpdateInput
            | Self::UpsertInput
            | Self::DeleteInput => TypeOrigin::Inputs,
            Self::QueryArgs | Self::QueryManyArgs | Self::AggregateArgs => TypeOrigin::Args,
        }
    }
}

/// All names derived from one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityNames {
    object_name: String,
    model_name: String,
}

impl EntityNames {
    /// Derive names from an object name
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudgen::naming::EntityNames;
    /// let names = EntityNames::derive("order").unwrap();
    /// assert_eq!(names.model_name(), "Order");
    /// assert_eq!(names.query_args(), "QueryOrderArgs");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidEntityName`] if the name is empty, does
    /// not start with a lowercase ASCII letter, or contains anything other than
    /// ASCII letters, digits and underscores.
    pub fn derive(object_name: &str) -> Result<Self> {
        validate_object_name(object_name)?;

        // Validation guarantees an ASCII first character.
        let (first, rest) = object_name.split_at(1);
        let model_name = format!("{}{rest}", first.to_ascii_uppercase());

        Ok(Self {
            object_name: object_name.to_string(),
            model_name,
        })
    }

    /// Entity object name, e.g. `order`
    #[must_use]
    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// Entity model name, e.g. `Order`
    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// `Query{Model}Args`
    #[must_use]
    pub fn query_args(&self) -> String {
        format!("Query{}Args", self.model_name)
    }

    /// `Query{Model}sArgs`
    #[must_use]
    pub fn query_many_args(&self) -> String {
        format!("Query{}sArgs", self.model_name)
    }

    /// `{Model}AggregateArgs`
    #[must_use]
    pub fn aggregate_args(&self) -> String {
        format!("{}AggregateArgs", self.model_name)
    }

    /// `Create{Model}Input`
    #[must_use]
    pub fn create_input(&self) -> String {
        format!("Create{}Input", self.model_name)
    }

    /// `Update{Model}Input`
    #[must_use]
    pub fn update_input(&self) -> String {
        format!("Update{}Input", self.model_name)
    }

    /// `UpdateMany{Model}Input`
    #[must_use]
    pub fn update_many_input(&self) -> String {
        format!("UpdateMany{}Input", self.model_name)
    }

    /// `Upsert{Model}Input`
    #[must_use]
    pub fn upsert_input(&self) -> String {
        format!("Upsert{}Input", self.model_name)
    }

    /// `Delete{Model}Input`
    #[must_use]
    pub fn delete_input(&self) -> String {
        format!("Delete{}Input", self.model_name)
    }

    /// `{Model}Aggregate`
    #[must_use]
    pub fn aggregate(&self) -> String {
        format!("{}Aggregate", self.model_name)
    }

    /// Resolve a [`TypeName`] to the TypeScript type text
    #[must_use]
    pub fn type_name(&self, name: TypeName) -> String {
        match name {
            TypeName::Model => self.model_name.clone(),
            TypeName::ModelList => format!("{}[]", self.model_name),
            TypeName::Number => "number".to_string(),
            TypeName::Boolean => "boolean".to_string(),
            TypeName::Aggregate => self.aggregate(),
            TypeName::QueryArgs => self.query_args(),
            TypeName::QueryManyArgs => self.query_many_args(),
            TypeName::AggregateArgs => self.aggregate_args(),
            TypeName::CreateInput => self.create_input(),
            TypeName::UpdateInput => self.update_input(),
            TypeName::UpsertInput => self.upsert_input(),
            TypeName::DeleteInput => self.delete_input(),
        }
    }

    /// Name of the symbol to import for a [`TypeName`], if any
    ///
    /// `Order[]` imports `Order`; built-ins import nothing.
    #[must_use]
    pub fn import_symbol(&self, name: TypeName) -> Option<String> {
        match name {
            TypeName::Number | TypeName::Boolean => None,
            TypeName::ModelList => Some(self.model_name.clone()),
            other => Some(self.type_name(other)),
        }
    }

    /// Resolve a [`TypeName`] to its GraphQL type expression
    ///
    /// Used inside `() => ...` type thunks of resolver decorators.
    #[must_use]
    pub fn graphql_type(&self, name: TypeName) -> String {
        match name {
            TypeName::ModelList => format!("[{}]", self.model_name),
            TypeName::Number => "Number".to_string(),
            TypeName::Boolean => "Boolean".to_string(),
            other => self.type_name(other),
        }
    }

    /// `{Model}Repository`
    #[must_use]
    pub fn repository_class(&self) -> String {
        format!("{}Repository", self.model_name)
    }

    /// `{Model}Service`
    #[must_use]
    pub fn service_class(&self) -> String {
        format!("{}Service", self.model_name)
    }

    /// `{Model}CrudResolver`
    #[must_use]
    pub fn resolver_class(&self) -> String {
        format!("{}CrudResolver", self.model_name)
    }

    /// Constructor field holding the ORM handle or the repository: `{object}Repository`
    #[must_use]
    pub fn repository_field(&self) -> String {
        format!("{}Repository", self.object_name)
    }

    /// Constructor field holding the service: `{object}Service`
    #[must_use]
    pub fn service_field(&self) -> String {
        format!("{}Service", self.object_name)
    }
}

/// Check that an object name can be used as an identifier stem
fn validate_object_name(name: &str) -> Result<()> {
    let reject = |reason| {
        Err(GeneratorError::InvalidEntityName {
            name: name.to_string(),
            reason,
        })
    };

    let Some(first) = name.chars().next() else {
        return reject("name cannot be empty");
    };

    if !first.is_ascii_lowercase() {
        return reject("must start with a lowercase ASCII letter (lowerCamelCase)");
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return reject("only ASCII letters, digits and underscores are allowed");
    }

    Ok(())
}
