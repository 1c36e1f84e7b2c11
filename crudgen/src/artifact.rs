//! In-memory description of one generated file
//!
//! Builders assemble an [`Artifact`] with [`ArtifactBuilder`]; the renderer in
//! [`crate::emit`] turns it into text. Decorators and binding directives are
//! plain data here and only become source text at render time.

use crate::catalog::OperationKind;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// The three generated layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Data-access class
    Repository,
    /// Business-logic class
    Service,
    /// GraphQL exposition class
    Resolver,
}

impl ArtifactKind {
    /// All layers, in generation order
    pub const ALL: [Self; 3] = [Self::Repository, Self::Service, Self::Resolver];

    /// Lowercase layer name, used in file names
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Repository => "repository",
            Self::Service => "service",
            Self::Resolver => "resolver",
        }
    }

    /// File name for an entity, e.g. `order.service.ts`
    #[must_use]
    pub fn file_name(self, object_name: &str) -> String {
        format!("{object_name}.{}.ts", self.as_str())
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decorator application, e.g. `@InjectRepository(Order)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decorator {
    /// Decorator name without `@`
    pub name: String,
    /// Argument expressions, verbatim
    pub arguments: Vec<String>,
}

impl Decorator {
    /// Create a decorator
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a decorator called without arguments, e.g. `@Injectable()`
    #[must_use]
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }
}

/// Where an import comes from
///
/// Import groups are emitted in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ImportOrigin {
    /// Runtime libraries (DI, ORM, GraphQL, exceptions)
    Runtime,
    /// Another generated class of the same entity
    Sibling,
    /// The entity model
    Entity,
    /// Generated aggregate type
    Types,
    /// Generated input types
    Inputs,
    /// Generated argument types
    Args,
}

/// One import statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Import {
    /// Group the import belongs to
    pub origin: ImportOrigin,
    /// Module specifier
    pub module: String,
    /// Imported symbols, in first-use order
    pub names: Vec<String>,
}

/// The single injected constructor collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collaborator {
    /// Private field name
    pub field: String,
    /// Field type
    pub type_name: String,
    /// Parameter decorator, if any
    pub decorator: Option<Decorator>,
}

/// How a resolver method receives its argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "style", content = "name", rename_all = "lowercase")]
pub enum ArgumentStyle {
    /// All GraphQL arguments as one bag (`@Args()`)
    Bag,
    /// One named GraphQL argument (`@Arg('input')`)
    Named(String),
}

/// Registration data for one exposed resolver field
///
/// Consumed by the renderer to produce `@Query`/`@Mutation` and `@Args`/`@Arg`
/// decorators, and serializable for external registration steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingDirective {
    /// Query or mutation
    pub kind: OperationKind,
    /// Exposed field name
    pub exposed_name: String,
    /// GraphQL result type expression
    pub graphql_type: String,
    /// Field description
    pub description: String,
    /// Argument style
    pub argument: ArgumentStyle,
    /// Service method the field delegates to
    pub delegates_to: String,
}

/// The parameter of a generated method
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub type_name: String,
}

/// A method body: a registered template and its variables
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodBody {
    /// Registered template name
    pub template: String,
    /// Template variables
    pub context: BTreeMap<&'static str, String>,
}

/// One async method of the generated class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Method {
    /// Method name
    pub name: String,
    /// Single parameter
    pub parameter: Parameter,
    /// Resolved type, wrapped in `Promise<...>` when rendered
    pub return_type: String,
    /// Body
    pub body: MethodBody,
    /// Resolver registration data
    pub binding: Option<BindingDirective>,
}

/// The generated class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassDecl {
    /// Class name
    pub name: String,
    /// Class decorators
    pub decorators: Vec<Decorator>,
    /// Constructor collaborator
    pub collaborator: Collaborator,
    /// Methods, in emission order
    pub methods: Vec<Method>,
}

/// One generated file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    /// Layer
    pub kind: ArtifactKind,
    /// Target path
    pub path: PathBuf,
    /// Imports, grouped by origin
    pub imports: Vec<Import>,
    /// Class declaration
    pub class: ClassDecl,
}

impl Artifact {
    /// Target path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Method names, in emission order
    #[must_use]
    pub fn method_names(&self) -> Vec<&str> {
        self.class.methods.iter().map(|m| m.name.as_str()).collect()
    }

    /// Every imported symbol, across all groups
    #[must_use]
    pub fn imported_names(&self) -> Vec<&str> {
        self.imports
            .iter()
            .flat_map(|import| import.names.iter().map(String::as_str))
            .collect()
    }

    /// Binding directives of all methods that carry one
    #[must_use]
    pub fn bindings(&self) -> Vec<&BindingDirective> {
        self.class
            .methods
            .iter()
            .filter_map(|m| m.binding.as_ref())
            .collect()
    }
}

/// Builder for [`Artifact`]
#[derive(Debug)]
pub struct ArtifactBuilder {
    kind: ArtifactKind,
    path: PathBuf,
    imports: Vec<Import>,
    class: ClassDecl,
}

impl ArtifactBuilder {
    /// Start an artifact for a class with its constructor collaborator
    #[must_use]
    pub fn new(
        kind: ArtifactKind,
        path: impl Into<PathBuf>,
        class_name: impl Into<String>,
        collaborator: Collaborator,
    ) -> Self {
        Self {
            kind,
            path: path.into(),
            imports: Vec::new(),
            class: ClassDecl {
                name: class_name.into(),
                decorators: Vec::new(),
                collaborator,
                methods: Vec::new(),
            },
        }
    }

    /// Add a class decorator
    #[must_use]
    pub fn decorator(mut self, decorator: Decorator) -> Self {
        self.class.decorators.push(decorator);
        self
    }

    /// Import symbols from a module
    ///
    /// Imports from a module already present are merged into its statement;
    /// duplicate symbols are dropped. An empty symbol list adds nothing.
    #[must_use]
    pub fn import<I, S>(mut self, origin: ImportOrigin, module: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let module = module.into();
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return self;
        }

        let index = self
            .imports
            .iter()
            .position(|import| import.module == module)
            .unwrap_or_else(|| {
                self.imports.push(Import {
                    origin,
                    module,
                    names: Vec::new(),
                });
                self.imports.len() - 1
            });

        let import = &mut self.imports[index];
        for name in names {
            if !import.names.contains(&name) {
                import.names.push(name);
            }
        }
        self
    }

    /// Append a method
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.class.methods.push(method);
        self
    }

    /// Finish the artifact
    ///
    /// Import groups are ordered by [`ImportOrigin`]; statements within a group
    /// keep insertion order.
    #[must_use]
    pub fn build(mut self) -> Artifact {
        self.imports.sort_by_key(|import| import.origin);
        Artifact {
            kind: self.kind,
            path: self.path,
            imports: self.imports,
            class: self.class,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collaborator() -> Collaborator {
        Collaborator {
            field: "orderRepository".to_string(),
            type_name: "OrderRepository".to_string(),
            decorator: None,
        }
    }

    #[test]
    fn test_file_name() {
        assert_eq!(ArtifactKind::Service.file_name("order"), "order.service.ts");
        assert_eq!(ArtifactKind::ALL.len(), 3);
    }

    #[test]
    fn test_imports_merge_and_dedup() {
        let artifact = ArtifactBuilder::new(ArtifactKind::Service, "x.ts", "OrderService", collaborator())
            .import(ImportOrigin::Inputs, "@order/order.input", ["CreateOrderInput"])
            .import(ImportOrigin::Inputs, "@order/order.input", ["CreateOrderInput", "DeleteOrderInput"])
            .build();

        assert_eq!(artifact.imports.len(), 1);
        assert_eq!(artifact.imports[0].names, ["CreateOrderInput", "DeleteOrderInput"]);
    }

    #[test]
    fn test_empty_import_is_skipped() {
        let artifact = ArtifactBuilder::new(ArtifactKind::Service, "x.ts", "OrderService", collaborator())
            .import(ImportOrigin::Types, "@order/order.type", Vec::<String>::new())
            .build();

        assert!(artifact.imports.is_empty());
    }

    #[test]
    fn test_groups_sorted_by_origin() {
        let artifact = ArtifactBuilder::new(ArtifactKind::Service, "x.ts", "OrderService", collaborator())
            .import(ImportOrigin::Args, "@order/order.args", ["QueryOrderArgs"])
            .import(ImportOrigin::Entity, "@entity/order.entity", ["Order"])
            .import(ImportOrigin::Runtime, "@tiejs/common", ["Injectable"])
            .build();

        let modules: Vec<_> = artifact.imports.iter().map(|i| i.module.as_str()).collect();
        assert_eq!(modules, ["@tiejs/common", "@entity/order.entity", "@order/order.args"]);
    }

    #[test]
    fn test_decorator_arguments() {
        let decorator = Decorator::new("InjectRepository", ["Order"]);
        assert_eq!(decorator.name, "InjectRepository");
        assert_eq!(decorator.arguments, vec!["Order".to_string()]);
    }
}
