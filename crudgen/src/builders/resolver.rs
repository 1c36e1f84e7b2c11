//! Resolver (GraphQL exposition) artifact
//!
//! Bindings from [`RESOLVER_BINDINGS`] are filtered by the entity's excludes
//! before anything else happens, and imports are computed from the survivors
//! only: an excluded field takes its argument/input type and, when it was the
//! last query or mutation, the matching GraphQL decorators with it.

use super::{delegate_body, import_types};
use crate::artifact::{
    Artifact, ArtifactBuilder, ArtifactKind, ArgumentStyle, BindingDirective, Collaborator,
    Decorator, ImportOrigin, Method, Parameter,
};
use crate::catalog::{OperationKind, ResolverBinding, RESOLVER_BINDINGS};
use crate::config::RuntimeModules;
use crate::entity::EntityDescriptor;
use crate::naming::TypeName;
use std::collections::BTreeSet;

/// Parameter name on resolver methods
const ARGS: &str = "args";

/// GraphQL argument name used by mutations
const INPUT_ARG: &str = "input";

/// Bindings that survive the entity's excludes, with their exposed names
///
/// Excludes that match no binding have no effect.
#[must_use]
pub fn surviving_bindings(descriptor: &EntityDescriptor) -> Vec<(String, &'static ResolverBinding)> {
    let names = descriptor.names();
    let exposed: Vec<_> = RESOLVER_BINDINGS
        .iter()
        .map(|binding| (binding.exposed.resolve(names), binding))
        .collect();

    for exclude in descriptor.excludes() {
        if !exposed.iter().any(|(name, _)| name == exclude) {
            tracing::debug!(
                entity = descriptor.object_name(),
                exclude = %exclude,
                "Exclude matches no resolver field"
            );
        }
    }

    exposed
        .into_iter()
        .filter(|(name, _)| {
            let excluded = descriptor.is_excluded(name);
            if excluded {
                tracing::debug!(
                    entity = descriptor.object_name(),
                    field = %name,
                    "Excluding resolver field"
                );
            }
            !excluded
        })
        .collect()
}

/// Binding directive for one surviving field
#[must_use]
pub fn directive(
    descriptor: &EntityDescriptor,
    exposed_name: &str,
    binding: &ResolverBinding,
) -> BindingDirective {
    let names = descriptor.names();
    let kind = binding.kind();

    BindingDirective {
        kind,
        exposed_name: exposed_name.to_string(),
        graphql_type: names.graphql_type(binding.result()),
        description: binding.description.to_string(),
        argument: match kind {
            OperationKind::Query => ArgumentStyle::Bag,
            OperationKind::Mutation => ArgumentStyle::Named(INPUT_ARG.to_string()),
        },
        delegates_to: binding.operation.method_name().to_string(),
    }
}

/// Build the resolver artifact
#[must_use]
pub fn build(descriptor: &EntityDescriptor, runtime: &RuntimeModules) -> Artifact {
    let names = descriptor.names();
    let model = names.model_name();
    let field = names.service_field();
    let service_class = names.service_class();

    let collaborator = Collaborator {
        field: field.clone(),
        type_name: service_class.clone(),
        decorator: None,
    };

    let mut builder = ArtifactBuilder::new(
        ArtifactKind::Resolver,
        descriptor.artifact_path(ArtifactKind::Resolver),
        names.resolver_class(),
        collaborator,
    )
    .decorator(Decorator::new("Resolver", [format!("() => {model}")]));

    // `@Resolver(() => Model)` needs the model even if every field is excluded.
    let mut referenced = BTreeSet::from([TypeName::Model]);
    let mut has_queries = false;
    let mut has_mutations = false;

    for (exposed_name, binding) in surviving_bindings(descriptor) {
        referenced.insert(binding.param());
        referenced.insert(binding.result());
        match binding.kind() {
            OperationKind::Query => has_queries = true,
            OperationKind::Mutation => has_mutations = true,
        }

        let directive = directive(descriptor, &exposed_name, binding);
        builder = builder.method(Method {
            name: exposed_name,
            parameter: Parameter {
                name: ARGS.to_string(),
                type_name: names.type_name(binding.param()),
            },
            return_type: names.type_name(binding.result()),
            body: delegate_body(&field, binding.operation.method_name(), ARGS),
            binding: Some(directive),
        });
    }

    let graphql_names = [
        Some("Resolver"),
        has_queries.then_some("Query"),
        has_mutations.then_some("Mutation"),
        has_mutations.then_some("Arg"),
        has_queries.then_some("Args"),
    ];

    builder = builder
        .import(ImportOrigin::Runtime, &runtime.graphql, graphql_names.into_iter().flatten())
        .import(
            ImportOrigin::Sibling,
            format!("./{}.service", descriptor.object_name()),
            [service_class],
        );

    import_types(builder, descriptor, runtime, &referenced).build()
}
