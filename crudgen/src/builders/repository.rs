//! Repository (data-access) artifact
//!
//! ```text
//! @Injectable()
//! export class OrderRepository {
//!   constructor(@InjectRepository(Order) private orderRepository: Repository<Order>) {}
//!   async findOne(params: QueryOrderArgs): Promise<Order> { ... }
//!   ...
//! }
//! ```

use super::{body_context, import_types, PARAMS};
use crate::artifact::{
    Artifact, ArtifactBuilder, ArtifactKind, Collaborator, Decorator, ImportOrigin, Method,
    MethodBody, Parameter,
};
use crate::catalog::CATALOG;
use crate::config::RuntimeModules;
use crate::entity::EntityDescriptor;
use crate::naming::TypeName;
use std::collections::BTreeSet;

/// Build the repository artifact: one method per catalog entry
#[must_use]
pub fn build(descriptor: &EntityDescriptor, runtime: &RuntimeModules) -> Artifact {
    let names = descriptor.names();
    let model = names.model_name();
    let field = names.repository_field();

    let collaborator = Collaborator {
        field: field.clone(),
        type_name: format!("Repository<{model}>"),
        decorator: Some(Decorator::new("InjectRepository", [model])),
    };

    let mut builder = ArtifactBuilder::new(
        ArtifactKind::Repository,
        descriptor.artifact_path(ArtifactKind::Repository),
        names.repository_class(),
        collaborator,
    )
    .decorator(Decorator::bare("Injectable"))
    .import(ImportOrigin::Runtime, &runtime.injectable, ["Injectable"])
    .import(ImportOrigin::Runtime, &runtime.inject_repository, ["InjectRepository"])
    .import(ImportOrigin::Runtime, &runtime.exception, [runtime.exception_class.as_str()])
    .import(ImportOrigin::Runtime, &runtime.orm, ["Repository"]);

    // The constructor's `Repository<Model>` needs the model even if no signature does.
    let mut referenced = BTreeSet::from([TypeName::Model]);

    for entry in &CATALOG {
        referenced.insert(entry.param);
        referenced.insert(entry.result);

        let mut context = body_context(&field, entry.operation.method_name(), PARAMS);
        context.insert("relations", descriptor.relations().to_string());
        context.insert("exception", runtime.exception_class.clone());
        context.insert("model", model.to_string());

        builder = builder.method(Method {
            name: entry.operation.method_name().to_string(),
            parameter: Parameter {
                name: PARAMS.to_string(),
                type_name: names.type_name(entry.param),
            },
            return_type: names.type_name(entry.result),
            body: MethodBody {
                template: entry.repository_template(),
                context,
            },
            binding: None,
        });
    }

    import_types(builder, descriptor, runtime, &referenced).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::GenerateOptions;

    fn order() -> EntityDescriptor {
        EntityDescriptor::new(
            "order",
            &GenerateOptions::default()
                .base_dir("/work")
                .relations("['items']")
                .exclude("deleteOrder"),
        )
        .unwrap()
    }

    #[test]
    fn test_all_catalog_methods_present() {
        let artifact = build(&order(), &RuntimeModules::default());
        assert_eq!(
            artifact.method_names(),
            ["findOne", "findMany", "count", "aggregate", "create", "update", "upsert", "delete"]
        );
    }

    #[test]
    fn test_signatures() {
        let artifact = build(&order(), &RuntimeModules::default());
        let signature = |name: &str| {
            let method = artifact.class.methods.iter().find(|m| m.name == name).unwrap();
            (method.parameter.type_name.clone(), method.return_type.clone())
        };

        assert_eq!(signature("findOne"), ("QueryOrderArgs".into(), "Order".into()));
        assert_eq!(signature("findMany"), ("QueryOrdersArgs".into(), "Order[]".into()));
        assert_eq!(signature("count"), ("OrderAggregateArgs".into(), "number".into()));
        assert_eq!(signature("aggregate"), ("OrderAggregateArgs".into(), "OrderAggregate".into()));
        assert_eq!(signature("create"), ("CreateOrderInput".into(), "Order".into()));
        assert_eq!(signature("update"), ("UpdateOrderInput".into(), "Order".into()));
        assert_eq!(signature("upsert"), ("UpsertOrderInput".into(), "Order".into()));
        assert_eq!(signature("delete"), ("DeleteOrderInput".into(), "boolean".into()));
    }

    #[test]
    fn test_excludes_do_not_apply_to_repository() {
        let artifact = build(&order(), &RuntimeModules::default());
        assert!(artifact.method_names().contains(&"delete"));
        assert!(artifact.imported_names().contains(&"DeleteOrderInput"));
    }

    #[test]
    fn test_imports_exactly_what_is_referenced() {
        let artifact = build(&order(), &RuntimeModules::default());
        assert_eq!(
            artifact.imported_names(),
            [
                "Injectable",
                "InjectRepository",
                "BadRequest",
                "Repository",
                "Order",
                "OrderAggregate",
                "CreateOrderInput",
                "UpdateOrderInput",
                "UpsertOrderInput",
                "DeleteOrderInput",
                "QueryOrderArgs",
                "QueryOrdersArgs",
                "OrderAggregateArgs",
            ]
        );
    }

    #[test]
    fn test_body_context_carries_relations() {
        let artifact = build(&order(), &RuntimeModules::default());
        let find_one = &artifact.class.methods[0];
        assert_eq!(find_one.body.template, "repository.findOne");
        assert_eq!(find_one.body.context["relations"], "['items']");
        assert_eq!(find_one.body.context["collaborator"], "orderRepository");
    }

    #[test]
    fn test_collaborator_is_injected_orm_handle() {
        let artifact = build(&order(), &RuntimeModules::default());
        let collaborator = &artifact.class.collaborator;
        assert_eq!(collaborator.type_name, "Repository<Order>");
        assert_eq!(
            collaborator.decorator,
            Some(Decorator::new("InjectRepository", ["Order"]))
        );
    }
}
