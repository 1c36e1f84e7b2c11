//! Service (business-logic) artifact
//!
//! Every method forwards to the like-named repository method. The class exists
//! so business rules have a place to go without touching generated data access.

use super::{delegate_body, import_types, PARAMS};
use crate::artifact::{
    Artifact, ArtifactBuilder, ArtifactKind, Collaborator, Decorator, ImportOrigin, Method,
    Parameter,
};
use crate::catalog::CATALOG;
use crate::config::RuntimeModules;
use crate::entity::EntityDescriptor;
use std::collections::BTreeSet;

/// Build the service artifact: one delegate per catalog entry
#[must_use]
pub fn build(descriptor: &EntityDescriptor, runtime: &RuntimeModules) -> Artifact {
    let names = descriptor.names();
    let field = names.repository_field();
    let repository_class = names.repository_class();

    let collaborator = Collaborator {
        field: field.clone(),
        type_name: repository_class.clone(),
        decorator: None,
    };

    let mut builder = ArtifactBuilder::new(
        ArtifactKind::Service,
        descriptor.artifact_path(ArtifactKind::Service),
        names.service_class(),
        collaborator,
    )
    .decorator(Decorator::bare("Injectable"))
    .import(ImportOrigin::Runtime, &runtime.injectable, ["Injectable"])
    .import(
        ImportOrigin::Sibling,
        format!("./{}.repository", descriptor.object_name()),
        [repository_class],
    );

    let mut referenced = BTreeSet::new();
    for entry in &CATALOG {
        referenced.insert(entry.param);
        referenced.insert(entry.result);

        let method = entry.operation.method_name();
        builder = builder.method(Method {
            name: method.to_string(),
            parameter: Parameter {
                name: PARAMS.to_string(),
                type_name: names.type_name(entry.param),
            },
            return_type: names.type_name(entry.result),
            body: delegate_body(&field, method, PARAMS),
            binding: None,
        });
    }

    import_types(builder, descriptor, runtime, &referenced).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::repository;
    use crate::catalog::DELEGATE_TEMPLATE;
    use crate::entity::GenerateOptions;

    fn order() -> EntityDescriptor {
        EntityDescriptor::new("order", &GenerateOptions::default().base_dir("/work")).unwrap()
    }

    #[test]
    fn test_every_method_delegates_to_repository_method() {
        let runtime = RuntimeModules::default();
        let service = build(&order(), &runtime);
        let repository = repository::build(&order(), &runtime);

        assert_eq!(service.method_names(), repository.method_names());
        for method in &service.class.methods {
            assert_eq!(method.body.template, DELEGATE_TEMPLATE);
            assert_eq!(method.body.context["method"], method.name);
            assert_eq!(method.body.context["collaborator"], "orderRepository");
            assert_eq!(method.body.context["param"], "params");
        }
    }

    #[test]
    fn test_collaborator_and_sibling_import() {
        let artifact = build(&order(), &RuntimeModules::default());
        assert_eq!(artifact.class.name, "OrderService");
        assert_eq!(artifact.class.collaborator.type_name, "OrderRepository");
        assert!(artifact.class.collaborator.decorator.is_none());

        let sibling = artifact
            .imports
            .iter()
            .find(|import| import.origin == ImportOrigin::Sibling)
            .unwrap();
        assert_eq!(sibling.module, "./order.repository");
        assert_eq!(sibling.names, ["OrderRepository"]);
    }

    #[test]
    fn test_no_orm_or_exception_imports() {
        let artifact = build(&order(), &RuntimeModules::default());
        let names = artifact.imported_names();
        assert!(!names.contains(&"Repository"));
        assert!(!names.contains(&"BadRequest"));
        assert!(names.contains(&"OrderAggregate"));
    }
}
