//! Per-layer artifact builders
//!
//! Each builder turns an [`EntityDescriptor`] and the [`crate::catalog`] into an
//! [`Artifact`](crate::artifact::Artifact). Builders are pure: nothing is
//! rendered or written here, and no builder depends on another's output.

pub mod repository;
pub mod resolver;
pub mod service;

use crate::artifact::{ArtifactBuilder, ImportOrigin, MethodBody};
use crate::config::RuntimeModules;
use crate::entity::EntityDescriptor;
use crate::naming::{TypeName, TypeOrigin};
use std::collections::{BTreeMap, BTreeSet};

/// Parameter name on repository and service methods
const PARAMS: &str = "params";

/// Import every generated or model type in `referenced`, grouped by origin
///
/// Built-ins are skipped and `Order[]` imports `Order`, so the statements hold
/// exactly the symbols the signatures use.
fn import_types(
    builder: ArtifactBuilder,
    descriptor: &EntityDescriptor,
    runtime: &RuntimeModules,
    referenced: &BTreeSet<TypeName>,
) -> ArtifactBuilder {
    let names = descriptor.names();
    let symbols = |origin: TypeOrigin| -> Vec<String> {
        referenced
            .iter()
            .filter(|type_name| type_name.origin() == origin)
            .filter_map(|&type_name| names.import_symbol(type_name))
            .collect()
    };

    builder
        .import(
            ImportOrigin::Entity,
            format!("{}/{}.entity", runtime.entity_dir, descriptor.object_name()),
            symbols(TypeOrigin::Entity),
        )
        .import(
            ImportOrigin::Types,
            descriptor.sibling_module("type"),
            symbols(TypeOrigin::Types),
        )
        .import(
            ImportOrigin::Inputs,
            descriptor.sibling_module("input"),
            symbols(TypeOrigin::Inputs),
        )
        .import(
            ImportOrigin::Args,
            descriptor.sibling_module("args"),
            symbols(TypeOrigin::Args),
        )
}

/// Body of a method that forwards its parameter to the collaborator
fn delegate_body(collaborator: &str, method: &str, param: &str) -> MethodBody {
    MethodBody {
        template: crate::catalog::DELEGATE_TEMPLATE.to_string(),
        context: body_context(collaborator, method, param),
    }
}

fn body_context(collaborator: &str, method: &str, param: &str) -> BTreeMap<&'static str, String> {
    BTreeMap::from([
        ("collaborator", collaborator.to_string()),
        ("method", method.to_string()),
        ("param", param.to_string()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{ArtifactKind, Collaborator};
    use crate::entity::GenerateOptions;

    #[test]
    fn test_import_types_groups_and_dedups_model() {
        let descriptor =
            EntityDescriptor::new("order", &GenerateOptions::default().base_dir("/work")).unwrap();
        let referenced = BTreeSet::from([
            TypeName::Model,
            TypeName::ModelList,
            TypeName::Boolean,
            TypeName::DeleteInput,
            TypeName::QueryArgs,
        ]);
        let builder = ArtifactBuilder::new(
            ArtifactKind::Service,
            "x.ts",
            "OrderService",
            Collaborator {
                field: "orderRepository".to_string(),
                type_name: "OrderRepository".to_string(),
                decorator: None,
            },
        );

        let artifact =
            import_types(builder, &descriptor, &RuntimeModules::default(), &referenced).build();

        let statements: Vec<_> = artifact
            .imports
            .iter()
            .map(|import| (import.module.as_str(), import.names.clone()))
            .collect();
        assert_eq!(
            statements,
            vec![
                ("@entity/order.entity", vec!["Order".to_string()]),
                ("@order/order.input", vec!["DeleteOrderInput".to_string()]),
                ("@order/order.args", vec!["QueryOrderArgs".to_string()]),
            ]
        );
    }
}
