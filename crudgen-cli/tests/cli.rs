//! Integration tests for the crudgen binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn crudgen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_crudgen"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap()
}

/// Test that generate writes the three files under the working directory
#[test]
fn test_generate_writes_files() {
    let temp_dir = TempDir::new().unwrap();

    let output = crudgen(temp_dir.path(), &["generate", "order"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    for layer in ["repository", "service", "resolver"] {
        let path = temp_dir.path().join(format!("generated/order/order.{layer}.ts"));
        assert!(path.is_file(), "missing {}", path.display());
    }
}

/// Test that --only limits the written layers
#[test]
fn test_generate_only_resolver() {
    let temp_dir = TempDir::new().unwrap();

    let output = crudgen(temp_dir.path(), &["generate", "order", "--only", "resolver"]);

    assert!(output.status.success());
    assert!(temp_dir.path().join("generated/order/order.resolver.ts").is_file());
    assert!(!temp_dir.path().join("generated/order/order.service.ts").exists());
}

/// Test that entity settings from crudgen.toml apply and flags add to them
#[test]
fn test_config_file_and_flags() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("crudgen.toml"),
        r#"
base_dir = "src"

[entities.order]
excludes = ["deleteOrder"]
relations = "['items']"
"#,
    )
    .unwrap();

    let output = crudgen(
        temp_dir.path(),
        &["generate", "order", "--exclude", "orderAggregate"],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let base = temp_dir.path().join("src/generated/order");
    let resolver = fs::read_to_string(base.join("order.resolver.ts")).unwrap();
    assert!(!resolver.contains("deleteOrder"));
    assert!(!resolver.contains("orderAggregate"));
    let repository = fs::read_to_string(base.join("order.repository.ts")).unwrap();
    assert!(repository.contains("relations: ['items']"));
}

/// Test that check passes after generate and fails after an edit
#[test]
fn test_check_detects_stale_files() {
    let temp_dir = TempDir::new().unwrap();

    assert!(!crudgen(temp_dir.path(), &["check", "order"]).status.success());
    assert!(crudgen(temp_dir.path(), &["generate", "order"]).status.success());
    assert!(crudgen(temp_dir.path(), &["check", "order"]).status.success());

    fs::write(
        temp_dir.path().join("generated/order/order.service.ts"),
        "// edited\n",
    )
    .unwrap();

    let output = crudgen(temp_dir.path(), &["check", "order"]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("order.service.ts"));
    assert!(stdout.contains("-// edited"));
}

/// Test that bindings prints JSON for the surviving fields
#[test]
fn test_bindings_json() {
    let temp_dir = TempDir::new().unwrap();

    let output = crudgen(
        temp_dir.path(),
        &["bindings", "order", "--exclude", "deleteOrder"],
    );

    assert!(output.status.success());
    let bindings: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = bindings
        .as_array()
        .unwrap()
        .iter()
        .map(|binding| binding["exposed_name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        ["order", "orders", "orderAggregate", "createOrder", "updateOrder", "updateManyOrders", "upsertOrder"]
    );
}

/// Test that an invalid entity name fails without writing
#[test]
fn test_invalid_entity_fails() {
    let temp_dir = TempDir::new().unwrap();

    let output = crudgen(temp_dir.path(), &["generate", "Order"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid entity"));
    assert!(!temp_dir.path().join("generated").exists());
}

/// Test that the catalog lists every operation
#[test]
fn test_catalog_lists_operations() {
    let temp_dir = TempDir::new().unwrap();

    let output = crudgen(temp_dir.path(), &["catalog", "order"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for operation in ["findOne", "findMany", "count", "aggregate", "create", "update", "upsert", "delete"] {
        assert!(stdout.contains(operation), "missing {operation}");
    }
}
