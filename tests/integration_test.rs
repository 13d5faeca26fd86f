use handler_doc_filters::{
    cli::render_report,
    config::DocumentationConfig,
    diagnostics::Diagnostic,
    documenter::DocumentationPipeline,
    metadata::attributes::AttributeMetadataProvider,
    model::{ControllerDocumentation, HttpMethod, ParamLocation, ValueConstraint},
    parser::{AstParser, ParsedFile},
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Helper function to write the fixture to disk and parse it back
fn parse_fixture() -> (TempDir, ParsedFile) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("pet_controller.rs");
    std::fs::write(&path, include_str!("fixtures/pet_controller.rs"))
        .expect("Failed to write test file");
    let parsed = AstParser::parse_file(&path).expect("Failed to parse fixture");
    (temp_dir, parsed)
}

fn document(parsed: &ParsedFile, controller: &str) -> ControllerDocumentation {
    let item = parsed
        .find_controller(controller)
        .expect("Controller not found in fixture");
    DocumentationPipeline::new(DocumentationConfig::default())
        .document(&AttributeMetadataProvider::new(item))
}

#[test]
fn test_routes_are_grouped() {
    let (_dir, parsed) = parse_fixture();
    let documentation = document(&parsed, "PetController");

    assert_eq!(documentation.resource_path(), "/pets");
    let paths: Vec<&str> = documentation.apis().keys().map(String::as_str).collect();
    assert_eq!(paths, vec!["/pets", "/pets/owner", "/pets/{id}"]);
    assert_eq!(documentation.apis()["/pets"].len(), 2);

    for path in documentation.apis().keys() {
        assert!(!path.contains("//"), "doubled separator in {}", path);
    }
}

#[test]
fn test_list_operation() {
    let (_dir, parsed) = parse_fixture();
    let documentation = document(&parsed, "PetController");
    let list = documentation.operation("list_pets").unwrap();

    assert_eq!(list.http_method, HttpMethod::Get);
    assert_eq!(list.summary, "List pets");
    assert_eq!(list.notes, "Paged listing");
    assert_eq!(list.tags, vec!["pets".to_string(), "store".to_string()]);
    assert_eq!(list.response_class.as_deref(), Some("Array[Pet]"));

    let status = list.parameter("status").unwrap();
    assert_eq!(status.param_type, ParamLocation::Query);
    assert_eq!(status.data_type.as_deref(), Some("Array[String]"));
    assert_eq!(status.description, "Filter by status");
    assert_eq!(status.default_value, "available");
    assert!(status.allow_multiple);
    assert!(!status.required);
    assert_eq!(
        status.allowable_values,
        Some(ValueConstraint::List(vec![
            "available".to_string(),
            "pending".to_string(),
            "sold".to_string()
        ]))
    );

    let size = list.parameter("pageSize").unwrap();
    assert_eq!(size.data_type.as_deref(), Some("u32"));
    assert_eq!(
        size.allowable_values,
        Some(ValueConstraint::Range {
            lower: "0".to_string(),
            upper: "101".to_string(),
            lower_inclusive: false,
            upper_inclusive: false,
        })
    );
}

#[test]
fn test_model_overrides() {
    let (_dir, parsed) = parse_fixture();
    let documentation = document(&parsed, "PetController");

    // impl Responder hides the type, so the declared model is accepted
    let find = documentation.operation("find_pet").unwrap();
    assert_eq!(find.response_class.as_deref(), Some("Pet"));

    let add = documentation.operation("add_pet").unwrap();
    assert_eq!(add.http_method, HttpMethod::Post);
    assert_eq!(add.summary, "Add a pet");
    assert_eq!(add.response_class.as_deref(), Some("Pet"));
    let body = add.parameter("body").unwrap();
    assert_eq!(body.param_type, ParamLocation::Body);
    assert_eq!(body.data_type.as_deref(), Some("PetInput"));
    assert!(body.required);

    // declared Owner disagrees with the inferred Pet
    let owner = documentation.operation("owner").unwrap();
    assert_eq!(owner.path, "/pets/owner");
    assert_eq!(owner.response_class.as_deref(), Some("Pet"));

    let models: Vec<(String, bool)> = documentation
        .models()
        .entries()
        .into_iter()
        .map(|m| (m.name, m.is_response_model))
        .collect();
    assert_eq!(
        models,
        vec![("NewPet".to_string(), false), ("Pet".to_string(), true)]
    );
}

#[test]
fn test_degraded_input_is_reported() {
    let (_dir, parsed) = parse_fixture();
    let documentation = document(&parsed, "PetController");

    let find = documentation.operation("find_pet").unwrap();
    assert_eq!(find.parameters.len(), 1, "HttpRequest should not be documented");
    let id = find.parameter("petId").unwrap();
    assert_eq!(id.param_type, ParamLocation::Path);
    assert_eq!(id.description, "ID of the pet");
    assert!(id.required);
    assert_eq!(id.allowable_values, None);

    let diagnostics = documentation.diagnostics().entries();
    assert_eq!(diagnostics.len(), 5);
    assert!(matches!(
        &diagnostics[0],
        Diagnostic::AmbiguousRouteTemplate { owner, .. } if owner == "PetController"
    ));
    assert!(matches!(
        &diagnostics[1],
        Diagnostic::AmbiguousRouteTemplate { owner, .. } if owner == "PetController::find_pet"
    ));
    assert!(matches!(
        &diagnostics[2],
        Diagnostic::MalformedConstraint { parameter, .. } if parameter == "find_pet(id)"
    ));
    assert!(matches!(
        &diagnostics[3],
        Diagnostic::ModelTypeMismatch { subject, .. } if subject == "owner"
    ));
    assert!(matches!(
        &diagnostics[4],
        Diagnostic::MissingMetadata { subject, .. } if subject == "owner(verbose)"
    ));
}

#[test]
fn test_controller_without_mapping() {
    let (_dir, parsed) = parse_fixture();
    let documentation = document(&parsed, "OrderController");

    assert_eq!(documentation.resource_path(), "/order-controller");
    let cancel = documentation.operation("cancel").unwrap();
    assert_eq!(cancel.path, "/orders/{id}");
    assert_eq!(cancel.http_method, HttpMethod::Delete);
    assert_eq!(cancel.response_class, None);
    assert_eq!(cancel.parameter("id").unwrap().data_type.as_deref(), Some("u64"));
}

#[test]
fn test_documenting_twice_is_stable() {
    let (_dir, parsed) = parse_fixture();
    let first = document(&parsed, "PetController");
    let second = document(&parsed, "PetController");

    assert_eq!(first.apis(), second.apis());
    assert_eq!(first.models().entries(), second.models().entries());
    assert_eq!(render_report(&first).unwrap(), render_report(&second).unwrap());
}

#[test]
fn test_custom_config_changes_documented_types() {
    let (dir, parsed) = parse_fixture();
    let config_path = dir.path().join("docs.yaml");
    std::fs::write(
        &config_path,
        "alternate_types:\n  u32: integer\nignorable_parameter_types: []\n",
    )
    .unwrap();
    let config = DocumentationConfig::from_path(&config_path).unwrap();

    let item = parsed.find_controller("PetController").unwrap();
    let documentation =
        DocumentationPipeline::new(config).document(&AttributeMetadataProvider::new(item));

    let find = documentation.operation("find_pet").unwrap();
    assert_eq!(find.parameters.len(), 2);
    assert_eq!(
        find.parameter("petId").unwrap().data_type.as_deref(),
        Some("integer")
    );
}
