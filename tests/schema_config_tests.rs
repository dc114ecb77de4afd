//! Loading page schemas from YAML files

use fleetdesk::prelude::*;
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

const BASE: &str = r#"
pages:
  - name: advance_payment
    rules:
      - path: customer
        check: non_empty
        message: Select a customer
      - path: amount
        check: greater_than_zero
        message: Amount must be greater than 0
      - path: paymentMode
        check: one_of
        values: [cash, upi, cheque]
      - path: chequeNumber
        check: non_empty
        message: Cheque number is required
        when: { path: paymentMode, equals: cheque }
    columns:
      - { label: Customer, path: customer.name }
      - { label: Amount, path: amount }
    references:
      - path: customer
"#;

const OVERRIDE: &str = r#"
pages:
  - name: advance_payment
    rules:
      - path: amount
        check: greater_than_zero
  - name: supplier
    rules:
      - path: contact
        check: contact
"#;

fn write_yaml(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_file_and_validate() {
    let file = write_yaml(BASE);
    let config = SchemaConfig::from_yaml_file(file.path()).unwrap();
    let page = config.page("advance_payment").unwrap();

    let payload = json!({ "customer": "c1", "amount": 100, "paymentMode": "cheque" });
    let result = validate_payload(&page.rules_for(&payload).unwrap(), &payload);
    assert_eq!(result.error_for("chequeNumber"), Some("Cheque number is required"));

    let payload = json!({ "customer": "c1", "amount": 100, "paymentMode": "cash" });
    assert!(validate_payload(&page.rules_for(&payload).unwrap(), &payload).is_valid);
}

#[test]
fn test_columns_resolve_normalized_records() {
    let config = SchemaConfig::from_yaml_str(BASE).unwrap();
    let page = config.page("advance_payment").unwrap();

    let records = vec![
        normalize_references(&json!({ "customer": "c1", "amount": 250 }), &page.references),
        normalize_references(
            &json!({ "customer": { "_id": "c2", "name": "Meera" } }),
            &page.references,
        ),
    ];
    let table = resolve_table(&records, &page.columns().unwrap());

    assert_eq!(table[0][0].value, "c1");
    assert_eq!(table[0][1].value, "250");
    assert_eq!(table[1][0].value, "Meera");
    assert_eq!(table[1][1].value, PLACEHOLDER);
}

#[test]
fn test_merge_files_later_page_wins() {
    let base = SchemaConfig::from_yaml_file(write_yaml(BASE).path()).unwrap();
    let extra = SchemaConfig::from_yaml_file(write_yaml(OVERRIDE).path()).unwrap();

    let merged = SchemaConfig::merge(vec![base, extra]);
    assert_eq!(merged.pages.len(), 2);

    let page = merged.page("advance_payment").unwrap();
    assert_eq!(page.rules.len(), 1);
    assert!(page.columns.is_empty());

    let result = validate_payload(&page.rules_for(&json!({})).unwrap(), &json!({}));
    assert_eq!(result.error_for("amount"), Some("Must be greater than 0"));
}

#[test]
fn test_missing_file_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = SchemaConfig::from_yaml_file(dir.path().join("pages.yaml")).unwrap_err();

    assert!(matches!(err, ConfigError::FileNotFound { .. }));
    assert!(err.to_string().contains("pages.yaml"));
}

#[test]
fn test_malformed_file_names_the_file() {
    let file = write_yaml("pages:\n  - name: [unclosed\n");
    let err = SchemaConfig::from_yaml_file(file.path()).unwrap_err();

    assert!(matches!(err, ConfigError::ParseError { file: Some(_), .. }));
    assert!(err.to_string().starts_with("Failed to parse schema config '"));
}
